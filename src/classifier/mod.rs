//! Naive Bayes classifiers behind a narrow train/classify interface.
//!
//! Feature extraction and evaluation only ever talk to [`Trainer`],
//! [`Classifier`] and [`Informative`], so either backend can be swapped in:
//!
//! - [`CategoricalNb`]: per-feature categorical naive Bayes with
//!   expected-likelihood smoothing
//! - [`MultinomialNbModel`]: one-hot encoded `(feature, value)` pairs fed to
//!   [`linfa_bayes::MultinomialNb`]

mod categorical;
mod multinomial;

pub use categorical::{CategoricalNb, CategoricalNbTrainer};
pub use multinomial::{MultinomialNbModel, MultinomialNbTrainer};

use crate::error::{Error, Result};
use crate::features::{FeatureExtractor, FeatureSet, FeatureValue, NameFeatures};
use rmp_serde::{decode::from_read, encode::write_named};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::Write;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::str::FromStr;

/// A feature set paired with its label.
pub type LabeledFeatureSet = (FeatureSet, String);

/// A trained model that assigns a label to a feature set.
pub trait Classifier {
    fn classify(&self, features: &FeatureSet) -> String;

    /// Labels seen during training, sorted.
    fn labels(&self) -> &[String];
}

/// Fits a [`Classifier`] on labeled feature sets.
pub trait Trainer {
    type Model: Classifier;

    fn train(&self, examples: &[LabeledFeatureSet]) -> Result<Self::Model>;
}

/// A `(feature, value)` pair ranked by how strongly it separates two labels.
#[derive(Debug, Clone, PartialEq)]
pub struct InformativeFeature {
    pub name: String,
    pub value: FeatureValue,
    /// Label under which this value is most likely
    pub likely: String,
    /// Label under which this value is least likely
    pub unlikely: String,
    /// `P(value | likely) / P(value | unlikely)`
    pub ratio: f64,
}

/// Models that can rank their features by informativeness.
pub trait Informative {
    fn most_informative_features(&self, n: usize) -> Vec<InformativeFeature>;
}

/// Ranks `(feature, value)` pairs given per-label probabilities of each pair.
///
/// `probabilities` yields, for each pair, one probability per label in
/// `labels` order. Pairs are sorted by descending ratio, then by name.
pub(crate) fn rank_informative<I>(
    labels: &[String],
    probabilities: I,
    n: usize,
) -> Vec<InformativeFeature>
where
    I: IntoIterator<Item = ((String, FeatureValue), Vec<f64>)>,
{
    let mut ranked: Vec<InformativeFeature> = probabilities
        .into_iter()
        .filter_map(|((name, value), probs)| {
            let (max_idx, max) = probs
                .iter()
                .copied()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(&b.1))?;
            let (min_idx, min) = probs
                .iter()
                .copied()
                .enumerate()
                .min_by(|a, b| a.1.total_cmp(&b.1))?;
            if min <= 0.0 || max_idx == min_idx {
                return None;
            }
            Some(InformativeFeature {
                name,
                value,
                likely: labels[max_idx].clone(),
                unlikely: labels[min_idx].clone(),
                ratio: max / min,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.ratio
            .total_cmp(&a.ratio)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.value.cmp(&b.value))
    });
    ranked.truncate(n);
    ranked
}

/// Fraction of `labeled` that `model` classifies correctly, in `[0, 1]`.
///
/// Takes a slice or a lazy iterator of feature sets. An empty evaluation set
/// scores 0.
pub fn accuracy<C, L>(model: &C, labeled: L) -> f64
where
    C: Classifier + ?Sized,
    L: IntoIterator,
    L::Item: Borrow<LabeledFeatureSet>,
{
    let (mut correct, mut total) = (0usize, 0usize);
    for example in labeled {
        let (features, label) = example.borrow();
        total += 1;
        if model.classify(features) == *label {
            correct += 1;
        }
    }
    if total == 0 {
        return 0.0;
    }
    correct as f64 / total as f64
}

/// Renders the `n` most informative features of `model`.
pub fn show_most_informative_features<M: Informative + ?Sized>(model: &M, n: usize) -> String {
    render_informative(&model.most_informative_features(n))
}

/// Renders ranked features under a `Most Informative Features` header.
///
/// Labels are cut to six characters to keep the columns aligned.
pub fn render_informative(features: &[InformativeFeature]) -> String {
    let mut out = String::from("Most Informative Features\n");
    for feature in features {
        let _ = writeln!(
            out,
            "{:>24} = {:<14} {:>6.6} : {:<6.6} = {:>8.1} : 1.0",
            feature.name, feature.value, feature.likely, feature.unlikely, feature.ratio
        );
    }
    out
}

/// Which naive Bayes implementation to train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    Categorical,
    Multinomial,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "categorical" => Ok(Backend::Categorical),
            "multinomial" => Ok(Backend::Multinomial),
            other => Err(format!("unknown backend {other:?}")),
        }
    }
}

/// A trained model of either backend.
#[derive(Serialize, Deserialize)]
pub enum AnyModel {
    Categorical(CategoricalNb),
    Multinomial(MultinomialNbModel),
}

impl Backend {
    pub fn train(self, examples: &[LabeledFeatureSet]) -> Result<AnyModel> {
        Ok(match self {
            Backend::Categorical => AnyModel::Categorical(CategoricalNbTrainer.train(examples)?),
            Backend::Multinomial => {
                AnyModel::Multinomial(MultinomialNbTrainer::default().train(examples)?)
            }
        })
    }
}

impl AnyModel {
    /// Probability of each label for `features`, in label order.
    pub fn label_probabilities(&self, features: &FeatureSet) -> Vec<(String, f64)> {
        match self {
            AnyModel::Categorical(model) => model.prob_classify(features),
            AnyModel::Multinomial(model) => model.predict_proba(features),
        }
    }
}

impl Classifier for AnyModel {
    fn classify(&self, features: &FeatureSet) -> String {
        match self {
            AnyModel::Categorical(model) => model.classify(features),
            AnyModel::Multinomial(model) => model.classify(features),
        }
    }

    fn labels(&self) -> &[String] {
        match self {
            AnyModel::Categorical(model) => model.labels(),
            AnyModel::Multinomial(model) => model.labels(),
        }
    }
}

impl Informative for AnyModel {
    fn most_informative_features(&self, n: usize) -> Vec<InformativeFeature> {
        match self {
            AnyModel::Categorical(model) => model.most_informative_features(n),
            AnyModel::Multinomial(model) => model.most_informative_features(n),
        }
    }
}

/// A name model together with the extractor it was trained on.
///
/// Persisting the two together means a loaded model always sees the same
/// feature names it was fit on.
#[derive(Serialize, Deserialize)]
pub struct NameModel {
    pub features: NameFeatures,
    pub model: AnyModel,
}

impl NameModel {
    pub fn new(features: NameFeatures, model: AnyModel) -> Self {
        Self { features, model }
    }

    pub fn classify_name(&self, name: &str) -> String {
        self.model.classify(&self.features.extract(name))
    }

    pub fn label_probabilities(&self, name: &str) -> Vec<(String, f64)> {
        self.model.label_probabilities(&self.features.extract(name))
    }

    pub fn labels(&self) -> &[String] {
        self.model.labels()
    }

    /// Saves the model to a binary `.msgpack` file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        let mut writer = BufWriter::new(file);
        write_named(&mut writer, self)?;
        tracing::info!(path = %path.display(), features = ?self.features, "saved model");
        Ok(())
    }

    /// Loads a model from a binary `.msgpack` file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let model: NameModel = from_read(BufReader::new(file))?;
        tracing::info!(path = %path.display(), features = ?model.features, "loaded model");
        Ok(model)
    }
}
