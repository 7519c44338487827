use super::{
    Classifier, Informative, InformativeFeature, LabeledFeatureSet, Trainer, rank_informative,
};
use crate::error::{Error, Result};
use crate::features::{FeatureSet, FeatureValue};
use linfa::prelude::*;
use linfa_bayes::MultinomialNb;
use linfa_bayes::NaiveBayes;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

type FeatureKey = (String, FeatureValue);

/// Multinomial naive Bayes over one-hot encoded `(feature, value)` pairs.
#[derive(Serialize, Deserialize)]
pub struct MultinomialNbModel {
    model: MultinomialNb<f64, usize>,
    labels: Vec<String>,
    /// Sorted; a key's position is its column.
    vocab: Vec<FeatureKey>,
    /// Per label, how many training examples carried each key.
    feat_freq: Vec<Vec<usize>>,
    label_counts: Vec<usize>,
}

impl MultinomialNbModel {
    fn column(&self, name: &str, value: &FeatureValue) -> Option<usize> {
        self.vocab
            .binary_search_by(|(n, v)| n.as_str().cmp(name).then_with(|| v.cmp(value)))
            .ok()
    }

    fn encode(&self, features: &FeatureSet) -> Array2<f64> {
        let mut row = Array2::zeros((1, self.vocab.len()));
        for (name, value) in features {
            if let Some(i) = self.column(name, value) {
                row[[0, i]] = 1.0;
            }
        }
        row
    }

    /// Label probabilities as reported by the backend, in label order.
    pub fn predict_proba(&self, features: &FeatureSet) -> Vec<(String, f64)> {
        let input = self.encode(features);
        let (proba, classes) = self.model.predict_proba(input.view());

        let mut out: Vec<(String, f64)> = self.labels.iter().map(|l| (l.clone(), 0.0)).collect();
        for (col, class) in classes.iter().enumerate() {
            if let Some(slot) = out.get_mut(**class) {
                slot.1 = proba[[0, col]];
            }
        }
        out
    }
}

impl Classifier for MultinomialNbModel {
    fn classify(&self, features: &FeatureSet) -> String {
        let probs = self.predict_proba(features);
        let mut best = 0;
        for (i, (_, p)) in probs.iter().enumerate() {
            if *p > probs[best].1 {
                best = i;
            }
        }
        self.labels[best].clone()
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl Informative for MultinomialNbModel {
    /// Ranks keys by their add-one smoothed per-label frequency ratio.
    fn most_informative_features(&self, n: usize) -> Vec<InformativeFeature> {
        let probabilities = self.vocab.iter().enumerate().map(|(i, key)| {
            let probs = self
                .feat_freq
                .iter()
                .zip(&self.label_counts)
                .map(|(freq, &count)| (freq[i] as f64 + 1.0) / (count as f64 + 2.0))
                .collect();
            (key.clone(), probs)
        });
        rank_informative(&self.labels, probabilities, n)
    }
}

/// Fits a [`MultinomialNbModel`] with `linfa-bayes`.
#[derive(Debug, Clone, Copy)]
pub struct MultinomialNbTrainer {
    /// Additive smoothing passed to the backend
    pub alpha: f64,
}

impl Default for MultinomialNbTrainer {
    fn default() -> Self {
        Self { alpha: 1.0 }
    }
}

impl Trainer for MultinomialNbTrainer {
    type Model = MultinomialNbModel;

    fn train(&self, examples: &[LabeledFeatureSet]) -> Result<MultinomialNbModel> {
        if examples.is_empty() {
            return Err(Error::EmptyTrainingSet);
        }

        let labels: Vec<String> = examples
            .iter()
            .map(|(_, label)| label.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let vocab: Vec<FeatureKey> = examples
            .iter()
            .flat_map(|(features, _)| features.iter())
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        if vocab.is_empty() {
            return Err(Error::EmptyVocabulary);
        }

        let mut x = Array2::<f64>::zeros((examples.len(), vocab.len()));
        let mut y = Array1::<usize>::zeros(examples.len());
        let mut feat_freq = vec![vec![0; vocab.len()]; labels.len()];
        let mut label_counts = vec![0; labels.len()];

        for (row, (features, label)) in examples.iter().enumerate() {
            let Ok(l) = labels.binary_search(label) else { continue };
            y[row] = l;
            label_counts[l] += 1;
            for (name, value) in features {
                let key = vocab.binary_search_by(|(n, v)| n.cmp(name).then_with(|| v.cmp(value)));
                if let Ok(i) = key {
                    x[[row, i]] = 1.0;
                    feat_freq[l][i] += 1;
                }
            }
        }

        let dataset = Dataset::new(x, y);
        let model = MultinomialNb::params().alpha(self.alpha).fit(&dataset)?;

        tracing::debug!(
            labels = labels.len(),
            columns = vocab.len(),
            examples = examples.len(),
            "trained multinomial naive Bayes"
        );

        Ok(MultinomialNbModel {
            model,
            labels,
            vocab,
            feat_freq,
            label_counts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::accuracy;
    use crate::features::suffixes;

    fn training_set() -> Vec<LabeledFeatureSet> {
        [
            ("Kathryn", "female"),
            ("Evelyn", "female"),
            ("Jocelyn", "female"),
            ("Emma", "female"),
            ("Sofia", "female"),
            ("John", "male"),
            ("Martin", "male"),
            ("Kevin", "male"),
            ("Jack", "male"),
            ("Patrick", "male"),
        ]
        .iter()
        .map(|(name, label)| (suffixes(name), label.to_string()))
        .collect()
    }

    #[test]
    fn separates_yn_from_n() {
        let model = MultinomialNbTrainer::default().train(&training_set()).unwrap();

        assert_eq!(model.labels(), ["female", "male"]);
        assert_eq!(model.classify(&suffixes("Marilyn")), "female");
        assert_eq!(model.classify(&suffixes("Dustin")), "male");
        assert!(accuracy(&model, &training_set()) >= 0.9);
    }

    #[test]
    fn probabilities_cover_every_label() {
        let model = MultinomialNbTrainer::default().train(&training_set()).unwrap();
        let probs = model.predict_proba(&suffixes("Gwendolyn"));
        let total: f64 = probs.iter().map(|(_, p)| p).sum();

        assert_eq!(probs.len(), 2);
        assert!((total - 1.0).abs() < 1e-6);
        assert!(probs[0].1 > probs[1].1);
    }

    #[test]
    fn informative_features_prefer_suffix_pairs() {
        let model = MultinomialNbTrainer::default().train(&training_set()).unwrap();
        let top = model.most_informative_features(1);

        assert_eq!(top.len(), 1);
        assert!(top[0].ratio > 1.0);
        // "yn" on 3 of 5 female names, none of the male ones.
        assert_eq!(top[0].name, "suffix2");
        assert_eq!(top[0].value, FeatureValue::from("yn"));
        assert_eq!(top[0].likely, "female");
    }

    #[test]
    fn rejects_featureless_training_data() {
        let examples = vec![(FeatureSet::new(), "pos".to_string())];
        assert!(matches!(
            MultinomialNbTrainer::default().train(&examples),
            Err(Error::EmptyVocabulary)
        ));
    }
}
