use super::train_and_score;
use crate::classifier::{
    Backend, Classifier, Informative, InformativeFeature, NameModel, render_informative,
};
use crate::error::Result;
use crate::evaluation::{ErrorRecord, collect_errors, render_errors};
use crate::features::{NameFeatures, describe, last_letter, letter_profile, suffixes};
use crate::split::{Partition, seeded_rng, shuffle, split_at_cuts};
use std::fmt;

/// Tunables for [`run_gender`].
#[derive(Debug, Clone)]
pub struct GenderConfig {
    /// `None` draws a fresh seed from the OS
    pub seed: Option<u64>,
    pub test_size: usize,
    pub devtest_size: usize,
    pub backend: Backend,
    /// Names classified with the first model
    pub probes: Vec<String>,
    pub preview_len: usize,
    pub top_features: usize,
    pub error_sample: usize,
}

impl Default for GenderConfig {
    fn default() -> Self {
        Self {
            seed: None,
            test_size: 500,
            devtest_size: 1000,
            backend: Backend::default(),
            probes: vec!["Neo".to_string(), "Trinity".to_string()],
            preview_len: 4,
            top_features: 5,
            error_sample: 5,
        }
    }
}

/// Everything the gender experiment prints.
pub struct GenderReport {
    pub preview: Vec<(String, String)>,
    pub probes: Vec<(String, String)>,
    pub last_letter_accuracy: f64,
    pub informative: Vec<InformativeFeature>,
    pub letter_profile_preview: String,
    pub letter_profile_accuracy: f64,
    pub devtest_last_letter_accuracy: f64,
    pub errors: Vec<ErrorRecord>,
    pub error_sample: usize,
    pub devtest_suffix_accuracy: f64,
    pub resplit_suffix_accuracy: f64,
    /// Suffix model from the final split, ready to save
    pub model: NameModel,
}

/// Runs the feature engineering loop over a labeled names corpus.
///
/// `names` is reshuffled before each stage; all shuffles draw from one RNG so
/// a fixed seed reproduces the whole run.
pub fn run_gender(mut names: Vec<(String, String)>, config: &GenderConfig) -> Result<GenderReport> {
    let mut rng = seeded_rng(config.seed);
    let backend = config.backend;

    shuffle(&mut names, &mut rng);
    let preview = names.iter().take(config.preview_len).cloned().collect();

    // Last letter only.
    let (last_letter_model, last_letter_accuracy) = {
        let slices = split_at_cuts(&names, &[config.test_size])?;
        train_and_score(backend, &last_letter, slices[1], slices[0])?
    };
    let probes = config
        .probes
        .iter()
        .map(|name| (name.clone(), last_letter_model.classify(&last_letter(name))))
        .collect();
    let informative = last_letter_model.most_informative_features(config.top_features);

    // Every letter: too many features for this corpus.
    let letter_profile_preview = describe(&letter_profile("John"), 100);
    shuffle(&mut names, &mut rng);
    let (_, letter_profile_accuracy) = {
        let slices = split_at_cuts(&names, &[config.test_size])?;
        train_and_score(backend, &letter_profile, slices[1], slices[0])?
    };

    // Error analysis on a dev-test split.
    shuffle(&mut names, &mut rng);
    let partition = Partition::new(&names, config.test_size, config.devtest_size);
    let (devtest_model, devtest_last_letter_accuracy) =
        train_and_score(backend, &last_letter, partition.train, partition.devtest)?;
    let errors = collect_errors(&devtest_model, &last_letter, partition.devtest);
    tracing::info!(errors = errors.len(), "collected dev-test errors");

    let (_, devtest_suffix_accuracy) =
        train_and_score(backend, &suffixes, partition.train, partition.devtest)?;

    // Fresh split so the suffix features are not tuned to one dev-test set.
    shuffle(&mut names, &mut rng);
    let partition = Partition::new(&names, config.test_size, config.devtest_size);
    let features = NameFeatures::Suffixes;
    let (model, resplit_suffix_accuracy) =
        train_and_score(backend, &features, partition.train, partition.devtest)?;

    Ok(GenderReport {
        preview,
        probes,
        last_letter_accuracy,
        informative,
        letter_profile_preview,
        letter_profile_accuracy,
        devtest_last_letter_accuracy,
        errors,
        error_sample: config.error_sample,
        devtest_suffix_accuracy,
        resplit_suffix_accuracy,
        model: NameModel::new(features, model),
    })
}

impl fmt::Display for GenderReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shuffled names: {:?}", self.preview)?;

        writeln!(f, "\n== last letter ==")?;
        for (name, label) in &self.probes {
            writeln!(f, "{name}: {label}")?;
        }
        writeln!(f, "accuracy: {:.3}", self.last_letter_accuracy)?;
        write!(f, "{}", render_informative(&self.informative))?;

        writeln!(f, "\n== letter profile ==")?;
        writeln!(f, "{}", self.letter_profile_preview)?;
        writeln!(f, "accuracy: {:.3}", self.letter_profile_accuracy)?;

        writeln!(f, "\n== dev-test error analysis ==")?;
        writeln!(f, "last letter dev-test accuracy: {:.3}", self.devtest_last_letter_accuracy)?;
        write!(f, "{}", render_errors(&self.errors, self.error_sample))?;

        writeln!(f, "\n== two-character suffixes ==")?;
        writeln!(f, "dev-test accuracy: {:.3}", self.devtest_suffix_accuracy)?;
        writeln!(f, "fresh split dev-test accuracy: {:.3}", self.resplit_suffix_accuracy)
    }
}
