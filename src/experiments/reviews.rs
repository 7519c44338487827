use super::train_and_score;
use crate::classifier::{AnyModel, Backend, Informative, InformativeFeature, render_informative};
use crate::corpus::MovieReviews;
use crate::error::{Error, Result};
use crate::features::{DocumentFeatures, describe};
use crate::split::{seeded_rng, shuffle, split_at_cuts};
use std::fmt;

/// Tunables for [`run_reviews`].
#[derive(Debug, Clone)]
pub struct ReviewConfig {
    pub seed: Option<u64>,
    pub test_size: usize,
    /// How many of the most frequent corpus words become features
    pub vocabulary_size: usize,
    pub backend: Backend,
    pub top_features: usize,
    /// Review whose features are previewed; the first review when absent
    pub preview_fileid: String,
    pub preview_chars: usize,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            seed: None,
            test_size: 100,
            vocabulary_size: 2000,
            backend: Backend::default(),
            top_features: 5,
            preview_fileid: "pos/cv957_8737.txt".to_string(),
            preview_chars: 500,
        }
    }
}

pub struct ReviewReport {
    pub vocabulary_size: usize,
    pub preview: String,
    pub accuracy: f64,
    pub informative: Vec<InformativeFeature>,
    pub model: AnyModel,
}

/// Trains a bag-of-words sentiment classifier on `corpus`.
pub fn run_reviews(corpus: &MovieReviews, config: &ReviewConfig) -> Result<ReviewReport> {
    let mut rng = seeded_rng(config.seed);
    let mut documents = corpus.documents();
    shuffle(&mut documents, &mut rng);

    let frequencies = corpus.word_frequencies();
    let vocabulary: Vec<String> = frequencies
        .most_common(config.vocabulary_size)
        .into_iter()
        .map(|(word, _)| word.to_string())
        .collect();
    if vocabulary.is_empty() {
        return Err(Error::EmptyVocabulary);
    }
    tracing::info!(
        words = vocabulary.len(),
        tokens = frequencies.total(),
        "built review vocabulary"
    );
    let extractor = DocumentFeatures::new(vocabulary);

    let preview_words = corpus
        .words(&config.preview_fileid)
        .or_else(|| corpus.reviews().first().map(|r| r.words.as_slice()))
        .unwrap_or_default();
    let preview = describe(&extractor.extract(preview_words), config.preview_chars);

    let slices = split_at_cuts(&documents, &[config.test_size])?;
    let (model, accuracy) = train_and_score(config.backend, &extractor, slices[1], slices[0])?;
    let informative = model.most_informative_features(config.top_features);

    Ok(ReviewReport {
        vocabulary_size: extractor.vocabulary().len(),
        preview,
        accuracy,
        informative,
        model,
    })
}

impl fmt::Display for ReviewReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "vocabulary: {} words", self.vocabulary_size)?;
        writeln!(f, "{}", self.preview)?;
        writeln!(f, "accuracy: {:.3}", self.accuracy)?;
        write!(f, "{}", render_informative(&self.informative))
    }
}
