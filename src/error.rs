use std::path::PathBuf;

/// Errors raised while loading corpora, splitting data or training a model.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Reading a corpus or model file failed
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A names CSV row could not be parsed
    #[error("invalid CSV row: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to encode model: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    #[error("failed to decode model: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    /// The naive Bayes backend rejected the training data
    #[error("naive Bayes training failed: {0}")]
    Bayes(#[from] linfa_bayes::NaiveBayesError),

    #[error("invalid split: cut points {cuts:?} are not in ascending order")]
    InvalidSplit { cuts: Vec<usize> },

    #[error("corpus at {} contains no examples", .0.display())]
    EmptyCorpus(PathBuf),

    #[error("cannot train a classifier without labeled examples")]
    EmptyTrainingSet,

    #[error("training examples produced no features")]
    EmptyVocabulary,
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
