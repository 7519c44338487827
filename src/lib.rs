//! # nb-classify
//!
//! Naive Bayes text classification in the style of the classic "learning to
//! classify text" exercises: predict the gender of first names from their
//! letters, and the sentiment of movie reviews from the words they contain.
//!
//! ## Features
//! - Name features: last letter, two-character suffixes, full letter profile
//! - Bag-of-words presence features over the most frequent corpus words
//! - Seeded shuffling and index-based train/dev-test/test splits
//! - Two interchangeable classifiers: a categorical naive Bayes and a
//!   [`linfa-bayes`](https://crates.io/crates/linfa-bayes) multinomial one
//! - Accuracy, most informative features and error analysis
//! - Model persistence with `rmp-serde` (MessagePack)
//!
//! ## Example
//! ```rust
//! use nb_classify::classifier::{CategoricalNbTrainer, Classifier, Trainer};
//! use nb_classify::evaluation::featurize;
//! use nb_classify::features::suffixes;
//!
//! let names = vec![
//!     ("Kathryn".to_string(), "female".to_string()),
//!     ("Martin".to_string(), "male".to_string()),
//! ];
//! let model = CategoricalNbTrainer.train(&featurize(&suffixes, &names)).unwrap();
//! assert_eq!(model.classify(&suffixes("Evelyn")), "female");
//! ```

pub mod classifier;
pub mod corpus;
pub mod error;
pub mod evaluation;
pub mod experiments;
pub mod features;
pub mod split;

pub use error::{Error, Result};
