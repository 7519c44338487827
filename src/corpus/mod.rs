//! Corpus readers for the two experiments.

mod freq;
pub mod movie_reviews;
pub mod names;

pub use freq::FreqDist;
pub use movie_reviews::{MovieReviews, Review};
pub use names::NameRecord;
