//! End-to-end replays of the gender and movie review experiments.
//!
//! Each experiment takes its data and a config, threads a single seeded RNG
//! through every reshuffle, and returns a report whose `Display` impl prints
//! the results in order.

mod gender;
mod reviews;

pub use gender::{GenderConfig, GenderReport, run_gender};
pub use reviews::{ReviewConfig, ReviewReport, run_reviews};

use crate::classifier::{AnyModel, Backend, accuracy};
use crate::error::Result;
use crate::evaluation::{apply_features, featurize};
use crate::features::FeatureExtractor;
use std::ops::Deref;

/// Trains `backend` on `train` and scores it on `eval`.
fn train_and_score<I, E>(
    backend: Backend,
    extractor: &E,
    train: &[(I, String)],
    eval: &[(I, String)],
) -> Result<(AnyModel, f64)>
where
    I: Deref,
    E: FeatureExtractor<I::Target> + ?Sized,
{
    let model = backend.train(&featurize(extractor, train))?;
    let score = accuracy(&model, apply_features(extractor, eval));
    tracing::info!(
        train = train.len(),
        eval = eval.len(),
        accuracy = score,
        "evaluated classifier"
    );
    Ok((model, score))
}
