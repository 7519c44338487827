//! Shuffling and index-based dataset partitioning.

use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// A seeded RNG when `seed` is given, otherwise one seeded from OS entropy.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Shuffles `items` in place.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Splits `items` into contiguous slices at `cuts`.
///
/// Returns `cuts.len() + 1` slices whose concatenation is `items`. Cut points
/// past the end are clamped to `items.len()`, so short datasets yield empty
/// trailing slices instead of failing.
pub fn split_at_cuts<'a, T>(items: &'a [T], cuts: &[usize]) -> Result<Vec<&'a [T]>> {
    if cuts.windows(2).any(|w| w[0] > w[1]) {
        return Err(Error::InvalidSplit {
            cuts: cuts.to_vec(),
        });
    }

    let mut slices = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for &cut in cuts {
        let end = cut.min(items.len());
        slices.push(&items[start..end]);
        start = end;
    }
    slices.push(&items[start..]);

    Ok(slices)
}

/// Train, dev-test and test slices of a shuffled list.
#[derive(Debug)]
pub struct Partition<'a, T> {
    pub train: &'a [T],
    pub devtest: &'a [T],
    pub test: &'a [T],
}

impl<'a, T> Partition<'a, T> {
    /// `test = [..test_size]`, `devtest = [test_size..test_size + devtest_size]`,
    /// `train` is the remainder.
    pub fn new(items: &'a [T], test_size: usize, devtest_size: usize) -> Self {
        let test_end = test_size.min(items.len());
        let devtest_end = test_size.saturating_add(devtest_size).min(items.len());

        Partition {
            test: &items[..test_end],
            devtest: &items[test_end..devtest_end],
            train: &items[devtest_end..],
        }
    }
}
