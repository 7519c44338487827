//! The labeled first-names corpus.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs::{self, File};
use std::path::Path;

pub const MALE: &str = "male";
pub const FEMALE: &str = "female";

/// A name with how often it was registered for each gender.
#[derive(Debug, Deserialize, Clone)]
pub struct NameRecord {
    pub name: String,
    pub male_count: u32,
    pub female_count: u32,
}

impl NameRecord {
    /// The majority label, or `None` on a tie.
    pub fn label(&self) -> Option<&'static str> {
        if self.male_count > self.female_count {
            Some(MALE)
        } else if self.female_count > self.male_count {
            Some(FEMALE)
        } else {
            None
        }
    }
}

fn read_word_list(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

/// Loads `male.txt` and `female.txt` from `dir`, male names first.
pub fn load_dir(dir: &Path) -> Result<Vec<(String, String)>> {
    let mut names = Vec::new();
    for (file, label) in [("male.txt", MALE), ("female.txt", FEMALE)] {
        let words = read_word_list(&dir.join(file))?;
        tracing::debug!(file, count = words.len(), "read name list");
        names.extend(words.into_iter().map(|w| (w, label.to_string())));
    }

    if names.is_empty() {
        return Err(Error::EmptyCorpus(dir.to_path_buf()));
    }
    Ok(names)
}

/// Loads `name,male_count,female_count` rows, labeling each name by majority.
///
/// Names registered equally often for both genders are dropped.
pub fn load_csv(path: &Path) -> Result<Vec<(String, String)>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut rdr = csv::Reader::from_reader(file);

    let mut names = Vec::new();
    let mut ties = 0;
    for result in rdr.deserialize() {
        let record: NameRecord = result?;
        match record.label() {
            Some(label) => names.push((record.name, label.to_string())),
            None => ties += 1,
        }
    }

    if ties > 0 {
        tracing::debug!(ties, "dropped names without a majority gender");
    }
    if names.is_empty() {
        return Err(Error::EmptyCorpus(path.to_path_buf()));
    }
    Ok(names)
}

/// Loads `path` as a CSV file or as a `male.txt`/`female.txt` directory.
pub fn load(path: &Path) -> Result<Vec<(String, String)>> {
    let names = if path.is_dir() {
        load_dir(path)?
    } else {
        load_csv(path)?
    };
    tracing::info!(path = %path.display(), count = names.len(), "loaded names corpus");
    Ok(names)
}
