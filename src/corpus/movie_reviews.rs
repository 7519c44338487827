//! The categorized movie reviews corpus: one sub-directory per category,
//! one file per review.

use super::FreqDist;
use crate::error::{Error, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static WORD_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+|[^\w\s]+").expect("word/punctuation pattern compiles"));

/// Splits text into alphanumeric runs and punctuation runs.
pub fn tokenize(text: &str) -> Vec<String> {
    WORD_PUNCT
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// One tokenized review.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    /// `category/file name`, e.g. `pos/cv957_8737.txt`
    pub fileid: String,
    pub category: String,
    pub words: Vec<String>,
}

/// All reviews of a corpus, in category then file name order.
#[derive(Debug, Clone)]
pub struct MovieReviews {
    reviews: Vec<Review>,
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)
        .map_err(|e| Error::io(dir, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| Error::io(dir, e))?;
    entries.sort();
    Ok(entries)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl MovieReviews {
    /// Reads every file of every category directory under `root`.
    pub fn load(root: &Path) -> Result<Self> {
        let mut reviews = Vec::new();

        for category_dir in sorted_entries(root)?.into_iter().filter(|p| p.is_dir()) {
            let category = file_name(&category_dir);
            for path in sorted_entries(&category_dir)?.into_iter().filter(|p| p.is_file()) {
                let text = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
                reviews.push(Review {
                    fileid: format!("{category}/{}", file_name(&path)),
                    category: category.clone(),
                    words: tokenize(&text),
                });
            }
        }

        if reviews.is_empty() {
            return Err(Error::EmptyCorpus(root.to_path_buf()));
        }

        tracing::info!(
            path = %root.display(),
            reviews = reviews.len(),
            categories = ?Self::categories_of(&reviews),
            "loaded movie reviews corpus"
        );

        Ok(Self { reviews })
    }

    fn categories_of(reviews: &[Review]) -> Vec<&str> {
        let mut categories: Vec<&str> = reviews.iter().map(|r| r.category.as_str()).collect();
        categories.dedup();
        categories
    }

    pub fn categories(&self) -> Vec<&str> {
        Self::categories_of(&self.reviews)
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn words(&self, fileid: &str) -> Option<&[String]> {
        self.reviews
            .iter()
            .find(|r| r.fileid == fileid)
            .map(|r| r.words.as_slice())
    }

    /// `(words, category)` pairs.
    pub fn documents(&self) -> Vec<(Vec<String>, String)> {
        self.reviews
            .iter()
            .map(|r| (r.words.clone(), r.category.clone()))
            .collect()
    }

    /// Lowercased word frequencies over the whole corpus.
    pub fn word_frequencies(&self) -> FreqDist {
        self.reviews
            .iter()
            .flat_map(|r| r.words.iter())
            .map(|w| w.to_lowercase())
            .collect()
    }
}
