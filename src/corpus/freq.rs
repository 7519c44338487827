use std::collections::HashMap;

/// Word frequency counts.
#[derive(Debug, Clone, Default)]
pub struct FreqDist {
    counts: HashMap<String, usize>,
    total: usize,
}

impl FreqDist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, word: impl Into<String>) {
        *self.counts.entry(word.into()).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn count(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of outcomes recorded.
    pub fn total(&self) -> usize {
        self.total
    }

    /// The `n` most frequent words, most frequent first; ties alphabetically.
    pub fn most_common(&self, n: usize) -> Vec<(&str, usize)> {
        let mut words: Vec<(&str, usize)> = self
            .counts
            .iter()
            .map(|(w, &c)| (w.as_str(), c))
            .collect();
        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        words.truncate(n);
        words
    }
}

impl<S: Into<String>> FromIterator<S> for FreqDist {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut dist = FreqDist::new();
        for word in iter {
            dist.add(word);
        }
        dist
    }
}
