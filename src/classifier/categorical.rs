use super::{
    Classifier, Informative, InformativeFeature, LabeledFeatureSet, Trainer, rank_informative,
};
use crate::error::{Error, Result};
use crate::features::{FeatureSet, FeatureValue};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Expected-likelihood smoothing constant.
const ELE_GAMMA: f64 = 0.5;

/// Value counts for one feature name.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FeatureStats {
    /// Sorted by value; one count per label.
    values: Vec<(FeatureValue, Vec<usize>)>,
    /// Per label, the number of training examples carrying this feature.
    totals: Vec<usize>,
}

impl FeatureStats {
    fn count(&self, value: &FeatureValue, label: usize) -> usize {
        self.values
            .binary_search_by(|(v, _)| v.cmp(value))
            .map(|i| self.values[i].1[label])
            .unwrap_or(0)
    }

    /// `P(value | label)` with add-0.5 smoothing over the values seen in training.
    fn prob(&self, value: &FeatureValue, label: usize) -> f64 {
        let bins = self.values.len() as f64;
        (self.count(value, label) as f64 + ELE_GAMMA)
            / (self.totals[label] as f64 + ELE_GAMMA * bins)
    }
}

/// Categorical naive Bayes over named features.
///
/// Each feature name is an independent categorical variable. Feature names
/// never seen during training are ignored when classifying.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalNb {
    labels: Vec<String>,
    label_counts: Vec<usize>,
    features: BTreeMap<String, FeatureStats>,
}

impl CategoricalNb {
    fn log_prior(&self, label: usize) -> f64 {
        let total: usize = self.label_counts.iter().sum();
        let p = (self.label_counts[label] as f64 + ELE_GAMMA)
            / (total as f64 + ELE_GAMMA * self.labels.len() as f64);
        p.ln()
    }

    /// Unnormalized log-probability of each label, in [`Classifier::labels`] order.
    pub fn log_scores(&self, features: &FeatureSet) -> Vec<f64> {
        (0..self.labels.len())
            .map(|label| {
                features
                    .iter()
                    .filter_map(|(name, value)| self.features.get(name).map(|s| (s, value)))
                    .fold(self.log_prior(label), |acc, (stats, value)| {
                        acc + stats.prob(value, label).ln()
                    })
            })
            .collect()
    }

    /// Label probabilities normalized to sum to 1.
    pub fn prob_classify(&self, features: &FeatureSet) -> Vec<(String, f64)> {
        let scores = self.log_scores(features);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let sum: f64 = scores.iter().map(|s| (s - max).exp()).sum();

        self.labels
            .iter()
            .cloned()
            .zip(scores.iter().map(|s| (s - max).exp() / sum))
            .collect()
    }
}

impl Classifier for CategoricalNb {
    fn classify(&self, features: &FeatureSet) -> String {
        let scores = self.log_scores(features);
        let mut best = 0;
        for (i, score) in scores.iter().enumerate() {
            if *score > scores[best] {
                best = i;
            }
        }
        self.labels[best].clone()
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl Informative for CategoricalNb {
    fn most_informative_features(&self, n: usize) -> Vec<InformativeFeature> {
        let probabilities = self.features.iter().flat_map(|(name, stats)| {
            stats.values.iter().map(move |(value, _)| {
                let probs = (0..self.labels.len())
                    .map(|label| stats.prob(value, label))
                    .collect();
                ((name.clone(), value.clone()), probs)
            })
        });
        rank_informative(&self.labels, probabilities, n)
    }
}

/// Counts label and feature-value frequencies into a [`CategoricalNb`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoricalNbTrainer;

impl Trainer for CategoricalNbTrainer {
    type Model = CategoricalNb;

    fn train(&self, examples: &[LabeledFeatureSet]) -> Result<CategoricalNb> {
        if examples.is_empty() {
            return Err(Error::EmptyTrainingSet);
        }

        let labels: Vec<String> = examples
            .iter()
            .map(|(_, label)| label.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let label_index = |label: &str| labels.binary_search_by(|l| l.as_str().cmp(label));

        let mut label_counts = vec![0; labels.len()];
        let mut counts: BTreeMap<&str, (BTreeMap<&FeatureValue, Vec<usize>>, Vec<usize>)> =
            BTreeMap::new();

        for (features, label) in examples {
            let Ok(l) = label_index(label) else { continue };
            label_counts[l] += 1;
            for (name, value) in features {
                let (values, totals) = counts
                    .entry(name.as_str())
                    .or_insert_with(|| (BTreeMap::new(), vec![0; labels.len()]));
                values.entry(value).or_insert_with(|| vec![0; labels.len()])[l] += 1;
                totals[l] += 1;
            }
        }

        if counts.is_empty() {
            return Err(Error::EmptyVocabulary);
        }

        let features = counts
            .into_iter()
            .map(|(name, (values, totals))| {
                let values = values
                    .into_iter()
                    .map(|(value, per_label)| (value.clone(), per_label))
                    .collect();
                (name.to_string(), FeatureStats { values, totals })
            })
            .collect();

        tracing::debug!(
            labels = labels.len(),
            examples = examples.len(),
            "trained categorical naive Bayes"
        );

        Ok(CategoricalNb {
            labels,
            label_counts,
            features,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::accuracy;
    use crate::features::last_letter;

    fn training_set() -> Vec<LabeledFeatureSet> {
        [
            ("Anna", "female"),
            ("Maria", "female"),
            ("Julia", "female"),
            ("Bob", "male"),
            ("Jack", "male"),
            ("Mark", "male"),
            ("Frank", "male"),
        ]
        .iter()
        .map(|(name, label)| (last_letter(name), label.to_string()))
        .collect()
    }

    #[test]
    fn classifies_by_last_letter() {
        let model = CategoricalNbTrainer.train(&training_set()).unwrap();

        assert_eq!(model.labels(), ["female", "male"]);
        assert_eq!(model.classify(&last_letter("Sofia")), "female");
        assert_eq!(model.classify(&last_letter("Derek")), "male");
        // Unseen value: the larger prior wins.
        assert_eq!(model.classify(&last_letter("Liz")), "male");
        assert_eq!(accuracy(&model, &training_set()), 1.0);
    }

    #[test]
    fn unknown_feature_names_are_ignored() {
        let model = CategoricalNbTrainer.train(&training_set()).unwrap();
        let mut features = last_letter("Olga");
        features.insert("shoe_size".into(), FeatureValue::Count(9));
        assert_eq!(model.log_scores(&features), model.log_scores(&last_letter("Olga")));
    }

    #[test]
    fn probabilities_are_normalized() {
        let model = CategoricalNbTrainer.train(&training_set()).unwrap();
        let probs = model.prob_classify(&last_letter("Tina"));
        let total: f64 = probs.iter().map(|(_, p)| p).sum();

        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(probs[0].0, "female");
        assert!(probs[0].1 > 0.8);
    }

    #[test]
    fn informative_features_match_smoothed_ratios() {
        let model = CategoricalNbTrainer.train(&training_set()).unwrap();
        let top = model.most_informative_features(3);

        assert_eq!(top.len(), 3);
        assert_eq!(top[0].name, "last_letter");
        assert_eq!(top[0].value, FeatureValue::from("a"));
        assert_eq!((top[0].likely.as_str(), top[0].unlikely.as_str()), ("female", "male"));
        // (3.5 / 4.5) / (0.5 / 5.5)
        assert!((top[0].ratio - 8.5556).abs() < 1e-3);
        assert_eq!(top[1].value, FeatureValue::from("k"));
        assert_eq!(top[1].likely, "male");
    }

    #[test]
    fn empty_training_set_is_rejected() {
        assert!(matches!(
            CategoricalNbTrainer.train(&[]),
            Err(Error::EmptyTrainingSet)
        ));
        let featureless = vec![(FeatureSet::new(), "pos".to_string())];
        assert!(matches!(
            CategoricalNbTrainer.train(&featureless),
            Err(Error::EmptyVocabulary)
        ));
    }
}
