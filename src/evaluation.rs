//! Held-out evaluation and error analysis.

use crate::classifier::{Classifier, LabeledFeatureSet};
use crate::features::FeatureExtractor;
use std::fmt::Write;
use std::ops::Deref;

/// A held-out item the classifier got wrong.
///
/// Field order is the sort order: by correct label, then guess, then item.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ErrorRecord {
    pub correct: String,
    pub guess: String,
    pub item: String,
}

/// Lazily extracts features for each `(item, label)` pair as it is consumed.
///
/// Nothing is extracted up front, so scoring a large held-out set never holds
/// every feature set in memory at once.
pub fn apply_features<'a, I, E>(
    extractor: &'a E,
    examples: &'a [(I, String)],
) -> impl Iterator<Item = LabeledFeatureSet> + 'a
where
    I: Deref,
    E: FeatureExtractor<I::Target> + ?Sized,
{
    examples
        .iter()
        .map(|(item, label)| (extractor.extract(item), label.clone()))
}

/// Extracts features for every `(item, label)` pair.
pub fn featurize<I, E>(extractor: &E, examples: &[(I, String)]) -> Vec<LabeledFeatureSet>
where
    I: Deref,
    E: FeatureExtractor<I::Target> + ?Sized,
{
    apply_features(extractor, examples).collect()
}

/// Classifies each held-out name and returns the mismatches, sorted.
pub fn collect_errors<C, E>(
    model: &C,
    extractor: &E,
    held_out: &[(String, String)],
) -> Vec<ErrorRecord>
where
    C: Classifier + ?Sized,
    E: FeatureExtractor<str> + ?Sized,
{
    let mut errors: Vec<ErrorRecord> = held_out
        .iter()
        .filter_map(|(name, tag)| {
            let guess = model.classify(&extractor.extract(name));
            (guess != *tag).then(|| ErrorRecord {
                correct: tag.clone(),
                guess,
                item: name.clone(),
            })
        })
        .collect();
    errors.sort();
    errors
}

/// Renders the first `n` errors, one per line.
pub fn render_errors(errors: &[ErrorRecord], n: usize) -> String {
    let mut out = String::new();
    for e in errors.iter().take(n) {
        let _ = writeln!(
            out,
            "correct={:<8} guess={:<8} name={:<30}",
            e.correct, e.guess, e.item
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{CategoricalNbTrainer, Trainer, accuracy};
    use crate::features::{last_letter, suffixes};

    fn labeled(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(n, l)| (n.to_string(), l.to_string()))
            .collect()
    }

    #[test]
    fn errors_are_sorted_by_label_then_guess_then_name() {
        let train = labeled(&[
            ("Martin", "male"),
            ("John", "male"),
            ("Kevin", "male"),
            ("Emma", "female"),
            ("Sofia", "female"),
            ("Rachel", "female"),
        ]);
        let model = CategoricalNbTrainer
            .train(&featurize(&last_letter, &train))
            .unwrap();

        let devtest = labeled(&[
            ("Rich", "male"),
            ("Kathryn", "female"),
            ("Cindelyn", "female"),
            ("Dustin", "male"),
            ("Aldrich", "male"),
        ]);
        let errors = collect_errors(&model, &last_letter, &devtest);
        let names: Vec<&str> = errors.iter().map(|e| e.item.as_str()).collect();

        // Unseen last letters tie, and ties go to the first label.
        assert_eq!(names, ["Cindelyn", "Kathryn", "Aldrich", "Rich"]);
        assert!(errors[..2].iter().all(|e| e.correct == "female" && e.guess == "male"));
        assert!(errors[2..].iter().all(|e| e.correct == "male" && e.guess == "female"));
    }

    #[test]
    fn better_features_remove_errors() {
        let train = labeled(&[
            ("Kathryn", "female"),
            ("Evelyn", "female"),
            ("Jocelyn", "female"),
            ("John", "male"),
            ("Martin", "male"),
            ("Kevin", "male"),
        ]);
        let devtest = labeled(&[("Carolyn", "female"), ("Dustin", "male")]);

        let one_letter = CategoricalNbTrainer
            .train(&featurize(&last_letter, &train))
            .unwrap();
        let two_letters = CategoricalNbTrainer
            .train(&featurize(&suffixes, &train))
            .unwrap();

        assert!(!collect_errors(&one_letter, &last_letter, &devtest).is_empty());
        assert!(collect_errors(&two_letters, &suffixes, &devtest).is_empty());
        assert_eq!(accuracy(&two_letters, &featurize(&suffixes, &devtest)), 1.0);
    }

    #[test]
    fn features_are_extracted_on_demand() {
        use std::cell::Cell;

        let calls = Cell::new(0);
        let counting = |name: &str| {
            calls.set(calls.get() + 1);
            last_letter(name)
        };
        let examples = labeled(&[("Emma", "female"), ("John", "male"), ("Rich", "male")]);

        let mut lazy = apply_features(&counting, &examples);
        assert_eq!(calls.get(), 0);
        let (features, label) = lazy.next().unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(label, "female");
        assert_eq!(features, last_letter("Emma"));
        assert_eq!(lazy.count(), 2);
        assert_eq!(featurize(&counting, &examples).len(), 3);
    }

    #[test]
    fn renders_padded_columns() {
        let errors = vec![ErrorRecord {
            correct: "female".into(),
            guess: "male".into(),
            item: "Cindelyn".into(),
        }];
        let line = render_errors(&errors, 5);
        assert!(line.starts_with("correct=female   guess=male     name=Cindelyn"));
        assert_eq!(render_errors(&errors, 0), "");
    }
}
