use criterion::{Criterion, criterion_group, criterion_main};
use nb_classify::classifier::{CategoricalNbTrainer, Classifier, MultinomialNbTrainer, Trainer};
use nb_classify::evaluation::featurize;
use nb_classify::features::{letter_profile, suffixes};
use std::hint::black_box;

fn names() -> Vec<(String, String)> {
    let stems = ["Al", "Bren", "Car", "Dor", "Ed", "Fel", "Gor", "Har", "Il", "Jor"];
    let mut names = Vec::new();
    for (i, stem) in stems.iter().cycle().take(2_000).enumerate() {
        let (ending, label) = match i % 4 {
            0 => ("ina", "female"),
            1 => ("lyn", "female"),
            2 => ("ton", "male"),
            _ => ("ik", "male"),
        };
        names.push((format!("{stem}{ending}"), label.to_string()));
    }
    names
}

fn bench_extract(c: &mut Criterion) {
    c.bench_function("letter profile Samantha", |b| {
        b.iter(|| letter_profile(black_box("Samantha")))
    });
}

fn bench_train(c: &mut Criterion) {
    let train = featurize(&suffixes, &names());

    c.bench_function("train categorical 2k names", |b| {
        b.iter(|| CategoricalNbTrainer.train(black_box(&train)).unwrap())
    });
    c.bench_function("train multinomial 2k names", |b| {
        b.iter(|| MultinomialNbTrainer::default().train(black_box(&train)).unwrap())
    });
}

fn bench_bulk_prediction(c: &mut Criterion) {
    let names = names();
    let model = CategoricalNbTrainer
        .train(&featurize(&suffixes, &names))
        .unwrap();

    c.bench_function("bulk classify 2k names", |b| {
        b.iter(|| {
            for (name, _) in &names {
                let _ = model.classify(&suffixes(name));
            }
        });
    });
}

criterion_group!(benches, bench_extract, bench_train, bench_bulk_prediction);
criterion_main!(benches);
