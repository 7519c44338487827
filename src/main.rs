use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nb_classify::classifier::{Backend, NameModel};
use nb_classify::corpus::{MovieReviews, names};
use nb_classify::experiments::{GenderConfig, ReviewConfig, run_gender, run_reviews};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "nb-classify")]
#[command(about = "Naive Bayes classification of names and movie reviews")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Predict the gender of first names from their letters
    Gender {
        /// Directory with male.txt and female.txt, or a name,male_count,female_count CSV
        #[arg(short, long)]
        names: PathBuf,

        /// Random seed for reproducible shuffles
        #[arg(short, long)]
        seed: Option<u64>,

        #[arg(long, default_value_t = 500)]
        test_size: usize,

        #[arg(long, default_value_t = 1000)]
        devtest_size: usize,

        /// Naive Bayes implementation (categorical, multinomial)
        #[arg(short, long, default_value = "categorical")]
        backend: Backend,

        /// Write the final suffix model to this MessagePack file
        #[arg(long)]
        save_model: Option<PathBuf>,
    },

    /// Classify movie reviews as positive or negative
    Reviews {
        /// Directory with one sub-directory of review files per category
        #[arg(short, long)]
        corpus: PathBuf,

        #[arg(short, long)]
        seed: Option<u64>,

        #[arg(long, default_value_t = 100)]
        test_size: usize,

        /// Number of most frequent words used as features
        #[arg(long, default_value_t = 2000)]
        vocabulary_size: usize,

        #[arg(short, long, default_value = "categorical")]
        backend: Backend,
    },

    /// Classify names with a saved model; reads stdin when no names are given
    Classify {
        /// Model written by `gender --save-model`
        #[arg(short, long)]
        model: PathBuf,

        names: Vec<String>,
    },
}

fn print_prediction(model: &NameModel, name: &str) {
    let label = model.classify_name(name);
    let probs = model
        .label_probabilities(name)
        .iter()
        .map(|(label, p)| format!("P({label}) = {:.2}%", p * 100.0))
        .collect::<Vec<_>>()
        .join(", ");
    println!("{name} is classified as {label} ({probs})");
}

fn classify(model_path: PathBuf, names: Vec<String>) -> Result<()> {
    let model = NameModel::load_from_file(&model_path)
        .with_context(|| format!("loading model from {}", model_path.display()))?;

    if !names.is_empty() {
        for name in &names {
            print_prediction(&model, name);
        }
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("Enter a name to classify (or 'exit'): ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;
        let name = line.trim();

        if name.eq_ignore_ascii_case("exit") {
            break;
        }
        if !name.is_empty() {
            print_prediction(&model, name);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Gender {
            names: path,
            seed,
            test_size,
            devtest_size,
            backend,
            save_model,
        } => {
            let corpus = names::load(&path)
                .with_context(|| format!("loading names from {}", path.display()))?;
            let config = GenderConfig {
                seed,
                test_size,
                devtest_size,
                backend,
                ..GenderConfig::default()
            };
            let report = run_gender(corpus, &config)?;
            print!("{report}");

            if let Some(model_path) = save_model {
                report.model.save_to_file(&model_path)?;
            }
        }
        Command::Reviews {
            corpus,
            seed,
            test_size,
            vocabulary_size,
            backend,
        } => {
            let reviews = MovieReviews::load(&corpus)
                .with_context(|| format!("loading reviews from {}", corpus.display()))?;
            let config = ReviewConfig {
                seed,
                test_size,
                vocabulary_size,
                backend,
                ..ReviewConfig::default()
            };
            let report = run_reviews(&reviews, &config)?;
            print!("{report}");
        }
        Command::Classify { model, names } => classify(model, names)?,
    }

    Ok(())
}
