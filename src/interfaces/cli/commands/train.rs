//! Synthetic training command

use colored::Colorize;

use crate::config::default_model_file;
use crate::interfaces::cli::CliError;
use crate::model::FitParams;
use crate::training::{TrainingParams, train_and_save};

pub fn run_train(
    output: Option<String>,
    samples: usize,
    trees: usize,
    seed: u64,
) -> Result<(), CliError> {
    if samples == 0 || trees == 0 {
        return Err(CliError::CommandError(
            "--samples and --trees must both be at least 1".to_string(),
        ));
    }

    let output = output.unwrap_or_else(|| default_model_file().to_string());
    let params = TrainingParams {
        n_samples: samples,
        fit: FitParams {
            n_estimators: trees,
            random_state: seed,
            ..FitParams::default()
        },
        ..TrainingParams::default()
    };

    println!(
        "{} {} samples, {} trees, seed {}",
        "Training ExtraTreesClassifier:".yellow(),
        samples,
        trees,
        seed
    );

    let summary = train_and_save(&params, &output)?;

    println!(
        "{} {} (max depth {})",
        "Model saved to".green(),
        output.blue(),
        summary.max_depth
    );
    Ok(())
}
