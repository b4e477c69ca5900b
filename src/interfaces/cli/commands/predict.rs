//! One-shot prediction from the command line

use colored::Colorize;

use crate::interfaces::cli::CliError;

pub fn run_predict(symptoms: Vec<String>, model: Option<String>, json: bool) -> Result<(), CliError> {
    let service = super::load_prediction_service(model)?;
    let ranked = service.predict(symptoms.as_slice())?;

    if json {
        let out = serde_json::to_string_pretty(&ranked)
            .map_err(|e| CliError::CommandError(format!("failed to serialize result: {}", e)))?;
        println!("{}", out);
        return Ok(());
    }

    for (i, score) in ranked.iter().enumerate() {
        println!(
            "{:>2}. {} {}",
            i + 1,
            score.disease.cyan(),
            format!("{:.4}", score.probability).dimmed()
        );
    }
    Ok(())
}
