//! Model smoke test: load, predict for a known symptom pair, print the ranking

use colored::Colorize;

use crate::features::FeatureEncoder;
use crate::interfaces::cli::CliError;

/// Symptoms used for the sample prediction
pub const CHECK_SYMPTOMS: [&str; 2] = ["itching", "skin_rash"];

pub fn run_check(model: Option<String>) -> Result<(), CliError> {
    let service = super::load_prediction_service(model)?;

    let encoder = FeatureEncoder::new(service.model().n_features())?;
    let encoded = encoder.encode(&CHECK_SYMPTOMS);
    println!("Feature vector length: {}", encoded.features.len());
    println!(
        "First few elements: {:?}",
        &encoded.features[..encoded.features.len().min(10)]
    );

    let ranked = service.predict(&CHECK_SYMPTOMS)?;

    println!("\n{}", format!("Top {} predictions:", ranked.len()).bold());
    for (i, score) in ranked.iter().enumerate() {
        println!("{}. {} - {:.2}", i + 1, score.disease, score.probability);
    }
    println!("{}", "Check completed successfully!".green());
    Ok(())
}
