//! CLI interface module
//!
//! Offline commands: training, model checks, one-shot predictions and config
//! generation.

pub mod commands;

use crate::cli::{Commands, ConfigCommands};
use crate::errors::PredictorError;
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    ModelError(String),
    IoError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::ModelError(msg) => format!("Model error: {}", msg),
            CliError::IoError(msg) => format!("I/O error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::ModelError(msg) => {
                format!("{} {}", "Model error:".red().bold(), msg.white())
            }
            CliError::IoError(msg) => {
                format!("{} {}", "I/O error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<PredictorError> for CliError {
    fn from(err: PredictorError) -> Self {
        match err {
            PredictorError::FileOperation(msg) => CliError::IoError(msg),
            other => CliError::ModelError(other.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError(err.to_string())
    }
}

/// Run a CLI command from clap-parsed input
pub fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    match cmd {
        Commands::Train {
            output,
            samples,
            trees,
            seed,
        } => commands::run_train(output, samples, trees, seed),

        Commands::Check { model } => commands::run_check(model),

        Commands::Predict {
            symptoms,
            model,
            json,
        } => commands::run_predict(symptoms, model, json),

        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => commands::config_generate(output_path, force),

        Commands::Serve => Err(CliError::CommandError(
            "serve is not a CLI command; start the binary in server mode".to_string(),
        )),
    }
}
