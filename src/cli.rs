//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// disease-predictor - ranks probable diseases from reported symptoms
#[derive(Parser, Debug)]
#[command(name = "disease-predictor")]
#[command(version)]
#[command(about = "Ranks probable diseases from reported symptoms", long_about = None)]
pub struct Cli {
    /// Configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Train a model on synthetic data and write it to disk
    Train {
        /// Output file (default: ExtraTrees.json)
        #[arg(long, short = 'o')]
        output: Option<String>,

        /// Number of generated samples
        #[arg(long, default_value_t = 1000)]
        samples: usize,

        /// Number of trees in the forest
        #[arg(long, default_value_t = 100)]
        trees: usize,

        /// Random seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },

    /// Load the model and run a sample prediction
    Check {
        /// Model file (default: configured search paths)
        #[arg(long, short = 'm')]
        model: Option<String>,
    },

    /// Predict offline for a list of symptoms
    Predict {
        /// Symptom names, e.g. itching skin_rash
        #[arg(required = true)]
        symptoms: Vec<String>,

        /// Model file (default: configured search paths)
        #[arg(long, short = 'm')]
        model: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["disease-predictor"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["disease-predictor", "check", "-c", "custom.toml"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
        assert!(matches!(cli.command, Some(Commands::Check { model: None })));
    }

    #[test]
    fn test_train_defaults() {
        let cli = Cli::try_parse_from(["disease-predictor", "train"]).unwrap();
        match cli.command {
            Some(Commands::Train {
                output,
                samples,
                trees,
                seed,
            }) => {
                assert!(output.is_none());
                assert_eq!((samples, trees, seed), (1000, 100, 42));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_predict_requires_symptoms() {
        assert!(Cli::try_parse_from(["disease-predictor", "predict"]).is_err());
        let cli =
            Cli::try_parse_from(["disease-predictor", "predict", "itching", "cough", "--json"])
                .unwrap();
        match cli.command {
            Some(Commands::Predict { symptoms, json, .. }) => {
                assert_eq!(symptoms, vec!["itching", "cough"]);
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
