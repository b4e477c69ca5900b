//! CLI mode
//!
//! Delegates to the CLI implementation.

use crate::cli::Commands;
use crate::interfaces::cli::{CliError, run_cli_command};

pub fn run_cli(cmd: Commands) -> Result<(), CliError> {
    run_cli_command(cmd)
}
