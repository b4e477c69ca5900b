use anyhow::Context;
use clap::Parser;

use disease_predictor::cli::Cli;
use disease_predictor::config::{get_config, init_config};
use disease_predictor::runtime::modes::{self, Mode, detect_mode};
use disease_predictor::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config(cli.config.as_deref());
    let config = get_config();

    // guard 必须存活到进程结束，否则缓冲中的日志会丢失
    let log_guard = init_logging(&config.logging).context("Failed to initialize logging")?;

    match detect_mode(cli.command.as_ref()) {
        Mode::Server => modes::run_server().await,
        Mode::Cli => {
            let Some(command) = cli.command else {
                unreachable!("CLI mode always carries a command");
            };
            if let Err(e) = modes::run_cli(command) {
                eprintln!("{}", e.format_colored());
                drop(log_guard);
                std::process::exit(1);
            }
            Ok(())
        }
        Mode::Unknown => {
            anyhow::bail!("No execution mode available; build with the `server` feature")
        }
    }
}
