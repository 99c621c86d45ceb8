mod cli;

use clap::Parser;
use log::{info, LevelFilter};
use meldmc_installer_lib::logging;
use meldmc_installer_lib::state::State;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::Cli::parse();

    let console_level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    if let Err(e) = logging::setup_logging(LevelFilter::Debug, console_level).await {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!("Starting MeldMC Installer {}...", env!("CARGO_PKG_VERSION"));

    let state = match State::init(args.repository.clone()).await {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli::run(&state, args.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            info!("Command failed: {}", e.kind);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
