//! riadops CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use riadops_core::init_tracing;
use riadops_server::cli::{Cli, Command, ConfigAction};
use riadops_server::commands;
use riadops_server::{AppConfig, ServerResult};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ServerResult<()> {
    let mut config = match cli.config {
        Some(ref path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }

    init_tracing(config.logging.to_tracing_config(cli.debug)?)?;

    match cli.command {
        Command::Serve { bind } => commands::serve::run(&config, bind).await,
        Command::Feeds { room, pretty } => {
            commands::feeds::run(&config, room.as_deref(), pretty).await
        }
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Path => commands::config::path(),
        },
    }
}
