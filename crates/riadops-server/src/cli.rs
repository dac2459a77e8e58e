//! Command-line interface definition.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use riadops_core::TracingOutputFormat;

/// riadops - guesthouse room availability from booking platform calendars
#[derive(Debug, Parser)]
#[command(name = "riadops")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, global = true, env = "RIADOPS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Log format: pretty, compact or json (overrides `logging.format`)
    #[arg(long, global = true, env = "RIADOPS_LOG_FORMAT")]
    pub log_format: Option<TracingOutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API
    Serve {
        /// Address to listen on (overrides `server.bind`)
        #[arg(long)]
        bind: Option<SocketAddr>,
    },

    /// Fetch every room's feed once and print the report as JSON
    Feeds {
        /// Only report this room id
        #[arg(long)]
        room: Option<String>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Dump,
    /// Print the default configuration file path
    Path,
}
