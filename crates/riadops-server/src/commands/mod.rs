//! Subcommand implementations.

pub mod config;
pub mod feeds;
pub mod serve;
