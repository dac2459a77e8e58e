//! HTTP API, room directory, table store and CLI for riadops.
//!
//! This crate wires the feed aggregator to the business's spreadsheets:
//! - Read-only CSV table store with header-keyed rows
//! - Room directory mapping named columns to rooms
//! - `GET /api/ical-feeds` aggregate availability endpoint
//! - TOML configuration and the `riadops` command line
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use riadops_server::{AppConfig, AvailabilityService, router};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let service = AvailabilityService::from_config(&config)?;
//!     let listener = tokio::net::TcpListener::bind(config.server.bind).await?;
//!     axum::serve(listener, router(Arc::new(service))).await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
mod config;
mod error;
mod rooms;
mod routes;
mod service;
mod store;

pub use config::{AppConfig, FeedSettings, LoggingSettings, ServerSettings, StoreSettings};
pub use error::{ServerError, ServerResult};
pub use rooms::{RoomColumns, load_rooms, rooms_from_table};
pub use routes::{FeedsQuery, SharedState, router};
pub use service::{AvailabilityService, FeedsReport};
pub use store::{CsvTableStore, Row, Table, TableStore};
