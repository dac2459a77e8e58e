//! Feeds command: one fetch cycle printed to stdout.

use crate::config::AppConfig;
use crate::error::{ServerError, ServerResult};
use crate::service::{AvailabilityService, FeedsReport};

/// Fetches every room's feed once and prints the report.
///
/// Room-level failures are part of the report; only an unreadable room list
/// makes the command fail (after printing the failed report).
pub async fn run(config: &AppConfig, room: Option<&str>, pretty: bool) -> ServerResult<()> {
    let service = AvailabilityService::from_config(config)?;

    let (report, outcome) = match service.availability(room).await {
        Ok(rooms) => (FeedsReport::ok(rooms), Ok(())),
        Err(e) => (FeedsReport::failure(e.to_string()), Err(e)),
    };

    let json = if pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .map_err(|e| ServerError::internal(format!("failed to encode report: {}", e)))?;
    println!("{}", json);

    outcome
}
