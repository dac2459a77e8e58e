//! Availability service: room directory plus feed aggregation.
//!
//! Shared by the HTTP handlers and the one-shot `feeds` command.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use riadops_core::{Room, RoomAvailability};
use riadops_feeds::FeedAggregator;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::AppConfig;
use crate::error::{ServerError, ServerResult};
use crate::rooms::{RoomColumns, load_rooms};
use crate::store::{CsvTableStore, TableStore};

/// Aggregate availability report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedsReport {
    /// False only when the room list could not be read.
    pub success: bool,
    /// When the report was assembled.
    pub fetched_at: DateTime<Utc>,
    /// One entry per room, in table order.
    pub rooms: Vec<RoomAvailability>,
    /// Aggregate failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FeedsReport {
    /// Creates a successful report.
    pub fn ok(rooms: Vec<RoomAvailability>) -> Self {
        Self {
            success: true,
            fetched_at: Utc::now(),
            rooms,
            error: None,
        }
    }

    /// Creates a failed report with no rooms.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            fetched_at: Utc::now(),
            rooms: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// Loads rooms from the store and collects their feed availability.
pub struct AvailabilityService {
    store: Arc<dyn TableStore>,
    aggregator: FeedAggregator,
    rooms_table: String,
    columns: RoomColumns,
}

impl std::fmt::Debug for AvailabilityService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvailabilityService")
            .field("aggregator", &self.aggregator)
            .field("rooms_table", &self.rooms_table)
            .finish_non_exhaustive()
    }
}

impl AvailabilityService {
    /// Creates a service from its parts.
    pub fn new(store: Arc<dyn TableStore>, aggregator: FeedAggregator) -> Self {
        Self {
            store,
            aggregator,
            rooms_table: "Rooms".to_string(),
            columns: RoomColumns::default(),
        }
    }

    /// Builds the service described by `config`: CSV store and HTTP feeds.
    pub fn from_config(config: &AppConfig) -> ServerResult<Self> {
        let store = CsvTableStore::new(&config.store.dir);
        let aggregator = FeedAggregator::from_config(&config.feeds.to_feed_config())?;

        Ok(Self::new(Arc::new(store), aggregator)
            .with_rooms_table(&config.store.rooms_table)
            .with_columns(config.store.columns.clone()))
    }

    /// Builder: set the room table name.
    pub fn with_rooms_table(mut self, table: impl Into<String>) -> Self {
        self.rooms_table = table.into();
        self
    }

    /// Builder: set the room table's column names.
    pub fn with_columns(mut self, columns: RoomColumns) -> Self {
        self.columns = columns;
        self
    }

    /// Reads the room list.
    ///
    /// The store is synchronous, so the read runs on the blocking pool.
    pub async fn rooms(&self) -> ServerResult<Vec<Room>> {
        let store = Arc::clone(&self.store);
        let table = self.rooms_table.clone();
        let columns = self.columns.clone();

        tokio::task::spawn_blocking(move || load_rooms(store.as_ref(), &table, &columns))
            .await
            .map_err(|e| ServerError::internal(format!("room table read failed: {}", e)))?
    }

    /// Collects availability for every room, or only `room_id` if given.
    ///
    /// Per-room feed failures are recorded on the room; the only error is
    /// failing to read the room list.
    pub async fn availability(&self, room_id: Option<&str>) -> ServerResult<Vec<RoomAvailability>> {
        let mut rooms = self.rooms().await?;
        if let Some(id) = room_id {
            rooms.retain(|room| room.id == id);
        }

        info!(rooms = rooms.len(), "Collecting room availability");
        Ok(self.aggregator.collect(&rooms).await)
    }

    /// Builds the aggregate report.
    pub async fn report(&self, room_id: Option<&str>) -> FeedsReport {
        match self.availability(room_id).await {
            Ok(rooms) => FeedsReport::ok(rooms),
            Err(e) => {
                error!(error = %e, "Failed to read room list");
                FeedsReport::failure(e.to_string())
            }
        }
    }
}
