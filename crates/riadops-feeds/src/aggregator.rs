//! Concurrent per-room feed aggregation.
//!
//! [`FeedAggregator::collect`] fetches every room's feed at once and joins the
//! results. A room's failure (bad URL, HTTP error, timeout, non-calendar
//! body) is recorded on that room only; the aggregate call itself cannot
//! fail.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use riadops_core::{BookedRange, Room, RoomAvailability};
use tracing::{Instrument, debug, info, info_span, warn};

use crate::config::FeedConfig;
use crate::error::{FeedError, FeedResult};
use crate::ical::parse_feed;
use crate::source::{FeedSource, parse_feed_url};

/// Fetches and parses room feeds.
#[derive(Clone)]
pub struct FeedAggregator {
    source: Arc<dyn FeedSource>,
    timeout: Duration,
}

impl std::fmt::Debug for FeedAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedAggregator")
            .field("source", &self.source.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl FeedAggregator {
    /// Creates an aggregator using the default per-fetch timeout.
    pub fn new(source: Arc<dyn FeedSource>) -> Self {
        Self {
            source,
            timeout: Duration::from_secs(FeedConfig::DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Creates an aggregator over an HTTP source built from `config`.
    #[cfg(feature = "http")]
    pub fn from_config(config: &FeedConfig) -> FeedResult<Self> {
        let source = crate::http::HttpFeedSource::new(config)?;
        Ok(Self::new(Arc::new(source)).with_timeout(config.timeout))
    }

    /// Sets the per-fetch timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the per-fetch timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the availability of every room.
    ///
    /// All fetches run concurrently and the result keeps the order of
    /// `rooms`. Returns once every fetch has succeeded, failed or timed out.
    pub async fn collect(&self, rooms: &[Room]) -> Vec<RoomAvailability> {
        let feeds = rooms.iter().filter(|room| room.has_feed()).count();
        info!(rooms = rooms.len(), feeds, "Fetching room feeds");

        let results = join_all(rooms.iter().map(|room| self.room_availability(room))).await;

        let failed = results.iter().filter(|r| r.is_error()).count();
        info!(rooms = results.len(), failed, "Room feeds settled");
        results
    }

    /// Builds the availability of a single room.
    ///
    /// A room without a feed URL yields an empty, error-free record.
    pub async fn room_availability(&self, room: &Room) -> RoomAvailability {
        let availability = RoomAvailability::for_room(room);
        let Some(url) = room.ical_url.as_deref() else {
            debug!(room_id = %room.id, "Room has no feed URL");
            return availability;
        };

        let span = info_span!("room_feed", room_id = %room.id, source = self.source.name());
        match self.fetch_ranges(url).instrument(span).await {
            Ok(ranges) => {
                debug!(room_id = %room.id, ranges = ranges.len(), "Room feed parsed");
                availability.with_ranges(ranges)
            }
            Err(e) => {
                warn!(room_id = %room.id, code = %e.code(), error = %e.message(), "Room feed failed");
                availability.with_error(e.message())
            }
        }
    }

    /// Fetches and parses one feed, bounded by the configured timeout.
    pub async fn fetch_ranges(&self, url: &str) -> FeedResult<Vec<BookedRange>> {
        let url = parse_feed_url(url)?;

        let body = tokio::time::timeout(self.timeout, self.source.fetch(&url))
            .await
            .map_err(|_| FeedError::timeout(self.timeout))??;

        parse_feed(&body)
    }
}
