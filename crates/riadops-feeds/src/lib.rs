//! Room calendar feeds: fetching, parsing and aggregation.
//!
//! - [`parse_feed`] - Turns an iCalendar document into [`BookedRange`]s
//! - [`FeedSource`] - Retrieves feed documents ([`HttpFeedSource`] over HTTP)
//! - [`FeedAggregator`] - Fetches every room's feed concurrently
//! - [`FeedError`] - Per-room failures
//!
//! # Architecture
//!
//! ```text
//!   rooms ──▶ FeedAggregator::collect()
//!                 │  one future per room, joined
//!                 ▼
//!          ┌──────────────┐  timeout   ┌────────────┐
//!          │  FeedSource  │──────────▶ │ parse_feed │
//!          └──────────────┘            └─────┬──────┘
//!                                            ▼
//!                               Vec<RoomAvailability>
//! ```
//!
//! # Example
//!
//! ```ignore
//! use riadops_feeds::{FeedAggregator, FeedConfig};
//!
//! let aggregator = FeedAggregator::from_config(&FeedConfig::default())?;
//! let availability = aggregator.collect(&rooms).await;
//! ```
//!
//! [`BookedRange`]: riadops_core::BookedRange

pub mod aggregator;
pub mod config;
pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod ical;
pub mod source;

pub use aggregator::FeedAggregator;
pub use config::FeedConfig;
pub use error::{FeedError, FeedErrorCode, FeedResult};
#[cfg(feature = "http")]
pub use http::HttpFeedSource;
pub use ical::parse_feed;
pub use source::{BoxFuture, FeedSource, parse_feed_url};
