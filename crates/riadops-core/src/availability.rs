//! Room availability types.
//!
//! This module provides [`Room`] (a bookable room as listed in the backing
//! store), [`BookedRange`] (one blocked date span parsed from a calendar feed)
//! and [`RoomAvailability`] (the per-room result of one fetch cycle).
//!
//! The JSON shapes use camelCase field names since they are consumed by the
//! dashboard frontend.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// A room as listed in the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Stable room identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Property tag (which house the room belongs to).
    pub property: String,
    /// External calendar feed URL, if the room has one.
    pub ical_url: Option<String>,
}

impl Room {
    /// Creates a room with no feed URL.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        property: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            property: property.into(),
            ical_url: None,
        }
    }

    /// Builder method to set the feed URL.
    ///
    /// Blank values are treated as "no URL".
    pub fn with_ical_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        let trimmed = url.trim();
        self.ical_url = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    /// Returns true if the room has a feed URL.
    pub fn has_feed(&self) -> bool {
        self.ical_url.is_some()
    }
}

/// One blocked date span for a room.
///
/// `start <= end` is not enforced: ranges are reported exactly as the feed
/// describes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedRange {
    /// First blocked date.
    pub start: NaiveDate,
    /// End date as given by the feed (or the day after `start`).
    pub end: NaiveDate,
    /// Free-text summary of the event, if the feed provided one.
    pub summary: Option<String>,
}

impl BookedRange {
    /// Creates a range with an explicit end date.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            summary: None,
        }
    }

    /// Creates a single-day range, ending on the day after `start`.
    pub fn single_day(start: NaiveDate) -> Self {
        Self::new(start, day_after(start))
    }

    /// Builder method to set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}

/// Returns the calendar day after `date`, rolling over month and year.
///
/// Saturates at the last representable date.
pub fn day_after(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(1)).unwrap_or(date)
}

/// Availability of a single room for one fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAvailability {
    /// Room identifier.
    pub room_id: String,
    /// Room display name.
    pub room_name: String,
    /// Property tag.
    pub property: String,
    /// Feed URL, `null` when the room has none.
    pub ical_url: Option<String>,
    /// Blocked ranges in feed order.
    pub blocked_dates: Vec<BookedRange>,
    /// Room-level fetch or parse error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RoomAvailability {
    /// Creates an empty availability record for `room`.
    pub fn for_room(room: &Room) -> Self {
        Self {
            room_id: room.id.clone(),
            room_name: room.name.clone(),
            property: room.property.clone(),
            ical_url: room.ical_url.clone(),
            blocked_dates: Vec::new(),
            error: None,
        }
    }

    /// Builder method to set the blocked ranges.
    pub fn with_ranges(mut self, ranges: Vec<BookedRange>) -> Self {
        self.blocked_dates = ranges;
        self
    }

    /// Builder method to record a room-level error.
    ///
    /// Any ranges already set are cleared: a failed room reports none.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.blocked_dates.clear();
        self.error = Some(error.into());
        self
    }

    /// Returns true if fetching this room failed.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
