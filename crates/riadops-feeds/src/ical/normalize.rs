//! Conversion of extracted events into [`BookedRange`]s.

use riadops_core::{BookedRange, day_after};

use super::extract::ExtractedEvent;

/// Converts an extracted event into a booked range.
///
/// An event without an end date blocks its start date only, so its end is
/// the following calendar day.
pub fn normalize_event(event: ExtractedEvent) -> BookedRange {
    let end = event.end.unwrap_or_else(|| day_after(event.start));
    BookedRange {
        start: event.start,
        end,
        summary: event.summary,
    }
}

/// Normalizes every event, keeping document order and duplicates.
pub fn normalize_events(events: Vec<ExtractedEvent>) -> Vec<BookedRange> {
    events.into_iter().map(normalize_event).collect()
}
