//! iCalendar feed parsing.
//!
//! Booking platforms export room calendars as `.ics` feeds where every
//! reservation or manual block is a `VEVENT`. Only the blocked dates matter
//! here, so instead of a full RFC 5545 parser this module runs a small
//! pipeline:
//!
//! ```text
//! text ──unfold()──▶ logical lines ──extract_events()──▶ events
//!                                                          │
//!                                 Vec<BookedRange> ◀──normalize_events()
//! ```
//!
//! Times and time zones are ignored: `DTSTART:20250610T150000Z` blocks
//! 2025-06-10 just like `DTSTART;VALUE=DATE:20250610`.

mod extract;
mod normalize;
mod unfold;

use riadops_core::BookedRange;
use tracing::debug;

use crate::error::{FeedError, FeedResult};

pub use extract::{ExtractedEvent, extract_events};
pub use normalize::{normalize_event, normalize_events};
pub use unfold::{Unfolded, unfold};

/// Marker every calendar document must begin with.
pub const CALENDAR_MARKER: &str = "BEGIN:VCALENDAR";

/// Returns true if `text` begins with the calendar marker.
///
/// A byte order mark and leading whitespace are skipped first.
pub fn is_calendar_document(text: &str) -> bool {
    text.trim_start_matches('\u{feff}')
        .trim_start()
        .starts_with(CALENDAR_MARKER)
}

/// Parses a calendar document into booked ranges.
///
/// # Errors
///
/// Returns [`FeedError::invalid_document`] if the text does not begin with
/// `BEGIN:VCALENDAR`. Malformed events inside a valid document are skipped,
/// never reported.
pub fn parse_feed(text: &str) -> FeedResult<Vec<BookedRange>> {
    if !is_calendar_document(text) {
        return Err(FeedError::invalid_document());
    }

    let unfolded = unfold(text);
    let events = extract_events(unfolded.lines());
    let ranges = normalize_events(events);

    debug!(ranges = ranges.len(), "Parsed calendar feed");
    Ok(ranges)
}
