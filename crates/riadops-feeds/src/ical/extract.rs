//! VEVENT extraction.
//!
//! A two-state scanner over logical lines. Only `DTSTART`, `DTEND` and
//! `SUMMARY` are captured; every other property is ignored, as is anything
//! outside a `BEGIN:VEVENT` / `END:VEVENT` block.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::{debug, trace, warn};

const BEGIN_EVENT: &str = "BEGIN:VEVENT";
const END_EVENT: &str = "END:VEVENT";

/// First run of eight ASCII digits, read as `YYYYMMDD`.
static DATE_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{8}").expect("Invalid date digits regex"));

/// An event block that carried a start date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedEvent {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    pub summary: Option<String>,
}

/// Fields captured while inside an event block.
#[derive(Debug, Default)]
struct PendingEvent {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    summary: Option<String>,
}

impl PendingEvent {
    fn finish(self) -> Option<ExtractedEvent> {
        let start = self.start?;
        Some(ExtractedEvent {
            start,
            end: self.end,
            summary: self.summary,
        })
    }
}

#[derive(Debug)]
enum ScanState {
    Outside,
    Inside(PendingEvent),
}

/// Scans logical lines and returns the events that had a start date, in
/// document order.
pub fn extract_events<I, S>(lines: I) -> Vec<ExtractedEvent>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut events = Vec::new();
    let mut state = ScanState::Outside;
    let mut dropped = 0usize;

    for line in lines {
        let line = line.as_ref();

        if line == BEGIN_EVENT {
            if matches!(state, ScanState::Inside(_)) {
                trace!("BEGIN:VEVENT inside an open event, restarting");
            }
            state = ScanState::Inside(PendingEvent::default());
            continue;
        }

        if line == END_EVENT {
            if let ScanState::Inside(pending) = std::mem::replace(&mut state, ScanState::Outside) {
                match pending.finish() {
                    Some(event) => events.push(event),
                    None => dropped += 1,
                }
            }
            continue;
        }

        let ScanState::Inside(ref mut pending) = state else {
            continue;
        };

        if let Some(value) = property_value(line, "DTSTART") {
            pending.start = parse_date_digits(value);
        } else if let Some(value) = property_value(line, "DTEND") {
            pending.end = parse_date_digits(value);
        } else if let Some(value) = property_value(line, "SUMMARY") {
            pending.summary = Some(value.trim().to_string());
        }
    }

    if dropped > 0 {
        debug!(dropped, "Dropped event blocks without a start date");
    }

    events
}

/// Returns the value of `line` if it is a `name` property.
///
/// The name may be followed by `;`-separated parameters before the colon.
/// Colons inside double-quoted parameter values do not end the parameters.
pub(crate) fn property_value<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(name)?;

    if let Some(value) = rest.strip_prefix(':') {
        return Some(value);
    }
    if !rest.starts_with(';') {
        return None;
    }

    let mut quoted = false;
    for (idx, ch) in rest.char_indices() {
        match ch {
            '"' => quoted = !quoted,
            ':' if !quoted => return Some(&rest[idx + 1..]),
            _ => {}
        }
    }
    None
}

/// Reads the first run of eight ASCII digits in `value` as `YYYYMMDD`.
///
/// Returns `None` if there is no such run or it is not a calendar date.
pub(crate) fn parse_date_digits(value: &str) -> Option<NaiveDate> {
    let digits = DATE_DIGITS.find(value)?.as_str();
    let parsed = NaiveDate::parse_from_str(digits, "%Y%m%d").ok();
    if parsed.is_none() {
        warn!(value, digits, "Ignoring date field with impossible date");
    }
    parsed
}
