//! FeedSource trait definition.
//!
//! A [`FeedSource`] retrieves the raw text of a calendar feed. The HTTP
//! implementation lives in [`crate::http`]; tests substitute in-memory
//! sources to exercise the aggregator without a network.

use std::future::Future;
use std::pin::Pin;

use url::Url;

use crate::error::FeedResult;

/// A boxed future for async trait methods.
///
/// Boxing keeps [`FeedSource`] object-safe so the aggregator can hold an
/// `Arc<dyn FeedSource>`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Retrieves calendar feed documents.
///
/// Implementations report transport failures and non-success statuses as
/// [`FeedError`](crate::FeedError)s. They do not need to enforce a deadline:
/// the aggregator wraps every call in its own timeout.
pub trait FeedSource: Send + Sync {
    /// Short name used in logs (e.g. "http").
    fn name(&self) -> &str;

    /// Fetches the document at `url` and returns its body.
    fn fetch<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, FeedResult<String>>;
}

/// Parses a room's feed URL.
///
/// Only absolute `http` and `https` URLs are accepted. `webcal://` links,
/// which booking platforms hand out for calendar subscriptions, are fetched
/// over `https`.
pub fn parse_feed_url(raw: &str) -> FeedResult<Url> {
    use crate::error::FeedError;

    let raw = raw.trim();
    let rewritten;
    let raw = match raw.strip_prefix("webcal://") {
        Some(rest) => {
            rewritten = format!("https://{rest}");
            rewritten.as_str()
        }
        None => raw,
    };

    let url = Url::parse(raw)
        .map_err(|e| FeedError::invalid_url(format!("Invalid feed URL: {e}")).with_source(e))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(FeedError::invalid_url(format!(
            "Unsupported feed URL scheme '{scheme}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeedErrorCode;

    #[test]
    fn accepts_http_and_https() {
        let url = parse_feed_url("https://www.airbnb.com/calendar/ical/123.ics?s=abc").unwrap();
        assert_eq!(url.host_str(), Some("www.airbnb.com"));
        assert!(parse_feed_url(" http://localhost:8080/a.ics ").is_ok());
    }

    #[test]
    fn webcal_is_fetched_over_https() {
        let url = parse_feed_url("webcal://ical.booking.com/v1/export?t=xyz").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.as_str(), "https://ical.booking.com/v1/export?t=xyz");
    }

    #[test]
    fn rejects_relative_and_foreign_schemes() {
        let err = parse_feed_url("calendar.ics").unwrap_err();
        assert_eq!(err.code(), FeedErrorCode::InvalidUrl);

        let err = parse_feed_url("ftp://example.com/cal.ics").unwrap_err();
        assert_eq!(err.code(), FeedErrorCode::InvalidUrl);
        assert!(err.message().contains("ftp"));
    }
}
