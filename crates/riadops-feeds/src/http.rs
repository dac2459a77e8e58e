//! HTTP feed source.
//!
//! Plain `GET` requests with no authentication, no caching and a
//! browser-compatible header set.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA};
use tracing::{debug, trace, warn};
use url::Url;

use crate::config::FeedConfig;
use crate::error::{FeedError, FeedResult};
use crate::source::{BoxFuture, FeedSource};

/// Fetches feeds over HTTP(S) with a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    client: Client,
    timeout: Duration,
}

impl HttpFeedSource {
    /// Creates a new source from the given configuration.
    pub fn new(config: &FeedConfig) -> FeedResult<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(!config.verify_tls)
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .default_headers(default_headers())
            .build()
            .map_err(|e| {
                FeedError::configuration(format!("Failed to create HTTP client: {}", e))
                    .with_source(e)
            })?;

        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    async fn get(&self, url: &Url) -> FeedResult<String> {
        trace!(url = %url, "Sending feed request");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.request_error("Request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "Feed request returned an error status");
            return Err(FeedError::http_status(
                status.as_u16(),
                status.canonical_reason(),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.request_error("Failed to read response", e))?;

        debug!(url = %url, bytes = body.len(), "Fetched feed");
        Ok(body)
    }

    /// Client-side deadlines report the same error as the aggregator's.
    fn request_error(&self, context: &str, e: reqwest::Error) -> FeedError {
        if e.is_timeout() {
            FeedError::timeout(self.timeout).with_source(e)
        } else {
            FeedError::network(format!("{}: {}", context, e)).with_source(e)
        }
    }
}

impl FeedSource for HttpFeedSource {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, FeedResult<String>> {
        Box::pin(self.get(url))
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(FeedConfig::ACCEPT));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_creation() {
        let config = FeedConfig::new().with_timeout(Duration::from_secs(3));
        let source = HttpFeedSource::new(&config).unwrap();
        assert_eq!(source.name(), "http");
    }

    #[test]
    fn no_cache_headers() {
        let headers = default_headers();
        assert_eq!(headers.get(CACHE_CONTROL).unwrap(), "no-cache");
        assert_eq!(headers.get(PRAGMA).unwrap(), "no-cache");
        assert!(
            headers
                .get(ACCEPT)
                .unwrap()
                .to_str()
                .unwrap()
                .starts_with("text/calendar")
        );
    }
}
