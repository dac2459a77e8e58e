//! Feed fetching configuration.

use std::time::Duration;

/// Configuration shared by the HTTP feed source and the aggregator.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Deadline for a single room's fetch, connection to last body byte.
    pub timeout: Duration,

    /// User agent sent with every request.
    ///
    /// Some platforms reject requests without a browser-like agent, so the
    /// default carries a `Mozilla/5.0` compatible prefix.
    pub user_agent: String,

    /// Whether to verify TLS certificates.
    pub verify_tls: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: Self::default_user_agent(),
            verify_tls: true,
        }
    }
}

impl FeedConfig {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    /// `Accept` header sent with feed requests.
    pub const ACCEPT: &'static str = "text/calendar, text/plain;q=0.9, */*;q=0.8";

    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the default user agent string.
    pub fn default_user_agent() -> String {
        format!(
            "Mozilla/5.0 (compatible; riadops/{}; +calendar-sync)",
            env!("CARGO_PKG_VERSION")
        )
    }

    /// Sets the per-fetch timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Disables TLS verification (for testing only).
    pub fn with_insecure_tls(mut self) -> Self {
        self.verify_tls = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = FeedConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.user_agent.starts_with("Mozilla/5.0 (compatible; riadops/"));
        assert!(config.verify_tls);
    }

    #[test]
    fn builder_methods() {
        let config = FeedConfig::new()
            .with_timeout(Duration::from_millis(500))
            .with_user_agent("test-agent")
            .with_insecure_tls();

        assert_eq!(config.timeout, Duration::from_millis(500));
        assert_eq!(config.user_agent, "test-agent");
        assert!(!config.verify_tls);
    }
}
