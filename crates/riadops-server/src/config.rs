//! Application configuration.
//!
//! All settings live in a single `config.toml`, by default at
//! `~/.config/riadops/config.toml`. Every section is optional:
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0:8080"
//!
//! [store]
//! dir = "/srv/riadops/sheets"
//! rooms_table = "Rooms"
//!
//! [store.columns]
//! ical_url = "Airbnb iCal"
//!
//! [feeds]
//! timeout_secs = 10
//!
//! [logging]
//! format = "json"
//! level = "debug"
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use riadops_core::{TracingConfig, TracingOutputFormat};
use riadops_feeds::FeedConfig;
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};
use crate::rooms::RoomColumns;

/// Configuration for riadops.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings.
    pub server: ServerSettings,
    /// Table store settings.
    pub store: StoreSettings,
    /// Feed fetching settings.
    pub feeds: FeedSettings,
    /// Log output settings.
    pub logging: LoggingSettings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Address to listen on.
    pub bind: SocketAddr,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
        }
    }
}

/// Table store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Directory holding the `<table>.csv` exports.
    pub dir: PathBuf,
    /// Name of the table listing the rooms.
    pub rooms_table: String,
    /// Header names of the room table.
    pub columns: RoomColumns,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            rooms_table: "Rooms".to_string(),
            columns: RoomColumns::default(),
        }
    }
}

/// Feed fetching settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    /// Per-room fetch timeout in seconds.
    pub timeout_secs: u64,
    /// User agent override.
    pub user_agent: Option<String>,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            timeout_secs: FeedConfig::DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl FeedSettings {
    /// Converts to the feed client configuration.
    pub fn to_feed_config(&self) -> FeedConfig {
        let mut config = FeedConfig::new().with_timeout(Duration::from_secs(self.timeout_secs));
        if let Some(ref agent) = self.user_agent {
            config = config.with_user_agent(agent);
        }
        config
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Output format: `pretty`, `compact` or `json`.
    pub format: TracingOutputFormat,
    /// Default level when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            format: TracingOutputFormat::Pretty,
            level: "info".to_string(),
        }
    }
}

impl LoggingSettings {
    /// Builds the tracing configuration, honouring `--debug`.
    pub fn to_tracing_config(&self, debug: bool) -> ServerResult<TracingConfig> {
        if debug {
            return Ok(TracingConfig::cli_debug());
        }
        let level = riadops_core::tracing::parse_level(&self.level)?;
        let base = match self.format {
            TracingOutputFormat::Json => TracingConfig::service(),
            format => TracingConfig::default().with_format(format),
        };
        Ok(base.with_level(level))
    }
}

impl AppConfig {
    /// Validates values serde cannot check.
    pub fn validate(&self) -> ServerResult<()> {
        if self.feeds.timeout_secs == 0 {
            return Err(ServerError::config("feeds.timeout_secs must be at least 1"));
        }
        if self.store.rooms_table.trim().is_empty() {
            return Err(ServerError::config("store.rooms_table must not be empty"));
        }
        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> ServerResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ServerError::config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from the default path, falling back to defaults
    /// when no file exists there.
    pub fn load() -> ServerResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ServerResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ServerError::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("riadops")
            .join("config.toml")
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> ServerResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ServerError::config(format!("failed to serialize config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.bind.to_string(), "127.0.0.1:8080");
        assert_eq!(config.store.rooms_table, "Rooms");
        assert_eq!(config.feeds.timeout_secs, 10);
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let config = AppConfig::from_toml(
            r#"
[server]
bind = "0.0.0.0:9000"

[store]
dir = "/srv/sheets"

[store.columns]
ical_url = "Airbnb iCal"

[feeds]
timeout_secs = 4
user_agent = "riad-bot"

[logging]
format = "json"
"#,
        )
        .unwrap();

        assert_eq!(config.server.bind.port(), 9000);
        assert_eq!(config.store.dir, PathBuf::from("/srv/sheets"));
        assert_eq!(config.store.columns.ical_url, "Airbnb iCal");
        assert_eq!(config.store.columns.id, "Room ID");

        let feed = config.feeds.to_feed_config();
        assert_eq!(feed.timeout, Duration::from_secs(4));
        assert_eq!(feed.user_agent, "riad-bot");

        let tracing = config.logging.to_tracing_config(false).unwrap();
        assert_eq!(tracing.output_format, TracingOutputFormat::Json);
        assert_eq!(tracing.default_level, Level::INFO);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = AppConfig::from_toml("[feeds]\ntimeout_secs = 0\n").unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn bad_values_are_config_errors() {
        assert!(matches!(
            AppConfig::from_toml("[server]\nbind = \"nowhere\"\n"),
            Err(ServerError::Config { .. })
        ));
        assert!(matches!(
            AppConfig::from_toml("[logging]\nformat = \"xml\"\n"),
            Err(ServerError::Config { .. })
        ));
    }

    #[test]
    fn debug_flag_overrides_logging() {
        let logging = LoggingSettings {
            format: TracingOutputFormat::Json,
            level: "warn".to_string(),
        };
        let config = logging.to_tracing_config(true).unwrap();
        assert_eq!(config.default_level, Level::DEBUG);

        let config = logging.to_tracing_config(false).unwrap();
        assert_eq!(config.default_level, Level::WARN);
    }

    #[test]
    fn load_from_file_round_trips_dump() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AppConfig::default();
        config.store.rooms_table = "Chambres".to_string();
        std::fs::write(&path, config.to_toml().unwrap()).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.store.rooms_table, "Chambres");
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = AppConfig::load_from(Path::new("/nonexistent/riadops.toml")).unwrap_err();
        assert!(matches!(err, ServerError::Config { .. }));
    }
}
