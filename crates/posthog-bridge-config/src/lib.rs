//! Runtime configuration for the PostHog bridge process.
//!
//! Configuration is layered by `ortho_config`: built-in defaults, then an
//! optional TOML file (`--config-path` / `POSTHOG_BRIDGE_CONFIG_PATH`), then
//! `POSTHOG_BRIDGE_*` environment variables, then command-line flags.
//!
//! These settings govern the bridge itself (logging and where the host
//! application's static metadata lives). The analytics client configuration
//! is resolved separately from that metadata or from an explicit `configure`
//! call, and is never stored here.

mod logging;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use logging::{LogFormat, LogFormatParseError};

/// Default log filter expression used by the bridge.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the bridge.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Resolved bridge configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "POSTHOG_BRIDGE")]
pub struct Config {
    /// `tracing` filter expression applied to bridge logs.
    #[serde(default = "default_log_filter_string")]
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for bridge logs.
    #[serde(default = "default_log_format")]
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// JSON manifest holding the host application's static metadata.
    ///
    /// When unset, startup initialisation sees no metadata and is skipped.
    #[serde(default)]
    pub metadata_path: Option<Utf8PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            metadata_path: None,
        }
    }
}

impl Config {
    /// Log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Location of the static metadata manifest, if configured.
    #[must_use]
    pub fn metadata_path(&self) -> Option<&Utf8Path> {
        self.metadata_path.as_deref()
    }
}
