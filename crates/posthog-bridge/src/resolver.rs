//! Resolution of the analytics client configuration.
//!
//! Configuration reaches the client through one of two triggers: the host
//! application's static metadata, read once at startup, or an explicit
//! `configure` command. Both share the same field semantics and both stamp the
//! bridge's [`SdkIdentity`] into the configuration so it is applied as part of
//! `setup`. The bridge keeps no copy; each resolution is handed straight to the
//! client, and the most recent one wins.

use std::fmt;

use crate::client::{AnalyticsClient, ClientError, SdkIdentity};
use crate::dispatch::{ArgumentBag, DispatchError};
use crate::metadata::{MetadataSource, keys};

const RESOLVER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::resolver");

/// Endpoint used when no host is supplied, or the supplied host is blank.
pub const DEFAULT_HOST: &str = "https://us.i.posthog.com";

/// Fully resolved analytics client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfiguration {
    /// Project API key. Never empty.
    pub api_key: String,
    /// Ingestion host.
    pub host: String,
    /// Whether application lifecycle events are captured automatically.
    pub capture_application_lifecycle_events: bool,
    /// Whether the client logs verbosely.
    pub debug: bool,
    /// Automatic screen-view capture. Always off: screens are reported
    /// explicitly through the `screen` command.
    pub capture_screen_views: bool,
    /// Identification applied to the client runtime.
    pub sdk: SdkIdentity,
}

impl ClientConfiguration {
    /// Builds a configuration with default flags.
    #[must_use]
    pub fn new(api_key: impl Into<String>, host: Option<&str>) -> Self {
        Self {
            api_key: api_key.into(),
            host: resolve_host(host),
            capture_application_lifecycle_events: false,
            debug: false,
            capture_screen_views: false,
            sdk: SdkIdentity::bridge(),
        }
    }

    /// Sets the lifecycle-event capture flag.
    #[must_use]
    pub const fn with_lifecycle_events(mut self, enabled: bool) -> Self {
        self.capture_application_lifecycle_events = enabled;
        self
    }

    /// Sets the debug flag.
    #[must_use]
    pub const fn with_debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Resolves the arguments of a `configure` command.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::BadArguments` when `apiKey` is missing, not a
    /// string, or empty.
    pub fn from_arguments(arguments: &ArgumentBag) -> Result<Self, DispatchError> {
        let api_key = arguments.required_non_empty_str("apiKey")?;
        Ok(Self::new(api_key, arguments.optional_str("host"))
            .with_lifecycle_events(
                arguments
                    .optional_bool("trackLifecycleEvents")
                    .unwrap_or(false),
            )
            .with_debug(arguments.optional_bool("debug").unwrap_or(false)))
    }

    /// Resolves configuration from the host application's static metadata.
    ///
    /// # Errors
    ///
    /// Returns the reason initialisation should be skipped when no usable API
    /// key is present.
    pub fn from_metadata(source: &dyn MetadataSource) -> Result<Self, SkipReason> {
        let api_key = source.string(keys::API_KEY).ok_or(SkipReason::MissingApiKey)?;
        if api_key.is_empty() {
            return Err(SkipReason::EmptyApiKey);
        }
        let host = source.string(keys::HOST);
        Ok(Self::new(api_key, host.as_deref())
            .with_lifecycle_events(
                source
                    .flag(keys::CAPTURE_APPLICATION_LIFECYCLE_EVENTS)
                    .unwrap_or(false),
            )
            .with_debug(source.flag(keys::DEBUG).unwrap_or(false)))
    }
}

/// Picks the ingestion host: the candidate unless it is absent or blank after
/// trimming, in which case [`DEFAULT_HOST`].
#[must_use]
pub fn resolve_host(candidate: Option<&str>) -> String {
    match candidate {
        Some(host) if !host.trim().is_empty() => host.to_owned(),
        _ => DEFAULT_HOST.to_owned(),
    }
}

/// Source that triggered a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationTrigger {
    /// Automatic initialisation from static metadata.
    Startup,
    /// Explicit `configure` command.
    Configure,
}

impl ConfigurationTrigger {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Configure => "configure",
        }
    }
}

impl fmt::Display for ConfigurationTrigger {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Why startup initialisation did not configure the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The API key entry is absent or not a string.
    MissingApiKey,
    /// The API key entry is an empty string.
    EmptyApiKey,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::MissingApiKey => "metadata has no API key",
            Self::EmptyApiKey => "metadata API key is empty",
        })
    }
}

/// Observable result of startup initialisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupOutcome {
    /// The client was configured from metadata.
    Configured(ClientConfiguration),
    /// Initialisation was skipped; the client stays unconfigured until an
    /// explicit `configure` command arrives.
    Skipped(SkipReason),
}

impl StartupOutcome {
    /// Returns true when startup configured the client.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        matches!(self, Self::Configured(_))
    }
}

/// Hands a resolved configuration to the client.
///
/// # Errors
///
/// Propagates the client's `setup` failure.
pub fn apply(
    client: &dyn AnalyticsClient,
    configuration: ClientConfiguration,
    trigger: ConfigurationTrigger,
) -> Result<(), ClientError> {
    tracing::info!(
        target: RESOLVER_TARGET,
        trigger = %trigger,
        host = %configuration.host,
        lifecycle_events = configuration.capture_application_lifecycle_events,
        debug = configuration.debug,
        "applying client configuration"
    );
    client.setup(configuration)
}

/// Runs startup initialisation against the given metadata.
///
/// # Errors
///
/// Propagates the client's `setup` failure. A missing API key is not an
/// error; it yields [`StartupOutcome::Skipped`].
pub fn initialise_from_metadata(
    source: &dyn MetadataSource,
    client: &dyn AnalyticsClient,
) -> Result<StartupOutcome, ClientError> {
    match ClientConfiguration::from_metadata(source) {
        Ok(configuration) => {
            apply(client, configuration.clone(), ConfigurationTrigger::Startup)?;
            Ok(StartupOutcome::Configured(configuration))
        }
        Err(reason) => {
            tracing::warn!(
                target: RESOLVER_TARGET,
                reason = %reason,
                "skipping startup initialisation"
            );
            Ok(StartupOutcome::Skipped(reason))
        }
    }
}
