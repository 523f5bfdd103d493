//! Seam to the native analytics client.
//!
//! The bridge never talks to the network or owns event queues. Every command
//! that survives validation ends in exactly one call on an [`AnalyticsClient`],
//! which is injected into the dispatcher rather than reached through a
//! process-wide singleton.

mod logging;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::resolver::ClientConfiguration;

pub use logging::LoggingAnalyticsClient;

/// Property bag forwarded to the client (event, user, group and super
/// properties).
pub type Properties = Map<String, Value>;

/// Client-name tag reported by the native client for events sent through the
/// bridge.
pub const SDK_NAME: &str = "posthog-flutter";

/// Version tag reported alongside [`SDK_NAME`].
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Identification applied to the native client's runtime so outbound
/// telemetry is attributed to the bridge rather than the bare native SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SdkIdentity {
    /// Client-name tag.
    pub name: &'static str,
    /// Version tag.
    pub version: &'static str,
}

impl SdkIdentity {
    /// Identity of this bridge build.
    #[must_use]
    pub const fn bridge() -> Self {
        Self {
            name: SDK_NAME,
            version: SDK_VERSION,
        }
    }
}

impl Default for SdkIdentity {
    fn default() -> Self {
        Self::bridge()
    }
}

/// Failure reported by the analytics client itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("analytics client error: {message}")]
pub struct ClientError {
    message: String,
}

impl ClientError {
    /// Builds an error from a human-readable message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Message reported by the client.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Operations the bridge can request from the analytics client.
///
/// Implementations own all mutable state and its synchronisation; the bridge
/// may call into a shared client from several threads at once.
pub trait AnalyticsClient: Send + Sync {
    /// Applies a fully resolved configuration. Replaces any prior one.
    fn setup(&self, configuration: ClientConfiguration) -> Result<(), ClientError>;

    /// Returns the value of a feature flag, if the flag is known.
    fn get_feature_flag(&self, key: &str) -> Result<Option<Value>, ClientError>;

    /// Returns whether a feature flag is enabled.
    fn is_feature_enabled(&self, key: &str) -> Result<bool, ClientError>;

    /// Returns the payload attached to a feature flag, if any.
    fn get_feature_flag_payload(&self, key: &str) -> Result<Option<Value>, ClientError>;

    /// Associates the current device with a known user.
    fn identify(
        &self,
        distinct_id: &str,
        user_properties: Option<Properties>,
        user_properties_set_once: Option<Properties>,
    ) -> Result<(), ClientError>;

    /// Records a custom event.
    fn capture(&self, event: &str, properties: Option<Properties>) -> Result<(), ClientError>;

    /// Records a screen view.
    fn screen(&self, screen_name: &str, properties: Option<Properties>) -> Result<(), ClientError>;

    /// Links the current distinct id to an alias.
    fn alias(&self, alias: &str) -> Result<(), ClientError>;

    /// Returns the current distinct id.
    fn get_distinct_id(&self) -> Result<String, ClientError>;

    /// Clears identity and super properties.
    fn reset(&self) -> Result<(), ClientError>;

    /// Resumes capturing after an opt-out.
    fn opt_in(&self) -> Result<(), ClientError>;

    /// Stops capturing.
    fn opt_out(&self) -> Result<(), ClientError>;

    /// Toggles client debug logging.
    fn set_debug(&self, enabled: bool) -> Result<(), ClientError>;

    /// Requests a fresh copy of the feature flags.
    fn reload_feature_flags(&self) -> Result<(), ClientError>;

    /// Associates the current user with a group.
    fn group(
        &self,
        group_type: &str,
        group_key: &str,
        group_properties: Option<Properties>,
    ) -> Result<(), ClientError>;

    /// Adds super properties sent with every subsequent event.
    fn register(&self, properties: Properties) -> Result<(), ClientError>;

    /// Removes a super property.
    fn unregister(&self, key: &str) -> Result<(), ClientError>;

    /// Sends queued events immediately.
    fn flush(&self) -> Result<(), ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bridge_identity_reports_crate_version() {
        let identity = SdkIdentity::bridge();
        assert_eq!(identity.name, "posthog-flutter");
        assert_eq!(identity.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(SdkIdentity::default(), identity);
    }

    #[test]
    fn client_error_exposes_message() {
        let error = ClientError::new("queue full");
        assert_eq!(error.message(), "queue full");
        assert_eq!(error.to_string(), "analytics client error: queue full");
    }
}
