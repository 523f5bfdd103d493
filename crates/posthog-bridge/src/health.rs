//! Structured health reporting for bridge lifecycle events.

use std::sync::Arc;

use posthog_bridge_config::Config;

use crate::bootstrap::BootstrapError;
use crate::resolver::{ClientConfiguration, SkipReason};

const HEALTH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::health");

/// Observer trait used to surface lifecycle events to telemetry sinks.
pub trait HealthReporter: Send + Sync {
    /// Invoked before configuration loading begins.
    fn bootstrap_starting(&self);

    /// Invoked after bootstrap completes successfully.
    fn bootstrap_succeeded(&self, config: &Config);

    /// Invoked when bootstrap fails.
    fn bootstrap_failed(&self, error: &BootstrapError);

    /// Invoked when startup metadata configured the client.
    fn startup_configured(&self, configuration: &ClientConfiguration);

    /// Invoked when startup metadata lacked a usable API key.
    fn startup_skipped(&self, reason: SkipReason);
}

impl<T> HealthReporter for Arc<T>
where
    T: HealthReporter,
{
    fn bootstrap_starting(&self) {
        (**self).bootstrap_starting();
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        (**self).bootstrap_succeeded(config);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        (**self).bootstrap_failed(error);
    }

    fn startup_configured(&self, configuration: &ClientConfiguration) {
        (**self).startup_configured(configuration);
    }

    fn startup_skipped(&self, reason: SkipReason) {
        (**self).startup_skipped(reason);
    }
}

/// Default reporter that records lifecycle events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredHealthReporter;

impl StructuredHealthReporter {
    /// Builds a new reporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HealthReporter for StructuredHealthReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_starting",
            "starting bridge bootstrap"
        );
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_succeeded",
            metadata_path = ?config.metadata_path(),
            log_filter = %config.log_filter(),
            log_format = %config.log_format(),
            "bridge bootstrap completed"
        );
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "bootstrap_failed",
            error = %error,
            "bridge bootstrap failed"
        );
    }

    fn startup_configured(&self, configuration: &ClientConfiguration) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "startup_configured",
            host = %configuration.host,
            "client configured from metadata"
        );
    }

    fn startup_skipped(&self, reason: SkipReason) {
        tracing::warn!(
            target: HEALTH_TARGET,
            event = "startup_skipped",
            reason = %reason,
            "client left unconfigured at startup"
        );
    }
}
