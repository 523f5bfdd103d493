//! Health reporter double.

use std::sync::Mutex;

use posthog_bridge_config::Config;

use crate::bootstrap::BootstrapError;
use crate::health::HealthReporter;
use crate::resolver::{ClientConfiguration, SkipReason};

/// Lifecycle events captured by [`RecordingHealthReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthEvent {
    BootstrapStarting,
    BootstrapSucceeded,
    BootstrapFailed(String),
    StartupConfigured { host: String },
    StartupSkipped(SkipReason),
}

/// Records health events for assertions.
#[derive(Debug, Default)]
pub struct RecordingHealthReporter {
    events: Mutex<Vec<HealthEvent>>,
}

impl RecordingHealthReporter {
    /// Captures a copy of the recorded events.
    pub fn events(&self) -> Vec<HealthEvent> {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .clone()
    }

    fn record(&self, event: HealthEvent) {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .push(event);
    }
}

impl HealthReporter for RecordingHealthReporter {
    fn bootstrap_starting(&self) {
        self.record(HealthEvent::BootstrapStarting);
    }

    fn bootstrap_succeeded(&self, _config: &Config) {
        self.record(HealthEvent::BootstrapSucceeded);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        self.record(HealthEvent::BootstrapFailed(error.to_string()));
    }

    fn startup_configured(&self, configuration: &ClientConfiguration) {
        self.record(HealthEvent::StartupConfigured {
            host: configuration.host.clone(),
        });
    }

    fn startup_skipped(&self, reason: SkipReason) {
        self.record(HealthEvent::StartupSkipped(reason));
    }
}
