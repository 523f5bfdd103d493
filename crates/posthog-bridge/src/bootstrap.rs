//! Bridge bootstrap orchestration.
//!
//! Bootstrap loads configuration, installs telemetry, reads the bundle
//! metadata, and runs startup initialisation against the injected client.
//! A missing API key does not fail bootstrap; the bridge starts with an
//! unconfigured client and waits for an explicit `configure` command.

use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use serde_json::Value;
use thiserror::Error;

use posthog_bridge_config::Config;

use crate::channel::ChannelSession;
use crate::client::{AnalyticsClient, ClientError};
use crate::dispatch::{Dispatcher, InvocationResult};
use crate::health::HealthReporter;
use crate::metadata::{BundleMetadata, MetadataError};
use crate::resolver::{self, StartupOutcome};
use crate::telemetry::{self, TelemetryError, TelemetryHandle};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the bridge configuration.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that delegates to [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// The configured metadata file could not be read.
    #[error("failed to load bundle metadata: {source}")]
    Metadata {
        /// Underlying metadata error.
        #[source]
        source: MetadataError,
    },
    /// The client rejected the startup configuration.
    #[error("failed to set up analytics client: {source}")]
    ClientSetup {
        /// Underlying client error.
        #[source]
        source: ClientError,
    },
}

/// Result of a successful bootstrap invocation.
#[derive(Debug)]
pub struct Bridge {
    config: Config,
    dispatcher: Dispatcher,
    startup: StartupOutcome,
    telemetry: TelemetryHandle,
}

impl Bridge {
    /// Accessor for the resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Accessor for the dispatcher bound to the bridge's client.
    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// What startup initialisation did with the bundle metadata.
    #[must_use]
    pub const fn startup(&self) -> &StartupOutcome {
        &self.startup
    }

    /// Accessor for the telemetry handle, primarily useful for testing.
    #[must_use]
    pub const fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }

    /// Runs one named invocation.
    #[must_use]
    pub fn invoke(&self, method: &str, arguments: Option<Value>) -> InvocationResult {
        self.dispatcher.invoke(method, arguments)
    }

    /// Builds a channel session over this bridge's dispatcher.
    #[must_use]
    pub fn session(&self) -> ChannelSession {
        ChannelSession::new(self.dispatcher.clone())
    }
}

/// Bootstraps the bridge using the supplied collaborators.
///
/// # Errors
///
/// Returns a [`BootstrapError`] when configuration, telemetry, metadata
/// loading, or the client's startup `setup` fails. Each failure is reported
/// to `reporter` before it is returned.
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
    client: Arc<dyn AnalyticsClient>,
) -> Result<Bridge, BootstrapError> {
    reporter.bootstrap_starting();

    let config = match loader.load() {
        Ok(config) => config,
        Err(source) => return Err(fail(reporter.as_ref(), BootstrapError::Configuration { source })),
    };

    let telemetry = match telemetry::initialise(&config) {
        Ok(handle) => handle,
        Err(source) => return Err(fail(reporter.as_ref(), BootstrapError::Telemetry { source })),
    };

    let metadata = match config.metadata_path() {
        Some(path) => match BundleMetadata::load(path) {
            Ok(metadata) => metadata,
            Err(source) => return Err(fail(reporter.as_ref(), BootstrapError::Metadata { source })),
        },
        None => BundleMetadata::empty(),
    };

    let startup = match resolver::initialise_from_metadata(&metadata, client.as_ref()) {
        Ok(outcome) => outcome,
        Err(source) => return Err(fail(reporter.as_ref(), BootstrapError::ClientSetup { source })),
    };

    match &startup {
        StartupOutcome::Configured(configuration) => reporter.startup_configured(configuration),
        StartupOutcome::Skipped(reason) => reporter.startup_skipped(*reason),
    }
    reporter.bootstrap_succeeded(&config);

    Ok(Bridge {
        config,
        dispatcher: Dispatcher::new(client),
        startup,
        telemetry,
    })
}

fn fail(reporter: &dyn HealthReporter, error: BootstrapError) -> BootstrapError {
    reporter.bootstrap_failed(&error);
    error
}
