//! Method-channel bridge between an application layer and an analytics client.
//!
//! The application layer addresses the bridge by command name with a
//! loosely-typed argument object. The bridge validates each invocation against
//! a fixed command table, forwards it to the [`AnalyticsClient`] as a typed
//! call, and answers with exactly one [`InvocationResult`]: a success value, a
//! structured error, or "not implemented" for unknown commands.
//!
//! Client configuration comes from two places. At startup the bridge reads
//! bundle metadata (see [`metadata`]) and configures the client when an API key
//! is present. Later, a `configure` command can supply a new configuration at
//! any time; the most recent one wins. Both paths share the same host
//! resolution rule, falling back to [`DEFAULT_HOST`] when the host is absent
//! or blank.
//!
//! The [`channel`] module carries invocations over JSON lines so the bridge
//! can run as a standalone process speaking on stdin and stdout. Logs go to
//! stderr.

pub mod channel;
pub mod client;
pub mod dispatch;
pub mod metadata;

mod bootstrap;
mod health;
mod resolver;
mod telemetry;

pub use bootstrap::{
    Bridge, BootstrapError, ConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use client::{
    AnalyticsClient, ClientError, LoggingAnalyticsClient, Properties, SdkIdentity,
};
pub use dispatch::{Dispatcher, InvocationResult, MethodError};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use resolver::{
    ClientConfiguration, ConfigurationTrigger, DEFAULT_HOST, SkipReason, StartupOutcome,
    initialise_from_metadata, resolve_host,
};
pub use telemetry::{TelemetryError, TelemetryHandle};

#[cfg(test)]
mod tests;
