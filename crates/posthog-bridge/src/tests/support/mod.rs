//! Test harness utilities shared by the bridge suites.

mod client;
mod config_loader;
mod reporter;
mod world;

pub use client::{ClientCall, RecordingClient};
pub use config_loader::{DefaultSourcesConfigLoader, FailingConfigLoader, TestConfigLoader};
pub use reporter::{HealthEvent, RecordingHealthReporter};
pub use world::{BridgeWorld, world};
