//! Static metadata published by the host application.
//!
//! On Apple platforms this is the bundle's `Info.plist`; on Android, the
//! manifest's `<meta-data>` entries. The bridge reads it from a JSON object
//! manifest with the same keys, so any host can export its metadata as JSON.

use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Map, Value};
use thiserror::Error;

/// Metadata keys consulted during startup initialisation.
pub mod keys {
    /// Project API key.
    pub const API_KEY: &str = "com.posthog.posthog.API_KEY";
    /// Ingestion host.
    pub const HOST: &str = "com.posthog.posthog.POSTHOG_HOST";
    /// Lifecycle-event capture flag.
    pub const CAPTURE_APPLICATION_LIFECYCLE_EVENTS: &str =
        "com.posthog.posthog.CAPTURE_APPLICATION_LIFECYCLE_EVENTS";
    /// Debug flag.
    pub const DEBUG: &str = "com.posthog.posthog.DEBUG";
}

/// Read access to typed metadata entries.
///
/// Entries of the wrong type read as absent.
pub trait MetadataSource {
    /// Returns a string entry.
    fn string(&self, key: &str) -> Option<String>;

    /// Returns a boolean entry.
    fn flag(&self, key: &str) -> Option<bool>;
}

/// Errors raised while loading a metadata manifest.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The manifest could not be read.
    #[error("failed to read metadata manifest '{path}': {source}")]
    Read {
        /// Manifest location.
        path: Utf8PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },
    /// The manifest is not valid JSON.
    #[error("failed to parse metadata manifest: {source}")]
    Parse {
        /// Underlying parser error.
        #[source]
        source: serde_json::Error,
    },
    /// The manifest's top-level value is not an object.
    #[error("metadata manifest must be a JSON object")]
    NotAnObject,
}

/// Metadata dictionary loaded from a JSON manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleMetadata {
    entries: Map<String, Value>,
}

impl BundleMetadata {
    /// Metadata with no entries; startup initialisation will be skipped.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wraps an existing dictionary.
    #[must_use]
    pub const fn from_entries(entries: Map<String, Value>) -> Self {
        Self { entries }
    }

    /// Builds metadata from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns `MetadataError::NotAnObject` unless the value is an object.
    pub fn from_value(value: Value) -> Result<Self, MetadataError> {
        match value {
            Value::Object(entries) => Ok(Self::from_entries(entries)),
            _ => Err(MetadataError::NotAnObject),
        }
    }

    /// Parses a JSON manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON object.
    pub fn parse(text: &str) -> Result<Self, MetadataError> {
        let value = serde_json::from_str(text).map_err(|source| MetadataError::Parse { source })?;
        Self::from_value(value)
    }

    /// Loads a JSON manifest from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON object.
    pub fn load(path: &Utf8Path) -> Result<Self, MetadataError> {
        let text = fs::read_to_string(path).map_err(|source| MetadataError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }
}

impl MetadataSource for BundleMetadata {
    fn string(&self, key: &str) -> Option<String> {
        self.entries
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_owned)
    }

    fn flag(&self, key: &str) -> Option<bool> {
        self.entries.get(key).and_then(Value::as_bool)
    }
}
