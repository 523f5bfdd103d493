//! Test configuration loaders for bootstrap success and failure paths.

use std::ffi::OsString;
use std::fs;
use std::sync::Arc;

use camino::Utf8PathBuf;
use ortho_config::{OrthoConfig, OrthoError};
use serde_json::Value;
use tempfile::TempDir;

use posthog_bridge_config::Config;

use crate::bootstrap::ConfigLoader;

/// Loader that optionally points the bridge at a metadata file in a
/// temporary directory.
pub struct TestConfigLoader {
    _dir: TempDir,
    metadata_path: Option<Utf8PathBuf>,
}

impl TestConfigLoader {
    /// Loader with no metadata file configured.
    #[must_use]
    pub fn new() -> Self {
        Self {
            _dir: TempDir::new().expect("failed to create temporary directory"),
            metadata_path: None,
        }
    }

    /// Loader whose metadata file holds `metadata`.
    #[must_use]
    pub fn with_metadata(metadata: &Value) -> Self {
        Self::with_metadata_text(&metadata.to_string())
    }

    /// Loader whose metadata file holds raw `text`.
    #[must_use]
    pub fn with_metadata_text(text: &str) -> Self {
        let dir = TempDir::new().expect("failed to create temporary directory");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("Info.json"))
            .expect("temporary path was not valid UTF-8");
        fs::write(&path, text).expect("failed to write metadata file");
        Self {
            _dir: dir,
            metadata_path: Some(path),
        }
    }

    /// Loader pointing at a metadata file that does not exist.
    #[must_use]
    pub fn with_missing_metadata() -> Self {
        let dir = TempDir::new().expect("failed to create temporary directory");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("absent.json"))
            .expect("temporary path was not valid UTF-8");
        Self {
            _dir: dir,
            metadata_path: Some(path),
        }
    }
}

impl Default for TestConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader for TestConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(Config {
            metadata_path: self.metadata_path.clone(),
            ..Config::default()
        })
    }
}

/// Loader that intentionally fails by pointing at a malformed config file.
pub struct FailingConfigLoader {
    dir: TempDir,
}

impl FailingConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temporary directory");
        fs::write(dir.path().join("bridge.toml"), "log_filter = [unterminated")
            .expect("failed to write malformed config");
        Self { dir }
    }
}

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("posthog-bridge"),
            OsString::from("--config-path"),
            self.dir.path().join("bridge.toml").into_os_string(),
        ];
        Config::load_from_iter(args)
    }
}

/// Loader that runs the layered loader with no file, flags or overrides, as
/// a bare `posthog-bridge` launch does.
#[derive(Debug, Default)]
pub struct DefaultSourcesConfigLoader;

impl ConfigLoader for DefaultSourcesConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load_from_iter([OsString::from("posthog-bridge")])
    }
}
