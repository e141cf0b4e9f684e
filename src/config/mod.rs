//! Studio configuration. Optional YAML overrides for the mock backends.
//!
//! User-level config: `~/.creative-studio/config.yaml`
//! Local storage:     `~/.creative-studio/local_storage.yaml`
//! Log file:          `~/.creative-studio/studio.log`
//!
//! Resolution: CLI flags → config file → built-in defaults. A missing
//! config file is normal; a malformed one is logged and ignored.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::generation::backend::MOCK_LATENCY;
use crate::generation::copy::COPIED_DISPLAY;
use crate::generation::image::DEFAULT_IMAGE_BASE_URL;

const CONFIG_FILE: &str = "config.yaml";
const STORAGE_FILE: &str = "local_storage.yaml";
const LOG_FILE: &str = "studio.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Tunables for the studio. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Simulated generation latency, milliseconds.
    pub latency_ms: u64,
    /// How long "Copied!" stays visible, milliseconds.
    pub copied_display_ms: u64,
    /// Placeholder image service; `?random=<ms>` is appended.
    pub image_base_url: String,
    /// Where exported images go. Defaults to the working directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            latency_ms: MOCK_LATENCY.as_millis() as u64,
            copied_display_ms: COPIED_DISPLAY.as_millis() as u64,
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            download_dir: None,
        }
    }
}

/// Path to `~/.creative-studio/`.
pub fn default_data_dir() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE")
            .ok()
            .map(|p| PathBuf::from(p).join(".creative-studio"))
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOME")
            .ok()
            .map(|p| PathBuf::from(p).join(".creative-studio"))
    }
}

pub fn storage_path(data_dir: &Path) -> PathBuf {
    data_dir.join(STORAGE_FILE)
}

pub fn log_path(data_dir: &Path) -> PathBuf {
    data_dir.join(LOG_FILE)
}

impl StudioConfig {
    /// Load `<data_dir>/config.yaml`, falling back to defaults.
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(CONFIG_FILE);
        match Self::read(&path) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(e) => {
                warn!(error = %e, "using default configuration");
                Self::default()
            }
        }
    }

    /// Read a config file. `Ok(None)` when it does not exist.
    pub fn read(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(Some(Self::default()));
        }
        serde_yaml::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub fn copied_display(&self) -> Duration {
        Duration::from_millis(self.copied_display_ms)
    }

    /// Resolved export directory.
    pub fn download_dir(&self) -> PathBuf {
        self.download_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
