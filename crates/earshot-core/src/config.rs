//! Service configuration
//!
//! YAML config loaded at startup. A missing file means defaults; an invalid
//! file logs a warning and falls back to defaults rather than refusing to
//! start.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Earshot service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Address the HTTP server binds
    pub listen_addr: String,
    /// Override for the model cache directory (default: `~/.cache/earshot/models/`)
    pub model_dir: Option<PathBuf>,
    /// Serve the `/emotion` endpoint
    pub emotion: bool,
    /// Serve the `/scene` endpoint
    pub scene: bool,
    /// Permits for concurrent blocking inference calls
    pub max_concurrent_inference: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:5300".to_string(),
            model_dir: None,
            emotion: true,
            scene: true,
            max_concurrent_inference: 2,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a YAML file.
    ///
    /// Missing file → defaults. Unparsable file → warn and defaults.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::info!("Config file {:?} doesn't exist, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str::<Self>(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {:?}", path);
                    config
                }
                Err(e) => {
                    log::warn!("Failed to parse config {:?}: {}, using defaults", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read config {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Default config location: `~/.config/earshot/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("earshot").join("config.yaml"))
    }
}
