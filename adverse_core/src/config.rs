//! Settings - TOML configuration for storage and engine tunables.
//!
//! ```toml
//! [storage]
//! path = "data/network_state.json"
//! persist = true
//!
//! [engine]
//! fire_threshold = 0.1
//! reinforcement_step = 0.2
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::{ActivationEngine, EngineConfig};
use crate::error::ConfigError;
use crate::persistence::{GraphStorage, JsonFileStorage, MemoryStorage};

/// Default location of the persisted graph, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "data/network_state.json";

/// Where the graph is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Location of the JSON document.
    pub path: PathBuf,

    /// When false the graph lives in memory only and is lost on exit.
    pub persist: bool,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_PATH),
            persist: true,
        }
    }
}

impl StorageSettings {
    /// Build the storage backend these settings describe.
    pub fn backend(&self) -> Box<dyn GraphStorage> {
        if self.persist {
            Box::new(JsonFileStorage::new(&self.path))
        } else {
            Box::new(MemoryStorage::new())
        }
    }
}

/// Complete engine settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub engine: EngineConfig,
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read settings from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Open an engine with these settings, restoring any persisted graph.
    pub fn open_engine(&self) -> ActivationEngine {
        ActivationEngine::open(self.engine.clone(), self.storage.backend())
    }
}
