use serde::Deserialize;
use std::path::PathBuf;
use stormscope_core::IndexSource;

/// Configuration section requested from the client.
pub const CONFIG_SECTION: &str = "stormscope";

/// Server settings. Each layer only overrides what it sets: command-line
/// defaults, then initialization options, then the client's `stormscope`
/// configuration section.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerConfig {
    pub datadir: Option<PathBuf>,
    pub model: Option<PathBuf>,
    pub system_version: Option<String>,
}

impl ServerConfig {
    /// Reads a layer from a JSON value, ignoring anything malformed.
    pub fn from_value(value: Option<serde_json::Value>) -> Option<Self> {
        let value = value.filter(|v| !v.is_null())?;
        match serde_json::from_value(value) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("Ignoring malformed stormscope settings: {}", e);
                None
            }
        }
    }

    pub fn overlay(&mut self, other: ServerConfig) {
        if other.datadir.is_some() {
            self.datadir = other.datadir;
        }
        if other.model.is_some() {
            self.model = other.model;
        }
        if other.system_version.is_some() {
            self.system_version = other.system_version;
        }
    }

    pub fn index_source(&self) -> IndexSource {
        IndexSource {
            datadir: self.datadir.clone(),
            model: self.model.clone(),
            version: self.system_version.clone(),
        }
    }
}
