use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use cifstack_core::{ExtrusionSettings, LayerStack};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid scene configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Scene configuration: extrusion parameters and the layer stack. Every
/// field is optional in JSON and falls back to the stock CIF values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub name: String,
    pub settings: ExtrusionSettings,
    pub layers: LayerStack,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            name: "untitled".to_string(),
            settings: ExtrusionSettings::default(),
            layers: LayerStack::cif_default(),
        }
    }
}

impl SceneConfig {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded scene config '{}' with {} layers from {}",
            config.name,
            config.layers.layer_count(),
            path.display()
        );
        Ok(config)
    }
}
