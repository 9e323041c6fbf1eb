//! Configuration for the dispatch driver
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (dispatch.toml)
//! - Environment variables (DISPATCH__*)
//!
//! ## Example config file (dispatch.toml):
//! ```toml
//! [output]
//! format = "pretty"
//!
//! [demo]
//! values = ["Object", 5, 5.0]
//!
//! [[demo.entities]]
//! kind = "dog"
//! name = "Johny"
//! breed = "Bull"
//!
//! [[demo.entities]]
//! kind = "bird"
//! name = "Pingu"
//! can_fly = false
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::entity::{Dog, Entity, Mammal};
use crate::error::Result;
use crate::value::DynValue;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Sample scenario for the demo command
    #[serde(default)]
    pub demo: DemoConfig,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// How reports are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One sentence per result
    #[default]
    Text,
    /// Indented JSON
    Pretty,
    /// Single-line JSON
    Compact,
}

/// Demo scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Entities run through classify and safe_downcast
    #[serde(default = "default_entities")]
    pub entities: Vec<Entity>,

    /// Loosely typed values run through dispatch_any
    #[serde(default = "default_values")]
    pub values: Vec<serde_json::Value>,
}

impl DemoConfig {
    /// The configured values converted at the dispatch boundary
    pub fn dyn_values(&self) -> Vec<DynValue> {
        self.values.iter().cloned().map(DynValue::from_json).collect()
    }
}

fn default_entities() -> Vec<Entity> {
    vec![
        Dog::new("Johny", "Bull").into(),
        Mammal::new("Lion").into(),
    ]
}

fn default_values() -> Vec<serde_json::Value> {
    default_entities()
        .iter()
        .filter_map(|entity| serde_json::to_value(entity).ok())
        .chain(std::iter::once(serde_json::Value::from("Object")))
        .collect()
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            entities: default_entities(),
            values: default_values(),
        }
    }
}

impl DispatchConfig {
    /// Load configuration from default locations
    pub fn load() -> std::result::Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, adding a specific file that must exist
    pub fn load_from(config_path: Option<&str>) -> std::result::Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = [
            "dispatch.toml",
            ".dispatch.toml",
            "config/dispatch.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(config_dir) = directories::ProjectDirs::from("dev", "type-dispatch", "type-dispatch") {
            let xdg_config = config_dir.config_dir().join("dispatch.toml");
            if xdg_config.exists() {
                tracing::debug!("using config from {}", xdg_config.display());
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            tracing::debug!("using config from {}", path);
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // DISPATCH__OUTPUT__FORMAT=compact
        builder = builder.add_source(
            Environment::with_prefix("DISPATCH")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
