//! Configuration System
//!
//! Layered configuration for the context registry: defaults, an optional
//! TOML file, then `COPSE_`-prefixed environment overrides. The
//! `instances` table pre-registers instance names against the agent class
//! each name may be bound to.

use crate::error::ContextError;
use crate::logging::LoggingConfig;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CopseConfig {
    /// Instance-name registrations: instance name -> expected agent class
    #[serde(default)]
    pub instances: HashMap<String, String>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CopseConfig {
    /// Load configuration from defaults, an optional TOML file, and
    /// `COPSE`-prefixed environment overrides (keys separated by `__`,
    /// e.g. `COPSE__LOGGING__LEVEL=debug`).
    pub fn load(path: Option<&Path>) -> Result<Self, ContextError> {
        let mut builder = Config::builder()
            .set_default("logging.level", "info")?
            .set_default("logging.format", "text")?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder = builder.add_source(Environment::with_prefix("COPSE").separator("__"));

        let config: CopseConfig = builder.build()?.try_deserialize()?;
        config.validate().map_err(ContextError::Config)?;

        Ok(config)
    }

    /// Parse configuration embedded as a TOML string.
    pub fn from_toml_str(raw: &str) -> Result<Self, ContextError> {
        let config: CopseConfig =
            toml::from_str(raw).map_err(|e| ContextError::Config(e.to_string()))?;
        config.validate().map_err(ContextError::Config)?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        for (instance_name, class_name) in &self.instances {
            if instance_name.is_empty() {
                return Err("Instance name cannot be empty".to_string());
            }
            if class_name.is_empty() {
                return Err(format!(
                    "Instance '{}' has an empty class name",
                    instance_name
                ));
            }
        }

        Ok(())
    }

    /// The instance registrations as a shareable catalog, ready to hand
    /// to a directory.
    pub fn instance_catalog(&self) -> Arc<HashMap<String, String>> {
        Arc::new(self.instances.clone())
    }
}
