//! Configuration management
//!
//! ```yaml
//! name: user-export
//! trace: true
//! prepend:
//!   - type: require
//!     paths: [id]
//! transformers:
//!   - type: project
//!     paths: [id, user.email]
//!   - type: redact
//!     rules:
//!       - pattern: '[\w.]+@[\w.]+'
//!         replacement: '[EMAIL]'
//! ```
//!
//! Values may be overridden by `WRAPCHAIN_`-prefixed environment variables
//! (`WRAPCHAIN_NAME`, `WRAPCHAIN_TRACE`), with `__` separating nested keys.

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};

use crate::registry::TransformerRegistry;
use crate::trace::traced;
use crate::transform::TransformSpec;
use crate::{Error, JsonChain, Result};

/// Main configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chain name, used in logs
    pub name: String,
    /// Transformers applied before `transformers`, in listed order
    pub prepend: Vec<TransformSpec>,
    /// The main transformer list, applied in order
    pub transformers: Vec<TransformSpec>,
    /// Log every transformer application
    pub trace: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            prepend: Vec::new(),
            transformers: Vec::new(),
            trace: false,
        }
    }
}

impl Config {
    /// Load configuration from an optional YAML file plus environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `path` does not exist or the merged
    /// configuration cannot be deserialized.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new();

        if let Some(p) = path {
            if !p.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            figment = figment.merge(Yaml::file(p));
        }

        figment = figment.merge(Env::prefixed("WRAPCHAIN_").split("__"));

        let config: Self = figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        tracing::debug!(
            chain = %config.name,
            prepend = config.prepend.len(),
            transformers = config.transformers.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse configuration from a YAML string (no environment merge).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Yaml`] on malformed input.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Render the configuration back to YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Yaml`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Build the configured chain: `prepend` specs first, then
    /// `transformers`, optionally decorated with tracing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if any spec cannot be resolved.
    pub fn build_chain(&self, registry: &TransformerRegistry) -> Result<JsonChain> {
        let front = registry.build_chain(&self.prepend)?;
        let chain = registry.build_chain_with(&front, &self.transformers)?;
        Ok(if self.trace { traced(&chain) } else { chain })
    }
}
