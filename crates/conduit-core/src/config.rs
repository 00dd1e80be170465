//! Invoker configuration.
//!
//! Read from `conduit.toml` when present, then overridden by environment
//! variables:
//!
//! ```toml
//! definition = "uppercase"
//! routing_header = "conduit.function.definition"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::impls::DEFAULT_ROUTING_HEADER;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InvokerConfig {
    /// Name of the function the invoker binds. When unset, the catalog must
    /// contain exactly one non-routing function.
    pub definition: Option<String>,

    /// Header the routing function reads the target name from.
    pub routing_header: String,
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            definition: None,
            routing_header: DEFAULT_ROUTING_HEADER.to_string(),
        }
    }
}

impl InvokerConfig {
    pub const DEFAULT_FILE: &'static str = "conduit.toml";
    pub const DEFINITION_ENV: &'static str = "CONDUIT_FUNCTION_DEFINITION";
    pub const ROUTING_HEADER_ENV: &'static str = "CONDUIT_ROUTING_HEADER";

    /// `conduit.toml` in the current directory (if it exists) plus
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Path::new(Self::DEFAULT_FILE);
        let config = if path.exists() {
            Self::load_from(path)?
        } else {
            Self::default()
        };
        Ok(config.with_env_overrides())
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup` (keyed by the `*_ENV` names).
    /// Blank values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(definition) = get(Self::DEFINITION_ENV) {
            self.definition = Some(definition);
        }
        if let Some(header) = get(Self::ROUTING_HEADER_ENV) {
            self.routing_header = header;
        }
        self
    }

    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(definition.into());
        self
    }

    /// The configured function name, trimmed; `None` when unset or blank.
    pub fn definition(&self) -> Option<&str> {
        self.definition
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}
