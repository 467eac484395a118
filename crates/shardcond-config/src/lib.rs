//! Optimizer configuration for shardcond.
//!
//! Configuration is read from TOML and deserialized into `OptimizerConfig`.
//! Every field has a default, so an empty document is a valid config.

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse optimizer config: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// ParameterBase
///
/// Index origin used by placeholders when resolving against the bound
/// parameter sequence. Must match the convention of the statement producer.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterBase {
    #[default]
    Zero,
    One,
}

impl ParameterBase {
    /// Numeric offset subtracted from a placeholder index.
    #[must_use]
    pub const fn offset(self) -> usize {
        match self {
            Self::Zero => 0,
            Self::One => 1,
        }
    }
}

///
/// OptimizerConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptimizerConfig {
    /// Placeholder index origin.
    pub parameter_base: ParameterBase,

    /// Emit optimizer metrics events.
    pub metrics: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            parameter_base: ParameterBase::Zero,
            metrics: true,
        }
    }
}

impl OptimizerConfig {
    /// Parse a config from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&source)
    }

    #[must_use]
    pub const fn with_parameter_base(mut self, parameter_base: ParameterBase) -> Self {
        self.parameter_base = parameter_base;
        self
    }

    #[must_use]
    pub const fn with_metrics(mut self, metrics: bool) -> Self {
        self.metrics = metrics;
        self
    }
}

///
/// TESTS
///
