//! Host configuration

use clinical_calc::PediatricConfig;
use ::config::{Config, Environment, File};
use pharmacology::{BindingConfig, CurveConfig, DistributionConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use uniformity::UniformityConfig;

use crate::HostError;

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "pharmacalc.toml";
/// Environment variable prefix (`PHARMACALC__LOG_LEVEL`, `PHARMACALC__UNIFORMITY__L1`, ...)
pub const ENV_PREFIX: &str = "PHARMACALC";

/// Host configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Max tracing level (`trace`, `debug`, `info`, `warn`, `error`)
    pub log_level: String,

    /// Emit JSON log lines instead of plain text
    pub json_logs: bool,

    pub pediatric: PediatricConfig,
    pub binding: BindingConfig,
    pub distribution: DistributionConfig,
    pub uniformity: UniformityConfig,
    pub curves: CurveConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            pediatric: PediatricConfig::default(),
            binding: BindingConfig::default(),
            distribution: DistributionConfig::default(),
            uniformity: UniformityConfig::default(),
            curves: CurveConfig::default(),
        }
    }
}

impl HostConfig {
    /// Load from an optional TOML file, then environment overrides.
    ///
    /// Without `path` the default file is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, HostError> {
        Self::load_with_env(path, None)
    }

    /// Like [`HostConfig::load`], reading `PHARMACALC__*` variables from
    /// `env` instead of the process environment when given.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, HostError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
