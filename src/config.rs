//! YAML configuration file support for Sonic DNA.
//!
//! One file configures the canonicalizer, the generator cache, and the demo
//! binary's log output. Every section is optional and falls back to defaults.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "studio"
//!
//! dna:
//!   version: 1
//!   max_source_chars: 2000
//!   denylist: ["evaluate", "id"]
//!   salt_bytes: 16
//!
//! generator:
//!   cache_ttl_secs: 300
//!   cache_capacity: 128
//!
//! logging:
//!   level: "info"
//!   json: false
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use agent::{DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL, PromptCache};
use canonical::DnaConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file format this build understands.
pub const SUPPORTED_CONFIG_VERSION: &str = "1.0";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SonicConfig {
    /// Configuration format version
    pub version: String,

    #[serde(default)]
    pub name: Option<String>,

    /// Canonicalization and digest settings
    #[serde(default)]
    pub dna: DnaConfig,

    #[serde(default)]
    pub generator: GeneratorYamlConfig,

    #[serde(default)]
    pub logging: LoggingYamlConfig,
}

impl SonicConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: SonicConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.dna
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("dna: {err}")))?;
        self.generator.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Fresh prompt cache sized by the `generator` section.
    pub fn prompt_cache(&self) -> PromptCache {
        PromptCache::new(self.generator.cache_capacity, self.generator.cache_ttl())
    }
}

impl Default for SonicConfig {
    fn default() -> Self {
        Self {
            version: SUPPORTED_CONFIG_VERSION.to_string(),
            name: None,
            dna: DnaConfig::default(),
            generator: GeneratorYamlConfig::default(),
            logging: LoggingYamlConfig::default(),
        }
    }
}

/// Generator cache YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorYamlConfig {
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

impl GeneratorYamlConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.cache_capacity == 0 {
            return Err(ConfigLoadError::Validation(
                "generator.cache_capacity must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GeneratorYamlConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

/// Log output settings for the binary. The library never installs a
/// subscriber.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingYamlConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

impl LoggingYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        let level = self.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigLoadError::Validation(format!(
                "logging.level must be one of {LOG_LEVELS:?}, got {:?}",
                self.level
            )));
        }
        Ok(())
    }
}

impl Default for LoggingYamlConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_cache_ttl_secs() -> u64 {
    DEFAULT_CACHE_TTL.as_secs()
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

fn default_log_level() -> String {
    "info".to_string()
}
