//! Run configuration
//!
//! Loaded from an optional YAML or TOML file, then overridden by
//! `PIISCRUB_*` environment variables, then by command-line flags.

use piiscrub_pii::{DEFAULT_TOKEN, Engine, Mode, PatternSources, TransformerConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Engine(#[from] piiscrub_pii::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrubConfig {
    /// Kept as text until the run starts so an unknown mode surfaces as an engine error
    #[serde(default = "default_mode")]
    pub mode: String,

    #[serde(default = "default_token")]
    pub token: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub patterns: PatternOverrides,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Custom regex sources replacing the built-in patterns
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatternOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detect_pii: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detect_spii: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub redact_pii: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub redact_spii: Option<String>,
}

impl PatternOverrides {
    pub fn detection(&self) -> PatternSources {
        let defaults = PatternSources::detection();
        PatternSources {
            pii: self.detect_pii.clone().unwrap_or(defaults.pii),
            spii: self.detect_spii.clone().unwrap_or(defaults.spii),
        }
    }

    pub fn redaction(&self) -> PatternSources {
        let defaults = PatternSources::redaction();
        PatternSources {
            pii: self.redact_pii.clone().unwrap_or(defaults.pii),
            spii: self.redact_spii.clone().unwrap_or(defaults.spii),
        }
    }
}

impl Default for ScrubConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            token: default_token(),
            output_dir: None,
            logging: LoggingConfig::default(),
            patterns: PatternOverrides::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    /// Configured level; unknown names fall back to info
    pub fn level(&self) -> Level {
        match self.level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

impl ScrubConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&contents)?
        } else {
            // Default to YAML
            serde_yaml::from_str(&contents)?
        };

        Ok(config)
    }

    /// Merge environment variables into config (env vars take precedence)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Merge variables from an arbitrary lookup
    pub fn merge_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("PIISCRUB_MODE") {
            self.mode = val;
        }

        if let Some(val) = lookup("PIISCRUB_TOKEN") {
            self.token = val;
        }

        if let Some(val) = lookup("PIISCRUB_OUTPUT") {
            self.output_dir = Some(PathBuf::from(val));
        }

        if let Some(val) = lookup("PIISCRUB_LOG_LEVEL") {
            self.logging.level = val;
        }
    }

    /// Parse the configured mode
    pub fn mode(&self) -> Result<Mode, ConfigError> {
        Ok(self.mode.parse::<Mode>()?)
    }

    /// Build the engine from the configured token and patterns
    pub fn build_engine(&self) -> Result<Engine, ConfigError> {
        let engine = Engine::from_sources(
            &self.patterns.detection(),
            &self.patterns.redaction(),
            TransformerConfig {
                token: self.token.clone(),
            },
        )?;

        Ok(engine)
    }
}

fn default_mode() -> String {
    Mode::Tokenize.to_string()
}

fn default_token() -> String {
    DEFAULT_TOKEN.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
