//! TOML-based configuration for schemalens.
//!
//! Example configuration:
//! ```toml
//! [analysis]
//! detect_implicit_relations = true
//! detect_polymorphism = true
//! check_cascade_risks = true
//! cascade_risk_threshold = 3
//! generic_polymorphic_tokens = ["entity", "item", "target"]
//!
//! [inputs]
//! impact_map = "${PROJECT_ROOT}/reports/impact.json"
//! hints = "./hints.json"
//!
//! [logging]
//! level = "info"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analyze::AnalysisOptions;
use crate::inference::{thresholds, InferenceConfig, DEFAULT_GENERIC_TOKENS};

/// Environment variable pointing at a config file.
pub const CONFIG_ENV_VAR: &str = "SCHEMALENS_CONFIG";

/// Config file name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "schemalens.toml";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub analysis: AnalysisSettings,
    pub inputs: InputSettings,
    pub logging: LoggingSettings,
}

/// Pipeline switches.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Infer relations from `<name>_id` columns.
    pub detect_implicit_relations: bool,

    /// Detect `<name>_id` / `<name>_type` pairs.
    pub detect_polymorphism: bool,

    /// Run the cascade and integrity check.
    pub check_cascade_risks: bool,

    /// Dependents above which `ON DELETE CASCADE` is flagged.
    pub cascade_risk_threshold: usize,

    /// Base names that make a polymorphic pair point at every referenced table.
    pub generic_polymorphic_tokens: Vec<String>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            detect_implicit_relations: true,
            detect_polymorphism: true,
            check_cascade_risks: true,
            cascade_risk_threshold: thresholds::cascade::DEFAULT_RISK_THRESHOLD,
            generic_polymorphic_tokens: DEFAULT_GENERIC_TOKENS
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

/// Optional input files (support `${VAR}` expansion).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct InputSettings {
    /// Impact map JSON: table → impacted files.
    pub impact_map: Option<String>,

    /// Table hints JSON: table → role and classification reason.
    pub hints: Option<String>,
}

impl InputSettings {
    /// Impact map path with environment variables expanded.
    pub fn resolved_impact_map(&self) -> Result<Option<PathBuf>, SettingsError> {
        resolve_path(self.impact_map.as_deref())
    }

    /// Hints path with environment variables expanded.
    pub fn resolved_hints(&self) -> Result<Option<PathBuf>, SettingsError> {
        resolve_path(self.hints.as_deref())
    }
}

fn resolve_path(raw: Option<&str>) -> Result<Option<PathBuf>, SettingsError> {
    raw.map(|p| expand_env_vars(p).map(PathBuf::from)).transpose()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `SCHEMALENS_CONFIG`
    /// 2. `./schemalens.toml`
    /// 3. `~/.config/schemalens/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("schemalens").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self
            .analysis
            .generic_polymorphic_tokens
            .iter()
            .any(|t| t.trim().is_empty())
        {
            return Err(SettingsError::InvalidConfig(
                "generic_polymorphic_tokens must not contain empty tokens".to_string(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(SettingsError::InvalidConfig(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Pipeline options described by these settings.
    pub fn to_analysis_options(&self) -> AnalysisOptions {
        let analysis = &self.analysis;
        let inference = InferenceConfig::default()
            .with_implicit(analysis.detect_implicit_relations)
            .with_polymorphism(analysis.detect_polymorphism)
            .with_generic_tokens(analysis.generic_polymorphic_tokens.clone());

        AnalysisOptions::default()
            .with_inference(inference)
            .with_cascade_check(analysis.check_cascade_risks)
            .with_cascade_risk_threshold(analysis.cascade_risk_threshold)
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let var_name = if chars.peek() == Some(&'{') {
            chars.next(); // consume '{'
            let mut name = String::new();
            for ch in chars.by_ref() {
                if ch == '}' {
                    break;
                }
                name.push(ch);
            }
            name
        } else {
            // $VAR ends at the first non-alphanumeric, non-underscore character
            let mut name = String::new();
            while let Some(ch) = chars.next_if(|ch| ch.is_alphanumeric() || *ch == '_') {
                name.push(ch);
            }
            if name.is_empty() {
                result.push('$');
                continue;
            }
            name
        };

        let value = env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name))?;
        result.push_str(&value);
    }

    Ok(result)
}
