//! Configuration for schemalens.
//!
//! Settings come from a TOML file with environment variable expansion in
//! input paths.

mod settings;

pub use settings::{
    expand_env_vars, AnalysisSettings, InputSettings, LoggingSettings, Settings, SettingsError,
};
