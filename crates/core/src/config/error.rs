//! Error types for configuration loading.
//!
//! This module defines all errors that can occur during configuration file
//! parsing, loading and validation.

use crate::engine::descriptor::StageConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read a configuration file from disk.
    #[error("Failed to read config file at {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("Failed to parse TOML file at {path}: {source}")]
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse YAML file at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// Failed to walk directory structure.
    #[error("Failed to traverse directory {path}: {source}")]
    DirectoryWalk {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// A workflow contains a stage that cannot be run.
    #[error("Invalid workflow in {path}: {source}")]
    InvalidStage {
        path: PathBuf,
        source: StageConfigError,
    },

    /// The configured workflow name does not match any workflow.
    #[error("Workflow '{0}' not found")]
    UnknownWorkflow(String),
}

/// Type alias for Result with ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;
