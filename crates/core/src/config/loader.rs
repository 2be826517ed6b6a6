//! Configuration file loader for `.medidoc/` directory structure.
//!
//! This module provides functionality to load and parse all configuration files
//! from the `.medidoc/` directory, including:
//! - `config.toml`: Global settings
//! - `workflows/*.yaml`: Workflow definitions
//!
//! Every workflow is validated into stage descriptors at load time so that an
//! invalid stage surfaces before any run starts.

use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use crate::config::models::AppConfig;
use crate::engine::descriptor::descriptors_for;
use mdc_protocol::config_models::GlobalConfig;
use mdc_protocol::stage_models::Workflow;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Name of the project configuration directory.
pub const CONFIG_DIR: &str = ".medidoc";

/// Loads all configuration from the `.medidoc/` directory.
///
/// # Arguments
///
/// * `root` - Root directory containing the `.medidoc/` folder
///
/// # Returns
///
/// An `AppConfig` containing all loaded configuration. Missing directories
/// or files fall back to defaults rather than an error.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - Files exist but cannot be read
/// - Files have invalid TOML or YAML syntax
/// - A workflow contains a stage with an invalid duration or target
///
/// # Example
///
/// ```rust,no_run
/// use mdc_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Loaded {} workflows", config.workflows.len());
/// # Ok(())
/// # }
/// ```
pub async fn load_config(root: &Path) -> ConfigResult<AppConfig> {
    let config_dir = root.join(CONFIG_DIR);

    if !config_dir.exists() {
        debug!(path = %config_dir.display(), "no config directory, using defaults");
        return Ok(AppConfig::default());
    }

    let global = load_global_config(&config_dir)?;
    let workflows = load_workflows(&config_dir)?;

    Ok(AppConfig { global, workflows })
}

/// Loads global configuration from `config.toml`.
fn load_global_config(config_dir: &Path) -> ConfigResult<GlobalConfig> {
    let config_path = config_dir.join("config.toml");

    if !config_path.exists() {
        return Ok(GlobalConfig::default());
    }

    let content =
        std::fs::read_to_string(&config_path).map_err(|source| ConfigError::FileRead {
            path: config_path.clone(),
            source,
        })?;

    let config: GlobalConfig =
        toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: config_path,
            source,
        })?;

    Ok(config)
}

/// Loads and validates all workflow definitions from `workflows/*.yaml`.
fn load_workflows(config_dir: &Path) -> ConfigResult<Vec<Workflow>> {
    let workflows_dir = config_dir.join("workflows");

    if !workflows_dir.exists() {
        return Ok(Vec::new());
    }

    let mut workflows = Vec::new();

    for entry in WalkDir::new(&workflows_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = entry.map_err(|source| ConfigError::DirectoryWalk {
            path: workflows_dir.clone(),
            source,
        })?;

        let path = entry.path();

        let ext = path.extension().and_then(|s| s.to_str());
        if ext != Some("yaml") && ext != Some("yml") {
            continue;
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let workflow: Workflow =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::YamlParse {
                path: path.to_path_buf(),
                source,
            })?;

        descriptors_for(&workflow).map_err(|source| ConfigError::InvalidStage {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(workflow = %workflow.name, stages = workflow.stages.len(), "loaded workflow");
        workflows.push(workflow);
    }

    Ok(workflows)
}
