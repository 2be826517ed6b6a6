//! Configuration models that aggregate all settings.
//!
//! This module provides the unified `AppConfig` structure that combines
//! global settings and workflow definitions into a single configuration
//! object, plus the workflows bundled with the binary.

use crate::assets::{get_asset, list_assets};
use crate::config::error::{ConfigError, ConfigResult};
use crate::engine::descriptor::descriptors_for;
use mdc_protocol::config_models::GlobalConfig;
use mdc_protocol::stage_models::Workflow;
use std::path::PathBuf;

/// Parse and validate the workflows embedded under `assets/workflows/`.
pub fn builtin_workflows() -> ConfigResult<Vec<Workflow>> {
    list_assets("workflows/")
        .into_iter()
        .filter(|path| path.ends_with(".yaml") || path.ends_with(".yml"))
        .map(|path| {
            let content = get_asset(&path).unwrap_or_default();
            let workflow: Workflow =
                serde_yaml::from_str(&content).map_err(|source| ConfigError::YamlParse {
                    path: PathBuf::from(&path),
                    source,
                })?;
            descriptors_for(&workflow).map_err(|source| ConfigError::InvalidStage {
                path: PathBuf::from(&path),
                source,
            })?;
            Ok(workflow)
        })
        .collect()
}

/// Unified application configuration loaded from `.medidoc/` directory.
///
/// This structure aggregates all configuration sources:
/// - `config.toml`: Global settings
/// - `workflows/*.yaml`: Workflow definitions
///
/// # Example
///
/// ```rust,no_run
/// use mdc_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// let workflow = config.workflow()?;
/// println!("Running {} with {} stages", workflow.name, workflow.stages.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Global settings from `config.toml`.
    pub global: GlobalConfig,

    /// All workflow definitions loaded from `workflows/*.yaml`.
    pub workflows: Vec<Workflow>,
}

impl AppConfig {
    /// Resolve the workflow named in the global settings.
    ///
    /// Project workflows take precedence over bundled ones with the same
    /// name.
    pub fn workflow(&self) -> ConfigResult<Workflow> {
        self.find_workflow(&self.global.workflow)
    }

    /// Look up a workflow by name, falling back to the bundled workflows.
    pub fn find_workflow(&self, name: &str) -> ConfigResult<Workflow> {
        if let Some(workflow) = self.workflows.iter().find(|w| w.name == name) {
            return Ok(workflow.clone());
        }
        builtin_workflows()?
            .into_iter()
            .find(|w| w.name == name)
            .ok_or_else(|| ConfigError::UnknownWorkflow(name.to_string()))
    }

    /// Names of every available workflow, project workflows first.
    pub fn workflow_names(&self) -> ConfigResult<Vec<String>> {
        let mut names: Vec<String> = self.workflows.iter().map(|w| w.name.clone()).collect();
        for workflow in builtin_workflows()? {
            if !names.contains(&workflow.name) {
                names.push(workflow.name);
            }
        }
        Ok(names)
    }
}
