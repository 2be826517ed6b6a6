//! Directory structure and file generation for `.medidoc` initialization.

use super::error::{InitError, InitResult};
use crate::assets::{get_asset, list_assets};
use crate::config::loader::CONFIG_DIR;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Options for initializing a `.medidoc` directory.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Target directory where `.medidoc` will be created.
    pub target_dir: PathBuf,

    /// Overwrite an existing `.medidoc` directory.
    pub force: bool,

    /// Only write `config.toml`; the bundled workflows stay embedded.
    pub minimal: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            target_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            force: false,
            minimal: false,
        }
    }
}

/// Generate a `.medidoc` directory structure from the embedded assets.
///
/// This function creates the following structure:
/// ```text
/// .medidoc/
/// ├── config.toml
/// └── workflows/
///     └── document-analysis.yaml (unless minimal)
/// ```
///
/// Returns the paths of every file written.
///
/// # Errors
///
/// - [`InitError::DirectoryExists`] if `.medidoc` exists and `force` is not set
/// - [`InitError::TemplateNotFound`] if an embedded asset is missing
/// - Directory or file write failures
pub async fn generate_medidoc_structure(options: InitOptions) -> InitResult<Vec<PathBuf>> {
    let config_dir = options.target_dir.join(CONFIG_DIR);

    if config_dir.exists() && !options.force {
        return Err(InitError::DirectoryExists(config_dir));
    }

    fs::create_dir_all(&config_dir).map_err(|source| InitError::DirectoryCreate {
        path: config_dir.clone(),
        source,
    })?;

    let mut written = vec![write_template_file(&config_dir, "config.toml")?];

    if !options.minimal {
        for workflow_path in list_assets("workflows/") {
            written.push(write_template_file(&config_dir, &workflow_path)?);
        }
    }

    Ok(written)
}

/// Write one embedded asset below `config_dir`, keeping its relative path.
fn write_template_file(config_dir: &Path, template_path: &str) -> InitResult<PathBuf> {
    let content = get_asset(template_path)
        .ok_or_else(|| InitError::TemplateNotFound(template_path.to_string()))?;

    let target_path = config_dir.join(template_path);

    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|source| InitError::DirectoryCreate {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&target_path, content).map_err(|source| InitError::FileWrite {
        path: target_path.clone(),
        source,
    })?;
    debug!(path = %target_path.display(), "wrote template");

    Ok(target_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::load_config;
    use mdc_protocol::config_models::{GlobalConfig, DEFAULT_WORKFLOW};
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_generate_structure_success() {
        let dir = tempdir().unwrap();
        let options = InitOptions {
            target_dir: dir.path().to_path_buf(),
            force: false,
            minimal: false,
        };

        let written = generate_medidoc_structure(options).await.unwrap();
        assert_eq!(written.len(), 2);

        let config_dir = dir.path().join(CONFIG_DIR);
        assert!(config_dir.join("config.toml").exists());
        assert!(config_dir.join("workflows/document-analysis.yaml").exists());

        // The scaffolded project must load back to the defaults.
        let config = load_config(dir.path()).await.unwrap();
        assert_eq!(config.global, GlobalConfig::default());
        assert_eq!(config.workflows.len(), 1);
        assert_eq!(config.workflows[0].name, DEFAULT_WORKFLOW);
    }

    #[tokio::test]
    async fn test_generate_structure_minimal() {
        let dir = tempdir().unwrap();
        let options = InitOptions {
            target_dir: dir.path().to_path_buf(),
            force: false,
            minimal: true,
        };

        generate_medidoc_structure(options).await.unwrap();

        let config_dir = dir.path().join(CONFIG_DIR);
        assert!(config_dir.join("config.toml").exists());
        assert!(!config_dir.join("workflows").exists());
    }

    #[tokio::test]
    async fn test_generate_structure_exists_without_force() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(CONFIG_DIR)).unwrap();

        let options = InitOptions {
            target_dir: dir.path().to_path_buf(),
            force: false,
            minimal: false,
        };

        let result = generate_medidoc_structure(options).await;
        assert!(matches!(result, Err(InitError::DirectoryExists(_))));
    }

    #[tokio::test]
    async fn test_generate_structure_exists_with_force() {
        let dir = tempdir().unwrap();
        let config_dir = dir.path().join(CONFIG_DIR);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("config.toml"), "default-view = \"patient\"").unwrap();

        let options = InitOptions {
            target_dir: dir.path().to_path_buf(),
            force: true,
            minimal: true,
        };

        generate_medidoc_structure(options).await.unwrap();

        let config = fs::read_to_string(config_dir.join("config.toml")).unwrap();
        assert!(config.contains("default-view = \"professional\""));
    }

    #[test]
    fn test_default_init_options() {
        let options = InitOptions::default();
        assert!(!options.force);
        assert!(!options.minimal);
    }
}
