//! Files embedded into the binary at compile time.
//!
//! This module uses `rust-embed` to embed the crate's `assets/` directory:
//! - `config.toml`: template for `.medidoc/config.toml`
//! - `workflows/*.yaml`: built-in workflows
//! - `report/*`: the fixed report payload served by the static provider
//!
//! With the `debug-embed` feature, debug builds embed the files as well, so
//! behaviour does not depend on the working directory.

use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/assets"]
pub struct BundledAssets;

/// Get an embedded file as text.
///
/// # Arguments
/// * `path` - Relative path from the assets root (e.g. "report/patient.md")
///
/// # Returns
/// The file content, or None if the file doesn't exist.
///
/// # Example
/// ```
/// use mdc_core::assets::get_asset;
///
/// let config = get_asset("config.toml").expect("config.toml should exist");
/// assert!(config.contains("default-view"));
/// ```
pub fn get_asset(path: &str) -> Option<String> {
    BundledAssets::get(path).map(|file| String::from_utf8_lossy(file.data.as_ref()).to_string())
}

/// List embedded files under a directory prefix (e.g. "workflows/").
pub fn list_assets(prefix: &str) -> Vec<String> {
    let mut paths: Vec<String> = BundledAssets::iter()
        .filter(|path| path.starts_with(prefix))
        .map(|path| path.to_string())
        .collect();
    paths.sort();
    paths
}
