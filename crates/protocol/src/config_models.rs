//! Global configuration models for `.medidoc/config.toml`.
//!
//! This module defines the structure of the global configuration file that
//! controls intake, view and timing settings.

use serde::Deserialize;
use serde::Serialize;
use ts_rs::TS;

use crate::view_models::ViewName;

/// Name of the workflow embedded in the binary.
pub const DEFAULT_WORKFLOW: &str = "document-analysis";

fn default_allowed_mime_types() -> Vec<String> {
    ["application/pdf", "image/jpeg", "image/jpg", "image/png"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_view() -> ViewName {
    ViewName::Professional
}

fn default_frame_interval_ms() -> u64 {
    16
}

fn default_workflow() -> String {
    DEFAULT_WORKFLOW.to_string()
}

/// Represents global settings from `.medidoc/config.toml`.
///
/// # Example
///
/// ```toml
/// # .medidoc/config.toml
/// allowed-mime-types = ["application/pdf", "image/png"]
/// default-view = "patient"
/// frame-interval-ms = 16
/// workflow = "document-analysis"
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "kebab-case")]
pub struct GlobalConfig {
    /// MIME types the intake gate accepts.
    #[serde(default = "default_allowed_mime_types")]
    pub allowed_mime_types: Vec<String>,

    /// View shown when a report is first rendered.
    #[serde(default = "default_view")]
    pub default_view: ViewName,

    /// Interval between animation frames, in milliseconds.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,

    /// Name of the workflow to run.
    #[serde(default = "default_workflow")]
    pub workflow: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            allowed_mime_types: default_allowed_mime_types(),
            default_view: default_view(),
            frame_interval_ms: default_frame_interval_ms(),
            workflow: default_workflow(),
        }
    }
}
