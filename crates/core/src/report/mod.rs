//! Report generation.
//!
//! The orchestration core treats the report as an opaque payload supplied by
//! a `ReportProvider`. A real analysis backend would replace only the
//! provider; sequencing and view switching stay unchanged.

pub mod static_provider;

pub use static_provider::StaticReportProvider;

use async_trait::async_trait;
use mdc_protocol::report_models::ReportPayload;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// A bundled report file is missing.
    #[error("Report asset not found: {0}")]
    AssetNotFound(String),

    /// A bundled report file could not be parsed.
    #[error("Failed to parse report asset {path}: {reason}")]
    Parse { path: String, reason: String },

    /// The provider could not produce a report.
    #[error("Report generation failed: {0}")]
    Generation(String),
}

/// Supplies the report rendered after a completed run.
///
/// Invoked exactly once per completed run.
#[async_trait]
pub trait ReportProvider: Send + Sync {
    async fn generate_report(&self) -> Result<ReportPayload, ReportError>;
}
