//! Workflow and stage models for `.medidoc/workflows/*.yaml`.
//!
//! A workflow is an ordered list of stages. Each stage is a named unit of the
//! simulated document-analysis run with a visual progress target and a
//! duration. The types here are the raw, serializable form; validation into
//! immutable descriptors happens in `mdc-core` at configuration time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

fn default_target_percent() -> f64 {
    100.0
}

fn default_completion_label() -> String {
    "Complete".to_string()
}

fn default_report_delay_ms() -> u64 {
    500
}

/// A single stage entry as written in a workflow file.
///
/// Numeric fields are kept wide (`f64`, `i64`) so that negative or
/// out-of-range values survive parsing and can be rejected with a
/// descriptive error instead of a generic deserialization failure.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "kebab-case")]
pub struct StageSpec {
    /// Display name of the stage (e.g. "PaddleOCR-VL", "Cardiology Agent").
    pub name: String,

    /// Icon rendered next to the stage header.
    #[serde(default)]
    pub icon: String,

    /// Task label shown while the stage is active.
    pub task: String,

    /// Progress value the stage animates towards, in percent.
    #[serde(default = "default_target_percent")]
    pub target_percent: f64,

    /// How long the progress animation runs, in milliseconds.
    pub duration_ms: i64,

    /// Label that replaces the task label once the stage completes.
    #[serde(default = "default_completion_label")]
    pub completion_label: String,

    /// Optional section heading this stage is grouped under.
    ///
    /// A heading is rendered whenever a stage's section differs from the
    /// previous stage's section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

/// A named, ordered list of stages followed by report generation.
///
/// # Example
///
/// ```yaml
/// name: document-analysis
/// report-delay-ms: 500
/// stages:
///   - name: PaddleOCR-VL
///     icon: "📄"
///     task: Extracting text from document...
///     duration-ms: 800
///     completion-label: Text extracted successfully (96% confidence)
///     section: "Stage 1: OCR Processing"
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "kebab-case")]
pub struct Workflow {
    /// Unique name identifying this workflow.
    pub name: String,

    /// Fixed pause between the last stage completing and report generation.
    #[serde(default = "default_report_delay_ms")]
    pub report_delay_ms: u64,

    /// Stages executed strictly in order.
    pub stages: Vec<StageSpec>,
}

/// Lifecycle status of a stage within a single run.
///
/// Transitions `Pending -> Active -> Complete` exactly once per run.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StageStatus {
    /// Not started yet in the current run.
    #[default]
    Pending,

    /// Currently animating.
    Active,

    /// Reached its target.
    Complete,
}

/// Read-only view of a stage's runtime state.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct StageSnapshot {
    pub name: String,
    pub status: StageStatus,
    pub percent: f64,
}

/// Final state of a run that produced a report.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
pub struct RunOutcome {
    #[ts(type = "string")]
    pub run_id: Uuid,

    /// Timestamp when the run started.
    #[ts(type = "string")]
    pub started_at: DateTime<Utc>,

    /// Timestamp when the report was rendered.
    #[ts(type = "string")]
    pub completed_at: DateTime<Utc>,

    /// Terminal state of every stage, in workflow order.
    pub stages: Vec<StageSnapshot>,
}
