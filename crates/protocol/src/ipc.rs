//! Communication protocol between the orchestration core and its renderers.
//!
//! The protocol follows a Command/RenderInstruction pattern:
//! - `Command`: user actions sent from a renderer (TUI, browser) to the core
//! - `RenderInstruction`: structured presentation updates sent from the core
//!   to whichever render sink is attached
//!
//! The core never touches markup or styling. A renderer turns each
//! instruction into its own widgets.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use ts_rs::TS;
use uuid::Uuid;

use crate::artifact_models::InputArtifact;
use crate::report_models::ReportPayload;
use crate::view_models::ViewName;

/// Actions sent from a renderer to the core.
///
/// Uses tagged enum serialization for TypeScript compatibility:
/// ```json
/// {
///   "type": "selectView",
///   "payload": { "view": "patient" }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Command {
    /// Pick an input file; equivalent to choosing a file in the upload area.
    SelectFile { path: PathBuf },

    /// Start processing the accepted file.
    Submit,

    /// Switch the visible report view; equivalent to a tab click.
    SelectView { view: String },

    /// Shut down the application gracefully.
    Shutdown,
}

/// Presentation updates sent from the core to a render sink.
///
/// Uses tagged enum serialization for TypeScript compatibility:
/// ```json
/// {
///   "type": "stageProgress",
///   "payload": { "run_id": "uuid-here", "stage_index": 2, "percent": 42.5 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum RenderInstruction {
    /// The intake gate accepted a file.
    ArtifactAccepted { artifact: InputArtifact },

    /// The intake gate rejected a file. The message is user-facing.
    IntakeRejected { message: String },

    /// The submit trigger was enabled or disabled.
    TriggerChanged { enabled: bool },

    /// A new run has started; renderers clear the result area.
    RunStarted {
        #[ts(type = "string")]
        run_id: Uuid,
        stage_count: usize,
    },

    /// Placeholder shown before the first stage renders.
    Loading { message: String },

    /// A heading grouping the following stages.
    SectionHeading {
        #[ts(type = "string")]
        run_id: Uuid,
        title: String,
    },

    /// A stage became active.
    StageActivated {
        #[ts(type = "string")]
        run_id: Uuid,
        stage_index: usize,
        name: String,
        icon: String,
        task_label: String,
    },

    /// Progress of the active stage, in percent.
    StageProgress {
        #[ts(type = "string")]
        run_id: Uuid,
        stage_index: usize,
        percent: f64,
    },

    /// A stage reached its target.
    StageCompleted {
        #[ts(type = "string")]
        run_id: Uuid,
        stage_index: usize,
        completion_label: String,
    },

    /// The final report replaced the stage list.
    ReportRendered {
        #[ts(type = "string")]
        run_id: Uuid,
        report: ReportPayload,
        active_view: ViewName,
    },

    /// The visible report view changed.
    ViewChanged { view: ViewName },

    /// A run was abandoned before producing a report.
    RunAborted {
        #[ts(type = "string")]
        run_id: Uuid,
        reason: String,
    },
}

impl RenderInstruction {
    /// The run this instruction belongs to, if any.
    pub fn run_id(&self) -> Option<Uuid> {
        match self {
            RenderInstruction::RunStarted { run_id, .. }
            | RenderInstruction::SectionHeading { run_id, .. }
            | RenderInstruction::StageActivated { run_id, .. }
            | RenderInstruction::StageProgress { run_id, .. }
            | RenderInstruction::StageCompleted { run_id, .. }
            | RenderInstruction::ReportRendered { run_id, .. }
            | RenderInstruction::RunAborted { run_id, .. } => Some(*run_id),
            _ => None,
        }
    }
}
