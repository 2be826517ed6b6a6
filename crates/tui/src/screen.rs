//! Screen state rebuilt from render instructions.
//!
//! The TUI never queries the core. Everything it draws is folded from the
//! `RenderInstruction` stream into a `ScreenState`.

use mdc_protocol::artifact_models::InputArtifact;
use mdc_protocol::report_models::ReportPayload;
use mdc_protocol::stage_models::StageStatus;
use mdc_protocol::view_models::ViewName;
use uuid::Uuid;

/// One stage as currently drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct StageRow {
    pub index: usize,
    pub name: String,
    pub icon: String,
    /// Task label while active, completion label once complete.
    pub label: String,
    pub percent: f64,
    pub status: StageStatus,
}

/// A line of the stage panel.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenRow {
    Heading(String),
    Stage(StageRow),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenState {
    pub artifact: Option<InputArtifact>,
    /// Last intake rejection, cleared by the next accepted file.
    pub intake_message: Option<String>,
    pub trigger_enabled: bool,
    /// Loading placeholder shown in the result area while a run executes.
    pub loading: Option<String>,
    pub run_id: Option<Uuid>,
    pub stage_count: usize,
    pub rows: Vec<ScreenRow>,
    pub report: Option<ReportPayload>,
    pub active_view: ViewName,
    pub aborted: Option<String>,
}

impl ScreenState {
    pub fn new(active_view: ViewName) -> Self {
        Self {
            artifact: None,
            intake_message: None,
            trigger_enabled: false,
            loading: None,
            run_id: None,
            stage_count: 0,
            rows: Vec::new(),
            report: None,
            active_view,
            aborted: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.run_id.is_some() && self.report.is_none() && self.aborted.is_none()
    }

    pub fn stage(&self, index: usize) -> Option<&StageRow> {
        self.rows.iter().find_map(|row| match row {
            ScreenRow::Stage(stage) if stage.index == index => Some(stage),
            _ => None,
        })
    }

    pub(crate) fn stage_mut(&mut self, index: usize) -> Option<&mut StageRow> {
        self.rows.iter_mut().find_map(|row| match row {
            ScreenRow::Stage(stage) if stage.index == index => Some(stage),
            _ => None,
        })
    }

    /// Number of stages that have completed in the current run.
    pub fn completed_stages(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row, ScreenRow::Stage(s) if s.status == StageStatus::Complete))
            .count()
    }
}

impl Default for ScreenState {
    fn default() -> Self {
        Self::new(ViewName::Professional)
    }
}
