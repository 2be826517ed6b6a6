//! Stage runtime state machine.
//!
//! This module provides the per-run state of a stage and the functions that
//! move it through its lifecycle, emitting a render instruction for each
//! visible change.

use crate::engine::descriptor::StageDescriptor;
use crate::render::RenderSink;
use mdc_protocol::ipc::RenderInstruction;
use mdc_protocol::stage_models::{StageSnapshot, StageStatus};
use uuid::Uuid;

/// Mutable state of one stage during a run.
///
/// `status` only moves forward (`Pending -> Active -> Complete`) and
/// `percent` never decreases while the stage is active.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StageRuntimeState {
    status: StageStatus,
    percent: f64,
}

impl StageRuntimeState {
    pub fn status(&self) -> StageStatus {
        self.status
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    pub fn snapshot(&self, descriptor: &StageDescriptor) -> StageSnapshot {
        StageSnapshot {
            name: descriptor.name().to_string(),
            status: self.status,
            percent: self.percent,
        }
    }
}

/// Transition a pending stage to Active and render its header.
///
/// Returns `false` (and renders nothing) if the stage was not pending.
pub fn activate_stage(
    state: &mut StageRuntimeState,
    run_id: Uuid,
    stage_index: usize,
    descriptor: &StageDescriptor,
    sink: &dyn RenderSink,
) -> bool {
    if state.status != StageStatus::Pending {
        return false;
    }
    state.status = StageStatus::Active;
    state.percent = 0.0;
    sink.emit(RenderInstruction::StageActivated {
        run_id,
        stage_index,
        name: descriptor.name().to_string(),
        icon: descriptor.icon().to_string(),
        task_label: descriptor.task_label().to_string(),
    });
    true
}

/// Record a progress frame for an active stage and render it.
///
/// Frames arriving for a stage that is not active, or that would move the
/// value backwards, are dropped.
pub fn record_progress(
    state: &mut StageRuntimeState,
    run_id: Uuid,
    stage_index: usize,
    percent: f64,
    sink: &dyn RenderSink,
) -> bool {
    if state.status != StageStatus::Active || percent < state.percent {
        return false;
    }
    state.percent = percent;
    sink.emit(RenderInstruction::StageProgress {
        run_id,
        stage_index,
        percent,
    });
    true
}

/// Transition an active stage to Complete and render its completion label.
pub fn complete_stage(
    state: &mut StageRuntimeState,
    run_id: Uuid,
    stage_index: usize,
    descriptor: &StageDescriptor,
    sink: &dyn RenderSink,
) -> bool {
    if state.status != StageStatus::Active {
        return false;
    }
    state.status = StageStatus::Complete;
    state.percent = descriptor.target_percent();
    sink.emit(RenderInstruction::StageCompleted {
        run_id,
        stage_index,
        completion_label: descriptor.completion_label().to_string(),
    });
    true
}
