//! Render sinks.
//!
//! The core never reaches into UI state. Every presentation update is a
//! `RenderInstruction` written to an injected `RenderSink`, which makes the
//! orchestration testable headlessly and lets the TUI, a browser bridge or a
//! plain log consume the same stream.

use mdc_protocol::ipc::RenderInstruction;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::UnboundedSender;

/// Destination for render instructions.
///
/// Emission is synchronous and infallible from the caller's point of view: a
/// renderer that went away simply stops receiving updates.
pub trait RenderSink: Send + Sync {
    fn emit(&self, instruction: RenderInstruction);
}

impl RenderSink for UnboundedSender<RenderInstruction> {
    fn emit(&self, instruction: RenderInstruction) {
        let _ = self.send(instruction);
    }
}

impl<S: RenderSink + ?Sized> RenderSink for Arc<S> {
    fn emit(&self, instruction: RenderInstruction) {
        (**self).emit(instruction);
    }
}

/// Sink that records every instruction in memory.
///
/// Used by headless callers and tests to inspect what would have been drawn.
#[derive(Clone, Default)]
pub struct MemorySink {
    instructions: Arc<Mutex<Vec<RenderInstruction>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything emitted so far.
    pub fn instructions(&self) -> Vec<RenderInstruction> {
        match self.instructions.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.instructions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Progress values emitted for one stage, in emission order.
    pub fn progress_for(&self, stage_index: usize) -> Vec<f64> {
        self.instructions()
            .into_iter()
            .filter_map(|instruction| match instruction {
                RenderInstruction::StageProgress {
                    stage_index: index,
                    percent,
                    ..
                } if index == stage_index => Some(percent),
                _ => None,
            })
            .collect()
    }
}

impl RenderSink for MemorySink {
    fn emit(&self, instruction: RenderInstruction) {
        match self.instructions.lock() {
            Ok(mut guard) => guard.push(instruction),
            Err(poisoned) => poisoned.into_inner().push(instruction),
        }
    }
}
