//! Run control for the document workbench.
//!
//! This module provides:
//! - [`Workbench`]: owns the intake gate, sequencer, view switcher, report
//!   provider and render sink, and guards against overlapping runs
//! - [`RunHandle`]: handle to a spawned run
//! - [`WorkbenchError`]: umbrella error for run control

pub mod manager;

pub use manager::{RunHandle, Workbench};

use crate::config::error::ConfigError;
use crate::engine::descriptor::StageConfigError;
use crate::engine::SequencerError;
use crate::intake::IntakeError;
use crate::views::ViewError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkbenchError {
    /// A run is active; the submission was ignored.
    #[error("A run is already in progress")]
    RunAlreadyInProgress,

    /// Submit was requested before any file was accepted.
    #[error("No file has been accepted yet")]
    NoArtifact,

    #[error(transparent)]
    Intake(#[from] IntakeError),

    #[error(transparent)]
    View(#[from] ViewError),

    #[error(transparent)]
    Sequencer(#[from] SequencerError),

    #[error(transparent)]
    InvalidStage(#[from] StageConfigError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The spawned run task panicked or was dropped by the runtime.
    #[error("Run task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
