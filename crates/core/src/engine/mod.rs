//! Stage execution engine.
//!
//! The `StageSequencer` runs an ordered list of stages strictly one after
//! another, animating each stage's progress and coordinating the stage state
//! transitions. After the last stage it waits a fixed delay, invokes the
//! report provider and disables itself until reset.
//!
//! Submodules:
//! - [`frame`]: the frame scheduler driving animation ticks
//! - [`animator`]: per-stage progress interpolation
//! - [`descriptor`]: validated stage descriptors
//! - [`stage`]: per-run stage state machine

pub mod animator;
pub mod descriptor;
pub mod frame;
pub mod stage;

use crate::engine::animator::{AnimationError, StageAnimator};
use crate::engine::descriptor::StageDescriptor;
use crate::engine::stage::{activate_stage, complete_stage, record_progress, StageRuntimeState};
use crate::render::RenderSink;
use crate::report::{ReportError, ReportProvider};
use chrono::Utc;
use mdc_protocol::ipc::RenderInstruction;
use mdc_protocol::report_models::ReportPayload;
use mdc_protocol::stage_models::{RunOutcome, StageSnapshot};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SequencerError {
    /// A run is already executing on this sequencer.
    #[error("A run is already in progress")]
    Busy,

    /// The previous run finished; `reset` must be called first.
    #[error("Sequencer is disabled until reset")]
    Disabled,

    /// The run was abandoned before the report was generated.
    #[error("Run {run_id} aborted: {reason}")]
    Aborted { run_id: Uuid, reason: String },

    /// The report provider failed after all stages completed.
    #[error("Report generation failed: {0}")]
    Report(#[from] ReportError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Ready,
    Running,
    Finished,
}

/// A completed run together with the report it produced.
#[derive(Debug, Clone)]
pub struct CompletedRun {
    pub outcome: RunOutcome,
    pub report: ReportPayload,
}

/// Runs stages in order and hands off to report generation.
pub struct StageSequencer {
    descriptors: Vec<StageDescriptor>,
    states: Arc<Mutex<Vec<StageRuntimeState>>>,
    phase: Mutex<Phase>,
    report_delay: Duration,
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl StageSequencer {
    /// Create a sequencer over validated descriptors.
    ///
    /// # Arguments
    ///
    /// * `descriptors` - Stages in execution order
    /// * `report_delay` - Pause between the last stage and report generation
    pub fn new(descriptors: Vec<StageDescriptor>, report_delay: Duration) -> Self {
        let states = vec![StageRuntimeState::default(); descriptors.len()];
        Self {
            descriptors,
            states: Arc::new(Mutex::new(states)),
            phase: Mutex::new(Phase::Ready),
            report_delay,
        }
    }

    pub fn descriptors(&self) -> &[StageDescriptor] {
        &self.descriptors
    }

    pub fn report_delay(&self) -> Duration {
        self.report_delay
    }

    /// Whether `run_all` would currently be accepted.
    pub fn is_enabled(&self) -> bool {
        *lock(&self.phase) == Phase::Ready
    }

    pub fn is_running(&self) -> bool {
        *lock(&self.phase) == Phase::Running
    }

    /// Current state of every stage, in order.
    pub fn snapshot(&self) -> Vec<StageSnapshot> {
        let states = lock(&self.states);
        self.descriptors
            .iter()
            .zip(states.iter())
            .map(|(descriptor, state)| state.snapshot(descriptor))
            .collect()
    }

    /// Return all stages to Pending and re-enable the sequencer.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::Busy`] while a run is executing.
    pub fn reset(&self) -> Result<(), SequencerError> {
        let mut phase = lock(&self.phase);
        if *phase == Phase::Running {
            return Err(SequencerError::Busy);
        }
        *lock(&self.states) = vec![StageRuntimeState::default(); self.descriptors.len()];
        *phase = Phase::Ready;
        Ok(())
    }

    /// Execute every stage in order, then generate the report.
    ///
    /// For each stage: mark it Active and render its header, animate its
    /// progress to the target, mark it Complete and render its completion
    /// label. The next stage only starts once the previous stage's
    /// completion has been rendered. A section heading is rendered whenever
    /// a stage's section differs from the previous one.
    ///
    /// After the last stage the sequencer waits `report_delay`, calls the
    /// provider once and disables itself.
    ///
    /// # Errors
    ///
    /// - [`SequencerError::Busy`] / [`SequencerError::Disabled`] if the
    ///   sequencer is not ready; nothing is rendered.
    /// - [`SequencerError::Aborted`] if `cancel` fires mid-run; a
    ///   `RunAborted` instruction is rendered and no report is generated.
    /// - [`SequencerError::Report`] if the provider fails.
    pub async fn run_all(
        &self,
        animator: &StageAnimator,
        provider: &dyn ReportProvider,
        sink: Arc<dyn RenderSink>,
        cancel: &CancellationToken,
    ) -> Result<CompletedRun, SequencerError> {
        {
            let mut phase = lock(&self.phase);
            match *phase {
                Phase::Running => return Err(SequencerError::Busy),
                Phase::Finished => return Err(SequencerError::Disabled),
                Phase::Ready => *phase = Phase::Running,
            }
        }

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!(%run_id, stages = self.descriptors.len(), "run started");
        sink.emit(RenderInstruction::RunStarted {
            run_id,
            stage_count: self.descriptors.len(),
        });

        let result = self
            .execute(run_id, animator, provider, sink.clone(), cancel)
            .await;
        *lock(&self.phase) = Phase::Finished;

        match result {
            Ok(report) => {
                info!(%run_id, "run completed");
                Ok(CompletedRun {
                    outcome: RunOutcome {
                        run_id,
                        started_at,
                        completed_at: Utc::now(),
                        stages: self.snapshot(),
                    },
                    report,
                })
            }
            Err(err) => {
                warn!(%run_id, error = %err, "run aborted");
                sink.emit(RenderInstruction::RunAborted {
                    run_id,
                    reason: err.to_string(),
                });
                Err(err)
            }
        }
    }

    async fn execute(
        &self,
        run_id: Uuid,
        animator: &StageAnimator,
        provider: &dyn ReportProvider,
        sink: Arc<dyn RenderSink>,
        cancel: &CancellationToken,
    ) -> Result<ReportPayload, SequencerError> {
        let mut current_section: Option<&str> = None;

        for (index, descriptor) in self.descriptors.iter().enumerate() {
            if let Some(section) = descriptor.section() {
                if current_section != Some(section) {
                    sink.emit(RenderInstruction::SectionHeading {
                        run_id,
                        title: section.to_string(),
                    });
                }
            }
            current_section = descriptor.section();

            activate_stage(
                &mut lock(&self.states)[index],
                run_id,
                index,
                descriptor,
                sink.as_ref(),
            );
            debug!(%run_id, stage = descriptor.name(), "stage active");

            let states = Arc::clone(&self.states);
            let frame_sink = Arc::clone(&sink);
            let frame_cancel = cancel.clone();
            let on_frame = move |percent: f64| {
                let mut states = lock(&states);
                if frame_cancel.is_cancelled() {
                    return;
                }
                if let Some(state) = states.get_mut(index) {
                    record_progress(state, run_id, index, percent, frame_sink.as_ref());
                }
            };

            animator
                .animate(
                    descriptor.target_percent(),
                    descriptor.duration(),
                    cancel,
                    on_frame,
                )
                .await
                .map_err(|err| SequencerError::Aborted {
                    run_id,
                    reason: match err {
                        AnimationError::Cancelled => {
                            format!("stage '{}' was cancelled", descriptor.name())
                        }
                        other => format!("stage '{}': {other}", descriptor.name()),
                    },
                })?;

            complete_stage(
                &mut lock(&self.states)[index],
                run_id,
                index,
                descriptor,
                sink.as_ref(),
            );
            debug!(%run_id, stage = descriptor.name(), "stage complete");
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return Err(SequencerError::Aborted {
                    run_id,
                    reason: "cancelled before report generation".to_string(),
                });
            }
            _ = tokio::time::sleep(self.report_delay) => {}
        }

        Ok(provider.generate_report().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::frame::FrameScheduler;
    use crate::render::MemorySink;
    use crate::report::StaticReportProvider;
    use mdc_protocol::stage_models::StageStatus;

    fn stage(name: &str, duration_ms: i64) -> StageDescriptor {
        StageDescriptor::new(name, "🔍", format!("{name} working..."), 100.0, duration_ms)
            .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_stage_completes() {
        let sequencer = StageSequencer::new(vec![stage("OCR", 800)], Duration::ZERO);
        let sink = Arc::new(MemorySink::new());
        let cancel = CancellationToken::new();

        let run = sequencer
            .run_all(&StageAnimator::default(), &StaticReportProvider, sink.clone(), &cancel)
            .await
            .unwrap();

        assert_eq!(run.outcome.stages.len(), 1);
        assert_eq!(run.outcome.stages[0].status, StageStatus::Complete);
        assert_eq!(run.outcome.stages[0].percent, 100.0);
        assert_eq!(sink.progress_for(0).last(), Some(&100.0));
        assert!(!sequencer.is_enabled(), "sequencer disables itself after a run");
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_until_reset() {
        let sequencer = StageSequencer::new(vec![stage("OCR", 10)], Duration::ZERO);
        let animator = StageAnimator::default();
        let cancel = CancellationToken::new();
        let sink = Arc::new(MemorySink::new());

        sequencer
            .run_all(&animator, &StaticReportProvider, sink.clone(), &cancel)
            .await
            .unwrap();
        let rendered = sink.len();

        let second = sequencer
            .run_all(&animator, &StaticReportProvider, sink.clone(), &cancel)
            .await;
        assert_eq!(second.unwrap_err(), SequencerError::Disabled);
        assert_eq!(sink.len(), rendered, "rejected run renders nothing");

        sequencer.reset().unwrap();
        assert!(sequencer.is_enabled());
        assert!(sequencer
            .snapshot()
            .iter()
            .all(|s| s.status == StageStatus::Pending && s.percent == 0.0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_section_headings_rendered_once_per_group() {
        let descriptors = vec![
            stage("OCR", 10).with_section("Stage 1: OCR Processing"),
            stage("Analyzer", 10).with_section("Stage 2: Multi-Agent Analysis"),
            stage("Cardiology", 10).with_section("Stage 2: Multi-Agent Analysis"),
        ];
        let sequencer = StageSequencer::new(descriptors, Duration::ZERO);
        let sink = Arc::new(MemorySink::new());

        sequencer
            .run_all(
                &StageAnimator::default(),
                &StaticReportProvider,
                sink.clone(),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        let headings: Vec<String> = sink
            .instructions()
            .into_iter()
            .filter_map(|i| match i {
                RenderInstruction::SectionHeading { title, .. } => Some(title),
                _ => None,
            })
            .collect();
        assert_eq!(
            headings,
            vec!["Stage 1: OCR Processing", "Stage 2: Multi-Agent Analysis"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_aborts_without_report() {
        let sequencer = StageSequencer::new(
            vec![stage("OCR", 1000), stage("Cardiology", 1000)],
            Duration::ZERO,
        );
        let sink = Arc::new(MemorySink::new());
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(300)).await;
            trigger.cancel();
        });

        let result = sequencer
            .run_all(&StageAnimator::default(), &StaticReportProvider, sink.clone(), &cancel)
            .await;
        assert!(matches!(result, Err(SequencerError::Aborted { .. })));

        let snapshot = sequencer.snapshot();
        assert_eq!(snapshot[0].status, StageStatus::Active);
        assert_eq!(snapshot[1].status, StageStatus::Pending);

        let instructions = sink.instructions();
        assert!(matches!(
            instructions.last(),
            Some(RenderInstruction::RunAborted { .. })
        ));
        assert!(!instructions
            .iter()
            .any(|i| matches!(i, RenderInstruction::StageCompleted { .. })));
    }

    /// Sink that stalls on every progress frame, widening the window in which
    /// a frame callback is still running when the run is cancelled.
    struct SlowProgressSink {
        inner: MemorySink,
        delay: Duration,
    }

    impl RenderSink for SlowProgressSink {
        fn emit(&self, instruction: RenderInstruction) {
            if matches!(instruction, RenderInstruction::StageProgress { .. }) {
                std::thread::sleep(self.delay);
            }
            self.inner.emit(instruction);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_no_progress_rendered_after_abort_on_worker_threads() {
        let animator = StageAnimator::new(FrameScheduler::new(Duration::from_millis(1)));

        for _ in 0..10 {
            let sequencer = StageSequencer::new(vec![stage("OCR", 2000)], Duration::ZERO);
            let sink = Arc::new(SlowProgressSink {
                inner: MemorySink::new(),
                delay: Duration::from_millis(20),
            });
            let cancel = CancellationToken::new();

            let trigger = cancel.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(105)).await;
                trigger.cancel();
            });

            let result = sequencer
                .run_all(&animator, &StaticReportProvider, sink.clone(), &cancel)
                .await;
            assert!(matches!(result, Err(SequencerError::Aborted { .. })));

            // Give any straggling frame task time to write.
            tokio::time::sleep(Duration::from_millis(60)).await;

            let instructions = sink.inner.instructions();
            let aborted_at = instructions
                .iter()
                .position(|i| matches!(i, RenderInstruction::RunAborted { .. }))
                .unwrap();
            assert_eq!(aborted_at, instructions.len() - 1);
            assert!(instructions[..aborted_at]
                .iter()
                .any(|i| matches!(i, RenderInstruction::StageProgress { .. })));
        }
    }

    #[tokio::test]
    async fn test_reset_rejected_while_running() {
        let sequencer = Arc::new(StageSequencer::new(
            vec![stage("OCR", 60_000)],
            Duration::ZERO,
        ));
        let cancel = CancellationToken::new();

        let running = Arc::clone(&sequencer);
        let token = cancel.clone();
        let handle = tokio::spawn(async move {
            running
                .run_all(
                    &StageAnimator::default(),
                    &StaticReportProvider,
                    Arc::new(MemorySink::new()),
                    &token,
                )
                .await
        });

        while !sequencer.is_running() {
            tokio::task::yield_now().await;
        }
        assert_eq!(sequencer.reset(), Err(SequencerError::Busy));

        cancel.cancel();
        assert!(handle.await.unwrap().is_err());
        assert!(sequencer.reset().is_ok());
    }
}
