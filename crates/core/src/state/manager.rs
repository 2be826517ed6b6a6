//! Workbench: the central run controller.
//!
//! The Workbench wires the intake gate, stage sequencer, view switcher and
//! report provider to a single render sink. It is the only entry point that
//! starts runs, and it keeps at most one run active at a time.

use crate::config::models::AppConfig;
use crate::engine::animator::StageAnimator;
use crate::engine::descriptor::descriptors_for;
use crate::engine::frame::FrameScheduler;
use crate::engine::{lock, StageSequencer};
use crate::intake::{artifact_from_path, IntakeGate};
use crate::render::RenderSink;
use crate::report::ReportProvider;
use crate::state::WorkbenchError;
use crate::views::ViewSwitcher;
use mdc_protocol::artifact_models::InputArtifact;
use mdc_protocol::config_models::GlobalConfig;
use mdc_protocol::ipc::RenderInstruction;
use mdc_protocol::report_models::ReportPayload;
use mdc_protocol::stage_models::{RunOutcome, StageSnapshot, Workflow};
use mdc_protocol::view_models::ViewName;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Placeholder shown in the result area while a run is executing.
pub const LOADING_MESSAGE: &str = "Processing document...";

/// Handle to a run spawned by [`Workbench::submit`].
pub struct RunHandle {
    task: JoinHandle<Result<RunOutcome, WorkbenchError>>,
    cancel: CancellationToken,
}

impl RunHandle {
    /// Request cancellation of the run.
    pub fn abort(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the run to finish.
    pub async fn join(self) -> Result<RunOutcome, WorkbenchError> {
        self.task.await?
    }
}

/// Owns every component of a document-analysis session.
///
/// All methods take `&self`; the Workbench can be shared behind an `Arc`
/// between an input loop and the task driving a run.
pub struct Workbench {
    gate: Mutex<IntakeGate>,
    switcher: Arc<Mutex<ViewSwitcher>>,
    sequencer: Arc<StageSequencer>,
    animator: StageAnimator,
    provider: Arc<dyn ReportProvider>,
    sink: Arc<dyn RenderSink>,
    active_run: Arc<Mutex<Option<CancellationToken>>>,
    last_report: Arc<Mutex<Option<ReportPayload>>>,
}

impl Workbench {
    /// Build a workbench for `workflow` using the global settings.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::InvalidStage`] if a stage cannot be run.
    pub fn new(
        global: &GlobalConfig,
        workflow: &Workflow,
        provider: Arc<dyn ReportProvider>,
        sink: Arc<dyn RenderSink>,
    ) -> Result<Self, WorkbenchError> {
        let descriptors = descriptors_for(workflow)?;
        let sequencer = StageSequencer::new(
            descriptors,
            Duration::from_millis(workflow.report_delay_ms),
        );
        let scheduler = FrameScheduler::new(Duration::from_millis(global.frame_interval_ms));

        Ok(Self {
            gate: Mutex::new(IntakeGate::new(global.allowed_mime_types.clone())),
            switcher: Arc::new(Mutex::new(ViewSwitcher::with_default(global.default_view))),
            sequencer: Arc::new(sequencer),
            animator: StageAnimator::new(scheduler),
            provider,
            sink,
            active_run: Arc::new(Mutex::new(None)),
            last_report: Arc::new(Mutex::new(None)),
        })
    }

    /// Build a workbench from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbenchError::Config`] if the configured workflow cannot
    /// be resolved.
    pub fn from_config(
        config: &AppConfig,
        provider: Arc<dyn ReportProvider>,
        sink: Arc<dyn RenderSink>,
    ) -> Result<Self, WorkbenchError> {
        let workflow = config.workflow()?;
        Self::new(&config.global, &workflow, provider, sink)
    }

    /// Offer a file to the intake gate.
    ///
    /// On acceptance the file summary is rendered and, unless a run is
    /// active, the trigger is enabled. On rejection the previous state is
    /// kept.
    pub fn select_file(&self, artifact: InputArtifact) -> Result<InputArtifact, WorkbenchError> {
        let accepted = lock(&self.gate).accept(artifact, self.sink.as_ref())?.clone();
        if !self.is_running() {
            self.sink
                .emit(RenderInstruction::TriggerChanged { enabled: true });
        }
        Ok(accepted)
    }

    /// Describe a file on disk and offer it to the intake gate.
    ///
    /// A file that cannot be inspected is reported like a rejected one and
    /// leaves the previous state untouched.
    pub fn select_path(&self, path: &Path) -> Result<InputArtifact, WorkbenchError> {
        let artifact = match artifact_from_path(path) {
            Ok(artifact) => artifact,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "cannot inspect input file");
                self.sink.emit(RenderInstruction::IntakeRejected {
                    message: format!("Cannot read {}", path.display()),
                });
                return Err(err.into());
            }
        };
        self.select_file(artifact)
    }

    /// The currently accepted file, if any.
    pub fn current_artifact(&self) -> Option<InputArtifact> {
        lock(&self.gate).current().cloned()
    }

    /// Start a run over the accepted file.
    ///
    /// Disables the trigger, renders the loading placeholder, resets the
    /// sequencer and spawns the run. The trigger is re-enabled once the run
    /// completes or aborts.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// - [`WorkbenchError::RunAlreadyInProgress`] while a run is active.
    ///   Nothing is rendered and no state changes.
    /// - [`WorkbenchError::NoArtifact`] if no file has been accepted.
    pub fn submit(&self) -> Result<RunHandle, WorkbenchError> {
        let mut active = lock(&self.active_run);
        if active.is_some() || self.sequencer.is_running() {
            warn!("submit ignored: run already in progress");
            return Err(WorkbenchError::RunAlreadyInProgress);
        }
        let artifact = self.current_artifact().ok_or(WorkbenchError::NoArtifact)?;

        self.sequencer.reset()?;
        let cancel = CancellationToken::new();
        *active = Some(cancel.clone());
        drop(active);

        info!(file = %artifact.display_name, "run submitted");
        self.sink
            .emit(RenderInstruction::TriggerChanged { enabled: false });
        self.sink.emit(RenderInstruction::Loading {
            message: LOADING_MESSAGE.to_string(),
        });

        let sequencer = Arc::clone(&self.sequencer);
        let animator = self.animator.clone();
        let provider = Arc::clone(&self.provider);
        let sink = Arc::clone(&self.sink);
        let switcher = Arc::clone(&self.switcher);
        let active_run = Arc::clone(&self.active_run);
        let last_report = Arc::clone(&self.last_report);
        let run_cancel = cancel.clone();

        let task = tokio::spawn(async move {
            let result = sequencer
                .run_all(&animator, provider.as_ref(), Arc::clone(&sink), &run_cancel)
                .await;

            let outcome = match result {
                Ok(run) => {
                    let active_view = lock(&switcher).active();
                    sink.emit(RenderInstruction::ReportRendered {
                        run_id: run.outcome.run_id,
                        report: run.report.clone(),
                        active_view,
                    });
                    *lock(&last_report) = Some(run.report);
                    Ok(run.outcome)
                }
                Err(err) => Err(WorkbenchError::from(err)),
            };

            *lock(&active_run) = None;
            sink.emit(RenderInstruction::TriggerChanged { enabled: true });
            outcome
        });

        Ok(RunHandle { task, cancel })
    }

    /// Cancel the active run, if any. Returns whether a run was cancelled.
    pub fn abort(&self) -> bool {
        match lock(&self.active_run).as_ref() {
            Some(cancel) => {
                info!("abort requested");
                cancel.cancel();
                true
            }
            None => false,
        }
    }

    /// Select the visible report view by name.
    ///
    /// Accepted at any time, including before the first report.
    pub fn select(&self, view: &str) -> Result<ViewName, WorkbenchError> {
        Ok(lock(&self.switcher).select(view, self.sink.as_ref())?)
    }

    pub fn active_view(&self) -> ViewName {
        lock(&self.switcher).active()
    }

    pub fn views(&self) -> Vec<ViewName> {
        lock(&self.switcher).views().to_vec()
    }

    /// Whether a submission would currently be accepted.
    pub fn trigger_enabled(&self) -> bool {
        !self.is_running() && lock(&self.gate).current().is_some()
    }

    pub fn is_running(&self) -> bool {
        lock(&self.active_run).is_some()
    }

    /// Current state of every stage of the workflow.
    pub fn stage_snapshot(&self) -> Vec<StageSnapshot> {
        self.sequencer.snapshot()
    }

    /// Report produced by the most recent successful run.
    pub fn last_report(&self) -> Option<ReportPayload> {
        lock(&self.last_report).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MemorySink;
    use crate::report::StaticReportProvider;
    use mdc_protocol::stage_models::{StageSpec, StageStatus};

    fn quick_workflow() -> Workflow {
        Workflow {
            name: "quick".to_string(),
            report_delay_ms: 50,
            stages: vec![StageSpec {
                name: "OCR".to_string(),
                icon: "📄".to_string(),
                task: "Extracting text...".to_string(),
                target_percent: 100.0,
                duration_ms: 100,
                completion_label: "Done".to_string(),
                section: None,
            }],
        }
    }

    fn workbench(sink: &Arc<MemorySink>) -> Workbench {
        Workbench::new(
            &GlobalConfig::default(),
            &quick_workflow(),
            Arc::new(StaticReportProvider::new()),
            sink.clone(),
        )
        .unwrap()
    }

    fn pdf() -> InputArtifact {
        InputArtifact::new("scan.pdf", "application/pdf", 1_048_576)
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_without_artifact() {
        let sink = Arc::new(MemorySink::new());
        let workbench = workbench(&sink);

        assert!(!workbench.trigger_enabled());
        assert!(matches!(
            workbench.submit(),
            Err(WorkbenchError::NoArtifact)
        ));
        assert!(sink.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_run_renders_report_and_reenables_trigger() {
        let sink = Arc::new(MemorySink::new());
        let workbench = workbench(&sink);

        workbench.select_file(pdf()).unwrap();
        assert!(workbench.trigger_enabled());

        let handle = workbench.submit().unwrap();
        assert!(!workbench.trigger_enabled());
        let outcome = handle.join().await.unwrap();

        assert_eq!(outcome.stages[0].status, StageStatus::Complete);
        assert!(workbench.trigger_enabled());
        assert!(workbench.last_report().is_some());

        let instructions = sink.instructions();
        assert!(matches!(
            instructions.last(),
            Some(RenderInstruction::TriggerChanged { enabled: true })
        ));
        assert!(instructions.iter().any(|i| matches!(
            i,
            RenderInstruction::ReportRendered { active_view: ViewName::Professional, .. }
        )));
    }

    #[tokio::test(start_paused = true)]
    async fn test_resubmit_while_running_is_rejected() {
        let sink = Arc::new(MemorySink::new());
        let workbench = workbench(&sink);
        workbench.select_file(pdf()).unwrap();

        let handle = workbench.submit().unwrap();
        let before = sink.len();
        assert!(matches!(
            workbench.submit(),
            Err(WorkbenchError::RunAlreadyInProgress)
        ));
        assert_eq!(sink.len(), before, "rejected submit renders nothing");

        handle.join().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_run_after_completion() {
        let sink = Arc::new(MemorySink::new());
        let workbench = workbench(&sink);
        workbench.select_file(pdf()).unwrap();

        workbench.submit().unwrap().join().await.unwrap();
        let second = workbench.submit().unwrap().join().await.unwrap();
        assert_eq!(second.stages[0].status, StageStatus::Complete);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abort_cancels_run() {
        let sink = Arc::new(MemorySink::new());
        let workbench = workbench(&sink);
        workbench.select_file(pdf()).unwrap();

        let handle = workbench.submit().unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(workbench.abort());

        let result = handle.join().await;
        assert!(matches!(result, Err(WorkbenchError::Sequencer(_))));
        assert!(!workbench.abort(), "nothing left to abort");
        assert!(workbench.trigger_enabled());
        assert!(workbench.last_report().is_none());
        assert!(sink
            .instructions()
            .iter()
            .any(|i| matches!(i, RenderInstruction::RunAborted { .. })));
    }

    #[tokio::test]
    async fn test_select_missing_path_reports_rejection() {
        let sink = Arc::new(MemorySink::new());
        let workbench = workbench(&sink);

        let result = workbench.select_path(Path::new("/no/such/scan.pdf"));
        assert!(matches!(result, Err(WorkbenchError::Intake(_))));
        assert!(workbench.current_artifact().is_none());
        assert!(matches!(
            sink.instructions().as_slice(),
            [RenderInstruction::IntakeRejected { .. }]
        ));
    }

    #[tokio::test]
    async fn test_select_view_before_any_report() {
        let sink = Arc::new(MemorySink::new());
        let workbench = workbench(&sink);

        assert_eq!(workbench.select("patient").unwrap(), ViewName::Patient);
        assert_eq!(workbench.active_view(), ViewName::Patient);
        assert!(matches!(
            workbench.select("summary"),
            Err(WorkbenchError::View(_))
        ));
        assert_eq!(workbench.active_view(), ViewName::Patient);
    }
}
