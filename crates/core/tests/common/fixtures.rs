//! Test fixtures for creating workbenches and sample data.

use async_trait::async_trait;
use mdc_core::config::models::AppConfig;
use mdc_core::render::MemorySink;
use mdc_core::report::{ReportError, ReportProvider, StaticReportProvider};
use mdc_core::state::Workbench;
use mdc_protocol::artifact_models::InputArtifact;
use mdc_protocol::report_models::ReportPayload;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::time::Instant;

/// A 2.5 MB PDF scan.
pub fn pdf_artifact() -> InputArtifact {
    InputArtifact::new("discharge-summary.pdf", "application/pdf", 2_621_440)
}

#[allow(dead_code)]
pub fn text_artifact() -> InputArtifact {
    InputArtifact::new("notes.txt", "text/plain", 512)
}

/// Report provider that records when it was invoked.
#[derive(Default)]
pub struct RecordingProvider {
    inner: StaticReportProvider,
    calls: Mutex<Vec<Instant>>,
}

#[allow(dead_code)]
impl RecordingProvider {
    pub fn calls(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportProvider for RecordingProvider {
    async fn generate_report(&self) -> Result<ReportPayload, ReportError> {
        self.calls.lock().unwrap().push(Instant::now());
        self.inner.generate_report().await
    }
}

/// Workbench over the bundled document-analysis workflow.
#[allow(dead_code)]
pub fn default_workbench(sink: &Arc<MemorySink>) -> Workbench {
    Workbench::from_config(
        &AppConfig::default(),
        Arc::new(StaticReportProvider::new()),
        sink.clone(),
    )
    .expect("bundled workflow is valid")
}

/// Workbench over the bundled workflow with a recording provider.
#[allow(dead_code)]
pub fn recording_workbench(sink: &Arc<MemorySink>) -> (Workbench, Arc<RecordingProvider>) {
    let provider = Arc::new(RecordingProvider::default());
    let workbench = Workbench::from_config(&AppConfig::default(), provider.clone(), sink.clone())
        .expect("bundled workflow is valid");
    (workbench, provider)
}

/// Create a temporary project with a `.medidoc` directory holding a short
/// two-stage workflow selected in `config.toml`.
///
/// Returns a TempDir that must be kept alive for the test duration.
#[allow(dead_code)]
pub fn create_test_project() -> std::io::Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;
    let root = temp_dir.path();

    std::fs::create_dir_all(root.join(".medidoc/workflows"))?;
    std::fs::write(
        root.join(".medidoc/config.toml"),
        "workflow = \"triage\"\ndefault-view = \"patient\"\n",
    )?;

    let workflow_yaml = r#"
name: triage
report-delay-ms: 200
stages:
  - name: OCR
    icon: "📄"
    task: Reading scan...
    duration-ms: 300
    section: Intake
  - name: Triage Agent
    icon: "🩺"
    task: Sorting findings...
    target-percent: 80
    duration-ms: 400
    completion-label: Triage complete
    section: Review
"#;
    std::fs::write(root.join(".medidoc/workflows/triage.yaml"), workflow_yaml)?;

    Ok(temp_dir)
}
