use mdc_protocol::*;
use serde_json;
use serde_yaml;

#[test]
fn test_workflow_deserialization_from_yaml() {
    let yaml_str = r#"
name: test-workflow
report-delay-ms: 250
stages:
  - name: "PaddleOCR-VL"
    icon: "📄"
    task: "Extracting text from document..."
    duration-ms: 800
    completion-label: "Text extracted successfully (96% confidence)"
    section: "Stage 1: OCR Processing"
  - name: "Cardiology Agent"
    task: "Analyzing cardiovascular indicators..."
    target-percent: 80
    duration-ms: 1000
"#;

    let workflow: Workflow =
        serde_yaml::from_str(yaml_str).expect("Failed to deserialize Workflow");

    assert_eq!(workflow.name, "test-workflow");
    assert_eq!(workflow.report_delay_ms, 250);
    assert_eq!(workflow.stages.len(), 2);

    let ocr = &workflow.stages[0];
    assert_eq!(ocr.icon, "📄");
    assert_eq!(ocr.target_percent, 100.0, "target should default to 100");
    assert_eq!(ocr.duration_ms, 800);
    assert_eq!(ocr.section.as_deref(), Some("Stage 1: OCR Processing"));

    let cardio = &workflow.stages[1];
    assert_eq!(cardio.target_percent, 80.0);
    assert_eq!(cardio.completion_label, "Complete");
    assert!(cardio.section.is_none());
    assert!(cardio.icon.is_empty());
}

#[test]
fn test_workflow_report_delay_defaults() {
    let yaml_str = r#"
name: minimal
stages: []
"#;
    let workflow: Workflow = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
    assert_eq!(workflow.report_delay_ms, 500);
}

#[test]
fn test_negative_duration_survives_parsing() {
    // Validation is the core's job; parsing must keep the value intact.
    let yaml_str = r#"
name: broken
stages:
  - name: "OCR"
    task: "Reading"
    duration-ms: -5
"#;
    let workflow: Workflow = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
    assert_eq!(workflow.stages[0].duration_ms, -5);
}

#[test]
fn test_stage_status_serialization() {
    let json = serde_json::to_value(StageStatus::Active).expect("Failed to serialize StageStatus");
    assert_eq!(json, "ACTIVE");

    let deserialized: StageStatus =
        serde_json::from_value(json).expect("Failed to deserialize StageStatus");
    assert_eq!(deserialized, StageStatus::Active);
    assert_eq!(StageStatus::default(), StageStatus::Pending);
}

#[test]
fn test_global_config_defaults_from_empty_toml() {
    let config: GlobalConfig = serde_json::from_str("{}").expect("Failed to deserialize");

    assert_eq!(config, GlobalConfig::default());
    assert_eq!(config.default_view, ViewName::Professional);
    assert_eq!(config.frame_interval_ms, 16);
    assert_eq!(config.workflow, DEFAULT_WORKFLOW);
    assert!(config.allowed_mime_types.contains(&"application/pdf".to_string()));
    assert!(!config.allowed_mime_types.contains(&"text/plain".to_string()));
}

#[test]
fn test_command_enum_serialization() {
    use std::path::PathBuf;

    let command = Command::SelectFile {
        path: PathBuf::from("scan.pdf"),
    };

    let json = serde_json::to_value(&command).expect("Failed to serialize Command");
    assert_eq!(json["type"], "selectFile");
    assert!(json["payload"].is_object());

    let deserialized: Command = serde_json::from_value(json).expect("Failed to deserialize Command");
    match deserialized {
        Command::SelectFile { path } => assert_eq!(path, PathBuf::from("scan.pdf")),
        _ => panic!("Wrong variant"),
    }

    let json = serde_json::to_value(&Command::Submit).expect("Failed to serialize Command::Submit");
    assert_eq!(json["type"], "submit");
}

#[test]
fn test_render_instruction_serialization() {
    use uuid::Uuid;

    let run_id = Uuid::new_v4();
    let progress = RenderInstruction::StageProgress {
        run_id,
        stage_index: 2,
        percent: 42.5,
    };

    let json = serde_json::to_value(&progress).expect("Failed to serialize RenderInstruction");
    assert_eq!(json["type"], "stageProgress");
    assert_eq!(json["payload"]["stage_index"], 2);
    assert_eq!(json["payload"]["percent"], 42.5);
    assert_eq!(progress.run_id(), Some(run_id));

    let view_changed = RenderInstruction::ViewChanged {
        view: ViewName::Patient,
    };
    let json = serde_json::to_value(&view_changed).expect("Failed to serialize RenderInstruction");
    assert_eq!(json["type"], "viewChanged");
    assert_eq!(json["payload"]["view"], "patient");
    assert_eq!(view_changed.run_id(), None);
}

#[test]
fn test_report_payload_document_lookup() {
    let payload = ReportPayload {
        headline: "Analysis Complete".to_string(),
        stats: vec![ReportStat {
            value: "96%".to_string(),
            label: "OCR Confidence".to_string(),
        }],
        views: vec![ReportDocument {
            view: ViewName::Patient,
            title: "Your Health Report".to_string(),
            body: "What We Found".to_string(),
        }],
    };

    assert_eq!(
        payload.document(ViewName::Patient).map(|doc| doc.title.as_str()),
        Some("Your Health Report")
    );
    assert!(payload.document(ViewName::Professional).is_none());
}
