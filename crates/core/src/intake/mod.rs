//! Intake gate.
//!
//! Validates a selected file's MIME type against an allow-list before the
//! sequencer's trigger is enabled. Rejections leave previously accepted
//! state untouched.

use crate::render::RenderSink;
use mdc_protocol::artifact_models::InputArtifact;
use mdc_protocol::ipc::RenderInstruction;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// User-facing message shown when a file is rejected.
pub const REJECTION_MESSAGE: &str = "Please upload a PDF or image file";

#[derive(Error, Debug)]
pub enum IntakeError {
    /// The file's MIME type is not on the allow-list.
    #[error("Unsupported file type '{mime_type}' for {display_name}")]
    UnsupportedArtifactType {
        display_name: String,
        mime_type: String,
    },

    /// The file could not be inspected.
    #[error("Failed to read file metadata at {path}: {source}")]
    Metadata {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Guess a MIME type from a file extension.
///
/// Only the document types the intake cares about are distinguished; other
/// extensions map to generic types.
pub fn guess_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("txt") | Some("md") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Describe a file on disk as an input artifact.
///
/// Only metadata is read; the file's contents are never opened.
pub fn artifact_from_path(path: &Path) -> Result<InputArtifact, IntakeError> {
    let metadata = std::fs::metadata(path).map_err(|source| IntakeError::Metadata {
        path: path.to_path_buf(),
        source,
    })?;
    let display_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    Ok(InputArtifact::new(
        display_name,
        guess_mime_type(path),
        metadata.len(),
    ))
}

/// Accepts or rejects input artifacts.
#[derive(Debug, Clone)]
pub struct IntakeGate {
    allowed_mime_types: Vec<String>,
    current: Option<InputArtifact>,
}

impl IntakeGate {
    pub fn new(allowed_mime_types: Vec<String>) -> Self {
        Self {
            allowed_mime_types,
            current: None,
        }
    }

    pub fn allowed_mime_types(&self) -> &[String] {
        &self.allowed_mime_types
    }

    pub fn is_allowed(&self, mime_type: &str) -> bool {
        self.allowed_mime_types.iter().any(|allowed| allowed == mime_type)
    }

    /// The most recently accepted artifact.
    pub fn current(&self) -> Option<&InputArtifact> {
        self.current.as_ref()
    }

    /// Validate and store an artifact.
    ///
    /// On acceptance the file summary is rendered. On rejection the
    /// user-facing message is rendered and any previously accepted artifact
    /// is kept.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::UnsupportedArtifactType`] if the MIME type is
    /// not allowed.
    pub fn accept(
        &mut self,
        artifact: InputArtifact,
        sink: &dyn RenderSink,
    ) -> Result<&InputArtifact, IntakeError> {
        if !self.is_allowed(&artifact.mime_type) {
            warn!(
                file = %artifact.display_name,
                mime_type = %artifact.mime_type,
                "rejected input file"
            );
            sink.emit(RenderInstruction::IntakeRejected {
                message: REJECTION_MESSAGE.to_string(),
            });
            return Err(IntakeError::UnsupportedArtifactType {
                display_name: artifact.display_name,
                mime_type: artifact.mime_type,
            });
        }

        info!(
            file = %artifact.display_name,
            size = %artifact.size_label(),
            "accepted input file"
        );
        sink.emit(RenderInstruction::ArtifactAccepted {
            artifact: artifact.clone(),
        });
        Ok(self.current.insert(artifact))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MemorySink;
    use mdc_protocol::config_models::GlobalConfig;

    fn gate() -> IntakeGate {
        IntakeGate::new(GlobalConfig::default().allowed_mime_types)
    }

    #[test]
    fn test_accepts_allowed_types() {
        let sink = MemorySink::new();
        let mut gate = gate();

        for mime in ["application/pdf", "image/jpeg", "image/jpg", "image/png"] {
            let artifact = InputArtifact::new("scan", mime, 1024);
            assert!(gate.accept(artifact, &sink).is_ok(), "{mime} should be accepted");
        }
        assert_eq!(gate.current().map(|a| a.mime_type.as_str()), Some("image/png"));
    }

    #[test]
    fn test_rejects_plain_text_without_mutation() {
        let sink = MemorySink::new();
        let mut gate = gate();

        gate.accept(InputArtifact::new("scan.pdf", "application/pdf", 10), &sink)
            .unwrap();
        let result = gate.accept(InputArtifact::new("notes.txt", "text/plain", 10), &sink);

        assert!(matches!(
            result,
            Err(IntakeError::UnsupportedArtifactType { ref mime_type, .. }) if mime_type == "text/plain"
        ));
        assert_eq!(
            gate.current().map(|a| a.display_name.as_str()),
            Some("scan.pdf")
        );
        assert!(matches!(
            sink.instructions().last(),
            Some(RenderInstruction::IntakeRejected { message }) if message == REJECTION_MESSAGE
        ));
    }

    #[test]
    fn test_guess_mime_type() {
        assert_eq!(guess_mime_type(Path::new("a.PDF")), "application/pdf");
        assert_eq!(guess_mime_type(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(guess_mime_type(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(guess_mime_type(Path::new("a.png")), "image/png");
        assert_eq!(guess_mime_type(Path::new("a.txt")), "text/plain");
        assert_eq!(guess_mime_type(Path::new("a")), "application/octet-stream");
    }

    #[test]
    fn test_artifact_from_path_reads_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        std::fs::write(&path, vec![0u8; 2048]).unwrap();

        let artifact = artifact_from_path(&path).unwrap();
        assert_eq!(artifact.display_name, "report.pdf");
        assert_eq!(artifact.mime_type, "application/pdf");
        assert_eq!(artifact.size_bytes, 2048);
    }

    #[test]
    fn test_artifact_from_missing_path() {
        let result = artifact_from_path(Path::new("/definitely/not/here.pdf"));
        assert!(matches!(result, Err(IntakeError::Metadata { .. })));
    }
}
