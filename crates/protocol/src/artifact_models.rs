//! Input artifact models.
//!
//! An input artifact is the document the user hands to the intake gate. The
//! core never reads its contents; only the metadata below is consulted.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

/// Metadata of a selected input file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct InputArtifact {
    /// File name shown to the user.
    pub display_name: String,

    /// MIME type used by the intake allow-list (e.g. "application/pdf").
    pub mime_type: String,

    /// File size in bytes.
    pub size_bytes: u64,
}

impl InputArtifact {
    pub fn new(
        display_name: impl Into<String>,
        mime_type: impl Into<String>,
        size_bytes: u64,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            mime_type: mime_type.into(),
            size_bytes,
        }
    }

    /// Size formatted as megabytes with two decimals, e.g. `"1.50 MB"`.
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.size_bytes as f64 / BYTES_PER_MEGABYTE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_label_formats_megabytes() {
        let artifact = InputArtifact::new("scan.pdf", "application/pdf", 1_572_864);
        assert_eq!(artifact.size_label(), "1.50 MB");

        let tiny = InputArtifact::new("note.png", "image/png", 0);
        assert_eq!(tiny.size_label(), "0.00 MB");
    }
}
