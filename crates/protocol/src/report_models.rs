//! Report payload models.
//!
//! The payload is produced by a report provider once per completed run. Its
//! content is opaque to the orchestration core: it is rendered, never parsed.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::view_models::ViewName;

/// A headline figure shown above the report tabs.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct ReportStat {
    /// Rendered value, e.g. "96%".
    pub value: String,
    /// Caption, e.g. "OCR Confidence".
    pub label: String,
}

/// The content of one report view.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct ReportDocument {
    pub view: ViewName,
    pub title: String,
    /// Opaque body text.
    pub body: String,
}

/// Everything rendered once a run completes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct ReportPayload {
    pub headline: String,
    #[serde(default)]
    pub stats: Vec<ReportStat>,
    pub views: Vec<ReportDocument>,
}

impl ReportPayload {
    /// Look up the document for a view.
    pub fn document(&self, view: ViewName) -> Option<&ReportDocument> {
        self.views.iter().find(|doc| doc.view == view)
    }
}
