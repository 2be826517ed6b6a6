//! Report provider serving a fixed payload from embedded assets.

use crate::assets::get_asset;
use crate::report::{ReportError, ReportProvider};
use async_trait::async_trait;
use mdc_protocol::report_models::{ReportDocument, ReportPayload, ReportStat};
use mdc_protocol::view_models::ViewName;
use serde::Deserialize;

const SUMMARY_PATH: &str = "report/summary.toml";

/// Layout of `report/summary.toml`.
#[derive(Deserialize)]
struct ReportSummary {
    headline: String,
    #[serde(default)]
    stats: Vec<ReportStat>,
    views: Vec<ViewEntry>,
}

#[derive(Deserialize)]
struct ViewEntry {
    view: ViewName,
    title: String,
    /// File name of the body, relative to `report/`.
    body: String,
}

/// Returns the same simulated diagnostic report for every run.
#[derive(Debug, Clone, Default)]
pub struct StaticReportProvider;

impl StaticReportProvider {
    pub fn new() -> Self {
        Self
    }

    fn load(&self) -> Result<ReportPayload, ReportError> {
        let summary_text = get_asset(SUMMARY_PATH)
            .ok_or_else(|| ReportError::AssetNotFound(SUMMARY_PATH.to_string()))?;
        let summary: ReportSummary =
            toml::from_str(&summary_text).map_err(|e| ReportError::Parse {
                path: SUMMARY_PATH.to_string(),
                reason: e.to_string(),
            })?;

        let views = summary
            .views
            .into_iter()
            .map(|entry| {
                let path = format!("report/{}", entry.body);
                let body = get_asset(&path).ok_or(ReportError::AssetNotFound(path))?;
                Ok(ReportDocument {
                    view: entry.view,
                    title: entry.title,
                    body,
                })
            })
            .collect::<Result<Vec<_>, ReportError>>()?;

        Ok(ReportPayload {
            headline: summary.headline,
            stats: summary.stats,
            views,
        })
    }
}

#[async_trait]
impl ReportProvider for StaticReportProvider {
    async fn generate_report(&self) -> Result<ReportPayload, ReportError> {
        self.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_report_has_both_views() {
        let report = StaticReportProvider::new().generate_report().await.unwrap();

        assert_eq!(report.headline, "Analysis Complete");
        assert_eq!(report.stats.len(), 3);
        assert_eq!(report.stats[1].value, "96%");
        assert_eq!(report.stats[1].label, "OCR Confidence");

        let professional = report.document(ViewName::Professional).unwrap();
        assert_eq!(professional.title, "Diagnostic Report");
        assert!(professional.body.contains("Probable CAD"));

        let patient = report.document(ViewName::Patient).unwrap();
        assert_eq!(patient.title, "Your Health Report");
        assert!(patient.body.contains("coronary artery disease"));
    }

    #[tokio::test]
    async fn test_static_report_is_stable() {
        let provider = StaticReportProvider::new();
        let first = provider.generate_report().await.unwrap();
        let second = provider.generate_report().await.unwrap();
        assert_eq!(first, second);
    }
}
