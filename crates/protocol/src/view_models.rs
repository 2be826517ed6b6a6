//! Report view names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

/// One of the mutually exclusive report presentations.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "lowercase")]
pub enum ViewName {
    /// Clinician-facing diagnostic report.
    Professional,

    /// Plain-language report for the patient.
    Patient,
}

impl ViewName {
    /// All known views in tab order.
    pub const ALL: [ViewName; 2] = [ViewName::Professional, ViewName::Patient];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewName::Professional => "professional",
            ViewName::Patient => "patient",
        }
    }

    /// Tab caption used by renderers.
    pub fn caption(self) -> &'static str {
        match self {
            ViewName::Professional => "Professional Report",
            ViewName::Patient => "Patient-Friendly",
        }
    }
}

impl fmt::Display for ViewName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseViewNameError(pub String);

impl fmt::Display for ParseViewNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown view: {}", self.0)
    }
}

impl std::error::Error for ParseViewNameError {}

impl FromStr for ViewName {
    type Err = ParseViewNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "professional" => Ok(ViewName::Professional),
            "patient" => Ok(ViewName::Patient),
            other => Err(ParseViewNameError(other.to_string())),
        }
    }
}
