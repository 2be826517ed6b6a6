//! Validated stage descriptors.
//!
//! A `StageDescriptor` is the immutable, checked form of a `StageSpec`. All
//! range checks happen here, at configuration time, so that a run never
//! discovers a bad stage halfway through.

use mdc_protocol::stage_models::{StageSpec, Workflow};
use std::time::Duration;
use thiserror::Error;

/// A stage entry that cannot be run.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid stage configuration for '{stage}': {reason}")]
pub struct StageConfigError {
    /// Name (or position, if unnamed) of the offending stage.
    pub stage: String,
    pub reason: String,
}

/// Check that a progress target is a finite percentage.
pub(crate) fn validate_target(target: f64) -> Result<(), String> {
    if !target.is_finite() {
        return Err(format!("target percent must be finite, got {target}"));
    }
    if !(0.0..=100.0).contains(&target) {
        return Err(format!("target percent must be within 0..=100, got {target}"));
    }
    Ok(())
}

/// Immutable description of one stage.
#[derive(Debug, Clone, PartialEq)]
pub struct StageDescriptor {
    name: String,
    icon: String,
    task_label: String,
    completion_label: String,
    section: Option<String>,
    target_percent: f64,
    duration: Duration,
}

impl StageDescriptor {
    /// Build a descriptor, rejecting empty names, non-positive durations and
    /// targets outside `0..=100`.
    pub fn new(
        name: impl Into<String>,
        icon: impl Into<String>,
        task_label: impl Into<String>,
        target_percent: f64,
        duration_ms: i64,
    ) -> Result<Self, StageConfigError> {
        let name = name.into();
        let invalid = |reason: String| StageConfigError {
            stage: name.clone(),
            reason,
        };

        if name.trim().is_empty() {
            return Err(invalid("stage name must not be empty".to_string()));
        }
        validate_target(target_percent).map_err(invalid)?;
        if duration_ms <= 0 {
            return Err(invalid(format!(
                "duration must be positive, got {duration_ms}ms"
            )));
        }

        Ok(Self {
            icon: icon.into(),
            task_label: task_label.into(),
            completion_label: "Complete".to_string(),
            section: None,
            target_percent,
            duration: Duration::from_millis(duration_ms.unsigned_abs()),
            name,
        })
    }

    /// Set the label shown once the stage completes.
    pub fn with_completion_label(mut self, label: impl Into<String>) -> Self {
        self.completion_label = label.into();
        self
    }

    /// Group the stage under a section heading.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn task_label(&self) -> &str {
        &self.task_label
    }

    pub fn completion_label(&self) -> &str {
        &self.completion_label
    }

    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    pub fn target_percent(&self) -> f64 {
        self.target_percent
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl TryFrom<&StageSpec> for StageDescriptor {
    type Error = StageConfigError;

    fn try_from(spec: &StageSpec) -> Result<Self, Self::Error> {
        let descriptor = StageDescriptor::new(
            spec.name.clone(),
            spec.icon.clone(),
            spec.task.clone(),
            spec.target_percent,
            spec.duration_ms,
        )?
        .with_completion_label(spec.completion_label.clone());

        Ok(match &spec.section {
            Some(section) => descriptor.with_section(section.clone()),
            None => descriptor,
        })
    }
}

/// Validate every stage of a workflow, preserving order.
pub fn descriptors_for(workflow: &Workflow) -> Result<Vec<StageDescriptor>, StageConfigError> {
    workflow
        .stages
        .iter()
        .enumerate()
        .map(|(index, spec)| {
            StageDescriptor::try_from(spec).map_err(|mut err| {
                if err.stage.trim().is_empty() {
                    err.stage = format!("#{}", index + 1);
                }
                err
            })
        })
        .collect()
}
