//! Exclusive report view selection.
//!
//! The `ViewSwitcher` keeps exactly one view of a fixed set visible. It is
//! created once and survives across report renders, so selection wiring is
//! never re-established per run.

use crate::render::RenderSink;
use mdc_protocol::ipc::RenderInstruction;
use mdc_protocol::view_models::ViewName;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// The requested view is not part of the configured set.
    #[error("Unknown view: {0}")]
    UnknownView(String),

    /// The switcher was configured without any views.
    #[error("At least one view must be configured")]
    NoViews,

    /// The default view is not part of the configured set.
    #[error("Default view '{0}' is not among the configured views")]
    DefaultNotConfigured(ViewName),
}

/// Tracks which single view is visible.
#[derive(Debug, Clone)]
pub struct ViewSwitcher {
    views: Vec<ViewName>,
    active: ViewName,
}

impl ViewSwitcher {
    /// Create a switcher over `views` with `default` initially visible.
    pub fn new(views: Vec<ViewName>, default: ViewName) -> Result<Self, ViewError> {
        if views.is_empty() {
            return Err(ViewError::NoViews);
        }
        if !views.contains(&default) {
            return Err(ViewError::DefaultNotConfigured(default));
        }
        let mut unique = Vec::with_capacity(views.len());
        for view in views {
            if !unique.contains(&view) {
                unique.push(view);
            }
        }
        Ok(Self {
            views: unique,
            active: default,
        })
    }

    /// Switcher over every known view.
    pub fn with_default(default: ViewName) -> Self {
        Self {
            views: ViewName::ALL.to_vec(),
            active: default,
        }
    }

    pub fn views(&self) -> &[ViewName] {
        &self.views
    }

    pub fn active(&self) -> ViewName {
        self.active
    }

    pub fn is_visible(&self, view: ViewName) -> bool {
        self.active == view
    }

    /// Visibility of every configured view, in order.
    pub fn visibility(&self) -> Vec<(ViewName, bool)> {
        self.views
            .iter()
            .map(|view| (*view, self.is_visible(*view)))
            .collect()
    }

    /// Select a view by name.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::UnknownView`] for names outside the configured
    /// set; the visible view is left unchanged.
    pub fn select(&mut self, name: &str, sink: &dyn RenderSink) -> Result<ViewName, ViewError> {
        let view: ViewName = name
            .parse()
            .map_err(|_| ViewError::UnknownView(name.to_string()))?;
        self.select_view(view, sink)?;
        Ok(view)
    }

    /// Make `view` the only visible view.
    ///
    /// Selecting the already active view is a no-op and renders nothing.
    /// Returns whether the visible view changed.
    pub fn select_view(&mut self, view: ViewName, sink: &dyn RenderSink) -> Result<bool, ViewError> {
        if !self.views.contains(&view) {
            return Err(ViewError::UnknownView(view.to_string()));
        }
        if self.active == view {
            return Ok(false);
        }
        debug!(from = %self.active, to = %view, "view switched");
        self.active = view;
        sink.emit(RenderInstruction::ViewChanged { view });
        Ok(true)
    }
}
