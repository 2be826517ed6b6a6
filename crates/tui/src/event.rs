//! Event handling types for the TUI.

/// Status of a key event after being offered to a widget.
///
/// Widgets that handle keys return this so the app can fall through to the
/// next handler when a key is not theirs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    /// The widget handled the event.
    Consumed,
    /// The event should be passed to the next handler.
    NotConsumed,
}

impl EventStatus {
    pub fn is_consumed(self) -> bool {
        self == EventStatus::Consumed
    }
}
