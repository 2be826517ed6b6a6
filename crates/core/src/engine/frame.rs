//! Frame scheduler.
//!
//! Drives time-based callbacks at roughly display refresh rate. Each
//! scheduled callback runs on its own task and is invoked once per tick
//! until it returns [`FrameControl::Done`] or its handle is cancelled.
//!
//! Ticks come from a tokio interval with [`MissedTickBehavior::Skip`], so a
//! stalled runtime (the terminal equivalent of a backgrounded tab) produces
//! one late tick rather than a burst. Timestamps are monotonic; callers
//! still clamp elapsed time to avoid overshooting their targets.

use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Default frame interval, roughly 60 frames per second.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Returned by a frame callback to request another tick or stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Done,
}

/// How a scheduled callback ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The callback returned `FrameControl::Done`.
    Completed,
    /// The handle was cancelled before the callback finished.
    Cancelled,
}

/// Issues recurring frame callbacks.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    frame_interval: Duration,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL)
    }
}

impl FrameScheduler {
    /// Create a scheduler ticking every `frame_interval`.
    ///
    /// A zero interval is bumped to one millisecond since tokio intervals
    /// cannot be zero.
    pub fn new(frame_interval: Duration) -> Self {
        Self {
            frame_interval: frame_interval.max(Duration::from_millis(1)),
        }
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Invoke `callback` with the frame timestamp on every tick.
    ///
    /// The first tick fires immediately. Must be called from within a tokio
    /// runtime.
    pub fn schedule<F>(&self, mut callback: F) -> FrameHandle
    where
        F: FnMut(Instant) -> FrameControl + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let (done_tx, done_rx) = oneshot::channel();
        let mut ticker = time::interval(self.frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let token = cancel.clone();
        tokio::spawn(async move {
            let outcome = loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break FrameOutcome::Cancelled,
                    now = ticker.tick() => {
                        if callback(now) == FrameControl::Done {
                            break FrameOutcome::Completed;
                        }
                    }
                }
            };
            let _ = done_tx.send(outcome);
        });

        FrameHandle {
            cancel,
            done: done_rx,
            outcome: None,
        }
    }
}

/// Handle to a scheduled frame callback.
///
/// Dropping the handle cancels the callback.
#[derive(Debug)]
pub struct FrameHandle {
    cancel: CancellationToken,
    done: oneshot::Receiver<FrameOutcome>,
    outcome: Option<FrameOutcome>,
}

impl FrameHandle {
    /// Stop invoking the callback. No further ticks are delivered.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Wait for the callback to finish or be cancelled.
    pub async fn finished(&mut self) -> FrameOutcome {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        // The task only drops the sender without sending if it was aborted
        // together with the runtime.
        let outcome = (&mut self.done).await.unwrap_or(FrameOutcome::Cancelled);
        self.outcome = Some(outcome);
        outcome
    }
}

impl Drop for FrameHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
