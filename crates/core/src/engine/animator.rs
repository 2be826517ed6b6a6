//! Stage progress animation.
//!
//! Interpolates a progress value from 0 to a target over a duration, driven
//! by the frame scheduler. Callers see a single future per stage; the
//! frame-by-frame callbacks stay internal.

use crate::engine::descriptor::validate_target;
use crate::engine::frame::{FrameControl, FrameOutcome, FrameScheduler};
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// The target percent is negative, above 100 or not a number.
    #[error("Invalid animation target: {0}")]
    InvalidTarget(String),

    /// The owning run was aborted before the animation finished.
    #[error("Animation cancelled")]
    Cancelled,
}

/// Compute the progress value for a frame.
///
/// `elapsed / duration * target`, clamped to `target`. A zero duration is
/// treated as already finished.
pub fn interpolate(elapsed: Duration, duration: Duration, target: f64) -> f64 {
    if duration.is_zero() || elapsed >= duration {
        return target;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64() * target).min(target)
}

/// Animates stage progress on top of a [`FrameScheduler`].
#[derive(Debug, Clone, Default)]
pub struct StageAnimator {
    scheduler: FrameScheduler,
}

impl StageAnimator {
    pub fn new(scheduler: FrameScheduler) -> Self {
        Self { scheduler }
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// Animate from 0 to `target` over `duration`, calling `on_frame` with
    /// the progress value on every frame.
    ///
    /// The start timestamp is captured on the first frame. The emitted
    /// sequence is non-decreasing and always ends with exactly `target`,
    /// after which the future resolves. With a zero duration the first frame
    /// already emits `target`.
    ///
    /// # Errors
    ///
    /// - [`AnimationError::InvalidTarget`] if `target` is outside `0..=100`;
    ///   nothing is scheduled or emitted.
    /// - [`AnimationError::Cancelled`] if `cancel` fires first; the frame
    ///   callback is stopped and `on_frame` is not called again.
    pub async fn animate<F>(
        &self,
        target: f64,
        duration: Duration,
        cancel: &CancellationToken,
        mut on_frame: F,
    ) -> Result<(), AnimationError>
    where
        F: FnMut(f64) + Send + 'static,
    {
        validate_target(target).map_err(AnimationError::InvalidTarget)?;
        if cancel.is_cancelled() {
            return Err(AnimationError::Cancelled);
        }

        let mut started_at: Option<Instant> = None;
        let mut handle = self.scheduler.schedule(move |now| {
            let t0 = *started_at.get_or_insert(now);
            let elapsed = now.saturating_duration_since(t0);
            let percent = interpolate(elapsed, duration, target);
            on_frame(percent);
            if elapsed >= duration {
                FrameControl::Done
            } else {
                FrameControl::Continue
            }
        });

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                // A callback already running on another worker must finish
                // before the caller is told the animation stopped.
                handle.cancel();
                handle.finished().await;
                Err(AnimationError::Cancelled)
            }
            outcome = handle.finished() => match outcome {
                FrameOutcome::Completed => Ok(()),
                FrameOutcome::Cancelled => Err(AnimationError::Cancelled),
            },
        }
    }
}
