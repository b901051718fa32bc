//! Pinwheel rotation
//!
//! The animator runs once per display refresh and turns the latest wind speed
//! into rotation. It never waits on the network: a new reading simply changes
//! the speed it sees on the next frame.

use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Degrees per frame for each km/h of wind
pub const ROTATION_FACTOR: f64 = 0.5;

/// Advance `previous_angle_deg` by one frame at `current_speed_kmh`.
///
/// Negative or non-finite speeds count as calm, so the angle only ever moves
/// forward (modulo 360).
#[must_use]
pub fn advance(current_speed_kmh: f64, previous_angle_deg: f64) -> f64 {
    advance_with_factor(current_speed_kmh, previous_angle_deg, ROTATION_FACTOR)
}

#[must_use]
pub fn advance_with_factor(current_speed_kmh: f64, previous_angle_deg: f64, factor: f64) -> f64 {
    let step = if current_speed_kmh.is_finite() && current_speed_kmh > 0.0 {
        current_speed_kmh * factor
    } else {
        0.0
    };
    (previous_angle_deg + step).rem_euclid(360.0)
}

/// Current pinwheel angle, degrees in `[0, 360)`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationState {
    pub angle_deg: f64,
}

impl RotationState {
    #[must_use]
    pub fn advanced(self, speed_kmh: f64, factor: f64) -> Self {
        Self {
            angle_deg: advance_with_factor(speed_kmh, self.angle_deg, factor),
        }
    }
}

/// The display's refresh driver.
#[async_trait]
pub trait FrameSource: Send + 'static {
    /// Wait for the next refresh. `false` means the display is gone.
    async fn next_frame(&mut self) -> bool;
}

/// Refreshes at a fixed rate; late frames are skipped rather than bunched up.
pub struct IntervalFrames {
    interval: Interval,
}

impl IntervalFrames {
    #[must_use]
    pub fn new(frames_per_second: u32) -> Self {
        let period = Duration::from_secs(1) / frames_per_second.max(1);
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }
}

#[async_trait]
impl FrameSource for IntervalFrames {
    async fn next_frame(&mut self) -> bool {
        self.interval.tick().await;
        true
    }
}

/// Frames pushed in from outside, one message per refresh.
pub struct ChannelFrames {
    rx: mpsc::Receiver<()>,
}

/// A frame source driven by whoever holds the sender.
#[must_use]
pub fn frame_channel(buffer: usize) -> (mpsc::Sender<()>, ChannelFrames) {
    let (tx, rx) = mpsc::channel(buffer.max(1));
    (tx, ChannelFrames { rx })
}

#[async_trait]
impl FrameSource for ChannelFrames {
    async fn next_frame(&mut self) -> bool {
        self.rx.recv().await.is_some()
    }
}

/// Spawns the per-frame rotation loop
#[derive(Debug, Clone, Copy)]
pub struct RotationAnimator {
    rotation_factor: f64,
}

impl Default for RotationAnimator {
    fn default() -> Self {
        Self::new(ROTATION_FACTOR)
    }
}

impl RotationAnimator {
    #[must_use]
    pub fn new(rotation_factor: f64) -> Self {
        Self { rotation_factor }
    }

    /// Start turning from `initial`, reading `speed` once per frame.
    ///
    /// Must be called inside a tokio runtime. The loop ends when the handle is
    /// cancelled or dropped, or when `frames` runs dry.
    pub fn start<F: FrameSource>(
        &self,
        mut frames: F,
        speed: watch::Receiver<f64>,
        initial: RotationState,
    ) -> AnimationHandle {
        let (rotation_tx, rotation_rx) = watch::channel(initial);
        let cancel = CancellationToken::new();
        let factor = self.rotation_factor;

        let token = cancel.clone();
        let task = tokio::spawn(async move {
            let mut state = initial;
            loop {
                let more = tokio::select! {
                    biased;
                    () = token.cancelled() => false,
                    more = frames.next_frame() => more,
                };
                if !more {
                    break;
                }
                let speed_kmh = *speed.borrow();
                state = state.advanced(speed_kmh, factor);
                rotation_tx.send_replace(state);
            }
            debug!("Rotation loop stopped at {:.1}°", state.angle_deg);
        });

        AnimationHandle {
            cancel,
            task: Some(task),
            rotation: rotation_rx,
        }
    }
}

/// Owns a running rotation loop; dropping it stops the loop.
pub struct AnimationHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
    rotation: watch::Receiver<RotationState>,
}

impl AnimationHandle {
    /// Receiver the renderer reads the angle from
    #[must_use]
    pub fn rotation(&self) -> watch::Receiver<RotationState> {
        self.rotation.clone()
    }

    #[must_use]
    pub fn current(&self) -> RotationState {
        *self.rotation.borrow()
    }

    /// Stop scheduling frames. The angle keeps its last value.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Cancel and wait for the loop to finish, returning the final angle.
    pub async fn stop(mut self) -> RotationState {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                debug!("Rotation loop ended abnormally: {}", e);
            }
        }
        *self.rotation.borrow()
    }
}

impl Drop for AnimationHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
