//! Cancellable, phased value animation.
//!
//! An [`AnimationDriver`] runs one interpolation program at a time against
//! the host's monotonic clock. The program is an ordered list of
//! [`Segment`]s, each owning a sub-range `[phase_start, phase_end)` of
//! normalized time and one output channel. On every tick the driver:
//!
//! 1. computes normalized time `t` in [0, 1],
//! 2. finalizes every segment that `t` has moved past (sampled once at `u = 1`),
//! 3. samples the segment containing `t` with its eased local progress `u`,
//! 4. fires `on_complete(false)` once `t` reaches 1.
//!
//! Step 2 is what makes discrete segments reliable: a swap segment that a
//! slow frame jumps over entirely is still sampled at `u = 1`, so its action
//! fires exactly once no matter how coarse the frame timing is.
//!
//! # Timing Modes
//!
//! | Mode | `t` | Used by |
//! |------|-----|---------|
//! | `WallClock` | `elapsed / duration` | digit flips |
//! | `FixedStep` | `frame / (duration / frame_interval)` | gauge needle |
//!
//! Wall-clock runs take the same total time regardless of how often the host
//! ticks; only smoothness changes. Fixed-step runs advance at most one frame
//! per tick, once the next frame boundary is reached.
//!
//! # Cancellation
//!
//! `cancel` is idempotent. The first call on a running animation stops it,
//! asks the target to restore its idle baseline, then reports
//! `on_complete(true)`. Starting a new run while one is active cancels the
//! old run first, so the new run always begins from the restored baseline.

pub mod color;
pub mod needle;

use heapless::Vec;
use log::{debug, trace};

use crate::easing::Easing;
use crate::error::WidgetError;

// =============================================================================
// Segments
// =============================================================================

/// One phase of an animation program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<C> {
    /// Channel the sampled value is delivered to.
    pub channel: C,
    pub phase_start: f32,
    pub phase_end: f32,
    pub from: f32,
    pub to: f32,
    pub easing: Easing,
}

impl<C> Segment<C> {
    /// Linear segment. Chain `with_easing` to change the curve.
    pub const fn new(
        channel: C,
        phase_start: f32,
        phase_end: f32,
        from: f32,
        to: f32,
    ) -> Self {
        Self { channel, phase_start, phase_end, from, to, easing: Easing::Linear }
    }

    #[must_use]
    pub const fn with_easing(
        mut self,
        easing: Easing,
    ) -> Self {
        self.easing = easing;
        self
    }

    /// Interpolated value at local progress `u`. Exactly `to` once `u` reaches 1.
    pub fn value_at(
        &self,
        u: f32,
    ) -> f32 {
        if u >= 1.0 {
            return self.to;
        }
        let eased = self.easing.apply(u);
        self.from + (self.to - self.from) * eased
    }

    /// Local progress of normalized time `t` within this segment, clamped to [0, 1].
    fn local_progress(
        &self,
        t: f32,
    ) -> f32 {
        ((t - self.phase_start) / (self.phase_end - self.phase_start)).clamp(0.0, 1.0)
    }
}

/// Check that phases are ascending, non-overlapping, non-empty and inside [0, 1].
///
/// Gaps between segments are allowed; they are idle periods.
pub fn validate_segments<C>(segments: &[Segment<C>]) -> Result<(), WidgetError> {
    let mut previous_end = 0.0_f32;
    for (index, segment) in segments.iter().enumerate() {
        let ordered = segment.phase_start >= previous_end && segment.phase_start < segment.phase_end;
        if !ordered || segment.phase_end > 1.0 {
            return Err(WidgetError::InvalidPhase { index });
        }
        previous_end = segment.phase_end;
    }
    Ok(())
}

// =============================================================================
// Target
// =============================================================================

/// Receiver of animation output.
///
/// The driver never owns the animated state. It pushes sampled values into
/// the target, which keeps the visual channels the paint routine reads.
pub trait AnimationTarget<C> {
    /// A segment produced `value` at local progress `u`.
    fn on_sample(
        &mut self,
        channel: C,
        value: f32,
        u: f32,
    );

    /// Put every channel back to its idle value. Called on cancel only.
    fn restore_baseline(&mut self);

    /// The run ended. Called exactly once per run.
    fn on_complete(
        &mut self,
        cancelled: bool,
    );
}

// =============================================================================
// Driver
// =============================================================================

/// How normalized time is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    /// `t = elapsed / duration`, measured on the host clock.
    WallClock,
    /// `t = frame / frame_count`, one frame per elapsed `frame_interval_ms`.
    FixedStep { frame_interval_ms: u32 },
}

/// Lifecycle of the current (or last) run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverState {
    #[default]
    Idle,
    Running,
    Completed,
    Cancelled,
}

/// Identifies one run of a driver. Outlives the run; stale handles are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationHandle {
    generation: u32,
}

impl AnimationHandle {
    #[inline]
    pub const fn generation(&self) -> u32 { self.generation }
}

/// Time-driven interpolator for up to `N` segments.
#[derive(Debug, Clone)]
pub struct AnimationDriver<C, const N: usize> {
    segments: Vec<Segment<C>, N>,
    state: DriverState,
    timing: Timing,
    started_ms: u64,
    duration_ms: u32,

    /// Fixed-step bookkeeping.
    frame: u32,
    frame_count: u32,
    next_frame_ms: u64,

    /// First segment not yet finalized at `u = 1`.
    next_segment: usize,

    /// Normalized time of the most recent frame.
    progress: f32,

    /// Incremented on every start.
    generation: u32,
}

impl<C: Copy, const N: usize> AnimationDriver<C, N> {
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
            state: DriverState::Idle,
            timing: Timing::WallClock,
            started_ms: 0,
            duration_ms: 0,
            frame: 0,
            frame_count: 1,
            next_frame_ms: 0,
            next_segment: 0,
            progress: 0.0,
            generation: 0,
        }
    }

    #[inline]
    pub const fn state(&self) -> DriverState { self.state }

    #[inline]
    pub const fn is_running(&self) -> bool { matches!(self.state, DriverState::Running) }

    /// Normalized time of the last sampled frame.
    #[inline]
    pub const fn progress(&self) -> f32 { self.progress }

    #[inline]
    pub const fn duration_ms(&self) -> u32 { self.duration_ms }

    /// Handle of the current run, if one is active.
    pub const fn handle(&self) -> Option<AnimationHandle> {
        if self.is_running() { Some(AnimationHandle { generation: self.generation }) } else { None }
    }

    /// Begin a new run.
    ///
    /// An active run is cancelled first (baseline restored, `on_complete(true)`).
    /// Segments are validated before anything is touched, so a rejected
    /// program leaves the previous run alone.
    pub fn start(
        &mut self,
        now_ms: u64,
        duration_ms: u32,
        timing: Timing,
        segments: &[Segment<C>],
        target: &mut impl AnimationTarget<C>,
    ) -> Result<AnimationHandle, WidgetError> {
        validate_segments(segments)?;
        if segments.len() > N {
            return Err(WidgetError::CapacityExceeded { what: "animation segments", capacity: N });
        }

        if self.cancel(target) {
            debug!("animation restarted before completion, previous run cancelled");
        }

        self.segments.clear();
        // Length checked above.
        self.segments.extend_from_slice(segments).ok();

        self.state = DriverState::Running;
        self.timing = timing;
        self.started_ms = now_ms;
        self.duration_ms = duration_ms;
        self.next_segment = 0;
        self.progress = 0.0;
        self.frame = 0;
        self.generation = self.generation.wrapping_add(1);

        if let Timing::FixedStep { frame_interval_ms } = timing {
            let interval = frame_interval_ms.max(1);
            self.frame_count = (duration_ms / interval).max(1);
            self.next_frame_ms = now_ms + u64::from(interval);
        }

        Ok(AnimationHandle { generation: self.generation })
    }

    /// Advance to `now_ms`. Returns `true` if a frame was sampled.
    pub fn tick(
        &mut self,
        now_ms: u64,
        target: &mut impl AnimationTarget<C>,
    ) -> bool {
        if !self.is_running() {
            return false;
        }

        let t = match self.timing {
            Timing::WallClock => {
                if self.duration_ms == 0 {
                    1.0
                } else {
                    let elapsed = now_ms.saturating_sub(self.started_ms);
                    (elapsed as f32 / self.duration_ms as f32).min(1.0)
                }
            }
            Timing::FixedStep { frame_interval_ms } => {
                if now_ms < self.next_frame_ms {
                    return false;
                }
                self.frame += 1;
                self.next_frame_ms = now_ms + u64::from(frame_interval_ms.max(1));
                if self.frame >= self.frame_count { 1.0 } else { self.frame as f32 / self.frame_count as f32 }
            }
        };

        self.apply(t, target);

        if t >= 1.0 {
            self.state = DriverState::Completed;
            trace!("animation generation {} completed", self.generation);
            target.on_complete(false);
        }
        true
    }

    /// Walk segments in phase order up to `t`.
    fn apply(
        &mut self,
        t: f32,
        target: &mut impl AnimationTarget<C>,
    ) {
        self.progress = t;
        while let Some(segment) = self.segments.get(self.next_segment) {
            if t >= segment.phase_end {
                target.on_sample(segment.channel, segment.to, 1.0);
                self.next_segment += 1;
            } else {
                if t >= segment.phase_start {
                    let u = segment.local_progress(t);
                    target.on_sample(segment.channel, segment.value_at(u), u);
                }
                break;
            }
        }
    }

    /// Stop the current run. Returns `true` if a run was actually cancelled.
    ///
    /// No-op on an idle, completed or already cancelled driver.
    pub fn cancel(
        &mut self,
        target: &mut impl AnimationTarget<C>,
    ) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = DriverState::Cancelled;
        target.restore_baseline();
        target.on_complete(true);
        true
    }

    /// Cancel through a handle. Handles from earlier runs are ignored.
    pub fn cancel_handle(
        &mut self,
        handle: AnimationHandle,
        target: &mut impl AnimationTarget<C>,
    ) -> bool {
        if handle.generation != self.generation {
            trace!("ignoring cancel for stale generation {} (current {})", handle.generation, self.generation);
            return false;
        }
        self.cancel(target)
    }
}

impl<C: Copy, const N: usize> Default for AnimationDriver<C, N> {
    fn default() -> Self { Self::new() }
}
