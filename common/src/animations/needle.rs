//! Gauge needle motion.
//!
//! `GaugeReading` holds the logical value, clamped on every write. The
//! `NeedleAnimator` keeps a *shadow* value that chases it in fixed steps and
//! is the only value the gauge paints.
//!
//! ```text
//!            set_target             last frame
//!   Idle ─────────────────► Animating ─────────► Idle
//!                              │  ▲
//!                              └──┘ set_target: restart from the in-flight shadow
//! ```
//!
//! Unlike digit flips, a retarget does not snap back to a baseline. The new
//! run starts wherever the needle currently is, so it never jumps.

use log::{debug, warn};

use super::{AnimationDriver, AnimationTarget, Segment, Timing};
use crate::config::{FRAME_INTERVAL_MS, NEEDLE_DURATION_MS};

// =============================================================================
// Reading
// =============================================================================

/// Logical gauge value with its range. `value` always lies within `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeReading {
    value: f32,
    min: f32,
    max: f32,
}

impl GaugeReading {
    pub fn new(
        value: f32,
        min: f32,
        max: f32,
    ) -> Self {
        let mut reading = Self { value: min, min, max };
        reading.set_value(value);
        reading
    }

    #[inline]
    pub const fn value(&self) -> f32 { self.value }

    #[inline]
    pub const fn min(&self) -> f32 { self.min }

    #[inline]
    pub const fn max(&self) -> f32 { self.max }

    /// Clamp a value into the range. A reversed or degenerate range collapses to `min`.
    pub fn clamp(
        &self,
        value: f32,
    ) -> f32 {
        // max/min instead of f32::clamp, which panics when min > max
        value.min(self.max).max(self.min)
    }

    /// Store `value` clamped. Returns the stored value.
    pub fn set_value(
        &mut self,
        value: f32,
    ) -> f32 {
        self.value = self.clamp(value);
        self.value
    }

    /// Change the range and re-clamp the current value.
    pub fn set_range(
        &mut self,
        min: f32,
        max: f32,
    ) {
        self.min = min;
        self.max = max;
        self.value = self.clamp(self.value);
    }
}

// =============================================================================
// Animator
// =============================================================================

/// Needle output channel. There is only one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeedleChannel;

/// Needle lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeedleState {
    Idle,
    Animating,
}

/// Displayed needle position, written by the driver.
#[derive(Debug, Clone, Copy)]
struct Shadow {
    value: f32,
}

impl AnimationTarget<NeedleChannel> for Shadow {
    fn on_sample(
        &mut self,
        _channel: NeedleChannel,
        value: f32,
        _u: f32,
    ) {
        self.value = value;
    }

    /// The needle keeps its in-flight position when cancelled.
    fn restore_baseline(&mut self) {}

    fn on_complete(
        &mut self,
        _cancelled: bool,
    ) {
    }
}

/// Fixed-step interpolator from the shadow value toward a target.
#[derive(Debug, Clone)]
pub struct NeedleAnimator {
    shadow: Shadow,
    from: f32,
    to: f32,
    duration_ms: u32,
    frame_interval_ms: u32,
    driver: AnimationDriver<NeedleChannel, 1>,
}

impl NeedleAnimator {
    /// Needle at rest on `initial`, with the default 200 ms / 16 ms timing.
    pub const fn new(initial: f32) -> Self {
        Self {
            shadow: Shadow { value: initial },
            from: initial,
            to: initial,
            duration_ms: NEEDLE_DURATION_MS,
            frame_interval_ms: FRAME_INTERVAL_MS,
            driver: AnimationDriver::new(),
        }
    }

    /// Override the run timing for subsequent targets.
    pub fn set_timing(
        &mut self,
        duration_ms: u32,
        frame_interval_ms: u32,
    ) {
        self.duration_ms = duration_ms;
        self.frame_interval_ms = frame_interval_ms.max(1);
    }

    /// The value to paint.
    #[inline]
    pub const fn shadow_value(&self) -> f32 { self.shadow.value }

    /// Start value of the current (or last) run.
    #[inline]
    pub const fn from_value(&self) -> f32 { self.from }

    /// Target of the current (or last) run.
    #[inline]
    pub const fn target(&self) -> f32 { self.to }

    pub const fn state(&self) -> NeedleState {
        if self.driver.is_running() { NeedleState::Animating } else { NeedleState::Idle }
    }

    /// Number of frames one run takes.
    pub const fn frame_count(&self) -> u32 {
        let frames = self.duration_ms / self.frame_interval_ms;
        if frames == 0 { 1 } else { frames }
    }

    /// Per-frame increment of the current run.
    pub fn step(&self) -> f32 { (self.to - self.from) / self.frame_count() as f32 }

    /// Move toward an already clamped `target`.
    ///
    /// A run in progress is cancelled and the new run starts from the
    /// in-flight shadow value. Retargeting to where the needle already
    /// rests does nothing.
    pub fn set_target(
        &mut self,
        target: f32,
        now_ms: u64,
    ) {
        if !self.driver.is_running() && self.shadow.value == target {
            return;
        }

        let from = self.shadow.value;
        if self.driver.is_running() {
            debug!("needle retarget {:.2} -> {:.2} from in-flight {:.2}", self.to, target, from);
        }

        self.from = from;
        self.to = target;
        let segment = [Segment::new(NeedleChannel, 0.0, 1.0, from, target)];
        let timing = Timing::FixedStep { frame_interval_ms: self.frame_interval_ms };

        // A single full-range segment always validates and fits.
        if let Err(err) = self.driver.start(now_ms, self.duration_ms, timing, &segment, &mut self.shadow) {
            warn!("needle animation rejected: {err}");
            self.shadow.value = target;
        }
    }

    /// Stop where the needle is. The shadow value is left in flight.
    pub fn cancel(&mut self) -> bool { self.driver.cancel(&mut self.shadow) }

    /// Advance the needle. Returns `true` if it moved (repaint needed).
    pub fn tick(
        &mut self,
        now_ms: u64,
    ) -> bool {
        self.driver.tick(now_ms, &mut self.shadow)
    }
}
