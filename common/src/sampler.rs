//! Periodic wall-clock sampling with boundary detection.
//!
//! The host owns the only real timer: its frame loop. A `TimeSampler` turns
//! that loop into a repeating tick at its own cadence (50 ms for the analog
//! clock, 500 ms for the pixel clock) by comparing the host's monotonic
//! `now_ms` against the next due time.
//!
//! # Tick Contract
//!
//! On each due tick the sampler:
//! 1. reads the wall clock exactly once,
//! 2. compares the new `ClockSample` field by field against the previous one,
//! 3. notifies the observer of second, then minute, then hour boundaries,
//! 4. requests a repaint.
//!
//! Ticks cannot overlap: `poll` takes `&mut self` and runs to completion. A
//! tick delivered late schedules the next one a full interval after it, so a
//! stalled host never causes a burst of catch-up ticks.

use log::{debug, trace};

use crate::render::RepaintRequest;

// =============================================================================
// Clock Samples
// =============================================================================

/// Immutable snapshot of the time of day, taken once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockSample {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millisecond: u16,
}

impl ClockSample {
    pub const fn new(
        hour: u8,
        minute: u8,
        second: u8,
        millisecond: u16,
    ) -> Self {
        Self { hour, minute, second, millisecond }
    }

    /// Build a sample from milliseconds since midnight. Values past one day wrap.
    pub const fn from_millis_of_day(ms: u64) -> Self {
        let ms = ms % 86_400_000;
        Self {
            hour: (ms / 3_600_000) as u8,
            minute: (ms / 60_000 % 60) as u8,
            second: (ms / 1000 % 60) as u8,
            millisecond: (ms % 1000) as u16,
        }
    }

    /// Which fields changed since `previous`.
    ///
    /// Inequality, not magnitude: 59 → 0 is a crossing like any other.
    pub const fn boundaries_since(
        &self,
        previous: &Self,
    ) -> Boundaries {
        Boundaries {
            second: self.second != previous.second,
            minute: self.minute != previous.minute,
            hour: self.hour != previous.hour,
        }
    }
}

/// Boundary crossings detected on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Boundaries {
    pub second: bool,
    pub minute: bool,
    pub hour: bool,
}

impl Boundaries {
    #[inline]
    pub const fn any(&self) -> bool { self.second || self.minute || self.hour }
}

// =============================================================================
// Host Collaborators
// =============================================================================

/// Source of the current time of day.
pub trait WallClock {
    fn sample(&self) -> ClockSample;
}

impl<F: Fn() -> ClockSample> WallClock for F {
    fn sample(&self) -> ClockSample { self() }
}

/// Boundary notifications. All methods default to no-ops.
///
/// Called with the new sample, after it has become the widget's current time.
pub trait ClockObserver {
    fn on_second_passed(
        &mut self,
        _sample: &ClockSample,
    ) {
    }

    fn on_minute_passed(
        &mut self,
        _sample: &ClockSample,
    ) {
    }

    fn on_hour_passed(
        &mut self,
        _sample: &ClockSample,
    ) {
    }
}

/// Observer that ignores every boundary.
impl ClockObserver for () {}

// =============================================================================
// Time Sampler
// =============================================================================

/// Repeating tick source driven by the host's monotonic clock.
#[derive(Debug, Clone)]
pub struct TimeSampler {
    interval_ms: u32,

    /// Monotonic time of the next tick, `None` while stopped.
    next_due_ms: Option<u64>,

    /// Last captured sample. Boundaries are computed against it.
    current: ClockSample,
}

impl TimeSampler {
    /// Create a stopped sampler with the given cadence.
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: if interval_ms == 0 { 1 } else { interval_ms },
            next_due_ms: None,
            current: ClockSample::new(0, 0, 0, 0),
        }
    }

    /// Start ticking. Captures a baseline sample so the first tick only reports real crossings.
    ///
    /// Restarting a running sampler re-baselines it.
    pub fn start(
        &mut self,
        now_ms: u64,
        clock: &impl WallClock,
    ) {
        self.current = clock.sample();
        self.next_due_ms = Some(now_ms + u64::from(self.interval_ms));
        debug!("time sampler started: interval {} ms at {:?}", self.interval_ms, self.current);
    }

    /// Stop ticking. Idempotent.
    pub fn stop(&mut self) {
        if self.next_due_ms.take().is_some() {
            debug!("time sampler stopped");
        }
    }

    #[inline]
    pub const fn is_running(&self) -> bool { self.next_due_ms.is_some() }

    #[inline]
    pub const fn interval_ms(&self) -> u32 { self.interval_ms }

    /// Change the cadence. Takes effect from the next scheduled tick.
    pub fn set_interval(
        &mut self,
        interval_ms: u32,
    ) {
        self.interval_ms = interval_ms.max(1);
    }

    /// The sample captured on the most recent tick (or at `start`).
    #[inline]
    pub const fn current(&self) -> ClockSample { self.current }

    /// Deliver a tick if one is due.
    ///
    /// Returns the detected boundaries when a tick ran, `None` when the
    /// sampler is stopped or the next tick is not due yet.
    pub fn poll(
        &mut self,
        now_ms: u64,
        clock: &impl WallClock,
        observer: &mut impl ClockObserver,
        repaint: &mut RepaintRequest,
    ) -> Option<Boundaries> {
        let due = self.next_due_ms?;
        if now_ms < due {
            return None;
        }

        let sample = clock.sample();
        let boundaries = sample.boundaries_since(&self.current);
        self.current = sample;

        if boundaries.second {
            trace!("second boundary at {sample:?}");
            observer.on_second_passed(&sample);
        }
        if boundaries.minute {
            trace!("minute boundary at {sample:?}");
            observer.on_minute_passed(&sample);
        }
        if boundaries.hour {
            trace!("hour boundary at {sample:?}");
            observer.on_hour_passed(&sample);
        }

        repaint.request();
        self.next_due_ms = Some(now_ms + u64::from(self.interval_ms));
        Some(boundaries)
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;

    /// Wall clock a test can move by hand.
    struct ManualClock {
        now: Cell<ClockSample>,
    }

    impl ManualClock {
        fn new(sample: ClockSample) -> Self { Self { now: Cell::new(sample) } }

        fn set(
            &self,
            sample: ClockSample,
        ) {
            self.now.set(sample);
        }
    }

    impl WallClock for ManualClock {
        fn sample(&self) -> ClockSample { self.now.get() }
    }

    /// Records boundary events in arrival order.
    #[derive(Default)]
    struct Recorder {
        events: Vec<&'static str>,
    }

    impl ClockObserver for Recorder {
        fn on_second_passed(
            &mut self,
            _sample: &ClockSample,
        ) {
            self.events.push("second");
        }

        fn on_minute_passed(
            &mut self,
            _sample: &ClockSample,
        ) {
            self.events.push("minute");
        }

        fn on_hour_passed(
            &mut self,
            _sample: &ClockSample,
        ) {
            self.events.push("hour");
        }
    }

    #[test]
    fn test_midnight_rollover_fires_all_boundaries_in_order() {
        let clock = ManualClock::new(ClockSample::new(23, 59, 59, 950));
        let mut sampler = TimeSampler::new(50);
        let mut recorder = Recorder::default();
        let mut repaint = RepaintRequest::new();
        repaint.take();

        sampler.start(0, &clock);
        clock.set(ClockSample::new(0, 0, 0, 0));

        let boundaries = sampler.poll(50, &clock, &mut recorder, &mut repaint);

        assert_eq!(boundaries, Some(Boundaries { second: true, minute: true, hour: true }));
        assert_eq!(recorder.events, ["second", "minute", "hour"], "Fixed second-minute-hour order");
        assert!(repaint.take(), "Tick must request a repaint");
    }

    #[test]
    fn test_no_boundary_within_same_second() {
        let clock = ManualClock::new(ClockSample::new(8, 15, 30, 100));
        let mut sampler = TimeSampler::new(50);
        let mut recorder = Recorder::default();
        let mut repaint = RepaintRequest::new();
        repaint.take();

        sampler.start(0, &clock);
        clock.set(ClockSample::new(8, 15, 30, 150));
        let boundaries = sampler.poll(50, &clock, &mut recorder, &mut repaint);

        assert_eq!(boundaries, Some(Boundaries::default()));
        assert!(recorder.events.is_empty());
        assert!(repaint.is_pending(), "Analog clock repaints every tick even without a boundary");
    }

    #[test]
    fn test_poll_respects_cadence() {
        let clock = ManualClock::new(ClockSample::new(1, 2, 3, 0));
        let mut sampler = TimeSampler::new(500);
        let mut repaint = RepaintRequest::new();

        assert_eq!(sampler.poll(1000, &clock, &mut (), &mut repaint), None, "Stopped sampler never ticks");

        sampler.start(1000, &clock);
        assert_eq!(sampler.poll(1499, &clock, &mut (), &mut repaint), None, "Not due yet");
        assert!(sampler.poll(1500, &clock, &mut (), &mut repaint).is_some(), "Due at start + interval");
        assert_eq!(sampler.poll(1600, &clock, &mut (), &mut repaint), None);
    }

    #[test]
    fn test_late_tick_does_not_burst() {
        let clock = ManualClock::new(ClockSample::new(1, 2, 3, 0));
        let mut sampler = TimeSampler::new(50);
        let mut repaint = RepaintRequest::new();

        sampler.start(0, &clock);
        assert!(sampler.poll(400, &clock, &mut (), &mut repaint).is_some(), "Late tick delivered");
        assert_eq!(sampler.poll(401, &clock, &mut (), &mut repaint), None, "No catch-up ticks");
        assert!(sampler.poll(450, &clock, &mut (), &mut repaint).is_some());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let clock = ManualClock::new(ClockSample::default());
        let mut sampler = TimeSampler::new(50);
        let mut repaint = RepaintRequest::new();

        sampler.start(0, &clock);
        sampler.stop();
        sampler.stop();
        assert!(!sampler.is_running());
        assert_eq!(sampler.poll(1000, &clock, &mut (), &mut repaint), None);
    }

    #[test]
    fn test_closure_wall_clock() {
        let clock = || ClockSample::new(12, 34, 56, 0);
        let mut sampler = TimeSampler::new(50);
        sampler.start(0, &clock);
        assert_eq!(sampler.current(), ClockSample::new(12, 34, 56, 0));
    }

    #[test]
    fn test_sample_from_millis_of_day() {
        let sample = ClockSample::from_millis_of_day(((13 * 60 + 7) * 60 + 9) * 1000 + 250);
        assert_eq!(sample, ClockSample::new(13, 7, 9, 250));
        assert_eq!(ClockSample::from_millis_of_day(86_400_000), ClockSample::default(), "Wraps at midnight");
    }
}
