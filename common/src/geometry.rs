//! Pure geometry: logical values to screen-space points and arc parameters.
//!
//! # Angle Conventions
//!
//! Two references are in play and mixing them up rotates a whole widget by 90°:
//!
//! - **Dial angles** (clock hands, markers, needle): measured clockwise from
//!   12 o'clock. `x = cx + r·sin(θ)`, `y = cy − r·cos(θ)`.
//! - **Screen angles** (`embedded_graphics::primitives::Arc`): measured
//!   clockwise from 3 o'clock, because the y axis points down.
//!
//! `screen_to_dial` converts an arc end back to the dial reference.
//!
//! Trigonometry goes through `micromath` so the crate stays `no_std`; its
//! approximations are accurate to roughly 1e-3, far below one pixel at any
//! widget size this library draws.

use core::f32::consts::PI;

use embedded_graphics::prelude::Point;
use micromath::F32;

use crate::error::WidgetError;
use crate::sampler::ClockSample;

pub use crate::glyphs::digit_glyph_cell;

// =============================================================================
// Points
// =============================================================================

/// Sub-pixel point. Geometry stays in `f32` until the final primitive call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub const fn new(
        x: f32,
        y: f32,
    ) -> Self {
        Self { x, y }
    }

    /// Round to the nearest pixel.
    pub fn to_point(self) -> Point { Point::new(round(self.x), round(self.y)) }
}

impl From<Point> for PointF {
    fn from(p: Point) -> Self { Self::new(p.x as f32, p.y as f32) }
}

#[inline]
fn round(v: f32) -> i32 { F32(v).round().0 as i32 }

#[inline]
fn to_radians(degrees: f32) -> f32 { degrees * PI / 180.0 }

/// Point at `radius` from `center`, `angle_deg` clockwise from 12 o'clock.
///
/// Used identically for clock hands, hour markers and the gauge needle.
pub fn point_on_circle(
    center: PointF,
    radius: f32,
    angle_deg: f32,
) -> PointF {
    let theta = to_radians(angle_deg);
    PointF::new(
        center.x + radius * F32(theta).sin().0,
        center.y - radius * F32(theta).cos().0,
    )
}

// =============================================================================
// Angle Conversions
// =============================================================================

/// Screen angle (clockwise from 3 o'clock) to dial angle (clockwise from 12 o'clock).
#[inline]
pub fn screen_to_dial(screen_deg: f32) -> f32 { screen_deg + 90.0 }

// =============================================================================
// Arcs
// =============================================================================

/// Arc span for `value` within `[min, max]`: `((value − min) / (max − min)) · sweep_deg`.
///
/// Linear in `value` and not clamped; callers clamp the reading first.
/// A range with `max <= min` (or NaN bounds) is degenerate and fails with
/// `InvalidRange`; paint code renders a zero sweep in that case.
pub fn arc_sweep_fraction(
    value: f32,
    min: f32,
    max: f32,
    sweep_deg: f32,
) -> Result<f32, WidgetError> {
    if !(max > min) {
        return Err(WidgetError::InvalidRange { min, max });
    }
    Ok((value - min) / (max - min) * sweep_deg)
}

// =============================================================================
// Clock Angles
// =============================================================================

/// Hour hand dial angle: `(hour % 12 + minute / 60) · 30`.
pub fn hour_angle(sample: &ClockSample) -> f32 {
    ((sample.hour % 12) as f32 + sample.minute as f32 / 60.0) * 30.0
}

/// Minute hand dial angle: `(minute + second / 60) · 6`.
pub fn minute_angle(sample: &ClockSample) -> f32 { (sample.minute as f32 + sample.second as f32 / 60.0) * 6.0 }

/// Second hand dial angle: `(second + millisecond / 1000) · 6`. Sweeps rather than ticks.
pub fn second_angle(sample: &ClockSample) -> f32 {
    (sample.second as f32 + sample.millisecond as f32 / 1000.0) * 6.0
}

/// Dial angle of hour marker `index` (0 = 12 o'clock).
#[inline]
pub fn marker_angle(index: u32) -> f32 { (index % 12) as f32 * 30.0 }

// =============================================================================
// Scaling
// =============================================================================

/// Uniform scale that fits a square design space of `design_size` into `width × height`.
pub fn fit_scale(
    width: u32,
    height: u32,
    design_size: f32,
) -> f32 {
    if design_size <= 0.0 {
        return 0.0;
    }
    width.min(height) as f32 / design_size
}

/// Scale a design-space length to pixels, never below one pixel.
#[inline]
pub fn scaled_px(
    length: f32,
    scale: f32,
) -> u32 {
    round(length * scale).max(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 0.01;

    fn close(
        a: f32,
        b: f32,
    ) -> bool {
        (a - b).abs() < EPS
    }

    // -------------------------------------------------------------------------
    // point_on_circle
    // -------------------------------------------------------------------------

    #[test]
    fn test_point_on_circle_cardinal_directions() {
        let c = PointF::new(100.0, 100.0);

        let top = point_on_circle(c, 50.0, 0.0);
        assert!(close(top.x, 100.0) && close(top.y, 50.0), "0° should be straight up, got {top:?}");

        let right = point_on_circle(c, 50.0, 90.0);
        assert!(close(right.x, 150.0) && close(right.y, 100.0), "90° should be 3 o'clock, got {right:?}");

        let bottom = point_on_circle(c, 50.0, 180.0);
        assert!(close(bottom.x, 100.0) && close(bottom.y, 150.0), "180° should be 6 o'clock, got {bottom:?}");

        let left = point_on_circle(c, 50.0, 270.0);
        assert!(close(left.x, 50.0) && close(left.y, 100.0), "270° should be 9 o'clock, got {left:?}");
    }

    #[test]
    fn test_point_on_circle_zero_radius_is_center() {
        let c = PointF::new(12.0, 34.0);
        let p = point_on_circle(c, 0.0, 123.0);
        assert_eq!(p.to_point(), Point::new(12, 34));
    }

    #[test]
    fn test_screen_to_dial_quarter_turn() {
        assert_eq!(screen_to_dial(135.0), 225.0);
        assert_eq!(screen_to_dial(-90.0), 0.0, "Screen 12 o'clock is dial zero");
    }

    // -------------------------------------------------------------------------
    // arc_sweep_fraction
    // -------------------------------------------------------------------------

    #[test]
    fn test_arc_sweep_endpoints() {
        assert_eq!(arc_sweep_fraction(0.0, 0.0, 100.0, 270.0), Ok(0.0));
        assert_eq!(arc_sweep_fraction(100.0, 0.0, 100.0, 270.0), Ok(270.0));
        assert_eq!(arc_sweep_fraction(-20.0, -20.0, 20.0, 270.0), Ok(0.0));
        assert_eq!(arc_sweep_fraction(20.0, -20.0, 20.0, 270.0), Ok(270.0));
    }

    #[test]
    fn test_arc_sweep_linear_and_monotonic() {
        let (min, max) = (-15.0, 45.0);
        let mut prev = arc_sweep_fraction(min, min, max, 270.0).unwrap();
        for i in 1..=60 {
            let value = min + i as f32;
            let sweep = arc_sweep_fraction(value, min, max, 270.0).unwrap();
            assert!(sweep > prev, "Sweep must grow with value at {value}");
            assert!(close(sweep - prev, 270.0 / 60.0), "Sweep steps must be equal (linear)");
            prev = sweep;
        }
    }

    #[test]
    fn test_arc_sweep_degenerate_range() {
        assert_eq!(
            arc_sweep_fraction(5.0, 5.0, 5.0, 270.0),
            Err(WidgetError::InvalidRange { min: 5.0, max: 5.0 })
        );
        assert!(arc_sweep_fraction(5.0, 10.0, 0.0, 270.0).is_err(), "Reversed range is degenerate too");
        assert!(arc_sweep_fraction(5.0, f32::NAN, 10.0, 270.0).is_err());
    }

    // -------------------------------------------------------------------------
    // Clock angles
    // -------------------------------------------------------------------------

    #[test]
    fn test_clock_angles() {
        let sample = ClockSample::new(15, 30, 45, 500);
        assert!(close(hour_angle(&sample), 105.0), "3:30 hour hand sits halfway between 3 and 4");
        assert!(close(minute_angle(&sample), 184.5));
        assert!(close(second_angle(&sample), 273.0));
    }

    #[test]
    fn test_hour_angle_wraps_at_noon() {
        let midnight = ClockSample::new(0, 0, 0, 0);
        let noon = ClockSample::new(12, 0, 0, 0);
        assert_eq!(hour_angle(&midnight), 0.0);
        assert_eq!(hour_angle(&noon), 0.0);
    }

    #[test]
    fn test_marker_angles() {
        assert_eq!(marker_angle(0), 0.0);
        assert_eq!(marker_angle(3), 90.0);
        assert_eq!(marker_angle(12), 0.0);
    }

    // -------------------------------------------------------------------------
    // Scaling
    // -------------------------------------------------------------------------

    #[test]
    fn test_fit_scale_uses_smaller_side() {
        assert_eq!(fit_scale(400, 200, 200.0), 1.0);
        assert_eq!(fit_scale(100, 300, 200.0), 0.5);
        assert_eq!(fit_scale(100, 100, 0.0), 0.0);
    }

    #[test]
    fn test_scaled_px_never_zero() {
        assert_eq!(scaled_px(13.0, 1.0), 13);
        assert_eq!(scaled_px(13.0, 0.01), 1);
    }
}
