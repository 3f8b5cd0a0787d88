//! Analog clock face with sweeping hands.
//!
//! Geometry is recomputed from the widget bounds on every paint:
//! face radius `min(w, h) / 2 − 20`, hands at 0.5 / 0.7 / 0.9 of the radius,
//! twelve markers (long at 12, 3, 6 and 9) or numerals on a 0.77 r circle.
//! The second hand includes milliseconds, so at the 50 ms tick it sweeps
//! instead of jumping.

use core::fmt::Write;

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Circle, PrimitiveStyleBuilder, Rectangle},
    text::Text,
};
use heapless::String;
use log::trace;

use super::primitives::{draw_dot, draw_line, draw_radial_line};
use crate::colors::{CHARCOAL, ROYAL_BLUE, WHITE};
use crate::config::{
    ANALOG_TICK_MS,
    CLOCK_FACE_MARGIN,
    HOUR_HAND_RATIO,
    MINUTE_HAND_RATIO,
    NUMBER_MARKER_RATIO,
    SECOND_HAND_RATIO,
};
use crate::geometry::{PointF, hour_angle, marker_angle, minute_angle, point_on_circle, second_angle};
use crate::render::RepaintRequest;
use crate::sampler::{Boundaries, ClockObserver, ClockSample, TimeSampler, WallClock};
use crate::styles::{CENTERED_MIDDLE, MARKER_FONT, MARKER_FONT_LARGE};

/// Long marker length at 12, 3, 6 and 9.
const MAJOR_MARKER_LENGTH: f32 = 15.0;

/// Marker length at the other hours.
const MINOR_MARKER_LENGTH: f32 = 10.0;

/// Diameter of the hub over the hands.
const HUB_DIAMETER: u32 = 10;

/// Hour marker style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerStyle {
    #[default]
    Lines,
    Numbers,
}

/// Colors and strokes of the analog clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalogClockConfig {
    pub face_color: Rgb565,
    pub border_color: Rgb565,
    pub marker_color: Rgb565,
    pub hour_hand_color: Rgb565,
    pub minute_hand_color: Rgb565,
    pub second_hand_color: Rgb565,
    pub marker_style: MarkerStyle,
    pub border_width: u32,
    pub marker_width: u32,
    pub hour_hand_width: u32,
    pub minute_hand_width: u32,
    pub second_hand_width: u32,
}

impl Default for AnalogClockConfig {
    fn default() -> Self {
        Self {
            face_color: WHITE,
            border_color: ROYAL_BLUE,
            marker_color: CHARCOAL,
            hour_hand_color: ROYAL_BLUE,
            minute_hand_color: ROYAL_BLUE,
            second_hand_color: CHARCOAL,
            marker_style: MarkerStyle::Lines,
            border_width: 2,
            marker_width: 2,
            hour_hand_width: 8,
            minute_hand_width: 6,
            second_hand_width: 2,
        }
    }
}

/// Self-ticking analog clock.
#[derive(Debug, Clone)]
pub struct AnalogClock {
    config: AnalogClockConfig,
    sampler: TimeSampler,
    repaint: RepaintRequest,
}

impl AnalogClock {
    pub const fn new(config: AnalogClockConfig) -> Self {
        Self { config, sampler: TimeSampler::new(ANALOG_TICK_MS), repaint: RepaintRequest::new() }
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Start the 50 ms tick.
    pub fn start(
        &mut self,
        now_ms: u64,
        clock: &impl WallClock,
    ) {
        self.sampler.start(now_ms, clock);
        self.repaint.request();
    }

    pub fn stop(&mut self) { self.sampler.stop(); }

    /// Drive the tick from the host loop. Boundary events go to `observer`.
    pub fn tick(
        &mut self,
        now_ms: u64,
        clock: &impl WallClock,
        observer: &mut impl ClockObserver,
    ) -> Option<Boundaries> {
        self.sampler.poll(now_ms, clock, observer, &mut self.repaint)
    }

    /// Time shown by the hands.
    #[inline]
    pub const fn time(&self) -> ClockSample { self.sampler.current() }

    /// Consume the pending repaint, if any.
    #[inline]
    pub const fn take_repaint(&mut self) -> bool { self.repaint.take() }

    #[inline]
    pub const fn config(&self) -> &AnalogClockConfig { &self.config }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    pub fn set_face_color(
        &mut self,
        color: Rgb565,
    ) {
        self.config.face_color = color;
        self.repaint.request();
    }

    pub fn set_border_color(
        &mut self,
        color: Rgb565,
    ) {
        self.config.border_color = color;
        self.repaint.request();
    }

    pub fn set_marker_color(
        &mut self,
        color: Rgb565,
    ) {
        self.config.marker_color = color;
        self.repaint.request();
    }

    pub fn set_hand_colors(
        &mut self,
        hour: Rgb565,
        minute: Rgb565,
        second: Rgb565,
    ) {
        self.config.hour_hand_color = hour;
        self.config.minute_hand_color = minute;
        self.config.second_hand_color = second;
        self.repaint.request();
    }

    pub fn set_marker_style(
        &mut self,
        style: MarkerStyle,
    ) {
        self.config.marker_style = style;
        self.repaint.request();
    }

    // -------------------------------------------------------------------------
    // Painting
    // -------------------------------------------------------------------------

    /// Draw the clock into `bounds`. Areas outside the face are left untouched.
    pub fn paint<D>(
        &self,
        display: &mut D,
        bounds: Rectangle,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let cfg = &self.config;
        let radius = bounds.size.width.min(bounds.size.height) as f32 / 2.0 - CLOCK_FACE_MARGIN;
        if radius <= 0.0 {
            trace!("analog clock bounds {bounds:?} too small for a face");
            return;
        }
        let center = PointF::from(bounds.center());

        let face_style = PrimitiveStyleBuilder::new()
            .fill_color(cfg.face_color)
            .stroke_color(cfg.border_color)
            .stroke_width(cfg.border_width)
            .build();
        Circle::with_center(center.to_point(), (radius * 2.0) as u32)
            .into_styled(face_style)
            .draw(display)
            .ok();

        match cfg.marker_style {
            MarkerStyle::Lines => self.draw_line_markers(display, center, radius),
            MarkerStyle::Numbers => self.draw_number_markers(display, center, radius, bounds),
        }

        let time = self.time();
        draw_radial_line(
            display,
            center,
            hour_angle(&time),
            radius * HOUR_HAND_RATIO,
            cfg.hour_hand_width,
            cfg.hour_hand_color,
            true,
        );
        draw_radial_line(
            display,
            center,
            minute_angle(&time),
            radius * MINUTE_HAND_RATIO,
            cfg.minute_hand_width,
            cfg.minute_hand_color,
            true,
        );
        draw_radial_line(
            display,
            center,
            second_angle(&time),
            radius * SECOND_HAND_RATIO,
            cfg.second_hand_width,
            cfg.second_hand_color,
            true,
        );

        draw_dot(display, center, HUB_DIAMETER, cfg.hour_hand_color);
    }

    fn draw_line_markers<D>(
        &self,
        display: &mut D,
        center: PointF,
        radius: f32,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        for hour in 0..12 {
            let angle = marker_angle(hour);
            let length = if hour % 3 == 0 { MAJOR_MARKER_LENGTH } else { MINOR_MARKER_LENGTH };
            let outer = point_on_circle(center, radius, angle);
            let inner = point_on_circle(center, (radius - length).max(0.0), angle);
            draw_line(display, inner, outer, self.config.marker_width, self.config.marker_color, false);
        }
    }

    fn draw_number_markers<D>(
        &self,
        display: &mut D,
        center: PointF,
        radius: f32,
        bounds: Rectangle,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let style = MonoTextStyle::new(marker_font(bounds), self.config.marker_color);
        let number_radius = radius * NUMBER_MARKER_RATIO;
        let mut label: String<2> = String::new();

        for hour in 1..=12 {
            label.clear();
            write!(label, "{hour}").ok();
            let anchor = point_on_circle(center, number_radius, marker_angle(hour));
            Text::with_text_style(&label, anchor.to_point(), style, CENTERED_MIDDLE).draw(display).ok();
        }
    }
}

impl Default for AnalogClock {
    fn default() -> Self { Self::new(AnalogClockConfig::default()) }
}

/// Numeral font for a face of this size: the larger font once the widget reaches the 200 px design size.
fn marker_font(bounds: Rectangle) -> &'static MonoFont<'static> {
    if bounds.size.width.min(bounds.size.height) >= 200 { MARKER_FONT_LARGE } else { MARKER_FONT }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;

    use super::*;
    use crate::colors::BLACK;

    fn bounds() -> Rectangle { Rectangle::new(Point::zero(), Size::new(64, 64)) }

    fn noon_clock() -> AnalogClock {
        let mut clock = AnalogClock::default();
        clock.start(0, &|| ClockSample::new(12, 0, 0, 0));
        clock
    }

    fn paint(clock: &AnalogClock) -> MockDisplay<Rgb565> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        clock.paint(&mut display, bounds());
        display
    }

    #[test]
    fn test_face_fits_margin() {
        let display = paint(&noon_clock());
        let area = display.affected_area();
        // radius = 32 - 20 = 12, plus at most one pixel of border outside the face
        assert!((24..=26).contains(&area.size.width), "Face spans {area:?}");
        assert!(area.contains(Point::new(31, 31)));
    }

    #[test]
    fn test_hands_at_noon_point_up() {
        let display = paint(&noon_clock());
        // All three hands overlap straight up and the second hand is drawn last.
        assert_eq!(display.get_pixel(Point::new(31, 22)), Some(CHARCOAL), "Second hand above centre");
        assert_eq!(display.get_pixel(Point::new(29, 39)), Some(WHITE), "Face below centre is clear at noon");
    }

    #[test]
    fn test_tiny_bounds_draw_nothing() {
        let mut display = MockDisplay::<Rgb565>::new();
        let clock = noon_clock();
        clock.paint(&mut display, Rectangle::new(Point::zero(), Size::new(30, 30)));
        assert_eq!(display.affected_area(), Rectangle::zero());
    }

    #[test]
    fn test_tick_requests_repaint_and_reports_boundaries() {
        let mut clock = AnalogClock::default();
        clock.start(0, &|| ClockSample::new(9, 59, 59, 900));
        assert!(clock.take_repaint());

        let boundaries = clock.tick(50, &|| ClockSample::new(10, 0, 0, 0), &mut ());
        assert_eq!(boundaries, Some(Boundaries { second: true, minute: true, hour: true }));
        assert!(clock.take_repaint());
        assert_eq!(clock.time(), ClockSample::new(10, 0, 0, 0));
        assert_eq!(clock.tick(60, &|| ClockSample::new(10, 0, 0, 0), &mut ()), None, "Next tick due at 100 ms");
    }

    #[test]
    fn test_setters_request_repaint() {
        let mut clock = AnalogClock::default();
        clock.take_repaint();
        clock.set_face_color(BLACK);
        assert!(clock.take_repaint());
        clock.set_marker_style(MarkerStyle::Numbers);
        assert!(clock.take_repaint());
        assert_eq!(clock.config().marker_style, MarkerStyle::Numbers);
    }

    #[test]
    fn test_number_markers_draw_inside_face() {
        let mut clock = noon_clock();
        clock.set_marker_style(MarkerStyle::Numbers);
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        clock.paint(&mut display, Rectangle::new(Point::zero(), Size::new(64, 64)));
        assert!(display.affected_area().size.width > 0);
    }
}
