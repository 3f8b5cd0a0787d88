//! Radial gauge with an animated needle.
//!
//! Everything is laid out in a 200 × 200 design space centred on the widget
//! and scaled by `min(w, h) / 200`:
//!
//! ```text
//!   disc radius 100, arc radius 90 (stroke 13), needle length 70 (stroke 5)
//!
//!            270°
//!        ╭─────────╮          arc starts at 135° (bottom-left) and
//!   180° │    ●    │ 0°       sweeps 270° clockwise to 45° (bottom-right)
//!        ╰──╮   ╭──╯
//!       135°     45°
//! ```
//!
//! Angles here are screen angles, clockwise from 3 o'clock, matching
//! `embedded_graphics::primitives::Arc`.

use core::fmt::Write;

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Arc, Circle, PrimitiveStyle, Rectangle, Triangle},
    text::Text,
};
use heapless::String;
use log::{debug, warn};

use super::primitives::{draw_dot, draw_line};
use crate::animations::needle::{GaugeReading, NeedleAnimator, NeedleState};
use crate::colors::{BLACK, LIGHT_GRAY, ROYAL_BLUE, WHITE};
use crate::config::{GAUGE_DESIGN_SIZE, GAUGE_START_DEG, GAUGE_SWEEP_DEG};
use crate::geometry::{PointF, arc_sweep_fraction, fit_scale, point_on_circle, scaled_px, screen_to_dial};
use crate::render::RepaintRequest;
use crate::styles::{CENTERED, CENTERED_MIDDLE, UNIT_FONT, VALUE_FONT};

const DISC_RADIUS: f32 = 100.0;
const ARC_RADIUS: f32 = 90.0;
const ARC_STROKE: f32 = 13.0;
const NEEDLE_LENGTH: f32 = 70.0;
const NEEDLE_STROKE: f32 = 5.0;

/// Arrow needles stop the shaft short of the head.
const ARROW_SHAFT_SHORTFALL: f32 = 10.0;
const ARROW_HEAD_LENGTH: f32 = 15.0;
const ARROW_TIP_OVERSHOOT: f32 = 2.0;
const ARROW_HALF_WIDTH_DEG: f32 = 7.5;

/// Unit label offset below the value text.
const UNIT_GAP: f32 = 10.0;

/// Baseline offset of bottom-positioned value text.
const BOTTOM_TEXT_OFFSET: f32 = 30.0;

pub type UnitLabel = String<8>;

/// Value text, e.g. `"73"` or `"100+"`.
pub type ValueText = String<16>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeType {
    #[default]
    Flat,
    Rounded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeedleType {
    #[default]
    Line,
    RoundedLine,
    Arrow,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextPosition {
    #[default]
    Center,
    Bottom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GaugeConfig {
    pub min: f32,
    pub max: f32,
    pub unit: UnitLabel,
    pub bar_color: Rgb565,
    pub progress_color: Rgb565,
    pub background_color: Rgb565,
    pub needle_color: Rgb565,
    pub text_color: Rgb565,
    pub stroke_type: StrokeType,
    pub needle_type: NeedleType,
    pub text_position: TextPosition,
    pub draw_value_text: bool,
    /// Centre dot radius in design units.
    pub center_dot_size: f32,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            unit: UnitLabel::new(),
            bar_color: LIGHT_GRAY,
            progress_color: ROYAL_BLUE,
            background_color: WHITE,
            needle_color: ROYAL_BLUE,
            text_color: BLACK,
            stroke_type: StrokeType::Flat,
            needle_type: NeedleType::Line,
            text_position: TextPosition::Center,
            draw_value_text: true,
            center_dot_size: 5.0,
        }
    }
}

/// Radial gauge.
#[derive(Debug, Clone)]
pub struct Gauge {
    config: GaugeConfig,
    reading: GaugeReading,
    needle: NeedleAnimator,
    repaint: RepaintRequest,
}

impl Gauge {
    pub fn new(config: GaugeConfig) -> Self {
        let reading = GaugeReading::new(config.min, config.min, config.max);
        if arc_sweep_fraction(reading.value(), config.min, config.max, GAUGE_SWEEP_DEG).is_err() {
            warn!("gauge range {}..{} is empty, arc stays at zero", config.min, config.max);
        }
        Self { needle: NeedleAnimator::new(reading.value()), reading, config, repaint: RepaintRequest::new() }
    }

    // -------------------------------------------------------------------------
    // Value
    // -------------------------------------------------------------------------

    /// Bound value. Always within `[min, max]`.
    #[inline]
    pub const fn value(&self) -> f32 { self.reading.value() }

    /// Value the needle currently shows.
    #[inline]
    pub const fn animated_value(&self) -> f32 { self.needle.shadow_value() }

    #[inline]
    pub const fn is_animating(&self) -> bool { matches!(self.needle.state(), NeedleState::Animating) }

    /// Clamp and store `value`, then move the needle toward it.
    pub fn set_value(
        &mut self,
        value: f32,
        now_ms: u64,
    ) {
        let target = self.reading.set_value(value);
        self.needle.set_target(target, now_ms);
        self.repaint.request();
    }

    /// Change the range. The value is re-clamped and the needle follows.
    pub fn set_range(
        &mut self,
        min: f32,
        max: f32,
        now_ms: u64,
    ) {
        if arc_sweep_fraction(min, min, max, GAUGE_SWEEP_DEG).is_err() {
            warn!("gauge range {min}..{max} is empty, arc stays at zero");
        }
        self.config.min = min;
        self.config.max = max;
        self.reading.set_range(min, max);
        self.needle.set_target(self.reading.value(), now_ms);
        self.repaint.request();
    }

    /// Advance the needle. Returns `true` if a repaint was requested.
    pub fn tick(
        &mut self,
        now_ms: u64,
    ) -> bool {
        let moved = self.needle.tick(now_ms);
        if moved {
            self.repaint.request();
        }
        moved
    }

    #[inline]
    pub const fn take_repaint(&mut self) -> bool { self.repaint.take() }

    #[inline]
    pub const fn config(&self) -> &GaugeConfig { &self.config }

    /// Override needle timing (default 200 ms at 16 ms frames).
    pub fn set_needle_timing(
        &mut self,
        duration_ms: u32,
        frame_interval_ms: u32,
    ) {
        self.needle.set_timing(duration_ms, frame_interval_ms);
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    pub fn set_colors(
        &mut self,
        bar: Rgb565,
        progress: Rgb565,
        background: Rgb565,
    ) {
        self.config.bar_color = bar;
        self.config.progress_color = progress;
        self.config.background_color = background;
        self.repaint.request();
    }

    pub fn set_needle_color(
        &mut self,
        color: Rgb565,
    ) {
        self.config.needle_color = color;
        self.repaint.request();
    }

    pub fn set_text_color(
        &mut self,
        color: Rgb565,
    ) {
        self.config.text_color = color;
        self.repaint.request();
    }

    pub fn set_stroke_type(
        &mut self,
        stroke_type: StrokeType,
    ) {
        self.config.stroke_type = stroke_type;
        self.repaint.request();
    }

    pub fn set_needle_type(
        &mut self,
        needle_type: NeedleType,
    ) {
        self.config.needle_type = needle_type;
        self.repaint.request();
    }

    pub fn set_text_position(
        &mut self,
        position: TextPosition,
    ) {
        self.config.text_position = position;
        self.repaint.request();
    }

    pub fn set_draw_value_text(
        &mut self,
        draw: bool,
    ) {
        self.config.draw_value_text = draw;
        self.repaint.request();
    }

    pub fn set_center_dot_size(
        &mut self,
        size: f32,
    ) {
        self.config.center_dot_size = size.max(0.0);
        self.repaint.request();
    }

    /// Set the unit label. Labels longer than the buffer are truncated.
    pub fn set_unit(
        &mut self,
        unit: &str,
    ) {
        self.config.unit.clear();
        for c in unit.chars() {
            if self.config.unit.push(c).is_err() {
                debug!("gauge unit {unit:?} truncated");
                break;
            }
        }
        self.repaint.request();
    }

    // -------------------------------------------------------------------------
    // Derived values
    // -------------------------------------------------------------------------

    /// Progress arc sweep for the animated value. An empty range gives zero.
    pub fn sweep_deg(&self) -> f32 {
        arc_sweep_fraction(self.animated_value(), self.config.min, self.config.max, GAUGE_SWEEP_DEG)
            .map(|sweep| sweep.clamp(0.0, GAUGE_SWEEP_DEG))
            .unwrap_or(0.0)
    }

    /// Text shown for the animated value.
    pub fn value_text(&self) -> ValueText {
        let animated = self.animated_value();
        let mut text = ValueText::new();
        if write!(text, "{animated:.0}").is_err() {
            debug!("gauge value {animated} does not fit the value text");
            text.clear();
        }
        if animated >= self.config.max && text.push('+').is_err() {
            debug!("gauge value text {:?} has no room for the max suffix", text.as_str());
        }
        text
    }

    // -------------------------------------------------------------------------
    // Painting
    // -------------------------------------------------------------------------

    pub fn paint<D>(
        &self,
        display: &mut D,
        bounds: Rectangle,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let scale = fit_scale(bounds.size.width, bounds.size.height, GAUGE_DESIGN_SIZE);
        if scale <= 0.0 {
            return;
        }
        let center = PointF::from(bounds.center());
        let cfg = &self.config;

        Circle::with_center(center.to_point(), scaled_px(DISC_RADIUS * 2.0, scale))
            .into_styled(PrimitiveStyle::with_fill(cfg.background_color))
            .draw(display)
            .ok();

        let sweep = self.sweep_deg();
        self.draw_arc(display, center, scale, GAUGE_SWEEP_DEG, cfg.bar_color);
        self.draw_arc(display, center, scale, sweep, cfg.progress_color);

        self.draw_needle(display, center, scale, screen_to_dial(GAUGE_START_DEG + sweep));

        if cfg.draw_value_text {
            self.draw_text(display, center, scale);
        }
    }

    fn draw_arc<D>(
        &self,
        display: &mut D,
        center: PointF,
        scale: f32,
        sweep_deg: f32,
        color: Rgb565,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        if sweep_deg <= 0.0 {
            return;
        }
        let stroke = scaled_px(ARC_STROKE, scale);
        Arc::with_center(
            center.to_point(),
            scaled_px(ARC_RADIUS * 2.0, scale),
            GAUGE_START_DEG.deg(),
            sweep_deg.deg(),
        )
        .into_styled(PrimitiveStyle::with_stroke(color, stroke))
        .draw(display)
        .ok();

        if self.config.stroke_type == StrokeType::Rounded {
            let radius = ARC_RADIUS * scale;
            for end in [GAUGE_START_DEG, GAUGE_START_DEG + sweep_deg] {
                draw_dot(display, point_on_circle(center, radius, screen_to_dial(end)), stroke, color);
            }
        }
    }

    fn draw_needle<D>(
        &self,
        display: &mut D,
        center: PointF,
        scale: f32,
        dial_deg: f32,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let cfg = &self.config;
        let color = cfg.needle_color;
        let stroke = scaled_px(NEEDLE_STROKE, scale);

        match cfg.needle_type {
            NeedleType::None => return,
            NeedleType::Line | NeedleType::RoundedLine => {
                let tip = point_on_circle(center, NEEDLE_LENGTH * scale, dial_deg);
                draw_line(display, center, tip, stroke, color, cfg.needle_type == NeedleType::RoundedLine);
            }
            NeedleType::Arrow => {
                let shaft_end = point_on_circle(center, (NEEDLE_LENGTH - ARROW_SHAFT_SHORTFALL) * scale, dial_deg);
                draw_line(display, center, shaft_end, stroke, color, false);

                let base = (NEEDLE_LENGTH - ARROW_HEAD_LENGTH) * scale;
                let tip = point_on_circle(center, (NEEDLE_LENGTH + ARROW_TIP_OVERSHOOT) * scale, dial_deg);
                let left = point_on_circle(center, base, dial_deg - ARROW_HALF_WIDTH_DEG);
                let right = point_on_circle(center, base, dial_deg + ARROW_HALF_WIDTH_DEG);
                Triangle::new(tip.to_point(), left.to_point(), right.to_point())
                    .into_styled(PrimitiveStyle::with_fill(color))
                    .draw(display)
                    .ok();
            }
        }

        let dot = scaled_px(cfg.center_dot_size * 2.0, scale);
        draw_dot(display, center, dot, color);
    }

    fn draw_text<D>(
        &self,
        display: &mut D,
        center: PointF,
        scale: f32,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let cfg = &self.config;
        let value_style = MonoTextStyle::new(VALUE_FONT, cfg.text_color);
        let unit_style = MonoTextStyle::new(UNIT_FONT, cfg.text_color);
        let value_height = VALUE_FONT.character_size.height as f32;
        let unit_height = UNIT_FONT.character_size.height as f32;
        let text = self.value_text();
        let origin = center.to_point();

        let unit_y = match cfg.text_position {
            TextPosition::Center => {
                Text::with_text_style(&text, origin, value_style, CENTERED_MIDDLE).draw(display).ok();
                value_height / 2.0 + UNIT_GAP * scale + unit_height
            }
            TextPosition::Bottom => {
                let baseline = value_height + BOTTOM_TEXT_OFFSET * scale;
                let anchor = origin + Point::new(0, baseline as i32);
                Text::with_text_style(&text, anchor, value_style, CENTERED).draw(display).ok();
                baseline + UNIT_GAP * scale + unit_height
            }
        };

        if !cfg.unit.is_empty() {
            let anchor = origin + Point::new(0, unit_y as i32);
            Text::with_text_style(&cfg.unit, anchor, unit_style, CENTERED).draw(display).ok();
        }
    }
}

impl Default for Gauge {
    fn default() -> Self { Self::new(GaugeConfig::default()) }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;

    use super::*;

    fn settle(
        gauge: &mut Gauge,
        mut now: u64,
    ) -> u64 {
        while gauge.is_animating() {
            now += 16;
            gauge.tick(now);
        }
        now
    }

    #[test]
    fn test_sweep_follows_animated_value() {
        let mut gauge = Gauge::default();
        assert_eq!(gauge.sweep_deg(), 0.0);

        gauge.set_value(50.0, 0);
        assert_eq!(gauge.value(), 50.0);
        assert_eq!(gauge.sweep_deg(), 0.0, "Arc waits for the needle");

        settle(&mut gauge, 0);
        assert_eq!(gauge.sweep_deg(), 135.0);
    }

    #[test]
    fn test_sweep_is_relative_to_min() {
        let mut gauge = Gauge::new(GaugeConfig { min: 50.0, max: 150.0, ..GaugeConfig::default() });
        gauge.set_value(100.0, 0);
        settle(&mut gauge, 0);
        assert_eq!(gauge.sweep_deg(), 135.0, "Half of 50..150");
    }

    #[test]
    fn test_value_clamped_and_text_suffix() {
        let mut gauge = Gauge::default();
        gauge.set_value(180.0, 0);
        assert_eq!(gauge.value(), 100.0);
        settle(&mut gauge, 0);
        assert_eq!(gauge.animated_value(), 100.0);
        assert_eq!(gauge.value_text(), "100+");

        gauge.set_value(73.4, 1000);
        settle(&mut gauge, 1000);
        assert_eq!(gauge.value_text(), "73");
    }

    #[test]
    fn test_oversized_value_text_stays_bounded() {
        let mut gauge = Gauge::new(GaugeConfig { max: 1.0e20, ..GaugeConfig::default() });
        gauge.set_value(1.0e20, 0);
        settle(&mut gauge, 0);

        assert_eq!(gauge.animated_value(), 1.0e20);
        assert_eq!(gauge.value_text().as_str(), "+", "Overflowing digits are dropped, not shown truncated");
    }

    #[test]
    fn test_empty_range_gives_zero_sweep() {
        let mut gauge = Gauge::default();
        gauge.set_range(20.0, 20.0, 0);
        settle(&mut gauge, 0);
        assert_eq!(gauge.value(), 20.0);
        assert_eq!(gauge.sweep_deg(), 0.0);

        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        gauge.paint(&mut display, Rectangle::new(Point::zero(), Size::new(64, 64)));
    }

    #[test]
    fn test_tick_requests_repaint_while_moving() {
        let mut gauge = Gauge::default();
        gauge.set_value(30.0, 0);
        assert!(gauge.take_repaint());
        assert!(gauge.tick(16));
        assert!(gauge.take_repaint());
        let end = settle(&mut gauge, 16);
        assert!(!gauge.tick(end + 16), "Idle gauge stays quiet");
    }

    #[test]
    fn test_needle_points_down_left_at_min() {
        let mut gauge = Gauge::default();
        gauge.set_draw_value_text(false);
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        gauge.paint(&mut display, Rectangle::new(Point::zero(), Size::new(64, 64)));

        // Centre (31, 31), needle at 135° screen angle runs along x + y = 62.
        assert_eq!(display.get_pixel(Point::new(20, 42)), Some(ROYAL_BLUE));
        assert_eq!(display.get_pixel(Point::new(42, 42)), Some(WHITE), "Nothing drawn toward the max end");
    }

    #[test]
    fn test_no_needle_leaves_centre_clear() {
        let mut gauge = Gauge::default();
        gauge.set_draw_value_text(false);
        gauge.set_needle_type(NeedleType::None);
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        gauge.paint(&mut display, Rectangle::new(Point::zero(), Size::new(64, 64)));
        assert_eq!(display.get_pixel(Point::new(31, 31)), Some(WHITE));
    }

    #[test]
    fn test_unit_label_truncates() {
        let mut gauge = Gauge::default();
        gauge.set_unit("kilometres");
        assert_eq!(gauge.config().unit, "kilometr");
    }
}
