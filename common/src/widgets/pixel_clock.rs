//! Blocky `HH:MM:SS` clock drawn from the pixel glyph table.
//!
//! One glyph pixel is `min(w / 45, h / 4.5)` screen pixels. Digits are four
//! glyph pixels wide and advance five, colons advance two, and every glyph is
//! followed by a one pixel gap, giving 42 glyph pixels for the whole string.

use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};
use log::{trace, warn};

use super::primitives::fill_pixel_square;
use crate::colors::{BLACK, LIME};
use crate::config::{PIXEL_CLOCK_HEIGHT_UNITS, PIXEL_CLOCK_TEXT_UNITS, PIXEL_CLOCK_WIDTH_UNITS, PIXEL_TICK_MS};
use crate::glyphs::{GLYPH_ROWS, lit_cells};
use crate::render::RepaintRequest;
use crate::sampler::{Boundaries, ClockObserver, ClockSample, TimeSampler, WallClock};

const DIGIT_ADVANCE: f32 = 5.0;
const COLON_ADVANCE: f32 = 2.0;
const GAP: f32 = 1.0;

/// Row the colon dots are centred on.
const COLON_ROW: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelClockConfig {
    pub display_color: Rgb565,
    pub background_color: Rgb565,
}

impl Default for PixelClockConfig {
    fn default() -> Self { Self { display_color: LIME, background_color: BLACK } }
}

/// Self-ticking pixel-matrix clock.
#[derive(Debug, Clone)]
pub struct PixelClock {
    config: PixelClockConfig,
    sampler: TimeSampler,
    repaint: RepaintRequest,
}

impl PixelClock {
    pub const fn new(config: PixelClockConfig) -> Self {
        Self { config, sampler: TimeSampler::new(PIXEL_TICK_MS), repaint: RepaintRequest::new() }
    }

    pub fn start(
        &mut self,
        now_ms: u64,
        clock: &impl WallClock,
    ) {
        self.sampler.start(now_ms, clock);
        self.repaint.request();
    }

    pub fn stop(&mut self) { self.sampler.stop(); }

    pub fn tick(
        &mut self,
        now_ms: u64,
        clock: &impl WallClock,
        observer: &mut impl ClockObserver,
    ) -> Option<Boundaries> {
        self.sampler.poll(now_ms, clock, observer, &mut self.repaint)
    }

    #[inline]
    pub const fn time(&self) -> ClockSample { self.sampler.current() }

    #[inline]
    pub const fn take_repaint(&mut self) -> bool { self.repaint.take() }

    #[inline]
    pub const fn config(&self) -> &PixelClockConfig { &self.config }

    pub fn set_display_color(
        &mut self,
        color: Rgb565,
    ) {
        self.config.display_color = color;
        self.repaint.request();
    }

    pub fn set_background_color(
        &mut self,
        color: Rgb565,
    ) {
        self.config.background_color = color;
        self.repaint.request();
    }

    /// Size of one glyph pixel for the given bounds.
    pub fn pixel_size(bounds: Rectangle) -> f32 {
        let w = bounds.size.width as f32 / PIXEL_CLOCK_WIDTH_UNITS;
        let h = bounds.size.height as f32 / PIXEL_CLOCK_HEIGHT_UNITS;
        w.min(h)
    }

    /// Clear `bounds` to the background and draw the current time centred in it.
    pub fn paint<D>(
        &self,
        display: &mut D,
        bounds: Rectangle,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        display.fill_solid(&bounds, self.config.background_color).ok();

        let pixel = Self::pixel_size(bounds);
        if pixel <= 0.0 {
            trace!("pixel clock bounds {bounds:?} too small");
            return;
        }

        let origin_x = bounds.top_left.x as f32 + (bounds.size.width as f32 - pixel * PIXEL_CLOCK_TEXT_UNITS) / 2.0;
        let origin_y = bounds.top_left.y as f32 + (bounds.size.height as f32 - pixel * GLYPH_ROWS as f32) / 2.0;
        let color = self.config.display_color;

        let t = self.time();
        let digits = [
            Some(t.hour / 10),
            Some(t.hour % 10),
            None,
            Some(t.minute / 10),
            Some(t.minute % 10),
            None,
            Some(t.second / 10),
            Some(t.second % 10),
        ];

        let mut x = origin_x;
        for glyph in digits {
            match glyph {
                Some(digit) => {
                    debug_assert!(digit <= 9, "clock digit {digit} out of range");
                    if digit > 9 {
                        warn!("pixel clock cannot show {t:?}, digit {digit} left blank");
                    }
                    for (row, col) in lit_cells(digit) {
                        fill_pixel_square(
                            display,
                            x + col as f32 * pixel,
                            origin_y + row as f32 * pixel,
                            pixel,
                            color,
                        );
                    }
                    x += pixel * DIGIT_ADVANCE;
                }
                None => {
                    let center_y = origin_y + pixel * COLON_ROW;
                    fill_pixel_square(display, x, center_y - pixel * 1.5, pixel, color);
                    fill_pixel_square(display, x, center_y + pixel * 0.5, pixel, color);
                    x += pixel * COLON_ADVANCE;
                }
            }
            x += pixel * GAP;
        }
    }
}

impl Default for PixelClock {
    fn default() -> Self { Self::new(PixelClockConfig::default()) }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;

    use super::*;
    use crate::colors::WHITE;

    fn clock_at(sample: ClockSample) -> PixelClock {
        let mut clock = PixelClock::default();
        clock.start(0, &move || sample);
        clock
    }

    fn count(
        display: &MockDisplay<Rgb565>,
        color: Rgb565,
    ) -> usize {
        display.affected_area().points().filter(|&p| display.get_pixel(p) == Some(color)).count()
    }

    #[test]
    fn test_pixel_size_uses_tighter_axis() {
        let wide = Rectangle::new(Point::zero(), Size::new(90, 90));
        assert_eq!(PixelClock::pixel_size(wide), 2.0, "Width bound: 90 / 45");

        let flat = Rectangle::new(Point::zero(), Size::new(450, 9));
        assert_eq!(PixelClock::pixel_size(flat), 2.0, "Height bound: 9 / 4.5");
    }

    #[test]
    fn test_lit_pixel_count_matches_glyphs() {
        // 11:11:11 -> six "1" glyphs of 6 cells, plus four colon dots.
        let clock = clock_at(ClockSample::new(11, 11, 11, 0));
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        clock.paint(&mut display, Rectangle::new(Point::zero(), Size::new(45, 5)));

        assert_eq!(PixelClock::pixel_size(Rectangle::new(Point::zero(), Size::new(45, 5))), 1.0);
        assert_eq!(count(&display, LIME), 6 * 6 + 4);
    }

    #[test]
    fn test_first_digit_starts_after_centering_margin() {
        let clock = clock_at(ClockSample::new(8, 0, 0, 0));
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        clock.paint(&mut display, Rectangle::new(Point::zero(), Size::new(45, 5)));

        // (45 - 42) / 2 = 1.5 -> first "0" column starts at x = 2 after rounding.
        assert_eq!(display.get_pixel(Point::new(1, 0)), Some(BLACK));
        assert_eq!(display.get_pixel(Point::new(2, 0)), Some(LIME));
    }

    #[test]
    fn test_background_fills_bounds() {
        let mut clock = clock_at(ClockSample::new(0, 0, 0, 0));
        clock.set_background_color(WHITE);
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        let bounds = Rectangle::new(Point::new(4, 4), Size::new(20, 10));
        clock.paint(&mut display, bounds);
        assert_eq!(display.affected_area(), bounds);
        assert_eq!(display.get_pixel(Point::new(4, 4)), Some(WHITE));
    }

    #[test]
    fn test_half_second_cadence() {
        let mut clock = PixelClock::default();
        clock.start(0, &|| ClockSample::new(1, 2, 3, 0));
        clock.take_repaint();

        assert_eq!(clock.tick(400, &|| ClockSample::new(1, 2, 3, 400), &mut ()), None);
        assert!(!clock.take_repaint());
        let fired = clock.tick(500, &|| ClockSample::new(1, 2, 4, 0), &mut ());
        assert_eq!(fired, Some(Boundaries { second: true, minute: false, hour: false }));
        assert!(clock.take_repaint());
    }
}
