//! Odometer counter surface.
//!
//! Paints the slots of a [`DigitSequenceController`] left to right, centred in
//! the widget bounds. Each glyph is drawn through a [`GlyphTransform`] so the
//! flip channels (travel, opacity, X rotation and scale) show up as pixel
//! moves and color blends, clipped to the glyph's own slot.

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::Rgb565,
    prelude::*,
    primitives::Rectangle,
    text::Text,
};

use super::primitives::GlyphTransform;
use crate::colors::{BLACK, WHITE};
use crate::counter::{DigitSequenceController, FlipParams, NumberFormat, SlotLayout};
use crate::error::WidgetError;
use crate::render::RepaintRequest;
use crate::styles::{CENTERED_MIDDLE, COUNTER_FONT};

#[derive(Debug, Clone, Copy)]
pub struct CounterConfig {
    pub text_color: Rgb565,
    pub background_color: Rgb565,
    pub font: &'static MonoFont<'static>,
    /// Gap between slots in pixels.
    pub spacing: u32,
}

impl Default for CounterConfig {
    fn default() -> Self { Self { text_color: WHITE, background_color: BLACK, font: COUNTER_FONT, spacing: 2 } }
}

/// Animated numeric counter.
#[derive(Debug)]
pub struct Counter {
    config: CounterConfig,
    digits: DigitSequenceController,
    repaint: RepaintRequest,
}

impl Counter {
    pub fn new(
        config: CounterConfig,
        format: NumberFormat,
        value: f64,
    ) -> Self {
        let mut digits = DigitSequenceController::new(format, value);
        digits.set_layout(SlotLayout { font_size: config.font.character_size.height as f32, ..SlotLayout::default() });
        Self { config, digits, repaint: RepaintRequest::new() }
    }

    #[inline]
    pub const fn value(&self) -> f64 { self.digits.value() }

    #[inline]
    pub fn text(&self) -> &str { self.digits.text() }

    #[inline]
    pub const fn digits(&self) -> &DigitSequenceController { &self.digits }

    #[inline]
    pub const fn config(&self) -> &CounterConfig { &self.config }

    /// Flips still running from the last value change.
    #[inline]
    pub const fn active_animations(&self) -> usize { self.digits.active_animations() }

    #[inline]
    pub const fn take_repaint(&mut self) -> bool { self.repaint.take() }

    /// Show `value`, flipping the slots that change. Returns the number of flips started.
    pub fn set_value(
        &mut self,
        value: f64,
        now_ms: u64,
    ) -> Result<usize, WidgetError> {
        let started = self.digits.set_value(value, now_ms)?;
        self.repaint.request();
        Ok(started)
    }

    /// Advance running flips. Returns `true` if a repaint was requested.
    pub fn tick(
        &mut self,
        now_ms: u64,
    ) -> bool {
        let changed = self.digits.tick(now_ms);
        if changed {
            self.repaint.request();
        }
        changed
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    /// Change the pattern. The current value is re-rendered without animation.
    pub fn set_format(
        &mut self,
        pattern: &str,
    ) -> Result<(), WidgetError> {
        let format = NumberFormat::parse(pattern)?;
        self.digits.set_format(format);
        self.repaint.request();
        Ok(())
    }

    pub fn set_params(
        &mut self,
        params: FlipParams,
    ) -> Result<(), WidgetError> {
        self.digits.set_params(params)
    }

    pub fn set_randomize(
        &mut self,
        randomize: bool,
    ) {
        self.digits.set_randomize(randomize);
    }

    /// Replace the slot multipliers. The font size always follows the configured font.
    pub fn set_layout(
        &mut self,
        layout: SlotLayout,
    ) {
        let font_size = self.config.font.character_size.height as f32;
        self.digits.set_layout(SlotLayout { font_size, ..layout });
        self.repaint.request();
    }

    pub fn set_font(
        &mut self,
        font: &'static MonoFont<'static>,
    ) {
        self.config.font = font;
        let layout = *self.digits.layout();
        self.set_layout(layout);
    }

    pub fn set_colors(
        &mut self,
        text: Rgb565,
        background: Rgb565,
    ) {
        self.config.text_color = text;
        self.config.background_color = background;
        self.repaint.request();
    }

    pub fn set_spacing(
        &mut self,
        spacing: u32,
    ) {
        self.config.spacing = spacing;
        self.repaint.request();
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
        let cfg = &self.config;
        display.fill_solid(&bounds, cfg.background_color).ok();

        let total = self.digits.total_width(cfg.spacing) as i32;
        let mut x = bounds.top_left.x + (bounds.size.width as i32 - total) / 2;
        let center_y = bounds.center().y;
        let style = MonoTextStyle::new(cfg.font, cfg.text_color);

        for slot in self.digits.slots() {
            let (width, height) = slot.size();
            let top_left = Point::new(x, center_y - height as i32 / 2);
            let container = Rectangle::new(top_left, Size::new(width, height));
            x += (width + cfg.spacing) as i32;

            let clip = container.intersection(&bounds);
            if clip.is_zero_sized() {
                continue;
            }

            let visual = slot.visual();
            let pivot = container.center();
            let mut target = GlyphTransform::new(
                display,
                pivot,
                visual.scale,
                visual.rotation_x,
                visual.translation_y,
                visual.opacity,
                cfg.background_color,
                clip,
            );

            let mut buf = [0_u8; 4];
            let glyph: &str = visual.glyph.encode_utf8(&mut buf);
            Text::with_text_style(glyph, pivot, style, CENTERED_MIDDLE).draw(&mut target).ok();
        }
    }
}

impl Default for Counter {
    fn default() -> Self { Self::new(CounterConfig::default(), NumberFormat::default(), 0.0) }
}
