//! Pre-computed static text styles.
//!
//! `MonoTextStyle` and `TextStyle` are `const`-constructible, so the fixed
//! styles live here instead of being rebuilt every frame. Styles whose color
//! is configurable per widget are built at paint time from the exposed font
//! references: `MonoTextStyle::new(VALUE_FONT, config.text_color)`.

use embedded_graphics::{
    mono_font::{MonoFont, ascii::FONT_6X10},
    text::{Alignment, Baseline, TextStyle, TextStyleBuilder},
};
use profont::{PROFONT_10_POINT, PROFONT_14_POINT, PROFONT_24_POINT};

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Centered on the anchor point, baseline at the anchor. Gauge value and unit text.
pub const CENTERED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Center).build();

/// Centered both ways around the anchor point. Clock numerals and counter glyphs.
pub const CENTERED_MIDDLE: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Middle)
    .build();

// =============================================================================
// Font References
// =============================================================================

/// Small label font for gallery captions.
pub const LABEL_FONT: &MonoFont = &FONT_6X10;

/// Numeric hour markers on the analog clock.
pub const MARKER_FONT: &MonoFont = &PROFONT_10_POINT;

/// Numeric hour markers once the clock reaches its 200 px design size.
pub const MARKER_FONT_LARGE: &MonoFont = &PROFONT_14_POINT;

/// Gauge value text.
pub const VALUE_FONT: &MonoFont = &PROFONT_24_POINT;

/// Gauge unit label.
pub const UNIT_FONT: &MonoFont = &PROFONT_10_POINT;

/// Default counter glyph font.
pub const COUNTER_FONT: &MonoFont = &PROFONT_24_POINT;

/// Smaller counter font for narrow layouts.
pub const COUNTER_FONT_SMALL: &MonoFont = &PROFONT_14_POINT;
