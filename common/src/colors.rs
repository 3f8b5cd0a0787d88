//! Color constants for the widget surfaces.
//!
//! # Rgb565 Color Format
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! - Red: 0-31 (5 bits)
//! - Green: 0-63 (6 bits)
//! - Blue: 0-31 (5 bits)
//!
//! The widget defaults were picked as 8-bit colors and are listed here already
//! reduced to 5-6-5 so no conversion happens per frame.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black (0, 0, 0). Pixel clock background, counter background.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31). Clock face and gauge disc.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure green (0, 63, 0). Default pixel clock "lime" digits.
pub const LIME: Rgb565 = Rgb565::GREEN;

// =============================================================================
// Custom Colors
// =============================================================================

/// Royal blue (65, 105, 225) -> (8, 26, 28). Border, hands, gauge progress and needle.
pub const ROYAL_BLUE: Rgb565 = Rgb565::new(8, 26, 28);

/// Charcoal `#303030` -> (6, 12, 6). Hour markers and second hand.
pub const CHARCOAL: Rgb565 = Rgb565::new(6, 12, 6);

/// Light gray (211, 211, 211) -> (26, 52, 26). Gauge track behind the progress arc.
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(26, 52, 26);

/// Dark gray used for grid dividers in the gallery.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);
