//! RGB565 color blending for animated opacity.
//!
//! The display has no alpha channel. A glyph fading out is drawn in its text
//! color blended toward the widget background, which is what a translucent
//! glyph over an opaque background looks like anyway.
//!
//! Interpolation runs on the raw 5-6-5 components with 8-bit fixed-point
//! weights, so no float division happens per pixel.

use embedded_graphics::{pixelcolor::Rgb565, prelude::IntoStorage};

/// Manhattan distance (in 5-6-5 component steps) under which two colors are treated as equal.
const COLOR_SNAP_THRESHOLD: i32 = 2;

#[inline]
fn components(color: Rgb565) -> (i32, i32, i32) {
    let raw = color.into_storage();
    (i32::from((raw >> 11) & 0x1F), i32::from((raw >> 5) & 0x3F), i32::from(raw & 0x1F))
}

/// Linear interpolation between two colors. `t` is clamped to [0, 1]; both ends are exact.
pub fn lerp_rgb565(
    from: Rgb565,
    to: Rgb565,
    t: f32,
) -> Rgb565 {
    if t <= 0.0 {
        return from;
    }
    if t >= 1.0 {
        return to;
    }

    let (from_r, from_g, from_b) = components(from);
    let (to_r, to_g, to_b) = components(to);

    // 8 fractional bits
    let t_fixed = (t * 256.0) as i32;
    let mix = |a: i32, b: i32| a + (((b - a) * t_fixed) >> 8);

    let r = mix(from_r, to_r).clamp(0, 31);
    let g = mix(from_g, to_g).clamp(0, 63);
    let b = mix(from_b, to_b).clamp(0, 31);

    Rgb565::new(r as u8, g as u8, b as u8)
}

/// Color of `foreground` drawn at `opacity` over `background`.
#[inline]
pub fn blend(
    foreground: Rgb565,
    background: Rgb565,
    opacity: f32,
) -> Rgb565 {
    lerp_rgb565(background, foreground, opacity)
}

/// Whether two colors are visually indistinguishable on the panel.
///
/// A glyph blended this close to the background is not worth drawing.
pub fn colors_close_enough(
    a: Rgb565,
    b: Rgb565,
) -> bool {
    let (a_r, a_g, a_b) = components(a);
    let (b_r, b_g, b_b) = components(b);

    let diff = (a_r - b_r).abs() + (a_g - b_g).abs() + (a_b - b_b).abs();
    diff <= COLOR_SNAP_THRESHOLD
}
