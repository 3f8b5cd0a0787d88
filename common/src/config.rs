//! Widget timing and layout constants.
//!
//! Everything a widget needs before any host configuration is applied lives
//! here as a compile-time constant. Per-widget `*Config` structs start from
//! these values in their `Default` impls.
//!
//! All times are milliseconds on the host's monotonic clock.

// =============================================================================
// Tick Cadences
// =============================================================================

/// Analog clock redraw interval. 20 ticks per second keeps the second hand sweeping smoothly.
pub const ANALOG_TICK_MS: u32 = 50;

/// Pixel clock redraw interval. Digits only change once per second, two samples per second is plenty.
pub const PIXEL_TICK_MS: u32 = 500;

/// Default frame interval for animation drivers (~60 FPS).
pub const FRAME_INTERVAL_MS: u32 = 16;

// =============================================================================
// Gauge Configuration
// =============================================================================

/// Full arc span of the gauge in degrees.
pub const GAUGE_SWEEP_DEG: f32 = 270.0;

/// Arc start angle in degrees, clockwise from 3 o'clock (bottom-left of the dial).
pub const GAUGE_START_DEG: f32 = 135.0;

/// Needle travel time for one value change.
pub const NEEDLE_DURATION_MS: u32 = 200;

/// Side length of the square design space the gauge is drawn in before scaling.
pub const GAUGE_DESIGN_SIZE: f32 = 200.0;

const _: () = assert!(GAUGE_SWEEP_DEG > 0.0 && GAUGE_SWEEP_DEG <= 360.0);
const _: () = assert!(NEEDLE_DURATION_MS >= FRAME_INTERVAL_MS);

// =============================================================================
// Counter Animation Configuration
// =============================================================================

/// Base duration of one digit flip.
pub const COUNTER_DURATION_MS: u32 = 300;

/// Vertical travel of a glyph sliding out/in, in pixels.
pub const COUNTER_TRANSLATION: f32 = 20.0;

/// Degrees of X rotation per pixel of travel.
pub const COUNTER_ROTATION_FACTOR: f32 = -2.0;

/// Travel divided by this gives the scale reduction (20 / 100 = 0.8 at the extreme).
pub const COUNTER_SCALE_DIVISOR: f32 = 100.0;

/// End of the slide-out phase (normalized time).
pub const COUNTER_KEYFRAME_1: f32 = 0.3;

/// End of the glyph swap window (normalized time).
pub const COUNTER_KEYFRAME_2: f32 = 0.4;

/// Lower bound of the per-slot random duration factor.
pub const COUNTER_MIN_DURATION_FACTOR: f32 = 0.7;

/// Upper bound of the per-slot random duration factor.
pub const COUNTER_MAX_DURATION_FACTOR: f32 = 1.3;

const _: () = assert!(COUNTER_KEYFRAME_1 > 0.0);
const _: () = assert!(COUNTER_KEYFRAME_1 < COUNTER_KEYFRAME_2);
const _: () = assert!(COUNTER_KEYFRAME_2 < 1.0);
const _: () = assert!(COUNTER_MIN_DURATION_FACTOR <= COUNTER_MAX_DURATION_FACTOR);

// =============================================================================
// Counter Layout Configuration
// =============================================================================

/// Slot height as a multiple of the font size.
pub const DIGIT_HEIGHT_MULTIPLIER: f32 = 1.8;

/// Digit slot width as a multiple of the font size.
pub const DIGIT_WIDTH_MULTIPLIER: f32 = 0.7;

/// Separator slot width as a multiple of the font size.
pub const SEPARATOR_WIDTH_MULTIPLIER: f32 = 0.4;

/// Maximum number of glyph slots a counter can show.
pub const MAX_SLOTS: usize = 24;

/// Maximum length of a format pattern.
pub const MAX_PATTERN_LEN: usize = 24;

// =============================================================================
// Analog Clock Geometry (fractions of the face radius)
// =============================================================================

/// Gap between the widget edge and the clock face.
pub const CLOCK_FACE_MARGIN: f32 = 20.0;

/// Hour hand length as a fraction of the face radius.
pub const HOUR_HAND_RATIO: f32 = 0.5;

/// Minute hand length as a fraction of the face radius.
pub const MINUTE_HAND_RATIO: f32 = 0.7;

/// Second hand length as a fraction of the face radius.
pub const SECOND_HAND_RATIO: f32 = 0.9;

/// Radius of the circle numeric hour markers sit on.
pub const NUMBER_MARKER_RATIO: f32 = 0.77;

// =============================================================================
// Pixel Clock Layout
// =============================================================================

/// Width of `HH:MM:SS` in glyph pixels plus margin (width / 45 sizes one pixel).
pub const PIXEL_CLOCK_WIDTH_UNITS: f32 = 45.0;

/// Height of one glyph in pixels plus margin (height / 4.5 sizes one pixel).
pub const PIXEL_CLOCK_HEIGHT_UNITS: f32 = 4.5;

/// Total drawn width of `HH:MM:SS` in glyph pixels.
pub const PIXEL_CLOCK_TEXT_UNITS: f32 = 42.0;
