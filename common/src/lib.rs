//! Self-drawing, self-animating widgets for `embedded-graphics` targets.
//!
//! This crate is platform-agnostic and shared by the gallery binary and any
//! other host that can provide a draw target and a millisecond clock:
//!
//! - [`geometry`]: Dial angles, points on circles, arc sweeps and scaling
//! - [`sampler`]: Periodic wall-clock sampling with boundary events
//! - [`glyphs`]: 5x4 pixel digit bitmaps
//! - [`animations`]: Phased animation driver, color blending, needle motion
//! - [`counter`]: Number formatting and the odometer digit sequence
//! - [`widgets`]: Analog clock, pixel clock, gauge and counter surfaces
//! - [`render`]: Repaint request coalescing
//! - [`colors`], [`styles`], [`config`]: Palette, text styles and constants
//!
//! # Driving Widgets
//!
//! Nothing here owns a timer. The host calls `tick(now_ms, ..)` on each
//! widget from its loop, checks `take_repaint()`, and calls `paint()` for the
//! widgets that asked for it.
//!
//! # no_std Compatibility
//!
//! This crate is `no_std` outside of tests and never reads a clock itself.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod animations;
pub mod colors;
pub mod config;
pub mod counter;
pub mod easing;
pub mod error;
pub mod geometry;
pub mod glyphs;
pub mod render;
pub mod sampler;
pub mod styles;
pub mod widgets;

// Re-export commonly used items
pub use colors::*;
pub use config::*;
pub use error::WidgetError;
pub use render::RepaintRequest;
pub use sampler::{Boundaries, ClockObserver, ClockSample, TimeSampler, WallClock};
