//! Gallery layout and timing.
//!
//! The display is split into a 2x2 grid of equal cells. Each cell has a
//! caption band on top and hands the rest to its widget.
//!
//! ```text
//! ┌──────────────┬──────────────┐
//! │ ANALOG       │ PIXEL        │
//! │   (clock)    │   (clock)    │
//! ├──────────────┼──────────────┤
//! │ GAUGE        │ COUNTER      │
//! │   (gauge)    │   (counter)  │
//! └──────────────┴──────────────┘
//! ```

use std::time::Duration;

use embedded_graphics::prelude::*;

// =============================================================================
// Display Configuration
// =============================================================================

pub const SCREEN_WIDTH: u32 = 480;
pub const SCREEN_HEIGHT: u32 = 320;

/// Simulator window pixel scale.
#[allow(dead_code)]
pub const WINDOW_SCALE: u32 = 2;

pub const CELL_WIDTH: u32 = SCREEN_WIDTH / 2;
pub const CELL_HEIGHT: u32 = SCREEN_HEIGHT / 2;

/// Height of the caption band at the top of each cell.
pub const CAPTION_HEIGHT: u32 = 14;

/// Caption text offset from the cell's top-left corner.
pub const CAPTION_OFFSET: Point = Point::new(6, 10);

pub const DIV_V_START: Point = Point::new(CELL_WIDTH as i32, 0);
pub const DIV_V_END: Point = Point::new(CELL_WIDTH as i32, SCREEN_HEIGHT as i32 - 1);
pub const DIV_H_START: Point = Point::new(0, CELL_HEIGHT as i32);
pub const DIV_H_END: Point = Point::new(SCREEN_WIDTH as i32 - 1, CELL_HEIGHT as i32);

// =============================================================================
// Timing
// =============================================================================

/// Host frame time (~60 FPS). Matches the widgets' 16 ms animation frames.
pub const FRAME_TIME: Duration = Duration::from_millis(16);

/// Frames rendered before the headless snapshot is written.
#[allow(dead_code)]
pub const HEADLESS_FRAMES: u32 = 240;

/// Where the headless run writes its snapshot.
#[allow(dead_code)]
pub const SNAPSHOT_PATH: &str = "widget-gallery.png";

// =============================================================================
// Demo Feeds
// =============================================================================

/// Period of the gauge's sine sweep in seconds.
pub const GAUGE_SWEEP_PERIOD_S: f32 = 8.0;

/// How often the gauge is fed a new reading.
pub const GAUGE_FEED_MS: u64 = 400;

/// How often the counter steps on its own.
pub const COUNTER_STEP_MS: u64 = 1_500;

/// Automatic counter increment.
pub const COUNTER_STEP: f64 = 0.37;

/// Increment applied by a tap or key press.
pub const COUNTER_BUMP: f64 = 1.0;

/// Counter start value.
pub const COUNTER_START: f64 = 97.5;

/// Counter format pattern.
pub const COUNTER_PATTERN: &str = "#,##0.00";
