//! Widget gallery for Windows/Linux/macOS.
//!
//! Hosts the analog clock, pixel clock, gauge and counter on one 480x320
//! `SimulatorDisplay`. The host loop owns the only timer: every frame it
//! ticks the widgets with the monotonic time in milliseconds and repaints
//! the ones that asked for it.
//!
//! - With the `window` feature: an SDL window. Any key press, or a click on
//!   the counter cell, bumps the counter.
//! - Without it: runs a fixed number of frames headless and writes a PNG.
//!
//! Logging goes through `env_logger`, e.g. `RUST_LOG=debug`.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod clock;
mod config;
mod gallery;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay};
use log::info;

use crate::clock::SystemClock;
use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::gallery::Gallery;

fn main() {
    env_logger::init();

    let clock = SystemClock::from_env();
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let mut gallery = Gallery::new(0, &clock);
    info!("gallery started at {SCREEN_WIDTH}x{SCREEN_HEIGHT}");

    run(&mut display, &mut gallery, &clock);
}

#[cfg(feature = "window")]
fn run(
    display: &mut SimulatorDisplay<Rgb565>,
    gallery: &mut Gallery,
    clock: &SystemClock,
) {
    use std::thread;
    use std::time::Instant;

    use embedded_graphics_simulator::{SimulatorEvent, Window};

    use crate::config::{FRAME_TIME, WINDOW_SCALE};

    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Widget Gallery", &output_settings);
    let start = Instant::now();

    loop {
        let frame_start = Instant::now();
        let now_ms = start.elapsed().as_millis() as u64;

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => {
                    info!("closing, {}", gallery.boundary_summary());
                    return;
                }
                SimulatorEvent::KeyDown { repeat: false, .. } => gallery.bump_counter(now_ms),
                SimulatorEvent::MouseButtonUp { point, .. } => {
                    gallery.handle_tap(point, now_ms);
                }
                _ => {}
            }
        }

        gallery.update(now_ms, clock);
        gallery.paint(display);
        window.update(display);

        if let Some(remaining) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }
}

#[cfg(not(feature = "window"))]
fn run(
    display: &mut SimulatorDisplay<Rgb565>,
    gallery: &mut Gallery,
    clock: &SystemClock,
) {
    use log::error;

    use crate::config::{FRAME_TIME, HEADLESS_FRAMES, SNAPSHOT_PATH};

    // Simulated time: frames are rendered back to back.
    let frame_ms = FRAME_TIME.as_millis() as u64;
    let mut repaints = 0;
    for frame in 0..u64::from(HEADLESS_FRAMES) {
        let now_ms = frame * frame_ms;
        gallery.update(now_ms, clock);
        repaints += gallery.paint(display);
    }
    info!("rendered {HEADLESS_FRAMES} frames, {repaints} widget repaints, {}", gallery.boundary_summary());

    let output_settings = OutputSettingsBuilder::new().build();
    match display.to_rgb_output_image(&output_settings).save_png(SNAPSHOT_PATH) {
        Ok(()) => info!("snapshot written to {SNAPSHOT_PATH}"),
        Err(err) => error!("failed to write {SNAPSHOT_PATH}: {err}"),
    }
}
