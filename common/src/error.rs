//! Error taxonomy for the widget core.
//!
//! Nothing here is fatal to the host: paint routines recover from every
//! variant locally (zero sweep, skipped glyph, ignored callback) and the
//! `Result`s exist so pure functions stay testable.

use thiserror::Error;

/// Errors raised by geometry, glyph lookup, animation setup and slot bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum WidgetError {
    /// Degenerate value range, e.g. a gauge with `min == max`.
    #[error("invalid range: min {min} must be below max {max}")]
    InvalidRange { min: f32, max: f32 },

    /// Index outside its lookup domain (glyph digit, row or column).
    #[error("{what} {value} out of range (limit {limit})")]
    OutOfRange { what: &'static str, value: i32, limit: i32 },

    /// Animation segment phases are not ascending, overlap, or leave [0, 1].
    #[error("animation segment {index} has an invalid phase range")]
    InvalidPhase { index: usize },

    /// Callback for a slot that was discarded by a rebuild.
    #[error("stale animation callback for slot {position} (generation {generation})")]
    StaleHandle { position: usize, generation: u32 },

    /// A fixed-capacity buffer could not hold the requested content.
    #[error("{what} exceeds capacity {capacity}")]
    CapacityExceeded { what: &'static str, capacity: usize },
}
