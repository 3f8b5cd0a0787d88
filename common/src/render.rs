//! Repaint request tracking.
//!
//! Widgets never draw on their own. State changes (a tick, a new value, a
//! config setter) mark the widget dirty, and the host drains the flag once
//! per frame to decide whether to call `paint`.
//!
//! # Coalescing
//!
//! | Event | Effect |
//! |-------|--------|
//! | `request()` while clean | becomes pending |
//! | `request()` while pending | counted as coalesced, no other effect |
//! | `take()` | returns pending state and clears it |
//!
//! At most one repaint is ever outstanding; extra requests between two
//! frames are redundant. A fresh tracker starts pending so the first frame
//! always paints.

/// Advisory, coalescing repaint flag owned by one widget.
#[derive(Debug, Clone)]
pub struct RepaintRequest {
    /// Whether a repaint is outstanding.
    pending: bool,

    /// Requests that arrived while one was already outstanding.
    coalesced: u32,
}

impl RepaintRequest {
    /// Create a tracker for a widget that has never been painted.
    pub const fn new() -> Self { Self { pending: true, coalesced: 0 } }

    /// Ask for a repaint.
    #[inline]
    pub const fn request(&mut self) {
        if self.pending {
            self.coalesced = self.coalesced.saturating_add(1);
        } else {
            self.pending = true;
        }
    }

    /// Whether a repaint is outstanding, without consuming it.
    #[inline]
    pub const fn is_pending(&self) -> bool { self.pending }

    /// Consume the outstanding request. Returns `true` if the widget should be painted now.
    #[inline]
    pub const fn take(&mut self) -> bool {
        let pending = self.pending;
        self.pending = false;
        pending
    }

    /// Number of redundant requests absorbed since creation.
    #[inline]
    pub const fn coalesced(&self) -> u32 { self.coalesced }
}

impl Default for RepaintRequest {
    fn default() -> Self { Self::new() }
}
