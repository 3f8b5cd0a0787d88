//! Odometer-style digit sequence.
//!
//! The controller turns a numeric value into a row of glyph slots, one per
//! character of the formatted text, and flips only the slots whose character
//! changed.
//!
//! # Update Strategy
//!
//! | Old vs new text | Effect |
//! |-----------------|--------|
//! | different length | hard rebuild: fresh slots, no animation |
//! | same char at a position | glyph confirmed, channels reset |
//! | different digit/separator | three-phase flip on that slot |
//! | any other difference | glyph set directly |
//!
//! # Flip Phases
//!
//! ```text
//! 0 ─────────── k1 ──── k2 ──────────────────── 1
//!   old glyph out   swap   new glyph in
//!   (CubicIn)     (at 0.5) (CubicOut)
//! ```
//!
//! The glyph leaves upward and the new one enters from below when the value
//! increases, and the reverse when it decreases. Travel drives the other
//! channels: opacity `1 − |v|/T`, X rotation `v · factor`, scale
//! `1 − |v|/divisor`.
//!
//! Every value change first cancels all running flips, which puts each slot
//! back on its baseline (opacity 1, rotation 0, scale 1, translation 0).

pub mod format;

use heapless::Vec;
use log::{debug, trace, warn};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

pub use format::{DisplayText, NumberFormat};

use crate::animations::{AnimationDriver, AnimationTarget, Segment, Timing};
use crate::config::{
    COUNTER_DURATION_MS,
    COUNTER_KEYFRAME_1,
    COUNTER_KEYFRAME_2,
    COUNTER_MAX_DURATION_FACTOR,
    COUNTER_MIN_DURATION_FACTOR,
    COUNTER_ROTATION_FACTOR,
    COUNTER_SCALE_DIVISOR,
    COUNTER_TRANSLATION,
    DIGIT_HEIGHT_MULTIPLIER,
    DIGIT_WIDTH_MULTIPLIER,
    MAX_SLOTS,
    SEPARATOR_WIDTH_MULTIPLIER,
};
use crate::easing::Easing;
use crate::error::WidgetError;

/// Seed for controllers built without an explicit random source.
const DEFAULT_SEED: u64 = 0x5EED_D161;

/// Digits and the separators a flip is allowed to animate.
#[inline]
pub fn is_flip_glyph(c: char) -> bool { c.is_ascii_digit() || matches!(c, ',' | '.' | ' ') }

/// Glyphs that get the narrow slot width.
#[inline]
pub fn is_separator(c: char) -> bool { matches!(c, ',' | '.') }

// =============================================================================
// Parameters
// =============================================================================

/// Flip animation knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipParams {
    /// Base run length before the random factor.
    pub duration_ms: u32,
    /// Vertical travel in pixels.
    pub translation: f32,
    /// Degrees of X rotation per pixel of travel.
    pub rotation_factor: f32,
    /// Travel divided by this is subtracted from the scale.
    pub scale_divisor: f32,
    pub keyframe_1: f32,
    pub keyframe_2: f32,
    /// Draw a per-slot duration factor from `[min_factor, max_factor]`.
    pub randomize: bool,
    pub min_factor: f32,
    pub max_factor: f32,
}

impl Default for FlipParams {
    fn default() -> Self {
        Self {
            duration_ms: COUNTER_DURATION_MS,
            translation: COUNTER_TRANSLATION,
            rotation_factor: COUNTER_ROTATION_FACTOR,
            scale_divisor: COUNTER_SCALE_DIVISOR,
            keyframe_1: COUNTER_KEYFRAME_1,
            keyframe_2: COUNTER_KEYFRAME_2,
            randomize: true,
            min_factor: COUNTER_MIN_DURATION_FACTOR,
            max_factor: COUNTER_MAX_DURATION_FACTOR,
        }
    }
}

impl FlipParams {
    /// The three flip segments for a value moving up (`increasing`) or down.
    pub fn segments(
        &self,
        increasing: bool,
    ) -> [Segment<FlipChannel>; 3] {
        let travel = if increasing { -self.translation } else { self.translation };
        [
            Segment::new(FlipChannel::SlideOut, 0.0, self.keyframe_1, 0.0, travel).with_easing(Easing::CubicIn),
            Segment::new(FlipChannel::Swap, self.keyframe_1, self.keyframe_2, 0.0, 1.0),
            Segment::new(FlipChannel::SlideIn, self.keyframe_2, 1.0, -travel, 0.0).with_easing(Easing::CubicOut),
        ]
    }
}

/// Slot sizing relative to the font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotLayout {
    pub font_size: f32,
    pub digit_width_multiplier: f32,
    pub separator_width_multiplier: f32,
    pub height_multiplier: f32,
}

impl Default for SlotLayout {
    fn default() -> Self {
        Self {
            font_size: 24.0,
            digit_width_multiplier: DIGIT_WIDTH_MULTIPLIER,
            separator_width_multiplier: SEPARATOR_WIDTH_MULTIPLIER,
            height_multiplier: DIGIT_HEIGHT_MULTIPLIER,
        }
    }
}

impl SlotLayout {
    /// Container size for `glyph`, never below one pixel either way.
    pub fn slot_size(
        &self,
        glyph: char,
    ) -> (u32, u32) {
        let multiplier =
            if is_separator(glyph) { self.separator_width_multiplier } else { self.digit_width_multiplier };
        let width = (self.font_size * multiplier).max(1.0);
        let height = (self.font_size * self.height_multiplier).max(1.0);
        (width as u32, height as u32)
    }
}

// =============================================================================
// Slots
// =============================================================================

/// Flip animation output channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipChannel {
    SlideOut,
    Swap,
    SlideIn,
}

/// What the paint routine needs to draw one slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphVisual {
    pub glyph: char,
    pub translation_y: f32,
    pub opacity: f32,
    pub rotation_x: f32,
    pub scale: f32,
}

impl GlyphVisual {
    pub const fn at_rest(glyph: char) -> Self {
        Self { glyph, translation_y: 0.0, opacity: 1.0, rotation_x: 0.0, scale: 1.0 }
    }

    /// Whether every channel sits on its idle value.
    pub fn is_at_rest(&self) -> bool {
        self.translation_y == 0.0 && self.opacity == 1.0 && self.rotation_x == 0.0 && self.scale == 1.0
    }

    fn reset_channels(&mut self) { *self = Self::at_rest(self.glyph); }

    fn apply_travel(
        &mut self,
        travel: f32,
        params: &FlipParams,
    ) {
        let distance = if travel < 0.0 { -travel } else { travel };
        self.translation_y = travel;
        self.opacity = if params.translation > 0.0 { (1.0 - distance / params.translation).clamp(0.0, 1.0) } else { 1.0 };
        self.rotation_x = travel * params.rotation_factor;
        self.scale = if params.scale_divisor > 0.0 { 1.0 - distance / params.scale_divisor } else { 1.0 };
    }
}

/// Animation target for one slot.
#[derive(Debug, Clone)]
struct SlotState {
    visual: GlyphVisual,
    incoming: char,
    params: FlipParams,
    /// Set by a non-cancelled completion, drained by the controller.
    finished: bool,
}

impl AnimationTarget<FlipChannel> for SlotState {
    fn on_sample(
        &mut self,
        channel: FlipChannel,
        value: f32,
        u: f32,
    ) {
        match channel {
            FlipChannel::SlideOut | FlipChannel::SlideIn => self.visual.apply_travel(value, &self.params),
            FlipChannel::Swap => {
                if u >= 0.5 && self.visual.glyph != self.incoming {
                    self.visual.glyph = self.incoming;
                }
            }
        }
    }

    fn restore_baseline(&mut self) { self.visual.reset_channels(); }

    fn on_complete(
        &mut self,
        cancelled: bool,
    ) {
        if !cancelled {
            self.visual = GlyphVisual::at_rest(self.incoming);
            self.finished = true;
        }
    }
}

/// One character position of the rendered text.
#[derive(Debug, Clone)]
pub struct DigitSlot {
    position: usize,
    generation: u32,
    size: (u32, u32),
    state: SlotState,
    driver: AnimationDriver<FlipChannel, 3>,
}

impl DigitSlot {
    fn new(
        position: usize,
        generation: u32,
        glyph: char,
        params: FlipParams,
    ) -> Self {
        Self {
            position,
            generation,
            size: (1, 1),
            state: SlotState { visual: GlyphVisual::at_rest(glyph), incoming: glyph, params, finished: false },
            driver: AnimationDriver::new(),
        }
    }

    #[inline]
    pub const fn position(&self) -> usize { self.position }

    #[inline]
    pub const fn generation(&self) -> u32 { self.generation }

    /// Glyph currently shown.
    #[inline]
    pub const fn glyph(&self) -> char { self.state.visual.glyph }

    #[inline]
    pub const fn visual(&self) -> &GlyphVisual { &self.state.visual }

    /// Container width and height in pixels.
    #[inline]
    pub const fn size(&self) -> (u32, u32) { self.size }

    #[inline]
    pub const fn is_animating(&self) -> bool { self.driver.is_running() }

    /// Show `glyph` at rest, no animation.
    fn set_glyph(
        &mut self,
        glyph: char,
    ) {
        self.state.incoming = glyph;
        self.state.visual = GlyphVisual::at_rest(glyph);
    }

    fn cancel(&mut self) -> bool { self.driver.cancel(&mut self.state) }

    fn start_flip(
        &mut self,
        old: char,
        new: char,
        increasing: bool,
        duration_ms: u32,
        now_ms: u64,
    ) -> Result<(), WidgetError> {
        let segments = self.state.params.segments(increasing);
        self.state.visual = GlyphVisual::at_rest(old);
        self.state.incoming = new;
        self.state.finished = false;
        self.driver.start(now_ms, duration_ms, Timing::WallClock, &segments, &mut self.state).map(|_| ())
    }
}

/// A slot's flip finished normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub position: usize,
    pub generation: u32,
}

// =============================================================================
// Controller
// =============================================================================

/// Owns the slots of one counter and diffs value changes into flips.
#[derive(Debug)]
pub struct DigitSequenceController<R: RngCore = SmallRng> {
    format: NumberFormat,
    value: f64,
    text: DisplayText,
    slots: Vec<DigitSlot, MAX_SLOTS>,
    params: FlipParams,
    layout: SlotLayout,
    rng: R,
    /// Incremented on every rebuild; completions from older slots are stale.
    generation: u32,
    active: usize,
}

impl DigitSequenceController<SmallRng> {
    /// Controller with a fixed-seed random source.
    pub fn new(
        format: NumberFormat,
        value: f64,
    ) -> Self {
        Self::with_rng(format, value, SmallRng::seed_from_u64(DEFAULT_SEED))
    }
}

impl<R: RngCore> DigitSequenceController<R> {
    /// Controller drawing duration factors from `rng`.
    pub fn with_rng(
        format: NumberFormat,
        value: f64,
        rng: R,
    ) -> Self {
        let mut controller = Self {
            format,
            value,
            text: DisplayText::new(),
            slots: Vec::new(),
            params: FlipParams::default(),
            layout: SlotLayout::default(),
            rng,
            generation: 0,
            active: 0,
        };
        controller.render_static();
        controller
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub const fn value(&self) -> f64 { self.value }

    /// Formatted text of the current value.
    #[inline]
    pub fn text(&self) -> &str { &self.text }

    #[inline]
    pub fn slots(&self) -> &[DigitSlot] { &self.slots }

    #[inline]
    pub const fn format(&self) -> &NumberFormat { &self.format }

    #[inline]
    pub const fn params(&self) -> &FlipParams { &self.params }

    #[inline]
    pub const fn layout(&self) -> &SlotLayout { &self.layout }

    #[inline]
    pub const fn generation(&self) -> u32 { self.generation }

    /// Flips started by the last value change that have not completed yet.
    #[inline]
    pub const fn active_animations(&self) -> usize { self.active }

    /// Total row width including `spacing` between slots.
    pub fn total_width(
        &self,
        spacing: u32,
    ) -> u32 {
        let widths: u32 = self.slots.iter().map(|s| s.size.0).sum();
        widths + spacing * (self.slots.len().saturating_sub(1) as u32)
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    /// Replace the flip parameters. Applies to flips started afterwards.
    ///
    /// Keyframes must satisfy `0 < k1 < k2 < 1`. Duration factors must be
    /// finite and non-negative; a reversed factor band is swapped.
    pub fn set_params(
        &mut self,
        mut params: FlipParams,
    ) -> Result<(), WidgetError> {
        crate::animations::validate_segments(&params.segments(true))?;
        let valid_factor = |f: f32| f.is_finite() && f >= 0.0;
        if !valid_factor(params.min_factor) || !valid_factor(params.max_factor) {
            return Err(WidgetError::InvalidRange { min: params.min_factor, max: params.max_factor });
        }
        if params.min_factor > params.max_factor {
            core::mem::swap(&mut params.min_factor, &mut params.max_factor);
        }
        self.params = params;
        for slot in &mut self.slots {
            slot.state.params = params;
        }
        Ok(())
    }

    /// Turn the per-slot duration jitter on or off.
    pub fn set_randomize(
        &mut self,
        randomize: bool,
    ) {
        self.params.randomize = randomize;
    }

    pub fn set_layout(
        &mut self,
        layout: SlotLayout,
    ) {
        self.layout = layout;
        self.update_layout();
    }

    /// Switch the format pattern and re-render the current value without animation.
    pub fn set_format(
        &mut self,
        format: NumberFormat,
    ) {
        self.format = format;
        self.render_static();
    }

    // -------------------------------------------------------------------------
    // Value Changes
    // -------------------------------------------------------------------------

    /// Move to `value`, flipping changed slots. Returns the number of flips started.
    ///
    /// A value that cannot be formatted leaves the display untouched.
    pub fn set_value(
        &mut self,
        value: f64,
        now_ms: u64,
    ) -> Result<usize, WidgetError> {
        let new_text = self.format.format(value).inspect_err(|err| warn!("counter value {value} rejected: {err}"))?;
        let increasing = value > self.value;
        self.value = value;
        Ok(self.transition_to(&new_text, increasing, now_ms))
    }

    fn transition_to(
        &mut self,
        new_text: &str,
        increasing: bool,
        now_ms: u64,
    ) -> usize {
        self.cancel_all();

        let old_text = self.text.clone();
        self.text.clear();
        self.text.push_str(new_text).ok();

        if new_text.chars().count() != self.slots.len() {
            self.rebuild();
            return 0;
        }

        let mut started = 0;
        for ((old, new), index) in old_text.chars().zip(new_text.chars()).zip(0..) {
            let duration_ms = self.flip_duration();
            let Some(slot) = self.slots.get_mut(index) else { break };

            if old == new {
                slot.set_glyph(new);
            } else if is_flip_glyph(old) || is_flip_glyph(new) {
                match slot.start_flip(old, new, increasing, duration_ms, now_ms) {
                    Ok(()) => started += 1,
                    Err(err) => {
                        warn!("flip for slot {index} rejected: {err}");
                        slot.set_glyph(new);
                    }
                }
            } else {
                slot.set_glyph(new);
            }
        }

        self.active = started;
        self.update_layout();
        started
    }

    /// Base duration, scaled by a random factor when jitter is enabled.
    fn flip_duration(&mut self) -> u32 {
        let base = self.params.duration_ms;
        if !self.params.randomize {
            return base;
        }
        let (min, max) = (self.params.min_factor, self.params.max_factor);
        if !(min.is_finite() && max.is_finite() && min <= max) {
            return base;
        }
        let factor = self.rng.gen_range(min..=max);
        (base as f32 * factor) as u32
    }

    /// Cancel every running flip. Each slot comes to rest on its settled glyph.
    pub fn cancel_all(&mut self) {
        let mut cancelled = 0;
        for slot in &mut self.slots {
            if slot.cancel() {
                let settled = slot.state.incoming;
                slot.set_glyph(settled);
                cancelled += 1;
            }
        }
        if cancelled > 0 {
            debug!("cancelled {cancelled} running digit flips");
        }
        self.active = 0;
    }

    /// Show the current value with no animation, rebuilding if the length changed.
    fn render_static(&mut self) {
        self.cancel_all();
        match self.format.format(self.value) {
            Ok(text) => self.text = text,
            Err(err) => {
                warn!("counter value {} not representable: {err}", self.value);
                self.text.clear();
            }
        }

        if self.text.chars().count() == self.slots.len() {
            for (slot, glyph) in self.slots.iter_mut().zip(self.text.chars()) {
                slot.set_glyph(glyph);
            }
            self.update_layout();
        } else {
            self.rebuild();
        }
    }

    /// Discard all slots and create one per character of the current text.
    fn rebuild(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.slots.clear();
        for (position, glyph) in self.text.chars().enumerate() {
            // Text capacity equals slot capacity.
            self.slots.push(DigitSlot::new(position, self.generation, glyph, self.params)).ok();
        }
        self.active = 0;
        debug!("counter rebuilt: {} slots for {:?} (generation {})", self.slots.len(), self.text.as_str(), self.generation);
        self.update_layout();
    }

    /// Recompute each slot's container size from the font size and its glyph.
    fn update_layout(&mut self) {
        let layout = self.layout;
        for slot in &mut self.slots {
            // Size follows the settled text, not a glyph that is mid-swap.
            slot.size = layout.slot_size(slot.state.incoming);
        }
    }

    // -------------------------------------------------------------------------
    // Ticking
    // -------------------------------------------------------------------------

    /// Advance every flip. Returns `true` if any slot changed (repaint needed).
    pub fn tick(
        &mut self,
        now_ms: u64,
    ) -> bool {
        let mut changed = false;
        let mut completions: Vec<Completion, MAX_SLOTS> = Vec::new();

        for slot in &mut self.slots {
            if slot.driver.tick(now_ms, &mut slot.state) {
                changed = true;
            }
            if core::mem::take(&mut slot.state.finished) {
                completions.push(Completion { position: slot.position, generation: slot.generation }).ok();
            }
        }

        for completion in completions {
            if let Err(err) = self.handle_completion(completion) {
                trace!("{err}");
            }
        }
        changed
    }

    /// Account for a finished flip.
    ///
    /// Completions for slots discarded by a rebuild are rejected with
    /// `StaleHandle` and change nothing.
    pub fn handle_completion(
        &mut self,
        completion: Completion,
    ) -> Result<(), WidgetError> {
        let current = completion.generation == self.generation && completion.position < self.slots.len();
        if !current {
            return Err(WidgetError::StaleHandle { position: completion.position, generation: completion.generation });
        }
        self.active = self.active.saturating_sub(1);
        Ok(())
    }
}
