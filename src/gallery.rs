//! The four widgets laid out on one display, plus the demo feeds that keep
//! the gauge and counter moving.

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
    text::Text,
};
use log::{debug, info, trace, warn};
use widget_common::colors::{BLACK, GRAY, LIGHT_GRAY};
use widget_common::counter::NumberFormat;
use widget_common::styles::LABEL_FONT;
use widget_common::widgets::{
    AnalogClock,
    AnalogClockConfig,
    Counter,
    CounterConfig,
    Gauge,
    GaugeConfig,
    MarkerStyle,
    NeedleType,
    PixelClock,
    PixelClockConfig,
    StrokeType,
};
use widget_common::{ClockObserver, ClockSample, WallClock};

use crate::config::{
    CAPTION_HEIGHT,
    CAPTION_OFFSET,
    CELL_HEIGHT,
    CELL_WIDTH,
    COUNTER_BUMP,
    COUNTER_PATTERN,
    COUNTER_START,
    COUNTER_STEP,
    COUNTER_STEP_MS,
    DIV_H_END,
    DIV_H_START,
    DIV_V_END,
    DIV_V_START,
    GAUGE_FEED_MS,
    GAUGE_SWEEP_PERIOD_S,
};

const DIVIDER_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(GRAY, 1);

// =============================================================================
// Layout
// =============================================================================

/// Grid cell, in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Analog,
    Pixel,
    Gauge,
    Counter,
}

impl Cell {
    pub const ALL: [Self; 4] = [Self::Analog, Self::Pixel, Self::Gauge, Self::Counter];

    pub const fn index(self) -> usize {
        match self {
            Self::Analog => 0,
            Self::Pixel => 1,
            Self::Gauge => 2,
            Self::Counter => 3,
        }
    }

    pub const fn caption(self) -> &'static str {
        match self {
            Self::Analog => "ANALOG CLOCK",
            Self::Pixel => "PIXEL CLOCK",
            Self::Gauge => "GAUGE",
            Self::Counter => "COUNTER (tap to bump)",
        }
    }

    /// Whole cell, caption included.
    pub const fn bounds(self) -> Rectangle {
        let index = self.index() as u32;
        let x = (index % 2) * CELL_WIDTH;
        let y = (index / 2) * CELL_HEIGHT;
        Rectangle::new(Point::new(x as i32, y as i32), Size::new(CELL_WIDTH, CELL_HEIGHT))
    }

    /// Area handed to the widget: below the caption and clear of the dividers.
    pub const fn widget_bounds(self) -> Rectangle {
        let cell = self.bounds();
        Rectangle::new(
            Point::new(cell.top_left.x + 1, cell.top_left.y + CAPTION_HEIGHT as i32),
            Size::new(CELL_WIDTH - 2, CELL_HEIGHT - CAPTION_HEIGHT - 1),
        )
    }

    /// Cell under a display point.
    pub fn at(point: Point) -> Option<Self> { Self::ALL.into_iter().find(|cell| cell.bounds().contains(point)) }
}

// =============================================================================
// Boundary Events
// =============================================================================

/// Counts and logs the clocks' boundary crossings.
#[derive(Debug, Default)]
pub struct BoundaryLog {
    name: &'static str,
    pub seconds: u32,
    pub minutes: u32,
    pub hours: u32,
}

impl BoundaryLog {
    pub const fn new(name: &'static str) -> Self { Self { name, seconds: 0, minutes: 0, hours: 0 } }
}

impl ClockObserver for BoundaryLog {
    fn on_second_passed(
        &mut self,
        now: &ClockSample,
    ) {
        self.seconds += 1;
        trace!("{}: second {:02}", self.name, now.second);
    }

    fn on_minute_passed(
        &mut self,
        now: &ClockSample,
    ) {
        self.minutes += 1;
        debug!("{}: minute {:02}:{:02}", self.name, now.hour, now.minute);
    }

    fn on_hour_passed(
        &mut self,
        now: &ClockSample,
    ) {
        self.hours += 1;
        info!("{}: hour {:02}:00", self.name, now.hour);
    }
}

// =============================================================================
// Gallery
// =============================================================================

pub struct Gallery {
    analog: AnalogClock,
    pixel: PixelClock,
    gauge: Gauge,
    counter: Counter,
    pub analog_log: BoundaryLog,
    pub pixel_log: BoundaryLog,
    next_gauge_feed_ms: u64,
    next_counter_step_ms: u64,
    chrome_drawn: bool,
}

impl Gallery {
    pub fn new(
        now_ms: u64,
        clock: &impl WallClock,
    ) -> Self {
        let mut analog = AnalogClock::new(AnalogClockConfig { marker_style: MarkerStyle::Numbers, ..Default::default() });
        analog.start(now_ms, clock);

        let mut pixel = PixelClock::new(PixelClockConfig::default());
        pixel.start(now_ms, clock);

        let mut gauge = Gauge::new(GaugeConfig {
            stroke_type: StrokeType::Rounded,
            needle_type: NeedleType::Arrow,
            ..Default::default()
        });
        gauge.set_unit("km/h");

        let format = NumberFormat::parse(COUNTER_PATTERN).unwrap_or_else(|err| {
            warn!("counter pattern {COUNTER_PATTERN:?} rejected ({err}), using the default");
            NumberFormat::default()
        });
        let counter = Counter::new(CounterConfig::default(), format, COUNTER_START);

        Self {
            analog,
            pixel,
            gauge,
            counter,
            analog_log: BoundaryLog::new("analog"),
            pixel_log: BoundaryLog::new("pixel"),
            next_gauge_feed_ms: now_ms,
            next_counter_step_ms: now_ms + COUNTER_STEP_MS,
            chrome_drawn: false,
        }
    }

    #[cfg(test)]
    pub const fn counter(&self) -> &Counter { &self.counter }

    #[cfg(test)]
    pub const fn gauge(&self) -> &Gauge { &self.gauge }

    /// Boundary crossings seen so far, for the exit log line.
    pub fn boundary_summary(&self) -> String {
        let (a, p) = (&self.analog_log, &self.pixel_log);
        format!(
            "analog {}s/{}m/{}h, pixel {}s/{}m/{}h",
            a.seconds, a.minutes, a.hours, p.seconds, p.minutes, p.hours
        )
    }

    /// Advance clocks, animations and demo feeds.
    pub fn update(
        &mut self,
        now_ms: u64,
        clock: &impl WallClock,
    ) {
        self.analog.tick(now_ms, clock, &mut self.analog_log);
        self.pixel.tick(now_ms, clock, &mut self.pixel_log);

        if now_ms >= self.next_gauge_feed_ms {
            self.next_gauge_feed_ms = now_ms + GAUGE_FEED_MS;
            self.gauge.set_value(gauge_signal(now_ms), now_ms);
        }
        self.gauge.tick(now_ms);

        if now_ms >= self.next_counter_step_ms {
            self.next_counter_step_ms = now_ms + COUNTER_STEP_MS;
            self.step_counter(COUNTER_STEP, now_ms);
        }
        self.counter.tick(now_ms);
    }

    /// The tap gesture: bump the counter.
    pub fn bump_counter(
        &mut self,
        now_ms: u64,
    ) {
        self.step_counter(COUNTER_BUMP, now_ms);
    }

    /// Route a click. Returns `true` if it landed on the counter.
    pub fn handle_tap(
        &mut self,
        point: Point,
        now_ms: u64,
    ) -> bool {
        if Cell::at(point) == Some(Cell::Counter) {
            self.bump_counter(now_ms);
            true
        } else {
            false
        }
    }

    fn step_counter(
        &mut self,
        delta: f64,
        now_ms: u64,
    ) {
        let target = self.counter.value() + delta;
        match self.counter.set_value(target, now_ms) {
            Ok(flips) => debug!("counter -> {} ({flips} flips)", self.counter.text()),
            Err(err) => warn!("counter stuck at {}: {err}", self.counter.text()),
        }
    }

    /// Paint every widget that asked for it. Returns how many were repainted.
    pub fn paint<D>(
        &mut self,
        display: &mut D,
    ) -> usize
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let full = !self.chrome_drawn;
        if full {
            display.clear(BLACK).ok();
            draw_chrome(display);
            self.chrome_drawn = true;
        }

        let mut painted = 0;
        if self.analog.take_repaint() || full {
            self.analog.paint(display, Cell::Analog.widget_bounds());
            painted += 1;
        }
        if self.pixel.take_repaint() || full {
            self.pixel.paint(display, Cell::Pixel.widget_bounds());
            painted += 1;
        }
        if self.gauge.take_repaint() || full {
            self.gauge.paint(display, Cell::Gauge.widget_bounds());
            painted += 1;
        }
        if self.counter.take_repaint() || full {
            self.counter.paint(display, Cell::Counter.widget_bounds());
            painted += 1;
        }
        painted
    }
}

/// Gauge demo reading: a sine sweep between 5 and 95.
fn gauge_signal(now_ms: u64) -> f32 {
    let t = now_ms as f32 / 1000.0;
    let phase = t / GAUGE_SWEEP_PERIOD_S * std::f32::consts::TAU;
    50.0 + 45.0 * phase.sin()
}

fn draw_chrome<D>(display: &mut D)
where
    D: DrawTarget<Color = Rgb565>,
{
    Line::new(DIV_V_START, DIV_V_END).into_styled(DIVIDER_STYLE).draw(display).ok();
    Line::new(DIV_H_START, DIV_H_END).into_styled(DIVIDER_STYLE).draw(display).ok();

    let style = MonoTextStyle::new(LABEL_FONT, LIGHT_GRAY);
    for cell in Cell::ALL {
        Text::new(cell.caption(), cell.bounds().top_left + CAPTION_OFFSET, style).draw(display).ok();
    }
}
