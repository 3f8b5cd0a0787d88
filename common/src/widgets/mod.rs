//! Self-drawing widget surfaces.
//!
//! Every surface owns its state, ticks from the host loop, and paints into any
//! `DrawTarget<Color = Rgb565>` within the bounds it is given. Geometry is
//! recomputed from those bounds on each paint.

mod analog_clock;
mod counter;
mod gauge;
mod pixel_clock;
mod primitives;

pub use analog_clock::{AnalogClock, AnalogClockConfig, MarkerStyle};
pub use counter::{Counter, CounterConfig};
pub use gauge::{Gauge, GaugeConfig, NeedleType, StrokeType, TextPosition, UnitLabel, ValueText};
pub use pixel_clock::{PixelClock, PixelClockConfig};
pub use primitives::{GlyphTransform, draw_dot, draw_line, draw_radial_line, fill_pixel_square};
