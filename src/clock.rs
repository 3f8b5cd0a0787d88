//! Wall clock backed by `std::time::SystemTime`.
//!
//! The widget library never reads a clock itself. This is the host side of
//! `WallClock`: UTC time of day, shifted by a fixed offset in minutes.

use std::time::{SystemTime, UNIX_EPOCH};

use log::warn;
use widget_common::{ClockSample, WallClock};

const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_DAY: i64 = 86_400_000;

/// Environment variable holding the UTC offset in minutes, e.g. `120` or `-300`.
pub const UTC_OFFSET_ENV: &str = "GALLERY_UTC_OFFSET";

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    offset_minutes: i32,
}

impl SystemClock {
    pub const fn new(offset_minutes: i32) -> Self { Self { offset_minutes } }

    /// Read the offset from [`UTC_OFFSET_ENV`]. Missing or malformed values mean UTC.
    pub fn from_env() -> Self {
        match std::env::var(UTC_OFFSET_ENV) {
            Ok(raw) => match raw.trim().parse::<i32>() {
                Ok(minutes) => Self::new(minutes),
                Err(err) => {
                    warn!("{UTC_OFFSET_ENV}={raw:?} is not a minute offset ({err}), using UTC");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Time of day for `unix_ms` milliseconds since the epoch.
    pub fn sample_at(
        &self,
        unix_ms: i64,
    ) -> ClockSample {
        let local = unix_ms + i64::from(self.offset_minutes) * MS_PER_MINUTE;
        ClockSample::from_millis_of_day(local.rem_euclid(MS_PER_DAY) as u64)
    }
}

impl WallClock for SystemClock {
    fn sample(&self) -> ClockSample {
        let unix_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX));
        self.sample_at(unix_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utc_time_of_day() {
        // 2024-01-01T13:45:30.250Z
        let clock = SystemClock::new(0);
        assert_eq!(clock.sample_at(1_704_116_730_250), ClockSample::new(13, 45, 30, 250));
    }

    #[test]
    fn test_offset_wraps_across_midnight() {
        let clock = SystemClock::new(-60);
        assert_eq!(clock.sample_at(30 * MS_PER_MINUTE), ClockSample::new(23, 30, 0, 0), "00:30 UTC is 23:30 at -1h");

        let clock = SystemClock::new(90);
        assert_eq!(clock.sample_at(23 * 60 * MS_PER_MINUTE), ClockSample::new(0, 30, 0, 0));
    }
}
