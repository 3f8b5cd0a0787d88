//! Numeric format patterns for the counter.
//!
//! A small subset of the familiar spreadsheet-style patterns:
//!
//! | Pattern | 1234.5 | 0.5 |
//! |---------|--------|-----|
//! | `0.00` | `1234.50` | `0.50` |
//! | `#,##0.00` | `1,234.50` | `0.50` |
//! | `000` | `1235` | `001` |
//! | `0.##` | `1234.5` | `0.5` |
//!
//! `0` before the decimal point sets the minimum integer digits, `,` in the
//! integer part enables grouping by thousands, `0` after the point is a
//! required decimal and `#` an optional one (trailing zeros trimmed).
//! Rounding is half away from zero.

use core::fmt::Write;

use heapless::String;

use crate::config::{MAX_PATTERN_LEN, MAX_SLOTS};
use crate::error::WidgetError;

/// Formatted counter text.
pub type DisplayText = String<MAX_SLOTS>;

/// Largest magnitude (in scaled units) that still formats exactly.
const MAX_SCALED: f64 = 9_007_199_254_740_992.0; // 2^53

/// Parsed format pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    pattern: String<MAX_PATTERN_LEN>,
    min_integer_digits: u8,
    required_decimals: u8,
    max_decimals: u8,
    grouping: bool,
}

impl NumberFormat {
    /// Parse a pattern. Fails with `CapacityExceeded` for patterns longer than the buffer.
    pub fn parse(pattern: &str) -> Result<Self, WidgetError> {
        let mut stored = String::new();
        stored
            .push_str(pattern)
            .map_err(|_| WidgetError::CapacityExceeded { what: "format pattern", capacity: MAX_PATTERN_LEN })?;

        let (integer_part, fraction_part) = match pattern.split_once('.') {
            Some((int, frac)) => (int, frac),
            None => (pattern, ""),
        };

        let min_integer_digits = integer_part.chars().filter(|&c| c == '0').count() as u8;
        let grouping = integer_part.contains(',');
        let required_decimals = fraction_part.chars().filter(|&c| c == '0').count() as u8;
        let max_decimals = fraction_part.chars().filter(|&c| c == '0' || c == '#').count() as u8;

        Ok(Self { pattern: stored, min_integer_digits, required_decimals, max_decimals, grouping })
    }

    #[inline]
    pub fn pattern(&self) -> &str { &self.pattern }

    #[inline]
    pub const fn max_decimals(&self) -> u8 { self.max_decimals }

    /// Render `value`.
    ///
    /// Non-finite values and magnitudes too large to format exactly fail
    /// with `CapacityExceeded`, as does text longer than the slot buffer.
    pub fn format(
        &self,
        value: f64,
    ) -> Result<DisplayText, WidgetError> {
        let overflow = WidgetError::CapacityExceeded { what: "formatted value", capacity: MAX_SLOTS };

        let scale = pow10(self.max_decimals);
        let magnitude = if value < 0.0 { -value } else { value };
        let scaled = magnitude * scale as f64 + 0.5;
        if !scaled.is_finite() || scaled >= MAX_SCALED {
            return Err(overflow);
        }
        let scaled = scaled as u64;

        let mut integer = scaled / scale;
        let mut fraction = scaled % scale;

        // Trim optional decimals that are zero.
        let mut decimals = self.max_decimals;
        while decimals > self.required_decimals && fraction % 10 == 0 {
            fraction /= 10;
            decimals -= 1;
        }

        let mut text = DisplayText::new();
        if value < 0.0 && scaled > 0 {
            text.push('-').map_err(|_| overflow)?;
        }

        // Integer digits, least significant first.
        let mut digits: heapless::Vec<u8, MAX_SLOTS> = heapless::Vec::new();
        loop {
            digits.push((integer % 10) as u8).map_err(|_| overflow)?;
            integer /= 10;
            if integer == 0 && digits.len() >= usize::from(self.min_integer_digits) {
                break;
            }
        }
        if self.min_integer_digits == 0 && digits.len() == 1 && digits[0] == 0 && decimals > 0 {
            digits.clear();
        }

        for (i, digit) in digits.iter().enumerate().rev() {
            text.push(char::from(b'0' + *digit)).map_err(|_| overflow)?;
            if self.grouping && i > 0 && i % 3 == 0 {
                text.push(',').map_err(|_| overflow)?;
            }
        }

        if decimals > 0 {
            text.push('.').map_err(|_| overflow)?;
            write!(text, "{:0width$}", fraction, width = usize::from(decimals)).map_err(|_| overflow)?;
        }

        Ok(text)
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            pattern: String::try_from("0.00").unwrap_or_default(),
            min_integer_digits: 1,
            required_decimals: 2,
            max_decimals: 2,
            grouping: false,
        }
    }
}

const fn pow10(exp: u8) -> u64 {
    let mut result = 1_u64;
    let mut i = 0;
    while i < exp {
        result = result.saturating_mul(10);
        i += 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(
        pattern: &str,
        value: f64,
    ) -> DisplayText {
        NumberFormat::parse(pattern).unwrap().format(value).unwrap()
    }

    #[test]
    fn test_fixed_decimals() {
        assert_eq!(fmt("0.00", 9.99), "9.99");
        assert_eq!(fmt("0.00", 10.0), "10.00");
        assert_eq!(fmt("0.00", 0.5), "0.50");
        assert_eq!(fmt("0.00", 2.375), "2.38", "Rounds half away from zero");
        assert_eq!(fmt("0.00", -2.375), "-2.38");
    }

    #[test]
    fn test_integer_patterns() {
        assert_eq!(fmt("0", 1234.5), "1235");
        assert_eq!(fmt("000", 7.0), "007", "Minimum integer digits pad with zeros");
        assert_eq!(fmt("000", 12345.0), "12345");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(fmt("#,##0.00", 1234.5), "1,234.50");
        assert_eq!(fmt("#,##0", 1_234_567.0), "1,234,567");
        assert_eq!(fmt("#,##0", 999.0), "999");
        assert_eq!(fmt("#,##0", 0.0), "0");
    }

    #[test]
    fn test_optional_decimals_trimmed() {
        assert_eq!(fmt("0.##", 1234.5), "1234.5");
        assert_eq!(fmt("0.##", 3.0), "3");
        assert_eq!(fmt("0.0#", 3.0), "3.0", "Required decimal stays");
        assert_eq!(fmt("0.0#", 3.14159), "3.14");
    }

    #[test]
    fn test_no_leading_zero_pattern() {
        assert_eq!(fmt("#.00", 0.5), ".50");
        assert_eq!(fmt("#.00", 12.5), "12.50");
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(fmt("0.00", -3.5), "-3.50");
        assert_eq!(fmt("0.00", -0.001), "0.00", "Rounds to zero without a sign");
        assert_eq!(fmt("#,##0", -1500.0), "-1,500");
    }

    #[test]
    fn test_unrepresentable_values() {
        let format = NumberFormat::parse("0.00").unwrap();
        assert!(format.format(f64::NAN).is_err());
        assert!(format.format(f64::INFINITY).is_err());
        assert!(format.format(1e300).is_err());
    }

    #[test]
    fn test_pattern_too_long() {
        let result = NumberFormat::parse("0.000000000000000000000000000");
        assert_eq!(result, Err(WidgetError::CapacityExceeded { what: "format pattern", capacity: MAX_PATTERN_LEN }));
    }

    #[test]
    fn test_default_matches_two_decimals() {
        assert_eq!(NumberFormat::default(), NumberFormat::parse("0.00").unwrap());
    }
}
