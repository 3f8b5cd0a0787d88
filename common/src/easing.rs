//! Easing curves applied to normalized segment progress.

/// Easing function mapping progress `u` in [0, 1] to eased progress in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// No easing.
    #[default]
    Linear,
    /// Quadratic, slow start.
    EaseIn,
    /// Quadratic, slow end.
    EaseOut,
    /// Cubic, slow start. Used for glyphs leaving their slot.
    CubicIn,
    /// Cubic, slow end. Used for glyphs entering their slot.
    CubicOut,
    /// Cubic, slow start and end.
    CubicInOut,
}

impl Easing {
    /// Apply the curve. Input is clamped to [0, 1]; both endpoints map to themselves exactly.
    pub fn apply(
        self,
        u: f32,
    ) -> f32 {
        let u = u.clamp(0.0, 1.0);
        match self {
            Self::Linear => u,
            Self::EaseIn => u * u,
            Self::EaseOut => 1.0 - (1.0 - u) * (1.0 - u),
            Self::CubicIn => u * u * u,
            Self::CubicOut => {
                let inv = 1.0 - u;
                1.0 - inv * inv * inv
            }
            Self::CubicInOut => {
                if u < 0.5 {
                    4.0 * u * u * u
                } else {
                    let inv = 1.0 - u;
                    1.0 - 4.0 * inv * inv * inv
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 6] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
    ];

    #[test]
    fn test_easing_endpoints_exact() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} should map 0 to 0");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?} should map 1 to 1");
        }
    }

    #[test]
    fn test_easing_clamping() {
        assert_eq!(Easing::Linear.apply(-0.5), 0.0);
        assert_eq!(Easing::Linear.apply(1.5), 1.0);
        assert_eq!(Easing::CubicOut.apply(2.0), 1.0);
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = easing.apply(i as f32 / 100.0);
                assert!(v >= prev, "{easing:?} decreased at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn test_cubic_in_starts_slow() {
        assert!(Easing::CubicIn.apply(0.5) < 0.5);
        assert!(Easing::CubicOut.apply(0.5) > 0.5);
    }
}
