//! Progress curves for finite-time actions.

use std::f32::consts::PI;

/// Maps linear progress `t` in `[0, 1]` onto a curve with the same endpoints.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Easing {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    SineInOut,
}

impl Easing {
    /// Applies the curve. Input outside `[0, 1]` is clamped first.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => t * (2.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    const ALL: [Easing; 5] = [
        Easing::Linear,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::SineInOut,
    ];

    #[test]
    fn endpoints_are_fixed() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-6, "{easing}");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing}");
        }
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(Easing::QuadIn.apply(2.0), 1.0);
        assert_eq!(Easing::QuadOut.apply(-1.0), 0.0);
    }

    #[test]
    fn parses_snake_case_names() {
        assert_eq!(Easing::from_str("quad_in_out"), Ok(Easing::QuadInOut));
        assert_eq!(Easing::from_str("LINEAR"), Ok(Easing::Linear));
        assert_eq!(Easing::SineInOut.as_ref(), "sine_in_out");
        assert!(Easing::from_str("bounce").is_err());
    }
}
