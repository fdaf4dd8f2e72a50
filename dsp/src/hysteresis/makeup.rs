//! Unify loudness across different hysteresis configurations.
//!
//! The estimated amplitude is a rational function of drive, saturation and
//! width. Its coefficients were fitted offline against a dataset of peak
//! amplitudes of the simulation driven by a 100 Hz sine. The published set
//! is available as [`MakeupCoefficients::FITTED`], a different calibration
//! can be injected without touching the formula.

/// Drive is floored to this value, the estimate grows unbounded towards 0.
pub const MIN_DRIVE: f32 = 0.1;

/// Coefficients of the amplitude estimate
///
/// ```text
/// ((a1 + a2 d + a3 w^2) (a4 + a5 s + a6 s^2)) / (a7 + a8 w + a9 d^2) + b
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MakeupCoefficients {
    pub a: [f32; 9],
    pub b: f32,
}

impl MakeupCoefficients {
    pub const FITTED: Self = Self {
        a: [
            1.367_927_7,
            0.912_466_17,
            -1.437_861_1,
            1.124_105_8,
            -0.985_749_2,
            -0.066_880_5,
            3.673_698_2,
            1.490_835_9,
            0.032_865_584,
        ],
        b: 0.365_093_5,
    };

    /// Estimated peak amplitude of the simulation output.
    #[must_use]
    pub fn amplitude(&self, drive: f32, saturation: f32, width: f32) -> f32 {
        let [a1, a2, a3, a4, a5, a6, a7, a8, a9] = self.a;
        let drive = f32::max(drive, MIN_DRIVE);
        ((a1 + a2 * drive + a3 * width * width)
            * (a4 + a5 * saturation + a6 * saturation * saturation))
            / (a7 + a8 * width + a9 * drive * drive)
            + self.b
    }

    /// Gain bringing the estimated amplitude to unity.
    #[must_use]
    pub fn calculate(&self, drive: f32, saturation: f32, width: f32) -> f32 {
        1.0 / self.amplitude(drive, saturation, width)
    }
}

impl Default for MakeupCoefficients {
    fn default() -> Self {
        Self::FITTED
    }
}

/// Whether and how the hysteresis output gets its level corrected.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Makeup {
    Disabled,
    #[default]
    Fitted,
    Custom(MakeupCoefficients),
}

impl Makeup {
    #[must_use]
    pub fn gain(&self, drive: f32, saturation: f32, width: f32) -> f32 {
        match self {
            Self::Disabled => 1.0,
            Self::Fitted => MakeupCoefficients::FITTED.calculate(drive, saturation, width),
            Self::Custom(coefficients) => coefficients.calculate(drive, saturation, width),
        }
    }
}

/// Makeup gain using the published calibration.
#[must_use]
pub fn calculate(drive: f32, saturation: f32, width: f32) -> f32 {
    MakeupCoefficients::FITTED.calculate(drive, saturation, width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn it_matches_hand_evaluated_formula() {
        let expected = 1.0
            / (((1.367_927_7 + 0.912_466_17 * 2.0 - 1.437_861_1 * 0.25)
                * (1.124_105_8 - 0.985_749_2 * 0.3 - 0.066_880_5 * 0.09))
                / (3.673_698_2 + 1.490_835_9 * 0.5 + 0.032_865_584 * 4.0)
                + 0.365_093_5);
        assert_relative_eq!(calculate(2.0, 0.3, 0.5), expected);
    }

    #[test]
    fn drive_below_floor_is_treated_as_floor() {
        assert_relative_eq!(calculate(0.0, 0.5, 0.5), calculate(MIN_DRIVE, 0.5, 0.5));
        assert_relative_eq!(calculate(-3.0, 0.5, 0.5), calculate(MIN_DRIVE, 0.5, 0.5));
    }

    #[test]
    fn disabled_makeup_is_unity() {
        assert_relative_eq!(Makeup::Disabled.gain(5.0, 0.5, 0.5), 1.0);
    }

    #[test]
    fn custom_coefficients_are_honored() {
        let flat = MakeupCoefficients {
            a: [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            b: 0.5,
        };
        assert_relative_eq!(Makeup::Custom(flat).gain(3.0, 0.2, 0.1), 2.0);
        assert_eq!(MakeupCoefficients::default(), MakeupCoefficients::FITTED);
    }

    proptest! {
        #[test]
        fn it_is_positive_and_finite_within_valid_range(
            drive in 0.1f32..20.0,
            saturation in 0.0f32..1.0,
            width in 0.0f32..1.0,
        ) {
            let makeup = calculate(drive, saturation, width);
            prop_assert!(makeup.is_finite());
            prop_assert!(makeup > 0.0);
        }

        #[test]
        fn it_grows_with_saturation_and_width(
            drive in 0.1f32..20.0,
            saturation in 0.0f32..0.9,
            width in 0.0f32..0.9,
        ) {
            let base = calculate(drive, saturation, width);
            prop_assert!(calculate(drive, saturation + 0.1, width) > base);
            prop_assert!(calculate(drive, saturation, width + 0.1) > base);
        }
    }
}
