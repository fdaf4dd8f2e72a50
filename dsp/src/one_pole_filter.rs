//! Smoothing of control-rate attributes.
//!
//! [`crate::wow_flutter::Wow`] receives its depth from a control loop running
//! at 1 kHz. Passing it through this one-pole low-pass keeps the delay from
//! jumping when the depth changes abruptly. See
//! <https://www.earlevel.com/main/2012/12/15/a-one-pole-filter/>.

use core::f32::consts::PI;

use libm::expf;

#[derive(Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OnePoleFilter {
    value: f32,
    gain: f32,
    feedback: f32,
}

impl OnePoleFilter {
    /// Cutoff is in Hz, relative to the rate at which `tick` gets called.
    pub fn new(sample_rate: f32, cutoff: f32) -> Self {
        let feedback = expf(-2.0 * PI * cutoff / sample_rate);
        Self {
            value: 0.0,
            gain: 1.0 - feedback,
            feedback,
        }
    }

    pub fn tick(&mut self, target: f32) -> f32 {
        self.value = target * self.gain + self.value * self.feedback;
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_converges_towards_target() {
        let mut filter = OnePoleFilter::new(1000.0, 10.0);
        let first = filter.tick(1.0);
        assert!(first > 0.0 && first < 0.1);
        for _ in 0..1000 {
            filter.tick(1.0);
        }
        assert_relative_eq!(filter.value(), 1.0, epsilon = 0.001);
    }

    #[test]
    fn given_cutoff_of_depth_smoothing_it_takes_seconds_to_settle() {
        let mut filter = OnePoleFilter::new(1000.0, 0.1);
        for _ in 0..1000 {
            filter.tick(1.0);
        }
        let after_second = filter.value();
        assert!(after_second > 0.4 && after_second < 0.6, "{after_second}");
    }
}
