//! Slow, wandering modulation of the tape delay.
//!
//! A raised sine drifts in phase by Ornstein-Uhlenbeck process. Its output is
//! smoothed by a low-pass filter, so the resulting delay never jumps.

use super::carrier::{Carrier, CarrierShape};
use super::ornstein_uhlenbeck::OrnsteinUhlenbeck;
use crate::error::{self, Error, Result};
use crate::log;
use crate::one_pole_filter::OnePoleFilter;
use crate::random::Random;
use crate::state_variable_filter::StateVariableFilter;

// Smoothening of the depth attribute to make sure that wow does not
// scroll to the present too abruptly, causing pops when hitting 0.
const DEPTH_CUTOFF: f32 = 0.1;
const CONTROL_SAMPLE_RATE: f32 = 1000.0;

// These constants were obtained through design of the modulation and
// experimentation with sound.
const BASE_FREQUENCY: f32 = 0.07;
const MODULATION_CUTOFF: f32 = 1.0;
const ORNSTEIN_UHLENBECK_NOISE: f32 = 5.0;
const ORNSTEIN_UHLENBECK_SPRING: f32 = 8.0;
const PHASE_DRIFT: f32 = 0.9;

const MIN_SAMPLE_RATE: f32 = 500.0;
const MAX_DEPTH: f32 = 1000.0;

#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Attributes {
    /// Maximum delay in seconds
    pub depth: f32,
}

#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Wow {
    depth: f32,
    depth_filter: OnePoleFilter,
    carrier: Carrier,
    ornstein_uhlenbeck: OrnsteinUhlenbeck,
    modulation_filter: StateVariableFilter,
}

impl Wow {
    /// # Errors
    ///
    /// The modulation filter may be unstable for sample rates of 500 Hz and
    /// below, these are rejected.
    pub fn new(sample_rate: f32) -> Result<Self> {
        let sample_rate = error::ensure_positive("sample_rate", sample_rate)?;
        if sample_rate <= MIN_SAMPLE_RATE {
            log::warning!("wow may be unstable for sample_rate={}", sample_rate);
            return Err(Error::InvalidParameter {
                name: "sample_rate",
                value: sample_rate,
            });
        }

        let depth_filter = OnePoleFilter::new(CONTROL_SAMPLE_RATE, DEPTH_CUTOFF);
        let modulation_filter = {
            let mut modulation_filter = StateVariableFilter::new(sample_rate);
            modulation_filter.set_frequency(MODULATION_CUTOFF);
            modulation_filter
        };
        let ornstein_uhlenbeck = {
            let mut ornstein_uhlenbeck = OrnsteinUhlenbeck::new(sample_rate);
            ornstein_uhlenbeck.noise = ORNSTEIN_UHLENBECK_NOISE;
            ornstein_uhlenbeck.spring = ORNSTEIN_UHLENBECK_SPRING;
            ornstein_uhlenbeck
        };
        Ok(Self {
            depth: 0.0,
            depth_filter,
            carrier: Carrier::new(sample_rate, BASE_FREQUENCY, CarrierShape::Unipolar),
            ornstein_uhlenbeck,
            modulation_filter,
        })
    }

    /// Current delay in seconds.
    pub fn pop(&mut self, random: &mut impl Random) -> f32 {
        let drift = self.ornstein_uhlenbeck.pop(random.normal(), 0.0);
        let target = self.carrier.pop(drift, PHASE_DRIFT) * self.depth;
        fold(self.modulation_filter.tick(target).low_pass, 0.0, MAX_DEPTH)
    }

    /// Expected to be called from the control loop, at 1 kHz.
    pub fn set_attributes(&mut self, attributes: &Attributes) {
        self.depth = self.depth_filter.tick(attributes.depth);
    }
}

/// Reflect values overshooting the range back into it.
fn fold(x: f32, min: f32, max: f32) -> f32 {
    let diff = max - min;
    if x < min {
        min + f32::min(min - x, diff)
    } else if x > max {
        max - f32::min(x - max, diff)
    } else {
        x
    }
}
