//! Sine oscillator with a phase increment perturbed by a drift signal.
//!
//! A steady drift changes the pitch of the carrier, a random one makes it
//! wander around its base frequency, modeling flutter.

use core::f32::consts::PI;

use crate::error::{self, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CarrierShape {
    /// Sine in range <-1.0, 1.0>, starting at 0.0.
    #[default]
    Bipolar,
    /// Raised sine in range <0.0, 1.0>, starting at 0.0.
    Unipolar,
}

#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Carrier {
    step: f32,
    shape: CarrierShape,
    /// Phase in cycles, kept within <0.0, 1.0)
    phase: f32,
}

impl Carrier {
    pub fn new(sample_rate: f32, frequency: f32, shape: CarrierShape) -> Self {
        let mut carrier = Self {
            step: frequency / sample_rate,
            shape,
            phase: 0.0,
        };
        carrier.reset();
        carrier
    }

    pub fn reset(&mut self) {
        self.phase = match self.shape {
            CarrierShape::Bipolar => 0.0,
            CarrierShape::Unipolar => 0.75,
        };
    }

    /// Return the current value and advance the phase.
    ///
    /// `drift_amount` scales how much `drift` speeds up or slows down the
    /// phase increment.
    pub fn pop(&mut self, drift: f32, drift_amount: f32) -> f32 {
        let x = libm::sinf(self.phase * 2.0 * PI);
        self.phase += self.step * (1.0 + drift_amount * drift);
        self.phase -= libm::floorf(self.phase);
        match self.shape {
            CarrierShape::Bipolar => x,
            CarrierShape::Unipolar => x * 0.5 + 0.5,
        }
    }
}

/// Render the carrier modulated by the whole drift signal.
///
/// # Errors
///
/// Fails if the frequency or the sample rate is not positive, the drift
/// amount is negative, or the output differs in length from the drift.
pub fn generate(
    drift_signal: &[f32],
    drift_amount: f32,
    frequency: f32,
    sample_rate: f32,
    shape: CarrierShape,
    output: &mut [f32],
) -> Result<()> {
    let sample_rate = error::ensure_positive("sample_rate", sample_rate)?;
    let frequency = error::ensure_positive("frequency", frequency)?;
    let drift_amount = error::ensure_non_negative("drift", drift_amount)?;
    error::ensure_length(drift_signal.len(), output.len())?;

    let mut carrier = Carrier::new(sample_rate, frequency, shape);
    for (drift, y) in drift_signal.iter().zip(output.iter_mut()) {
        *y = carrier.pop(*drift, drift_amount);
    }

    Ok(())
}
