//! Band-limit a signal to a cutoff frequency.
//!
//! Two implementations are offered. The recursive one is a causal
//! state-variable filter, suitable for real-time use. The spectral one
//! (enabled with the `spectral` feature) is an ideal brick-wall filter
//! working on the whole block at once, useful for offline shaping.

#[cfg(feature = "spectral")]
pub mod spectral;

#[cfg(feature = "spectral")]
pub use spectral::filter as filter_spectral;

use crate::error::{self, Error, Result};
use crate::log;
use crate::state_variable_filter::StateVariableFilter;

/// Damping used for all low-pass shaping, `q = 1 / 1.1`.
pub const Q_FACTOR: f32 = 1.1;

/// Causal low-pass filter with a fixed cutoff.
///
/// Cutoffs at or above Nyquist keep all the content, the filter then passes
/// the signal through untouched.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LowPass {
    filter: Option<StateVariableFilter>,
}

impl LowPass {
    /// # Errors
    ///
    /// Fails if either of the frequencies is not positive, or if the cutoff
    /// lies between the stable limit of the recursion and Nyquist.
    pub fn new(sample_rate: f32, cutoff: f32) -> Result<Self> {
        let sample_rate = error::ensure_positive("sample_rate", sample_rate)?;
        let cutoff = error::ensure_positive("cutoff", cutoff)?;

        if cutoff >= sample_rate / 2.0 {
            return Ok(Self { filter: None });
        }

        let mut filter = StateVariableFilter::new(sample_rate);
        filter.set_q_factor(Q_FACTOR);

        let limit = filter.max_stable_frequency();
        if cutoff >= limit {
            log::warning!("cutoff={} exceeds the stable limit={}", cutoff, limit);
            return Err(Error::UnstableCutoff { cutoff, limit });
        }

        filter.set_frequency(cutoff);
        Ok(Self {
            filter: Some(filter),
        })
    }

    pub fn tick(&mut self, x: f32) -> f32 {
        match self.filter.as_mut() {
            Some(filter) => filter.tick(x).low_pass,
            None => x,
        }
    }

    pub fn reset(&mut self) {
        if let Some(filter) = self.filter.as_mut() {
            filter.reset();
        }
    }
}

/// Low-pass the whole input block into the output block.
///
/// The filter starts from silence on every call.
///
/// # Errors
///
/// See [`LowPass::new`]. Fails also if input and output differ in length.
pub fn filter(input: &[f32], cutoff: f32, sample_rate: f32, output: &mut [f32]) -> Result<()> {
    error::ensure_length(input.len(), output.len())?;
    let mut low_pass = LowPass::new(sample_rate, cutoff)?;
    for (x, y) in input.iter().zip(output.iter_mut()) {
        *y = low_pass.tick(*x);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 1000.0;

    fn sine(frequency: f32, length: usize) -> Vec<f32> {
        (0..length)
            .map(|i| {
                libm::sinf(2.0 * core::f32::consts::PI * frequency * i as f32 / SAMPLE_RATE)
            })
            .collect()
    }

    #[test]
    fn given_cutoff_on_nyquist_it_passes_signal_through() {
        let input = sine(120.0, 256);
        let mut output = vec![0.0; input.len()];
        filter(&input, SAMPLE_RATE / 2.0, SAMPLE_RATE, &mut output).unwrap();
        for (x, y) in input.iter().zip(output.iter()) {
            assert_relative_eq!(*x, *y);
        }
    }

    #[test]
    fn given_low_cutoff_it_converges_to_running_mean() {
        let input: Vec<f32> = (0..20_000).map(|i| (i % 2) as f32).collect();
        let mut output = vec![0.0; input.len()];
        filter(&input, 1.0, SAMPLE_RATE, &mut output).unwrap();
        for y in &output[15_000..] {
            assert_relative_eq!(*y, 0.5, epsilon = 0.01);
        }
    }

    #[test]
    fn given_tone_below_cutoff_it_keeps_its_amplitude() {
        let input = sine(2.0, 4000);
        let mut output = vec![0.0; input.len()];
        filter(&input, 100.0, SAMPLE_RATE, &mut output).unwrap();
        let amplitude = output[2000..].iter().fold(0.0, |a, b| f32::max(a, b.abs()));
        assert_relative_eq!(amplitude, 1.0, epsilon = 0.02);
    }

    #[test]
    fn given_cutoff_between_stable_limit_and_nyquist_it_is_rejected() {
        let result = LowPass::new(SAMPLE_RATE, 300.0);
        assert!(matches!(result, Err(Error::UnstableCutoff { .. })));
    }

    #[test]
    fn given_non_positive_cutoff_it_is_rejected() {
        assert!(matches!(
            LowPass::new(SAMPLE_RATE, 0.0),
            Err(Error::InvalidParameter { name: "cutoff", .. })
        ));
        assert!(matches!(
            LowPass::new(-1.0, 10.0),
            Err(Error::InvalidParameter {
                name: "sample_rate",
                ..
            })
        ));
    }

    #[test]
    fn given_output_of_different_length_it_is_rejected() {
        let mut output = [0.0; 3];
        assert_eq!(
            filter(&[0.0; 4], 10.0, SAMPLE_RATE, &mut output),
            Err(Error::LengthMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn reset_forgets_previous_input() {
        let mut low_pass = LowPass::new(SAMPLE_RATE, 10.0).unwrap();
        for _ in 0..100 {
            low_pass.tick(1.0);
        }
        low_pass.reset();
        assert_relative_eq!(low_pass.tick(0.0), 0.0);
    }
}
