//! Ideal low-pass filter working in the frequency domain.
//!
//! All bins above the bandlimit are zeroed. The filter is not causal, it
//! needs the whole block at once.

use realfft::num_complex::Complex;
use realfft::RealFftPlanner;

use crate::error::{self, Error, Result};

/// # Errors
///
/// Fails if the bandlimit or the sample rate is not positive.
pub fn filter(data: &[f32], bandlimit: f32, sample_rate: f32) -> Result<Vec<f32>> {
    let sample_rate = error::ensure_positive("sample_rate", sample_rate)?;
    let bandlimit = error::ensure_positive("cutoff", bandlimit)?;

    let length = data.len();
    if length == 0 {
        return Ok(Vec::new());
    }

    let bandlimit_index = (bandlimit as f64 * length as f64 / sample_rate as f64) as usize;

    let mut planner = RealFftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(length);
    let ifft = planner.plan_fft_inverse(length);

    let mut input = data.to_vec();
    let mut spectrum = fft.make_output_vec();
    fft.process(&mut input, &mut spectrum).map_err(|_| Error::Transform)?;

    // Only the lower half is stored, bins above it mirror it.
    let first_cut = bandlimit_index + 1;
    if first_cut < spectrum.len() {
        for bin in &mut spectrum[first_cut..] {
            *bin = Complex::new(0.0, 0.0);
        }
    }

    // Inverse of a real signal expects real DC and Nyquist bins.
    spectrum[0].im = 0.0;
    if length % 2 == 0 {
        let last = spectrum.len() - 1;
        spectrum[last].im = 0.0;
    }

    let mut output = ifft.make_output_vec();
    ifft.process(&mut spectrum, &mut output).map_err(|_| Error::Transform)?;

    let normalization = 1.0 / length as f32;
    for x in &mut output {
        *x *= normalization;
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::PI;

    const SAMPLE_RATE: f32 = 1000.0;
    const LENGTH: usize = 1000;

    fn sine(frequency: f32) -> Vec<f32> {
        (0..LENGTH)
            .map(|i| libm::sinf(2.0 * PI * frequency * i as f32 / SAMPLE_RATE))
            .collect()
    }

    #[test]
    fn given_bandlimit_on_nyquist_it_passes_signal_through() {
        let input = sine(123.0);
        let output = filter(&input, SAMPLE_RATE / 2.0, SAMPLE_RATE).unwrap();
        for (x, y) in input.iter().zip(output.iter()) {
            assert_relative_eq!(*x, *y, epsilon = 1e-4);
        }
    }

    #[test]
    fn given_two_tones_it_removes_the_one_above_bandlimit() {
        let low = sine(5.0);
        let high = sine(100.0);
        let input: Vec<f32> = low.iter().zip(high.iter()).map(|(a, b)| a + b).collect();
        let output = filter(&input, 50.0, SAMPLE_RATE).unwrap();
        for (x, y) in low.iter().zip(output.iter()) {
            assert_relative_eq!(*x, *y, epsilon = 1e-3);
        }
    }

    #[test]
    fn given_constant_signal_it_keeps_it() {
        let output = filter(&[0.3; 64], 1.0, SAMPLE_RATE).unwrap();
        for y in output {
            assert_relative_eq!(y, 0.3, epsilon = 1e-5);
        }
    }

    #[test]
    fn given_empty_block_it_returns_empty_block() {
        assert!(filter(&[], 10.0, SAMPLE_RATE).unwrap().is_empty());
    }

    #[test]
    fn given_non_positive_bandlimit_it_is_rejected() {
        assert!(filter(&[1.0, 2.0], 0.0, SAMPLE_RATE).is_err());
    }
}
