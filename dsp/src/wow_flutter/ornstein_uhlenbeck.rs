//! Ornstein-Uhlenbeck process, modeling brownian motion.
//!
//! Based on <https://github.com/mhampton/ZetaCarinaeModules>.

use libm::sqrtf as sqrt;

use crate::error::{self, Result};

#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OrnsteinUhlenbeck {
    value: f32,
    sample_interval: f32,
    sqrt_delta: f32,
    pub noise: f32,
    pub spring: f32,
}

impl OrnsteinUhlenbeck {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            value: 0.0,
            sample_interval: 1.0 / sample_rate,
            sqrt_delta: 1.0 / sqrt(sample_rate),
            noise: 0.0,
            spring: 1.0,
        }
    }

    /// Advance by one sample, pulled towards `mean` and pushed by `random`.
    pub fn pop(&mut self, random: f32, mean: f32) -> f32 {
        self.value += self.spring * (mean - self.value) * self.sample_interval;
        self.value += self.noise * random * self.sqrt_delta;
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}

/// Level the process is pulled towards.
#[derive(Clone, Copy, Debug)]
pub enum Mean<'a> {
    Constant(f32),
    Varying(&'a [f32]),
}

impl Mean<'_> {
    fn at(&self, i: usize) -> f32 {
        match self {
            Self::Constant(mean) => *mean,
            Self::Varying(means) => means[i],
        }
    }
}

impl From<f32> for Mean<'_> {
    fn from(mean: f32) -> Self {
        Self::Constant(mean)
    }
}

impl<'a> From<&'a [f32]> for Mean<'a> {
    fn from(means: &'a [f32]) -> Self {
        Self::Varying(means)
    }
}

/// Render the whole trajectory of the process driven by the given noise.
///
/// The process starts from 0 on every call.
///
/// # Errors
///
/// Fails if noise or spring is negative, the sample rate is not positive,
/// or any of the buffers differs in length from `random`.
pub fn generate(
    random: &[f32],
    mean: Mean<'_>,
    noise: f32,
    spring: f32,
    sample_rate: f32,
    output: &mut [f32],
) -> Result<()> {
    let sample_rate = error::ensure_positive("sample_rate", sample_rate)?;
    let noise = error::ensure_non_negative("noise", noise)?;
    let spring = error::ensure_non_negative("spring", spring)?;
    error::ensure_length(random.len(), output.len())?;
    if let Mean::Varying(means) = mean {
        error::ensure_length(random.len(), means.len())?;
    }

    let mut ornstein_uhlenbeck = OrnsteinUhlenbeck::new(sample_rate);
    ornstein_uhlenbeck.noise = noise;
    ornstein_uhlenbeck.spring = spring;

    for (i, (r, y)) in random.iter().zip(output.iter_mut()).enumerate() {
        *y = ornstein_uhlenbeck.pop(*r, mean.at(i));
    }

    Ok(())
}
