//! Modulation trajectories emulating unsteady speed of tape.
//!
//! The speed deviation is a carrier sine whose phase drifts and whose level
//! wanders, both driven by Ornstein-Uhlenbeck process modeling brownian
//! motion. How fast it moves is given by the carrier frequency and the
//! cutoffs of the low-pass filters. [`Wow`] is a fixed, slow variant of the
//! same idea, producing delay time in real-time. Two compositions are
//! offered:
//!
//! ```text
//! Direct:   OU(noise_a, spring_a) -> low-pass(filter_a) ----------------------------+--> output
//!           OU(noise_p, spring_p) -> low-pass(filter_p) -> carrier * amplitude ----+
//!
//! Cascaded: OU(noise_p, spring_p) -> carrier * amplitude -> (mean) OU(noise_a, spring_a)
//!               -> |x| -> low-pass(filter_a) -> output
//! ```

pub mod carrier;
pub mod ornstein_uhlenbeck;
pub mod wow;

pub use carrier::{Carrier, CarrierShape};
pub use ornstein_uhlenbeck::{Mean, OrnsteinUhlenbeck};
pub use wow::Wow;

use crate::error::{self, Result};
use crate::log;
use crate::low_pass::LowPass;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Filtered amplitude trajectory summed with a carrier drifted by a
    /// filtered phase trajectory.
    #[default]
    Direct,
    /// Carrier drifted by the phase trajectory serves as the mean of the
    /// amplitude trajectory, which is rectified and filtered.
    Cascaded,
}

/// All the parameters of the composition, there are no hidden defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Attributes {
    pub amplitude_noise: f32,
    pub amplitude_spring: f32,
    /// Cutoff of the amplitude trajectory in Hz
    pub amplitude_filter: f32,
    pub phase_noise: f32,
    pub phase_spring: f32,
    /// Cutoff of the phase trajectory in Hz, unused in cascaded mode
    pub phase_filter: f32,
    /// How much the phase trajectory affects frequency of the carrier
    pub drift: f32,
    /// Frequency of the carrier in Hz
    pub frequency: f32,
    /// Scale of the carrier
    pub amplitude: f32,
    pub carrier: CarrierShape,
}

impl Attributes {
    /// # Errors
    ///
    /// Fails if any noise, spring, drift or amplitude is negative, or any of
    /// the frequencies is not positive.
    pub fn validate(self) -> Result<Self> {
        error::ensure_non_negative("amplitude_noise", self.amplitude_noise)?;
        error::ensure_non_negative("amplitude_spring", self.amplitude_spring)?;
        error::ensure_positive("amplitude_filter", self.amplitude_filter)?;
        error::ensure_non_negative("phase_noise", self.phase_noise)?;
        error::ensure_non_negative("phase_spring", self.phase_spring)?;
        error::ensure_positive("phase_filter", self.phase_filter)?;
        error::ensure_non_negative("drift", self.drift)?;
        error::ensure_positive("frequency", self.frequency)?;
        error::ensure_non_negative("amplitude", self.amplitude)?;
        Ok(self)
    }
}

/// Causal composition of the modulation, running sample by sample.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WowFlutter {
    mode: Mode,
    drift: f32,
    amplitude: f32,
    amplitude_ornstein_uhlenbeck: OrnsteinUhlenbeck,
    amplitude_filter: LowPass,
    phase_ornstein_uhlenbeck: OrnsteinUhlenbeck,
    phase_filter: LowPass,
    carrier: Carrier,
}

impl WowFlutter {
    /// # Errors
    ///
    /// Fails on invalid attributes (see [`Attributes::validate`]) or sample
    /// rate, or if any of the cutoffs would make the recursive filter
    /// unstable.
    pub fn new(sample_rate: f32, attributes: Attributes, mode: Mode) -> Result<Self> {
        let sample_rate = error::ensure_positive("sample_rate", sample_rate)?;
        let attributes = attributes.validate()?;

        let amplitude_ornstein_uhlenbeck = {
            let mut ornstein_uhlenbeck = OrnsteinUhlenbeck::new(sample_rate);
            ornstein_uhlenbeck.noise = attributes.amplitude_noise;
            ornstein_uhlenbeck.spring = attributes.amplitude_spring;
            ornstein_uhlenbeck
        };
        let phase_ornstein_uhlenbeck = {
            let mut ornstein_uhlenbeck = OrnsteinUhlenbeck::new(sample_rate);
            ornstein_uhlenbeck.noise = attributes.phase_noise;
            ornstein_uhlenbeck.spring = attributes.phase_spring;
            ornstein_uhlenbeck
        };
        let amplitude_filter = LowPass::new(sample_rate, attributes.amplitude_filter)?;
        let phase_filter = LowPass::new(sample_rate, attributes.phase_filter)?;
        let carrier = Carrier::new(sample_rate, attributes.frequency, attributes.carrier);

        log::info!("wow flutter mode={} sample_rate={}", mode, sample_rate);

        Ok(Self {
            mode,
            drift: attributes.drift,
            amplitude: attributes.amplitude,
            amplitude_ornstein_uhlenbeck,
            amplitude_filter,
            phase_ornstein_uhlenbeck,
            phase_filter,
            carrier,
        })
    }

    /// Render modulation driven by the whole block of noise.
    ///
    /// All the processes and filters start from zero on every call.
    ///
    /// # Errors
    ///
    /// Fails if the output differs in length from the noise.
    pub fn populate(&mut self, random: &[f32], output: &mut [f32]) -> Result<()> {
        error::ensure_length(random.len(), output.len())?;
        self.reset();
        for (r, y) in random.iter().zip(output.iter_mut()) {
            *y = self.pop(*r);
        }
        Ok(())
    }

    /// Advance by one sample of noise, continuing from the previous one.
    pub fn pop(&mut self, random: f32) -> f32 {
        match self.mode {
            Mode::Direct => {
                let amplitude = self
                    .amplitude_filter
                    .tick(self.amplitude_ornstein_uhlenbeck.pop(random, 0.0));
                let phase = self
                    .phase_filter
                    .tick(self.phase_ornstein_uhlenbeck.pop(random, 0.0));
                amplitude + self.carrier.pop(phase, self.drift) * self.amplitude
            }
            Mode::Cascaded => {
                let phase = self.phase_ornstein_uhlenbeck.pop(random, 0.0);
                let mean = self.carrier.pop(phase, self.drift) * self.amplitude;
                let amplitude = self.amplitude_ornstein_uhlenbeck.pop(random, mean);
                self.amplitude_filter.tick(libm::fabsf(amplitude))
            }
        }
    }

    pub fn reset(&mut self) {
        self.amplitude_ornstein_uhlenbeck.reset();
        self.amplitude_filter.reset();
        self.phase_ornstein_uhlenbeck.reset();
        self.phase_filter.reset();
        self.carrier.reset();
    }
}

/// Render modulation with the ideal brick-wall filter.
///
/// Unlike [`WowFlutter`], this looks at the whole block at once, so it is
/// only suitable for offline use. Any positive cutoff is accepted.
///
/// # Errors
///
/// Fails on invalid attributes (see [`Attributes::validate`]) or sample
/// rate.
#[cfg(feature = "spectral")]
pub fn render_spectral(
    sample_rate: f32,
    attributes: Attributes,
    mode: Mode,
    random: &[f32],
) -> Result<Vec<f32>> {
    use crate::low_pass::filter_spectral;

    let sample_rate = error::ensure_positive("sample_rate", sample_rate)?;
    let attributes = attributes.validate()?;
    let length = random.len();

    let mut phase = vec![0.0; length];
    ornstein_uhlenbeck::generate(
        random,
        Mean::Constant(0.0),
        attributes.phase_noise,
        attributes.phase_spring,
        sample_rate,
        &mut phase,
    )?;

    let mut carrier = vec![0.0; length];
    let mut amplitude = vec![0.0; length];

    match mode {
        Mode::Direct => {
            let phase = filter_spectral(&phase, attributes.phase_filter, sample_rate)?;
            carrier::generate(
                &phase,
                attributes.drift,
                attributes.frequency,
                sample_rate,
                attributes.carrier,
                &mut carrier,
            )?;
            ornstein_uhlenbeck::generate(
                random,
                Mean::Constant(0.0),
                attributes.amplitude_noise,
                attributes.amplitude_spring,
                sample_rate,
                &mut amplitude,
            )?;
            let amplitude =
                filter_spectral(&amplitude, attributes.amplitude_filter, sample_rate)?;
            Ok(amplitude
                .iter()
                .zip(carrier.iter())
                .map(|(a, c)| a + c * attributes.amplitude)
                .collect())
        }
        Mode::Cascaded => {
            carrier::generate(
                &phase,
                attributes.drift,
                attributes.frequency,
                sample_rate,
                attributes.carrier,
                &mut carrier,
            )?;
            for c in &mut carrier {
                *c *= attributes.amplitude;
            }
            ornstein_uhlenbeck::generate(
                random,
                Mean::Varying(&carrier),
                attributes.amplitude_noise,
                attributes.amplitude_spring,
                sample_rate,
                &mut amplitude,
            )?;
            for a in &mut amplitude {
                *a = a.abs();
            }
            filter_spectral(&amplitude, attributes.amplitude_filter, sample_rate)
        }
    }
}
