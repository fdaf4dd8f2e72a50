use super::makeup::Makeup;
use super::simulation::Simulation;
use crate::error::{self, Result};
use crate::log;

/// Largest width accepted, `c` is not defined for width of 1.
const MAX_WIDTH: f32 = 1.0 - f32::EPSILON / 2.0;

#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct State {
    simulation: Simulation,
    attributes: Attributes,
    makeup: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Attributes {
    /// Input gain of the magnetic field, in (0, ∞)
    pub drive: f32,
    /// Lowers the saturation magnetisation, in [0, 1]
    pub saturation: f32,
    /// Width of the hysteresis loop, in [0, 1)
    pub width: f32,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            drive: 1.0,
            saturation: 0.9,
            width: 0.5,
        }
    }
}

impl Attributes {
    /// # Errors
    ///
    /// Fails if drive is not positive, saturation is out of [0, 1], or width
    /// is out of [0, 1).
    pub fn validate(self) -> Result<Self> {
        error::ensure_positive("drive", self.drive)?;
        error::ensure_within("saturation", self.saturation, 0.0, 1.0)?;
        error::ensure_within("width", self.width, 0.0, MAX_WIDTH)?;
        Ok(self)
    }
}

impl State {
    /// # Errors
    ///
    /// Fails if the sample rate is not positive or any of the attributes is
    /// out of its range, see [`Attributes::validate`].
    pub fn new(sample_rate: f32, attributes: Attributes, makeup: Makeup) -> Result<Self> {
        let sample_rate = error::ensure_positive("sample_rate", sample_rate)?;
        let attributes = attributes.validate()?;

        let simulation = Simulation::new(sample_rate, attributes);
        let makeup = makeup.gain(attributes.drive, attributes.saturation, attributes.width);

        log::info!(
            "hysteresis m_s={} a={} c={} makeup={}",
            simulation.m_s(),
            simulation.a(),
            simulation.c(),
            makeup
        );

        Ok(Self {
            simulation,
            attributes,
            makeup,
        })
    }

    #[must_use]
    pub fn attributes(&self) -> Attributes {
        self.attributes
    }

    #[must_use]
    pub fn makeup(&self) -> f32 {
        self.makeup
    }

    /// Saturation magnetisation, the bound of the raw simulation output.
    #[must_use]
    pub fn saturation_magnetisation(&self) -> f32 {
        self.simulation.m_s() as f32
    }

    /// Process a standalone block.
    ///
    /// Magnetisation, field and its derivative start from zero on every block.
    /// The differentiator keeps its memory of the previous input, use
    /// [`State::reset`] to clear it as well.
    pub fn process_block(&mut self, block: &mut [f32]) {
        self.simulation.reset_recurrence();
        for x in block.iter_mut() {
            *x = self.tick(*x);
        }
    }

    /// Process a single sample, continuing from the previous one.
    pub fn tick(&mut self, x: f32) -> f32 {
        self.simulation.process(x) * self.makeup
    }

    pub fn reset(&mut self) {
        self.simulation.reset();
    }
}
