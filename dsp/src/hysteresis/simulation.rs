//! This module contains basic building blocks for hysteresis simulation.
//!
//! Kudos to Jatin Chowdhury:
//!
//! * <https://jatinchowdhury18.medium.com/complex-nonlinearities-episode-3-hysteresis-fdeb2cd3e3f6>
//! * <https://dafx2019.bcu.ac.uk/papers/DAFx2019_paper_3.pdf>
//! * <https://ccrma.stanford.edu/~jatin/papers/Complex_NLs.pdf>
//! * <https://github.com/jatinchowdhury18/audio_dspy>

use libm::sqrt;

use super::processor::Attributes;
use crate::math::{langevin, langevin_deriv};

/// Time domain differentiation using the trapezoidal rule.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Differentiator {
    /// Period between samples
    t: f64,
    /// Previous sample
    x_n1: f64,
    /// Time derivative of previous sample
    x_d_n1: f64,
}

impl Differentiator {
    pub fn new(fs: f64) -> Self {
        Self {
            t: 1.0 / fs,
            x_n1: 0.0,
            x_d_n1: 0.0,
        }
    }

    pub fn differentiate(&mut self, x: f64) -> f64 {
        const D_ALPHA: f64 = 0.75;
        let x_d = (((1.0 + D_ALPHA) / self.t) * (x - self.x_n1)) - D_ALPHA * self.x_d_n1;
        self.x_n1 = x;
        self.x_d_n1 = x_d;
        x_d
    }

    pub fn reset(&mut self) {
        self.x_n1 = 0.0;
        self.x_d_n1 = 0.0;
    }
}

/// Jiles-Atherton model of magnetisation driven by an input field.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Simulation {
    differentiator: Differentiator,
    /// Period between samples
    t: f64,
    /// Magnetisation saturation
    m_s: f64,
    /// Anhysteric magnetisation shape
    a: f64,
    /// Initial susceptibilities
    c: f64,

    /// Previous magnetisation
    m_n1: f64,
    /// Previous magnetic field
    h_n1: f64,
    /// Time derivative of the previous magnetic field
    h_d_n1: f64,
}

impl Simulation {
    /// Hysteresis loop width / coercivity, `30 * (1 - 0.5)^6 + 0.01`
    pub const K: f64 = 0.47875;

    /// Mean field parameter.
    pub const ALPHA: f64 = 1.6e-3;

    /// The caller is responsible for validating the attributes, see
    /// [`Attributes::validate`].
    pub fn new(fs: f32, attributes: Attributes) -> Self {
        let fs = fs as f64;
        let m_s = 0.5 + 1.5 * (1.0 - attributes.saturation as f64);
        let a = m_s / (0.01 + 6.0 * attributes.drive as f64);
        let c = sqrt(1.0 - attributes.width as f64) - 0.01;
        Self {
            differentiator: Differentiator::new(fs),
            t: 1.0 / fs,
            m_s,
            a,
            c,
            m_n1: 0.0,
            h_n1: 0.0,
            h_d_n1: 0.0,
        }
    }

    pub fn m_s(&self) -> f64 {
        self.m_s
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn c(&self) -> f64 {
        self.c
    }

    /// Jiles-Atherton differential equation.
    ///
    /// # Parameters
    ///
    /// * `m`: Magnetisation
    /// * `h`: Magnetic field
    /// * `h_d`: Time derivative of magnetic field
    ///
    /// # Returns
    ///
    /// Derivative of magnetisation w.r.t time
    fn dmdt(&self, m: f64, h: f64, h_d: f64) -> f64 {
        let q = (h + Self::ALPHA * m) / self.a;
        let m_diff = self.m_s * langevin(q) - m;

        let delta_s = if h_d > 0.0 { 1.0 } else { -1.0 };

        // Zero difference has no sign, so it never matches the direction.
        let delta_m = if (delta_s > 0.0 && m_diff > 0.0) || (delta_s < 0.0 && m_diff < 0.0) {
            1.0
        } else {
            0.0
        };

        let l_prime = langevin_deriv(q);

        let c_diff = 1.0 - self.c;
        let t1_numerator = c_diff * delta_m * m_diff;
        let t1_denominator = c_diff * delta_s * Self::K - Self::ALPHA * m_diff;
        let t1 = (t1_numerator / t1_denominator) * h_d;

        let t2 = self.c * (self.m_s / self.a) * h_d * l_prime;

        let numerator = t1 + t2;
        let denominator = 1.0 - self.c * Self::ALPHA * (self.m_s / self.a) * l_prime;

        numerator / denominator
    }

    /// Compute hysteresis function with Runge-Kutta 4th order.
    ///
    /// # Parameters
    ///
    /// * `m_n1`: Previous magnetisation
    /// * `h`: Magnetic field
    /// * `h_n1`: Previous magnetic field
    /// * `h_d`: Magnetic field derivative
    /// * `h_d_n1`: Previous magnetic field derivative
    ///
    /// # Returns
    ///
    /// Current magnetisation
    fn rk4(&self, m_n1: f64, h: f64, h_n1: f64, h_d: f64, h_d_n1: f64) -> f64 {
        let h_mid = (h + h_n1) / 2.0;
        let h_d_mid = (h_d + h_d_n1) / 2.0;
        let k1 = self.t * self.dmdt(m_n1, h_n1, h_d_n1);
        let k2 = self.t * self.dmdt(m_n1 + k1 / 2.0, h_mid, h_d_mid);
        let k3 = self.t * self.dmdt(m_n1 + k2 / 2.0, h_mid, h_d_mid);
        let k4 = self.t * self.dmdt(m_n1 + k3, h, h_d);
        m_n1 + (k1 / 6.0) + (k2 / 3.0) + (k3 / 3.0) + (k4 / 6.0)
    }

    /// Return the magnetisation and its surroundings to the initial state.
    pub fn reset(&mut self) {
        self.differentiator.reset();
        self.reset_recurrence();
    }

    /// Forget the previous magnetisation and field, keeping the
    /// differentiator's memory of the input.
    pub fn reset_recurrence(&mut self) {
        self.m_n1 = 0.0;
        self.h_n1 = 0.0;
        self.h_d_n1 = 0.0;
    }

    pub fn process(&mut self, h: f32) -> f32 {
        let h = h as f64;
        let h_d = self.differentiator.differentiate(h);
        let m = self.rk4(self.m_n1, h, self.h_n1, h_d, self.h_d_n1);

        self.m_n1 = m;
        self.h_n1 = h;
        self.h_d_n1 = h_d;
        m as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn differentiator_of_ramp_settles_on_slope() {
        const FS: f64 = 1000.0;
        let mut differentiator = Differentiator::new(FS);
        let mut x_d = 0.0;
        for i in 0..100 {
            x_d = differentiator.differentiate(i as f64 / FS * 2.0);
        }
        assert_relative_eq!(x_d, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn differentiator_follows_documented_recurrence() {
        let mut differentiator = Differentiator::new(2.0);
        assert_relative_eq!(differentiator.differentiate(1.0), 3.5);
        assert_relative_eq!(differentiator.differentiate(1.0), -2.625);
    }

    #[test]
    fn differentiator_of_constant_is_zero() {
        let mut differentiator = Differentiator::new(48_000.0);
        for _ in 0..10 {
            assert_relative_eq!(differentiator.differentiate(0.0), 0.0);
        }
    }

    #[test]
    fn derived_constants_follow_attributes() {
        let simulation = Simulation::new(
            48_000.0,
            Attributes {
                drive: 1.0,
                saturation: 0.9,
                width: 0.75,
            },
        );
        assert_relative_eq!(simulation.m_s(), 0.65, epsilon = 1e-6);
        assert_relative_eq!(simulation.a(), 0.65 / 6.01, epsilon = 1e-6);
        assert_relative_eq!(simulation.c(), 0.49, epsilon = 1e-6);
        assert_relative_eq!(Simulation::K, 30.0 * libm::pow(0.5, 6.0) + 0.01);
    }

    #[test]
    fn reset_returns_to_initial_state() {
        let attributes = Attributes {
            drive: 1.0,
            saturation: 0.5,
            width: 0.5,
        };
        let mut simulation = Simulation::new(48_000.0, attributes);
        let first: Vec<f32> = (0..64).map(|i| simulation.process(i as f32 / 64.0)).collect();
        simulation.reset();
        let second: Vec<f32> = (0..64).map(|i| simulation.process(i as f32 / 64.0)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn reset_of_recurrence_keeps_differentiator() {
        let attributes = Attributes {
            drive: 1.0,
            saturation: 0.5,
            width: 0.5,
        };
        let mut simulation = Simulation::new(48_000.0, attributes);
        for i in 0..64 {
            simulation.process(i as f32 / 64.0);
        }
        simulation.reset_recurrence();
        // The input drops from almost 1 to 0, the field derivative is far
        // from zero and so is the magnetisation.
        assert!(simulation.process(0.0).abs() > 0.01);

        simulation.reset();
        assert_relative_eq!(simulation.process(0.0), 0.0);
    }
}
