//! Numeric helpers shared by the hysteresis simulation.

use libm::{fabs, tanh};

/// Below this magnitude, the Langevin function and its derivative are
/// replaced by their Taylor approximation to avoid cancellation.
const LANGEVIN_THRESHOLD: f64 = 1e-4;

/// Langevin function: coth(x) - (1/x)
#[must_use]
pub fn langevin(x: f64) -> f64 {
    if fabs(x) > LANGEVIN_THRESHOLD {
        1.0 / tanh(x) - 1.0 / x
    } else {
        x / 3.0
    }
}

/// Derivative of the Langevin function: (1/x^2) - coth(x)^2 + 1
#[must_use]
pub fn langevin_deriv(x: f64) -> f64 {
    if fabs(x) > LANGEVIN_THRESHOLD {
        let coth = 1.0 / tanh(x);
        1.0 / (x * x) - coth * coth + 1.0
    } else {
        1.0 / 3.0
    }
}
