//! Emulation of non-linearities happening on tape.

pub mod makeup;
pub mod processor;
pub mod signal;
mod simulation;

pub use makeup::{calculate as calculate_makeup, Makeup, MakeupCoefficients};
pub use processor::Attributes;
pub use processor::State as Hysteresis;
pub use signal::SignalApplyHysteresis;
pub use simulation::Differentiator;
