//! Digital signal processing kernels of magnetic tape: hysteresis saturation
//! and wow/flutter modulation.
//!
//! Everything here is a per-sample recurrence with O(1) memory that may run
//! in real-time. The only exception is the spectral low-pass filter, which is
//! meant for offline shaping and is available with the `spectral` feature.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]

#[cfg(test)]
#[macro_use]
extern crate approx;

mod log;

pub mod error;
pub mod hysteresis;
pub mod low_pass;
pub mod math;
pub mod one_pole_filter;
pub mod random;
pub mod state_variable_filter;
pub mod wow_flutter;

pub use error::{Error, Result};
