//! Rejections raised at the boundary of DSP components.
//!
//! Components validate their parameters once, on construction or at the
//! entry of a block operation. The hot path itself never fails; non-finite
//! results caused by degenerate numerics are propagated to the caller.

use crate::log;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f32 },
    #[error("cutoff {cutoff} Hz is above the stable limit of {limit} Hz")]
    UnstableCutoff { cutoff: f32, limit: f32 },
    #[error("expected buffer of length {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[cfg(feature = "spectral")]
    #[error("spectral transform failed")]
    Transform,
}

pub type Result<T> = core::result::Result<T, Error>;

/// Accept values from the closed interval, rejecting NaN.
pub(crate) fn ensure_within(name: &'static str, value: f32, min: f32, max: f32) -> Result<f32> {
    if value >= min && value <= max {
        Ok(value)
    } else {
        log::warning!("rejecting {}={}", name, value);
        Err(Error::InvalidParameter { name, value })
    }
}

/// Accept strictly positive finite values.
pub(crate) fn ensure_positive(name: &'static str, value: f32) -> Result<f32> {
    ensure_within(name, value, f32::MIN_POSITIVE, f32::MAX)
}

/// Accept finite values that are not negative.
pub(crate) fn ensure_non_negative(name: &'static str, value: f32) -> Result<f32> {
    ensure_within(name, value, 0.0, f32::MAX)
}

pub(crate) fn ensure_length(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        log::warning!("length mismatch, expected={} actual={}", expected, actual);
        Err(Error::LengthMismatch { expected, actual })
    }
}
