//! Apply hysteresis on a stream of samples.
//!
//! Unlike [`Hysteresis::process_block`], the stream keeps the magnetisation
//! of the previous sample between calls, so a signal can be fed in arbitrary
//! chunks.

use sirena::signal::Signal;

use super::Hysteresis;

pub trait SignalApplyHysteresis: Signal {
    fn apply_hysteresis(self, hysteresis: &mut Hysteresis) -> ApplyHysteresis<Self>
    where
        Self: Sized,
    {
        ApplyHysteresis {
            source: self,
            hysteresis,
        }
    }
}

impl<T> SignalApplyHysteresis for T where T: Signal {}

pub struct ApplyHysteresis<'a, S> {
    source: S,
    hysteresis: &'a mut Hysteresis,
}

impl<'a, S> Signal for ApplyHysteresis<'a, S>
where
    S: Signal,
{
    fn next(&mut self) -> f32 {
        self.hysteresis.tick(self.source.next())
    }
}
