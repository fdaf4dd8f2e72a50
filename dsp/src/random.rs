//! Source of noise driving the stochastic components.
//!
//! Components never own a random generator. Either they take a noise sample
//! per call, or a whole block is pre-generated by the caller, keeping the
//! processing deterministic and testable.

pub trait Random {
    /// Random value in range <-1.0, 1.0> for bipolar implementations or
    /// <0.0, 1.0> for unipolar ones.
    fn normal(&mut self) -> f32;
}

/// Fill the buffer with noise pulled from the given source.
pub fn populate(buffer: &mut [f32], random: &mut impl Random) {
    for x in buffer.iter_mut() {
        *x = random.normal();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter(f32);

    impl Random for Counter {
        fn normal(&mut self) -> f32 {
            self.0 += 1.0;
            self.0
        }
    }

    #[test]
    fn it_populates_buffer_in_order() {
        let mut buffer = [0.0; 4];
        populate(&mut buffer, &mut Counter(0.0));
        assert_eq!(buffer, [1.0, 2.0, 3.0, 4.0]);
    }
}
