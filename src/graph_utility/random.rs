//! Random sources consumed by the generator.
//!
//! The generator only needs uniform draws in `[0, 1)`, so randomness is
//! injected through the small [`RandomSource`] trait. The ChaCha generators
//! from `rand_chacha` are the default because they are reproducible on
//! different machines.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::GraphError;

/// A provider of uniform random values in `[0, 1)`.
pub trait RandomSource {
    fn next_uniform(&mut self) -> f64;
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}

/// Adapts any [`rand::Rng`] into a [`RandomSource`].
#[derive(Clone, Debug)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        RngSource { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// The reproducible generator used by the binaries.
pub fn default_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// An independent sub-stream of `default_rng(seed)`.
///
/// Stream 0 is the stream `default_rng` starts on.
pub fn stream_rng(seed: u64, stream: u64) -> ChaCha8Rng {
    let mut rng = default_rng(seed);
    rng.set_stream(stream);
    rng
}

/// Replays a fixed sequence of values, wrapping around at the end.
#[derive(Clone, Debug)]
pub struct SequenceSource {
    values: Vec<f64>,
    position: usize,
}

impl SequenceSource {
    /// # Errors
    /// Returns [`GraphError::InvalidParameter`] if `values` is empty or holds
    /// a value outside `[0, 1)`.
    pub fn new(values: Vec<f64>) -> Result<SequenceSource, GraphError> {
        if values.is_empty() {
            return Err(GraphError::invalid("sequence", "must not be empty"));
        }
        if let Some(bad) = values.iter().find(|v| !(0.0..1.0).contains(*v)) {
            return Err(GraphError::invalid(
                "sequence",
                format!("{bad} lies outside [0, 1)"),
            ));
        }
        Ok(SequenceSource {
            values,
            position: 0,
        })
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.position
    }
}

impl RandomSource for SequenceSource {
    fn next_uniform(&mut self) -> f64 {
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value
    }
}
