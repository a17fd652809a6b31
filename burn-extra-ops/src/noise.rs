//! # Gaussian Noise Sources
//!
//! Sampling layers such as the VAE reparameterization need a stream of
//! independent standard-normal draws. Instead of reaching for a hidden global
//! generator, callers hand a [`NoiseSource`] to the operation that consumes
//! randomness:
//!
//! - [`BackendNoise`] draws through Burn's own tensor RNG. This is the
//!   backend-wide generator, reseedable with `B::seed`.
//! - [`SeededNoise`] owns a private `StdRng`, so two sources built from the
//!   same seed produce the same tensors regardless of what else runs.

use burn::{
    prelude::*,
    tensor::{Distribution, TensorData},
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::StandardNormal;

/// A supplier of standard-normal noise tensors.
pub trait NoiseSource {
    /// Draws a tensor of the given shape whose entries are i.i.d. `N(0, 1)`.
    ///
    /// The result never carries gradient history.
    fn standard_normal<B: Backend, const D: usize>(
        &mut self,
        shape: Shape,
        device: &B::Device,
    ) -> Tensor<B, D>;
}

/// Noise drawn from the backend's process-wide random generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackendNoise;

impl NoiseSource for BackendNoise {
    fn standard_normal<B: Backend, const D: usize>(
        &mut self,
        shape: Shape,
        device: &B::Device,
    ) -> Tensor<B, D> {
        Tensor::random(shape, Distribution::Normal(0.0, 1.0), device)
    }
}

/// Noise drawn from an owned, seedable generator.
#[derive(Debug, Clone)]
pub struct SeededNoise {
    rng: StdRng,
}

impl SeededNoise {
    /// Creates a reproducible source: equal seeds give equal draws.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a source seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl NoiseSource for SeededNoise {
    fn standard_normal<B: Backend, const D: usize>(
        &mut self,
        shape: Shape,
        device: &B::Device,
    ) -> Tensor<B, D> {
        let values: Vec<f32> = (0..shape.num_elements())
            .map(|_| self.rng.sample::<f32, _>(StandardNormal))
            .collect();

        Tensor::from_data(TensorData::new(values, shape.dims), device)
    }
}
