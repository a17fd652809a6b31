//! Additional operations for the Burn deep learning framework
//!
//! This crate provides operations that are commonly used in deep learning but are not
//! yet available in the core Burn framework.

use burn::prelude::*;

mod identity;
mod noise;
mod reparameterize;

// Convenient re-exports
pub use identity::Identity;
pub use noise::{BackendNoise, NoiseSource, SeededNoise};
pub use reparameterize::reparameterize;

/// Additional operations for Burn tensors
pub trait TensorExtraOps<B: Backend, const D: usize> {
    /// Treat `self` as a Gaussian mean and draw a reparameterized sample with
    /// the given log-variance.
    fn reparameterize<N: NoiseSource>(self, logvar: Self, noise: &mut N) -> Self;
}

impl<B: Backend, const D: usize> TensorExtraOps<B, D> for Tensor<B, D> {
    fn reparameterize<N: NoiseSource>(self, logvar: Self, noise: &mut N) -> Self {
        reparameterize(self, logvar, noise)
    }
}
