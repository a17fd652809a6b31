//! # Reparameterized Gaussian Sampling
//!
//! Draws `z ~ N(mu, exp(logvar))` as `z = eps * exp(0.5 * logvar) + mu` with
//! `eps ~ N(0, 1)`. The randomness lives entirely in `eps`, so gradients flow
//! into `mu` and `logvar` through ordinary tensor arithmetic.

use burn::prelude::*;

use crate::noise::NoiseSource;

/// Samples from a diagonal Gaussian parameterized by mean and log-variance.
///
/// `logvar` is the natural log of the variance, not the variance itself.
/// Shapes of `mu` and `logvar` must match; one noise value is drawn per
/// element.
pub fn reparameterize<B: Backend, const D: usize, N: NoiseSource>(
    mu: Tensor<B, D>,
    logvar: Tensor<B, D>,
    noise: &mut N,
) -> Tensor<B, D> {
    let std = logvar.mul_scalar(0.5).exp();
    let eps = noise.standard_normal::<B, D>(std.shape(), &std.device());

    eps * std + mu
}
