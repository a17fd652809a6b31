//! # VAE Encoder
//!
//! Maps a square image `[B, C, S, S]` to the parameters of a diagonal
//! Gaussian over a `latent_dim`-wide latent space and draws one sample from
//! it.
//!
//! The network is `log2(S)` [`Downscaler`] stages, each doubling the channel
//! width and halving the side length, so the last feature map is
//! `[B, C * S, 1, 1]`. It is flattened and fed to two independent linear
//! heads producing `mu` and `logvar`.

use burn::{
    nn::{Linear, LinearConfig},
    prelude::*,
};
use burn_extra_ops::{BackendNoise, NoiseSource, TensorExtraOps};

use super::{Downscaler, DownscalerConfig};
use crate::config::EncoderConfig;
use crate::error::{EncoderError, EncoderResult};

impl EncoderConfig {
    /// Initializes an `Encoder` with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `device` - The device to create the model on.
    ///
    /// # Errors
    ///
    /// Returns `Err(EncoderError::InvalidImageSize)` if `image_size` is not a positive
    /// power of two, or `Err(EncoderError::InvalidConfiguration)` for any other invalid
    /// setting. No model is built in either case.
    pub fn init<B: Backend>(&self, device: &Device<B>) -> EncoderResult<Encoder<B>> {
        self.validate()?;
        let stage_channels = self.stage_channels_unchecked();
        let final_channels = self.final_channels_unchecked();

        let mut stages = Vec::with_capacity(stage_channels.len());
        for (index, (in_channels, out_channels)) in stage_channels.into_iter().enumerate() {
            tracing::trace!(index, in_channels, out_channels, "building downscaler stage");
            let stage = DownscalerConfig::new(in_channels, out_channels)
                .with_layers(self.layers_per_size)
                .with_negative_slope(self.negative_slope)
                .init(device)?;
            stages.push(stage);
        }

        let mu = LinearConfig::new(final_channels, self.latent_dim).init(device);
        let logvar = LinearConfig::new(final_channels, self.latent_dim).init(device);

        tracing::debug!(
            image_size = self.image_size,
            stages = stages.len(),
            final_channels,
            latent_dim = self.latent_dim,
            "built encoder"
        );

        Ok(Encoder {
            stages,
            mu,
            logvar,
            image_size: self.image_size,
            channels: self.channels,
            latent_dim: self.latent_dim,
        })
    }
}

/// The VAE encoder.
#[derive(Module, Debug)]
pub struct Encoder<B: Backend> {
    /// Downscaling stages, applied in order.
    stages: Vec<Downscaler<B>>,
    /// Mean head.
    mu: Linear<B>,
    /// Log-variance head. Its output is `ln(sigma^2)`, never the variance itself.
    logvar: Linear<B>,
    image_size: usize,
    channels: usize,
    latent_dim: usize,
}

impl<B: Backend> Encoder<B> {
    /// Encodes `x` and draws `z` with the backend's random generator.
    ///
    /// # Shapes
    /// - input: `[batch_size, channels, image_size, image_size]`
    /// - output: `[z, mu, logvar]`, each `[batch_size, latent_dim]`
    pub fn forward(&self, x: Tensor<B, 4>) -> [Tensor<B, 2>; 3] {
        self.forward_with_noise(x, &mut BackendNoise)
    }

    /// Same as [`forward`](Self::forward), drawing the sampling noise from `noise`.
    pub fn forward_with_noise<N: NoiseSource>(
        &self,
        x: Tensor<B, 4>,
        noise: &mut N,
    ) -> [Tensor<B, 2>; 3] {
        let (mu, logvar) = self.encode(x);
        let z = mu.clone().reparameterize(logvar.clone(), noise);

        [z, mu, logvar]
    }

    /// Returns `(mu, logvar)` without sampling. Deterministic for fixed weights.
    pub fn encode(&self, x: Tensor<B, 4>) -> (Tensor<B, 2>, Tensor<B, 2>) {
        let features = self.features(x);
        let mu = self.mu.forward(features.clone());
        let logvar = self.logvar.forward(features);

        (mu, logvar)
    }

    /// Runs the downscaling stages and flattens the resulting 1x1 feature map.
    fn features(&self, x: Tensor<B, 4>) -> Tensor<B, 2> {
        let x = self.stages.iter().fold(x, |x, stage| stage.forward(x));

        x.flatten(1, 3)
    }

    /// Checks `dims` against the expected `[B >= 1, channels, image_size, image_size]`.
    ///
    /// `forward` does not call this; mismatched inputs there fail inside the backend.
    pub fn check_input(&self, dims: [usize; 4]) -> EncoderResult<()> {
        let [batch, channels, height, width] = dims;
        if batch == 0
            || channels != self.channels
            || height != self.image_size
            || width != self.image_size
        {
            return Err(EncoderError::InvalidTensorShape {
                expected: format!(
                    "[B >= 1, {}, {}, {}]",
                    self.channels, self.image_size, self.image_size
                ),
                actual: format!("{dims:?}"),
            });
        }

        Ok(())
    }

    /// Number of downscaling stages, `log2(image_size)`.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Channel width entering the `mu` and `logvar` heads.
    pub fn final_channels(&self) -> usize {
        self.stages
            .last()
            .map_or(self.channels, |stage| stage.out_channels())
    }

    pub const fn image_size(&self) -> usize {
        self.image_size
    }

    pub const fn channels(&self) -> usize {
        self.channels
    }

    pub const fn latent_dim(&self) -> usize {
        self.latent_dim
    }
}
