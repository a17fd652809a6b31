//! # VAE Encoder for Burn
//!
//! The encoder half of a convolutional variational autoencoder: images go
//! through a stack of residual downscaling stages until the feature map is a
//! single pixel, two linear heads turn that into the mean and log-variance of
//! a latent Gaussian, and a latent vector is drawn with the reparameterization
//! trick.
//!
//! ```no_run
//! use burn::backend::NdArray;
//! use burn::prelude::*;
//! use vae_encoder_burn::EncoderConfig;
//!
//! let device = Default::default();
//! let encoder = EncoderConfig::new(8, 3, 16).init::<NdArray>(&device)?;
//! let images = Tensor::<NdArray, 4>::zeros([4, 3, 8, 8], &device);
//! let [z, _mu, _logvar] = encoder.forward(images);
//! assert_eq!(z.dims(), [4, 16]);
//! # Ok::<(), vae_encoder_burn::EncoderError>(())
//! ```

mod config;
mod error;
mod models;

pub use burn_extra_ops::{reparameterize, BackendNoise, NoiseSource, SeededNoise, TensorExtraOps};
pub use config::*;
pub use error::{EncoderError, EncoderResult};
pub use models::{
    Downscaler, DownscalerConfig, Encoder, EncoderRecord, ResidualBlock, ResidualBlockConfig,
};
