//! # Encoder Configuration
//!
//! `EncoderConfig` is the single source of truth for the encoder architecture.
//! Everything else (number of downscaling stages, channel progression, width
//! of the latent heads) is derived from it once, at construction time.

use burn::prelude::*;

use crate::error::{EncoderError, EncoderResult};

/// Negative slope of the leaky rectifier used inside every residual block.
pub const LEAKY_RELU_NEGATIVE_SLOPE: f64 = 0.2;

/// Configuration for the [`Encoder`](crate::Encoder).
#[derive(Config, Debug)]
pub struct EncoderConfig {
    /// Side length of the square input image. Must be a positive power of two.
    pub image_size: usize,
    /// Number of channels of the input image.
    pub channels: usize,
    /// Width of the latent Gaussian (and of `z`, `mu` and `logvar`).
    pub latent_dim: usize,
    /// Residual blocks per downscaling stage.
    #[config(default = "2")]
    pub layers_per_size: usize,
    /// Negative slope shared by all leaky activations.
    #[config(default = "LEAKY_RELU_NEGATIVE_SLOPE")]
    pub negative_slope: f64,
}

impl EncoderConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err(EncoderError::InvalidImageSize)` if `image_size` is not a positive
    /// power of two.
    /// Returns `Err(EncoderError::InvalidConfiguration)` for zero widths, zero layers,
    /// a negative or non-finite slope, or a final channel width that overflows `usize`.
    pub fn validate(&self) -> EncoderResult<()> {
        if !self.image_size.is_power_of_two() {
            return Err(EncoderError::InvalidImageSize {
                image_size: self.image_size,
            });
        }

        if self.channels == 0 {
            return Err(EncoderError::InvalidConfiguration {
                reason: "channels must be greater than 0".to_string(),
            });
        }

        if self.latent_dim == 0 {
            return Err(EncoderError::InvalidConfiguration {
                reason: "latent_dim must be greater than 0".to_string(),
            });
        }

        // A stage without blocks cannot widen its channels.
        if self.layers_per_size == 0 {
            return Err(EncoderError::InvalidConfiguration {
                reason: "layers_per_size must be greater than 0".to_string(),
            });
        }

        validate_negative_slope(self.negative_slope)?;

        if self.channels.checked_mul(self.image_size).is_none() {
            return Err(EncoderError::InvalidConfiguration {
                reason: format!(
                    "final channel width overflows: {} channels x {}",
                    self.channels, self.image_size
                ),
            });
        }

        Ok(())
    }

    /// Number of downscaling stages, `log2(image_size)`.
    pub fn stage_count(&self) -> EncoderResult<usize> {
        self.validate()?;
        Ok(self.stage_count_unchecked())
    }

    /// Channel width after the last stage, `channels * 2^stage_count`.
    ///
    /// The feature map is 1x1 at that point, so this is also the input width
    /// of the `mu` and `logvar` heads.
    pub fn final_channels(&self) -> EncoderResult<usize> {
        self.validate()?;
        Ok(self.final_channels_unchecked())
    }

    /// `(in_channels, out_channels)` of every stage, in forward order.
    pub fn stage_channels(&self) -> EncoderResult<Vec<(usize, usize)>> {
        self.validate()?;
        Ok(self.stage_channels_unchecked())
    }

    // The `_unchecked` variants assume `validate` has already passed.

    pub(crate) fn stage_count_unchecked(&self) -> usize {
        self.image_size.trailing_zeros() as usize
    }

    pub(crate) fn final_channels_unchecked(&self) -> usize {
        self.channels * self.image_size
    }

    pub(crate) fn stage_channels_unchecked(&self) -> Vec<(usize, usize)> {
        (0..self.stage_count_unchecked())
            .map(|i| (self.channels << i, self.channels << (i + 1)))
            .collect()
    }
}

/// Checks a leaky-activation slope: it must be finite and not negative.
///
/// # Errors
///
/// Returns `Err(EncoderError::InvalidConfiguration)` otherwise.
pub fn validate_negative_slope(negative_slope: f64) -> EncoderResult<()> {
    if !negative_slope.is_finite() || negative_slope < 0.0 {
        return Err(EncoderError::InvalidConfiguration {
            reason: format!(
                "negative_slope must be finite and non-negative, got {negative_slope}"
            ),
        });
    }

    Ok(())
}
