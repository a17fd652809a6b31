//! # Downscaler
//!
//! One downscaling stage: a short stack of residual blocks followed by a 2x2
//! max-pool. Only the last block changes the channel width, earlier blocks
//! refine features at the input width.

use burn::{
    nn::pool::{MaxPool2d, MaxPool2dConfig},
    prelude::*,
};

use super::{ResidualBlock, ResidualBlockConfig};
use crate::config::{validate_negative_slope, LEAKY_RELU_NEGATIVE_SLOPE};
use crate::error::{EncoderError, EncoderResult};

/// Configuration for the [`Downscaler`] module.
#[derive(Config, Debug)]
pub struct DownscalerConfig {
    /// Number of input channels.
    pub in_channels: usize,
    /// Number of output channels.
    pub out_channels: usize,
    /// Number of residual blocks in the stage.
    #[config(default = "2")]
    pub layers: usize,
    /// Negative slope of the leaky activation in every block.
    #[config(default = "LEAKY_RELU_NEGATIVE_SLOPE")]
    pub negative_slope: f64,
}

impl DownscalerConfig {
    /// Initializes a new `Downscaler` module.
    ///
    /// # Errors
    ///
    /// Returns `Err(EncoderError::InvalidConfiguration)` if `layers` is 0, since the
    /// stage would then be unable to reach `out_channels`, or if `negative_slope` is
    /// negative or non-finite.
    pub fn init<B: Backend>(&self, device: &Device<B>) -> EncoderResult<Downscaler<B>> {
        if self.layers == 0 {
            return Err(EncoderError::InvalidConfiguration {
                reason: "Downscaler needs at least one residual block (layers = 0)".to_string(),
            });
        }
        validate_negative_slope(self.negative_slope)?;

        let blocks = (0..self.layers)
            .map(|i| {
                let out_channels = if i == self.layers - 1 {
                    self.out_channels
                } else {
                    self.in_channels
                };

                ResidualBlockConfig::new(self.in_channels, out_channels)
                    .with_negative_slope(self.negative_slope)
                    .init(device)
            })
            .collect();

        // 2x2 window, stride 2, no padding
        let pool = MaxPool2dConfig::new([2, 2]).with_strides([2, 2]).init();

        Ok(Downscaler {
            blocks,
            pool,
            in_channels: self.in_channels,
            out_channels: self.out_channels,
        })
    }
}

/// Maps `[B, in_channels, H, W]` to `[B, out_channels, H/2, W/2]`.
#[derive(Module, Debug)]
pub struct Downscaler<B: Backend> {
    blocks: Vec<ResidualBlock<B>>,
    pool: MaxPool2d,
    in_channels: usize,
    out_channels: usize,
}

impl<B: Backend> Downscaler<B> {
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.blocks.iter().fold(x, |x, block| block.forward(x));

        self.pool.forward(x)
    }

    pub const fn in_channels(&self) -> usize {
        self.in_channels
    }

    pub const fn out_channels(&self) -> usize {
        self.out_channels
    }

    /// Number of residual blocks in this stage.
    pub fn layers(&self) -> usize {
        self.blocks.len()
    }
}
