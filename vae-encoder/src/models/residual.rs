//! # Residual Block
//!
//! Two 3x3 convolutions with a leaky activation in between, added back onto
//! the input. When the block changes channel width the skip path goes through
//! a 1x1 projection, otherwise it is a plain identity. Spatial size is always
//! preserved.

use burn::{
    nn::{
        conv::{Conv2d, Conv2dConfig},
        LeakyRelu, LeakyReluConfig, PaddingConfig2d,
    },
    prelude::*,
};
use burn_extra_ops::Identity;

use crate::config::LEAKY_RELU_NEGATIVE_SLOPE;

/// Skip path of a [`ResidualBlock`].
#[derive(Module, Debug)]
enum Shortcut<B: Backend> {
    Identity(Identity<B>),
    Projection(Conv2d<B>),
}

impl<B: Backend> Shortcut<B> {
    fn new(in_channels: usize, out_channels: usize, device: &Device<B>) -> Self {
        if in_channels == out_channels {
            Self::Identity(Identity::new())
        } else {
            Self::Projection(
                Conv2dConfig::new([in_channels, out_channels], [1, 1])
                    .with_padding(PaddingConfig2d::Explicit(0, 0))
                    .init(device),
            )
        }
    }

    fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        match self {
            Self::Identity(identity) => identity.forward(x),
            Self::Projection(conv) => conv.forward(x),
        }
    }
}

/// Configuration for the [`ResidualBlock`] module.
#[derive(Config, Debug)]
pub struct ResidualBlockConfig {
    /// Number of input channels.
    pub in_channels: usize,
    /// Number of output channels.
    pub out_channels: usize,
    /// Negative slope of the leaky activation.
    #[config(default = "LEAKY_RELU_NEGATIVE_SLOPE")]
    pub negative_slope: f64,
}

impl ResidualBlockConfig {
    /// Initializes a new `ResidualBlock` module.
    ///
    /// The slope is taken as is; [`DownscalerConfig`](crate::DownscalerConfig) and
    /// [`EncoderConfig`](crate::EncoderConfig) reject negative or non-finite values
    /// before any block is built.
    pub fn init<B: Backend>(&self, device: &Device<B>) -> ResidualBlock<B> {
        let conv_in = Conv2dConfig::new([self.in_channels, self.out_channels], [3, 3])
            .with_stride([1, 1])
            .with_padding(PaddingConfig2d::Explicit(1, 1))
            .init(device);
        let conv_out = Conv2dConfig::new([self.out_channels, self.out_channels], [3, 3])
            .with_stride([1, 1])
            .with_padding(PaddingConfig2d::Explicit(1, 1))
            .init(device);
        let activation = LeakyReluConfig::new()
            .with_negative_slope(self.negative_slope)
            .init();

        ResidualBlock {
            conv_in,
            conv_out,
            shortcut: Shortcut::new(self.in_channels, self.out_channels, device),
            activation,
        }
    }
}

/// A residual block mapping `[B, in, H, W]` to `[B, out, H, W]`.
#[derive(Module, Debug)]
pub struct ResidualBlock<B: Backend> {
    conv_in: Conv2d<B>,
    conv_out: Conv2d<B>,
    shortcut: Shortcut<B>,
    activation: LeakyRelu,
}

impl<B: Backend> ResidualBlock<B> {
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let residual = self.shortcut.forward(x.clone());

        let x = self.conv_in.forward(x);
        let x = self.activation.forward(x);
        let x = self.conv_out.forward(x);

        self.activation.forward(x + residual)
    }
}
