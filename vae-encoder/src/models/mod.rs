//! # Model Architectures
//!
//! - `residual`: the residual block every stage is built from.
//! - `downscaler`: one stage halving resolution and changing channel width.
//! - `encoder`: the full VAE encoder with its `mu` and `logvar` heads.

mod downscaler;
mod encoder;
mod residual;

pub use downscaler::*;
pub use encoder::*;
pub use residual::*;
