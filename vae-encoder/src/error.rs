use thiserror::Error;

/// The error type for encoder construction and input checks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncoderError {
    /// The image side length is not a positive power of two, so the
    /// downscaling stages could never reach a 1x1 feature map.
    #[error("image_size must be a positive power of two, got {image_size}")]
    InvalidImageSize {
        /// The rejected side length.
        image_size: usize,
    },

    /// Error for when an invalid model configuration is provided.
    #[error("Invalid model configuration: {reason}")]
    InvalidConfiguration {
        /// The reason why the configuration is invalid.
        reason: String,
    },

    /// Error for when an input tensor has an invalid shape.
    #[error("Invalid input tensor shape: expected {expected}, got {actual}")]
    InvalidTensorShape {
        /// The expected tensor shape.
        expected: String,
        /// The actual tensor shape.
        actual: String,
    },
}

/// A specialized `Result` type for encoder operations.
pub type EncoderResult<T> = Result<T, EncoderError>;
