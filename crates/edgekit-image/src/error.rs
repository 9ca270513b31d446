/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ImageError {
    /// Error when the data length does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when an image dimension is zero.
    #[error("Image dimensions must be non-zero, got {0}x{1}")]
    ZeroImageSize(usize, usize),

    /// Error when two images are expected to have the same size.
    #[error("Image size mismatch: expected {0}x{1}, got {2}x{3}")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when a convolution kernel is empty.
    #[error("Invalid kernel length: kernel_x {0}, kernel_y {1}")]
    InvalidKernelLength(usize, usize),

    /// Error when a pixel access falls outside the image.
    #[error("Pixel index ({0}, {1}, channel {2}) is out of bounds for image {3}x{4}")]
    PixelIndexOutOfBounds(usize, usize, usize, usize, usize),
}
