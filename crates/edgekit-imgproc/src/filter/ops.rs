use edgekit_image::{Image, ImageError};

use super::{kernels, separable_filter};

/// Blur an intensity image using a gaussian filter.
///
/// The kernel is derived from `sigma` (radius `max(1, ceil(3 * sigma))`) and
/// applied as two 1D passes with reflective boundary handling.
///
/// A non-positive `sigma` is a defined pass-through: `dst` becomes an exact
/// copy of `src` and no convolution runs.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `dst` - The destination image with shape (H, W).
/// * `sigma` - The standard deviation of the gaussian kernel.
pub fn gaussian_blur(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    sigma: f32,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    if sigma <= 0.0 {
        dst.as_slice_mut().copy_from_slice(src.as_slice());
        return Ok(());
    }

    let kernel = kernels::gaussian_kernel_from_sigma(sigma);
    separable_filter(src, dst, &kernel, &kernel)
}
