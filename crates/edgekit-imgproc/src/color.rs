use edgekit_image::{Image, ImageError};

use crate::parallel;

/// Define the RGB weights for the grayscale conversion (ITU-R BT.601).
const RW: f32 = 0.299;
const GW: f32 = 0.587;
const BW: f32 = 0.114;

/// Convert an RGB image to a float intensity image using the formula:
///
/// Y = 0.299 * R + 0.587 * G + 0.114 * B
///
/// The output values stay in the `[0, 255]` range of the input channels.
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output intensity image.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use edgekit_image::{Image, ImageSize};
/// use edgekit_imgproc::color::gray_from_rgb;
///
/// let image = Image::<u8, 3>::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     vec![0u8; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let mut gray = Image::<f32, 1>::from_size_val(image.size(), 0.0).unwrap();
///
/// gray_from_rgb(&image, &mut gray).unwrap();
/// assert_eq!(gray.num_channels(), 1);
/// ```
pub fn gray_from_rgb(src: &Image<u8, 3>, dst: &mut Image<f32, 1>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let r = src_pixel[0] as f32;
        let g = src_pixel[1] as f32;
        let b = src_pixel[2] as f32;
        dst_pixel[0] = RW * r + GW * g + BW * b;
    });

    Ok(())
}

/// Convert an RGBA image to a float intensity image, ignoring the alpha channel.
///
/// Uses the same BT.601 weights as [`gray_from_rgb`].
///
/// Precondition: the input and output images must have the same size.
pub fn gray_from_rgba(src: &Image<u8, 4>, dst: &mut Image<f32, 1>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let r = src_pixel[0] as f32;
        let g = src_pixel[1] as f32;
        let b = src_pixel[2] as f32;
        dst_pixel[0] = RW * r + GW * g + BW * b;
    });

    Ok(())
}

/// Convert a single channel image to RGB by replicating the value across all channels.
///
/// Used to materialize a binary edge mask as a displayable image.
///
/// Precondition: the input and output images must have the same size.
pub fn rgb_from_gray(src: &Image<u8, 1>, dst: &mut Image<u8, 3>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel[0] = src_pixel[0];
        dst_pixel[1] = src_pixel[0];
        dst_pixel[2] = src_pixel[0];
    });

    Ok(())
}
