use rayon::prelude::*;

use edgekit_image::{Image, ImageError};

/// Mask values strictly above this count as "on".
const ON_THRESHOLD: u8 = 128;

/// Value written for an "on" pixel.
const ON: u8 = 255;

fn check_sizes(src: &Image<u8, 1>, dst: &Image<u8, 1>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }
    Ok(())
}

/// Dilate a binary mask with a square structuring element.
///
/// An output pixel is on when any pixel of the `(2 * radius + 1)^2`
/// neighborhood is on. The window is clipped at the frame border:
/// out-of-frame neighbors are excluded from the vote rather than read as off.
///
/// # Arguments
///
/// * `src` - The source binary mask with shape (H, W).
/// * `dst` - The destination binary mask with shape (H, W).
/// * `radius` - The neighborhood radius; 0 reduces to binarization.
pub fn dilate(src: &Image<u8, 1>, dst: &mut Image<u8, 1>, radius: usize) -> Result<(), ImageError> {
    check_sizes(src, dst)?;

    let rows = src.rows();
    let cols = src.cols();
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(cols)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let y0 = y.saturating_sub(radius);
            let y1 = (y + radius).min(rows - 1);
            for (x, out) in dst_row.iter_mut().enumerate() {
                let x0 = x.saturating_sub(radius);
                let x1 = (x + radius).min(cols - 1);

                let mut any_on = false;
                'window: for ny in y0..=y1 {
                    for nx in x0..=x1 {
                        if src_data[ny * cols + nx] > ON_THRESHOLD {
                            any_on = true;
                            break 'window;
                        }
                    }
                }
                *out = if any_on { ON } else { 0 };
            }
        });

    Ok(())
}

/// Erode a binary mask with a square structuring element.
///
/// An output pixel is on only when every pixel of the border-clipped
/// neighborhood is on. Excluding out-of-frame neighbors from the vote avoids
/// artificially eroding a true edge sitting at the image boundary.
///
/// # Arguments
///
/// * `src` - The source binary mask with shape (H, W).
/// * `dst` - The destination binary mask with shape (H, W).
/// * `radius` - The neighborhood radius; 0 reduces to binarization.
pub fn erode(src: &Image<u8, 1>, dst: &mut Image<u8, 1>, radius: usize) -> Result<(), ImageError> {
    check_sizes(src, dst)?;

    let rows = src.rows();
    let cols = src.cols();
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(cols)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let y0 = y.saturating_sub(radius);
            let y1 = (y + radius).min(rows - 1);
            for (x, out) in dst_row.iter_mut().enumerate() {
                let x0 = x.saturating_sub(radius);
                let x1 = (x + radius).min(cols - 1);

                let mut all_on = true;
                'window: for ny in y0..=y1 {
                    for nx in x0..=x1 {
                        if src_data[ny * cols + nx] <= ON_THRESHOLD {
                            all_on = false;
                            break 'window;
                        }
                    }
                }
                *out = if all_on { ON } else { 0 };
            }
        });

    Ok(())
}

/// Morphologically close a binary mask: dilate, then erode.
///
/// Closing seals gaps up to roughly `2 * radius` pixels wide in an edge mask
/// while leaving larger structures in place.
///
/// # Arguments
///
/// * `src` - The source binary mask with shape (H, W).
/// * `dst` - The destination binary mask with shape (H, W).
/// * `radius` - The neighborhood radius for both passes.
pub fn close(src: &Image<u8, 1>, dst: &mut Image<u8, 1>, radius: usize) -> Result<(), ImageError> {
    check_sizes(src, dst)?;

    let mut dilated = Image::from_size_val(src.size(), 0u8)?;
    dilate(src, &mut dilated, radius)?;
    erode(&dilated, dst, radius)
}
