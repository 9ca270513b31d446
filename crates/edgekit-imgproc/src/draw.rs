use rayon::prelude::*;

use edgekit_image::{Image, ImageError};

/// Mask values strictly above this count as "on".
const ON_THRESHOLD: u8 = 128;

/// Overlay a binary mask on an RGB image.
///
/// Copies `src` into `dst` and paints `color` wherever the mask is on, so an
/// edge mask can be reviewed on top of the image it was computed from.
///
/// # Arguments
///
/// * `src` - The source RGB image with shape (H, W).
/// * `mask` - The binary mask with shape (H, W).
/// * `color` - The RGB triple painted over on-pixels.
/// * `dst` - The destination RGB image with shape (H, W).
pub fn overlay_mask(
    src: &Image<u8, 3>,
    mask: &Image<u8, 1>,
    color: [u8; 3],
    dst: &mut Image<u8, 3>,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }
    if mask.size() != src.size() {
        return Err(ImageError::InvalidImageSize(
            mask.cols(),
            mask.rows(),
            src.cols(),
            src.rows(),
        ));
    }

    let cols = src.cols();
    dst.as_slice_mut()
        .par_chunks_exact_mut(cols * 3)
        .zip(src.as_slice().par_chunks_exact(cols * 3))
        .zip(mask.as_slice().par_chunks_exact(cols))
        .for_each(|((dst_row, src_row), mask_row)| {
            dst_row
                .chunks_exact_mut(3)
                .zip(src_row.chunks_exact(3))
                .zip(mask_row.iter())
                .for_each(|((dst_pixel, src_pixel), &m)| {
                    if m > ON_THRESHOLD {
                        dst_pixel.copy_from_slice(&color);
                    } else {
                        dst_pixel.copy_from_slice(src_pixel);
                    }
                });
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgekit_image::ImageSize;

    #[test]
    fn overlay_paints_only_on_pixels() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        let src = Image::<u8, 3>::new(size, vec![10; 12])?;
        let mask = Image::<u8, 1>::new(size, vec![0, 255, 0, 255])?;
        let mut dst = Image::<u8, 3>::from_size_val(size, 0)?;

        overlay_mask(&src, &mask, [255, 0, 0], &mut dst)?;

        #[rustfmt::skip]
        assert_eq!(
            dst.as_slice(),
            &[
                10, 10, 10, 255, 0, 0,
                10, 10, 10, 255, 0, 0,
            ]
        );
        Ok(())
    }

    #[test]
    fn overlay_size_mismatch() -> Result<(), ImageError> {
        let src = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0,
        )?;
        let mask = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 3,
                height: 2,
            },
            0,
        )?;
        let mut dst = Image::<u8, 3>::from_size_val(src.size(), 0)?;
        let res = overlay_mask(&src, &mask, [255, 0, 0], &mut dst);
        assert!(matches!(res, Err(ImageError::InvalidImageSize(..))));
        Ok(())
    }
}
