use rayon::prelude::*;

use edgekit_image::{Image, ImageError};

use crate::filter::kernels;

/// Compute the first order image derivatives and gradient magnitude using the
/// 3x3 Sobel operator.
///
/// Every pixel is computed, including the border ring: neighbor coordinates
/// are clamped into the frame, so the gradient field has full dimensions with
/// no unset border. Skipping border pixels instead would leave a ring of zero
/// magnitude that downstream stages would read as "definitely not an edge".
///
/// # Arguments
///
/// * `src` - The source intensity image with shape (H, W).
/// * `gx` - The destination horizontal derivative with shape (H, W).
/// * `gy` - The destination vertical derivative with shape (H, W).
/// * `mag` - The destination gradient magnitude `sqrt(gx^2 + gy^2)`.
pub fn spatial_gradient_sobel(
    src: &Image<f32, 1>,
    gx: &mut Image<f32, 1>,
    gy: &mut Image<f32, 1>,
    mag: &mut Image<f32, 1>,
) -> Result<(), ImageError> {
    for dst_size in [gx.size(), gy.size(), mag.size()] {
        if src.size() != dst_size {
            return Err(ImageError::InvalidImageSize(
                src.cols(),
                src.rows(),
                dst_size.width,
                dst_size.height,
            ));
        }
    }

    let rows = src.rows();
    let cols = src.cols();
    let (sobel_x, sobel_y) = kernels::sobel_kernel_3x3();

    let src_data = src.as_slice();

    gx.as_slice_mut()
        .par_chunks_exact_mut(cols)
        .zip(gy.as_slice_mut().par_chunks_exact_mut(cols))
        .zip(mag.as_slice_mut().par_chunks_exact_mut(cols))
        .enumerate()
        .for_each(|(r, ((gx_row, gy_row), mag_row))| {
            for c in 0..cols {
                let mut sum_x = 0.0;
                let mut sum_y = 0.0;
                for (dy, (kx_row, ky_row)) in sobel_x.iter().zip(sobel_y.iter()).enumerate() {
                    // clamp(r + dy - 1, 0, rows - 1) without underflow
                    let row = (r + dy).min(rows).max(1) - 1;
                    for dx in 0..3 {
                        let col = (c + dx).min(cols).max(1) - 1;
                        let val = src_data[row * cols + col];
                        sum_x += val * kx_row[dx];
                        sum_y += val * ky_row[dx];
                    }
                }
                gx_row[c] = sum_x;
                gy_row[c] = sum_y;
                mag_row[c] = (sum_x * sum_x + sum_y * sum_y).sqrt();
            }
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgekit_image::ImageSize;

    #[test]
    fn gradient_of_uniform_image_is_zero() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 5,
            height: 4,
        };
        let img = Image::<f32, 1>::from_size_val(size, 113.0)?;
        let mut gx = Image::zeros(size)?;
        let mut gy = Image::zeros(size)?;
        let mut mag = Image::zeros(size)?;

        spatial_gradient_sobel(&img, &mut gx, &mut gy, &mut mag)?;

        assert!(gx.as_slice().iter().all(|&v| v == 0.0));
        assert!(gy.as_slice().iter().all(|&v| v == 0.0));
        assert!(mag.as_slice().iter().all(|&v| v == 0.0));
        Ok(())
    }

    #[test]
    fn gradient_of_ramp() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 5,
            height: 5,
        };
        // image value = x + 5 * y
        let img = Image::new(size, (0..25).map(|i| i as f32).collect())?;
        let mut gx = Image::zeros(size)?;
        let mut gy = Image::zeros(size)?;
        let mut mag = Image::zeros(size)?;

        spatial_gradient_sobel(&img, &mut gx, &mut gy, &mut mag)?;

        // interior gx is 8 (step 1 per column, kernel weight sum 4, doubled span),
        // halved at the clamped vertical borders of the column span
        #[rustfmt::skip]
        assert_eq!(
            gx.as_slice(),
            &[
                4.0, 8.0, 8.0, 8.0, 4.0,
                4.0, 8.0, 8.0, 8.0, 4.0,
                4.0, 8.0, 8.0, 8.0, 4.0,
                4.0, 8.0, 8.0, 8.0, 4.0,
                4.0, 8.0, 8.0, 8.0, 4.0,
            ]
        );

        #[rustfmt::skip]
        assert_eq!(
            gy.as_slice(),
            &[
                20.0, 20.0, 20.0, 20.0, 20.0,
                40.0, 40.0, 40.0, 40.0, 40.0,
                40.0, 40.0, 40.0, 40.0, 40.0,
                40.0, 40.0, 40.0, 40.0, 40.0,
                20.0, 20.0, 20.0, 20.0, 20.0,
            ]
        );

        let idx = 2 * 5 + 2;
        assert_eq!(
            mag.as_slice()[idx],
            (8.0f32 * 8.0 + 40.0 * 40.0).sqrt()
        );
        Ok(())
    }

    #[test]
    fn gradient_size_mismatch() -> Result<(), ImageError> {
        let img = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 4,
                height: 4,
            },
            0.0,
        )?;
        let mut gx = Image::zeros(img.size())?;
        let mut gy = Image::zeros(img.size())?;
        let mut mag = Image::<f32, 1>::zeros(ImageSize {
            width: 3,
            height: 4,
        })?;
        let res = spatial_gradient_sobel(&img, &mut gx, &mut gy, &mut mag);
        assert!(matches!(res, Err(ImageError::InvalidImageSize(..))));
        Ok(())
    }
}
