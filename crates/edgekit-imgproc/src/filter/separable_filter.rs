use rayon::prelude::*;

use edgekit_image::{Image, ImageError};

/// Mirror an out-of-range sample index back into `[0, n)`.
///
/// A negative index `-i` maps to `i`, and an index past the end maps to
/// `2 * n - i - 2`. The final clamp only matters for degenerate axes shorter
/// than the kernel radius, where a single reflection is not enough.
fn mirror(i: isize, n: usize) -> usize {
    let n = n as isize;
    let mut i = i;
    if i < 0 {
        i = -i;
    }
    if i >= n {
        i = 2 * n - i - 2;
    }
    i.clamp(0, n - 1) as usize
}

/// Apply a separable 2D filter with reflective boundary handling.
///
/// Performs the horizontal convolution into a temporary buffer and the
/// vertical convolution from that buffer into `dst`; a pass never convolves a
/// buffer against itself. Out-of-range samples are mirrored back into the
/// frame, which keeps a constant image constant instead of darkening its
/// borders the way clamped or zero padding would.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W).
/// * `dst` - The destination image with shape (H, W).
/// * `kernel_x` - The horizontal kernel.
/// * `kernel_y` - The vertical kernel.
pub fn separable_filter(
    src: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
    kernel_x: &[f32],
    kernel_y: &[f32],
) -> Result<(), ImageError> {
    if kernel_x.is_empty() || kernel_y.is_empty() {
        return Err(ImageError::InvalidKernelLength(
            kernel_x.len(),
            kernel_y.len(),
        ));
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let rows = src.rows();
    let cols = src.cols();
    let half_x = (kernel_x.len() / 2) as isize;
    let half_y = (kernel_y.len() / 2) as isize;

    let src_data = src.as_slice();
    let mut temp = vec![0.0f32; src_data.len()];

    // Horizontal pass
    temp.par_chunks_exact_mut(cols)
        .enumerate()
        .for_each(|(r, temp_row)| {
            let src_row = &src_data[r * cols..(r + 1) * cols];
            for (c, out) in temp_row.iter_mut().enumerate() {
                let mut acc = 0.0;
                for (i, &k) in kernel_x.iter().enumerate() {
                    let x = mirror(c as isize + i as isize - half_x, cols);
                    acc += src_row[x] * k;
                }
                *out = acc;
            }
        });

    // Vertical pass
    dst.as_slice_mut()
        .par_chunks_exact_mut(cols)
        .enumerate()
        .for_each(|(r, dst_row)| {
            for (c, out) in dst_row.iter_mut().enumerate() {
                let mut acc = 0.0;
                for (i, &k) in kernel_y.iter().enumerate() {
                    let y = mirror(r as isize + i as isize - half_y, rows);
                    acc += temp[y * cols + c] * k;
                }
                *out = acc;
            }
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgekit_image::ImageSize;

    #[test]
    fn mirror_index() {
        assert_eq!(mirror(-2, 5), 2);
        assert_eq!(mirror(-1, 5), 1);
        assert_eq!(mirror(0, 5), 0);
        assert_eq!(mirror(4, 5), 4);
        assert_eq!(mirror(5, 5), 3);
        assert_eq!(mirror(6, 5), 2);
        // degenerate 1-wide axis always resolves to the only sample
        assert_eq!(mirror(-1, 1), 0);
        assert_eq!(mirror(1, 1), 0);
    }

    #[test]
    fn separable_filter_impulse() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 5,
            height: 5,
        };

        #[rustfmt::skip]
        let img = Image::new(
            size,
            vec![
                0.0, 0.0, 0.0, 0.0, 0.0,
                0.0, 0.0, 0.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 0.0, 0.0, 0.0,
                0.0, 0.0, 0.0, 0.0, 0.0,
            ],
        )?;

        let mut dst = Image::<_, 1>::from_size_val(img.size(), 0.0)?;
        let kernel = vec![1.0, 1.0, 1.0];
        separable_filter(&img, &mut dst, &kernel, &kernel)?;

        #[rustfmt::skip]
        assert_eq!(
            dst.as_slice(),
            &[
                0.0, 0.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 1.0, 1.0, 0.0,
                0.0, 1.0, 1.0, 1.0, 0.0,
                0.0, 1.0, 1.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 0.0, 0.0,
            ]
        );
        Ok(())
    }

    #[test]
    fn separable_filter_reflects_at_borders() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 3,
            height: 1,
        };

        // with reflection the sample left of x=0 is x=1
        let img = Image::new(size, vec![1.0, 2.0, 3.0])?;
        let mut dst = Image::<_, 1>::from_size_val(size, 0.0)?;
        separable_filter(&img, &mut dst, &[1.0, 1.0, 1.0], &[1.0])?;

        assert_eq!(dst.as_slice(), &[5.0, 6.0, 7.0]);
        Ok(())
    }

    #[test]
    fn separable_filter_empty_kernel() -> Result<(), ImageError> {
        let img = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0.0,
        )?;
        let mut dst = Image::<f32, 1>::from_size_val(img.size(), 0.0)?;
        let res = separable_filter(&img, &mut dst, &[], &[1.0]);
        assert_eq!(res, Err(ImageError::InvalidKernelLength(0, 1)));
        Ok(())
    }

    #[test]
    fn separable_filter_size_mismatch() -> Result<(), ImageError> {
        let img = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0.0,
        )?;
        let mut dst = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 3,
                height: 2,
            },
            0.0,
        )?;
        let res = separable_filter(&img, &mut dst, &[1.0], &[1.0]);
        assert!(matches!(res, Err(ImageError::InvalidImageSize(..))));
        Ok(())
    }
}
