use rayon::prelude::*;

use edgekit_image::{Image, ImageError};

/// The two neighbor offsets to compare against, given the quantized gradient
/// direction at (x, y). `None` means the neighbor falls outside the frame.
fn sector_neighbors(
    x: usize,
    y: usize,
    cols: usize,
    rows: usize,
    angle: f32,
) -> (Option<usize>, Option<usize>) {
    if !(22.5..157.5).contains(&angle) {
        // horizontal: compare left and right
        (
            (x > 0).then(|| y * cols + (x - 1)),
            (x + 1 < cols).then(|| y * cols + (x + 1)),
        )
    } else if angle < 67.5 {
        // diagonal through upper-left and lower-right
        (
            (x > 0 && y > 0).then(|| (y - 1) * cols + (x - 1)),
            (x + 1 < cols && y + 1 < rows).then(|| (y + 1) * cols + (x + 1)),
        )
    } else if angle < 112.5 {
        // vertical: compare above and below
        (
            (y > 0).then(|| (y - 1) * cols + x),
            (y + 1 < rows).then(|| (y + 1) * cols + x),
        )
    } else {
        // diagonal through upper-right and lower-left
        (
            (x + 1 < cols && y > 0).then(|| (y - 1) * cols + (x + 1)),
            (x > 0 && y + 1 < rows).then(|| (y + 1) * cols + (x - 1)),
        )
    }
}

/// Thin a gradient magnitude field to one-pixel-wide ridges.
///
/// For every pixel the gradient direction is folded into `[0, 180)` and
/// quantized into one of four sectors; the pixel survives only if its
/// magnitude is greater than or equal to both neighbors along that sector's
/// axis. Ties are kept, favoring a thicker edge over a gap. A pixel whose
/// sector neighbor falls outside the frame cannot be confirmed as a local
/// maximum and is suppressed, as is any pixel with near-zero magnitude.
///
/// # Arguments
///
/// * `gx` - The horizontal derivative with shape (H, W).
/// * `gy` - The vertical derivative with shape (H, W).
/// * `mag` - The gradient magnitude with shape (H, W).
/// * `dst` - The destination suppressed magnitude with shape (H, W).
pub fn non_maximum_suppression(
    gx: &Image<f32, 1>,
    gy: &Image<f32, 1>,
    mag: &Image<f32, 1>,
    dst: &mut Image<f32, 1>,
) -> Result<(), ImageError> {
    for src_size in [gx.size(), gy.size(), mag.size()] {
        if src_size != dst.size() {
            return Err(ImageError::InvalidImageSize(
                src_size.width,
                src_size.height,
                dst.cols(),
                dst.rows(),
            ));
        }
    }

    let rows = mag.rows();
    let cols = mag.cols();
    let gx_data = gx.as_slice();
    let gy_data = gy.as_slice();
    let mag_data = mag.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(cols)
        .enumerate()
        .for_each(|(y, dst_row)| {
            for (x, out) in dst_row.iter_mut().enumerate() {
                let idx = y * cols + x;
                let m = mag_data[idx];

                if m < f32::EPSILON {
                    *out = 0.0;
                    continue;
                }

                let mut angle = gy_data[idx].atan2(gx_data[idx]).to_degrees();
                if angle < 0.0 {
                    angle += 180.0;
                }

                *out = match sector_neighbors(x, y, cols, rows, angle) {
                    (Some(n1), Some(n2)) if m >= mag_data[n1] && m >= mag_data[n2] => m,
                    _ => 0.0,
                };
            }
        });

    Ok(())
}
