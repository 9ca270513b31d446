use edgekit_image::{Image, ImageError};

/// Per-pixel classification against the two thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mark {
    None,
    Weak,
    Strong,
}

/// Value written into the mask for an accepted edge pixel.
const EDGE: u8 = 255;

/// Link weak edge responses to strong ones with dual thresholds.
///
/// The thresholds are relative to the global maximum magnitude `M`:
/// `high = high_ratio * M`, `low = low_ratio * M`. Pixels at or above `high`
/// are strong and always accepted; pixels in `[low, high)` are weak and
/// accepted only when they are an 8-neighbor of an accepted strong pixel.
/// The traversal uses an explicit work-list, never recursion, because a
/// frame-sized connected component can exceed any safe call-stack depth.
///
/// An all-zero magnitude field has no edges and yields an all-zero mask.
/// `low_ratio > high_ratio` is accepted degenerate input: the weak band is
/// empty and only strong pixels survive.
///
/// # Arguments
///
/// * `mag` - The suppressed gradient magnitude with shape (H, W).
/// * `dst` - The destination binary mask with shape (H, W), 255 = edge.
/// * `low_ratio` - The weak threshold as a fraction of the maximum magnitude.
/// * `high_ratio` - The strong threshold as a fraction of the maximum magnitude.
pub fn hysteresis(
    mag: &Image<f32, 1>,
    dst: &mut Image<u8, 1>,
    low_ratio: f32,
    high_ratio: f32,
) -> Result<(), ImageError> {
    if mag.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            mag.cols(),
            mag.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let rows = mag.rows();
    let cols = mag.cols();
    let mag_data = mag.as_slice();

    let out = dst.as_slice_mut();
    out.fill(0);

    let max = mag_data.iter().fold(0.0f32, |acc, &v| acc.max(v));
    if max == 0.0 {
        return Ok(());
    }

    let high = high_ratio * max;
    let low = low_ratio * max;

    let mut marks = vec![Mark::None; mag_data.len()];
    let mut worklist = Vec::new();
    for (i, &m) in mag_data.iter().enumerate() {
        if m >= high {
            marks[i] = Mark::Strong;
            worklist.push(i);
        } else if m >= low {
            marks[i] = Mark::Weak;
        }
    }

    while let Some(idx) = worklist.pop() {
        if out[idx] == EDGE {
            continue;
        }
        out[idx] = EDGE;

        let x = (idx % cols) as isize;
        let y = (idx / cols) as isize;

        for dy in -1..=1isize {
            for dx in -1..=1isize {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x + dx;
                let ny = y + dy;
                if nx < 0 || nx >= cols as isize || ny < 0 || ny >= rows as isize {
                    continue;
                }
                let nidx = (ny as usize) * cols + nx as usize;
                if marks[nidx] == Mark::Weak && out[nidx] == 0 {
                    out[nidx] = EDGE;
                    worklist.push(nidx);
                }
            }
        }
    }

    Ok(())
}
