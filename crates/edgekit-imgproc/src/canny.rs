use log::debug;

use edgekit_image::{Image, ImageError};

use crate::color::gray_from_rgb;
use crate::filter::gaussian_blur;
use crate::gradient::spatial_gradient_sobel;
use crate::hysteresis::hysteresis;
use crate::morphology::close;
use crate::nms::non_maximum_suppression;
use crate::region::fill_regions;

/// Tunable parameters of the edge detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CannyParams {
    /// Standard deviation of the gaussian smoothing kernel.
    pub sigma: f32,
    /// Weak threshold as a fraction of the maximum gradient magnitude.
    pub low_ratio: f32,
    /// Strong threshold as a fraction of the maximum gradient magnitude.
    pub high_ratio: f32,
}

impl Default for CannyParams {
    fn default() -> Self {
        Self {
            sigma: 1.4,
            low_ratio: 0.05,
            high_ratio: 0.15,
        }
    }
}

/// Tunable parameters of the region extraction step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionFillParams {
    /// Neighborhood radius of the morphological close that seals edge gaps.
    pub close_radius: usize,
    /// Regions must have strictly more pixels than this to be filled.
    pub min_region_size: usize,
    /// RGB triple painted over enclosed regions.
    pub fill_color: [u8; 3],
}

impl Default for RegionFillParams {
    fn default() -> Self {
        Self {
            close_radius: 10,
            min_region_size: 10,
            fill_color: [255, 0, 0],
        }
    }
}

/// Detect edges in an intensity image.
///
/// Runs blur, Sobel gradients, non-maximum suppression and hysteresis linking
/// over an already-grayscale input. Every stage allocates its own output
/// buffer; the input is never mutated.
///
/// # Arguments
///
/// * `src` - The source intensity image with shape (H, W).
/// * `dst` - The destination edge mask with shape (H, W), 255 = edge.
/// * `params` - The detector parameters.
pub fn canny_edges_from_gray(
    src: &Image<f32, 1>,
    dst: &mut Image<u8, 1>,
    params: &CannyParams,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let size = src.size();

    let mut blurred = Image::zeros(size)?;
    gaussian_blur(src, &mut blurred, params.sigma)?;
    debug!("gaussian blur done, sigma={}", params.sigma);

    let mut gx = Image::zeros(size)?;
    let mut gy = Image::zeros(size)?;
    let mut mag = Image::zeros(size)?;
    spatial_gradient_sobel(&blurred, &mut gx, &mut gy, &mut mag)?;
    debug!("sobel gradients done");

    let mut suppressed = Image::zeros(size)?;
    non_maximum_suppression(&gx, &gy, &mag, &mut suppressed)?;
    debug!("non-maximum suppression done");

    hysteresis(&suppressed, dst, params.low_ratio, params.high_ratio)?;
    debug!(
        "hysteresis done, edge pixels={}",
        dst.as_slice().iter().filter(|&&v| v != 0).count()
    );

    Ok(())
}

/// Detect edges in an RGB image.
///
/// Converts to intensity with BT.601 weights, then runs
/// [`canny_edges_from_gray`].
///
/// # Arguments
///
/// * `src` - The source RGB image with shape (H, W).
/// * `dst` - The destination edge mask with shape (H, W), 255 = edge.
/// * `params` - The detector parameters.
///
/// # Example
///
/// ```
/// use edgekit_image::{Image, ImageSize};
/// use edgekit_imgproc::canny::{canny_edges, CannyParams};
///
/// let image = Image::<u8, 3>::from_size_val(
///     ImageSize {
///         width: 16,
///         height: 16,
///     },
///     0,
/// )
/// .unwrap();
/// let mut edges = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
///
/// canny_edges(&image, &mut edges, &CannyParams::default()).unwrap();
/// assert!(edges.as_slice().iter().all(|&v| v == 0));
/// ```
pub fn canny_edges(
    src: &Image<u8, 3>,
    dst: &mut Image<u8, 1>,
    params: &CannyParams,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let mut gray = Image::zeros(src.size())?;
    gray_from_rgb(src, &mut gray)?;
    debug!("grayscale conversion done");

    canny_edges_from_gray(&gray, dst, params)
}

/// Detect edges and fill the enclosed regions they bound.
///
/// Runs the edge detector, seals small gaps in the mask with a morphological
/// close, then flood-fills enclosed background regions. The output image
/// shows edges in white, enclosed regions in the fill color and everything
/// else in black.
///
/// # Arguments
///
/// * `src` - The source RGB image with shape (H, W).
/// * `dst` - The destination RGB image with shape (H, W).
/// * `params` - The detector parameters.
/// * `fill` - The region extraction parameters.
pub fn canny_region_fill(
    src: &Image<u8, 3>,
    dst: &mut Image<u8, 3>,
    params: &CannyParams,
    fill: &RegionFillParams,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let size = src.size();

    let mut edges = Image::zeros(size)?;
    canny_edges(src, &mut edges, params)?;

    let mut closed = Image::zeros(size)?;
    close(&edges, &mut closed, fill.close_radius)?;
    debug!("morphological close done, radius={}", fill.close_radius);

    fill_regions(&closed, dst, fill.fill_color, fill.min_region_size)?;
    debug!("region fill done");

    Ok(())
}
