use edgekit_image::{Image, ImageError, ImageSize};
use edgekit_imgproc::canny::{canny_edges, canny_region_fill, CannyParams, RegionFillParams};

/// Run the detector over a synthetic scene and print a few statistics.
///
/// Enable the stage trace with `RUST_LOG=debug cargo run --example edge_demo`.
fn main() -> Result<(), ImageError> {
    env_logger::init();

    let size = ImageSize {
        width: 256,
        height: 256,
    };

    // white square on a black background with a gray circle next to it
    let mut data = vec![0u8; size.width * size.height * 3];
    for y in 0..size.height {
        for x in 0..size.width {
            let in_square = (64..128).contains(&x) && (64..128).contains(&y);
            let dx = x as i32 - 180;
            let dy = y as i32 - 180;
            let in_circle = dx * dx + dy * dy < 40 * 40;

            let v = if in_square {
                255
            } else if in_circle {
                160
            } else {
                0
            };
            let idx = (y * size.width + x) * 3;
            data[idx] = v;
            data[idx + 1] = v;
            data[idx + 2] = v;
        }
    }
    let image = Image::new(size, data)?;

    let params = CannyParams::default();
    let mut edges = Image::from_size_val(size, 0u8)?;
    canny_edges(&image, &mut edges, &params)?;

    let edge_pixels = edges.as_slice().iter().filter(|&&v| v != 0).count();
    println!(
        "detected {} edge pixels on a {}x{} scene",
        edge_pixels, size.width, size.height
    );

    let fill = RegionFillParams::default();
    let mut regions = Image::from_size_val(size, 0u8)?;
    canny_region_fill(&image, &mut regions, &params, &fill)?;

    let filled_pixels = regions
        .as_slice()
        .chunks_exact(3)
        .filter(|px| px[0] == fill.fill_color[0] && px[1] == fill.fill_color[1] && px[2] == fill.fill_color[2])
        .count();
    println!("filled {} enclosed region pixels", filled_pixels);

    Ok(())
}
