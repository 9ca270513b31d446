/// Create a gaussian blur kernel from its standard deviation.
///
/// The kernel radius is `max(1, ceil(3 * sigma))`, so the returned kernel
/// always has an odd length of at least 3. Weights are computed and
/// normalized to sum to 1 in double precision before narrowing to f32.
///
/// # Arguments
///
/// * `sigma` - The standard deviation of the gaussian. Must be positive.
pub fn gaussian_kernel_from_sigma(sigma: f32) -> Vec<f32> {
    debug_assert!(sigma > 0.0);

    let radius = ((3.0 * sigma as f64).ceil() as i64).max(1);
    let sigma_sq = sigma as f64 * sigma as f64;

    let mut kernel = Vec::with_capacity((2 * radius + 1) as usize);
    for i in -radius..=radius {
        let x = i as f64;
        kernel.push((-(x * x) / (2.0 * sigma_sq)).exp());
    }

    let norm = kernel.iter().sum::<f64>();
    kernel.into_iter().map(|k| (k / norm) as f32).collect()
}

/// The fixed pair of 3x3 sobel kernels (horizontal, vertical).
pub fn sobel_kernel_3x3() -> ([[f32; 3]; 3], [[f32; 3]; 3]) {
    let kernel_x = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
    let kernel_y = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];
    (kernel_x, kernel_y)
}
