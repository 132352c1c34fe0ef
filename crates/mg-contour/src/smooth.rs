use mg_core::{Image, convolve2d_same};

/// Uniform k-by-k box average with same-size zero-padded boundary handling.
///
/// Even kernel sizes keep the asymmetric anchoring of [`convolve2d_same`]:
/// a 10x10 window reaches 5 samples up/left and 4 down/right.
pub fn box_mean_smooth(src: &Image<f64>, k: usize) -> Image<f64> {
    assert!(k > 0, "kernel size must be positive");
    let weight = 1.0 / (k * k) as f64;
    let kernel = vec![weight; k * k];
    convolve2d_same(src, &kernel, k, k)
}
