use mg_core::{Image, convolve2d_same};

#[rustfmt::skip]
const SOBEL_X: [f64; 9] = [
    -1.0, 0.0, 1.0,
    -2.0, 0.0, 2.0,
    -1.0, 0.0, 1.0,
];

#[rustfmt::skip]
const SOBEL_Y: [f64; 9] = [
     1.0,  2.0,  1.0,
     0.0,  0.0,  0.0,
    -1.0, -2.0, -1.0,
];

/// Per-pixel gradient magnitude `sqrt(gx² + gy²)` of the Sobel responses.
pub fn gradient_magnitude(src: &Image<f64>) -> Image<f64> {
    let gx = convolve2d_same(src, &SOBEL_X, 3, 3);
    let gy = convolve2d_same(src, &SOBEL_Y, 3, 3);

    let mut out = gx;
    for (m, &v) in out.data_mut().iter_mut().zip(gy.data()) {
        *m = (*m * *m + v * v).sqrt();
    }
    out
}
