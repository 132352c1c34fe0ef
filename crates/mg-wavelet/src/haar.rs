use std::f64::consts::FRAC_1_SQRT_2;

use mg_core::{Error, Image};

/// Number of decomposition levels reported by [`level_energies`].
pub const DECOMP_LEVELS: usize = 5;

/// Minimum image dimension for [`DECOMP_LEVELS`] clean levels (2^5).
pub const MIN_DIM: usize = 1 << DECOMP_LEVELS;

/// One Haar step along a slice with half-sample symmetric extension.
///
/// Output length is `ceil(n / 2)`; for odd `n` the final pair is the last
/// sample with itself, so its detail coefficient is exactly zero.
fn dwt_1d(src: &[f64], approx: &mut Vec<f64>, detail: &mut Vec<f64>) {
    approx.clear();
    detail.clear();

    let n = src.len();
    let mut i = 0;
    while i < n {
        let a = src[i];
        let b = if i + 1 < n { src[i + 1] } else { src[n - 1] };
        approx.push((a + b) * FRAC_1_SQRT_2);
        detail.push((a - b) * FRAC_1_SQRT_2);
        i += 2;
    }
}

/// Single-level 2D Haar step: `(approx, [horizontal, vertical, diagonal])`.
pub fn dwt2(src: &Image<f64>) -> (Image<f64>, [Image<f64>; 3]) {
    let w = src.width();
    let h = src.height();
    let half_w = w.div_ceil(2);
    let half_h = h.div_ceil(2);

    // Rows first: per-row lowpass and highpass, each half_w wide.
    let mut lo = Image::new_fill(half_w, h, 0.0f64);
    let mut hi = Image::new_fill(half_w, h, 0.0f64);
    let mut a = Vec::with_capacity(half_w);
    let mut d = Vec::with_capacity(half_w);
    for r in 0..h {
        dwt_1d(src.row(r), &mut a, &mut d);
        lo.data_mut()[r * half_w..(r + 1) * half_w].copy_from_slice(&a);
        hi.data_mut()[r * half_w..(r + 1) * half_w].copy_from_slice(&d);
    }

    // Then columns of each half.
    let (ll, lh) = dwt_cols(&lo, half_h);
    let (hl, hh) = dwt_cols(&hi, half_h);

    (ll, [lh, hl, hh])
}

fn dwt_cols(src: &Image<f64>, half_h: usize) -> (Image<f64>, Image<f64>) {
    let w = src.width();
    let h = src.height();
    let mut approx = Image::new_fill(w, half_h, 0.0f64);
    let mut detail = Image::new_fill(w, half_h, 0.0f64);

    let mut col = Vec::with_capacity(h);
    let mut a = Vec::with_capacity(half_h);
    let mut d = Vec::with_capacity(half_h);
    for c in 0..w {
        col.clear();
        for r in 0..h {
            col.push(src.data()[r * w + c]);
        }
        dwt_1d(&col, &mut a, &mut d);
        for r in 0..half_h {
            approx.data_mut()[r * w + c] = a[r];
            detail.data_mut()[r * w + c] = d[r];
        }
    }

    (approx, detail)
}

/// Detail energies of a 5-level Haar decomposition, finest level first.
///
/// Level k energy is the sum of absolute detail coefficients over the three
/// sub-bands produced by the k-th decomposition step. Images with a dimension
/// below [`MIN_DIM`] cannot support 5 clean levels and are rejected.
pub fn level_energies(src: &Image<f64>) -> Result<[f64; DECOMP_LEVELS], Error> {
    let w = src.width();
    let h = src.height();
    if w == 0 || h == 0 {
        return Err(Error::EmptyImage);
    }
    if w < MIN_DIM || h < MIN_DIM {
        return Err(Error::ImageTooSmall {
            width: w,
            height: h,
            min_dim: MIN_DIM,
        });
    }

    let mut energies = [0.0f64; DECOMP_LEVELS];
    let mut approx = src.clone();
    for energy in &mut energies {
        let (next, details) = dwt2(&approx);
        *energy = details
            .iter()
            .map(|band| band.data().iter().map(|v| v.abs()).sum::<f64>())
            .sum();
        approx = next;
    }

    Ok(energies)
}

#[cfg(test)]
mod tests {
    use super::{MIN_DIM, dwt2, level_energies};
    use mg_core::{Error, Image};

    #[test]
    fn constant_image_has_zero_detail_energy() {
        let img = Image::new_fill(64, 64, 7.25f64);
        let energies = level_energies(&img).expect("large enough");
        for e in energies {
            assert!(e.abs() < 1e-9);
        }
    }

    #[test]
    fn corner_impulse_energy_halves_per_level() {
        // A single corner sample v decomposes into detail coefficients of
        // magnitude v/2^k at level k, one per sub-band: energy 3v/2^k.
        let v = 100.0f64;
        let mut data = vec![0.0f64; 64 * 64];
        data[0] = v;
        let img = Image::from_vec(64, 64, data).expect("valid image");

        let energies = level_energies(&img).expect("large enough");
        for (k, e) in energies.iter().enumerate() {
            let expected = 3.0 * v / f64::powi(2.0, k as i32 + 1);
            assert!(
                (e - expected).abs() < 1e-9,
                "level {} energy {} != {}",
                k + 1,
                e,
                expected
            );
        }
    }

    #[test]
    fn odd_length_axis_pairs_edge_sample_with_itself() {
        // 3-wide rows: the trailing pair is (x2, x2), so its detail is zero
        // and its approximation is sqrt(2) * x2.
        let img = Image::from_vec(3, 1, vec![1.0, 2.0, 3.0]).expect("valid image");
        let (ll, [lh, hl, hh]) = dwt2(&img);

        assert_eq!(ll.width(), 2);
        assert_eq!(ll.height(), 1);
        // Row pass: a = [(1+2)/s2, 3*s2], d = [(1-2)/s2, 0]; column pass on a
        // single row pairs it with itself: ll = a * s2 * ... = [3, 6].
        assert!((ll.data()[0] - 3.0).abs() < 1e-12);
        assert!((ll.data()[1] - 6.0).abs() < 1e-12);
        assert!((lh.data()[0]).abs() < 1e-12);
        assert!((hl.data()[0] - (-1.0)).abs() < 1e-12);
        assert!((hh.data()[0]).abs() < 1e-12);
    }

    #[test]
    fn images_below_min_dim_are_rejected() {
        let img = Image::new_fill(MIN_DIM - 1, 64, 0.0f64);
        let err = level_energies(&img).expect_err("too small");
        assert_eq!(
            err,
            Error::ImageTooSmall {
                width: MIN_DIM - 1,
                height: 64,
                min_dim: MIN_DIM
            }
        );

        let img = Image::new_fill(0, 0, 0.0f64);
        assert_eq!(level_energies(&img).expect_err("empty"), Error::EmptyImage);
    }

    #[test]
    fn non_power_of_two_dims_decompose_without_error() {
        let img = Image::new_fill(100, 37 + MIN_DIM, 1.5f64);
        let energies = level_energies(&img).expect("large enough");
        // Constant input stays constant under symmetric extension.
        for e in energies {
            assert!(e.abs() < 1e-9);
        }
    }
}
