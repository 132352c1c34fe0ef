use crate::Image;

/// Same-size 2D convolution with implicit zero padding.
///
/// This is true convolution: the kernel is flipped in both axes. The output
/// is anchored to the central part of the full convolution, so
/// `out[y][x] = Σ ker[ky][kx] · src[y + (kh-1)/2 - ky][x + (kw-1)/2 - kx]`
/// with out-of-bounds reads contributing zero. For an even kernel size `k`
/// the window spans `k/2` samples before and `k/2 - 1` after the output
/// pixel.
pub fn convolve2d_same(src: &Image<f64>, kernel: &[f64], kw: usize, kh: usize) -> Image<f64> {
    assert_eq!(kernel.len(), kw * kh, "kernel length must match kw * kh");
    assert!(kw > 0 && kh > 0, "kernel must be non-empty");

    let w = src.width();
    let h = src.height();
    let mut out = Image::new_fill(w, h, 0.0f64);
    if w == 0 || h == 0 {
        return out;
    }

    let oy = (kh - 1) / 2;
    let ox = (kw - 1) / 2;
    let data = src.data();
    let dst = out.data_mut();

    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0f64;
            for ky in 0..kh {
                let sy = y as isize + oy as isize - ky as isize;
                if sy < 0 || sy >= h as isize {
                    continue;
                }
                let row = sy as usize * w;
                let krow = ky * kw;
                for kx in 0..kw {
                    let sx = x as isize + ox as isize - kx as isize;
                    if sx < 0 || sx >= w as isize {
                        continue;
                    }
                    acc += kernel[krow + kx] * data[row + sx as usize];
                }
            }
            dst[y * w + x] = acc;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::convolve2d_same;
    use crate::Image;

    #[test]
    fn identity_kernel_passes_through() {
        let src =
            Image::from_vec(3, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0])
                .expect("valid image");
        let out = convolve2d_same(&src, &[0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0], 3, 3);
        assert_eq!(out.data(), src.data());
    }

    #[test]
    fn kernel_is_flipped() {
        // Asymmetric kernel: convolution must flip it, so the response of a
        // single impulse is the kernel itself laid out around the impulse.
        let mut data = vec![0.0f64; 25];
        data[12] = 1.0;
        let src = Image::from_vec(5, 5, data).expect("valid image");

        let kernel = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        let out = convolve2d_same(&src, &kernel, 3, 3);

        for dy in 0..3usize {
            for dx in 0..3usize {
                let v = *out.get(1 + dy, 1 + dx).expect("in bounds");
                assert_eq!(v, kernel[dy * 3 + dx]);
            }
        }
    }

    #[test]
    fn corner_impulse_stays_local_zero_padded() {
        // A single nonzero pixel at the corner responds only inside the
        // reachable neighborhood; zero padding contributes nothing else.
        let mut data = vec![0.0f64; 64];
        data[0] = 1.0;
        let src = Image::from_vec(8, 8, data).expect("valid image");

        let kernel = vec![1.0; 9];
        let out = convolve2d_same(&src, &kernel, 3, 3);

        for r in 0..8 {
            for c in 0..8 {
                let v = *out.get(r, c).expect("in bounds");
                if r <= 1 && c <= 1 {
                    assert_eq!(v, 1.0);
                } else {
                    assert_eq!(v, 0.0);
                }
            }
        }
    }

    #[test]
    fn even_kernel_anchors_like_central_part_of_full() {
        // 1D-style check along a row: with k = 4 the window spans two samples
        // before and one after the output pixel.
        let src = Image::from_vec(6, 1, vec![0.0, 0.0, 1.0, 0.0, 0.0, 0.0]).expect("valid image");
        let out = convolve2d_same(&src, &[1.0, 1.0, 1.0, 1.0], 4, 1);
        assert_eq!(out.data(), &[0.0, 1.0, 1.0, 1.0, 1.0, 0.0]);
    }
}
