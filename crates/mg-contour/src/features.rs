use mg_core::{Image, max, mean, median, min, std_pop};

use crate::curvature::{bending_energy, turning_angles};
use crate::mask::{count_components_8, rasterize_contours};
use crate::smooth::box_mean_smooth;
use crate::trace::zero_contours;

/// Box-average window applied before contour extraction.
pub const SMOOTH_KERNEL_SIZE: usize = 10;

/// Fraction of the gradient-weighted mask maximum used as its threshold.
pub const THRESHOLD_FRACTION: f64 = 0.2;

/// The 13 neutral-line features.
///
/// Lengths are pixel counts; curvature and bending-energy statistics pool all
/// contours into one population each. All fields are exactly 0.0 when no
/// zero-crossing contour exists.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NeutralLineFeatures {
    /// Ones in the thresholded gradient-weighted mask.
    pub length: f64,
    /// 8-connected components of the thresholded mask.
    pub fragments: f64,
    /// Ones in the raw rasterized mask.
    pub gradient_weighted_length: f64,
    pub curvature_mean: f64,
    pub curvature_std: f64,
    pub curvature_median: f64,
    pub curvature_min: f64,
    pub curvature_max: f64,
    pub bending_energy_mean: f64,
    pub bending_energy_std: f64,
    pub bending_energy_median: f64,
    pub bending_energy_min: f64,
    pub bending_energy_max: f64,
}

impl NeutralLineFeatures {
    /// Computes the neutral-line features of `image` given its Sobel
    /// gradient-magnitude map.
    pub fn compute(image: &Image<f64>, gradient: &Image<f64>) -> Self {
        debug_assert_eq!(image.width(), gradient.width());
        debug_assert_eq!(image.height(), gradient.height());

        let smoothed = box_mean_smooth(image, SMOOTH_KERNEL_SIZE);
        let contours = zero_contours(&smoothed);
        if contours.is_empty() {
            return Self::default();
        }

        let width = image.width();
        let height = image.height();
        let mask = rasterize_contours(&contours, width, height);

        let mut weighted = Image::new_fill(width, height, 0.0f64);
        for ((w, &g), &m) in weighted
            .data_mut()
            .iter_mut()
            .zip(gradient.data())
            .zip(mask.data())
        {
            *w = g * f64::from(m);
        }

        let abs_max = max(
            &weighted
                .data()
                .iter()
                .map(|v| v.abs())
                .collect::<Vec<f64>>(),
        );
        let threshold = THRESHOLD_FRACTION * abs_max;

        let mut thresholded = Image::new_fill(width, height, 0u8);
        for (t, &v) in thresholded.data_mut().iter_mut().zip(weighted.data()) {
            if v.abs() >= threshold {
                *t = 1;
            }
        }

        let length = thresholded.data().iter().map(|&v| usize::from(v)).sum::<usize>();
        let fragments = count_components_8(&thresholded);
        let raw_length = mask.data().iter().map(|&v| usize::from(v)).sum::<usize>();

        let mut angles: Vec<f64> = Vec::new();
        let mut energies: Vec<f64> = Vec::with_capacity(contours.len());
        for contour in &contours {
            let contour_angles = turning_angles(contour);
            energies.push(bending_energy(&contour_angles));
            angles.extend(contour_angles);
        }

        Self {
            length: length as f64,
            fragments: fragments as f64,
            gradient_weighted_length: raw_length as f64,
            curvature_mean: mean(&angles),
            curvature_std: std_pop(&angles),
            curvature_median: median(&angles),
            curvature_min: min(&angles),
            curvature_max: max(&angles),
            bending_energy_mean: mean(&energies),
            bending_energy_std: std_pop(&energies),
            bending_energy_median: median(&energies),
            bending_energy_min: min(&energies),
            bending_energy_max: max(&energies),
        }
    }

    pub fn to_array(self) -> [f64; 13] {
        [
            self.length,
            self.fragments,
            self.gradient_weighted_length,
            self.curvature_mean,
            self.curvature_std,
            self.curvature_median,
            self.curvature_min,
            self.curvature_max,
            self.bending_energy_mean,
            self.bending_energy_std,
            self.bending_energy_median,
            self.bending_energy_min,
            self.bending_energy_max,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::NeutralLineFeatures;
    use mg_core::Image;
    use mg_grad::gradient_magnitude;

    fn features_of(image: &Image<f64>) -> NeutralLineFeatures {
        NeutralLineFeatures::compute(image, &gradient_magnitude(image))
    }

    #[test]
    fn all_zero_image_yields_all_zero_features() {
        let img = Image::new_fill(64, 64, 0.0f64);
        let feats = features_of(&img);
        assert_eq!(feats, NeutralLineFeatures::default());
        for v in feats.to_array() {
            assert_eq!(v, 0.0);
        }
    }

    #[test]
    fn uniform_polarity_image_has_no_neutral_line() {
        let img = Image::new_fill(64, 64, 42.0f64);
        // Smoothing a positive image never crosses zero.
        assert_eq!(features_of(&img), NeutralLineFeatures::default());
    }

    #[test]
    fn straight_split_has_one_fragment_and_low_bending_energy() {
        let w = 64;
        let h = 64;
        let mut data = vec![0.0f64; w * h];
        for r in 0..h {
            for c in 0..w {
                data[r * w + c] = if c < w / 2 { -100.0 } else { 100.0 };
            }
        }
        let img = Image::from_vec(w, h, data).expect("valid image");
        let feats = features_of(&img);

        assert_eq!(feats.fragments, 1.0);
        assert!(feats.length > 0.0);
        assert!(feats.gradient_weighted_length > 0.0);
        // A near-straight vertical neutral line turns only at the wrap-around
        // pair, so the pooled bending energies stay small.
        assert!(feats.bending_energy_max < 1.0);
        assert!(feats.bending_energy_min >= 0.0);
    }

    #[test]
    fn feature_order_is_fixed() {
        let w = 64;
        let h = 64;
        let mut data = vec![0.0f64; w * h];
        for r in 0..h {
            for c in 0..w {
                data[r * w + c] = if r < h / 2 { -50.0 } else { 75.0 };
            }
        }
        let img = Image::from_vec(w, h, data).expect("valid image");
        let feats = features_of(&img);
        let arr = feats.to_array();

        assert_eq!(arr[0], feats.length);
        assert_eq!(arr[1], feats.fragments);
        assert_eq!(arr[2], feats.gradient_weighted_length);
        assert_eq!(arr[7], feats.curvature_max);
        assert_eq!(arr[12], feats.bending_energy_max);
    }
}
