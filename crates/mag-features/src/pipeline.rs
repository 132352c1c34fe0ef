use mg_contour::NeutralLineFeatures;
use mg_core::{Error, Image};
use mg_flux::FluxFeatures;
use mg_grad::{GradientFeatures, gradient_magnitude};
use mg_wavelet::level_energies;

/// Total feature count: 7 gradient + 13 neutral-line + 5 wavelet + 4 flux.
pub const FEATURE_LEN: usize = 29;

const GRADIENT_LEN: usize = 7;
const NEUTRAL_LINE_LEN: usize = 13;
const WAVELET_LEN: usize = 5;
const FLUX_LEN: usize = 4;

/// One magnetogram's magnetic complexity features, in fixed order:
/// gradient mean/std/median/min/max/skewness/kurtosis, NL length, NL
/// fragment count, GWNL length, curvature mean/std/median/min/max, bending
/// energy mean/std/median/min/max, wavelet L1..L5 energies, positive /
/// negative / signed / unsigned flux.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_LEN],
}

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn gradient(&self) -> &[f64] {
        &self.values[..GRADIENT_LEN]
    }

    pub fn neutral_line(&self) -> &[f64] {
        &self.values[GRADIENT_LEN..GRADIENT_LEN + NEUTRAL_LINE_LEN]
    }

    pub fn wavelet(&self) -> &[f64] {
        let start = GRADIENT_LEN + NEUTRAL_LINE_LEN;
        &self.values[start..start + WAVELET_LEN]
    }

    pub fn flux(&self) -> &[f64] {
        &self.values[FEATURE_LEN - FLUX_LEN..]
    }

    /// True when every feature is finite; vectors failing this are invalid
    /// examples the caller should discard.
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }
}

/// Extracts the 29 magnetic complexity features of one magnetogram.
///
/// Pure function of `image`: the input is never mutated or retained, and
/// repeated calls produce bit-identical vectors. Non-finite samples propagate
/// into the output rather than failing. Empty images and images too small
/// for the 5-level wavelet decomposition are rejected.
pub fn extract_features(image: &Image<f64>) -> Result<FeatureVector, Error> {
    if image.is_empty() {
        return Err(Error::EmptyImage);
    }

    let magnitude = gradient_magnitude(image);
    let gradient = GradientFeatures::from_magnitude(&magnitude);
    let neutral_line = NeutralLineFeatures::compute(image, &magnitude);
    let wavelet = level_energies(image)?;
    let flux = FluxFeatures::from_image(image);

    let mut values = [0.0f64; FEATURE_LEN];
    let mut at = 0usize;
    for v in gradient.to_array() {
        values[at] = v;
        at += 1;
    }
    for v in neutral_line.to_array() {
        values[at] = v;
        at += 1;
    }
    for v in wavelet {
        values[at] = v;
        at += 1;
    }
    for v in flux.to_array() {
        values[at] = v;
        at += 1;
    }
    debug_assert_eq!(at, FEATURE_LEN);

    Ok(FeatureVector { values })
}
