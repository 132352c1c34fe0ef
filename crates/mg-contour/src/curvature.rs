use std::f64::consts::PI;

use crate::trace::Contour;

/// Rounds half-way cases to the nearest even integer.
///
/// Contour coordinates land exactly on .5 whenever a crossing bisects a cell
/// edge, so the tie-breaking rule is part of the rasterization contract.
pub(crate) fn round_half_even(v: f64) -> f64 {
    if (v - v.trunc()).abs() == 0.5 {
        (v / 2.0).round() * 2.0
    } else {
        v.round()
    }
}

/// Turning angle at every point of a contour, treated as circular.
///
/// Coordinates are snapped to integers first. For each point and its
/// successor, the angle is `atan(Δcol / Δrow)` when the rows differ;
/// coincident rows give `3π/2` for a negative column step and `π/2`
/// otherwise.
pub fn turning_angles(contour: &Contour) -> Vec<f64> {
    let n = contour.points.len();
    let rows: Vec<f64> = contour.points.iter().map(|p| round_half_even(p.row)).collect();
    let cols: Vec<f64> = contour.points.iter().map(|p| round_half_even(p.col)).collect();

    let mut angles = Vec::with_capacity(n);
    for i in 0..n {
        let next = if i + 1 < n { i + 1 } else { 0 };
        let num = cols[next] - cols[i];
        let den = rows[next] - rows[i];
        let angle = if den != 0.0 {
            (num / den).atan()
        } else if num < 0.0 {
            3.0 * PI / 2.0
        } else {
            PI / 2.0
        };
        angles.push(angle);
    }

    angles
}

/// Bending energy of a circular angle sequence: the mean squared difference
/// of consecutive angles, wrapping the last back to the first.
pub fn bending_energy(angles: &[f64]) -> f64 {
    let n = angles.len();
    if n == 0 {
        return 0.0;
    }

    let mut sum = 0.0f64;
    for i in 0..n {
        let next = if i + 1 < n { i + 1 } else { 0 };
        let d = angles[i] - angles[next];
        sum += d * d;
    }
    sum / n as f64
}
