//! Neutral-line engine: polarity-boundary geometry of a magnetogram.
//!
//! The neutral line is the zero-level contour set of a box-smoothed
//! magnetogram. This crate traces those contours with marching squares,
//! rasterizes them into a binary mask, weights the mask by gradient
//! magnitude, and summarizes the result as counts, per-contour turning
//! angles, and bending energies.
//!
//! ## Coordinate Convention
//! Contour points are `(row, col)` f64 with sub-pixel edge interpolation.
//! A closed contour repeats its first point at the end; downstream circular
//! statistics treat that duplicate as a regular point.

mod curvature;
mod features;
mod mask;
mod smooth;
mod trace;

pub use curvature::{bending_energy, turning_angles};
pub use features::{NeutralLineFeatures, SMOOTH_KERNEL_SIZE, THRESHOLD_FRACTION};
pub use mask::{count_components_8, rasterize_contours};
pub use smooth::box_mean_smooth;
pub use trace::{Contour, ContourPoint, zero_contours};
