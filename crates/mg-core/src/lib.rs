//! Foundational primitives for magnetogram feature extraction.
//!
//! ## Sample Convention
//! Magnetograms are row-major `Image<f64>` arrays of calibrated magnetic flux
//! density. Positive and negative values indicate field polarity; zero signal
//! corresponds to zero flux.
//!
//! ## Convolution
//! [`convolve2d_same`] is true convolution (kernel flipped) with implicit zero
//! padding beyond the image edges and same-size output. For even kernel sizes
//! the window is anchored so that it spans `k/2` samples before and `k/2 - 1`
//! samples after the output pixel.
//!
//! ## Statistics
//! All statistics use population definitions (no sample correction). Skewness
//! and excess kurtosis of a zero-variance population are defined as 0.0.

mod conv;
mod error;
mod image;
mod stats;

pub use conv::convolve2d_same;
pub use error::Error;
pub use image::Image;
pub use stats::{kurtosis_excess, max, mean, median, min, skewness, std_pop};
