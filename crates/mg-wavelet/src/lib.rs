//! Wavelet energy engine: 5-level 2D Haar decomposition.
//!
//! ## Boundary Convention
//! Odd-length axes are extended by half-sample symmetry (the edge sample is
//! repeated), so the final coefficient pair of an odd axis is formed from the
//! last sample paired with itself. This extension mode is pinned: a different
//! padding convention changes border coefficients and therefore the reported
//! energies.
//!
//! Level 1 is the finest (highest-frequency) detail band; each level's energy
//! sums the absolute values of its horizontal, vertical, and diagonal detail
//! coefficients.

mod haar;

pub use haar::{DECOMP_LEVELS, MIN_DIM, dwt2, level_energies};
