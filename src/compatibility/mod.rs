//! Mashability scoring
//!
//! Compares two tracks on their beat grids:
//! - Harmonic compatibility (circular chroma cross-correlation)
//! - Spectral balance (flatness of the combined per-beat energy)
//! - Combination into one score, beat offset and pitch shift
//!
//! Every function here is pure: inputs are borrowed read-only and outputs are
//! freshly allocated, so scoring can run on any number of threads at once.

pub mod combiner;
pub mod convolution;
pub mod harmonic;
pub mod spectral;

pub use combiner::combine;
pub use harmonic::{harmonic_score, HarmonicScores};
pub use spectral::spectral_balance_score;
