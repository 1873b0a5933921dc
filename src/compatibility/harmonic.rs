//! Harmonic compatibility scoring
//!
//! Correlates a base chroma with a candidate chroma over every beat alignment
//! and every pitch-class rotation.
//!
//! # Algorithm
//!
//! 1. Reverse the candidate along both axes. The convolution primitive flips
//!    its first operand, so the reversal turns the convolution into a
//!    cross-correlation between candidate and base.
//! 2. Stack the reversed candidate twice along the pitch axis. A linear
//!    convolution over the stacked matrix then wraps around the octave, so
//!    the pitch axis behaves circularly (period 12).
//! 3. Full 2D convolution with the base, divided by `‖base‖_F · ‖candidate‖_F`.
//!    The resulting surface has `35` rows (pitch rotation) and
//!    `candidate_beats + base_beats - 1` columns (beat lag).
//! 4. Keep only the columns where the base overlaps the candidate over its
//!    full length and take the maximum over the pitch axis for each of them.
//!
//! # Surface layout
//!
//! Row `11` is the unshifted row. Row `r` pairs base pitch class `p` with
//! candidate pitch class `p + (11 - r) mod 12`. Rows `11..=23` contain full
//! circular correlations, so rows `11` and `23` are identical.
//!
//! Column `candidate_beats - 1 - u` holds the alignment where base beat `0`
//! meets candidate beat `u`.

use super::convolution::convolve2d_full;
use crate::config::{CHROMA_BINS, FLOAT_EPSILON};
use crate::error::MashabilityError;
use crate::features::{BeatSyncChroma, FeatureMatrix};

/// Row of the correlation surface holding the unshifted pitch alignment
pub const ZERO_SHIFT_ROW: usize = CHROMA_BINS - 1;

/// Harmonic correlation surface and its per-offset maxima
#[derive(Debug, Clone)]
pub struct HarmonicScores {
    /// Normalized correlation surface `H` (pitch rotation × beat lag)
    pub surface: FeatureMatrix,

    /// Best harmonic score for each beat offset `H_k`
    ///
    /// Index `u` is the candidate beat on which the base-length window starts.
    pub per_offset: Vec<f64>,

    base_beats: usize,
    candidate_beats: usize,
}

impl HarmonicScores {
    /// Surface column holding beat offset `offset`
    ///
    /// # Panics
    ///
    /// Panics if `offset` is not a valid offset for this pair.
    pub fn column_for_offset(&self, offset: usize) -> usize {
        assert!(
            offset < self.per_offset.len(),
            "offset {} out of range for {} offsets",
            offset,
            self.per_offset.len()
        );
        self.candidate_beats - 1 - offset
    }

    /// Beat count of the base chroma
    pub fn base_beats(&self) -> usize {
        self.base_beats
    }

    /// Beat count of the candidate chroma
    pub fn candidate_beats(&self) -> usize {
        self.candidate_beats
    }
}

/// Number of beat-lag columns discarded on each side of the surface
///
/// `base_beats - 1` for even base lengths and `base_beats - 2` for odd ones.
/// The parity adjustment is kept exactly; for odd base lengths it leaves one
/// partial-overlap column on each side, which [`harmonic_score`] drops.
pub fn truncation_margin(base_beats: usize) -> usize {
    if base_beats % 2 == 0 {
        base_beats.saturating_sub(1)
    } else {
        base_beats.saturating_sub(2)
    }
}

/// Semitone shift represented by a surface row
///
/// Positive values mean the candidate's content sits above the base.
pub fn pitch_shift_for_row(row: usize) -> i32 {
    ZERO_SHIFT_ROW as i32 - row as i32
}

/// Compute the harmonic correlation surface and per-offset scores
///
/// # Arguments
///
/// * `base` - Base track chroma (12 × base_beats)
/// * `candidate` - Candidate track chroma (12 × candidate_beats)
///
/// # Returns
///
/// `HarmonicScores` with `candidate_beats - base_beats + 1` per-offset scores
///
/// # Errors
///
/// Returns `ShorterCandidate` if the candidate has fewer beats than the base.
pub fn harmonic_score(
    base: &BeatSyncChroma,
    candidate: &BeatSyncChroma,
) -> Result<HarmonicScores, MashabilityError> {
    let base_beats = base.beats();
    let candidate_beats = candidate.beats();

    if candidate_beats < base_beats {
        return Err(MashabilityError::ShorterCandidate {
            base_beats,
            candidate_beats,
        });
    }

    log::debug!(
        "Computing harmonic compatibility: base {} beats, candidate {} beats",
        base_beats,
        candidate_beats
    );

    let stacked = candidate.matrix().reversed().tiled_vertically(2);
    let conv = convolve2d_full(&stacked, base.matrix());

    let norm = base.matrix().frobenius_norm() * candidate.matrix().frobenius_norm();
    let surface = if norm > FLOAT_EPSILON {
        conv.scaled(1.0 / norm)
    } else {
        log::warn!("Chroma has no energy (norm product {:.3e}); harmonic surface is zero", norm);
        FeatureMatrix::zeros(conv.rows(), conv.cols())
    };

    // Odd base lengths leave one partial-overlap column inside each margin
    let n_offsets = candidate_beats - base_beats + 1;
    let margin = truncation_margin(base_beats);
    let valid = surface.cols() - 2 * margin;
    let first_valid = margin + (valid - n_offsets) / 2;

    // Offset 0 is the last valid column
    let per_offset: Vec<f64> = (first_valid..first_valid + n_offsets)
        .rev()
        .map(|col| surface.column(col).fold(f64::NEG_INFINITY, f64::max))
        .collect();

    log::debug!(
        "Harmonic surface {}x{}, {} offsets, best={:.4}",
        surface.rows(),
        surface.cols(),
        per_offset.len(),
        per_offset.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    );

    Ok(HarmonicScores {
        surface,
        per_offset,
        base_beats,
        candidate_beats,
    })
}
