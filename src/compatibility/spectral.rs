//! Spectral balance scoring
//!
//! Scores how evenly the combined energy of base and candidate is spread over
//! the beats of each alignment. A mix whose loudness stays steady across beats
//! scores higher than one with abrupt energy spikes.
//!
//! For every offset `i` in `0..=candidate_beats - base_beats`:
//!
//! 1. `profile[t] = Σ_bins (base[:, t] + candidate[:, i + t])`
//! 2. Normalize the profile to sum to 1
//! 3. `score = 1 - std(profile)` (population standard deviation)
//!
//! Scores are at most 1, with equality exactly when the profile is uniform.

use crate::config::FLOAT_EPSILON;
use crate::error::MashabilityError;
use crate::features::BeatSyncSpectrum;

/// Compute the spectral balance score for every valid beat offset
///
/// # Arguments
///
/// * `base` - Base track spectrum (bins × base_beats)
/// * `candidate` - Candidate track spectrum (bins × candidate_beats)
///
/// # Returns
///
/// One score per offset (`candidate_beats - base_beats + 1` values), indexed
/// like the harmonic scorer's per-offset scores
///
/// # Errors
///
/// Returns `MashabilityError` if:
/// - The candidate has fewer beats than the base (`ShorterCandidate`, checked
///   before any computation)
/// - The two spectra have different bin counts (`MalformedFeatureMatrix`)
/// - A window's total energy is not finite (`DegenerateSpectrum`)
///
/// A window with zero total energy yields an all-zero normalized profile
/// instead of NaN.
pub fn spectral_balance_score(
    base: &BeatSyncSpectrum,
    candidate: &BeatSyncSpectrum,
) -> Result<Vec<f64>, MashabilityError> {
    let base_beats = base.beats();
    let candidate_beats = candidate.beats();

    if candidate_beats < base_beats {
        return Err(MashabilityError::ShorterCandidate {
            base_beats,
            candidate_beats,
        });
    }

    if base.bins() != candidate.bins() {
        return Err(MashabilityError::MalformedFeatureMatrix(format!(
            "spectrum bin counts differ: base {}, candidate {}",
            base.bins(),
            candidate.bins()
        )));
    }

    log::debug!(
        "Computing spectral balance: {} bins, base {} beats, candidate {} beats",
        base.bins(),
        base_beats,
        candidate_beats
    );

    // Summing base + candidate over bins equals summing each over bins first
    let base_energy = base.beat_energies();
    let candidate_energy = candidate.beat_energies();

    let n_offsets = candidate_beats - base_beats + 1;
    let mut scores = Vec::with_capacity(n_offsets);
    let mut profile = vec![0.0f64; base_beats];

    for offset in 0..n_offsets {
        for (t, value) in profile.iter_mut().enumerate() {
            *value = base_energy[t] + candidate_energy[offset + t];
        }
        normalize_profile(&mut profile, offset)?;
        scores.push(1.0 - std_dev(&profile));
    }

    log::debug!(
        "Spectral balance: {} offsets, best={:.4}",
        scores.len(),
        scores.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    );

    Ok(scores)
}

/// Scale a beat-energy profile to sum to 1
///
/// Silent windows are zeroed rather than divided by zero.
fn normalize_profile(profile: &mut [f64], offset: usize) -> Result<(), MashabilityError> {
    let total: f64 = profile.iter().sum();

    if !total.is_finite() {
        return Err(MashabilityError::DegenerateSpectrum(format!(
            "beat energy at offset {} sums to {}",
            offset, total
        )));
    }

    if total <= FLOAT_EPSILON {
        log::warn!("Silent spectral window at offset {}; treating beats as zero", offset);
        profile.iter_mut().for_each(|v| *v = 0.0);
        return Ok(());
    }

    profile.iter_mut().for_each(|v| *v /= total);
    Ok(())
}

/// Population standard deviation
fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|&v| (v - mean) * (v - mean)).sum::<f64>() / n;
    variance.sqrt()
}
