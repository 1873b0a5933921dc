//! Compatibility combiner
//!
//! Joins the harmonic and spectral per-offset scores into one objective,
//! picks the best beat offset and searches a bounded window of the harmonic
//! surface for the pitch shift at that offset.

use super::harmonic::{HarmonicScores, ZERO_SHIFT_ROW};
use crate::analysis::result::CompatibilityResult;
use crate::config::MashabilityConfig;
use crate::error::MashabilityError;

/// Combine harmonic and spectral scores into the final compatibility result
///
/// # Arguments
///
/// * `harmonic` - Harmonic surface and per-offset maxima `H_k`
/// * `balance` - Spectral balance per offset `R_k`
/// * `config` - Weight and pitch search radius
///
/// # Returns
///
/// `CompatibilityResult` with:
/// - `score = max_k(H_k + spectral_weight * R_k)`
/// - `beat_offset` = first offset reaching that maximum
/// - `pitch_shift = radius - argmax(H[11 - radius ..= 11 + radius, offset])`
///
/// Ties resolve to the first index: the lowest offset and the most positive
/// shift.
///
/// # Errors
///
/// Returns `MalformedFeatureMatrix` if `H_k` and `R_k` differ in length or
/// are empty, or if the surface is too small for the search window, and
/// `InvalidConfig` if the configuration does not validate.
pub fn combine(
    harmonic: &HarmonicScores,
    balance: &[f64],
    config: &MashabilityConfig,
) -> Result<CompatibilityResult, MashabilityError> {
    config.validate()?;

    let h_k = &harmonic.per_offset;
    if h_k.len() != balance.len() {
        return Err(MashabilityError::MalformedFeatureMatrix(format!(
            "offset axes misaligned: {} harmonic scores vs {} spectral scores",
            h_k.len(),
            balance.len()
        )));
    }
    if h_k.is_empty() {
        return Err(MashabilityError::MalformedFeatureMatrix(
            "no valid beat offsets to combine".to_string(),
        ));
    }

    let radius = config.pitch_search_radius;
    let surface = &harmonic.surface;
    if ZERO_SHIFT_ROW + radius >= surface.rows() {
        return Err(MashabilityError::MalformedFeatureMatrix(format!(
            "pitch search window rows {}..={} exceed surface with {} rows",
            ZERO_SHIFT_ROW - radius,
            ZERO_SHIFT_ROW + radius,
            surface.rows()
        )));
    }

    let combined: Vec<f64> = h_k
        .iter()
        .zip(balance.iter())
        .map(|(&h, &r)| h + config.spectral_weight * r)
        .collect();

    let (beat_offset, score) = first_argmax(combined.iter().copied());

    let column = harmonic.column_for_offset(beat_offset);
    let window = (ZERO_SHIFT_ROW - radius..=ZERO_SHIFT_ROW + radius).map(|row| surface.get(row, column));
    let (window_idx, _) = first_argmax(window);
    let pitch_shift = radius as i32 - window_idx as i32;

    log::debug!(
        "Combined compatibility: score={:.4}, beat_offset={}, pitch_shift={}",
        score,
        beat_offset,
        pitch_shift
    );

    Ok(CompatibilityResult {
        correlation: surface.clone(),
        score,
        pitch_shift,
        beat_offset,
    })
}

/// Index and value of the first maximum; NaN values never win
fn first_argmax(values: impl Iterator<Item = f64>) -> (usize, f64) {
    let mut best = (0, f64::NEG_INFINITY);
    for (i, v) in values.enumerate() {
        if v > best.1 {
            best = (i, v);
        }
    }
    best
}
