//! # Mashability
//!
//! Beat-synchronous compatibility scoring for mashup and DJ tooling, plus
//! novelty-based structural segmentation.
//!
//! ## Features
//!
//! - **Harmonic compatibility**: circular chroma cross-correlation over every
//!   beat alignment and pitch-class rotation
//! - **Spectral balance**: flatness of the combined per-beat energy profile
//! - **Compatibility search**: best beat offset and pitch shift for a pair
//! - **Ranking**: parallel scoring of a candidate library with per-candidate
//!   skip reasons
//! - **Segmentation**: checkerboard-kernel novelty along a self-similarity
//!   matrix diagonal, with boundary picking
//!
//! Audio decoding, beat tracking and feature extraction are not part of this
//! crate. Features come in through [`TrackFeatures`] (or a
//! [`FeatureProvider`]).
//!
//! ## Quick Start
//!
//! ```no_run
//! use mashability::{score_mashability, MashabilityConfig, TrackFeatures};
//!
//! # fn load(_: &str) -> TrackFeatures { unimplemented!() }
//! let base = load("base.mp3");
//! let candidate = load("candidate.mp3");
//!
//! let result = score_mashability(&base, &candidate, &MashabilityConfig::default())?;
//! println!(
//!     "score {:.3}, offset {} beats, shift {} semitones",
//!     result.score, result.beat_offset, result.pitch_shift
//! );
//! # Ok::<(), mashability::MashabilityError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! chroma   ──► harmonic scorer ──┐
//!                                ├──► combiner ──► CompatibilityResult
//! spectrum ──► spectral scorer ──┘
//!
//! similarity matrix ──► checkerboard kernel along diagonal ──► novelty ──► boundaries
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod compatibility;
pub mod config;
pub mod error;
pub mod features;
pub mod segmentation;

// Re-export main types
pub use analysis::ranking::{rank_candidates, rank_library, Ranking};
pub use analysis::result::{CompatibilityResult, MixParameters, ResultRecord, SkippedCandidate};
pub use config::{MashabilityConfig, SegmentationConfig};
pub use error::MashabilityError;
pub use features::{BeatSyncChroma, BeatSyncSpectrum, FeatureMatrix, FeatureProvider, TrackFeatures};
pub use segmentation::{detect_boundaries, MatrixKind, SegmentationResult};

/// Score how well `candidate` mixes over `base`
///
/// Runs the spectral precondition check first, then the harmonic and
/// spectral scorers, and combines them into one result.
///
/// # Arguments
///
/// * `base` - Base track features
/// * `candidate` - Candidate track features (at least as many beats as the base)
/// * `config` - Scoring configuration
///
/// # Returns
///
/// `CompatibilityResult` with the correlation surface, score, pitch shift and
/// beat offset
///
/// # Errors
///
/// Returns `MashabilityError` if:
/// - The candidate is shorter than the base (`ShorterCandidate`, no work done)
/// - Spectrum bin counts differ (`MalformedFeatureMatrix`)
/// - A spectral window cannot be normalized (`DegenerateSpectrum`)
/// - The configuration is invalid (`InvalidConfig`)
///
/// # Example
///
/// ```
/// use mashability::{score_mashability, BeatSyncChroma, BeatSyncSpectrum, MashabilityConfig, TrackFeatures};
///
/// let beats: Vec<Vec<f64>> = (0..8)
///     .map(|b| {
///         let mut col = vec![0.1; 12];
///         col[(b * 7) % 12] = 1.0;
///         col
///     })
///     .collect();
/// let track = TrackFeatures::new(
///     BeatSyncChroma::from_beats(&beats)?,
///     BeatSyncSpectrum::from_beats(&vec![vec![1.0; 8]; 8])?,
///     vec![],
///     120.0,
/// )?;
///
/// let result = score_mashability(&track, &track, &MashabilityConfig::default())?;
/// assert_eq!(result.pitch_shift, 0);
/// assert_eq!(result.beat_offset, 0);
/// # Ok::<(), mashability::MashabilityError>(())
/// ```
pub fn score_mashability(
    base: &TrackFeatures,
    candidate: &TrackFeatures,
    config: &MashabilityConfig,
) -> Result<CompatibilityResult, MashabilityError> {
    log::debug!(
        "Scoring mashability: base {} beats, candidate {} beats",
        base.beats(),
        candidate.beats()
    );

    config.validate()?;

    let balance = compatibility::spectral_balance_score(base.spectrum(), candidate.spectrum())?;
    let harmonic = compatibility::harmonic_score(base.chroma(), candidate.chroma())?;

    compatibility::combine(&harmonic, &balance, config)
}
