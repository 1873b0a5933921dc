//! Candidate ranking
//!
//! Scores a library of candidates against one base track, in parallel, and
//! keeps the best `top_n`. A candidate that fails to score (too short,
//! degenerate features, extraction failure) is recorded as skipped and never
//! affects the other candidates.
//!
//! # Example
//!
//! ```no_run
//! use mashability::analysis::ranking::rank_candidates;
//! use mashability::{MashabilityConfig, TrackFeatures};
//!
//! # fn load() -> (TrackFeatures, Vec<(String, TrackFeatures)>) { unimplemented!() }
//! let (base, library) = load();
//! let ranking = rank_candidates(&base, &library, &MashabilityConfig::default())?;
//! for record in &ranking.records {
//!     println!("{} {:.3} {} {}", record.file, record.mashability, record.pitch_shift, record.beat_offset);
//! }
//! # Ok::<(), mashability::MashabilityError>(())
//! ```

use super::result::{ResultRecord, SkippedCandidate};
use crate::config::MashabilityConfig;
use crate::error::MashabilityError;
use crate::features::{FeatureProvider, TrackFeatures};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Ranked candidates plus the ones that could not be scored
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ranking {
    /// Best candidates, highest mashability first, at most `top_n`
    pub records: Vec<ResultRecord>,

    /// Candidates left out, in input order
    pub skipped: Vec<SkippedCandidate>,

    /// Number of candidates scored successfully (before truncation)
    pub scored: usize,
}

/// Score every candidate against `base` and rank them
///
/// # Arguments
///
/// * `base` - Base track features
/// * `candidates` - `(id, features)` pairs
/// * `config` - Scoring configuration; `top_n` bounds the output
///
/// # Errors
///
/// Returns `InvalidConfig` if the configuration does not validate. Errors of
/// individual candidates end up in `Ranking::skipped`.
pub fn rank_candidates(
    base: &TrackFeatures,
    candidates: &[(String, TrackFeatures)],
    config: &MashabilityConfig,
) -> Result<Ranking, MashabilityError> {
    config.validate()?;

    log::debug!(
        "Ranking {} candidates against base with {} beats",
        candidates.len(),
        base.beats()
    );

    let outcomes: Vec<(String, Result<ResultRecord, MashabilityError>)> = candidates
        .par_iter()
        .map(|(id, features)| {
            let outcome = crate::score_mashability(base, features, config)
                .map(|result| ResultRecord::from_result(id.clone(), &result));
            (id.clone(), outcome)
        })
        .collect();

    Ok(collect_ranking(outcomes, config.top_n))
}

/// Pull features through `provider` and rank the candidates
///
/// # Errors
///
/// Returns the provider's error if the base track cannot be extracted, and
/// `InvalidConfig` for an unusable configuration. Candidate extraction
/// failures are recorded as skipped.
pub fn rank_library<P: FeatureProvider>(
    provider: &P,
    base_id: &str,
    candidate_ids: &[String],
    config: &MashabilityConfig,
) -> Result<Ranking, MashabilityError> {
    config.validate()?;

    let base = provider.features(base_id)?;

    log::debug!(
        "Ranking library of {} candidates against {}",
        candidate_ids.len(),
        base_id
    );

    let outcomes: Vec<(String, Result<ResultRecord, MashabilityError>)> = candidate_ids
        .par_iter()
        .map(|id| {
            let outcome = provider
                .features(id)
                .and_then(|features| crate::score_mashability(&base, &features, config))
                .map(|result| ResultRecord::from_result(id.clone(), &result));
            (id.clone(), outcome)
        })
        .collect();

    Ok(collect_ranking(outcomes, config.top_n))
}

fn collect_ranking(
    outcomes: Vec<(String, Result<ResultRecord, MashabilityError>)>,
    top_n: usize,
) -> Ranking {
    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for (id, outcome) in outcomes {
        match outcome {
            Ok(record) => records.push(record),
            Err(e) => {
                if e.is_recoverable() {
                    log::debug!("Skipping candidate {}: {}", id, e);
                } else {
                    log::warn!("Skipping candidate {} on non-recoverable error: {}", id, e);
                }
                skipped.push(SkippedCandidate {
                    file: id,
                    reason: e.to_string(),
                });
            }
        }
    }

    let scored = records.len();

    // Stable sort keeps input order among equal scores
    records.sort_by(|a, b| {
        b.mashability
            .partial_cmp(&a.mashability)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    records.truncate(top_n);

    log::debug!(
        "Ranking complete: {} scored, {} skipped, {} kept",
        scored,
        skipped.len(),
        records.len()
    );

    Ranking {
        records,
        skipped,
        scored,
    }
}
