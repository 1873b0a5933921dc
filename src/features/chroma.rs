//! Beat-synchronous chroma
//!
//! One 12-element pitch-class energy vector per beat segment. Entries are
//! stored as delivered by the feature provider; normalization happens
//! implicitly downstream through the norm division in the harmonic scorer.

use super::matrix::FeatureMatrix;
use crate::config::CHROMA_BINS;
use crate::error::MashabilityError;

/// Beat-synchronous chroma matrix (12 pitch-class rows × beat columns)
#[derive(Debug, Clone, PartialEq)]
pub struct BeatSyncChroma {
    matrix: FeatureMatrix,
}

impl BeatSyncChroma {
    /// Wrap a 12-row matrix whose columns are beats in temporal order
    ///
    /// # Errors
    ///
    /// Returns `MalformedFeatureMatrix` if:
    /// - The matrix does not have exactly 12 rows
    /// - The matrix has no beat columns
    /// - Any entry is negative or non-finite
    pub fn new(matrix: FeatureMatrix) -> Result<Self, MashabilityError> {
        if matrix.rows() != CHROMA_BINS {
            return Err(MashabilityError::MalformedFeatureMatrix(format!(
                "chroma must have {} pitch-class rows, got {}",
                CHROMA_BINS,
                matrix.rows()
            )));
        }
        if matrix.cols() == 0 {
            return Err(MashabilityError::MalformedFeatureMatrix(
                "chroma has no beat columns".to_string(),
            ));
        }
        if let Some((r, c, v)) = matrix.first_invalid_entry() {
            return Err(MashabilityError::MalformedFeatureMatrix(format!(
                "chroma entry ({}, {}) = {} is not a finite non-negative energy",
                r, c, v
            )));
        }
        Ok(Self { matrix })
    }

    /// Build from one 12-element vector per beat
    pub fn from_beats(beats: &[Vec<f64>]) -> Result<Self, MashabilityError> {
        Self::new(FeatureMatrix::from_columns(beats)?)
    }

    /// Number of beat columns
    pub fn beats(&self) -> usize {
        self.matrix.cols()
    }

    /// Underlying matrix
    pub fn matrix(&self) -> &FeatureMatrix {
        &self.matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_twelve_rows() {
        let chroma = BeatSyncChroma::from_beats(&vec![vec![0.5; 12]; 4]).unwrap();
        assert_eq!(chroma.beats(), 4);
        assert_eq!(chroma.matrix().rows(), 12);
    }

    #[test]
    fn test_rejects_wrong_pitch_rows() {
        let result = BeatSyncChroma::from_beats(&vec![vec![0.5; 11]; 4]);
        assert!(matches!(
            result,
            Err(MashabilityError::MalformedFeatureMatrix(_))
        ));
    }

    #[test]
    fn test_rejects_negative_energy() {
        let mut beats = vec![vec![0.5; 12]; 2];
        beats[1][3] = -0.1;
        assert!(BeatSyncChroma::from_beats(&beats).is_err());
    }

    #[test]
    fn test_rejects_empty() {
        assert!(BeatSyncChroma::new(FeatureMatrix::zeros(12, 0)).is_err());
    }
}
