//! Beat-synchronous perceptual pitch spectrum
//!
//! One P-bin pitch-spectrum vector per beat. Silent beats (all-zero columns)
//! are accepted here and handled by the spectral balance scorer.

use super::matrix::FeatureMatrix;
use crate::error::MashabilityError;

/// Beat-synchronous spectrum matrix (pitch-bin rows × beat columns)
#[derive(Debug, Clone, PartialEq)]
pub struct BeatSyncSpectrum {
    matrix: FeatureMatrix,
}

impl BeatSyncSpectrum {
    /// Wrap a matrix whose columns are beats in temporal order
    ///
    /// # Errors
    ///
    /// Returns `MalformedFeatureMatrix` if the matrix has no bins, no beats,
    /// or contains negative or non-finite energies.
    pub fn new(matrix: FeatureMatrix) -> Result<Self, MashabilityError> {
        if matrix.rows() == 0 || matrix.cols() == 0 {
            return Err(MashabilityError::MalformedFeatureMatrix(format!(
                "spectrum must have at least one bin and one beat, got {}x{}",
                matrix.rows(),
                matrix.cols()
            )));
        }
        if let Some((r, c, v)) = matrix.first_invalid_entry() {
            return Err(MashabilityError::MalformedFeatureMatrix(format!(
                "spectrum entry ({}, {}) = {} is not a finite non-negative energy",
                r, c, v
            )));
        }
        Ok(Self { matrix })
    }

    /// Build from one pitch-spectrum vector per beat
    pub fn from_beats(beats: &[Vec<f64>]) -> Result<Self, MashabilityError> {
        Self::new(FeatureMatrix::from_columns(beats)?)
    }

    /// Number of beat columns
    pub fn beats(&self) -> usize {
        self.matrix.cols()
    }

    /// Number of pitch bins
    pub fn bins(&self) -> usize {
        self.matrix.rows()
    }

    /// Underlying matrix
    pub fn matrix(&self) -> &FeatureMatrix {
        &self.matrix
    }

    /// Total energy of each beat (sum over pitch bins)
    pub fn beat_energies(&self) -> Vec<f64> {
        (0..self.beats())
            .map(|c| self.matrix.column(c).sum())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beat_energies() {
        let spectrum = BeatSyncSpectrum::from_beats(&[vec![1.0, 2.0], vec![0.0, 0.0]]).unwrap();
        assert_eq!(spectrum.bins(), 2);
        assert_eq!(spectrum.beats(), 2);
        assert_eq!(spectrum.beat_energies(), vec![3.0, 0.0]);
    }

    #[test]
    fn test_rejects_nan() {
        assert!(BeatSyncSpectrum::from_beats(&[vec![f64::NAN]]).is_err());
    }

    #[test]
    fn test_rejects_empty() {
        assert!(BeatSyncSpectrum::new(FeatureMatrix::zeros(0, 3)).is_err());
    }
}
