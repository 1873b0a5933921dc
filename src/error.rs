//! Error types for mashability scoring and segmentation

use std::fmt;

/// Errors that can occur while scoring a candidate or segmenting a track
#[derive(Debug, Clone, PartialEq)]
pub enum MashabilityError {
    /// Candidate has fewer beats than the base track, so it cannot host a
    /// full base-length window. Recoverable: skip the candidate.
    ShorterCandidate {
        /// Beat count of the base track
        base_beats: usize,
        /// Beat count of the candidate track
        candidate_beats: usize,
    },

    /// Spectral energy could not be normalized (non-finite beat energy)
    DegenerateSpectrum(String),

    /// Feature matrix has the wrong shape or contains invalid values
    MalformedFeatureMatrix(String),

    /// Kernel size or scale is unusable
    InvalidKernel(String),

    /// Configuration value out of range
    InvalidConfig(String),

    /// Feature provider failed to produce features for a track
    FeatureExtraction(String),
}

impl MashabilityError {
    /// Whether a batch driver may skip the offending candidate and carry on.
    ///
    /// Shape, kernel and configuration errors are programmer errors and are
    /// not recoverable.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            MashabilityError::ShorterCandidate { .. }
                | MashabilityError::DegenerateSpectrum(_)
                | MashabilityError::FeatureExtraction(_)
        )
    }
}

impl fmt::Display for MashabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MashabilityError::ShorterCandidate {
                base_beats,
                candidate_beats,
            } => write!(
                f,
                "Shorter candidate: candidate has {} beats, base needs at least {}",
                candidate_beats, base_beats
            ),
            MashabilityError::DegenerateSpectrum(msg) => write!(f, "Degenerate spectrum: {}", msg),
            MashabilityError::MalformedFeatureMatrix(msg) => {
                write!(f, "Malformed feature matrix: {}", msg)
            }
            MashabilityError::InvalidKernel(msg) => write!(f, "Invalid kernel: {}", msg),
            MashabilityError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            MashabilityError::FeatureExtraction(msg) => write!(f, "Feature extraction error: {}", msg),
        }
    }
}

impl std::error::Error for MashabilityError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorter_candidate_display() {
        let err = MashabilityError::ShorterCandidate {
            base_beats: 20,
            candidate_beats: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("10 beats"));
        assert!(msg.contains("20"));
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(MashabilityError::ShorterCandidate {
            base_beats: 2,
            candidate_beats: 1
        }
        .is_recoverable());
        assert!(MashabilityError::FeatureExtraction("decode".to_string()).is_recoverable());
        assert!(!MashabilityError::MalformedFeatureMatrix("rows".to_string()).is_recoverable());
        assert!(!MashabilityError::InvalidKernel("size".to_string()).is_recoverable());
    }
}
