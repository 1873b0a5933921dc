//! Compatibility result types

use crate::features::{FeatureMatrix, TrackFeatures};
use serde::{Deserialize, Serialize};

/// Outcome of scoring one (base, candidate) pair
#[derive(Debug, Clone, Serialize)]
pub struct CompatibilityResult {
    /// Normalized harmonic correlation surface (pitch rotation × beat lag)
    ///
    /// Kept for diagnostics and plotting.
    pub correlation: FeatureMatrix,

    /// Mashability score, dominated by the harmonic term
    ///
    /// Typically in (-1, 1.2]; higher is better.
    pub score: f64,

    /// Semitone shift of the best alignment
    ///
    /// Positive values mean the candidate's harmonic content sits that many
    /// semitones above the base, so the candidate has to be pitched down by
    /// `pitch_shift` semitones to match.
    pub pitch_shift: i32,

    /// Candidate beat on which the best base-length window starts
    pub beat_offset: usize,
}

impl CompatibilityResult {
    /// Parameters for the mix renderer
    ///
    /// `candidate` supplies the downbeat times used to place the offset in
    /// seconds.
    pub fn mix_parameters(&self, candidate: &TrackFeatures) -> MixParameters {
        MixParameters {
            beat_offset: self.beat_offset,
            pitch_shift: self.pitch_shift,
            candidate_start_seconds: candidate.segment_start(self.beat_offset),
        }
    }
}

/// Everything a mix renderer needs to lay the candidate over the base
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixParameters {
    /// Candidate beat aligned with the first base beat
    pub beat_offset: usize,

    /// Semitones the candidate sits above the base
    pub pitch_shift: i32,

    /// Start of the aligned candidate segment in seconds, if the candidate's
    /// downbeats reach it
    pub candidate_start_seconds: Option<f64>,
}

impl MixParameters {
    /// Semitones to transpose the candidate by (negative = down)
    pub fn candidate_transpose(&self) -> i32 {
        -self.pitch_shift
    }
}

/// One ranked row: `file,mashability,pitch_shift,beat_offset`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Candidate identifier (usually a file path)
    pub file: String,

    /// Mashability score
    pub mashability: f64,

    /// Semitones the candidate sits above the base
    pub pitch_shift: i32,

    /// Candidate beat offset
    pub beat_offset: usize,
}

impl ResultRecord {
    /// Summarize a result for ranking and reporting
    pub fn from_result(file: impl Into<String>, result: &CompatibilityResult) -> Self {
        Self {
            file: file.into(),
            mashability: result.score,
            pitch_shift: result.pitch_shift,
            beat_offset: result.beat_offset,
        }
    }
}

/// Candidate left out of a ranking, with the reason
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedCandidate {
    /// Candidate identifier
    pub file: String,

    /// Human-readable skip reason
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{BeatSyncChroma, BeatSyncSpectrum};

    fn result(score: f64, pitch_shift: i32, beat_offset: usize) -> CompatibilityResult {
        CompatibilityResult {
            correlation: FeatureMatrix::zeros(35, 1),
            score,
            pitch_shift,
            beat_offset,
        }
    }

    #[test]
    fn test_record_from_result() {
        let record = ResultRecord::from_result("audio_files/a.mp3", &result(0.9, -2, 3));
        assert_eq!(record.file, "audio_files/a.mp3");
        assert_eq!(record.mashability, 0.9);
        assert_eq!(record.pitch_shift, -2);
        assert_eq!(record.beat_offset, 3);
    }

    #[test]
    fn test_record_field_names() {
        let record = ResultRecord::from_result("a.mp3", &result(0.5, 1, 0));
        let json = serde_json::to_value(&record).unwrap();
        let obj = json.as_object().unwrap();
        for key in ["file", "mashability", "pitch_shift", "beat_offset"] {
            assert!(obj.contains_key(key), "missing {}", key);
        }
        let back: ResultRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_mix_parameters() {
        let candidate = TrackFeatures::new(
            BeatSyncChroma::from_beats(&vec![vec![1.0; 12]; 4]).unwrap(),
            BeatSyncSpectrum::from_beats(&vec![vec![1.0; 2]; 4]).unwrap(),
            vec![1.5, 3.0, 4.5],
            160.0,
        )
        .unwrap();

        let params = result(0.8, 3, 2).mix_parameters(&candidate);
        assert_eq!(params.beat_offset, 2);
        assert_eq!(params.candidate_start_seconds, Some(3.0));
        assert_eq!(params.candidate_transpose(), -3);

        let params = result(0.8, 0, 0).mix_parameters(&candidate);
        assert_eq!(params.candidate_start_seconds, Some(0.0));
    }
}
