//! Per-track features delivered by an external feature provider
//!
//! Beat tracking and feature extraction happen outside this crate. A
//! [`FeatureProvider`] hands over the beat-synchronous matrices together with
//! the downbeat times they were segmented on and the estimated tempo.

use super::chroma::BeatSyncChroma;
use super::spectrum::BeatSyncSpectrum;
use crate::error::MashabilityError;

/// Features of one track on its beat grid
#[derive(Debug, Clone, PartialEq)]
pub struct TrackFeatures {
    chroma: BeatSyncChroma,
    spectrum: BeatSyncSpectrum,
    downbeats: Vec<f64>,
    tempo: f64,
}

impl TrackFeatures {
    /// Bundle features of one track
    ///
    /// # Arguments
    ///
    /// * `chroma` - Beat-synchronous chroma
    /// * `spectrum` - Beat-synchronous pitch spectrum on the same beat grid
    /// * `downbeats` - Downbeat times in seconds, ascending. Segment `u` of the
    ///   feature matrices starts at `0.0` for `u = 0` and at `downbeats[u - 1]`
    ///   otherwise.
    /// * `tempo` - Estimated tempo in BPM
    ///
    /// # Errors
    ///
    /// Returns `MalformedFeatureMatrix` if chroma and spectrum disagree on the
    /// beat count, or if the downbeat times are not ascending.
    pub fn new(
        chroma: BeatSyncChroma,
        spectrum: BeatSyncSpectrum,
        downbeats: Vec<f64>,
        tempo: f64,
    ) -> Result<Self, MashabilityError> {
        if chroma.beats() != spectrum.beats() {
            return Err(MashabilityError::MalformedFeatureMatrix(format!(
                "chroma has {} beats but spectrum has {}",
                chroma.beats(),
                spectrum.beats()
            )));
        }
        if downbeats.windows(2).any(|w| w[1] < w[0]) {
            return Err(MashabilityError::MalformedFeatureMatrix(
                "downbeat times must be ascending".to_string(),
            ));
        }
        Ok(Self {
            chroma,
            spectrum,
            downbeats,
            tempo,
        })
    }

    /// Beat-synchronous chroma
    pub fn chroma(&self) -> &BeatSyncChroma {
        &self.chroma
    }

    /// Beat-synchronous spectrum
    pub fn spectrum(&self) -> &BeatSyncSpectrum {
        &self.spectrum
    }

    /// Downbeat times in seconds
    pub fn downbeats(&self) -> &[f64] {
        &self.downbeats
    }

    /// Estimated tempo in BPM
    pub fn tempo(&self) -> f64 {
        self.tempo
    }

    /// Number of beat segments
    pub fn beats(&self) -> usize {
        self.chroma.beats()
    }

    /// Start time of beat segment `segment` in seconds
    ///
    /// Returns `None` when the downbeat list does not reach that segment.
    pub fn segment_start(&self, segment: usize) -> Option<f64> {
        if segment == 0 {
            Some(0.0)
        } else {
            self.downbeats.get(segment - 1).copied()
        }
    }
}

/// Source of beat-synchronous features for a track
///
/// Implementations wrap audio decoding, beat tracking and feature extraction.
/// They must be shareable across worker threads since the ranking driver
/// pulls candidate features in parallel.
pub trait FeatureProvider: Sync {
    /// Extract features for the track identified by `track_id`
    fn features(&self, track_id: &str) -> Result<TrackFeatures, MashabilityError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_track(beats: usize, downbeats: Vec<f64>) -> Result<TrackFeatures, MashabilityError> {
        TrackFeatures::new(
            BeatSyncChroma::from_beats(&vec![vec![1.0; 12]; beats])?,
            BeatSyncSpectrum::from_beats(&vec![vec![1.0; 4]; beats])?,
            downbeats,
            120.0,
        )
    }

    #[test]
    fn test_segment_start() {
        let track = flat_track(3, vec![2.0, 4.0, 6.0]).unwrap();
        assert_eq!(track.segment_start(0), Some(0.0));
        assert_eq!(track.segment_start(1), Some(2.0));
        assert_eq!(track.segment_start(3), Some(6.0));
        assert_eq!(track.segment_start(4), None);
        assert_eq!(track.tempo(), 120.0);
    }

    #[test]
    fn test_beat_count_mismatch() {
        let result = TrackFeatures::new(
            BeatSyncChroma::from_beats(&vec![vec![1.0; 12]; 3]).unwrap(),
            BeatSyncSpectrum::from_beats(&vec![vec![1.0; 4]; 4]).unwrap(),
            vec![],
            120.0,
        );
        assert!(matches!(
            result,
            Err(MashabilityError::MalformedFeatureMatrix(_))
        ));
    }

    #[test]
    fn test_unsorted_downbeats() {
        assert!(flat_track(2, vec![3.0, 1.0]).is_err());
    }
}
