//! Configuration parameters for mashability scoring and segmentation

use crate::error::MashabilityError;
use crate::segmentation::MatrixKind;

/// Machine epsilon of the working float type.
///
/// Used wherever a sum or norm has to be treated as "effectively zero".
pub const FLOAT_EPSILON: f64 = f64::EPSILON;

/// Number of pitch classes in a chroma vector
pub const CHROMA_BINS: usize = 12;

/// Weight of the spectral-balance term relative to the harmonic term
pub const SPECTRAL_BALANCE_WEIGHT: f64 = 0.2;

/// Pitch-shift search radius in semitones around the unshifted row
pub const PITCH_SEARCH_RADIUS: usize = 6;

/// Number of ranked candidates kept by the batch driver
pub const DEFAULT_TOP_N: usize = 10;

/// Mashability scoring configuration
#[derive(Debug, Clone)]
pub struct MashabilityConfig {
    /// Weight applied to the spectral-balance score (default: 0.2)
    ///
    /// The harmonic term dominates; spectral balance acts as a tie-breaker.
    pub spectral_weight: f64,

    /// Pitch-shift search radius in semitones (default: 6)
    ///
    /// The combiner searches `2 * radius + 1` rows centred on the zero-shift
    /// row of the correlation surface. Must be at most 11.
    pub pitch_search_radius: usize,

    /// Number of candidates kept after ranking (default: 10)
    pub top_n: usize,
}

impl Default for MashabilityConfig {
    fn default() -> Self {
        Self {
            spectral_weight: SPECTRAL_BALANCE_WEIGHT,
            pitch_search_radius: PITCH_SEARCH_RADIUS,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl MashabilityConfig {
    /// Check that every field is usable
    pub fn validate(&self) -> Result<(), MashabilityError> {
        if !self.spectral_weight.is_finite() {
            return Err(MashabilityError::InvalidConfig(format!(
                "spectral_weight must be finite, got {}",
                self.spectral_weight
            )));
        }
        if self.pitch_search_radius > CHROMA_BINS - 1 {
            return Err(MashabilityError::InvalidConfig(format!(
                "pitch_search_radius must be <= {}, got {}",
                CHROMA_BINS - 1,
                self.pitch_search_radius
            )));
        }
        Ok(())
    }
}

/// Novelty segmentation configuration
#[derive(Debug, Clone)]
pub struct SegmentationConfig {
    /// Checkerboard kernel size in frames (default: 64)
    pub kernel_size: usize,

    /// Gaussian taper span in standard deviations (default: 32.0)
    ///
    /// The kernel samples the normal CDF over `[-sigma_span, sigma_span]`.
    pub sigma_span: f64,

    /// Whether the input matrix holds similarities or distances
    /// (default: Distance, the output of `self_distance_matrix`)
    pub matrix_kind: MatrixKind,

    /// Boundary peak threshold (default: 0.3)
    ///
    /// Values in (0, 1) are relative to the largest novelty among frames
    /// with an unpadded window, anything else is an absolute threshold.
    pub peak_threshold: f64,

    /// Minimum spacing between boundaries in frames (default: 8)
    ///
    /// Boundaries are never closer than half the kernel size, whatever this
    /// is set to.
    pub min_boundary_distance: usize,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            kernel_size: 64,
            sigma_span: 32.0,
            matrix_kind: MatrixKind::Distance,
            peak_threshold: 0.3,
            min_boundary_distance: 8,
        }
    }
}

impl SegmentationConfig {
    /// Check kernel parameters before any matrix work
    pub fn validate(&self) -> Result<(), MashabilityError> {
        if self.kernel_size < 2 {
            return Err(MashabilityError::InvalidKernel(format!(
                "kernel_size must be >= 2, got {}",
                self.kernel_size
            )));
        }
        if !self.sigma_span.is_finite() || self.sigma_span <= 0.0 {
            return Err(MashabilityError::InvalidKernel(format!(
                "sigma_span must be positive and finite, got {}",
                self.sigma_span
            )));
        }
        if !self.peak_threshold.is_finite() {
            return Err(MashabilityError::InvalidConfig(format!(
                "peak_threshold must be finite, got {}",
                self.peak_threshold
            )));
        }
        Ok(())
    }
}
