//! Novelty-based structural segmentation
//!
//! Finds structural boundaries in a self-similarity (or self-distance)
//! matrix:
//! - Gaussian and checkerboard kernel construction
//! - Kernel response along the matrix diagonal (novelty curve)
//! - Self-distance matrix of feature columns
//! - Boundary picking on the novelty curve
//!
//! # Example
//!
//! ```
//! use mashability::segmentation::{detect_boundaries, similarity::self_distance_matrix};
//! use mashability::{FeatureMatrix, SegmentationConfig};
//!
//! // Two homogeneous sections of 16 frames each
//! let columns: Vec<Vec<f64>> = (0..32)
//!     .map(|i| if i < 16 { vec![1.0, 0.0] } else { vec![0.0, 1.0] })
//!     .collect();
//! let distances = self_distance_matrix(&FeatureMatrix::from_columns(&columns)?);
//!
//! let config = SegmentationConfig { kernel_size: 8, sigma_span: 2.0, ..Default::default() };
//! let result = detect_boundaries(&distances, &config)?;
//! assert_eq!(result.boundaries, vec![16]);
//! # Ok::<(), mashability::MashabilityError>(())
//! ```

pub mod boundaries;
pub mod diagonal;
pub mod kernel;
pub mod similarity;

use crate::config::SegmentationConfig;
use crate::error::MashabilityError;
use crate::features::FeatureMatrix;
use serde::{Deserialize, Serialize};

/// What the entries of the input matrix measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatrixKind {
    /// Larger values mean more alike
    Similarity,
    /// Larger values mean less alike; the novelty curve is negated so that
    /// boundaries are still peaks
    Distance,
}

/// Novelty curve and the boundaries picked from it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentationResult {
    /// Novelty value per frame
    pub novelty: Vec<f64>,

    /// Boundary frames, ascending
    pub boundaries: Vec<usize>,
}

/// Detect structural boundaries in a square self-similarity matrix
///
/// # Arguments
///
/// * `matrix` - Square `N × N` similarity or distance matrix
/// * `config` - Kernel size and scale, matrix kind, peak picking parameters
///
/// # Errors
///
/// Returns `InvalidKernel` for unusable kernel parameters and
/// `MalformedFeatureMatrix` for a non-square matrix.
pub fn detect_boundaries(
    matrix: &FeatureMatrix,
    config: &SegmentationConfig,
) -> Result<SegmentationResult, MashabilityError> {
    config.validate()?;

    let kernel = kernel::checkerboard_kernel(config.kernel_size, config.sigma_span)?;
    let mut novelty = diagonal::slide_diagonal(&kernel, matrix)?;

    if config.matrix_kind == MatrixKind::Distance {
        novelty.iter_mut().for_each(|v| *v = -*v);
    }

    let boundaries: Vec<usize> = boundaries::find_boundaries(&novelty, config)
        .into_iter()
        .map(|boundary| boundary.frame)
        .collect();

    log::debug!(
        "Segmentation: {} frames, {} boundaries",
        novelty.len(),
        boundaries.len()
    );

    Ok(SegmentationResult {
        novelty,
        boundaries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmentation::similarity::self_distance_matrix;

    fn sections(lengths: &[usize]) -> FeatureMatrix {
        let mut columns = Vec::new();
        for (s, &len) in lengths.iter().enumerate() {
            for _ in 0..len {
                let mut col = vec![0.0; lengths.len()];
                col[s] = 1.0;
                columns.push(col);
            }
        }
        FeatureMatrix::from_columns(&columns).unwrap()
    }

    fn small_kernel_config(kind: MatrixKind) -> SegmentationConfig {
        SegmentationConfig {
            kernel_size: 8,
            sigma_span: 2.0,
            matrix_kind: kind,
            peak_threshold: 0.3,
            min_boundary_distance: 4,
        }
    }

    #[test]
    fn test_distance_matrix_boundaries() {
        let distances = self_distance_matrix(&sections(&[20, 20]));
        let result = detect_boundaries(&distances, &small_kernel_config(MatrixKind::Distance)).unwrap();
        assert_eq!(result.novelty.len(), 40);
        assert_eq!(result.boundaries, vec![20]);
    }

    #[test]
    fn test_similarity_matrix_boundaries() {
        let distances = self_distance_matrix(&sections(&[12, 16, 12]));
        let n = distances.rows();
        let mut similarity = FeatureMatrix::zeros(n, n);
        for r in 0..n {
            for c in 0..n {
                similarity.set(r, c, 1.0 - distances.get(r, c) / 2.0f64.sqrt());
            }
        }
        let config = small_kernel_config(MatrixKind::Similarity);
        let result = detect_boundaries(&similarity, &config).unwrap();
        assert!(result.novelty[0] > 0.3 * result.novelty[12]);
        assert_eq!(result.boundaries, vec![12, 28]);
    }

    #[test]
    fn test_homogeneous_matrix_has_no_boundaries() {
        let config = SegmentationConfig {
            matrix_kind: MatrixKind::Similarity,
            ..Default::default()
        };
        let ones = FeatureMatrix::from_rows(&vec![vec![1.0; 160]; 160]).unwrap();
        let result = detect_boundaries(&ones, &config).unwrap();
        assert!(result.novelty[0] > 0.0);
        assert!(result.boundaries.is_empty());

        let distances = self_distance_matrix(&sections(&[160]));
        let result = detect_boundaries(&distances, &SegmentationConfig::default()).unwrap();
        assert!(result.boundaries.is_empty());
    }

    #[test]
    fn test_invalid_kernel_surfaces_immediately() {
        let config = SegmentationConfig {
            kernel_size: 1,
            ..Default::default()
        };
        let result = detect_boundaries(&FeatureMatrix::zeros(4, 4), &config);
        assert!(matches!(result, Err(MashabilityError::InvalidKernel(_))));
    }
}
