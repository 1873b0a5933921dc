//! Self-distance matrix of beat- or frame-level features

use crate::features::FeatureMatrix;

/// Pairwise Euclidean distances between the columns of `features`
///
/// # Arguments
///
/// * `features` - Feature matrix (dimensions × frames)
///
/// # Returns
///
/// Symmetric `frames × frames` matrix with a zero diagonal
pub fn self_distance_matrix(features: &FeatureMatrix) -> FeatureMatrix {
    let n = features.cols();
    log::debug!(
        "Computing self-distance matrix: {} frames, {} dimensions",
        n,
        features.rows()
    );

    let mut distances = FeatureMatrix::zeros(n, n);
    for i in 0..n {
        for j in (i + 1)..n {
            let d = (0..features.rows())
                .map(|r| {
                    let diff = features.get(r, i) - features.get(r, j);
                    diff * diff
                })
                .sum::<f64>()
                .sqrt();
            distances.set(i, j, d);
            distances.set(j, i, d);
        }
    }
    distances
}
