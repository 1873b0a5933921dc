//! Gaussian and checkerboard kernels
//!
//! The Gaussian kernel is the outer product of a discretized standard normal
//! density with itself. Each 1D weight is the probability mass between two
//! neighbouring points of `length + 1` equally spaced samples on
//! `[-sigma_span, sigma_span]`, so the weights taper smoothly and the kernel is
//! normalized to sum to 1.
//!
//! The checkerboard kernel multiplies the Gaussian kernel by a quadrant sign
//! pattern: positive on the two diagonal quadrants, negative on the two
//! off-diagonal ones. Slid along the diagonal of a self-similarity matrix it
//! responds to changes between two homogeneous regions.
//!
//! # Reference
//!
//! Foote, J. (2000). Automatic Audio Segmentation Using a Measure of Audio
//! Novelty. *Proceedings of IEEE International Conference on Multimedia and Expo*.

use crate::config::FLOAT_EPSILON;
use crate::error::MashabilityError;
use crate::features::FeatureMatrix;
use statrs::function::erf::erf;

/// Standard normal cumulative distribution function
fn standard_normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / std::f64::consts::SQRT_2))
}

fn validate_kernel_params(length: usize, sigma_span: f64) -> Result<(), MashabilityError> {
    if length < 2 {
        return Err(MashabilityError::InvalidKernel(format!(
            "kernel length must be >= 2, got {}",
            length
        )));
    }
    if !sigma_span.is_finite() || sigma_span <= 0.0 {
        return Err(MashabilityError::InvalidKernel(format!(
            "sigma span must be positive and finite, got {}",
            sigma_span
        )));
    }
    Ok(())
}

/// Build a normalized `length × length` Gaussian kernel
///
/// # Arguments
///
/// * `length` - Kernel size (>= 2)
/// * `sigma_span` - Half-width of the sampled range in standard deviations
///
/// # Errors
///
/// Returns `InvalidKernel` for `length < 2`, a non-positive or non-finite
/// `sigma_span`, or a span so wide that every weight underflows.
///
/// # Example
///
/// ```
/// use mashability::segmentation::kernel::gaussian_kernel;
///
/// let kernel = gaussian_kernel(21, 3.0)?;
/// assert!((kernel.sum() - 1.0).abs() < 1e-9);
/// # Ok::<(), mashability::MashabilityError>(())
/// ```
pub fn gaussian_kernel(length: usize, sigma_span: f64) -> Result<FeatureMatrix, MashabilityError> {
    validate_kernel_params(length, sigma_span)?;

    let step = 2.0 * sigma_span / length as f64;
    let cdf: Vec<f64> = (0..=length)
        .map(|i| standard_normal_cdf(-sigma_span + i as f64 * step))
        .collect();
    let weights: Vec<f64> = cdf.windows(2).map(|w| w[1] - w[0]).collect();

    let mut kernel = FeatureMatrix::zeros(length, length);
    for (r, &wr) in weights.iter().enumerate() {
        for (c, &wc) in weights.iter().enumerate() {
            kernel.set(r, c, wr * wc);
        }
    }

    let total = kernel.sum();
    if total <= FLOAT_EPSILON {
        return Err(MashabilityError::InvalidKernel(format!(
            "gaussian weights vanish for length {} and sigma span {}",
            length, sigma_span
        )));
    }

    log::debug!(
        "Built gaussian kernel: {}x{}, sigma span {:.2}",
        length,
        length,
        sigma_span
    );

    Ok(kernel.scaled(1.0 / total))
}

/// Quadrant sign pattern `(+1, -1; -1, +1)` for a `length × length` grid
///
/// Quadrants are `ceil(length / 2)` cells wide; for odd lengths the pattern
/// is cropped, so the second row/column band is one cell narrower.
pub fn checkerboard_signs(length: usize) -> FeatureMatrix {
    let quadrant = length.div_ceil(2);
    let mut signs = FeatureMatrix::zeros(length, length);
    for r in 0..length {
        for c in 0..length {
            let same_band = (r < quadrant) == (c < quadrant);
            signs.set(r, c, if same_band { 1.0 } else { -1.0 });
        }
    }
    signs
}

/// Build a Gaussian-tapered checkerboard (novelty) kernel
///
/// # Errors
///
/// Same conditions as [`gaussian_kernel`].
pub fn checkerboard_kernel(
    length: usize,
    sigma_span: f64,
) -> Result<FeatureMatrix, MashabilityError> {
    let gaussian = gaussian_kernel(length, sigma_span)?;
    gaussian.hadamard(&checkerboard_signs(length))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaussian_kernel_sums_to_one() {
        for &(length, span) in &[(2, 1.0), (3, 0.5), (21, 3.0), (64, 32.0), (65, 4.0), (128, 8.0)] {
            let kernel = gaussian_kernel(length, span).unwrap();
            assert_eq!(kernel.rows(), length);
            assert_eq!(kernel.cols(), length);
            assert!(
                (kernel.sum() - 1.0).abs() < 1e-9,
                "length {} span {}: sum {}",
                length,
                span,
                kernel.sum()
            );
        }
    }

    #[test]
    fn test_gaussian_kernel_symmetric_and_peaked() {
        let kernel = gaussian_kernel(9, 3.0).unwrap();
        for r in 0..9 {
            for c in 0..9 {
                assert!((kernel.get(r, c) - kernel.get(c, r)).abs() < 1e-15);
                assert!((kernel.get(r, c) - kernel.get(8 - r, 8 - c)).abs() < 1e-12);
            }
        }
        assert!(kernel.get(4, 4) > kernel.get(0, 0));
        assert!(kernel.get(4, 4) > kernel.get(4, 0));
    }

    #[test]
    fn test_invalid_kernel_params() {
        assert!(matches!(
            gaussian_kernel(1, 3.0),
            Err(MashabilityError::InvalidKernel(_))
        ));
        assert!(matches!(
            gaussian_kernel(8, 0.0),
            Err(MashabilityError::InvalidKernel(_))
        ));
        assert!(matches!(
            checkerboard_kernel(8, f64::NAN),
            Err(MashabilityError::InvalidKernel(_))
        ));
    }

    #[test]
    fn test_checkerboard_quadrants_alternate() {
        let signs = checkerboard_signs(6);
        let quadrant_sum = |r0: usize, c0: usize| -> f64 {
            let mut s = 0.0;
            for r in r0..r0 + 3 {
                for c in c0..c0 + 3 {
                    s += signs.get(r, c);
                }
            }
            s
        };
        let top_left = quadrant_sum(0, 0);
        let top_right = quadrant_sum(0, 3);
        let bottom_left = quadrant_sum(3, 0);
        let bottom_right = quadrant_sum(3, 3);

        assert_eq!(top_left, 9.0);
        assert_eq!(bottom_right, 9.0);
        assert_eq!(top_right, -9.0);
        assert_eq!(bottom_left, -9.0);
        assert_eq!(top_left + top_right, 0.0);
        assert_eq!(bottom_left + bottom_right, 0.0);
        assert_eq!(signs.sum(), 0.0);
    }

    #[test]
    fn test_checkerboard_odd_length_cropped() {
        let signs = checkerboard_signs(5);
        assert_eq!(signs.rows(), 5);
        assert_eq!(signs.get(2, 2), 1.0);
        assert_eq!(signs.get(2, 3), -1.0);
        assert_eq!(signs.get(4, 4), 1.0);
    }

    #[test]
    fn test_checkerboard_kernel_balanced() {
        let kernel = checkerboard_kernel(16, 2.0).unwrap();
        assert!(kernel.sum().abs() < 1e-12);
        assert!(kernel.get(0, 0) > 0.0);
        assert!(kernel.get(0, 15) < 0.0);
        assert!(kernel.get(15, 0) < 0.0);
        assert!(kernel.get(15, 15) > 0.0);
    }
}
