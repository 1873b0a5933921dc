//! Kernel response along the main diagonal
//!
//! Slides a square kernel along the diagonal of a square matrix and records
//! the sum of the elementwise product at every diagonal position. Only the
//! diagonal is visited: a self-similarity matrix is symmetric, and the
//! diagonal response is exactly the novelty curve.
//!
//! # Edge handling
//!
//! The window for position `i` covers rows and columns
//! `i - k/2 .. i - k/2 + k`. Cells outside the matrix count as zero, so the
//! window is zero-padded on any side that would leave the matrix. Values near
//! the first and last frames are therefore biased toward zero; this is a
//! known boundary artifact and is not corrected.

use crate::error::MashabilityError;
use crate::features::FeatureMatrix;

/// Position of the kernel window for one diagonal index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagonalWindow {
    /// First matrix row/column inside the window
    pub start: usize,
    /// One past the last matrix row/column inside the window
    pub end: usize,
    /// Zero rows/columns added before `start`
    pub pad_before: usize,
    /// Zero rows/columns added after `end`
    pub pad_after: usize,
}

impl DiagonalWindow {
    /// Window of a `kernel_len` kernel centred on diagonal index `index` of an
    /// `n × n` matrix
    pub fn at(index: usize, kernel_len: usize, n: usize) -> Self {
        let lo = index as isize - (kernel_len / 2) as isize;
        let hi = lo + kernel_len as isize;
        let n = n as isize;

        let start = lo.clamp(0, n) as usize;
        let end = hi.clamp(start as isize, n) as usize;

        Self {
            start,
            end,
            pad_before: (-lo).max(0) as usize,
            pad_after: (hi - n).max(0) as usize,
        }
    }

    /// Number of real matrix rows (and columns) inside the window
    pub fn real_len(&self) -> usize {
        self.end - self.start
    }
}

/// Slide `kernel` along the diagonal of `matrix`
///
/// # Arguments
///
/// * `kernel` - Square `k × k` kernel
/// * `matrix` - Square `N × N` matrix; may be smaller than the kernel
///
/// # Returns
///
/// Response curve of length `N`
///
/// # Errors
///
/// Returns `InvalidKernel` if the kernel is empty or not square, and
/// `MalformedFeatureMatrix` if the matrix is not square.
pub fn slide_diagonal(
    kernel: &FeatureMatrix,
    matrix: &FeatureMatrix,
) -> Result<Vec<f64>, MashabilityError> {
    if !kernel.is_square() || kernel.rows() == 0 {
        return Err(MashabilityError::InvalidKernel(format!(
            "kernel must be square and non-empty, got {}x{}",
            kernel.rows(),
            kernel.cols()
        )));
    }
    if !matrix.is_square() {
        return Err(MashabilityError::MalformedFeatureMatrix(format!(
            "diagonal convolution needs a square matrix, got {}x{}",
            matrix.rows(),
            matrix.cols()
        )));
    }

    let k = kernel.rows();
    let n = matrix.rows();

    log::debug!("Sliding {}x{} kernel along diagonal of {}x{} matrix", k, k, n, n);

    let mut response = Vec::with_capacity(n);
    for i in 0..n {
        let window = DiagonalWindow::at(i, k, n);
        // Kernel cell for matrix cell m is m - start + pad_before
        let offset = window.pad_before;
        let mut sum = 0.0;
        for r in window.start..window.end {
            let kr = r - window.start + offset;
            for c in window.start..window.end {
                let kc = c - window.start + offset;
                sum += kernel.get(kr, kc) * matrix.get(r, c);
            }
        }
        response.push(sum);
    }

    Ok(response)
}
