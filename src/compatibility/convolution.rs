//! Full linear 2D convolution
//!
//! `out[m][n] = Σ_i Σ_j a[m - i][n - j] · b[i][j]` over every position where
//! the two operands overlap by at least one cell. The output has shape
//! `(a.rows + b.rows - 1) × (a.cols + b.cols - 1)`.
//!
//! Flipping `a` along both axes before the call turns the result into the
//! cross-correlation of `a` with `b`; the harmonic scorer relies on this.

use crate::features::FeatureMatrix;

/// Full 2D convolution of `a` with `b`
///
/// Returns an empty matrix when either operand is empty.
pub fn convolve2d_full(a: &FeatureMatrix, b: &FeatureMatrix) -> FeatureMatrix {
    if a.rows() == 0 || a.cols() == 0 || b.rows() == 0 || b.cols() == 0 {
        return FeatureMatrix::zeros(0, 0);
    }

    let out_rows = a.rows() + b.rows() - 1;
    let out_cols = a.cols() + b.cols() - 1;
    let mut out = FeatureMatrix::zeros(out_rows, out_cols);

    // Scatter each cell of `a` over a shifted copy of `b`
    for i in 0..a.rows() {
        for j in 0..a.cols() {
            let av = a.get(i, j);
            if av == 0.0 {
                continue;
            }
            for k in 0..b.rows() {
                let b_row = b.row(k);
                for (l, &bv) in b_row.iter().enumerate() {
                    let (r, c) = (i + k, j + l);
                    out.set(r, c, out.get(r, c) + av * bv);
                }
            }
        }
    }

    out
}
