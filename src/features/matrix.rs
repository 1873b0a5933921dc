//! Dense row-major matrix used for feature, correlation and similarity data
//!
//! Rows are feature dimensions (pitch classes, pitch bins, frames) and columns
//! are time steps (beats, frames). The matrix is value-like: every operation
//! that produces a new matrix allocates it.

use crate::error::MashabilityError;
use serde::Serialize;

/// Dense `rows × cols` matrix of `f64`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl FeatureMatrix {
    /// Matrix of zeros
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Build from row-major data
    ///
    /// # Errors
    ///
    /// Returns `MalformedFeatureMatrix` if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, MashabilityError> {
        if data.len() != rows * cols {
            return Err(MashabilityError::MalformedFeatureMatrix(format!(
                "expected {} values for a {}x{} matrix, got {}",
                rows * cols,
                rows,
                cols,
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Build from a list of rows
    ///
    /// # Errors
    ///
    /// Returns `MalformedFeatureMatrix` if rows have inconsistent lengths.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, MashabilityError> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(MashabilityError::MalformedFeatureMatrix(format!(
                    "inconsistent row lengths: row 0 has {} values, row {} has {}",
                    cols,
                    i,
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Build from a list of columns (one feature vector per beat or frame)
    ///
    /// # Errors
    ///
    /// Returns `MalformedFeatureMatrix` if columns have inconsistent lengths.
    pub fn from_columns(columns: &[Vec<f64>]) -> Result<Self, MashabilityError> {
        let rows = columns.first().map_or(0, Vec::len);
        for (j, column) in columns.iter().enumerate() {
            if column.len() != rows {
                return Err(MashabilityError::MalformedFeatureMatrix(format!(
                    "inconsistent column lengths: column 0 has {} values, column {} has {}",
                    rows,
                    j,
                    column.len()
                )));
            }
        }
        let cols = columns.len();
        let mut data = vec![0.0; rows * cols];
        for (j, column) in columns.iter().enumerate() {
            for (i, &value) in column.iter().enumerate() {
                data[i * cols + j] = value;
            }
        }
        Ok(Self { rows, cols, data })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `true` when the matrix is square
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Element at `(row, col)`. Panics when out of bounds, like slice indexing.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Set element at `(row, col)`
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    /// Row slice
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Column values, top to bottom
    pub fn column(&self, col: usize) -> impl Iterator<Item = f64> + '_ {
        (0..self.rows).map(move |r| self.get(r, col))
    }

    /// Sum of all entries
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Frobenius norm
    pub fn frobenius_norm(&self) -> f64 {
        self.data.iter().map(|&x| x * x).sum::<f64>().sqrt()
    }

    /// Copy with both axes reversed (`m[r][c]` moves to `m[R-1-r][C-1-c]`)
    pub fn reversed(&self) -> Self {
        let mut data = self.data.clone();
        data.reverse();
        Self {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }

    /// Copy with only the column (beat) order reversed
    ///
    /// Rows keep their order, unlike [`FeatureMatrix::reversed`] which flips
    /// both axes.
    pub fn reversed_columns(&self) -> Self {
        let mut out = self.clone();
        for r in 0..self.rows {
            out.data[r * self.cols..(r + 1) * self.cols].reverse();
        }
        out
    }

    /// Stack `copies` copies of this matrix on top of each other
    pub fn tiled_vertically(&self, copies: usize) -> Self {
        Self {
            rows: self.rows * copies,
            cols: self.cols,
            data: self.data.repeat(copies),
        }
    }

    /// Elementwise product with another matrix of the same shape
    ///
    /// # Errors
    ///
    /// Returns `MalformedFeatureMatrix` on shape mismatch.
    pub fn hadamard(&self, other: &FeatureMatrix) -> Result<Self, MashabilityError> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(MashabilityError::MalformedFeatureMatrix(format!(
                "hadamard product of {}x{} and {}x{}",
                self.rows, self.cols, other.rows, other.cols
            )));
        }
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| a * b)
            .collect();
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    /// Multiply every entry by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&x| x * factor).collect(),
        }
    }

    /// First entry that is negative or non-finite, as `(row, col, value)`
    pub(crate) fn first_invalid_entry(&self) -> Option<(usize, usize, f64)> {
        self.data
            .iter()
            .position(|&x| !x.is_finite() || x < 0.0)
            .map(|idx| (idx / self.cols, idx % self.cols, self.data[idx]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_and_columns_agree() {
        let by_rows = FeatureMatrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let by_cols =
            FeatureMatrix::from_columns(&[vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]).unwrap();
        assert_eq!(by_rows, by_cols);
        assert_eq!(by_rows.rows(), 2);
        assert_eq!(by_rows.cols(), 3);
        assert_eq!(by_rows.get(1, 2), 6.0);
    }

    #[test]
    fn test_inconsistent_rows_rejected() {
        let result = FeatureMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(
            result,
            Err(MashabilityError::MalformedFeatureMatrix(_))
        ));
        assert!(FeatureMatrix::from_vec(2, 2, vec![1.0; 3]).is_err());
    }

    #[test]
    fn test_reversed_flips_both_axes() {
        let m = FeatureMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let r = m.reversed();
        assert_eq!(r.row(0), &[4.0, 3.0]);
        assert_eq!(r.row(1), &[2.0, 1.0]);

        let rc = m.reversed_columns();
        assert_eq!(rc.row(0), &[2.0, 1.0]);
        assert_eq!(rc.row(1), &[4.0, 3.0]);
    }

    #[test]
    fn test_tiled_vertically() {
        let m = FeatureMatrix::from_rows(&[vec![1.0, 2.0]]).unwrap();
        let t = m.tiled_vertically(2);
        assert_eq!(t.rows(), 2);
        assert_eq!(t.row(1), &[1.0, 2.0]);
    }

    #[test]
    fn test_norm_and_sum() {
        let m = FeatureMatrix::from_rows(&[vec![3.0, 0.0], vec![0.0, 4.0]]).unwrap();
        assert!((m.frobenius_norm() - 5.0).abs() < 1e-12);
        assert!((m.sum() - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_first_invalid_entry() {
        let m = FeatureMatrix::from_rows(&[vec![0.0, 1.0], vec![-1.0, f64::NAN]]).unwrap();
        assert_eq!(m.first_invalid_entry().map(|(r, c, _)| (r, c)), Some((1, 0)));
        let ok = FeatureMatrix::zeros(2, 2);
        assert!(ok.first_invalid_entry().is_none());
    }
}
