//! Sparse matrix utilities.
//!
//! Helper functions for working with nalgebra-sparse matrices.

use nalgebra::DVector;
use nalgebra_sparse::{CooMatrix, CscMatrix};

/// Create a CSC matrix from triplets (row, col, value).
///
/// Duplicates are summed together.
pub fn csc_from_triplets(
    nrows: usize,
    ncols: usize,
    rows: Vec<usize>,
    cols: Vec<usize>,
    vals: Vec<f64>,
) -> CscMatrix<f64> {
    if rows.is_empty() {
        return CscMatrix::zeros(nrows, ncols);
    }

    let mut coo = CooMatrix::new(nrows, ncols);
    for ((row, col), val) in rows.into_iter().zip(cols).zip(vals) {
        if row < nrows && col < ncols {
            coo.push(row, col, val);
        }
    }

    CscMatrix::from(&coo)
}

/// Sparse matrix times dense vector.
pub fn csc_mul_vec(a: &CscMatrix<f64>, x: &DVector<f64>) -> DVector<f64> {
    let mut out = DVector::zeros(a.nrows());
    for (row, col, val) in a.triplet_iter() {
        out[row] += *val * x[col];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csc_from_triplets() {
        let m = csc_from_triplets(3, 3, vec![0, 1, 2], vec![0, 1, 2], vec![1.0, 2.0, 3.0]);
        assert_eq!(m.nrows(), 3);
        assert_eq!(m.ncols(), 3);
        assert_eq!(m.nnz(), 3);
    }

    #[test]
    fn test_duplicates_are_summed() {
        let m = csc_from_triplets(2, 2, vec![0, 0], vec![1, 1], vec![1.5, 2.5]);
        let y = csc_mul_vec(&m, &DVector::from_vec(vec![0.0, 1.0]));
        assert_eq!(y[0], 4.0);
        assert_eq!(y[1], 0.0);
    }

    #[test]
    fn test_empty_triplets() {
        let m = csc_from_triplets(0, 4, vec![], vec![], vec![]);
        assert_eq!(m.nrows(), 0);
        assert_eq!(m.ncols(), 4);
    }
}
