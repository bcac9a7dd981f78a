use ldpc_toolbox::gf2::GF2;
use ldpc_toolbox::sparse::SparseMatrix;
use ndarray::Array2;
use num_traits::Zero;

use crate::code::ParityCheck;

impl ParityCheck for SparseMatrix {
    fn num_rows(&self) -> usize {
        SparseMatrix::num_rows(self)
    }

    fn num_cols(&self) -> usize {
        SparseMatrix::num_cols(self)
    }

    fn row_weight(&self, row: usize) -> usize {
        SparseMatrix::row_weight(self, row)
    }

    fn col_weight(&self, col: usize) -> usize {
        SparseMatrix::col_weight(self, col)
    }
}

/// Dense GF(2) matrices, as built with `ndarray` elsewhere in the toolchain.
impl ParityCheck for Array2<GF2> {
    fn num_rows(&self) -> usize {
        self.nrows()
    }

    fn num_cols(&self) -> usize {
        self.ncols()
    }

    fn row_weight(&self, row: usize) -> usize {
        self.row(row).iter().filter(|x| !x.is_zero()).count()
    }

    fn col_weight(&self, col: usize) -> usize {
        self.column(col).iter().filter(|x| !x.is_zero()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ldpc_toolbox::codes::ccsds::{AR4JACode, AR4JAInfoSize, AR4JARate};
    use num_traits::One;

    fn small_sparse() -> SparseMatrix {
        // 2 x 4, rows {0,1,2} and {1,2,3}
        let mut h = SparseMatrix::new(2, 4);
        for &(r, c) in &[(0, 0), (0, 1), (0, 2), (1, 1), (1, 2), (1, 3)] {
            h.insert(r, c);
        }
        h
    }

    #[test]
    fn test_sparse_weights() {
        let h = small_sparse();
        assert_eq!(ParityCheck::num_rows(&h), 2);
        assert_eq!(ParityCheck::num_cols(&h), 4);
        assert_eq!(h.row_weights(), vec![3, 3]);
        assert_eq!(h.col_weights(), vec![1, 2, 2, 1]);
    }

    #[test]
    fn test_dense_weights_match_sparse() {
        let mut dense = Array2::<GF2>::from_elem((2, 4), GF2::zero());
        for &(r, c) in &[(0, 0), (0, 1), (0, 2), (1, 1), (1, 2), (1, 3)] {
            dense[(r, c)] = GF2::one();
        }
        let sparse = small_sparse();
        assert_eq!(dense.row_weights(), sparse.row_weights());
        assert_eq!(dense.col_weights(), sparse.col_weights());
    }

    #[test]
    fn test_ar4ja_weight_totals_agree() {
        let h = AR4JACode::new(AR4JARate::R1_2, AR4JAInfoSize::K1024).h();
        let row_total: usize = h.row_weights().iter().sum();
        let col_total: usize = h.col_weights().iter().sum();
        assert_eq!(row_total, col_total, "Every entry is counted once per row and once per column");
        assert!(row_total > 0);
    }
}
