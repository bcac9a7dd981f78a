pub mod ldpc_impl;

/// Row and column weight queries on a binary parity-check matrix.
///
/// This is the only view of a matrix the empirical extractor needs. Rows are
/// check nodes, columns are variable nodes, the weight of a row or column is
/// its number of nonzero entries (the node degree).
pub trait ParityCheck {
    fn num_rows(&self) -> usize;
    fn num_cols(&self) -> usize;
    fn row_weight(&self, row: usize) -> usize;
    fn col_weight(&self, col: usize) -> usize;

    fn row_weights(&self) -> Vec<usize> {
        (0..self.num_rows()).map(|r| self.row_weight(r)).collect()
    }

    fn col_weights(&self) -> Vec<usize> {
        (0..self.num_cols()).map(|c| self.col_weight(c)).collect()
    }
}
