//! Empirical ensemble of a concrete parity-check matrix.
//!
//! Row weights are check node degrees, column weights are variable node
//! degrees. Each node-perspective histogram is turned into edge masses
//! `d · count(d) / E`, where `E` is the number of nonzero entries.

use std::collections::BTreeMap;

use crate::code::ParityCheck;
use crate::ensemble::{DegreeDistribution, Ensemble};
use crate::error::{EnsembleError, Result};
use crate::types::EnsembleConfig;
use crate::{log_verbose, log_warning};

/// Derive the ensemble of `h` with the default configuration.
pub fn from_parity_check<H: ParityCheck + ?Sized>(h: &H) -> Result<Ensemble> {
    from_parity_check_with(h, &EnsembleConfig::default())
}

/// Derive the ensemble of `h`.
///
/// # Arguments
/// * `h` - Parity-check matrix answering row and column weight queries
/// * `config` - Validation settings for the resulting distributions
///
/// # Returns
/// * The empirical ensemble, or `InconsistentGraph` when the row weights and
///   the column weights disagree on the number of edges
pub fn from_parity_check_with<H: ParityCheck + ?Sized>(
    h: &H,
    config: &EnsembleConfig,
) -> Result<Ensemble> {
    log_verbose!(
        "Extracting ensemble from {} x {} parity-check matrix",
        h.num_rows(),
        h.num_cols()
    );

    let row_hist = histogram(&h.row_weights(), "rows");
    let col_hist = histogram(&h.col_weights(), "columns");

    let row_edges = edge_total(&row_hist);
    let col_edges = edge_total(&col_hist);
    if row_edges != col_edges {
        return Err(EnsembleError::InconsistentGraph { row_edges, col_edges });
    }
    if row_edges == 0 {
        return Err(EnsembleError::EmptyDistribution);
    }
    log_verbose!("Parity-check matrix has {} edges", row_edges);

    let rho = edge_distribution(&row_hist, row_edges, config)?;
    let lam = edge_distribution(&col_hist, col_edges, config)?;

    Ensemble::from_distributions(lam, rho, *config)
}

/// Count nodes per nonzero weight.
fn histogram(weights: &[usize], what: &str) -> BTreeMap<usize, usize> {
    let mut hist = BTreeMap::new();
    let mut empty = 0;
    for &w in weights {
        if w == 0 {
            empty += 1;
        } else {
            *hist.entry(w).or_insert(0) += 1;
        }
    }
    if empty > 0 {
        log_warning!("Ignoring {} {} of weight zero", empty, what);
    }
    hist
}

fn edge_total(hist: &BTreeMap<usize, usize>) -> usize {
    hist.iter().map(|(&degree, &count)| degree * count).sum()
}

fn edge_distribution(
    hist: &BTreeMap<usize, usize>,
    edges: usize,
    config: &EnsembleConfig,
) -> Result<DegreeDistribution> {
    let degrees: Vec<usize> = hist.keys().copied().collect();
    let masses: Vec<f64> = hist
        .iter()
        .map(|(&degree, &count)| (degree * count) as f64 / edges as f64)
        .collect();
    DegreeDistribution::from_sparse_with(&degrees, &masses, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ldpc_toolbox::sparse::SparseMatrix;

    /// Matrix double that reports whatever weights it is given.
    struct Weights {
        rows: Vec<usize>,
        cols: Vec<usize>,
    }

    impl ParityCheck for Weights {
        fn num_rows(&self) -> usize {
            self.rows.len()
        }
        fn num_cols(&self) -> usize {
            self.cols.len()
        }
        fn row_weight(&self, row: usize) -> usize {
            self.rows[row]
        }
        fn col_weight(&self, col: usize) -> usize {
            self.cols[col]
        }
    }

    #[test]
    fn test_regular_matrix() {
        // 3 checks of degree 6, 6 variables of degree 3
        let h = Weights { rows: vec![6; 3], cols: vec![3; 6] };
        let ens = from_parity_check(&h).unwrap();
        assert_eq!(ens.var_degrees(), &[3]);
        assert_eq!(ens.chk_degrees(), &[6]);
        assert!((ens.rate().unwrap() - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_irregular_edge_masses() {
        // columns: two of weight 1, two of weight 2 -> 6 edges, masses 2/6 and 4/6
        let mut h = SparseMatrix::new(2, 4);
        for &(r, c) in &[(0, 0), (0, 1), (0, 2), (1, 1), (1, 2), (1, 3)] {
            h.insert(r, c);
        }
        let ens = from_parity_check(&h).unwrap();
        assert_eq!(ens.var_degrees(), &[1, 2]);
        assert!((ens.lam_of_degree(1) - 1.0 / 3.0).abs() < 1e-12);
        assert!((ens.lam_of_degree(2) - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(ens.rho_of_degree(3), 1.0);
        // 1 - m/n with all nodes active
        assert!((ens.rate().unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_inconsistent_graph() {
        let h = Weights { rows: vec![3, 3], cols: vec![2, 2, 1] };
        match from_parity_check(&h) {
            Err(EnsembleError::InconsistentGraph { row_edges, col_edges }) => {
                assert_eq!((row_edges, col_edges), (6, 5));
            }
            other => panic!("Expected InconsistentGraph, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_weight_nodes_are_skipped() {
        let h = Weights { rows: vec![2, 0], cols: vec![1, 1, 0] };
        let ens = from_parity_check(&h).unwrap();
        assert_eq!(ens.var_degrees(), &[1]);
        assert_eq!(ens.chk_degrees(), &[2]);
    }

    #[test]
    fn test_empty_matrix() {
        let h = Weights { rows: vec![0, 0], cols: vec![0] };
        assert!(matches!(from_parity_check(&h), Err(EnsembleError::EmptyDistribution)));
    }
}
