//! LDPC code ensembles.
//!
//! An `Ensemble` pairs the edge-perspective variable-node distribution λ with
//! the edge-perspective check-node distribution ρ. Construction either fully
//! succeeds or leaves the previous state untouched.

pub mod distribution;
pub mod utils;

use std::fmt;
use std::path::Path;

use ndarray::Array1;

use crate::code::ParityCheck;
use crate::error::{EnsembleError, Result};
use crate::types::{DegreeCount, EnsembleConfig, NodeCounts};
pub use distribution::DegreeDistribution;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ensemble {
    lam: Option<DegreeDistribution>,
    rho: Option<DegreeDistribution>,
    config: EnsembleConfig,
}

impl Ensemble {
    /// Empty ensemble with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty ensemble that validates every future distribution with `config`.
    pub fn with_config(config: EnsembleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Ensemble {
            lam: None,
            rho: None,
            config,
        })
    }

    /// Ensemble from dense edge-perspective vectors (first index = degree 1).
    pub fn from_dense(lam: &Array1<f64>, rho: &Array1<f64>) -> Result<Self> {
        let mut ens = Self::new();
        ens.set_dense(lam, rho)?;
        Ok(ens)
    }

    /// Ensemble from sparse (degree, mass) arrays for both sides.
    ///
    /// # Arguments
    /// * `dl`, `lam` - Variable node degrees and their edge masses
    /// * `dr`, `rho` - Check node degrees and their edge masses
    pub fn from_sparse(dl: &[usize], lam: &[f64], dr: &[usize], rho: &[f64]) -> Result<Self> {
        let mut ens = Self::new();
        ens.set_sparse(dl, lam, dr, rho)?;
        Ok(ens)
    }

    /// Ensemble from two already validated distributions.
    pub fn from_distributions(
        lam: DegreeDistribution,
        rho: DegreeDistribution,
        config: EnsembleConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Ensemble {
            lam: Some(lam),
            rho: Some(rho),
            config,
        })
    }

    /// Read an ensemble from a `.ens` file.
    pub fn from_file(path: &Path) -> Result<Self> {
        crate::codec::read(path)
    }

    /// Empirical ensemble of a parity-check matrix.
    pub fn from_parity_check<H: ParityCheck + ?Sized>(h: &H) -> Result<Self> {
        crate::empirical::from_parity_check(h)
    }

    /// Replace both sides from dense vectors. On error nothing changes.
    pub fn set_dense(&mut self, lam: &Array1<f64>, rho: &Array1<f64>) -> Result<()> {
        let lam = DegreeDistribution::from_dense_with(lam, &self.config)?;
        let rho = DegreeDistribution::from_dense_with(rho, &self.config)?;
        self.lam = Some(lam);
        self.rho = Some(rho);
        Ok(())
    }

    /// Replace both sides from sparse arrays. On error nothing changes.
    pub fn set_sparse(&mut self, dl: &[usize], lam: &[f64], dr: &[usize], rho: &[f64]) -> Result<()> {
        let lam = DegreeDistribution::from_sparse_with(dl, lam, &self.config)?;
        let rho = DegreeDistribution::from_sparse_with(dr, rho, &self.config)?;
        self.lam = Some(lam);
        self.rho = Some(rho);
        Ok(())
    }

    /// Set the variable node distribution (edge perspective, first index = degree 1).
    pub fn set_var_dist(&mut self, lam: &Array1<f64>) -> Result<()> {
        self.lam = Some(DegreeDistribution::from_dense_with(lam, &self.config)?);
        Ok(())
    }

    /// Set the check node distribution (edge perspective, first index = degree 1).
    pub fn set_chk_dist(&mut self, rho: &Array1<f64>) -> Result<()> {
        self.rho = Some(DegreeDistribution::from_dense_with(rho, &self.config)?);
        Ok(())
    }

    /// Replace the variable node masses, keeping the active degrees.
    pub fn set_var_masses(&mut self, masses: &[f64]) -> Result<()> {
        let updated = self.lam_dist()?.with_masses(masses, &self.config)?;
        self.lam = Some(updated);
        Ok(())
    }

    /// Replace the check node masses, keeping the active degrees.
    pub fn set_chk_masses(&mut self, masses: &[f64]) -> Result<()> {
        let updated = self.rho_dist()?.with_masses(masses, &self.config)?;
        self.rho = Some(updated);
        Ok(())
    }

    /// True once both distributions have been set.
    pub fn is_complete(&self) -> bool {
        self.lam.is_some() && self.rho.is_some()
    }

    pub fn config(&self) -> &EnsembleConfig {
        &self.config
    }

    fn lam_dist(&self) -> Result<&DegreeDistribution> {
        self.lam
            .as_ref()
            .ok_or(EnsembleError::UninitializedEnsemble("variable node"))
    }

    fn rho_dist(&self) -> Result<&DegreeDistribution> {
        self.rho
            .as_ref()
            .ok_or(EnsembleError::UninitializedEnsemble("check node"))
    }

    /// Variable node distribution, edge perspective.
    pub fn lam(&self) -> Option<&DegreeDistribution> {
        self.lam.as_ref()
    }

    /// Check node distribution, edge perspective.
    pub fn rho(&self) -> Option<&DegreeDistribution> {
        self.rho.as_ref()
    }

    /// Variable node distribution, node perspective.
    pub fn var_node_dist(&self) -> Result<DegreeDistribution> {
        Ok(self.lam_dist()?.edge_to_node())
    }

    /// Check node distribution, node perspective.
    pub fn chk_node_dist(&self) -> Result<DegreeDistribution> {
        Ok(self.rho_dist()?.edge_to_node())
    }

    /// Dense variable node distribution (edge perspective, first index = degree 1).
    pub fn var_degree_dist(&self) -> Result<Array1<f64>> {
        self.lam_dist()?.to_dense(None)
    }

    /// Dense check node distribution (edge perspective, first index = degree 1).
    pub fn chk_degree_dist(&self) -> Result<Array1<f64>> {
        self.rho_dist()?.to_dense(None)
    }

    /// Design rate `R = 1 - Σ(ρ_i / i) / Σ(λ_j / j)`.
    pub fn rate(&self) -> Result<f64> {
        let lam = self.lam_dist()?;
        let rho = self.rho_dist()?;
        Ok(1.0 - rho.inverse_degree_sum() / lam.inverse_degree_sum())
    }

    /// Number of active variable node degrees, zero when unset.
    pub fn active_var_degrees(&self) -> usize {
        self.lam.as_ref().map_or(0, |d| d.active_degrees())
    }

    /// Number of active check node degrees, zero when unset.
    pub fn active_chk_degrees(&self) -> usize {
        self.rho.as_ref().map_or(0, |d| d.active_degrees())
    }

    pub fn var_degrees(&self) -> &[usize] {
        self.lam.as_ref().map(|d| d.degrees()).unwrap_or(&[])
    }

    pub fn chk_degrees(&self) -> &[usize] {
        self.rho.as_ref().map(|d| d.degrees()).unwrap_or(&[])
    }

    /// Edge mass of variable node degree `d`; zero if inactive or unset.
    pub fn lam_of_degree(&self, d: usize) -> f64 {
        self.lam.as_ref().map_or(0.0, |dist| dist.mass_of_degree(d))
    }

    /// Edge mass of check node degree `d`; zero if inactive or unset.
    pub fn rho_of_degree(&self, d: usize) -> f64 {
        self.rho.as_ref().map_or(0.0, |dist| dist.mass_of_degree(d))
    }

    /// Node counts per degree for a code of `block_length` variable nodes.
    ///
    /// The number of check nodes is `round(n · (1 - R))`. Counts on each side
    /// are apportioned from the node-perspective distributions and always sum
    /// to the node totals. Check node counts are then shifted between check
    /// degrees until both sides carry the same number of edges; when no split
    /// of the check nodes can do that, `UnrealizableDegreeSequence` is returned.
    pub fn node_counts(&self, block_length: usize) -> Result<NodeCounts> {
        if block_length == 0 {
            return Err(EnsembleError::InvalidBlockLength(block_length));
        }
        let rate = self.rate()?;
        let chk_nodes = (block_length as f64 * (1.0 - rate)).round() as usize;

        let var_node = self.var_node_dist()?;
        let chk_node = self.chk_node_dist()?;

        let var = degree_counts(&var_node, block_length);
        let var_edges: usize = var.iter().map(|c| c.degree * c.count).sum();

        let mut chk_counts = utils::apportion(chk_node.masses(), chk_nodes);
        if !utils::rebalance(chk_node.degrees(), &mut chk_counts, var_edges) {
            return Err(EnsembleError::UnrealizableDegreeSequence { var_edges, chk_nodes });
        }
        let chk = chk_node
            .degrees()
            .iter()
            .zip(chk_counts)
            .map(|(&degree, count)| DegreeCount { degree, count })
            .collect();

        Ok(NodeCounts {
            var_nodes: block_length,
            chk_nodes,
            var,
            chk,
        })
    }

    /// Human-readable summary: rate, active degree counts and degree lists.
    pub fn describe(&self) -> String {
        let rate = match self.rate() {
            Ok(r) => format!("{:.6}", r),
            Err(_) => "undefined (incomplete ensemble)".to_string(),
        };
        let show = |d: Option<&DegreeDistribution>| match d {
            Some(dist) => dist.to_string(),
            None => "unset".to_string(),
        };

        let mut out = String::new();
        out.push_str("LDPC ensemble\n");
        out.push_str(&format!("  rate:               {}\n", rate));
        out.push_str(&format!("  active var degrees: {}\n", self.active_var_degrees()));
        out.push_str(&format!("  active chk degrees: {}\n", self.active_chk_degrees()));
        out.push_str(&format!("  var degrees:        {:?}\n", self.var_degrees()));
        out.push_str(&format!("  chk degrees:        {:?}\n", self.chk_degrees()));
        out.push_str(&format!("  lambda:             {}\n", show(self.lam())));
        out.push_str(&format!("  rho:                {}\n", show(self.rho())));
        out
    }
}

fn degree_counts(node_dist: &DegreeDistribution, total: usize) -> Vec<DegreeCount> {
    let counts = utils::apportion(node_dist.masses(), total);
    node_dist
        .degrees()
        .iter()
        .zip(counts)
        .map(|(&degree, count)| DegreeCount { degree, count })
        .collect()
}

impl fmt::Display for Ensemble {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}
