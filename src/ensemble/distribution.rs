//! Sparse degree distributions.
//!
//! A `DegreeDistribution` stores only the degrees carrying nonzero mass, in
//! strictly increasing order, with masses summing to one. The dense form used
//! by callers is a vector whose index `i` holds the mass of degree `i + 1`.

use std::fmt;

use ndarray::Array1;
use serde::Serialize;

use crate::ensemble::utils;
use crate::error::{EnsembleError, Result};
use crate::types::EnsembleConfig;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DegreeDistribution {
    degrees: Vec<usize>,
    masses: Vec<f64>,
}

impl DegreeDistribution {
    /// Build a distribution from a dense vector (index 0 = degree 1) with the default tolerance.
    pub fn from_dense(v: &Array1<f64>) -> Result<Self> {
        Self::from_dense_with(v, &EnsembleConfig::default())
    }

    /// Build a distribution from a dense vector, dropping zero entries.
    ///
    /// # Arguments
    /// * `v` - Masses indexed by degree - 1
    /// * `config` - Supplies the accepted deviation of Σv from one
    ///
    /// # Returns
    /// * The normalized sparse distribution, or `InconsistentProbabilityMass`
    ///   if Σv is further than the tolerance from one
    pub fn from_dense_with(v: &Array1<f64>, config: &EnsembleConfig) -> Result<Self> {
        let pairs = v.iter().enumerate().map(|(i, &m)| (i + 1, m)).collect();
        Self::validated(pairs, config)
    }

    /// Build a distribution from parallel degree and mass slices with the default tolerance.
    pub fn from_sparse(degrees: &[usize], masses: &[f64]) -> Result<Self> {
        Self::from_sparse_with(degrees, masses, &EnsembleConfig::default())
    }

    /// Build a distribution from parallel degree and mass slices.
    ///
    /// Degrees may come in any order. Degree 0 and repeated degrees are rejected
    /// with `InvalidDegree`, slices of different length with `MismatchedLengths`.
    pub fn from_sparse_with(
        degrees: &[usize],
        masses: &[f64],
        config: &EnsembleConfig,
    ) -> Result<Self> {
        if degrees.len() != masses.len() {
            return Err(EnsembleError::MismatchedLengths {
                degrees: degrees.len(),
                masses: masses.len(),
            });
        }
        let pairs = degrees.iter().copied().zip(masses.iter().copied()).collect();
        Self::validated(pairs, config)
    }

    /// Replace the masses of the active degrees, keeping the degrees themselves.
    pub fn with_masses(&self, masses: &[f64], config: &EnsembleConfig) -> Result<Self> {
        Self::from_sparse_with(&self.degrees, masses, config)
    }

    /// The single validation routine every constructor goes through.
    fn validated(mut pairs: Vec<(usize, f64)>, config: &EnsembleConfig) -> Result<Self> {
        config.validate()?;
        if pairs.is_empty() {
            return Err(EnsembleError::EmptyDistribution);
        }

        for &(degree, mass) in &pairs {
            if degree == 0 {
                return Err(EnsembleError::InvalidDegree(
                    "degree 0 is not allowed, degrees start at 1".to_string(),
                ));
            }
            if !mass.is_finite() || mass < 0.0 {
                return Err(EnsembleError::InvalidMass { degree, mass });
            }
        }

        pairs.sort_by_key(|&(degree, _)| degree);
        if let Some(w) = pairs.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(EnsembleError::InvalidDegree(format!(
                "degree {} appears more than once",
                w[0].0
            )));
        }

        pairs.retain(|&(_, mass)| mass > 0.0);
        let sum: f64 = pairs.iter().map(|&(_, mass)| mass).sum();
        if (sum - 1.0).abs() > config.pmass_tolerance {
            return Err(EnsembleError::InconsistentProbabilityMass {
                sum,
                tolerance: config.pmass_tolerance,
            });
        }

        let (degrees, mut masses): (Vec<usize>, Vec<f64>) = pairs.into_iter().unzip();
        utils::normalize(&mut masses);

        Ok(DegreeDistribution { degrees, masses })
    }

    /// Expand to dense form (index 0 = degree 1).
    ///
    /// Without `len` the vector ends at the largest active degree. A `len`
    /// shorter than that would drop mass and is rejected.
    pub fn to_dense(&self, len: Option<usize>) -> Result<Array1<f64>> {
        let max_degree = self.max_degree();
        let len = len.unwrap_or(max_degree);
        if len < max_degree {
            return Err(EnsembleError::InvalidDegree(format!(
                "dense length {} cannot hold degree {}",
                len, max_degree
            )));
        }

        let mut dense = Array1::<f64>::zeros(len);
        for (degree, mass) in self.iter() {
            dense[degree - 1] = mass;
        }
        Ok(dense)
    }

    /// Convert an edge-perspective distribution to node perspective.
    ///
    /// A node of degree i carries i edges, so `Λ_i = (λ_i / i) / Σ_j (λ_j / j)`.
    pub fn edge_to_node(&self) -> DegreeDistribution {
        let norm = self.inverse_degree_sum();
        let masses = self
            .iter()
            .map(|(degree, mass)| mass / degree as f64 / norm)
            .collect();
        DegreeDistribution {
            degrees: self.degrees.clone(),
            masses,
        }
    }

    /// Convert a node-perspective distribution to edge perspective: `λ_i = i·Λ_i / Σ_j j·Λ_j`.
    pub fn node_to_edge(&self) -> DegreeDistribution {
        let norm = utils::degree_weighted_sum(&self.degrees, &self.masses);
        let masses = self
            .iter()
            .map(|(degree, mass)| mass * degree as f64 / norm)
            .collect();
        DegreeDistribution {
            degrees: self.degrees.clone(),
            masses,
        }
    }

    /// Mass of degree `d`, zero when the degree is not active.
    pub fn mass_of_degree(&self, d: usize) -> f64 {
        match self.degrees.binary_search(&d) {
            Ok(i) => self.masses[i],
            Err(_) => 0.0,
        }
    }

    /// Number of degrees with nonzero mass.
    pub fn active_degrees(&self) -> usize {
        self.degrees.len()
    }

    pub fn degrees(&self) -> &[usize] {
        &self.degrees
    }

    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    pub fn max_degree(&self) -> usize {
        self.degrees.last().copied().unwrap_or(0)
    }

    /// Σ m_d / d. For edge-perspective masses this is nodes per edge.
    pub fn inverse_degree_sum(&self) -> f64 {
        utils::inverse_degree_sum(&self.degrees, &self.masses)
    }

    /// Average degree of a node, reading the masses as edge perspective.
    pub fn average_node_degree(&self) -> f64 {
        1.0 / self.inverse_degree_sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.degrees.iter().copied().zip(self.masses.iter().copied())
    }
}

impl fmt::Display for DegreeDistribution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(degree, mass)| format!("{}:{:.6}", degree, mass))
            .collect();
        write!(f, "[{}]", parts.join(", "))
    }
}
