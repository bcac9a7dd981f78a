use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{EnsembleError, Result};

/// Accepted deviation of the probability mass from one, unless configured otherwise.
pub const DEFAULT_PMASS_TOLERANCE: f64 = 1e-3;

fn default_pmass_tolerance() -> f64 {
    DEFAULT_PMASS_TOLERANCE
}

/// Settings shared by every validation routine.
///
/// When a degree distribution is set, its masses must sum to one within
/// `pmass_tolerance`. Inputs inside the tolerance are still normalized to
/// exactly one before they are stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnsembleConfig {
    #[serde(default = "default_pmass_tolerance")]
    pub pmass_tolerance: f64,
    /// Enables `log_verbose!` output from the codec and the extractor
    #[serde(default)]
    pub verbose: bool,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        EnsembleConfig {
            pmass_tolerance: DEFAULT_PMASS_TOLERANCE,
            verbose: false,
        }
    }
}

impl EnsembleConfig {
    pub fn new(pmass_tolerance: f64) -> Result<Self> {
        let config = EnsembleConfig {
            pmass_tolerance,
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: EnsembleConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Switch `log_verbose!` output on or off for the whole process.
    pub fn apply_verbosity(&self) {
        crate::logging::set_verbose(self.verbose);
    }

    pub fn validate(&self) -> Result<()> {
        let tol = self.pmass_tolerance;
        if !tol.is_finite() || !(0.0..1.0).contains(&tol) {
            return Err(EnsembleError::InvalidTolerance(tol));
        }
        Ok(())
    }
}

/// Number of graph nodes of one degree, as written to a `.deg` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeCount {
    pub degree: usize,
    pub count: usize,
}

/// Node counts of both sides of the Tanner graph for one block length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeCounts {
    pub var_nodes: usize,
    pub chk_nodes: usize,
    pub var: Vec<DegreeCount>,
    pub chk: Vec<DegreeCount>,
}

impl NodeCounts {
    /// Edges implied by the variable-node side.
    pub fn var_edges(&self) -> usize {
        self.var.iter().map(|c| c.degree * c.count).sum()
    }

    /// Edges implied by the check-node side.
    pub fn chk_edges(&self) -> usize {
        self.chk.iter().map(|c| c.degree * c.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = EnsembleConfig::default();
        assert_eq!(config.pmass_tolerance, DEFAULT_PMASS_TOLERANCE);
        assert!(!config.verbose);
    }

    #[test]
    fn test_config_rejects_bad_tolerance() {
        assert!(matches!(EnsembleConfig::new(-1e-3), Err(EnsembleError::InvalidTolerance(_))));
        assert!(matches!(EnsembleConfig::new(f64::NAN), Err(EnsembleError::InvalidTolerance(_))));
        assert!(matches!(EnsembleConfig::new(1.0), Err(EnsembleError::InvalidTolerance(_))));
        assert!(EnsembleConfig::new(0.0).is_ok());
    }

    #[test]
    fn test_config_from_json_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "pmass_tolerance": 1e-6 }}"#).unwrap();

        let config = EnsembleConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.pmass_tolerance, 1e-6);
        assert!(!config.verbose, "Missing field should fall back to default");
    }

    #[test]
    fn test_apply_verbosity() {
        let config = EnsembleConfig { verbose: true, ..Default::default() };
        config.apply_verbosity();
        assert!(crate::logging::is_verbose());
        EnsembleConfig::default().apply_verbosity();
        assert!(!crate::logging::is_verbose());
    }

    #[test]
    fn test_node_counts_edges() {
        let counts = NodeCounts {
            var_nodes: 4,
            chk_nodes: 2,
            var: vec![DegreeCount { degree: 3, count: 4 }],
            chk: vec![DegreeCount { degree: 6, count: 2 }],
        };
        assert_eq!(counts.var_edges(), 12);
        assert_eq!(counts.chk_edges(), 12);
    }
}
