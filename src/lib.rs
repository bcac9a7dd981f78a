//! Degree distribution ensembles of LDPC codes.
//!
//! An [`Ensemble`] pairs the variable node and check node degree
//! distributions (edge perspective) of a code family and derives its design
//! rate. Ensembles are built from dense or sparse vectors, read from `.ens`
//! files, or extracted from a parity-check matrix, and can be exported as a
//! degree sequence for graph construction tools.

pub mod code;
pub mod codec;
pub mod empirical;
pub mod ensemble;
pub mod error;
pub mod logging;
pub mod types;

pub use code::ParityCheck;
pub use ensemble::{DegreeDistribution, Ensemble};
pub use error::{EnsembleError, Result};
pub use types::{DegreeCount, EnsembleConfig, NodeCounts, DEFAULT_PMASS_TOLERANCE};
