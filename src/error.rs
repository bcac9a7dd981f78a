use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnsembleError {
    #[error("Invalid degree: {0}")]
    InvalidDegree(String),
    #[error("Mismatched lengths: {degrees} degrees but {masses} masses")]
    MismatchedLengths { degrees: usize, masses: usize },
    #[error("Inconsistent probability mass: sum is {sum}, allowed deviation from 1 is {tolerance}")]
    InconsistentProbabilityMass { sum: f64, tolerance: f64 },
    #[error("Invalid mass {mass} for degree {degree}")]
    InvalidMass { degree: usize, mass: f64 },
    #[error("Empty distribution")]
    EmptyDistribution,
    #[error("Inconsistent graph: row weights sum to {row_edges}, column weights sum to {col_edges}")]
    InconsistentGraph { row_edges: usize, col_edges: usize },
    #[error("File format error at line {line}: {reason}")]
    FileFormatError { line: usize, reason: String },
    #[error("Ensemble is not initialized: {0} distribution missing")]
    UninitializedEnsemble(&'static str),
    #[error("No degree sequence with {chk_nodes} check nodes carries {var_edges} edges")]
    UnrealizableDegreeSequence { var_edges: usize, chk_nodes: usize },
    #[error("Invalid block length: {0}")]
    InvalidBlockLength(usize),
    #[error("Invalid tolerance: {0}")]
    InvalidTolerance(f64),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EnsembleError>;

impl EnsembleError {
    pub(crate) fn format(line: usize, reason: impl Into<String>) -> Self {
        EnsembleError::FileFormatError {
            line,
            reason: reason.into(),
        }
    }
}
