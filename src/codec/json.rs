use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::codec::write_atomic;
use crate::ensemble::{DegreeDistribution, Ensemble};
use crate::error::{EnsembleError, Result};
use crate::types::EnsembleConfig;
use crate::{log_error, log_success};

#[derive(Serialize)]
struct EnsembleSnapshot<'a> {
    rate: f64,
    lam: &'a DegreeDistribution,
    rho: &'a DegreeDistribution,
}

/// Unvalidated sparse arrays as they appear on disk.
#[derive(Deserialize)]
struct SparseJson {
    degrees: Vec<usize>,
    masses: Vec<f64>,
}

#[derive(Deserialize)]
struct EnsembleJson {
    lam: SparseJson,
    rho: SparseJson,
}

/// Write a pretty-printed JSON snapshot of `ensemble`, including its rate.
pub fn write_json(ensemble: &Ensemble, path: &Path) -> Result<()> {
    let snapshot = EnsembleSnapshot {
        rate: ensemble.rate()?,
        lam: ensemble
            .lam()
            .ok_or(EnsembleError::UninitializedEnsemble("variable node"))?,
        rho: ensemble
            .rho()
            .ok_or(EnsembleError::UninitializedEnsemble("check node"))?,
    };
    let result = serde_json::to_string_pretty(&snapshot)
        .map_err(EnsembleError::from)
        .and_then(|json| write_atomic(path, &json));
    match &result {
        Ok(()) => log_success!("Ensemble snapshot saved to {}", path.display()),
        Err(e) => log_error!("Failed to save ensemble snapshot to {}: {}", path.display(), e),
    }
    result
}

/// Read a JSON snapshot. The stored rate is ignored and the distributions are re-validated.
pub fn read_json(path: &Path, config: &EnsembleConfig) -> Result<Ensemble> {
    let result = fs::read_to_string(path)
        .map_err(EnsembleError::from)
        .and_then(|content| parse_json(&content, config));
    match &result {
        Ok(ens) => log_success!(
            "Read ensemble snapshot from {} ({} var / {} chk degrees)",
            path.display(),
            ens.active_var_degrees(),
            ens.active_chk_degrees()
        ),
        Err(e) => log_error!("Failed to read ensemble snapshot {}: {}", path.display(), e),
    }
    result
}

fn parse_json(content: &str, config: &EnsembleConfig) -> Result<Ensemble> {
    let parsed: EnsembleJson = serde_json::from_str(content)?;
    let mut ens = Ensemble::with_config(*config)?;
    ens.set_sparse(
        &parsed.lam.degrees,
        &parsed.lam.masses,
        &parsed.rho.degrees,
        &parsed.rho.masses,
    )?;
    Ok(ens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{self, LogLevel};

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("code.json");
        let ens = Ensemble::from_sparse(&[2, 3], &[0.25, 0.75], &[7], &[1.0]).unwrap();

        write_json(&ens, &path).unwrap();
        let back = read_json(&path, &EnsembleConfig::default()).unwrap();
        assert_eq!(back.lam(), ens.lam());
        assert_eq!(back.rho(), ens.rho());

        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!((raw["rate"].as_f64().unwrap() - ens.rate().unwrap()).abs() < 1e-15);
    }

    #[test]
    fn test_json_invalid_content_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(
            &path,
            r#"{"lam": {"degrees": [3, 4], "masses": [1.0]}, "rho": {"degrees": [6], "masses": [1.0]}}"#,
        )
        .unwrap();
        let result = read_json(&path, &EnsembleConfig::default());
        assert!(matches!(result, Err(EnsembleError::MismatchedLengths { .. })));
    }

    fn logged(level: LogLevel, needle: &str) -> bool {
        logging::get_logger()
            .get_messages()
            .iter()
            .any(|m| m.level == level && m.message.contains(needle))
    }

    #[test]
    fn test_json_read_and_failures_are_logged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logged.json");
        let ens = Ensemble::from_sparse(&[3], &[1.0], &[6], &[1.0]).unwrap();
        write_json(&ens, &path).unwrap();
        read_json(&path, &EnsembleConfig::default()).unwrap();
        let shown = path.display().to_string();
        assert!(logged(LogLevel::Success, &format!("Read ensemble snapshot from {}", shown)));

        let missing_dir = dir.path().join("no_such_dir").join("out.json");
        assert!(matches!(write_json(&ens, &missing_dir), Err(EnsembleError::Io(_))));
        assert!(logged(LogLevel::Error, &missing_dir.display().to_string()));
    }

    #[test]
    fn test_json_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            read_json(&path, &EnsembleConfig::default()),
            Err(EnsembleError::Json(_))
        ));
    }
}
