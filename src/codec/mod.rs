//! Persistent formats for ensembles.
//!
//! `.ens` is the line-oriented text format that round-trips an `Ensemble`:
//!
//! ```text
//! # comment
//! rho <dc_act>
//! <degree> <mass>
//! ...
//! lam <dv_act>
//! <degree> <mass>
//! ...
//! ```
//!
//! Both sections must appear exactly once, in either order. Masses are
//! written with the shortest representation that parses back to the same
//! `f64`. `.deg` export and the JSON snapshot live in submodules.

pub mod deg;
pub mod json;

use std::fs;
use std::path::{Path, PathBuf};

use crate::ensemble::{DegreeDistribution, Ensemble};
use crate::error::{EnsembleError, Result};
use crate::types::EnsembleConfig;
use crate::{log_error, log_success, log_verbose};

pub use deg::export_deg;
pub use json::{read_json, write_json};

const VAR_SECTION: &str = "lam";
const CHK_SECTION: &str = "rho";

/// Write `ensemble` to a `.ens` file.
///
/// The file appears atomically: readers see either the old file or the
/// complete new one.
pub fn write(ensemble: &Ensemble, path: &Path) -> Result<()> {
    let content = render(ensemble)?;
    match write_atomic(path, &content) {
        Ok(()) => {
            log_success!("Wrote ensemble to {}", path.display());
            Ok(())
        }
        Err(e) => {
            log_error!("Failed to write ensemble to {}: {}", path.display(), e);
            Err(e)
        }
    }
}

/// Read a `.ens` file with the default configuration.
pub fn read(path: &Path) -> Result<Ensemble> {
    read_with(path, &EnsembleConfig::default())
}

/// Read a `.ens` file, validating both distributions with `config`.
pub fn read_with(path: &Path, config: &EnsembleConfig) -> Result<Ensemble> {
    let result = fs::read_to_string(path)
        .map_err(EnsembleError::from)
        .and_then(|content| parse(&content, config));
    match &result {
        Ok(ens) => log_success!(
            "Read ensemble from {} ({} var / {} chk degrees)",
            path.display(),
            ens.active_var_degrees(),
            ens.active_chk_degrees()
        ),
        Err(e) => log_error!("Failed to read ensemble from {}: {}", path.display(), e),
    }
    result
}

/// Render the `.ens` text for a complete ensemble.
pub fn render(ensemble: &Ensemble) -> Result<String> {
    let lam = ensemble
        .lam()
        .ok_or(EnsembleError::UninitializedEnsemble("variable node"))?;
    let rho = ensemble
        .rho()
        .ok_or(EnsembleError::UninitializedEnsemble("check node"))?;

    let mut out = String::new();
    out.push_str("# LDPC ensemble, edge perspective degree distributions\n");
    out.push_str(&format!("# rate {}\n", ensemble.rate()?));
    render_section(&mut out, CHK_SECTION, rho);
    render_section(&mut out, VAR_SECTION, lam);
    Ok(out)
}

fn render_section(out: &mut String, name: &str, dist: &DegreeDistribution) {
    out.push_str(&format!("{} {}\n", name, dist.active_degrees()));
    for (degree, mass) in dist.iter() {
        out.push_str(&format!("{} {:?}\n", degree, mass));
    }
}

#[derive(Default)]
struct Section {
    degrees: Vec<usize>,
    masses: Vec<f64>,
}

/// Parse `.ens` text into an ensemble.
pub fn parse(content: &str, config: &EnsembleConfig) -> Result<Ensemble> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'));

    let mut lam: Option<Section> = None;
    let mut rho: Option<Section> = None;

    while let Some((line_no, line)) = lines.next() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 2 {
            return Err(EnsembleError::format(
                line_no,
                format!("expected '<section> <count>', found {} tokens", tokens.len()),
            ));
        }
        let slot = match tokens[0] {
            VAR_SECTION => &mut lam,
            CHK_SECTION => &mut rho,
            other => {
                return Err(EnsembleError::format(line_no, format!("unknown section '{}'", other)));
            }
        };
        if slot.is_some() {
            return Err(EnsembleError::format(
                line_no,
                format!("duplicate section '{}'", tokens[0]),
            ));
        }
        let count: usize = tokens[1].parse().map_err(|_| {
            EnsembleError::format(line_no, format!("invalid entry count '{}'", tokens[1]))
        })?;

        let mut section = Section::default();
        for _ in 0..count {
            let (entry_no, entry) = lines.next().ok_or_else(|| {
                EnsembleError::format(
                    line_no,
                    format!("section '{}' announces {} entries, file ends early", tokens[0], count),
                )
            })?;
            let (degree, mass) = parse_entry(entry_no, entry)?;
            section.degrees.push(degree);
            section.masses.push(mass);
        }
        log_verbose!("Parsed section '{}' with {} entries", tokens[0], count);
        *slot = Some(section);
    }

    let lam = lam.ok_or_else(|| EnsembleError::format(0, "missing section 'lam'"))?;
    let rho = rho.ok_or_else(|| EnsembleError::format(0, "missing section 'rho'"))?;

    let mut ens = Ensemble::with_config(*config)?;
    ens.set_sparse(&lam.degrees, &lam.masses, &rho.degrees, &rho.masses)?;
    Ok(ens)
}

fn parse_entry(line_no: usize, line: &str) -> Result<(usize, f64)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 2 {
        return Err(EnsembleError::format(
            line_no,
            format!("expected '<degree> <mass>', found {} tokens", tokens.len()),
        ));
    }
    let degree = parse_degree(line_no, tokens[0])?;
    let mass: f64 = tokens[1]
        .parse()
        .map_err(|_| EnsembleError::format(line_no, format!("non-numeric mass '{}'", tokens[1])))?;
    Ok((degree, mass))
}

fn parse_degree(line_no: usize, token: &str) -> Result<usize> {
    if let Ok(degree) = token.parse::<usize>() {
        return Ok(degree);
    }
    // Integral floats such as `3.0` or `1e1` are accepted; other numbers are bad
    // degrees, anything else a bad file.
    let value: f64 = token
        .parse()
        .map_err(|_| EnsembleError::format(line_no, format!("non-numeric degree '{}'", token)))?;
    if value.fract() == 0.0 && value >= 1.0 && value <= u32::MAX as f64 {
        return Ok(value as usize);
    }
    Err(EnsembleError::InvalidDegree(format!(
        "line {}: degree '{}' is not a positive integer",
        line_no, token
    )))
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

/// Write the full content next to `path` and rename it into place.
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let staging = staging_path(path);
    if let Err(e) = fs::write(&staging, content) {
        let _ = fs::remove_file(&staging);
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(e.into());
    }
    Ok(())
}
