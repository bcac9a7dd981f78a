//! `.deg` degree-sequence export for external graph construction (e.g. PEG).
//!
//! ```text
//! # degree sequence: n=<n> variable nodes, m=<m> check nodes
//! var <dv_act> <n>
//! <degree> <node count>
//! chk <dc_act> <m>
//! <degree> <node count>
//! ```
//!
//! There is no reader for this format.

use std::path::Path;

use crate::codec::write_atomic;
use crate::ensemble::Ensemble;
use crate::error::Result;
use crate::types::{DegreeCount, NodeCounts};
use crate::{log_error, log_success};

/// Write the node-count degree sequence of `ensemble` for `block_length` variable nodes.
pub fn export_deg(ensemble: &Ensemble, block_length: usize, path: &Path) -> Result<NodeCounts> {
    let counts = ensemble.node_counts(block_length)?;
    let content = render_deg(&counts);
    if let Err(e) = write_atomic(path, &content) {
        log_error!("Failed to export degree sequence to {}: {}", path.display(), e);
        return Err(e);
    }
    log_success!(
        "Exported degree sequence to {} (n={}, m={})",
        path.display(),
        counts.var_nodes,
        counts.chk_nodes
    );
    Ok(counts)
}

/// Render `.deg` text from node counts.
pub fn render_deg(counts: &NodeCounts) -> String {
    let mut out = format!(
        "# degree sequence: n={} variable nodes, m={} check nodes\n",
        counts.var_nodes, counts.chk_nodes
    );
    render_side(&mut out, "var", counts.var_nodes, &counts.var);
    render_side(&mut out, "chk", counts.chk_nodes, &counts.chk);
    out
}

fn render_side(out: &mut String, name: &str, total: usize, entries: &[DegreeCount]) {
    out.push_str(&format!("{} {} {}\n", name, entries.len(), total));
    for entry in entries {
        out.push_str(&format!("{} {}\n", entry.degree, entry.count));
    }
}
