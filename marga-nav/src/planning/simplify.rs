//! Collapse straight runs of a cell path into corner vertices.

use crate::core::GridCoord;

/// Keep only the cells where the path changes direction.
///
/// Repeated consecutive cells are dropped first. A cell is kept when the
/// primitive direction of the step into it differs from the step out of it;
/// the first and last cells are always kept. Applying this to its own output
/// returns the same sequence.
pub fn simplify(cells: &[GridCoord]) -> Vec<GridCoord> {
    let mut unique: Vec<GridCoord> = Vec::with_capacity(cells.len());
    for &c in cells {
        if unique.last() != Some(&c) {
            unique.push(c);
        }
    }
    if unique.len() <= 2 {
        return unique;
    }

    let mut kept = Vec::with_capacity(unique.len());
    kept.push(unique[0]);
    for w in unique.windows(3) {
        let dir_in = (w[1] - w[0]).direction();
        let dir_out = (w[2] - w[1]).direction();
        if dir_in != dir_out {
            kept.push(w[1]);
        }
    }
    kept.push(unique[unique.len() - 1]);
    kept
}
