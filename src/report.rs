//! Console report formatting

use std::fmt;

use crate::geometry::Codebook;
use crate::optim::{HistoryEntry, Solution};

/// Codebook indices of `phases` laid out row-major as `rows x cols`
pub fn phase_index_grid(phases: &[f64], codebook: &Codebook, shape: (usize, usize)) -> Vec<Vec<usize>> {
    let (_, cols) = shape;
    codebook
        .indices(phases)
        .chunks(cols.max(1))
        .map(|row| row.to_vec())
        .collect()
}

/// Final result summary
pub struct ResultReport<'a> {
    pub title: &'a str,
    pub solution: &'a Solution,
    pub codebook: &'a Codebook,
    pub shape: (usize, usize),
}

impl fmt::Display for ResultReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.shape;
        writeln!(f, "=== {} ===", self.title)?;
        writeln!(f, "Best min-rate: {:.3} Mb/s", self.solution.min_rate_bps / 1e6)?;
        writeln!(
            f,
            "Best FAS position: x={:.3}, y={:.3}",
            self.solution.antenna.x, self.solution.antenna.y
        )?;
        writeln!(f, "RIS phase indices (row-major {}x{}):", rows, cols)?;
        for row in phase_index_grid(&self.solution.phases, self.codebook, self.shape) {
            let cells: Vec<String> = row.iter().map(|i| i.to_string()).collect();
            writeln!(f, "[{}]", cells.join(" "))?;
        }
        Ok(())
    }
}

/// Per-iteration history table
pub struct HistoryTable<'a>(pub &'a [HistoryEntry]);

impl fmt::Display for HistoryTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>4}  {:>14}  {:>14}  {:>8}  {:>8}", "iter", "min-rate Mb/s", "best Mb/s", "x", "y")?;
        for h in self.0 {
            writeln!(
                f,
                "{:>4}  {:>14.3}  {:>14.3}  {:>8.3}  {:>8.3}",
                h.iteration,
                h.min_rate_bps / 1e6,
                h.best_so_far / 1e6,
                h.antenna.x,
                h.antenna.y
            )?;
        }
        Ok(())
    }
}
