//! Marking the shortest path after a successful run.

use std::thread;

use pathviz_core::{Grid, Pos, Step};

use crate::config::SolverConfig;
use crate::error::ReconstructError;
use crate::sink::StepSink;

/// Walks `previous` links back from the end cell and marks the path.
#[derive(Clone, Debug, Default)]
pub struct PathReconstructor {
    config: SolverConfig,
}

impl PathReconstructor {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Mark every cell strictly between the start and `end` on the
    /// predecessor chain with `is_path`, and return them ordered from the
    /// start side to the end side.
    ///
    /// Both endpoints are left unmarked so they keep their own look. The
    /// chain is validated in full before any cell is marked, and a chain
    /// longer than the grid has cells is reported as
    /// [`ReconstructError::CorruptState`].
    ///
    /// One [`Step::Path`] is sent per marked cell, followed by one
    /// [`Step::Redraw`]. The pause between frames falls every
    /// [`SolverConfig::path_stride`] cells.
    ///
    /// The chain is only the shortest path when the last run reached `end`;
    /// [`Solver::reconstruct`](crate::Solver::reconstruct) checks that.
    pub fn reconstruct<S: StepSink + ?Sized>(
        &self,
        grid: &mut Grid,
        end: Pos,
        sink: &mut S,
    ) -> Result<Vec<Pos>, ReconstructError> {
        let end_cell = grid.get(end).ok_or(ReconstructError::OutOfBounds(end))?;
        if !end_cell.is_reached() {
            return Err(ReconstructError::EndNotReached(end));
        }

        // Collect end-side first; the root (no predecessor) is the start.
        let limit = grid.len();
        let mut chain = Vec::new();
        let mut cur = end_cell.previous;
        while let Some(p) = cur {
            let cell = grid.get(p).ok_or(ReconstructError::OutOfBounds(p))?;
            let Some(prev) = cell.previous else {
                break;
            };
            if chain.len() >= limit {
                log::warn!("predecessor chain from {end} exceeds {limit} cells");
                return Err(ReconstructError::CorruptState { limit });
            }
            chain.push(p);
            cur = Some(prev);
        }
        log::debug!("reconstructing path of length {}", chain.len());

        let stride = self.config.path_stride(chain.len());
        let delay = self.config.path_delay();
        for (i, &p) in chain.iter().enumerate() {
            let Some(cell) = grid.get_mut(p) else {
                continue;
            };
            cell.is_path = true;
            // Observers only see snapshots, so every cell is sent; the
            // stride paces the animation.
            sink.step(Step::Path {
                cell: cell.snapshot(),
                marked: i + 1,
            });
            if !delay.is_zero() && (i + 1) % stride == 0 {
                thread::sleep(delay);
            }
        }
        sink.step(Step::Redraw);

        chain.reverse();
        Ok(chain)
    }
}
