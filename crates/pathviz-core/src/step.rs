//! Step notifications sent from a running search to whoever draws it.

use crate::cell::CellSnapshot;

/// One notification from the solver or path reconstructor.
///
/// Steps carry copies, never references into the grid, so they can cross
/// to a UI thread while the worker keeps mutating cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Step {
    /// A cell was finalized. The snapshot is taken while it is marked
    /// current.
    Visit(CellSnapshot),
    /// A cell was marked as part of the shortest path. `marked` counts the
    /// path cells marked so far. Sent at a throttled cadence.
    Path { cell: CellSnapshot, marked: usize },
    /// Reconstruction finished; everything should be redrawn.
    Redraw,
}

impl Step {
    /// The snapshot carried by this step, if any.
    pub fn cell(&self) -> Option<&CellSnapshot> {
        match self {
            Step::Visit(c) | Step::Path { cell: c, .. } => Some(c),
            Step::Redraw => None,
        }
    }
}
