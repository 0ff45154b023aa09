use pathviz_core::Pos;
use thiserror::Error;

use crate::solver::SolverState;

/// Why a run's start or end cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    #[error("no start cell is set")]
    MissingStart,
    #[error("no end cell is set")]
    MissingEnd,
    #[error("endpoint {0} is outside the grid")]
    OutOfBounds(Pos),
    #[error("endpoint {0} is a wall")]
    Wall(Pos),
}

/// A run that could not start. Nothing has been mutated.
///
/// Not finding a path is not an error; see [`Outcome`](crate::Outcome).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("invalid endpoints: {0}")]
    InvalidEndpoints(#[from] EndpointError),
    #[error("solver is busy with another run")]
    Busy,
}

/// Errors from [`PathReconstructor::reconstruct`](crate::PathReconstructor::reconstruct).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconstructError {
    #[error("end cell {0} was not reached by the last run")]
    EndNotReached(Pos),
    #[error("position {0} is outside the grid")]
    OutOfBounds(Pos),
    #[error("predecessor chain is longer than {limit} cells; the search state is corrupt")]
    CorruptState { limit: usize },
    #[error("the last run ended as {0:?}, so its distances are not final")]
    NotSolved(SolverState),
}

/// Errors from a background run started with [`spawn_run`](crate::spawn_run).
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Solve(#[from] SolveError),
    #[error(transparent)]
    Reconstruct(#[from] ReconstructError),
    #[error("failed to spawn solver thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("solver thread panicked")]
    Panicked,
}
