//! Animated shortest-path search on pathviz grids.
//!
//! - [`Solver`] runs weighted Dijkstra from a start cell to an end cell,
//!   writing distances and predecessors into the grid and sending a
//!   [`Step`](pathviz_core::Step) for every finalized cell.
//! - [`PathReconstructor`] follows the predecessors back from the end and
//!   marks the shortest path.
//! - [`spawn_run`] does both on a worker thread that owns the grid until it
//!   is joined.
//! - [`has_path`] / [`reachable`] answer connectivity questions without
//!   touching cell state.
//!
//! Entering a cell costs its weight, so a path's cost is the sum of the
//! weights of every cell after the start.

mod config;
mod connectivity;
mod distance;
mod error;
mod frontier;
mod reconstruct;
mod sink;
mod solver;
mod worker;

pub use config::SolverConfig;
pub use connectivity::{has_path, reachable};
pub use distance::manhattan;
pub use error::{EndpointError, ReconstructError, RunError, SolveError};
pub use reconstruct::PathReconstructor;
pub use sink::{FnSink, NullSink, StepSink, from_fn};
pub use solver::{Outcome, RunStats, Solver, SolverState};
pub use worker::{RunHandle, RunReport, spawn_run, spawn_with_channel};
