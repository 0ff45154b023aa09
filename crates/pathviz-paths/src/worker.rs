//! Running a search on a dedicated thread.
//!
//! The grid is moved into the worker for the duration of the run and handed
//! back by [`RunHandle::join`], so the caller cannot edit it mid-run. Steps
//! flow one way, from the worker to the caller's [`StepSink`].

use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use pathviz_core::{Grid, Pos, Step};

use crate::error::RunError;
use crate::sink::StepSink;
use crate::solver::{Outcome, RunGuard, Solver, SolverState};

/// Everything a finished background run hands back.
#[derive(Debug)]
pub struct RunReport {
    /// The grid, with the search state of the run still on it.
    pub grid: Grid,
    pub outcome: Result<Outcome, RunError>,
    /// Cells marked as path, start side first. Empty unless a path was found.
    pub path: Vec<Pos>,
}

/// Handle to a run started by [`spawn_run`].
#[derive(Debug)]
pub struct RunHandle {
    solver: Solver,
    thread: JoinHandle<RunReport>,
}

impl RunHandle {
    /// The solver doing the work. Shares state with the worker's copy.
    pub fn solver(&self) -> &Solver {
        &self.solver
    }

    pub fn state(&self) -> SolverState {
        self.solver.state()
    }

    /// Ask the worker to stop at its next step.
    pub fn cancel(&self) {
        self.solver.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the worker and take the grid back.
    pub fn join(self) -> Result<RunReport, RunError> {
        self.thread.join().map_err(|_| RunError::Panicked)
    }
}

/// Solve `grid` from its start to its end on a new thread, then mark the
/// path if one was found. Steps go to `sink`.
///
/// The solver is claimed before this returns, so a busy solver is reported
/// here and a [`RunHandle::cancel`] issued right away is never lost.
pub fn spawn_run<S>(solver: Solver, grid: Grid, sink: S) -> Result<RunHandle, RunError>
where
    S: StepSink + Send + 'static,
{
    let guard = solver.acquire()?;
    let worker = solver.clone();
    let thread = thread::Builder::new()
        .name("pathviz-solver".into())
        .spawn(move || run_to_completion(&worker, guard, grid, sink))?;
    Ok(RunHandle { solver, thread })
}

/// [`spawn_run`] with an unbounded channel as the sink. The receiver is
/// meant for the UI thread; it sees the last step before `join` returns.
pub fn spawn_with_channel(
    solver: Solver,
    grid: Grid,
) -> Result<(RunHandle, Receiver<Step>), RunError> {
    let (tx, rx) = mpsc::channel();
    let handle = spawn_run(solver, grid, tx)?;
    Ok((handle, rx))
}

fn run_to_completion<S: StepSink>(
    solver: &Solver,
    guard: RunGuard,
    mut grid: Grid,
    mut sink: S,
) -> RunReport {
    let mut path = Vec::new();
    let outcome = match solver.run_held(guard, &mut grid, &mut sink) {
        Ok(outcome) if outcome.is_found() => match grid.end() {
            Some(end) => solver
                .reconstructor()
                .reconstruct(&mut grid, end, &mut sink)
                .map(|p| {
                    path = p;
                    outcome
                })
                .map_err(RunError::from),
            None => Ok(outcome),
        },
        other => other.map_err(RunError::from),
    };
    if let Err(e) = &outcome {
        log::warn!("background run failed: {e}");
    }
    RunReport {
        grid,
        outcome,
        path,
    }
}
