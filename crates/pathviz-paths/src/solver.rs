//! Weighted Dijkstra search with step notifications.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use pathviz_core::{Grid, Pos, Step};

use crate::config::SolverConfig;
use crate::error::{EndpointError, ReconstructError, SolveError};
use crate::frontier::Frontier;
use crate::reconstruct::PathReconstructor;
use crate::sink::StepSink;

// ---------------------------------------------------------------------------
// State / Outcome
// ---------------------------------------------------------------------------

/// Lifecycle of a [`Solver`]. Any terminal state may start a new run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverState {
    Idle,
    Running,
    Succeeded,
    Failed,
    Cancelled,
}

impl SolverState {
    const fn to_u8(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Running => 1,
            Self::Succeeded => 2,
            Self::Failed => 3,
            Self::Cancelled => 4,
        }
    }

    const fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::Running,
            2 => Self::Succeeded,
            3 => Self::Failed,
            4 => Self::Cancelled,
            _ => Self::Idle,
        }
    }
}

/// Counters for one run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Cells finalized (popped and closed), endpoints included.
    pub visited: usize,
    pub elapsed: Duration,
}

/// Result of a run that got past validation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The end was reached; `distance` is the total shortest-path cost.
    Found { distance: u64, stats: RunStats },
    /// The frontier ran dry before reaching the end.
    NoPath { stats: RunStats },
    /// [`Solver::cancel`] was called mid-run.
    Cancelled { stats: RunStats },
}

impl Outcome {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Outcome::Found { .. })
    }

    /// Total cost, if a path was found.
    pub fn distance(&self) -> Option<u64> {
        match *self {
            Outcome::Found { distance, .. } => Some(distance),
            _ => None,
        }
    }

    pub fn stats(&self) -> RunStats {
        match *self {
            Outcome::Found { stats, .. }
            | Outcome::NoPath { stats }
            | Outcome::Cancelled { stats } => stats,
        }
    }

    /// The terminal solver state this outcome corresponds to.
    pub fn state(&self) -> SolverState {
        match self {
            Outcome::Found { .. } => SolverState::Succeeded,
            Outcome::NoPath { .. } => SolverState::Failed,
            Outcome::Cancelled { .. } => SolverState::Cancelled,
        }
    }
}

// ---------------------------------------------------------------------------
// Solver
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Shared {
    state: AtomicU8,
    cancel: AtomicBool,
}

/// Marks the solver as running for its lifetime and publishes the terminal
/// state on drop, including on unwind.
///
/// Owns its share of the solver state so it can be taken on one thread and
/// released on another.
#[derive(Debug)]
pub(crate) struct RunGuard {
    shared: Arc<Shared>,
    terminal: SolverState,
}

impl RunGuard {
    /// Claim the solver and clear any stale cancel request. Cancels issued
    /// after this returns are kept.
    fn acquire(shared: &Arc<Shared>) -> Result<Self, SolveError> {
        let running = SolverState::Running.to_u8();
        shared
            .state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |s| {
                (s != running).then_some(running)
            })
            .map_err(|_| SolveError::Busy)?;
        shared.cancel.store(false, Ordering::Release);
        Ok(Self {
            shared: Arc::clone(shared),
            terminal: SolverState::Failed,
        })
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.shared
            .state
            .store(self.terminal.to_u8(), Ordering::Release);
    }
}

/// Runs Dijkstra over a [`Grid`], one run at a time.
///
/// Clones share state: one clone can run on a worker thread while another
/// watches [`state`](Solver::state) or calls [`cancel`](Solver::cancel).
/// Starting a second run while one is active fails with
/// [`SolveError::Busy`].
#[derive(Clone, Debug)]
pub struct Solver {
    config: SolverConfig,
    shared: Arc<Shared>,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            shared: Arc::new(Shared {
                state: AtomicU8::new(SolverState::Idle.to_u8()),
                cancel: AtomicBool::new(false),
            }),
        }
    }

    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// A reconstructor using the same pacing.
    pub fn reconstructor(&self) -> PathReconstructor {
        PathReconstructor::new(self.config.clone())
    }

    /// Mark the path to `end` found by this solver's last run.
    ///
    /// Only a [`Succeeded`](SolverState::Succeeded) run leaves the end
    /// finalized; after a cancelled or failed run its distance may be a
    /// tentative one, so this returns [`ReconstructError::NotSolved`].
    pub fn reconstruct<S: StepSink + ?Sized>(
        &self,
        grid: &mut Grid,
        end: Pos,
        sink: &mut S,
    ) -> Result<Vec<Pos>, ReconstructError> {
        match self.state() {
            SolverState::Succeeded => self.reconstructor().reconstruct(grid, end, sink),
            other => Err(ReconstructError::NotSolved(other)),
        }
    }

    #[inline]
    pub fn state(&self) -> SolverState {
        SolverState::from_u8(self.shared.state.load(Ordering::Acquire))
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state() == SolverState::Running
    }

    /// Ask the active run to stop at its next step. No effect when idle; a
    /// new run clears any pending request.
    pub fn cancel(&self) {
        self.shared.cancel.store(true, Ordering::Release);
    }

    #[inline]
    fn cancel_requested(&self) -> bool {
        self.shared.cancel.load(Ordering::Acquire)
    }

    /// Search from the grid's start cell to its end cell.
    pub fn run<S: StepSink + ?Sized>(
        &self,
        grid: &mut Grid,
        sink: &mut S,
    ) -> Result<Outcome, SolveError> {
        self.run_with(grid, grid_endpoints, sink)
    }

    /// Search from `start` to `end`, which need not carry the start/end
    /// flags.
    pub fn run_between<S: StepSink + ?Sized>(
        &self,
        grid: &mut Grid,
        start: Pos,
        end: Pos,
        sink: &mut S,
    ) -> Result<Outcome, SolveError> {
        self.run_with(grid, |_| Ok((start, end)), sink)
    }

    fn run_with<S, F>(
        &self,
        grid: &mut Grid,
        endpoints: F,
        sink: &mut S,
    ) -> Result<Outcome, SolveError>
    where
        S: StepSink + ?Sized,
        F: FnOnce(&Grid) -> Result<(Pos, Pos), EndpointError>,
    {
        let guard = self.acquire()?;
        self.run_acquired(guard, grid, endpoints, sink)
    }

    /// Claim the solver for a run that will start later, possibly on
    /// another thread.
    pub(crate) fn acquire(&self) -> Result<RunGuard, SolveError> {
        RunGuard::acquire(&self.shared).inspect_err(|_| {
            log::debug!("rejecting run: solver busy");
        })
    }

    /// Search from the grid's start to its end under an already held guard.
    pub(crate) fn run_held<S: StepSink + ?Sized>(
        &self,
        guard: RunGuard,
        grid: &mut Grid,
        sink: &mut S,
    ) -> Result<Outcome, SolveError> {
        self.run_acquired(guard, grid, grid_endpoints, sink)
    }

    /// Endpoints are resolved and validated before anything is touched.
    /// After that every cell's search state is reset, `start.distance` is
    /// set to 0 and the search proceeds. Reaching the end, exhausting the
    /// frontier and being cancelled are all `Ok` outcomes.
    fn run_acquired<S, F>(
        &self,
        mut guard: RunGuard,
        grid: &mut Grid,
        endpoints: F,
        sink: &mut S,
    ) -> Result<Outcome, SolveError>
    where
        S: StepSink + ?Sized,
        F: FnOnce(&Grid) -> Result<(Pos, Pos), EndpointError>,
    {
        debug_assert!(Arc::ptr_eq(&guard.shared, &self.shared));
        let (start, end) = endpoints(grid)?;
        validate(grid, start, end)?;

        log::info!(
            "solving {start} -> {end} on a {}x{} grid",
            grid.rows(),
            grid.cols()
        );
        let outcome = self.search(grid, start, end, sink);
        match outcome {
            Outcome::Found { distance, stats } => log::info!(
                "path found: cost {distance}, visited {} cells in {:?}",
                stats.visited,
                stats.elapsed
            ),
            Outcome::NoPath { stats } => log::info!(
                "no path: visited {} cells in {:?}",
                stats.visited,
                stats.elapsed
            ),
            Outcome::Cancelled { stats } => {
                log::info!("run cancelled after {} cells", stats.visited)
            }
        }
        guard.terminal = outcome.state();
        Ok(outcome)
    }

    fn search<S: StepSink + ?Sized>(
        &self,
        grid: &mut Grid,
        start: Pos,
        end: Pos,
        sink: &mut S,
    ) -> Outcome {
        let started = Instant::now();
        let delay = self.config.step_delay();
        let stats = |visited| RunStats {
            visited,
            elapsed: started.elapsed(),
        };

        grid.reset_search();
        let mut closed = vec![false; grid.len()];
        let mut frontier = Frontier::with_capacity(grid.len());
        let mut nbuf = Vec::with_capacity(4);
        let mut visited = 0;

        if let Some(cell) = grid.get_mut(start) {
            cell.distance = 0;
        }
        frontier.push(start, 0);

        while let Some(entry) = frontier.pop() {
            let Some(ci) = grid.index(entry.pos) else {
                continue;
            };
            // Stale duplicate of an already finalized cell.
            if closed[ci] {
                continue;
            }

            if entry.pos == end {
                visited += 1;
                return Outcome::Found {
                    distance: entry.distance,
                    stats: stats(visited),
                };
            }

            closed[ci] = true;
            visited += 1;

            let Some(cell) = grid.get_mut(entry.pos) else {
                continue;
            };
            debug_assert_eq!(cell.distance, entry.distance);
            let current_distance = cell.distance;
            if !cell.is_start() && !cell.is_end() {
                cell.is_visited = true;
            }
            cell.is_current = true;
            sink.step(Step::Visit(cell.snapshot()));
            if !delay.is_zero() {
                thread::sleep(delay);
            }
            cell.is_current = false;
            log::trace!(
                "closed {} at {current_distance}, frontier {}",
                entry.pos,
                frontier.len()
            );

            if self.cancel_requested() {
                return Outcome::Cancelled {
                    stats: stats(visited),
                };
            }

            nbuf.clear();
            grid.neighbors_into(entry.pos, &mut nbuf);
            for &np in nbuf.iter() {
                let Some(ni) = grid.index(np) else {
                    continue;
                };
                if closed[ni] {
                    continue;
                }
                let Some(n) = grid.get_mut(np) else {
                    continue;
                };
                if n.is_wall() {
                    continue;
                }
                // Entering a cell costs its weight.
                let tentative = current_distance.saturating_add(u64::from(n.weight()));
                if tentative < n.distance {
                    n.distance = tentative;
                    n.previous = Some(entry.pos);
                    frontier.push(np, tentative);
                }
            }
        }

        Outcome::NoPath {
            stats: stats(visited),
        }
    }
}

fn grid_endpoints(grid: &Grid) -> Result<(Pos, Pos), EndpointError> {
    let start = grid.start().ok_or(EndpointError::MissingStart)?;
    let end = grid.end().ok_or(EndpointError::MissingEnd)?;
    Ok((start, end))
}

fn validate(grid: &Grid, start: Pos, end: Pos) -> Result<(), EndpointError> {
    for p in [start, end] {
        let cell = grid.get(p).ok_or(EndpointError::OutOfBounds(p))?;
        if cell.is_wall() {
            return Err(EndpointError::Wall(p));
        }
    }
    Ok(())
}
