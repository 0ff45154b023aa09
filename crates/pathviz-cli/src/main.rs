//! Terminal shortest-path demo.
//!
//! Run: cargo run -- --walls 0.3 --seed 7 --animate
//! Logs go to stderr; set `RUST_LOG=pathviz_paths=debug` for solver output.

mod config;
mod error;
mod layout;
mod render;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pathviz_core::Grid;
use pathviz_paths::{Outcome, Solver, SolverConfig, manhattan, spawn_with_channel};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

use config::CliConfig;
use error::CliError;
use render::Animator;

const EXIT_FOUND: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_NO_PATH: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "pathviz")]
#[command(about = "Animated weighted shortest-path search on a grid")]
#[command(version)]
struct Args {
    /// ASCII map: `.` floor, `#` wall, `S` start, `E` end, `1`-`9` weight
    #[arg(long, conflicts_with_all = ["rows", "cols"])]
    map: Option<PathBuf>,

    /// Rows of the open grid (default 20)
    #[arg(long)]
    rows: Option<i32>,

    /// Columns of the open grid (default 30)
    #[arg(long)]
    cols: Option<i32>,

    /// Scatter random walls with this probability per cell (0.0 - 1.0)
    #[arg(long, value_parser = parse_density)]
    walls: Option<f64>,

    /// Seed for --walls
    #[arg(long, requires = "walls")]
    seed: Option<u64>,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Milliseconds to pause after each finalized cell
    #[arg(long)]
    delay: Option<u64>,

    /// Redraw the grid in place while the search runs
    #[arg(long)]
    animate: bool,
}

fn parse_density(s: &str) -> Result<f64, String> {
    let d: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&d) {
        Ok(d)
    } else {
        Err(format!("{d} is not between 0 and 1"))
    }
}

impl Args {
    /// Fold command-line overrides into the loaded config.
    fn apply(&self, cfg: &mut CliConfig) {
        if let Some(rows) = self.rows {
            cfg.rows = rows;
        }
        if let Some(cols) = self.cols {
            cfg.cols = cols;
        }
        if let Some(ms) = self.delay {
            cfg.solver.step_delay_ms = ms;
        }
        // Pacing only matters when someone is watching.
        if !self.animate {
            cfg.solver = SolverConfig::instant();
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn build_grid(args: &Args, cfg: &CliConfig) -> Result<Grid, CliError> {
    let mut grid = match &args.map {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.clone(),
                source,
            })?;
            Grid::parse(&text)?
        }
        None => layout::open_grid(cfg.rows, cfg.cols)?,
    };
    if let Some(density) = args.walls {
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let added = layout::scatter_walls(&mut grid, density, &mut rng)?;
        log::info!("scattered {added} walls (density {density})");
    }
    Ok(grid)
}

fn run(args: &Args) -> Result<u8, CliError> {
    let mut cfg = match &args.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    args.apply(&mut cfg);
    let grid = build_grid(args, &cfg)?;

    let mut animator = if args.animate {
        Some(Animator::start(&grid)?)
    } else {
        None
    };

    let (handle, rx) = spawn_with_channel(Solver::new(cfg.solver), grid)?;
    let mut steps = 0usize;
    for step in rx.iter() {
        steps += 1;
        if let Some(anim) = animator.as_mut() {
            if let Err(e) = anim.apply(&step) {
                handle.cancel();
                let _ = handle.join();
                return Err(e.into());
            }
        }
    }
    // Leave the alternate screen before printing the result.
    drop(animator);

    let report = handle.join()?;
    log::debug!("received {steps} steps");
    println!("{}", report.grid);
    println!();

    let outcome = report.outcome?;
    let stats = outcome.stats();
    let code = match outcome {
        Outcome::Found { distance, .. } => {
            println!("outcome:  found");
            println!("distance: {distance}");
            if let (Some(s), Some(e)) = (report.grid.start(), report.grid.end()) {
                println!("manhattan: {}", manhattan(s, e));
            }
            EXIT_FOUND
        }
        Outcome::NoPath { .. } => {
            println!("outcome:  no path");
            EXIT_NO_PATH
        }
        Outcome::Cancelled { .. } => {
            println!("outcome:  cancelled");
            EXIT_ERROR
        }
    };
    println!("visited:  {} cells", stats.visited);
    println!("elapsed:  {:?}", stats.elapsed);
    println!("path:     {} cells", report.path.len());
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::try_parse_from(["pathviz", "--rows", "8", "--delay", "40", "--animate"])
            .unwrap();
        let mut cfg = CliConfig::default();
        args.apply(&mut cfg);
        assert_eq!(cfg.rows, 8);
        assert_eq!(cfg.cols, config::DEFAULT_COLS);
        assert_eq!(cfg.solver.step_delay_ms, 40);
    }

    #[test]
    fn without_animation_runs_instantly() {
        let args = Args::try_parse_from(["pathviz", "--delay", "40"]).unwrap();
        let mut cfg = CliConfig::default();
        args.apply(&mut cfg);
        assert_eq!(cfg.solver, SolverConfig::instant());
    }

    #[test]
    fn map_conflicts_with_size() {
        assert!(Args::try_parse_from(["pathviz", "--map", "m.txt", "--rows", "3"]).is_err());
        assert!(Args::try_parse_from(["pathviz", "--seed", "3"]).is_err());
        assert!(Args::try_parse_from(["pathviz", "--walls", "1.5"]).is_err());
    }

    #[test]
    fn seeded_walls_are_reproducible() {
        let args =
            Args::try_parse_from(["pathviz", "--walls", "0.25", "--seed", "42"]).unwrap();
        let cfg = CliConfig::default();
        let a = build_grid(&args, &cfg).unwrap();
        let b = build_grid(&args, &cfg).unwrap();
        assert_eq!(a.to_string(), b.to_string());
        assert_eq!((a.rows(), a.cols()), (20, 30));
    }
}
