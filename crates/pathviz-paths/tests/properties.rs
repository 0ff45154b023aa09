// Property-based tests for the solver and path reconstruction.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use std::collections::HashSet;

use pathviz_core::{Grid, Pos, UNREACHABLE};
use pathviz_paths::{
    NullSink, Outcome, PathReconstructor, Solver, SolverConfig, manhattan, reachable,
};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

fn solver() -> Solver {
    Solver::new(SolverConfig::instant())
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// One cell's structure: `None` is a wall, `Some(w)` a floor of weight `w`.
fn arb_cell() -> impl Strategy<Value = Option<u32>> {
    prop_oneof![
        1 => Just(None),
        3 => (1u32..=9).prop_map(Some),
    ]
}

#[derive(Debug, Clone)]
struct Layout {
    rows: i32,
    cols: i32,
    cells: Vec<Option<u32>>,
    start: Pos,
    end: Pos,
}

fn arb_layout() -> impl Strategy<Value = Layout> {
    (1i32..=7, 1i32..=7).prop_flat_map(|(rows, cols)| {
        let n = (rows * cols) as usize;
        (
            prop::collection::vec(arb_cell(), n),
            0..rows,
            0..cols,
            0..rows,
            0..cols,
        )
            .prop_map(move |(cells, sr, sc, er, ec)| Layout {
                rows,
                cols,
                cells,
                start: Pos::new(sr, sc),
                end: Pos::new(er, ec),
            })
    })
}

fn build(layout: &Layout) -> Grid {
    let mut g = Grid::new(layout.rows, layout.cols).unwrap();
    for (i, spec) in layout.cells.iter().enumerate() {
        let p = Pos::new(i as i32 / layout.cols, i as i32 % layout.cols);
        match spec {
            None => g.set_wall(p, true).unwrap(),
            Some(w) => g.set_weight(p, *w).unwrap(),
        }
    }
    g.set_wall(layout.start, false).unwrap();
    g.set_wall(layout.end, false).unwrap();
    g.move_start(layout.start).unwrap();
    g.move_end(layout.end).unwrap();
    g
}

/// Reference distances by repeated relaxation (Bellman-Ford style).
fn reference_distances(g: &Grid, start: Pos) -> Vec<u64> {
    let mut dist = vec![UNREACHABLE; g.len()];
    dist[g.index(start).unwrap()] = 0;
    loop {
        let mut changed = false;
        for cell in g.iter() {
            let ci = g.index(cell.pos()).unwrap();
            if cell.is_wall() || dist[ci] == UNREACHABLE {
                continue;
            }
            for np in g.neighbors(cell.pos()) {
                let n = g.get(np).unwrap();
                if n.is_wall() {
                    continue;
                }
                let ni = g.index(np).unwrap();
                let cand = dist[ci] + u64::from(n.weight());
                if cand < dist[ni] {
                    dist[ni] = cand;
                    changed = true;
                }
            }
        }
        if !changed {
            return dist;
        }
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn distances_are_optimal(layout in arb_layout()) {
        let mut g = build(&layout);
        let reference = reference_distances(&g, layout.start);
        let out = solver().run(&mut g, &mut NullSink).unwrap();

        let expected = reference[g.index(layout.end).unwrap()];
        match out {
            Outcome::Found { distance, .. } => prop_assert_eq!(distance, expected),
            Outcome::NoPath { .. } => prop_assert_eq!(expected, UNREACHABLE),
            Outcome::Cancelled { .. } => prop_assert!(false, "nobody cancelled"),
        }

        for cell in g.iter() {
            let truth = reference[g.index(cell.pos()).unwrap()];
            // Never below the true cost.
            prop_assert!(cell.distance >= truth, "{} below {}", cell, truth);
            // Finalized cells carry exactly the true cost.
            if cell.is_visited || cell.is_start() {
                prop_assert_eq!(cell.distance, truth);
            }
        }
    }

    #[test]
    fn open_uniform_grid_is_manhattan(
        rows in 1i32..=8,
        cols in 1i32..=8,
        w in 1u32..=9,
        seed in any::<(u16, u16, u16, u16)>(),
    ) {
        let mut g = Grid::new(rows, cols).unwrap();
        for i in 0..rows * cols {
            g.set_weight(Pos::new(i / cols, i % cols), w).unwrap();
        }
        let s = Pos::new(i32::from(seed.0) % rows, i32::from(seed.1) % cols);
        let e = Pos::new(i32::from(seed.2) % rows, i32::from(seed.3) % cols);
        let out = solver().run_between(&mut g, s, e, &mut NullSink).unwrap();
        prop_assert_eq!(out.distance(), Some(manhattan(s, e) * u64::from(w)));
    }

    #[test]
    fn path_is_the_predecessor_chain(layout in arb_layout()) {
        let mut g = build(&layout);
        let out = solver().run(&mut g, &mut NullSink).unwrap();
        prop_assume!(out.is_found());
        let distance = out.distance().unwrap();

        let path = PathReconstructor::new(SolverConfig::instant())
            .reconstruct(&mut g, layout.end, &mut NullSink)
            .unwrap();

        // Marked cells are exactly the returned path.
        let marked: HashSet<Pos> = g.iter().filter(|c| c.is_path).map(|c| c.pos()).collect();
        let returned: HashSet<Pos> = path.iter().copied().collect();
        prop_assert_eq!(&marked, &returned);
        prop_assert!(!marked.contains(&layout.start));
        prop_assert!(!marked.contains(&layout.end));

        // Consecutive cells are neighbours, from start to end.
        let mut full = vec![layout.start];
        if layout.start != layout.end {
            full.extend(path.iter().copied());
            full.push(layout.end);
        }
        for pair in full.windows(2) {
            prop_assert_eq!(manhattan(pair[0], pair[1]), 1);
        }

        // Entering each cell after the start adds up to the total cost.
        let cost: u64 = full
            .iter()
            .skip(1)
            .map(|p| u64::from(g.get(*p).unwrap().weight()))
            .sum();
        prop_assert_eq!(cost, distance);
    }

    #[test]
    fn search_stays_in_start_component(layout in arb_layout()) {
        let mut g = build(&layout);
        let component: HashSet<Pos> = reachable(&g, layout.start).into_iter().collect();
        solver().run(&mut g, &mut NullSink).unwrap();
        for cell in g.iter() {
            if cell.is_visited || cell.is_reached() {
                prop_assert!(component.contains(&cell.pos()), "{} escaped", cell);
            }
        }
    }

    #[test]
    fn rerun_after_reset_is_identical(layout in arb_layout()) {
        let mut g = build(&layout);
        let s = solver();
        let mut first_steps = Vec::new();
        let first = s.run(&mut g, &mut first_steps).unwrap();
        let first_cells: Vec<_> = g.iter().map(|c| c.snapshot()).collect();

        g.reset_search();
        let mut second_steps = Vec::new();
        let second = s.run(&mut g, &mut second_steps).unwrap();
        let second_cells: Vec<_> = g.iter().map(|c| c.snapshot()).collect();

        prop_assert_eq!(first.distance(), second.distance());
        prop_assert_eq!(first_steps, second_steps);
        prop_assert_eq!(first_cells, second_cells);
    }

    #[test]
    fn reset_preserves_structure(layout in arb_layout()) {
        let mut g = build(&layout);
        let structure = |g: &Grid| -> Vec<(Pos, u32, bool, bool, bool)> {
            g.iter()
                .map(|c| (c.pos(), c.weight(), c.is_wall(), c.is_start(), c.is_end()))
                .collect()
        };
        let before = structure(&g);
        solver().run(&mut g, &mut NullSink).unwrap();
        g.reset_search();
        let once: Vec<_> = g.iter().map(|c| c.snapshot()).collect();
        g.reset_search();
        let twice: Vec<_> = g.iter().map(|c| c.snapshot()).collect();

        prop_assert_eq!(structure(&g), before);
        prop_assert_eq!(once, twice);
        prop_assert!(g.iter().all(|c| !c.is_reached() && c.previous.is_none()));
    }

    #[test]
    fn start_and_end_have_single_holders(
        moves in prop::collection::vec((any::<bool>(), 0i32..4, 0i32..4), 1..20),
    ) {
        let mut g = Grid::new(4, 4).unwrap();
        for (is_start, r, c) in moves {
            let p = Pos::new(r, c);
            let prev_holder = if is_start { g.start() } else { g.end() };
            let returned = if is_start { g.move_start(p) } else { g.move_end(p) };
            prop_assert_eq!(returned, Ok(prev_holder));

            let starts: Vec<Pos> = g.iter().filter(|c| c.is_start()).map(|c| c.pos()).collect();
            let ends: Vec<Pos> = g.iter().filter(|c| c.is_end()).map(|c| c.pos()).collect();
            prop_assert!(starts.len() <= 1 && ends.len() <= 1);
            prop_assert_eq!(starts.first().copied(), g.start());
            prop_assert_eq!(ends.first().copied(), g.end());
        }
    }
}
