//! Quick reachability checks that leave cell state untouched.

use std::collections::VecDeque;

use pathviz_core::{Grid, Pos};

/// All non-wall positions reachable from `from` by cardinal moves, in BFS
/// order. Empty if `from` is out of bounds or a wall.
pub fn reachable(grid: &Grid, from: Pos) -> Vec<Pos> {
    let mut result = Vec::new();
    let Some(si) = grid.index(from) else {
        return result;
    };
    if grid.get(from).is_some_and(|c| c.is_wall()) {
        return result;
    }

    let mut seen = vec![false; grid.len()];
    let mut queue = VecDeque::new();
    seen[si] = true;
    queue.push_back(from);

    while let Some(p) = queue.pop_front() {
        result.push(p);
        for np in grid.neighbors(p) {
            let Some(ni) = grid.index(np) else {
                continue;
            };
            if seen[ni] || grid.get(np).is_some_and(|c| c.is_wall()) {
                continue;
            }
            seen[ni] = true;
            queue.push_back(np);
        }
    }
    result
}

/// Whether `end` can be reached from `start` at all, ignoring weights.
///
/// Unlike [`Solver::run`](crate::Solver::run) this sends no steps and does
/// not touch distances or flags.
pub fn has_path(grid: &Grid, start: Pos, end: Pos) -> bool {
    let passable = |p: Pos| grid.get(p).is_some_and(|c| !c.is_wall());
    if !passable(start) || !passable(end) {
        return false;
    }
    reachable(grid, start).contains(&end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_grid_is_connected() {
        let g = Grid::parse("S..\n...\n..E").unwrap();
        assert!(has_path(&g, Pos::new(0, 0), Pos::new(2, 2)));
        assert_eq!(reachable(&g, Pos::new(1, 1)).len(), 9);
    }

    #[test]
    fn wall_splits_components() {
        let g = Grid::parse("S.#..\n..#.E").unwrap();
        assert!(!has_path(&g, Pos::new(0, 0), Pos::new(1, 4)));
        let mut left = reachable(&g, Pos::new(0, 0));
        left.sort();
        assert_eq!(
            left,
            vec![Pos::new(0, 0), Pos::new(0, 1), Pos::new(1, 0), Pos::new(1, 1)]
        );
    }

    #[test]
    fn walls_and_out_of_bounds() {
        let g = Grid::parse("S#E").unwrap();
        assert!(!has_path(&g, Pos::new(0, 1), Pos::new(0, 2)));
        assert!(!has_path(&g, Pos::new(0, 0), Pos::new(0, 9)));
        assert!(reachable(&g, Pos::new(0, 1)).is_empty());
        assert!(reachable(&g, Pos::new(-1, 0)).is_empty());
        assert!(has_path(&g, Pos::new(0, 2), Pos::new(0, 2)));
    }

    #[test]
    fn leaves_search_state_alone() {
        let g = Grid::parse("S.E").unwrap();
        assert!(has_path(&g, Pos::new(0, 0), Pos::new(0, 2)));
        assert!(g.iter().all(|c| !c.is_reached() && !c.is_visited));
    }
}
