//! Building the grid the CLI solves.

use pathviz_core::{Grid, GridError, Pos};
use rand::Rng;

/// Default endpoints for an open `rows × cols` grid: middle row, one sixth
/// in from either side. On a 20 × 30 grid that is (10, 5) and (10, 25).
pub fn default_endpoints(rows: i32, cols: i32) -> (Pos, Pos) {
    let row = rows / 2;
    let start = Pos::new(row, cols / 6);
    let end = Pos::new(row, (cols * 5 / 6).min(cols - 1));
    (start, end)
}

/// An open grid with the default endpoints.
pub fn open_grid(rows: i32, cols: i32) -> Result<Grid, GridError> {
    let mut grid = Grid::new(rows, cols)?;
    let (start, end) = default_endpoints(rows, cols);
    grid.move_start(start)?;
    grid.move_end(end)?;
    Ok(grid)
}

/// Turn each floor cell into a wall with probability `density`. Start and end
/// are left alone. Returns the number of walls added.
pub fn scatter_walls<R: Rng>(
    grid: &mut Grid,
    density: f64,
    rng: &mut R,
) -> Result<usize, GridError> {
    let density = density.clamp(0.0, 1.0);
    let candidates: Vec<Pos> = grid
        .iter()
        .filter(|c| !c.is_start() && !c.is_end() && !c.is_wall())
        .map(|c| c.pos())
        .collect();
    let mut added = 0;
    for p in candidates {
        if rng.random_bool(density) {
            grid.set_wall(p, true)?;
            added += 1;
        }
    }
    Ok(added)
}
