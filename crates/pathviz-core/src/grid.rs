//! The [`Grid`] type: a fixed-size, row-major 2D array of [`Cell`]s.
//!
//! The grid owns its cells. Structural edits (walls, weights, start/end) go
//! through the methods here so that weight stays positive and the start and
//! end flags each have at most one holder.

use std::fmt;

use crate::cell::Cell;
use crate::error::GridError;
use crate::geom::Pos;

/// A rectangular grid of [`Cell`]s.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Cell>,
    rows: i32,
    cols: i32,
    start: Option<Pos>,
    end: Option<Pos>,
}

impl Grid {
    /// Create a `rows × cols` grid of default cells.
    pub fn new(rows: i32, cols: i32) -> Result<Self, GridError> {
        if rows <= 0 || cols <= 0 {
            return Err(GridError::EmptyGrid { rows, cols });
        }
        let mut cells = Vec::with_capacity(rows as usize * cols as usize);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Cell::new(Pos::new(row, col)));
            }
        }
        Ok(Self {
            cells,
            rows,
            cols,
            start: None,
            end: None,
        })
    }

    /// Build a grid from an ASCII map.
    ///
    /// `.` floor, `#` wall, `S` start, `E` end, `1`-`9` a floor cell of that
    /// weight. Blank lines and trailing whitespace are ignored; every other
    /// line must have the same width.
    pub fn parse(map: &str) -> Result<Self, GridError> {
        let lines: Vec<(usize, &str)> = map
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim_end()))
            .filter(|(_, l)| !l.is_empty())
            .collect();
        let width = lines.first().map_or(0, |(_, l)| l.chars().count());
        let mut grid = Grid::new(lines.len() as i32, width as i32)?;

        for (row, &(line, text)) in lines.iter().enumerate() {
            if text.chars().count() != width {
                return Err(GridError::RaggedMap { line });
            }
            for (col, ch) in text.chars().enumerate() {
                let p = Pos::new(row as i32, col as i32);
                match ch {
                    '.' => {}
                    '#' => grid.set_wall(p, true)?,
                    'S' => {
                        if grid.move_start(p)?.is_some() {
                            return Err(GridError::DuplicateMarker('S'));
                        }
                    }
                    'E' => {
                        if grid.move_end(p)?.is_some() {
                            return Err(GridError::DuplicateMarker('E'));
                        }
                    }
                    '1'..='9' => grid.set_weight(p, ch as u32 - '0' as u32)?,
                    _ => {
                        return Err(GridError::Parse {
                            line,
                            col: col + 1,
                            ch,
                        });
                    }
                }
            }
        }
        Ok(grid)
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: construction rejects empty grids.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        p.row >= 0 && p.row < self.rows && p.col >= 0 && p.col < self.cols
    }

    /// Flat index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, p: Pos) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.row as usize * self.cols as usize + p.col as usize)
    }

    #[inline]
    pub fn get(&self, p: Pos) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    #[inline]
    pub fn get_mut(&mut self, p: Pos) -> Option<&mut Cell> {
        self.index(p).map(move |i| &mut self.cells[i])
    }

    /// Like [`get`](Grid::get) but reports out-of-bounds as an error.
    pub fn cell(&self, p: Pos) -> Result<&Cell, GridError> {
        self.get(p).ok_or(GridError::OutOfBounds(p))
    }

    /// Like [`get_mut`](Grid::get_mut) but reports out-of-bounds as an error.
    pub fn cell_mut(&mut self, p: Pos) -> Result<&mut Cell, GridError> {
        self.get_mut(p).ok_or(GridError::OutOfBounds(p))
    }

    /// Row-major iterator over all cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Row-major mutable iterator over all cells.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Cell> {
        self.cells.iter_mut()
    }

    /// In-bounds cardinal neighbours of `p`, in up, down, left, right order.
    ///
    /// Walls are included; callers decide what is passable.
    pub fn neighbors(&self, p: Pos) -> impl Iterator<Item = Pos> + '_ {
        p.neighbors_4().into_iter().filter(|&n| self.contains(n))
    }

    /// Append the neighbours of `p` to `buf`. The caller clears `buf`.
    pub fn neighbors_into(&self, p: Pos, buf: &mut Vec<Pos>) {
        buf.extend(self.neighbors(p));
    }

    /// Current start holder.
    #[inline]
    pub fn start(&self) -> Option<Pos> {
        self.start
    }

    /// Current end holder.
    #[inline]
    pub fn end(&self) -> Option<Pos> {
        self.end
    }

    // -----------------------------------------------------------------------
    // Structural edits
    // -----------------------------------------------------------------------

    /// Set or clear a wall. Turning a cell into a wall resets its weight to
    /// 1. The cell's search state is reset whenever the flag changes.
    pub fn set_wall(&mut self, p: Pos, wall: bool) -> Result<(), GridError> {
        let cell = self.cell_mut(p)?;
        if cell.is_wall() != wall {
            cell.set_wall(wall);
            if wall {
                cell.set_weight(1);
            }
            cell.reset();
        }
        Ok(())
    }

    /// Set the cost of entering `p`. Zero is rejected.
    pub fn set_weight(&mut self, p: Pos, weight: u32) -> Result<(), GridError> {
        if weight == 0 {
            return Err(GridError::ZeroWeight(p));
        }
        self.cell_mut(p)?.set_weight(weight);
        Ok(())
    }

    /// Move the start flag to `p`, returning the previous holder.
    ///
    /// Both the old and the new holder have their search state reset.
    pub fn move_start(&mut self, p: Pos) -> Result<Option<Pos>, GridError> {
        if !self.contains(p) {
            return Err(GridError::OutOfBounds(p));
        }
        let old = self.clear_start();
        let cell = self.cell_mut(p)?;
        cell.set_start(true);
        cell.reset();
        self.start = Some(p);
        Ok(old)
    }

    /// Move the end flag to `p`, returning the previous holder.
    ///
    /// Both the old and the new holder have their search state reset.
    pub fn move_end(&mut self, p: Pos) -> Result<Option<Pos>, GridError> {
        if !self.contains(p) {
            return Err(GridError::OutOfBounds(p));
        }
        let old = self.clear_end();
        let cell = self.cell_mut(p)?;
        cell.set_end(true);
        cell.reset();
        self.end = Some(p);
        Ok(old)
    }

    /// Remove the start flag, returning its former holder.
    pub fn clear_start(&mut self) -> Option<Pos> {
        let old = self.start.take()?;
        if let Some(cell) = self.get_mut(old) {
            cell.set_start(false);
            cell.reset();
        }
        Some(old)
    }

    /// Remove the end flag, returning its former holder.
    pub fn clear_end(&mut self) -> Option<Pos> {
        let old = self.end.take()?;
        if let Some(cell) = self.get_mut(old) {
            cell.set_end(false);
            cell.reset();
        }
        Some(old)
    }

    /// Reset the search state of every cell.
    pub fn reset_search(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.reset();
        }
    }

    /// Remove all walls and weights and reset search state. Start and end
    /// stay where they are.
    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.set_wall(false);
            cell.set_weight(1);
            cell.reset();
        }
    }
}

impl fmt::Display for Grid {
    /// Renders the map alphabet accepted by [`Grid::parse`], plus `@` for the
    /// current cell, `*` for path cells and `o` for visited cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 && i % self.cols as usize == 0 {
                f.write_str("\n")?;
            }
            let ch = cell.snapshot().glyph();
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}
