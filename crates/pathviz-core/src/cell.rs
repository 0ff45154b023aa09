//! The [`Cell`] type: one grid position with its traversal cost and search
//! state.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::geom::Pos;

/// Sentinel distance for cells not (yet) reached by a search.
///
/// Chosen so that `UNREACHABLE + u32::MAX` still fits in a `u64`, and it
/// compares greater than any finite distance on a grid that fits in memory.
pub const UNREACHABLE: u64 = u64::MAX - u32::MAX as u64;

/// A grid cell.
///
/// Structural state (weight, wall, start/end designation) is changed only
/// through [`Grid`](crate::Grid) so its invariants hold: weight is at least 1
/// and the start/end flags have a single holder. Search state is public and
/// written by the solver; [`reset`](Cell::reset) clears it.
///
/// Equality and hashing use the position only.
#[derive(Clone, Debug)]
pub struct Cell {
    pos: Pos,
    weight: u32,
    is_wall: bool,
    is_start: bool,
    is_end: bool,
    /// Best known cost from the start, or [`UNREACHABLE`].
    pub distance: u64,
    /// Predecessor on the current best path. A lookup key into the owning
    /// grid, never ownership.
    pub previous: Option<Pos>,
    pub is_visited: bool,
    pub is_current: bool,
    pub is_path: bool,
}

impl Cell {
    /// Create a default cell at `pos`: weight 1, no flags, unreached.
    pub const fn new(pos: Pos) -> Self {
        Self {
            pos,
            weight: 1,
            is_wall: false,
            is_start: false,
            is_end: false,
            distance: UNREACHABLE,
            previous: None,
            is_visited: false,
            is_current: false,
            is_path: false,
        }
    }

    #[inline]
    pub const fn pos(&self) -> Pos {
        self.pos
    }

    #[inline]
    pub const fn row(&self) -> i32 {
        self.pos.row
    }

    #[inline]
    pub const fn col(&self) -> i32 {
        self.pos.col
    }

    /// Cost charged for entering this cell. Always ≥ 1.
    #[inline]
    pub const fn weight(&self) -> u32 {
        self.weight
    }

    #[inline]
    pub const fn is_wall(&self) -> bool {
        self.is_wall
    }

    #[inline]
    pub const fn is_start(&self) -> bool {
        self.is_start
    }

    #[inline]
    pub const fn is_end(&self) -> bool {
        self.is_end
    }

    /// Whether the last search assigned this cell a finite distance.
    #[inline]
    pub const fn is_reached(&self) -> bool {
        self.distance != UNREACHABLE
    }

    /// Clear the search state, keeping position, weight, wall and start/end
    /// designation.
    pub fn reset(&mut self) {
        self.distance = UNREACHABLE;
        self.previous = None;
        self.is_visited = false;
        self.is_current = false;
        self.is_path = false;
    }

    /// Compare by distance, ascending. Ties are unordered.
    #[inline]
    pub fn cmp_distance(&self, other: &Self) -> Ordering {
        self.distance.cmp(&other.distance)
    }

    /// An immutable copy of everything a renderer needs.
    pub fn snapshot(&self) -> CellSnapshot {
        CellSnapshot {
            pos: self.pos,
            distance: self.distance,
            weight: self.weight,
            is_wall: self.is_wall,
            is_start: self.is_start,
            is_end: self.is_end,
            is_visited: self.is_visited,
            is_current: self.is_current,
            is_path: self.is_path,
        }
    }

    // Structural setters, reachable only through `Grid`.

    pub(crate) fn set_weight(&mut self, weight: u32) {
        debug_assert!(weight >= 1);
        self.weight = weight;
    }

    pub(crate) fn set_wall(&mut self, wall: bool) {
        self.is_wall = wall;
    }

    pub(crate) fn set_start(&mut self, start: bool) {
        self.is_start = start;
    }

    pub(crate) fn set_end(&mut self, end: bool) {
        self.is_end = end;
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pos.hash(state);
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell[{},{}]", self.pos.row, self.pos.col)?;
        if self.is_reached() {
            write!(f, " dist={}", self.distance)?;
        } else {
            f.write_str(" dist=∞")?;
        }
        write!(f, " weight={}", self.weight)?;
        let flags = [
            (self.is_start, " START"),
            (self.is_end, " END"),
            (self.is_wall, " WALL"),
            (self.is_visited, " VISITED"),
            (self.is_path, " PATH"),
            (self.is_current, " CURRENT"),
        ];
        for (set, label) in flags {
            if set {
                f.write_str(label)?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// CellSnapshot
// ---------------------------------------------------------------------------

/// A point-in-time copy of a [`Cell`], safe to send to another thread.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellSnapshot {
    pub pos: Pos,
    pub distance: u64,
    pub weight: u32,
    pub is_wall: bool,
    pub is_start: bool,
    pub is_end: bool,
    pub is_visited: bool,
    pub is_current: bool,
    pub is_path: bool,
}

impl CellSnapshot {
    /// The map character for this cell, as rendered by the grid's `Display`.
    pub fn glyph(&self) -> char {
        if self.is_start {
            'S'
        } else if self.is_end {
            'E'
        } else if self.is_wall {
            '#'
        } else if self.is_current {
            '@'
        } else if self.is_path {
            '*'
        } else if self.is_visited {
            'o'
        } else {
            match self.weight {
                1 => '.',
                w @ 2..=9 => char::from_digit(w, 10).unwrap_or('+'),
                _ => '+',
            }
        }
    }
}
