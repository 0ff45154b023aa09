use thiserror::Error;

use crate::geom::Pos;

/// Errors from building or editing a [`Grid`](crate::Grid).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: i32, cols: i32 },
    #[error("position {0} is outside the grid")]
    OutOfBounds(Pos),
    #[error("weight at {0} must be at least 1")]
    ZeroWeight(Pos),
    #[error("map line {line}: unexpected character \u{201c}{ch}\u{201d} at column {col}")]
    Parse { line: usize, col: usize, ch: char },
    #[error("map line {line}: width differs from the first line")]
    RaggedMap { line: usize },
    #[error("map has more than one \u{201c}{0}\u{201d} marker")]
    DuplicateMarker(char),
}
