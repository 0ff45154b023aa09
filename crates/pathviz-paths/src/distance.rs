use pathviz_core::Pos;

/// Manhattan (L1) distance between two positions: the number of cardinal
/// steps between them on an open grid.
#[inline]
pub fn manhattan(a: Pos, b: Pos) -> u64 {
    u64::from(a.row.abs_diff(b.row)) + u64::from(a.col.abs_diff(b.col))
}
