//! **pathviz-core**: grid model for the pathviz shortest-path demonstrator.
//!
//! This crate provides the types shared by the solver and any front-end:
//! positions, cells with their structural and per-run search state, the
//! grid with its editing operations, and the step snapshots a running search
//! sends out.

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;
pub mod step;

pub use cell::{Cell, CellSnapshot, UNREACHABLE};
pub use error::GridError;
pub use geom::{Dir, Pos};
pub use grid::Grid;
pub use step::Step;
