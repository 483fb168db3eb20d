//! Grid Components
//!
//! Cells, terrain, and the toroidal grid that owns them.

pub mod cell;
pub mod grid;

pub use cell::{Cell, Occupant, Terrain};
pub use grid::Grid;
