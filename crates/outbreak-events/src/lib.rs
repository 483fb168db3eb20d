//! Shared statistics and snapshot types for the outbreak simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! It is a dependency for all other crates in the workspace.

pub mod snapshot;
pub mod stats;

// Re-export snapshot types
pub use snapshot::{generate_snapshot_id, CellSnapshot, WorldSnapshot};

// Re-export statistics types
pub use stats::{PopulationCounts, StepStats};
