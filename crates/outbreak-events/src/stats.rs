//! Step Statistics
//!
//! Aggregate counts produced by each simulation tick and population tallies
//! recomputed from the grid.

use serde::{Deserialize, Serialize};

/// Aggregates for a single simulation tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepStats {
    /// Humans that died this tick (zombie crowding over the death threshold)
    pub deaths: u32,
    /// Humans that caught the infection this tick
    pub infections: u32,
    /// Agents lost in collision resolution because both their destination
    /// and their home cell were already claimed
    pub dropped_agents: u32,
}

/// Per-state population tallies over the whole grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationCounts {
    pub humans: u32,
    pub infected: u32,
    pub zombies: u32,
    pub dead: u32,
    pub empty: u32,
}

impl PopulationCounts {
    /// Humans, infected, and zombies still in play
    pub fn agents(&self) -> u32 {
        self.humans + self.infected + self.zombies
    }

    /// Every cell of the grid, regardless of state
    pub fn total(&self) -> u32 {
        self.agents() + self.dead + self.empty
    }
}
