//! Tick Systems
//!
//! The chained phases of one simulation step: state-transition rules, then
//! movement preparation, planning, and commit.

pub mod movement;
pub mod rules;

// Re-export the phase systems and their resources
pub use movement::{
    commit_moves, plan_agent_moves, plan_move, prepare_movement_grid, NextGrid, PendingMoves,
};
pub use rules::{apply_cell_rules, run_rule_phase, RulePhaseGrid};

use bevy_ecs::prelude::*;
use outbreak_events::StepStats;

/// Resource collecting the statistics of the tick in progress
#[derive(Resource, Debug, Default)]
pub struct TickStats(pub StepStats);

impl TickStats {
    /// Hand the finished tick's stats to the caller and reset for the next
    pub fn take(&mut self) -> StepStats {
        std::mem::take(&mut self.0)
    }
}
