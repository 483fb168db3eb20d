//! State-Transition Rules
//!
//! The infection, death, incubation and compost rules, applied to every
//! occupied cell against its pre-tick neighborhood.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::components::cell::{Cell, Occupant, Terrain};
use crate::components::grid::Grid;
use crate::config::{RulesConfig, SimConfig};
use crate::systems::TickStats;
use crate::{SimRng, WorldGrid};

/// Resource: the intermediate grid rule results are written into. Movement
/// planning reads this grid, so every agent sees the same post-rules,
/// pre-movement world.
#[derive(Resource, Debug, Default)]
pub struct RulePhaseGrid(pub Grid);

/// Compute the next occupant for a cell with `zombie_neighbors` zombies in
/// its Moore neighborhood. Pure: the only side effect is the RNG draw on
/// the infection path.
pub fn apply_cell_rules(
    cell: &Cell,
    zombie_neighbors: usize,
    rules: &RulesConfig,
    rng: &mut SmallRng,
) -> Occupant {
    match cell.occupant {
        Occupant::Human => {
            if zombie_neighbors >= rules.death_threshold {
                Occupant::Dead { compost: 0 }
            } else if rules.infection_risk_counts.contains(&zombie_neighbors)
                && rng.gen::<f32>() < rules.infection_probability
            {
                Occupant::Infected {
                    incubation: rules.incubation_ticks,
                }
            } else {
                Occupant::Human
            }
        }
        Occupant::Infected { incubation } => {
            if incubation <= 1 {
                Occupant::Zombie
            } else {
                Occupant::Infected {
                    incubation: incubation - 1,
                }
            }
        }
        Occupant::Dead { compost } => {
            let compost = compost + 1;
            if compost >= rules.compost_ticks {
                Occupant::Empty
            } else {
                Occupant::Dead { compost }
            }
        }
        other => other,
    }
}

/// Rule phase: snapshot the current grid, then write each occupied cell's
/// next state into the snapshot while neighbors are read from the pre-tick
/// grid. All cells therefore transition simultaneously.
pub fn run_rule_phase(
    config: Res<SimConfig>,
    current: Res<WorldGrid>,
    mut rng: ResMut<SimRng>,
    mut intermediate: ResMut<RulePhaseGrid>,
    mut stats: ResMut<TickStats>,
) {
    let grid = &current.0;
    intermediate.0 = grid.clone();

    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let cell = grid.cell(row, col);
            if cell.occupant == Occupant::Empty {
                continue;
            }

            let zombie_neighbors = grid
                .neighbors(row, col)
                .filter(|n| n.occupant.is_zombie())
                .count();
            let next = apply_cell_rules(cell, zombie_neighbors, &config.rules, &mut rng.0);

            match (cell.occupant, next) {
                (Occupant::Human, Occupant::Dead { .. }) => stats.0.deaths += 1,
                (Occupant::Human, Occupant::Infected { .. }) => stats.0.infections += 1,
                // Composting finished: the tile reverts to bare ground.
                (Occupant::Dead { .. }, Occupant::Empty) => {
                    intermediate.0.cell_mut(row, col).terrain = Terrain::Ground;
                }
                _ => {}
            }

            intermediate.0.cell_mut(row, col).occupant = next;
        }
    }
}
