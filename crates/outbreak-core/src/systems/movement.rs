//! Agent Movement
//!
//! Pursuit/evasion scoring over candidate offsets, collision resolution,
//! and the commit of resolved positions into the next grid.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::Rng;
use std::collections::HashMap;

use crate::components::cell::Occupant;
use crate::components::grid::Grid;
use crate::config::{MovementConfig, SimConfig};
use crate::systems::rules::RulePhaseGrid;
use crate::systems::TickStats;
use crate::{SimRng, WorldGrid};

/// Resource: the grid being assembled for the end of the tick
#[derive(Resource, Debug, Default)]
pub struct NextGrid(pub Grid);

/// Resource: resolved destination -> occupant for every surviving move
#[derive(Resource, Debug, Default)]
pub struct PendingMoves(pub HashMap<(usize, usize), Occupant>);

/// Pick a destination for the agent at (row, col), or its own coordinate
/// when it cannot move. Zombies pursue the nearest human or infected and
/// minimize the score; humans evade the nearest zombie and maximize it.
pub fn plan_move(
    grid: &Grid,
    row: usize,
    col: usize,
    movement: &MovementConfig,
    rng: &mut SmallRng,
) -> (usize, usize) {
    let (speed, fleeing, target) = match grid.cell(row, col).occupant {
        Occupant::Zombie => (
            movement.zombie_speed,
            false,
            grid.nearest_matching(row, col, |o| {
                matches!(o, Occupant::Human | Occupant::Infected { .. })
            }),
        ),
        Occupant::Human => (
            movement.human_speed,
            true,
            grid.nearest_matching(row, col, |o| o.is_zombie()),
        ),
        _ => return (row, col),
    };

    // With no target, nearest_matching returned our own coordinate and the
    // distance term degenerates to the candidate's distance from home.
    let (target_row, target_col) = target;

    let mut best_move = (row, col);
    let mut best_score = if fleeing {
        f32::NEG_INFINITY
    } else {
        f32::INFINITY
    };

    for dr in -speed..=speed {
        for dc in -speed..=speed {
            if dr == 0 && dc == 0 {
                continue;
            }

            let (new_row, new_col) = grid.wrap(row as i64 + dr as i64, col as i64 + dc as i64);
            let dest = grid.cell(new_row, new_col);
            if dest.occupant != Occupant::Empty {
                continue;
            }

            let modifier = movement.terrain_costs.cost(dest.terrain);

            // Straight (unwrapped) Manhattan distances on raw coordinates.
            let old_dist = row.abs_diff(target_row) + col.abs_diff(target_col);
            let new_dist = new_row.abs_diff(target_row) + new_col.abs_diff(target_col);
            let distance_change = old_dist as f32 - new_dist as f32;

            // Unified metric: "distance from target", so pursuit minimizes
            // and evasion maximizes.
            let mut score = -distance_change * modifier;

            if !fleeing {
                score += movement.wind_strength
                    * (dr as f32 * movement.wind_row + dc as f32 * movement.wind_col);
            }

            score += rng.gen_range(-movement.noise_strength..=movement.noise_strength);

            let better = if fleeing {
                score > best_score
            } else {
                score < best_score
            };
            if better {
                best_score = score;
                best_move = (new_row, new_col);
            }
        }
    }

    best_move
}

/// Movement preparation: the next grid starts as the intermediate grid's
/// terrain with every mobile agent removed. Infected, dead and empty cells
/// are committed as-is; humans and zombies re-enter via resolved moves.
pub fn prepare_movement_grid(intermediate: Res<RulePhaseGrid>, mut next: ResMut<NextGrid>) {
    let mut grid = intermediate.0.clone();
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let cell = grid.cell_mut(row, col);
            if cell.occupant.is_agent() {
                cell.occupant = Occupant::Empty;
            }
        }
    }
    next.0 = grid;
}

/// Movement phase: plan a destination for every human and zombie in the
/// intermediate grid, in row-major order. First claim on a destination
/// wins; a displaced agent keeps its own cell unless that cell was claimed
/// too, in which case the agent is dropped.
pub fn plan_agent_moves(
    config: Res<SimConfig>,
    intermediate: Res<RulePhaseGrid>,
    mut rng: ResMut<SimRng>,
    mut pending: ResMut<PendingMoves>,
    mut stats: ResMut<TickStats>,
) {
    pending.0.clear();
    let grid = &intermediate.0;

    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let occupant = grid.cell(row, col).occupant;
            if !occupant.is_agent() {
                continue;
            }

            let dest = plan_move(grid, row, col, &config.movement, &mut rng.0);
            if !pending.0.contains_key(&dest) {
                pending.0.insert(dest, occupant);
            } else if !pending.0.contains_key(&(row, col)) {
                pending.0.insert((row, col), occupant);
            } else {
                // Destination and home cell both taken.
                stats.0.dropped_agents += 1;
            }
        }
    }
}

/// Commit: write the resolved agents into the next grid and swap it in as
/// the grid callers read.
pub fn commit_moves(
    mut pending: ResMut<PendingMoves>,
    mut next: ResMut<NextGrid>,
    mut current: ResMut<WorldGrid>,
) {
    for (&(row, col), &occupant) in pending.0.iter() {
        next.0.cell_mut(row, col).occupant = occupant;
    }
    pending.0.clear();
    current.0 = std::mem::take(&mut next.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::cell::Terrain;
    use rand::SeedableRng;

    fn quiet_movement() -> MovementConfig {
        MovementConfig {
            human_speed: 1,
            zombie_speed: 1,
            wind_row: 0.0,
            wind_col: 0.0,
            wind_strength: 0.0,
            noise_strength: 0.0,
            terrain_costs: crate::config::TerrainCosts {
                ground: 1.0,
                water: 0.1,
                building: 0.5,
                green_area: 1.2,
                street: 2.0,
                hill: 0.5,
            },
        }
    }

    #[test]
    fn test_zombie_closes_on_target_without_noise() {
        let mut grid = Grid::new(7, 7);
        grid.cell_mut(3, 1).occupant = Occupant::Zombie;
        grid.cell_mut(3, 5).occupant = Occupant::Infected { incubation: 9 };

        let mut rng = SmallRng::seed_from_u64(0);
        let dest = plan_move(&grid, 3, 1, &quiet_movement(), &mut rng);
        // The single step that shrinks the raw Manhattan distance by one.
        assert_eq!(dest, (3, 2));
    }

    #[test]
    fn test_human_flees_away_from_zombie() {
        let mut grid = Grid::new(9, 9);
        grid.cell_mut(4, 4).occupant = Occupant::Human;
        grid.cell_mut(4, 2).occupant = Occupant::Zombie;

        let mut rng = SmallRng::seed_from_u64(0);
        let dest = plan_move(&grid, 4, 4, &quiet_movement(), &mut rng);
        // Maximum raw-distance gain is the diagonal step away; (3, 5) comes
        // first in (dr, dc) scan order.
        assert_eq!(dest, (3, 5));
    }

    #[test]
    fn test_agents_never_enter_occupied_cells() {
        let mut grid = Grid::new(3, 3);
        grid.cell_mut(1, 1).occupant = Occupant::Human;
        // Every other cell of the 3x3 torus holds a corpse.
        for row in 0..3 {
            for col in 0..3 {
                if (row, col) != (1, 1) {
                    grid.cell_mut(row, col).occupant = Occupant::Dead { compost: 0 };
                }
            }
        }

        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(plan_move(&grid, 1, 1, &quiet_movement(), &mut rng), (1, 1));
    }

    #[test]
    fn test_terrain_cost_steers_pursuit() {
        // Two steps that close the distance equally; the street's higher
        // multiplier makes its score more negative, so the zombie takes it.
        let mut grid = Grid::new(9, 9);
        grid.cell_mut(4, 4).occupant = Occupant::Zombie;
        grid.cell_mut(6, 6).occupant = Occupant::Infected { incubation: 9 };
        // Block the diagonal shortcut so only the two closing steps remain.
        grid.cell_mut(5, 5).occupant = Occupant::Dead { compost: 0 };
        grid.cell_mut(4, 5).terrain = Terrain::Hill;
        grid.cell_mut(5, 4).terrain = Terrain::Street;

        let mut rng = SmallRng::seed_from_u64(0);
        let dest = plan_move(&grid, 4, 4, &quiet_movement(), &mut rng);
        assert_eq!(dest, (5, 4));
    }

    #[test]
    fn test_wind_biases_zombies() {
        let mut movement = quiet_movement();
        movement.wind_row = 1.0;
        movement.wind_strength = 10.0;

        // No targets: the target collapses to the zombie's own cell, so the
        // distance term only penalizes drifting, and a strong wind dominates.
        let mut grid = Grid::new(5, 5);
        grid.cell_mut(2, 2).occupant = Occupant::Zombie;

        let mut rng = SmallRng::seed_from_u64(0);
        let dest = plan_move(&grid, 2, 2, &movement, &mut rng);
        // Pursuit minimizes; dr = -1 gives wind -10, and the orthogonal
        // step's distance penalty (1) undercuts the diagonals' (2).
        assert_eq!(dest, (1, 2));
    }

    #[test]
    fn test_idle_states_do_not_move() {
        let mut grid = Grid::new(4, 4);
        grid.cell_mut(1, 1).occupant = Occupant::Infected { incubation: 1 };
        grid.cell_mut(2, 2).occupant = Occupant::Dead { compost: 0 };

        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(plan_move(&grid, 1, 1, &quiet_movement(), &mut rng), (1, 1));
        assert_eq!(plan_move(&grid, 2, 2, &quiet_movement(), &mut rng), (2, 2));
        assert_eq!(plan_move(&grid, 0, 0, &quiet_movement(), &mut rng), (0, 0));
    }
}
