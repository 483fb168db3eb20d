//! Simulation Setup
//!
//! Grid construction from terrain data and initial agent placement.

pub mod terrain;

pub use terrain::{GridError, TerrainMap};

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::components::cell::Occupant;
use crate::components::grid::Grid;
use crate::config::SimConfig;

/// Build the initial grid. Without a terrain map every cell is ground and
/// the configured dimensions apply; with one, the map's terrain and
/// dimensions govern. Agents are then placed at random.
pub fn build_grid(config: &SimConfig, terrain: Option<&TerrainMap>, rng: &mut SmallRng) -> Grid {
    let (width, height) = match terrain {
        Some(map) => (map.width(), map.height()),
        None => (config.grid.width, config.grid.height),
    };

    let mut grid = Grid::new(width, height);
    if let Some(map) = terrain {
        for row in 0..height {
            for col in 0..width {
                grid.cell_mut(row, col).terrain = map.terrain_at(row, col);
            }
        }
    }

    place_agents(
        &mut grid,
        config.grid.initial_humans,
        config.grid.initial_zombies,
        rng,
    );
    grid
}

/// Scatter the initial populations over cells whose terrain allows it,
/// humans first, without replacement. Counts beyond the number of eligible
/// cells are silently capped.
pub fn place_agents(grid: &mut Grid, humans: usize, zombies: usize, rng: &mut SmallRng) {
    let mut open: Vec<(usize, usize)> = Vec::new();
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            if grid.cell(row, col).terrain.spawnable() {
                open.push((row, col));
            }
        }
    }
    open.shuffle(rng);

    let mut free = open.into_iter();
    for _ in 0..humans {
        let Some((row, col)) = free.next() else { break };
        grid.cell_mut(row, col).occupant = Occupant::Human;
    }
    for _ in 0..zombies {
        let Some((row, col)) = free.next() else { break };
        grid.cell_mut(row, col).occupant = Occupant::Zombie;
    }

    tracing::debug!(humans, zombies, "placed initial agents");
}
