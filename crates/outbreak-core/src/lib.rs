//! Zombie Outbreak Simulation Engine
//!
//! A deterministic cellular automaton over a toroidal terrain grid: humans
//! flee, zombies pursue, infection spreads through the Moore neighborhood,
//! and every tick commits in two phases (rules, then movement) so no cell
//! sees a half-updated world.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod components;
pub mod config;
pub mod engine;
pub mod output;
pub mod setup;
pub mod systems;

pub use components::cell::{Cell, Occupant, Terrain};
pub use components::grid::Grid;
pub use config::SimConfig;
pub use engine::Simulation;
pub use setup::{GridError, TerrainMap};

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);

/// The grid callers read between ticks. Each tick replaces the inner grid
/// wholesale; the previous one is discarded.
#[derive(Resource, Debug, Default)]
pub struct WorldGrid(pub Grid);

/// Global simulation state resource (tick counter and running totals)
#[derive(Resource, Debug, Default)]
pub struct SimulationState {
    pub tick: u64,
    pub total_deaths: u64,
}
