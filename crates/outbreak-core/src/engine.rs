//! Simulation Host
//!
//! Owns the ECS world and the tick schedule, and exposes the engine to its
//! caller: create once, step per tick, read the grid back between ticks.
//! Every tick replaces the readable grid wholesale, so a renderer holding
//! the previous grid never races the simulation.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use outbreak_events::{PopulationCounts, StepStats};

use crate::components::cell::Terrain;
use crate::components::grid::Grid;
use crate::config::SimConfig;
use crate::setup::{self, GridError, TerrainMap};
use crate::systems::movement::{
    commit_moves, plan_agent_moves, prepare_movement_grid, NextGrid, PendingMoves,
};
use crate::systems::rules::{run_rule_phase, RulePhaseGrid};
use crate::systems::TickStats;
use crate::{SimRng, SimulationState, WorldGrid};

/// A running outbreak simulation
pub struct Simulation {
    world: World,
    schedule: Schedule,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation").finish_non_exhaustive()
    }
}

impl Simulation {
    /// Build a simulation from a config, an optional terrain map (row-major
    /// integer codes, dimensions govern when present), and a seed. Fails
    /// fast on malformed terrain data; no partial state is returned.
    pub fn new(
        config: SimConfig,
        terrain: Option<&[Vec<u8>]>,
        seed: u64,
    ) -> Result<Self, GridError> {
        let terrain = terrain.map(TerrainMap::from_rows).transpose()?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let grid = setup::build_grid(&config, terrain.as_ref(), &mut rng);
        Ok(Self::assemble(config, grid, rng, seed))
    }

    /// Build a simulation over a caller-constructed grid (terrain and agent
    /// placement already decided).
    pub fn from_grid(config: SimConfig, grid: Grid, seed: u64) -> Self {
        Self::assemble(config, grid, SmallRng::seed_from_u64(seed), seed)
    }

    fn assemble(config: SimConfig, grid: Grid, rng: SmallRng, seed: u64) -> Self {
        tracing::info!(
            width = grid.width(),
            height = grid.height(),
            seed,
            "simulation created"
        );

        let mut world = World::new();
        world.insert_resource(config);
        world.insert_resource(SimRng(rng));
        world.insert_resource(WorldGrid(grid));
        world.insert_resource(RulePhaseGrid::default());
        world.insert_resource(NextGrid::default());
        world.insert_resource(PendingMoves::default());
        world.insert_resource(TickStats::default());
        world.insert_resource(SimulationState::default());

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                run_rule_phase,
                prepare_movement_grid,
                plan_agent_moves,
                commit_moves,
            )
                .chain(),
        );

        Self { world, schedule }
    }

    /// Run one complete, synchronous tick and return its statistics.
    pub fn step(&mut self) -> StepStats {
        self.schedule.run(&mut self.world);

        let stats = self.world.resource_mut::<TickStats>().take();
        let mut state = self.world.resource_mut::<SimulationState>();
        state.tick += 1;
        state.total_deaths += u64::from(stats.deaths);

        tracing::debug!(
            tick = state.tick,
            deaths = stats.deaths,
            infections = stats.infections,
            "tick complete"
        );
        stats
    }

    /// The grid as of the end of the last tick
    pub fn grid(&self) -> &Grid {
        &self.world.resource::<WorldGrid>().0
    }

    pub fn population(&self) -> PopulationCounts {
        self.grid().population()
    }

    pub fn tick(&self) -> u64 {
        self.world.resource::<SimulationState>().tick
    }

    pub fn total_deaths(&self) -> u64 {
        self.world.resource::<SimulationState>().total_deaths
    }

    pub fn config(&self) -> &SimConfig {
        self.world.resource::<SimConfig>()
    }

    /// Replace the tunable parameters between ticks (live adjustment of
    /// e.g. the infection probability). Takes effect on the next step.
    pub fn set_config(&mut self, config: SimConfig) {
        self.world.insert_resource(config);
    }

    /// Edit terrain under an unoccupied cell, as the external editing tool
    /// does. Returns false (and changes nothing) when the cell is occupied.
    pub fn edit_terrain(&mut self, row: usize, col: usize, terrain: Terrain) -> bool {
        self.world
            .resource_mut::<WorldGrid>()
            .0
            .edit_terrain(row, col, terrain)
    }
}
