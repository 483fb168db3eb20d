//! Configuration System
//!
//! Loads tuning parameters from tuning.toml for easy adjustment without
//! recompiling. At runtime the configuration lives in the ECS world as an
//! explicit resource; callers mutate it between ticks through the
//! `Simulation` host, never through ambient globals.

use bevy_ecs::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::components::cell::Terrain;

/// Default tuning file path
pub const DEFAULT_TUNING_PATH: &str = "tuning.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Deserialize, Resource)]
pub struct SimConfig {
    pub grid: GridConfig,
    pub rules: RulesConfig,
    pub movement: MovementConfig,
    pub output: OutputConfig,
}

/// Grid dimensions and initial populations
#[derive(Debug, Clone, Deserialize)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
    pub initial_humans: usize,
    pub initial_zombies: usize,
}

/// Infection, death, incubation and compost rules
#[derive(Debug, Clone, Deserialize)]
pub struct RulesConfig {
    /// Ticks from infection to turning
    pub incubation_ticks: u32,
    /// Ticks from death to bare ground
    pub compost_ticks: u32,
    /// Chance of infection when the zombie-neighbor count is in the risk set
    pub infection_probability: f32,
    /// Zombie-neighbor counts that expose a human to infection
    pub infection_risk_counts: Vec<usize>,
    /// Zombie-neighbor count at which a human dies outright
    pub death_threshold: usize,
}

/// Movement model parameters
#[derive(Debug, Clone, Deserialize)]
pub struct MovementConfig {
    pub human_speed: i32,
    pub zombie_speed: i32,
    /// Wind vector (row, col components); biases zombie movement only
    pub wind_row: f32,
    pub wind_col: f32,
    pub wind_strength: f32,
    /// Uniform noise added to every candidate score, in [-noise, noise]
    pub noise_strength: f32,
    pub terrain_costs: TerrainCosts,
}

/// Movement-cost multiplier per destination terrain
#[derive(Debug, Clone, Deserialize)]
pub struct TerrainCosts {
    pub ground: f32,
    pub water: f32,
    pub building: f32,
    pub green_area: f32,
    pub street: f32,
    pub hill: f32,
}

impl TerrainCosts {
    pub fn cost(&self, terrain: Terrain) -> f32 {
        match terrain {
            Terrain::Ground => self.ground,
            Terrain::Water => self.water,
            Terrain::Building => self.building,
            Terrain::GreenArea => self.green_area,
            Terrain::Street => self.street,
            Terrain::Hill => self.hill,
        }
    }
}

/// Snapshot emission parameters for the runner
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Interval between world snapshots (in ticks)
    pub snapshot_interval: u64,
    pub snapshot_dir: String,
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from the default path, or use defaults if not found
    pub fn load_or_default() -> Self {
        Self::load(DEFAULT_TUNING_PATH).unwrap_or_else(|e| {
            tracing::warn!("could not load {}: {}; using defaults", DEFAULT_TUNING_PATH, e);
            Self::default()
        })
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                width: 120,
                height: 90,
                initial_humans: 300,
                initial_zombies: 30,
            },
            rules: RulesConfig {
                incubation_ticks: 2,
                compost_ticks: 5,
                infection_probability: 0.6,
                infection_risk_counts: vec![1],
                death_threshold: 2,
            },
            movement: MovementConfig {
                human_speed: 1,
                zombie_speed: 1,
                wind_row: 0.0,
                wind_col: 0.0,
                wind_strength: 0.0,
                noise_strength: 0.3,
                terrain_costs: TerrainCosts {
                    ground: 1.0,
                    water: 0.1,
                    building: 0.5,
                    green_area: 1.2,
                    street: 2.0,
                    hill: 0.5,
                },
            },
            output: OutputConfig {
                snapshot_interval: 100,
                snapshot_dir: "output/snapshots".to_string(),
            },
        }
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.grid.width, 120);
        assert_eq!(config.grid.height, 90);
        assert_eq!(config.rules.incubation_ticks, 2);
        assert_eq!(config.rules.death_threshold, 2);
        assert!(config.rules.infection_probability > 0.0);
        assert_eq!(config.movement.terrain_costs.cost(Terrain::Street), 2.0);
    }

    #[test]
    fn test_parse_tuning_toml() {
        let config: SimConfig = toml::from_str(
            r#"
            [grid]
            width = 40
            height = 30
            initial_humans = 50
            initial_zombies = 5

            [rules]
            incubation_ticks = 3
            compost_ticks = 4
            infection_probability = 0.25
            infection_risk_counts = [1, 2]
            death_threshold = 3

            [movement]
            human_speed = 1
            zombie_speed = 2
            wind_row = 1.0
            wind_col = 0.0
            wind_strength = 0.5
            noise_strength = 0.0

            [movement.terrain_costs]
            ground = 1.0
            water = 0.1
            building = 0.5
            green_area = 1.2
            street = 2.0
            hill = 0.5

            [output]
            snapshot_interval = 50
            snapshot_dir = "output/snapshots"
            "#,
        )
        .unwrap();

        assert_eq!(config.grid.width, 40);
        assert_eq!(config.rules.infection_risk_counts, vec![1, 2]);
        assert_eq!(config.movement.zombie_speed, 2);
        assert_eq!(config.output.snapshot_interval, 50);
    }

    #[test]
    fn test_load_config_file() {
        // This test requires the tuning.toml file to exist
        if Path::new(DEFAULT_TUNING_PATH).exists() {
            let config = SimConfig::load(DEFAULT_TUNING_PATH).unwrap();
            assert!(config.grid.width > 0);
        }
    }
}
