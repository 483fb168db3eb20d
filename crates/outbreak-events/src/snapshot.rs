//! Snapshot Schema
//!
//! The JSON world-state schema emitted for external consumers (renderers,
//! analysis scripts). Cells are encoded with the integer wire codes of the
//! terrain-map input format so consumers need no knowledge of engine types.

use serde::{Deserialize, Serialize};

use crate::stats::PopulationCounts;

/// One cell of the encoded grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    /// Terrain code (0 ground, 11 water, 12 building, 13 green area,
    /// 14 street, 15 hill)
    pub terrain: u8,
    /// Dynamic-state code (0 empty, 1 human, 2 infected, 3 zombie, 4 dead)
    pub state: u8,
    /// Incubation countdown or compost age; 0 for states without a counter
    pub counter: u32,
}

/// Complete world state at the end of a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub snapshot_id: String,
    pub tick: u64,
    /// What caused this snapshot ("simulation_start", "periodic", ...)
    pub triggered_by: String,
    pub width: usize,
    pub height: usize,
    pub population: PopulationCounts,
    /// Deaths accumulated since the simulation started
    pub total_deaths: u64,
    /// Row-major cell grid, `width * height` entries
    pub cells: Vec<CellSnapshot>,
}

/// Sequential snapshot id in the `snap_NNNNNN` format
pub fn generate_snapshot_id(sequence: u64) -> String {
    format!("snap_{:06}", sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_id_format() {
        assert_eq!(generate_snapshot_id(1), "snap_000001");
        assert_eq!(generate_snapshot_id(123456), "snap_123456");
    }

    #[test]
    fn test_snapshot_round_trips_through_json() {
        let snapshot = WorldSnapshot {
            snapshot_id: generate_snapshot_id(7),
            tick: 42,
            triggered_by: "periodic".to_string(),
            width: 2,
            height: 1,
            population: PopulationCounts {
                humans: 1,
                empty: 1,
                ..Default::default()
            },
            total_deaths: 3,
            cells: vec![
                CellSnapshot {
                    terrain: 0,
                    state: 1,
                    counter: 0,
                },
                CellSnapshot {
                    terrain: 14,
                    state: 0,
                    counter: 0,
                },
            ],
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: WorldSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }
}
