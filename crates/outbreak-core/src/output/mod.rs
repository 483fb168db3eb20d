//! Output Generation
//!
//! Encodes the grid into the outbreak-events snapshot schema and writes it
//! as JSON for external consumers.

use std::fs;
use std::path::{Path, PathBuf};

use outbreak_events::{generate_snapshot_id, CellSnapshot, WorldSnapshot};

use crate::components::grid::Grid;

/// Tracks snapshot emission across a run
#[derive(Debug)]
pub struct SnapshotWriter {
    next_snapshot_seq: u64,
    snapshot_interval: u64,
}

impl SnapshotWriter {
    pub fn new(snapshot_interval: u64) -> Self {
        Self {
            next_snapshot_seq: 1,
            snapshot_interval,
        }
    }

    pub fn should_snapshot(&self, tick: u64) -> bool {
        tick > 0 && tick % self.snapshot_interval == 0
    }

    pub fn next_id(&mut self) -> String {
        let id = generate_snapshot_id(self.next_snapshot_seq);
        self.next_snapshot_seq += 1;
        id
    }

    pub fn snapshot_count(&self) -> u64 {
        self.next_snapshot_seq - 1
    }
}

/// Encode the world state into the snapshot schema
pub fn world_snapshot(
    grid: &Grid,
    tick: u64,
    total_deaths: u64,
    snapshot_id: String,
    triggered_by: &str,
) -> WorldSnapshot {
    let cells = grid
        .cells()
        .iter()
        .map(|cell| CellSnapshot {
            terrain: cell.terrain.code(),
            state: cell.occupant.code(),
            counter: cell.occupant.counter(),
        })
        .collect();

    WorldSnapshot {
        snapshot_id,
        tick,
        triggered_by: triggered_by.to_string(),
        width: grid.width(),
        height: grid.height(),
        population: grid.population(),
        total_deaths,
        cells,
    }
}

/// Write a snapshot to a file
pub fn write_snapshot(snapshot: &WorldSnapshot, path: impl AsRef<Path>) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)?;
    Ok(())
}

/// Write a snapshot into the snapshots directory, named by tick
pub fn write_snapshot_to_dir(
    snapshot: &WorldSnapshot,
    dir: impl AsRef<Path>,
) -> std::io::Result<PathBuf> {
    let path = dir
        .as_ref()
        .join(format!("snap_{:06}.json", snapshot.tick));
    write_snapshot(snapshot, &path)?;
    Ok(path)
}

/// Write the current state (overwrites each time)
pub fn write_current_state(
    snapshot: &WorldSnapshot,
    dir: impl AsRef<Path>,
) -> std::io::Result<()> {
    write_snapshot(snapshot, dir.as_ref().join("current_state.json"))
}
