//! Cell Types
//!
//! Terrain categories, dynamic occupancy, and the cell that pairs them.
//! Terrain and occupancy are orthogonal: a street stays a street whether a
//! zombie stands on it or not.

use serde::{Deserialize, Serialize};

/// Static terrain category of a location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    Ground,
    Water,
    Building,
    GreenArea,
    Street,
    Hill,
}

impl Terrain {
    /// Integer wire code, matching the externally supplied terrain-map format
    pub fn code(self) -> u8 {
        match self {
            Terrain::Ground => 0,
            Terrain::Water => 11,
            Terrain::Building => 12,
            Terrain::GreenArea => 13,
            Terrain::Street => 14,
            Terrain::Hill => 15,
        }
    }

    /// Parse a terrain-map code; `None` for codes with no terrain category
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Terrain::Ground),
            11 => Some(Terrain::Water),
            12 => Some(Terrain::Building),
            13 => Some(Terrain::GreenArea),
            14 => Some(Terrain::Street),
            15 => Some(Terrain::Hill),
            _ => None,
        }
    }

    /// Whether initial agents may be placed on this terrain
    pub fn spawnable(self) -> bool {
        !matches!(self, Terrain::Water | Terrain::Building)
    }
}

/// Dynamic occupancy of a cell. Counters live on the variants that need
/// them, so an infected cell without an incubation countdown (or a corpse
/// without a compost age) is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupant {
    Empty,
    Human,
    Infected { incubation: u32 },
    Zombie,
    Dead { compost: u32 },
}

impl Occupant {
    /// Mobile agents: the states that take a movement phase
    pub fn is_agent(self) -> bool {
        matches!(self, Occupant::Human | Occupant::Zombie)
    }

    pub fn is_zombie(self) -> bool {
        matches!(self, Occupant::Zombie)
    }

    /// Dynamic-state wire code used in snapshots
    pub fn code(self) -> u8 {
        match self {
            Occupant::Empty => 0,
            Occupant::Human => 1,
            Occupant::Infected { .. } => 2,
            Occupant::Zombie => 3,
            Occupant::Dead { .. } => 4,
        }
    }

    /// The state counter (incubation countdown or compost age), 0 otherwise
    pub fn counter(self) -> u32 {
        match self {
            Occupant::Infected { incubation } => incubation,
            Occupant::Dead { compost } => compost,
            _ => 0,
        }
    }
}

/// A single grid cell: static terrain plus dynamic occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub terrain: Terrain,
    pub occupant: Occupant,
}

impl Cell {
    pub fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            occupant: Occupant::Empty,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(Terrain::Ground)
    }
}
