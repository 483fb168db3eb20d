//! Terrain Maps
//!
//! Validated terrain input in the format external map tools produce: a
//! height x width array of integer terrain codes. Validation fails fast; no
//! partially converted map is ever returned.

use thiserror::Error;

use crate::components::cell::Terrain;

/// Errors raised while converting external terrain data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("unknown terrain code {code} at ({row}, {col})")]
    InvalidTerrainCode { code: u8, row: usize, col: usize },
    #[error("terrain map row {row} has {len} columns, expected {expected}")]
    RaggedTerrainMap {
        row: usize,
        len: usize,
        expected: usize,
    },
}

/// A rectangular, fully validated terrain map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainMap {
    width: usize,
    height: usize,
    terrain: Vec<Terrain>,
}

impl TerrainMap {
    /// Validate row-major integer codes. Every row must match the first
    /// row's length and every code must name a known terrain category.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut terrain = Vec::with_capacity(width * height);

        for (r, codes) in rows.iter().enumerate() {
            if codes.len() != width {
                return Err(GridError::RaggedTerrainMap {
                    row: r,
                    len: codes.len(),
                    expected: width,
                });
            }
            for (c, &code) in codes.iter().enumerate() {
                let t = Terrain::from_code(code).ok_or(GridError::InvalidTerrainCode {
                    code,
                    row: r,
                    col: c,
                })?;
                terrain.push(t);
            }
        }

        Ok(Self {
            width,
            height,
            terrain,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn terrain_at(&self, row: usize, col: usize) -> Terrain {
        self.terrain[row * self.width + col]
    }
}
