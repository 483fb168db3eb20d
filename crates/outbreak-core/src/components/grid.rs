//! The Toroidal Grid
//!
//! Row-major flat cell storage with wrap-around coordinate arithmetic,
//! Moore-neighborhood enumeration, and whole-grid target search. Lookups are
//! deliberately linear scans; at the grid sizes this engine targets a spatial
//! index is not worth its bookkeeping.

use outbreak_events::PopulationCounts;
use serde::{Deserialize, Serialize};

use super::cell::{Cell, Occupant, Terrain};

/// The simulation map: a fixed-size rectangle of cells with toroidal
/// boundary semantics on both axes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// An all-ground, all-empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major cell slice, `width * height` entries
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    fn idx(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.height && col < self.width);
        row * self.width + col
    }

    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.cells[self.idx(row, col)]
    }

    #[inline]
    pub fn cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        let i = self.idx(row, col);
        &mut self.cells[i]
    }

    /// Wrap signed coordinates onto the torus
    #[inline]
    pub fn wrap(&self, row: i64, col: i64) -> (usize, usize) {
        let row = row.rem_euclid(self.height as i64) as usize;
        let col = col.rem_euclid(self.width as i64) as usize;
        (row, col)
    }

    /// The 8 Moore-neighborhood coordinates of a cell. Wrapping means every
    /// cell has exactly 8 neighbors, corners and edges included.
    pub fn neighbor_coords(&self, row: usize, col: usize) -> [(usize, usize); 8] {
        const OFFSETS: [(i64, i64); 8] = [
            (-1, -1),
            (-1, 0),
            (-1, 1),
            (0, -1),
            (0, 1),
            (1, -1),
            (1, 0),
            (1, 1),
        ];
        OFFSETS.map(|(dr, dc)| self.wrap(row as i64 + dr, col as i64 + dc))
    }

    /// The 8 Moore-neighborhood cells of a cell
    pub fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.neighbor_coords(row, col)
            .into_iter()
            .map(move |(nr, nc)| self.cell(nr, nc))
    }

    /// Manhattan distance on the torus: per axis the shorter way around
    pub fn toroidal_distance(&self, a: (usize, usize), b: (usize, usize)) -> usize {
        let dr = a.0.abs_diff(b.0);
        let dc = a.1.abs_diff(b.1);
        dr.min(self.height - dr) + dc.min(self.width - dc)
    }

    /// Coordinate of the closest cell whose occupant satisfies `pred`, by
    /// toroidal Manhattan distance. Ties go to scan order (row-major, first
    /// match wins). Returns the query coordinate itself when nothing
    /// matches, which movement scoring treats as "no target".
    pub fn nearest_matching(
        &self,
        row: usize,
        col: usize,
        pred: impl Fn(Occupant) -> bool,
    ) -> (usize, usize) {
        let mut best = (row, col);
        let mut best_dist = usize::MAX;

        for tr in 0..self.height {
            for tc in 0..self.width {
                if pred(self.cell(tr, tc).occupant) {
                    let dist = self.toroidal_distance((row, col), (tr, tc));
                    if dist < best_dist {
                        best_dist = dist;
                        best = (tr, tc);
                    }
                }
            }
        }

        best
    }

    /// Tally every cell's dynamic state
    pub fn population(&self) -> PopulationCounts {
        let mut counts = PopulationCounts::default();
        for cell in &self.cells {
            match cell.occupant {
                Occupant::Empty => counts.empty += 1,
                Occupant::Human => counts.humans += 1,
                Occupant::Infected { .. } => counts.infected += 1,
                Occupant::Zombie => counts.zombies += 1,
                Occupant::Dead { .. } => counts.dead += 1,
            }
        }
        counts
    }

    /// Change a cell's terrain, as the external editing tool does. Refused
    /// when any dynamic state occupies the cell, so terrain never changes
    /// underneath an agent or a corpse.
    pub fn edit_terrain(&mut self, row: usize, col: usize, terrain: Terrain) -> bool {
        let cell = self.cell_mut(row, col);
        if cell.occupant != Occupant::Empty {
            return false;
        }
        cell.terrain = terrain;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_neighbors_are_eight_distinct_in_range() {
        let grid = Grid::new(4, 3);
        for row in 0..3 {
            for col in 0..4 {
                let coords = grid.neighbor_coords(row, col);
                let unique: HashSet<_> = coords.iter().copied().collect();
                assert_eq!(unique.len(), 8, "duplicates at ({}, {})", row, col);
                for (nr, nc) in coords {
                    assert!(nr < 3 && nc < 4);
                }
            }
        }
    }

    #[test]
    fn test_neighbors_wrap_at_corner() {
        let grid = Grid::new(4, 3);
        let coords: HashSet<_> = grid.neighbor_coords(0, 0).into_iter().collect();
        // Top-left corner reaches the opposite edges through the wrap.
        let expected: HashSet<_> = [
            (2, 3),
            (2, 0),
            (2, 1),
            (0, 3),
            (0, 1),
            (1, 3),
            (1, 0),
            (1, 1),
        ]
        .into_iter()
        .collect();
        assert_eq!(coords, expected);
    }

    #[test]
    fn test_toroidal_distance_properties() {
        let grid = Grid::new(6, 4);
        for a in [(0, 0), (1, 3), (3, 5)] {
            assert_eq!(grid.toroidal_distance(a, a), 0);
            for b in [(0, 0), (2, 2), (3, 0)] {
                let d = grid.toroidal_distance(a, b);
                assert_eq!(d, grid.toroidal_distance(b, a));
                assert!(d <= 4 / 2 + 6 / 2);
            }
        }
        // Opposite edges are one step apart on the torus.
        assert_eq!(grid.toroidal_distance((0, 0), (3, 0)), 1);
        assert_eq!(grid.toroidal_distance((0, 0), (0, 5)), 1);
    }

    #[test]
    fn test_nearest_matching_prefers_scan_order_on_ties() {
        let mut grid = Grid::new(5, 5);
        grid.cell_mut(0, 2).occupant = Occupant::Zombie;
        grid.cell_mut(2, 0).occupant = Occupant::Zombie;
        grid.cell_mut(2, 4).occupant = Occupant::Zombie;

        // All three zombies are 2 away from the center; row-major scan
        // reaches (0, 2) first.
        let found = grid.nearest_matching(2, 2, |o| o.is_zombie());
        assert_eq!(found, (0, 2));
    }

    #[test]
    fn test_nearest_matching_without_target_returns_self() {
        let grid = Grid::new(4, 4);
        assert_eq!(grid.nearest_matching(1, 3, |o| o.is_zombie()), (1, 3));
    }

    #[test]
    fn test_nearest_matching_uses_wraparound_distance() {
        let mut grid = Grid::new(8, 3);
        grid.cell_mut(0, 7).occupant = Occupant::Zombie;
        grid.cell_mut(0, 3).occupant = Occupant::Zombie;

        // From (0, 0): the zombie at column 7 is 1 away around the seam,
        // the one at column 3 is 3 away.
        assert_eq!(grid.nearest_matching(0, 0, |o| o.is_zombie()), (0, 7));
    }

    #[test]
    fn test_population_counts() {
        let mut grid = Grid::new(3, 3);
        grid.cell_mut(0, 0).occupant = Occupant::Human;
        grid.cell_mut(0, 1).occupant = Occupant::Infected { incubation: 2 };
        grid.cell_mut(1, 0).occupant = Occupant::Zombie;
        grid.cell_mut(2, 2).occupant = Occupant::Dead { compost: 1 };

        let counts = grid.population();
        assert_eq!(counts.humans, 1);
        assert_eq!(counts.infected, 1);
        assert_eq!(counts.zombies, 1);
        assert_eq!(counts.dead, 1);
        assert_eq!(counts.empty, 5);
        assert_eq!(counts.total(), 9);
    }

    #[test]
    fn test_edit_terrain_refused_under_agents() {
        let mut grid = Grid::new(2, 2);
        grid.cell_mut(0, 0).occupant = Occupant::Human;

        assert!(!grid.edit_terrain(0, 0, Terrain::Water));
        assert_eq!(grid.cell(0, 0).terrain, Terrain::Ground);

        assert!(grid.edit_terrain(0, 1, Terrain::Water));
        assert_eq!(grid.cell(0, 1).terrain, Terrain::Water);
    }
}
