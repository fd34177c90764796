use alloc::collections::BTreeSet;
use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Square grid of cells, fixed in size for the lifetime of a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    /// An all-unclaimed board of side `size` (at least 1).
    pub fn new(size: Coord) -> Self {
        let size = size.max(1);
        Self {
            cells: Array2::from_elem((size, size).to_nd_index(), Cell::UNCLAIMED),
        }
    }

    pub fn from_cells(cells: Array2<Cell>) -> Result<Self> {
        let (rows, cols) = cells.dim();
        if rows == 0 || rows != cols || Coord::try_from(rows).is_err() {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self { cells })
    }

    /// Builds a board of side `size` from `(coords, cell)` pairs, leaving the rest unclaimed.
    pub fn from_placements(size: Coord, placements: &[(Coord2, Cell)]) -> Result<Self> {
        let mut board = Self::new(size);
        for &(coords, cell) in placements {
            let coords = board.validate_coords(coords)?;
            board[coords] = cell;
        }
        Ok(board)
    }

    pub fn size(&self) -> Coord {
        // `from_cells` and `new` both guarantee the side fits in `Coord`
        self.cells.dim().0 as Coord
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let size = self.size();
        coords.0 < size && coords.1 < size
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self[coords]
    }

    pub fn capacity_at(&self, coords: Coord2) -> u8 {
        capacity(coords, self.size())
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        neighbors(coords, self.size())
    }

    pub fn neighbor_vec(&self, coords: Coord2) -> SmallVec<[Coord2; 4]> {
        self.iter_neighbors(coords).collect()
    }

    /// All coordinates in row-major order.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let size = self.size();
        (0..size).flat_map(move |row| (0..size).map(move |col| (row, col)))
    }

    /// Cells with their coordinates, row-major.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.iter_coords().map(|coords| (coords, self[coords]))
    }

    pub fn player_dots(&self, player: PlayerId) -> DotCount {
        self.cells
            .iter()
            .map(|cell| DotCount::from(cell.dots_of(player)))
            .sum()
    }

    /// Per-player dot totals indexed by player id.
    pub fn dot_totals(&self, player_count: usize) -> Vec<DotCount> {
        let mut totals = vec![0; player_count];
        for cell in self.cells.iter() {
            if let Some(total) = cell.owner.and_then(|owner| totals.get_mut(usize::from(owner))) {
                *total += DotCount::from(cell.dots);
            }
        }
        totals
    }

    pub fn total_dots(&self) -> DotCount {
        self.cells
            .iter()
            .filter(|cell| cell.owner.is_some())
            .map(|cell| DotCount::from(cell.dots))
            .sum()
    }

    /// Players owning at least one dot.
    pub fn players_with_dots(&self) -> BTreeSet<PlayerId> {
        self.cells
            .iter()
            .filter(|cell| cell.dots > 0)
            .filter_map(|cell| cell.owner)
            .collect()
    }

    /// Whether every cell is below its capacity.
    pub fn is_stable(&self) -> bool {
        self.iter_cells()
            .all(|(coords, cell)| cell.dots < self.capacity_at(coords))
    }

    /// Coordinates `player` may place on, row-major.
    pub fn legal_moves(&self, player: PlayerId) -> Vec<Coord2> {
        self.iter_cells()
            .filter(|(_, cell)| cell.accepts(player))
            .map(|(coords, _)| coords)
            .collect()
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}
