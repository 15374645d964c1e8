#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Dense square cell grid that the carving systems mutate in place.

use std::fmt;

use maze_forge_core::{CellCoord, CellState, MazeError, MAX_MAZE_SIZE, MIN_MAZE_SIZE};

/// Odd-sized square grid of [`CellState`] values stored in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellGrid {
    size: u32,
    cells: Vec<CellState>,
}

impl CellGrid {
    /// Creates a grid of the provided side length with every cell set to
    /// [`CellState::Wall`].
    pub fn new(size: u32) -> Result<Self, MazeError> {
        Self::validate_size(size)?;
        let capacity_u64 = u64::from(size) * u64::from(size);
        let capacity =
            usize::try_from(capacity_u64).map_err(|_| MazeError::InvalidSize { size })?;
        Ok(Self {
            size,
            cells: vec![CellState::Wall; capacity],
        })
    }

    /// Checks that `size` is odd and within [`MIN_MAZE_SIZE`]`..=`[`MAX_MAZE_SIZE`].
    pub fn validate_size(size: u32) -> Result<(), MazeError> {
        if !(MIN_MAZE_SIZE..=MAX_MAZE_SIZE).contains(&size) || size % 2 == 0 {
            return Err(MazeError::InvalidSize { size });
        }
        Ok(())
    }

    /// Side length of the grid.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Reads the state stored at the provided coordinates.
    pub fn get(&self, row: u32, column: u32) -> Result<CellState, MazeError> {
        let index = self.checked_index(row, column)?;
        Ok(self.cells[index])
    }

    /// Overwrites the state stored at the provided coordinates.
    pub fn set(&mut self, row: u32, column: u32, state: CellState) -> Result<(), MazeError> {
        let index = self.checked_index(row, column)?;
        self.cells[index] = state;
        Ok(())
    }

    /// Reads the state of a cell addressed by coordinate.
    pub fn state_at(&self, cell: CellCoord) -> Result<CellState, MazeError> {
        self.get(cell.row(), cell.column())
    }

    /// Overwrites the state of a cell addressed by coordinate.
    pub fn set_at(&mut self, cell: CellCoord, state: CellState) -> Result<(), MazeError> {
        self.set(cell.row(), cell.column(), state)
    }

    /// Reports whether the cell lies strictly inside the permanent border.
    #[must_use]
    pub fn in_carve_range(&self, row: u32, column: u32) -> bool {
        let last = self.size - 1;
        row > 0 && row < last && column > 0 && column < last
    }

    /// Reports whether the cell lies on the outermost ring.
    #[must_use]
    pub fn is_border(&self, cell: CellCoord) -> bool {
        let last = self.size - 1;
        cell.row() == 0 || cell.column() == 0 || cell.row() == last || cell.column() == last
    }

    /// Iterates every cell with its coordinate in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, CellState)> + '_ {
        let size = self.size;
        (0..size)
            .flat_map(move |row| (0..size).map(move |column| CellCoord::new(row, column)))
            .zip(self.cells.iter().copied())
    }

    /// Coordinates of every [`CellState::Wall`] cell in row-major order.
    pub fn wall_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.iter()
            .filter(|(_, state)| *state == CellState::Wall)
            .map(|(cell, _)| cell)
    }

    /// Number of cells currently holding `state`.
    #[must_use]
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|cell| **cell == state).count()
    }

    /// Orthogonal neighbours of `cell` that lie inside the grid.
    pub fn neighbours(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> {
        let size = self.size;
        let row = cell.row();
        let column = cell.column();
        [
            row.checked_sub(1).map(|up| CellCoord::new(up, column)),
            column.checked_sub(1).map(|left| CellCoord::new(row, left)),
            row.checked_add(1).map(|down| CellCoord::new(down, column)),
            column.checked_add(1).map(|right| CellCoord::new(row, right)),
        ]
        .into_iter()
        .flatten()
        .filter(move |neighbour| neighbour.row() < size && neighbour.column() < size)
    }

    fn checked_index(&self, row: u32, column: u32) -> Result<usize, MazeError> {
        self.index(row, column).ok_or(MazeError::OutOfRange {
            row,
            column,
            size: self.size,
        })
    }

    fn index(&self, row: u32, column: u32) -> Option<usize> {
        if row < self.size && column < self.size {
            let row = usize::try_from(row).ok()?;
            let column = usize::try_from(column).ok()?;
            let width = usize::try_from(self.size).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

impl fmt::Display for CellGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (cell, state) in self.iter() {
            let glyph = match state {
                CellState::Wall => '#',
                CellState::Empty => ' ',
                CellState::Visited => 'V',
            };
            write!(f, "{glyph}")?;
            if cell.column() + 1 == self.size {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
