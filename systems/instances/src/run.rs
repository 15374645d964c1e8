//! Pure generation step of a regeneration.

use maze_forge_core::{CellCoord, MazeError};
use maze_forge_grid::CellGrid;
use maze_forge_system_carver::{CarveSummary, MazeCarver};
use maze_forge_system_shuffler::DirectionShuffler;
use maze_forge_system_start_point::select;
use rand::Rng;

/// Fully carved grid together with the start it was carved from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeRun {
    /// Carved grid.
    pub grid: CellGrid,
    /// Room the carve started from.
    pub start: CellCoord,
    /// Statistics reported by the carver.
    pub summary: CarveSummary,
}

impl MazeRun {
    /// Allocates a grid, selects a start, and carves it to completion.
    ///
    /// The start is drawn from `rng` before any direction order, so a given
    /// seed always yields the same maze. No world side effects happen here.
    pub fn generate<R>(size: u32, rng: &mut R, carver: &mut MazeCarver) -> Result<Self, MazeError>
    where
        R: Rng + ?Sized,
    {
        let mut grid = CellGrid::new(size)?;
        let start = select(size, rng)?;
        let summary = carver.carve(&mut grid, start, &mut DirectionShuffler::new(rng))?;
        Ok(Self {
            grid,
            start,
            summary,
        })
    }
}
