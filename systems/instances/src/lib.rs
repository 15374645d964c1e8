#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Regeneration lifecycle for materialized mazes.
//!
//! A [`MazeInstanceManager`] owns the walls it spawned into a [`WallWorld`].
//! Each regeneration first carves a brand-new maze without touching the world,
//! then destroys every wall of the previous maze, and finally spawns and
//! labels one wall per `Wall` cell of the new grid in row-major order. Hosts
//! that trigger regenerations from event callbacks can share the manager
//! through [`SharedMazeInstances`], which rejects overlapping requests.

mod run;
mod walls;

use std::{cell::RefCell, rc::Rc};

use log::{debug, info};
use maze_forge_core::{CellCoord, MazeError, WallWorld};
use maze_forge_grid::CellGrid;
use maze_forge_system_carver::{CarveSummary, MazeCarver};
use rand::Rng;
use thiserror::Error;

pub use run::MazeRun;
pub use walls::{
    position_for, ReplaceOutcome, SpawnedWallSet, WallPlacement, DEFAULT_CELL_SPACING,
};

/// Failure of a regeneration request.
#[derive(Debug, Error)]
pub enum RegenerationError<E> {
    /// A precondition failed before any world call was issued.
    #[error(transparent)]
    Maze(#[from] MazeError),
    /// The world collaborator failed; its error is passed through untouched.
    #[error("world collaborator failed: {0}")]
    World(E),
}

/// Summary of a completed regeneration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegenerationReport {
    /// Room the new maze was carved from.
    pub start: CellCoord,
    /// Statistics reported by the carver.
    pub carve: CarveSummary,
    /// Walls of the previous maze that were destroyed.
    pub destroyed: usize,
    /// Walls spawned for the new maze.
    pub spawned: usize,
}

/// Owns the walls of the most recently materialized maze.
#[derive(Debug)]
pub struct MazeInstanceManager<H> {
    walls: SpawnedWallSet<H>,
    carver: MazeCarver,
    cell_spacing: f32,
    last_grid: Option<CellGrid>,
}

impl<H> Default for MazeInstanceManager<H> {
    fn default() -> Self {
        Self::with_cell_spacing(DEFAULT_CELL_SPACING)
    }
}

impl<H> MazeInstanceManager<H> {
    /// Creates a manager that places walls [`DEFAULT_CELL_SPACING`] apart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a manager that places walls `cell_spacing` world units apart.
    #[must_use]
    pub fn with_cell_spacing(cell_spacing: f32) -> Self {
        Self {
            walls: SpawnedWallSet::new(),
            carver: MazeCarver::new(),
            cell_spacing,
            last_grid: None,
        }
    }

    /// Distance between adjacent wall positions.
    #[must_use]
    pub fn cell_spacing(&self) -> f32 {
        self.cell_spacing
    }

    /// Walls currently alive in the world.
    #[must_use]
    pub fn walls(&self) -> &SpawnedWallSet<H> {
        &self.walls
    }

    /// Grid of the last regeneration that completed without error.
    ///
    /// Cleared once a world failure or [`MazeInstanceManager::clear`] has
    /// removed walls, since the world no longer shows that maze.
    #[must_use]
    pub fn last_grid(&self) -> Option<&CellGrid> {
        self.last_grid.as_ref()
    }

    /// Replaces the current maze with a freshly carved one.
    ///
    /// Size validation and carving finish before the first world call, so a
    /// rejected request leaves the world, the wall set and the last grid
    /// untouched. A world failure leaves the wall set holding the handles
    /// still alive and drops the last grid.
    pub fn regenerate<R, W>(
        &mut self,
        size: u32,
        rng: &mut R,
        world: &mut W,
    ) -> Result<RegenerationReport, RegenerationError<W::Error>>
    where
        R: Rng + ?Sized,
        W: WallWorld<Handle = H> + ?Sized,
    {
        let run = MazeRun::generate(size, rng, &mut self.carver)?;
        debug!(
            "carved {size}x{size} maze from {} ({} rooms)",
            run.start, run.summary.rooms_visited
        );

        let spacing = self.cell_spacing;
        let placements = run
            .grid
            .wall_cells()
            .map(|cell| WallPlacement::at(cell, spacing));
        let outcome = match self.walls.replace_all(world, placements) {
            Ok(outcome) => outcome,
            Err(error) => {
                self.last_grid = None;
                return Err(RegenerationError::World(error));
            }
        };

        info!(
            "regenerated maze: destroyed {} walls, spawned {}",
            outcome.destroyed, outcome.spawned
        );
        let report = RegenerationReport {
            start: run.start,
            carve: run.summary,
            destroyed: outcome.destroyed,
            spawned: outcome.spawned,
        };
        self.last_grid = Some(run.grid);
        Ok(report)
    }

    /// Destroys every live wall without spawning a replacement.
    pub fn clear<W>(&mut self, world: &mut W) -> Result<usize, W::Error>
    where
        W: WallWorld<Handle = H> + ?Sized,
    {
        let destroyed = self.walls.destroy_all(world)?;
        self.last_grid = None;
        Ok(destroyed)
    }
}

/// Shared handle to a [`MazeInstanceManager`] for event-driven hosts.
///
/// Clones refer to the same manager. A regeneration requested while another
/// one is running through any clone fails with
/// [`MazeError::ReentrantRegeneration`] before touching the world.
#[derive(Debug)]
pub struct SharedMazeInstances<H> {
    inner: Rc<RefCell<MazeInstanceManager<H>>>,
}

impl<H> Clone for SharedMazeInstances<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<H> SharedMazeInstances<H> {
    /// Wraps the provided manager.
    #[must_use]
    pub fn new(manager: MazeInstanceManager<H>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(manager)),
        }
    }

    /// Runs [`MazeInstanceManager::regenerate`] unless one is already running.
    pub fn regenerate<R, W>(
        &self,
        size: u32,
        rng: &mut R,
        world: &mut W,
    ) -> Result<RegenerationReport, RegenerationError<W::Error>>
    where
        R: Rng + ?Sized,
        W: WallWorld<Handle = H> + ?Sized,
    {
        let mut manager = self
            .inner
            .try_borrow_mut()
            .map_err(|_| MazeError::ReentrantRegeneration)?;
        manager.regenerate(size, rng, world)
    }

    /// Number of live walls, or `None` while a regeneration is running.
    #[must_use]
    pub fn wall_count(&self) -> Option<usize> {
        let manager = self.inner.try_borrow().ok()?;
        Some(manager.walls().len())
    }
}
