//! Ownership of the wall objects materialized for the current maze.

use log::{trace, warn};
use maze_forge_core::{CellCoord, Vec3, WallWorld};

/// World units between the centres of two adjacent cells.
pub const DEFAULT_CELL_SPACING: f32 = 100.0;

/// Maps a grid cell onto the world plane: rows along X, columns along Y.
#[must_use]
pub fn position_for(cell: CellCoord, spacing: f32) -> Vec3 {
    Vec3::new(
        cell.row() as f32 * spacing,
        cell.column() as f32 * spacing,
        0.0,
    )
}

/// Request to materialize one wall cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallPlacement {
    /// Grid cell the wall stands for.
    pub cell: CellCoord,
    /// World position handed to [`WallWorld::spawn`].
    pub position: Vec3,
}

impl WallPlacement {
    /// Creates a placement for `cell` using the provided cell spacing.
    #[must_use]
    pub fn at(cell: CellCoord, spacing: f32) -> Self {
        Self {
            cell,
            position: position_for(cell, spacing),
        }
    }
}

/// Counts reported by a completed [`SpawnedWallSet::replace_all`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplaceOutcome {
    /// Handles from the previous maze that were destroyed.
    pub destroyed: usize,
    /// Handles spawned for the new maze.
    pub spawned: usize,
}

/// Ordered handles of every wall currently alive in the world.
///
/// The set only changes wholesale: the old walls are destroyed before the
/// first new wall is spawned. When the world fails part way, the set keeps
/// exactly the handles that are still alive: the not-yet-destroyed handles
/// (including the one whose destroy failed) or the handles spawned so far
/// (including one whose label failed).
#[derive(Debug)]
pub struct SpawnedWallSet<H> {
    handles: Vec<H>,
}

impl<H> Default for SpawnedWallSet<H> {
    fn default() -> Self {
        Self {
            handles: Vec::new(),
        }
    }
}

impl<H> SpawnedWallSet<H> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles in spawn order.
    #[must_use]
    pub fn handles(&self) -> &[H] {
        &self.handles
    }

    /// Number of live walls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Reports whether no walls are alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Destroys every held wall, then spawns and labels one wall per
    /// placement in iteration order.
    pub fn replace_all<W, I>(
        &mut self,
        world: &mut W,
        placements: I,
    ) -> Result<ReplaceOutcome, W::Error>
    where
        W: WallWorld<Handle = H> + ?Sized,
        I: IntoIterator<Item = WallPlacement>,
    {
        let destroyed = self.destroy_all(world)?;

        let mut spawned = 0;
        for placement in placements {
            let handle = world.spawn(placement.position).map_err(|error| {
                warn!("spawning wall {} failed after {spawned} walls", placement.cell);
                error
            })?;
            let index = self.handles.len();
            self.handles.push(handle);
            spawned += 1;

            let label = placement.cell.to_string();
            world.label(&self.handles[index], &label).map_err(|error| {
                warn!("labelling wall {label} failed");
                error
            })?;
            trace!("spawned wall {label} at {}", placement.position);
        }

        Ok(ReplaceOutcome { destroyed, spawned })
    }

    /// Destroys every held wall in spawn order and empties the set.
    pub fn destroy_all<W>(&mut self, world: &mut W) -> Result<usize, W::Error>
    where
        W: WallWorld<Handle = H> + ?Sized,
    {
        let failure = self
            .handles
            .iter()
            .enumerate()
            .find_map(|(index, handle)| world.destroy(handle).err().map(|error| (index, error)));

        if let Some((index, error)) = failure {
            warn!(
                "destroying wall {index} of {} failed; keeping the remainder",
                self.handles.len()
            );
            let _ = self.handles.drain(..index);
            return Err(error);
        }

        let destroyed = self.handles.len();
        self.handles.clear();
        Ok(destroyed)
    }
}
