use std::{collections::BTreeMap, fmt};

use log::trace;
use maze_forge_core::{Vec3, WallWorld};
use thiserror::Error;

/// Identifier handed out for every wall the console world spawns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct WallId(u32);

impl fmt::Display for WallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Failures reported by the console world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub(crate) enum ConsoleWorldError {
    /// The handle does not refer to a live wall.
    #[error("wall {0} is not alive")]
    UnknownWall(WallId),
    /// Every handle value has been used once.
    #[error("wall handles exhausted")]
    HandlesExhausted,
}

#[derive(Clone, Debug)]
struct ConsoleWall {
    position: Vec3,
    label: Option<String>,
}

/// In-memory scene that keeps spawned walls and can draw them as text.
#[derive(Debug, Default)]
pub(crate) struct ConsoleWorld {
    next_id: u32,
    walls: BTreeMap<WallId, ConsoleWall>,
}

impl ConsoleWorld {
    /// Number of walls currently alive.
    pub(crate) fn live_count(&self) -> usize {
        self.walls.len()
    }

    /// One line per live wall: its label (or `?` when unlabelled) and position.
    pub(crate) fn listing(&self) -> impl Iterator<Item = String> + '_ {
        self.walls.values().map(|wall| {
            let label = wall.label.as_deref().unwrap_or("?");
            format!("{label} @ {}", wall.position)
        })
    }

    /// Draws the live walls on a `size` by `size` character grid, mapping
    /// positions back to cells with the given spacing.
    pub(crate) fn render(&self, size: u32, spacing: f32) -> String {
        let Ok(width) = usize::try_from(size) else {
            return String::new();
        };
        let mut rows = vec![vec![' '; width]; width];
        for wall in self.walls.values() {
            let row = (wall.position.x / spacing).round();
            let column = (wall.position.y / spacing).round();
            if row < 0.0 || column < 0.0 {
                continue;
            }
            let (row, column) = (row as usize, column as usize);
            if let Some(cell) = rows.get_mut(row).and_then(|cells| cells.get_mut(column)) {
                *cell = '#';
            }
        }

        let mut rendered = String::with_capacity(width * (width + 1));
        for cells in rows {
            rendered.extend(cells);
            rendered.push('\n');
        }
        rendered
    }
}

impl WallWorld for ConsoleWorld {
    type Handle = WallId;
    type Error = ConsoleWorldError;

    fn spawn(&mut self, position: Vec3) -> Result<WallId, ConsoleWorldError> {
        let id = WallId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(ConsoleWorldError::HandlesExhausted)?;
        let _ = self.walls.insert(
            id,
            ConsoleWall {
                position,
                label: None,
            },
        );
        Ok(id)
    }

    fn destroy(&mut self, handle: &WallId) -> Result<(), ConsoleWorldError> {
        let _ = self
            .walls
            .remove(handle)
            .ok_or(ConsoleWorldError::UnknownWall(*handle))?;
        Ok(())
    }

    fn label(&mut self, handle: &WallId, text: &str) -> Result<(), ConsoleWorldError> {
        let wall = self
            .walls
            .get_mut(handle)
            .ok_or(ConsoleWorldError::UnknownWall(*handle))?;
        trace!("labelled wall {handle} as {text}");
        wall.label = Some(text.to_owned());
        Ok(())
    }
}
