#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Randomized depth-first maze carver.
//!
//! The carver turns an all-wall [`CellGrid`] into a perfect maze: every
//! interior room reachable from the start is joined to the others by exactly
//! one path. The walk is the classic recursive backtracker, run on an explicit
//! stack so that large grids cannot exhaust the call stack. Each frame keeps
//! the direction order drawn when its cell was entered and the index of the
//! next direction to try, which reproduces the recursive visitation order and
//! the order of draws from the [`DirectionSource`] exactly.

use log::trace;
use maze_forge_core::{Axis, CellCoord, CellState, Direction, DirectionSource, MazeError};
use maze_forge_grid::CellGrid;

/// Statistics describing a completed carve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CarveSummary {
    /// Number of room cells entered, including the start.
    pub rooms_visited: usize,
    /// Number of passage cells opened between rooms.
    pub passages_carved: usize,
    /// Deepest explicit stack observed during the walk.
    pub peak_depth: usize,
}

/// Depth-first carver that reuses its stack allocation between runs.
#[derive(Debug, Default)]
pub struct MazeCarver {
    stack: Vec<Frame>,
}

#[derive(Clone, Copy, Debug)]
struct Frame {
    cell: CellCoord,
    order: [Direction; 4],
    next: usize,
    entered_along: Option<Axis>,
}

impl Frame {
    fn next_direction(&mut self) -> Option<Direction> {
        let direction = self.order.get(self.next).copied()?;
        self.next += 1;
        Some(direction)
    }
}

impl MazeCarver {
    /// Creates a carver with an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Carves `grid` in place starting from `start`.
    ///
    /// The start must be an interior room cell (both indices odd, strictly
    /// inside the border). It is left as [`CellState::Visited`]; every other
    /// room and passage the walk reaches ends as [`CellState::Empty`], and all
    /// remaining cells keep their state.
    pub fn carve<S>(
        &mut self,
        grid: &mut CellGrid,
        start: CellCoord,
        directions: &mut S,
    ) -> Result<CarveSummary, MazeError>
    where
        S: DirectionSource + ?Sized,
    {
        let _ = grid.state_at(start)?;
        if !start.is_room() || !grid.in_carve_range(start.row(), start.column()) {
            return Err(MazeError::InvalidStart {
                row: start.row(),
                column: start.column(),
            });
        }

        self.stack.clear();
        let mut summary = CarveSummary::default();
        self.enter(grid, start, None, directions, &mut summary)?;

        while let Some(frame) = self.stack.last_mut() {
            let origin = frame.cell;
            let Some(direction) = frame.next_direction() else {
                self.finish_top(grid, &mut summary)?;
                continue;
            };

            let Some(candidate) = origin.step(direction) else {
                continue;
            };
            if !grid.in_carve_range(candidate.row(), candidate.column()) {
                continue;
            }
            if grid.state_at(candidate)? != CellState::Wall {
                continue;
            }

            self.enter(
                grid,
                candidate,
                Some(direction.axis()),
                directions,
                &mut summary,
            )?;
        }

        trace!(
            "carved {} rooms and {} passages from {start} (peak depth {})",
            summary.rooms_visited,
            summary.passages_carved,
            summary.peak_depth
        );
        Ok(summary)
    }

    fn enter<S>(
        &mut self,
        grid: &mut CellGrid,
        cell: CellCoord,
        entered_along: Option<Axis>,
        directions: &mut S,
        summary: &mut CarveSummary,
    ) -> Result<(), MazeError>
    where
        S: DirectionSource + ?Sized,
    {
        grid.set_at(cell, CellState::Visited)?;
        self.stack.push(Frame {
            cell,
            order: directions.next_order(),
            next: 0,
            entered_along,
        });
        summary.rooms_visited += 1;
        summary.peak_depth = summary.peak_depth.max(self.stack.len());
        Ok(())
    }

    /// Pops an exhausted frame and, when it has a parent, opens the passage
    /// between the two rooms followed by the child room itself.
    fn finish_top(
        &mut self,
        grid: &mut CellGrid,
        summary: &mut CarveSummary,
    ) -> Result<(), MazeError> {
        let Some(finished) = self.stack.pop() else {
            return Ok(());
        };
        let (Some(parent), Some(axis)) = (self.stack.last(), finished.entered_along) else {
            return Ok(());
        };

        let passage = parent.cell.passage_toward(finished.cell, axis);
        grid.set_at(passage, CellState::Empty)?;
        grid.set_at(finished.cell, CellState::Empty)?;
        summary.passages_carved += 1;
        Ok(())
    }
}
