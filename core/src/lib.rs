#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Forge crates.
//!
//! This crate defines the vocabulary that connects the grid model, the pure
//! carving systems, and the instance manager that materializes walls. Systems
//! mutate a [`CellState`] grid addressed by [`CellCoord`] values, step across
//! it in [`Direction`] increments, and report precondition failures through
//! [`MazeError`]. Hosts plug their scene into the lifecycle by implementing
//! [`WallWorld`].

use std::fmt;

pub use glam::Vec3;
use thiserror::Error;

/// Side length used when the host does not configure one.
pub const DEFAULT_MAZE_SIZE: u32 = 31;

/// Smallest side length that still leaves an interior to carve.
pub const MIN_MAZE_SIZE: u32 = 3;

/// Largest side length accepted; keeps a grid within a few tens of megabytes.
pub const MAX_MAZE_SIZE: u32 = 4095;

/// Distance, in cells, between two neighbouring rooms.
pub const CARVE_STRIDE: u32 = 2;

/// State held by a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellState {
    /// Solid cell that the host materializes as a wall object.
    Wall,
    /// Carved cell that is part of the maze.
    Empty,
    /// Cell the carver has entered but not yet finalized.
    Visited,
}

impl CellState {
    /// Reports whether the cell is traversable, i.e. anything but a wall.
    #[must_use]
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

/// Axis along which a carving step travels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Movement changes the row index.
    Row,
    /// Movement changes the column index.
    Column,
}

/// Cardinal carving directions. Each step skips one passage cell and lands on
/// the next room cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Toward decreasing column indices.
    Left,
    /// Toward decreasing row indices.
    Up,
    /// Toward increasing column indices.
    Right,
    /// Toward increasing row indices.
    Down,
}

impl Direction {
    /// Canonical, unshuffled direction order.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    /// Row and column offsets applied by a single carving step.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        let stride = CARVE_STRIDE as i32;
        match self {
            Self::Left => (0, -stride),
            Self::Up => (-stride, 0),
            Self::Right => (0, stride),
            Self::Down => (stride, 0),
        }
    }

    /// Axis the direction travels along.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Column,
            Self::Up | Self::Down => Axis::Row,
        }
    }
}

/// Supplies the order in which the carver tries directions from a freshly
/// entered cell. Called exactly once per entered cell.
pub trait DirectionSource {
    /// Produces the next direction order.
    fn next_order(&mut self) -> [Direction; 4];
}

/// Location of a single grid cell expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Reports whether the cell sits on the room lattice (both indices odd).
    #[must_use]
    pub const fn is_room(&self) -> bool {
        self.row % 2 == 1 && self.column % 2 == 1
    }

    /// Cell reached by taking one carving step, or `None` when the step would
    /// leave the non-negative quadrant.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        let (row_delta, column_delta) = direction.delta();
        let row = self.row.checked_add_signed(row_delta)?;
        let column = self.column.checked_add_signed(column_delta)?;
        Some(CellCoord::new(row, column))
    }

    /// Passage cell strictly between `self` and a room one carving step away.
    ///
    /// Row-axis moves keep the column of `self`; column-axis moves keep its row.
    #[must_use]
    pub fn passage_toward(self, neighbour: CellCoord, axis: Axis) -> CellCoord {
        match axis {
            Axis::Row => CellCoord::new(midpoint(self.row, neighbour.row), self.column),
            Axis::Column => CellCoord::new(self.row, midpoint(self.column, neighbour.column)),
        }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.column)
    }
}

fn midpoint(a: u32, b: u32) -> u32 {
    a.min(b) + a.abs_diff(b) / 2
}

/// Precondition failures raised by the maze crates.
///
/// Every variant is detected before any [`WallWorld`] call is issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MazeError {
    /// The requested side length is even or outside
    /// [`MIN_MAZE_SIZE`]`..=`[`MAX_MAZE_SIZE`].
    #[error(
        "maze size {size} must be odd and between {} and {}",
        MIN_MAZE_SIZE,
        MAX_MAZE_SIZE
    )]
    InvalidSize {
        /// Side length that was rejected.
        size: u32,
    },
    /// A coordinate fell outside `[0, size)`.
    #[error("cell {row},{column} lies outside a {size}x{size} grid")]
    OutOfRange {
        /// Requested row index.
        row: u32,
        /// Requested column index.
        column: u32,
        /// Side length of the grid that was addressed.
        size: u32,
    },
    /// A carve was requested from a cell off the interior room lattice.
    #[error("cell {row},{column} is not an interior room cell")]
    InvalidStart {
        /// Row index of the rejected start.
        row: u32,
        /// Column index of the rejected start.
        column: u32,
    },
    /// A regeneration was requested while another one was still running.
    #[error("a maze regeneration is already in progress")]
    ReentrantRegeneration,
}

/// Scene collaborator that owns the physical representation of walls.
///
/// The maze crates decide where walls belong; implementors decide what a wall
/// is. Handles returned by [`WallWorld::spawn`] must be unique for as long as
/// they are live.
pub trait WallWorld {
    /// Opaque reference to a spawned wall object.
    type Handle;
    /// Failure reported by the scene; surfaced to callers unchanged.
    type Error;

    /// Creates a wall object at the provided world position.
    fn spawn(&mut self, position: Vec3) -> Result<Self::Handle, Self::Error>;

    /// Removes a wall object previously returned by [`WallWorld::spawn`].
    fn destroy(&mut self, handle: &Self::Handle) -> Result<(), Self::Error>;

    /// Attaches a human-readable tag to a live wall object.
    fn label(&mut self, handle: &Self::Handle, text: &str) -> Result<(), Self::Error>;
}
