#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Start-cell policy for the maze carver.

use maze_forge_core::{CellCoord, MazeError};
use maze_forge_grid::CellGrid;
use rand::Rng;

/// Picks a random interior room cell for a grid of side length `size`.
///
/// The row and then the column are drawn uniformly from `1..=size - 1` and
/// snapped down to the nearest odd value, so the result always lies in
/// `1..=size - 2` with both indices odd.
pub fn select<R>(size: u32, rng: &mut R) -> Result<CellCoord, MazeError>
where
    R: Rng + ?Sized,
{
    CellGrid::validate_size(size)?;
    let row = snap_to_odd(rng.gen_range(1..=size - 1));
    let column = snap_to_odd(rng.gen_range(1..=size - 1));
    Ok(CellCoord::new(row, column))
}

fn snap_to_odd(value: u32) -> u32 {
    if value % 2 == 0 {
        value - 1
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_values_drop_to_the_previous_odd() {
        assert_eq!(snap_to_odd(2), 1);
        assert_eq!(snap_to_odd(30), 29);
        assert_eq!(snap_to_odd(7), 7);
    }
}
