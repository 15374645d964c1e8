use std::collections::HashSet;

use maze_forge_core::{CellCoord, MazeError};
use maze_forge_system_start_point::select;
use rand::{rngs::mock::StepRng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[test]
fn start_is_always_an_interior_room() {
    let mut rng = ChaCha8Rng::seed_from_u64(0xabad_1dea);

    for size in (3..=41).step_by(2) {
        for _ in 0..200 {
            let start = select(size, &mut rng).expect("odd size is valid");
            assert!(start.is_room(), "{start} is not on the room lattice");
            assert!((1..=size - 2).contains(&start.row()));
            assert!((1..=size - 2).contains(&start.column()));
        }
    }
}

#[test]
fn smallest_grid_has_a_single_possible_start() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    for _ in 0..32 {
        assert_eq!(select(3, &mut rng), Ok(CellCoord::new(1, 1)));
    }
}

#[test]
fn every_room_is_eventually_selected() {
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    let seen: HashSet<CellCoord> = (0..2_000)
        .map(|_| select(9, &mut rng).expect("valid size"))
        .collect();

    assert_eq!(seen.len(), 16, "a 9x9 grid has 4x4 rooms");
}

#[test]
fn lowest_draw_selects_the_first_room() {
    let mut rng = StepRng::new(0, 0);

    assert_eq!(select(31, &mut rng), Ok(CellCoord::new(1, 1)));
}

#[test]
fn invalid_sizes_are_rejected_before_drawing() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    assert_eq!(select(2, &mut rng), Err(MazeError::InvalidSize { size: 2 }));
    assert_eq!(select(8, &mut rng), Err(MazeError::InvalidSize { size: 8 }));
}
