use std::collections::{HashSet, VecDeque};

use maze_forge_core::{CellCoord, CellState, Direction, DirectionSource, MazeError};
use maze_forge_grid::CellGrid;
use maze_forge_system_carver::{CarveSummary, MazeCarver};
use maze_forge_system_shuffler::DirectionShuffler;
use maze_forge_system_start_point::select;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Direction source that repeats one order forever and counts requests.
struct Scripted {
    order: [Direction; 4],
    requests: usize,
}

impl Scripted {
    fn new(order: [Direction; 4]) -> Self {
        Self { order, requests: 0 }
    }
}

impl DirectionSource for Scripted {
    fn next_order(&mut self) -> [Direction; 4] {
        self.requests += 1;
        self.order
    }
}

fn carve_seeded(size: u32, seed: u64) -> (CellGrid, CellCoord, CarveSummary) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut grid = CellGrid::new(size).expect("valid size");
    let start = select(size, &mut rng).expect("valid size");
    let summary = MazeCarver::new()
        .carve(&mut grid, start, &mut DirectionShuffler::new(&mut rng))
        .expect("carve succeeds");
    (grid, start, summary)
}

fn reachable_from(grid: &CellGrid, start: CellCoord) -> HashSet<CellCoord> {
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(cell) = queue.pop_front() {
        for neighbour in grid.neighbours(cell) {
            let open = grid.state_at(neighbour).expect("in range").is_open();
            if open && seen.insert(neighbour) {
                queue.push_back(neighbour);
            }
        }
    }
    seen
}

fn open_adjacencies(grid: &CellGrid) -> usize {
    grid.iter()
        .filter(|(_, state)| state.is_open())
        .map(|(cell, _)| {
            [
                CellCoord::new(cell.row() + 1, cell.column()),
                CellCoord::new(cell.row(), cell.column() + 1),
            ]
            .into_iter()
            .filter(|neighbour| matches!(grid.state_at(*neighbour), Ok(state) if state.is_open()))
            .count()
        })
        .sum()
}

#[test]
fn hand_traced_five_by_five_fixture() {
    let mut grid = CellGrid::new(5).expect("valid size");
    let mut directions = Scripted::new([
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ]);

    let summary = MazeCarver::new()
        .carve(&mut grid, CellCoord::new(1, 1), &mut directions)
        .expect("carve succeeds");

    let expected = "\
#####
#V  #
### #
#   #
#####
";
    assert_eq!(grid.to_string(), expected);
    assert_eq!(
        summary,
        CarveSummary {
            rooms_visited: 4,
            passages_carved: 3,
            peak_depth: 4,
        }
    );
    assert_eq!(directions.requests, 4, "one order is drawn per entered room");
}

#[test]
fn carved_grid_is_a_spanning_tree() {
    for size in (3..=35).step_by(2) {
        for seed in 0..8 {
            let (grid, start, _) = carve_seeded(size, seed);
            let open = grid.iter().filter(|(_, state)| state.is_open()).count();

            let reachable = reachable_from(&grid, start);
            assert_eq!(reachable.len(), open, "size {size} seed {seed}: isolated region");
            assert_eq!(
                open_adjacencies(&grid),
                open - 1,
                "size {size} seed {seed}: cycle detected",
            );
        }
    }
}

#[test]
fn every_interior_room_is_opened() {
    let (grid, _, summary) = carve_seeded(31, 0xfeed);

    let rooms: Vec<CellCoord> = grid
        .iter()
        .map(|(cell, _)| cell)
        .filter(|cell| cell.is_room() && grid.in_carve_range(cell.row(), cell.column()))
        .collect();

    assert_eq!(rooms.len(), 225);
    assert_eq!(summary.rooms_visited, 225);
    assert_eq!(summary.passages_carved, 224);
    for room in rooms {
        assert!(grid.state_at(room).expect("in range").is_open(), "{room} left closed");
    }
}

#[test]
fn border_ring_stays_solid() {
    for seed in 0..16 {
        let (grid, _, _) = carve_seeded(21, seed);
        for (cell, state) in grid.iter() {
            if grid.is_border(cell) {
                assert_eq!(state, CellState::Wall, "seed {seed}: border cell {cell} opened");
            }
        }
    }
}

#[test]
fn open_cells_follow_the_stride_lattice() {
    for seed in 0..16 {
        let (grid, _, _) = carve_seeded(25, seed);
        for (cell, state) in grid.iter().filter(|(_, state)| state.is_open()) {
            let row_odd = cell.row() % 2 == 1;
            let column_odd = cell.column() % 2 == 1;
            assert!(
                row_odd || column_odd,
                "seed {seed}: even/even cell {cell} opened as {state:?}",
            );
        }
    }
}

#[test]
fn only_the_start_remains_visited() {
    let (grid, start, _) = carve_seeded(15, 11);

    assert_eq!(grid.count(CellState::Visited), 1);
    assert_eq!(grid.state_at(start), Ok(CellState::Visited));
}

#[test]
fn same_seed_produces_the_same_maze() {
    let (first, first_start, first_summary) = carve_seeded(31, 2024);
    let (second, second_start, second_summary) = carve_seeded(31, 2024);

    assert_eq!(first_start, second_start);
    assert_eq!(first_summary, second_summary);
    assert_eq!(first, second);
}

#[test]
fn large_grids_do_not_recurse() {
    let mut grid = CellGrid::new(801).expect("valid size");
    let summary = MazeCarver::new()
        .carve(
            &mut grid,
            CellCoord::new(1, 1),
            &mut Scripted::new([
                Direction::Right,
                Direction::Down,
                Direction::Left,
                Direction::Up,
            ]),
        )
        .expect("carve succeeds");

    assert_eq!(summary.rooms_visited, 400 * 400);
    assert_eq!(summary.passages_carved, 400 * 400 - 1);
}

#[test]
fn carver_can_be_reused_between_runs() {
    let mut carver = MazeCarver::new();
    let mut rng = ChaCha8Rng::seed_from_u64(8);

    for _ in 0..3 {
        let mut grid = CellGrid::new(11).expect("valid size");
        let summary = carver
            .carve(&mut grid, CellCoord::new(5, 5), &mut DirectionShuffler::new(&mut rng))
            .expect("carve succeeds");
        assert_eq!(summary.rooms_visited, 25);
    }
}

#[test]
fn starts_off_the_room_lattice_are_rejected() {
    let mut grid = CellGrid::new(7).expect("valid size");
    let mut directions = Scripted::new(Direction::ALL);
    let mut carver = MazeCarver::new();

    for start in [CellCoord::new(2, 1), CellCoord::new(0, 0), CellCoord::new(1, 6)] {
        assert_eq!(
            carver.carve(&mut grid, start, &mut directions),
            Err(MazeError::InvalidStart {
                row: start.row(),
                column: start.column(),
            })
        );
    }
    assert_eq!(
        carver.carve(&mut grid, CellCoord::new(7, 1), &mut directions),
        Err(MazeError::OutOfRange {
            row: 7,
            column: 1,
            size: 7,
        })
    );
    assert_eq!(directions.requests, 0);
    assert_eq!(grid.count(CellState::Wall), 49);
}
