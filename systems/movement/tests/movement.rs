use std::collections::HashSet;

use quickcheck::{quickcheck, TestResult};
use ricochet_core::{CellCoord, Direction};
use ricochet_system_movement::plan_slide;

/// Toy board: open 16x16 grid with sentinel walls, optional blocked cells
/// and optional cells that refuse entry from one direction only.
struct ToyBoard {
    occupied: HashSet<CellCoord>,
    refusals: Vec<(CellCoord, Direction)>,
}

impl ToyBoard {
    fn open() -> Self {
        Self {
            occupied: HashSet::new(),
            refusals: Vec::new(),
        }
    }

    fn can_enter(&self, cell: CellCoord, direction: Direction) -> bool {
        cell.is_on_board()
            && !self.occupied.contains(&cell)
            && !self
                .refusals
                .iter()
                .any(|(refused, refused_direction)| *refused == cell && *refused_direction == direction)
    }
}

#[test]
fn slides_until_sentinel_wall() {
    let board = ToyBoard::open();
    let plan = plan_slide(CellCoord::new(3, 4), Direction::Down, |cell, direction| {
        board.can_enter(cell, direction)
    });

    assert_eq!(plan.final_cell(), CellCoord::new(15, 4));
    assert_eq!(plan.cells_traversed(), 12);
    assert_eq!(plan.origin(), CellCoord::new(3, 4));
    assert_eq!(plan.direction(), Direction::Down);
}

#[test]
fn stops_in_front_of_another_robot() {
    let mut board = ToyBoard::open();
    let _ = board.occupied.insert(CellCoord::new(3, 9));
    let plan = plan_slide(CellCoord::new(3, 1), Direction::Right, |cell, direction| {
        board.can_enter(cell, direction)
    });

    assert_eq!(plan.final_cell(), CellCoord::new(3, 8));
    assert_eq!(plan.cells_traversed(), 7);
}

#[test]
fn wall_is_only_checked_on_destination_cell() {
    let mut board = ToyBoard::open();
    // (4,1) refuses robots arriving from above; leaving it upward stays legal.
    board.refusals.push((CellCoord::new(4, 1), Direction::Down));

    let down = plan_slide(CellCoord::new(1, 1), Direction::Down, |cell, direction| {
        board.can_enter(cell, direction)
    });
    assert_eq!(down.final_cell(), CellCoord::new(3, 1));

    let up = plan_slide(CellCoord::new(4, 1), Direction::Up, |cell, direction| {
        board.can_enter(cell, direction)
    });
    assert_eq!(up.final_cell(), CellCoord::new(0, 1));
}

#[test]
fn blocked_slide_is_wasted_and_keeps_cell() {
    let board = ToyBoard::open();
    let plan = plan_slide(CellCoord::new(0, 7), Direction::Up, |cell, direction| {
        board.can_enter(cell, direction)
    });

    assert!(plan.is_wasted());
    assert_eq!(plan.final_cell(), CellCoord::new(0, 7));
}

#[test]
fn repeated_slide_after_block_is_idempotent() {
    fn property(row: u8, column: u8, direction_index: u8) -> TestResult {
        let origin = CellCoord::new(i32::from(row % 16), i32::from(column % 16));
        let direction = Direction::ALL[usize::from(direction_index % 4)];
        let board = ToyBoard::open();

        let first = plan_slide(origin, direction, |cell, direction| board.can_enter(cell, direction));
        let second = plan_slide(first.final_cell(), direction, |cell, direction| {
            board.can_enter(cell, direction)
        });

        TestResult::from_bool(
            second.final_cell() == first.final_cell() && second.cells_traversed() == 0,
        )
    }

    quickcheck(property as fn(u8, u8, u8) -> TestResult);
}
