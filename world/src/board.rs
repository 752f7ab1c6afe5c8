//! Board model: fixed entry flags and targets plus the canonical occupancy.

use ricochet_core::{CellCoord, Direction, RobotColor, BOARD_SIZE, ROBOT_COUNT};

use crate::layout::Layout;

const CELL_COUNT: usize = (BOARD_SIZE * BOARD_SIZE) as usize;

/// Set of slide directions a cell may be entered with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntryFlags(u8);

impl EntryFlags {
    /// Flags of a cell that accepts robots from every side.
    pub const OPEN: Self = Self(0b1111);
    /// Flags of a sentinel wall cell.
    pub const CLOSED: Self = Self(0);

    const fn bit(direction: Direction) -> u8 {
        match direction {
            Direction::Up => 0b0001,
            Direction::Down => 0b0010,
            Direction::Left => 0b0100,
            Direction::Right => 0b1000,
        }
    }

    /// Reports whether a robot sliding in `direction` may enter the cell.
    #[must_use]
    pub const fn allows(self, direction: Direction) -> bool {
        self.0 & Self::bit(direction) != 0
    }

    /// Returns a copy of the flags that refuses `direction`.
    #[must_use]
    pub const fn refusing(self, direction: Direction) -> Self {
        Self(self.0 & !Self::bit(direction))
    }

    /// Entry from the row below, i.e. while sliding up.
    #[must_use]
    pub const fn enterable_from_below(self) -> bool {
        self.allows(Direction::Up)
    }

    /// Entry from the row above, i.e. while sliding down.
    #[must_use]
    pub const fn enterable_from_above(self) -> bool {
        self.allows(Direction::Down)
    }

    /// Entry from the column to the right, i.e. while sliding left.
    #[must_use]
    pub const fn enterable_from_right(self) -> bool {
        self.allows(Direction::Left)
    }

    /// Entry from the column to the left, i.e. while sliding right.
    #[must_use]
    pub const fn enterable_from_left(self) -> bool {
        self.allows(Direction::Right)
    }
}

/// Snapshot of everything the board knows about one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    entry: EntryFlags,
    target: Option<RobotColor>,
    occupant: Option<RobotColor>,
}

impl Cell {
    const SENTINEL: Self = Self {
        entry: EntryFlags::CLOSED,
        target: None,
        occupant: None,
    };

    /// Directions the cell may be entered with.
    #[must_use]
    pub const fn entry(&self) -> EntryFlags {
        self.entry
    }

    /// Robot this cell scores for, if any.
    #[must_use]
    pub const fn target(&self) -> Option<RobotColor> {
        self.target
    }

    /// Robot standing on the cell, if any.
    #[must_use]
    pub const fn occupant(&self) -> Option<RobotColor> {
        self.occupant
    }

    /// Reports whether a robot stands on the cell.
    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

/// The 16×16 playing board.
///
/// Entry flags, targets and the reserved set never change after
/// construction. Occupancy is the single source of truth for robot
/// positions.
#[derive(Clone, Debug)]
pub struct Board {
    entry: Vec<EntryFlags>,
    targets: Vec<Option<RobotColor>>,
    reserved: Vec<bool>,
    occupancy: Vec<Option<RobotColor>>,
}

impl Board {
    pub(crate) fn from_layout(layout: &Layout) -> Self {
        let mut board = Self {
            entry: vec![EntryFlags::OPEN; CELL_COUNT],
            targets: vec![None; CELL_COUNT],
            reserved: vec![false; CELL_COUNT],
            occupancy: vec![None; CELL_COUNT],
        };

        for (cell, refused) in layout.walls() {
            if let Some(index) = index(*cell) {
                board.entry[index] = refused
                    .iter()
                    .fold(EntryFlags::OPEN, |flags, direction| flags.refusing(*direction));
            }
        }
        for &(cell, color) in layout.targets() {
            if let Some(index) = index(cell) {
                debug_assert!(board.targets[index].is_none(), "{cell} targets two robots");
                board.targets[index] = Some(color);
            }
        }
        for &cell in layout.reserved() {
            if let Some(index) = index(cell) {
                board.reserved[index] = true;
            }
        }
        for (color, cell) in RobotColor::ALL.into_iter().zip(layout.homes()) {
            board.set_occupied(cell, Some(color));
        }

        board
    }

    /// Describes a cell; coordinates off the board describe a sentinel wall.
    #[must_use]
    pub fn cell_at(&self, cell: CellCoord) -> Cell {
        match index(cell) {
            Some(index) => Cell {
                entry: self.entry[index],
                target: self.targets[index],
                occupant: self.occupancy[index],
            },
            None => Cell::SENTINEL,
        }
    }

    /// Reports whether a robot sliding in `direction` may move into `cell`.
    #[must_use]
    pub fn can_enter(&self, cell: CellCoord, direction: Direction) -> bool {
        let cell = self.cell_at(cell);
        cell.entry().allows(direction) && !cell.is_occupied()
    }

    /// Robot the cell scores for, if any.
    #[must_use]
    pub fn target_color_at(&self, cell: CellCoord) -> Option<RobotColor> {
        self.cell_at(cell).target()
    }

    /// Reports whether random placement must avoid the cell.
    #[must_use]
    pub fn is_reserved(&self, cell: CellCoord) -> bool {
        index(cell).map_or(true, |index| self.reserved[index])
    }

    /// Robot standing on the cell, if any.
    #[must_use]
    pub fn occupant(&self, cell: CellCoord) -> Option<RobotColor> {
        self.cell_at(cell).occupant()
    }

    /// Cell the robot currently stands on.
    ///
    /// Panics if the robot is missing from the occupancy grid, which would
    /// mean the board lost track of a piece.
    #[must_use]
    pub fn position_of(&self, color: RobotColor) -> CellCoord {
        self.occupancy
            .iter()
            .position(|occupant| *occupant == Some(color))
            .map(coord)
            .unwrap_or_else(|| panic!("{color} robot is missing from the board"))
    }

    /// Cells occupied by each robot, ordered by robot color.
    #[must_use]
    pub fn robot_cells(&self) -> [CellCoord; ROBOT_COUNT] {
        RobotColor::ALL.map(|color| self.position_of(color))
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.occupancy.iter().filter(|slot| slot.is_some()).count()
    }

    /// Writes the occupant of a cell. Occupying an already occupied cell or
    /// writing outside the board is an internal fault.
    pub(crate) fn set_occupied(&mut self, cell: CellCoord, occupant: Option<RobotColor>) {
        let Some(index) = index(cell) else {
            panic!("attempted to occupy off-board cell {cell}");
        };
        if let (Some(existing), Some(incoming)) = (self.occupancy[index], occupant) {
            panic!("{incoming} robot moved onto {cell}, already held by {existing}");
        }
        self.occupancy[index] = occupant;
    }

    /// Moves a robot between two cells, clearing the origin and then
    /// occupying the destination.
    pub(crate) fn relocate(&mut self, color: RobotColor, from: CellCoord, to: CellCoord) {
        assert_eq!(
            self.occupant(from),
            Some(color),
            "{color} robot is not on {from}"
        );
        self.set_occupied(from, None);
        self.set_occupied(to, Some(color));
    }
}

fn index(cell: CellCoord) -> Option<usize> {
    if cell.is_on_board() {
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(BOARD_SIZE).ok()?;
        Some(row * width + column)
    } else {
        None
    }
}

fn coord(index: usize) -> CellCoord {
    let width = BOARD_SIZE as usize;
    CellCoord::new((index / width) as i32, (index % width) as i32)
}
