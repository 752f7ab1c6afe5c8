//! Fixed board data: walls, targets, reserved cells and robot home cells.

use ricochet_core::{CellCoord, Direction, RobotColor, ROBOT_COUNT};

/// Walls as `(row, column, refused)` where `refused` lists the slide
/// directions that may not enter the cell: `u`p, `d`own, `l`eft, `r`ight.
///
/// A wall is stored on one side only. `(4,2)` refusing `d` does not stop a
/// robot leaving `(3,2)` downward from anywhere else; it only stops robots
/// arriving at `(4,2)` from above.
const WALLS: &[(i32, i32, &str)] = &[
    (0, 5, "l"),
    (0, 6, "r"),
    (0, 11, "l"),
    (0, 12, "r"),
    (1, 3, "u"),
    (1, 9, "ul"),
    (1, 10, "r"),
    (2, 2, "l"),
    (2, 3, "dr"),
    (2, 9, "d"),
    (2, 15, "u"),
    (3, 0, "u"),
    (3, 2, "u"),
    (3, 4, "l"),
    (3, 5, "ur"),
    (3, 10, "l"),
    (3, 11, "ur"),
    (3, 15, "d"),
    (4, 0, "d"),
    (4, 2, "dl"),
    (4, 3, "r"),
    (4, 5, "d"),
    (4, 11, "d"),
    (4, 14, "u"),
    (5, 4, "ul"),
    (5, 10, "u"),
    (5, 13, "l"),
    (5, 14, "dr"),
    (6, 4, "d"),
    (6, 10, "dl"),
    (6, 11, "r"),
    (7, 7, "udlr"),
    (7, 8, "udlr"),
    (7, 12, "l"),
    (7, 13, "ru"),
    (8, 3, "u"),
    (8, 7, "udlr"),
    (8, 8, "udlr"),
    (8, 13, "d"),
    (9, 3, "dl"),
    (9, 4, "r"),
    (9, 10, "ul"),
    (9, 11, "r"),
    (10, 6, "u"),
    (10, 10, "d"),
    (10, 12, "u"),
    (11, 5, "l"),
    (11, 6, "rd"),
    (11, 12, "dl"),
    (11, 13, "ru"),
    (12, 0, "l"),
    (12, 1, "ru"),
    (12, 9, "udlr"),
    (12, 15, "u"),
    (13, 0, "u"),
    (13, 1, "d"),
    (13, 8, "l"),
    (13, 9, "rd"),
    (13, 15, "d"),
    (14, 0, "d"),
    (14, 4, "lu"),
    (14, 5, "r"),
    (14, 11, "udlr"),
    (15, 4, "d"),
    (15, 6, "l"),
    (15, 7, "r"),
    (15, 10, "l"),
    (15, 11, "r"),
];

/// Four scoring cells per robot.
const TARGETS: &[(RobotColor, i32, i32)] = &[
    (RobotColor::Red, 4, 2),
    (RobotColor::Red, 3, 11),
    (RobotColor::Red, 14, 4),
    (RobotColor::Red, 11, 12),
    (RobotColor::Green, 5, 4),
    (RobotColor::Green, 6, 10),
    (RobotColor::Green, 12, 1),
    (RobotColor::Green, 11, 13),
    (RobotColor::Yellow, 2, 3),
    (RobotColor::Yellow, 1, 9),
    (RobotColor::Yellow, 9, 3),
    (RobotColor::Yellow, 9, 10),
    (RobotColor::Blue, 3, 5),
    (RobotColor::Blue, 5, 14),
    (RobotColor::Blue, 11, 6),
    (RobotColor::Blue, 13, 9),
];

/// Cells a robot is never placed on by random placement: every target, the
/// central block and the fully walled cells.
const RESERVED: &[(i32, i32)] = &[
    (1, 9),
    (2, 3),
    (3, 5),
    (3, 11),
    (4, 2),
    (5, 4),
    (5, 14),
    (6, 10),
    (7, 7),
    (7, 8),
    (7, 13),
    (8, 7),
    (8, 8),
    (9, 3),
    (9, 10),
    (11, 6),
    (11, 12),
    (11, 13),
    (12, 1),
    (12, 9),
    (13, 9),
    (14, 4),
    (14, 11),
];

/// Cells the robots occupy before the first game starts.
const HOMES: [(i32, i32); ROBOT_COUNT] = [(1, 1), (8, 9), (13, 5), (4, 13)];

/// Immutable description of the board the game is played on.
#[derive(Clone, Debug)]
pub(crate) struct Layout {
    walls: Vec<(CellCoord, Vec<Direction>)>,
    targets: Vec<(CellCoord, RobotColor)>,
    reserved: Vec<CellCoord>,
    homes: [CellCoord; ROBOT_COUNT],
}

impl Layout {
    /// The published board.
    pub(crate) fn standard() -> Self {
        let walls = WALLS
            .iter()
            .map(|&(row, column, refused)| {
                (CellCoord::new(row, column), refused_directions(refused))
            })
            .collect();
        let targets = TARGETS
            .iter()
            .map(|&(color, row, column)| (CellCoord::new(row, column), color))
            .collect();
        let reserved = RESERVED
            .iter()
            .map(|&(row, column)| CellCoord::new(row, column))
            .collect();
        let homes = HOMES.map(|(row, column)| CellCoord::new(row, column));

        Self {
            walls,
            targets,
            reserved,
            homes,
        }
    }

    pub(crate) fn walls(&self) -> &[(CellCoord, Vec<Direction>)] {
        &self.walls
    }

    pub(crate) fn targets(&self) -> &[(CellCoord, RobotColor)] {
        &self.targets
    }

    pub(crate) fn reserved(&self) -> &[CellCoord] {
        &self.reserved
    }

    pub(crate) fn homes(&self) -> [CellCoord; ROBOT_COUNT] {
        self.homes
    }
}

fn refused_directions(refused: &str) -> Vec<Direction> {
    refused
        .chars()
        .map(|letter| match letter {
            'u' => Direction::Up,
            'd' => Direction::Down,
            'l' => Direction::Left,
            'r' => Direction::Right,
            other => panic!("unknown wall letter {other:?} in board data"),
        })
        .collect()
}
