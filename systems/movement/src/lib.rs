#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that plans straight-line robot slides.
//!
//! A slide starts at the robot's cell and keeps stepping in one direction
//! while the next cell accepts entry from that direction. The planner never
//! mutates anything: the world applies the returned [`SlidePlan`] as a single
//! relocation from [`SlidePlan::origin`] to [`SlidePlan::final_cell`].

use ricochet_core::{CellCoord, Direction, BOARD_SIZE};

/// Upper bound on the number of steps a single slide may take.
///
/// The sentinel ring around the board is never enterable, so a well-formed
/// board stops every slide well before this bound.
const MAX_TRAVERSAL: u32 = BOARD_SIZE as u32;

/// Result of sliding a robot until it is blocked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlidePlan {
    origin: CellCoord,
    direction: Direction,
    final_cell: CellCoord,
    cells_traversed: u32,
}

impl SlidePlan {
    /// Cell the robot occupied before sliding.
    #[must_use]
    pub const fn origin(&self) -> CellCoord {
        self.origin
    }

    /// Direction of travel.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Cell the robot comes to rest on.
    #[must_use]
    pub const fn final_cell(&self) -> CellCoord {
        self.final_cell
    }

    /// Number of cells crossed during the slide.
    #[must_use]
    pub const fn cells_traversed(&self) -> u32 {
        self.cells_traversed
    }

    /// Reports whether the robot could not move at all.
    #[must_use]
    pub const fn is_wasted(&self) -> bool {
        self.cells_traversed == 0
    }
}

/// Plans a slide from `origin` in `direction`.
///
/// `can_enter` answers whether a robot travelling in the given direction may
/// enter the given cell, combining the destination cell's entry flag with its
/// occupancy. The origin itself is never queried.
pub fn plan_slide<F>(origin: CellCoord, direction: Direction, mut can_enter: F) -> SlidePlan
where
    F: FnMut(CellCoord, Direction) -> bool,
{
    let mut current = origin;
    let mut cells_traversed = 0;

    while cells_traversed < MAX_TRAVERSAL {
        let next = current.step(direction);
        if !can_enter(next, direction) {
            break;
        }
        current = next;
        cells_traversed += 1;
    }

    SlidePlan {
        origin,
        direction,
        final_cell: current,
        cells_traversed,
    }
}
