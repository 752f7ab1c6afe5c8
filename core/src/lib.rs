#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Ricochet engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems and
//! observers to react to. Systems consume event streams and respond
//! exclusively with new command batches.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// Number of rows and columns on the square playing board.
pub const BOARD_SIZE: i32 = 16;

/// Number of robots taking part in every game.
pub const ROBOT_COUNT: usize = 4;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Starts a fresh game, discarding any game in progress.
    StartGame {
        /// Number of players seated at the table.
        player_count: u32,
    },
    /// Records the bid of the player expected to bid next.
    SubmitBid {
        /// Player submitting the bid.
        player: PlayerId,
        /// Maximum number of slides the player claims to need.
        steps: u32,
    },
    /// Slides the active robot on behalf of the active player.
    Slide {
        /// Direction of travel.
        direction: Direction,
    },
    /// Re-randomizes one robot and reopens bidding for the current robot.
    ManualRelocate {
        /// Robot that should be moved to a random free cell.
        color: RobotColor,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of wall time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Consumes one unit of the countdown attached to the given turn.
    ElapseTimeUnit {
        /// Turn that was active when the time unit was measured.
        turn: TurnId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of wall time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that a new game began with the provided number of players.
    GameStarted {
        /// Number of registered players.
        player_count: u32,
    },
    /// Confirms that a robot changed cells.
    RobotMoved {
        /// Robot that moved.
        color: RobotColor,
        /// Cell the robot occupied before moving.
        from: CellCoord,
        /// Cell the robot occupies after moving.
        to: CellCoord,
    },
    /// Publishes the occupied cells after a batch of robot moves.
    OccupancyChanged {
        /// Occupied cells ordered by robot color.
        occupied: [CellCoord; ROBOT_COUNT],
    },
    /// Announces that bidding opened for a round.
    RoundStarted {
        /// Robot that must reach its target this round.
        color: RobotColor,
        /// One-based number of the round within the game.
        round: u32,
    },
    /// Confirms that a bid was recorded.
    BidAccepted {
        /// Player that placed the bid.
        player: PlayerId,
        /// Number of slides the player claimed.
        steps: u32,
    },
    /// Reports the order in which players take their turns this round.
    TurnOrderDecided {
        /// Players sorted ascending by bid.
        order: Vec<PlayerId>,
    },
    /// Announces that a player's turn began.
    TurnStarted {
        /// Identifier of the turn, used to discard stale timer units.
        turn: TurnId,
        /// Player owning the turn.
        player: PlayerId,
        /// Number of slides the player may spend.
        bid: u32,
        /// Time units available before the turn is forfeited.
        time_budget: u32,
    },
    /// Reports the remaining time of the active turn.
    TimeRemaining {
        /// Turn the countdown belongs to.
        turn: TurnId,
        /// Whole time units left.
        seconds: u32,
    },
    /// Reports the outcome of a single slide command.
    SlideResolved {
        /// Player that issued the slide.
        player: PlayerId,
        /// Robot that slid.
        color: RobotColor,
        /// Direction of travel.
        direction: Direction,
        /// Cell the slide ended on.
        to: CellCoord,
        /// Number of cells crossed; zero for a wasted slide.
        cells_traversed: u32,
        /// Slides consumed by the player this round, including this one.
        used_moves: u32,
    },
    /// Announces that a turn ended without reaching the target.
    TurnEnded {
        /// Turn that ended.
        turn: TurnId,
        /// Player owning the turn.
        player: PlayerId,
        /// Why the turn ended.
        reason: TurnEndReason,
    },
    /// Announces that a player landed the active robot on its target.
    RoundWon {
        /// Player awarded the point.
        player: PlayerId,
        /// Robot that reached its target.
        color: RobotColor,
    },
    /// Announces the end of a round.
    RoundCompleted {
        /// Robot the round was played for.
        color: RobotColor,
        /// Player that scored, if anyone did.
        winner: Option<PlayerId>,
    },
    /// Announces that bidding restarted after a manual relocation.
    BiddingReopened {
        /// Robot that was relocated.
        relocated: RobotColor,
    },
    /// Announces the end of the game together with the final ranking.
    GameOver {
        /// Every player exactly once, sorted by descending score.
        ranking: Vec<PlayerScore>,
    },
    /// Reports that a command was rejected without changing any state.
    CommandRejected {
        /// Specific reason the command failed.
        reason: RejectionReason,
    },
}

/// Cardinal slide directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// All directions in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Row and column deltas applied by one step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

/// The four robots, in the fixed order in which their rounds are played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RobotColor {
    /// Robot 0.
    Red,
    /// Robot 1.
    Green,
    /// Robot 2.
    Yellow,
    /// Robot 3.
    Blue,
}

impl RobotColor {
    /// All robots in round order.
    pub const ALL: [RobotColor; ROBOT_COUNT] = [
        RobotColor::Red,
        RobotColor::Green,
        RobotColor::Yellow,
        RobotColor::Blue,
    ];

    /// Zero-based index of the robot within the round order.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Resolves a round index to its robot, if the index is in range.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Red),
            1 => Some(Self::Green),
            2 => Some(Self::Yellow),
            3 => Some(Self::Blue),
            _ => None,
        }
    }
}

impl fmt::Display for RobotColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
        };
        f.write_str(name)
    }
}

/// Identifier of a player, equal to its zero-based registration index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Creates a new player identifier with the provided registration index.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the zero-based registration index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Registration index as a slice index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0 + 1)
    }
}

/// Monotonic identifier of a player turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TurnId(u64);

impl TurnId {
    /// Creates a new turn identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Identifier of the turn that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Location of a single board cell expressed as row and column coordinates.
///
/// Coordinates are signed so that the sentinel ring around the board
/// (row or column `-1` and [`BOARD_SIZE`]) can be addressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: i32,
    column: i32,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Neighbouring cell one step away in the provided direction.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (row_delta, column_delta) = direction.delta();
        Self {
            row: self.row + row_delta,
            column: self.column + column_delta,
        }
    }

    /// Reports whether the coordinate lies on the playable board.
    #[must_use]
    pub const fn is_on_board(&self) -> bool {
        self.row >= 0 && self.row < BOARD_SIZE && self.column >= 0 && self.column < BOARD_SIZE
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.column)
    }
}

/// Coarse state of the turn/round state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No game has been started yet.
    WaitingToStart,
    /// Players are submitting bids for the active robot.
    Bidding,
    /// A player is sliding the active robot.
    TurnActive,
    /// The active turn ended; the robot is being reset for the next bidder.
    TurnResolved,
    /// The round ended; the machine decides between bidding and game over.
    RoundComplete,
    /// Every robot reached its target.
    GameOver,
}

/// Reasons a turn can end without the robot reaching its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnEndReason {
    /// The player spent every slide of the bid.
    BidExhausted,
    /// The countdown reached zero.
    TimedOut,
}

/// Reasons a command may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
pub enum RejectionReason {
    /// A game needs at least one player.
    #[error("a game needs at least one player")]
    NoPlayers,
    /// The command is not accepted in the current phase.
    #[error("command not accepted while {phase:?}")]
    WrongPhase {
        /// Phase the machine was in.
        phase: Phase,
    },
    /// A bid was submitted by someone other than the expected player.
    #[error("player {submitted} bid out of turn, expected player {expected}")]
    OutOfTurn {
        /// Player that is expected to bid.
        expected: PlayerId,
        /// Player that attempted to bid.
        submitted: PlayerId,
    },
    /// The bid referenced a player that is not registered.
    #[error("player {player} is not seated at this table")]
    UnknownPlayer {
        /// Player referenced by the command.
        player: PlayerId,
    },
}

/// Final score line of a single player.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerScore {
    /// Player the score belongs to.
    pub player: PlayerId,
    /// Display name of the player.
    pub name: String,
    /// Rounds won during the game.
    pub score: u32,
}
