#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for the Ricochet rules engine.
//!
//! The world owns the board, the robots, the seated players and the
//! turn/round state machine. It is mutated exclusively through [`apply`] and
//! observed through the [`query`] module and the emitted events.

mod board;
mod game;
mod layout;
mod players;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ricochet_core::{CellCoord, Command, Event, ROBOT_COUNT};
use tracing::trace;

pub use board::{Board, Cell, EntryFlags};
pub use players::Player;

use game::GameState;
use layout::Layout;
use players::Players;

/// Seed used when no explicit seed is configured.
pub const DEFAULT_SEED: u64 = 0x2f6b_91c4_d3a0_7e15;

/// Time units a player has to finish a turn.
pub const DEFAULT_TURN_BUDGET: u32 = 60;

/// Where robots are put when a game starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Every robot is moved to a uniformly drawn free, non-reserved cell.
    Random,
    /// Robots are moved to the provided cells, ordered by robot color.
    ///
    /// The cells must be distinct and on the board.
    Fixed([CellCoord; ROBOT_COUNT]),
}

/// Configuration that shapes a world instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    seed: u64,
    turn_budget: u32,
    placement: Placement,
}

impl Config {
    /// Creates a configuration with random robot placement.
    #[must_use]
    pub const fn new(seed: u64, turn_budget: u32) -> Self {
        Self {
            seed,
            turn_budget,
            placement: Placement::Random,
        }
    }

    /// Replaces the robot placement strategy.
    #[must_use]
    pub const fn with_placement(self, placement: Placement) -> Self {
        Self { placement, ..self }
    }

    /// Seed for placement draws and tie-breaking.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Time units granted to each turn.
    #[must_use]
    pub const fn turn_budget(&self) -> u32 {
        self.turn_budget
    }

    /// Robot placement strategy applied when a game starts.
    #[must_use]
    pub const fn placement(&self) -> Placement {
        self.placement
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_SEED, DEFAULT_TURN_BUDGET)
    }
}

/// Represents the authoritative Ricochet world state.
#[derive(Debug)]
pub struct World {
    config: Config,
    board: Board,
    spawns: [CellCoord; ROBOT_COUNT],
    players: Players,
    game: GameState,
    rng: ChaCha8Rng,
}

impl World {
    /// Creates a world with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a world on the standard board using the provided configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        let layout = Layout::standard();
        Self {
            config,
            board: Board::from_layout(&layout),
            spawns: layout.homes(),
            players: Players::default(),
            game: GameState::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed()),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    trace!(?command, "applying command");
    match command {
        Command::StartGame { player_count } => world.start_game(player_count, out_events),
        Command::SubmitBid { player, steps } => world.submit_bid(player, steps, out_events),
        Command::Slide { direction } => world.slide(direction, out_events),
        Command::ManualRelocate { color } => world.manual_relocate(color, out_events),
        Command::Tick { dt } => out_events.push(Event::TimeAdvanced { dt }),
        Command::ElapseTimeUnit { turn } => world.elapse_time_unit(turn, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use ricochet_core::{CellCoord, Phase, PlayerId, RobotColor, TurnId, ROBOT_COUNT};

    use super::{Board, Config, Player, World};

    /// Configuration the world was created with.
    #[must_use]
    pub fn config(world: &World) -> &Config {
        &world.config
    }

    /// Current phase of the turn/round state machine.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.game.phase()
    }

    /// Provides read-only access to the board, including occupancy.
    #[must_use]
    pub fn board(world: &World) -> &Board {
        &world.board
    }

    /// Cell the robot currently stands on.
    #[must_use]
    pub fn robot_position(world: &World, color: RobotColor) -> CellCoord {
        world.board.position_of(color)
    }

    /// Cells of every robot, ordered by robot color.
    #[must_use]
    pub fn robot_cells(world: &World) -> [CellCoord; ROBOT_COUNT] {
        world.board.robot_cells()
    }

    /// Cell the robot returns to when a turn ends without a score.
    #[must_use]
    pub fn spawn_position(world: &World, color: RobotColor) -> CellCoord {
        world.spawns[color.index()]
    }

    /// Robot the current round is played for.
    #[must_use]
    pub fn active_robot(world: &World) -> Option<RobotColor> {
        world.game.active_robot()
    }

    /// Number of bidding rounds opened in the current game.
    #[must_use]
    pub fn round(world: &World) -> u32 {
        world.game.round()
    }

    /// Seated players in registration order.
    #[must_use]
    pub fn players(world: &World) -> &[Player] {
        world.players.as_slice()
    }

    /// Player whose bid is expected next, while bidding is open.
    #[must_use]
    pub fn expected_bidder(world: &World) -> Option<PlayerId> {
        match world.game.phase() {
            Phase::Bidding => world.players.id_at(world.game.next_bidder()),
            _ => None,
        }
    }

    /// Order in which players take turns this round, once every bid is in.
    #[must_use]
    pub fn turn_order(world: &World) -> &[PlayerId] {
        world.game.turn_order()
    }

    /// Player currently sliding the active robot.
    #[must_use]
    pub fn active_player(world: &World) -> Option<PlayerId> {
        world.game.active_player()
    }

    /// Identifier of the running turn.
    #[must_use]
    pub fn active_turn(world: &World) -> Option<TurnId> {
        world.game.turn()
    }

    /// Time units left in the running turn.
    #[must_use]
    pub fn time_remaining(world: &World) -> u32 {
        world.game.time_remaining()
    }
}
