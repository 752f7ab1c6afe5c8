//! Turn and round state machine.
//!
//! Every transition is driven by one [`ricochet_core::Command`] and reports
//! what happened through the event buffer handed to [`crate::apply`].

use rand::Rng;
use ricochet_core::{
    CellCoord, Direction, Event, Phase, PlayerId, RejectionReason, RobotColor, TurnEndReason,
    TurnId, BOARD_SIZE, ROBOT_COUNT,
};
use ricochet_system_movement::plan_slide;
use tracing::{debug, info, trace, warn};

use crate::{players::Players, Placement, World};

/// Progress of the current game.
#[derive(Clone, Debug)]
pub(crate) struct GameState {
    phase: Phase,
    active_robot: usize,
    round: u32,
    next_bidder: usize,
    turn_order: Vec<PlayerId>,
    active_slot: usize,
    turn: Option<TurnId>,
    last_turn: TurnId,
    time_remaining: u32,
}

impl GameState {
    pub(crate) fn new() -> Self {
        Self {
            phase: Phase::WaitingToStart,
            active_robot: 0,
            round: 0,
            next_bidder: 0,
            turn_order: Vec::new(),
            active_slot: 0,
            turn: None,
            last_turn: TurnId::new(0),
            time_remaining: 0,
        }
    }

    /// Resets progress while keeping turn identifiers monotonic, so that
    /// units measured before a restart can never match a new turn.
    fn restart(&mut self) {
        let last_turn = self.last_turn;
        *self = Self::new();
        self.last_turn = last_turn;
    }

    pub(crate) const fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) const fn round(&self) -> u32 {
        self.round
    }

    pub(crate) fn active_robot(&self) -> Option<RobotColor> {
        match self.phase {
            Phase::WaitingToStart | Phase::GameOver => None,
            _ => RobotColor::from_index(self.active_robot),
        }
    }

    pub(crate) const fn next_bidder(&self) -> usize {
        self.next_bidder
    }

    pub(crate) fn turn_order(&self) -> &[PlayerId] {
        &self.turn_order
    }

    pub(crate) fn active_player(&self) -> Option<PlayerId> {
        match self.phase {
            Phase::TurnActive => self.turn_order.get(self.active_slot).copied(),
            _ => None,
        }
    }

    pub(crate) const fn turn(&self) -> Option<TurnId> {
        self.turn
    }

    pub(crate) const fn time_remaining(&self) -> u32 {
        self.time_remaining
    }
}

impl World {
    pub(crate) fn start_game(&mut self, player_count: u32, out: &mut Vec<Event>) {
        if player_count == 0 {
            self.reject(RejectionReason::NoPlayers, out);
            return;
        }

        info!(player_count, seed = self.config.seed(), "starting game");
        self.players = Players::seat(player_count);
        self.game.restart();
        out.push(Event::GameStarted { player_count });

        self.place_robots(out);
        self.open_bidding(out);
    }

    pub(crate) fn submit_bid(&mut self, player: PlayerId, steps: u32, out: &mut Vec<Event>) {
        if self.game.phase != Phase::Bidding {
            self.reject_wrong_phase(out);
            return;
        }
        if self.players.get(player).is_none() {
            self.reject(RejectionReason::UnknownPlayer { player }, out);
            return;
        }
        let Some(expected) = self.players.id_at(self.game.next_bidder) else {
            self.reject_wrong_phase(out);
            return;
        };
        if expected != player {
            self.reject(
                RejectionReason::OutOfTurn {
                    expected,
                    submitted: player,
                },
                out,
            );
            return;
        }

        self.players.record_bid(player, steps);
        debug!(%player, steps, "bid accepted");
        out.push(Event::BidAccepted { player, steps });

        self.game.next_bidder += 1;
        if self.game.next_bidder < self.players.len() {
            return;
        }

        let order = self.players.turn_order(&mut self.rng);
        info!(?order, "turn order decided");
        out.push(Event::TurnOrderDecided {
            order: order.clone(),
        });
        self.game.turn_order = order;
        self.game.active_slot = 0;
        self.begin_next_turn(out);
    }

    pub(crate) fn slide(&mut self, direction: Direction, out: &mut Vec<Event>) {
        let (Phase::TurnActive, Some(player)) = (self.game.phase, self.game.active_player())
        else {
            self.reject_wrong_phase(out);
            return;
        };
        let color = self.active_color();

        let board = &self.board;
        let plan = plan_slide(board.position_of(color), direction, |cell, direction| {
            board.can_enter(cell, direction)
        });
        if !plan.is_wasted() {
            self.move_robot(color, plan.origin(), plan.final_cell(), out);
        }

        let used_moves = self.players.spend_move(player);
        debug!(
            %player,
            %color,
            ?direction,
            from = %plan.origin(),
            to = %plan.final_cell(),
            cells = plan.cells_traversed(),
            used_moves,
            "slide resolved"
        );
        out.push(Event::SlideResolved {
            player,
            color,
            direction,
            to: plan.final_cell(),
            cells_traversed: plan.cells_traversed(),
            used_moves,
        });

        if self.board.target_color_at(plan.final_cell()) == Some(color) {
            self.players.award_point(player);
            info!(%player, %color, target = %plan.final_cell(), "target reached");
            out.push(Event::RoundWon { player, color });
            self.game.active_robot += 1;
            self.complete_round(color, Some(player), out);
            return;
        }

        let bid = self.players.get(player).and_then(|seated| seated.bid()).unwrap_or(0);
        if used_moves >= bid {
            self.end_turn(TurnEndReason::BidExhausted, out);
        }
    }

    pub(crate) fn elapse_time_unit(&mut self, turn: TurnId, out: &mut Vec<Event>) {
        if self.game.phase != Phase::TurnActive || self.game.turn != Some(turn) {
            trace!(turn = turn.get(), "discarding stale time unit");
            return;
        }

        self.game.time_remaining = self.game.time_remaining.saturating_sub(1);
        let seconds = self.game.time_remaining;
        out.push(Event::TimeRemaining { turn, seconds });

        if seconds == 0 {
            self.end_turn(TurnEndReason::TimedOut, out);
        }
    }

    pub(crate) fn manual_relocate(&mut self, color: RobotColor, out: &mut Vec<Event>) {
        let phase = self.game.phase;
        if phase == Phase::TurnActive {
            self.reset_active_robot(out);
        }

        let from = self.board.position_of(color);
        let to = self.random_free_cell();
        self.move_robot(color, from, to, out);
        self.spawns[color.index()] = to;
        info!(%color, %from, %to, ?phase, "robot relocated by hand");

        if matches!(phase, Phase::Bidding | Phase::TurnActive) {
            out.push(Event::BiddingReopened { relocated: color });
            self.open_bidding(out);
        }
    }

    fn open_bidding(&mut self, out: &mut Vec<Event>) {
        let color = self.active_color();
        self.players.clear_round();
        self.game.phase = Phase::Bidding;
        self.game.round += 1;
        self.game.next_bidder = 0;
        self.game.turn_order.clear();
        self.game.active_slot = 0;
        self.game.turn = None;
        self.game.time_remaining = 0;
        self.spawns[color.index()] = self.board.position_of(color);

        let round = self.game.round;
        info!(%color, round, spawn = %self.spawns[color.index()], "bidding opened");
        out.push(Event::RoundStarted { color, round });
    }

    fn begin_next_turn(&mut self, out: &mut Vec<Event>) {
        let Some(player) = self.game.turn_order.get(self.game.active_slot).copied() else {
            let color = self.active_color();
            info!(%color, "every player failed, bidding again");
            self.complete_round(color, None, out);
            return;
        };

        self.players.begin_turn(player);
        let turn = self.game.last_turn.next();
        self.game.last_turn = turn;
        self.game.turn = Some(turn);
        self.game.phase = Phase::TurnActive;
        self.game.time_remaining = self.config.turn_budget();

        let bid = self.players.get(player).and_then(|seated| seated.bid()).unwrap_or(0);
        info!(%player, bid, turn = turn.get(), "turn started");
        out.push(Event::TurnStarted {
            turn,
            player,
            bid,
            time_budget: self.config.turn_budget(),
        });

        if bid == 0 {
            self.end_turn(TurnEndReason::BidExhausted, out);
        }
    }

    fn end_turn(&mut self, reason: TurnEndReason, out: &mut Vec<Event>) {
        let (Some(player), Some(turn)) = (self.game.active_player(), self.game.turn) else {
            return;
        };

        self.game.phase = Phase::TurnResolved;
        self.game.turn = None;
        info!(%player, ?reason, "turn ended");
        out.push(Event::TurnEnded {
            turn,
            player,
            reason,
        });

        self.reset_active_robot(out);
        self.game.active_slot += 1;
        self.begin_next_turn(out);
    }

    fn complete_round(&mut self, color: RobotColor, winner: Option<PlayerId>, out: &mut Vec<Event>) {
        self.game.phase = Phase::RoundComplete;
        self.game.turn = None;
        out.push(Event::RoundCompleted { color, winner });

        if self.game.active_robot >= ROBOT_COUNT {
            self.finish_game(out);
        } else {
            self.open_bidding(out);
        }
    }

    fn finish_game(&mut self, out: &mut Vec<Event>) {
        self.game.phase = Phase::GameOver;
        let ranking = self.players.ranking(&mut self.rng);
        info!(
            winner = ranking.first().map(|line| line.name.as_str()),
            "game over"
        );
        out.push(Event::GameOver { ranking });
    }

    fn reset_active_robot(&mut self, out: &mut Vec<Event>) {
        let color = self.active_color();
        let spawn = self.spawns[color.index()];
        let current = self.board.position_of(color);
        if current != spawn {
            self.move_robot(color, current, spawn, out);
        }
    }

    /// Moves every robot at once, either to the configured cells or to fresh
    /// random cells.
    fn place_robots(&mut self, out: &mut Vec<Event>) {
        let before = self.board.robot_cells();
        for cell in before {
            self.board.set_occupied(cell, None);
        }

        for color in RobotColor::ALL {
            let cell = match self.config.placement() {
                Placement::Random => self.random_free_cell(),
                Placement::Fixed(cells) => cells[color.index()],
            };
            self.board.set_occupied(cell, Some(color));
            self.spawns[color.index()] = cell;
        }

        let after = self.board.robot_cells();
        for ((color, from), to) in RobotColor::ALL.into_iter().zip(before).zip(after) {
            if from != to {
                out.push(Event::RobotMoved { color, from, to });
            }
        }
        out.push(Event::OccupancyChanged { occupied: after });
    }

    fn move_robot(&mut self, color: RobotColor, from: CellCoord, to: CellCoord, out: &mut Vec<Event>) {
        self.board.relocate(color, from, to);
        out.push(Event::RobotMoved { color, from, to });
        out.push(Event::OccupancyChanged {
            occupied: self.board.robot_cells(),
        });
    }

    /// Draws cells until one is neither reserved nor occupied.
    fn random_free_cell(&mut self) -> CellCoord {
        loop {
            let cell = CellCoord::new(
                self.rng.gen_range(0..BOARD_SIZE),
                self.rng.gen_range(0..BOARD_SIZE),
            );
            if !self.board.is_reserved(cell) && self.board.occupant(cell).is_none() {
                return cell;
            }
        }
    }

    fn active_color(&self) -> RobotColor {
        RobotColor::from_index(self.game.active_robot)
            .unwrap_or_else(|| panic!("round index {} has no robot", self.game.active_robot))
    }

    fn reject_wrong_phase(&self, out: &mut Vec<Event>) {
        self.reject(
            RejectionReason::WrongPhase {
                phase: self.game.phase,
            },
            out,
        );
    }

    fn reject(&self, reason: RejectionReason, out: &mut Vec<Event>) {
        warn!(%reason, "command rejected");
        out.push(Event::CommandRejected { reason });
    }
}
