use std::fmt::Write as _;

use ricochet_core::{
    CellCoord, Direction, Event, Phase, RobotColor, TurnEndReason, BOARD_SIZE,
};
use ricochet_world::{query, EntryFlags, World};

/// Turns an event into a line for the player, or `None` for bookkeeping
/// events that are not worth printing.
pub(crate) fn describe(event: &Event) -> Option<String> {
    let line = match event {
        Event::GameStarted { player_count } => {
            format!("game started with {player_count} players")
        }
        Event::RoundStarted { color, round } => {
            format!("round {round}: bidding for the {color} robot")
        }
        Event::BidAccepted { player, steps } => format!("player {player} bids {steps}"),
        Event::TurnOrderDecided { order } => {
            let order: Vec<String> = order.iter().map(ToString::to_string).collect();
            format!("turn order: {}", order.join(", "))
        }
        Event::TurnStarted {
            player,
            bid,
            time_budget,
            ..
        } => format!("player {player}: {bid} moves, {time_budget}s on the clock"),
        Event::TimeRemaining { seconds, .. } if *seconds % 10 == 0 || *seconds <= 5 => {
            format!("{seconds}s left")
        }
        Event::SlideResolved {
            color,
            direction,
            to,
            cells_traversed: 0,
            used_moves,
            ..
        } => format!(
            "{color} robot cannot move {}, move {used_moves} wasted at {to}",
            direction_name(*direction)
        ),
        Event::SlideResolved {
            color,
            direction,
            to,
            used_moves,
            ..
        } => format!(
            "{color} robot slid {} to {to}, move {used_moves}",
            direction_name(*direction)
        ),
        Event::TurnEnded { player, reason, .. } => match reason {
            TurnEndReason::BidExhausted => format!("player {player} used up their bid"),
            TurnEndReason::TimedOut => format!("player {player} ran out of time"),
        },
        Event::RoundWon { player, color } => {
            format!("player {player} brought the {color} robot to its target")
        }
        Event::RoundCompleted { winner: None, .. } => {
            "nobody reached the target, bidding again".to_owned()
        }
        Event::BiddingReopened { relocated } => {
            format!("{relocated} robot relocated, bidding reopened")
        }
        Event::GameOver { ranking } => {
            let mut text = "game over".to_owned();
            for (place, line) in ranking.iter().enumerate() {
                let _ = write!(text, "\n  {}. player {}: {}", place + 1, line.name, line.score);
            }
            text
        }
        Event::CommandRejected { reason } => format!("rejected: {reason}"),
        Event::TimeRemaining { .. }
        | Event::RoundCompleted { .. }
        | Event::RobotMoved { .. }
        | Event::OccupancyChanged { .. }
        | Event::TimeAdvanced { .. } => return None,
    };
    Some(line)
}

/// Draws the board with robots as capitals, targets as lower case letters
/// and blocked cells as `#`, followed by a status line.
pub(crate) fn board(world: &World) -> String {
    let board = query::board(world);
    let mut text = String::new();

    for row in 0..BOARD_SIZE {
        for column in 0..BOARD_SIZE {
            let cell = board.cell_at(CellCoord::new(row, column));
            let glyph = match (cell.occupant(), cell.target()) {
                (Some(robot), _) => robot_letter(robot).to_ascii_uppercase(),
                (None, Some(target)) => robot_letter(target),
                (None, None) if cell.entry() == EntryFlags::CLOSED => '#',
                (None, None) => '.',
            };
            text.push(glyph);
            text.push(' ');
        }
        let _ = text.pop();
        text.push('\n');
    }

    text.push_str(&status(world));
    text
}

/// One line per player with score and current bid.
pub(crate) fn scores(world: &World) -> String {
    let players = query::players(world);
    if players.is_empty() {
        return "no game in progress".to_owned();
    }

    let mut text = String::new();
    for player in players {
        let _ = write!(text, "player {}: {} points", player.name(), player.score());
        if let Some(bid) = player.bid() {
            let _ = write!(text, ", bid {bid}, {} used", player.used_moves());
        }
        text.push('\n');
    }
    let _ = text.pop();
    text
}

fn status(world: &World) -> String {
    let robot = query::active_robot(world)
        .map(|color| format!(", {color} robot"))
        .unwrap_or_default();
    match query::phase(world) {
        Phase::WaitingToStart => "waiting for `start <players>`".to_owned(),
        Phase::Bidding => match query::expected_bidder(world) {
            Some(player) => format!("round {}{robot}: player {player} to bid", query::round(world)),
            None => format!("round {}{robot}: bidding", query::round(world)),
        },
        Phase::TurnActive => match query::active_player(world) {
            Some(player) => format!(
                "round {}{robot}: player {player} to move, {}s left",
                query::round(world),
                query::time_remaining(world)
            ),
            None => format!("round {}{robot}", query::round(world)),
        },
        Phase::TurnResolved | Phase::RoundComplete => format!("round {}{robot}", query::round(world)),
        Phase::GameOver => "game over, `start <players>` to play again".to_owned(),
    }
}

fn robot_letter(color: RobotColor) -> char {
    match color {
        RobotColor::Red => 'r',
        RobotColor::Green => 'g',
        RobotColor::Yellow => 'y',
        RobotColor::Blue => 'b',
    }
}

fn direction_name(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "up",
        Direction::Down => "down",
        Direction::Left => "left",
        Direction::Right => "right",
    }
}
