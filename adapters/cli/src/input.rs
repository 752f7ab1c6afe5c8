use ricochet_core::{Command, Direction, PlayerId, RobotColor};

/// Help text listing every accepted line.
pub(crate) const HELP: &str = "\
commands:
  start <players>          start a new game
  bid <player> <steps>     bid for the current robot (players count from 1)
  up | down | left | right slide the active robot (u, d, l, r also work)
  relocate <color>         move a robot to a random free cell and rebid
  board                    print the board
  scores                   print the players
  help                     print this text
  quit                     leave";

/// A parsed line of player input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Input {
    /// A command for the world.
    Command(Command),
    /// Print the board.
    Board,
    /// Print the players.
    Scores,
    /// Print the command list.
    Help,
    /// Leave the program.
    Quit,
}

/// Reasons a line could not be understood.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum InputError {
    #[error("unknown command `{0}`, type `help` for a list")]
    UnknownCommand(String),
    #[error("`{command}` expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("`{0}` is not a whole number")]
    NotANumber(String),
    #[error("bids cannot be negative, got {0}")]
    NegativeBid(i64),
    #[error("players are numbered from 1")]
    PlayerZero,
    #[error("unknown robot `{0}`, expected red, green, yellow or blue")]
    UnknownRobot(String),
}

/// Parses one line. Blank lines yield `Ok(None)`.
pub(crate) fn parse(line: &str) -> Result<Option<Input>, InputError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };

    let input = match verb.to_ascii_lowercase().as_str() {
        "start" => {
            let players = argument(words.next(), "start", "a player count")?;
            Input::Command(Command::StartGame {
                player_count: number(players)?,
            })
        }
        "bid" => {
            let player = argument(words.next(), "bid", "a player number and a step count")?;
            let steps = argument(words.next(), "bid", "a player number and a step count")?;
            Input::Command(Command::SubmitBid {
                player: player_number(player)?,
                steps: bid(steps)?,
            })
        }
        "relocate" => {
            let color = argument(words.next(), "relocate", "a robot color")?;
            Input::Command(Command::ManualRelocate {
                color: robot(color)?,
            })
        }
        "board" => Input::Board,
        "scores" => Input::Scores,
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => match direction(other) {
            Some(direction) => Input::Command(Command::Slide { direction }),
            None => return Err(InputError::UnknownCommand(verb.to_owned())),
        },
    };

    Ok(Some(input))
}

fn argument<'a>(
    word: Option<&'a str>,
    command: &'static str,
    expected: &'static str,
) -> Result<&'a str, InputError> {
    word.ok_or(InputError::MissingArgument { command, expected })
}

fn number(word: &str) -> Result<u32, InputError> {
    word.parse()
        .map_err(|_| InputError::NotANumber(word.to_owned()))
}

fn bid(word: &str) -> Result<u32, InputError> {
    let value: i64 = word
        .parse()
        .map_err(|_| InputError::NotANumber(word.to_owned()))?;
    if value < 0 {
        return Err(InputError::NegativeBid(value));
    }
    u32::try_from(value).map_err(|_| InputError::NotANumber(word.to_owned()))
}

fn player_number(word: &str) -> Result<PlayerId, InputError> {
    match number(word)? {
        0 => Err(InputError::PlayerZero),
        seat => Ok(PlayerId::new(seat - 1)),
    }
}

fn robot(word: &str) -> Result<RobotColor, InputError> {
    RobotColor::ALL
        .into_iter()
        .find(|color| color.to_string().eq_ignore_ascii_case(word))
        .ok_or_else(|| InputError::UnknownRobot(word.to_owned()))
}

fn direction(word: &str) -> Option<Direction> {
    match word {
        "up" | "u" => Some(Direction::Up),
        "down" | "d" => Some(Direction::Down),
        "left" | "l" => Some(Direction::Left),
        "right" | "r" => Some(Direction::Right),
        _ => None,
    }
}
