use crate::coordinate::split_tuple;
use crate::{Coordinate, GameError};
use std::str::FromStr;

pub const HELP_TEXT: &str = "\
Minesweeper commands:
  ! (x,y)      reveal the tile at x,y
  ? (x,y)      toggle a flag at x,y
  %            toggle reveal mode
  s (w,h,m)    restart with a w x h board and m mines
  s (w,h)      restart with a w x h board at the default density
  r            restart with the default board
  u            undo the last move
  h            show this help
  q            quit";

/// Board size requested by a restart. Without `mines` the count comes from
/// the mine density.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestartParams {
    pub width: u32,
    pub height: u32,
    pub mines: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Reveal(Coordinate),
    Flag(Coordinate),
    ToggleReveal,
    Restart(Option<RestartParams>),
    Undo,
    Quit,
    Help,
    Noop,
}

/// Drops the separators allowed between a prefix and its payload.
fn payload(rest: &str) -> &str {
    rest.trim_start_matches(|c: char| c.is_whitespace() || c == ',')
}

fn parse_restart(rest: &str) -> Result<RestartParams, GameError> {
    let values = split_tuple(rest)
        .into_iter()
        .map(|part| {
            part.parse::<u32>().map_err(|_| {
                GameError::InvalidCommand(format!("'{}' is not a restart parameter", part))
            })
        })
        .collect::<Result<Vec<u32>, GameError>>()?;

    match values[..] {
        [width, height] => Ok(RestartParams {
            width,
            height,
            mines: None,
        }),
        [width, height, mines] => Ok(RestartParams {
            width,
            height,
            mines: Some(mines),
        }),
        _ => Err(GameError::InvalidCommand(
            "restart takes width, height and an optional mine count".to_string(),
        )),
    }
}

impl FromStr for Command {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();

        match input {
            "" => return Ok(Command::Noop),
            "q" | "quit" => return Ok(Command::Quit),
            "h" | "help" => return Ok(Command::Help),
            "u" | "undo" => return Ok(Command::Undo),
            "%" | "reveal" => return Ok(Command::ToggleReveal),
            "r" | "restart" | "s" => return Ok(Command::Restart(None)),
            _ => {}
        }

        let mut chars = input.chars();
        let prefix = chars.next().unwrap_or_default();
        let rest = payload(chars.as_str());

        match prefix {
            '!' => Ok(Command::Reveal(rest.parse()?)),
            '?' => Ok(Command::Flag(rest.parse()?)),
            's' => Ok(Command::Restart(Some(parse_restart(rest)?))),
            _ => Err(GameError::InvalidCommand(format!(
                "unrecognized command '{}'",
                input
            ))),
        }
    }
}
