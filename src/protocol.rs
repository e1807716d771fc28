//! Wire format for remote play.
//!
//! Every message is a single line of text. The server sends a [`StateMessage`]
//! as JSON, then waits for one [`ClientMessage`]: either a bare command such as
//! `! (3,4)` or a JSON object `{"command": "! (3,4)"}`.
//!
//! Clients only ever send commands. Objects carrying anything besides
//! `command` are refused, so a client cannot hand back a doctored board.
//!
//! ```text
//! Server -> Client: {"max_x":2,"max_y":2,"game_map":{"1,1":"#",...},"winning_condition":false,...}
//! Client -> Server: ! (1,1)
//! Server -> Client: {"max_x":2,"max_y":2,"game_map":{"1,1":".",...},"winning_condition":true,...}
//! ```

use crate::error::ProtocolError;
use crate::{Command, GameError, GameState, SessionController};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Board snapshot sent after every command. Mine positions only show up in
/// `game_map` when reveal mode is on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateMessage {
    pub max_x: u32,
    pub max_y: u32,
    pub game_map: BTreeMap<String, String>,
    pub winning_condition: bool,
    pub loosing_condition: bool,
    pub mines: u32,
    pub flags: u32,
    pub game_over: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StateMessage {
    pub fn from_session(session: &SessionController, message: Option<String>) -> Self {
        let board = session.board();
        let (max_x, max_y) = board.dimensions();
        let game_map = board
            .render()
            .into_iter()
            .map(|(coord, tile)| (coord.key(), tile.symbol()))
            .collect();

        Self {
            max_x,
            max_y,
            game_map,
            winning_condition: board.is_won(),
            loosing_condition: session.state() == GameState::Lost,
            mines: board.max_mines(),
            flags: board.flags().len() as u32,
            game_over: session.is_game_over(),
            message,
        }
    }

    pub fn to_line(&self) -> Result<String, ProtocolError> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientMessage {
    pub command: String,
}

impl ClientMessage {
    /// Reads one inbound line. A line starting with `{` must be a well-formed
    /// command object; anything else is taken as the command text itself.
    pub fn from_line(line: &str) -> Result<Self, ProtocolError> {
        let trimmed = line.trim();
        if trimmed.starts_with('{') {
            return Ok(serde_json::from_str(trimmed)?);
        }
        Ok(Self {
            command: trimmed.to_string(),
        })
    }

    pub fn command(&self) -> Result<Command, GameError> {
        self.command.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, BoardConfig, Coordinate, FixedPlacement};

    #[test]
    fn test_initial_state_is_all_hidden() {
        let session = SessionController::new(BoardConfig::new(3, 2)).unwrap();
        let msg = StateMessage::from_session(&session, None);

        assert_eq!((msg.max_x, msg.max_y), (3, 2));
        assert_eq!(msg.game_map.len(), 6);
        assert!(msg.game_map.values().all(|s| s == "#"));
        assert_eq!(msg.game_map.get("3,2").map(String::as_str), Some("#"));
        assert!(!msg.winning_condition);
        assert!(!msg.loosing_condition);
        assert_eq!(msg.flags, 0);
    }

    #[test]
    fn test_lost_session_sets_losing_flag() {
        let config = BoardConfig::new(3, 3).with_mines(1).with_percent_mines(None);
        let board =
            Board::with_placement(&config, FixedPlacement::new([Coordinate::new(3, 3)])).unwrap();
        let mut session = SessionController::with_board(config, board);
        session.dispatch(Command::Reveal(Coordinate::new(3, 3))).unwrap();

        let msg = StateMessage::from_session(&session, None);
        assert!(msg.loosing_condition);
        assert!(msg.game_over);
        assert_eq!(msg.game_map["3,3"], "*");
    }

    #[test]
    fn test_state_line_shape() {
        let session = SessionController::new(BoardConfig::new(2, 2).with_mines(0)).unwrap();
        let line = StateMessage::from_session(&session, None).to_line().unwrap();
        assert!(line.ends_with('\n'));

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        for key in [
            "max_x",
            "max_y",
            "game_map",
            "winning_condition",
            "loosing_condition",
            "mines",
            "flags",
        ] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert!(value.get("message").is_none());
        assert!(value.get("visible").is_none());
    }

    #[test]
    fn test_client_message_forms() {
        let bare = ClientMessage::from_line("! (2,3)\r\n").unwrap();
        assert_eq!(bare.command(), Ok(Command::Reveal(Coordinate::new(2, 3))));

        let json = ClientMessage::from_line(r#"{"command":"? 1,1"}"#).unwrap();
        assert_eq!(json.command(), Ok(Command::Flag(Coordinate::new(1, 1))));
    }

    #[test]
    fn test_state_echo_is_refused() {
        let echo = r#"{"command":"!1,1","mines":[[1,1]],"visible":[]}"#;
        assert!(matches!(
            ClientMessage::from_line(echo),
            Err(ProtocolError::Json(_))
        ));
        assert!(ClientMessage::from_line("{not json").is_err());
    }
}
