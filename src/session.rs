use crate::command::RestartParams;
use crate::{Board, BoardConfig, Command, Coordinate, GameError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

/// Result of a command that was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Won,
    Lost,
    Restarted,
    Undone,
    Help,
    Quit,
}

/// Drives one game: enforces game-over rules and keeps snapshots for undo.
#[derive(Debug)]
pub struct SessionController {
    config: BoardConfig,
    board: Board,
    history: Vec<Board>,
    state: GameState,
}

impl SessionController {
    pub fn new(config: BoardConfig) -> Result<Self, GameError> {
        let board = Board::new(&config)?;
        Ok(Self::with_board(config, board))
    }

    /// Starts from an existing board. `config` is the base for later restarts.
    pub fn with_board(config: BoardConfig, board: Board) -> Self {
        Self {
            config,
            board,
            history: Vec::new(),
            state: GameState::Playing,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state != GameState::Playing
    }

    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    pub fn dispatch(&mut self, command: Command) -> Result<Outcome, GameError> {
        log::debug!("Dispatching {:?}", command);
        match command {
            Command::Reveal(coord) => self.reveal(coord),
            Command::Flag(coord) => self.toggle_flag(coord),
            Command::ToggleReveal => {
                self.toggle_reveal();
                Ok(Outcome::Continue)
            }
            Command::Restart(params) => self.restart(params),
            Command::Undo => self.undo(),
            Command::Help => Ok(Outcome::Help),
            Command::Quit => Ok(Outcome::Quit),
            Command::Noop => Ok(Outcome::Continue),
        }
    }

    fn check_playable(&self, coord: Coordinate) -> Result<(), GameError> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }
        if !self.board.is_within_bounds(coord) {
            return Err(GameError::OutOfBounds(coord));
        }
        Ok(())
    }

    fn snapshot(&mut self) {
        self.history.push(self.board.clone());
    }

    pub fn reveal(&mut self, coord: Coordinate) -> Result<Outcome, GameError> {
        self.check_playable(coord)?;
        self.snapshot();
        self.board.uncover(coord)?;

        if self.board.hit_mine(coord) {
            log::info!("Mine hit at {}", coord);
            self.state = GameState::Lost;
            self.board.expose(coord);
            self.board.set_reveal(true);
            return Ok(Outcome::Lost);
        }

        if self.board.is_won() {
            log::info!("Board cleared");
            self.state = GameState::Won;
            self.board.set_reveal(true);
            return Ok(Outcome::Won);
        }

        Ok(Outcome::Continue)
    }

    pub fn toggle_flag(&mut self, coord: Coordinate) -> Result<Outcome, GameError> {
        self.check_playable(coord)?;
        self.snapshot();
        self.board.toggle_flag(coord)?;
        Ok(Outcome::Continue)
    }

    /// Allowed after the game ends, but only recorded for undo while playing.
    pub fn toggle_reveal(&mut self) {
        if !self.is_game_over() {
            self.snapshot();
        }
        self.board.toggle_reveal();
    }

    pub fn restart(&mut self, params: Option<RestartParams>) -> Result<Outcome, GameError> {
        let config = match params {
            Some(p) => BoardConfig {
                width: p.width,
                height: p.height,
                max_mines: p.mines,
                ..self.config.clone()
            },
            None => self.config.clone(),
        };
        // build first so a rejected size leaves the current game alone
        let board = Board::new(&config)?;

        log::info!(
            "Restarting with a {}x{} board and {} mines",
            config.width,
            config.height,
            board.max_mines()
        );
        self.board = board;
        self.history.clear();
        self.state = GameState::Playing;
        Ok(Outcome::Restarted)
    }

    pub fn undo(&mut self) -> Result<Outcome, GameError> {
        let board = self.history.pop().ok_or(GameError::NothingToUndo)?;
        self.board = board;
        self.state = GameState::Playing;
        Ok(Outcome::Undone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_on_fresh_session_fails() {
        let mut session = SessionController::new(BoardConfig::default()).unwrap();
        let before = session.board().clone();
        assert_eq!(session.dispatch(Command::Undo), Err(GameError::NothingToUndo));
        assert_eq!(session.board(), &before);
    }

    #[test]
    fn test_out_of_bounds_reveal_takes_no_snapshot() {
        let mut session = SessionController::new(BoardConfig::default()).unwrap();
        let result = session.dispatch(Command::Reveal(Coordinate::new(11, 1)));
        assert_eq!(result, Err(GameError::OutOfBounds(Coordinate::new(11, 1))));
        assert_eq!(session.undo_depth(), 0);
        assert!(!session.board().is_placed());
    }

    #[test]
    fn test_noop_and_help_do_not_snapshot() {
        let mut session = SessionController::new(BoardConfig::default()).unwrap();
        assert_eq!(session.dispatch(Command::Noop), Ok(Outcome::Continue));
        assert_eq!(session.dispatch(Command::Help), Ok(Outcome::Help));
        assert_eq!(session.undo_depth(), 0);
    }
}
