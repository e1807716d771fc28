pub mod board;
pub mod command;
pub mod config;
pub mod coordinate;
pub mod error;
pub mod placement;
pub mod protocol;
pub mod server;
pub mod session;
pub mod tile;

pub use board::Board;
pub use command::{Command, RestartParams, HELP_TEXT};
pub use config::BoardConfig;
pub use coordinate::Coordinate;
pub use error::{GameError, ProtocolError};
pub use placement::{FixedPlacement, MinePlacement, RandomPlacement};
pub use protocol::{ClientMessage, StateMessage};
pub use server::{run_server, ServerConfig, MAX_LINE_BYTES};
pub use session::{GameState, Outcome, SessionController};
pub use tile::{GameMap, Tile};
