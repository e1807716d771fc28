use crate::Coordinate;
use std::collections::BTreeMap;
use std::fmt;

pub const TILE_EMPTY: &str = ".";
pub const TILE_HIDDEN: &str = "#";
pub const TILE_FLAG: &str = "?";
pub const TILE_MINE: &str = "*";
pub const TILE_WRONG: &str = "X";

/// What a player sees at one coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Hidden,
    Flag,
    Empty,
    Count(u8),
    /// Only shown in reveal mode.
    Mine,
    /// A flag on a tile without a mine, only shown in reveal mode.
    Wrong,
}

impl Tile {
    pub fn symbol(&self) -> String {
        match self {
            Tile::Hidden => TILE_HIDDEN.to_string(),
            Tile::Flag => TILE_FLAG.to_string(),
            Tile::Empty => TILE_EMPTY.to_string(),
            Tile::Count(n) => n.to_string(),
            Tile::Mine => TILE_MINE.to_string(),
            Tile::Wrong => TILE_WRONG.to_string(),
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.symbol())
    }
}

/// Rendered board, one tile per grid coordinate.
pub type GameMap = BTreeMap<Coordinate, Tile>;
