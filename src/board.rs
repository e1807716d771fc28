use crate::placement::{MinePlacement, RandomPlacement};
use crate::{BoardConfig, Coordinate, GameError, GameMap, Tile};
use itertools::Itertools;
use std::collections::HashSet;
use std::sync::Arc;

/// Game state for one round. Mines are laid out on the first reveal, so
/// `mines` and `empty` stay empty until then.
#[derive(Debug, Clone)]
pub struct Board {
    width: u32,
    height: u32,
    max_mines: u32,
    seed: u64,
    mines: HashSet<Coordinate>,
    empty: HashSet<Coordinate>,
    visible: HashSet<Coordinate>,
    flags: HashSet<Coordinate>,
    reveal: bool,
    placement: Arc<dyn MinePlacement>,
}

impl Board {
    pub fn new(config: &BoardConfig) -> Result<Self, GameError> {
        Self::with_placement(config, RandomPlacement::new(config.seed))
    }

    pub fn with_placement(
        config: &BoardConfig,
        placement: impl MinePlacement + 'static,
    ) -> Result<Self, GameError> {
        let max_mines = config.resolve_mine_count()?;

        Ok(Board {
            width: config.width,
            height: config.height,
            max_mines,
            seed: config.seed,
            mines: HashSet::new(),
            empty: HashSet::new(),
            visible: HashSet::new(),
            flags: HashSet::new(),
            reveal: false,
            placement: Arc::new(placement),
        })
    }

    pub fn is_within_bounds(&self, coord: Coordinate) -> bool {
        coord.x >= 1 && coord.x <= self.width as i32 && coord.y >= 1 && coord.y <= self.height as i32
    }

    /// Every grid coordinate, row by row.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> {
        (1..=self.height as i32)
            .cartesian_product(1..=self.width as i32)
            .map(|(y, x)| Coordinate::new(x, y))
    }

    pub fn adjacent_mines(&self, coord: Coordinate) -> u8 {
        coord
            .neighbors()
            .filter(|c| self.mines.contains(c))
            .count() as u8
    }

    pub fn is_placed(&self) -> bool {
        !self.mines.is_empty() || !self.empty.is_empty()
    }

    fn place_mines(&mut self, anchor: Coordinate) {
        let exclude: HashSet<Coordinate> = anchor.neighbors().chain(Some(anchor)).collect();
        self.mines = self
            .placement
            .place(self.width, self.height, self.max_mines, &exclude);
        self.empty = self
            .coordinates()
            .filter(|c| !self.mines.contains(c))
            .collect();
        log::debug!(
            "Placed {} mines on {}x{} around first reveal {}",
            self.mines.len(),
            self.width,
            self.height,
            anchor
        );
    }

    /// Reveals `coord`, flooding outward across tiles with no adjacent mines.
    /// Tiles with a count become visible but stop the flood. Revealing a mine
    /// changes nothing here; the caller checks [`Board::hit_mine`].
    pub fn uncover(&mut self, coord: Coordinate) -> Result<(), GameError> {
        if !self.is_within_bounds(coord) {
            return Err(GameError::OutOfBounds(coord));
        }
        if self.visible.contains(&coord) {
            return Ok(());
        }
        if !self.is_placed() {
            self.place_mines(coord);
        }
        if self.mines.contains(&coord) {
            return Ok(());
        }

        let mut pending = vec![coord];
        while let Some(current) = pending.pop() {
            if !self.visible.insert(current) {
                continue;
            }
            if self.adjacent_mines(current) > 0 {
                continue;
            }
            pending.extend(
                current
                    .neighbors()
                    .filter(|c| self.empty.contains(c) && !self.visible.contains(c)),
            );
        }

        Ok(())
    }

    /// Marks a revealed mine as visible. Only meaningful once the game is lost.
    pub(crate) fn expose(&mut self, coord: Coordinate) {
        if self.mines.contains(&coord) {
            self.visible.insert(coord);
        }
    }

    pub fn toggle_flag(&mut self, coord: Coordinate) -> Result<(), GameError> {
        if !self.is_within_bounds(coord) {
            return Err(GameError::OutOfBounds(coord));
        }
        if !self.flags.remove(&coord) {
            self.flags.insert(coord);
        }
        Ok(())
    }

    pub fn toggle_reveal(&mut self) {
        self.reveal = !self.reveal;
    }

    pub fn set_reveal(&mut self, reveal: bool) {
        self.reveal = reveal;
    }

    pub fn is_won(&self) -> bool {
        !self.mines.is_empty() && self.visible == self.empty
    }

    pub fn hit_mine(&self, coord: Coordinate) -> bool {
        self.mines.contains(&coord)
    }

    pub fn tile(&self, coord: Coordinate) -> Tile {
        let mut tile = if self.flags.contains(&coord) {
            Tile::Flag
        } else if !self.visible.contains(&coord) {
            Tile::Hidden
        } else {
            match self.adjacent_mines(coord) {
                0 => Tile::Empty,
                n => Tile::Count(n),
            }
        };

        if self.reveal {
            if self.mines.contains(&coord) {
                tile = Tile::Mine;
            } else if self.flags.contains(&coord) {
                tile = Tile::Wrong;
            }
        }
        tile
    }

    pub fn render(&self) -> GameMap {
        self.coordinates().map(|c| (c, self.tile(c))).collect()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn max_mines(&self) -> u32 {
        self.max_mines
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn reveal(&self) -> bool {
        self.reveal
    }

    pub fn mines(&self) -> &HashSet<Coordinate> {
        &self.mines
    }

    pub fn empty(&self) -> &HashSet<Coordinate> {
        &self.empty
    }

    pub fn visible(&self) -> &HashSet<Coordinate> {
        &self.visible
    }

    pub fn flags(&self) -> &HashSet<Coordinate> {
        &self.flags
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.max_mines == other.max_mines
            && self.seed == other.seed
            && self.mines == other.mines
            && self.empty == other.empty
            && self.visible == other.visible
            && self.flags == other.flags
            && self.reveal == other.reveal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedPlacement;

    fn board_with_mines(width: u32, height: u32, mines: &[(i32, i32)]) -> Board {
        let config = BoardConfig::new(width, height)
            .with_mines(mines.len() as u32)
            .with_percent_mines(None);
        Board::with_placement(
            &config,
            FixedPlacement::new(mines.iter().map(|&(x, y)| Coordinate::new(x, y))),
        )
        .unwrap()
    }

    #[test]
    fn test_placement_is_lazy() {
        let board = Board::new(&BoardConfig::default()).unwrap();
        assert!(!board.is_placed());
        assert!(board.mines().is_empty());
        assert!(board.empty().is_empty());
    }

    #[test]
    fn test_first_reveal_partitions_grid() {
        let mut board = Board::new(&BoardConfig::default()).unwrap();
        board.uncover(Coordinate::new(4, 6)).unwrap();

        assert_eq!(board.mines().len(), 10);
        assert!(board.mines().is_disjoint(board.empty()));
        assert_eq!(board.mines().len() + board.empty().len(), 100);
        assert!(!board.hit_mine(Coordinate::new(4, 6)));
        assert_eq!(board.adjacent_mines(Coordinate::new(4, 6)), 0);
    }

    #[test]
    fn test_count_tile_does_not_flood() {
        let mut board = board_with_mines(3, 3, &[(3, 3)]);
        board.uncover(Coordinate::new(2, 2)).unwrap();
        assert_eq!(board.visible(), &HashSet::from([Coordinate::new(2, 2)]));
    }

    #[test]
    fn test_flood_fill_stops_at_numbered_border() {
        // column 3 is a wall of mines on a 5x3 grid
        let mut board = board_with_mines(5, 3, &[(3, 1), (3, 2), (3, 3)]);
        board.uncover(Coordinate::new(1, 2)).unwrap();

        let expected: HashSet<Coordinate> = (1..=2)
            .cartesian_product(1..=3)
            .map(|(x, y)| Coordinate::new(x, y))
            .collect();
        assert_eq!(board.visible(), &expected);
        assert!(!board.is_won());
    }

    #[test]
    fn test_uncover_is_idempotent() {
        let mut board = board_with_mines(4, 4, &[(4, 4)]);
        board.uncover(Coordinate::new(1, 1)).unwrap();
        let before = board.clone();
        board.uncover(Coordinate::new(1, 1)).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn test_mine_reveal_leaves_visible_untouched() {
        let mut board = board_with_mines(4, 4, &[(4, 4)]);
        board.uncover(Coordinate::new(1, 1)).unwrap();
        let visible = board.visible().clone();
        board.uncover(Coordinate::new(4, 4)).unwrap();
        assert!(board.hit_mine(Coordinate::new(4, 4)));
        assert_eq!(board.visible(), &visible);
    }

    #[test]
    fn test_win_when_all_empty_tiles_visible() {
        let mut board = board_with_mines(3, 3, &[(3, 3)]);
        board.uncover(Coordinate::new(1, 1)).unwrap();
        assert_eq!(board.visible(), board.empty());
        assert!(board.is_won());
    }

    #[test]
    fn test_out_of_bounds() {
        let mut board = board_with_mines(3, 3, &[]);
        assert_eq!(
            board.uncover(Coordinate::new(0, 1)),
            Err(GameError::OutOfBounds(Coordinate::new(0, 1)))
        );
        assert!(board.toggle_flag(Coordinate::new(4, 1)).is_err());
        assert!(!board.is_placed());
    }

    #[test]
    fn test_render_symbols() {
        let mut board = board_with_mines(3, 3, &[(3, 3)]);
        board.toggle_flag(Coordinate::new(1, 3)).unwrap();
        board.toggle_flag(Coordinate::new(3, 3)).unwrap();
        board.uncover(Coordinate::new(2, 2)).unwrap();

        let map = board.render();
        assert_eq!(map.len(), 9);
        assert_eq!(map[&Coordinate::new(2, 2)], Tile::Count(1));
        assert_eq!(map[&Coordinate::new(1, 1)], Tile::Hidden);
        assert_eq!(map[&Coordinate::new(1, 3)], Tile::Flag);
        assert_eq!(map[&Coordinate::new(3, 3)], Tile::Flag);

        board.set_reveal(true);
        let map = board.render();
        assert_eq!(map[&Coordinate::new(3, 3)], Tile::Mine);
        assert_eq!(map[&Coordinate::new(1, 3)], Tile::Wrong);
        assert_eq!(map[&Coordinate::new(2, 2)], Tile::Count(1));
    }

    #[test]
    fn test_toggle_flag_twice_restores() {
        let mut board = board_with_mines(3, 3, &[]);
        board.toggle_flag(Coordinate::new(2, 2)).unwrap();
        assert!(board.flags().contains(&Coordinate::new(2, 2)));
        board.toggle_flag(Coordinate::new(2, 2)).unwrap();
        assert!(board.flags().is_empty());
    }
}
