use crate::GameError;

pub const DEFAULT_WIDTH: u32 = 10;
pub const DEFAULT_HEIGHT: u32 = 10;
pub const DEFAULT_PERCENT_MINES: f64 = 0.10;
pub const DEFAULT_SEED: u64 = 1;
/// Largest accepted width or height. Restart sizes come from remote peers.
pub const MAX_DIMENSION: u32 = 256;

/// Parameters for a single game. Each session owns its own copy so games can
/// be sized and seeded independently.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    pub width: u32,
    pub height: u32,
    /// Exact mine count. When `percent_mines` is also set it acts as a cap.
    pub max_mines: Option<u32>,
    pub percent_mines: Option<f64>,
    pub seed: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            max_mines: None,
            percent_mines: Some(DEFAULT_PERCENT_MINES),
            seed: DEFAULT_SEED,
        }
    }
}

impl BoardConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_mines(mut self, max_mines: u32) -> Self {
        self.max_mines = Some(max_mines);
        self
    }

    pub fn with_percent_mines(mut self, percent_mines: Option<f64>) -> Self {
        self.percent_mines = percent_mines;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn total_tiles(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Validates the configuration and returns the number of mines to place.
    pub fn resolve_mine_count(&self) -> Result<u32, GameError> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::ConstraintViolation(format!(
                "board size {}x{} has no tiles",
                self.width, self.height
            )));
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(GameError::ConstraintViolation(format!(
                "board size {}x{} exceeds the {}x{} limit",
                self.width, self.height, MAX_DIMENSION, MAX_DIMENSION
            )));
        }
        let total = self.total_tiles();

        if let Some(percent) = self.percent_mines {
            if !(percent > 0.0 && percent <= 1.0) {
                return Err(GameError::ConstraintViolation(format!(
                    "mine percentage {} must be in (0, 1]",
                    percent
                )));
            }
        }

        let mines = match (self.max_mines, self.percent_mines) {
            (Some(mines), Some(percent)) => {
                let density = mines as f64 / total as f64;
                if density > percent {
                    return Err(GameError::ConstraintViolation(format!(
                        "{} mines on {}x{} is a density of {:.3}, above the cap of {}",
                        mines, self.width, self.height, density, percent
                    )));
                }
                mines
            }
            (Some(mines), None) => mines,
            (None, Some(percent)) => (total as f64 * percent).floor() as u32,
            (None, None) => {
                return Err(GameError::ConstraintViolation(
                    "either a mine count or a mine percentage is required".to_string(),
                ))
            }
        };

        if u64::from(mines) >= total {
            return Err(GameError::ConstraintViolation(format!(
                "too many mines ({}) for board size {}x{}",
                mines, self.width, self.height
            )));
        }
        Ok(mines)
    }
}
