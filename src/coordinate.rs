use crate::GameError;
use std::fmt;
use std::str::FromStr;

/// A 1-indexed grid coordinate. Neighbors of border tiles may fall outside
/// the grid; such values never appear in any board set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbors that would overflow `i32` are skipped.
    pub fn neighbors(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (-1..=1).flat_map(move |dy| {
            (-1..=1).filter_map(move |dx| {
                if dx == 0 && dy == 0 {
                    return None;
                }
                Some(Coordinate::new(
                    self.x.checked_add(dx)?,
                    self.y.checked_add(dy)?,
                ))
            })
        })
    }

    /// Key used for the wire map, `"x,y"`.
    pub fn key(&self) -> String {
        format!("{},{}", self.x, self.y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Parses a single coordinate component. Letters are column labels, `A` = 1.
fn parse_component(part: &str) -> Result<i32, GameError> {
    let part = part.trim();
    let mut chars = part.chars();
    let value = match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => {
            (c.to_ascii_uppercase() as u8 - b'A') as i32 + 1
        }
        _ => part
            .parse::<i32>()
            .map_err(|_| GameError::InvalidCoordinate(format!("'{}' is not a number", part)))?,
    };

    if value < 1 {
        return Err(GameError::InvalidCoordinate(format!(
            "'{}' must be positive",
            part
        )));
    }
    Ok(value)
}

/// Splits `a,b,...` or `(a,b,...)` into its comma separated parts.
pub(crate) fn split_tuple(input: &str) -> Vec<&str> {
    let inner = input.trim();
    let inner = inner.strip_prefix('(').unwrap_or(inner);
    let inner = inner.strip_suffix(')').unwrap_or(inner);
    inner.split(',').map(str::trim).collect()
}

impl FromStr for Coordinate {
    type Err = GameError;

    /// Accepts `x,y` or `(x,y)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = split_tuple(s);
        if parts.len() != 2 {
            return Err(GameError::InvalidCoordinate(format!(
                "expected two components in '{}'",
                s.trim()
            )));
        }
        Ok(Coordinate::new(
            parse_component(parts[0])?,
            parse_component(parts[1])?,
        ))
    }
}
