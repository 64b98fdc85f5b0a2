use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Tile edge a road leaves through. `Boundary` is the far end of a dead end:
/// it never crosses onto another tile.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    North,
    East,
    South,
    West,
    Boundary,
}

impl Direction {
    pub const COMPASS: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::Boundary => Direction::Boundary,
        }
    }

    /// Quarter turn clockwise.
    pub fn rotate(self) -> Direction {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
            Direction::Boundary => Direction::Boundary,
        }
    }

    pub fn rotate_by(self, quarter_turns: u8) -> Direction {
        (0..quarter_turns % 4).fold(self, |d, _| d.rotate())
    }

    pub fn is_compass(self) -> bool {
        !matches!(self, Direction::Boundary)
    }

    pub fn from_code(code: char) -> Option<Direction> {
        match code {
            'n' => Some(Direction::North),
            'e' => Some(Direction::East),
            's' => Some(Direction::South),
            'w' => Some(Direction::West),
            _ => None,
        }
    }

    pub fn code(self) -> Option<char> {
        match self {
            Direction::North => Some('n'),
            Direction::East => Some('e'),
            Direction::South => Some('s'),
            Direction::West => Some('w'),
            Direction::Boundary => None,
        }
    }
}

/// Grid cell. `y` grows southwards, matching screen rows.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const ORIGIN: GridPos = GridPos { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `None` when either coordinate leaves the `i32` range.
    pub fn checked_add(self, other: GridPos) -> Option<GridPos> {
        Some(GridPos::new(
            self.x.checked_add(other.x)?,
            self.y.checked_add(other.y)?,
        ))
    }

    /// `None` for `Boundary`, which has no cell behind it, and past the
    /// edge of the grid.
    pub fn neighbor(self, direction: Direction) -> Option<GridPos> {
        UNIT_VECTORS
            .get(&direction)
            .and_then(|offset| self.checked_add(*offset))
    }

    pub fn neighbors(self) -> impl Iterator<Item = (Direction, GridPos)> {
        Direction::COMPASS
            .into_iter()
            .filter_map(move |d| self.neighbor(d).map(|pos| (d, pos)))
    }

    pub fn is_adjacent(self, other: GridPos) -> bool {
        matches!(
            (self.x.abs_diff(other.x), self.y.abs_diff(other.y)),
            (0, 1) | (1, 0)
        )
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

pub static UNIT_VECTORS: Lazy<HashMap<Direction, GridPos>> = Lazy::new(|| {
    use Direction::*;
    HashMap::from([
        (North, GridPos::new(0, -1)),
        (East, GridPos::new(1, 0)),
        (South, GridPos::new(0, 1)),
        (West, GridPos::new(-1, 0)),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn opposite_is_an_involution() {
        for d in Direction::iter() {
            assert_eq!(d.opposite().opposite(), d);
        }
        assert_eq!(Direction::Boundary.opposite(), Direction::Boundary);
    }

    #[test]
    fn rotation_cycles_compass_and_fixes_boundary() {
        assert_eq!(Direction::North.rotate(), Direction::East);
        assert_eq!(Direction::West.rotate(), Direction::North);
        assert_eq!(Direction::Boundary.rotate(), Direction::Boundary);
        for d in Direction::iter() {
            assert_eq!(d.rotate_by(4), d);
        }
    }

    #[test]
    fn neighbor_steps_one_cell() {
        let pos = GridPos::new(2, -1);
        assert_eq!(pos.neighbor(Direction::North), Some(GridPos::new(2, -2)));
        assert_eq!(pos.neighbor(Direction::East), Some(GridPos::new(3, -1)));
        assert_eq!(pos.neighbor(Direction::Boundary), None);
        for (d, n) in pos.neighbors() {
            assert!(pos.is_adjacent(n));
            assert_eq!(n.neighbor(d.opposite()), Some(pos));
        }
    }

    #[test]
    fn grid_edge_has_no_neighbor_past_it() {
        let corner = GridPos::new(i32::MAX, i32::MIN);
        assert_eq!(corner.neighbor(Direction::East), None);
        assert_eq!(corner.neighbor(Direction::North), None);
        assert_eq!(corner.neighbors().count(), 2);
        assert!(!corner.is_adjacent(GridPos::new(i32::MIN, i32::MIN)));
        assert!(corner.is_adjacent(GridPos::new(i32::MAX - 1, i32::MIN)));
    }
}
