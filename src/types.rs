use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Marker color printed on a road segment. `Unowned` is never handed to a
/// player; it marks segments that score for nobody.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Color {
    Red,
    Yellow,
    Green,
    Blue,
    #[default]
    Unowned,
}

impl Color {
    /// Seating order; players take colors from the front.
    pub const ORDERED: [Color; 4] = [Color::Red, Color::Yellow, Color::Green, Color::Blue];

    pub fn from_code(code: char) -> Option<Color> {
        match code {
            'R' => Some(Color::Red),
            'Y' => Some(Color::Yellow),
            'G' => Some(Color::Green),
            'B' => Some(Color::Blue),
            _ => None,
        }
    }

    pub fn code(self) -> Option<char> {
        match self {
            Color::Red => Some('R'),
            Color::Yellow => Some('Y'),
            Color::Green => Some('G'),
            Color::Blue => Some('B'),
            Color::Unowned => None,
        }
    }

    pub fn is_owned(self) -> bool {
        !matches!(self, Color::Unowned)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TurnPhase {
    PlacingTile,
    RotatingOrConfirming,
    GameOver,
}
