#![warn(clippy::all)]
#![deny(rust_2018_idioms)]

pub mod cli;
pub mod coords;
pub mod game;
pub mod road;
pub mod tileset;
pub mod types;

pub use coords::{Direction, GridPos};
pub use game::{Game, GameConfig, GameError, GameState, Tile, TurnCommand};
pub use road::{RoadError, RoadNetwork, Roadmap, SegmentId};
pub use tileset::TileSet;
pub use types::{Color, TurnPhase};
