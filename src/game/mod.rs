pub mod action;
pub mod game;
pub mod players;
pub mod state;
pub mod tile;

pub use action::TurnCommand;
pub use game::Game;
pub use players::PlayerState;
pub use state::{
    ConfigError, ConfigOverrides, DEFAULT_SCORE_TO_WIN, FinalizeOutcome, GameConfig, GameError, GameEvent,
    GameState, MAX_PLAYERS,
};
pub use tile::{Tile, TileId};
