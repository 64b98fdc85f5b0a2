use std::collections::HashMap;
use std::fs;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use crate::coords::{Direction, GridPos};
use crate::road::{EncodingError, RoadError, RoadNetwork, SegmentId};
use crate::tileset::TileSet;
use crate::types::{Color, TurnPhase};

use super::players::PlayerState;
use super::tile::{Tile, TileId};

pub const DEFAULT_SCORE_TO_WIN: u32 = 8;
pub const MAX_PLAYERS: usize = Color::ORDERED.len();

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player_names: Vec<String>,
    pub score_to_win: u32,
    pub seed: u64,
    pub shuffle: bool,
    pub tile_set: TileSet,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_names: vec!["Player 1".to_string(), "Player 2".to_string()],
            score_to_win: DEFAULT_SCORE_TO_WIN,
            seed: 42,
            shuffle: true,
            tile_set: TileSet::default(),
        }
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.tile_set.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }
}

/// Command-line values laid over a loaded [`GameConfig`]. `None` keeps the
/// configured value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub player_names: Option<Vec<String>>,
    pub seed: Option<u64>,
    pub score_to_win: Option<u32>,
    pub tile_set: Option<TileSet>,
    pub no_shuffle: bool,
}

impl ConfigOverrides {
    /// Splits a comma-separated name list, dropping blank entries.
    pub fn parse_player_names(list: &str) -> Vec<String> {
        list.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect()
    }
}

impl GameConfig {
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(names) = overrides.player_names {
            self.player_names = names;
        }
        if let Some(seed) = overrides.seed {
            self.seed = seed;
        }
        if let Some(score) = overrides.score_to_win {
            self.score_to_win = score;
        }
        if let Some(tile_set) = overrides.tile_set {
            self.tile_set = tile_set;
        }
        if overrides.no_shuffle {
            self.shuffle = false;
        }
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("tile {index} has a malformed roadmap")]
    MalformedTile {
        index: usize,
        #[source]
        source: EncodingError,
    },
    #[error("cannot read configuration")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration JSON")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("game already completed")]
    GameFinished,
    #[error("no tile left to play")]
    NoCurrentTile,
    #[error("cannot place a tile at {0}")]
    InvalidPlacement(GridPos),
    #[error("current tile has not been placed")]
    TileNotPlaced,
    #[error("command needs phase {expected} but game is in {actual}")]
    WrongPhase {
        expected: TurnPhase,
        actual: TurnPhase,
    },
    #[error("at most 4 players supported, got {0}")]
    TooManyPlayers(usize),
    #[error(transparent)]
    Road(#[from] RoadError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    TilePlaced {
        tile: TileId,
        position: GridPos,
        rotation: u8,
    },
    RoadCompleted {
        segment: SegmentId,
        length: usize,
    },
    ScoreAwarded {
        player: usize,
        points: u32,
        total: u32,
    },
    TurnAdvanced {
        next_player: usize,
    },
    GameOver {
        winners: Vec<usize>,
    },
}

/// Result of confirming a tile. `score_deltas` has one entry per player in
/// seating order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalizeOutcome {
    pub events: Vec<GameEvent>,
    pub score_deltas: Vec<u32>,
    pub done: bool,
}

impl FinalizeOutcome {
    fn empty(num_players: usize) -> Self {
        Self {
            events: Vec::new(),
            score_deltas: vec![0; num_players],
            done: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    network: RoadNetwork,
    tiles: Vec<Tile>,
    pile: Vec<TileId>,
    placed: Vec<TileId>,
    grid: HashMap<GridPos, TileId>,
    players: Vec<PlayerState>,
    current_player: Option<usize>,
    phase: TurnPhase,
    pub turn: u32,
}

impl GameState {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        if config.player_names.len() > MAX_PLAYERS {
            return Err(GameError::TooManyPlayers(config.player_names.len()));
        }

        let mut network = RoadNetwork::new();
        let tiles = config.tile_set.build(&mut network)?;
        let mut pile: Vec<TileId> = tiles.iter().map(|tile| tile.id).collect();
        if config.shuffle {
            let mut rng = StdRng::seed_from_u64(config.seed);
            pile.shuffle(&mut rng);
        }

        let players = config
            .player_names
            .iter()
            .zip(Color::ORDERED)
            .map(|(name, color)| PlayerState::new(name.as_str(), color))
            .collect::<Vec<_>>();
        let current_player = (!players.is_empty()).then_some(0);
        let phase = if pile.is_empty() {
            TurnPhase::GameOver
        } else {
            TurnPhase::PlacingTile
        };
        info!(
            tiles = tiles.len(),
            players = players.len(),
            seed = config.seed,
            "new game"
        );

        Ok(Self {
            config,
            network,
            tiles,
            pile,
            placed: Vec::new(),
            grid: HashMap::new(),
            players,
            current_player,
            phase,
            turn: 0,
        })
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == TurnPhase::GameOver
    }

    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    pub fn current_player(&self) -> Option<usize> {
        self.current_player
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id)
    }

    /// Finalized tiles in placement order.
    pub fn placed_tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.placed.iter().map(|id| &self.tiles[*id])
    }

    /// Tiles still waiting to be drawn, the current tile included.
    pub fn pile_len(&self) -> usize {
        if self.is_over() { 0 } else { self.pile.len() }
    }

    /// Top of the draw pile; `None` once the game is over.
    pub fn current_tile(&self) -> Option<&Tile> {
        if self.is_over() {
            return None;
        }
        self.pile.last().map(|id| &self.tiles[*id])
    }

    pub fn is_occupied(&self, pos: GridPos) -> bool {
        self.grid.contains_key(&pos)
    }

    /// Tile shown at `pos`: the tentatively placed current tile wins over
    /// the finalized grid.
    pub fn tile_at(&self, pos: GridPos) -> Option<&Tile> {
        if let Some(tile) = self.current_tile().filter(|tile| tile.is_at(pos)) {
            return Some(tile);
        }
        self.grid.get(&pos).map(|id| &self.tiles[*id])
    }

    pub fn is_valid_placement(&self, pos: GridPos) -> bool {
        if self.current_tile().is_none() {
            return false;
        }
        if self.placed.is_empty() {
            return pos == GridPos::ORIGIN;
        }
        if self.is_occupied(pos) {
            return false;
        }
        pos.neighbors().any(|(_, next)| self.is_occupied(next))
    }

    /// Smallest rectangle holding every finalized tile and the origin,
    /// grown by one cell so candidate placements fit.
    pub fn bounds(&self) -> (GridPos, GridPos) {
        let (mut min, mut max) = (GridPos::ORIGIN, GridPos::ORIGIN);
        for pos in self.grid.keys() {
            min.x = min.x.min(pos.x);
            min.y = min.y.min(pos.y);
            max.x = max.x.max(pos.x);
            max.y = max.y.max(pos.y);
        }
        (
            GridPos::new(min.x.saturating_sub(1), min.y.saturating_sub(1)),
            GridPos::new(max.x.saturating_add(1), max.y.saturating_add(1)),
        )
    }

    /// Players at or above the winning score. When the pile ran out before
    /// anyone got there, the leaders of a finished game.
    pub fn winners(&self) -> Vec<usize> {
        let reached: Vec<usize> = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_winner(self.config.score_to_win))
            .map(|(idx, _)| idx)
            .collect();
        if !reached.is_empty() || !self.is_over() {
            return reached;
        }
        let best = self.players.iter().map(|p| p.score).max().unwrap_or(0);
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.score == best)
            .map(|(idx, _)| idx)
            .collect()
    }

    #[instrument(skip(self), fields(turn = self.turn))]
    pub fn place_current(&mut self, pos: GridPos) -> Result<(), GameError> {
        self.ensure_phase(TurnPhase::PlacingTile)?;
        if !self.is_valid_placement(pos) {
            warn!(%pos, "placement declined");
            return Err(GameError::InvalidPlacement(pos));
        }
        let id = self.current_id()?;
        self.tiles[id].place(pos);
        self.phase = TurnPhase::RotatingOrConfirming;
        Ok(())
    }

    /// Turns the current tile a quarter clockwise and returns its rotation.
    pub fn rotate_current(&mut self) -> Result<u8, GameError> {
        if self.is_over() {
            return Err(GameError::GameFinished);
        }
        let id = self.current_id()?;
        self.tiles[id].rotate(&mut self.network)?;
        Ok(self.tiles[id].rotation())
    }

    /// Takes the current tile back off the board. Nothing was linked yet,
    /// so there is nothing to undo in the road network.
    pub fn cancel_placement(&mut self) -> Result<(), GameError> {
        self.ensure_phase(TurnPhase::RotatingOrConfirming)?;
        let id = self.current_id()?;
        self.tiles[id].unplace();
        self.phase = TurnPhase::PlacingTile;
        Ok(())
    }

    /// Commits the current tile: links it to its four neighbors, scores
    /// every road that became complete, draws the next tile and passes the
    /// turn.
    #[instrument(skip(self), fields(turn = self.turn))]
    pub fn finalize_tile(&mut self) -> Result<FinalizeOutcome, GameError> {
        self.ensure_phase(TurnPhase::RotatingOrConfirming)?;
        let id = self.current_id()?;
        let pos = self.tiles[id]
            .position()
            .ok_or(GameError::TileNotPlaced)?;

        let mut outcome = FinalizeOutcome::empty(self.players.len());
        outcome.events.push(GameEvent::TilePlaced {
            tile: id,
            position: pos,
            rotation: self.tiles[id].rotation(),
        });
        // links already made cannot be undone, so a failure halts the game
        if let Err(err) = self.link_and_score(id, pos, &mut outcome) {
            error!(%err, %pos, "road network rejected the tile, halting");
            self.phase = TurnPhase::GameOver;
            self.current_player = None;
            return Err(err);
        }
        self.pile.pop();
        self.placed.push(id);
        self.grid.insert(pos, id);

        self.turn += 1;
        let ended = self.pile.is_empty()
            || self.players.is_empty()
            || self
                .players
                .iter()
                .any(|p| p.is_winner(self.config.score_to_win));
        if ended {
            self.phase = TurnPhase::GameOver;
            self.current_player = None;
            let winners = self.winners();
            info!(?winners, turn = self.turn, "game over");
            outcome.events.push(GameEvent::GameOver { winners });
            outcome.done = true;
        } else {
            self.phase = TurnPhase::PlacingTile;
            if let Some(current) = self.current_player {
                let next_player = (current + 1) % self.players.len();
                self.current_player = Some(next_player);
                outcome.events.push(GameEvent::TurnAdvanced { next_player });
            }
        }
        Ok(outcome)
    }

    fn link_and_score(
        &mut self,
        id: TileId,
        pos: GridPos,
        outcome: &mut FinalizeOutcome,
    ) -> Result<(), GameError> {
        for direction in Direction::COMPASS {
            let Some(next) = pos.neighbor(direction) else {
                continue;
            };
            let target = self.grid.get(&next).map(|n| self.tiles[*n].roadmap());
            let completed = self.tiles[id]
                .roadmap()
                .link(direction, target, &mut self.network)?;
            if let Some(segment) = completed {
                self.score_road(segment, outcome)?;
            }
        }
        Ok(())
    }

    fn score_road(
        &mut self,
        segment: SegmentId,
        outcome: &mut FinalizeOutcome,
    ) -> Result<(), GameError> {
        let length = self.network.component(segment)?.len();
        outcome
            .events
            .push(GameEvent::RoadCompleted { segment, length });
        for (idx, player) in self.players.iter_mut().enumerate() {
            let points = self.network.score(segment, player.color)?;
            if points == 0 {
                continue;
            }
            player.add_score(points);
            outcome.score_deltas[idx] += points;
            debug!(player = idx, points, total = player.score, "score awarded");
            outcome.events.push(GameEvent::ScoreAwarded {
                player: idx,
                points,
                total: player.score,
            });
        }
        Ok(())
    }

    fn current_id(&self) -> Result<TileId, GameError> {
        self.current_tile()
            .map(|tile| tile.id)
            .ok_or(GameError::NoCurrentTile)
    }

    fn ensure_phase(&self, expected: TurnPhase) -> Result<(), GameError> {
        if self.phase == TurnPhase::GameOver {
            return Err(GameError::GameFinished);
        }
        if self.phase != expected {
            return Err(GameError::WrongPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::road::SegmentShape;

    #[test]
    fn rejected_link_halts_without_committing_the_tile() {
        let config = GameConfig {
            player_names: vec!["A".to_string()],
            shuffle: false,
            tile_set: TileSet::from_roadmaps("test", &["", "ns"]),
            ..GameConfig::default()
        };
        let mut state = GameState::new(config).unwrap();
        state.place_current(GridPos::ORIGIN).unwrap();
        state.finalize_tile().unwrap();

        let below = GridPos::new(0, 1);
        state.place_current(below).unwrap();
        let id = state.current_id().unwrap();
        let north = state.tiles[id]
            .segment(Direction::North, &state.network)
            .unwrap();
        let stray = state.network.insert(SegmentShape::dead_end(Direction::South));
        state.network.connect(north, stray).unwrap();

        let err = state.finalize_tile().unwrap_err();
        assert!(matches!(
            err,
            GameError::Road(RoadError::OverconnectedSegment { required: 1, .. })
        ));
        assert_eq!(state.phase(), TurnPhase::GameOver);
        assert_eq!(state.current_player(), None);
        assert!(!state.is_occupied(below));
        assert_eq!(state.placed_tiles().count(), 1);
        assert_eq!(state.turn, 1);
    }
}
