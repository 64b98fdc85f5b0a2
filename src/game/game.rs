use tracing::warn;
use uuid::Uuid;

use crate::game::action::TurnCommand;
use crate::game::players::PlayerState;
use crate::game::{FinalizeOutcome, GameConfig, GameError, GameState};

/// A game session: the state plus the commands that drove it there.
#[derive(Debug, Clone)]
pub struct Game {
    pub id: Uuid,
    pub state: GameState,
    history: Vec<TurnCommand>,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Ok(Self {
            id: Uuid::new_v4(),
            state: GameState::new(config)?,
            history: Vec::new(),
        })
    }

    /// Applies `command` for the current player. Only `Confirm` produces an
    /// outcome; declined commands leave the state and history untouched.
    pub fn execute(&mut self, command: TurnCommand) -> Result<Option<FinalizeOutcome>, GameError> {
        let result = match command {
            TurnCommand::Place(pos) => self.state.place_current(pos).map(|()| None),
            TurnCommand::Rotate => self.state.rotate_current().map(|_| None),
            TurnCommand::Cancel => self.state.cancel_placement().map(|()| None),
            TurnCommand::Confirm => self.state.finalize_tile().map(Some),
        };
        match &result {
            Ok(_) => self.history.push(command),
            Err(err) => warn!(%command, %err, "command declined"),
        }
        result
    }

    pub fn history(&self) -> &[TurnCommand] {
        &self.history
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn winners(&self) -> Vec<&PlayerState> {
        self.state
            .winners()
            .into_iter()
            .filter_map(|idx| self.state.players().get(idx))
            .collect()
    }
}
