use serde::{Deserialize, Serialize};

use crate::types::Color;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    pub color: Color,
    pub score: u32,
}

impl PlayerState {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
            score: 0,
        }
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn is_winner(&self, score_to_win: u32) -> bool {
        self.score >= score_to_win
    }
}
