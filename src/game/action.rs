use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coords::GridPos;

/// What a view layer can ask of the game on the current player's behalf.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TurnCommand {
    Place(GridPos),
    Rotate,
    Cancel,
    Confirm,
}

impl fmt::Display for TurnCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnCommand::Place(pos) => write!(f, "place {} {}", pos.x, pos.y),
            TurnCommand::Rotate => write!(f, "rotate"),
            TurnCommand::Cancel => write!(f, "cancel"),
            TurnCommand::Confirm => write!(f, "confirm"),
        }
    }
}

impl FromStr for TurnCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let verb = words
            .next()
            .ok_or_else(|| "empty command".to_string())?
            .to_ascii_lowercase();
        let command = match verb.as_str() {
            "place" | "p" => {
                let mut coord = || -> Result<i32, String> {
                    let word = words
                        .next()
                        .ok_or_else(|| "place needs two coordinates".to_string())?;
                    word.parse()
                        .map_err(|_| format!("not a coordinate: {word}"))
                };
                let x = coord()?;
                let y = coord()?;
                TurnCommand::Place(GridPos::new(x, y))
            }
            "rotate" | "r" => TurnCommand::Rotate,
            "cancel" | "c" => TurnCommand::Cancel,
            "confirm" | "ok" | "y" => TurnCommand::Confirm,
            _ => return Err(format!("unknown command: {verb}")),
        };
        if let Some(extra) = words.next() {
            return Err(format!("unexpected argument: {extra}"));
        }
        Ok(command)
    }
}
