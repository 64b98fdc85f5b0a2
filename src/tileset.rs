use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::game::state::ConfigError;
use crate::game::tile::Tile;
use crate::road::{RoadNetwork, Roadmap, encoding};

/// One tile of the printed sheet: where its artwork sits and which roads
/// it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileTemplate {
    pub image: usize,
    pub roadmap: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSet {
    pub name: String,
    pub tiles: Vec<TileTemplate>,
}

// 6x6 sheet, read row by row.
const STANDARD_ROADMAPS: [&str; 36] = [
    "ns", "nsR", "ew", "ewY", "ne", "neG", //
    "es", "esB", "sw", "swR", "wn", "wnY", //
    "", "nsG", "ewB", "neR;swY", "nwG;esB", "ns;ewR", //
    "nsY;ew", "neB", "esR", "swG", "wnB", "nsB", //
    "ewG", "wsG;neR", "nwY;esR", "ns", "ew", "ne", //
    "es", "sw", "wn", "", "nsR;ewY", "ewG;nsB",
];

static STANDARD_TILE_SET: Lazy<TileSet> = Lazy::new(|| TileSet {
    name: "standard".to_string(),
    tiles: STANDARD_ROADMAPS
        .iter()
        .enumerate()
        .map(|(image, roadmap)| TileTemplate {
            image,
            roadmap: roadmap.to_string(),
        })
        .collect(),
});

impl Default for TileSet {
    fn default() -> Self {
        TileSet::standard().clone()
    }
}

impl TileSet {
    pub fn standard() -> &'static TileSet {
        &STANDARD_TILE_SET
    }

    pub fn from_roadmaps<S: AsRef<str>>(name: &str, roadmaps: &[S]) -> Self {
        Self {
            name: name.to_string(),
            tiles: roadmaps
                .iter()
                .enumerate()
                .map(|(image, roadmap)| TileTemplate {
                    image,
                    roadmap: roadmap.as_ref().to_string(),
                })
                .collect(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let set: TileSet = serde_json::from_str(json)?;
        set.validate()?;
        Ok(set)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Checks every roadmap without allocating segments anywhere.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, template) in self.tiles.iter().enumerate() {
            encoding::parse(&template.roadmap)
                .map_err(|source| ConfigError::MalformedTile { index, source })?;
        }
        Ok(())
    }

    /// Creates one unplaced tile per template, ids in sheet order.
    pub fn build(&self, network: &mut RoadNetwork) -> Result<Vec<Tile>, ConfigError> {
        self.validate()?;
        self.tiles
            .iter()
            .enumerate()
            .map(|(index, template)| {
                let roadmap = Roadmap::parse(&template.roadmap, network)
                    .map_err(|source| ConfigError::MalformedTile { index, source })?;
                Ok(Tile::new(index, template.image, roadmap))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_set_is_well_formed() {
        let set = TileSet::standard();
        assert_eq!(set.len(), 36);
        set.validate().unwrap();

        let mut network = RoadNetwork::new();
        let tiles = set.build(&mut network).unwrap();
        assert_eq!(tiles.len(), 36);
        assert!(tiles.iter().all(|tile| tile.position().is_none()));
    }

    #[test]
    fn malformed_entry_reports_its_index() {
        let set = TileSet::from_roadmaps("bad", &["ns", "nse"]);
        let mut network = RoadNetwork::new();
        let err = set.build(&mut network).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedTile { index: 1, .. }));
        assert!(network.is_empty());
    }
}
