use serde::{Deserialize, Serialize};

use crate::coords::{Direction, GridPos};
use crate::road::{RoadError, RoadNetwork, Roadmap, SegmentId};

pub type TileId = usize;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    /// Index of the artwork on the tile sheet.
    pub image: usize,
    roadmap: Roadmap,
    position: Option<GridPos>,
    rotation: u8,
}

impl Tile {
    pub fn new(id: TileId, image: usize, roadmap: Roadmap) -> Self {
        Self {
            id,
            image,
            roadmap,
            position: None,
            rotation: 0,
        }
    }

    pub fn roadmap(&self) -> &Roadmap {
        &self.roadmap
    }

    pub fn position(&self) -> Option<GridPos> {
        self.position
    }

    pub fn is_at(&self, pos: GridPos) -> bool {
        self.position == Some(pos)
    }

    /// Quarter turns applied so far, 0..=3.
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    pub fn place(&mut self, pos: GridPos) {
        self.position = Some(pos);
    }

    pub fn unplace(&mut self) {
        self.position = None;
    }

    pub fn rotate(&mut self, network: &mut RoadNetwork) -> Result<(), RoadError> {
        self.roadmap.rotate(network)?;
        self.rotation = (self.rotation + 1) % 4;
        Ok(())
    }

    pub fn segment(&self, direction: Direction, network: &RoadNetwork) -> Option<SegmentId> {
        self.roadmap.segment(direction, network)
    }
}
