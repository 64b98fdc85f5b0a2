use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::coords::Direction;
use crate::road::encoding::SegmentShape;
use crate::types::Color;

/// Stable index of a segment inside its [`RoadNetwork`](super::RoadNetwork).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SegmentId(pub usize);

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One road piece inside a tile. Links are stored as ids of the neighboring
/// segments; the relation is kept symmetric by the network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub(crate) shape: SegmentShape,
    pub(crate) links: SmallVec<[SegmentId; 2]>,
    pub(crate) complete: bool,
}

impl Segment {
    pub(crate) fn new(shape: SegmentShape) -> Self {
        Self {
            shape,
            links: SmallVec::new(),
            complete: false,
        }
    }

    pub fn shape(&self) -> SegmentShape {
        self.shape
    }

    pub fn endpoints(&self) -> [Direction; 2] {
        self.shape.endpoints
    }

    pub fn owner(&self) -> Color {
        self.shape.owner
    }

    pub fn links(&self) -> &[SegmentId] {
        &self.links
    }

    pub fn touches(&self, direction: Direction) -> bool {
        self.shape.touches(direction)
    }

    pub fn is_dead_end(&self) -> bool {
        self.shape.is_dead_end()
    }

    pub fn required_link_count(&self) -> usize {
        self.shape.required_link_count()
    }

    pub fn is_finished(&self) -> bool {
        self.links.len() == self.required_link_count()
    }

    /// Whether the whole connected road this segment belongs to was finished
    /// the last time completion was evaluated. Never reverts to false.
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}
