use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info, instrument};

use crate::coords::Direction;
use crate::road::encoding::{self, EncodingError, SegmentShape};
use crate::road::network::{RoadError, RoadNetwork};
use crate::road::segment::SegmentId;

/// The roads of one tile: ids of its segments in the network, in encoding
/// order with padded dead ends last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roadmap {
    encoding: String,
    segments: SmallVec<[SegmentId; 4]>,
}

impl Roadmap {
    /// Parses `encoding` and allocates its segments in `network`. Nothing is
    /// allocated when the encoding is rejected.
    pub fn parse(encoding: &str, network: &mut RoadNetwork) -> Result<Self, EncodingError> {
        let shapes = encoding::parse(encoding)?;
        let segments = shapes.into_iter().map(|shape| network.insert(shape)).collect();
        Ok(Self {
            encoding: encoding.to_string(),
            segments,
        })
    }

    /// Source string this roadmap was built from, before any rotation.
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    pub fn segments(&self) -> &[SegmentId] {
        &self.segments
    }

    /// The segment reaching `direction`. Always `Some` for a compass
    /// direction; `None` for `Boundary`.
    pub fn segment(&self, direction: Direction, network: &RoadNetwork) -> Option<SegmentId> {
        self.segments.iter().copied().find(|id| {
            network
                .get(*id)
                .is_some_and(|segment| segment.touches(direction))
        })
    }

    pub fn shapes(&self, network: &RoadNetwork) -> Vec<SegmentShape> {
        self.segments
            .iter()
            .filter_map(|id| network.get(*id).map(|segment| segment.shape()))
            .collect()
    }

    /// Current (rotated) roads in the encoding format.
    pub fn current_encoding(&self, network: &RoadNetwork) -> String {
        encoding::encode_shapes(&self.shapes(network))
    }

    /// Quarter turn clockwise. Refused once any segment is linked.
    pub fn rotate(&self, network: &mut RoadNetwork) -> Result<(), RoadError> {
        for id in &self.segments {
            if !network.segment(*id)?.links().is_empty() {
                return Err(RoadError::RotateLinked(*id));
            }
        }
        for id in &self.segments {
            network.rotate_segment(*id)?;
        }
        Ok(())
    }

    /// Joins the road leaving this tile through `direction` to the road
    /// entering `target` from the opposite side. Returns the source segment
    /// when the joined road is now complete. A missing neighbor is a no-op.
    #[instrument(level = "debug", skip(self, target, network), fields(encoding = %self.encoding))]
    pub fn link(
        &self,
        direction: Direction,
        target: Option<&Roadmap>,
        network: &mut RoadNetwork,
    ) -> Result<Option<SegmentId>, RoadError> {
        let Some(target) = target else {
            return Ok(None);
        };
        let (Some(source), Some(dest)) = (
            self.segment(direction, network),
            target.segment(direction.opposite(), network),
        ) else {
            debug!("no road crosses a boundary edge");
            return Ok(None);
        };
        network.connect(source, dest)?;
        if network.update_complete(source)? {
            info!(%source, %dest, "road completed");
            Ok(Some(source))
        } else {
            Ok(None)
        }
    }
}
