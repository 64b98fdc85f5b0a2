use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::road::encoding::SegmentShape;
use crate::road::segment::{Segment, SegmentId};
use crate::types::Color;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoadError {
    #[error("segment {0} cannot link to itself")]
    SelfLink(SegmentId),
    #[error("segment {segment} already has its {required} link(s)")]
    OverconnectedSegment { segment: SegmentId, required: usize },
    #[error("segment {0} is linked and can no longer rotate")]
    RotateLinked(SegmentId),
    #[error("segment {0} does not exist")]
    UnknownSegment(SegmentId),
}

/// Arena holding every segment of every tile in play. Segments are never
/// removed, so a [`SegmentId`] stays valid for the life of the network.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoadNetwork {
    segments: Vec<Segment>,
}

impl RoadNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn insert(&mut self, shape: SegmentShape) -> SegmentId {
        let id = SegmentId(self.segments.len());
        self.segments.push(Segment::new(shape));
        id
    }

    pub fn get(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(id.0)
    }

    pub fn segment(&self, id: SegmentId) -> Result<&Segment, RoadError> {
        self.get(id).ok_or(RoadError::UnknownSegment(id))
    }

    fn segment_mut(&mut self, id: SegmentId) -> Result<&mut Segment, RoadError> {
        self.segments
            .get_mut(id.0)
            .ok_or(RoadError::UnknownSegment(id))
    }

    /// Links `a` and `b` in both directions. Both sides are checked before
    /// either is touched, so a failed connect leaves the network unchanged.
    pub fn connect(&mut self, a: SegmentId, b: SegmentId) -> Result<(), RoadError> {
        if a == b {
            return Err(RoadError::SelfLink(a));
        }
        for (id, other) in [(a, b), (b, a)] {
            let segment = self.segment(id)?;
            if segment.links.contains(&other) || segment.is_finished() {
                return Err(RoadError::OverconnectedSegment {
                    segment: id,
                    required: segment.required_link_count(),
                });
            }
        }
        self.segment_mut(a)?.links.push(b);
        self.segment_mut(b)?.links.push(a);
        debug!(
            %a,
            %b,
            a_finished = self.segments[a.0].is_finished(),
            b_finished = self.segments[b.0].is_finished(),
            "connected segments"
        );
        Ok(())
    }

    /// Every segment reachable from `root` through links, `root` first.
    /// The walk keeps its own visited set, so closed loops terminate after
    /// each member is seen once.
    pub fn component(&self, root: SegmentId) -> Result<Vec<SegmentId>, RoadError> {
        self.segment(root)?;
        let mut visited = HashSet::from([root]);
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            order.push(id);
            for &next in &self.segment(id)?.links {
                if visited.insert(next) {
                    stack.push(next);
                }
            }
        }
        Ok(order)
    }

    /// Re-evaluates completion for the component containing `root` and
    /// returns the cached flag afterwards.
    pub fn update_complete(&mut self, root: SegmentId) -> Result<bool, RoadError> {
        let members = self.component(root)?;
        let finished = members
            .iter()
            .all(|id| self.segments[id.0].is_finished());
        if finished {
            for id in &members {
                self.segments[id.0].complete = true;
            }
        }
        trace!(%root, size = members.len(), finished, "evaluated completion");
        Ok(self.segments[root.0].complete)
    }

    pub fn is_complete(&self, id: SegmentId) -> bool {
        self.get(id).is_some_and(Segment::is_complete)
    }

    /// Markers of `color` along the road through `root`; zero until the
    /// road is complete.
    pub fn score(&self, root: SegmentId, color: Color) -> Result<u32, RoadError> {
        if !self.segment(root)?.is_complete() || !color.is_owned() {
            return Ok(0);
        }
        let members = self.component(root)?;
        Ok(members
            .iter()
            .filter(|id| self.segments[id.0].owner() == color)
            .count() as u32)
    }

    pub(crate) fn rotate_segment(&mut self, id: SegmentId) -> Result<(), RoadError> {
        let segment = self.segment_mut(id)?;
        if !segment.links.is_empty() {
            return Err(RoadError::RotateLinked(id));
        }
        segment.shape = segment.shape.rotated();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Direction;

    fn through(net: &mut RoadNetwork) -> SegmentId {
        net.insert(SegmentShape::through(
            Direction::North,
            Direction::South,
            Color::Unowned,
        ))
    }

    #[test]
    fn failed_connect_leaves_both_sides_untouched() {
        let mut net = RoadNetwork::new();
        let dead = net.insert(SegmentShape::dead_end(Direction::North));
        let a = through(&mut net);
        let b = through(&mut net);
        net.connect(dead, a).unwrap();

        let err = net.connect(b, dead).unwrap_err();
        assert_eq!(
            err,
            RoadError::OverconnectedSegment {
                segment: dead,
                required: 1
            }
        );
        assert!(net.segment(b).unwrap().links().is_empty());
        assert_eq!(net.segment(dead).unwrap().links(), &[a]);
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut net = RoadNetwork::new();
        let a = through(&mut net);
        assert_eq!(
            net.connect(a, SegmentId(9)),
            Err(RoadError::UnknownSegment(SegmentId(9)))
        );
        assert!(!net.is_complete(SegmentId(9)));
    }

    #[test]
    fn component_lists_each_member_once() {
        let mut net = RoadNetwork::new();
        let ids: Vec<_> = (0..4).map(|_| through(&mut net)).collect();
        for i in 0..4 {
            net.connect(ids[i], ids[(i + 1) % 4]).unwrap();
        }
        let mut members = net.component(ids[2]).unwrap();
        members.sort();
        assert_eq!(members, ids);
        assert!(net.update_complete(ids[0]).unwrap());
    }

    #[test]
    fn rotating_a_linked_segment_is_refused() {
        let mut net = RoadNetwork::new();
        let a = through(&mut net);
        let b = through(&mut net);
        net.connect(a, b).unwrap();
        assert_eq!(net.rotate_segment(a), Err(RoadError::RotateLinked(a)));
    }
}
