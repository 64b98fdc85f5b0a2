pub mod encoding;
pub mod network;
pub mod roadmap;
pub mod segment;

pub use encoding::{EncodingError, SegmentShape};
pub use network::{RoadError, RoadNetwork};
pub use roadmap::Roadmap;
pub use segment::{Segment, SegmentId};
