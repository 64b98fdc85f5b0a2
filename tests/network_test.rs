//! Tests for segment linking, completion and scoring.

use tileroads::coords::Direction;
use tileroads::road::{RoadError, RoadNetwork, Roadmap, SegmentShape};
use tileroads::types::Color;

fn through(network: &mut RoadNetwork, owner: Color) -> tileroads::SegmentId {
    network.insert(SegmentShape::through(
        Direction::West,
        Direction::East,
        owner,
    ))
}

#[test]
fn test_self_link_is_rejected() {
    let mut network = RoadNetwork::new();
    let a = through(&mut network, Color::Unowned);
    assert_eq!(network.connect(a, a), Err(RoadError::SelfLink(a)));
}

#[test]
fn test_same_pair_twice_overconnects_through_road() {
    let mut network = RoadNetwork::new();
    let a = through(&mut network, Color::Unowned);
    let b = through(&mut network, Color::Unowned);

    network.connect(a, b).unwrap();
    assert!(matches!(
        network.connect(a, b),
        Err(RoadError::OverconnectedSegment { required: 2, .. })
    ));
    assert_eq!(network.segment(a).unwrap().links().len(), 1);
}

#[test]
fn test_dead_end_accepts_exactly_one_link() {
    let mut network = RoadNetwork::new();
    let dead = network.insert(SegmentShape::dead_end(Direction::North));
    let a = through(&mut network, Color::Unowned);
    let b = through(&mut network, Color::Unowned);

    network.connect(dead, a).unwrap();
    assert!(network.segment(dead).unwrap().is_finished());
    assert_eq!(
        network.connect(dead, b),
        Err(RoadError::OverconnectedSegment {
            segment: dead,
            required: 1
        })
    );
}

#[test]
fn test_through_road_finishes_on_second_link() {
    let mut network = RoadNetwork::new();
    let a = through(&mut network, Color::Unowned);
    let left = network.insert(SegmentShape::dead_end(Direction::East));
    let right = network.insert(SegmentShape::dead_end(Direction::West));

    network.connect(a, left).unwrap();
    assert!(!network.segment(a).unwrap().is_finished());
    assert!(!network.update_complete(a).unwrap());

    network.connect(a, right).unwrap();
    assert!(network.segment(a).unwrap().is_finished());
    assert!(network.update_complete(right).unwrap());
    for id in [a, left, right] {
        assert!(network.is_complete(id));
    }
}

#[test]
fn test_incomplete_road_scores_zero() {
    let mut network = RoadNetwork::new();
    let a = through(&mut network, Color::Red);
    let b = through(&mut network, Color::Red);
    network.connect(a, b).unwrap();
    network.update_complete(a).unwrap();

    assert_eq!(network.score(a, Color::Red), Ok(0));
    assert_eq!(network.score(b, Color::Red), Ok(0));
}

#[test]
fn test_closed_loop_of_four_tiles_completes() {
    // 2x2 ring of curves: (0,0) es, (1,0) sw, (1,1) nw, (0,1) ne
    let mut network = RoadNetwork::new();
    let top_left = Roadmap::parse("esR", &mut network).unwrap();
    let top_right = Roadmap::parse("swY", &mut network).unwrap();
    let bottom_right = Roadmap::parse("nwR", &mut network).unwrap();
    let bottom_left = Roadmap::parse("ne", &mut network).unwrap();

    assert_eq!(
        top_left.link(Direction::East, Some(&top_right), &mut network),
        Ok(None)
    );
    assert_eq!(
        top_right.link(Direction::South, Some(&bottom_right), &mut network),
        Ok(None)
    );
    assert_eq!(
        bottom_right.link(Direction::West, Some(&bottom_left), &mut network),
        Ok(None)
    );
    let closing = bottom_left
        .link(Direction::North, Some(&top_left), &mut network)
        .unwrap()
        .expect("loop closes");

    let ring = network.component(closing).unwrap();
    assert_eq!(ring.len(), 4);
    assert!(ring.iter().all(|id| network.is_complete(*id)));
    assert_eq!(network.score(closing, Color::Red), Ok(2));
    assert_eq!(network.score(closing, Color::Yellow), Ok(1));
    assert_eq!(network.score(closing, Color::Blue), Ok(0));

    // the unused dead ends are separate, still open roads
    let outer = top_left.segment(Direction::North, &network).unwrap();
    assert!(!network.is_complete(outer));
    assert_eq!(network.component(outer).unwrap(), vec![outer]);
}

#[test]
fn test_long_road_walk_stays_iterative() {
    let mut network = RoadNetwork::new();
    let start = network.insert(SegmentShape::dead_end(Direction::East));
    let mut previous = start;
    for _ in 0..20_000 {
        let next = through(&mut network, Color::Blue);
        network.connect(previous, next).unwrap();
        previous = next;
    }
    let end = network.insert(SegmentShape::dead_end(Direction::West));
    network.connect(previous, end).unwrap();

    assert!(network.update_complete(end).unwrap());
    assert_eq!(network.component(start).unwrap().len(), 20_002);
    assert_eq!(network.score(start, Color::Blue), Ok(20_000));
}

#[test]
fn test_marker_example_scores_once_closed() {
    let mut network = RoadNetwork::new();
    let tile = Roadmap::parse("wsG;neR", &mut network).unwrap();
    let above = Roadmap::parse("", &mut network).unwrap();
    let right = Roadmap::parse("", &mut network).unwrap();

    // north side meets a bare dead end: that side finishes, the road stays open
    assert_eq!(tile.link(Direction::North, Some(&above), &mut network), Ok(None));
    let above_south = above.segment(Direction::South, &network).unwrap();
    assert!(network.segment(above_south).unwrap().is_finished());
    let north = tile.segment(Direction::North, &network).unwrap();
    assert!(!network.segment(north).unwrap().is_finished());
    assert_eq!(network.score(north, Color::Red), Ok(0));

    let completed = tile
        .link(Direction::East, Some(&right), &mut network)
        .unwrap();
    assert_eq!(completed, Some(north));
    assert!(network.segment(north).unwrap().is_complete());
    assert_eq!(network.score(north, Color::Red), Ok(1));
    assert_eq!(network.score(north, Color::Green), Ok(0));

    let west = tile.segment(Direction::West, &network).unwrap();
    assert!(!network.is_complete(west));
    assert_eq!(network.score(west, Color::Green), Ok(0));
}

#[test]
fn test_completion_is_never_revoked() {
    let mut network = RoadNetwork::new();
    let a = network.insert(SegmentShape::dead_end(Direction::East));
    let b = network.insert(SegmentShape::dead_end(Direction::West));
    network.connect(a, b).unwrap();
    assert!(network.update_complete(a).unwrap());

    let c = through(&mut network, Color::Unowned);
    assert!(network.connect(a, c).is_err());
    assert!(network.update_complete(b).unwrap());
    assert!(network.is_complete(a));
}
