//! Compact per-tile road encoding.
//!
//! A tile's roads are written as clauses separated by `;`. Each clause holds
//! exactly two compass letters (`n`, `e`, `s`, `w`) and at most one marker
//! color (`R`, `Y`, `G`, `B`), e.g. `"wsG;neR"`. Edges no clause mentions
//! become dead ends.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::coords::Direction;
use crate::types::Color;

const TERMINATOR: char = ';';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentShape {
    pub endpoints: [Direction; 2],
    pub owner: Color,
}

impl SegmentShape {
    pub fn through(a: Direction, b: Direction, owner: Color) -> Self {
        Self {
            endpoints: [a, b],
            owner,
        }
    }

    pub fn dead_end(direction: Direction) -> Self {
        Self {
            endpoints: [direction, Direction::Boundary],
            owner: Color::Unowned,
        }
    }

    pub fn is_dead_end(&self) -> bool {
        self.endpoints.contains(&Direction::Boundary)
    }

    pub fn required_link_count(&self) -> usize {
        if self.is_dead_end() { 1 } else { 2 }
    }

    pub fn touches(&self, direction: Direction) -> bool {
        direction.is_compass() && self.endpoints.contains(&direction)
    }

    pub fn rotated(&self) -> Self {
        Self {
            endpoints: [self.endpoints[0].rotate(), self.endpoints[1].rotate()],
            owner: self.owner,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("code '{token}' is not valid: {encoding:?}")]
    InvalidToken { token: char, encoding: String },
    #[error("code '{token}' appears twice in one road: {encoding:?}")]
    DuplicateToken { token: char, encoding: String },
    #[error("road must link exactly two edges, found {count}: {encoding:?}")]
    EndpointCount { count: usize, encoding: String },
    #[error("road carries more than one marker: {encoding:?}")]
    MultipleOwners { encoding: String },
    #[error("marker without a road: {encoding:?}")]
    OwnerWithoutRoad { encoding: String },
    #[error("edge {direction} is used by two roads: {encoding:?}")]
    DirectionReused {
        direction: Direction,
        encoding: String,
    },
}

#[derive(Default)]
struct Clause {
    directions: SmallVec<[Direction; 2]>,
    owner: Option<Color>,
}

/// Parses `encoding` into one shape per road, padding uncovered edges with
/// dead ends so every compass direction belongs to exactly one shape.
pub fn parse(encoding: &str) -> Result<Vec<SegmentShape>, EncodingError> {
    let mut shapes = Vec::with_capacity(4);
    let mut clause = Clause::default();

    for token in encoding.chars() {
        if token == TERMINATOR {
            close_clause(std::mem::take(&mut clause), &mut shapes, encoding)?;
        } else if let Some(direction) = Direction::from_code(token) {
            if clause.directions.contains(&direction) {
                return Err(EncodingError::DuplicateToken {
                    token,
                    encoding: encoding.to_string(),
                });
            }
            clause.directions.push(direction);
        } else if let Some(color) = Color::from_code(token) {
            match clause.owner {
                Some(existing) if existing == color => {
                    return Err(EncodingError::DuplicateToken {
                        token,
                        encoding: encoding.to_string(),
                    });
                }
                Some(_) => {
                    return Err(EncodingError::MultipleOwners {
                        encoding: encoding.to_string(),
                    });
                }
                None => clause.owner = Some(color),
            }
        } else {
            return Err(EncodingError::InvalidToken {
                token,
                encoding: encoding.to_string(),
            });
        }
    }
    close_clause(clause, &mut shapes, encoding)?;

    for direction in Direction::COMPASS {
        if !shapes.iter().any(|shape| shape.touches(direction)) {
            shapes.push(SegmentShape::dead_end(direction));
        }
    }
    Ok(shapes)
}

fn close_clause(
    clause: Clause,
    shapes: &mut Vec<SegmentShape>,
    encoding: &str,
) -> Result<(), EncodingError> {
    if clause.directions.is_empty() {
        if clause.owner.is_some() {
            return Err(EncodingError::OwnerWithoutRoad {
                encoding: encoding.to_string(),
            });
        }
        return Ok(());
    }
    if clause.directions.len() != 2 {
        return Err(EncodingError::EndpointCount {
            count: clause.directions.len(),
            encoding: encoding.to_string(),
        });
    }
    for &direction in &clause.directions {
        if shapes.iter().any(|shape| shape.touches(direction)) {
            return Err(EncodingError::DirectionReused {
                direction,
                encoding: encoding.to_string(),
            });
        }
    }
    shapes.push(SegmentShape::through(
        clause.directions[0],
        clause.directions[1],
        clause.owner.unwrap_or_default(),
    ));
    Ok(())
}

/// Writes shapes back in the encoding format. Dead ends are implied and
/// therefore omitted.
pub fn encode_shapes<'a>(shapes: impl IntoIterator<Item = &'a SegmentShape>) -> String {
    let mut out = String::new();
    for shape in shapes.into_iter().filter(|shape| !shape.is_dead_end()) {
        out.extend(shape.endpoints.iter().filter_map(|d| d.code()));
        if let Some(code) = shape.owner.code() {
            out.push(code);
        }
        out.push(TERMINATOR);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_owned_roads() {
        let shapes = parse("wsG;neR").unwrap();
        assert_eq!(
            shapes,
            vec![
                SegmentShape::through(Direction::West, Direction::South, Color::Green),
                SegmentShape::through(Direction::North, Direction::East, Color::Red),
            ]
        );
    }

    #[test]
    fn empty_encoding_is_four_dead_ends() {
        let shapes = parse("").unwrap();
        assert_eq!(shapes.len(), 4);
        assert!(shapes.iter().all(SegmentShape::is_dead_end));
    }

    #[test]
    fn empty_clauses_are_skipped() {
        let shapes = parse(";;ns;").unwrap();
        assert_eq!(shapes.len(), 3);
        assert_eq!(shapes[0].endpoints, [Direction::North, Direction::South]);
    }

    #[test]
    fn rejects_malformed_clauses() {
        assert!(matches!(
            parse("nn"),
            Err(EncodingError::DuplicateToken { token: 'n', .. })
        ));
        assert!(matches!(
            parse("nsRR"),
            Err(EncodingError::DuplicateToken { token: 'R', .. })
        ));
        assert!(matches!(
            parse("nsRG"),
            Err(EncodingError::MultipleOwners { .. })
        ));
        assert!(matches!(
            parse("n;"),
            Err(EncodingError::EndpointCount { count: 1, .. })
        ));
        assert!(matches!(
            parse("nsw"),
            Err(EncodingError::EndpointCount { count: 3, .. })
        ));
        assert!(matches!(
            parse("ns;ne"),
            Err(EncodingError::DirectionReused {
                direction: Direction::North,
                ..
            })
        ));
        assert!(matches!(
            parse("R;"),
            Err(EncodingError::OwnerWithoutRoad { .. })
        ));
        assert!(matches!(
            parse("nx"),
            Err(EncodingError::InvalidToken { token: 'x', .. })
        ));
    }

    #[test]
    fn encode_omits_dead_ends() {
        let shapes = parse("wsG;ne").unwrap();
        assert_eq!(encode_shapes(&shapes), "wsG;ne;");
    }
}
