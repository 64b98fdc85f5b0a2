use itertools::Itertools;

use crate::coords::{Direction, GridPos};
use crate::game::state::GameState;
use crate::game::tile::Tile;
use crate::road::RoadNetwork;

const CELL_WIDTH: usize = 3;

pub fn display_board(state: &GameState) {
    println!("{}", render_board(state));
}

/// Draws the grid inside [`GameState::bounds`], three text rows per cell.
/// Markers print lowercase while their road is open and uppercase once it
/// is complete. A tile's first marker is drawn in the middle, a second one
/// in the top-left corner. `.` marks cells where the current tile may go.
pub fn render_board(state: &GameState) -> String {
    let (min, max) = state.bounds();
    let mut lines = Vec::new();

    let header = (min.x..=max.x)
        .map(|x| format!("{x:^width$}", width = CELL_WIDTH))
        .join("");
    lines.push(format!("{:>4} {header}", ""));

    for y in min.y..=max.y {
        let mut rows = [String::new(), String::new(), String::new()];
        for x in min.x..=max.x {
            let pos = GridPos::new(x, y);
            let cell = match state.tile_at(pos) {
                Some(tile) => render_tile(tile, state.network()),
                None if state.is_valid_placement(pos) => ["   ", " . ", "   "].map(String::from),
                None => ["   ", "   ", "   "].map(String::from),
            };
            for (row, part) in rows.iter_mut().zip(cell) {
                row.push_str(&part);
            }
        }
        let [top, middle, bottom] = rows;
        lines.push(format!("{:>4} {top}", ""));
        lines.push(format!("{y:>4} {middle}"));
        lines.push(format!("{:>4} {bottom}", ""));
    }
    lines.join("\n")
}

pub fn render_tile(tile: &Tile, network: &RoadNetwork) -> [String; 3] {
    let road = |direction: Direction| {
        tile.segment(direction, network)
            .and_then(|id| network.get(id))
            .is_some_and(|segment| !segment.is_dead_end())
    };
    let north = if road(Direction::North) { '|' } else { ' ' };
    let south = if road(Direction::South) { '|' } else { ' ' };
    let west = if road(Direction::West) { '-' } else { ' ' };
    let east = if road(Direction::East) { '-' } else { ' ' };

    let markers: Vec<char> = tile
        .roadmap()
        .segments()
        .iter()
        .filter_map(|id| network.get(*id))
        .filter_map(|segment| {
            segment.owner().code().map(|code| {
                if segment.is_complete() {
                    code
                } else {
                    code.to_ascii_lowercase()
                }
            })
        })
        .collect();
    let any_road = Direction::COMPASS.into_iter().any(road);
    let center = markers
        .first()
        .copied()
        .unwrap_or(if any_road { '+' } else { 'o' });
    // a tile holds at most two roads; the second marker sits top-left
    let corner = markers.get(1).copied().unwrap_or(' ');

    [
        format!("{corner}{north} "),
        format!("{west}{center}{east}"),
        format!(" {south} "),
    ]
}

/// One line per player, `>` in front of whoever is to move.
pub fn render_scores(state: &GameState) -> String {
    state
        .players()
        .iter()
        .enumerate()
        .map(|(idx, player)| {
            let cursor = if state.current_player() == Some(idx) { '>' } else { ' ' };
            format!(
                "{cursor} {:<16} {:<7} {:>3}",
                player.name,
                player.color.to_string(),
                player.score
            )
        })
        .join("\n")
}
