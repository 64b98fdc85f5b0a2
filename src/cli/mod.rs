pub mod board_display;

pub use board_display::{display_board, render_board, render_scores, render_tile};
