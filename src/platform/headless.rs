//! Log-only renderer for native runs
//!
//! Prints the board as text through `log`, which is enough to watch the
//! demo bot play in a terminal.

use crate::cell_coords;
use crate::consts::{GRID_CELLS, GRID_SIDE};
use crate::sim::{CellState, FeedbackKind, Outcome, Renderer, RoundStats};

#[derive(Debug, Default)]
pub struct LogRenderer {
    /// Last board drawn, so repeated identical frames are skipped
    last_board: String,
    pub achievements: Vec<String>,
    pub end_message: Option<(String, Outcome)>,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Board as three lines of `.`, `C` (can) and `X` (obstacle)
pub fn board_to_string(cells: &[CellState; GRID_CELLS]) -> String {
    let mut out = String::with_capacity(GRID_CELLS + GRID_SIDE);
    for (index, cell) in cells.iter().enumerate() {
        out.push(match cell {
            CellState::Empty => '.',
            CellState::Collectible => 'C',
            CellState::Obstacle(_) => 'X',
        });
        let (row, col) = cell_coords(index);
        if col == GRID_SIDE - 1 && row < GRID_SIDE - 1 {
            out.push('\n');
        }
    }
    out
}

impl Renderer for LogRenderer {
    fn render_grid(&mut self, cells: &[CellState; GRID_CELLS]) {
        let board = board_to_string(cells);
        if board != self.last_board {
            log::debug!("\n{}", board);
            self.last_board = board;
        }
    }

    fn show_score(&mut self, score: u32) {
        log::debug!("Score: {}", score);
    }

    fn show_timer(&mut self, seconds: u32) {
        if seconds % 5 == 0 {
            log::info!("{}s left", seconds);
        }
    }

    fn show_end_message(&mut self, text: &str, outcome: Outcome) {
        log::info!("{:?}: {}", outcome, text);
        self.end_message = Some((text.to_string(), outcome));
    }

    fn clear_end_message(&mut self) {
        self.end_message = None;
    }

    fn show_achievement(&mut self, text: &str) {
        log::info!("Achievement: {}", text);
        self.achievements.push(text.to_string());
    }

    fn trigger_celebration(&mut self) {
        log::info!("*** confetti ***");
    }

    fn flash_cell_feedback(&mut self, cell: usize, kind: FeedbackKind) {
        log::debug!("Cell {} flashed {}", cell, kind.css_class());
    }

    fn show_stats(&mut self, stats: &RoundStats) {
        log::debug!(
            "Collected {} / penalties {} / misses {}",
            stats.collected,
            stats.penalties,
            stats.misses
        );
    }
}
