//! Can Dash - a timed 3x3 grab-the-can arcade minigame
//!
//! Core modules:
//! - `sim`: Deterministic round logic (grid, scheduling, scoring, milestones)
//! - `difficulty`: Difficulty selection and the fixed profile table
//! - `tuning`: Data-driven game balance (JSON overrides of the profile table)
//! - `platform`: Browser shell (DOM renderer, audio, input wiring)

pub mod difficulty;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use difficulty::{Difficulty, DifficultyProfile};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Grid is always 3x3
    pub const GRID_SIDE: usize = 3;
    pub const GRID_CELLS: usize = GRID_SIDE * GRID_SIDE;

    /// Countdown ticks once per second
    pub const COUNTDOWN_INTERVAL_MS: u64 = 1000;
    /// Obstacles revert to empty after this long
    pub const OBSTACLE_LIFETIME_MS: u64 = 1200;

    /// Points for grabbing a can
    pub const HIT_POINTS: u32 = 1;
    /// Points lost for clicking an obstacle (score never drops below zero)
    pub const OBSTACLE_PENALTY: u32 = 2;

    /// Renderer-side feedback timings
    pub const FEEDBACK_CLEAR_MS: i32 = 280;
    pub const ACHIEVEMENT_DISPLAY_MS: i32 = 1800;
    pub const ACHIEVEMENT_CLEAR_DELAY_MS: i32 = 300;
    pub const CELEBRATION_MS: i32 = 3000;
}

/// Row/column of a cell index on the 3x3 grid
#[inline]
pub fn cell_coords(index: usize) -> (usize, usize) {
    (index / consts::GRID_SIDE, index % consts::GRID_SIDE)
}

/// Cell index from row/column, `None` when off the grid
#[inline]
pub fn cell_index(row: usize, col: usize) -> Option<usize> {
    (row < consts::GRID_SIDE && col < consts::GRID_SIDE).then_some(row * consts::GRID_SIDE + col)
}
