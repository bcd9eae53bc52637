//! Presentation boundary
//!
//! The controller pushes effects through [`Renderer`]; the DOM implementation
//! lives in `platform`, and [`RecordingRenderer`] captures calls for tests and
//! the headless demo.

use serde::{Deserialize, Serialize};

use super::grid::CellState;
use super::state::RoundStats;
use crate::consts::GRID_CELLS;

/// How a round finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
}

/// Transient cell flash after a click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackKind {
    /// Grabbed a can
    Hit,
    /// Clicked an obstacle
    Penalty,
    /// Clicked an empty cell
    Miss,
}

impl FeedbackKind {
    /// CSS class applied to the cell
    pub fn css_class(&self) -> &'static str {
        match self {
            FeedbackKind::Hit => "hit",
            FeedbackKind::Penalty | FeedbackKind::Miss => "miss",
        }
    }
}

pub trait Renderer {
    fn render_grid(&mut self, cells: &[CellState; GRID_CELLS]);
    fn show_score(&mut self, score: u32);
    fn show_timer(&mut self, seconds: u32);
    fn show_end_message(&mut self, text: &str, outcome: Outcome);
    fn clear_end_message(&mut self);
    fn show_achievement(&mut self, text: &str);
    fn trigger_celebration(&mut self);
    fn flash_cell_feedback(&mut self, cell: usize, kind: FeedbackKind);
    /// Collection side panel
    fn show_stats(&mut self, stats: &RoundStats);
}

/// One captured renderer call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCall {
    Grid([CellState; GRID_CELLS]),
    Score(u32),
    Timer(u32),
    EndMessage(String, Outcome),
    ClearEndMessage,
    Achievement(String),
    Celebration,
    Feedback(usize, FeedbackKind),
    Stats(RoundStats),
}

/// Renderer that remembers everything it was asked to do
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<RenderCall>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<RenderCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn last_grid(&self) -> Option<&[CellState; GRID_CELLS]> {
        self.calls.iter().rev().find_map(|c| match c {
            RenderCall::Grid(cells) => Some(cells),
            _ => None,
        })
    }

    pub fn achievements(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                RenderCall::Achievement(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn end_messages(&self) -> Vec<(&str, Outcome)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                RenderCall::EndMessage(text, outcome) => Some((text.as_str(), *outcome)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&RenderCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl Renderer for RecordingRenderer {
    fn render_grid(&mut self, cells: &[CellState; GRID_CELLS]) {
        self.calls.push(RenderCall::Grid(*cells));
    }

    fn show_score(&mut self, score: u32) {
        self.calls.push(RenderCall::Score(score));
    }

    fn show_timer(&mut self, seconds: u32) {
        self.calls.push(RenderCall::Timer(seconds));
    }

    fn show_end_message(&mut self, text: &str, outcome: Outcome) {
        self.calls.push(RenderCall::EndMessage(text.to_string(), outcome));
    }

    fn clear_end_message(&mut self) {
        self.calls.push(RenderCall::ClearEndMessage);
    }

    fn show_achievement(&mut self, text: &str) {
        self.calls.push(RenderCall::Achievement(text.to_string()));
    }

    fn trigger_celebration(&mut self) {
        self.calls.push(RenderCall::Celebration);
    }

    fn flash_cell_feedback(&mut self, cell: usize, kind: FeedbackKind) {
        self.calls.push(RenderCall::Feedback(cell, kind));
    }

    fn show_stats(&mut self, stats: &RoundStats) {
        self.calls.push(RenderCall::Stats(*stats));
    }
}
