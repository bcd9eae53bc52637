//! Round state and core simulation types
//!
//! Everything here is owned by the controller and rebuilt at the start of
//! every round.

use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::milestones::MilestoneTracker;
use super::render::Outcome;
use crate::consts::OBSTACLE_PENALTY;
use crate::difficulty::{Difficulty, DifficultyProfile};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Nothing running (fresh or after reset)
    Idle,
    /// Timers running, clicks count
    Playing,
    /// Countdown ran out
    Finished(Outcome),
}

/// Collection panel tallies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundStats {
    /// Cans grabbed
    pub collected: u32,
    /// Obstacles clicked
    pub penalties: u32,
    /// Clicks on empty cells
    pub misses: u32,
}

/// What `end()` reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub difficulty: Difficulty,
    pub outcome: Outcome,
    pub score: u32,
    pub goal: u32,
    pub stats: RoundStats,
    pub message: String,
}

/// Mutable round state
#[derive(Debug, Clone)]
pub struct RoundState {
    pub difficulty: Difficulty,
    pub profile: DifficultyProfile,
    pub score: u32,
    pub time_remaining: u32,
    pub phase: RoundPhase,
    pub grid: Grid,
    pub milestones: MilestoneTracker,
    pub stats: RoundStats,
}

impl RoundState {
    /// Idle state showing the given profile's goal and full timer
    pub fn new(difficulty: Difficulty, profile: DifficultyProfile) -> Self {
        Self {
            difficulty,
            profile,
            score: 0,
            time_remaining: profile.duration_secs,
            phase: RoundPhase::Idle,
            grid: Grid::new(),
            milestones: MilestoneTracker::new(),
            stats: RoundStats::default(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == RoundPhase::Playing
    }

    pub fn goal(&self) -> u32 {
        self.profile.goal
    }

    /// Win iff the goal was met; reaching it exactly counts
    pub fn outcome(&self) -> Outcome {
        if self.score >= self.profile.goal {
            Outcome::Win
        } else {
            Outcome::Lose
        }
    }

    pub fn apply_penalty(&mut self) {
        self.score = self.score.saturating_sub(OBSTACLE_PENALTY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle_with_full_timer() {
        let state = RoundState::new(Difficulty::Hard, Difficulty::Hard.profile());
        assert_eq!(state.phase, RoundPhase::Idle);
        assert!(!state.is_active());
        assert_eq!(state.time_remaining, Difficulty::Hard.profile().duration_secs);
        assert!(state.grid.is_clear());
    }

    #[test]
    fn test_penalty_clamps_at_zero() {
        let mut state = RoundState::new(Difficulty::Normal, Difficulty::Normal.profile());
        state.score = 1;
        state.apply_penalty();
        assert_eq!(state.score, 0);
        state.apply_penalty();
        assert_eq!(state.score, 0);
        state.score = 7;
        state.apply_penalty();
        assert_eq!(state.score, 5);
    }

    #[test]
    fn test_outcome_boundary() {
        let mut state = RoundState::new(Difficulty::Normal, Difficulty::Normal.profile());
        state.score = state.goal() - 1;
        assert_eq!(state.outcome(), Outcome::Lose);
        state.score = state.goal();
        assert_eq!(state.outcome(), Outcome::Win);
    }
}
