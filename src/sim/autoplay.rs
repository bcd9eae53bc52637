//! Demo mode - a bot plays the round
//!
//! Watches the board and clicks the can after a fixed reaction delay. Never
//! clicks obstacles, so a fast enough bot always clears the goal.

use super::controller::GameController;
use super::random::RandomSource;
use super::render::Renderer;
use super::state::RoundSummary;
use crate::difficulty::Difficulty;

/// A click the bot has decided on but not yet made
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PlannedClick {
    cell: usize,
    at_ms: u64,
}

#[derive(Debug, Clone)]
pub struct AutoPlayer {
    reaction_ms: u64,
    planned: Option<PlannedClick>,
    clicks: u32,
}

impl AutoPlayer {
    pub fn new(reaction_ms: u64) -> Self {
        Self {
            reaction_ms,
            planned: None,
            clicks: 0,
        }
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    /// Look at the board and click if the reaction delay has passed
    pub fn update<R: Renderer, S: RandomSource>(&mut self, game: &mut GameController<R, S>) {
        if !game.is_active() {
            self.planned = None;
            return;
        }

        let now = game.now_ms();
        let target = game.state().grid.collectible_index();

        match (self.planned, target) {
            (Some(plan), Some(cell)) if plan.cell == cell => {
                if now >= plan.at_ms {
                    game.resolve_click(cell);
                    self.clicks += 1;
                    self.planned = None;
                }
            }
            (_, Some(cell)) => {
                // New can (or it moved before we got there)
                self.planned = Some(PlannedClick {
                    cell,
                    at_ms: now + self.reaction_ms,
                });
            }
            (_, None) => self.planned = None,
        }
    }
}

/// Play a whole round with the bot, stepping the clock by `step_ms`
pub fn play_round<R: Renderer, S: RandomSource>(
    game: &mut GameController<R, S>,
    difficulty: Difficulty,
    bot: &mut AutoPlayer,
    step_ms: u64,
) -> Option<RoundSummary> {
    if !game.start(difficulty) {
        return None;
    }
    let step_ms = step_ms.max(1);
    while game.is_active() {
        game.advance_by(step_ms);
        bot.update(game);
    }
    game.last_summary().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::SeededRandom;
    use crate::sim::render::{Outcome, RecordingRenderer};
    use crate::tuning::Tuning;

    #[test]
    fn test_fast_bot_wins() {
        let mut game = GameController::new(
            Tuning::default(),
            RecordingRenderer::new(),
            SeededRandom::new(1234),
        );
        let mut bot = AutoPlayer::new(100);
        let summary = play_round(&mut game, Difficulty::Normal, &mut bot, 50).unwrap();
        assert_eq!(summary.outcome, Outcome::Win);
        assert_eq!(summary.stats.penalties, 0);
        assert_eq!(summary.score, bot.clicks());
    }

    #[test]
    fn test_slow_bot_loses() {
        let mut game = GameController::new(
            Tuning::default(),
            RecordingRenderer::new(),
            SeededRandom::new(99),
        );
        // Reaction slower than the spawn interval: the can moves first
        let mut bot = AutoPlayer::new(5_000);
        let summary = play_round(&mut game, Difficulty::Hard, &mut bot, 100).unwrap();
        assert_eq!(summary.outcome, Outcome::Lose);
    }

    #[test]
    fn test_start_refused_while_running() {
        let mut game = GameController::new(
            Tuning::default(),
            RecordingRenderer::new(),
            SeededRandom::new(5),
        );
        game.start(Difficulty::Easy);
        let mut bot = AutoPlayer::new(100);
        assert!(play_round(&mut game, Difficulty::Easy, &mut bot, 50).is_none());
    }
}
