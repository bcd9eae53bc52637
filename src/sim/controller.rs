//! Round controller
//!
//! Owns the round state, the timer queue and the presentation collaborator.
//! The host feeds it input events and advances its clock; everything else
//! (spawns, countdown, expiries) happens in response to due timers.

use super::grid::ObstacleToken;
use super::messages::{LOSE_MESSAGES, WIN_MESSAGES, pick_message};
use super::random::RandomSource;
use super::render::{FeedbackKind, Outcome, Renderer};
use super::schedule::{Scheduler, TimerEvent, TimerHandle};
use super::state::{RoundPhase, RoundState, RoundSummary};
use crate::consts::*;
use crate::difficulty::Difficulty;
use crate::tuning::Tuning;

/// Everything a running round has armed: the three repeating producers and
/// any obstacle expiries still outstanding
#[derive(Debug, Clone)]
struct RoundTimers {
    spawn: TimerHandle,
    obstacle: TimerHandle,
    countdown: TimerHandle,
    expiries: Vec<TimerHandle>,
}

pub struct GameController<R: Renderer, S: RandomSource> {
    tuning: Tuning,
    state: RoundState,
    scheduler: Scheduler,
    timers: Option<RoundTimers>,
    renderer: R,
    rng: S,
    last_summary: Option<RoundSummary>,
}

impl<R: Renderer, S: RandomSource> GameController<R, S> {
    /// Idle controller showing the normal profile
    pub fn new(tuning: Tuning, renderer: R, rng: S) -> Self {
        let difficulty = Difficulty::default();
        let state = RoundState::new(difficulty, tuning.profile(difficulty));
        let mut controller = Self {
            tuning,
            state,
            scheduler: Scheduler::new(),
            timers: None,
            renderer,
            rng,
            last_summary: None,
        };
        controller.render_all();
        controller
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.state.time_remaining
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn phase(&self) -> RoundPhase {
        self.state.phase
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Current virtual time in ms
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Timers still armed (repeating plus pending obstacle expiries)
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// Summary of the most recently finished round, cleared by reset
    pub fn last_summary(&self) -> Option<&RoundSummary> {
        self.last_summary.as_ref()
    }

    // === Input events ===

    pub fn on_start_requested(&mut self, selection: Option<&str>) -> bool {
        self.start(Difficulty::from_selection(selection))
    }

    pub fn on_cell_clicked(&mut self, cell: usize) -> Option<FeedbackKind> {
        self.resolve_click(cell)
    }

    pub fn on_reset_requested(&mut self) {
        self.reset();
    }

    // === Lifecycle ===

    /// Begin a round. Ignored while a round is already running.
    pub fn start(&mut self, difficulty: Difficulty) -> bool {
        if self.is_active() {
            log::debug!("Start ignored, round already running");
            return false;
        }

        let profile = self.tuning.profile(difficulty);
        self.state = RoundState::new(difficulty, profile);
        self.state.phase = RoundPhase::Playing;
        self.last_summary = None;

        // Stragglers from a previous round must not leak into this one
        self.cancel_timers();
        self.timers = Some(RoundTimers {
            spawn: self
                .scheduler
                .every(profile.spawn_interval_ms, TimerEvent::SpawnCollectible),
            obstacle: self
                .scheduler
                .every(profile.obstacle_interval_ms, TimerEvent::SpawnObstacle),
            countdown: self
                .scheduler
                .every(COUNTDOWN_INTERVAL_MS, TimerEvent::Countdown),
            expiries: Vec::new(),
        });

        self.renderer.clear_end_message();
        self.render_all();

        log::info!(
            "Round started on {} (goal {}, {}s, spawn every {}ms, obstacle every {}ms)",
            difficulty.as_str(),
            profile.goal,
            profile.duration_secs,
            profile.spawn_interval_ms,
            profile.obstacle_interval_ms
        );
        true
    }

    /// Finish the running round and report the outcome. Does nothing (and
    /// returns `None`) if no round is running.
    pub fn end(&mut self) -> Option<RoundSummary> {
        if !self.is_active() {
            return None;
        }

        let outcome = self.state.outcome();
        self.state.phase = RoundPhase::Finished(outcome);
        self.cancel_timers();
        self.state.grid.clear();
        self.renderer.render_grid(self.state.grid.cells());

        let messages = match outcome {
            Outcome::Win => WIN_MESSAGES,
            Outcome::Lose => LOSE_MESSAGES,
        };
        let message = pick_message(messages, &mut self.rng);
        self.renderer.show_score(self.state.score);
        self.renderer.show_end_message(message, outcome);
        if outcome == Outcome::Win {
            self.renderer.trigger_celebration();
        }

        let summary = RoundSummary {
            difficulty: self.state.difficulty,
            outcome,
            score: self.state.score,
            goal: self.state.goal(),
            stats: self.state.stats,
            message: message.to_string(),
        };
        log::info!(
            "Round over: {:?} with {}/{} ({} cans, {} penalties, {} misses)",
            outcome,
            summary.score,
            summary.goal,
            summary.stats.collected,
            summary.stats.penalties,
            summary.stats.misses
        );
        self.last_summary = Some(summary.clone());
        Some(summary)
    }

    /// Stop everything and return to an idle board for the same difficulty.
    /// No outcome is evaluated.
    pub fn reset(&mut self) {
        self.cancel_timers();
        let difficulty = self.state.difficulty;
        self.state = RoundState::new(difficulty, self.tuning.profile(difficulty));
        self.last_summary = None;
        self.renderer.clear_end_message();
        self.render_all();
        log::info!("Round reset");
    }

    fn cancel_timers(&mut self) {
        let Some(timers) = self.timers.take() else {
            return;
        };
        self.scheduler.cancel(timers.spawn);
        self.scheduler.cancel(timers.obstacle);
        self.scheduler.cancel(timers.countdown);
        for expiry in timers.expiries {
            self.scheduler.cancel(expiry);
        }
    }

    // === Clicks ===

    /// Classify a click on `cell` and apply its effect. Whole-cell hit-testing:
    /// any click inside the cell counts against whatever the cell holds.
    pub fn resolve_click(&mut self, cell: usize) -> Option<FeedbackKind> {
        if !self.is_active() {
            return None;
        }
        let content = self.state.grid.get(cell)?;

        let kind = if content.is_collectible() {
            self.state.score += HIT_POINTS;
            self.state.stats.collected += 1;
            self.state.grid.clear_cell(cell);
            self.renderer.render_grid(self.state.grid.cells());
            self.renderer.show_score(self.state.score);
            self.evaluate_milestones();
            FeedbackKind::Hit
        } else if content.is_obstacle() {
            self.state.apply_penalty();
            self.state.stats.penalties += 1;
            self.state.grid.clear_cell(cell);
            self.renderer.render_grid(self.state.grid.cells());
            self.renderer.show_score(self.state.score);
            FeedbackKind::Penalty
        } else {
            self.state.stats.misses += 1;
            FeedbackKind::Miss
        };

        log::debug!("Click on cell {}: {:?}, score {}", cell, kind, self.state.score);
        self.renderer.flash_cell_feedback(cell, kind);
        self.renderer.show_stats(&self.state.stats);
        Some(kind)
    }

    /// Announce milestones the current score has reached. The last one
    /// signalled is the one left on screen.
    fn evaluate_milestones(&mut self) {
        let goal = self.state.goal();
        let fired = self
            .state
            .milestones
            .evaluate(self.state.score, goal, &mut self.rng);
        for achievement in fired {
            log::info!("Milestone {}% reached", achievement.percent);
            self.renderer.show_achievement(achievement.message);
        }
    }

    // === Clock ===

    /// Run every timer due up to `now_ms`, in order
    pub fn advance_to(&mut self, now_ms: u64) {
        while let Some(event) = self.scheduler.pop_due(now_ms) {
            self.dispatch(event);
        }
        self.scheduler.advance_clock(now_ms);
    }

    pub fn advance_by(&mut self, delta_ms: u64) {
        let target = self.scheduler.now_ms() + delta_ms;
        self.advance_to(target);
    }

    fn dispatch(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::SpawnCollectible => self.spawn_collectible(),
            TimerEvent::SpawnObstacle => self.spawn_obstacle(),
            TimerEvent::Countdown => self.tick_countdown(),
            TimerEvent::ObstacleExpired { cell, token } => self.expire_obstacle(cell, token),
        }
    }

    fn spawn_collectible(&mut self) {
        if !self.is_active() {
            return;
        }
        let cell = self.rng.pick(GRID_CELLS);
        self.state.grid.place_collectible(cell);
        self.renderer.render_grid(self.state.grid.cells());
    }

    fn spawn_obstacle(&mut self) {
        if !self.is_active() {
            return;
        }
        let cell = self.rng.pick(GRID_CELLS);
        match self.state.grid.place_obstacle(cell) {
            Some(token) => {
                let handle = self
                    .scheduler
                    .after(OBSTACLE_LIFETIME_MS, TimerEvent::ObstacleExpired { cell, token });
                if let Some(timers) = self.timers.as_mut() {
                    let scheduler = &self.scheduler;
                    timers.expiries.retain(|h| scheduler.is_armed(*h));
                    timers.expiries.push(handle);
                }
                self.renderer.render_grid(self.state.grid.cells());
            }
            None => log::debug!("Obstacle skipped, cell {} occupied", cell),
        }
    }

    fn tick_countdown(&mut self) {
        if !self.is_active() {
            return;
        }
        self.state.time_remaining = self.state.time_remaining.saturating_sub(1);
        self.renderer.show_timer(self.state.time_remaining);
        if self.state.time_remaining == 0 {
            self.end();
        }
    }

    fn expire_obstacle(&mut self, cell: usize, token: ObstacleToken) {
        if !self.is_active() {
            return;
        }
        if self.state.grid.expire_obstacle(cell, token) {
            self.renderer.render_grid(self.state.grid.cells());
        }
    }

    fn render_all(&mut self) {
        self.renderer.render_grid(self.state.grid.cells());
        self.renderer.show_score(self.state.score);
        self.renderer.show_timer(self.state.time_remaining);
        self.renderer.show_stats(&self.state.stats);
    }
}
