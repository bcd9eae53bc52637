//! Deterministic round simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Virtual clock only (the host advances it)
//! - Injected randomness only
//! - No DOM or platform dependencies

pub mod autoplay;
pub mod controller;
pub mod grid;
pub mod messages;
pub mod milestones;
pub mod random;
pub mod render;
pub mod schedule;
pub mod state;

pub use autoplay::{AutoPlayer, play_round};
pub use controller::GameController;
pub use grid::{CellState, Grid, ObstacleToken};
pub use milestones::{Achievement, MILESTONES, Milestone, MilestoneTracker};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use render::{FeedbackKind, Outcome, RecordingRenderer, RenderCall, Renderer};
pub use schedule::{Scheduler, TimerEvent, TimerHandle};
pub use state::{RoundPhase, RoundState, RoundStats, RoundSummary};
