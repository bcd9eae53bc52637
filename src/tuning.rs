//! Data-driven game balance
//!
//! The built-in profile table can be overridden by a JSON document, e.g.
//!
//! ```json
//! { "hard": { "goal": 30, "duration_secs": 20, "spawn_interval_ms": 600, "obstacle_interval_ms": 900 } }
//! ```
//!
//! Levels missing from the document keep their built-in profile.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::difficulty::{Difficulty, DifficultyProfile};

/// Largest goal a tuning document may set
pub const MAX_GOAL: u32 = 10_000;

/// Profile table for all difficulty levels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tuning {
    #[serde(default = "easy_profile")]
    pub easy: DifficultyProfile,
    #[serde(default = "normal_profile")]
    pub normal: DifficultyProfile,
    #[serde(default = "hard_profile")]
    pub hard: DifficultyProfile,
}

fn easy_profile() -> DifficultyProfile {
    Difficulty::Easy.profile()
}

fn normal_profile() -> DifficultyProfile {
    Difficulty::Normal.profile()
}

fn hard_profile() -> DifficultyProfile {
    Difficulty::Hard.profile()
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            easy: easy_profile(),
            normal: normal_profile(),
            hard: hard_profile(),
        }
    }
}

/// Why a tuning document was rejected
#[derive(Debug)]
pub enum TuningError {
    Parse(serde_json::Error),
    /// A profile field that must be positive was zero
    ZeroField {
        difficulty: Difficulty,
        field: &'static str,
    },
    /// Goal above [`MAX_GOAL`]
    GoalTooLarge { difficulty: Difficulty, goal: u32 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "invalid tuning JSON: {}", e),
            TuningError::ZeroField { difficulty, field } => {
                write!(f, "{} profile has zero {}", difficulty.as_str(), field)
            }
            TuningError::GoalTooLarge { difficulty, goal } => write!(
                f,
                "{} profile goal {} exceeds {}",
                difficulty.as_str(),
                goal,
                MAX_GOAL
            ),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::ZeroField { .. } | TuningError::GoalTooLarge { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

impl Tuning {
    /// Parse and validate a JSON override
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Parse an override, falling back to the built-in table on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning overrides: {}", e);
                Self::default()
            }
        }
    }

    pub fn profile(&self, difficulty: Difficulty) -> DifficultyProfile {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Normal => self.normal,
            Difficulty::Hard => self.hard,
        }
    }

    fn validate(&self) -> Result<(), TuningError> {
        for difficulty in Difficulty::ALL {
            let p = self.profile(difficulty);
            let zero = if p.goal == 0 {
                Some("goal")
            } else if p.duration_secs == 0 {
                Some("duration_secs")
            } else if p.spawn_interval_ms == 0 {
                Some("spawn_interval_ms")
            } else if p.obstacle_interval_ms == 0 {
                Some("obstacle_interval_ms")
            } else {
                None
            };
            if let Some(field) = zero {
                return Err(TuningError::ZeroField { difficulty, field });
            }
            if p.goal > MAX_GOAL {
                return Err(TuningError::GoalTooLarge {
                    difficulty,
                    goal: p.goal,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_builtin_profiles() {
        let tuning = Tuning::default();
        for d in Difficulty::ALL {
            assert_eq!(tuning.profile(d), d.profile());
        }
    }

    #[test]
    fn test_partial_override_keeps_other_levels() {
        let json = r#"{ "hard": { "goal": 30, "duration_secs": 20, "spawn_interval_ms": 600, "obstacle_interval_ms": 900 } }"#;
        let tuning = Tuning::from_json(json).unwrap();
        assert_eq!(tuning.hard.goal, 30);
        assert_eq!(tuning.hard.spawn_interval_ms, 600);
        assert_eq!(tuning.easy, Difficulty::Easy.profile());
        assert_eq!(tuning.normal, Difficulty::Normal.profile());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let json = r#"{ "easy": { "goal": 10, "duration_secs": 20, "spawn_interval_ms": 0, "obstacle_interval_ms": 900 } }"#;
        match Tuning::from_json(json) {
            Err(TuningError::ZeroField { difficulty, field }) => {
                assert_eq!(difficulty, Difficulty::Easy);
                assert_eq!(field, "spawn_interval_ms");
            }
            other => panic!("expected ZeroField, got {:?}", other),
        }
    }

    #[test]
    fn test_oversized_goal_rejected() {
        let json = r#"{ "normal": { "goal": 3000000000, "duration_secs": 30, "spawn_interval_ms": 900, "obstacle_interval_ms": 1800 } }"#;
        match Tuning::from_json(json) {
            Err(TuningError::GoalTooLarge { difficulty, goal }) => {
                assert_eq!(difficulty, Difficulty::Normal);
                assert_eq!(goal, 3_000_000_000);
            }
            other => panic!("expected GoalTooLarge, got {:?}", other),
        }
        assert_eq!(Tuning::from_json_or_default(json), Tuning::default());

        let at_limit = format!(
            r#"{{ "normal": {{ "goal": {}, "duration_secs": 30, "spawn_interval_ms": 900, "obstacle_interval_ms": 1800 }} }}"#,
            MAX_GOAL
        );
        assert_eq!(Tuning::from_json(&at_limit).map(|t| t.normal.goal).ok(), Some(MAX_GOAL));
    }

    #[test]
    fn test_garbage_falls_back() {
        assert!(matches!(Tuning::from_json("not json"), Err(TuningError::Parse(_))));
        assert_eq!(Tuning::from_json_or_default("{ nope"), Tuning::default());
    }
}
