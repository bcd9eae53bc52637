//! Difficulty selection
//!
//! Picked once per round from the selector; each level maps to a fixed profile.

use serde::{Deserialize, Serialize};

/// Difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Selector value to difficulty; missing or unknown selections play on normal
    pub fn from_selection(selection: Option<&str>) -> Self {
        match selection.and_then(Self::from_str) {
            Some(difficulty) => difficulty,
            None => {
                if let Some(s) = selection {
                    log::warn!("Unknown difficulty {:?}, using normal", s);
                }
                Difficulty::Normal
            }
        }
    }

    /// Built-in profile for this level
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                goal: 15,
                duration_secs: 40,
                spawn_interval_ms: 1200,
                obstacle_interval_ms: 2600,
            },
            Difficulty::Normal => DifficultyProfile {
                goal: 20,
                duration_secs: 30,
                spawn_interval_ms: 900,
                obstacle_interval_ms: 1800,
            },
            Difficulty::Hard => DifficultyProfile {
                goal: 25,
                duration_secs: 25,
                spawn_interval_ms: 700,
                obstacle_interval_ms: 1200,
            },
        }
    }
}

/// Tuning parameters for one round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Score needed to win
    pub goal: u32,
    /// Round length in seconds
    pub duration_secs: u32,
    /// How often a new can appears
    pub spawn_interval_ms: u64,
    /// How often an obstacle placement is attempted
    pub obstacle_interval_ms: u64,
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Difficulty::Normal.profile()
    }
}
