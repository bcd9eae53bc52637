//! Progress milestones toward the round goal
//!
//! Thresholds are percentages of the goal, kept ascending. Each one is
//! announced at most once per round.

use std::collections::BTreeSet;

use super::random::RandomSource;

pub struct Milestone {
    /// Percent of the goal, also the key in the announced set
    pub percent: u32,
    /// Candidate lines, one picked at random when reached
    pub messages: &'static [&'static str],
}

impl Milestone {
    /// Score needed: ceil(goal * percent / 100), saturating at `u32::MAX`
    pub fn target(&self, goal: u32) -> u32 {
        let scaled = u64::from(goal) * u64::from(self.percent);
        u32::try_from(scaled.div_ceil(100)).unwrap_or(u32::MAX)
    }
}

// Ordered small → large
pub const MILESTONES: &[Milestone] = &[
    Milestone {
        percent: 25,
        messages: &["Nice start!", "Warming up!", "Quarter of the way!"],
    },
    Milestone {
        percent: 50,
        messages: &["Halfway there!", "Keep it rolling!", "Half a haul!"],
    },
    Milestone {
        percent: 75,
        messages: &["Almost there!", "On fire!", "Three quarters done!"],
    },
    Milestone {
        percent: 100,
        messages: &["Goal reached!", "Target smashed!", "That's a win in the bag!"],
    },
    Milestone {
        percent: 150,
        messages: &["Overachiever!", "Can collector supreme!", "Beyond the goal!"],
    },
];

/// One announcement produced by [`MilestoneTracker::evaluate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    pub percent: u32,
    pub message: &'static str,
}

/// Per-round record of which milestones were already announced
#[derive(Debug, Clone, Default)]
pub struct MilestoneTracker {
    announced: BTreeSet<u32>,
}

impl MilestoneTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn announced(&self) -> impl Iterator<Item = u32> + '_ {
        self.announced.iter().copied()
    }

    /// Announce every not-yet-announced milestone the score has reached, in
    /// ascending order
    pub fn evaluate(
        &mut self,
        score: u32,
        goal: u32,
        rng: &mut impl RandomSource,
    ) -> Vec<Achievement> {
        let mut fired = Vec::new();
        for milestone in MILESTONES {
            if self.announced.contains(&milestone.percent) {
                continue;
            }
            if score >= milestone.target(goal) {
                self.announced.insert(milestone.percent);
                let message = milestone.messages[rng.pick(milestone.messages.len())];
                fired.push(Achievement {
                    percent: milestone.percent,
                    message,
                });
            }
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::ScriptedRandom;

    #[test]
    fn test_target_rounds_up() {
        let quarter = &MILESTONES[0];
        assert_eq!(quarter.target(20), 5);
        assert_eq!(quarter.target(15), 4); // 3.75 -> 4
        assert_eq!(quarter.target(1), 1);
        assert_eq!(MILESTONES[3].target(25), 25);
        assert_eq!(MILESTONES[4].target(15), 23); // 22.5 -> 23
    }

    #[test]
    fn test_each_fires_once() {
        let mut tracker = MilestoneTracker::new();
        let mut rng = ScriptedRandom::new([0]);
        assert!(tracker.evaluate(4, 20, &mut rng).is_empty());
        let fired = tracker.evaluate(5, 20, &mut rng);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].percent, 25);
        assert_eq!(fired[0].message, "Nice start!");
        assert!(tracker.evaluate(5, 20, &mut rng).is_empty());
        assert!(tracker.evaluate(6, 20, &mut rng).is_empty());
    }

    #[test]
    fn test_close_thresholds_fire_together_in_order() {
        // goal 2: targets 1, 1, 2, 2, 3
        let mut tracker = MilestoneTracker::new();
        let mut rng = ScriptedRandom::new([2]);
        let fired: Vec<u32> = tracker
            .evaluate(2, 2, &mut rng)
            .into_iter()
            .map(|a| a.percent)
            .collect();
        assert_eq!(fired, vec![25, 50, 75, 100]);
        let next: Vec<u32> = tracker.evaluate(3, 2, &mut rng).iter().map(|a| a.percent).collect();
        assert_eq!(next, vec![150]);
    }

    #[test]
    fn test_announced_lists_fired_percents() {
        let mut tracker = MilestoneTracker::new();
        let mut rng = ScriptedRandom::new([1]);
        tracker.evaluate(10, 20, &mut rng);
        assert_eq!(tracker.announced().collect::<Vec<_>>(), vec![25, 50]);
    }

    #[test]
    fn test_huge_goal_target_saturates() {
        let goal = 3_000_000_000;
        assert_eq!(MILESTONES[4].target(goal), u32::MAX);
        assert_eq!(MILESTONES[2].target(goal), 2_250_000_000);

        let mut tracker = MilestoneTracker::new();
        let mut rng = ScriptedRandom::new([0]);
        let fired: Vec<u32> = tracker
            .evaluate(1_500_000_000, goal, &mut rng)
            .iter()
            .map(|a| a.percent)
            .collect();
        assert_eq!(fired, vec![25, 50]);
    }
}
