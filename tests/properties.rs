// Property tests over random play sequences.

use can_dash::sim::{
    FeedbackKind, GameController, MILESTONES, MilestoneTracker, RecordingRenderer, SeededRandom,
};
use can_dash::{Difficulty, Tuning};
use proptest::prelude::*;

proptest! {
    #[test]
    fn random_play_keeps_invariants(
        seed in any::<u64>(),
        level in 0usize..3,
        actions in prop::collection::vec((0u64..1500, 0usize..12), 1..150),
    ) {
        let difficulty = Difficulty::ALL[level];
        let mut game = GameController::new(
            Tuning::default(),
            RecordingRenderer::new(),
            SeededRandom::new(seed),
        );
        game.start(difficulty);
        let goal = difficulty.profile().goal;
        let mut max_score = 0;

        for (wait, cell) in actions {
            game.advance_by(wait);
            prop_assert!(game.state().grid.collectible_count() <= 1);

            let before = game.score();
            let was_active = game.is_active();
            match game.resolve_click(cell) {
                Some(FeedbackKind::Hit) => prop_assert_eq!(game.score(), before + 1),
                Some(FeedbackKind::Penalty) => {
                    prop_assert_eq!(game.score(), before.saturating_sub(2))
                }
                Some(FeedbackKind::Miss) => prop_assert_eq!(game.score(), before),
                None => prop_assert!(!was_active || cell >= 9),
            }
            max_score = max_score.max(game.score());

            if !game.is_active() {
                prop_assert!(game.state().grid.is_clear());
                prop_assert_eq!(game.pending_timers(), 0);
            }
        }

        // Announced milestones were really reached, and each was shown once
        let announced: Vec<u32> = game.state().milestones.announced().collect();
        for percent in &announced {
            let milestone = MILESTONES.iter().find(|m| m.percent == *percent).unwrap();
            prop_assert!(milestone.target(goal) <= max_score);
        }
        prop_assert_eq!(game.renderer().achievements().len(), announced.len());
    }

    #[test]
    fn milestones_fire_exactly_at_their_targets(goal in 1u32..200) {
        let mut tracker = MilestoneTracker::new();
        let mut rng = SeededRandom::new(u64::from(goal));
        let top = MILESTONES.last().unwrap().target(goal);
        let mut seen = Vec::new();
        for score in 0..=top + 1 {
            for achievement in tracker.evaluate(score, goal, &mut rng) {
                let milestone = MILESTONES.iter().find(|m| m.percent == achievement.percent).unwrap();
                prop_assert_eq!(milestone.target(goal), score);
                prop_assert!(milestone.messages.contains(&achievement.message));
                seen.push(achievement.percent);
            }
        }
        let all: Vec<u32> = MILESTONES.iter().map(|m| m.percent).collect();
        prop_assert_eq!(seen, all);
    }
}
