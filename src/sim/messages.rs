//! Text shown at the end of a round

use super::random::RandomSource;

pub const WIN_MESSAGES: &[&str] = &[
    "You crushed it! Every can accounted for.",
    "Can-tastic! Goal smashed.",
    "Recycling legend! You win!",
    "Fastest hands on the block. Victory!",
];

pub const LOSE_MESSAGES: &[&str] = &[
    "Time's up! A few cans got away.",
    "So close! Give it another shot.",
    "The cans win this round. Try again!",
    "Out of time. Warm up those fingers and go again.",
];

/// Pick one line from a non-empty message set
pub fn pick_message(messages: &'static [&'static str], rng: &mut impl RandomSource) -> &'static str {
    if messages.is_empty() {
        return "";
    }
    messages[rng.pick(messages.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::ScriptedRandom;

    #[test]
    fn test_pick_uses_random_source() {
        let mut rng = ScriptedRandom::new([1, 3]);
        assert_eq!(pick_message(WIN_MESSAGES, &mut rng), WIN_MESSAGES[1]);
        assert_eq!(pick_message(LOSE_MESSAGES, &mut rng), LOSE_MESSAGES[3]);
    }

    #[test]
    fn test_empty_set_yields_empty_text() {
        let mut rng = ScriptedRandom::new([0]);
        assert_eq!(pick_message(&[], &mut rng), "");
    }
}
