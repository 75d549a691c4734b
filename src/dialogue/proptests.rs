//! Property-based tests for the dialogue engine
//!
//! These check that the engine stays total and monotonic over arbitrary input.

use super::catalog::{fixed_response, respond, MAX_QUICK_REPLIES};
use super::intent::RULES;
use super::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ============================================================================
// Generators
// ============================================================================

fn arb_utterance() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        Just(String::new()),
        "[ \t\n]{1,8}",
        "[a-zA-ZáéíóúÁÉÍÓÚñ ]{0,40}",
        "\\PC{200,600}",
    ]
}

fn arb_rule_index() -> impl Strategy<Value = usize> {
    0..RULES.len()
}

/// Digits and spaces only, so padding can never contain a keyword.
fn arb_padding() -> impl Strategy<Value = String> {
    "[0-9 ]{0,6}"
}

fn arb_recognized_intent() -> impl Strategy<Value = Intent> {
    arb_rule_index().prop_map(|index| RULES[index].0)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn every_turn_yields_a_well_formed_reply(
        utterances in prop::collection::vec(arb_utterance(), 1..8),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = ConversationState::new();
        for utterance in &utterances {
            let result = process_turn(&state, utterance, &mut rng);
            prop_assert!(!result.response.body.is_empty());
            prop_assert!(result.response.quick_replies.len() <= MAX_QUICK_REPLIES);
            state = result.new_state;
        }
    }

    #[test]
    fn greeting_flow_only_moves_forward(
        tail in prop::collection::vec(arb_utterance(), 1..10),
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let state = process_turn(&ConversationState::new(), "Hola", &mut rng).new_state;
        prop_assert_eq!(state.stage(), Stage::AskName);

        let mut state = process_turn(&state, &tail[0], &mut rng).new_state;
        prop_assert_eq!(state.stage(), Stage::MainMenu);
        let name = state.user_name().map(str::to_owned);
        prop_assert!(name.as_deref().is_some_and(|n| !n.is_empty()));

        for utterance in &tail[1..] {
            state = process_turn(&state, utterance, &mut rng).new_state;
            prop_assert_eq!(state.stage(), Stage::MainMenu);
            prop_assert_eq!(state.user_name().map(str::to_owned), name.clone());
        }
    }

    #[test]
    fn earlier_rule_always_wins(
        first in arb_rule_index(),
        second in arb_rule_index(),
        pick_a in any::<prop::sample::Index>(),
        pick_b in any::<prop::sample::Index>(),
        pad in arb_padding(),
        later_first in any::<bool>(),
    ) {
        let (early, late) = if first <= second { (first, second) } else { (second, first) };
        let early_keyword = pick_a.get(RULES[early].1);
        let late_keyword = pick_b.get(RULES[late].1);

        let utterance = if later_first {
            format!("{late_keyword} {pad} {early_keyword}")
        } else {
            format!("{early_keyword} {pad} {late_keyword}")
        };
        prop_assert_eq!(classify(&utterance), RULES[early].0);
    }

    #[test]
    fn recognized_lookup_is_stable(intent in arb_recognized_intent(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let first = respond(intent, &mut rng);
        let second = respond(intent, &mut rng);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(Some(first), fixed_response(intent));
    }

    #[test]
    fn classify_is_total(utterance in arb_utterance()) {
        let intent = classify(&utterance);
        let claimed = RULES.iter().any(|(rule, _)| *rule == intent);
        prop_assert!(claimed || intent == Intent::Unmatched);
    }
}
