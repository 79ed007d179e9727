//! Property-based tests for classification.
//!
//! The classifier must be total (every phrase yields one or two tags) and
//! intensity scores must stay inside [0, 100] for arbitrary input.

use kokoro_core::extract_stage_directions;
use kokoro_motion::{classify_phrase, message_intensity, Classified, EmotionTag};
use proptest::prelude::*;

fn arb_tag() -> impl Strategy<Value = EmotionTag> {
    (0usize..EmotionTag::MAIN.len()).prop_map(|i| EmotionTag::MAIN[i])
}

proptest! {
    #[test]
    fn classify_phrase_is_total(phrase in ".{0,80}") {
        // Must not panic and must yield one or two tags.
        match classify_phrase(&phrase) {
            Classified::Single(_) => {}
            Classified::Pair(first, second) => prop_assert_ne!(first, second),
        }
    }

    #[test]
    fn intensity_stays_in_bounds(message in ".{0,200}", tag in arb_tag()) {
        let intensity = message_intensity(&message, tag);
        prop_assert!((0.0..=100.0).contains(&intensity), "got {intensity}");
    }

    #[test]
    fn intensity_without_directions_is_zero(
        message in "[^*]{0,200}",
        tag in arb_tag(),
    ) {
        prop_assert_eq!(message_intensity(&message, tag), 0.0);
    }

    #[test]
    fn extraction_never_panics_and_slices_are_in_bounds(message in ".{0,200}") {
        for direction in extract_stage_directions(&message) {
            prop_assert!(direction.start < direction.end);
            prop_assert!(direction.end <= message.len());
        }
    }

    #[test]
    fn shy_scales_to_net_point_three(n in 1usize..30) {
        // n "blushes" directions: each contributes 15 × 0.5, then the sum
        // is scaled by 0.6 and clamped.
        let message = "*blushes* ".repeat(n);
        let expected = (n as f32 * 15.0 * 0.5 * 0.6).min(100.0);
        let shy = message_intensity(&message, EmotionTag::Shy);
        prop_assert!((shy - expected).abs() < 1e-3, "n={n}: {shy} != {expected}");
    }
}
