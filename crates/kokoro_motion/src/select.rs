//! Motion clip selection.
//!
//! Each emotion maps to a handful of candidate clips in the avatar's motion
//! set; one is picked at random for playback variety. The RNG is injectable
//! so tests can seed it and assert exact picks.

use kokoro_core::EmotionTag;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Candidate clips per tag. Tags without a row fall back to neutral.
fn clips_for(tag: EmotionTag) -> &'static [&'static str] {
    use EmotionTag::*;
    match tag {
        Shy => &["w-adult01-blushed", "w-adult02-blushed", "w-adult05-blushed"],
        Happy => &["w-adult02-glad", "w-adult12-glad", "w-adult02-delicious"],
        Thinking => &["w-adult01-think", "w-adult05-think"],
        Troubled => &["w-adult02-trouble", "w-adult05-trouble"],
        Neutral => &["w-adult01-pose", "w-adult02-pose", "w-adult05-pose"],
        Greeting => &[
            "w-adult01-shakehand",
            "w-cool01-shakehand",
            "w-happy01-shakehand",
            "w-happy02-shakehand",
            "w-happy11-shakehand",
            "w-normal15-greeting",
        ],
        Blushing => &["w-adult11-blushed03", "w-adult01-blushed"],
        Horny => &["w-adult11-blushed03", "w-adult02-delicious", "w-adult05-blushed"],
        Excited => &["w-adult02-glad", "w-adult12-glad", "w-adult02-delicious"],
        Flirty => &["w-adult02-blushed", "w-adult05-blushed", "w-adult11-blushed03"],
        Submissive => &["w-adult01-blushed", "w-adult11-blushed03", "w-adult05-blushed"],
        Trembling => &["w-adult11-blushed03", "face_breath_01", "w-adult02-trouble"],
        Panting => &["face_breath_01", "w-adult02-delicious", "w-adult11-blushed03"],
        Whimpering => &["w-adult05-trouble", "face_cry_02", "w-adult02-blushed"],
        Leaking => &["w-adult11-blushed03", "face_closeeye_03", "w-adult02-delicious"],
        Pleased => &["w-adult02-delicious", "face_smile_15", "w-adult11-glad02"],
    }
}

/// Picks clips for tags. Never fails: an empty candidate list falls back to
/// the first neutral pose.
pub struct MotionSelector {
    rng: Mutex<StdRng>,
}

impl MotionSelector {
    /// Entropy-seeded selector for production use.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic selector for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// A clip for `tag`, chosen uniformly from its candidates.
    pub fn pick(&self, tag: EmotionTag) -> &'static str {
        let mut clips = clips_for(tag);
        if clips.is_empty() {
            clips = clips_for(EmotionTag::Neutral);
        }
        if clips.is_empty() {
            return "w-adult01-pose";
        }
        let mut rng = self.rng.lock().expect("selector rng poisoned");
        let clip = clips[rng.gen_range(0..clips.len())];
        tracing::trace!(%tag, clip, "selected motion clip");
        clip
    }
}

impl Default for MotionSelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_returns_candidate_of_tag() {
        let selector = MotionSelector::seeded(7);
        for _ in 0..20 {
            let clip = selector.pick(EmotionTag::Shy);
            assert!(clips_for(EmotionTag::Shy).contains(&clip));
        }
    }

    #[test]
    fn test_seeded_is_deterministic() {
        let a = MotionSelector::seeded(42);
        let b = MotionSelector::seeded(42);
        for _ in 0..10 {
            assert_eq!(a.pick(EmotionTag::Greeting), b.pick(EmotionTag::Greeting));
        }
    }

    #[test]
    fn test_every_tag_resolves() {
        let selector = MotionSelector::seeded(1);
        for tag in EmotionTag::MAIN {
            assert!(!selector.pick(tag).is_empty());
        }
        assert!(!selector.pick(EmotionTag::Neutral).is_empty());
        assert!(!selector.pick(EmotionTag::Thinking).is_empty());
    }

    #[test]
    fn test_varies_over_draws() {
        let selector = MotionSelector::seeded(3);
        let picks: std::collections::HashSet<_> =
            (0..50).map(|_| selector.pick(EmotionTag::Greeting)).collect();
        assert!(picks.len() > 1, "expected variety across 50 draws");
    }
}
