//! Phrase and message classification.
//!
//! Two independent jobs:
//!
//! 1. [`classify_phrase`] maps one stage-direction phrase to a discrete
//!    emotion (or a two-emotion transition for compound phrases like
//!    "shyly smiles").
//! 2. [`message_intensity`] scores how strongly a whole message reinforces
//!    one target emotion, feeding the affect store.
//!
//! Matching is case-insensitive substring matching against fixed keyword
//! tables. The precedence in `classify_phrase` is intent-significant:
//! compounds are checked before intensity-modified singles, which are
//! checked before the plain category blocks, so that e.g. "shyly smiles"
//! never degrades to a bare smile.

use kokoro_core::{extract_stage_directions, EmotionTag};

/// Result of classifying one phrase: either a single emotion or a
/// primary-then-secondary transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classified {
    Single(EmotionTag),
    Pair(EmotionTag, EmotionTag),
}

impl Classified {
    /// The tags in playback order.
    pub fn tags(&self) -> impl Iterator<Item = EmotionTag> {
        let (a, b) = match *self {
            Classified::Single(tag) => (tag, None),
            Classified::Pair(first, second) => (first, Some(second)),
        };
        std::iter::once(a).chain(b)
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Map a stage-direction phrase to its emotion(s).
///
/// Total and deterministic: every phrase yields a non-empty result, with
/// `Single(Neutral)` as the fallback.
pub fn classify_phrase(phrase: &str) -> Classified {
    use EmotionTag::*;
    let exp = phrase.to_lowercase();
    let exp = exp.trim();

    // Compound expressions: a transition through two emotions.
    if contains_any(exp, &["shyly smiles", "shy smile", "nervously smiles"]) {
        return Classified::Pair(Shy, Happy);
    }
    if contains_any(exp, &["nervously waves", "shyly waves"]) {
        return Classified::Pair(Shy, Greeting);
    }
    if exp.contains("excitedly fidgets") {
        return Classified::Pair(Excited, Shy);
    }

    // Intensity-modified singles. These currently land on the same tag as
    // the bare form, but the modified forms stay ahead of it so intensity
    // differentiation can be added without reordering.
    if contains_any(exp, &["blushes deeply", "intensely blushes"]) {
        return Classified::Single(Shy);
    }
    if contains_any(exp, &["blushes lightly", "slightly blushes"]) {
        return Classified::Single(Shy);
    }
    if contains_any(exp, &["intensely trembles", "strongly trembles"]) {
        return Classified::Single(Trembling);
    }
    if contains_any(exp, &["slightly trembles", "lightly trembles"]) {
        return Classified::Single(Trembling);
    }

    // Standard single-emotion mappings.
    if contains_any(exp, &["excitedly", "excited"]) {
        return Classified::Single(Excited);
    }
    if contains_any(exp, &["smiling", "smiles"]) {
        return Classified::Single(Happy);
    }

    // Bare greeting words.
    if matches!(exp, "wave" | "waves" | "greet" | "greets" | "hi" | "hello") {
        return Classified::Single(Greeting);
    }
    // Greeting embedded in a longer phrase. "hi " keeps its trailing space
    // so words like "hides" don't greet.
    if contains_any(exp, &["wave", "greet", "hello", "hi "]) {
        return Classified::Single(Greeting);
    }

    // Intimate expressions.
    if contains_any(exp, &["trembl", "pants", "whimper"]) {
        return Classified::Single(Horny);
    }
    if exp.contains("leak") {
        return Classified::Single(Leaking);
    }
    if contains_any(exp, &["moan", "beg", "submit"]) {
        return Classified::Single(Submissive);
    }
    if contains_any(exp, &["pleased", "satisfied"]) {
        return Classified::Single(Pleased);
    }

    // Basic emotions.
    if contains_any(exp, &["happy", "smile"]) {
        return Classified::Single(Happy);
    }
    if contains_any(exp, &["blush", "shy", "nervous", "fidget"]) {
        return Classified::Single(Shy);
    }
    if contains_any(exp, &["think", "ponder"]) {
        return Classified::Single(Thinking);
    }
    if contains_any(exp, &["trouble", "worried"]) {
        return Classified::Single(Troubled);
    }

    Classified::Single(Neutral)
}

/// Per-trigger base intensities, in table order. The first contained trigger
/// that maps to the target emotion wins for each stage direction, so order
/// matters ("blushes" shadows "blushes deeply" by design of the source
/// table).
const INTENSITY_TRIGGERS: &[(&str, EmotionTag, f32)] = &[
    // Shy, kept low so the tag doesn't saturate
    ("peeks", EmotionTag::Shy, 5.0),
    ("fidgets", EmotionTag::Shy, 8.0),
    ("blushes lightly", EmotionTag::Shy, 10.0),
    ("blushes", EmotionTag::Shy, 15.0),
    ("blushes deeply", EmotionTag::Shy, 20.0),
    ("hides face", EmotionTag::Shy, 25.0),
    ("covers face", EmotionTag::Shy, 30.0),
    ("extremely flustered", EmotionTag::Shy, 35.0),
    ("completely embarrassed", EmotionTag::Shy, 40.0),
    // Intimate
    ("trembles", EmotionTag::Horny, 20.0),
    ("pants", EmotionTag::Horny, 25.0),
    ("whimpers", EmotionTag::Submissive, 30.0),
    ("squirms", EmotionTag::Horny, 35.0),
    ("gasps", EmotionTag::Horny, 40.0),
    ("leaks", EmotionTag::Horny, 45.0),
    ("moans", EmotionTag::Horny, 50.0),
    ("begs", EmotionTag::Submissive, 55.0),
    // Greeting
    ("waves", EmotionTag::Greeting, 25.0),
    ("waves happily", EmotionTag::Greeting, 30.0),
    ("greets", EmotionTag::Greeting, 25.0),
    ("greets happily", EmotionTag::Greeting, 30.0),
    // Happy
    ("smiles", EmotionTag::Happy, 35.0),
    ("grins", EmotionTag::Happy, 40.0),
    ("giggles", EmotionTag::Happy, 45.0),
    ("laughs", EmotionTag::Happy, 50.0),
    ("beams", EmotionTag::Happy, 60.0),
    // Other base emotions
    ("troubled", EmotionTag::Troubled, 25.0),
    ("excited", EmotionTag::Excited, 35.0),
];

// Shy is scaled down twice, once per trigger and once after the sum.
// The net 0.3 is a tuning artifact inherited for behavioral compatibility,
// not a principled constant; collapse into one knob if retuning.
const SHY_TRIGGER_DAMPENING: f32 = 0.5;
const SHY_GLOBAL_SCALE: f32 = 0.6;

/// How strongly `message` reinforces `target`, in [0, 100].
///
/// Sums the base intensity of the first matching trigger in every stage
/// direction; repeated triggers across directions accumulate. Messages
/// without stage directions contribute nothing.
pub fn message_intensity(message: &str, target: EmotionTag) -> f32 {
    let directions = extract_stage_directions(message);
    if directions.is_empty() {
        return 0.0;
    }

    let per_trigger = if target == EmotionTag::Shy {
        SHY_TRIGGER_DAMPENING
    } else {
        1.0
    };

    let mut total = 0.0;
    for direction in directions {
        let text = direction.trimmed().to_lowercase();
        for (trigger, emotion, base) in INTENSITY_TRIGGERS {
            if text.contains(trigger) && *emotion == target {
                total += base * per_trigger;
                break;
            }
        }
    }

    if target == EmotionTag::Shy {
        total *= SHY_GLOBAL_SCALE;
    }

    total.clamp(0.0, 100.0)
}
