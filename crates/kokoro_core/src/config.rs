//! Static per-tag configuration: decay rates, conflicts, prerequisites.
//!
//! Loaded once, never mutated. The color is presentation-only and carried
//! for the display panel; the engine ignores it.

use crate::tag::EmotionTag;
use serde::Serialize;

/// Configuration for one main emotion tag.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EmotionConfig {
    /// Display color for the emotion bar (CSS rgb string).
    pub color: &'static str,
    /// Level units lost per minute of wall-clock decay.
    pub decay_per_minute: f32,
    /// Tags suppressed when this one receives a positive update.
    pub conflicts_with: &'static [EmotionTag],
    /// Prerequisite levels: every (tag, threshold) pair must hold or an
    /// update to this tag is a no-op.
    pub requires_min_level: &'static [(EmotionTag, f32)],
    /// Adult-content flag, used by the display layer for filtering.
    pub adult: bool,
}

/// Look up the static config for a main tag. Control tags (`Neutral`,
/// `Thinking`) have no config and return `None`.
pub fn emotion_config(tag: EmotionTag) -> Option<&'static EmotionConfig> {
    use EmotionTag::*;
    let cfg = match tag {
        Happy => &EmotionConfig {
            color: "rgb(255, 200, 50)",
            decay_per_minute: 5.0,
            conflicts_with: &[Troubled],
            requires_min_level: &[],
            adult: false,
        },
        Horny => &EmotionConfig {
            color: "rgb(255, 100, 150)",
            decay_per_minute: 3.0,
            conflicts_with: &[Shy],
            requires_min_level: &[],
            adult: true,
        },
        Submissive => &EmotionConfig {
            color: "rgb(200, 150, 255)",
            decay_per_minute: 4.0,
            conflicts_with: &[],
            requires_min_level: &[],
            adult: true,
        },
        Flirty => &EmotionConfig {
            color: "rgb(255, 150, 200)",
            decay_per_minute: 5.0,
            conflicts_with: &[Shy],
            requires_min_level: &[],
            adult: false,
        },
        Troubled => &EmotionConfig {
            color: "rgb(100, 150, 255)",
            decay_per_minute: 3.0,
            conflicts_with: &[Happy, Excited],
            requires_min_level: &[],
            adult: false,
        },
        Blushing => &EmotionConfig {
            color: "rgb(255, 150, 150)",
            decay_per_minute: 4.0,
            conflicts_with: &[],
            requires_min_level: &[],
            adult: false,
        },
        Trembling => &EmotionConfig {
            color: "rgb(255, 200, 200)",
            decay_per_minute: 6.0,
            conflicts_with: &[],
            requires_min_level: &[],
            adult: true,
        },
        Panting => &EmotionConfig {
            color: "rgb(255, 150, 100)",
            decay_per_minute: 5.0,
            conflicts_with: &[],
            requires_min_level: &[],
            adult: true,
        },
        Whimpering => &EmotionConfig {
            color: "rgb(200, 200, 255)",
            decay_per_minute: 4.0,
            conflicts_with: &[],
            requires_min_level: &[],
            adult: true,
        },
        Leaking => &EmotionConfig {
            color: "rgb(150, 200, 255)",
            decay_per_minute: 3.0,
            conflicts_with: &[],
            requires_min_level: &[],
            adult: true,
        },
        Pleased => &EmotionConfig {
            color: "rgb(200, 255, 150)",
            decay_per_minute: 4.0,
            conflicts_with: &[Troubled],
            requires_min_level: &[],
            adult: false,
        },
        Excited => &EmotionConfig {
            color: "rgb(255, 100, 255)",
            decay_per_minute: 6.0,
            conflicts_with: &[Troubled],
            requires_min_level: &[],
            adult: false,
        },
        Shy => &EmotionConfig {
            color: "rgb(255, 150, 150)",
            decay_per_minute: 4.0,
            conflicts_with: &[Horny, Flirty],
            requires_min_level: &[],
            adult: false,
        },
        Greeting => &EmotionConfig {
            color: "rgb(150, 255, 150)",
            decay_per_minute: 8.0,
            conflicts_with: &[],
            requires_min_level: &[],
            adult: false,
        },
        Neutral | Thinking => return None,
    };
    Some(cfg)
}
