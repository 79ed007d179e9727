//! The closed set of emotion tags understood by the engine.
//!
//! Fourteen "main" tags are tracked by the affect store; `Neutral` and
//! `Thinking` exist only for the sequencer and display layer and never
//! carry a stored level.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One discrete emotional state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionTag {
    Happy,
    Horny,
    Submissive,
    Flirty,
    Troubled,
    Blushing,
    Trembling,
    Panting,
    Whimpering,
    Leaking,
    Pleased,
    Excited,
    Shy,
    Greeting,
    /// Control tag: ambient/no-expression state. Not stored.
    Neutral,
    /// Control tag: pondering pose. Not stored.
    Thinking,
}

impl EmotionTag {
    /// The tags that carry a level in the affect store.
    pub const MAIN: [EmotionTag; 14] = [
        EmotionTag::Happy,
        EmotionTag::Horny,
        EmotionTag::Submissive,
        EmotionTag::Flirty,
        EmotionTag::Troubled,
        EmotionTag::Blushing,
        EmotionTag::Trembling,
        EmotionTag::Panting,
        EmotionTag::Whimpering,
        EmotionTag::Leaking,
        EmotionTag::Pleased,
        EmotionTag::Excited,
        EmotionTag::Shy,
        EmotionTag::Greeting,
    ];

    /// True for tags tracked by the affect store.
    pub fn is_main(&self) -> bool {
        !matches!(self, EmotionTag::Neutral | EmotionTag::Thinking)
    }

    /// Stable lowercase name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionTag::Happy => "happy",
            EmotionTag::Horny => "horny",
            EmotionTag::Submissive => "submissive",
            EmotionTag::Flirty => "flirty",
            EmotionTag::Troubled => "troubled",
            EmotionTag::Blushing => "blushing",
            EmotionTag::Trembling => "trembling",
            EmotionTag::Panting => "panting",
            EmotionTag::Whimpering => "whimpering",
            EmotionTag::Leaking => "leaking",
            EmotionTag::Pleased => "pleased",
            EmotionTag::Excited => "excited",
            EmotionTag::Shy => "shy",
            EmotionTag::Greeting => "greeting",
            EmotionTag::Neutral => "neutral",
            EmotionTag::Thinking => "thinking",
        }
    }
}

impl fmt::Display for EmotionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_set_excludes_control_tags() {
        assert_eq!(EmotionTag::MAIN.len(), 14);
        assert!(!EmotionTag::MAIN.contains(&EmotionTag::Neutral));
        assert!(!EmotionTag::MAIN.contains(&EmotionTag::Thinking));
        for tag in EmotionTag::MAIN {
            assert!(tag.is_main());
        }
    }

    #[test]
    fn test_control_tags_not_main() {
        assert!(!EmotionTag::Neutral.is_main());
        assert!(!EmotionTag::Thinking.is_main());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&EmotionTag::Shy).unwrap();
        assert_eq!(json, "\"shy\"");
        let back: EmotionTag = serde_json::from_str("\"greeting\"").unwrap();
        assert_eq!(back, EmotionTag::Greeting);
    }

    #[test]
    fn test_display_matches_serde() {
        for tag in EmotionTag::MAIN {
            let json = serde_json::to_string(&tag).unwrap();
            assert_eq!(json, format!("\"{}\"", tag));
        }
    }
}
