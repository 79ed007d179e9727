//! # Kokoro Core
//!
//! Shared value types and seams for the Kokoro avatar emotion engine:
//!
//! - [`EmotionTag`]: the closed set of emotional states
//! - [`EmotionConfig`]: static per-tag decay/conflict/prerequisite tables
//! - [`extract_stage_directions`]: `*...*` cue extraction from assistant text
//! - [`AvatarRenderer`]: the trait the external Live2D-style renderer fills in
//!
//! The stateful pieces live downstream: `kokoro_affect` owns the decaying
//! emotion levels, `kokoro_motion` owns classification and playback.

mod config;
mod renderer;
mod stage;
mod tag;

pub use config::{emotion_config, EmotionConfig};
pub use renderer::{AvatarRenderer, ClipError, MotionEvent, Playback};
pub use stage::{extract_stage_directions, StageDirection};
pub use tag::EmotionTag;
