//! # Kokoro Motion
//!
//! Turns assistant text into avatar motion:
//!
//! 1. Stage directions (`*blushes deeply*`) are classified into discrete
//!    emotions, with compound phrases ("shyly smiles") expanding into a
//!    two-emotion transition.
//! 2. Each emotion resolves to a randomly-chosen motion clip.
//! 3. The sequencer plays the clips serially against an [`AvatarRenderer`],
//!    emitting start/end notifications for the caption layer.
//!
//! In parallel, per-message intensity scores feed the `kokoro_affect` store
//! through [`AssistantPipeline`], independent of playback.

mod classify;
mod pipeline;
mod select;
mod sequencer;

pub use classify::{classify_phrase, message_intensity, Classified};
pub use pipeline::AssistantPipeline;
pub use select::MotionSelector;
pub use sequencer::{MotionSequencer, SequenceEntry, SequencerConfig};

pub use kokoro_core::{AvatarRenderer, ClipError, EmotionTag, MotionEvent, Playback};
