//! Per-message fan-out from the chat layer into the engine.
//!
//! Each new assistant message is processed exactly once: the derived motion
//! sequence goes to the sequencer, and every main emotion's intensity
//! contribution goes to the affect store. Callers must de-duplicate repeated
//! identical messages; this layer assumes every call is a new message.

use crate::classify::message_intensity;
use crate::sequencer::MotionSequencer;
use kokoro_affect::EmotionStore;
use kokoro_core::EmotionTag;
use std::sync::Arc;

/// Ties a sequencer and an affect store to the assistant message stream.
pub struct AssistantPipeline {
    sequencer: Arc<MotionSequencer>,
    store: Arc<EmotionStore>,
}

impl AssistantPipeline {
    pub fn new(sequencer: Arc<MotionSequencer>, store: Arc<EmotionStore>) -> Self {
        Self { sequencer, store }
    }

    /// Process one new assistant message.
    pub async fn process(&self, message: &str) {
        let sequence = self.sequencer.build_sequence(message);
        tracing::debug!(entries = sequence.len(), "derived motion sequence");
        self.sequencer.enqueue(sequence).await;

        for tag in EmotionTag::MAIN {
            let intensity = message_intensity(message, tag);
            if intensity > 0.0 {
                self.store.apply_delta(tag, intensity).await;
            }
        }
    }
}
