//! The motion sequencer: turns a message into an ordered queue of clips and
//! drives the renderer through it, one motion at a time.
//!
//! Queue semantics: a new `enqueue` replaces everything still pending from
//! the previous message, but the in-flight motion is never interrupted —
//! animations finish cleanly before new content starts, which avoids visual
//! snapping. Per-clip failures are skips, never stalls.

use crate::classify::classify_phrase;
use crate::select::MotionSelector;
use kokoro_core::{extract_stage_directions, AvatarRenderer, EmotionTag, MotionEvent};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, Mutex, Notify};
use tokio::task::JoinHandle;

/// One queued motion.
#[derive(Debug, Clone)]
pub struct SequenceEntry {
    pub tag: EmotionTag,
    /// Resolved clip. Entries without one are skipped at playback.
    pub clip: Option<String>,
    /// The stage-direction text that produced this entry (or the emotion
    /// name for ambient entries); surfaced as the on-screen caption.
    pub caption: String,
    pub enqueued_at: Instant,
}

/// Playback tuning.
#[derive(Debug, Clone)]
pub struct SequencerConfig {
    /// Used when the renderer cannot report a clip duration.
    pub default_duration: Duration,
    /// Pause between consecutive clips, softening transitions.
    pub inter_motion_gap: Duration,
    /// Tag played when a message carries no stage directions.
    pub ambient: EmotionTag,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            default_duration: Duration::from_secs(3),
            inter_motion_gap: Duration::from_millis(100),
            ambient: EmotionTag::Neutral,
        }
    }
}

impl SequencerConfig {
    /// Tight timings for tests.
    pub fn testing() -> Self {
        Self {
            default_duration: Duration::from_millis(20),
            inter_motion_gap: Duration::from_millis(5),
            ambient: EmotionTag::Neutral,
        }
    }
}

/// Serial clip playback with supersede-on-enqueue queueing.
pub struct MotionSequencer {
    selector: Arc<MotionSelector>,
    config: SequencerConfig,
    pending: Arc<Mutex<VecDeque<SequenceEntry>>>,
    wake: Arc<Notify>,
    events_tx: broadcast::Sender<MotionEvent>,
    playback: std::sync::Mutex<Option<JoinHandle<()>>>,
}

impl MotionSequencer {
    /// Create a sequencer driving `renderer`. The playback task starts
    /// immediately and idles until the first `enqueue`.
    pub fn new(renderer: Arc<dyn AvatarRenderer>, selector: MotionSelector) -> Self {
        Self::with_config(renderer, selector, SequencerConfig::default())
    }

    /// Create with custom playback timings.
    pub fn with_config(
        renderer: Arc<dyn AvatarRenderer>,
        selector: MotionSelector,
        config: SequencerConfig,
    ) -> Self {
        let (events_tx, _) = broadcast::channel(32);
        let sequencer = Self {
            selector: Arc::new(selector),
            config: config.clone(),
            pending: Arc::new(Mutex::new(VecDeque::new())),
            wake: Arc::new(Notify::new()),
            events_tx,
            playback: std::sync::Mutex::new(None),
        };
        sequencer.spawn_playback(renderer, config);
        sequencer
    }

    fn spawn_playback(&self, renderer: Arc<dyn AvatarRenderer>, config: SequencerConfig) {
        let pending = Arc::clone(&self.pending);
        let wake = Arc::clone(&self.wake);
        let events_tx = self.events_tx.clone();

        let handle = tokio::spawn(async move {
            loop {
                let entry = pending.lock().await.pop_front();
                let Some(entry) = entry else {
                    // Idle until the next enqueue.
                    wake.notified().await;
                    continue;
                };

                let Some(clip) = entry.clip else {
                    tracing::warn!(tag = %entry.tag, "no clip resolved, skipping entry");
                    continue;
                };

                // Guarantee at-most-one-active before starting the next clip.
                if let Err(e) = renderer.stop_all().await {
                    tracing::warn!(error = %e, "stop_all failed before {clip}");
                }

                match renderer.play_clip(&clip).await {
                    Ok(playback) => {
                        let duration =
                            playback.duration.unwrap_or(config.default_duration);
                        tracing::debug!(clip, ?duration, "motion started");
                        let _ = events_tx.send(MotionEvent::Started {
                            caption: entry.caption,
                            duration,
                        });

                        tokio::time::sleep(duration).await;

                        let _ = events_tx.send(MotionEvent::Ended);
                    }
                    Err(e) => {
                        // Skip with zero perceived duration; never stall.
                        tracing::warn!(clip, error = %e, "clip failed, skipping");
                        let _ = events_tx.send(MotionEvent::Ended);
                    }
                }

                tokio::time::sleep(config.inter_motion_gap).await;
            }
        });

        *self.playback.lock().expect("playback lock poisoned") = Some(handle);
    }

    /// Build the playback sequence for one assistant message: extract stage
    /// directions, classify each (flattening compound results), collapse
    /// adjacent duplicate tags, and resolve a clip per surviving tag.
    ///
    /// A message without stage directions yields a single ambient entry.
    pub fn build_sequence(&self, message: &str) -> Vec<SequenceEntry> {
        let now = Instant::now();
        let directions = extract_stage_directions(message);

        if directions.is_empty() {
            let tag = self.config.ambient;
            return vec![SequenceEntry {
                tag,
                clip: Some(self.selector.pick(tag).to_string()),
                caption: tag.as_str().to_string(),
                enqueued_at: now,
            }];
        }

        let mut entries: Vec<SequenceEntry> = Vec::new();
        for direction in directions {
            let caption = direction.trimmed();
            for tag in classify_phrase(caption).tags() {
                // Collapse runs: keep the first of consecutive duplicates.
                if entries.last().map(|e| e.tag) == Some(tag) {
                    tracing::trace!(%tag, "collapsing adjacent duplicate emotion");
                    continue;
                }
                entries.push(SequenceEntry {
                    tag,
                    clip: Some(self.selector.pick(tag).to_string()),
                    caption: caption.to_string(),
                    enqueued_at: now,
                });
            }
        }
        entries
    }

    /// Replace the pending queue wholesale with `sequence` and start
    /// playback if idle. An in-flight motion is left to finish.
    pub async fn enqueue(&self, sequence: Vec<SequenceEntry>) {
        {
            let mut pending = self.pending.lock().await;
            pending.clear();
            pending.extend(sequence);
            tracing::debug!(queued = pending.len(), "motion queue replaced");
        }
        self.wake.notify_one();
    }

    /// Convenience: build and enqueue in one step.
    pub async fn play_message(&self, message: &str) {
        let sequence = self.build_sequence(message);
        self.enqueue(sequence).await;
    }

    /// Subscribe to motion start/end notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<MotionEvent> {
        self.events_tx.subscribe()
    }

    /// Stop the playback task. No event fires after this returns. Dropping
    /// the sequencer does the same.
    pub fn shutdown(&self) {
        if let Some(handle) = self.playback.lock().expect("playback lock poisoned").take() {
            handle.abort();
        }
    }
}

impl Drop for MotionSequencer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
