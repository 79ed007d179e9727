//! Seam to the external avatar renderer and the notifications the engine
//! emits while driving it.
//!
//! The engine never knows how clips are rendered; it only hands over a clip
//! identifier and reads back the reported duration. Renderer readiness is the
//! caller's problem (the component layer retries initialization with backoff
//! before handing the renderer to the engine).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Why a clip could not be played. All variants are non-fatal to the
/// sequencer, which logs and skips.
#[derive(Debug, Error)]
pub enum ClipError {
    #[error("clip not found: {0}")]
    NotFound(String),
    #[error("renderer rejected clip {clip}: {reason}")]
    Rejected { clip: String, reason: String },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// What the renderer reports back after a clip starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playback {
    /// Clip duration, if the renderer can report one. `None` falls back to
    /// the sequencer's default.
    pub duration: Option<Duration>,
}

/// The external avatar renderer.
#[async_trait]
pub trait AvatarRenderer: Send + Sync {
    /// Begin playing `clip`. Returns the playback descriptor on success.
    async fn play_clip(&self, clip: &str) -> Result<Playback, ClipError>;

    /// Stop everything currently playing. Called before each new clip so at
    /// most one motion is ever active.
    async fn stop_all(&self) -> Result<(), ClipError>;
}

/// Fire-and-forget notifications emitted while the sequencer drives
/// playback, consumed by the caption/display layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MotionEvent {
    /// A clip began playing. `caption` is the stage-direction text that
    /// produced it (or the emotion name when there was none).
    Started { caption: String, duration: Duration },
    /// The active clip finished (or was skipped with zero duration).
    Ended,
}
