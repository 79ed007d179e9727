//! # Kokoro Affect
//!
//! The emotion state store: one decaying level per [`EmotionTag`], fed by
//! intensity deltas from the message pipeline and drained by a wall-clock
//! decay heartbeat.
//!
//! ## Semantics
//!
//! - Levels live in `[0, 100]` and decay linearly at each tag's configured
//!   per-minute rate, whether or not messages arrive.
//! - A positive update suppresses conflicting tags by half the amount
//!   (mutually-exclusive affect, e.g. shy vs. flirty).
//! - Updates to a tag with unmet prerequisites are silent no-ops, gating
//!   escalating states behind their precursors.
//!
//! The store is the session's only long-lived mutable state; all mutation
//! runs to completion under one lock, so readers only ever observe settled
//! snapshots.

mod heartbeat;
mod store;

pub use heartbeat::DecayConfig;
pub use store::{EmotionSnapshot, EmotionStore};

pub use kokoro_core::EmotionTag;
