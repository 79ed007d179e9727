//! The emotion state store.
//!
//! One record per main tag, levels in [0, 100]. Levels decay on a wall-clock
//! heartbeat and move on explicit deltas from the message pipeline. Readers
//! never see the records directly; they get immutable snapshots, either
//! polled or via a watch channel.

use crate::heartbeat::{decay_level, DecayConfig};
use chrono::{DateTime, Utc};
use kokoro_core::{emotion_config, EmotionConfig, EmotionTag};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;

/// Suppression factor applied to conflicting tags: a +N update reduces each
/// conflicting level by N/2.
const CONFLICT_SUPPRESSION: f32 = 0.5;

#[derive(Debug, Clone, Copy)]
struct EmotionRecord {
    level: f32,
    last_update: Instant,
    decaying: bool,
}

impl EmotionRecord {
    fn fresh(now: Instant) -> Self {
        Self {
            level: 0.0,
            last_update: now,
            decaying: true,
        }
    }
}

/// Immutable view of all levels at one point in time.
#[derive(Debug, Clone, Serialize)]
pub struct EmotionSnapshot {
    pub taken_at: DateTime<Utc>,
    levels: HashMap<EmotionTag, f32>,
}

impl EmotionSnapshot {
    /// Level for `tag`, 0.0 for control tags.
    pub fn level(&self, tag: EmotionTag) -> f32 {
        self.levels.get(&tag).copied().unwrap_or(0.0)
    }

    /// All (tag, level) pairs, unordered.
    pub fn iter(&self) -> impl Iterator<Item = (EmotionTag, f32)> + '_ {
        self.levels.iter().map(|(t, l)| (*t, *l))
    }
}

/// Decaying per-tag emotion levels with conflict suppression and
/// prerequisite gating.
pub struct EmotionStore {
    records: Arc<RwLock<HashMap<EmotionTag, EmotionRecord>>>,
    watch_tx: watch::Sender<EmotionSnapshot>,
    watch_rx: watch::Receiver<EmotionSnapshot>,
    heartbeat: std::sync::Mutex<Option<JoinHandle<()>>>,
}

impl EmotionStore {
    /// Create a store with the default 1s decay heartbeat.
    pub fn new() -> Self {
        Self::with_config(DecayConfig::default())
    }

    /// Create with a custom heartbeat.
    pub fn with_config(config: DecayConfig) -> Self {
        let now = Instant::now();
        let records: HashMap<_, _> = EmotionTag::MAIN
            .into_iter()
            .map(|tag| (tag, EmotionRecord::fresh(now)))
            .collect();
        let records = Arc::new(RwLock::new(records));

        let initial = Self::snapshot_of(&EmotionTag::MAIN.map(|t| (t, 0.0f32)));
        let (watch_tx, watch_rx) = watch::channel(initial);

        let store = Self {
            records,
            watch_tx,
            watch_rx,
            heartbeat: std::sync::Mutex::new(None),
        };
        store.spawn_heartbeat(config);
        store
    }

    fn snapshot_of(levels: &[(EmotionTag, f32)]) -> EmotionSnapshot {
        EmotionSnapshot {
            taken_at: Utc::now(),
            levels: levels.iter().copied().collect(),
        }
    }

    fn spawn_heartbeat(&self, config: DecayConfig) {
        let records = Arc::clone(&self.records);
        let watch_tx = self.watch_tx.clone();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(config.interval);
            // First tick fires immediately and decays nothing.
            loop {
                interval.tick().await;
                let now = Instant::now();
                let mut guard = records.write().await;
                let mut changed = false;

                for (tag, record) in guard.iter_mut() {
                    if !record.decaying || record.level <= 0.0 {
                        continue;
                    }
                    let rate = match emotion_config(*tag) {
                        Some(cfg) => cfg.decay_per_minute,
                        None => continue,
                    };
                    let elapsed = now.duration_since(record.last_update);
                    let next = decay_level(record.level, rate, elapsed);
                    if next != record.level {
                        changed = true;
                    }
                    record.level = next;
                    record.last_update = now;
                }

                if changed {
                    let _ = watch_tx.send(Self::snapshot_locked(&guard));
                }
            }
        });

        *self.heartbeat.lock().expect("heartbeat lock poisoned") = Some(handle);
    }

    fn snapshot_locked(records: &HashMap<EmotionTag, EmotionRecord>) -> EmotionSnapshot {
        EmotionSnapshot {
            taken_at: Utc::now(),
            levels: records.iter().map(|(t, r)| (*t, r.level)).collect(),
        }
    }

    /// Apply a level delta to `tag`.
    ///
    /// Prerequisite gating: if the tag's config lists minimum levels for
    /// other tags and any is unmet, the whole update is a silent no-op.
    /// Conflict suppression: each tag the config marks as conflicting loses
    /// `|amount| * 0.5`, floored at zero. Suppression and the delta apply
    /// under one write lock, so no intermediate state is observable.
    ///
    /// Deltas to control tags (`neutral`, `thinking`) are no-ops.
    pub async fn apply_delta(&self, tag: EmotionTag, amount: f32) {
        let Some(cfg) = emotion_config(tag) else {
            tracing::debug!(%tag, "ignoring delta for control tag");
            return;
        };
        self.apply_delta_with(cfg, tag, amount).await;
    }

    async fn apply_delta_with(&self, cfg: &EmotionConfig, tag: EmotionTag, amount: f32) {
        let mut guard = self.records.write().await;

        for (required, threshold) in cfg.requires_min_level {
            let current = guard.get(required).map(|r| r.level).unwrap_or(0.0);
            if current < *threshold {
                tracing::debug!(
                    %tag, %required, current, threshold,
                    "prerequisite unmet, dropping emotion update"
                );
                return;
            }
        }

        for conflicting in cfg.conflicts_with {
            if let Some(record) = guard.get_mut(conflicting) {
                if record.level > 0.0 {
                    record.level =
                        (record.level - amount.abs() * CONFLICT_SUPPRESSION).max(0.0);
                }
            }
        }

        if let Some(record) = guard.get_mut(&tag) {
            record.level = (record.level + amount).clamp(0.0, 100.0);
            record.last_update = Instant::now();
            tracing::trace!(%tag, amount, level = record.level, "applied emotion delta");
        }

        let _ = self.watch_tx.send(Self::snapshot_locked(&guard));
    }

    /// Reset every record to level 0, decaying, updated now.
    pub async fn reset(&self) {
        let now = Instant::now();
        let mut guard = self.records.write().await;
        for record in guard.values_mut() {
            *record = EmotionRecord::fresh(now);
        }
        let _ = self.watch_tx.send(Self::snapshot_locked(&guard));
        tracing::debug!("emotion store reset");
    }

    /// Current level for `tag` (0.0 for control tags).
    pub async fn level(&self, tag: EmotionTag) -> f32 {
        self.records
            .read()
            .await
            .get(&tag)
            .map(|r| r.level)
            .unwrap_or(0.0)
    }

    /// Immutable snapshot of every level.
    pub async fn snapshot(&self) -> EmotionSnapshot {
        Self::snapshot_locked(&*self.records.read().await)
    }

    /// Subscribe to snapshot updates (display panel).
    pub fn subscribe(&self) -> watch::Receiver<EmotionSnapshot> {
        self.watch_rx.clone()
    }

    /// Force a level directly (testing or manual intervention). Clamped.
    pub async fn set_level(&self, tag: EmotionTag, level: f32) {
        let mut guard = self.records.write().await;
        if let Some(record) = guard.get_mut(&tag) {
            record.level = level.clamp(0.0, 100.0);
            record.last_update = Instant::now();
        }
        let _ = self.watch_tx.send(Self::snapshot_locked(&guard));
    }

    /// Stop the decay heartbeat. No tick runs after this returns. Dropping
    /// the store does the same.
    pub fn shutdown(&self) {
        if let Some(handle) = self.heartbeat.lock().expect("heartbeat lock poisoned").take() {
            handle.abort();
        }
    }
}

impl Drop for EmotionStore {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl Default for EmotionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::sleep;

    #[tokio::test]
    async fn test_starts_at_zero() {
        let store = EmotionStore::with_config(DecayConfig::testing());
        for tag in EmotionTag::MAIN {
            assert_eq!(store.level(tag).await, 0.0);
        }
    }

    #[tokio::test]
    async fn test_apply_delta_clamps_high_and_low() {
        let store = EmotionStore::with_config(DecayConfig::slow());
        store.apply_delta(EmotionTag::Happy, 1000.0).await;
        assert_eq!(store.level(EmotionTag::Happy).await, 100.0);
        store.apply_delta(EmotionTag::Happy, -1000.0).await;
        assert_eq!(store.level(EmotionTag::Happy).await, 0.0);
    }

    #[tokio::test]
    async fn test_conflict_suppression_halves_amount() {
        let store = EmotionStore::with_config(DecayConfig::slow());
        store.set_level(EmotionTag::Shy, 50.0).await;

        // horny conflicts with shy: +40 suppresses shy by 20
        store.apply_delta(EmotionTag::Horny, 40.0).await;
        assert!((store.level(EmotionTag::Shy).await - 30.0).abs() < 1e-4);
        assert!((store.level(EmotionTag::Horny).await - 40.0).abs() < 1e-4);
    }

    #[tokio::test]
    async fn test_conflict_suppression_floors_at_zero() {
        let store = EmotionStore::with_config(DecayConfig::slow());
        store.set_level(EmotionTag::Shy, 5.0).await;
        store.apply_delta(EmotionTag::Horny, 80.0).await;
        assert_eq!(store.level(EmotionTag::Shy).await, 0.0);
    }

    #[tokio::test]
    async fn test_control_tag_delta_is_noop() {
        let store = EmotionStore::with_config(DecayConfig::slow());
        store.apply_delta(EmotionTag::Neutral, 50.0).await;
        assert_eq!(store.level(EmotionTag::Neutral).await, 0.0);
    }

    #[tokio::test]
    async fn test_reset_rezeroes() {
        let store = EmotionStore::with_config(DecayConfig::slow());
        store.set_level(EmotionTag::Happy, 80.0).await;
        store.set_level(EmotionTag::Shy, 40.0).await;
        store.reset().await;
        for tag in EmotionTag::MAIN {
            assert_eq!(store.level(tag).await, 0.0);
        }
    }

    #[tokio::test]
    async fn test_decay_reduces_level_over_time() {
        let store = EmotionStore::with_config(DecayConfig::testing());
        store.set_level(EmotionTag::Excited, 50.0).await;

        sleep(Duration::from_millis(100)).await;

        let level = store.level(EmotionTag::Excited).await;
        assert!(level < 50.0, "expected decay, still at {level}");
        assert!(level > 0.0);
    }

    #[tokio::test]
    async fn test_shutdown_stops_decay() {
        let store = EmotionStore::with_config(DecayConfig::testing());
        store.shutdown();
        store.set_level(EmotionTag::Excited, 50.0).await;

        sleep(Duration::from_millis(100)).await;

        assert_eq!(store.level(EmotionTag::Excited).await, 50.0);
    }

    #[tokio::test]
    async fn test_snapshot_reflects_levels() {
        let store = EmotionStore::with_config(DecayConfig::slow());
        store.set_level(EmotionTag::Pleased, 33.0).await;
        let snap = store.snapshot().await;
        assert!((snap.level(EmotionTag::Pleased) - 33.0).abs() < 1e-4);
        assert_eq!(snap.level(EmotionTag::Neutral), 0.0);
    }

    #[tokio::test]
    async fn test_subscribe_receives_updates() {
        let store = EmotionStore::with_config(DecayConfig::slow());
        let mut rx = store.subscribe();

        store.apply_delta(EmotionTag::Happy, 25.0).await;

        rx.changed().await.unwrap();
        let snap = rx.borrow().clone();
        assert!((snap.level(EmotionTag::Happy) - 25.0).abs() < 1e-4);
    }

    // No shipped config sets requires_min_level yet, so gating is exercised
    // through the internal entry point with a synthetic config.
    const GATED: EmotionConfig = EmotionConfig {
        color: "rgb(0, 0, 0)",
        decay_per_minute: 4.0,
        conflicts_with: &[],
        requires_min_level: &[(EmotionTag::Horny, 20.0)],
        adult: true,
    };

    #[tokio::test]
    async fn test_prerequisite_gating_blocks_update() {
        let store = EmotionStore::with_config(DecayConfig::slow());
        store.set_level(EmotionTag::Horny, 10.0).await;

        store
            .apply_delta_with(&GATED, EmotionTag::Leaking, 50.0)
            .await;
        assert_eq!(store.level(EmotionTag::Leaking).await, 0.0);
    }

    #[tokio::test]
    async fn test_prerequisite_gating_allows_when_met() {
        let store = EmotionStore::with_config(DecayConfig::slow());
        store.set_level(EmotionTag::Horny, 25.0).await;

        store
            .apply_delta_with(&GATED, EmotionTag::Leaking, 50.0)
            .await;
        assert!((store.level(EmotionTag::Leaking).await - 50.0).abs() < 1e-4);
    }

    #[tokio::test]
    async fn test_snapshot_serializes() {
        let store = EmotionStore::with_config(DecayConfig::slow());
        let snap = store.snapshot().await;
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("taken_at"));
    }
}
