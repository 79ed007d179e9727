//! Decay heartbeat configuration.
//!
//! Emotion levels fall continuously toward zero on wall-clock time, not
//! message arrival. The heartbeat is the tick driving that decay.

use std::time::Duration;

/// Configuration for the decay heartbeat.
#[derive(Debug, Clone)]
pub struct DecayConfig {
    /// How often to apply decay (default: 1s).
    pub interval: Duration,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
        }
    }
}

impl DecayConfig {
    /// Coarse ticks for resource-constrained hosts.
    pub fn slow() -> Self {
        Self {
            interval: Duration::from_secs(5),
        }
    }

    /// Very fast ticks for testing.
    pub fn testing() -> Self {
        Self {
            interval: Duration::from_millis(10),
        }
    }
}

/// Level after `elapsed` of decay at `rate_per_minute`, floored at 0.
///
/// Idempotent for zero elapsed time; linear otherwise.
pub(crate) fn decay_level(level: f32, rate_per_minute: f32, elapsed: Duration) -> f32 {
    (level - (rate_per_minute / 60.0) * elapsed.as_secs_f32()).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decay_exact_amount() {
        // 6/min over 10s = 1.0 units
        let after = decay_level(50.0, 6.0, Duration::from_secs(10));
        assert!((after - 49.0).abs() < 1e-4);
    }

    #[test]
    fn test_decay_zero_elapsed_is_identity() {
        assert_eq!(decay_level(42.0, 5.0, Duration::ZERO), 42.0);
    }

    #[test]
    fn test_decay_floors_at_zero() {
        assert_eq!(decay_level(0.5, 60.0, Duration::from_secs(60)), 0.0);
    }

    #[test]
    fn test_default_interval_is_one_second() {
        assert_eq!(DecayConfig::default().interval, Duration::from_secs(1));
    }
}
