use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::stats::{StatsAction, StatsPlugin};

/// StatsPlugin tracking keyboard input gestures.
pub struct KeyStats {
    tracking_enabled: AtomicBool,
    keys_sent: AtomicU64,
}

impl KeyStats {
    pub fn new() -> Self {
        Self {
            tracking_enabled: AtomicBool::new(false),
            keys_sent: AtomicU64::new(0),
        }
    }

    pub fn keys_sent(&self) -> u64 {
        self.keys_sent.load(Ordering::Relaxed)
    }
}

impl Default for KeyStats {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsPlugin for KeyStats {
    fn name(&self) -> &str {
        "keys"
    }

    fn enable_tracking(&self) {
        self.tracking_enabled.store(true, Ordering::Relaxed);
    }

    fn disable_tracking(&self) {
        self.tracking_enabled.store(false, Ordering::Relaxed);
    }

    fn is_tracking_enabled(&self) -> bool {
        self.tracking_enabled.load(Ordering::Relaxed)
    }

    fn track(&self, action: StatsAction) {
        if action == StatsAction::KeyboardType && self.is_tracking_enabled() {
            self.keys_sent.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn reset(&self) {
        self.keys_sent.store(0, Ordering::Relaxed);
    }

    fn represent(&self) -> String {
        format!("Keys sent: {}", self.keys_sent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_other_kinds() {
        let stats = KeyStats::new();
        stats.enable_tracking();
        stats.track(StatsAction::MouseLmbClick);
        stats.track(StatsAction::MouseLmbDoubleClick);
        stats.track(StatsAction::Wait);
        assert_eq!(stats.keys_sent(), 0);
        stats.track(StatsAction::KeyboardType);
        assert_eq!(stats.keys_sent(), 1);
    }
}
