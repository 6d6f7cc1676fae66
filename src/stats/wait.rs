use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::stats::{StatsAction, StatsPlugin};

/// StatsPlugin tracking waits.
pub struct WaitStats {
    tracking_enabled: AtomicBool,
    times_waited: AtomicU64,
}

impl WaitStats {
    pub fn new() -> Self {
        Self {
            tracking_enabled: AtomicBool::new(false),
            times_waited: AtomicU64::new(0),
        }
    }

    pub fn times_waited(&self) -> u64 {
        self.times_waited.load(Ordering::Relaxed)
    }
}

impl Default for WaitStats {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsPlugin for WaitStats {
    fn name(&self) -> &str {
        "waits"
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
        if action == StatsAction::Wait && self.is_tracking_enabled() {
            self.times_waited.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn reset(&self) {
        self.times_waited.store(0, Ordering::Relaxed);
    }

    fn represent(&self) -> String {
        format!("Times waited: {}", self.times_waited())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_waits_exactly() {
        let stats = WaitStats::new();
        stats.enable_tracking();
        for _ in 0..5 {
            stats.track(StatsAction::Wait);
        }
        stats.track(StatsAction::MouseLmbClick);
        assert_eq!(stats.times_waited(), 5);
        assert_eq!(stats.represent(), "Times waited: 5");
    }

    #[test]
    fn reset_after_history() {
        let stats = WaitStats::new();
        stats.enable_tracking();
        stats.track(StatsAction::Wait);
        stats.disable_tracking();
        stats.reset();
        assert_eq!(stats.times_waited(), 0);
        assert!(!stats.is_tracking_enabled());
    }
}
