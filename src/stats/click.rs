use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::stats::{StatsAction, StatsPlugin};

/// StatsPlugin tracking only LMB clicks.
pub struct ClickStats {
    tracking_enabled: AtomicBool,
    clicks: AtomicU64,
}

impl ClickStats {
    pub fn new() -> Self {
        Self {
            tracking_enabled: AtomicBool::new(false),
            clicks: AtomicU64::new(0),
        }
    }

    pub fn clicks(&self) -> u64 {
        self.clicks.load(Ordering::Relaxed)
    }
}

impl Default for ClickStats {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsPlugin for ClickStats {
    fn name(&self) -> &str {
        "clicks"
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
        if action == StatsAction::MouseLmbClick && self.is_tracking_enabled() {
            self.clicks.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn reset(&self) {
        self.clicks.store(0, Ordering::Relaxed);
    }

    fn represent(&self) -> String {
        format!("Times clicked: {}", self.clicks())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_while_disabled_is_dropped() {
        let stats = ClickStats::new();
        stats.track(StatsAction::MouseLmbClick);
        stats.track(StatsAction::MouseLmbClick);
        assert_eq!(stats.clicks(), 0);
    }

    #[test]
    fn counts_only_matching_kind() {
        let stats = ClickStats::new();
        stats.enable_tracking();
        stats.track(StatsAction::MouseLmbClick);
        stats.track(StatsAction::KeyboardType);
        stats.track(StatsAction::Wait);
        stats.track(StatsAction::MouseLmbClick);
        assert_eq!(stats.clicks(), 2);
    }

    #[test]
    fn disable_keeps_prior_count() {
        let stats = ClickStats::new();
        stats.enable_tracking();
        stats.track(StatsAction::MouseLmbClick);
        stats.disable_tracking();
        stats.track(StatsAction::MouseLmbClick);
        stats.track(StatsAction::MouseLmbClick);
        assert_eq!(stats.clicks(), 1);
    }

    #[test]
    fn reset_zeroes_counter_but_not_flag() {
        let stats = ClickStats::new();
        stats.enable_tracking();
        stats.track(StatsAction::MouseLmbClick);
        stats.reset();
        assert_eq!(stats.clicks(), 0);
        assert!(stats.is_tracking_enabled());
    }

    #[test]
    fn represent_reflects_counter() {
        let stats = ClickStats::new();
        stats.enable_tracking();
        assert_eq!(stats.represent(), "Times clicked: 0");
        stats.track(StatsAction::MouseLmbClick);
        assert_eq!(stats.represent(), "Times clicked: 1");
    }
}
