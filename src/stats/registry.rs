use std::sync::Arc;

use tracing::debug;

use crate::core::config::StatsConfig;
use crate::stats::{ClickStats, KeyStats, StatsAction, StatsPlugin, WaitStats};

/// Registry of usage-statistics plugins.
///
/// Every tracked action is fanned out to all registered plugins in
/// registration order; each plugin decides on its own whether to count it.
/// Registration needs `&mut self`, so the plugin set is fixed once the
/// registry is wrapped in an `Arc` and handed to the components that report
/// actions. There is no deregistration.
pub struct StatsRegistry {
    plugins: Vec<Arc<dyn StatsPlugin>>,
}

impl StatsRegistry {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Registry seeded with the standard plugins (clicks, keys, waits), all
    /// disabled.
    pub fn with_default_plugins() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(ClickStats::new()));
        registry.register(Arc::new(KeyStats::new()));
        registry.register(Arc::new(WaitStats::new()));
        registry
    }

    /// Seeds the standard plugins and enables the ones the config asks for.
    pub fn from_config(config: &StatsConfig) -> Self {
        let registry = Self::with_default_plugins();
        if config.track_clicks {
            if let Some(plugin) = registry.get("clicks") {
                plugin.enable_tracking();
            }
        }
        if config.track_keys {
            if let Some(plugin) = registry.get("keys") {
                plugin.enable_tracking();
            }
        }
        if config.track_waits {
            if let Some(plugin) = registry.get("waits") {
                plugin.enable_tracking();
            }
        }
        registry
    }

    /// Register a plugin. Registration order is the fan-out and reporting
    /// order.
    pub fn register(&mut self, plugin: Arc<dyn StatsPlugin>) {
        self.plugins.push(plugin);
    }

    /// Broadcast one action occurrence to every registered plugin.
    pub fn track(&self, action: StatsAction) {
        debug!(%action, "Tracking action");
        for plugin in &self.plugins {
            plugin.track(action);
        }
    }

    /// Look up a plugin by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn StatsPlugin>> {
        self.plugins.iter().find(|p| p.name() == name).cloned()
    }

    pub fn plugins(&self) -> &[Arc<dyn StatsPlugin>] {
        &self.plugins
    }

    pub fn enable_all(&self) {
        for plugin in &self.plugins {
            plugin.enable_tracking();
        }
    }

    pub fn disable_all(&self) {
        for plugin in &self.plugins {
            plugin.disable_tracking();
        }
    }

    pub fn reset_all(&self) {
        for plugin in &self.plugins {
            plugin.reset();
        }
    }

    /// `represent()` of every plugin, in registration order.
    pub fn summaries(&self) -> Vec<String> {
        self.plugins.iter().map(|p| p.represent()).collect()
    }
}

impl Default for StatsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click_count(registry: &StatsRegistry) -> String {
        registry.get("clicks").unwrap().represent()
    }

    #[test]
    fn fan_out_increments_matching_enabled_plugins_only() {
        let registry = StatsRegistry::with_default_plugins();
        registry.get("clicks").unwrap().enable_tracking();
        registry.get("waits").unwrap().enable_tracking();
        // keys plugin stays disabled

        registry.track(StatsAction::MouseLmbClick);
        registry.track(StatsAction::MouseLmbClick);
        registry.track(StatsAction::MouseLmbClick);
        registry.track(StatsAction::Wait);
        registry.track(StatsAction::KeyboardType);

        assert_eq!(click_count(&registry), "Times clicked: 3");
        assert_eq!(registry.get("waits").unwrap().represent(), "Times waited: 1");
        assert_eq!(registry.get("keys").unwrap().represent(), "Keys sent: 0");
    }

    #[test]
    fn disabling_one_plugin_freezes_its_counter() {
        let registry = StatsRegistry::with_default_plugins();
        registry.enable_all();

        registry.track(StatsAction::MouseLmbClick);
        registry.get("clicks").unwrap().disable_tracking();
        registry.track(StatsAction::MouseLmbClick);
        registry.track(StatsAction::MouseLmbClick);

        assert_eq!(click_count(&registry), "Times clicked: 1");
    }

    #[test]
    fn summaries_follow_registration_order() {
        let registry = StatsRegistry::with_default_plugins();
        assert_eq!(
            registry.summaries(),
            vec![
                "Times clicked: 0".to_string(),
                "Keys sent: 0".to_string(),
                "Times waited: 0".to_string(),
            ]
        );
    }

    #[test]
    fn reset_all_clears_every_counter() {
        let registry = StatsRegistry::with_default_plugins();
        registry.enable_all();
        registry.track(StatsAction::MouseLmbClick);
        registry.track(StatsAction::KeyboardType);
        registry.track(StatsAction::Wait);

        registry.reset_all();

        assert_eq!(
            registry.summaries(),
            vec![
                "Times clicked: 0".to_string(),
                "Keys sent: 0".to_string(),
                "Times waited: 0".to_string(),
            ]
        );
    }

    #[test]
    fn from_config_enables_requested_plugins() {
        let config = StatsConfig {
            track_clicks: true,
            track_keys: false,
            track_waits: true,
        };
        let registry = StatsRegistry::from_config(&config);
        assert!(registry.get("clicks").unwrap().is_tracking_enabled());
        assert!(!registry.get("keys").unwrap().is_tracking_enabled());
        assert!(registry.get("waits").unwrap().is_tracking_enabled());
    }

    #[test]
    fn unknown_plugin_lookup_returns_none() {
        let registry = StatsRegistry::with_default_plugins();
        assert!(registry.get("scrolls").is_none());
    }

    #[test]
    fn shared_registry_tracks_from_multiple_threads() {
        let registry = Arc::new(StatsRegistry::with_default_plugins());
        registry.enable_all();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        registry.track(StatsAction::MouseLmbClick);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(click_count(&registry), "Times clicked: 400");
    }
}
