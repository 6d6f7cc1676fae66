use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::Result;
use crate::types::Viewport;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub browser: BrowserConfig,
    pub waits: WaitConfig,
    pub stats: StatsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    pub headless: bool,
    pub viewport: Viewport,
    pub user_agent: Option<String>,
    pub disable_images: bool,
    pub args: Vec<String>,
}

/// Timeouts for the Navigator's wait operations, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitConfig {
    /// Ceiling for explicit waits (`wait_until_*`).
    pub explicit_timeout_ms: u64,
    /// Interval between condition checks while waiting.
    pub poll_interval_ms: u64,
    /// Element-lookup timeout applied before each gesture. Zero means a
    /// single lookup with no retry.
    pub implicit_wait_ms: u64,
}

/// Which of the seeded stats plugins start out enabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    pub track_clicks: bool,
    pub track_keys: bool,
    pub track_waits: bool,
}

/// System under test: a named deployment with a base URL that relative
/// navigation paths are resolved against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    pub name: String,
    pub base_url: Url,
}

impl Environment {
    pub fn new(name: impl Into<String>, base_url: Url) -> Self {
        Self {
            name: name.into(),
            base_url,
        }
    }

    /// Resolves a path against the environment's base URL.
    pub fn url_for(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser: BrowserConfig::default(),
            waits: WaitConfig::default(),
            stats: StatsConfig::default(),
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport: Viewport::default(),
            user_agent: None,
            disable_images: false,
            args: vec![],
        }
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            explicit_timeout_ms: 10_000,
            poll_interval_ms: 250,
            implicit_wait_ms: 0,
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            track_clicks: false,
            track_keys: false,
            track_waits: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_resolves_relative_paths() {
        let env = Environment::new(
            "staging",
            Url::parse("https://staging.example.com/app/").unwrap(),
        );
        let url = env.url_for("login").unwrap();
        assert_eq!(url.as_str(), "https://staging.example.com/app/login");
    }

    #[test]
    fn seeded_plugins_start_disabled_by_default() {
        let config = StatsConfig::default();
        assert!(!config.track_clicks);
        assert!(!config.track_keys);
        assert!(!config.track_waits);
    }
}
