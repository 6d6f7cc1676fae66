use crate::errors::Result;
use async_trait::async_trait;
use serde_json::Value;

/// The WebDriver-style browser-control handle the Navigator wraps.
///
/// Everything protocol-level (CDP, element resolution, waiting for loads)
/// stays behind this trait; the Navigator only composes these primitives.
#[async_trait]
pub trait DriverTrait: Send + Sync {
    type TabHandle: Send + Sync;

    /// Launch the underlying browser process.
    async fn launch(&mut self, config: &crate::core::Config) -> Result<()>;

    /// Create a new tab/page.
    async fn new_tab(&self) -> Result<Self::TabHandle>;

    /// Navigate to a URL and wait for the load to settle.
    async fn navigate(&self, tab: &Self::TabHandle, url: &str) -> Result<()>;

    /// Go back one entry in the tab history.
    async fn navigate_back(&self, tab: &Self::TabHandle) -> Result<()>;

    /// Go forward one entry in the tab history.
    async fn navigate_forward(&self, tab: &Self::TabHandle) -> Result<()>;

    /// Reload the current page.
    async fn refresh(&self, tab: &Self::TabHandle) -> Result<()>;

    /// Execute JavaScript in the tab and return its value.
    async fn execute_script(&self, tab: &Self::TabHandle, script: &str) -> Result<Value>;

    /// Get the current URL.
    async fn url(&self, tab: &Self::TabHandle) -> Result<String>;

    /// Get the current page title.
    async fn title(&self, tab: &Self::TabHandle) -> Result<String>;

    /// Check if the browser is still running.
    fn is_running(&self) -> bool;

    /// Close the browser.
    async fn close(&mut self) -> Result<()>;
}
