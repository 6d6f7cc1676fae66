//! Test tooling: an in-memory driver so Navigator and ActionBot behavior can
//! be exercised without a browser.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::core::{Config, DriverTrait};
use crate::errors::Result;

#[derive(Default)]
struct MockState {
    scripts: Mutex<Vec<String>>,
    navigations: Mutex<Vec<String>>,
    responses: Mutex<VecDeque<Value>>,
    launched: AtomicBool,
}

/// Scriptable [`DriverTrait`] implementation.
///
/// Records every navigation and executed script. Script results are replayed
/// from a queue; once the queue is empty the default response is returned
/// (`true` unless overridden), which makes presence checks and gestures
/// succeed without any setup. Clones share state, so keep a clone around to
/// inspect the logs after the driver has been moved into a Navigator.
#[derive(Clone)]
pub struct MockDriver {
    state: Arc<MockState>,
    default_response: Value,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::with_default_response(Value::Bool(true))
    }

    pub fn with_default_response(default_response: Value) -> Self {
        Self {
            state: Arc::new(MockState::default()),
            default_response,
        }
    }

    /// Queue the result of the next script execution. Queued values are
    /// consumed in order before the default response kicks in.
    pub fn queue_response(&self, value: Value) {
        self.state.responses.lock().unwrap().push_back(value);
    }

    /// Every script executed so far, in order.
    pub fn scripts(&self) -> Vec<String> {
        self.state.scripts.lock().unwrap().clone()
    }

    /// Every URL navigated to so far, in order.
    pub fn navigations(&self) -> Vec<String> {
        self.state.navigations.lock().unwrap().clone()
    }
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DriverTrait for MockDriver {
    type TabHandle = ();

    async fn launch(&mut self, _config: &Config) -> Result<()> {
        self.state.launched.store(true, Ordering::Relaxed);
        Ok(())
    }

    async fn new_tab(&self) -> Result<Self::TabHandle> {
        Ok(())
    }

    async fn navigate(&self, _tab: &Self::TabHandle, url: &str) -> Result<()> {
        self.state.navigations.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn navigate_back(&self, _tab: &Self::TabHandle) -> Result<()> {
        Ok(())
    }

    async fn navigate_forward(&self, _tab: &Self::TabHandle) -> Result<()> {
        Ok(())
    }

    async fn refresh(&self, _tab: &Self::TabHandle) -> Result<()> {
        Ok(())
    }

    async fn execute_script(&self, _tab: &Self::TabHandle, script: &str) -> Result<Value> {
        self.state.scripts.lock().unwrap().push(script.to_string());
        let queued = self.state.responses.lock().unwrap().pop_front();
        Ok(queued.unwrap_or_else(|| self.default_response.clone()))
    }

    async fn url(&self, _tab: &Self::TabHandle) -> Result<String> {
        let navigations = self.state.navigations.lock().unwrap();
        Ok(navigations
            .last()
            .cloned()
            .unwrap_or_else(|| "about:blank".to_string()))
    }

    async fn title(&self, _tab: &Self::TabHandle) -> Result<String> {
        Ok("Mock Page".to_string())
    }

    fn is_running(&self) -> bool {
        self.state.launched.load(Ordering::Relaxed)
    }

    async fn close(&mut self) -> Result<()> {
        self.state.launched.store(false, Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_queued_responses_then_default() {
        let mut driver = MockDriver::new();
        driver.queue_response(Value::String("first".to_string()));

        driver.launch(&Config::default()).await.unwrap();
        let tab = driver.new_tab().await.unwrap();

        let first = driver.execute_script(&tab, "a()").await.unwrap();
        let second = driver.execute_script(&tab, "b()").await.unwrap();

        assert_eq!(first, Value::String("first".to_string()));
        assert_eq!(second, Value::Bool(true));
        assert_eq!(driver.scripts(), vec!["a()".to_string(), "b()".to_string()]);
    }

    #[tokio::test]
    async fn clones_share_recorded_state() {
        let mut driver = MockDriver::new();
        let handle = driver.clone();

        driver.launch(&Config::default()).await.unwrap();
        let tab = driver.new_tab().await.unwrap();
        driver.navigate(&tab, "https://example.com").await.unwrap();

        assert!(handle.is_running());
        assert_eq!(handle.navigations(), vec!["https://example.com".to_string()]);
        assert_eq!(driver.url(&tab).await.unwrap(), "https://example.com");
    }
}
