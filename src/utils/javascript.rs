use crate::core::DriverTrait;
use crate::errors::Result;
use serde_json::Value;

pub struct JavaScriptRunner;

impl JavaScriptRunner {
    pub async fn execute<D: DriverTrait>(
        driver: &D,
        tab: &D::TabHandle,
        script: &str,
    ) -> Result<Value> {
        driver.execute_script(tab, script).await
    }

    pub async fn execute_with_timeout<D: DriverTrait>(
        driver: &D,
        tab: &D::TabHandle,
        script: &str,
        timeout_ms: u64,
    ) -> Result<Value> {
        let execution = driver.execute_script(tab, script);

        tokio::time::timeout(tokio::time::Duration::from_millis(timeout_ms), execution)
            .await
            .map_err(|_| crate::errors::AutomationError::JavaScriptTimeout)?
    }

    /// Polls a boolean script until it returns true or the timeout elapses.
    /// Returns whether the condition was met.
    pub async fn wait_for_condition<D: DriverTrait>(
        driver: &D,
        tab: &D::TabHandle,
        condition: &str,
        timeout_ms: u64,
        poll_interval_ms: u64,
    ) -> Result<bool> {
        let start_time = std::time::Instant::now();
        let timeout = tokio::time::Duration::from_millis(timeout_ms);
        let poll_interval = tokio::time::Duration::from_millis(poll_interval_ms);

        loop {
            let result = driver.execute_script(tab, condition).await?;
            if result.as_bool() == Some(true) {
                return Ok(true);
            }

            if start_time.elapsed() >= timeout {
                return Ok(false);
            }

            tokio::time::sleep(poll_interval).await;
        }
    }
}
