use std::sync::Arc;

use tracing::info;

use crate::core::DriverTrait;
use crate::errors::Result;
use crate::navigation::Navigator;

/// Step-performing wrapper around a shared [`Navigator`].
///
/// Every gesture is logged as a step (action plus a short element label)
/// before being delegated; the Navigator does the stats tracking, so each
/// gesture is counted exactly once.
pub struct ActionBot<D: DriverTrait> {
    navigator: Arc<Navigator<D>>,
}

impl<D: DriverTrait> ActionBot<D> {
    pub fn new(navigator: Arc<Navigator<D>>) -> Self {
        Self { navigator }
    }

    pub fn navigator(&self) -> &Arc<Navigator<D>> {
        &self.navigator
    }

    /// Clicks on the element behind `selector`.
    pub async fn click(&self, selector: &str) -> Result<()> {
        self.log_step("Click", &self.label_for(selector).await);
        self.navigator.click(selector).await
    }

    /// Clicks and then waits for the page to finish loading.
    pub async fn click_and_wait(&self, selector: &str) -> Result<()> {
        self.click(selector).await?;
        self.navigator.wait_for_page_loaded().await
    }

    /// Reactive click for re-rendering pages; see [`Navigator::click_reactive`].
    pub async fn click_reactive(&self, selector: &str) -> Result<()> {
        self.log_step("Click", &self.label_for(selector).await);
        self.navigator.click_reactive(selector).await
    }

    /// Reactive click followed by a page-load wait.
    pub async fn click_reactive_and_wait(&self, selector: &str) -> Result<()> {
        self.click_reactive(selector).await?;
        self.navigator.wait_for_page_loaded().await
    }

    /// Double clicks on the element behind `selector`.
    pub async fn double_click(&self, selector: &str) -> Result<()> {
        self.log_step("Double click", &self.label_for(selector).await);
        self.navigator.double_click(selector).await
    }

    /// Sends keys to the element behind `selector`.
    pub async fn send_keys(&self, selector: &str, text: &str) -> Result<()> {
        let label = self.label_for(selector).await;
        self.log_step("Send keys", &format!("'{}' to {}", text, label));
        self.navigator.send_keys(selector, text).await
    }

    /// Sends keys to the currently focused element.
    pub async fn send_keys_text(&self, text: &str) -> Result<()> {
        self.log_step("Send keys", &format!("'{}'", text));
        self.navigator.send_keys_active(text).await
    }

    pub async fn scroll_into_view(&self, selector: &str) -> Result<()> {
        self.log_step("Scroll element into view", &self.label_for(selector).await);
        self.navigator.scroll_into_view(selector).await
    }

    pub async fn move_to_element(&self, selector: &str) -> Result<()> {
        self.log_step("Move to element", &self.label_for(selector).await);
        self.navigator.move_to_element(selector).await
    }

    /// Drags an element by an offset from its current position.
    pub async fn drag_element(&self, selector: &str, x_offset: i32, y_offset: i32) -> Result<()> {
        let label = self.label_for(selector).await;
        self.log_step(
            "Drag element",
            &format!("{} with offsets {},{}", label, x_offset, y_offset),
        );
        self.navigator.drag_element(selector, x_offset, y_offset).await
    }

    /// Drags a source element and drops it onto a target element.
    pub async fn drag_and_drop(&self, source: &str, target: &str) -> Result<()> {
        let source_label = self.label_for(source).await;
        let target_label = self.label_for(target).await;
        self.log_step(
            "Drag element",
            &format!("{} to {}", source_label, target_label),
        );
        self.navigator.drag_and_drop(source, target).await
    }

    pub async fn focus_element(&self, selector: &str) -> Result<()> {
        self.log_step("Focus element", &self.label_for(selector).await);
        self.navigator.focus_element(selector).await
    }

    fn log_step(&self, action: &str, detail: &str) {
        info!(target: "step", action, detail, "Performing step");
    }

    /// Element label for the step log; falls back to the selector when the
    /// element cannot be described (it may not exist yet).
    async fn label_for(&self, selector: &str) -> String {
        self.navigator
            .describe_element(selector)
            .await
            .unwrap_or_else(|_| selector.to_string())
    }
}
