use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::core::{Config, DriverTrait, Environment};
use crate::errors::{AutomationError, Result};
use crate::stats::{StatsAction, StatsRegistry};
use crate::types::ElementInfo;
use crate::utils::element::text_or_tag;
use crate::utils::JavaScriptRunner;

/// The driver-wrapping navigation helper.
///
/// Owns the browser-control handle and one tab, performs navigation and
/// gestures on it, and reports every gesture to the shared stats registry.
/// Constructed explicitly and shared via `Arc`; there is no process-wide
/// instance.
pub struct Navigator<D: DriverTrait> {
    driver: D,
    tab: D::TabHandle,
    config: Config,
    implicit_wait_ms: AtomicU64,
    environment: Option<Environment>,
    stats: Arc<StatsRegistry>,
    session_id: String,
}

impl<D: DriverTrait> Navigator<D> {
    /// Launches the driver, opens a tab and wires up the stats registry.
    pub async fn new(mut driver: D, config: Config, stats: Arc<StatsRegistry>) -> Result<Self> {
        driver.launch(&config).await?;
        let tab = driver.new_tab().await?;
        let session_id = uuid::Uuid::new_v4().to_string();
        let implicit_wait_ms = AtomicU64::new(config.waits.implicit_wait_ms);
        debug!(%session_id, "Navigator session started");

        Ok(Self {
            driver,
            tab,
            config,
            implicit_wait_ms,
            environment: None,
            stats,
            session_id,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn stats(&self) -> &Arc<StatsRegistry> {
        &self.stats
    }

    pub fn environment(&self) -> Option<&Environment> {
        self.environment.as_ref()
    }

    pub fn set_environment(&mut self, environment: Environment) {
        self.environment = Some(environment);
    }

    // -- navigation ---------------------------------------------------------

    pub async fn navigate(&self, url: &str) -> Result<()> {
        debug!(url, "Navigating");
        self.driver.navigate(&self.tab, url).await
    }

    pub async fn navigate_to_url(&self, url: &Url) -> Result<()> {
        self.navigate(url.as_str()).await
    }

    /// Navigates to a path resolved against the configured environment.
    pub async fn navigate_to_path(&self, path: &str) -> Result<()> {
        let environment = self.environment.as_ref().ok_or(AutomationError::NoEnvironment)?;
        let url = environment.url_for(path)?;
        self.navigate(url.as_str()).await
    }

    pub async fn navigate_back(&self) -> Result<()> {
        debug!("Navigating back");
        self.driver.navigate_back(&self.tab).await
    }

    pub async fn navigate_forward(&self) -> Result<()> {
        debug!("Navigating forward");
        self.driver.navigate_forward(&self.tab).await
    }

    pub async fn refresh(&self) -> Result<()> {
        debug!("Performing refresh");
        self.driver.refresh(&self.tab).await
    }

    pub async fn url(&self) -> Result<String> {
        self.driver.url(&self.tab).await
    }

    pub async fn title(&self) -> Result<String> {
        self.driver.title(&self.tab).await
    }

    // -- gestures -----------------------------------------------------------

    /// Clicks on the element behind `selector`.
    pub async fn click(&self, selector: &str) -> Result<()> {
        debug!(selector, "Performing click");
        self.resolve_element(selector).await?;
        let script = format!(
            r#"
            (function() {{
                const element = document.querySelector({sel});
                if (!element) return false;
                element.scrollIntoView({{ block: 'center' }});
                element.click();
                return true;
            }})()
            "#,
            sel = js_string(selector)?
        );
        self.run_gesture(&script, selector).await?;
        self.stats.track(StatsAction::MouseLmbClick);
        Ok(())
    }

    /// Click variant for pages that re-render their handlers after load:
    /// hovers first, gives the framework a beat, waits until the element is
    /// clickable, then clicks. Slightly slower than [`Navigator::click`].
    pub async fn click_reactive(&self, selector: &str) -> Result<()> {
        debug!(selector, "Performing reactive click");
        self.hover(selector).await?;
        tokio::time::sleep(Duration::from_millis(self.config.waits.poll_interval_ms)).await;
        self.wait_until_clickable(selector).await?;

        let script = format!(
            r#"
            (function() {{
                const element = document.querySelector({sel});
                if (!element) return false;
                element.click();
                return true;
            }})()
            "#,
            sel = js_string(selector)?
        );
        self.run_gesture(&script, selector).await?;
        self.stats.track(StatsAction::MouseLmbClick);
        Ok(())
    }

    /// Double clicks on the element behind `selector`.
    pub async fn double_click(&self, selector: &str) -> Result<()> {
        debug!(selector, "Performing double click");
        self.resolve_element(selector).await?;
        let script = format!(
            r#"
            (function() {{
                const element = document.querySelector({sel});
                if (!element) return false;
                element.scrollIntoView({{ block: 'center' }});
                const rect = element.getBoundingClientRect();
                const options = {{
                    bubbles: true,
                    cancelable: true,
                    clientX: rect.left + rect.width / 2,
                    clientY: rect.top + rect.height / 2,
                }};
                element.dispatchEvent(new MouseEvent('mousedown', options));
                element.dispatchEvent(new MouseEvent('mouseup', options));
                element.dispatchEvent(new MouseEvent('click', options));
                element.dispatchEvent(new MouseEvent('mousedown', options));
                element.dispatchEvent(new MouseEvent('mouseup', options));
                element.dispatchEvent(new MouseEvent('click', options));
                element.dispatchEvent(new MouseEvent('dblclick', {{ ...options, detail: 2 }}));
                return true;
            }})()
            "#,
            sel = js_string(selector)?
        );
        self.run_gesture(&script, selector).await?;
        self.stats.track(StatsAction::MouseLmbDoubleClick);
        Ok(())
    }

    /// Sends keys to the element behind `selector`.
    pub async fn send_keys(&self, selector: &str, text: &str) -> Result<()> {
        debug!(selector, text, "Sending keys");
        self.resolve_element(selector).await?;
        let script = format!(
            r#"
            (function() {{
                const element = document.querySelector({sel});
                if (!element) return false;
                element.focus();
                const text = {text};
                if (element.tagName === 'INPUT' || element.tagName === 'TEXTAREA') {{
                    element.value += text;
                }} else if (element.isContentEditable) {{
                    element.textContent += text;
                }}
                element.dispatchEvent(new Event('input', {{ bubbles: true }}));
                element.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return true;
            }})()
            "#,
            sel = js_string(selector)?,
            text = js_string(text)?
        );
        self.run_gesture(&script, selector).await?;
        self.stats.track(StatsAction::KeyboardType);
        Ok(())
    }

    /// Sends keys to whatever element currently has focus.
    pub async fn send_keys_active(&self, text: &str) -> Result<()> {
        debug!(text, "Sending keys to active element");
        let script = format!(
            r#"
            (function() {{
                const element = document.activeElement;
                if (!element) return false;
                const text = {text};
                if (element.tagName === 'INPUT' || element.tagName === 'TEXTAREA') {{
                    element.value += text;
                }} else if (element.isContentEditable) {{
                    element.textContent += text;
                }}
                element.dispatchEvent(new Event('input', {{ bubbles: true }}));
                element.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return true;
            }})()
            "#,
            text = js_string(text)?
        );
        self.run_gesture(&script, "document.activeElement").await?;
        self.stats.track(StatsAction::KeyboardType);
        Ok(())
    }

    pub async fn scroll_into_view(&self, selector: &str) -> Result<()> {
        debug!(selector, "Scrolling element into view");
        self.resolve_element(selector).await?;
        let script = format!(
            r#"
            (function() {{
                const element = document.querySelector({sel});
                if (!element) return false;
                element.scrollIntoView(true);
                return true;
            }})()
            "#,
            sel = js_string(selector)?
        );
        self.run_gesture(&script, selector).await
    }

    pub async fn move_to_element(&self, selector: &str) -> Result<()> {
        debug!(selector, "Moving to element");
        self.resolve_element(selector).await?;
        self.hover(selector).await
    }

    /// Drags an element by an offset from its current position.
    pub async fn drag_element(&self, selector: &str, x_offset: i32, y_offset: i32) -> Result<()> {
        debug!(selector, x_offset, y_offset, "Dragging element");
        self.resolve_element(selector).await?;
        let script = format!(
            r#"
            (function() {{
                const element = document.querySelector({sel});
                if (!element) return false;
                const rect = element.getBoundingClientRect();
                const startX = rect.left + rect.width / 2;
                const startY = rect.top + rect.height / 2;
                const endX = startX + {dx};
                const endY = startY + {dy};
                const fire = (type, x, y) => element.dispatchEvent(new MouseEvent(type, {{
                    bubbles: true,
                    cancelable: true,
                    clientX: x,
                    clientY: y,
                }}));
                fire('mousedown', startX, startY);
                fire('mousemove', endX, endY);
                fire('mouseup', endX, endY);
                return true;
            }})()
            "#,
            sel = js_string(selector)?,
            dx = x_offset,
            dy = y_offset
        );
        self.run_gesture(&script, selector).await
    }

    /// Drags a source element and drops it onto a target element.
    pub async fn drag_and_drop(&self, source: &str, target: &str) -> Result<()> {
        debug!(source, target, "Dragging element onto target");
        self.resolve_element(source).await?;
        self.resolve_element(target).await?;
        let script = format!(
            r#"
            (function() {{
                const source = document.querySelector({src});
                const target = document.querySelector({tgt});
                if (!source || !target) return false;
                const from = source.getBoundingClientRect();
                const to = target.getBoundingClientRect();
                const fire = (node, type, x, y) => node.dispatchEvent(new MouseEvent(type, {{
                    bubbles: true,
                    cancelable: true,
                    clientX: x,
                    clientY: y,
                }}));
                fire(source, 'mousedown', from.left + from.width / 2, from.top + from.height / 2);
                fire(target, 'mousemove', to.left + to.width / 2, to.top + to.height / 2);
                fire(target, 'mouseup', to.left + to.width / 2, to.top + to.height / 2);
                return true;
            }})()
            "#,
            src = js_string(source)?,
            tgt = js_string(target)?
        );
        self.run_gesture(&script, source).await
    }

    pub async fn focus_element(&self, selector: &str) -> Result<()> {
        debug!(selector, "Focusing element");
        self.resolve_element(selector).await?;
        let script = format!(
            r#"
            (function() {{
                const element = document.querySelector({sel});
                if (!element) return false;
                element.focus();
                return true;
            }})()
            "#,
            sel = js_string(selector)?
        );
        self.run_gesture(&script, selector).await
    }

    // -- waits --------------------------------------------------------------

    /// Sets the element-lookup timeout applied before each gesture.
    pub fn implicitly_wait(&self, duration: Duration) {
        debug!(?duration, "Setting implicit wait");
        self.implicit_wait_ms
            .store(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Waits until the element is present in the DOM.
    pub async fn wait_until_present(&self, selector: &str) -> Result<()> {
        let condition = format!(
            "document.querySelector({sel}) !== null",
            sel = js_string(selector)?
        );
        self.wait_for(&condition, &format!("element present: {}", selector))
            .await
    }

    /// Waits until the element is present and visible.
    pub async fn wait_until_visible(&self, selector: &str) -> Result<()> {
        let condition = visibility_condition(selector, true)?;
        self.wait_for(&condition, &format!("element visible: {}", selector))
            .await
    }

    /// Waits until the element is absent or hidden.
    pub async fn wait_until_invisible(&self, selector: &str) -> Result<()> {
        let condition = visibility_condition(selector, false)?;
        self.wait_for(&condition, &format!("element invisible: {}", selector))
            .await
    }

    /// Waits until the element is visible and not disabled.
    pub async fn wait_until_clickable(&self, selector: &str) -> Result<()> {
        let condition = format!(
            r#"
            (function() {{
                const element = document.querySelector({sel});
                if (!element) return false;
                const rect = element.getBoundingClientRect();
                const style = window.getComputedStyle(element);
                return rect.width > 0 && rect.height > 0
                    && style.visibility !== 'hidden'
                    && style.display !== 'none'
                    && !element.disabled;
            }})()
            "#,
            sel = js_string(selector)?
        );
        self.wait_for(&condition, &format!("element clickable: {}", selector))
            .await
    }

    /// Waits until the document has finished loading.
    pub async fn wait_for_page_loaded(&self) -> Result<()> {
        self.wait_for("document.readyState === 'complete'", "page loaded")
            .await
    }

    // -- element inspection -------------------------------------------------

    /// Structured snapshot of the element behind `selector`.
    pub async fn element_info(&self, selector: &str) -> Result<ElementInfo> {
        debug!(selector, "Retrieving element info");
        let script = element_info_script(selector, false)?;
        let result = self.driver.execute_script(&self.tab, &script).await?;
        parse_element_info(result, selector)
    }

    /// Structured snapshot of the parent of the element behind `selector`.
    pub async fn parent_of(&self, selector: &str) -> Result<ElementInfo> {
        debug!(selector, "Retrieving parent element info");
        let script = element_info_script(selector, true)?;
        let result = self.driver.execute_script(&self.tab, &script).await?;
        parse_element_info(result, selector)
    }

    /// Short human label for the element: its text, else its tag.
    pub async fn describe_element(&self, selector: &str) -> Result<String> {
        let script = format!(
            r#"
            (function() {{
                const element = document.querySelector({sel});
                return element ? element.outerHTML : null;
            }})()
            "#,
            sel = js_string(selector)?
        );
        let result = self.driver.execute_script(&self.tab, &script).await?;
        match result.as_str() {
            Some(html) => Ok(text_or_tag(html)),
            None => Err(AutomationError::ElementNotFound(selector.to_string())),
        }
    }

    pub async fn close(&mut self) -> Result<()> {
        debug!(session_id = %self.session_id, "Closing navigator session");
        self.driver.close().await
    }

    // -- internals ----------------------------------------------------------

    /// Checks element presence, honoring the implicit wait window.
    async fn resolve_element(&self, selector: &str) -> Result<()> {
        let condition = format!(
            "document.querySelector({sel}) !== null",
            sel = js_string(selector)?
        );
        let implicit_ms = self.implicit_wait_ms.load(Ordering::Relaxed);

        let found = if implicit_ms == 0 {
            let result = self.driver.execute_script(&self.tab, &condition).await?;
            result.as_bool() == Some(true)
        } else {
            JavaScriptRunner::wait_for_condition(
                &self.driver,
                &self.tab,
                &condition,
                implicit_ms,
                self.config.waits.poll_interval_ms,
            )
            .await?
        };

        if found {
            Ok(())
        } else {
            Err(AutomationError::ElementNotFound(selector.to_string()))
        }
    }

    async fn run_gesture(&self, script: &str, selector: &str) -> Result<()> {
        let result = self.driver.execute_script(&self.tab, script).await?;
        if result.as_bool() == Some(true) {
            Ok(())
        } else {
            Err(AutomationError::ElementNotFound(selector.to_string()))
        }
    }

    async fn hover(&self, selector: &str) -> Result<()> {
        let script = format!(
            r#"
            (function() {{
                const element = document.querySelector({sel});
                if (!element) return false;
                const rect = element.getBoundingClientRect();
                const options = {{
                    bubbles: true,
                    cancelable: true,
                    clientX: rect.left + rect.width / 2,
                    clientY: rect.top + rect.height / 2,
                }};
                element.dispatchEvent(new MouseEvent('mouseover', options));
                element.dispatchEvent(new MouseEvent('mouseenter', options));
                element.dispatchEvent(new MouseEvent('mousemove', options));
                return true;
            }})()
            "#,
            sel = js_string(selector)?
        );
        self.run_gesture(&script, selector).await
    }

    /// Polls a condition and reports a completed wait to the stats registry.
    /// A timed-out wait is an error and is not counted.
    async fn wait_for(&self, condition: &str, description: &str) -> Result<()> {
        debug!(condition = description, "Explicitly waiting");
        let met = JavaScriptRunner::wait_for_condition(
            &self.driver,
            &self.tab,
            condition,
            self.config.waits.explicit_timeout_ms,
            self.config.waits.poll_interval_ms,
        )
        .await?;

        if met {
            self.stats.track(StatsAction::Wait);
            Ok(())
        } else {
            Err(AutomationError::WaitTimeout {
                condition: description.to_string(),
                timeout_ms: self.config.waits.explicit_timeout_ms,
            })
        }
    }
}

fn js_string(value: &str) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

fn visibility_condition(selector: &str, expect_visible: bool) -> Result<String> {
    let visible = format!(
        r#"
        (function() {{
            const element = document.querySelector({sel});
            if (!element) return false;
            const rect = element.getBoundingClientRect();
            const style = window.getComputedStyle(element);
            return rect.width > 0 && rect.height > 0
                && style.visibility !== 'hidden'
                && style.display !== 'none';
        }})()
        "#,
        sel = js_string(selector)?
    );
    if expect_visible {
        Ok(visible)
    } else {
        Ok(format!("!{}", visible.trim()))
    }
}

fn element_info_script(selector: &str, parent: bool) -> Result<String> {
    let accessor = if parent { "found.parentElement" } else { "found" };
    Ok(format!(
        r#"
        (function() {{
            const found = document.querySelector({sel});
            if (!found) return null;
            const element = {accessor};
            if (!element) return null;
            const rect = element.getBoundingClientRect();
            const attributes = {{}};
            for (const attr of element.attributes) {{
                attributes[attr.name] = attr.value;
            }}
            const text = element.textContent ? element.textContent.trim() : '';
            return {{
                tag_name: element.tagName.toLowerCase(),
                element_id: element.id || null,
                class_name: element.getAttribute('class') || null,
                text_content: text || null,
                attributes: attributes,
                rect: {{ x: rect.x, y: rect.y, width: rect.width, height: rect.height }},
            }};
        }})()
        "#,
        sel = js_string(selector)?,
        accessor = accessor
    ))
}

fn parse_element_info(result: Value, selector: &str) -> Result<ElementInfo> {
    if result.is_null() {
        return Err(AutomationError::ElementNotFound(selector.to_string()));
    }
    Ok(serde_json::from_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::WaitConfig;
    use crate::testing::MockDriver;

    fn test_config() -> Config {
        Config {
            waits: WaitConfig {
                explicit_timeout_ms: 50,
                poll_interval_ms: 5,
                implicit_wait_ms: 0,
            },
            ..Config::default()
        }
    }

    fn enabled_registry() -> Arc<StatsRegistry> {
        let registry = StatsRegistry::with_default_plugins();
        registry.enable_all();
        Arc::new(registry)
    }

    async fn test_navigator(driver: MockDriver) -> Navigator<MockDriver> {
        Navigator::new(driver, test_config(), enabled_registry())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn click_tracks_a_click() {
        let driver = MockDriver::new();
        let navigator = test_navigator(driver).await;

        navigator.click("#submit").await.unwrap();

        let clicks = navigator.stats().get("clicks").unwrap();
        assert_eq!(clicks.represent(), "Times clicked: 1");
    }

    #[tokio::test]
    async fn click_on_missing_element_fails_without_counting() {
        let driver = MockDriver::new();
        driver.queue_response(Value::Bool(false)); // presence check
        let navigator = test_navigator(driver).await;

        let err = navigator.click("#ghost").await.unwrap_err();
        assert!(matches!(err, AutomationError::ElementNotFound(_)));

        let clicks = navigator.stats().get("clicks").unwrap();
        assert_eq!(clicks.represent(), "Times clicked: 0");
    }

    #[tokio::test]
    async fn send_keys_tracks_keyboard_type() {
        let driver = MockDriver::new();
        let navigator = test_navigator(driver).await;

        navigator.send_keys("input[name='q']", "hello").await.unwrap();
        navigator.send_keys_active(" world").await.unwrap();

        let keys = navigator.stats().get("keys").unwrap();
        assert_eq!(keys.represent(), "Keys sent: 2");
    }

    #[tokio::test]
    async fn double_click_tracks_double_click_only() {
        let driver = MockDriver::new();
        let navigator = test_navigator(driver).await;

        navigator.double_click("#item").await.unwrap();

        assert_eq!(
            navigator.stats().get("clicks").unwrap().represent(),
            "Times clicked: 0"
        );
    }

    #[tokio::test]
    async fn completed_wait_is_counted() {
        let driver = MockDriver::new();
        let navigator = test_navigator(driver).await;

        navigator.wait_until_present("#banner").await.unwrap();
        navigator.wait_for_page_loaded().await.unwrap();

        let waits = navigator.stats().get("waits").unwrap();
        assert_eq!(waits.represent(), "Times waited: 2");
    }

    #[tokio::test]
    async fn expired_wait_errors_and_is_not_counted() {
        let driver = MockDriver::with_default_response(Value::Bool(false));
        let navigator = test_navigator(driver).await;

        let err = navigator.wait_until_visible("#spinner").await.unwrap_err();
        assert!(matches!(err, AutomationError::WaitTimeout { .. }));

        let waits = navigator.stats().get("waits").unwrap();
        assert_eq!(waits.represent(), "Times waited: 0");
    }

    #[tokio::test]
    async fn implicit_wait_retries_lookup() {
        let driver = MockDriver::new();
        // absent on the first two probes, present on the third
        driver.queue_response(Value::Bool(false));
        driver.queue_response(Value::Bool(false));
        let navigator = test_navigator(driver).await;
        navigator.implicitly_wait(Duration::from_millis(200));

        navigator.click("#late").await.unwrap();

        let clicks = navigator.stats().get("clicks").unwrap();
        assert_eq!(clicks.represent(), "Times clicked: 1");
    }

    #[tokio::test]
    async fn navigate_to_path_requires_environment() {
        let driver = MockDriver::new();
        let handle = driver.clone();
        let mut navigator = test_navigator(driver).await;

        let err = navigator.navigate_to_path("login").await.unwrap_err();
        assert!(matches!(err, AutomationError::NoEnvironment));

        navigator.set_environment(Environment::new(
            "staging",
            Url::parse("https://staging.example.com/").unwrap(),
        ));
        navigator.navigate_to_path("login").await.unwrap();

        assert_eq!(
            handle.navigations(),
            vec!["https://staging.example.com/login".to_string()]
        );
    }

    #[tokio::test]
    async fn describe_element_prefers_text() {
        let driver = MockDriver::new();
        driver.queue_response(Value::String(
            "<button class=\"cta\">Sign in</button>".to_string(),
        ));
        let navigator = test_navigator(driver).await;

        let label = navigator.describe_element("button.cta").await.unwrap();
        assert_eq!(label, "Sign in");
    }

    #[tokio::test]
    async fn element_info_is_deserialized() {
        let driver = MockDriver::new();
        driver.queue_response(serde_json::json!({
            "tag_name": "a",
            "element_id": "home",
            "class_name": "nav-link",
            "text_content": "Home",
            "attributes": { "href": "/" },
            "rect": { "x": 0.0, "y": 10.0, "width": 40.0, "height": 16.0 },
        }));
        let navigator = test_navigator(driver).await;

        let info = navigator.element_info("a#home").await.unwrap();
        assert_eq!(info.tag_name, "a");
        assert_eq!(info.element_id.as_deref(), Some("home"));
        assert_eq!(info.attributes.get("href").map(String::as_str), Some("/"));
    }
}
