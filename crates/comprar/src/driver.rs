//! Abstract browser-automation seam.
//!
//! The suite drives the browser through the [`Driver`] trait so the page
//! objects and the wait primitive never touch CDP directly. The default
//! implementation is the chromiumoxide-backed session in [`crate::browser`]
//! (feature `browser`); [`MockDriver`] provides a scriptable in-memory
//! document for unit tests.

use std::collections::BTreeMap;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::locator::Selector;
use crate::result::{ComprarError, ComprarResult};

/// Point-in-time view of a DOM element.
///
/// A snapshot is only meaningful for the document it was read from; it is
/// never carried across navigations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementSnapshot {
    /// Lowercase tag name
    pub tag_name: String,
    /// Normalized visible text content
    pub text: String,
    /// Whether the element is rendered
    pub displayed: bool,
    /// Whether the element accepts input
    pub enabled: bool,
    /// Attribute map
    pub attributes: BTreeMap<String, String>,
}

impl ElementSnapshot {
    /// Create a visible, enabled snapshot with no text
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            text: String::new(),
            displayed: true,
            enabled: true,
            attributes: BTreeMap::new(),
        }
    }

    /// Set the text content
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the displayed flag
    #[must_use]
    pub const fn with_displayed(mut self, displayed: bool) -> Self {
        self.displayed = displayed;
        self
    }

    /// Set the enabled flag
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Add an attribute
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attributes.insert(name.into(), value.into());
        self
    }

    /// Look up an attribute value
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// A native dialog (alert/confirm) currently open on the page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertInfo {
    /// Message shown in the dialog
    pub message: String,
}

impl AlertInfo {
    /// Create alert info
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Browser-automation primitives the suite is built on.
///
/// Acting operations (`click`, `type_text`, ...) fail when the target is
/// missing; existence and readiness checks belong to the wait layer, which
/// polls [`Driver::find`].
#[async_trait]
pub trait Driver: Send + Sync {
    /// Navigate to a URL
    async fn navigate(&self, url: &str) -> ComprarResult<()>;

    /// Current page URL
    async fn current_url(&self) -> ComprarResult<String>;

    /// Current page title
    async fn title(&self) -> ComprarResult<String>;

    /// Serialized DOM of the current document
    async fn page_source(&self) -> ComprarResult<String>;

    /// Resolve a selector to the first matching element, if any
    async fn find(&self, selector: &Selector) -> ComprarResult<Option<ElementSnapshot>>;

    /// Resolve a selector to all matching elements
    async fn find_all(&self, selector: &Selector) -> ComprarResult<Vec<ElementSnapshot>>;

    /// Click the first element matching the selector
    async fn click(&self, selector: &Selector) -> ComprarResult<()>;

    /// Type text into the first element matching the selector
    async fn type_text(&self, selector: &Selector, text: &str) -> ComprarResult<()>;

    /// Clear the value of the first element matching the selector
    async fn clear(&self, selector: &Selector) -> ComprarResult<()>;

    /// Select the dropdown option whose display text matches exactly
    async fn select_by_visible_text(&self, selector: &Selector, text: &str) -> ComprarResult<()>;

    /// Attach a local file to a file input
    async fn set_file_input(&self, selector: &Selector, path: &Path) -> ComprarResult<()>;

    /// Capture a PNG of the full window
    async fn screenshot(&self) -> ComprarResult<Vec<u8>>;

    /// The currently open native dialog, if any
    async fn active_alert(&self) -> ComprarResult<Option<AlertInfo>>;

    /// Accept the open dialog
    async fn accept_alert(&self) -> ComprarResult<()>;

    /// Dismiss the open dialog
    async fn dismiss_alert(&self) -> ComprarResult<()>;

    /// Shut the browser session down
    async fn close(&self) -> ComprarResult<()>;
}

/// Scriptable in-memory driver for unit tests.
///
/// Elements are registered against the raw selector string they should
/// resolve from; everything else is recorded so tests can assert on the
/// interaction history.
#[derive(Debug, Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
}

#[derive(Debug, Default)]
struct MockState {
    current_url: String,
    title: String,
    page_source: String,
    elements: Vec<(String, ElementSnapshot)>,
    alerts: VecDeque<AlertInfo>,
    screenshot: Option<Vec<u8>>,
    call_history: Vec<String>,
    typed: Vec<(String, String)>,
    selected: Vec<(String, String)>,
}

impl MockDriver {
    /// Create an empty mock document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element under the raw selector string that resolves it
    pub fn install(&self, raw_selector: &str, snapshot: ElementSnapshot) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state
            .elements
            .push((raw_selector.to_string(), snapshot));
    }

    /// Remove every element registered under the raw selector string
    pub fn remove(&self, raw_selector: &str) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.elements.retain(|(key, _)| key != raw_selector);
    }

    /// Queue a native dialog
    pub fn enqueue_alert(&self, message: &str) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.alerts.push_back(AlertInfo::new(message));
    }

    /// Set the screenshot bytes returned by `screenshot`
    pub fn set_screenshot(&self, data: Vec<u8>) {
        self.state.lock().expect("mock state poisoned").screenshot = Some(data);
    }

    /// Set the serialized DOM returned by `page_source`
    pub fn set_page_source(&self, html: &str) {
        self.state.lock().expect("mock state poisoned").page_source = html.to_string();
    }

    /// Set the page title
    pub fn set_title(&self, title: &str) {
        self.state.lock().expect("mock state poisoned").title = title.to_string();
    }

    /// Set the current URL without recording a navigation
    pub fn set_current_url(&self, url: &str) {
        self.state.lock().expect("mock state poisoned").current_url = url.to_string();
    }

    /// Recorded calls, in order
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.state
            .lock()
            .expect("mock state poisoned")
            .call_history
            .clone()
    }

    /// Whether a call with the given prefix was recorded
    #[must_use]
    pub fn was_called(&self, prefix: &str) -> bool {
        self.state
            .lock()
            .expect("mock state poisoned")
            .call_history
            .iter()
            .any(|c| c.starts_with(prefix))
    }

    /// Concatenated text typed into the element behind the raw selector
    #[must_use]
    pub fn typed_into(&self, raw_selector: &str) -> Option<String> {
        let state = self.state.lock().expect("mock state poisoned");
        let joined: String = state
            .typed
            .iter()
            .filter(|(key, _)| key == raw_selector)
            .map(|(_, text)| text.as_str())
            .collect();
        if joined.is_empty() {
            None
        } else {
            Some(joined)
        }
    }

    /// The option text selected in the dropdown behind the raw selector
    #[must_use]
    pub fn selected_in(&self, raw_selector: &str) -> Option<String> {
        let state = self.state.lock().expect("mock state poisoned");
        state
            .selected
            .iter()
            .rev()
            .find(|(key, _)| key == raw_selector)
            .map(|(_, text)| text.clone())
    }

    fn lookup(&self, selector: &Selector) -> Option<ElementSnapshot> {
        let state = self.state.lock().expect("mock state poisoned");
        state
            .elements
            .iter()
            .find(|(key, _)| key == selector.raw())
            .map(|(_, snapshot)| snapshot.clone())
    }

    fn record(&self, call: String) {
        self.state
            .lock()
            .expect("mock state poisoned")
            .call_history
            .push(call);
    }

    fn missing(selector: &Selector) -> ComprarError {
        ComprarError::PageError {
            message: format!("no element matches {selector}"),
        }
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn navigate(&self, url: &str) -> ComprarResult<()> {
        self.record(format!("navigate:{url}"));
        self.state.lock().expect("mock state poisoned").current_url = url.to_string();
        Ok(())
    }

    async fn current_url(&self) -> ComprarResult<String> {
        Ok(self
            .state
            .lock()
            .expect("mock state poisoned")
            .current_url
            .clone())
    }

    async fn title(&self) -> ComprarResult<String> {
        Ok(self.state.lock().expect("mock state poisoned").title.clone())
    }

    async fn page_source(&self) -> ComprarResult<String> {
        Ok(self
            .state
            .lock()
            .expect("mock state poisoned")
            .page_source
            .clone())
    }

    async fn find(&self, selector: &Selector) -> ComprarResult<Option<ElementSnapshot>> {
        Ok(self.lookup(selector))
    }

    async fn find_all(&self, selector: &Selector) -> ComprarResult<Vec<ElementSnapshot>> {
        let state = self.state.lock().expect("mock state poisoned");
        Ok(state
            .elements
            .iter()
            .filter(|(key, _)| key == selector.raw())
            .map(|(_, snapshot)| snapshot.clone())
            .collect())
    }

    async fn click(&self, selector: &Selector) -> ComprarResult<()> {
        if self.lookup(selector).is_none() {
            return Err(Self::missing(selector));
        }
        self.record(format!("click:{}", selector.raw()));
        Ok(())
    }

    async fn type_text(&self, selector: &Selector, text: &str) -> ComprarResult<()> {
        if self.lookup(selector).is_none() {
            return Err(Self::missing(selector));
        }
        self.record(format!("type:{}", selector.raw()));
        let mut state = self.state.lock().expect("mock state poisoned");
        state
            .typed
            .push((selector.raw().to_string(), text.to_string()));
        Ok(())
    }

    async fn clear(&self, selector: &Selector) -> ComprarResult<()> {
        if self.lookup(selector).is_none() {
            return Err(Self::missing(selector));
        }
        self.record(format!("clear:{}", selector.raw()));
        let mut state = self.state.lock().expect("mock state poisoned");
        state.typed.retain(|(key, _)| key != selector.raw());
        Ok(())
    }

    async fn select_by_visible_text(&self, selector: &Selector, text: &str) -> ComprarResult<()> {
        if self.lookup(selector).is_none() {
            return Err(Self::missing(selector));
        }
        self.record(format!("select:{}", selector.raw()));
        let mut state = self.state.lock().expect("mock state poisoned");
        state
            .selected
            .push((selector.raw().to_string(), text.to_string()));
        Ok(())
    }

    async fn set_file_input(&self, selector: &Selector, path: &Path) -> ComprarResult<()> {
        if self.lookup(selector).is_none() {
            return Err(Self::missing(selector));
        }
        self.record(format!("upload:{}:{}", selector.raw(), path.display()));
        Ok(())
    }

    async fn screenshot(&self) -> ComprarResult<Vec<u8>> {
        self.record("screenshot".to_string());
        self.state
            .lock()
            .expect("mock state poisoned")
            .screenshot
            .clone()
            .ok_or_else(|| ComprarError::ScreenshotError {
                message: "no mock screenshot set".to_string(),
            })
    }

    async fn active_alert(&self) -> ComprarResult<Option<AlertInfo>> {
        Ok(self
            .state
            .lock()
            .expect("mock state poisoned")
            .alerts
            .front()
            .cloned())
    }

    async fn accept_alert(&self) -> ComprarResult<()> {
        let mut state = self.state.lock().expect("mock state poisoned");
        if state.alerts.pop_front().is_none() {
            return Err(ComprarError::PageError {
                message: "no alert open".to_string(),
            });
        }
        state.call_history.push("accept_alert".to_string());
        Ok(())
    }

    async fn dismiss_alert(&self) -> ComprarResult<()> {
        let mut state = self.state.lock().expect("mock state poisoned");
        if state.alerts.pop_front().is_none() {
            return Err(ComprarError::PageError {
                message: "no alert open".to_string(),
            });
        }
        state.call_history.push("dismiss_alert".to_string());
        Ok(())
    }

    async fn close(&self) -> ComprarResult<()> {
        self.record("close".to_string());
        Ok(())
    }
}
