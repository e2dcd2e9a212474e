//! Real browser control over the Chrome `DevTools` Protocol.
//!
//! [`Session`] owns one chromiumoxide browser plus the event-handler task
//! behind it and implements [`Driver`] for the rest of the suite. One test
//! owns one session: acquire it in setup, call [`Session::close`] in
//! teardown, and the drop guard tears the handler down even when the test
//! body panics.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;

use async_trait::async_trait;
use base64::Engine;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::cdp::browser_protocol::dom::SetFileInputFilesParams;
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, CaptureScreenshotParams, EventJavascriptDialogOpening,
    HandleJavaScriptDialogParams,
};
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use tokio::sync::Mutex;

use crate::driver::{AlertInfo, Driver, ElementSnapshot};
use crate::locator::Selector;
use crate::result::{ComprarError, ComprarResult};

/// Browser configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = `CHROMIUM_PATH` env, then auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1920,
            viewport_height: 1080,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl BrowserConfig {
    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }

    fn executable(&self) -> Option<String> {
        self.chromium_path
            .clone()
            .or_else(|| std::env::var("CHROMIUM_PATH").ok())
    }
}

/// One live browser session, exclusively owned by one test
#[derive(Debug)]
pub struct Session {
    config: BrowserConfig,
    browser: Arc<Mutex<CdpBrowser>>,
    page: Arc<Mutex<CdpPage>>,
    dialogs: Arc<StdMutex<VecDeque<AlertInfo>>>,
    handler_task: tokio::task::JoinHandle<()>,
    dialog_task: tokio::task::JoinHandle<()>,
}

impl Session {
    /// Launch a browser and open a blank page
    pub async fn launch(config: BrowserConfig) -> ComprarResult<Self> {
        let mut builder = CdpConfig::builder();

        if !config.headless {
            builder = builder.with_head();
        }
        if !config.sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(path) = config.executable() {
            builder = builder.chrome_executable(path);
        }
        builder = builder.window_size(config.viewport_width, config.viewport_height);

        let cdp_config = builder
            .build()
            .map_err(|e| ComprarError::BrowserLaunchError { message: e })?;

        let (browser, mut handler) =
            CdpBrowser::launch(cdp_config)
                .await
                .map_err(|e| ComprarError::BrowserLaunchError {
                    message: e.to_string(),
                })?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ComprarError::PageError {
                message: e.to_string(),
            })?;

        // Native dialogs block script evaluation, so they are collected
        // from the event stream instead of polled out of the page.
        let dialogs: Arc<StdMutex<VecDeque<AlertInfo>>> =
            Arc::new(StdMutex::new(VecDeque::new()));
        let mut dialog_events = page
            .event_listener::<EventJavascriptDialogOpening>()
            .await
            .map_err(|e| ComprarError::PageError {
                message: e.to_string(),
            })?;
        let dialog_queue = Arc::clone(&dialogs);
        let dialog_task = tokio::spawn(async move {
            while let Some(event) = dialog_events.next().await {
                tracing::debug!(message = %event.message, "dialog opened");
                if let Ok(mut queue) = dialog_queue.lock() {
                    queue.push_back(AlertInfo::new(event.message.clone()));
                }
            }
        });

        Ok(Self {
            config,
            browser: Arc::new(Mutex::new(browser)),
            page: Arc::new(Mutex::new(page)),
            dialogs,
            handler_task,
            dialog_task,
        })
    }

    /// The configuration the session was launched with
    #[must_use]
    pub const fn config(&self) -> &BrowserConfig {
        &self.config
    }

    async fn eval<T: serde::de::DeserializeOwned>(&self, expr: String) -> ComprarResult<T> {
        let page = self.page.lock().await;
        let result = page
            .evaluate(expr)
            .await
            .map_err(|e| ComprarError::PageError {
                message: e.to_string(),
            })?;
        result.into_value().map_err(|e| ComprarError::PageError {
            message: e.to_string(),
        })
    }

    fn snapshot_fields() -> &'static str {
        "const style = window.getComputedStyle(el); \
         const rect = el.getBoundingClientRect(); \
         const attributes = {}; \
         for (const attr of el.attributes) attributes[attr.name] = attr.value; \
         return { \
           tag_name: el.tagName.toLowerCase(), \
           text: (el.innerText || el.textContent || '').trim(), \
           displayed: style.display !== 'none' && style.visibility !== 'hidden' \
             && rect.width > 0 && rect.height > 0, \
           enabled: !el.disabled, \
           attributes \
         };"
    }

    async fn handle_dialog(&self, accept: bool) -> ComprarResult<()> {
        {
            let mut queue = self.dialogs.lock().map_err(|_| ComprarError::PageError {
                message: "dialog queue poisoned".to_string(),
            })?;
            if queue.pop_front().is_none() {
                return Err(ComprarError::PageError {
                    message: "no alert open".to_string(),
                });
            }
        }
        let params = HandleJavaScriptDialogParams::builder()
            .accept(accept)
            .build()
            .map_err(|e| ComprarError::PageError { message: e })?;
        let page = self.page.lock().await;
        page.execute(params)
            .await
            .map_err(|e| ComprarError::PageError {
                message: e.to_string(),
            })?;
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.dialog_task.abort();
        self.handler_task.abort();
    }
}

#[async_trait]
impl Driver for Session {
    async fn navigate(&self, url: &str) -> ComprarResult<()> {
        let page = self.page.lock().await;
        page.goto(url)
            .await
            .map_err(|e| ComprarError::NavigationError {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn current_url(&self) -> ComprarResult<String> {
        let page = self.page.lock().await;
        let url = page.url().await.map_err(|e| ComprarError::PageError {
            message: e.to_string(),
        })?;
        Ok(url.unwrap_or_default())
    }

    async fn title(&self) -> ComprarResult<String> {
        let page = self.page.lock().await;
        let title = page.get_title().await.map_err(|e| ComprarError::PageError {
            message: e.to_string(),
        })?;
        Ok(title.unwrap_or_default())
    }

    async fn page_source(&self) -> ComprarResult<String> {
        self.eval("document.documentElement.outerHTML".to_string())
            .await
    }

    async fn find(&self, selector: &Selector) -> ComprarResult<Option<ElementSnapshot>> {
        let script = format!(
            "(function() {{ const el = {}; if (!el) return null; {} }})()",
            selector.to_js_query(),
            Self::snapshot_fields()
        );
        self.eval(script).await
    }

    async fn find_all(&self, selector: &Selector) -> ComprarResult<Vec<ElementSnapshot>> {
        let script = format!(
            "{}.map(el => (function() {{ {} }})())",
            selector.to_js_query_all(),
            Self::snapshot_fields()
        );
        self.eval(script).await
    }

    async fn click(&self, selector: &Selector) -> ComprarResult<()> {
        let script = format!(
            "(function() {{ const el = {}; if (!el) return false; \
             el.scrollIntoView({{block: 'center'}}); el.click(); return true; }})()",
            selector.to_js_query()
        );
        if self.eval::<bool>(script).await? {
            Ok(())
        } else {
            Err(ComprarError::PageError {
                message: format!("no element matches {selector}"),
            })
        }
    }

    async fn type_text(&self, selector: &Selector, text: &str) -> ComprarResult<()> {
        let literal = serde_json::to_string(text)?;
        let script = format!(
            "(function() {{ const el = {}; if (!el) return false; \
             el.focus(); el.value = (el.value || '') + {literal}; \
             el.dispatchEvent(new Event('input', {{bubbles: true}})); \
             el.dispatchEvent(new Event('change', {{bubbles: true}})); \
             return true; }})()",
            selector.to_js_query()
        );
        if self.eval::<bool>(script).await? {
            Ok(())
        } else {
            Err(ComprarError::InputError {
                target: selector.to_string(),
                message: "no element to type into".to_string(),
            })
        }
    }

    async fn clear(&self, selector: &Selector) -> ComprarResult<()> {
        let script = format!(
            "(function() {{ const el = {}; if (!el) return false; \
             el.value = ''; \
             el.dispatchEvent(new Event('input', {{bubbles: true}})); \
             el.dispatchEvent(new Event('change', {{bubbles: true}})); \
             return true; }})()",
            selector.to_js_query()
        );
        if self.eval::<bool>(script).await? {
            Ok(())
        } else {
            Err(ComprarError::InputError {
                target: selector.to_string(),
                message: "no element to clear".to_string(),
            })
        }
    }

    async fn select_by_visible_text(&self, selector: &Selector, text: &str) -> ComprarResult<()> {
        let literal = serde_json::to_string(text)?;
        let script = format!(
            "(function() {{ const el = {}; if (!el) return 'missing'; \
             const option = Array.from(el.options || []) \
               .find(o => o.textContent.trim() === {literal}); \
             if (!option) return 'no-option'; \
             el.value = option.value; \
             el.dispatchEvent(new Event('change', {{bubbles: true}})); \
             return 'ok'; }})()",
            selector.to_js_query()
        );
        match self.eval::<String>(script).await?.as_str() {
            "ok" => Ok(()),
            "missing" => Err(ComprarError::PageError {
                message: format!("no element matches {selector}"),
            }),
            _ => Err(ComprarError::InputError {
                target: selector.to_string(),
                message: format!("no option with display text {text:?}"),
            }),
        }
    }

    async fn set_file_input(&self, selector: &Selector, path: &Path) -> ComprarResult<()> {
        let Some(css) = selector.as_css() else {
            return Err(ComprarError::InputError {
                target: selector.to_string(),
                message: "file upload needs a CSS-addressable locator".to_string(),
            });
        };
        let page = self.page.lock().await;
        let element = page
            .find_element(css)
            .await
            .map_err(|e| ComprarError::PageError {
                message: e.to_string(),
            })?;
        let params = SetFileInputFilesParams::builder()
            .files(vec![path.display().to_string()])
            .backend_node_id(element.backend_node_id)
            .build()
            .map_err(|e| ComprarError::InputError {
                target: selector.to_string(),
                message: e,
            })?;
        page.execute(params)
            .await
            .map_err(|e| ComprarError::InputError {
                target: selector.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn screenshot(&self) -> ComprarResult<Vec<u8>> {
        let page = self.page.lock().await;
        let params = CaptureScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .build();
        let shot = page
            .execute(params)
            .await
            .map_err(|e| ComprarError::ScreenshotError {
                message: e.to_string(),
            })?;
        base64::engine::general_purpose::STANDARD
            .decode(&shot.data)
            .map_err(|e| ComprarError::ScreenshotError {
                message: e.to_string(),
            })
    }

    async fn active_alert(&self) -> ComprarResult<Option<AlertInfo>> {
        let queue = self.dialogs.lock().map_err(|_| ComprarError::PageError {
            message: "dialog queue poisoned".to_string(),
        })?;
        Ok(queue.front().cloned())
    }

    async fn accept_alert(&self) -> ComprarResult<()> {
        self.handle_dialog(true).await
    }

    async fn dismiss_alert(&self) -> ComprarResult<()> {
        self.handle_dialog(false).await
    }

    async fn close(&self) -> ComprarResult<()> {
        {
            let mut browser = self.browser.lock().await;
            browser
                .close()
                .await
                .map_err(|e| ComprarError::BrowserLaunchError {
                    message: e.to_string(),
                })?;
        }
        self.dialog_task.abort();
        self.handler_task.abort();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = BrowserConfig::default();
        assert!(config.headless);
        assert!(config.sandbox);
        assert_eq!(config.viewport_width, 1920);
    }

    #[test]
    fn test_config_builder() {
        let config = BrowserConfig::default()
            .with_headless(false)
            .with_viewport(1280, 800)
            .with_no_sandbox()
            .with_chromium_path("/usr/bin/chromium");

        assert!(!config.headless);
        assert!(!config.sandbox);
        assert_eq!(config.viewport_width, 1280);
        assert_eq!(config.chromium_path.as_deref(), Some("/usr/bin/chromium"));
    }

    #[test]
    fn test_explicit_path_beats_env() {
        let config = BrowserConfig::default().with_chromium_path("/opt/chrome");
        assert_eq!(config.executable().as_deref(), Some("/opt/chrome"));
    }
}
