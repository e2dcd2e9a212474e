//! Shared page-object operations.
//!
//! [`Page`] owns the waiter and the screenshot manager and exposes the
//! generic interactions every page object is built from. The split is
//! deliberate: acting operations (`click`, `enter_text`, ...) propagate a
//! timeout because a failed action invalidates the rest of the scenario,
//! while probing operations (`is_visible`, `is_present`, alert handling,
//! screenshots) degrade to `bool`/`Option` so assertions stay the only
//! source of test failure.

use std::path::PathBuf;
use std::time::Duration;

use crate::driver::{AlertInfo, Driver};
use crate::locator::{FallbackChain, Locator};
use crate::reporter::ScreenshotManager;
use crate::result::{ComprarError, ComprarResult};
use crate::wait::{ReadyCondition, WaitOutcome, Waiter};

/// What to do with a native dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertAction {
    /// Press OK
    Accept,
    /// Press Cancel
    Dismiss,
}

/// Generic interactions over one live browser session.
///
/// Page objects hold a `Page` and express their screen-specific flows
/// through it; nothing here knows about any particular screen.
pub struct Page<'d> {
    driver: &'d dyn Driver,
    waiter: Waiter,
    reporter: ScreenshotManager,
}

impl std::fmt::Debug for Page<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("waiter", &self.waiter)
            .field("reporter", &self.reporter)
            .finish_non_exhaustive()
    }
}

impl<'d> Page<'d> {
    /// Create a page with default waits and reporting
    #[must_use]
    pub fn new(driver: &'d dyn Driver) -> Self {
        Self::named(driver, "suite")
    }

    /// Create a page whose artifacts carry the given test name
    #[must_use]
    pub fn named(driver: &'d dyn Driver, test_name: &str) -> Self {
        Self {
            driver,
            waiter: Waiter::new(),
            reporter: ScreenshotManager::new(test_name),
        }
    }

    /// Replace the waiter (shorter budgets for unit tests)
    #[must_use]
    pub fn with_waiter(mut self, waiter: Waiter) -> Self {
        self.waiter = waiter;
        self
    }

    /// Replace the screenshot manager
    #[must_use]
    pub fn with_reporter(mut self, reporter: ScreenshotManager) -> Self {
        self.reporter = reporter;
        self
    }

    /// The underlying driver, for page objects that need raw queries
    #[must_use]
    pub const fn driver(&self) -> &'d dyn Driver {
        self.driver
    }

    /// The waiter in use
    #[must_use]
    pub const fn waiter(&self) -> &Waiter {
        &self.waiter
    }

    /// Wait for the element to be clickable, then activate it
    pub async fn click(&self, locator: &Locator) -> ComprarResult<()> {
        match self
            .waiter
            .wait_for(self.driver, locator, ReadyCondition::Clickable)
            .await
        {
            WaitOutcome::Satisfied(_) => self.driver.click(locator.selector()).await,
            WaitOutcome::TimedOut { waited } => Err(ComprarError::Timeout {
                what: locator.to_string(),
                waited,
            }),
        }
    }

    /// Wait for the element to be visible, then type into it
    pub async fn enter_text(&self, locator: &Locator, text: &str) -> ComprarResult<()> {
        match self
            .waiter
            .wait_for(self.driver, locator, ReadyCondition::Visible)
            .await
        {
            WaitOutcome::Satisfied(_) => self.driver.type_text(locator.selector(), text).await,
            WaitOutcome::TimedOut { waited } => Err(ComprarError::Timeout {
                what: locator.to_string(),
                waited,
            }),
        }
    }

    /// Wait for the element to be visible, clear it, then type into it
    pub async fn clear_and_enter_text(&self, locator: &Locator, text: &str) -> ComprarResult<()> {
        match self
            .waiter
            .wait_for(self.driver, locator, ReadyCondition::Visible)
            .await
        {
            WaitOutcome::Satisfied(_) => {
                self.driver.clear(locator.selector()).await?;
                self.driver.type_text(locator.selector(), text).await
            }
            WaitOutcome::TimedOut { waited } => Err(ComprarError::Timeout {
                what: locator.to_string(),
                waited,
            }),
        }
    }

    /// Wait for the element to be visible and return its normalized text
    pub async fn get_text(&self, locator: &Locator) -> ComprarResult<String> {
        match self
            .waiter
            .wait_for(self.driver, locator, ReadyCondition::Visible)
            .await
        {
            WaitOutcome::Satisfied(snapshot) => Ok(snapshot.text.trim().to_string()),
            WaitOutcome::TimedOut { waited } => Err(ComprarError::Timeout {
                what: locator.to_string(),
                waited,
            }),
        }
    }

    /// Probe: the element's text if it becomes visible in time
    pub async fn text_if_visible(&self, locator: &Locator) -> Option<String> {
        self.waiter
            .wait_for(self.driver, locator, ReadyCondition::Visible)
            .await
            .into_option()
            .map(|snapshot| snapshot.text.trim().to_string())
    }

    /// Probe: whether the element becomes visible in time
    pub async fn is_visible(&self, locator: &Locator) -> bool {
        self.waiter
            .wait_for(self.driver, locator, ReadyCondition::Visible)
            .await
            .is_satisfied()
    }

    /// Probe: whether the element enters the DOM in time, visible or not
    pub async fn is_present(&self, locator: &Locator) -> bool {
        self.waiter
            .wait_for(self.driver, locator, ReadyCondition::Present)
            .await
            .is_satisfied()
    }

    /// Probe: like [`Page::is_present`] with an explicit budget
    pub async fn is_present_within(&self, locator: &Locator, timeout: Duration) -> bool {
        self.waiter
            .bounded(timeout)
            .wait_for(self.driver, locator, ReadyCondition::Present)
            .await
            .is_satisfied()
    }

    /// Wait for the dropdown to be visible, then select by display text
    pub async fn select_dropdown(&self, locator: &Locator, visible_text: &str) -> ComprarResult<()> {
        match self
            .waiter
            .wait_for(self.driver, locator, ReadyCondition::Visible)
            .await
        {
            WaitOutcome::Satisfied(_) => {
                self.driver
                    .select_by_visible_text(locator.selector(), visible_text)
                    .await
            }
            WaitOutcome::TimedOut { waited } => Err(ComprarError::Timeout {
                what: locator.to_string(),
                waited,
            }),
        }
    }

    /// Probe: the open native dialog, if one appears in time
    pub async fn wait_for_alert(&self, timeout: Option<Duration>) -> Option<AlertInfo> {
        let waiter = timeout.map_or_else(|| self.waiter.clone(), |t| self.waiter.bounded(t));
        waiter.wait_for_alert(self.driver).await.into_option()
    }

    /// Probe: handle a native dialog and report whether one was handled.
    ///
    /// Waits for a dialog within the default budget, then accepts or
    /// dismisses it. Returns `false` when no dialog appeared or the
    /// handling itself failed; never raises.
    pub async fn handle_alert(&self, action: AlertAction) -> bool {
        let Some(alert) = self.wait_for_alert(None).await else {
            tracing::debug!("no alert found");
            return false;
        };
        tracing::debug!(message = %alert.message, ?action, "handling alert");
        let handled = match action {
            AlertAction::Accept => self.driver.accept_alert().await,
            AlertAction::Dismiss => self.driver.dismiss_alert().await,
        };
        match handled {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(%err, "alert handling failed");
                false
            }
        }
    }

    /// Capture a step screenshot; never raises
    pub async fn capture_screenshot(&self, step_name: &str) -> Option<PathBuf> {
        self.reporter.capture_step(self.driver, step_name).await
    }

    /// Capture failure artifacts (PNG + DOM dump); never raises
    pub async fn capture_failure(&self, method_name: &str) -> Option<PathBuf> {
        self.reporter.capture_failure(self.driver, method_name).await
    }

    /// Fixed settle pause after a navigation-triggering action.
    ///
    /// The target site updates parts of the page asynchronously after
    /// navigation; a short pause is a coarse but honest substitute for a
    /// readiness signal the site does not expose.
    pub async fn settle(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    /// First-match-wins text read over a fallback chain.
    ///
    /// Each link gets its own visibility wait; the first visible element's
    /// text is returned and later links are never evaluated. All links
    /// failing yields `None`.
    pub async fn first_visible_text(&self, chain: &FallbackChain) -> Option<String> {
        for locator in chain.iter() {
            if let Some(text) = self.text_if_visible(locator).await {
                return Some(text);
            }
            tracing::debug!(chain = chain.label(), locator = %locator, "fallback link missed");
        }
        None
    }

    /// First-match-wins click over a fallback chain.
    ///
    /// Fails only when every link in the chain timed out.
    pub async fn click_first(&self, chain: &FallbackChain) -> ComprarResult<()> {
        let mut waited_total = Duration::ZERO;
        for locator in chain.iter() {
            match self
                .waiter
                .wait_for(self.driver, locator, ReadyCondition::Clickable)
                .await
            {
                WaitOutcome::Satisfied(_) => {
                    return self.driver.click(locator.selector()).await;
                }
                WaitOutcome::TimedOut { waited } => {
                    waited_total += waited;
                    tracing::debug!(chain = chain.label(), locator = %locator, "fallback link missed");
                }
            }
        }
        Err(ComprarError::Timeout {
            what: chain.label().to_string(),
            waited: waited_total,
        })
    }

    /// Probe: whether any link in the chain becomes visible in time
    pub async fn is_any_visible(&self, chain: &FallbackChain) -> bool {
        for locator in chain.iter() {
            if self.is_visible(locator).await {
                return true;
            }
        }
        false
    }
}
