//! Bounded waits for element readiness.
//!
//! Every wait re-queries the live document on each poll; nothing is cached
//! between polls or across navigations. A wait that runs out of budget
//! reports [`WaitOutcome::TimedOut`] rather than raising, so probing
//! callers can pattern-match while acting callers convert the outcome into
//! an error.

use std::time::{Duration, Instant};

use crate::driver::{AlertInfo, Driver, ElementSnapshot};
use crate::locator::Locator;

/// Default timeout for wait operations (10 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Default polling interval (250ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 250;

/// Readiness condition an element must satisfy before a wait completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadyCondition {
    /// Element exists in the DOM, visible or not
    Present,
    /// Element exists and is rendered
    Visible,
    /// Element is rendered and enabled
    Clickable,
}

impl ReadyCondition {
    /// Short description for logs and timeout messages
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Visible => "visible",
            Self::Clickable => "clickable",
        }
    }

    /// Check the condition against a live snapshot
    #[must_use]
    pub const fn holds(&self, snapshot: &ElementSnapshot) -> bool {
        match self {
            Self::Present => true,
            Self::Visible => snapshot.displayed,
            Self::Clickable => snapshot.displayed && snapshot.enabled,
        }
    }
}

impl std::fmt::Display for ReadyCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Outcome of a bounded wait
#[derive(Debug, Clone)]
pub enum WaitOutcome<T> {
    /// The condition held before the deadline
    Satisfied(T),
    /// The budget elapsed without the condition holding
    TimedOut {
        /// Time spent waiting
        waited: Duration,
    },
}

impl<T> WaitOutcome<T> {
    /// Whether the wait succeeded
    #[must_use]
    pub const fn is_satisfied(&self) -> bool {
        matches!(self, Self::Satisfied(_))
    }

    /// Convert into an `Option`, discarding timing information
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Satisfied(value) => Some(value),
            Self::TimedOut { .. } => None,
        }
    }
}

/// Poller for element readiness with a fixed budget
#[derive(Debug, Clone)]
pub struct Waiter {
    timeout: Duration,
    poll_interval: Duration,
}

impl Default for Waiter {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_WAIT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl Waiter {
    /// Create a waiter with default budget
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Get the timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// A copy of this waiter with a different budget
    #[must_use]
    pub const fn bounded(&self, timeout: Duration) -> Self {
        Self {
            timeout,
            poll_interval: self.poll_interval,
        }
    }

    /// Wait until `locator` resolves to an element satisfying `condition`.
    ///
    /// A per-locator timeout override takes precedence over the waiter's
    /// budget. Driver failures during a poll count as "not ready yet" and
    /// are retried until the budget runs out.
    pub async fn wait_for(
        &self,
        driver: &dyn Driver,
        locator: &Locator,
        condition: ReadyCondition,
    ) -> WaitOutcome<ElementSnapshot> {
        let budget = locator.timeout().unwrap_or(self.timeout);
        let start = Instant::now();
        loop {
            match driver.find(locator.selector()).await {
                Ok(Some(snapshot)) if condition.holds(&snapshot) => {
                    return WaitOutcome::Satisfied(snapshot);
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::debug!(locator = %locator, %err, "poll failed, retrying");
                }
            }
            if start.elapsed() >= budget {
                return WaitOutcome::TimedOut {
                    waited: start.elapsed(),
                };
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Wait until a native dialog is open.
    pub async fn wait_for_alert(&self, driver: &dyn Driver) -> WaitOutcome<AlertInfo> {
        let start = Instant::now();
        loop {
            match driver.active_alert().await {
                Ok(Some(alert)) => return WaitOutcome::Satisfied(alert),
                Ok(None) => {}
                Err(err) => {
                    tracing::debug!(%err, "alert poll failed, retrying");
                }
            }
            if start.elapsed() >= self.timeout {
                return WaitOutcome::TimedOut {
                    waited: start.elapsed(),
                };
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::MockDriver;
    use crate::locator::Selector;

    fn quick() -> Waiter {
        Waiter::new()
            .with_timeout(Duration::from_millis(60))
            .with_poll_interval(Duration::from_millis(10))
    }

    mod condition_tests {
        use super::*;

        #[test]
        fn test_present_ignores_visibility() {
            let hidden = ElementSnapshot::new("div").with_displayed(false);
            assert!(ReadyCondition::Present.holds(&hidden));
            assert!(!ReadyCondition::Visible.holds(&hidden));
        }

        #[test]
        fn test_clickable_requires_enabled() {
            let disabled = ElementSnapshot::new("button").with_enabled(false);
            assert!(ReadyCondition::Visible.holds(&disabled));
            assert!(!ReadyCondition::Clickable.holds(&disabled));
        }

        #[test]
        fn test_describe() {
            assert_eq!(ReadyCondition::Clickable.describe(), "clickable");
        }
    }

    mod outcome_tests {
        use super::*;

        #[test]
        fn test_into_option() {
            let satisfied: WaitOutcome<u32> = WaitOutcome::Satisfied(7);
            assert_eq!(satisfied.into_option(), Some(7));

            let timed_out: WaitOutcome<u32> = WaitOutcome::TimedOut {
                waited: Duration::from_millis(10),
            };
            assert_eq!(timed_out.into_option(), None);
        }
    }

    mod waiter_tests {
        use super::*;

        #[tokio::test]
        async fn test_satisfied_immediately() {
            let driver = MockDriver::new();
            driver.install("#ok", ElementSnapshot::new("div"));
            let locator = Locator::new(Selector::css("#ok"), "ok");

            let outcome = quick()
                .wait_for(&driver, &locator, ReadyCondition::Present)
                .await;
            assert!(outcome.is_satisfied());
        }

        #[tokio::test]
        async fn test_times_out_when_absent() {
            let driver = MockDriver::new();
            let locator = Locator::new(Selector::css("#missing"), "missing");

            let outcome = quick()
                .wait_for(&driver, &locator, ReadyCondition::Present)
                .await;
            match outcome {
                WaitOutcome::TimedOut { waited } => {
                    assert!(waited >= Duration::from_millis(60));
                }
                WaitOutcome::Satisfied(_) => panic!("element should not exist"),
            }
        }

        #[tokio::test]
        async fn test_visible_condition_rejects_hidden_element() {
            let driver = MockDriver::new();
            driver.install("#hidden", ElementSnapshot::new("div").with_displayed(false));
            let locator = Locator::new(Selector::css("#hidden"), "hidden");

            let waiter = quick();
            let present = waiter
                .wait_for(&driver, &locator, ReadyCondition::Present)
                .await;
            assert!(present.is_satisfied());

            let visible = waiter
                .wait_for(&driver, &locator, ReadyCondition::Visible)
                .await;
            assert!(!visible.is_satisfied());
        }

        #[tokio::test]
        async fn test_locator_timeout_overrides_waiter_budget() {
            let driver = MockDriver::new();
            let locator = Locator::new(Selector::css("#missing"), "missing")
                .with_timeout(Duration::from_millis(20));

            let start = Instant::now();
            let outcome = Waiter::new()
                .with_poll_interval(Duration::from_millis(5))
                .wait_for(&driver, &locator, ReadyCondition::Present)
                .await;
            assert!(!outcome.is_satisfied());
            assert!(start.elapsed() < Duration::from_secs(5));
        }

        #[tokio::test]
        async fn test_wait_for_alert() {
            let driver = MockDriver::new();
            driver.enqueue_alert("Press OK to proceed!");

            let outcome = quick().wait_for_alert(&driver).await;
            match outcome {
                WaitOutcome::Satisfied(alert) => {
                    assert_eq!(alert.message, "Press OK to proceed!");
                }
                WaitOutcome::TimedOut { .. } => panic!("alert was queued"),
            }
        }

        #[tokio::test]
        async fn test_wait_for_alert_times_out_quietly() {
            let driver = MockDriver::new();
            let outcome = quick().wait_for_alert(&driver).await;
            assert!(!outcome.is_satisfied());
        }
    }
}
