//! Comprar: end-to-end test suite for the `AutomationExercise` demo
//! storefront.
//!
//! The suite drives the site two ways: through a real browser for the user
//! journeys (registration, login, cart, checkout, contact, search), and
//! over plain HTTP for the REST API (products, brands, search, users,
//! orders).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Test case                                                      │
//! │    │                         │                                  │
//! │    ▼                         ▼                                  │
//! │  Page objects             ApiClient ── reqwest ──► REST API     │
//! │    │                                                            │
//! │    ▼                                                            │
//! │  Page ops ──► Waiter ──► Driver ── CDP ──► browser ──► site     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The [`driver::Driver`] trait is the seam between the suite and the
//! browser: the `browser` feature provides the chromiumoxide-backed
//! [`browser::Session`], and [`driver::MockDriver`] backs the unit tests.
//! Probing operations degrade timeouts into `bool`/`None`; only acting
//! operations and assertions can fail a scenario.

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

pub mod api;
#[cfg(feature = "browser")]
pub mod browser;
pub mod driver;
pub mod fixture;
pub mod locator;
pub mod page;
pub mod pages;
pub mod reporter;
pub mod result;
pub mod wait;

/// Commonly used types, importable in one line from test files
pub mod prelude {
    pub use crate::api::{ApiClient, ApiResponse, Payload};
    #[cfg(feature = "browser")]
    pub use crate::browser::{BrowserConfig, Session};
    pub use crate::driver::{AlertInfo, Driver, ElementSnapshot, MockDriver};
    pub use crate::fixture::{
        site_url, unique_email, AccountDetails, ContactMessage, Credentials, PaymentDetails,
        RegistrationDetails, Title,
    };
    pub use crate::locator::{FallbackChain, Locator, Selector};
    pub use crate::page::{AlertAction, Page};
    pub use crate::pages::{
        CartPage, CheckoutPage, ContactPage, HomePage, LoginPage, ProductDetailPage, RegisterPage,
        SearchPage,
    };
    pub use crate::reporter::ScreenshotManager;
    pub use crate::result::{ComprarError, ComprarResult};
    pub use crate::wait::{ReadyCondition, WaitOutcome, Waiter};
}
