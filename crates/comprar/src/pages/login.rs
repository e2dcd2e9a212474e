//! Login page: authentication flows and the logged-in header state.

use crate::locator::{FallbackChain, Locator, Selector};
use crate::page::Page;
use crate::result::ComprarResult;

/// The login/signup screen and the session state it controls
#[derive(Debug)]
pub struct LoginPage<'d> {
    page: Page<'d>,
    login_link: Locator,
    email_field: Locator,
    password_field: Locator,
    login_button: Locator,
    logged_in_text: Locator,
    error_message: Locator,
    logout_link: Locator,
    heading: FallbackChain,
}

impl<'d> LoginPage<'d> {
    /// Create the page object over a shared [`Page`]
    #[must_use]
    pub fn with_page(page: Page<'d>) -> Self {
        Self {
            page,
            login_link: Locator::new(Selector::xpath("//a[@href='/login']"), "login link"),
            email_field: Locator::new(
                Selector::xpath("//input[@data-qa='login-email']"),
                "login email field",
            ),
            password_field: Locator::new(
                Selector::xpath("//input[@data-qa='login-password']"),
                "login password field",
            ),
            login_button: Locator::new(
                Selector::xpath("//button[@data-qa='login-button']"),
                "login button",
            ),
            logged_in_text: Locator::new(
                Selector::xpath("//a[contains(text(),'Logged in as')]"),
                "logged-in banner",
            ),
            error_message: Locator::new(
                Selector::xpath("//p[contains(text(), 'Your email or password is incorrect!')]"),
                "login error message",
            ),
            logout_link: Locator::new(
                Selector::xpath("//a[contains(text(),'Logout')]"),
                "logout link",
            ),
            // The heading drops its literal text on some variants of the
            // login form, so the structural locator backs it up.
            heading: FallbackChain::new(
                "login heading",
                Locator::new(
                    Selector::xpath("//h2[contains(text(),'Login to your account')]"),
                    "login heading text",
                ),
            )
            .or(Locator::new(
                Selector::xpath("//div[@class='login-form']//h2"),
                "login form heading",
            )),
        }
    }

    /// Create the page object with default waits
    #[must_use]
    pub fn new(driver: &'d dyn crate::driver::Driver) -> Self {
        Self::with_page(Page::new(driver))
    }

    /// Access the shared page primitives
    #[must_use]
    pub const fn page(&self) -> &Page<'d> {
        &self.page
    }

    /// Navigate to the login page via the header link
    pub async fn go_to_login_page(&self) -> ComprarResult<()> {
        self.page.click(&self.login_link).await
    }

    /// Probe: the "Login to your account" heading is visible
    pub async fn is_login_to_account_visible(&self) -> bool {
        self.page.is_any_visible(&self.heading).await
    }

    /// Enter credentials and submit
    pub async fn login(&self, email: &str, password: &str) -> ComprarResult<()> {
        self.page.enter_text(&self.email_field, email).await?;
        self.page.enter_text(&self.password_field, password).await?;
        self.page.click(&self.login_button).await
    }

    /// Probe: the "Logged in as ..." banner is visible
    pub async fn is_logged_in_visible(&self) -> bool {
        self.page.is_visible(&self.logged_in_text).await
    }

    /// Text of the logged-in banner
    pub async fn logged_in_text(&self) -> ComprarResult<String> {
        self.page.get_text(&self.logged_in_text).await
    }

    /// Log the current account out
    pub async fn click_logout(&self) -> ComprarResult<()> {
        self.page.click(&self.logout_link).await
    }

    /// Probe: the user landed back on the login page
    pub async fn is_login_page_loaded(&self) -> bool {
        self.is_login_to_account_visible().await
    }

    /// Text of the invalid-credentials warning
    pub async fn warning(&self) -> ComprarResult<String> {
        self.page.get_text(&self.error_message).await
    }
}
