//! Registration page: signup, the account-information form, and account
//! deletion.

use crate::fixture::{AccountDetails, Title};
use crate::locator::{Locator, Selector};
use crate::page::Page;
use crate::result::ComprarResult;

/// The signup flow from "New User Signup!" through "Account Deleted!"
#[derive(Debug)]
pub struct RegisterPage<'d> {
    page: Page<'d>,
    slider: Locator,
    signup_login_link: Locator,
    new_user_signup: Locator,
    name_field: Locator,
    email_field: Locator,
    signup_button: Locator,
    account_info_heading: Locator,
    email_error: Locator,
    title_mr: Locator,
    title_mrs: Locator,
    password_field: Locator,
    dob_day: Locator,
    dob_month: Locator,
    dob_year: Locator,
    newsletter: Locator,
    offers: Locator,
    first_name: Locator,
    last_name: Locator,
    company: Locator,
    address1: Locator,
    address2: Locator,
    country: Locator,
    state: Locator,
    city: Locator,
    zipcode: Locator,
    mobile_number: Locator,
    create_account_button: Locator,
    account_created: Locator,
    continue_button: Locator,
    logged_in_as: Locator,
    delete_account_link: Locator,
    account_deleted: Locator,
}

impl<'d> RegisterPage<'d> {
    /// Create the page object over a shared [`Page`]
    #[must_use]
    pub fn with_page(page: Page<'d>) -> Self {
        Self {
            page,
            slider: Locator::new(Selector::id("slider-carousel"), "home slider"),
            signup_login_link: Locator::new(
                Selector::xpath("//a[@href='/login']"),
                "signup/login link",
            ),
            new_user_signup: Locator::new(
                Selector::xpath("//h2[contains(text(), 'New User Signup!')]"),
                "new user signup heading",
            ),
            name_field: Locator::new(Selector::name("name"), "signup name field"),
            email_field: Locator::new(
                Selector::xpath("//input[@data-qa='signup-email']"),
                "signup email field",
            ),
            signup_button: Locator::new(
                Selector::xpath("//button[@data-qa='signup-button']"),
                "signup button",
            ),
            account_info_heading: Locator::new(
                Selector::xpath("//b[contains(text(),'Enter Account Information')]"),
                "account information heading",
            ),
            email_error: Locator::new(
                Selector::xpath("//p[contains(text(), 'Email Address already exist!')]"),
                "duplicate email error",
            ),
            title_mr: Locator::new(Selector::id("id_gender1"), "Mr title radio"),
            title_mrs: Locator::new(Selector::id("id_gender2"), "Mrs title radio"),
            password_field: Locator::new(Selector::id("password"), "account password field"),
            dob_day: Locator::new(Selector::id("days"), "birth day dropdown"),
            dob_month: Locator::new(Selector::id("months"), "birth month dropdown"),
            dob_year: Locator::new(Selector::id("years"), "birth year dropdown"),
            newsletter: Locator::new(Selector::id("newsletter"), "newsletter checkbox"),
            offers: Locator::new(Selector::id("optin"), "offers checkbox"),
            first_name: Locator::new(Selector::id("first_name"), "first name field"),
            last_name: Locator::new(Selector::id("last_name"), "last name field"),
            company: Locator::new(Selector::id("company"), "company field"),
            address1: Locator::new(Selector::id("address1"), "address line 1"),
            address2: Locator::new(Selector::id("address2"), "address line 2"),
            country: Locator::new(Selector::id("country"), "country dropdown"),
            state: Locator::new(Selector::id("state"), "state field"),
            city: Locator::new(Selector::id("city"), "city field"),
            zipcode: Locator::new(Selector::id("zipcode"), "zipcode field"),
            mobile_number: Locator::new(Selector::id("mobile_number"), "mobile number field"),
            create_account_button: Locator::new(
                Selector::xpath("//button[@data-qa='create-account']"),
                "create account button",
            ),
            account_created: Locator::new(
                Selector::xpath("//b[contains(text(),'Account Created!')]"),
                "account created heading",
            ),
            continue_button: Locator::new(
                Selector::xpath("//a[@data-qa='continue-button']"),
                "continue button",
            ),
            logged_in_as: Locator::new(
                Selector::xpath("//a[contains(text(),'Logged in as')]"),
                "logged-in banner",
            ),
            delete_account_link: Locator::new(
                Selector::xpath("//a[contains(text(),'Delete Account')]"),
                "delete account link",
            ),
            account_deleted: Locator::new(
                Selector::xpath("//b[contains(text(),'Account Deleted!')]"),
                "account deleted heading",
            ),
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

    /// Probe: the home slider is rendered
    pub async fn is_home_page_visible(&self) -> bool {
        self.page.is_visible(&self.slider).await
    }

    /// Open the signup/login screen
    pub async fn go_to_signup_page(&self) -> ComprarResult<()> {
        self.page.click(&self.signup_login_link).await
    }

    /// Probe: "New User Signup!" is visible
    pub async fn is_new_user_signup_visible(&self) -> bool {
        self.page.is_visible(&self.new_user_signup).await
    }

    /// Fill the initial name/email pair
    pub async fn enter_name_email(&self, name: &str, email: &str) -> ComprarResult<()> {
        self.page.clear_and_enter_text(&self.name_field, name).await?;
        self.page.clear_and_enter_text(&self.email_field, email).await
    }

    /// Submit the signup form
    pub async fn click_signup_button(&self) -> ComprarResult<()> {
        self.page.click(&self.signup_button).await
    }

    /// Probe: the account-information form opened.
    ///
    /// When it did not, a duplicate-email error is the usual cause; that
    /// case is logged so the scenario's assertion message is not the only
    /// trace left behind.
    pub async fn is_account_info_visible(&self) -> bool {
        if self.page.is_visible(&self.account_info_heading).await {
            return true;
        }
        if self.page.is_visible(&self.email_error).await {
            tracing::warn!("signup rejected: email address already exists");
        }
        false
    }

    /// Probe: the duplicate-email error is shown
    pub async fn is_email_error_visible(&self) -> bool {
        self.page.is_visible(&self.email_error).await
    }

    /// Complete the full account-information form
    pub async fn fill_account_details(&self, details: &AccountDetails) -> ComprarResult<()> {
        match details.title {
            Title::Mr => self.page.click(&self.title_mr).await?,
            Title::Mrs => self.page.click(&self.title_mrs).await?,
        }

        self.page
            .clear_and_enter_text(&self.password_field, &details.password)
            .await?;

        self.page.select_dropdown(&self.dob_day, &details.birth_day).await?;
        self.page
            .select_dropdown(&self.dob_month, &details.birth_month)
            .await?;
        self.page
            .select_dropdown(&self.dob_year, &details.birth_year)
            .await?;

        self.page.click(&self.newsletter).await?;
        self.page.click(&self.offers).await?;

        self.page
            .clear_and_enter_text(&self.first_name, &details.first_name)
            .await?;
        self.page
            .clear_and_enter_text(&self.last_name, &details.last_name)
            .await?;
        self.page
            .clear_and_enter_text(&self.company, &details.company)
            .await?;
        self.page
            .clear_and_enter_text(&self.address1, &details.address1)
            .await?;
        self.page
            .clear_and_enter_text(&self.address2, &details.address2)
            .await?;

        self.page.select_dropdown(&self.country, &details.country).await?;

        self.page.clear_and_enter_text(&self.state, &details.state).await?;
        self.page.clear_and_enter_text(&self.city, &details.city).await?;
        self.page
            .clear_and_enter_text(&self.zipcode, &details.zipcode)
            .await?;
        self.page
            .clear_and_enter_text(&self.mobile_number, &details.mobile_number)
            .await
    }

    /// Submit the account-information form
    pub async fn click_create_account(&self) -> ComprarResult<()> {
        self.page.click(&self.create_account_button).await
    }

    /// Probe: "Account Created!" is visible
    pub async fn is_account_created_visible(&self) -> bool {
        self.page.is_visible(&self.account_created).await
    }

    /// Continue past the confirmation screen
    pub async fn click_continue(&self) -> ComprarResult<()> {
        self.page.click(&self.continue_button).await
    }

    /// Probe: the "Logged in as ..." banner is visible
    pub async fn is_logged_in_as_visible(&self) -> bool {
        self.page.is_visible(&self.logged_in_as).await
    }

    /// Delete the current account from the header link
    pub async fn delete_account(&self) -> ComprarResult<()> {
        self.page.click(&self.delete_account_link).await
    }

    /// Probe: "Account Deleted!" is visible
    pub async fn is_account_deleted_visible(&self) -> bool {
        self.page.is_visible(&self.account_deleted).await
    }

    /// Continue past the deletion screen
    pub async fn click_continue_after_delete(&self) -> ComprarResult<()> {
        self.page.click(&self.continue_button).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{ElementSnapshot, MockDriver};
    use crate::wait::Waiter;
    use std::time::Duration;

    fn register(driver: &MockDriver) -> RegisterPage<'_> {
        RegisterPage::with_page(Page::new(driver).with_waiter(
            Waiter::new()
                .with_timeout(Duration::from_millis(60))
                .with_poll_interval(Duration::from_millis(10)),
        ))
    }

    fn install_account_form(driver: &MockDriver) {
        for id in [
            "id_gender1",
            "password",
            "newsletter",
            "optin",
            "first_name",
            "last_name",
            "company",
            "address1",
            "address2",
            "state",
            "city",
            "zipcode",
            "mobile_number",
        ] {
            driver.install(id, ElementSnapshot::new("input"));
        }
        for id in ["days", "months", "years", "country"] {
            driver.install(id, ElementSnapshot::new("select"));
        }
    }

    #[tokio::test]
    async fn test_enter_name_email_replaces_prior_content() {
        let driver = MockDriver::new();
        driver.install("name", ElementSnapshot::new("input"));
        driver.install("//input[@data-qa='signup-email']", ElementSnapshot::new("input"));

        register(&driver)
            .enter_name_email("Test User", "qa-1@example.com")
            .await
            .unwrap();
        assert_eq!(driver.typed_into("name"), Some("Test User".to_string()));
        assert_eq!(
            driver.typed_into("//input[@data-qa='signup-email']"),
            Some("qa-1@example.com".to_string())
        );
    }

    #[tokio::test]
    async fn test_fill_account_details_covers_the_whole_form() {
        let driver = MockDriver::new();
        install_account_form(&driver);

        register(&driver)
            .fill_account_details(&AccountDetails::default())
            .await
            .unwrap();

        assert!(driver.was_called("click:id_gender1"));
        assert_eq!(driver.selected_in("months"), Some("January".to_string()));
        assert_eq!(driver.selected_in("country"), Some("Canada".to_string()));
        assert_eq!(driver.typed_into("city"), Some("Toronto".to_string()));
        assert_eq!(driver.typed_into("zipcode"), Some("M5A 1A1".to_string()));
    }

    #[tokio::test]
    async fn test_fill_account_details_mrs_title() {
        let driver = MockDriver::new();
        install_account_form(&driver);
        driver.install("id_gender2", ElementSnapshot::new("input"));

        let details = AccountDetails {
            title: Title::Mrs,
            ..AccountDetails::default()
        };
        register(&driver).fill_account_details(&details).await.unwrap();
        assert!(driver.was_called("click:id_gender2"));
        assert!(!driver.was_called("click:id_gender1"));
    }

    #[tokio::test]
    async fn test_account_info_probe_reports_duplicate_email_as_false() {
        let driver = MockDriver::new();
        driver.install(
            "//p[contains(text(), 'Email Address already exist!')]",
            ElementSnapshot::new("p").with_text("Email Address already exist!"),
        );
        let page = register(&driver);
        assert!(!page.is_account_info_visible().await);
        assert!(page.is_email_error_visible().await);
    }

    #[tokio::test]
    async fn test_account_lifecycle_probes() {
        let driver = MockDriver::new();
        driver.install(
            "//b[contains(text(),'Account Created!')]",
            ElementSnapshot::new("b").with_text("Account Created!"),
        );
        driver.install(
            "//b[contains(text(),'Account Deleted!')]",
            ElementSnapshot::new("b").with_text("Account Deleted!"),
        );
        let page = register(&driver);
        assert!(page.is_account_created_visible().await);
        assert!(page.is_account_deleted_visible().await);
    }
}
