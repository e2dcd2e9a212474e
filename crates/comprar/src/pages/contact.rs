//! Contact-us form, including the submit confirmation dialog.

use std::path::Path;
use std::time::Duration;

use crate::fixture::ContactMessage;
use crate::locator::{FallbackChain, Locator, Selector};
use crate::page::{AlertAction, Page};
use crate::result::{ComprarError, ComprarResult};
use crate::wait::{ReadyCondition, WaitOutcome};

/// The "Get In Touch" contact form
#[derive(Debug)]
pub struct ContactPage<'d> {
    page: Page<'d>,
    slider: Locator,
    contact_us_link: Locator,
    get_in_touch: Locator,
    name_field: Locator,
    email_field: Locator,
    subject_field: Locator,
    message_field: Locator,
    file_upload: Locator,
    submit_button: Locator,
    success_message: FallbackChain,
    home_button: Locator,
}

impl<'d> ContactPage<'d> {
    /// Create the page object over a shared [`Page`]
    #[must_use]
    pub fn with_page(page: Page<'d>) -> Self {
        Self {
            page,
            slider: Locator::new(Selector::id("slider-carousel"), "home slider"),
            contact_us_link: Locator::new(
                Selector::xpath("//a[contains(text(),'Contact us')]"),
                "contact us link",
            ),
            get_in_touch: Locator::new(
                Selector::xpath("//h2[contains(text(),'Get In Touch')]"),
                "get in touch heading",
            ),
            name_field: Locator::new(Selector::xpath("//input[@data-qa='name']"), "name field"),
            email_field: Locator::new(Selector::xpath("//input[@data-qa='email']"), "email field"),
            subject_field: Locator::new(
                Selector::xpath("//input[@data-qa='subject']"),
                "subject field",
            ),
            message_field: Locator::new(
                Selector::xpath("//textarea[@data-qa='message']"),
                "message field",
            ),
            file_upload: Locator::new(Selector::name("upload_file"), "file upload input"),
            submit_button: Locator::new(
                Selector::xpath("//input[@data-qa='submit-button']"),
                "submit button",
            ),
            success_message: FallbackChain::new(
                "contact success message",
                Locator::new(
                    Selector::xpath(
                        "//div[contains(@class,'status alert') and contains(text(),'Success! Your details have been submitted successfully.')]",
                    ),
                    "status alert",
                ),
            )
            .or(Locator::new(
                Selector::xpath(
                    "//div[contains(text(),'Success! Your details have been submitted successfully.')]",
                ),
                "success text",
            )),
            home_button: Locator::new(
                Selector::xpath("//a[contains(text(),'Home')]"),
                "home button",
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

    /// Open the contact form
    pub async fn click_contact_us(&self) -> ComprarResult<()> {
        self.page.click(&self.contact_us_link).await
    }

    /// Probe: "Get In Touch" is visible
    pub async fn is_get_in_touch_visible(&self) -> bool {
        self.page.is_visible(&self.get_in_touch).await
    }

    /// Fill the form from a fixture message
    pub async fn fill_contact_form(&self, message: &ContactMessage) -> ComprarResult<()> {
        self.page
            .clear_and_enter_text(&self.name_field, &message.name)
            .await?;
        self.page
            .clear_and_enter_text(&self.email_field, &message.email)
            .await?;
        self.page
            .clear_and_enter_text(&self.subject_field, &message.subject)
            .await?;
        self.page
            .clear_and_enter_text(&self.message_field, &message.message)
            .await
    }

    /// Attach a local file to the form.
    ///
    /// File inputs are often kept invisible by the site's styling, so this
    /// waits for presence rather than visibility.
    pub async fn upload_file(&self, path: &Path) -> ComprarResult<()> {
        match self
            .page
            .waiter()
            .wait_for(self.page.driver(), &self.file_upload, ReadyCondition::Present)
            .await
        {
            WaitOutcome::Satisfied(_) => {
                self.page
                    .driver()
                    .set_file_input(self.file_upload.selector(), path)
                    .await
            }
            WaitOutcome::TimedOut { waited } => Err(ComprarError::Timeout {
                what: self.file_upload.to_string(),
                waited,
            }),
        }
    }

    /// Submit the form
    pub async fn click_submit_button(&self) -> ComprarResult<()> {
        self.page.click(&self.submit_button).await
    }

    /// Accept the confirmation dialog the submit raises.
    ///
    /// Returns whether a dialog was actually handled; never raises.
    pub async fn handle_alert(&self) -> bool {
        self.page.handle_alert(AlertAction::Accept).await
    }

    /// Probe: the submission success banner is visible under either markup
    pub async fn is_success_message_visible(&self) -> bool {
        self.page.is_any_visible(&self.success_message).await
    }

    /// Leave the form for the home page
    pub async fn click_home_button(&self) -> ComprarResult<()> {
        self.page.click(&self.home_button).await
    }

    /// Probe: back on the home page
    pub async fn verify_back_to_home(&self) -> bool {
        self.is_home_page_visible().await
    }

    /// Convenience settle after submit while the site processes the form
    pub async fn settle_after_submit(&self) {
        self.page.settle(Duration::from_secs(2)).await;
    }
}
