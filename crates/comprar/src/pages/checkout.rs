//! Checkout, payment, and order confirmation.

use crate::fixture::PaymentDetails;
use crate::locator::{Locator, Selector};
use crate::page::Page;
use crate::result::ComprarResult;

/// Checkout flow from the cart through the payment confirmation
#[derive(Debug)]
pub struct CheckoutPage<'d> {
    page: Page<'d>,
    proceed_to_checkout: Locator,
    address_details: Locator,
    review_order: Locator,
    comment_area: Locator,
    place_order: Locator,
    name_on_card: Locator,
    card_number: Locator,
    cvc: Locator,
    expiry_month: Locator,
    expiry_year: Locator,
    pay_confirm: Locator,
    success_message: Locator,
    continue_button: Locator,
    download_invoice: Locator,
}

impl<'d> CheckoutPage<'d> {
    /// Create the page object over a shared [`Page`]
    #[must_use]
    pub fn with_page(page: Page<'d>) -> Self {
        Self {
            page,
            proceed_to_checkout: Locator::new(
                Selector::xpath("//a[contains(text(),'Proceed To Checkout')]"),
                "proceed to checkout",
            ),
            address_details: Locator::new(
                Selector::xpath("//h2[contains(text(),'Address Details')]"),
                "address details heading",
            ),
            review_order: Locator::new(
                Selector::xpath("//h2[contains(text(),'Review Your Order')]"),
                "review order heading",
            ),
            comment_area: Locator::new(Selector::name("message"), "order comment area"),
            place_order: Locator::new(
                Selector::xpath("//a[contains(text(),'Place Order')]"),
                "place order button",
            ),
            name_on_card: Locator::new(Selector::name("name_on_card"), "name on card"),
            card_number: Locator::new(Selector::name("card_number"), "card number"),
            cvc: Locator::new(Selector::name("cvc"), "cvc"),
            expiry_month: Locator::new(Selector::name("expiry_month"), "expiry month"),
            expiry_year: Locator::new(Selector::name("expiry_year"), "expiry year"),
            pay_confirm: Locator::new(Selector::id("submit"), "pay and confirm button"),
            success_message: Locator::new(
                Selector::xpath("//p[contains(text(),'Your order has been placed successfully!')]"),
                "order success message",
            ),
            continue_button: Locator::new(
                Selector::xpath("//a[contains(text(),'Continue')]"),
                "continue button",
            ),
            download_invoice: Locator::new(
                Selector::xpath("//a[contains(text(),'Download Invoice')]"),
                "download invoice button",
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

    /// Leave the cart for the checkout screen
    pub async fn proceed_to_checkout(&self) -> ComprarResult<()> {
        self.page.click(&self.proceed_to_checkout).await
    }

    /// Probe: the address block is visible
    pub async fn is_address_details_visible(&self) -> bool {
        self.page.is_visible(&self.address_details).await
    }

    /// Probe: the order review block is visible
    pub async fn is_review_order_visible(&self) -> bool {
        self.page.is_visible(&self.review_order).await
    }

    /// Leave a comment on the order
    pub async fn enter_comment(&self, comment: &str) -> ComprarResult<()> {
        self.page.enter_text(&self.comment_area, comment).await
    }

    /// Move on to the payment screen
    pub async fn click_place_order(&self) -> ComprarResult<()> {
        self.page.click(&self.place_order).await
    }

    /// Fill the payment form
    pub async fn enter_payment_details(&self, details: &PaymentDetails) -> ComprarResult<()> {
        self.page
            .enter_text(&self.name_on_card, &details.name_on_card)
            .await?;
        self.page
            .enter_text(&self.card_number, &details.card_number)
            .await?;
        self.page.enter_text(&self.cvc, &details.cvc).await?;
        self.page
            .enter_text(&self.expiry_month, &details.expiry_month)
            .await?;
        self.page
            .enter_text(&self.expiry_year, &details.expiry_year)
            .await
    }

    /// Submit the payment
    pub async fn click_pay_and_confirm_order(&self) -> ComprarResult<()> {
        self.page.click(&self.pay_confirm).await
    }

    /// Probe: the success message is visible
    pub async fn is_success_message_visible(&self) -> bool {
        self.page.is_visible(&self.success_message).await
    }

    /// Probe: the order landed on the confirmation page.
    ///
    /// The success paragraph is not always rendered, so the URL and title
    /// are the sturdier signal.
    pub async fn is_order_placed_successfully(&self) -> bool {
        let url = self
            .page
            .driver()
            .current_url()
            .await
            .unwrap_or_default();
        let title = self.page.driver().title().await.unwrap_or_default();
        url.contains("payment_done") && title.contains("Order Placed")
    }

    /// Continue back to the home page
    pub async fn click_continue(&self) -> ComprarResult<()> {
        self.page.click(&self.continue_button).await
    }

    /// Download the order invoice
    pub async fn click_download_invoice(&self) -> ComprarResult<()> {
        self.page.click(&self.download_invoice).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{ElementSnapshot, MockDriver};
    use crate::wait::Waiter;
    use std::time::Duration;

    fn checkout(driver: &MockDriver) -> CheckoutPage<'_> {
        CheckoutPage::with_page(Page::new(driver).with_waiter(
            Waiter::new()
                .with_timeout(Duration::from_millis(60))
                .with_poll_interval(Duration::from_millis(10)),
        ))
    }

    #[tokio::test]
    async fn test_payment_details_fill_every_field() {
        let driver = MockDriver::new();
        for name in ["name_on_card", "card_number", "cvc", "expiry_month", "expiry_year"] {
            driver.install(name, ElementSnapshot::new("input"));
        }

        checkout(&driver)
            .enter_payment_details(&PaymentDetails::default())
            .await
            .unwrap();
        assert_eq!(
            driver.typed_into("card_number"),
            Some("4242424242424242".to_string())
        );
        assert_eq!(driver.typed_into("cvc"), Some("123".to_string()));
    }

    #[tokio::test]
    async fn test_order_placed_probe_checks_url_and_title() {
        let driver = MockDriver::new();
        driver.set_current_url("https://automationexercise.com/payment_done/500");
        driver.set_title("Automation Exercise - Order Placed");
        assert!(checkout(&driver).is_order_placed_successfully().await);

        driver.set_title("Automation Exercise - Payment");
        assert!(!checkout(&driver).is_order_placed_successfully().await);
    }

    #[tokio::test]
    async fn test_address_and_review_probes() {
        let driver = MockDriver::new();
        driver.install(
            "//h2[contains(text(),'Address Details')]",
            ElementSnapshot::new("h2"),
        );
        let page = checkout(&driver);
        assert!(page.is_address_details_visible().await);
        assert!(!page.is_review_order_visible().await);
    }
}
