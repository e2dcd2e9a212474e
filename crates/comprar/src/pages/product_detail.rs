//! Product detail page: quantity selection and add-to-cart.

use std::time::Duration;

use crate::locator::{FallbackChain, Locator, Selector};
use crate::page::Page;
use crate::result::ComprarResult;

/// One product's detail page
#[derive(Debug)]
pub struct ProductDetailPage<'d> {
    page: Page<'d>,
    quantity_input: Locator,
    name_chain: FallbackChain,
    add_to_cart: FallbackChain,
    view_cart: FallbackChain,
}

impl<'d> ProductDetailPage<'d> {
    /// Create the page object over a shared [`Page`]
    #[must_use]
    pub fn with_page(page: Page<'d>) -> Self {
        Self {
            page,
            quantity_input: Locator::new(Selector::id("quantity"), "quantity input"),
            name_chain: FallbackChain::new(
                "product name",
                Locator::new(
                    Selector::xpath("//div[@class='product-information']//h2"),
                    "product name",
                ),
            )
            .or(Locator::new(
                Selector::xpath("//div[contains(@class,'product-details')]//h2"),
                "alt product name",
            )),
            add_to_cart: FallbackChain::new(
                "add-to-cart button",
                Locator::new(
                    Selector::xpath("//button[contains(@class,'cart')]"),
                    "add-to-cart button",
                ),
            )
            .or(Locator::new(
                Selector::xpath("//button[text()='Add to cart']"),
                "add-to-cart by text",
            )),
            view_cart: FallbackChain::new(
                "view cart link",
                Locator::new(
                    Selector::xpath(
                        "//a[contains(@href, 'view_cart') and contains(text(), 'View Cart')]",
                    ),
                    "view cart link",
                ),
            )
            .or(Locator::new(
                Selector::xpath("//p//a[@href='/view_cart']"),
                "view cart in modal",
            ))
            .or(Locator::new(
                Selector::xpath("//u[text()='View Cart']"),
                "view cart underline",
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

    /// Probe: a detail panel is open under either markup variant
    pub async fn is_product_detail_opened(&self) -> bool {
        for locator in self.name_chain.iter() {
            if self.page.is_present(locator).await {
                return true;
            }
        }
        false
    }

    /// Product name, from whichever markup variant is present
    pub async fn product_name(&self) -> Option<String> {
        self.page.first_visible_text(&self.name_chain).await
    }

    /// Replace the quantity field's content with the given amount.
    ///
    /// The field occasionally rejects the first clear while the page is
    /// still wiring its handlers; one settled retry covers that.
    pub async fn set_quantity(&self, quantity: u32) -> ComprarResult<()> {
        let value = quantity.to_string();
        match self
            .page
            .clear_and_enter_text(&self.quantity_input, &value)
            .await
        {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::debug!(%err, "quantity entry failed, retrying once");
                self.page.settle(Duration::from_millis(300)).await;
                self.page
                    .clear_and_enter_text(&self.quantity_input, &value)
                    .await
            }
        }
    }

    /// Add the product to the cart
    pub async fn click_add_to_cart(&self) -> ComprarResult<()> {
        self.page.click_first(&self.add_to_cart).await
    }

    /// Follow the view-cart link out of the confirmation modal
    pub async fn click_view_cart(&self) -> ComprarResult<()> {
        self.page.click_first(&self.view_cart).await
    }
}
