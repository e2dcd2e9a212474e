//! Cart page, including the quantity fallback ladder.

use std::sync::OnceLock;

use regex::Regex;

use crate::locator::{FallbackChain, Locator, Selector};
use crate::page::Page;
use crate::result::ComprarResult;

/// Quantities outside this window are prices or ids, not cart quantities
const QUANTITY_RANGE: std::ops::RangeInclusive<u32> = 1..=10;

fn integer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b\d+\b").expect("static pattern"))
}

/// The shopping-cart table
#[derive(Debug)]
pub struct CartPage<'d> {
    page: Page<'d>,
    product_name: Locator,
    cart_table: Locator,
    quantity_chain: FallbackChain,
}

impl<'d> CartPage<'d> {
    /// Create the page object over a shared [`Page`]
    #[must_use]
    pub fn with_page(page: Page<'d>) -> Self {
        Self {
            page,
            product_name: Locator::new(
                Selector::xpath("//td[@class='cart_description']//a"),
                "cart product name",
            ),
            cart_table: Locator::new(Selector::id("cart_info_table"), "cart table"),
            // The quantity cell renders as a button, a styled button, or a
            // bare cell depending on the page variant.
            quantity_chain: FallbackChain::new(
                "cart quantity",
                Locator::new(
                    Selector::xpath("//td[@class='cart_quantity']//button"),
                    "quantity button",
                ),
            )
            .or(Locator::new(
                Selector::xpath("//td[contains(@class,'quantity')]//button"),
                "quantity button loose class",
            ))
            .or(Locator::new(
                Selector::xpath("//button[@class='disabled']"),
                "disabled quantity button",
            ))
            .or(Locator::new(
                Selector::xpath("//td[@class='cart_quantity']"),
                "quantity cell",
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

    /// Name of the product in the cart
    pub async fn product_name(&self) -> ComprarResult<String> {
        self.page.get_text(&self.product_name).await
    }

    /// Probe: a product row is present in the cart
    pub async fn is_product_displayed_in_cart(&self) -> bool {
        self.page.is_present(&self.product_name).await
    }

    /// Quantity of the product in the cart.
    ///
    /// Walks the quantity locator ladder first; a link whose text is not an
    /// integer is skipped like a miss. When the whole ladder fails, the
    /// cart table's text is scanned for the first integer in the plausible
    /// quantity window, defaulting to 1 when the table holds none. A
    /// missing table means there is nothing to report: `None`.
    pub async fn product_quantity(&self) -> Option<u32> {
        for locator in self.quantity_chain.iter() {
            if let Some(text) = self.page.text_if_visible(locator).await {
                match text.trim().parse::<u32>() {
                    Ok(quantity) => return Some(quantity),
                    Err(_) => {
                        tracing::debug!(locator = %locator, %text, "quantity text not an integer");
                    }
                }
            }
        }

        let table_text = self.page.text_if_visible(&self.cart_table).await?;
        for found in integer_pattern().find_iter(&table_text) {
            if let Ok(number) = found.as_str().parse::<u32>() {
                if QUANTITY_RANGE.contains(&number) {
                    tracing::debug!(number, "quantity recovered from table scan");
                    return Some(number);
                }
            }
        }
        Some(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{ElementSnapshot, MockDriver};
    use crate::wait::Waiter;
    use std::time::Duration;

    fn cart(driver: &MockDriver) -> CartPage<'_> {
        CartPage::with_page(Page::new(driver).with_waiter(
            Waiter::new()
                .with_timeout(Duration::from_millis(60))
                .with_poll_interval(Duration::from_millis(10)),
        ))
    }

    #[tokio::test]
    async fn test_quantity_from_primary_locator() {
        let driver = MockDriver::new();
        driver.install(
            "//td[@class='cart_quantity']//button",
            ElementSnapshot::new("button").with_text("4"),
        );
        assert_eq!(cart(&driver).product_quantity().await, Some(4));
    }

    #[tokio::test]
    async fn test_quantity_from_sole_matching_alternative() {
        let driver = MockDriver::new();
        driver.install(
            "//button[@class='disabled']",
            ElementSnapshot::new("button").with_text(" 2 "),
        );
        // Matches what that alternative would report on its own
        assert_eq!(cart(&driver).product_quantity().await, Some(2));
    }

    #[tokio::test]
    async fn test_non_numeric_link_is_skipped() {
        let driver = MockDriver::new();
        driver.install(
            "//td[@class='cart_quantity']//button",
            ElementSnapshot::new("button").with_text("Qty"),
        );
        driver.install(
            "//td[@class='cart_quantity']",
            ElementSnapshot::new("td").with_text("3"),
        );
        assert_eq!(cart(&driver).product_quantity().await, Some(3));
    }

    #[tokio::test]
    async fn test_table_scan_finds_single_plausible_integer() {
        let driver = MockDriver::new();
        driver.install(
            "cart_info_table",
            ElementSnapshot::new("table").with_text("Blue Top Rs. 500 4 Rs. 2000"),
        );
        // 500 and 2000 fall outside the window; 4 is the quantity
        assert_eq!(cart(&driver).product_quantity().await, Some(4));
    }

    #[tokio::test]
    async fn test_table_scan_without_plausible_integer_defaults_to_one() {
        let driver = MockDriver::new();
        driver.install(
            "cart_info_table",
            ElementSnapshot::new("table").with_text("Blue Top Rs. 500 Rs. 2000"),
        );
        assert_eq!(cart(&driver).product_quantity().await, Some(1));
    }

    #[tokio::test]
    async fn test_missing_table_reports_nothing() {
        let driver = MockDriver::new();
        assert_eq!(cart(&driver).product_quantity().await, None);
    }

    #[tokio::test]
    async fn test_product_name_and_presence() {
        let driver = MockDriver::new();
        driver.install(
            "//td[@class='cart_description']//a",
            ElementSnapshot::new("a").with_text("Blue Top"),
        );
        let page = cart(&driver);
        assert!(page.is_product_displayed_in_cart().await);
        assert_eq!(page.product_name().await.unwrap(), "Blue Top");
    }
}
