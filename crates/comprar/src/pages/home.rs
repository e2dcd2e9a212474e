//! Home page: entry point for every UI journey.

use crate::fixture::site_url;
use crate::locator::{FallbackChain, Locator, Selector};
use crate::page::Page;
use crate::result::ComprarResult;

/// The storefront landing page
#[derive(Debug)]
pub struct HomePage<'d> {
    page: Page<'d>,
    slider: Locator,
    first_product: Locator,
    first_add_to_cart: Locator,
    continue_shopping: Locator,
    cart_link: Locator,
    first_view_product: Locator,
    signup_login: FallbackChain,
}

impl<'d> HomePage<'d> {
    /// Create the page object over a shared [`Page`]
    #[must_use]
    pub fn with_page(page: Page<'d>) -> Self {
        Self {
            page,
            slider: Locator::new(Selector::id("slider-carousel"), "home slider"),
            first_product: Locator::new(
                Selector::xpath("//div[@class='product-image-wrapper'][1]"),
                "first product tile",
            ),
            first_add_to_cart: Locator::new(
                Selector::xpath("//div[@class='product-image-wrapper'][1]//a[text()='Add to cart']"),
                "first product add-to-cart",
            ),
            continue_shopping: Locator::new(
                Selector::xpath("//button[text()='Continue Shopping']"),
                "continue shopping button",
            ),
            cart_link: Locator::new(Selector::xpath("//a[@href='/view_cart']"), "cart link"),
            first_view_product: Locator::new(
                Selector::xpath("(//a[contains(text(),'View Product')])[1]"),
                "first view-product link",
            ),
            signup_login: FallbackChain::new(
                "signup/login link",
                Locator::new(
                    Selector::xpath("//a[contains(text(),'Signup') and contains(text(),'Login')]"),
                    "signup/login text link",
                ),
            )
            .or(Locator::new(
                Selector::xpath("//a[@href='/login']"),
                "login href link",
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

    /// Navigate to the storefront root
    pub async fn open(&self) -> ComprarResult<()> {
        self.page.driver().navigate(&site_url()).await
    }

    /// Probe: the home slider is rendered
    pub async fn is_home_page_visible(&self) -> bool {
        self.page.is_visible(&self.slider).await
    }

    /// Open the signup/login screen; the header link's text varies, so a
    /// plain href link backs the labeled one
    pub async fn click_signup_login(&self) -> ComprarResult<()> {
        self.page.click_first(&self.signup_login).await
    }

    /// Open the detail page of the first product on the grid
    pub async fn click_view_product(&self) -> ComprarResult<()> {
        self.page.click(&self.first_view_product).await
    }

    /// Add the first grid product to the cart and dismiss the modal
    pub async fn add_first_product_to_cart(&self) -> ComprarResult<()> {
        // The add-to-cart anchor lives under an overlay; waiting on the
        // tile first gives the grid time to finish rendering.
        let _ = self.page.is_present(&self.first_product).await;
        self.page.click(&self.first_add_to_cart).await?;
        self.page.click(&self.continue_shopping).await
    }

    /// Open the cart page
    pub async fn go_to_cart(&self) -> ComprarResult<()> {
        self.page.click(&self.cart_link).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{ElementSnapshot, MockDriver};
    use crate::wait::Waiter;
    use std::time::Duration;

    fn home(driver: &MockDriver) -> HomePage<'_> {
        HomePage::with_page(Page::new(driver).with_waiter(
            Waiter::new()
                .with_timeout(Duration::from_millis(60))
                .with_poll_interval(Duration::from_millis(10)),
        ))
    }

    #[tokio::test]
    async fn test_home_visible_via_slider() {
        let driver = MockDriver::new();
        driver.install("slider-carousel", ElementSnapshot::new("div"));
        assert!(home(&driver).is_home_page_visible().await);
    }

    #[tokio::test]
    async fn test_signup_login_falls_back_to_href_link() {
        let driver = MockDriver::new();
        driver.install("//a[@href='/login']", ElementSnapshot::new("a"));

        home(&driver).click_signup_login().await.unwrap();
        assert!(driver.was_called("click://a[@href='/login']"));
    }

    #[tokio::test]
    async fn test_add_first_product_dismisses_modal() {
        let driver = MockDriver::new();
        driver.install(
            "//div[@class='product-image-wrapper'][1]",
            ElementSnapshot::new("div"),
        );
        driver.install(
            "//div[@class='product-image-wrapper'][1]//a[text()='Add to cart']",
            ElementSnapshot::new("a"),
        );
        driver.install(
            "//button[text()='Continue Shopping']",
            ElementSnapshot::new("button"),
        );

        home(&driver).add_first_product_to_cart().await.unwrap();
        let history = driver.history();
        let add = history
            .iter()
            .position(|c| c.contains("Add to cart"))
            .unwrap();
        let dismiss = history
            .iter()
            .position(|c| c.contains("Continue Shopping"))
            .unwrap();
        assert!(add < dismiss);
    }
}
