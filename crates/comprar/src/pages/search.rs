//! Products and search pages, including the product-detail field readers.
//!
//! The detail panel is the least stable markup on the site: every field
//! keeps a fallback chain, and the availability/condition/brand readers
//! end in a keyword scan over the panel's paragraphs.

use std::collections::BTreeMap;

use crate::locator::{FallbackChain, Locator, Selector};
use crate::page::Page;
use crate::result::ComprarResult;

/// Product-detail fields the suite verifies
const DETAIL_FIELDS: [&str; 6] = [
    "name",
    "category",
    "price",
    "availability",
    "condition",
    "brand",
];

/// Brand names that identify a brand paragraph when its label is missing
const KNOWN_BRANDS: [&str; 5] = ["polo", "h&m", "madame", "biba", "allen solly"];

/// The products listing, search results, and product-detail panel
#[derive(Debug)]
pub struct SearchPage<'d> {
    page: Page<'d>,
    slider: Locator,
    products_link: Locator,
    all_products_title: Locator,
    products_list: Locator,
    product_items: Locator,
    first_view_product: Locator,
    search_box: Locator,
    search_button: Locator,
    searched_products_title: Locator,
    detail_paragraphs: Locator,
    name_chain: FallbackChain,
    category_chain: FallbackChain,
    price_chain: FallbackChain,
    availability_chain: FallbackChain,
    condition_chain: FallbackChain,
    brand_chain: FallbackChain,
}

impl<'d> SearchPage<'d> {
    /// Create the page object over a shared [`Page`]
    #[must_use]
    pub fn with_page(page: Page<'d>) -> Self {
        let info = "//div[@class='product-information']";
        let alt = "//div[contains(@class,'product-details')]";
        Self {
            page,
            slider: Locator::new(Selector::id("slider-carousel"), "home slider"),
            products_link: Locator::new(Selector::xpath("//a[@href='/products']"), "products link"),
            all_products_title: Locator::new(
                Selector::xpath("//h2[contains(text(),'All Products')]"),
                "all products title",
            ),
            products_list: Locator::new(
                Selector::xpath("//div[@class='features_items']"),
                "products list",
            ),
            product_items: Locator::new(
                Selector::xpath("//div[@class='productinfo text-center']"),
                "product tiles",
            ),
            first_view_product: Locator::new(
                Selector::xpath("(//a[contains(text(),'View Product')])[1]"),
                "first view-product link",
            ),
            search_box: Locator::new(Selector::id("search_product"), "search box"),
            search_button: Locator::new(Selector::id("submit_search"), "search button"),
            searched_products_title: Locator::new(
                Selector::xpath("//h2[contains(text(),'Searched Products')]"),
                "searched products title",
            ),
            detail_paragraphs: Locator::new(
                Selector::xpath(&format!("{info}//p")),
                "detail paragraphs",
            ),
            name_chain: FallbackChain::new(
                "product name",
                Locator::new(Selector::xpath(&format!("{info}//h2")), "detail name"),
            )
            .or(Locator::new(Selector::xpath(&format!("{alt}//h2")), "alt detail name")),
            category_chain: FallbackChain::new(
                "product category",
                Locator::new(
                    Selector::xpath(&format!("{info}//p[contains(text(),'Category:')]")),
                    "detail category",
                ),
            )
            .or(Locator::new(
                Selector::xpath(&format!("{alt}//p[1]")),
                "alt detail category",
            )),
            price_chain: FallbackChain::new(
                "product price",
                Locator::new(Selector::xpath(&format!("{info}//span/span")), "detail price"),
            )
            .or(Locator::new(
                Selector::xpath(&format!("{alt}//span[contains(text(),'Rs.')]")),
                "alt detail price",
            )),
            availability_chain: FallbackChain::new(
                "product availability",
                Locator::new(
                    Selector::xpath(&format!("{info}//p[contains(text(),'Availability:')]")),
                    "detail availability",
                ),
            )
            .or(Locator::new(
                Selector::xpath(
                    "//p[contains(text(),'Availability') or contains(text(),'In Stock') or contains(text(),'Out of Stock')]",
                ),
                "alt detail availability",
            )),
            condition_chain: FallbackChain::new(
                "product condition",
                Locator::new(
                    Selector::xpath(&format!("{info}//p[contains(text(),'Condition:')]")),
                    "detail condition",
                ),
            )
            .or(Locator::new(
                Selector::xpath(
                    "//p[contains(text(),'Condition') or contains(text(),'New') or contains(text(),'Used')]",
                ),
                "alt detail condition",
            )),
            brand_chain: FallbackChain::new(
                "product brand",
                Locator::new(
                    Selector::xpath(&format!("{info}//p[contains(text(),'Brand:')]")),
                    "detail brand",
                ),
            )
            .or(Locator::new(
                Selector::xpath(
                    "//p[contains(text(),'Brand') or contains(text(),'Polo') or contains(text(),'H&M') or contains(text(),'Madame')]",
                ),
                "alt detail brand",
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

    /// Probe: the home slider is rendered
    pub async fn is_home_page_visible(&self) -> bool {
        self.page.is_visible(&self.slider).await
    }

    /// Open the products listing
    pub async fn click_products_link(&self) -> ComprarResult<()> {
        self.page.click(&self.products_link).await
    }

    /// Probe: the "All Products" heading is visible
    pub async fn is_all_products_page_visible(&self) -> bool {
        self.page.is_visible(&self.all_products_title).await
    }

    /// Probe: the product grid is visible
    pub async fn is_products_list_visible(&self) -> bool {
        self.page.is_visible(&self.products_list).await
    }

    /// Number of product tiles on the page; 0 when none appear in time
    pub async fn products_count(&self) -> usize {
        if !self.page.is_present(&self.product_items).await {
            return 0;
        }
        self.page
            .driver()
            .find_all(self.product_items.selector())
            .await
            .map(|items| items.len())
            .unwrap_or(0)
    }

    /// Open the first product's detail page
    pub async fn click_first_product_view(&self) -> ComprarResult<()> {
        self.page.click(&self.first_view_product).await
    }

    /// Probe: a product-detail panel is open under either markup variant
    pub async fn is_product_detail_page_loaded(&self) -> bool {
        for locator in self.name_chain.iter() {
            if self.page.is_present(locator).await {
                return true;
            }
        }
        false
    }

    /// Product name from the detail panel
    pub async fn product_name(&self) -> Option<String> {
        self.page.first_visible_text(&self.name_chain).await
    }

    /// Product category from the detail panel
    pub async fn product_category(&self) -> Option<String> {
        self.page.first_visible_text(&self.category_chain).await
    }

    /// Product price from the detail panel
    pub async fn product_price(&self) -> Option<String> {
        self.page.first_visible_text(&self.price_chain).await
    }

    /// Product availability, ending in a paragraph keyword scan
    pub async fn product_availability(&self) -> Option<String> {
        if let Some(text) = self.page.first_visible_text(&self.availability_chain).await {
            return Some(text);
        }
        self.scan_paragraphs(&["availability", "in stock", "out of stock"])
            .await
    }

    /// Product condition, ending in a paragraph keyword scan
    pub async fn product_condition(&self) -> Option<String> {
        if let Some(text) = self.page.first_visible_text(&self.condition_chain).await {
            return Some(text);
        }
        self.scan_paragraphs(&["condition", "new", "used"]).await
    }

    /// Product brand, ending in a paragraph keyword scan
    pub async fn product_brand(&self) -> Option<String> {
        if let Some(text) = self.page.first_visible_text(&self.brand_chain).await {
            return Some(text);
        }
        let mut keywords: Vec<&str> = vec!["brand"];
        keywords.extend_from_slice(&KNOWN_BRANDS);
        self.scan_paragraphs(&keywords).await
    }

    /// Read every detail field, partitioned into present and missing
    pub async fn collect_detail_fields(
        &self,
    ) -> (BTreeMap<&'static str, String>, Vec<&'static str>) {
        let values = [
            self.product_name().await,
            self.product_category().await,
            self.product_price().await,
            self.product_availability().await,
            self.product_condition().await,
            self.product_brand().await,
        ];

        let mut present = BTreeMap::new();
        let mut missing = Vec::new();
        for (field, value) in DETAIL_FIELDS.iter().zip(values) {
            match value {
                Some(text) => {
                    let _ = present.insert(*field, text);
                }
                None => missing.push(*field),
            }
        }
        (present, missing)
    }

    /// Enter a term in the search box and submit
    pub async fn search_product(&self, term: &str) -> ComprarResult<()> {
        self.page.clear_and_enter_text(&self.search_box, term).await?;
        self.page.click(&self.search_button).await
    }

    /// Probe: the "Searched Products" heading is visible
    pub async fn is_searched_products_visible(&self) -> bool {
        self.page.is_visible(&self.searched_products_title).await
    }

    /// Number of tiles in the search results; 0 when none appear in time
    pub async fn search_results_count(&self) -> usize {
        self.products_count().await
    }

    async fn scan_paragraphs(&self, keywords: &[&str]) -> Option<String> {
        let paragraphs = self
            .page
            .driver()
            .find_all(self.detail_paragraphs.selector())
            .await
            .ok()?;
        paragraphs
            .iter()
            .find(|p| {
                let text = p.text.to_lowercase();
                keywords.iter().any(|keyword| text.contains(keyword))
            })
            .map(|p| p.text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{ElementSnapshot, MockDriver};
    use crate::wait::Waiter;
    use std::time::Duration;

    const PARAGRAPHS: &str = "//div[@class='product-information']//p";

    fn search(driver: &MockDriver) -> SearchPage<'_> {
        SearchPage::with_page(Page::new(driver).with_waiter(
            Waiter::new()
                .with_timeout(Duration::from_millis(60))
                .with_poll_interval(Duration::from_millis(10)),
        ))
    }

    #[tokio::test]
    async fn test_products_count_zero_when_grid_absent() {
        let driver = MockDriver::new();
        assert_eq!(search(&driver).products_count().await, 0);
    }

    #[tokio::test]
    async fn test_products_count_counts_every_tile() {
        let driver = MockDriver::new();
        for name in ["Blue Top", "Men Tshirt", "Sleeveless Dress"] {
            driver.install(
                "//div[@class='productinfo text-center']",
                ElementSnapshot::new("div").with_text(name),
            );
        }
        assert_eq!(search(&driver).products_count().await, 3);
    }

    #[tokio::test]
    async fn test_product_name_prefers_primary_locator() {
        let driver = MockDriver::new();
        driver.install(
            "//div[@class='product-information']//h2",
            ElementSnapshot::new("h2").with_text("Blue Top"),
        );
        driver.install(
            "//div[contains(@class,'product-details')]//h2",
            ElementSnapshot::new("h2").with_text("Wrong Name"),
        );
        assert_eq!(
            search(&driver).product_name().await,
            Some("Blue Top".to_string())
        );
    }

    #[tokio::test]
    async fn test_availability_falls_back_to_paragraph_scan() {
        let driver = MockDriver::new();
        driver.install(
            PARAGRAPHS,
            ElementSnapshot::new("p").with_text("Category: Women > Tops"),
        );
        driver.install(
            PARAGRAPHS,
            ElementSnapshot::new("p").with_text("Availability: In Stock"),
        );
        assert_eq!(
            search(&driver).product_availability().await,
            Some("Availability: In Stock".to_string())
        );
    }

    #[tokio::test]
    async fn test_brand_scan_recognizes_known_brand_without_label() {
        let driver = MockDriver::new();
        driver.install(PARAGRAPHS, ElementSnapshot::new("p").with_text("Polo"));
        assert_eq!(search(&driver).product_brand().await, Some("Polo".to_string()));
    }

    #[tokio::test]
    async fn test_collect_detail_fields_partitions_present_and_missing() {
        let driver = MockDriver::new();
        driver.install(
            "//div[@class='product-information']//h2",
            ElementSnapshot::new("h2").with_text("Blue Top"),
        );
        driver.install(
            "//div[@class='product-information']//span/span",
            ElementSnapshot::new("span").with_text("Rs. 500"),
        );

        let (present, missing) = search(&driver).collect_detail_fields().await;
        assert_eq!(present.get("name"), Some(&"Blue Top".to_string()));
        assert_eq!(present.get("price"), Some(&"Rs. 500".to_string()));
        assert!(missing.contains(&"category"));
        assert!(missing.contains(&"brand"));
        assert_eq!(present.len() + missing.len(), 6);
    }

    #[tokio::test]
    async fn test_search_types_term_then_submits() {
        let driver = MockDriver::new();
        driver.install("search_product", ElementSnapshot::new("input"));
        driver.install("submit_search", ElementSnapshot::new("button"));

        search(&driver).search_product("top").await.unwrap();
        assert_eq!(driver.typed_into("search_product"), Some("top".to_string()));
        assert!(driver.was_called("click:submit_search"));
    }
}
