//! Locator abstraction for element selection.
//!
//! A [`Locator`] pairs a [`Selector`] with a human-readable label so wait
//! failures name the element in plain language instead of echoing an XPath.
//! Page objects that tolerate DOM drift declare a [`FallbackChain`]: an
//! ordered list of locators for one logical element, evaluated
//! first-match-wins.

use std::time::Duration;

/// Selector strategy for locating elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// CSS selector (e.g., "button.primary")
    Css(String),
    /// XPath selector
    XPath(String),
    /// Element id attribute
    Id(String),
    /// Element name attribute
    Name(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(selector: impl Into<String>) -> Self {
        Self::XPath(selector.into())
    }

    /// Create an id selector
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Create a name-attribute selector
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// The underlying selector string, without strategy information
    #[must_use]
    pub fn raw(&self) -> &str {
        match self {
            Self::Css(s) | Self::XPath(s) | Self::Id(s) | Self::Name(s) => s,
        }
    }

    /// Equivalent CSS selector, for driver operations that can only
    /// address elements through CSS. XPath has no such equivalent.
    #[must_use]
    pub fn as_css(&self) -> Option<String> {
        match self {
            Self::Css(s) => Some(s.clone()),
            Self::Id(id) => Some(format!("#{id}")),
            Self::Name(name) => Some(format!("[name='{name}']")),
            Self::XPath(_) => None,
        }
    }

    /// Render a JavaScript expression that resolves to the first matching
    /// element (or `null`)
    #[must_use]
    pub fn to_js_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelector({s:?})"),
            Self::XPath(s) => {
                format!("document.evaluate({s:?}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue")
            }
            Self::Id(id) => format!("document.getElementById({id:?})"),
            Self::Name(name) => format!("document.querySelector('[name={name:?}]')"),
        }
    }

    /// Render a JavaScript expression that resolves to an array of all
    /// matching elements
    #[must_use]
    pub fn to_js_query_all(&self) -> String {
        match self {
            Self::Css(s) => format!("Array.from(document.querySelectorAll({s:?}))"),
            Self::XPath(s) => format!(
                "(function() {{ const r = document.evaluate({s:?}, document, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); const out = []; for (let i = 0; i < r.snapshotLength; i++) out.push(r.snapshotItem(i)); return out; }})()"
            ),
            Self::Id(id) => {
                format!("[document.getElementById({id:?})].filter(Boolean)")
            }
            Self::Name(name) => {
                format!("Array.from(document.querySelectorAll('[name={name:?}]'))")
            }
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css={s}"),
            Self::XPath(s) => write!(f, "xpath={s}"),
            Self::Id(s) => write!(f, "id={s}"),
            Self::Name(s) => write!(f, "name={s}"),
        }
    }
}

/// A locator for finding one logical element.
///
/// Locators are immutable and declared once per page object; nothing
/// resolved through a locator is cached, every use re-queries the live
/// document.
#[derive(Debug, Clone)]
pub struct Locator {
    selector: Selector,
    label: String,
    timeout: Option<Duration>,
}

impl Locator {
    /// Create a locator with a descriptive label
    #[must_use]
    pub fn new(selector: Selector, label: impl Into<String>) -> Self {
        Self {
            selector,
            label: label.into(),
            timeout: None,
        }
    }

    /// Override the wait timeout for this locator only
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the descriptive label
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the per-locator timeout override, if any
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label, self.selector)
    }
}

/// An ordered chain of alternative locators for one logical element.
///
/// The target site renders the same logical element under different markup
/// depending on page variant, so several page objects keep two to four
/// spellings of the same thing. Resolution walks the chain in declared
/// order and stops at the first locator that satisfies the caller's probe;
/// when every link fails the caller decides the sentinel (usually `None`).
#[derive(Debug, Clone)]
pub struct FallbackChain {
    label: String,
    locators: Vec<Locator>,
}

impl FallbackChain {
    /// Create a chain with its primary locator
    #[must_use]
    pub fn new(label: impl Into<String>, primary: Locator) -> Self {
        Self {
            label: label.into(),
            locators: vec![primary],
        }
    }

    /// Append an alternative, tried after everything declared before it
    #[must_use]
    pub fn or(mut self, alternative: Locator) -> Self {
        self.locators.push(alternative);
        self
    }

    /// Get the chain's label
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The primary locator
    #[must_use]
    pub fn primary(&self) -> &Locator {
        &self.locators[0]
    }

    /// Iterate over the locators in declared order
    pub fn iter(&self) -> impl Iterator<Item = &Locator> {
        self.locators.iter()
    }

    /// Number of alternatives, primary included
    #[must_use]
    pub fn len(&self) -> usize {
        self.locators.len()
    }

    /// A chain always holds at least its primary locator
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod selector_tests {
        use super::*;

        #[test]
        fn test_css_selector_query() {
            let selector = Selector::css("button.primary");
            let query = selector.to_js_query();
            assert!(query.contains("querySelector"));
            assert!(query.contains("button.primary"));
        }

        #[test]
        fn test_xpath_selector_query() {
            let selector = Selector::xpath("//button[@id='submit']");
            let query = selector.to_js_query();
            assert!(query.contains("evaluate"));
            assert!(query.contains("XPathResult"));
        }

        #[test]
        fn test_id_selector_query() {
            let selector = Selector::id("slider-carousel");
            let query = selector.to_js_query();
            assert!(query.contains("getElementById"));
            assert!(query.contains("slider-carousel"));
        }

        #[test]
        fn test_name_selector_query() {
            let selector = Selector::name("card_number");
            assert!(selector.to_js_query().contains("[name="));
        }

        #[test]
        fn test_query_all_returns_array_expression() {
            let selector = Selector::css("div.productinfo");
            let query = selector.to_js_query_all();
            assert!(query.contains("querySelectorAll"));
        }

        #[test]
        fn test_xpath_query_all_snapshots() {
            let selector = Selector::xpath("//a[contains(text(),'View Product')]");
            let query = selector.to_js_query_all();
            assert!(query.contains("snapshotLength"));
        }

        #[test]
        fn test_as_css() {
            assert_eq!(Selector::id("quantity").as_css(), Some("#quantity".to_string()));
            assert_eq!(
                Selector::name("upload_file").as_css(),
                Some("[name='upload_file']".to_string())
            );
            assert_eq!(Selector::xpath("//h2").as_css(), None);
        }

        #[test]
        fn test_raw_strips_strategy() {
            assert_eq!(Selector::id("quantity").raw(), "quantity");
            assert_eq!(Selector::xpath("//h2").raw(), "//h2");
        }

        #[test]
        fn test_display_names_strategy() {
            assert_eq!(Selector::id("days").to_string(), "id=days");
            assert_eq!(Selector::css("p.lead").to_string(), "css=p.lead");
        }
    }

    mod locator_tests {
        use super::*;

        #[test]
        fn test_locator_label() {
            let locator = Locator::new(Selector::id("search_product"), "search box");
            assert_eq!(locator.label(), "search box");
            assert!(locator.timeout().is_none());
        }

        #[test]
        fn test_locator_timeout_override() {
            let locator = Locator::new(Selector::css("button"), "button")
                .with_timeout(Duration::from_secs(3));
            assert_eq!(locator.timeout(), Some(Duration::from_secs(3)));
        }

        #[test]
        fn test_locator_display_includes_label_and_selector() {
            let locator = Locator::new(Selector::id("quantity"), "quantity input");
            let text = locator.to_string();
            assert!(text.contains("quantity input"));
            assert!(text.contains("id=quantity"));
        }
    }

    mod fallback_chain_tests {
        use super::*;

        #[test]
        fn test_chain_preserves_declared_order() {
            let chain = FallbackChain::new(
                "view cart link",
                Locator::new(Selector::xpath("//a[@href='/view_cart']"), "primary"),
            )
            .or(Locator::new(Selector::xpath("//p//a[@href='/view_cart']"), "alt"))
            .or(Locator::new(Selector::xpath("//u[text()='View Cart']"), "alt 2"));

            let labels: Vec<&str> = chain.iter().map(Locator::label).collect();
            assert_eq!(labels, vec!["primary", "alt", "alt 2"]);
            assert_eq!(chain.len(), 3);
        }

        #[test]
        fn test_chain_primary_is_first() {
            let chain = FallbackChain::new(
                "login heading",
                Locator::new(Selector::xpath("//h2[contains(text(),'Login')]"), "heading"),
            );
            assert_eq!(chain.primary().label(), "heading");
            assert!(!chain.is_empty());
        }
    }
}
