//! Page objects for the storefront screens.
//!
//! One module per logical screen. Each page object declares its locators
//! once and exposes intention-revealing operations built from the shared
//! [`crate::page::Page`] primitives; screens with unstable markup keep
//! fallback chains for the elements that drift.

pub mod cart;
pub mod checkout;
pub mod contact;
pub mod home;
pub mod login;
pub mod product_detail;
pub mod register;
pub mod search;

pub use cart::CartPage;
pub use checkout::CheckoutPage;
pub use contact::ContactPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use product_detail::ProductDetailPage;
pub use register::RegisterPage;
pub use search::SearchPage;
