//! Storecheck UI abstractions
//!
//! Page objects for the storefront (login, inventory, cart, checkout) built
//! on top of an element-query capability, the `PageDriver` trait. Two
//! drivers ship with the crate:
//!
//! - `PlaywrightDriver` controls a real browser through a node subprocess
//!   speaking a JSON-line protocol
//! - `SimDriver` is an in-memory storefront behind the same selector
//!   contract, for hermetic runs without a browser
//!
//! Product-name resolution lives in `catalog` as a single pure function so
//! the add and remove paths can never derive different identifiers for the
//! same product.

pub mod catalog;
pub mod driver;
pub mod pages;
pub mod playwright;
pub mod selectors;
pub mod sim;

pub use driver::{DriverConfig, DriverFactory, PageDriver, TracedDriver};
pub use pages::{CartPage, CheckoutPage, InventoryPage, LoginPage};
pub use playwright::{PlaywrightDriver, PlaywrightDriverFactory};
pub use sim::{SimDriver, SimDriverFactory};
