//! Inventory (product listing) page

use std::sync::Arc;

use storecheck_common::{Error, Result};

use crate::catalog::product_slug;
use crate::driver::PageDriver;
use crate::selectors;

/// Title shown on the product listing
pub const PAGE_TITLE: &str = "Products";

/// The storefront product listing
pub struct InventoryPage {
    driver: Arc<dyn PageDriver>,
}

impl InventoryPage {
    pub fn new(driver: Arc<dyn PageDriver>) -> Self {
        Self { driver }
    }

    pub async fn title(&self) -> Result<String> {
        self.driver.text(selectors::TITLE).await
    }

    pub async fn add_to_cart(&self, product_name: &str) -> Result<()> {
        let selector = selectors::add_to_cart(&product_slug(product_name));
        self.driver.click(&selector).await
    }

    pub async fn remove_from_cart(&self, product_name: &str) -> Result<()> {
        let selector = selectors::remove_from_cart(&product_slug(product_name));
        self.driver.click(&selector).await
    }

    /// Item count from the cart badge. An absent badge is the canonical
    /// empty-cart signal, not an error.
    pub async fn cart_count(&self) -> Result<usize> {
        if !self.driver.is_visible(selectors::CART_BADGE).await? {
            return Ok(0);
        }
        let text = self.driver.text(selectors::CART_BADGE).await?;
        text.trim()
            .parse()
            .map_err(|_| Error::Driver(format!("cart badge text {:?} is not a count", text)))
    }

    pub async fn go_to_cart(&self) -> Result<()> {
        self.driver.click(selectors::CART_LINK).await
    }

    /// End the session through the burger menu.
    pub async fn sign_out(&self) -> Result<()> {
        self.driver.click(selectors::MENU_BUTTON).await?;
        self.driver.click(selectors::LOGOUT_LINK).await
    }
}
