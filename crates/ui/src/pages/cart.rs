//! Cart page

use std::sync::Arc;

use storecheck_common::Result;

use crate::catalog::product_slug;
use crate::driver::PageDriver;
use crate::selectors;

/// The storefront cart page
pub struct CartPage {
    driver: Arc<dyn PageDriver>,
}

impl CartPage {
    pub fn new(driver: Arc<dyn PageDriver>) -> Self {
        Self { driver }
    }

    /// Names of the items in the cart, in display order.
    pub async fn item_names(&self) -> Result<Vec<String>> {
        self.driver.texts(selectors::ITEM_NAME).await
    }

    pub async fn remove_item(&self, product_name: &str) -> Result<()> {
        let selector = selectors::remove_from_cart(&product_slug(product_name));
        self.driver.click(&selector).await
    }

    pub async fn proceed_to_checkout(&self) -> Result<()> {
        self.driver.click(selectors::CHECKOUT).await
    }

    /// Back to the inventory; the cart contents are preserved.
    pub async fn continue_shopping(&self) -> Result<()> {
        self.driver.click(selectors::CONTINUE_SHOPPING).await
    }
}
