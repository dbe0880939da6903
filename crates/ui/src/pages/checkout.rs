//! Checkout pages (information, overview, complete)
//!
//! Drives the `CheckoutFlow` state machine alongside the page: transitions
//! are validated against the machine before any element is touched, so a
//! misordered scenario fails with a `StateTransition` error rather than a
//! selector timeout.

use std::sync::Arc;

use storecheck_common::{CheckoutFlow, CheckoutStage, ContactDetails, Error, Result};

use crate::driver::PageDriver;
use crate::selectors;

/// Exact confirmation banner the complete page shows
pub const COMPLETE_BANNER: &str = "Thank you for your order!";

/// Body text under the confirmation banner
pub const DISPATCHED_TEXT: &str =
    "Your order has been dispatched, and will arrive just as fast as the pony can get there!";

/// The checkout flow, entered from the cart page
pub struct CheckoutPage {
    driver: Arc<dyn PageDriver>,
    flow: CheckoutFlow,
}

impl CheckoutPage {
    /// A checkout that has just been entered, sitting at the information
    /// form.
    pub fn new(driver: Arc<dyn PageDriver>) -> Self {
        Self {
            driver,
            flow: CheckoutFlow::at_information(),
        }
    }

    pub fn stage(&self) -> CheckoutStage {
        self.flow.stage()
    }

    /// Fill and submit the information form. Rejected without touching the
    /// page when any field is empty.
    pub async fn submit_information(&mut self, details: &ContactDetails) -> Result<()> {
        self.flow.submit_information(details)?;
        self.driver
            .fill(selectors::FIRST_NAME, &details.first_name)
            .await?;
        self.driver
            .fill(selectors::LAST_NAME, &details.last_name)
            .await?;
        self.driver
            .fill(selectors::POSTAL_CODE, &details.postal_code)
            .await?;
        self.driver.click(selectors::CONTINUE).await
    }

    /// Place the order from the overview.
    pub async fn finish(&mut self) -> Result<()> {
        self.flow.finish()?;
        self.driver.click(selectors::FINISH).await
    }

    /// Abandon the overview and return to the cart; the cart state is
    /// untouched.
    pub async fn cancel(&mut self) -> Result<()> {
        self.flow.cancel()?;
        self.driver.click(selectors::CANCEL).await
    }

    /// Return to the inventory after completing an order.
    pub async fn back_to_products(&self) -> Result<()> {
        if self.flow.stage() != CheckoutStage::Complete {
            return Err(Error::state_transition(self.flow.stage(), "inventory"));
        }
        self.driver.click(selectors::BACK_HOME).await
    }

    /// Combined visibility and content check on the confirmation banner.
    /// Both must hold together; checking them separately would race a
    /// banner that is visible with stale text.
    pub async fn assert_complete(&self) -> Result<()> {
        if self.flow.stage() != CheckoutStage::Complete {
            return Err(Error::Assertion(format!(
                "checkout flow is at {}, not complete",
                self.flow.stage()
            )));
        }
        let visible = self.driver.is_visible(selectors::COMPLETE_HEADER).await?;
        let text = if visible {
            self.driver.text(selectors::COMPLETE_HEADER).await?
        } else {
            String::new()
        };
        if !visible || text != COMPLETE_BANNER {
            return Err(Error::Assertion(format!(
                "completion banner check failed (visible: {}, text: {:?})",
                visible, text
            )));
        }
        Ok(())
    }

    /// Body text of the confirmation page.
    pub async fn completion_text(&self) -> Result<String> {
        self.driver.text(selectors::COMPLETE_TEXT).await
    }
}
