//! Login page

use std::sync::Arc;

use storecheck_common::Result;

use crate::driver::PageDriver;
use crate::selectors;

/// Error banner shown for a locked-out account
pub const LOCKED_OUT_MESSAGE: &str = "Epic sadface: Sorry, this user has been locked out.";

/// Error banner shown for a credential mismatch
pub const BAD_CREDENTIALS_MESSAGE: &str =
    "Epic sadface: Username and password do not match any user in this service";

/// The storefront login page
pub struct LoginPage {
    driver: Arc<dyn PageDriver>,
}

impl LoginPage {
    pub fn new(driver: Arc<dyn PageDriver>) -> Self {
        Self { driver }
    }

    pub async fn open(&self) -> Result<()> {
        self.driver.goto("/").await
    }

    /// Submit credentials. A failed sign-in does not raise; the page leaves
    /// its error indicator visible and callers inspect it via
    /// `error_message`.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<()> {
        self.driver.fill(selectors::USERNAME, username).await?;
        self.driver.fill(selectors::PASSWORD, password).await?;
        self.driver.click(selectors::LOGIN_BUTTON).await
    }

    /// The error indicator's text, or None when no error is shown.
    pub async fn error_message(&self) -> Result<Option<String>> {
        if !self.driver.is_visible(selectors::ERROR_MESSAGE).await? {
            return Ok(None);
        }
        Ok(Some(self.driver.text(selectors::ERROR_MESSAGE).await?))
    }

    /// Whether the sign-in form is the current page.
    pub async fn is_open(&self) -> Result<bool> {
        self.driver.is_visible(selectors::LOGIN_BUTTON).await
    }
}
