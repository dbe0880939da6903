//! Checkout flow state machine
//!
//! Stages advance `Cart -> Information -> Overview -> Complete`, with
//! `cancel` stepping `Overview -> Cart`. `Complete` is terminal for a
//! session; re-entering the flow starts a fresh machine while the cart
//! itself is unaffected.

use std::fmt;

use crate::error::{Error, Result};

/// Stage of the checkout flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStage {
    Cart,
    Information,
    Overview,
    Complete,
}

impl fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutStage::Cart => write!(f, "cart"),
            CheckoutStage::Information => write!(f, "information"),
            CheckoutStage::Overview => write!(f, "overview"),
            CheckoutStage::Complete => write!(f, "complete"),
        }
    }
}

/// Buyer details the Information stage requires
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDetails {
    pub first_name: String,
    pub last_name: String,
    pub postal_code: String,
}

impl ContactDetails {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            postal_code: postal_code.into(),
        }
    }

    /// All three fields must be non-empty before the flow may advance.
    pub fn is_complete(&self) -> bool {
        !self.first_name.is_empty() && !self.last_name.is_empty() && !self.postal_code.is_empty()
    }
}

/// The checkout state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutFlow {
    stage: CheckoutStage,
}

impl CheckoutFlow {
    pub fn new() -> Self {
        Self {
            stage: CheckoutStage::Cart,
        }
    }

    /// A flow that has already left the cart, for callers entering at the
    /// information form.
    pub fn at_information() -> Self {
        Self {
            stage: CheckoutStage::Information,
        }
    }

    pub fn stage(&self) -> CheckoutStage {
        self.stage
    }

    /// Cart -> Information
    pub fn proceed(&mut self) -> Result<()> {
        self.step(CheckoutStage::Cart, CheckoutStage::Information)
    }

    /// Information -> Overview; requires complete contact details.
    pub fn submit_information(&mut self, details: &ContactDetails) -> Result<()> {
        if self.stage != CheckoutStage::Information || !details.is_complete() {
            return Err(Error::state_transition(self.stage, CheckoutStage::Overview));
        }
        self.stage = CheckoutStage::Overview;
        Ok(())
    }

    /// Overview -> Complete
    pub fn finish(&mut self) -> Result<()> {
        self.step(CheckoutStage::Overview, CheckoutStage::Complete)
    }

    /// Overview -> Cart
    pub fn cancel(&mut self) -> Result<()> {
        self.step(CheckoutStage::Overview, CheckoutStage::Cart)
    }

    fn step(&mut self, from: CheckoutStage, to: CheckoutStage) -> Result<()> {
        if self.stage != from {
            return Err(Error::state_transition(self.stage, to));
        }
        self.stage = to;
        Ok(())
    }
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> ContactDetails {
        ContactDetails::new("John", "Doe", "12345")
    }

    #[test]
    fn happy_path_reaches_complete() {
        let mut flow = CheckoutFlow::new();
        flow.proceed().unwrap();
        flow.submit_information(&details()).unwrap();
        flow.finish().unwrap();
        assert_eq!(flow.stage(), CheckoutStage::Complete);
    }

    #[test]
    fn cancel_returns_to_cart() {
        let mut flow = CheckoutFlow::at_information();
        flow.submit_information(&details()).unwrap();
        flow.cancel().unwrap();
        assert_eq!(flow.stage(), CheckoutStage::Cart);
    }

    #[test]
    fn empty_postal_code_blocks_information() {
        let mut flow = CheckoutFlow::at_information();
        let incomplete = ContactDetails::new("John", "Doe", "");
        assert!(flow.submit_information(&incomplete).is_err());
        assert_eq!(flow.stage(), CheckoutStage::Information);
    }

    #[test]
    fn finish_requires_overview() {
        let mut flow = CheckoutFlow::at_information();
        assert!(flow.finish().is_err());
        assert_eq!(flow.stage(), CheckoutStage::Information);
    }

    #[test]
    fn complete_is_terminal() {
        let mut flow = CheckoutFlow::at_information();
        flow.submit_information(&details()).unwrap();
        flow.finish().unwrap();
        assert!(flow.finish().is_err());
        assert!(flow.cancel().is_err());
        assert_eq!(flow.stage(), CheckoutStage::Complete);
    }
}
