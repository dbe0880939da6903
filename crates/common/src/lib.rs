//! Storecheck Common Library
//!
//! Shared building blocks for the E2E harness: the booking and storefront
//! domain entities, the error taxonomy every layer reports through, and the
//! trace sink that API and UI operations feed when trace capture is active.

pub mod auth;
pub mod booking;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod trace;

// Re-export commonly used types
pub use auth::{AuthOutcome, AuthToken};
pub use booking::{Booking, BookingDates, BookingId, BookingPatch, CreatedBooking};
pub use cart::CartState;
pub use checkout::{CheckoutFlow, CheckoutStage, ContactDetails};
pub use config::Credentials;
pub use error::{Error, Result};
pub use trace::{TraceEvent, TraceSink};

/// Storecheck version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
