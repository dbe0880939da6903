//! Storecheck API client
//!
//! Typed operations over the bookings REST service. The client owns the
//! mapping from domain verbs to HTTP verbs and status codes; it performs no
//! local validation of booking data (the server is the single source of
//! truth for field constraints) and it never retries at the network layer.

pub mod client;

pub use client::{BookerClient, DeleteOutcome};
