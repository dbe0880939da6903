//! Booking entities mirroring the bookings wire contract
//!
//! Field names on the wire are the remote service's lowercase run-together
//! spellings; the serde renames below are the single place that mapping
//! lives.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Server-assigned booking identifier
pub type BookingId = i64;

/// Stay window for a booking. The server is authoritative for the
/// checkin <= checkout invariant; this layer does not enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDates {
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
}

/// A booking as the service stores it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(rename = "firstname")]
    pub first_name: String,

    #[serde(rename = "lastname")]
    pub last_name: String,

    #[serde(rename = "totalprice")]
    pub total_price: u32,

    #[serde(rename = "depositpaid")]
    pub deposit_paid: bool,

    #[serde(rename = "bookingdates")]
    pub dates: BookingDates,

    #[serde(
        rename = "additionalneeds",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_needs: Option<String>,
}

/// Response to a booking creation: the new id plus the stored booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedBooking {
    #[serde(rename = "bookingid")]
    pub id: BookingId,
    pub booking: Booking,
}

/// Partial update payload. Only populated fields are serialized; the
/// service leaves omitted fields unchanged, which is the behavioral
/// contract the patch scenarios verify.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookingPatch {
    #[serde(rename = "firstname", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(rename = "lastname", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(rename = "totalprice", skip_serializing_if = "Option::is_none")]
    pub total_price: Option<u32>,

    #[serde(rename = "depositpaid", skip_serializing_if = "Option::is_none")]
    pub deposit_paid: Option<bool>,

    #[serde(rename = "bookingdates", skip_serializing_if = "Option::is_none")]
    pub dates: Option<BookingDates>,

    #[serde(rename = "additionalneeds", skip_serializing_if = "Option::is_none")]
    pub additional_needs: Option<String>,
}

impl BookingPatch {
    pub fn with_first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    pub fn with_last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
        self
    }

    pub fn with_total_price(mut self, value: u32) -> Self {
        self.total_price = Some(value);
        self
    }

    pub fn with_deposit_paid(mut self, value: bool) -> Self {
        self.deposit_paid = Some(value);
        self
    }

    pub fn with_dates(mut self, value: BookingDates) -> Self {
        self.dates = Some(value);
        self
    }

    pub fn with_additional_needs(mut self, value: impl Into<String>) -> Self {
        self.additional_needs = Some(value.into());
        self
    }
}
