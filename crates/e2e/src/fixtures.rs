//! Shared scenario data
//!
//! Known storefront accounts and baseline bookings. Scenarios derive
//! per-run uniqueness from `ScenarioContext::unique_name`, never from
//! these fixtures directly.

use chrono::NaiveDate;

use storecheck_common::{Booking, BookingDates};

/// A storefront account
#[derive(Debug, Clone, Copy)]
pub struct StorefrontUser {
    pub username: &'static str,
    pub password: &'static str,
}

pub const STANDARD_USER: StorefrontUser = StorefrontUser {
    username: "standard_user",
    password: "secret_sauce",
};

pub const LOCKED_OUT_USER: StorefrontUser = StorefrontUser {
    username: "locked_out_user",
    password: "secret_sauce",
};

// Catalog products referenced by the UI scenarios
pub const BACKPACK: &str = "Sauce Labs Backpack";
pub const BIKE_LIGHT: &str = "Sauce Labs Bike Light";
pub const BOLT_TSHIRT: &str = "Sauce Labs Bolt T-Shirt";

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

/// Baseline booking most API scenarios start from
pub fn sample_booking() -> Booking {
    Booking {
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        total_price: 150,
        deposit_paid: true,
        dates: BookingDates {
            checkin: date(2024, 1, 1),
            checkout: date(2024, 1, 5),
        },
        additional_needs: Some("Breakfast".to_string()),
    }
}

/// Longer stay without a deposit
pub fn extended_booking() -> Booking {
    Booking {
        first_name: "Jane".to_string(),
        last_name: "Smith".to_string(),
        total_price: 500,
        deposit_paid: false,
        dates: BookingDates {
            checkin: date(2024, 3, 15),
            checkout: date(2024, 3, 30),
        },
        additional_needs: Some("Late checkout".to_string()),
    }
}

/// Single night, no extras
pub fn minimal_booking() -> Booking {
    Booking {
        first_name: "Bob".to_string(),
        last_name: "Wilson".to_string(),
        total_price: 100,
        deposit_paid: true,
        dates: BookingDates {
            checkin: date(2024, 2, 10),
            checkout: date(2024, 2, 11),
        },
        additional_needs: None,
    }
}
