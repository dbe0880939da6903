//! Scenario registry, partitioned into the API and UI projects

pub mod api;
pub mod ui;

use crate::scenario::Scenario;

/// Every registered scenario, API project first for fast feedback.
pub fn all() -> Vec<Scenario> {
    let mut scenarios = api::scenarios();
    scenarios.extend(ui::scenarios());
    scenarios
}
