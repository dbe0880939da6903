//! Harness configuration
//!
//! Built by the entry point from its arguments and passed in as plain
//! values; nothing in the harness reads the environment directly.

use std::path::PathBuf;
use std::time::Duration;

use storecheck_common::Credentials;

/// Configuration for a suite run
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Base URL of the bookings API
    pub api_base_url: String,

    /// Base URL of the storefront UI
    pub ui_base_url: String,

    /// Credentials for mutating booking operations
    pub credentials: Credentials,

    /// Unattended mode: full worker utilization and per-scenario retries
    pub ci: bool,

    /// Run browsers without a visible window
    pub headless: bool,

    /// Override the computed worker count
    pub workers: Option<usize>,

    /// Directory artifacts and the suite report are written under
    pub artifact_dir: PathBuf,

    /// Total time budget for one scenario attempt
    pub scenario_budget: Duration,

    /// Bound on every API request
    pub api_timeout: Duration,

    /// Bound on in-page interactions
    pub action_timeout: Duration,

    /// Bound on full page navigations
    pub navigation_timeout: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://restful-booker.herokuapp.com".to_string(),
            ui_base_url: "https://www.saucedemo.com".to_string(),
            credentials: Credentials::default(),
            ci: false,
            headless: true,
            workers: None,
            artifact_dir: PathBuf::from("test-results"),
            scenario_budget: Duration::from_secs(30),
            api_timeout: Duration::from_secs(10),
            action_timeout: Duration::from_secs(10),
            navigation_timeout: Duration::from_secs(30),
        }
    }
}
