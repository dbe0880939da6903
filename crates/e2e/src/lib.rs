//! Storecheck E2E Harness
//!
//! Orchestrates the scenario suites against the storefront UI and the
//! bookings API:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                     SuiteRunner                            │
//! │   workers = policy::worker_count(ci, units)                │
//! │   retries = policy::retry_limit(ci)                        │
//! │   per scenario attempt:                                    │
//! │     ScenarioContext (fresh BookerClient + fresh driver)    │
//! │       ├── scenario body (sequential awaits)                │
//! │       ├── artifacts per policy (trace/screenshot/video)    │
//! │       └── teardown: best-effort deletion of tracked ids    │
//! ├────────────────────────────────────────────────────────────┤
//! │   suite::api  - bookings scenarios (Project::Api)          │
//! │   suite::ui   - storefront scenarios (Project::Ui)         │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Scenarios share nothing: isolation comes from fresh per-attempt
//! contexts plus unique, time-suffixed remote data, never from
//! client-side locking.

pub mod artifact;
pub mod config;
pub mod fixtures;
pub mod policy;
pub mod report;
pub mod runner;
pub mod scenario;
pub mod suite;

pub use config::HarnessConfig;
pub use report::{AttemptReport, ScenarioReport, SuiteReport};
pub use runner::{Selection, SuiteRunner};
pub use scenario::{Project, Scenario, ScenarioContext};
