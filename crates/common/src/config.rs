//! Configuration values handed to the harness by its caller
//!
//! The harness never reads the environment itself; the outermost entry
//! point resolves environment variables and passes the results in as plain
//! values.

use serde::{Deserialize, Serialize};

/// Credential pair for the bookings service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new("admin", "password123")
    }
}
