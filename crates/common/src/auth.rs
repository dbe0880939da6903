//! Auth token and the tagged authentication outcome

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Opaque credential required by mutating booking operations.
///
/// Tokens are owned by the scenario that created them and passed explicitly
/// to the operations that need one; there is no ambient credential state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(raw: impl Into<String>) -> Self {
        AuthToken(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Outcome of an authentication attempt.
///
/// The remote service answers bad credentials with a normal success status
/// and a `reason` payload, so credential rejection is a value here rather
/// than an error: callers match on the outcome instead of inspecting the
/// payload themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Granted(AuthToken),
    Rejected { reason: String },
}

impl AuthOutcome {
    pub fn is_granted(&self) -> bool {
        matches!(self, AuthOutcome::Granted(_))
    }

    /// Unwrap the token, converting a credential rejection into the
    /// semantic-failure error for callers that require auth to succeed.
    pub fn into_token(self) -> Result<AuthToken> {
        match self {
            AuthOutcome::Granted(token) => Ok(token),
            AuthOutcome::Rejected { reason } => Err(Error::ValidationMismatch { reason }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn granted_outcome_yields_token() {
        let outcome = AuthOutcome::Granted(AuthToken::new("abc123"));
        assert!(outcome.is_granted());
        assert_eq!(outcome.into_token().unwrap().as_str(), "abc123");
    }

    #[test]
    fn rejected_outcome_surfaces_reason() {
        let outcome = AuthOutcome::Rejected {
            reason: "Bad credentials".to_string(),
        };
        match outcome.into_token() {
            Err(Error::ValidationMismatch { reason }) => assert_eq!(reason, "Bad credentials"),
            other => panic!("expected ValidationMismatch, got {:?}", other),
        }
    }
}
