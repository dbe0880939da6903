//! Typed client for the bookings service

use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, COOKIE};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use storecheck_common::{
    AuthOutcome, AuthToken, Booking, BookingId, BookingPatch, CreatedBooking, Error, Result,
    TraceSink,
};

/// Outcome of a delete. Deleting an id that is already gone is reported,
/// not raised: cleanup paths treat it as non-fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Rejected(u16),
}

impl DeleteOutcome {
    pub fn is_deleted(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted)
    }
}

/// Client for the bookings REST API
///
/// One instance per scenario; instances share nothing, which is what makes
/// running scenarios in parallel safe.
pub struct BookerClient {
    http: reqwest::Client,
    base_url: String,
    trace: Option<TraceSink>,
}

impl BookerClient {
    /// Build a client against the given base URL. Every request is bounded
    /// by the same timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport)?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            http,
            base_url,
            trace: None,
        })
    }

    /// Record every operation into the given trace sink.
    pub fn with_trace(mut self, sink: TraceSink) -> Self {
        self.trace = Some(sink);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn record(&self, operation: &str, ok: bool, started: Instant) {
        if let Some(sink) = &self.trace {
            sink.record(operation, ok, started.elapsed());
        }
    }

    /// Reachability probe. True only when the service answers the liveness
    /// endpoint with its expected status; any transport failure is
    /// swallowed into `false`.
    pub async fn health_check(&self) -> bool {
        let started = Instant::now();
        let ok = match self.http.get(self.url("/ping")).send().await {
            Ok(response) => response.status() == StatusCode::CREATED,
            Err(err) => {
                debug!("health check failed: {}", err);
                false
            }
        };
        self.record("GET /ping", ok, started);
        ok
    }

    /// Exchange credentials for a token.
    ///
    /// The service answers bad credentials with a success status and a
    /// `reason` payload, so rejection comes back as `AuthOutcome::Rejected`
    /// rather than an error; a success response carrying neither token nor
    /// reason is an `Authentication` error.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<AuthOutcome> {
        let started = Instant::now();
        let result = self.authenticate_inner(username, password).await;
        self.record("POST /auth", result.is_ok(), started);
        result
    }

    async fn authenticate_inner(&self, username: &str, password: &str) -> Result<AuthOutcome> {
        let response = self
            .http
            .post(self.url("/auth"))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(unexpected("POST /auth", status));
        }

        let body: Value = response.json().await.map_err(transport)?;
        if let Some(token) = body.get("token").and_then(Value::as_str) {
            if token.is_empty() {
                return Err(Error::Authentication("empty token in response".to_string()));
            }
            Ok(AuthOutcome::Granted(AuthToken::new(token)))
        } else if let Some(reason) = body.get("reason").and_then(Value::as_str) {
            Ok(AuthOutcome::Rejected {
                reason: reason.to_string(),
            })
        } else {
            Err(Error::Authentication(
                "response carried neither token nor reason".to_string(),
            ))
        }
    }

    /// Create a booking and return the server-assigned id alongside the
    /// stored data. Input is not validated locally.
    pub async fn create_booking(&self, booking: &Booking) -> Result<CreatedBooking> {
        let started = Instant::now();
        let result = self.create_booking_inner(booking).await;
        self.record("POST /booking", result.is_ok(), started);
        result
    }

    async fn create_booking_inner(&self, booking: &Booking) -> Result<CreatedBooking> {
        let response = self
            .http
            .post(self.url("/booking"))
            .header(ACCEPT, "application/json")
            .json(booking)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(unexpected("POST /booking", status));
        }
        response.json().await.map_err(transport)
    }

    /// Fetch a booking by id.
    pub async fn get_booking(&self, id: BookingId) -> Result<Booking> {
        let started = Instant::now();
        let result = self.get_booking_inner(id).await;
        self.record(&format!("GET /booking/{}", id), result.is_ok(), started);
        result
    }

    async fn get_booking_inner(&self, id: BookingId) -> Result<Booking> {
        let response = self
            .http
            .get(self.url(&format!("/booking/{}", id)))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound { id });
        }
        if !status.is_success() {
            return Err(unexpected(&format!("GET /booking/{}", id), status));
        }
        response.json().await.map_err(transport)
    }

    /// Full replacement of a booking. Requires a valid token.
    pub async fn update_booking(
        &self,
        id: BookingId,
        booking: &Booking,
        token: &AuthToken,
    ) -> Result<Booking> {
        let operation = format!("PUT /booking/{}", id);
        let started = Instant::now();
        let request = self
            .http
            .put(self.url(&format!("/booking/{}", id)))
            .header(ACCEPT, "application/json")
            .header(COOKIE, format!("token={}", token.as_str()))
            .json(booking);
        let result = self.send_mutation(request, &operation, id).await;
        self.record(&operation, result.is_ok(), started);
        result
    }

    /// Merge only the provided fields into a booking; the service leaves
    /// omitted fields unchanged. Requires a valid token.
    pub async fn patch_booking(
        &self,
        id: BookingId,
        patch: &BookingPatch,
        token: &AuthToken,
    ) -> Result<Booking> {
        let operation = format!("PATCH /booking/{}", id);
        let started = Instant::now();
        let request = self
            .http
            .patch(self.url(&format!("/booking/{}", id)))
            .header(ACCEPT, "application/json")
            .header(COOKIE, format!("token={}", token.as_str()))
            .json(patch);
        let result = self.send_mutation(request, &operation, id).await;
        self.record(&operation, result.is_ok(), started);
        result
    }

    async fn send_mutation(
        &self,
        request: reqwest::RequestBuilder,
        operation: &str,
        id: BookingId,
    ) -> Result<Booking> {
        let response = request.send().await.map_err(transport)?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            return Err(Error::Authorization {
                operation: operation.to_string(),
            });
        }
        if status == StatusCode::NOT_FOUND || status == StatusCode::METHOD_NOT_ALLOWED {
            // The service answers mutations of absent ids with 405.
            return Err(Error::NotFound { id });
        }
        if !status.is_success() {
            return Err(unexpected(operation, status));
        }
        response.json().await.map_err(transport)
    }

    /// Delete a booking. Requires a valid token. A non-success answer for
    /// an id that is already gone is a `Rejected` outcome, not an error.
    pub async fn delete_booking(&self, id: BookingId, token: &AuthToken) -> Result<DeleteOutcome> {
        let operation = format!("DELETE /booking/{}", id);
        let started = Instant::now();
        let result = self.delete_booking_inner(id, token, &operation).await;
        self.record(&operation, result.is_ok(), started);
        result
    }

    async fn delete_booking_inner(
        &self,
        id: BookingId,
        token: &AuthToken,
        operation: &str,
    ) -> Result<DeleteOutcome> {
        let response = self
            .http
            .delete(self.url(&format!("/booking/{}", id)))
            .header(COOKIE, format!("token={}", token.as_str()))
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            return Err(Error::Authorization {
                operation: operation.to_string(),
            });
        }
        if status.is_success() {
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::Rejected(status.as_u16()))
        }
    }
}

fn transport(err: reqwest::Error) -> Error {
    Error::Transport(err.to_string())
}

fn unexpected(operation: &str, status: StatusCode) -> Error {
    Error::UnexpectedStatus {
        operation: operation.to_string(),
        status: status.as_u16(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_normalized() {
        let client = BookerClient::new("http://127.0.0.1:3001///", Duration::from_secs(1)).unwrap();
        assert_eq!(client.url("/ping"), "http://127.0.0.1:3001/ping");
    }
}
