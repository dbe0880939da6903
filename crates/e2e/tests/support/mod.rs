//! In-process mock of the bookings wire contract
//!
//! Implements the endpoints the client consumes (/ping, /auth, /booking)
//! with the service's observable quirks: bad credentials answered as a
//! success with a reason payload, token carried in a cookie, 201 for
//! delete, 405 for mutations of absent ids.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path as UrlPath, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};

use storecheck_e2e::HarnessConfig;

const USERNAME: &str = "admin";
const PASSWORD: &str = "password123";

#[derive(Default)]
pub struct BookerState {
    bookings: Mutex<HashMap<i64, Value>>,
    tokens: Mutex<HashSet<String>>,
    next_id: AtomicI64,
    /// Force delete requests to fail, for cleanup-policy tests.
    pub fail_deletes: AtomicBool,
}

impl BookerState {
    pub fn booking_count(&self) -> usize {
        self.bookings.lock().len()
    }

    pub fn booking_ids(&self) -> Vec<i64> {
        self.bookings.lock().keys().copied().collect()
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        let Some(cookie) = headers.get(header::COOKIE).and_then(|v| v.to_str().ok()) else {
            return false;
        };
        cookie.split(';').any(|part| {
            part.trim()
                .strip_prefix("token=")
                .map(|token| self.tokens.lock().contains(token))
                .unwrap_or(false)
        })
    }
}

/// A running mock service
pub struct MockBooker {
    pub base_url: String,
    pub state: Arc<BookerState>,
    handle: tokio::task::JoinHandle<()>,
}

impl MockBooker {
    pub async fn start() -> Self {
        let state = Arc::new(BookerState {
            next_id: AtomicI64::new(1),
            ..BookerState::default()
        });

        let app = Router::new()
            .route("/ping", get(ping))
            .route("/auth", post(auth))
            .route("/booking", post(create_booking))
            .route(
                "/booking/:id",
                get(get_booking)
                    .put(update_booking)
                    .patch(patch_booking)
                    .delete(delete_booking),
            )
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock booker");
        let addr = listener.local_addr().expect("mock booker addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock booker");
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            handle,
        }
    }
}

impl Drop for MockBooker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn ping() -> StatusCode {
    StatusCode::CREATED
}

async fn auth(State(state): State<Arc<BookerState>>, Json(body): Json<Value>) -> Json<Value> {
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    if username == USERNAME && password == PASSWORD {
        let token = format!("tok{}", state.next_id.fetch_add(1, Ordering::Relaxed));
        state.tokens.lock().insert(token.clone());
        Json(json!({ "token": token }))
    } else {
        // Success status with a semantic failure payload, like the real
        // service.
        Json(json!({ "reason": "Bad credentials" }))
    }
}

async fn create_booking(
    State(state): State<Arc<BookerState>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let id = state.next_id.fetch_add(1, Ordering::Relaxed);
    state.bookings.lock().insert(id, body.clone());
    Json(json!({ "bookingid": id, "booking": body }))
}

async fn get_booking(
    State(state): State<Arc<BookerState>>,
    UrlPath(id): UrlPath<i64>,
) -> Result<Json<Value>, StatusCode> {
    state
        .bookings
        .lock()
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_booking(
    State(state): State<Arc<BookerState>>,
    UrlPath(id): UrlPath<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    if !state.authorized(&headers) {
        return Err(StatusCode::FORBIDDEN);
    }
    let mut bookings = state.bookings.lock();
    match bookings.get_mut(&id) {
        Some(slot) => {
            *slot = body.clone();
            Ok(Json(body))
        }
        None => Err(StatusCode::METHOD_NOT_ALLOWED),
    }
}

async fn patch_booking(
    State(state): State<Arc<BookerState>>,
    UrlPath(id): UrlPath<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    if !state.authorized(&headers) {
        return Err(StatusCode::FORBIDDEN);
    }
    let mut bookings = state.bookings.lock();
    let Some(slot) = bookings.get_mut(&id) else {
        return Err(StatusCode::METHOD_NOT_ALLOWED);
    };
    if let (Some(target), Some(patch)) = (slot.as_object_mut(), body.as_object()) {
        for (key, value) in patch {
            target.insert(key.clone(), value.clone());
        }
    }
    Ok(Json(slot.clone()))
}

async fn delete_booking(
    State(state): State<Arc<BookerState>>,
    UrlPath(id): UrlPath<i64>,
    headers: HeaderMap,
) -> StatusCode {
    if !state.authorized(&headers) {
        return StatusCode::FORBIDDEN;
    }
    if state.fail_deletes.load(Ordering::Relaxed) {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    if state.bookings.lock().remove(&id).is_some() {
        StatusCode::CREATED
    } else {
        StatusCode::METHOD_NOT_ALLOWED
    }
}

/// Harness configuration pointed at a mock service, with artifacts under a
/// scratch directory.
pub fn harness_config(mock: &MockBooker, artifact_dir: &Path, ci: bool) -> HarnessConfig {
    HarnessConfig {
        api_base_url: mock.base_url.clone(),
        ci,
        artifact_dir: artifact_dir.to_path_buf(),
        scenario_budget: Duration::from_secs(5),
        api_timeout: Duration::from_secs(2),
        ..HarnessConfig::default()
    }
}
