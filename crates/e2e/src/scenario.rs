//! Scenario definition and the per-scenario execution context

use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use futures::future::BoxFuture;
use serde::Serialize;
use tracing::{debug, warn};

use storecheck_api::{BookerClient, DeleteOutcome};
use storecheck_common::{AuthToken, BookingId, Result, TraceSink};
use storecheck_ui::{DriverConfig, DriverFactory, PageDriver, TracedDriver};

use crate::config::HarnessConfig;

/// Static partition a scenario belongs to. The two projects are
/// independent and can be selected and scheduled separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Project {
    Ui,
    Api,
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Project::Ui => write!(f, "ui"),
            Project::Api => write!(f, "api"),
        }
    }
}

pub type ScenarioResult = anyhow::Result<()>;

type ScenarioFn = dyn Fn(Arc<ScenarioContext>) -> BoxFuture<'static, ScenarioResult> + Send + Sync;

/// One independent test case
#[derive(Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub project: Project,
    pub tags: &'static [&'static str],
    pub(crate) run: Arc<ScenarioFn>,
}

impl Scenario {
    pub fn new<F, Fut>(
        name: &'static str,
        project: Project,
        tags: &'static [&'static str],
        body: F,
    ) -> Self
    where
        F: Fn(Arc<ScenarioContext>) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = ScenarioResult> + Send + 'static,
    {
        Self {
            name,
            project,
            tags,
            run: Arc::new(move |ctx| Box::pin(body(ctx))),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(&tag)
    }
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("project", &self.project)
            .field("tags", &self.tags)
            .finish()
    }
}

/// What teardown hands back to the runner
pub(crate) struct CleanupSummary {
    /// Video recorded by the attempt's driver, if any
    pub video: Option<PathBuf>,
}

/// Execution context for one scenario attempt
///
/// Freshly constructed per attempt: its own API client, its own driver,
/// its own cleanup list. No shared mutable state crosses scenario
/// boundaries, which is what makes running scenarios in parallel safe.
pub struct ScenarioContext {
    config: Arc<HarnessConfig>,
    factory: Arc<dyn DriverFactory>,
    api: BookerClient,
    driver: tokio::sync::Mutex<Option<Arc<dyn PageDriver>>>,
    tracked: parking_lot::Mutex<Vec<BookingId>>,
    trace: Option<TraceSink>,
    artifact_dir: PathBuf,
    seed: String,
    name_counter: AtomicU32,
}

impl ScenarioContext {
    pub(crate) fn new(
        config: Arc<HarnessConfig>,
        factory: Arc<dyn DriverFactory>,
        record_trace: bool,
        artifact_dir: PathBuf,
    ) -> Result<Self> {
        let trace = record_trace.then(TraceSink::new);

        let mut api = BookerClient::new(&config.api_base_url, config.api_timeout)?;
        if let Some(sink) = &trace {
            api = api.with_trace(sink.clone());
        }

        Ok(Self {
            config,
            factory,
            api,
            driver: tokio::sync::Mutex::new(None),
            tracked: parking_lot::Mutex::new(Vec::new()),
            trace,
            artifact_dir,
            seed: unique_suffix(),
            name_counter: AtomicU32::new(0),
        })
    }

    /// The bookings client owned by this scenario.
    pub fn api(&self) -> &BookerClient {
        &self.api
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Authenticate with the configured credentials and require a token.
    pub async fn admin_token(&self) -> Result<AuthToken> {
        let creds = &self.config.credentials;
        self.api
            .authenticate(&creds.username, &creds.password)
            .await?
            .into_token()
    }

    /// The page driver for this scenario, created on first use. UI
    /// operations are traced when trace capture is active for the attempt.
    pub async fn page_driver(&self) -> Result<Arc<dyn PageDriver>> {
        let mut slot = self.driver.lock().await;
        if let Some(driver) = slot.as_ref() {
            return Ok(driver.clone());
        }

        let driver_config = DriverConfig {
            base_url: self.config.ui_base_url.clone(),
            action_timeout: self.config.action_timeout,
            navigation_timeout: self.config.navigation_timeout,
            headless: self.config.headless,
            video_dir: Some(self.artifact_dir.join("video")),
        };
        let driver = self.factory.create(driver_config).await?;
        let driver: Arc<dyn PageDriver> = match &self.trace {
            Some(sink) => Arc::new(TracedDriver::new(driver, sink.clone())),
            None => driver,
        };

        *slot = Some(driver.clone());
        Ok(driver)
    }

    /// Record a created booking for teardown. Ownership of the id stays
    /// with this scenario until teardown releases it.
    pub fn track_booking(&self, id: BookingId) {
        self.tracked.lock().push(id);
    }

    /// A name that cannot collide with concurrently running scenarios:
    /// time-based suffix plus a per-context counter.
    pub fn unique_name(&self, prefix: &str) -> String {
        let n = self.name_counter.fetch_add(1, Ordering::Relaxed);
        format!("{}_{}_{}", prefix, self.seed, n)
    }

    pub(crate) fn trace(&self) -> Option<&TraceSink> {
        self.trace.as_ref()
    }

    /// Terminal-failure snapshot from the driver, when one was created.
    pub(crate) async fn screenshot(&self) -> Option<Vec<u8>> {
        let driver = self.driver.lock().await.as_ref()?.clone();
        match driver.screenshot().await {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                warn!("screenshot capture failed: {}", err);
                None
            }
        }
    }

    /// Best-effort teardown: delete every tracked booking and shut the
    /// driver down. Failures are logged and swallowed; the record may
    /// already be gone and cleanup must never fail the test.
    pub(crate) async fn teardown(&self) -> CleanupSummary {
        let ids: Vec<BookingId> = std::mem::take(&mut *self.tracked.lock());

        if !ids.is_empty() {
            match self.admin_token().await {
                Ok(token) => {
                    for id in ids {
                        self.delete_tracked(id, &token).await;
                    }
                }
                Err(err) => {
                    warn!(
                        "cleanup: could not authenticate, {} booking(s) left behind: {}",
                        ids.len(),
                        err
                    );
                }
            }
        }

        let driver = self.driver.lock().await.take();
        let mut video = None;
        if let Some(driver) = driver {
            match driver.close().await {
                Ok(path) => video = path,
                Err(err) => warn!("driver shutdown failed: {}", err),
            }
        }

        CleanupSummary { video }
    }

    async fn delete_tracked(&self, id: BookingId, token: &AuthToken) {
        match self.api.delete_booking(id, token).await {
            Ok(DeleteOutcome::Deleted) => debug!("cleanup: deleted booking {}", id),
            Ok(DeleteOutcome::Rejected(status)) => {
                warn!("cleanup: booking {} not deleted (status {})", id, status);
            }
            Err(err) => {
                warn!("cleanup: failed to delete booking {}: {}", id, err);
            }
        }
    }
}

/// Time-based uniqueness suffix, disambiguated by a process-wide counter
/// for scenarios starting in the same millisecond.
fn unique_suffix() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}{:03}", millis, n % 1000)
}
