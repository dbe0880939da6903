//! The element-query capability behind the page objects

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use storecheck_common::{Result, TraceSink};

/// Configuration shared by all driver implementations
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Base URL the storefront is served from
    pub base_url: String,

    /// Bound on in-page interactions (click, fill, text)
    pub action_timeout: Duration,

    /// Bound on full page navigations
    pub navigation_timeout: Duration,

    /// Run the browser without a visible window
    pub headless: bool,

    /// Record a video of the session into this directory
    pub video_dir: Option<PathBuf>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.saucedemo.com".to_string(),
            action_timeout: Duration::from_secs(10),
            navigation_timeout: Duration::from_secs(30),
            headless: true,
            video_dir: None,
        }
    }
}

/// An external capability that can navigate pages and query DOM elements.
///
/// Every waiting operation is bounded by the timeouts in `DriverConfig`;
/// nothing blocks indefinitely. Implementations must be safe to share
/// across awaits within one scenario, but a driver instance is never
/// shared between scenarios.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate to a path relative to the configured base URL.
    async fn goto(&self, path: &str) -> Result<()>;

    async fn click(&self, selector: &str) -> Result<()>;

    async fn fill(&self, selector: &str, value: &str) -> Result<()>;

    /// Text content of the first element matching the selector.
    async fn text(&self, selector: &str) -> Result<String>;

    /// Text contents of all matching elements, in display order.
    async fn texts(&self, selector: &str) -> Result<Vec<String>>;

    /// Whether a matching element is currently visible. An absent element
    /// is `Ok(false)`, not an error.
    async fn is_visible(&self, selector: &str) -> Result<bool>;

    /// PNG snapshot of the current page.
    async fn screenshot(&self) -> Result<Vec<u8>>;

    /// Shut the driver down; returns the recorded video, if any.
    async fn close(&self) -> Result<Option<PathBuf>>;
}

/// Constructs a fresh driver per scenario attempt.
#[async_trait]
pub trait DriverFactory: Send + Sync {
    async fn create(&self, config: DriverConfig) -> Result<Arc<dyn PageDriver>>;
}

/// Decorator that records every operation into a trace sink.
pub struct TracedDriver {
    inner: Arc<dyn PageDriver>,
    sink: TraceSink,
}

impl TracedDriver {
    pub fn new(inner: Arc<dyn PageDriver>, sink: TraceSink) -> Self {
        Self { inner, sink }
    }

    async fn traced<T>(
        &self,
        operation: String,
        result: impl std::future::Future<Output = Result<T>>,
    ) -> Result<T> {
        let started = Instant::now();
        let result = result.await;
        self.sink
            .record(operation, result.is_ok(), started.elapsed());
        result
    }
}

#[async_trait]
impl PageDriver for TracedDriver {
    async fn goto(&self, path: &str) -> Result<()> {
        self.traced(format!("goto {}", path), self.inner.goto(path))
            .await
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.traced(format!("click {}", selector), self.inner.click(selector))
            .await
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        self.traced(
            format!("fill {}", selector),
            self.inner.fill(selector, value),
        )
        .await
    }

    async fn text(&self, selector: &str) -> Result<String> {
        self.traced(format!("text {}", selector), self.inner.text(selector))
            .await
    }

    async fn texts(&self, selector: &str) -> Result<Vec<String>> {
        self.traced(format!("texts {}", selector), self.inner.texts(selector))
            .await
    }

    async fn is_visible(&self, selector: &str) -> Result<bool> {
        self.traced(
            format!("visible {}", selector),
            self.inner.is_visible(selector),
        )
        .await
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        self.inner.screenshot().await
    }

    async fn close(&self) -> Result<Option<PathBuf>> {
        self.inner.close().await
    }
}
