//! Execution trace sink
//!
//! When trace capture is active for an attempt, the API client and the page
//! driver both record their operations here; the runner serializes the
//! collected events as the attempt's trace artifact.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;

/// One recorded operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceEvent {
    pub operation: String,
    pub ok: bool,
    pub duration_ms: u64,
}

/// Shared, cloneable event collector
#[derive(Debug, Clone, Default)]
pub struct TraceSink {
    events: Arc<Mutex<Vec<TraceEvent>>>,
}

impl TraceSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, operation: impl Into<String>, ok: bool, elapsed: Duration) {
        self.events.lock().push(TraceEvent {
            operation: operation.into(),
            ok,
            duration_ms: elapsed.as_millis() as u64,
        });
    }

    pub fn events(&self) -> Vec<TraceEvent> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_are_visible_through_clones() {
        let sink = TraceSink::new();
        let clone = sink.clone();
        clone.record("GET /ping", true, Duration::from_millis(12));
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.events()[0].operation, "GET /ping");
        assert!(sink.events()[0].ok);
    }
}
