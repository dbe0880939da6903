//! The suite runner
//!
//! Schedules scenarios across a bounded worker pool, applies the retry
//! policy to failed scenarios, captures artifacts per policy, and always
//! runs teardown.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use storecheck_ui::DriverFactory;

use crate::artifact;
use crate::config::HarnessConfig;
use crate::policy;
use crate::report::{AttemptReport, ScenarioReport, SuiteReport};
use crate::scenario::{Project, Scenario, ScenarioContext};

/// Which scenarios to run
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub project: Option<Project>,
    pub tag: Option<String>,
}

impl Selection {
    fn matches(&self, scenario: &Scenario) -> bool {
        if let Some(project) = self.project {
            if scenario.project != project {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !scenario.has_tag(tag) {
                return false;
            }
        }
        true
    }
}

/// Runs registered scenarios against the configured targets
pub struct SuiteRunner {
    config: Arc<HarnessConfig>,
    factory: Arc<dyn DriverFactory>,
    scenarios: Vec<Scenario>,
}

impl SuiteRunner {
    pub fn new(config: HarnessConfig, factory: Arc<dyn DriverFactory>) -> Self {
        Self {
            config: Arc::new(config),
            factory,
            scenarios: Vec::new(),
        }
    }

    pub fn register(&mut self, scenarios: Vec<Scenario>) {
        self.scenarios.extend(scenarios);
    }

    pub fn scenario_count(&self) -> usize {
        self.scenarios.len()
    }

    /// Run the selected scenarios and collect a suite report.
    pub async fn run(&self, selection: &Selection) -> SuiteReport {
        let started_at = chrono::Utc::now().to_rfc3339();
        let start = Instant::now();

        let selected: Vec<Scenario> = self
            .scenarios
            .iter()
            .filter(|s| selection.matches(s))
            .cloned()
            .collect();

        let units = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let workers = self
            .config
            .workers
            .unwrap_or_else(|| policy::worker_count(self.config.ci, units));

        info!(
            "Running {} scenario(s) on {} worker(s)...",
            selected.len(),
            workers
        );

        let semaphore = Arc::new(Semaphore::new(workers));
        let mut handles = Vec::with_capacity(selected.len());
        for scenario in selected {
            let semaphore = semaphore.clone();
            let config = self.config.clone();
            let factory = self.factory.clone();
            let name = scenario.name;
            let project = scenario.project;
            let tags = scenario.tags;
            let handle = tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("worker pool semaphore closed");
                run_scenario(config, factory, scenario).await
            });
            handles.push((name, project, tags, handle));
        }

        let mut scenarios = Vec::with_capacity(handles.len());
        for (name, project, tags, handle) in handles {
            let report = match handle.await {
                Ok(report) => report,
                Err(join_err) => {
                    // A panicking scenario is a failing scenario, not a
                    // failing suite.
                    error!("✗ {} - panicked: {}", name, join_err);
                    ScenarioReport {
                        name: name.to_string(),
                        project,
                        tags: tags.iter().map(|t| t.to_string()).collect(),
                        passed: false,
                        attempts: vec![AttemptReport {
                            attempt: 0,
                            passed: false,
                            duration_ms: 0,
                            error: Some(format!("scenario panicked: {}", join_err)),
                            trace: None,
                            screenshot: None,
                            video: None,
                        }],
                    }
                }
            };
            scenarios.push(report);
        }

        let passed = scenarios.iter().filter(|s| s.passed).count();
        let failed = scenarios.len() - passed;
        let duration_ms = start.elapsed().as_millis() as u64;

        info!(
            "Suite results: {} passed, {} failed ({} ms)",
            passed, failed, duration_ms
        );

        SuiteReport {
            started_at,
            total: scenarios.len(),
            passed,
            failed,
            duration_ms,
            scenarios,
        }
    }
}

async fn run_scenario(
    config: Arc<HarnessConfig>,
    factory: Arc<dyn DriverFactory>,
    scenario: Scenario,
) -> ScenarioReport {
    let retries = policy::retry_limit(config.ci);
    let mut attempts = Vec::new();
    let mut passed = false;

    for attempt in 0..=retries {
        let record_trace = policy::trace_on_attempt(attempt);
        let attempt_dir = config
            .artifact_dir
            .join(scenario.name)
            .join(format!("attempt-{}", attempt));

        let ctx = match ScenarioContext::new(
            config.clone(),
            factory.clone(),
            record_trace,
            attempt_dir.clone(),
        ) {
            Ok(ctx) => Arc::new(ctx),
            Err(err) => {
                attempts.push(AttemptReport {
                    attempt,
                    passed: false,
                    duration_ms: 0,
                    error: Some(format!("context setup failed: {}", err)),
                    trace: None,
                    screenshot: None,
                    video: None,
                });
                break;
            }
        };

        let started = Instant::now();
        let outcome = tokio::time::timeout(config.scenario_budget, (scenario.run)(ctx.clone())).await;
        let error = match outcome {
            Ok(Ok(())) => None,
            Ok(Err(err)) => Some(format!("{:#}", err)),
            Err(_) => Some(format!(
                "scenario exceeded its {}s budget",
                config.scenario_budget.as_secs()
            )),
        };
        let duration_ms = started.elapsed().as_millis() as u64;
        let failed = error.is_some();

        let mut trace = None;
        if record_trace && failed {
            if let Some(sink) = ctx.trace() {
                match artifact::write_trace(&attempt_dir, sink) {
                    Ok(path) => trace = Some(path),
                    Err(err) => warn!("could not write trace artifact: {}", err),
                }
            }
        }

        let mut screenshot = None;
        if policy::screenshot_on(failed, attempt, retries) {
            if let Some(bytes) = ctx.screenshot().await {
                match artifact::write_screenshot(&attempt_dir, &bytes) {
                    Ok(path) => screenshot = Some(path),
                    Err(err) => warn!("could not write screenshot artifact: {}", err),
                }
            }
        }

        let cleanup = ctx.teardown().await;
        let mut video = None;
        if let Some(path) = cleanup.video {
            if policy::retain_video(failed, attempt, retries) {
                video = Some(path);
            } else {
                artifact::discard_video(&path);
            }
        }

        attempts.push(AttemptReport {
            attempt,
            passed: !failed,
            duration_ms,
            error,
            trace,
            screenshot,
            video,
        });

        if !failed {
            passed = true;
            break;
        }
        if attempt < retries {
            warn!(
                "scenario '{}' failed on attempt {}, retrying",
                scenario.name, attempt
            );
        }
    }

    if passed {
        info!(
            "✓ {} ({} ms)",
            scenario.name,
            attempts.last().map(|a| a.duration_ms).unwrap_or(0)
        );
    } else {
        error!(
            "✗ {} - {}",
            scenario.name,
            attempts
                .last()
                .and_then(|a| a.error.as_deref())
                .unwrap_or("unknown error")
        );
    }

    ScenarioReport {
        name: scenario.name.to_string(),
        project: scenario.project,
        tags: scenario.tags.iter().map(|t| t.to_string()).collect(),
        passed,
        attempts,
    }
}
