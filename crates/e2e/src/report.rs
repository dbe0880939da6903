//! Suite results, serialized for machine consumption

use std::path::{Path, PathBuf};

use serde::Serialize;

use storecheck_common::Result;

use crate::scenario::Project;

/// One execution of a scenario (original run or retry)
#[derive(Debug, Clone, Serialize)]
pub struct AttemptReport {
    pub attempt: u32,
    pub passed: bool,
    pub duration_ms: u64,
    pub error: Option<String>,
    pub trace: Option<PathBuf>,
    pub screenshot: Option<PathBuf>,
    pub video: Option<PathBuf>,
}

/// Final outcome of one scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub project: Project,
    pub tags: Vec<String>,
    pub passed: bool,
    pub attempts: Vec<AttemptReport>,
}

impl ScenarioReport {
    pub fn attempts_used(&self) -> usize {
        self.attempts.len()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.attempts.last().and_then(|a| a.error.as_deref())
    }
}

/// Result of running a suite
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub started_at: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub scenarios: Vec<ScenarioReport>,
}

impl SuiteReport {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Write the report as JSON under the given directory.
    pub fn write_json(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join("suite.json");
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;
        Ok(path)
    }
}
