//! Artifact capture around scenario attempts

use std::path::{Path, PathBuf};

use tracing::debug;

use storecheck_common::{Result, TraceSink};

/// Write the collected trace events as the attempt's trace artifact.
pub fn write_trace(dir: &Path, sink: &TraceSink) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join("trace.json");
    let json = serde_json::to_string_pretty(&sink.events())?;
    std::fs::write(&path, json)?;
    Ok(path)
}

/// Write a terminal-failure screenshot.
pub fn write_screenshot(dir: &Path, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join("failure.png");
    std::fs::write(&path, bytes)?;
    Ok(path)
}

/// Drop a video recording that the retention policy rejected.
pub fn discard_video(path: &Path) {
    if let Err(err) = std::fs::remove_file(path) {
        debug!("could not remove video {}: {}", path.display(), err);
    }
}
