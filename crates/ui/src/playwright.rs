//! Playwright sidecar driver
//!
//! Controls a real browser through a node subprocess. The subprocess runs a
//! small bootstrap script that loads Playwright and then exchanges one JSON
//! object per line over stdin/stdout: requests carry an id, a command, and
//! its operands; responses echo the id with either a value or an error.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::debug;

use storecheck_common::{Error, Result};

use crate::driver::{DriverConfig, DriverFactory, PageDriver};

const BOOTSTRAP: &str = r#"
const readline = require('readline');
const { chromium } = require('playwright');

(async () => {
  const rl = readline.createInterface({ input: process.stdin, terminal: false });
  let browser = null;
  let context = null;
  let page = null;
  let baseUrl = '';

  for await (const line of rl) {
    if (!line.trim()) continue;
    const req = JSON.parse(line);
    const res = { id: req.id, ok: true, value: null };
    try {
      switch (req.cmd) {
        case 'init': {
          baseUrl = req.base_url.replace(/\/+$/, '');
          browser = await chromium.launch({ headless: req.headless !== false });
          context = await browser.newContext({
            viewport: { width: 1280, height: 720 },
            recordVideo: req.video_dir ? { dir: req.video_dir } : undefined,
          });
          page = await context.newPage();
          break;
        }
        case 'goto':
          await page.goto(baseUrl + req.url, { timeout: req.timeout_ms });
          break;
        case 'click':
          await page.click(req.selector, { timeout: req.timeout_ms });
          break;
        case 'fill':
          await page.fill(req.selector, req.value, { timeout: req.timeout_ms });
          break;
        case 'text':
          res.value = await page.locator(req.selector).first().textContent({ timeout: req.timeout_ms });
          break;
        case 'texts':
          res.value = await page.locator(req.selector).allTextContents();
          break;
        case 'visible':
          res.value = await page.locator(req.selector).first().isVisible();
          break;
        case 'screenshot':
          res.value = (await page.screenshot()).toString('base64');
          break;
        case 'close': {
          const video = page ? page.video() : null;
          if (context) await context.close();
          res.value = video ? await video.path() : null;
          if (browser) await browser.close();
          break;
        }
        default:
          throw new Error('unknown command: ' + req.cmd);
      }
    } catch (err) {
      res.ok = false;
      res.error = String((err && err.message) || err);
    }
    process.stdout.write(JSON.stringify(res) + '\n');
    if (req.cmd === 'close') break;
  }
})();
"#;

struct SidecarIo {
    child: Child,
    stdin: ChildStdin,
    lines: Lines<BufReader<ChildStdout>>,
}

/// Browser driver backed by a Playwright sidecar process
pub struct PlaywrightDriver {
    io: Mutex<SidecarIo>,
    next_id: AtomicU64,
    config: DriverConfig,
    // Keeps the bootstrap script alive for the sidecar's lifetime.
    _workdir: tempfile::TempDir,
}

impl PlaywrightDriver {
    /// Spawn the sidecar and open a browser context.
    pub async fn launch(config: DriverConfig) -> Result<Self> {
        Self::check_installed()?;

        let workdir = tempfile::tempdir()?;
        let script_path = workdir.path().join("sidecar.js");
        std::fs::write(&script_path, BOOTSTRAP)?;

        if let Some(dir) = &config.video_dir {
            std::fs::create_dir_all(dir)?;
        }

        let mut child = Command::new("node")
            .arg(&script_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::Driver(format!("failed to spawn node sidecar: {}", e)))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Driver("sidecar stdin unavailable".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::Driver("sidecar stdout unavailable".to_string()))?;
        let lines = BufReader::new(stdout).lines();

        let driver = Self {
            io: Mutex::new(SidecarIo {
                child,
                stdin,
                lines,
            }),
            next_id: AtomicU64::new(1),
            config,
            _workdir: workdir,
        };

        driver
            .call(json!({
                "cmd": "init",
                "base_url": driver.config.base_url,
                "headless": driver.config.headless,
                "video_dir": driver.config.video_dir,
            }))
            .await?;

        debug!("playwright sidecar ready for {}", driver.config.base_url);
        Ok(driver)
    }

    /// Check that Playwright is available to node.
    fn check_installed() -> Result<()> {
        let status = std::process::Command::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(status) if status.success() => Ok(()),
            _ => Err(Error::Driver(
                "playwright not found; install with: npx playwright install".to_string(),
            )),
        }
    }

    async fn call(&self, mut request: Value) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        request["id"] = json!(id);
        let line = serde_json::to_string(&request)?;

        // Generous bound: command-level timeouts are enforced in the
        // sidecar itself; this only guards against a wedged process.
        let deadline = self.config.navigation_timeout + Duration::from_secs(5);

        let mut io = self.io.lock().await;
        io.stdin
            .write_all(line.as_bytes())
            .await
            .map_err(|e| Error::Driver(format!("sidecar write failed: {}", e)))?;
        io.stdin
            .write_all(b"\n")
            .await
            .map_err(|e| Error::Driver(format!("sidecar write failed: {}", e)))?;
        io.stdin
            .flush()
            .await
            .map_err(|e| Error::Driver(format!("sidecar write failed: {}", e)))?;

        loop {
            let line = timeout(deadline, io.lines.next_line())
                .await
                .map_err(|_| Error::Timeout("playwright sidecar response".to_string()))?
                .map_err(|e| Error::Driver(format!("sidecar read failed: {}", e)))?
                .ok_or_else(|| Error::Driver("sidecar closed its stdout".to_string()))?;

            let mut response: Value = serde_json::from_str(&line)?;
            if response["id"].as_u64() != Some(id) {
                continue;
            }
            if response["ok"].as_bool() == Some(true) {
                return Ok(response["value"].take());
            }
            let message = response["error"].as_str().unwrap_or("unknown sidecar error");
            return Err(Error::Driver(message.to_string()));
        }
    }

    fn action_ms(&self) -> u64 {
        self.config.action_timeout.as_millis() as u64
    }
}

#[async_trait]
impl PageDriver for PlaywrightDriver {
    async fn goto(&self, path: &str) -> Result<()> {
        self.call(json!({
            "cmd": "goto",
            "url": path,
            "timeout_ms": self.config.navigation_timeout.as_millis() as u64,
        }))
        .await
        .map(|_| ())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.call(json!({
            "cmd": "click",
            "selector": selector,
            "timeout_ms": self.action_ms(),
        }))
        .await
        .map(|_| ())
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        self.call(json!({
            "cmd": "fill",
            "selector": selector,
            "value": value,
            "timeout_ms": self.action_ms(),
        }))
        .await
        .map(|_| ())
    }

    async fn text(&self, selector: &str) -> Result<String> {
        let value = self
            .call(json!({
                "cmd": "text",
                "selector": selector,
                "timeout_ms": self.action_ms(),
            }))
            .await?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::Driver(format!("no text content for {}", selector)))
    }

    async fn texts(&self, selector: &str) -> Result<Vec<String>> {
        let value = self
            .call(json!({ "cmd": "texts", "selector": selector }))
            .await?;
        let items = value
            .as_array()
            .ok_or_else(|| Error::Driver(format!("no text list for {}", selector)))?;
        Ok(items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect())
    }

    async fn is_visible(&self, selector: &str) -> Result<bool> {
        let value = self
            .call(json!({ "cmd": "visible", "selector": selector }))
            .await?;
        value
            .as_bool()
            .ok_or_else(|| Error::Driver(format!("no visibility answer for {}", selector)))
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        let value = self.call(json!({ "cmd": "screenshot" })).await?;
        let encoded = value
            .as_str()
            .ok_or_else(|| Error::Driver("no screenshot payload".to_string()))?;
        base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| Error::Driver(format!("bad screenshot payload: {}", e)))
    }

    async fn close(&self) -> Result<Option<PathBuf>> {
        let value = self.call(json!({ "cmd": "close" })).await?;
        let video = value.as_str().map(PathBuf::from);

        let mut io = self.io.lock().await;
        let _ = timeout(Duration::from_secs(5), io.child.wait()).await;
        Ok(video)
    }
}

/// Factory producing one sidecar-backed browser per scenario attempt
pub struct PlaywrightDriverFactory;

#[async_trait]
impl DriverFactory for PlaywrightDriverFactory {
    async fn create(&self, config: DriverConfig) -> Result<Arc<dyn PageDriver>> {
        Ok(Arc::new(PlaywrightDriver::launch(config).await?))
    }
}
