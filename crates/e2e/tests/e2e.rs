//! E2E suite entry point
//!
//! Run with: cargo test --package storecheck-e2e --test e2e
//!
//! Environment variables are resolved here, at the outermost edge, and
//! passed into the harness as plain configuration. Library code never
//! reads the environment.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use storecheck_e2e::{HarnessConfig, Project, Selection, SuiteRunner};
use storecheck_ui::{DriverFactory, PlaywrightDriverFactory, SimDriverFactory};

#[derive(Parser, Debug)]
#[command(name = "storecheck-e2e")]
#[command(about = "E2E suite runner for the storefront and bookings API")]
struct Args {
    /// Base URL of the storefront UI
    #[arg(long, env = "UI_BASE_URL", default_value = "https://www.saucedemo.com")]
    ui_base_url: String,

    /// Base URL of the bookings API
    #[arg(long, env = "API_BASE_URL", default_value = "https://restful-booker.herokuapp.com")]
    api_base_url: String,

    /// Bookings API username
    #[arg(long, env = "BOOKER_USER", default_value = "admin")]
    username: String,

    /// Bookings API password
    #[arg(long, env = "BOOKER_PASS", default_value = "password123")]
    password: String,

    /// Unattended mode ("true" or "1"): full workers, retries on failure
    #[arg(long, env = "CI", default_value = "false")]
    ci: String,

    /// Page driver: sim (hermetic) or playwright (real browser)
    #[arg(long, default_value = "sim")]
    driver: String,

    /// Run only one project (ui or api)
    #[arg(long)]
    project: Option<String>,

    /// Run only scenarios carrying this tag (smoke, regression)
    #[arg(long)]
    tag: Option<String>,

    /// Override the computed worker count
    #[arg(long)]
    workers: Option<usize>,

    /// Run browsers headless
    #[arg(long, default_value = "true")]
    headless: bool,

    /// Output directory for artifacts and the suite report
    #[arg(short, long, default_value = "test-results")]
    output: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("info".parse().expect("valid directive")),
        )
        .init();

    let args = Args::parse();

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let result = rt.block_on(async_main(args));

    match result {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(2);
        }
    }
}

async fn async_main(args: Args) -> anyhow::Result<bool> {
    let ci = matches!(args.ci.as_str(), "true" | "1");

    let config = HarnessConfig {
        ui_base_url: args.ui_base_url,
        api_base_url: args.api_base_url,
        credentials: storecheck_common::Credentials::new(args.username, args.password),
        ci,
        headless: args.headless,
        workers: args.workers,
        artifact_dir: args.output.clone(),
        ..HarnessConfig::default()
    };

    let factory: Arc<dyn DriverFactory> = match args.driver.as_str() {
        "playwright" => Arc::new(PlaywrightDriverFactory),
        "sim" => Arc::new(SimDriverFactory),
        other => anyhow::bail!("unknown driver: {} (expected sim or playwright)", other),
    };

    let selection = Selection {
        project: match args.project.as_deref() {
            None => None,
            Some("ui") => Some(Project::Ui),
            Some("api") => Some(Project::Api),
            Some(other) => anyhow::bail!("unknown project: {} (expected ui or api)", other),
        },
        tag: args.tag,
    };

    let mut runner = SuiteRunner::new(config, factory);
    runner.register(storecheck_e2e::suite::all());

    let report = runner.run(&selection).await;

    let path = report.write_json(&args.output)?;
    info!("Results written to: {}", path.display());

    Ok(report.all_passed())
}
