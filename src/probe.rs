// Connectivity probe: four sequential checks against a deployed demo
// (front-end origin plus three API endpoints). The checks live here as a
// library function writing to a caller-supplied writer so they can be
// exercised in tests; the `probe` binary wires them to stdout.

use crate::api::ApiClient;
use crate::session::USAGE;
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::io::Write;
use std::time::Duration;

/// Per-check timeout.
const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Base URLs the probe targets, read from the environment with local
/// development defaults.
pub struct ProbeConfig {
    pub frontend_url: String,
    pub api_url: String,
}

impl ProbeConfig {
    pub fn from_env() -> Self {
        ProbeConfig {
            frontend_url: std::env::var("COFFEE_FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            api_url: std::env::var("COFFEE_API_URL")
                .unwrap_or_else(|_| "http://localhost:8001".into()),
        }
    }
}

/// Run the four checks in order, stopping at the first failure. Progress
/// is written to `out` as each check runs; the returned error describes
/// the check that failed.
pub fn run(config: &ProbeConfig, out: &mut impl Write) -> Result<()> {
    let web = Client::builder()
        .timeout(CHECK_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")?;
    let api = ApiClient::with_timeout(config.api_url.clone(), CHECK_TIMEOUT)?;

    writeln!(out, "Checking Black Coffee Terminal deployment...")?;
    writeln!(out)?;

    write!(out, "[1/4] Front-end at {} ... ", config.frontend_url)?;
    out.flush()?;
    let res = web
        .get(&config.frontend_url)
        .send()
        .context("Front-end is not reachable")?;
    if !res.status().is_success() {
        anyhow::bail!("Front-end returned {}", res.status());
    }
    writeln!(out, "ok")?;

    write!(out, "[2/4] API root at {} ... ", config.api_url)?;
    out.flush()?;
    let message = api.welcome().context("API root check failed")?;
    writeln!(out, "ok (\"{message}\")")?;

    write!(out, "[3/4] Menu endpoint ... ")?;
    out.flush()?;
    let items = api.menu().context("Menu check failed")?;
    writeln!(out, "ok ({} items)", items.len())?;

    write!(out, "[4/4] Shop info ... ")?;
    out.flush()?;
    let info = api.info().context("Shop info check failed")?;
    writeln!(out, "ok ({})", info.name)?;

    writeln!(out)?;
    writeln!(out, "All checks passed. The coffee shop is open.")?;
    writeln!(out)?;
    writeln!(out, "Try these commands in the terminal:")?;
    writeln!(out, "{USAGE}")?;
    Ok(())
}

/// Whether the failure looks like nothing is listening at all, in which
/// case the binary prints a hint to start both servers.
pub fn looks_like_refused(err: &anyhow::Error) -> bool {
    format!("{err:#}").to_lowercase().contains("connection refused")
}
