// Entrypoint for the interactive terminal.
// - Keeps `main` small: set up logging, create an API client and hand it
//   to the UI loop.
// - Returns `anyhow::Result` to simplify error handling for the demo.

use blackcoffee_cli::{api::ApiClient, log, ui::run_terminal};

fn main() -> anyhow::Result<()> {
    // Logs go to a file so the terminal stays clean. See `log::setup_logging`.
    log::setup_logging()?;

    // Create API client configured by environment variable `COFFEE_API_URL`
    // or default to http://localhost:8001. See `api::ApiClient::from_env`.
    let api = ApiClient::from_env()?;

    // Start the interactive terminal. This call blocks until the user exits.
    run_terminal(api)?;
    Ok(())
}
