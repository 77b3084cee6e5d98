// Standalone smoke test for the coffee-shop demo: checks the front-end
// and three API endpoints in order and exits non-zero on the first
// failure. Base URLs come from `COFFEE_FRONTEND_URL` / `COFFEE_API_URL`,
// defaulting to the local development origins.

use blackcoffee_cli::probe::{self, ProbeConfig};

fn main() {
    let config = ProbeConfig::from_env();
    let mut stdout = std::io::stdout();
    if let Err(e) = probe::run(&config, &mut stdout) {
        eprintln!();
        eprintln!("FAILED: {e:#}");
        if probe::looks_like_refused(&e) {
            eprintln!(
                "Hint: make sure both servers are running (front-end at {}, API at {}).",
                config.frontend_url, config.api_url
            );
        }
        std::process::exit(1);
    }
}
