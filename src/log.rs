//! File logging for the terminal.
use anyhow::Result;
use std::io::LineWriter;
use std::path::PathBuf;
use std::sync::Mutex;

/// Initializes the application's logging system.
///
/// Logs go to `~/.blackcoffee-cli.log` (falling back to the working
/// directory when no home is available) so the terminal itself stays
/// reserved for the session scroll-back. If the log file exceeds 100KB
/// the existing log is renamed to `.blackcoffee-cli.log.old`.
pub fn setup_logging() -> Result<()> {
    let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let log_path = dir.join(".blackcoffee-cli.log");

    if log_path.exists() {
        let metadata = std::fs::metadata(&log_path)?;
        if metadata.len() > 100 * 1024 {
            // 100KB
            let backup_path = dir.join(".blackcoffee-cli.log.old");
            if backup_path.exists() {
                std::fs::remove_file(&backup_path)?;
            }
            std::fs::rename(&log_path, backup_path)?;
        }
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    // Ensure the logs are flushed after every line
    let writer = Mutex::new(LineWriter::new(log_file));

    tracing_subscriber::fmt()
        .with_env_filter("blackcoffee_cli=debug")
        .with_writer(writer)
        .with_ansi(false) // Disable ANSI escape codes for file logging
        .init();
    Ok(())
}
