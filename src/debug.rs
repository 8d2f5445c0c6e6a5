// Debug logging for Tickpong
// File-based tracing output, enabled with the --debug flag. The TUI owns stdout and stderr.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::filter::LevelFilter;

const LOG_FILE_NAME: &str = "tickpong-debug.log";

pub fn log_file_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE_NAME)
}

/// Install the global subscriber
///
/// With `enabled` false nothing is installed and every tracing macro is a no-op.
/// Otherwise the log file is truncated and receives everything at debug level and above.
pub fn init(enabled: bool) -> Result<()> {
    if !enabled {
        return Ok(());
    }

    let path = log_file_path();
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)
        .with_context(|| format!("failed to open debug log {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(LevelFilter::DEBUG)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {}", e))?;

    tracing::info!(path = %path.display(), "debug logging started");
    Ok(())
}
