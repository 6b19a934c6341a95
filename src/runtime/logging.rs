use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Install a file-backed subscriber when a log file is configured.
///
/// The terminal belongs to the UI, so without a file nothing is logged.
/// `CADENZA_LOG` overrides `logging.file`; `RUST_LOG` overrides
/// `logging.level`.
pub fn init(settings: &LoggingSettings) -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::var_os("CADENZA_LOG")
        .map(PathBuf::from)
        .or_else(|| settings.file.clone());
    let Some(path) = path else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| e as Box<dyn std::error::Error>)?;
    Ok(())
}
