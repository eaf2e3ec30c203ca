//! Tracing initialization and subscriber setup.

use super::file_writer::{FileWriter, LogHandle};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LEVEL: &str = "info";

/// Builds the filter: `RUST_LOG` first, then `level`, then [`DEFAULT_LEVEL`].
///
/// An unparsable level falls back to the default.
#[must_use]
pub fn env_filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.unwrap_or(DEFAULT_LEVEL)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Installs a global subscriber that writes plain-text events to `log_path`.
///
/// The log directory is created if missing. Observability is optional: if the
/// directory cannot be created nothing is installed, and calling this twice
/// keeps the first subscriber.
///
/// # Example
///
/// ```no_run
/// use librarian::observability::init_tracing;
/// use std::path::Path;
///
/// init_tracing(Path::new("data_files/general.log"), Some("debug"));
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(log_path: &Path, level: Option<&str>) {
    if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }

    let writer = Arc::new(FileWriter::new(log_path.to_path_buf()));
    let layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(move || LogHandle(Arc::clone(&writer)));

    let _ = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(layer)
        .try_init();
}
