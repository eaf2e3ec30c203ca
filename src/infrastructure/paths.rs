//! Path handling for the data directory, the config file and the log file.
//!
//! Paths from the config file and the command line may start with `~`, which
//! is expanded against `$HOME`. Relative paths stay relative to the working
//! directory, so the default `data_files` directory sits next to where the
//! program is run.

use std::env;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE: &str = "librarian.toml";

/// Data directory used when neither the config nor the command line names one.
pub const DEFAULT_DATA_DIR: &str = "data_files";

/// Log file name inside the data directory.
pub const LOG_FILE: &str = "general.log";

/// Expands a leading `~` to the home directory.
///
/// Paths without a leading tilde, and every path when `$HOME` is unset, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use librarian::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/srv/books"), PathBuf::from("/srv/books"));
/// assert_eq!(expand_tilde("data_files"), PathBuf::from("data_files"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_with_home(path, env::var_os("HOME").map(PathBuf::from).as_deref())
}

fn expand_with_home(path: &str, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return PathBuf::from(path);
    };

    if path == "~" {
        home.to_path_buf()
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

/// Resolves the data directory: the command line wins over the config file.
#[must_use]
pub fn get_data_dir(cli: Option<&Path>, configured: Option<&str>) -> PathBuf {
    match (cli, configured) {
        (Some(dir), _) => dir.to_path_buf(),
        (None, Some(dir)) => expand_tilde(dir),
        (None, None) => PathBuf::from(DEFAULT_DATA_DIR),
    }
}

/// Resolves the log file, defaulting to [`LOG_FILE`] in the data directory.
#[must_use]
pub fn get_log_path(data_dir: &Path, configured: Option<&str>) -> PathBuf {
    configured.map_or_else(|| data_dir.join(LOG_FILE), expand_tilde)
}

/// The config file to read, if any.
///
/// An explicit path is always returned so a missing file surfaces as an
/// error. Otherwise [`CONFIG_FILE`] is used only when it exists in `cwd`.
#[must_use]
pub fn find_config(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let candidate = cwd.join(CONFIG_FILE);
    candidate.is_file().then_some(candidate)
}
