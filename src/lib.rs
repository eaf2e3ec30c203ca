//! Librarian: a personal book-collection tool.
//!
//! Librarian keeps a small collection of books in a text catalog and a
//! circulation ledger next to it, and provides:
//! - Natural-language search ("books by brandon sanderson in fantasy")
//! - Field search with closest-match ranking
//! - Check out, return, reserve and cancel reservations for four-digit members
//! - Popularity charts and a purchase recommendation for a budget
//! - A line-driven terminal menu with three views

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI binary (main.rs)                               │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Menu state machine
//! │  - Event handling                                   │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Circulation   │   │ Query         │
//! │ (ui/)         │   │ (circulation/)│   │ (query/)      │
//! │ - Rendering   │   │ - Ledger      │   │ - Parser      │
//! │ - Theming     │   │ - Rules       │   │ - Ranking     │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Storage, Insights, Infrastructure & Domain         │
//! │  - Catalog and ledger files (storage/)              │
//! │  - Prevalence and recommendations (insights/)       │
//! │  - Paths (infrastructure/)                          │
//! │  - Books, members, errors (domain/)                 │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing to a rotating log file                   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Menu state machine with event/action model
//! - [`circulation`]: Ledger replay and circulation rules
//! - [`domain`]: Core domain types (books, members, errors)
//! - [`infrastructure`]: Path resolution
//! - [`insights`]: Prevalence counts and purchase recommendations
//! - [`observability`]: Logging setup
//! - [`query`]: Query interpreter and field search
//! - [`storage`]: Catalog and ledger persistence
//! - [`ui`]: Terminal rendering with theme support
//!
//! # Configuration
//!
//! An optional `librarian.toml` in the working directory (or the file given
//! with `--config`):
//!
//! ```toml
//! data_dir = "~/books"
//! theme = "library-light"
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```
//! use librarian::query::search;
//! use librarian::storage::builtin_catalog;
//!
//! let catalog = builtin_catalog()?;
//! let found = search(&catalog, "books by becky chambers");
//! assert_eq!(found.len(), 4);
//! # Ok::<(), librarian::LibrarianError>(())
//! ```

pub mod app;
pub mod circulation;
pub mod domain;
pub mod infrastructure;
pub mod insights;
pub mod observability;
pub mod query;
pub mod storage;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, ViewMode};
pub use domain::{Book, BookId, BookStatus, Catalog, LedgerAction, LedgerEntry, LibrarianError, MemberId, Result};
pub use ui::Theme;

use circulation::Circulation;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use storage::TextStorage;

/// Settings read from `librarian.toml`.
///
/// Every field is optional. Command-line flags override the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding `book_info.txt` and `logfile.txt`.
    ///
    /// A leading `~` is expanded. Default: `data_files`
    pub data_dir: Option<String>,

    /// Built-in theme name: `library-dark` or `library-light`.
    /// Ignored if `theme_file` is set.
    pub theme: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Level filter for the log file: `trace`, `debug`, `info`, `warn`, `error`.
    pub trace_level: Option<String>,

    /// Log file path. Default: `general.log` in the data directory.
    pub log_file: Option<String>,
}

impl Config {
    /// Parses a config document.
    ///
    /// # Errors
    ///
    /// Returns [`LibrarianError::Config`] for invalid TOML or unknown keys.
    ///
    /// # Example
    ///
    /// ```
    /// use librarian::Config;
    ///
    /// let config = Config::from_toml("data_dir = \"/srv/books\"\ntheme = \"library-light\"")?;
    /// assert_eq!(config.data_dir.as_deref(), Some("/srv/books"));
    /// assert!(Config::from_toml("colour = \"red\"").is_err());
    /// # Ok::<(), librarian::LibrarianError>(())
    /// ```
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| LibrarianError::Config(e.to_string()))
    }

    /// Loads the config from `explicit`, else `librarian.toml` in the working
    /// directory, else defaults.
    ///
    /// # Errors
    ///
    /// Returns [`LibrarianError::Config`] if the chosen file cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let Some(path) = infrastructure::find_config(explicit, &cwd) else {
            tracing::debug!("no config file, using defaults");
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(&path)
            .map_err(|e| LibrarianError::Config(format!("failed to read {}: {e}", path.display())))?;
        let config = Self::from_toml(&text)
            .map_err(|e| LibrarianError::Config(format!("{}: {e}", path.display())))?;

        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Data directory, with `cli` taking precedence.
    #[must_use]
    pub fn data_dir(&self, cli: Option<&Path>) -> PathBuf {
        infrastructure::get_data_dir(cli, self.data_dir.as_deref())
    }

    /// Log file path for the given data directory.
    #[must_use]
    pub fn log_path(&self, data_dir: &Path) -> PathBuf {
        infrastructure::get_log_path(data_dir, self.log_file.as_deref())
    }

    /// The configured theme. A theme file wins over a theme name.
    ///
    /// # Errors
    ///
    /// Returns [`LibrarianError::Theme`] for an unknown name or bad file.
    pub fn theme(&self) -> Result<Theme> {
        let file = self.theme_file.as_deref().map(infrastructure::expand_tilde);
        Theme::resolve(self.theme.as_deref(), file.as_deref())
    }
}

/// Opens the collection in `data_dir`, seeding it if needed, and builds the
/// menu state over it.
///
/// # Errors
///
/// Returns an error if the data files cannot be read or the theme is invalid.
pub fn initialize(config: &Config, data_dir: &Path) -> Result<(Circulation<TextStorage>, AppState)> {
    let _span = tracing::info_span!("initialize", data_dir = %data_dir.display()).entered();

    let theme = config.theme()?;
    let desk = Circulation::open(TextStorage::open(data_dir)?)?;
    let state = AppState::new(desk.catalog().clone(), desk.ledger().clone(), theme);

    tracing::info!(
        books = desk.catalog().len(),
        entries = desk.ledger().len(),
        "collection opened"
    );
    Ok((desk, state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn full_config_parses() {
        let config = Config::from_toml(
            r#"
            data_dir = "~/books"
            theme = "library-light"
            theme_file = "/etc/librarian/theme.toml"
            trace_level = "debug"
            log_file = "/tmp/librarian.log"
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            Config {
                data_dir: Some("~/books".into()),
                theme: Some("library-light".into()),
                theme_file: Some("/etc/librarian/theme.toml".into()),
                trace_level: Some("debug".into()),
                log_file: Some("/tmp/librarian.log".into()),
            }
        );
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn unknown_key_is_config_error() {
        assert!(matches!(Config::from_toml("budget = 3"), Err(LibrarianError::Config(_))));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = Config::load(Some(Path::new("/definitely/not/here/librarian.toml")));
        assert!(matches!(result, Err(LibrarianError::Config(_))));
    }

    #[test]
    fn initialize_seeds_and_loads() {
        let dir = tempfile::tempdir().unwrap();
        let (desk, state) = initialize(&Config::default(), dir.path()).unwrap();

        assert_eq!(desk.catalog().len(), state.catalog.len());
        assert!(desk.ledger().is_empty());
        assert!(dir.path().join(storage::CATALOG_FILE).exists());
        assert!(dir.path().join(storage::LEDGER_FILE).exists());
    }
}
