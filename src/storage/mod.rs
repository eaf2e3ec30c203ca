//! Storage layer for the book collection and the circulation ledger.
//!
//! # Modules
//!
//! - `backend`: Storage trait abstraction for backend implementations
//! - `format`: line formats of the catalog and ledger files
//! - `text`: text file storage in a data directory
//! - `memory`: in-memory storage

pub mod backend;
pub mod format;
pub mod memory;
pub mod text;

pub use backend::Storage;
pub use memory::MemoryStorage;
pub use text::{TextStorage, CATALOG_FILE, LEDGER_FILE};

use crate::domain::error::Result;
use crate::domain::Catalog;
use std::path::Path;

/// The bundled collection, in catalog file format.
pub const BUILTIN_CATALOG: &str = include_str!("../../assets/book_info.txt");

/// Parses the bundled collection.
///
/// # Errors
///
/// Returns an error if the bundled file is malformed, which a test guards against.
pub fn builtin_catalog() -> Result<Catalog> {
    Ok(Catalog::new(format::parse_catalog(BUILTIN_CATALOG)?))
}

/// Writes the built-in collection and an empty ledger into `dir`.
///
/// Existing files are left alone unless `force` is set. Returns `true` when
/// anything was written.
///
/// # Errors
///
/// Returns an error if the directory or either file cannot be written.
pub fn seed(dir: &Path, force: bool) -> Result<bool> {
    std::fs::create_dir_all(dir)?;

    let catalog_path = dir.join(CATALOG_FILE);
    let ledger_path = dir.join(LEDGER_FILE);
    let mut wrote = false;

    if force || !catalog_path.exists() {
        tracing::info!(path = %catalog_path.display(), "seeding catalog with built-in collection");
        text::write_atomic(&catalog_path, BUILTIN_CATALOG)?;
        wrote = true;
    }
    if force || !ledger_path.exists() {
        tracing::info!(path = %ledger_path.display(), "creating empty ledger");
        text::write_empty_ledger(&ledger_path)?;
        wrote = true;
    }

    Ok(wrote)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_parses() {
        let catalog = builtin_catalog().unwrap();
        assert!(catalog.len() >= 30);
        assert_eq!(catalog.get(1).map(|b| b.title.as_str()), Some("the way of kings"));
    }

    #[test]
    fn seed_respects_force() {
        let dir = tempfile::tempdir().unwrap();
        assert!(seed(dir.path(), false).unwrap());
        assert!(!seed(dir.path(), false).unwrap());
        assert!(seed(dir.path(), true).unwrap());
    }
}
