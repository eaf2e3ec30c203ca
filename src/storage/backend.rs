//! Storage backend abstraction.
//!
//! The [`Storage`] trait covers exactly what the application needs: reading the
//! book collection, adding a book, reading the circulation ledger and appending
//! to it. Ledger entries are never rewritten or removed.

use crate::domain::error::Result;
use crate::domain::{Book, Catalog, LedgerEntry};

/// Abstraction over persistent storage backends.
///
/// # Implementations
///
/// - [`TextStorage`](super::TextStorage): semicolon-separated catalog and
///   space-separated ledger files in a data directory (default)
/// - [`MemoryStorage`](super::MemoryStorage): everything held in memory
///
/// # Examples
///
/// ```
/// use librarian::storage::{MemoryStorage, Storage};
///
/// let storage = MemoryStorage::builtin()?;
/// let catalog = storage.catalog()?;
/// assert!(catalog.get(1).is_some());
/// assert!(storage.entries()?.is_empty());
/// # Ok::<(), librarian::LibrarianError>(())
/// ```
pub trait Storage: Send {
    /// Returns every stored book in ascending id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn books(&self) -> Result<Vec<Book>>;

    /// Adds a book to the collection.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateBook`](crate::LibrarianError::DuplicateBook) if the id
    /// is taken, or an error if the write fails. A failed write leaves the
    /// stored collection unchanged.
    fn add_book(&mut self, book: &Book) -> Result<()>;

    /// Returns the circulation ledger, oldest entry first.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn entries(&self) -> Result<Vec<LedgerEntry>>;

    /// Appends one entry to the end of the ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn append_entry(&mut self, entry: &LedgerEntry) -> Result<()>;

    /// Loads the books into a [`Catalog`].
    ///
    /// # Errors
    ///
    /// Returns an error if [`books`](Self::books) fails.
    fn catalog(&self) -> Result<Catalog> {
        Ok(Catalog::new(self.books()?))
    }
}
