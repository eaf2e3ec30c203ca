//! In-memory storage backend.

use crate::domain::error::{LibrarianError, Result};
use crate::domain::{Book, LedgerEntry};
use crate::storage::backend::Storage;

/// Keeps books and ledger entries in memory. Nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    books: Vec<Book>,
    entries: Vec<LedgerEntry>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new(mut books: Vec<Book>) -> Self {
        books.sort_by_key(|b| b.id);
        Self {
            books,
            entries: Vec::new(),
        }
    }

    /// Starts from the built-in collection with an empty ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled catalog fails to parse.
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(super::builtin_catalog()?.books().to_vec()))
    }

    #[must_use]
    pub fn with_entries(mut self, entries: Vec<LedgerEntry>) -> Self {
        self.entries = entries;
        self
    }
}

impl Storage for MemoryStorage {
    fn books(&self) -> Result<Vec<Book>> {
        Ok(self.books.clone())
    }

    fn add_book(&mut self, book: &Book) -> Result<()> {
        if self.books.iter().any(|b| b.id == book.id) {
            return Err(LibrarianError::DuplicateBook(book.id));
        }
        self.books.push(book.clone());
        self.books.sort_by_key(|b| b.id);
        Ok(())
    }

    fn entries(&self) -> Result<Vec<LedgerEntry>> {
        Ok(self.entries.clone())
    }

    fn append_entry(&mut self, entry: &LedgerEntry) -> Result<()> {
        self.entries.push(entry.clone());
        Ok(())
    }
}
