//! Text file storage backend.
//!
//! Books live in `book_info.txt` and the circulation ledger in `logfile.txt`,
//! both inside one data directory. The formats are described in
//! [`format`](super::format).
//!
//! The catalog is rewritten as a whole on every change through a temporary
//! file and a rename, so a crash never leaves it half written. The ledger is
//! only ever appended to.

use crate::domain::error::{LibrarianError, Result};
use crate::domain::{Book, LedgerEntry};
use crate::storage::backend::Storage;
use crate::storage::format::{check_book, format_catalog, format_entry, parse_catalog, parse_ledger, LEDGER_HEADER};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

pub const CATALOG_FILE: &str = "book_info.txt";
pub const LEDGER_FILE: &str = "logfile.txt";

/// File storage backend over a data directory.
///
/// Both files are read once when the storage is opened and kept in memory;
/// every change is written through to disk before the call returns.
///
/// # Thread Safety
///
/// One process is expected to own the data directory at a time.
#[derive(Debug)]
pub struct TextStorage {
    catalog_path: PathBuf,
    ledger_path: PathBuf,
    books: Vec<Book>,
    entries: Vec<LedgerEntry>,
}

impl TextStorage {
    /// Opens the data directory, seeding any missing file first.
    ///
    /// A missing catalog is filled with the built-in collection and a missing
    /// ledger is created holding only its header.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, a file cannot be
    /// read, or either file contains a malformed line.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use librarian::storage::{Storage, TextStorage};
    ///
    /// let storage = TextStorage::open("data_files")?;
    /// println!("{} books", storage.books()?.len());
    /// # Ok::<(), librarian::LibrarianError>(())
    /// ```
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let _span = tracing::debug_span!("text_storage_open", dir = %dir.display()).entered();

        super::seed(dir, false)?;

        let catalog_path = dir.join(CATALOG_FILE);
        let ledger_path = dir.join(LEDGER_FILE);

        let books = parse_catalog(&std::fs::read_to_string(&catalog_path)?)?;
        let entries = parse_ledger(&std::fs::read_to_string(&ledger_path)?)?;

        tracing::debug!(
            book_count = books.len(),
            entry_count = entries.len(),
            "storage opened"
        );

        let mut storage = Self {
            catalog_path,
            ledger_path,
            books,
            entries,
        };
        storage.books.sort_by_key(|b| b.id);
        Ok(storage)
    }

    #[must_use]
    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    #[must_use]
    pub fn ledger_path(&self) -> &Path {
        &self.ledger_path
    }

    fn save_catalog(&self, books: &[Book]) -> Result<()> {
        write_atomic(&self.catalog_path, &format_catalog(books))
    }
}

/// Writes `contents` to a sibling temporary file, then renames it over `path`.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let tmp_path = path.with_extension("tmp");

    tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
    std::fs::write(&tmp_path, contents)?;

    tracing::trace!("renaming temporary file to final location");
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Creates `path` holding only the ledger header.
pub(crate) fn write_empty_ledger(path: &Path) -> Result<()> {
    write_atomic(path, &format!("{LEDGER_HEADER}\n"))
}

/// `true` for an empty file or one whose last byte is `\n`.
fn ends_with_newline(path: &Path) -> Result<bool> {
    let mut file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

impl Storage for TextStorage {
    fn books(&self) -> Result<Vec<Book>> {
        Ok(self.books.clone())
    }

    fn add_book(&mut self, book: &Book) -> Result<()> {
        let _span = tracing::debug_span!("text_add_book", book_id = book.id).entered();

        check_book(book)?;
        if self.books.iter().any(|b| b.id == book.id) {
            return Err(LibrarianError::DuplicateBook(book.id));
        }

        let mut books = self.books.clone();
        books.push(book.clone());
        books.sort_by_key(|b| b.id);

        self.save_catalog(&books)?;
        self.books = books;

        tracing::info!(book_id = book.id, title = %book.title, "book added");
        Ok(())
    }

    fn entries(&self) -> Result<Vec<LedgerEntry>> {
        Ok(self.entries.clone())
    }

    fn append_entry(&mut self, entry: &LedgerEntry) -> Result<()> {
        let _span = tracing::debug_span!("text_append_entry",
            action = %entry.action,
            book_id = entry.book_id
        ).entered();

        if !self.ledger_path.exists() {
            write_empty_ledger(&self.ledger_path)?;
        }

        let terminated = ends_with_newline(&self.ledger_path)?;
        let mut file = OpenOptions::new().append(true).open(&self.ledger_path)?;
        if !terminated {
            tracing::debug!(path = %self.ledger_path.display(), "ledger lacks a final newline, adding one");
            writeln!(file)?;
        }
        writeln!(file, "{}", format_entry(entry))?;
        file.flush()?;

        self.entries.push(entry.clone());
        tracing::debug!(entry_count = self.entries.len(), "ledger entry appended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LedgerAction, MemberId};
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    }

    #[test]
    fn open_seeds_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = TextStorage::open(dir.path()).unwrap();

        assert!(storage.catalog_path().exists());
        assert!(storage.ledger_path().exists());
        assert!(!storage.books().unwrap().is_empty());
        assert!(storage.entries().unwrap().is_empty());
    }

    #[test]
    fn appended_entries_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = TextStorage::open(dir.path()).unwrap();
        let entry = LedgerEntry::new(LedgerAction::Out, 1, MemberId::parse("1234").unwrap(), date());
        storage.append_entry(&entry).unwrap();

        let reopened = TextStorage::open(dir.path()).unwrap();
        assert_eq!(reopened.entries().unwrap(), vec![entry]);
    }

    #[test]
    fn append_after_unterminated_header_starts_a_new_line() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(LEDGER_FILE), LEDGER_HEADER).unwrap();
        let mut storage = TextStorage::open(dir.path()).unwrap();

        let entry = LedgerEntry::new(LedgerAction::Out, 1, MemberId::parse("1234").unwrap(), date());
        storage.append_entry(&entry).unwrap();

        let text = std::fs::read_to_string(dir.path().join(LEDGER_FILE)).unwrap();
        assert_eq!(text, format!("{LEDGER_HEADER}\nOUT 1 1234 2024-01-05\n"));
    }

    #[test]
    fn add_book_rejects_duplicates_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = TextStorage::open(dir.path()).unwrap();

        let dup = Book::new(1, "fantasy", "copy", "someone", 1, date());
        assert!(matches!(storage.add_book(&dup), Err(LibrarianError::DuplicateBook(1))));

        let new = Book::new(900, "poetry", "odes", "john keats", 7, date());
        storage.add_book(&new).unwrap();
        assert!(!dir.path().join("book_info.tmp").exists());

        let reopened = TextStorage::open(dir.path()).unwrap();
        assert_eq!(reopened.books().unwrap().last(), Some(&new));
    }
}
