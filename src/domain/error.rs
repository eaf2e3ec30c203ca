//! Error types for Librarian.
//!
//! This module defines the centralized error type [`LibrarianError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented using the
//! `thiserror` crate for automatic `Error` trait implementation.
//!
//! Searching never produces an error: a query that cannot be interpreted simply
//! matches nothing. Errors come from storage, configuration, and circulation rules.

use crate::domain::book::BookId;
use thiserror::Error;

/// The main error type for Librarian operations.
///
/// # Examples
///
/// ```
/// use librarian::LibrarianError;
///
/// fn lookup(id: u32) -> Result<(), LibrarianError> {
///     Err(LibrarianError::UnknownBook(id))
/// }
///
/// assert_eq!(lookup(99).unwrap_err().to_string(), "no book with id 99");
/// ```
#[derive(Debug, Error)]
pub enum LibrarianError {
    /// Storage operation failed.
    ///
    /// Occurs when reading from or writing to the storage backend fails for a
    /// reason other than plain I/O (for example a serialization problem).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A line of the catalog file could not be parsed.
    #[error("catalog line {line}: {reason}")]
    Catalog {
        /// One-based line number in the catalog file.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// A line of the circulation ledger could not be parsed.
    #[error("ledger line {line}: {reason}")]
    Ledger {
        /// One-based line number in the ledger file.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or could not be read.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A field query named an unknown field or carried a malformed value.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A member id is not exactly four digits.
    #[error("invalid member id {0:?}: expected four digits")]
    InvalidMember(String),

    /// No book with the given id exists in the catalog.
    #[error("no book with id {0}")]
    UnknownBook(BookId),

    /// A book with the given id is already in the catalog.
    #[error("a book with id {0} already exists")]
    DuplicateBook(BookId),

    /// The book is currently on loan.
    #[error("book {0} is already checked out")]
    AlreadyOnLoan(BookId),

    /// The book is reserved by a different member.
    #[error("book {book} is reserved by member {member}")]
    ReservedByOther {
        /// Reserved book.
        book: BookId,
        /// Member holding the reservation.
        member: String,
    },

    /// The book is not on loan, so it cannot be returned.
    #[error("book {0} is not checked out")]
    NotOnLoan(BookId),

    /// The book cannot be reserved in its current state.
    #[error("book {book} cannot be reserved: {reason}")]
    NotReservable {
        /// Book that was asked for.
        book: BookId,
        /// Why the reservation was refused.
        reason: String,
    },

    /// The book has no open reservation to cancel.
    #[error("book {0} has no open reservation")]
    NoReservation(BookId),

    /// Not enough circulation data to compute insights.
    #[error("Insights error: {0}")]
    Insights(String),
}

/// A specialized `Result` type for Librarian operations.
pub type Result<T> = std::result::Result<T, LibrarianError>;
