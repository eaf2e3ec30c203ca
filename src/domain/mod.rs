//! Domain layer for Librarian.
//!
//! This module contains the core domain types, independent of storage formats
//! and the terminal front-end.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`book`]: Book records and the catalog
//! - [`member`]: Member ids, ledger entries, and book status
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use librarian::domain::{Book, Catalog, Result};
//!
//! fn one_book() -> Result<Catalog> {
//!     let date = NaiveDate::from_ymd_opt(2019, 5, 1).unwrap();
//!     Ok(Catalog::new(vec![Book::new(1, "fantasy", "mistborn", "brandon sanderson", 9, date)]))
//! }
//! ```

pub mod book;
pub mod error;
pub mod member;

pub use book::{Book, BookId, Catalog};
pub use error::{LibrarianError, Result};
pub use member::{BookStatus, LedgerAction, LedgerEntry, MemberId};
