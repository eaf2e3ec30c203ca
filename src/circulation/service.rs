//! Circulation operations over a storage backend.
//!
//! [`Circulation`] checks every request against the replayed [`Ledger`] and only
//! then appends the resulting entry to storage. A refused request writes nothing.

use super::ledger::Ledger;
use crate::domain::error::{LibrarianError, Result};
use crate::domain::{Book, BookId, BookStatus, Catalog, LedgerAction, LedgerEntry, MemberId};
use crate::storage::Storage;
use chrono::NaiveDate;

/// Catalog, ledger and the storage they were loaded from.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use librarian::{BookStatus, MemberId};
/// use librarian::circulation::Circulation;
/// use librarian::storage::MemoryStorage;
///
/// let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let mut desk = Circulation::open(MemoryStorage::builtin()?)?;
/// let member = MemberId::parse("1234")?;
///
/// desk.check_out(1, &member, today)?;
/// assert_eq!(desk.status(1)?, BookStatus::Out);
/// desk.return_book(1, today)?;
/// assert_eq!(desk.status(1)?, BookStatus::Available);
/// # Ok::<(), librarian::LibrarianError>(())
/// ```
#[derive(Debug)]
pub struct Circulation<S: Storage> {
    storage: S,
    catalog: Catalog,
    ledger: Ledger,
}

impl<S: Storage> Circulation<S> {
    /// Loads the catalog and replays the ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend cannot be read.
    pub fn open(storage: S) -> Result<Self> {
        let catalog = storage.catalog()?;
        let ledger = Ledger::new(storage.entries()?);
        Ok(Self {
            storage,
            catalog,
            ledger,
        })
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Status of a catalogued book.
    ///
    /// # Errors
    ///
    /// Returns [`LibrarianError::UnknownBook`] if the id is not in the catalog.
    pub fn status(&self, book: BookId) -> Result<BookStatus> {
        self.require_book(book)?;
        Ok(self.ledger.status(book))
    }

    /// Adds a book to the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if storage refuses the book (duplicate id) or the write fails.
    pub fn add_book(&mut self, book: Book) -> Result<()> {
        self.storage.add_book(&book)?;
        self.catalog = self.storage.catalog()?;
        Ok(())
    }

    /// Lends a book to a member.
    ///
    /// A member may check out a book they reserved themselves; the reservation
    /// is fulfilled by the loan.
    ///
    /// # Errors
    ///
    /// - [`LibrarianError::UnknownBook`] if the book does not exist
    /// - [`LibrarianError::AlreadyOnLoan`] if it is on loan
    /// - [`LibrarianError::ReservedByOther`] if another member reserved it
    pub fn check_out(&mut self, book: BookId, member: &MemberId, today: NaiveDate) -> Result<LedgerEntry> {
        let _span = tracing::debug_span!("check_out", book_id = book, member = %member).entered();
        self.require_book(book)?;

        if self.ledger.loan_holder(book).is_some() {
            return Err(LibrarianError::AlreadyOnLoan(book));
        }
        if let Some(holder) = self.ledger.reservation_holder(book) {
            if holder != member {
                return Err(LibrarianError::ReservedByOther {
                    book,
                    member: holder.to_string(),
                });
            }
        }

        self.commit(LedgerEntry::new(LedgerAction::Out, book, member.clone(), today))
    }

    /// Reserves a book that is on loan to someone else.
    ///
    /// # Errors
    ///
    /// - [`LibrarianError::UnknownBook`] if the book does not exist
    /// - [`LibrarianError::NotReservable`] if the book is not on loan, is on
    ///   loan to this member, or already has a reservation
    pub fn reserve(&mut self, book: BookId, member: &MemberId, today: NaiveDate) -> Result<LedgerEntry> {
        let _span = tracing::debug_span!("reserve", book_id = book, member = %member).entered();
        self.require_book(book)?;

        let refuse = |reason: String| LibrarianError::NotReservable { book, reason };

        match self.ledger.loan_holder(book) {
            None => return Err(refuse("it is not checked out".to_string())),
            Some(borrower) if borrower == member => {
                return Err(refuse(format!("member {member} already has it")));
            }
            Some(_) => {}
        }
        if let Some(holder) = self.ledger.reservation_holder(book) {
            return Err(refuse(format!("it is already reserved by member {holder}")));
        }

        self.commit(LedgerEntry::new(LedgerAction::Reserve, book, member.clone(), today))
    }

    /// Cancels the open reservation on a book. The entry carries the holder's id.
    ///
    /// # Errors
    ///
    /// - [`LibrarianError::UnknownBook`] if the book does not exist
    /// - [`LibrarianError::NoReservation`] if nobody holds a reservation
    pub fn dereserve(&mut self, book: BookId, today: NaiveDate) -> Result<LedgerEntry> {
        let _span = tracing::debug_span!("dereserve", book_id = book).entered();
        self.require_book(book)?;

        let holder = self
            .ledger
            .reservation_holder(book)
            .cloned()
            .ok_or(LibrarianError::NoReservation(book))?;

        self.commit(LedgerEntry::new(LedgerAction::Dereserve, book, holder, today))
    }

    /// Takes a book back. The entry carries the borrower's id.
    ///
    /// # Errors
    ///
    /// - [`LibrarianError::UnknownBook`] if the book does not exist
    /// - [`LibrarianError::NotOnLoan`] if it is not on loan
    pub fn return_book(&mut self, book: BookId, today: NaiveDate) -> Result<LedgerEntry> {
        let _span = tracing::debug_span!("return_book", book_id = book).entered();
        self.require_book(book)?;

        let borrower = self
            .ledger
            .loan_holder(book)
            .cloned()
            .ok_or(LibrarianError::NotOnLoan(book))?;

        self.commit(LedgerEntry::new(LedgerAction::Return, book, borrower, today))
    }

    /// Returns several books in order, stopping at the first failure.
    ///
    /// Books returned before the failure stay returned.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`return_book`](Self::return_book).
    pub fn return_books(&mut self, books: &[BookId], today: NaiveDate) -> Result<Vec<LedgerEntry>> {
        books.iter().map(|&book| self.return_book(book, today)).collect()
    }

    fn require_book(&self, book: BookId) -> Result<()> {
        if self.catalog.contains(book) {
            Ok(())
        } else {
            Err(LibrarianError::UnknownBook(book))
        }
    }

    fn commit(&mut self, entry: LedgerEntry) -> Result<LedgerEntry> {
        self.storage.append_entry(&entry)?;
        self.ledger.record(entry.clone());
        tracing::info!(
            action = %entry.action,
            book_id = entry.book_id,
            member = %entry.member_id,
            "circulation entry recorded"
        );
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn member(id: &str) -> MemberId {
        MemberId::parse(id).unwrap()
    }

    fn desk() -> Circulation<MemoryStorage> {
        Circulation::open(MemoryStorage::builtin().unwrap()).unwrap()
    }

    #[test]
    fn cannot_check_out_twice() {
        let mut desk = desk();
        desk.check_out(2, &member("1111"), today()).unwrap();
        assert!(matches!(
            desk.check_out(2, &member("2222"), today()),
            Err(LibrarianError::AlreadyOnLoan(2))
        ));
    }

    #[test]
    fn reservation_blocks_other_members() {
        let mut desk = desk();
        desk.check_out(2, &member("1111"), today()).unwrap();
        desk.reserve(2, &member("2222"), today()).unwrap();
        desk.return_book(2, today()).unwrap();

        assert_eq!(desk.status(2).unwrap(), BookStatus::Reserved);
        assert!(matches!(
            desk.check_out(2, &member("3333"), today()),
            Err(LibrarianError::ReservedByOther { book: 2, .. })
        ));
        desk.check_out(2, &member("2222"), today()).unwrap();
        assert_eq!(desk.status(2).unwrap(), BookStatus::Out);
    }

    #[test]
    fn reserve_requires_loan_to_someone_else() {
        let mut desk = desk();
        assert!(matches!(
            desk.reserve(3, &member("1111"), today()),
            Err(LibrarianError::NotReservable { book: 3, .. })
        ));
        desk.check_out(3, &member("1111"), today()).unwrap();
        assert!(desk.reserve(3, &member("1111"), today()).is_err());
        desk.reserve(3, &member("2222"), today()).unwrap();
        assert!(desk.reserve(3, &member("3333"), today()).is_err());
    }

    #[test]
    fn dereserve_and_return_carry_holder() {
        let mut desk = desk();
        desk.check_out(5, &member("1111"), today()).unwrap();
        desk.reserve(5, &member("2222"), today()).unwrap();

        let cancelled = desk.dereserve(5, today()).unwrap();
        assert_eq!(cancelled.member_id, member("2222"));
        assert!(matches!(desk.dereserve(5, today()), Err(LibrarianError::NoReservation(5))));

        let returned = desk.return_book(5, today()).unwrap();
        assert_eq!(returned.member_id, member("1111"));
    }

    #[test]
    fn return_books_stops_at_first_failure() {
        let mut desk = desk();
        desk.check_out(1, &member("1111"), today()).unwrap();
        desk.check_out(3, &member("1111"), today()).unwrap();

        let err = desk.return_books(&[1, 2, 3], today()).unwrap_err();
        assert!(matches!(err, LibrarianError::NotOnLoan(2)));
        assert_eq!(desk.status(1).unwrap(), BookStatus::Available);
        assert_eq!(desk.status(3).unwrap(), BookStatus::Out);
    }

    #[test]
    fn unknown_book_is_rejected() {
        let mut desk = desk();
        assert!(matches!(
            desk.check_out(9999, &member("1111"), today()),
            Err(LibrarianError::UnknownBook(9999))
        ));
        assert!(desk.ledger().is_empty());
    }
}
