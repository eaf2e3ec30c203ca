//! Replay of the circulation ledger into current loan and reservation state.

use crate::domain::{BookId, BookStatus, LedgerAction, LedgerEntry, MemberId};
use std::collections::BTreeMap;

/// The ledger entries plus the state they add up to.
///
/// State is derived purely by replaying entries in order:
///
/// - `OUT` starts a loan; if the borrower held the reservation it is fulfilled
/// - `RETURN` ends the loan (a reservation held by someone else stays open)
/// - `RESERVE` opens a reservation, `DERESERVE` closes it
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
    loans: BTreeMap<BookId, MemberId>,
    reservations: BTreeMap<BookId, MemberId>,
}

impl Ledger {
    #[must_use]
    pub fn new(entries: Vec<LedgerEntry>) -> Self {
        let mut ledger = Self::default();
        for entry in entries {
            ledger.record(entry);
        }
        tracing::debug!(
            entry_count = ledger.entries.len(),
            loans = ledger.loans.len(),
            reservations = ledger.reservations.len(),
            "ledger replayed"
        );
        ledger
    }

    /// Appends an entry and updates the derived state.
    pub fn record(&mut self, entry: LedgerEntry) {
        match entry.action {
            LedgerAction::Out => {
                if self.reservations.get(&entry.book_id) == Some(&entry.member_id) {
                    self.reservations.remove(&entry.book_id);
                }
                self.loans.insert(entry.book_id, entry.member_id.clone());
            }
            LedgerAction::Return => {
                self.loans.remove(&entry.book_id);
            }
            LedgerAction::Reserve => {
                self.reservations.insert(entry.book_id, entry.member_id.clone());
            }
            LedgerAction::Dereserve => {
                self.reservations.remove(&entry.book_id);
            }
        }
        self.entries.push(entry);
    }

    /// Current status of a book. Books never mentioned are available.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use librarian::{BookStatus, LedgerAction, LedgerEntry, MemberId};
    /// use librarian::circulation::Ledger;
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
    /// let member = MemberId::parse("1234").unwrap();
    /// let ledger = Ledger::new(vec![
    ///     LedgerEntry::new(LedgerAction::Out, 3, member.clone(), day),
    ///     LedgerEntry::new(LedgerAction::Return, 3, member, day),
    /// ]);
    /// assert_eq!(ledger.status(3), BookStatus::Available);
    /// ```
    #[must_use]
    pub fn status(&self, book: BookId) -> BookStatus {
        if self.loans.contains_key(&book) {
            BookStatus::Out
        } else if self.reservations.contains_key(&book) {
            BookStatus::Reserved
        } else {
            BookStatus::Available
        }
    }

    #[must_use]
    pub fn loan_holder(&self, book: BookId) -> Option<&MemberId> {
        self.loans.get(&book)
    }

    #[must_use]
    pub fn reservation_holder(&self, book: BookId) -> Option<&MemberId> {
        self.reservations.get(&book)
    }

    /// Ids of books on loan, ascending.
    #[must_use]
    pub fn loaned_ids(&self) -> Vec<BookId> {
        self.loans.keys().copied().collect()
    }

    /// Ids of books with an open reservation, ascending.
    #[must_use]
    pub fn reserved_ids(&self) -> Vec<BookId> {
        self.reservations.keys().copied().collect()
    }

    /// Every entry, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(action: LedgerAction, book: BookId, member: &str) -> LedgerEntry {
        LedgerEntry::new(
            action,
            book,
            MemberId::parse(member).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        )
    }

    #[test]
    fn reservation_survives_return() {
        let ledger = Ledger::new(vec![
            entry(LedgerAction::Out, 1, "1111"),
            entry(LedgerAction::Reserve, 1, "2222"),
            entry(LedgerAction::Return, 1, "1111"),
        ]);
        assert_eq!(ledger.status(1), BookStatus::Reserved);
        assert_eq!(ledger.reservation_holder(1).map(MemberId::as_str), Some("2222"));
        assert!(ledger.loaned_ids().is_empty());
    }

    #[test]
    fn own_checkout_fulfils_reservation() {
        let ledger = Ledger::new(vec![
            entry(LedgerAction::Out, 1, "1111"),
            entry(LedgerAction::Reserve, 1, "2222"),
            entry(LedgerAction::Return, 1, "1111"),
            entry(LedgerAction::Out, 1, "2222"),
        ]);
        assert_eq!(ledger.status(1), BookStatus::Out);
        assert!(ledger.reservation_holder(1).is_none());
        assert_eq!(ledger.loaned_ids(), vec![1]);
    }

    #[test]
    fn dereserve_closes_reservation() {
        let ledger = Ledger::new(vec![
            entry(LedgerAction::Out, 4, "1111"),
            entry(LedgerAction::Reserve, 4, "2222"),
            entry(LedgerAction::Dereserve, 4, "2222"),
        ]);
        assert_eq!(ledger.status(4), BookStatus::Out);
        assert!(ledger.reserved_ids().is_empty());
        assert_eq!(ledger.len(), 3);
    }
}
