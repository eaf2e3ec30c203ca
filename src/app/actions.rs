//! Side effects requested by the event handler.
//!
//! The handler never touches storage. It returns [`Action`]s; the runtime
//! performs them and feeds the outcome back as an [`Event`]. For circulation
//! requests that round trip is [`perform`].

use super::handler::Event;
use super::modes::CirculationOp;
use crate::circulation::Circulation;
use crate::domain::{BookId, LedgerEntry, LibrarianError, MemberId};
use crate::storage::Storage;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Leave the menu.
    Quit,

    /// Apply a circulation operation to books, in order.
    Circulate(CirculationRequest),
}

/// One circulation operation over one or more books.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CirculationRequest {
    pub op: CirculationOp,
    pub books: Vec<BookId>,
    /// Member acting; required for check out and reserve.
    pub member: Option<MemberId>,
}

/// Entries written by a request, and the refusal that stopped it if any.
#[derive(Debug)]
pub struct CirculationOutcome {
    pub entries: Vec<LedgerEntry>,
    pub error: Option<LibrarianError>,
}

/// Applies a circulation request to the desk.
///
/// Books are processed in order and processing stops at the first refusal.
/// Entries written before the refusal are kept in the outcome.
pub fn apply<S: Storage>(desk: &mut Circulation<S>, request: &CirculationRequest, today: NaiveDate) -> CirculationOutcome {
    let _span = tracing::debug_span!("apply_circulation",
        op = %request.op,
        books = request.books.len()
    ).entered();

    let mut entries: Vec<LedgerEntry> = Vec::with_capacity(request.books.len());

    for &book in &request.books {
        let outcome = match (request.op, request.member.as_ref()) {
            (CirculationOp::CheckOut, Some(member)) => desk.check_out(book, member, today),
            (CirculationOp::Reserve, Some(member)) => desk.reserve(book, member, today),
            (CirculationOp::Dereserve, _) => desk.dereserve(book, today),
            (CirculationOp::Return, _) => desk.return_book(book, today),
            (op, None) => Err(LibrarianError::InvalidMember(format!("{op} needs a member id"))),
        };

        match outcome {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                tracing::warn!(book_id = book, error = %e, "circulation request refused");
                return CirculationOutcome {
                    entries,
                    error: Some(e),
                };
            }
        }
    }

    CirculationOutcome { entries, error: None }
}

/// Performs a circulation request and reports the outcome as an event for
/// the menu, so its ledger snapshot stays in step with storage.
pub fn perform<S: Storage>(desk: &mut Circulation<S>, request: &CirculationRequest, today: NaiveDate) -> Event {
    let CirculationOutcome { entries, error } = apply(desk, request, today);
    match error {
        None => Event::CirculationCompleted {
            op: request.op,
            entries,
        },
        Some(LibrarianError::InvalidMember(_)) if request.member.is_none() => Event::CirculationFailed {
            entries,
            error: format!("{} needs a member id, set one with :member", request.op),
        },
        Some(e) => Event::CirculationFailed {
            entries,
            error: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn reports_partial_progress_on_refusal() {
        let mut desk = Circulation::open(MemoryStorage::builtin().unwrap()).unwrap();
        let request = CirculationRequest {
            op: CirculationOp::CheckOut,
            books: vec![1, 1, 2],
            member: Some(MemberId::parse("1234").unwrap()),
        };

        match perform(&mut desk, &request, today()) {
            Event::CirculationFailed { entries, error } => {
                assert_eq!(entries.len(), 1);
                assert!(error.contains("already checked out"));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn check_out_without_member_is_refused() {
        let mut desk = Circulation::open(MemoryStorage::builtin().unwrap()).unwrap();
        let request = CirculationRequest {
            op: CirculationOp::CheckOut,
            books: vec![1],
            member: None,
        };
        assert!(matches!(
            perform(&mut desk, &request, today()),
            Event::CirculationFailed { .. }
        ));
        assert!(desk.ledger().is_empty());
    }

    #[test]
    fn apply_keeps_the_typed_refusal() {
        let mut desk = Circulation::open(MemoryStorage::builtin().unwrap()).unwrap();
        let request = CirculationRequest {
            op: CirculationOp::Return,
            books: vec![3],
            member: None,
        };

        let outcome = apply(&mut desk, &request, today());
        assert!(outcome.entries.is_empty());
        assert!(matches!(outcome.error, Some(LibrarianError::NotOnLoan(3))));
    }
}
