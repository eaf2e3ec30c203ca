//! Human-readable descriptions of ledger entries.

use crate::domain::{Catalog, LedgerAction, LedgerEntry};

/// Describes one entry, e.g.
/// `Member 1234 checked out the book "The Way Of Kings" on 2024-01-05.`
///
/// Entries naming a book missing from the catalog describe it by id.
#[must_use]
pub fn describe(catalog: &Catalog, entry: &LedgerEntry) -> String {
    let book = catalog.get(entry.book_id).map_or_else(
        || format!("book #{}", entry.book_id),
        |book| format!("the book \"{}\"", book.display_title()),
    );

    let verb = match entry.action {
        LedgerAction::Out => format!("checked out {book}"),
        LedgerAction::Return => format!("returned {book}"),
        LedgerAction::Reserve => format!("reserved {book}"),
        LedgerAction::Dereserve => format!("revoked their reservation on {book}"),
    };

    format!("Member {} {verb} on {}.", entry.member_id, entry.date.format("%Y-%m-%d"))
}

/// Describes ledger entries most recent first, at most `limit` of them.
#[must_use]
pub fn recent_activity(catalog: &Catalog, entries: &[LedgerEntry], limit: Option<usize>) -> Vec<String> {
    entries
        .iter()
        .rev()
        .take(limit.unwrap_or(usize::MAX))
        .map(|entry| describe(catalog, entry))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Book, MemberId};
    use chrono::NaiveDate;

    #[test]
    fn most_recent_first() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let catalog = Catalog::new(vec![Book::new(1, "fantasy", "the way of kings", "brandon sanderson", 25, day)]);
        let member = MemberId::parse("1234").unwrap();
        let entries = vec![
            LedgerEntry::new(LedgerAction::Out, 1, member.clone(), day),
            LedgerEntry::new(LedgerAction::Return, 7, member, day),
        ];

        let lines = recent_activity(&catalog, &entries, None);
        assert_eq!(lines[0], "Member 1234 returned book #7 on 2024-01-05.");
        assert_eq!(
            lines[1],
            "Member 1234 checked out the book \"The Way Of Kings\" on 2024-01-05."
        );
        assert_eq!(recent_activity(&catalog, &entries, Some(1)).len(), 1);
    }
}
