//! Line formats of the catalog and ledger files.
//!
//! # Catalog (`book_info.txt`)
//!
//! ```text
//! ID; Genre; Title; Author; Purchase Price; Purchase Date
//! 1;fantasy;the way of kings;brandon sanderson;25;2014-03-04
//! ```
//!
//! # Ledger (`logfile.txt`)
//!
//! ```text
//! ACTION BOOK_ID MEMBER_ID
//! OUT 1 1234 2024-01-05
//! RETURN 1 1234 2024-01-19
//! ```
//!
//! Both files start with a header line. Blank lines are ignored. Line numbers in
//! errors are one-based and count the header.

use crate::domain::error::{LibrarianError, Result};
use crate::domain::{Book, BookId, LedgerAction, LedgerEntry, MemberId};
use chrono::NaiveDate;
use std::collections::HashSet;

pub const CATALOG_HEADER: &str = "ID; Genre; Title; Author; Purchase Price; Purchase Date";
pub const LEDGER_HEADER: &str = "ACTION BOOK_ID MEMBER_ID";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses the contents of a catalog file.
///
/// # Errors
///
/// Returns [`LibrarianError::Catalog`] naming the first malformed line: wrong
/// field count, a non-numeric or zero id, an empty title, author or category,
/// a bad price or date, or an id that appeared earlier in the file.
pub fn parse_catalog(contents: &str) -> Result<Vec<Book>> {
    let mut books = Vec::new();
    let mut seen = HashSet::new();

    for (index, line) in contents.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim();
        if line.is_empty() || (line_no == 1 && is_catalog_header(line)) {
            continue;
        }

        let book = parse_book(line).map_err(|reason| LibrarianError::Catalog { line: line_no, reason })?;
        if !seen.insert(book.id) {
            return Err(LibrarianError::Catalog {
                line: line_no,
                reason: format!("duplicate id {}", book.id),
            });
        }
        books.push(book);
    }

    tracing::debug!(book_count = books.len(), "catalog parsed");
    Ok(books)
}

fn is_catalog_header(line: &str) -> bool {
    line.split(';')
        .next()
        .is_some_and(|first| first.trim().eq_ignore_ascii_case("id"))
}

fn parse_book(line: &str) -> std::result::Result<Book, String> {
    let fields: Vec<&str> = line.split(';').map(str::trim).collect();
    let [id, category, title, author, price, date] = fields.as_slice() else {
        return Err(format!("expected 6 fields, found {}", fields.len()));
    };

    let id: BookId = id.parse().map_err(|_| format!("invalid id {id:?}"))?;
    if id == 0 {
        return Err("id must be positive".to_string());
    }
    for (name, value) in [("category", category), ("title", title), ("author", author)] {
        if value.is_empty() {
            return Err(format!("empty {name}"));
        }
    }
    let price: u32 = price
        .trim_start_matches('£')
        .parse()
        .map_err(|_| format!("invalid purchase price {price:?}"))?;
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| format!("invalid purchase date {date:?}"))?;

    Ok(Book::new(id, *category, *title, *author, price, date))
}

/// Checks that a book survives being written as a catalog line and read back.
///
/// # Errors
///
/// Returns [`LibrarianError::Storage`] for a book with an empty text field, a
/// zero id, or a field containing `;`, a line break, or surrounding spaces.
pub fn check_book(book: &Book) -> Result<()> {
    let line = format_book(book);
    match parse_book(&line) {
        Ok(parsed) if parsed == *book && !line.contains('\n') => Ok(()),
        Ok(_) => Err(LibrarianError::Storage(format!(
            "book {} cannot be stored: a field contains ';', a line break or surrounding spaces",
            book.id
        ))),
        Err(reason) => Err(LibrarianError::Storage(format!("book {} cannot be stored: {reason}", book.id))),
    }
}

fn format_book(book: &Book) -> String {
    format!(
        "{};{};{};{};{};{}",
        book.id,
        book.category,
        book.title,
        book.author,
        book.purchase_price,
        book.purchase_date.format(DATE_FORMAT)
    )
}

/// Formats books as a complete catalog file, header included.
#[must_use]
pub fn format_catalog(books: &[Book]) -> String {
    let mut out = String::with_capacity(CATALOG_HEADER.len() + books.len() * 64);
    out.push_str(CATALOG_HEADER);
    out.push('\n');
    for book in books {
        out.push_str(&format_book(book));
        out.push('\n');
    }
    out
}

/// Parses the contents of a ledger file.
///
/// # Errors
///
/// Returns [`LibrarianError::Ledger`] naming the first malformed line.
pub fn parse_ledger(contents: &str) -> Result<Vec<LedgerEntry>> {
    let mut entries = Vec::new();

    for (index, line) in contents.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim();
        if line.is_empty() || (line_no == 1 && line == LEDGER_HEADER) {
            continue;
        }

        let entry = parse_entry(line).map_err(|reason| LibrarianError::Ledger { line: line_no, reason })?;
        entries.push(entry);
    }

    tracing::debug!(entry_count = entries.len(), "ledger parsed");
    Ok(entries)
}

fn parse_entry(line: &str) -> std::result::Result<LedgerEntry, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [action, book, member, date] = fields.as_slice() else {
        return Err(format!("expected 4 fields, found {}", fields.len()));
    };

    let action: LedgerAction = action.parse()?;
    let book_id: BookId = book.parse().map_err(|_| format!("invalid book id {book:?}"))?;
    let member_id = MemberId::parse(member).map_err(|e| e.to_string())?;
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| format!("invalid date {date:?}"))?;

    Ok(LedgerEntry::new(action, book_id, member_id, date))
}

/// Formats one ledger entry as a line, without the trailing newline.
#[must_use]
pub fn format_entry(entry: &LedgerEntry) -> String {
    format!(
        "{} {} {} {}",
        entry.action,
        entry.book_id,
        entry.member_id,
        entry.date.format(DATE_FORMAT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn catalog_skips_header_and_blank_lines() {
        let text = "ID; Genre; Title; Author; Purchase Price; Purchase Date\n\n\
                    2; maths ;x + y;eugenia cheng;18;2020-11-02\n";
        let books = parse_catalog(text).unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].category, "maths");
        assert_eq!(books[0].purchase_price, 18);
    }

    #[test]
    fn catalog_errors_carry_line_numbers() {
        let text = format!("{CATALOG_HEADER}\n1;fantasy;mistborn;brandon sanderson;9;2016-07-01\n2;fantasy;;someone;9;2016-07-01\n");
        match parse_catalog(&text).unwrap_err() {
            LibrarianError::Catalog { line, reason } => {
                assert_eq!(line, 3);
                assert_eq!(reason, "empty title");
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn catalog_rejects_duplicate_ids() {
        let text = "1;fantasy;mistborn;brandon sanderson;9;2016-07-01\n1;fantasy;elantris;brandon sanderson;8;2015-01-30\n";
        assert!(matches!(
            parse_catalog(text),
            Err(LibrarianError::Catalog { line: 2, .. })
        ));
    }

    #[test]
    fn catalog_round_trips_through_format() {
        let text = "1;fantasy;mistborn;brandon sanderson;9;2016-07-01\n";
        let books = parse_catalog(text).unwrap();
        assert_eq!(parse_catalog(&format_catalog(&books)).unwrap(), books);
    }

    #[test]
    fn ledger_lines() {
        let text = "ACTION BOOK_ID MEMBER_ID\nOUT 3 1234 2024-01-05\nRESERVE   3 4321 2024-01-06\n";
        let entries = parse_ledger(text).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].action, LedgerAction::Reserve);
        assert_eq!(format_entry(&entries[0]), "OUT 3 1234 2024-01-05");
    }

    #[test]
    fn ledger_rejects_bad_member() {
        let text = "ACTION BOOK_ID MEMBER_ID\nOUT 3 12 2024-01-05\n";
        assert!(matches!(parse_ledger(text), Err(LibrarianError::Ledger { line: 2, .. })));
    }

    #[test]
    fn ledger_header_must_match_exactly() {
        let text = "ACTION BOOK_ID MEMBER_IDOUT 1 1234 2024-01-01\n";
        assert!(matches!(parse_ledger(text), Err(LibrarianError::Ledger { line: 1, .. })));
    }

    #[test]
    fn check_book_rejects_unstorable_fields() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert!(check_book(&Book::new(40, "poetry", "odes", "john keats", 7, date)).is_ok());
        assert!(check_book(&Book::new(41, "poetry", "odes; vol 2", "john keats", 7, date)).is_err());
        assert!(check_book(&Book::new(42, "poetry", "", "john keats", 7, date)).is_err());
        assert!(check_book(&Book::new(0, "poetry", "odes", "john keats", 7, date)).is_err());
    }
}
