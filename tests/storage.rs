use librarian::circulation::Circulation;
use librarian::storage::{builtin_catalog, seed, Storage, TextStorage, CATALOG_FILE, LEDGER_FILE};
use chrono::NaiveDate;
use librarian::{BookStatus, LedgerAction, LibrarianError, MemberId};
use std::fs;

#[test]
fn fresh_directory_is_seeded_with_the_builtin_collection() {
    let dir = tempfile::tempdir().unwrap();
    let storage = TextStorage::open(dir.path().join("nested")).unwrap();

    assert_eq!(storage.books().unwrap(), builtin_catalog().unwrap().books().to_vec());
    assert!(storage.entries().unwrap().is_empty());
    assert!(dir.path().join("nested").join(CATALOG_FILE).is_file());
}

#[test]
fn seeding_keeps_existing_files_unless_forced() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = dir.path().join(LEDGER_FILE);

    assert!(seed(dir.path(), false).unwrap());
    fs::write(&ledger, "OUT 1 1234 2024-01-01\n").unwrap();

    assert!(!seed(dir.path(), false).unwrap());
    assert_eq!(TextStorage::open(dir.path()).unwrap().entries().unwrap().len(), 1);

    assert!(seed(dir.path(), true).unwrap());
    assert!(TextStorage::open(dir.path()).unwrap().entries().unwrap().is_empty());
}

#[test]
fn malformed_catalog_reports_the_line() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(CATALOG_FILE),
        "ID; Genre; Title; Author; Purchase Price; Purchase Date\n\
         1;fantasy;mistborn;brandon sanderson;9;2016-07-01\n\
         2;fantasy;elantris;brandon sanderson;eight;2015-01-30\n",
    )
    .unwrap();

    match TextStorage::open(dir.path()) {
        Err(LibrarianError::Catalog { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected a catalog error, got {other:?}"),
    }
}

#[test]
fn malformed_ledger_reports_the_line() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path(), false).unwrap();
    fs::write(dir.path().join(LEDGER_FILE), "OUT 1 1234 2024-01-01\nLEND 2 1234 2024-01-02\n").unwrap();

    assert!(matches!(
        TextStorage::open(dir.path()),
        Err(LibrarianError::Ledger { line: 2, .. })
    ));
}

#[test]
fn hand_written_ledger_is_replayed() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path(), false).unwrap();
    fs::write(
        dir.path().join(LEDGER_FILE),
        "OUT 4 1111 2024-01-01\nRESERVE 4 2222 2024-01-02\nRETURN 4 1111 2024-01-03\n",
    )
    .unwrap();

    let desk = Circulation::open(TextStorage::open(dir.path()).unwrap()).unwrap();
    assert_eq!(desk.ledger().len(), 3);
    assert_eq!(desk.ledger().entries()[1].action, LedgerAction::Reserve);
    assert_eq!(desk.ledger().reservation_holder(4).map(|m| m.as_str()), Some("2222"));
    assert!(desk.ledger().loan_holder(4).is_none());
}

#[test]
fn checkout_after_header_without_newline_is_kept() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path(), false).unwrap();
    fs::write(dir.path().join(LEDGER_FILE), "ACTION BOOK_ID MEMBER_ID").unwrap();

    let mut desk = Circulation::open(TextStorage::open(dir.path()).unwrap()).unwrap();
    let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    desk.check_out(1, &MemberId::parse("1234").unwrap(), day).unwrap();

    let reopened = Circulation::open(TextStorage::open(dir.path()).unwrap()).unwrap();
    assert_eq!(reopened.ledger().len(), 1);
    assert_eq!(reopened.status(1).unwrap(), BookStatus::Out);
}
