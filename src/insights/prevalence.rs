//! How often authors and categories occur in the catalog and in the ledger.

use crate::domain::{Book, BookId, Catalog, LedgerEntry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Which book field a tally groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Author,
    Category,
}

impl Dimension {
    fn key(self, book: &Book) -> &str {
        match self {
            Self::Author => &book.author,
            Self::Category => &book.category,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Author => "author",
            Self::Category => "category",
        })
    }
}

/// A name and how many times it was counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub name: String,
    pub count: usize,
}

/// Counts books per author or category across the whole catalog.
///
/// Sorted by descending count, ties by name.
#[must_use]
pub fn catalog_prevalence(catalog: &Catalog, dimension: Dimension) -> Vec<Tally> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for book in catalog {
        *counts.entry(dimension.key(book)).or_default() += 1;
    }
    into_sorted(counts)
}

/// Counts ledger entries per book. Entries naming unknown books are skipped.
///
/// Sorted by descending count, ties by ascending id.
#[must_use]
pub fn book_prevalence<'a>(catalog: &'a Catalog, entries: &[LedgerEntry]) -> Vec<(&'a Book, usize)> {
    let mut counts: BTreeMap<BookId, usize> = BTreeMap::new();
    for entry in entries {
        if catalog.contains(entry.book_id) {
            *counts.entry(entry.book_id).or_default() += 1;
        }
    }

    let mut ranked: Vec<(&Book, usize)> = counts
        .into_iter()
        .filter_map(|(id, count)| catalog.get(id).map(|book| (book, count)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// Counts ledger entries per author or category of the book they name.
///
/// Every entry counts, whatever its action. Sorted like [`catalog_prevalence`].
#[must_use]
pub fn ledger_prevalence(catalog: &Catalog, entries: &[LedgerEntry], dimension: Dimension) -> Vec<Tally> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for (book, count) in book_prevalence(catalog, entries) {
        *counts.entry(dimension.key(book)).or_default() += count;
    }
    into_sorted(counts)
}

/// Purchase price averaged over ledger entries, so a book counts once per
/// entry naming it. `None` when no entry names a catalogued book.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_price(catalog: &Catalog, entries: &[LedgerEntry]) -> Option<f64> {
    let weights = book_prevalence(catalog, entries);
    let total: usize = weights.iter().map(|(_, count)| count).sum();
    if total == 0 {
        return None;
    }

    let weighted: f64 = weights
        .iter()
        .map(|(book, count)| f64::from(book.purchase_price) * *count as f64)
        .sum();
    Some(weighted / total as f64)
}

fn into_sorted(counts: BTreeMap<&str, usize>) -> Vec<Tally> {
    let mut tallies: Vec<Tally> = counts
        .into_iter()
        .map(|(name, count)| Tally {
            name: name.to_string(),
            count,
        })
        .collect();
    tallies.sort_by(|a, b| b.count.cmp(&a.count));
    tallies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LedgerAction, MemberId};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Book::new(1, "fantasy", "mistborn", "brandon sanderson", 10, day()),
            Book::new(2, "fantasy", "elantris", "brandon sanderson", 20, day()),
            Book::new(3, "maths", "x + y", "eugenia cheng", 30, day()),
        ])
    }

    fn out(book: BookId) -> LedgerEntry {
        LedgerEntry::new(LedgerAction::Out, book, MemberId::parse("1234").unwrap(), day())
    }

    fn tally(name: &str, count: usize) -> Tally {
        Tally {
            name: name.into(),
            count,
        }
    }

    #[test]
    fn catalog_counts_sorted_desc_then_name() {
        assert_eq!(
            catalog_prevalence(&catalog(), Dimension::Category),
            vec![tally("fantasy", 2), tally("maths", 1)]
        );
    }

    #[test]
    fn ledger_counts_every_entry_and_skips_unknown_books() {
        let entries = vec![out(3), out(3), out(1), out(42)];
        assert_eq!(
            ledger_prevalence(&catalog(), &entries, Dimension::Author),
            vec![tally("eugenia cheng", 2), tally("brandon sanderson", 1)]
        );
    }

    #[test]
    fn average_price_is_weighted() {
        let entries = vec![out(1), out(1), out(1), out(3)];
        assert_eq!(average_price(&catalog(), &entries), Some(15.0));
        assert_eq!(average_price(&catalog(), &[]), None);
    }
}
