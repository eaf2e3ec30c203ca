//! Budget-based purchase recommendations.
//!
//! The budget buys `floor(budget / average)` books, where the average is the
//! ledger-weighted purchase price. Those books are split between authors and
//! between categories in proportion to how often each appears in the ledger.

use super::prevalence::{average_price, ledger_prevalence, Dimension, Tally};
use crate::domain::book::title_case;
use crate::domain::error::{LibrarianError, Result};
use crate::domain::{Catalog, LedgerEntry};
use serde::Serialize;

/// How many books to buy in total and per author and category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Budget in whole pounds.
    pub budget: u32,
    /// Ledger-weighted average purchase price in pounds.
    pub average_price: f64,
    /// Number of books the budget buys.
    pub count: u32,
    /// Books allocated per author, in ledger-popularity order.
    pub authors: Vec<Tally>,
    /// Books allocated per category, in ledger-popularity order.
    pub categories: Vec<Tally>,
}

impl Recommendation {
    /// Author with the largest non-zero allocation. The more popular author
    /// wins a tie.
    #[must_use]
    pub fn top_author(&self) -> Option<&Tally> {
        top(&self.authors)
    }

    #[must_use]
    pub fn top_category(&self) -> Option<&Tally> {
        top(&self.categories)
    }

    /// Prose description shown beside the allocation chart.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = format!(
            "Reading from the ledger, the average price of a popular book is £{:.2}. \
             With a budget of £{}, this yields ~{} books, to be allocated according to the chart.",
            self.average_price,
            self.budget,
            (f64::from(self.budget) / self.average_price).round_ties_even()
        );

        match self.top_author() {
            Some(author) => out.push_str(&format!(
                " In particular, this recommendation picks {} as the most important author, with {} books allocated.",
                title_case(&author.name),
                author.count
            )),
            None => out.push_str(" The budget is too small to allocate a book to any author."),
        }
        if let Some(category) = self.top_category() {
            out.push_str(&format!(
                " To focus on category, it picks {}, with {} books allocated.",
                title_case(&category.name),
                category.count
            ));
        }
        out
    }
}

fn top(tallies: &[Tally]) -> Option<&Tally> {
    tallies
        .iter()
        .filter(|t| t.count > 0)
        .fold(None, |best: Option<&Tally>, t| match best {
            Some(b) if b.count >= t.count => Some(b),
            _ => Some(t),
        })
}

/// Builds a purchase recommendation for `budget` pounds.
///
/// # Errors
///
/// Returns [`LibrarianError::Insights`] when no ledger entry names a catalogued
/// book, or every such book was free.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use librarian::{Book, Catalog, LedgerAction, LedgerEntry, MemberId};
/// use librarian::insights::recommend;
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let catalog = Catalog::new(vec![Book::new(1, "maths", "x + y", "eugenia cheng", 20, day)]);
/// let entries = vec![LedgerEntry::new(LedgerAction::Out, 1, MemberId::parse("1234")?, day)];
///
/// let rec = recommend(&catalog, &entries, 100)?;
/// assert_eq!(rec.count, 5);
/// assert_eq!(rec.authors[0].count, 5);
/// assert!(recommend(&catalog, &[], 100).is_err());
/// # Ok::<(), librarian::LibrarianError>(())
/// ```
pub fn recommend(catalog: &Catalog, entries: &[LedgerEntry], budget: u32) -> Result<Recommendation> {
    let _span = tracing::debug_span!("recommend", budget = budget, entries = entries.len()).entered();

    let average = average_price(catalog, entries)
        .ok_or_else(|| LibrarianError::Insights("no circulation activity to base a recommendation on".into()))?;
    if average <= 0.0 {
        return Err(LibrarianError::Insights("every borrowed book was free".into()));
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = (f64::from(budget) / average).floor() as u32;

    let authors = allocate(count, ledger_prevalence(catalog, entries, Dimension::Author));
    let categories = allocate(count, ledger_prevalence(catalog, entries, Dimension::Category));

    tracing::debug!(average_price = average, count = count, "recommendation computed");

    Ok(Recommendation {
        budget,
        average_price: average,
        count,
        authors,
        categories,
    })
}

/// Replaces each popularity count with `count * share` books, ties rounded to even.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn allocate(count: u32, popularity: Vec<Tally>) -> Vec<Tally> {
    let total: usize = popularity.iter().map(|t| t.count).sum();
    if total == 0 {
        return popularity;
    }

    popularity
        .into_iter()
        .map(|t| Tally {
            count: (f64::from(count) * t.count as f64 / total as f64).round_ties_even() as usize,
            name: t.name,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Book, LedgerAction, MemberId};
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn fixture() -> (Catalog, Vec<LedgerEntry>) {
        let catalog = Catalog::new(vec![
            Book::new(1, "fantasy", "mistborn", "brandon sanderson", 10, day()),
            Book::new(2, "fantasy", "elantris", "brandon sanderson", 10, day()),
            Book::new(3, "maths", "x + y", "eugenia cheng", 10, day()),
        ]);
        let member = MemberId::parse("1234").unwrap();
        let entries = [1, 2, 1, 3]
            .into_iter()
            .map(|id| LedgerEntry::new(LedgerAction::Out, id, member.clone(), day()))
            .collect();
        (catalog, entries)
    }

    #[test]
    fn allocation_follows_ledger_share() {
        let (catalog, entries) = fixture();
        let rec = recommend(&catalog, &entries, 105).unwrap();

        assert_eq!(rec.count, 10);
        assert_eq!(rec.authors[0].name, "brandon sanderson");
        assert_eq!(rec.authors[0].count, 8);
        assert_eq!(rec.authors[1].count, 2);
        assert_eq!(rec.authors.iter().map(|t| t.count).sum::<usize>(), 10);
        assert_eq!(rec.categories.iter().map(|t| t.count).sum::<usize>(), 10);
        assert_eq!(rec.top_category().map(|t| t.name.as_str()), Some("fantasy"));
    }

    #[test]
    fn summary_names_top_author_and_category() {
        let (catalog, entries) = fixture();
        let text = recommend(&catalog, &entries, 100).unwrap().summary();
        assert!(text.contains("£10.00"));
        assert!(text.contains("Brandon Sanderson"));
        assert!(text.contains("Fantasy"));
    }

    #[test]
    fn tiny_budget_allocates_nothing() {
        let (catalog, entries) = fixture();
        let rec = recommend(&catalog, &entries, 5).unwrap();
        assert_eq!(rec.count, 0);
        assert!(rec.top_author().is_none());
        assert!(rec.summary().contains("too small"));
    }
}
