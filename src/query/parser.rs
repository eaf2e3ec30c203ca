//! Free-text query interpretation.
//!
//! [`parse`] turns loosely structured text such as
//! `"books by philipp dettmer in non-fiction"` into a [`QueryFilter`]. The
//! interpreter is forgiving: unknown words are kept as search text, missing or
//! malformed clause values leave a dimension unconstrained, and nothing here
//! ever fails.
//!
//! # Grammar
//!
//! ```text
//! query   := lead clause*
//! lead    := word*                      (title phrase, or free text when no clause follows)
//! clause  := "by" words                 (author)
//!          | ("in" | "about") words     (category)
//!          | ("purchased" | "bought") [date]
//!          | ("before" | "after") date
//!          | ("under" | "below") price
//! ```

use super::terms::{self, is_keyword, normalize};
use crate::domain::Book;
use chrono::NaiveDate;
use serde::Serialize;

/// Date formats accepted in `before` / `after` / `purchased` clauses.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%d/%m/%Y"];

/// Constraint on a book's purchase date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "relation", content = "date")]
pub enum DateBound {
    /// Purchased strictly before the date.
    Before(NaiveDate),
    /// Purchased strictly after the date.
    After(NaiveDate),
    /// Purchased on the date.
    On(NaiveDate),
}

impl DateBound {
    #[must_use]
    pub fn admits(self, date: NaiveDate) -> bool {
        match self {
            Self::Before(bound) => date < bound,
            Self::After(bound) => date > bound,
            Self::On(bound) => date == bound,
        }
    }
}

/// Structured filter derived from one free-text query.
///
/// Every field is optional; `None` leaves that dimension unconstrained. Text
/// values are lowercase with single spaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryFilter {
    /// Phrase that must appear in the title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Phrase that must appear in the author name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Phrase that must appear in the category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Highest purchase price, inclusive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchased: Option<DateBound>,
    /// Free text used when the query has no keyword clause. Each word must
    /// appear in the title, author or category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl QueryFilter {
    /// Returns `true` when no dimension is constrained.
    #[must_use]
    pub const fn is_unconstrained(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.category.is_none()
            && self.max_price.is_none()
            && self.purchased.is_none()
            && self.text.is_none()
    }

    /// Returns `true` when the book satisfies every constrained dimension.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use librarian::Book;
    /// use librarian::query::parse;
    ///
    /// let date = NaiveDate::from_ymd_opt(2021, 3, 4).unwrap();
    /// let immune = Book::new(7, "non-fiction", "immune", "philipp dettmer", 20, date);
    ///
    /// assert!(parse("books by dettmer in non-fiction").matches(&immune));
    /// assert!(!parse("books in fantasy").matches(&immune));
    /// ```
    #[must_use]
    pub fn matches(&self, book: &Book) -> bool {
        let title = normalize(&book.title);
        let author = normalize(&book.author);
        let category = normalize(&book.category);

        let contains = |field: &str, wanted: &Option<String>| {
            wanted.as_deref().map_or(true, |w| field.contains(w))
        };

        contains(&title, &self.title)
            && contains(&author, &self.author)
            && contains(&category, &self.category)
            && self.max_price.map_or(true, |max| book.purchase_price <= max)
            && self.purchased.map_or(true, |bound| bound.admits(book.purchase_date))
            && self.text.as_deref().map_or(true, |text| {
                text.split(' ').all(|word| {
                    title.contains(word) || author.contains(word) || category.contains(word)
                })
            })
    }
}

/// Parses a free-text query into a [`QueryFilter`].
///
/// # Examples
///
/// ```
/// use librarian::query::parse;
///
/// let filter = parse("books  by philipp dettmer in   non-fiction");
/// assert_eq!(filter.author.as_deref(), Some("philipp dettmer"));
/// assert_eq!(filter.category.as_deref(), Some("non-fiction"));
///
/// let free = parse("dettmer");
/// assert_eq!(free.text.as_deref(), Some("dettmer"));
/// assert!(free.author.is_none());
/// ```
#[must_use]
pub fn parse(query: &str) -> QueryFilter {
    let _span = tracing::debug_span!("parse_query", query_len = query.len()).entered();

    let words = terms::words(query);
    let first_keyword = words.iter().position(|w| is_keyword(w));
    let (lead, clauses) = words.split_at(first_keyword.unwrap_or(words.len()));
    let lead = join(&terms::strip_filler(lead));

    let mut filter = QueryFilter::default();

    if first_keyword.is_none() {
        filter.text = lead;
        tracing::debug!(filter = ?filter, "no keywords, using free-text search");
        return filter;
    }

    filter.title = lead;

    let mut start = 0;
    while start < clauses.len() {
        let end = clauses[start + 1..]
            .iter()
            .position(|w| is_keyword(w))
            .map_or(clauses.len(), |offset| start + 1 + offset);

        apply_clause(&mut filter, &clauses[start], &clauses[start + 1..end]);
        start = end;
    }

    tracing::debug!(filter = ?filter, "query parsed");
    filter
}

/// Applies one keyword clause. An empty or malformed value leaves the filter
/// untouched for that dimension.
fn apply_clause(filter: &mut QueryFilter, keyword: &str, value: &[String]) {
    match keyword {
        "by" => {
            if let Some(author) = join(value) {
                filter.author = Some(author);
            }
        }
        "in" | "about" => {
            if let Some(category) = join(value) {
                filter.category = Some(category);
            }
        }
        "purchased" | "bought" => {
            if let Some(date) = value.first().and_then(|w| parse_date(w)) {
                filter.purchased = Some(DateBound::On(date));
            }
        }
        "before" => {
            if let Some(date) = value.first().and_then(|w| parse_date(w)) {
                filter.purchased = Some(DateBound::Before(date));
            }
        }
        "after" => {
            if let Some(date) = value.first().and_then(|w| parse_date(w)) {
                filter.purchased = Some(DateBound::After(date));
            }
        }
        "under" | "below" => {
            if let Some(price) = value
                .iter()
                .find_map(|w| w.trim_start_matches('£').parse::<u32>().ok())
            {
                filter.max_price = Some(price);
            }
        }
        _ => {}
    }

    tracing::trace!(keyword = %keyword, value_words = value.len(), "clause applied");
}

/// Parses a date in any of the accepted formats.
///
/// # Examples
///
/// ```
/// use librarian::query::parser::parse_date;
///
/// assert_eq!(parse_date("2015-10-12"), parse_date("2015/10/12"));
/// assert!(parse_date("yesterday").is_none());
/// ```
#[must_use]
pub fn parse_date(word: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(word, fmt).ok())
}

fn join(words: &[String]) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}
