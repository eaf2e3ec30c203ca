//! Search entry points over a [`Catalog`].
//!
//! - [`search`]: natural-language query through [`parse`](super::parse)
//! - [`search_by_field`]: a single typed field lookup
//! - [`search_with_mode`]: the dispatcher used by the menu's mode selector

use super::parser::{parse, parse_date};
use super::rank::sort_by_distance;
use super::terms::normalize;
use crate::domain::error::{LibrarianError, Result};
use crate::domain::{Book, BookId, Catalog};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Runs a natural-language query against the catalog.
///
/// A blank query returns nothing. A query whose words carry no constraint
/// (such as `"books"`) returns the whole collection. Results are in ascending id
/// order, so repeating a search over the same catalog gives the same answer.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use librarian::{Book, Catalog};
/// use librarian::query::search;
///
/// let date = NaiveDate::from_ymd_opt(2021, 3, 4).unwrap();
/// let catalog = Catalog::new(vec![
///     Book::new(1, "non-fiction", "immune", "philipp dettmer", 20, date),
///     Book::new(2, "fantasy", "the way of kings", "brandon sanderson", 12, date),
/// ]);
///
/// let hits = search(&catalog, "books by philipp dettmer in non-fiction");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id, 1);
/// assert!(search(&catalog, "   ").is_empty());
/// ```
#[must_use]
pub fn search(catalog: &Catalog, query: &str) -> Vec<Book> {
    let _span = tracing::debug_span!("search", catalog_size = catalog.len()).entered();

    if query.trim().is_empty() {
        tracing::debug!("blank query, returning no results");
        return vec![];
    }

    let filter = parse(query);
    let results: Vec<Book> = catalog
        .iter()
        .filter(|book| filter.matches(book))
        .cloned()
        .collect();

    tracing::debug!(result_count = results.len(), "search complete");
    results
}

/// A lookup on a single book field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "field", content = "value")]
pub enum FieldQuery {
    Id(BookId),
    Title(String),
    Author(String),
    Category(String),
    /// Books bought for at most this many pounds.
    MaxPrice(u32),
    PurchasedBefore(NaiveDate),
    PurchasedAfter(NaiveDate),
}

impl FieldQuery {
    /// Builds a field query from a field name and raw value.
    ///
    /// Field names: `id`, `title`, `author`, `category` (or `genre`), `price`,
    /// `before`, `after`.
    ///
    /// # Errors
    ///
    /// Returns [`LibrarianError::InvalidQuery`] for an unknown field name, or a
    /// value that is not a number (for `id` / `price`) or a date (for
    /// `before` / `after`).
    ///
    /// # Examples
    ///
    /// ```
    /// use librarian::query::FieldQuery;
    ///
    /// assert_eq!(FieldQuery::parse("genre", "Fantasy").unwrap(), FieldQuery::Category("fantasy".into()));
    /// assert!(FieldQuery::parse("price", "cheap").is_err());
    /// assert!(FieldQuery::parse("colour", "red").is_err());
    /// ```
    pub fn parse(field: &str, value: &str) -> Result<Self> {
        let value = normalize(value);

        match field.trim().to_lowercase().as_str() {
            "id" => parse_number("id", &value).map(Self::Id),
            "title" => Ok(Self::Title(value)),
            "author" => Ok(Self::Author(value)),
            "category" | "genre" => Ok(Self::Category(value)),
            "price" | "purchase price" => parse_number("price", &value).map(Self::MaxPrice),
            "before" | "before purchase date" => parse_date_value(&value).map(Self::PurchasedBefore),
            "after" | "after purchase date" => parse_date_value(&value).map(Self::PurchasedAfter),
            other => Err(LibrarianError::InvalidQuery(format!("unknown field {other:?}"))),
        }
    }

    /// Returns `true` when the book satisfies this field query.
    #[must_use]
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            Self::Id(id) => book.id == *id,
            Self::Title(title) => normalize(&book.title).contains(title.as_str()),
            Self::Author(author) => normalize(&book.author).contains(author.as_str()),
            Self::Category(category) => normalize(&book.category).contains(category.as_str()),
            Self::MaxPrice(max) => book.purchase_price <= *max,
            Self::PurchasedBefore(date) => book.purchase_date < *date,
            Self::PurchasedAfter(date) => book.purchase_date > *date,
        }
    }
}

fn parse_number(what: &str, value: &str) -> Result<u32> {
    value.trim_start_matches('£').parse::<u32>().map_err(|_| {
        LibrarianError::InvalidQuery(format!("{what} must be a whole number, got {value:?}"))
    })
}

fn parse_date_value(value: &str) -> Result<NaiveDate> {
    parse_date(value).ok_or_else(|| LibrarianError::InvalidQuery(format!("{value:?} is not a date")))
}

/// Returns every book matching a single field query, in ascending id order.
///
/// Text fields with an empty value match nothing.
#[must_use]
pub fn search_by_field(catalog: &Catalog, query: &FieldQuery) -> Vec<Book> {
    let _span = tracing::debug_span!("search_by_field", query = ?query).entered();

    if let FieldQuery::Title(v) | FieldQuery::Author(v) | FieldQuery::Category(v) = query {
        if v.is_empty() {
            return vec![];
        }
    }

    let results: Vec<Book> = catalog
        .iter()
        .filter(|book| query.matches(book))
        .cloned()
        .collect();

    tracing::debug!(result_count = results.len(), "field search complete");
    results
}

/// How the text typed into the search box is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Title substring, closest titles first.
    Title,
    /// Author substring, closest names first.
    Author,
    /// Category substring.
    Category,
    /// Natural-language query.
    #[default]
    Query,
}

impl SearchMode {
    pub const ALL: [Self; 4] = [Self::Title, Self::Author, Self::Category, Self::Query];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Category => "category",
            Self::Query => "query",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = LibrarianError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "author" => Ok(Self::Author),
            "category" | "genre" => Ok(Self::Category),
            "query" | "nlp" => Ok(Self::Query),
            other => Err(LibrarianError::InvalidQuery(format!("unknown search mode {other:?}"))),
        }
    }
}

/// Searches the catalog, interpreting `text` according to `mode`.
///
/// Blank text returns nothing in every mode.
#[must_use]
pub fn search_with_mode(catalog: &Catalog, mode: SearchMode, text: &str) -> Vec<Book> {
    let needle = normalize(text);
    if needle.is_empty() {
        return vec![];
    }

    match mode {
        SearchMode::Title => {
            let mut books = search_by_field(catalog, &FieldQuery::Title(needle.clone()));
            sort_by_distance(&needle, &mut books, |b| b.title.as_str());
            books
        }
        SearchMode::Author => {
            let mut books = search_by_field(catalog, &FieldQuery::Author(needle.clone()));
            sort_by_distance(&needle, &mut books, |b| b.author.as_str());
            books
        }
        SearchMode::Category => search_by_field(catalog, &FieldQuery::Category(needle)),
        SearchMode::Query => search(catalog, text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let d = |y, m, dd| NaiveDate::from_ymd_opt(y, m, dd).unwrap();
        Catalog::new(vec![
            Book::new(1, "fantasy", "the way of kings", "brandon sanderson", 25, d(2014, 3, 4)),
            Book::new(2, "fantasy", "mistborn", "brandon sanderson", 9, d(2016, 7, 1)),
            Book::new(3, "fantasy", "the kings of the wyld", "nicholas eames", 11, d(2019, 1, 15)),
            Book::new(4, "maths", "x + y", "eugenia cheng", 18, d(2020, 11, 2)),
        ])
    }

    fn ids(books: &[Book]) -> Vec<BookId> {
        books.iter().map(|b| b.id).collect()
    }

    #[test]
    fn unconstrained_query_returns_everything() {
        assert_eq!(ids(&search(&catalog(), "books")), vec![1, 2, 3, 4]);
    }

    #[test]
    fn no_match_is_empty_not_error() {
        assert!(search(&catalog(), "books by terry pratchett").is_empty());
    }

    #[test]
    fn title_mode_orders_by_distance() {
        let books = search_with_mode(&catalog(), SearchMode::Title, "kings");
        assert_eq!(ids(&books), vec![1, 3]);
        let books = search_with_mode(&catalog(), SearchMode::Title, "the kings of the wyld");
        assert_eq!(ids(&books), vec![3]);
    }

    #[test]
    fn field_queries() {
        let cat = catalog();
        assert_eq!(ids(&search_by_field(&cat, &FieldQuery::Id(2))), vec![2]);
        assert_eq!(ids(&search_by_field(&cat, &FieldQuery::MaxPrice(11))), vec![2, 3]);
        let before = FieldQuery::parse("before", "2016-07-01").unwrap();
        assert_eq!(ids(&search_by_field(&cat, &before)), vec![1]);
        let after = FieldQuery::parse("after", "2019/01/15").unwrap();
        assert_eq!(ids(&search_by_field(&cat, &after)), vec![4]);
        assert!(search_by_field(&cat, &FieldQuery::Title(String::new())).is_empty());
    }

    #[test]
    fn search_mode_parses_aliases() {
        assert_eq!("nlp".parse::<SearchMode>().unwrap(), SearchMode::Query);
        assert_eq!("Genre".parse::<SearchMode>().unwrap(), SearchMode::Category);
        assert!("isbn".parse::<SearchMode>().is_err());
    }
}
