//! Book record and catalog domain model.
//!
//! A [`Book`] is one entry of the personal collection. The [`Catalog`] holds the
//! whole collection in ascending id order; it is loaded once and only read by
//! searches.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Numeric identifier of a book, unique within a catalog.
pub type BookId = u32;

/// A single book in the collection.
///
/// Text fields are stored lowercase, the way they are written in the catalog
/// file; [`Book::display_title`] and [`Book::display_author`] produce the
/// capitalised form shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    /// Genre of the book, e.g. `"fantasy"` or `"non-fiction"`.
    pub category: String,
    pub title: String,
    /// Author name in forename-surname order.
    pub author: String,
    /// Purchase price in whole pounds.
    pub purchase_price: u32,
    pub purchase_date: NaiveDate,
}

impl Book {
    /// Creates a book record.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use librarian::Book;
    ///
    /// let date = NaiveDate::from_ymd_opt(2021, 3, 4).unwrap();
    /// let book = Book::new(7, "non-fiction", "immune", "philipp dettmer", 20, date);
    /// assert_eq!(book.display_title(), "Immune");
    /// assert_eq!(book.display_author(), "Philipp Dettmer");
    /// ```
    pub fn new(
        id: BookId,
        category: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        purchase_price: u32,
        purchase_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            category: category.into(),
            title: title.into(),
            author: author.into(),
            purchase_price,
            purchase_date,
        }
    }

    #[must_use]
    pub fn display_title(&self) -> String {
        title_case(&self.title)
    }

    #[must_use]
    pub fn display_author(&self) -> String {
        title_case(&self.author)
    }

    /// Category with only its first letter capitalised.
    #[must_use]
    pub fn display_category(&self) -> String {
        let mut chars = self.category.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }
}

/// Capitalises the first letter of every word, treating `-` as a word break.
///
/// # Examples
///
/// ```
/// use librarian::domain::book::title_case;
///
/// assert_eq!(title_case("the way of kings"), "The Way Of Kings");
/// assert_eq!(title_case("non-fiction"), "Non-Fiction");
/// ```
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if at_word_start && c.is_alphabetic() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c.is_whitespace() || c == '-';
    }
    out
}

/// The whole book collection, ordered by ascending id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    /// Builds a catalog, sorting books by id.
    ///
    /// Ids are expected to be unique; storage backends reject duplicates before a
    /// catalog is built.
    #[must_use]
    pub fn new(mut books: Vec<Book>) -> Self {
        books.sort_by_key(|b| b.id);
        Self { books }
    }

    #[must_use]
    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books
            .binary_search_by_key(&id, |b| b.id)
            .ok()
            .map(|idx| &self.books[idx])
    }

    #[must_use]
    pub fn contains(&self, id: BookId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Book> {
        self.books.iter()
    }

    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Book;
    type IntoIter = std::slice::Iter<'a, Book>;

    fn into_iter(self) -> Self::IntoIter {
        self.books.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: BookId, title: &str) -> Book {
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        Book::new(id, "fantasy", title, "someone", 10, date)
    }

    #[test]
    fn catalog_sorts_by_id_and_looks_up() {
        let catalog = Catalog::new(vec![book(3, "c"), book(1, "a"), book(2, "b")]);
        let ids: Vec<BookId> = catalog.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(catalog.get(2).map(|b| b.title.as_str()), Some("b"));
        assert!(catalog.get(4).is_none());
    }

    #[test]
    fn display_category_capitalises_first_letter_only() {
        let b = Book::new(1, "non-fiction", "t", "a", 1, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(b.display_category(), "Non-fiction");
    }
}
