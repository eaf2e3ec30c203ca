//! Query interpreter: free-text and field searches over the catalog.
//!
//! The interpreter reads queries like `"books by philipp dettmer in non-fiction"`
//! or `"the way of kings"` and turns them into a structured [`QueryFilter`]. It is
//! designed to be forgiving: irregular whitespace, keyword order, filler words and
//! unknown clauses never cause an error, and a query that matches nothing just
//! returns an empty result.
//!
//! # Modules
//!
//! - [`terms`]: word splitting, keyword and filler lists, normalisation
//! - [`parser`]: query text → [`QueryFilter`]
//! - [`search`](mod@search): catalog searches (query, single field, by mode)
//! - [`rank`]: Levenshtein distance and result ordering
//!
//! # Example
//!
//! ```
//! use librarian::query::{parse, QueryFilter};
//!
//! let filter = parse("books by eugenia cheng in maths");
//! assert_eq!(filter, QueryFilter {
//!     author: Some("eugenia cheng".into()),
//!     category: Some("maths".into()),
//!     ..QueryFilter::default()
//! });
//! ```

pub mod parser;
pub mod rank;
pub mod search;
pub mod terms;

pub use parser::{parse, DateBound, QueryFilter};
pub use rank::{levenshtein_distance, levenshtein_sort};
pub use search::{search, search_by_field, search_with_mode, FieldQuery, SearchMode};
