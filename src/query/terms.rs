//! Word-level helpers for the query interpreter.
//!
//! Queries are read as a sequence of lowercase words. This module owns the word
//! lists that give some words special meaning and the normalisation applied to
//! both queries and book fields before they are compared.

/// Words that start a new clause of a query.
pub const KEYWORDS: &[&str] = &[
    "by",
    "in",
    "about",
    "purchased",
    "bought",
    "before",
    "after",
    "under",
    "below",
];

/// Words that carry no search meaning in a title phrase or free-text query.
pub const LOW_IMPORTANCE_WORDS: &[&str] = &[
    "book", "books", "novel", "novels", "works", "called", "named", "titled", "is",
];

/// Articles dropped only when they open a title phrase ("a book called ...").
const LEADING_ARTICLES: &[&str] = &["a", "an"];

#[must_use]
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// Splits a query into lowercase words.
///
/// Any run of whitespace separates words. Trailing `,` `.` `?` `!` are trimmed
/// from each word and words made only of punctuation are dropped.
///
/// # Examples
///
/// ```
/// use librarian::query::terms::words;
///
/// assert_eq!(words("  Books  by Becky\tChambers, please."), vec!["books", "by", "becky", "chambers", "please"]);
/// ```
#[must_use]
pub fn words(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(|w| w.trim_end_matches([',', '.', '?', '!']).to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Removes low-importance words and a leading article from a phrase.
#[must_use]
pub fn strip_filler(words: &[String]) -> Vec<String> {
    let mut kept: Vec<String> = words
        .iter()
        .filter(|w| !LOW_IMPORTANCE_WORDS.contains(&w.as_str()))
        .cloned()
        .collect();

    if kept.first().is_some_and(|w| LEADING_ARTICLES.contains(&w.as_str())) {
        kept.remove(0);
    }
    kept
}

/// Normalises text the same way query words are read: lowercase words with
/// trailing `,` `.` `?` `!` trimmed, joined by single spaces.
///
/// Book fields go through this before comparison so that spacing and
/// punctuation differences between the catalog and a query cannot prevent a
/// match ("n. k. jemisin" and "n k jemisin" compare equal).
#[must_use]
pub fn normalize(text: &str) -> String {
    words(text).join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(ws: &[&str]) -> Vec<String> {
        ws.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn words_drop_bare_punctuation() {
        assert_eq!(words("kings , ."), vec!["kings"]);
        assert!(words("   ").is_empty());
    }

    #[test]
    fn strip_filler_keeps_inner_articles() {
        assert_eq!(
            strip_filler(&owned(&["a", "book", "called", "the", "way", "of", "kings"])),
            owned(&["the", "way", "of", "kings"])
        );
        assert_eq!(strip_filler(&owned(&["books"])), Vec::<String>::new());
    }

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(normalize("  Philipp \t  Dettmer "), "philipp dettmer");
    }

    #[test]
    fn normalize_trims_punctuation_like_query_words() {
        assert_eq!(normalize("N. K. Jemisin"), "n k jemisin");
        assert_eq!(normalize("thinking, fast and slow"), words("Thinking, fast and slow").join(" "));
        assert_eq!(normalize("x + y"), "x + y");
    }
}
