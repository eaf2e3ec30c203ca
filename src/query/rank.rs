//! Levenshtein edit distance and distance-based ordering.
//!
//! Title and author searches return the closest spellings first, which makes a
//! short or partly mistyped query still put the intended book near the top.

/// Computes the Levenshtein distance between two strings, counted in chars.
///
/// # Examples
///
/// ```
/// use librarian::query::levenshtein_distance;
///
/// assert_eq!(levenshtein_distance("hello, world", "hello, world"), 0);
/// assert_eq!(levenshtein_distance("hello, world", "hello, world!"), 1);
/// assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
/// ```
#[must_use]
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            let deletion = previous[j + 1] + 1;
            let insertion = current[j] + 1;
            current[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_chars.len()]
}

/// Sorts strings by ascending distance to `query`. Equal distances keep their
/// original order.
///
/// # Examples
///
/// ```
/// use librarian::query::levenshtein_sort;
///
/// let sorted = levenshtein_sort("hello", &["h", "hell", "hello", "quaint"]);
/// assert_eq!(sorted, vec!["hello", "hell", "h", "quaint"]);
/// ```
#[must_use]
pub fn levenshtein_sort<'a, S: AsRef<str>>(query: &str, items: &'a [S]) -> Vec<&'a str> {
    let mut ranked: Vec<&str> = items.iter().map(AsRef::as_ref).collect();
    ranked.sort_by_cached_key(|item| levenshtein_distance(query, item));
    ranked
}

/// Sorts arbitrary items by the distance between `query` and a key of each item.
pub fn sort_by_distance<T, F>(query: &str, items: &mut [T], key: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by_cached_key(|item| levenshtein_distance(query, key(item)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_handles_empty_inputs() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("", "abcd"), 4);
    }

    #[test]
    fn distance_is_symmetric() {
        assert_eq!(
            levenshtein_distance("hello, world", "hello, moon"),
            levenshtein_distance("hello, moon", "hello, world")
        );
    }

    #[test]
    fn distance_counts_chars_not_bytes() {
        assert_eq!(levenshtein_distance("café", "cafe"), 1);
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let sorted = levenshtein_sort("quallo", &["h", "hell", "hello", "quaint"]);
        assert_eq!(sorted[0], "hello");
        assert_eq!(sorted.len(), 4);
    }
}
