//! Shared rendering utilities.
//!
//! Every component writes into a `String` frame buffer. Widths are counted in
//! chars, which matches terminal cells for the text this crate displays.

use crate::ui::theme::Theme;

/// Number of chars in `text`.
#[must_use]
pub fn width(text: &str) -> usize {
    text.chars().count()
}

/// Appends spaces up to `cols` given that `used` cells are already filled.
pub fn pad_to(out: &mut String, used: usize, cols: usize) {
    out.push_str(&" ".repeat(cols.saturating_sub(used)));
}

/// Appends a full-width horizontal rule.
pub fn push_border(out: &mut String, color: &str, cols: usize) {
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    out.push('\n');
}

/// Appends `text` with the given char ranges highlighted.
///
/// Ranges are `(start, end)` char indices with exclusive end. Highlighting is
/// skipped on the selected row so it does not fight the selection colors.
/// After each highlight the `restore` escape is re-applied.
pub fn push_highlighted(out: &mut String, text: &str, ranges: &[(usize, usize)], theme: &Theme, restore: &str) {
    if ranges.is_empty() {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }

        out.extend(&chars[current_pos..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(restore);

        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_keeps_text_intact() {
        let theme = Theme::default();
        let mut out = String::new();
        push_highlighted(&mut out, "Immune", &[(0, 2), (4, 9)], &theme, "");

        let plain = strip_ansi(&out);
        assert_eq!(plain, "Immune");
        assert!(out.contains(&Theme::bg(&theme.colors.match_highlight_bg)));
    }

    fn strip_ansi(s: &str) -> String {
        let mut plain = String::new();
        let mut in_escape = false;
        for c in s.chars() {
            match (in_escape, c) {
                (false, '\u{1b}') => in_escape = true,
                (true, 'm') => in_escape = false,
                (false, c) => plain.push(c),
                _ => {}
            }
        }
        plain
    }
}
