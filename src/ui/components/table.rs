//! Book table renderer.
//!
//! Each row shows a colored status letter, a basket marker, `Title by Author`
//! and the dimmed details column.

use crate::ui::helpers::{pad_to, push_highlighted, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

const NAME_COLUMN_WIDTH: usize = 50;

pub fn render_table_headers(out: &mut String, theme: &Theme, cols: usize) {
    let text = format!("S   {:<NAME_COLUMN_WIDTH$}DETAILS", "BOOK");
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str(&text);
    out.push_str(Theme::reset());
    pad_to(out, width(&text), cols);
    out.push('\n');
}

pub fn render_table_rows(out: &mut String, items: &[DisplayItem], theme: &Theme, cols: usize) {
    for item in items {
        render_table_row(out, item, theme, cols);
    }
}

/// Appends one row, padded to the full width so the selection background
/// covers the whole line.
fn render_table_row(out: &mut String, item: &DisplayItem, theme: &Theme, cols: usize) {
    let base = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };

    out.push_str(&base);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(theme.status_color(item.status)));
    out.push(item.status.letter());
    out.push_str(Theme::reset());
    out.push_str(&base);
    out.push_str(if item.in_basket { " + " } else { "   " });

    let ranges: &[(usize, usize)] = if item.is_selected { &[] } else { &item.highlight_ranges };
    push_highlighted(out, &item.name, ranges, theme, &base);

    let name_len = width(&item.name);
    pad_to(out, name_len, NAME_COLUMN_WIDTH);

    if !item.is_selected {
        out.push_str(&Theme::fg(&theme.colors.text_dim));
    }
    out.push_str(&item.detail);

    pad_to(out, 4 + name_len.max(NAME_COLUMN_WIDTH) + width(&item.detail), cols);
    out.push_str(Theme::reset());
    out.push('\n');
}
