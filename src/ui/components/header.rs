//! Header component renderer: centered title bar and the view tabs.

use crate::ui::helpers::{pad_to, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Appends the title bar, centered and padded to the full width, then the tab row.
pub fn render_header(out: &mut String, header: &HeaderInfo, theme: &Theme, cols: usize) {
    let title_len = width(&header.title);
    let padding = cols.saturating_sub(title_len) / 2;

    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }
    out.push_str(&" ".repeat(padding));
    out.push_str(&header.title);
    pad_to(out, padding + title_len, cols);
    out.push_str(Theme::reset());
    out.push('\n');

    let mut used = 0;
    for tab in &header.tabs {
        let label = format!(" {} ", tab.label);
        used += width(&label) + 1;
        if tab.is_active {
            out.push_str(Theme::bold());
            out.push_str(&Theme::fg(&theme.colors.selection_fg));
            out.push_str(&Theme::bg(&theme.colors.selection_bg));
        } else {
            out.push_str(&Theme::fg(&theme.colors.text_dim));
        }
        out.push_str(&label);
        out.push_str(Theme::reset());
        out.push(' ');
    }
    pad_to(out, used, cols);
    out.push('\n');
}
