//! Search bar component renderer.

use crate::ui::helpers::width;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

const SEARCH_BOX_MARGIN: usize = 2;

/// Appends a three-line bordered box showing the mode and query.
pub fn render_search_bar(out: &mut String, search: &SearchBarInfo, theme: &Theme, cols: usize) {
    let margin = " ".repeat(SEARCH_BOX_MARGIN);
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = Theme::fg(&theme.colors.search_bar_border);

    out.push_str(&margin);
    out.push_str(&border);
    out.push_str(&format!("┌{}┐", "─".repeat(inner_width)));
    out.push_str(Theme::reset());
    out.push('\n');

    let label = format!(" Search ({}): ", search.mode);
    let padding = inner_width.saturating_sub(width(&label) + width(&search.query));

    out.push_str(&margin);
    out.push_str(&border);
    out.push('│');
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&label);
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.push_str(&search.query);
    out.push_str(&" ".repeat(padding));
    out.push_str(&border);
    out.push('│');
    out.push_str(Theme::reset());
    out.push('\n');

    out.push_str(&margin);
    out.push_str(&border);
    out.push_str(&format!("└{}┘", "─".repeat(inner_width)));
    out.push_str(Theme::reset());
    out.push('\n');
}
