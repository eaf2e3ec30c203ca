//! Recent activity panel.

use crate::ui::theme::Theme;

pub fn render_activity(out: &mut String, lines: &[String], theme: &Theme) {
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str("Recent activity");
    out.push_str(Theme::reset());
    out.push('\n');

    out.push_str(&Theme::fg(&theme.colors.text_dim));
    if lines.is_empty() {
        out.push_str("  nothing has circulated yet\n");
    }
    for line in lines {
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(Theme::reset());
}
