//! Empty state component renderer.

use crate::ui::helpers::width;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Appends a centered message with a dimmed subtitle, framed by blank lines.
pub fn render_empty_state(out: &mut String, empty: &EmptyState, theme: &Theme, cols: usize) {
    out.push('\n');

    let message_padding = cols.saturating_sub(width(&empty.message)) / 2;
    out.push_str(&" ".repeat(message_padding));
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.empty_state_fg));
    out.push_str(&empty.message);
    out.push_str(Theme::reset());
    out.push('\n');

    let subtitle_padding = cols.saturating_sub(width(&empty.subtitle)) / 2;
    out.push_str(&" ".repeat(subtitle_padding));
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&empty.subtitle);
    out.push_str(Theme::reset());
    out.push_str("\n\n");
}
