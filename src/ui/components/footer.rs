//! Footer component renderer: status message and keybinding hints.

use crate::ui::helpers::{pad_to, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FooterInfo, MessageInfo};

/// Appends the last command's outcome, colored as an error when it failed.
pub fn render_message(out: &mut String, message: &MessageInfo, theme: &Theme) {
    let color = if message.is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.text_normal
    };
    out.push_str(&Theme::fg(color));
    out.push_str(&message.text);
    out.push_str(Theme::reset());
    out.push('\n');
}

/// Appends the centered keybinding line.
pub fn render_footer(out: &mut String, footer: &FooterInfo, theme: &Theme, cols: usize) {
    let help_text = &footer.keybindings;
    let text_len = width(help_text).min(cols);
    let padding = cols.saturating_sub(text_len) / 2;

    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&" ".repeat(padding));
    out.push_str(help_text);
    pad_to(out, padding + text_len, cols);
    out.push_str(Theme::reset());
    out.push('\n');
}
