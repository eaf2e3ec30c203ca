//! Horizontal bar charts for the Order view.

use crate::ui::helpers::{pad_to, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ChartInfo;

const LABEL_WIDTH: usize = 24;

/// Appends a titled chart. Bars are scaled so the largest value fills the
/// space left after the label and value columns.
pub fn render_chart(out: &mut String, chart: &ChartInfo, theme: &Theme, cols: usize) {
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str(&chart.title);
    out.push_str(Theme::reset());
    out.push('\n');

    if chart.bars.is_empty() {
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str("  no data yet");
        out.push_str(Theme::reset());
        out.push('\n');
        return;
    }

    let max_value = chart.bars.iter().map(|b| b.value).max().unwrap_or(0).max(1);
    let bar_space = cols.saturating_sub(LABEL_WIDTH + 10).max(1);

    for bar in &chart.bars {
        let label: String = bar.label.chars().take(LABEL_WIDTH - 2).collect();
        let length = bar.value * bar_space / max_value;

        out.push_str("  ");
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        out.push_str(&label);
        pad_to(out, width(&label) + 2, LABEL_WIDTH);
        out.push_str(&Theme::fg(&theme.colors.bar_fg));
        out.push_str(&"█".repeat(length));
        out.push_str(Theme::reset());
        out.push_str(&format!(" {}", bar.value));
        out.push('\n');
    }
}
