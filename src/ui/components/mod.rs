//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Title bar and view tabs
//! - [`footer`]: Status message and keybinding hints
//! - [`search`]: Search input box (mode, query text)
//! - [`table`]: Book list with status letters
//! - [`empty`]: Empty state message
//! - [`chart`]: Horizontal bar charts
//! - [`activity`]: Recent circulation activity
//!
//! # Layouts
//!
//! - [`render_search_view`]: Header + `SearchBar` + Table + Activity + Footer
//! - [`render_inout_view`]: Header + Member + Basket table + Activity + Footer
//! - [`render_order_view`]: Header + Charts + Recommendation + Footer

mod activity;
mod chart;
mod empty;
mod footer;
mod header;
mod search;
mod table;

use crate::ui::helpers::push_border;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{InOutPanel, OrderPanel, SearchPanel, UIViewModel};

use activity::render_activity;
use chart::render_chart;
use empty::render_empty_state;
use footer::{render_footer, render_message};
use header::render_header;
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};

pub fn render_search_view(out: &mut String, vm: &UIViewModel, panel: &SearchPanel, theme: &Theme, cols: usize) {
    render_header(out, &vm.header, theme, cols);
    push_border(out, &theme.colors.border, cols);
    render_search_bar(out, &panel.search_bar, theme, cols);

    if let Some(empty) = &panel.empty_state {
        render_empty_state(out, empty, theme, cols);
    } else {
        render_table_headers(out, theme, cols);
        render_table_rows(out, &panel.display_items, theme, cols);
    }

    push_border(out, &theme.colors.border, cols);
    render_activity(out, &panel.activity, theme);
    render_bottom(out, vm, theme, cols);
}

pub fn render_inout_view(out: &mut String, vm: &UIViewModel, panel: &InOutPanel, theme: &Theme, cols: usize) {
    render_header(out, &vm.header, theme, cols);
    push_border(out, &theme.colors.border, cols);

    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.push_str(panel.member.as_deref().unwrap_or("No member set"));
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&format!(
        "   {} on loan, {} reserved\n",
        panel.loan_count, panel.reservation_count
    ));
    out.push_str(Theme::reset());

    if let Some(empty) = &panel.empty_state {
        render_empty_state(out, empty, theme, cols);
    } else {
        render_table_headers(out, theme, cols);
        render_table_rows(out, &panel.basket, theme, cols);
    }

    push_border(out, &theme.colors.border, cols);
    render_activity(out, &panel.activity, theme);
    render_bottom(out, vm, theme, cols);
}

pub fn render_order_view(out: &mut String, vm: &UIViewModel, panel: &OrderPanel, theme: &Theme, cols: usize) {
    render_header(out, &vm.header, theme, cols);
    push_border(out, &theme.colors.border, cols);

    for chart in &panel.charts {
        render_chart(out, chart, theme, cols);
    }
    push_border(out, &theme.colors.border, cols);

    if let Some(rec) = &panel.recommendation {
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        out.push_str(&rec.summary);
        out.push_str(Theme::reset());
        out.push_str("\n\n");
        for chart in &rec.charts {
            render_chart(out, chart, theme, cols);
        }
    }
    if let Some(notice) = &panel.notice {
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str(notice);
        out.push_str(Theme::reset());
        out.push('\n');
    }

    render_bottom(out, vm, theme, cols);
}

fn render_bottom(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize) {
    push_border(out, &theme.colors.border, cols);
    if let Some(message) = &vm.message {
        render_message(out, message, theme);
    }
    render_footer(out, &vm.footer, theme, cols);
}
