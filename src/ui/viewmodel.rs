//! View model types representing renderable UI state.
//!
//! View models are computed by [`AppState::compute_viewmodel`](crate::app::AppState::compute_viewmodel)
//! and consumed by the renderer. They hold display-ready data only: capitalised
//! names, formatted prices, highlight ranges and bar values.

use crate::domain::BookStatus;

/// Complete UI view model for one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// The view-specific part of the screen.
    pub body: Body,

    pub footer: FooterInfo,

    /// Outcome of the last command, if any.
    pub message: Option<MessageInfo>,
}

/// The body of the current view.
#[derive(Debug, Clone)]
pub enum Body {
    Search(SearchPanel),
    InOut(InOutPanel),
    Order(OrderPanel),
}

#[derive(Debug, Clone)]
pub struct SearchPanel {
    pub search_bar: SearchBarInfo,

    /// Visible window of results.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected item within `display_items`.
    pub selected_index: usize,

    /// Shown instead of the table when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    pub activity: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct InOutPanel {
    /// Member commands act for, already formatted.
    pub member: Option<String>,

    /// Books in the selection basket.
    pub basket: Vec<DisplayItem>,

    pub empty_state: Option<EmptyState>,

    pub loan_count: usize,
    pub reservation_count: usize,

    pub activity: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct OrderPanel {
    pub charts: Vec<ChartInfo>,

    /// Allocation charts and prose, when the ledger supports one.
    pub recommendation: Option<RecommendationInfo>,

    /// Why no recommendation is shown.
    pub notice: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RecommendationInfo {
    pub summary: String,
    pub charts: Vec<ChartInfo>,
}

/// A titled horizontal bar chart.
#[derive(Debug, Clone)]
pub struct ChartInfo {
    pub title: String,
    pub bars: Vec<BarInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarInfo {
    pub label: String,
    pub value: usize,
}

/// One book row.
#[derive(Debug, Clone)]
pub struct DisplayItem {
    /// `Title by Author`, possibly truncated.
    pub name: String,

    /// Id, category, price and purchase date.
    pub detail: String,

    pub status: BookStatus,

    pub is_selected: bool,

    /// Whether the book is in the selection basket.
    pub in_basket: bool,

    /// Character ranges of `name` to highlight, `(start, end)` exclusive end.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,

    /// View names, with the active one marked.
    pub tabs: Vec<TabInfo>,
}

#[derive(Debug, Clone)]
pub struct TabInfo {
    pub label: String,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}

#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub query: String,

    /// Active search mode name.
    pub mode: String,
}

#[derive(Debug, Clone)]
pub struct MessageInfo {
    pub text: String,
    pub is_error: bool,
}
