//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the menu: the loaded catalog,
//! a snapshot of the ledger, the current view and search, the selection basket
//! and the last status message. View models are computed on demand from it.
//!
//! # Example
//!
//! ```
//! use librarian::app::AppState;
//! use librarian::circulation::Ledger;
//! use librarian::storage::builtin_catalog;
//! use librarian::ui::Theme;
//!
//! let mut state = AppState::new(builtin_catalog()?, Ledger::default(), Theme::default());
//! state.search_query = "books by becky chambers".to_string();
//! state.apply_search();
//! assert_eq!(state.results.len(), 4);
//! let viewmodel = state.compute_viewmodel(24, 80);
//! # Ok::<(), librarian::LibrarianError>(())
//! ```

use super::modes::{OrderSource, ViewMode};
use crate::circulation::{recent_activity, Ledger};
use crate::domain::{Book, BookId, Catalog, LedgerEntry, MemberId};
use crate::insights::{self, Dimension, Tally};
use crate::query::{search_with_mode, SearchMode};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    BarInfo, Body, ChartInfo, DisplayItem, EmptyState, FooterInfo, HeaderInfo, InOutPanel, MessageInfo,
    OrderPanel, RecommendationInfo, SearchBarInfo, SearchPanel, TabInfo, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Budget used by the Order view until `:budget` sets another.
pub const DEFAULT_BUDGET: u32 = 500;

const NAME_WIDTH: usize = 48;
const ACTIVITY_LINES: usize = 5;
const CHART_BARS: usize = 7;

/// Result of the last command, shown under the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Catalog,

    /// Snapshot of the ledger, kept in step by circulation events.
    pub ledger: Ledger,

    pub view_mode: ViewMode,

    pub search_mode: SearchMode,

    pub search_query: String,

    /// Books matching the current query, in display order.
    pub results: Vec<Book>,

    /// Zero-based index of the selected result. Wraps during navigation.
    pub selected_index: usize,

    /// Ids chosen for circulation commands, in the order they were added.
    pub basket: Vec<BookId>,

    /// Member that check out and reserve act for.
    pub member: Option<MemberId>,

    pub budget: u32,

    pub order_source: OrderSource,

    pub message: Option<StatusMessage>,

    pub theme: Theme,
}

impl AppState {
    #[must_use]
    pub fn new(catalog: Catalog, ledger: Ledger, theme: Theme) -> Self {
        Self {
            catalog,
            ledger,
            view_mode: ViewMode::Search,
            search_mode: SearchMode::default(),
            search_query: String::new(),
            results: vec![],
            selected_index: 0,
            basket: vec![],
            member: None,
            budget: DEFAULT_BUDGET,
            order_source: OrderSource::default(),
            message: None,
            theme,
        }
    }

    /// Moves the selection down by one, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if self.results.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.results.len();
    }

    /// Moves the selection up by one, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if self.results.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.results.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    #[must_use]
    pub fn selected_book(&self) -> Option<&Book> {
        self.results.get(self.selected_index)
    }

    /// Re-runs the current query in the current mode and clamps the selection.
    pub fn apply_search(&mut self) {
        let _span = tracing::debug_span!("apply_search",
            mode = %self.search_mode,
            query_len = self.search_query.len()
        ).entered();

        self.results = search_with_mode(&self.catalog, self.search_mode, &self.search_query);

        if self.results.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.results.len() - 1);
        }

        tracing::debug!(result_count = self.results.len(), "search applied");
    }

    /// Adds catalogued ids to the basket, skipping unknown ids and ids already
    /// present. Returns how many were added.
    pub fn add_to_basket(&mut self, ids: &[BookId]) -> usize {
        let mut added = 0;
        for &id in ids {
            if self.catalog.contains(id) && !self.basket.contains(&id) {
                self.basket.push(id);
                added += 1;
            }
        }
        added
    }

    /// Removes ids from the basket. Returns how many were removed.
    pub fn remove_from_basket(&mut self, ids: &[BookId]) -> usize {
        let before = self.basket.len();
        self.basket.retain(|id| !ids.contains(id));
        before - self.basket.len()
    }

    /// Brings the ledger snapshot up to date with entries just written.
    pub fn record_entries(&mut self, entries: &[LedgerEntry]) {
        for entry in entries {
            self.ledger.record(entry.clone());
        }
    }

    pub fn set_info(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage {
            text: text.into(),
            is_error: true,
        });
    }

    /// Computes the view model for a terminal of `rows` by `cols` cells.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let body = match self.view_mode {
            ViewMode::Search => Body::Search(self.compute_search_panel(rows, cols)),
            ViewMode::InOut => Body::InOut(self.compute_inout_panel(cols)),
            ViewMode::Order => Body::Order(self.compute_order_panel()),
        };

        UIViewModel {
            header: self.compute_header(),
            body,
            footer: self.compute_footer(),
            message: self.message.as_ref().map(|m| MessageInfo {
                text: m.text.clone(),
                is_error: m.is_error,
            }),
        }
    }

    fn compute_search_panel(&self, rows: usize, cols: usize) -> SearchPanel {
        let search_bar = SearchBarInfo {
            query: self.search_query.clone(),
            mode: self.search_mode.to_string(),
        };
        let activity = recent_activity(&self.catalog, self.ledger.entries(), Some(ACTIVITY_LINES));

        if self.results.is_empty() {
            let empty_state = if self.search_query.trim().is_empty() {
                EmptyState {
                    message: "Type a query to search the collection".to_string(),
                    subtitle: "e.g. books by philipp dettmer in non-fiction".to_string(),
                }
            } else {
                EmptyState {
                    message: "No books match".to_string(),
                    subtitle: format!("nothing in {} mode matches {:?}", self.search_mode, self.search_query.trim()),
                }
            };
            return SearchPanel {
                search_bar,
                display_items: vec![],
                selected_index: 0,
                empty_state: Some(empty_state),
                activity,
            };
        }

        let available_rows = self.calculate_available_rows(rows);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(self.results.len());

        let actual_count = visible_end - visible_start;
        if actual_count < available_rows && self.results.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let matcher = matches!(self.search_mode, SearchMode::Title | SearchMode::Author)
            .then(SkimMatcherV2::default);

        let display_items = self.results[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, book)| {
                let is_selected = visible_start + relative_idx == self.selected_index;
                self.compute_display_item(book, is_selected, cols, matcher.as_ref())
            })
            .collect();

        SearchPanel {
            search_bar,
            display_items,
            selected_index: self.selected_index.saturating_sub(visible_start),
            empty_state: None,
            activity,
        }
    }

    fn compute_inout_panel(&self, cols: usize) -> InOutPanel {
        let basket: Vec<DisplayItem> = self
            .basket
            .iter()
            .filter_map(|id| self.catalog.get(*id))
            .map(|book| self.compute_display_item(book, false, cols, None))
            .collect();

        let empty_state = basket.is_empty().then(|| EmptyState {
            message: "The selection is empty".to_string(),
            subtitle: "type book ids, or :add the selected search result".to_string(),
        });

        InOutPanel {
            member: self.member.as_ref().map(|m| format!("Member {m}")),
            basket,
            empty_state,
            loan_count: self.ledger.loaned_ids().len(),
            reservation_count: self.ledger.reserved_ids().len(),
            activity: recent_activity(&self.catalog, self.ledger.entries(), Some(ACTIVITY_LINES)),
        }
    }

    fn compute_order_panel(&self) -> OrderPanel {
        let entries = self.ledger.entries();

        let charts = match self.order_source {
            OrderSource::Ledger => vec![
                chart("Most popular authors", &insights::ledger_prevalence(&self.catalog, entries, Dimension::Author)),
                chart("Most popular categories", &insights::ledger_prevalence(&self.catalog, entries, Dimension::Category)),
            ],
            OrderSource::Catalog => vec![
                chart("Top authors in the collection", &insights::catalog_prevalence(&self.catalog, Dimension::Author)),
                chart("Categories in the collection", &insights::catalog_prevalence(&self.catalog, Dimension::Category)),
            ],
        };

        match insights::recommend(&self.catalog, entries, self.budget) {
            Ok(rec) => OrderPanel {
                charts,
                recommendation: Some(RecommendationInfo {
                    summary: rec.summary(),
                    charts: vec![
                        chart("Books to buy per author", &rec.authors),
                        chart("Books to buy per category", &rec.categories),
                    ],
                }),
                notice: None,
            },
            Err(e) => OrderPanel {
                charts,
                recommendation: None,
                notice: Some(e.to_string()),
            },
        }
    }

    fn compute_display_item(
        &self,
        book: &Book,
        is_selected: bool,
        cols: usize,
        matcher: Option<&SkimMatcherV2>,
    ) -> DisplayItem {
        let title = book.display_title();
        let author = book.display_author();
        let full_name = format!("{title} by {author}");

        let highlight_ranges = matcher.map_or_else(Vec::new, |m| match self.search_mode {
            SearchMode::Title => self.compute_highlight_ranges(&title, 0, m),
            SearchMode::Author => {
                self.compute_highlight_ranges(&author, title.chars().count() + " by ".len(), m)
            }
            _ => vec![],
        });

        let width = NAME_WIDTH.min(cols.saturating_sub(2)).max(8);
        let name = truncate(&full_name, width);
        let name_len = name.chars().count();
        let highlight_ranges = highlight_ranges
            .into_iter()
            .filter(|&(start, _)| start < name_len)
            .map(|(start, end)| (start, end.min(name_len)))
            .collect();

        DisplayItem {
            name,
            detail: format!(
                "#{} · {} · £{} · {}",
                book.id,
                book.display_category(),
                book.purchase_price,
                book.purchase_date.format("%Y-%m-%d")
            ),
            status: self.ledger.status(book.id),
            is_selected,
            in_basket: self.basket.contains(&book.id),
            highlight_ranges,
        }
    }

    /// Character ranges of `text` matched by the query, shifted by `offset`.
    ///
    /// Consecutive matched indices are coalesced into one range.
    fn compute_highlight_ranges(&self, text: &str, offset: usize, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let query = self.search_query.trim();
        if query.is_empty() {
            return vec![];
        }

        let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
            return vec![];
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == offset + idx => *end += 1,
                _ => ranges.push((offset + idx, offset + idx + 1)),
            }
        }
        ranges
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match self.view_mode {
            ViewMode::Search => format!(" Librarian · {} books ", self.catalog.len()),
            ViewMode::InOut => format!(" Librarian · {} selected ", self.basket.len()),
            ViewMode::Order => format!(" Librarian · budget £{} ", self.budget),
        };

        HeaderInfo {
            title,
            tabs: ViewMode::ALL
                .iter()
                .enumerate()
                .map(|(i, view)| TabInfo {
                    label: format!("{} {}", i + 1, view.title()),
                    is_active: *view == self.view_mode,
                })
                .collect(),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.view_mode {
            ViewMode::Search => {
                ":n/:p navigate  :add select  :mode title|author|category|query  :1-3 views  :q quit"
            }
            ViewMode::InOut => {
                ":member ID  :checkout :reserve :dereserve :return [IDS]  :rm IDS  :clear  :q quit"
            }
            ViewMode::Order => ":budget POUNDS  :source ledger|catalog  :1-3 views  :q quit",
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    /// Rows left for results after the header, tabs, search bar, table header,
    /// activity panel, message and footer.
    fn calculate_available_rows(&self, total_rows: usize) -> usize {
        total_rows.saturating_sub(10 + ACTIVITY_LINES).max(3)
    }
}

fn chart(title: &str, tallies: &[Tally]) -> ChartInfo {
    ChartInfo {
        title: title.to_string(),
        bars: tallies
            .iter()
            .take(CHART_BARS)
            .map(|t| BarInfo {
                label: crate::domain::book::title_case(&t.name),
                value: t.count,
            })
            .collect(),
    }
}

/// Shortens `text` to at most `width` characters, ending in `...` when cut.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::builtin_catalog;
    use crate::ui::viewmodel::Body;

    fn state() -> AppState {
        AppState::new(builtin_catalog().unwrap(), Ledger::default(), Theme::default())
    }

    #[test]
    fn selection_wraps() {
        let mut state = state();
        state.search_query = "becky chambers".to_string();
        state.search_mode = SearchMode::Author;
        state.apply_search();
        assert_eq!(state.results.len(), 4);

        state.move_selection_up();
        assert_eq!(state.selected_index, 3);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn basket_skips_unknown_and_duplicate_ids() {
        let mut state = state();
        assert_eq!(state.add_to_basket(&[1, 1, 9999, 2]), 2);
        assert_eq!(state.basket, vec![1, 2]);
        assert_eq!(state.remove_from_basket(&[1, 7]), 1);
        assert_eq!(state.basket, vec![2]);
    }

    #[test]
    fn author_highlight_is_offset_past_title() {
        let mut state = state();
        state.search_mode = SearchMode::Author;
        state.search_query = "cheng".to_string();
        state.apply_search();

        let vm = state.compute_viewmodel(40, 120);
        let Body::Search(panel) = vm.body else {
            panic!("expected search body");
        };
        let item = &panel.display_items[0];
        let (start, end) = item.highlight_ranges[0];
        let highlighted: String = item.name.chars().skip(start).take(end - start).collect();
        assert_eq!(highlighted.to_lowercase(), "cheng");
    }

    #[test]
    fn empty_query_shows_hint() {
        let state = state();
        let Body::Search(panel) = state.compute_viewmodel(24, 80).body else {
            panic!("expected search body");
        };
        assert!(panel.display_items.is_empty());
        assert!(panel.empty_state.is_some());
    }

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("abcdef", 6), "abcdef");
        assert_eq!(truncate("abcdefgh", 6), "abc...");
    }
}
