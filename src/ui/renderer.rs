//! Top-level rendering coordinator.
//!
//! Rendering is two steps: compute the [`UIViewModel`] from state, then hand
//! it to the layout for the active view. The frame is returned as a string so
//! the caller decides where it goes.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, UIViewModel};

/// Renders one frame of the menu for a `rows` by `cols` terminal.
///
/// The frame does not clear the screen or move the cursor.
///
/// # Example
///
/// ```
/// use librarian::app::AppState;
/// use librarian::circulation::Ledger;
/// use librarian::storage::builtin_catalog;
/// use librarian::ui::{render, Theme};
///
/// let state = AppState::new(builtin_catalog()?, Ledger::default(), Theme::default());
/// let frame = render(&state, 24, 80);
/// assert!(frame.contains("Librarian"));
/// # Ok::<(), librarian::LibrarianError>(())
/// ```
#[must_use]
pub fn render(state: &AppState, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(rows, cols);
    render_viewmodel(&viewmodel, &state.theme, cols)
}

#[must_use]
pub fn render_viewmodel(vm: &UIViewModel, theme: &Theme, cols: usize) -> String {
    let mut out = String::with_capacity(4096);

    match &vm.body {
        Body::Search(panel) => components::render_search_view(&mut out, vm, panel, theme, cols),
        Body::InOut(panel) => components::render_inout_view(&mut out, vm, panel, theme, cols),
        Body::Order(panel) => components::render_order_view(&mut out, vm, panel, theme, cols),
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{handle_event, Event, ViewMode};
    use crate::circulation::Ledger;
    use crate::domain::{LedgerAction, LedgerEntry, MemberId};
    use crate::storage::builtin_catalog;
    use chrono::NaiveDate;

    fn state() -> AppState {
        let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let member = MemberId::parse("1234").unwrap();
        let ledger = Ledger::new(vec![
            LedgerEntry::new(LedgerAction::Out, 13, member.clone(), day),
            LedgerEntry::new(LedgerAction::Out, 1, member, day),
        ]);
        AppState::new(builtin_catalog().unwrap(), ledger, Theme::default())
    }

    #[test]
    fn search_frame_lists_results_and_activity() {
        let mut state = state();
        handle_event(&mut state, &Event::Query("immune".into())).unwrap();

        let frame = render(&state, 30, 100);
        assert!(frame.contains("Immune by Philipp Dettmer"));
        assert!(frame.contains("Member 1234 checked out the book \"Immune\" on 2024-01-05."));
    }

    #[test]
    fn order_frame_shows_recommendation() {
        let mut state = state();
        handle_event(&mut state, &Event::ShowView(ViewMode::Order)).unwrap();

        let frame = render(&state, 40, 100);
        assert!(frame.contains("Most popular authors"));
        assert!(frame.contains("average price of a popular book is £22.50"));
    }

    #[test]
    fn inout_frame_without_selection() {
        let mut state = state();
        handle_event(&mut state, &Event::ShowView(ViewMode::InOut)).unwrap();

        let frame = render(&state, 30, 100);
        assert!(frame.contains("No member set"));
        assert!(frame.contains("2 on loan, 0 reserved"));
        assert!(frame.contains("The selection is empty"));
    }
}
