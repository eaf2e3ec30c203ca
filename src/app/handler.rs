//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place menu state changes. It returns whether the
//! screen needs redrawing and the side effects the runtime must perform.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `ShowView`
//! - **Search**: `Query`, `SetSearchMode`
//! - **Selection**: `AddToBasket`, `AddSelected`, `RemoveFromBasket`, `ClearBasket`
//! - **Circulation**: `SetMember`, `Circulate`, and the outcomes
//!   `CirculationCompleted` / `CirculationFailed`
//! - **Order**: `SetBudget`, `SetOrderSource`
//! - **Other**: `Help`, `Invalid`, `Refresh`, `Quit`
//!
//! # Example
//!
//! ```
//! use librarian::app::{handle_event, AppState, Event};
//! use librarian::circulation::Ledger;
//! use librarian::storage::builtin_catalog;
//! use librarian::ui::Theme;
//!
//! let mut state = AppState::new(builtin_catalog()?, Ledger::default(), Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::Query("immune".into()))?;
//! assert!(render);
//! assert!(actions.is_empty());
//! assert_eq!(state.results.len(), 1);
//! # Ok::<(), librarian::LibrarianError>(())
//! ```

use super::actions::{Action, CirculationRequest};
use super::modes::{CirculationOp, OrderSource, ViewMode};
use super::AppState;
use crate::domain::error::Result;
use crate::domain::{BookId, LedgerEntry, MemberId};
use crate::query::SearchMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the selection down by one (wraps to top).
    KeyDown,
    /// Moves the selection up by one (wraps to bottom).
    KeyUp,
    ShowView(ViewMode),

    /// Replaces the search text and re-runs the search.
    Query(String),
    SetSearchMode(SearchMode),

    /// Adds ids to the selection basket.
    AddToBasket(Vec<BookId>),
    /// Adds the selected search result to the basket.
    AddSelected,
    RemoveFromBasket(Vec<BookId>),
    ClearBasket,

    SetMember(MemberId),

    /// Requests a circulation operation. An empty id list means the whole basket.
    Circulate {
        op: CirculationOp,
        books: Vec<BookId>,
    },

    /// Every book in a circulation request was processed.
    CirculationCompleted {
        op: CirculationOp,
        entries: Vec<LedgerEntry>,
    },

    /// A circulation request stopped early.
    CirculationFailed {
        /// Entries written before the failure.
        entries: Vec<LedgerEntry>,
        error: String,
    },

    SetBudget(u32),
    SetOrderSource(OrderSource),

    Help,
    /// Input that could not be understood, with the reason.
    Invalid(String),
    /// Redraw without changing anything.
    Refresh,
    Quit,
}

const HELP: &str = "views :1 search  :2 in/out  :3 order | plain text searches, ids on the In/Out view select books";

/// Processes an event, mutates application state, and returns
/// `(needs_render, actions)`.
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for events that consult
/// storage directly.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::ShowView(view) => {
            if state.view_mode == *view {
                return Ok((false, vec![]));
            }
            tracing::debug!(from = ?state.view_mode, to = ?view, "switching view");
            state.view_mode = *view;
            state.message = None;
            Ok((true, vec![]))
        }
        Event::Query(text) => {
            state.view_mode = ViewMode::Search;
            state.search_query.clone_from(text);
            state.selected_index = 0;
            state.message = None;
            state.apply_search();
            Ok((true, vec![]))
        }
        Event::SetSearchMode(mode) => {
            state.search_mode = *mode;
            state.apply_search();
            state.set_info(format!("search mode: {mode}"));
            Ok((true, vec![]))
        }
        Event::AddToBasket(ids) => {
            let added = state.add_to_basket(ids);
            if added == 0 {
                state.set_error("no new catalogued books to add");
            } else {
                state.set_info(format!("added {added} book(s) to the selection"));
            }
            Ok((true, vec![]))
        }
        Event::AddSelected => {
            let Some(id) = state.selected_book().map(|b| b.id) else {
                state.set_error("no search result is selected");
                return Ok((true, vec![]));
            };
            if state.add_to_basket(&[id]) == 0 {
                state.set_error(format!("book {id} is already selected"));
            } else {
                state.set_info(format!("added book {id} to the selection"));
            }
            Ok((true, vec![]))
        }
        Event::RemoveFromBasket(ids) => {
            let removed = state.remove_from_basket(ids);
            state.set_info(format!("removed {removed} book(s) from the selection"));
            Ok((true, vec![]))
        }
        Event::ClearBasket => {
            state.basket.clear();
            state.set_info("selection cleared");
            Ok((true, vec![]))
        }
        Event::SetMember(member) => {
            state.member = Some(member.clone());
            state.set_info(format!("acting for member {member}"));
            Ok((true, vec![]))
        }
        Event::Circulate { op, books } => {
            let books = if books.is_empty() {
                state.basket.clone()
            } else {
                books.clone()
            };

            if books.is_empty() {
                state.set_error(format!("nothing to {op}: the selection is empty"));
                return Ok((true, vec![]));
            }
            if op.needs_member() && state.member.is_none() {
                state.set_error(format!("{op} needs a member id, set one with :member"));
                return Ok((true, vec![]));
            }

            tracing::debug!(op = %op, count = books.len(), "circulation requested");
            Ok((false, vec![Action::Circulate(CirculationRequest {
                op: *op,
                books,
                member: state.member.clone(),
            })]))
        }
        Event::CirculationCompleted { op, entries } => {
            state.record_entries(entries);
            let ids: Vec<BookId> = entries.iter().map(|e| e.book_id).collect();
            state.remove_from_basket(&ids);
            state.set_info(format!("{} {} book(s)", op.past_tense(), entries.len()));
            Ok((true, vec![]))
        }
        Event::CirculationFailed { entries, error } => {
            state.record_entries(entries);
            let ids: Vec<BookId> = entries.iter().map(|e| e.book_id).collect();
            state.remove_from_basket(&ids);
            state.set_error(error.clone());
            Ok((true, vec![]))
        }
        Event::SetBudget(budget) => {
            state.budget = *budget;
            state.view_mode = ViewMode::Order;
            state.set_info(format!("budget set to £{budget}"));
            Ok((true, vec![]))
        }
        Event::SetOrderSource(source) => {
            state.order_source = *source;
            state.view_mode = ViewMode::Order;
            Ok((true, vec![]))
        }
        Event::Help => {
            state.set_info(HELP);
            Ok((true, vec![]))
        }
        Event::Invalid(reason) => {
            tracing::debug!(reason = %reason, "invalid input");
            state.set_error(reason.clone());
            Ok((true, vec![]))
        }
        Event::Refresh => Ok((true, vec![])),
        Event::Quit => Ok((false, vec![Action::Quit])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circulation::Ledger;
    use crate::domain::LedgerAction;
    use crate::storage::builtin_catalog;
    use crate::ui::Theme;
    use chrono::NaiveDate;

    fn state() -> AppState {
        AppState::new(builtin_catalog().unwrap(), Ledger::default(), Theme::default())
    }

    fn member() -> MemberId {
        MemberId::parse("1234").unwrap()
    }

    #[test]
    fn circulate_defaults_to_basket() {
        let mut state = state();
        state.member = Some(member());
        state.add_to_basket(&[3, 1]);

        let (render, actions) = handle_event(
            &mut state,
            &Event::Circulate {
                op: CirculationOp::CheckOut,
                books: vec![],
            },
        )
        .unwrap();

        assert!(!render);
        assert_eq!(
            actions,
            vec![Action::Circulate(CirculationRequest {
                op: CirculationOp::CheckOut,
                books: vec![3, 1],
                member: Some(member()),
            })]
        );
    }

    #[test]
    fn checkout_without_member_sets_error() {
        let mut state = state();
        let (_, actions) = handle_event(
            &mut state,
            &Event::Circulate {
                op: CirculationOp::CheckOut,
                books: vec![1],
            },
        )
        .unwrap();
        assert!(actions.is_empty());
        assert!(state.message.as_ref().is_some_and(|m| m.is_error));
    }

    #[test]
    fn return_needs_no_member() {
        let mut state = state();
        let (_, actions) = handle_event(
            &mut state,
            &Event::Circulate {
                op: CirculationOp::Return,
                books: vec![1],
            },
        )
        .unwrap();
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn completion_updates_snapshot_and_basket() {
        let mut state = state();
        state.add_to_basket(&[1, 2]);
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let entries = vec![LedgerEntry::new(LedgerAction::Out, 1, member(), day)];

        handle_event(
            &mut state,
            &Event::CirculationCompleted {
                op: CirculationOp::CheckOut,
                entries,
            },
        )
        .unwrap();

        assert_eq!(state.basket, vec![2]);
        assert_eq!(state.ledger.loaned_ids(), vec![1]);
    }

    #[test]
    fn quit_emits_action() {
        let mut state = state();
        assert_eq!(handle_event(&mut state, &Event::Quit).unwrap(), (false, vec![Action::Quit]));
    }
}
