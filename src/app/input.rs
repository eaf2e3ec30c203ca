//! Translation of menu input lines into events.
//!
//! Lines starting with `:` are commands; anything else is search text. On the
//! In/Out view a line made only of numbers selects those book ids instead.

use super::handler::Event;
use super::modes::{CirculationOp, OrderSource, ViewMode};
use super::AppState;
use crate::domain::{BookId, MemberId};
use crate::query::SearchMode;

/// Maps one input line to an event.
///
/// # Examples
///
/// ```
/// use librarian::app::{parse_input, AppState, CirculationOp, Event};
/// use librarian::circulation::Ledger;
/// use librarian::ui::Theme;
/// use librarian::Catalog;
///
/// let state = AppState::new(Catalog::default(), Ledger::default(), Theme::default());
/// assert_eq!(parse_input("dettmer", &state), Event::Query("dettmer".into()));
/// assert_eq!(
///     parse_input(":return 4 7", &state),
///     Event::Circulate { op: CirculationOp::Return, books: vec![4, 7] }
/// );
/// ```
#[must_use]
pub fn parse_input(line: &str, state: &AppState) -> Event {
    let line = line.trim();

    if let Some(command) = line.strip_prefix(':') {
        return parse_command(command);
    }

    if line.is_empty() {
        return Event::Refresh;
    }

    if state.view_mode == ViewMode::InOut {
        if let Ok(ids) = parse_ids(line.split_whitespace()) {
            return Event::AddToBasket(ids);
        }
    }

    Event::Query(line.to_string())
}

fn parse_command(command: &str) -> Event {
    let mut words = command.split_whitespace();
    let Some(name) = words.next() else {
        return Event::Invalid("empty command, try :help".to_string());
    };
    let args: Vec<&str> = words.collect();

    match name.to_lowercase().as_str() {
        "q" | "quit" | "exit" => Event::Quit,
        "h" | "help" => Event::Help,
        "1" | "search" => Event::ShowView(ViewMode::Search),
        "2" | "inout" | "io" => Event::ShowView(ViewMode::InOut),
        "3" | "order" => Event::ShowView(ViewMode::Order),
        "n" | "next" => Event::KeyDown,
        "p" | "prev" => Event::KeyUp,
        "mode" => match args.first().map(|m| m.parse::<SearchMode>()) {
            Some(Ok(mode)) => Event::SetSearchMode(mode),
            Some(Err(e)) => Event::Invalid(e.to_string()),
            None => Event::Invalid("usage: :mode title|author|category|query".to_string()),
        },
        "add" if args.is_empty() => Event::AddSelected,
        "add" => ids_event(&args, Event::AddToBasket),
        "rm" | "remove" => ids_event(&args, Event::RemoveFromBasket),
        "clear" => Event::ClearBasket,
        "member" => match args.first().map(|m| MemberId::parse(m)) {
            Some(Ok(member)) => Event::SetMember(member),
            Some(Err(e)) => Event::Invalid(e.to_string()),
            None => Event::Invalid("usage: :member ID".to_string()),
        },
        "checkout" | "out" => circulate(CirculationOp::CheckOut, &args),
        "reserve" => circulate(CirculationOp::Reserve, &args),
        "dereserve" | "unreserve" => circulate(CirculationOp::Dereserve, &args),
        "return" => circulate(CirculationOp::Return, &args),
        "budget" => match args.first().map(|b| b.trim_start_matches('£').parse::<u32>()) {
            Some(Ok(budget)) => Event::SetBudget(budget),
            _ => Event::Invalid("usage: :budget POUNDS".to_string()),
        },
        "source" => match args.first().map(|s| s.to_lowercase()).as_deref() {
            Some("ledger" | "log") => Event::SetOrderSource(OrderSource::Ledger),
            Some("catalog" | "collection") => Event::SetOrderSource(OrderSource::Catalog),
            _ => Event::Invalid("usage: :source ledger|catalog".to_string()),
        },
        other => Event::Invalid(format!("unknown command :{other}, try :help")),
    }
}

fn circulate(op: CirculationOp, args: &[&str]) -> Event {
    ids_event(args, |books| Event::Circulate { op, books })
}

fn ids_event(args: &[&str], make: impl FnOnce(Vec<BookId>) -> Event) -> Event {
    match parse_ids(args.iter().copied()) {
        Ok(ids) => make(ids),
        Err(bad) => Event::Invalid(format!("{bad:?} is not a book id")),
    }
}

/// Parses book ids separated by whitespace or commas. Returns the first word
/// that is not an id.
fn parse_ids<'a>(words: impl Iterator<Item = &'a str>) -> std::result::Result<Vec<BookId>, String> {
    words
        .flat_map(|w| w.split(','))
        .filter(|w| !w.is_empty())
        .map(|w| w.parse::<BookId>().map_err(|_| w.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circulation::Ledger;
    use crate::domain::Catalog;
    use crate::ui::Theme;

    fn state(view: ViewMode) -> AppState {
        let mut state = AppState::new(Catalog::default(), Ledger::default(), Theme::default());
        state.view_mode = view;
        state
    }

    #[test]
    fn numbers_select_on_inout_view_only() {
        assert_eq!(parse_input("3, 4 5", &state(ViewMode::InOut)), Event::AddToBasket(vec![3, 4, 5]));
        assert_eq!(parse_input("1984", &state(ViewMode::Search)), Event::Query("1984".into()));
    }

    #[test]
    fn commands() {
        let s = state(ViewMode::Search);
        assert_eq!(parse_input(":q", &s), Event::Quit);
        assert_eq!(parse_input(":mode nlp", &s), Event::SetSearchMode(SearchMode::Query));
        assert_eq!(parse_input(":budget £250", &s), Event::SetBudget(250));
        assert_eq!(parse_input(":add", &s), Event::AddSelected);
        assert_eq!(
            parse_input(":checkout", &s),
            Event::Circulate {
                op: CirculationOp::CheckOut,
                books: vec![]
            }
        );
        assert!(matches!(parse_input(":member 12", &s), Event::Invalid(_)));
        assert!(matches!(parse_input(":rm x", &s), Event::Invalid(_)));
        assert!(matches!(parse_input(":frobnicate", &s), Event::Invalid(_)));
        assert_eq!(parse_input("   ", &s), Event::Refresh);
    }
}
