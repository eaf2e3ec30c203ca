//! View and mode state types for the menu.
//!
//! The menu shows one of three views:
//! - **Search**: query box, ranked results and recent activity
//! - **In/Out**: the selection basket, the active member and circulation commands
//! - **Order**: popularity charts and the purchase recommendation
//!
//! Orthogonal to the view, [`SearchMode`](crate::query::SearchMode) decides how
//! search text is read and [`OrderSource`] decides which data the order charts show.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Search,
    InOut,
    Order,
}

impl ViewMode {
    pub const ALL: [Self; 3] = [Self::Search, Self::InOut, Self::Order];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::InOut => "In/Out",
            Self::Order => "Order",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Data shown by the Order view charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSource {
    /// Popularity in the circulation ledger.
    #[default]
    Ledger,
    /// Make-up of the whole collection.
    Catalog,
}

/// Circulation operation requested from the In/Out view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CirculationOp {
    CheckOut,
    Reserve,
    Dereserve,
    Return,
}

impl CirculationOp {
    /// Whether the operation is performed on behalf of a member.
    #[must_use]
    pub const fn needs_member(self) -> bool {
        matches!(self, Self::CheckOut | Self::Reserve)
    }

    /// Past-tense verb for status messages.
    #[must_use]
    pub const fn past_tense(self) -> &'static str {
        match self {
            Self::CheckOut => "checked out",
            Self::Reserve => "reserved",
            Self::Dereserve => "released",
            Self::Return => "returned",
        }
    }
}

impl fmt::Display for CirculationOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CheckOut => "checkout",
            Self::Reserve => "reserve",
            Self::Dereserve => "dereserve",
            Self::Return => "return",
        })
    }
}
