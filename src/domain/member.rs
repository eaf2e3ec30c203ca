//! Circulation domain types: members, ledger entries, and book status.

use crate::domain::book::BookId;
use crate::domain::error::{LibrarianError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A club member identifier: exactly four ASCII digits.
///
/// # Examples
///
/// ```
/// use librarian::MemberId;
///
/// assert!(MemberId::parse("0042").is_ok());
/// assert!(MemberId::parse("42").is_err());
/// assert!(MemberId::parse("70001").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MemberId(String);

impl MemberId {
    /// Validates and wraps a member id.
    ///
    /// # Errors
    ///
    /// Returns [`LibrarianError::InvalidMember`] unless `raw` is exactly four
    /// ASCII digits (surrounding whitespace is ignored).
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.len() == 4 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(LibrarianError::InvalidMember(raw.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MemberId {
    type Err = LibrarianError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MemberId {
    type Error = LibrarianError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<MemberId> for String {
    fn from(value: MemberId) -> Self {
        value.0
    }
}

/// Kind of circulation event recorded in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LedgerAction {
    /// A member checked the book out.
    Out,
    /// The book came back.
    Return,
    /// A member reserved the book while it was on loan.
    Reserve,
    /// An open reservation was cancelled.
    Dereserve,
}

impl LedgerAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Out => "OUT",
            Self::Return => "RETURN",
            Self::Reserve => "RESERVE",
            Self::Dereserve => "DERESERVE",
        }
    }
}

impl fmt::Display for LedgerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LedgerAction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "OUT" => Ok(Self::Out),
            "RETURN" => Ok(Self::Return),
            "RESERVE" => Ok(Self::Reserve),
            "DERESERVE" => Ok(Self::Dereserve),
            other => Err(format!("unknown action {other:?}")),
        }
    }
}

/// One line of the circulation ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub action: LedgerAction,
    pub book_id: BookId,
    pub member_id: MemberId,
    pub date: NaiveDate,
}

impl LedgerEntry {
    #[must_use]
    pub const fn new(action: LedgerAction, book_id: BookId, member_id: MemberId, date: NaiveDate) -> Self {
        Self {
            action,
            book_id,
            member_id,
            date,
        }
    }
}

/// Availability of a book derived from the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookStatus {
    Available,
    Out,
    Reserved,
}

impl BookStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Out => "OUT",
            Self::Reserved => "RESERVED",
        }
    }

    /// Single-letter badge used in result listings.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Available => 'A',
            Self::Out => 'O',
            Self::Reserved => 'R',
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_id_requires_four_digits() {
        assert_eq!(MemberId::parse("1976").unwrap().as_str(), "1976");
        assert_eq!(MemberId::parse(" 0000 ").unwrap().as_str(), "0000");
        for bad in ["372", "70001", "12a4", "", "１２３４"] {
            assert!(
                matches!(MemberId::parse(bad), Err(LibrarianError::InvalidMember(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn ledger_action_round_trips_through_text() {
        for action in [
            LedgerAction::Out,
            LedgerAction::Return,
            LedgerAction::Reserve,
            LedgerAction::Dereserve,
        ] {
            assert_eq!(action.as_str().parse::<LedgerAction>(), Ok(action));
        }
        assert!("LOST".parse::<LedgerAction>().is_err());
    }
}
