//! Loans and reservations of books by club members.
//!
//! Every circulation event is one line in the append-only ledger. The current
//! state of a book is never stored; it is recomputed by replaying the ledger.
//!
//! # Modules
//!
//! - [`ledger`]: replay of entries into loan and reservation state
//! - [`service`]: validated check out, reserve, cancel and return operations
//! - [`activity`]: recent-activity descriptions

pub mod activity;
pub mod ledger;
pub mod service;

pub use activity::{describe, recent_activity};
pub use ledger::Ledger;
pub use service::Circulation;
