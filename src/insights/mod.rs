//! Collection statistics and purchase recommendations.
//!
//! - [`prevalence`]: author and category counts over the catalog or the ledger
//! - [`recommend`](mod@recommend): splitting a budget between authors and categories

pub mod prevalence;
pub mod recommend;

pub use prevalence::{average_price, book_prevalence, catalog_prevalence, ledger_prevalence, Dimension, Tally};
pub use recommend::{recommend, Recommendation};
