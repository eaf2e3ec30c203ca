//! Application layer coordinating state, events, and actions.
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Input line → parse_input → Event → handle_event → State mutations → Actions
//!                                         ↑                              ↓
//!                                         └──── Circulation outcomes ────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`input`]: Menu input lines to events
//! - [`modes`]: View, order source and circulation operation types
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod handler;
pub mod input;
pub mod modes;
pub mod state;

pub use actions::{apply, perform, Action, CirculationOutcome, CirculationRequest};
pub use handler::{handle_event, Event};
pub use input::parse_input;
pub use modes::{CirculationOp, OrderSource, ViewMode};
pub use state::AppState;
