//! Structured logging to a size-rotated file.
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → FileWriter → general.log
//! ```
//!
//! # Configuration
//!
//! The level is resolved in this order:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in `librarian.toml`, or `debug` with `-v`
//! 3. Default: `"info"`
//!
//! Nothing is written to the terminal, which the menu owns.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`file_writer`]: Rotating file writer (10 MiB, 3 backups)

pub mod file_writer;
pub mod init;

pub use init::{env_filter, init_tracing};
