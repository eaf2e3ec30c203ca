//! Infrastructure layer for filesystem and environment interactions.

pub mod paths;

pub use paths::{expand_tilde, find_config, get_data_dir, get_log_path, CONFIG_FILE, DEFAULT_DATA_DIR, LOG_FILE};
