// Library interface for keyview
pub mod commands;
pub mod detail;
pub mod error;
pub mod filter;
pub mod logging;
pub mod repository;
pub mod store;
pub mod tui;

// Re-export commonly used items
pub use error::{KeyviewError, Result};
