//! Terminal User Interface module for keyview
//!
//! Interactive list of secret store entries with incremental search and a
//! reveal overlay.

mod app;
mod event;
pub mod list;
pub mod overlay;
pub mod terminal;
pub mod ui;

pub use app::{App, Focus, Intent};
pub use event::{Event, EventHandler};
pub use terminal::enter_terminal;
