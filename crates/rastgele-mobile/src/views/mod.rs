//! Screens composed by the app shell.

mod saved;
mod toolbar;

pub use saved::SavedList;
pub use toolbar::ActionBar;
