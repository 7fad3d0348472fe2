//! rastgele-core - Core library for Rastgele
//!
//! This crate contains the platform-agnostic pieces of the reader shell:
//! the theme synchronizer that keeps the embedded page in step with the
//! device appearance, navigation and back-key bookkeeping, the random
//! article client, and the small in-memory models the shell renders.

pub mod article;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod navigation;
pub mod saved;
pub mod share;
pub mod status_bar;
pub mod theme;
pub mod util;

pub use error::{Error, Result};
pub use models::{DevicePreference, NavigationState, PageLoadState, SavedArticle};
pub use theme::{SyncOutcome, ThemeStrategy, ThemeSynchronizer};
