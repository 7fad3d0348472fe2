//! Data models for Rastgele

mod article;
mod page;
mod preference;

pub use article::SavedArticle;
pub use page::{NavigationState, PageLoadState};
pub use preference::DevicePreference;
