//! Saved article model

use serde::{Deserialize, Serialize};

/// An article the user saved during this session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedArticle {
    /// Article URL
    pub url: String,
    /// Page title at the time of saving (may be empty)
    pub title: String,
    /// Unix timestamp (seconds) when the article was saved
    pub saved_at: i64,
}

impl SavedArticle {
    /// Title to show in lists, falling back to the URL.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.url
        } else {
            self.title.trim()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_title_falls_back_to_url() {
        let article = SavedArticle {
            url: "https://eksiseyler.com/a".to_string(),
            title: "  ".to_string(),
            saved_at: 0,
        };
        assert_eq!(article.display_title(), "https://eksiseyler.com/a");
    }
}
