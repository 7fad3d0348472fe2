//! In-memory list of saved articles.
//!
//! Lives as long as the app process; nothing is written to disk.

use crate::models::SavedArticle;
use crate::util::unix_timestamp_now;

#[derive(Debug, Clone, Default)]
pub struct SavedArticles {
    articles: Vec<SavedArticle>,
}

impl SavedArticles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save `url`. Returns `false` when it is already saved or blank.
    pub fn save(&mut self, url: &str, title: &str) -> bool {
        self.save_at(url, title, unix_timestamp_now())
    }

    fn save_at(&mut self, url: &str, title: &str, saved_at: i64) -> bool {
        let url = url.trim();
        if url.is_empty() || self.contains(url) {
            return false;
        }
        self.articles.push(SavedArticle {
            url: url.to_string(),
            title: title.trim().to_string(),
            saved_at,
        });
        true
    }

    /// Remove `url`. Returns `false` when it was not saved.
    pub fn remove(&mut self, url: &str) -> bool {
        let url = url.trim();
        let before = self.articles.len();
        self.articles.retain(|article| article.url != url);
        self.articles.len() != before
    }

    pub fn contains(&self, url: &str) -> bool {
        let url = url.trim();
        self.articles.iter().any(|article| article.url == url)
    }

    /// Saved articles, newest first.
    pub fn list(&self) -> Vec<SavedArticle> {
        self.articles.iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn clear(&mut self) {
        self.articles.clear();
    }
}
