//! Embedded page lifecycle models

use serde::{Deserialize, Serialize};

/// Load lifecycle of the embedded page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageLoadState {
    /// Nothing has finished loading yet
    #[default]
    NotLoaded,
    /// A navigation is in flight
    Loading,
    /// The current document finished loading
    Loaded,
}

/// Navigation snapshot delivered by the embedded browser on every change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationState {
    /// URL currently displayed, `None` when the surface cannot read it
    pub url: Option<String>,
    /// Whether the surface has history to go back to
    pub can_go_back: bool,
    /// Load progress in `[0, 1]`
    pub load_fraction: f64,
}

impl NavigationState {
    pub fn new(url: impl Into<String>, can_go_back: bool, load_fraction: f64) -> Self {
        Self::with_url(Some(url.into()), can_go_back, load_fraction)
    }

    /// Snapshot whose URL may be unknown, e.g. a page the user reached by
    /// following a link inside another origin's document.
    pub fn with_url(url: Option<String>, can_go_back: bool, load_fraction: f64) -> Self {
        Self {
            url,
            can_go_back,
            load_fraction: clamp_fraction(load_fraction),
        }
    }

    /// Whether the snapshot reports a complete load.
    pub fn is_complete(&self) -> bool {
        self.load_fraction >= 1.0
    }
}

fn clamp_fraction(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_fraction_is_clamped() {
        assert_eq!(NavigationState::new("https://a.com", false, 1.7).load_fraction, 1.0);
        assert_eq!(NavigationState::new("https://a.com", false, -0.2).load_fraction, 0.0);
        assert_eq!(
            NavigationState::new("https://a.com", false, f64::NAN).load_fraction,
            0.0
        );
    }

    #[test]
    fn complete_only_at_full_progress() {
        assert!(!NavigationState::new("https://a.com", false, 0.99).is_complete());
        assert!(NavigationState::new("https://a.com", false, 1.0).is_complete());
    }

    #[test]
    fn unknown_url_is_kept_as_none() {
        let state = NavigationState::with_url(None, true, 2.0);
        assert_eq!(state.url, None);
        assert!(state.can_go_back);
        assert!(state.is_complete());
    }
}
