//! Navigation bookkeeping: back-key handling, progress and history.

use crate::models::NavigationState;

/// What the hardware back key should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackAction {
    /// Navigate the page back; the key press is consumed
    GoBack,
    /// Let the platform handle the key (leaves the app)
    Exit,
}

impl BackAction {
    /// Whether the shell swallows the key press.
    pub const fn consumes_key(self) -> bool {
        matches!(self, Self::GoBack)
    }
}

/// Tracks the latest navigation snapshot reported by the surface.
#[derive(Debug, Clone)]
pub struct NavigationTracker {
    home_url: String,
    state: Option<NavigationState>,
}

impl NavigationTracker {
    pub fn new(home_url: impl Into<String>) -> Self {
        Self {
            home_url: home_url.into(),
            state: None,
        }
    }

    pub fn home_url(&self) -> &str {
        &self.home_url
    }

    pub fn on_navigation_state(&mut self, state: NavigationState) {
        self.state = Some(state);
    }

    pub fn current_url(&self) -> Option<&str> {
        self.state.as_ref().and_then(|state| state.url.as_deref())
    }

    /// Load progress of the current document, `0.0` before anything loaded.
    pub fn progress(&self) -> f64 {
        self.state.as_ref().map_or(0.0, |state| state.load_fraction)
    }

    /// Back is offered only when the surface has history and the user is
    /// not already on the home page. A page whose URL is unknown is never
    /// the home page.
    pub fn can_go_back(&self) -> bool {
        self.state.as_ref().is_some_and(|state| {
            state.can_go_back
                && !state
                    .url
                    .as_deref()
                    .is_some_and(|url| same_page(url, &self.home_url))
        })
    }

    pub fn back_action(&self) -> BackAction {
        if self.can_go_back() {
            BackAction::GoBack
        } else {
            BackAction::Exit
        }
    }
}

fn same_page(left: &str, right: &str) -> bool {
    left.trim().trim_end_matches('/') == right.trim().trim_end_matches('/')
}

/// Navigation the shell asked the surface to perform; the next finished
/// load consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingNavigation {
    /// Open a URL as a new history entry
    Push(String),
    /// Swap the current entry's document for another URL
    Replace(String),
    /// Step back one entry
    Back,
}

/// Mirror of the session history the page surface lives in.
///
/// Loads the shell requested carry their URL; loads the page started on its
/// own (a followed link, a redirect) are recorded with an unknown URL. The
/// embedder's session length tells whether such a load created an entry or
/// replaced the current one.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Option<String>>,
    index: usize,
    /// Session entries that precede the first page entry
    offset: usize,
    session_length: Option<usize>,
    started: bool,
}

impl History {
    pub fn new(home_url: impl Into<String>) -> Self {
        Self {
            entries: vec![Some(home_url.into())],
            index: 0,
            offset: 0,
            session_length: None,
            started: false,
        }
    }

    /// Record a finished load.
    ///
    /// `pending` is the navigation the shell requested, if any, and
    /// `session_length` the embedder's history length after the load when
    /// it could be read. The very first load only establishes the baseline.
    pub fn on_load_finished(
        &mut self,
        pending: Option<PendingNavigation>,
        session_length: Option<usize>,
    ) {
        if !self.started {
            self.started = true;
            self.offset = session_length.map_or(0, |length| length.saturating_sub(1));
            self.session_length = session_length;
            if let Some(PendingNavigation::Push(url) | PendingNavigation::Replace(url)) = pending {
                self.entries[0] = Some(url);
            }
            return;
        }

        let length_changed = matches!(
            (self.session_length, session_length),
            (Some(previous), Some(length)) if previous != length
        );
        let creates_entry = session_length.map(|length| length == self.offset + self.index + 2);

        match pending {
            Some(PendingNavigation::Back) if !length_changed => self.step_back(),
            Some(PendingNavigation::Replace(url)) => self.replace_current(Some(url)),
            Some(PendingNavigation::Push(url)) => {
                let reload = self.current().is_some_and(|current| same_page(current, &url));
                if creates_entry.unwrap_or(!reload) {
                    self.push(Some(url));
                } else {
                    self.replace_current(Some(url));
                }
            }
            Some(PendingNavigation::Back) | None => {
                if creates_entry.unwrap_or(true) {
                    self.push(None);
                } else {
                    self.replace_current(None);
                }
            }
        }

        if session_length.is_some() {
            self.session_length = session_length;
        }
    }

    /// The surface read the current document's URL.
    pub fn observe_current_url(&mut self, url: impl Into<String>) {
        self.replace_current(Some(url.into()));
    }

    /// URL the shell expects after stepping back, if it is known.
    pub fn previous(&self) -> Option<&str> {
        self.index
            .checked_sub(1)
            .and_then(|index| self.entries[index].as_deref())
    }

    pub fn current(&self) -> Option<&str> {
        self.entries[self.index].as_deref()
    }

    pub const fn can_go_back(&self) -> bool {
        self.index > 0
    }

    /// Entries behind the current one.
    pub const fn depth(&self) -> usize {
        self.index
    }

    fn push(&mut self, url: Option<String>) {
        self.entries.truncate(self.index + 1);
        self.entries.push(url);
        self.index += 1;
    }

    fn replace_current(&mut self, url: Option<String>) {
        self.entries[self.index] = url;
    }

    fn step_back(&mut self) {
        self.index = self.index.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const HOME: &str = "https://eksiseyler.com/";
    const A: &str = "https://eksiseyler.com/a";
    const B: &str = "https://eksiseyler.com/b";

    #[test]
    fn back_hidden_on_home_page_even_with_history() {
        let mut tracker = NavigationTracker::new(HOME);
        tracker.on_navigation_state(NavigationState::new("https://eksiseyler.com", true, 1.0));
        assert!(!tracker.can_go_back());
        assert_eq!(tracker.back_action(), BackAction::Exit);
    }

    #[test]
    fn back_offered_on_article_with_history() {
        let mut tracker = NavigationTracker::new(HOME);
        tracker.on_navigation_state(NavigationState::new(
            "https://eksiseyler.com/bir-yazi",
            true,
            0.4,
        ));
        assert!(tracker.can_go_back());
        assert_eq!(tracker.back_action(), BackAction::GoBack);
        assert!(tracker.back_action().consumes_key());
        assert!((tracker.progress() - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn nothing_reported_means_exit() {
        let tracker = NavigationTracker::new(HOME);
        assert_eq!(tracker.back_action(), BackAction::Exit);
        assert_eq!(tracker.current_url(), None);
    }

    #[test]
    fn back_offered_on_page_with_unknown_url() {
        let mut tracker = NavigationTracker::new(HOME);
        tracker.on_navigation_state(NavigationState::with_url(None, true, 1.0));
        assert_eq!(tracker.current_url(), None);
        assert_eq!(tracker.back_action(), BackAction::GoBack);
    }

    #[test]
    fn back_hidden_when_surface_history_returns_home() {
        let mut history = loaded_history();
        history.on_load_finished(Some(PendingNavigation::Push(HOME.to_string())), Some(1));
        assert!(!history.can_go_back());

        history.on_load_finished(None, Some(2));
        history.on_load_finished(Some(PendingNavigation::Push(HOME.to_string())), Some(3));
        assert!(history.can_go_back());

        let mut tracker = NavigationTracker::new(HOME);
        tracker.on_navigation_state(NavigationState::with_url(
            history.current().map(ToString::to_string),
            history.can_go_back(),
            1.0,
        ));
        assert_eq!(tracker.back_action(), BackAction::Exit);
    }

    /// History after the home page finished its first load in a session
    /// with one entry.
    fn loaded_history() -> History {
        let mut history = History::new(HOME);
        history.on_load_finished(None, Some(1));
        history
    }

    #[test]
    fn first_load_only_sets_baseline() {
        let history = loaded_history();
        assert_eq!(history.current(), Some(HOME));
        assert!(!history.can_go_back());
    }

    #[test]
    fn shell_navigations_push_and_back_returns() {
        let mut history = loaded_history();
        history.on_load_finished(Some(PendingNavigation::Push(A.to_string())), Some(2));
        history.on_load_finished(Some(PendingNavigation::Push(B.to_string())), Some(3));
        assert_eq!(history.current(), Some(B));
        assert_eq!(history.previous(), Some(A));

        history.on_load_finished(Some(PendingNavigation::Back), Some(3));
        assert_eq!(history.current(), Some(A));
        history.on_load_finished(Some(PendingNavigation::Back), Some(3));
        assert_eq!(history.current(), Some(HOME));
        assert!(!history.can_go_back());
    }

    #[test]
    fn link_followed_inside_page_is_recorded_with_unknown_url() {
        let mut history = loaded_history();
        history.on_load_finished(Some(PendingNavigation::Push(A.to_string())), Some(2));
        history.on_load_finished(None, Some(3));

        assert_eq!(history.current(), None);
        assert_eq!(history.depth(), 2);
        assert_eq!(history.previous(), Some(A));

        history.on_load_finished(Some(PendingNavigation::Back), Some(3));
        assert_eq!(history.current(), Some(A));
    }

    #[test]
    fn redirect_inside_page_replaces_current_entry() {
        let mut history = loaded_history();
        history.on_load_finished(Some(PendingNavigation::Push(A.to_string())), Some(2));
        history.on_load_finished(None, Some(2));

        assert_eq!(history.current(), None);
        assert_eq!(history.depth(), 1);
    }

    #[test]
    fn link_after_going_back_drops_forward_entries() {
        let mut history = loaded_history();
        history.on_load_finished(Some(PendingNavigation::Push(A.to_string())), Some(2));
        history.on_load_finished(Some(PendingNavigation::Push(B.to_string())), Some(3));
        history.on_load_finished(Some(PendingNavigation::Back), Some(3));
        history.on_load_finished(Some(PendingNavigation::Back), Some(3));
        assert_eq!(history.current(), Some(HOME));

        history.on_load_finished(None, Some(2));
        assert_eq!(history.current(), None);
        assert_eq!(history.depth(), 1);
        assert_eq!(history.previous(), Some(HOME));
    }

    #[test]
    fn theme_replacement_keeps_depth() {
        let mut history = loaded_history();
        history.on_load_finished(Some(PendingNavigation::Push(A.to_string())), Some(2));
        let themed = format!("{A}?theme=dark");
        history.on_load_finished(Some(PendingNavigation::Replace(themed.clone())), Some(2));

        assert_eq!(history.current(), Some(themed.as_str()));
        assert_eq!(history.depth(), 1);
        history.on_load_finished(Some(PendingNavigation::Back), Some(2));
        assert_eq!(history.current(), Some(HOME));
    }

    #[test]
    fn reopening_current_page_does_not_grow_history() {
        let mut history = loaded_history();
        history.on_load_finished(Some(PendingNavigation::Push(A.to_string())), Some(2));
        history.on_load_finished(Some(PendingNavigation::Push(format!("{A}/"))), Some(2));
        assert_eq!(history.depth(), 1);
    }

    #[test]
    fn back_that_never_happened_yields_to_new_entry() {
        let mut history = loaded_history();
        history.on_load_finished(Some(PendingNavigation::Push(A.to_string())), Some(2));
        history.on_load_finished(Some(PendingNavigation::Back), Some(3));
        assert_eq!(history.current(), None);
        assert_eq!(history.depth(), 2);
    }

    #[test]
    fn unreadable_session_length_falls_back_to_request() {
        let mut history = History::new(HOME);
        history.on_load_finished(None, None);
        history.on_load_finished(Some(PendingNavigation::Push(A.to_string())), None);
        history.on_load_finished(None, None);
        assert_eq!(history.depth(), 2);
        history.on_load_finished(Some(PendingNavigation::Back), None);
        assert_eq!(history.current(), Some(A));
    }

    #[test]
    fn observed_url_names_current_entry() {
        let mut history = loaded_history();
        history.on_load_finished(None, Some(2));
        history.observe_current_url(B);
        assert_eq!(history.current(), Some(B));
    }

    fn arb_url() -> impl Strategy<Value = String> {
        "[a-z]{3,10}".prop_map(|s| format!("https://eksiseyler.com/{s}"))
    }

    proptest! {
        #[test]
        fn back_all_the_way_ends_home(urls in proptest::collection::vec(arb_url(), 0..12)) {
            let mut history = loaded_history();
            let mut length = 1;
            for url in &urls {
                if history.current() != Some(url.as_str()) {
                    length += 1;
                }
                history.on_load_finished(Some(PendingNavigation::Push(url.clone())), Some(length));
            }
            while history.can_go_back() {
                history.on_load_finished(Some(PendingNavigation::Back), Some(length));
            }
            prop_assert_eq!(history.current(), Some(HOME));
            prop_assert_eq!(history.depth(), 0);
        }
    }
}
