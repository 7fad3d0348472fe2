//! Page frame plumbing: navigation signals and the theme surface.

use dioxus::document;
use dioxus::prelude::*;
use rastgele_core::events::{PageEvent, PageEvents};
use rastgele_core::navigation::{BackAction, History, NavigationTracker, PendingNavigation};
use rastgele_core::theme::WebSurface;
use rastgele_core::{NavigationState, Result};

use crate::frame::{
    assign_script, frame_script, replace_script, report_script, FrameReport, HISTORY_BACK_SCRIPT,
};

/// Progress shown as soon as a navigation is requested.
const STARTED_FRACTION: f64 = 0.1;

/// Drives the page frame and reports its lifecycle to the page event hub.
///
/// Loads the page starts on its own are only noticed when the frame's
/// `load` event arrives; [`History`] works out what kind of navigation it
/// was.
#[derive(Clone)]
pub struct ShellNavigator {
    history: Signal<History>,
    tracker: Signal<NavigationTracker>,
    pending: Signal<Option<PendingNavigation>>,
    last_report: Signal<Option<FrameReport>>,
    page_events: PageEvents,
}

impl ShellNavigator {
    pub const fn new(
        history: Signal<History>,
        tracker: Signal<NavigationTracker>,
        pending: Signal<Option<PendingNavigation>>,
        last_report: Signal<Option<FrameReport>>,
        page_events: PageEvents,
    ) -> Self {
        Self {
            history,
            tracker,
            pending,
            last_report,
            page_events,
        }
    }

    /// Load `url` in the frame as a new history entry.
    pub fn open(&self, url: &str) {
        self.request(PendingNavigation::Push(url.to_string()), Some(url.to_string()));
        _ = document::eval(&assign_script(url));
    }

    /// Load `url` in place of the current entry.
    pub fn replace(&self, url: &str) {
        self.request(
            PendingNavigation::Replace(url.to_string()),
            Some(url.to_string()),
        );
        _ = document::eval(&replace_script(url));
    }

    /// Go back one entry. Returns `false` when there is nothing to go back to.
    pub fn go_back(&self) -> bool {
        let previous = {
            let history = self.history.peek();
            if !history.can_go_back() {
                return false;
            }
            history.previous().map(ToString::to_string)
        };
        self.request(PendingNavigation::Back, previous);
        _ = document::eval(HISTORY_BACK_SCRIPT);
        true
    }

    pub fn back_action(&self) -> BackAction {
        self.tracker.peek().back_action()
    }

    /// URL of the page on screen, if the shell knows it.
    pub fn current_url(&self) -> Option<String> {
        self.tracker.peek().current_url().map(ToString::to_string)
    }

    /// The frame fired its `load` event and `report` describes it.
    pub fn finish_load(&self, report: FrameReport) {
        let pending = {
            let mut pending = self.pending;
            pending.write().take()
        };
        {
            let mut history = self.history;
            let mut history = history.write();
            history.on_load_finished(pending, report.history_length);
            if let Some(url) = report.page_url() {
                history.observe_current_url(url);
            }
        }
        let url = self.history.peek().current().map(ToString::to_string);
        tracing::debug!(
            "Page frame loaded {}",
            url.as_deref().unwrap_or("an unreadable location")
        );

        let mut last_report = self.last_report;
        last_report.set(Some(report));
        self.report(url.clone(), 1.0);
        self.page_events.emit(&PageEvent::LoadFinished { url });
    }

    /// Whether scripts posted into the frame reach its document.
    pub fn ensure_script_access(&self) -> Result<()> {
        self.last_report
            .peek()
            .clone()
            .unwrap_or_default()
            .ensure_script_access()
    }

    fn request(&self, navigation: PendingNavigation, url: Option<String>) {
        let mut pending = self.pending;
        pending.set(Some(navigation));
        self.page_events
            .emit(&PageEvent::LoadStarted { url: url.clone() });
        self.report(url, STARTED_FRACTION);
    }

    fn report(&self, url: Option<String>, load_fraction: f64) {
        let state =
            NavigationState::with_url(url, self.history.peek().can_go_back(), load_fraction);
        let mut tracker = self.tracker;
        tracker.write().on_navigation_state(state.clone());
        self.page_events.emit(&PageEvent::Navigation(state));
    }
}

/// Ask the shell document what it can see of the frame.
pub async fn read_frame_report() -> FrameReport {
    match document::eval(&report_script()).join::<FrameReport>().await {
        Ok(report) => report,
        Err(error) => {
            tracing::debug!("Could not read page frame state: {}", error);
            FrameReport::default()
        }
    }
}

/// [`WebSurface`] backed by the page frame.
///
/// Scripts are posted into the frame without waiting for a reply, and only
/// while the frame's document is reachable from the shell.
pub struct FrameSurface {
    navigator: ShellNavigator,
}

impl FrameSurface {
    pub const fn new(navigator: ShellNavigator) -> Self {
        Self { navigator }
    }
}

impl WebSurface for FrameSurface {
    fn evaluate_script(&self, script: &str) -> Result<()> {
        self.navigator.ensure_script_access()?;
        _ = document::eval(&frame_script(script));
        Ok(())
    }

    /// Theme navigations replace the current entry, so going back skips the
    /// unthemed copy of the page.
    fn navigate(&self, url: &str) -> Result<()> {
        self.navigator.replace(url);
        Ok(())
    }
}
