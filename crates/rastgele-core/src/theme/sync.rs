//! Theme synchronizer state machine.

use super::{plan_corrective_action, SurfaceHandle, ThemeStrategy, ThemeTargets, WebSurface};
use crate::error::Error;
use crate::models::{DevicePreference, NavigationState, PageLoadState};

/// Why an application attempt was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No surface yet, or no URL to work from
    PageNotReady,
    /// The page lacks the element the strategy relies on
    TargetMissing(String),
    /// The surface refused the command
    Surface(String),
}

impl From<Error> for SkipReason {
    fn from(error: Error) -> Self {
        match error {
            Error::PageNotReady => Self::PageNotReady,
            Error::TargetMissing(selector) => Self::TargetMissing(selector),
            other => Self::Surface(other.to_string()),
        }
    }
}

/// Result of a triggering event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// A corrective action for the given preference was dispatched
    Applied(DevicePreference),
    /// Nothing to do: the preference did not change, or the page already
    /// matches it
    AlreadyInSync,
    /// No document is loaded; the latest preference waits for the next load
    Deferred,
    /// The attempt was dropped; the next load or change tries again
    Skipped(SkipReason),
}

/// Keeps the embedded page's theme in agreement with the device preference.
///
/// Callers feed it platform events; it decides when the corrective action of
/// its [`ThemeStrategy`] has to run. Failures never escape: they come back
/// as [`SyncOutcome::Skipped`] and are logged at debug level.
#[derive(Debug)]
pub struct ThemeSynchronizer<S> {
    strategy: ThemeStrategy,
    targets: ThemeTargets,
    surface: SurfaceHandle<S>,
    preference: DevicePreference,
    page_state: PageLoadState,
    current_url: Option<String>,
    applied: Option<DevicePreference>,
}

impl<S: WebSurface> ThemeSynchronizer<S> {
    pub fn new(
        strategy: ThemeStrategy,
        targets: ThemeTargets,
        initial_preference: DevicePreference,
    ) -> Self {
        Self {
            strategy,
            targets,
            surface: SurfaceHandle::not_ready(),
            preference: initial_preference,
            page_state: PageLoadState::NotLoaded,
            current_url: None,
            applied: None,
        }
    }

    pub const fn strategy(&self) -> ThemeStrategy {
        self.strategy
    }

    pub const fn preference(&self) -> DevicePreference {
        self.preference
    }

    pub const fn page_state(&self) -> PageLoadState {
        self.page_state
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    /// Preference last applied to the current document, if any.
    pub const fn applied_preference(&self) -> Option<DevicePreference> {
        self.applied
    }

    pub const fn has_surface(&self) -> bool {
        self.surface.is_ready()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.get().ok()
    }

    /// Install the page view once the platform created it.
    ///
    /// Does not apply anything by itself; call [`Self::resync`] if a
    /// document may already be loaded.
    pub fn attach_surface(&mut self, surface: S) -> Option<S> {
        tracing::debug!("Theme synchronizer surface attached");
        self.surface.attach(surface)
    }

    /// Release the page view, e.g. when it is torn down.
    pub fn detach_surface(&mut self) -> Option<S> {
        tracing::debug!("Theme synchronizer surface detached");
        self.applied = None;
        self.surface.detach()
    }

    /// Record a navigation/progress snapshot.
    ///
    /// Incomplete progress on a loaded page means a new document is on its
    /// way, which resets whatever the previous document had applied.
    pub fn on_navigation_state(&mut self, state: &NavigationState) {
        self.current_url.clone_from(&state.url);
        if !state.is_complete() && self.page_state != PageLoadState::Loading {
            self.begin_loading();
        }
    }

    /// A navigation began. `None` means its destination is not known.
    pub fn on_load_started(&mut self, url: Option<&str>) {
        self.current_url = url.map(ToString::to_string);
        self.begin_loading();
    }

    /// A document finished loading: always re-apply, since a fresh document
    /// comes up in the site's default theme.
    ///
    /// `None` means the surface could not read the document's URL; a
    /// previously known URL is not carried over to the new document.
    pub fn on_load_finished(&mut self, url: Option<&str>) -> SyncOutcome {
        self.current_url = url.map(ToString::to_string);
        self.page_state = PageLoadState::Loaded;
        self.apply()
    }

    /// The device preference was reported.
    ///
    /// Changes arriving while no document is loaded only update the stored
    /// value, so a burst of changes collapses to the latest one.
    pub fn on_preference_changed(&mut self, preference: DevicePreference) -> SyncOutcome {
        if preference == self.preference {
            return SyncOutcome::AlreadyInSync;
        }
        self.preference = preference;

        if self.page_state == PageLoadState::Loaded {
            self.apply()
        } else {
            tracing::debug!(
                "Deferring {} theme until the page finishes loading",
                preference
            );
            SyncOutcome::Deferred
        }
    }

    /// Re-apply the current preference if a document is loaded.
    pub fn resync(&mut self) -> SyncOutcome {
        if self.page_state == PageLoadState::Loaded {
            self.apply()
        } else {
            SyncOutcome::Deferred
        }
    }

    fn begin_loading(&mut self) {
        self.page_state = PageLoadState::Loading;
        self.applied = None;
    }

    fn apply(&mut self) -> SyncOutcome {
        let preference = self.preference;

        let surface = match self.surface.get() {
            Ok(surface) => surface,
            Err(error) => return skipped(preference, error),
        };

        let command = match plan_corrective_action(
            self.strategy,
            &self.targets,
            preference,
            self.current_url.as_deref(),
        ) {
            Ok(Some(command)) => command,
            Ok(None) => {
                self.applied = Some(preference);
                return SyncOutcome::AlreadyInSync;
            }
            Err(error) => return skipped(preference, error),
        };

        match surface.execute(&command) {
            Ok(()) => {
                tracing::debug!("Applied {} theme via {:?}", preference, self.strategy);
                self.applied = Some(preference);
                SyncOutcome::Applied(preference)
            }
            Err(error) => skipped(preference, error),
        }
    }
}

fn skipped(preference: DevicePreference, error: Error) -> SyncOutcome {
    tracing::debug!("Skipping {} theme application: {}", preference, error);
    SyncOutcome::Skipped(SkipReason::from(error))
}
