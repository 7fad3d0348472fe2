//! Binds a [`ThemeSynchronizer`] to its event sources for its lifetime.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use super::{SyncOutcome, ThemeSynchronizer, WebSurface};
use crate::error::{Error, Result};
use crate::events::{PageEvent, PageEvents, PreferenceSource, Subscription};
use crate::models::DevicePreference;

enum SyncEvent {
    Preference(DevicePreference),
    Page(PageEvent),
    Resync,
}

/// Serializes events into the synchronizer.
///
/// A corrective action may make the surface report page events
/// synchronously (a navigation starting, say). Those land in the queue and
/// are handled after the current event instead of re-entering the
/// synchronizer while it is borrowed.
struct Dispatcher<S: 'static> {
    synchronizer: Rc<RefCell<ThemeSynchronizer<S>>>,
    queue: RefCell<VecDeque<SyncEvent>>,
    draining: Cell<bool>,
    last_outcome: RefCell<Option<SyncOutcome>>,
}

impl<S: WebSurface + 'static> Dispatcher<S> {
    fn deliver(&self, event: SyncEvent) {
        self.queue.borrow_mut().push_back(event);
        if self.draining.replace(true) {
            return;
        }

        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(event) = next else {
                break;
            };
            let outcome = {
                let mut synchronizer = self.synchronizer.borrow_mut();
                handle(&mut synchronizer, event)
            };
            if let Some(outcome) = outcome {
                *self.last_outcome.borrow_mut() = Some(outcome);
            }
        }

        self.draining.set(false);
    }
}

fn handle<S: WebSurface>(
    synchronizer: &mut ThemeSynchronizer<S>,
    event: SyncEvent,
) -> Option<SyncOutcome> {
    match event {
        SyncEvent::Preference(preference) => Some(synchronizer.on_preference_changed(preference)),
        SyncEvent::Page(PageEvent::Navigation(state)) => {
            synchronizer.on_navigation_state(&state);
            None
        }
        SyncEvent::Page(PageEvent::LoadStarted { url }) => {
            synchronizer.on_load_started(url.as_deref());
            None
        }
        SyncEvent::Page(PageEvent::LoadFinished { url }) => {
            Some(synchronizer.on_load_finished(url.as_deref()))
        }
        SyncEvent::Resync => Some(synchronizer.resync()),
    }
}

/// Live wiring between a synchronizer, a preference source and the page
/// event hub.
///
/// Both subscriptions are owned by the session and released when it is
/// closed or dropped.
pub struct ThemeSyncSession<S: 'static> {
    dispatcher: Rc<Dispatcher<S>>,
    subscriptions: Vec<Subscription>,
}

impl<S: WebSurface + 'static> ThemeSyncSession<S> {
    /// Subscribe `synchronizer` to `preferences` and `page_events`.
    ///
    /// The source's current value is delivered first, so a preference that
    /// changed before the session existed is not lost.
    pub fn start(
        synchronizer: ThemeSynchronizer<S>,
        preferences: &dyn PreferenceSource,
        page_events: &PageEvents,
    ) -> Self {
        let dispatcher = Rc::new(Dispatcher {
            synchronizer: Rc::new(RefCell::new(synchronizer)),
            queue: RefCell::new(VecDeque::new()),
            draining: Cell::new(false),
            last_outcome: RefCell::new(None),
        });

        let preference_dispatcher = Rc::downgrade(&dispatcher);
        let preference_subscription = preferences.subscribe(Box::new(move |preference| {
            if let Some(dispatcher) = preference_dispatcher.upgrade() {
                dispatcher.deliver(SyncEvent::Preference(preference));
            }
        }));

        let page_dispatcher = Rc::downgrade(&dispatcher);
        let page_subscription = page_events.subscribe(move |event: &PageEvent| {
            if let Some(dispatcher) = page_dispatcher.upgrade() {
                dispatcher.deliver(SyncEvent::Page(event.clone()));
            }
        });

        dispatcher.deliver(SyncEvent::Preference(preferences.current()));
        tracing::info!("Theme sync session started");

        Self {
            dispatcher,
            subscriptions: vec![preference_subscription, page_subscription],
        }
    }

    /// Install the page view and re-apply if a document is already loaded.
    ///
    /// Fails instead of panicking when called from inside a surface callback.
    pub fn attach_surface(&self, surface: S) -> Result<Option<SyncOutcome>> {
        self.dispatcher
            .synchronizer
            .try_borrow_mut()
            .map_err(|_| Error::InvalidInput("surface attached during dispatch".to_string()))?
            .attach_surface(surface);
        self.dispatcher.deliver(SyncEvent::Resync);
        Ok(self.last_outcome())
    }

    /// Release the page view.
    pub fn detach_surface(&self) -> Result<Option<S>> {
        Ok(self
            .dispatcher
            .synchronizer
            .try_borrow_mut()
            .map_err(|_| Error::InvalidInput("surface detached during dispatch".to_string()))?
            .detach_surface())
    }

    /// Outcome of the most recent application attempt.
    pub fn last_outcome(&self) -> Option<SyncOutcome> {
        self.dispatcher.last_outcome.borrow().clone()
    }

    /// Inspect the synchronizer state.
    pub fn with_synchronizer<R>(&self, inspect: impl FnOnce(&ThemeSynchronizer<S>) -> R) -> R {
        inspect(&self.dispatcher.synchronizer.borrow())
    }

    pub fn is_active(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Unsubscribe from both sources. Dropping the session does the same.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.subscriptions.is_empty() {
            tracing::info!("Theme sync session closed");
        }
        self.subscriptions.clear();
    }
}

impl<S: 'static> Drop for ThemeSyncSession<S> {
    fn drop(&mut self) {
        self.subscriptions.clear();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::events::ManualPreferenceSource;
    use crate::theme::test_support::FakePage;
    use crate::theme::{SkipReason, ThemeStrategy, ThemeTargets};

    const HOME: &str = "https://eksiseyler.com/";

    fn session(
        strategy: ThemeStrategy,
        source: &ManualPreferenceSource,
        events: &PageEvents,
    ) -> ThemeSyncSession<Rc<FakePage>> {
        let synchronizer =
            ThemeSynchronizer::new(strategy, ThemeTargets::default(), DevicePreference::Light);
        ThemeSyncSession::start(synchronizer, source, events)
    }

    fn finished(url: &str) -> PageEvent {
        PageEvent::LoadFinished {
            url: Some(url.to_string()),
        }
    }

    #[test]
    fn start_picks_up_current_source_value() {
        let source = ManualPreferenceSource::new(DevicePreference::Dark);
        let events = PageEvents::new();
        let session = session(ThemeStrategy::OverrideStyles, &source, &events);

        assert_eq!(
            session.with_synchronizer(ThemeSynchronizer::preference),
            DevicePreference::Dark
        );
        assert_eq!(session.last_outcome(), Some(SyncOutcome::Deferred));
    }

    #[test]
    fn events_flow_through_session() {
        let source = ManualPreferenceSource::new(DevicePreference::Light);
        let events = PageEvents::new();
        let page = Rc::new(FakePage::new(HOME));
        let session = session(ThemeStrategy::OverrideStyles, &source, &events);
        session.attach_surface(Rc::clone(&page)).unwrap();

        source.set(DevicePreference::Dark);
        assert_eq!(page.command_count(), 0);

        events.emit(&finished(HOME));
        assert_eq!(
            session.last_outcome(),
            Some(SyncOutcome::Applied(DevicePreference::Dark))
        );
        assert_eq!(page.command_count(), 1);

        source.set(DevicePreference::Light);
        assert_eq!(page.command_count(), 2);
        assert!(page.snapshot().style_elements.is_empty());
    }

    #[test]
    fn attach_after_load_applies_immediately() {
        let source = ManualPreferenceSource::new(DevicePreference::Dark);
        let events = PageEvents::new();
        let session = session(ThemeStrategy::OverrideStyles, &source, &events);

        events.emit(&finished(HOME));
        assert_eq!(
            session.last_outcome(),
            Some(SyncOutcome::Skipped(SkipReason::PageNotReady))
        );

        let page = Rc::new(FakePage::new(HOME));
        assert_eq!(
            session.attach_surface(Rc::clone(&page)).unwrap(),
            Some(SyncOutcome::Applied(DevicePreference::Dark))
        );
        assert_eq!(page.command_count(), 1);
    }

    #[test]
    fn dropping_session_unsubscribes_everything() {
        let source = ManualPreferenceSource::new(DevicePreference::Light);
        let events = PageEvents::new();
        let page = Rc::new(FakePage::new(HOME));
        {
            let session = session(ThemeStrategy::OverrideStyles, &source, &events);
            session.attach_surface(Rc::clone(&page)).unwrap();
            assert_eq!(source.listener_count(), 1);
            assert_eq!(events.len(), 1);
        }

        assert_eq!(source.listener_count(), 0);
        assert!(events.is_empty());
        events.emit(&finished(HOME));
        source.set(DevicePreference::Dark);
        assert_eq!(page.command_count(), 0);
    }

    #[test]
    fn close_unsubscribes_explicitly() {
        let source = ManualPreferenceSource::new(DevicePreference::Light);
        let events = PageEvents::new();
        let session = session(ThemeStrategy::OverrideStyles, &source, &events);
        assert!(session.is_active());
        session.close();
        assert_eq!(source.listener_count(), 0);
        assert!(events.is_empty());
    }

    #[test]
    fn reentrant_page_events_are_queued() {
        let source = ManualPreferenceSource::new(DevicePreference::Dark);
        let events = PageEvents::new();
        let page = Rc::new(FakePage::new(HOME));
        page.emit_on_navigate(events.clone());

        let session = session(ThemeStrategy::NavigateToThemeUrl, &source, &events);
        session.attach_surface(Rc::clone(&page)).unwrap();

        events.emit(&finished(HOME));

        assert_eq!(page.snapshot().url, "https://eksiseyler.com/?theme=dark");
        assert_eq!(page.command_count(), 1);
        assert_eq!(session.last_outcome(), Some(SyncOutcome::AlreadyInSync));
        assert_eq!(
            session.with_synchronizer(|sync| sync.current_url().map(ToString::to_string)),
            Some("https://eksiseyler.com/?theme=dark".to_string())
        );
    }
}
