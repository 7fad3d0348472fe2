//! Single-threaded event plumbing.
//!
//! Platform callbacks (appearance changes, page navigation) are delivered on
//! the UI thread. [`Listeners`] fans a value out to every subscriber and hands
//! back a [`Subscription`] guard that unregisters the callback when dropped,
//! so a component that owns its guards can never leave a dangling callback
//! behind after teardown.
//!
//! Callbacks are `Fn` so an emission may re-enter a callback that is already
//! running; callbacks keep their mutable state behind `Cell`/`RefCell`.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::models::{DevicePreference, NavigationState};

type Callback<T> = Rc<dyn Fn(&T)>;

struct Registry<T: 'static> {
    next_id: u64,
    entries: Vec<(u64, Callback<T>)>,
}

/// Listener registry for values of type `T`.
pub struct Listeners<T: 'static> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T: 'static> Listeners<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Register a callback. It stays registered until the returned guard is
    /// dropped or explicitly unsubscribed.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let callback: Callback<T> = Rc::new(callback);
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.entries.push((id, callback));
            id
        };

        let registry = Rc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry
                    .borrow_mut()
                    .entries
                    .retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    /// Deliver `value` to every registered callback.
    ///
    /// Iterates over a snapshot so callbacks may subscribe or unsubscribe
    /// while the emission is running. A callback removed mid-emission is not
    /// invoked afterwards.
    pub fn emit(&self, value: &T) {
        let snapshot: Vec<(u64, Callback<T>)> = self
            .registry
            .borrow()
            .entries
            .iter()
            .map(|(id, callback)| (*id, Rc::clone(callback)))
            .collect();

        for (id, callback) in snapshot {
            if !self.is_registered(id) {
                continue;
            }
            callback(value);
        }
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.registry.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_registered(&self, id: u64) -> bool {
        self.registry
            .borrow()
            .entries
            .iter()
            .any(|(entry_id, _)| *entry_id == id)
    }
}

impl<T: 'static> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Clone for Listeners<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<T: 'static> fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.len())
            .finish()
    }
}

/// Registration guard returned by [`Listeners::subscribe`].
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Unregister now instead of at drop time.
    pub fn unsubscribe(mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Source of the host's light/dark appearance.
pub trait PreferenceSource {
    /// Current appearance.
    fn current(&self) -> DevicePreference;

    /// Get notified on every appearance change.
    fn subscribe(&self, callback: Box<dyn Fn(DevicePreference)>) -> Subscription;
}

/// Preference source fed by the embedding platform.
///
/// The shell pushes whatever the platform reports through [`Self::set`];
/// listeners only hear about real changes.
#[derive(Debug, Default)]
pub struct ManualPreferenceSource {
    current: Cell<DevicePreference>,
    listeners: Listeners<DevicePreference>,
}

impl ManualPreferenceSource {
    pub fn new(initial: DevicePreference) -> Self {
        Self {
            current: Cell::new(initial),
            listeners: Listeners::new(),
        }
    }

    /// Record a platform report. Returns `true` when the value changed.
    pub fn set(&self, preference: DevicePreference) -> bool {
        if self.current.get() == preference {
            return false;
        }
        self.current.set(preference);
        tracing::debug!("Device preference changed to {}", preference);
        self.listeners.emit(&preference);
        true
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl PreferenceSource for ManualPreferenceSource {
    fn current(&self) -> DevicePreference {
        self.current.get()
    }

    fn subscribe(&self, callback: Box<dyn Fn(DevicePreference)>) -> Subscription {
        self.listeners
            .subscribe(move |preference: &DevicePreference| callback(*preference))
    }
}

/// Lifecycle notification from the embedded browser surface.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Navigation state or progress changed
    Navigation(NavigationState),
    /// A new document started loading
    LoadStarted { url: Option<String> },
    /// The current document finished loading
    LoadFinished { url: Option<String> },
}

/// Hub the shell emits page lifecycle events into.
pub type PageEvents = Listeners<PageEvent>;
