//! In-memory stand-in for an embedded page.
//!
//! Interprets [`PageCommand`]s structurally so tests can compare the page's
//! effective visual state before and after corrective actions.

use std::cell::RefCell;

use super::{PageCommand, WebSurface};
use crate::error::{Error, Result};
use crate::events::{PageEvent, PageEvents};

/// Observable visual state of the fake page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageSnapshot {
    pub url: String,
    /// `(element id, css)` of injected style elements, in document order
    pub style_elements: Vec<(String, String)>,
    /// Whether the site's own dark theme is active
    pub native_dark: bool,
}

#[derive(Debug, Default)]
pub struct FakePage {
    snapshot: RefCell<PageSnapshot>,
    has_control: RefCell<bool>,
    commands: RefCell<Vec<PageCommand>>,
    clicks: RefCell<usize>,
    cross_origin: RefCell<bool>,
    emit_on_navigate: RefCell<Option<PageEvents>>,
}

impl FakePage {
    pub fn new(url: &str) -> Self {
        let page = Self::default();
        page.snapshot.borrow_mut().url = url.to_string();
        *page.has_control.borrow_mut() = true;
        page
    }

    /// Page without the site's theme switch.
    pub fn without_control(url: &str) -> Self {
        let page = Self::new(url);
        *page.has_control.borrow_mut() = false;
        page
    }

    /// Page hosted on another origin: location writes work, scripts do not.
    pub fn cross_origin(url: &str) -> Self {
        let page = Self::new(url);
        *page.cross_origin.borrow_mut() = true;
        page
    }

    pub fn set_has_control(&self, has_control: bool) {
        *self.has_control.borrow_mut() = has_control;
    }

    /// Emit load events into `events` synchronously whenever a navigation
    /// is requested, the way some platform views do.
    pub fn emit_on_navigate(&self, events: PageEvents) {
        *self.emit_on_navigate.borrow_mut() = Some(events);
    }

    pub fn snapshot(&self) -> PageSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn commands(&self) -> Vec<PageCommand> {
        self.commands.borrow().clone()
    }

    pub fn command_count(&self) -> usize {
        self.commands.borrow().len()
    }

    pub fn clicks(&self) -> usize {
        *self.clicks.borrow()
    }
}

impl WebSurface for FakePage {
    fn evaluate_script(&self, _script: &str) -> Result<()> {
        Ok(())
    }

    fn navigate(&self, url: &str) -> Result<()> {
        {
            let mut snapshot = self.snapshot.borrow_mut();
            snapshot.url = url.to_string();
            snapshot.style_elements.clear();
        }
        let events = self.emit_on_navigate.borrow().clone();
        if let Some(events) = events {
            events.emit(&PageEvent::LoadStarted {
                url: Some(url.to_string()),
            });
            events.emit(&PageEvent::LoadFinished {
                url: Some(url.to_string()),
            });
        }
        Ok(())
    }

    fn execute(&self, command: &PageCommand) -> Result<()> {
        if *self.cross_origin.borrow() && !matches!(command, PageCommand::Navigate { .. }) {
            return Err(Error::Script("blocked by origin".to_string()));
        }
        self.commands.borrow_mut().push(command.clone());
        match command {
            PageCommand::Navigate { url } => self.navigate(url),
            PageCommand::ClickControl {
                selector,
                want_dark,
                ..
            } => {
                if !*self.has_control.borrow() {
                    return Err(Error::TargetMissing(selector.clone()));
                }
                let mut snapshot = self.snapshot.borrow_mut();
                if snapshot.native_dark != *want_dark {
                    snapshot.native_dark = !snapshot.native_dark;
                    *self.clicks.borrow_mut() += 1;
                }
                Ok(())
            }
            PageCommand::InjectStyles { element_id, css } => {
                let mut snapshot = self.snapshot.borrow_mut();
                if let Some(existing) = snapshot
                    .style_elements
                    .iter_mut()
                    .find(|(id, _)| id == element_id)
                {
                    existing.1.clone_from(css);
                } else {
                    snapshot
                        .style_elements
                        .push((element_id.clone(), css.clone()));
                }
                Ok(())
            }
            PageCommand::RemoveStyles { element_id } => {
                self.snapshot
                    .borrow_mut()
                    .style_elements
                    .retain(|(id, _)| id != element_id);
                Ok(())
            }
        }
    }
}
