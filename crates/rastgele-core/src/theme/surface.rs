//! Embedded browser surface seam.

use std::rc::Rc;

use super::PageCommand;
use crate::error::{Error, Result};

/// The narrow slice of the embedded browser the synchronizer drives.
///
/// Both operations are fire-and-forget: `Ok` only means the request was
/// handed to the page, not that it took effect.
pub trait WebSurface {
    /// Run `script` in the context of the currently displayed page.
    fn evaluate_script(&self, script: &str) -> Result<()>;

    /// Load `url` in the surface.
    fn navigate(&self, url: &str) -> Result<()>;

    /// Dispatch a corrective action.
    fn execute(&self, command: &PageCommand) -> Result<()> {
        match command {
            PageCommand::Navigate { url } => self.navigate(url),
            _ => self.evaluate_script(&command.to_script()),
        }
    }
}

impl<S: WebSurface + ?Sized> WebSurface for Rc<S> {
    fn evaluate_script(&self, script: &str) -> Result<()> {
        (**self).evaluate_script(script)
    }

    fn navigate(&self, url: &str) -> Result<()> {
        (**self).navigate(url)
    }

    fn execute(&self, command: &PageCommand) -> Result<()> {
        (**self).execute(command)
    }
}

/// Owned reference to the surface with an explicit not-ready state.
///
/// The surface only exists once the platform has created the page view;
/// every use goes through [`Self::get`] which reports
/// [`Error::PageNotReady`] until then.
#[derive(Debug)]
pub struct SurfaceHandle<S> {
    surface: Option<S>,
}

impl<S> SurfaceHandle<S> {
    pub const fn not_ready() -> Self {
        Self { surface: None }
    }

    /// Install the surface, returning the one it replaces.
    pub fn attach(&mut self, surface: S) -> Option<S> {
        self.surface.replace(surface)
    }

    /// Drop back to the not-ready state.
    pub fn detach(&mut self) -> Option<S> {
        self.surface.take()
    }

    pub const fn is_ready(&self) -> bool {
        self.surface.is_some()
    }

    pub fn get(&self) -> Result<&S> {
        self.surface.as_ref().ok_or(Error::PageNotReady)
    }
}

impl<S> Default for SurfaceHandle<S> {
    fn default() -> Self {
        Self::not_ready()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    struct RecordingSurface {
        scripts: RefCell<Vec<String>>,
        urls: RefCell<Vec<String>>,
    }

    impl WebSurface for RecordingSurface {
        fn evaluate_script(&self, script: &str) -> Result<()> {
            self.scripts.borrow_mut().push(script.to_string());
            Ok(())
        }

        fn navigate(&self, url: &str) -> Result<()> {
            self.urls.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    #[test]
    fn handle_starts_not_ready() {
        let handle = SurfaceHandle::<RecordingSurface>::not_ready();
        assert!(!handle.is_ready());
        assert!(matches!(handle.get(), Err(Error::PageNotReady)));
    }

    #[test]
    fn attach_and_detach_toggle_readiness() {
        let mut handle = SurfaceHandle::not_ready();
        assert!(handle.attach(RecordingSurface::default()).is_none());
        assert!(handle.is_ready());
        assert!(handle.detach().is_some());
        assert!(!handle.is_ready());
    }

    #[test]
    fn default_execute_routes_navigation_and_scripts() {
        let surface = RecordingSurface::default();
        surface
            .execute(&PageCommand::Navigate {
                url: "https://eksiseyler.com/?theme=dark".to_string(),
            })
            .unwrap();
        surface
            .execute(&PageCommand::RemoveStyles {
                element_id: "override".to_string(),
            })
            .unwrap();

        assert_eq!(
            *surface.urls.borrow(),
            vec!["https://eksiseyler.com/?theme=dark".to_string()]
        );
        assert_eq!(surface.scripts.borrow().len(), 1);
        assert!(surface.scripts.borrow()[0].contains("\"override\""));
    }
}
