//! Theme synchronization between the device appearance and the embedded page.
//!
//! The embedded site ships its own light/dark presentation that resets on
//! every navigation. [`ThemeSynchronizer`] re-applies a corrective action
//! whenever a document finishes loading or the device appearance changes
//! while a document is loaded. How the correction is performed is decided
//! once per build through [`ThemeStrategy`].

mod command;
mod session;
mod surface;
mod sync;

#[cfg(test)]
pub(crate) mod test_support;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use command::{plan_corrective_action, theme_url, PageCommand, DARK_OVERRIDE_CSS};
pub use session::ThemeSyncSession;
pub use surface::{SurfaceHandle, WebSurface};
pub use sync::{SkipReason, SyncOutcome, ThemeSynchronizer};

/// How the embedded page is brought in line with the device appearance.
///
/// Only [`ThemeStrategy::NavigateToThemeUrl`] works on a page from another
/// origin; the script-based strategies need a surface that can run script
/// inside the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeStrategy {
    /// Reload the page with a theme query parameter
    #[default]
    NavigateToThemeUrl,
    /// Click the site's own theme switch when it disagrees
    ClickThemeControl,
    /// Inject (or strip) a style sheet that forces a dark presentation
    OverrideStyles,
}

impl ThemeStrategy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NavigateToThemeUrl => "navigate-to-theme-url",
            Self::ClickThemeControl => "click-theme-control",
            Self::OverrideStyles => "override-styles",
        }
    }
}

impl FromStr for ThemeStrategy {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "navigate-to-theme-url" => Ok(Self::NavigateToThemeUrl),
            "click-theme-control" => Ok(Self::ClickThemeControl),
            "override-styles" => Ok(Self::OverrideStyles),
            other => Err(Error::InvalidInput(format!("Unknown theme strategy: {other}"))),
        }
    }
}

/// Page-specific hooks used by the strategies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeTargets {
    /// Query parameter carrying `light`/`dark` for [`ThemeStrategy::NavigateToThemeUrl`]
    pub theme_query_param: String,
    /// Selector of the site's theme switch
    pub control_selector: String,
    /// Selector that matches only while the site renders its dark theme
    pub dark_active_selector: String,
    /// Id of the injected override `<style>` element
    pub style_element_id: String,
}

impl Default for ThemeTargets {
    fn default() -> Self {
        Self {
            theme_query_param: "theme".to_string(),
            control_selector: ".theme-switch".to_string(),
            dark_active_selector: "html.dark, body.dark".to_string(),
            style_element_id: "rastgele-theme-override".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&ThemeStrategy::ClickThemeControl).unwrap(),
            "\"click-theme-control\""
        );
        assert_eq!(ThemeStrategy::default(), ThemeStrategy::NavigateToThemeUrl);
    }

    #[test]
    fn strategy_parses_configuration_tokens() {
        assert_eq!(
            " Override-Styles ".parse::<ThemeStrategy>().unwrap(),
            ThemeStrategy::OverrideStyles
        );
        for strategy in [
            ThemeStrategy::NavigateToThemeUrl,
            ThemeStrategy::ClickThemeControl,
            ThemeStrategy::OverrideStyles,
        ] {
            assert_eq!(strategy.as_str().parse::<ThemeStrategy>().unwrap(), strategy);
        }
        assert!(matches!(
            "invert".parse::<ThemeStrategy>(),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn targets_fill_missing_fields_with_defaults() {
        let targets: ThemeTargets =
            serde_json::from_str(r##"{ "control_selector": "#night-mode" }"##).unwrap();
        assert_eq!(targets.control_selector, "#night-mode");
        assert_eq!(targets.theme_query_param, "theme");
    }
}
