//! Corrective actions and their in-page scripts.

use url::Url;

use super::{ThemeStrategy, ThemeTargets};
use crate::error::{Error, Result};
use crate::models::DevicePreference;
use crate::util::js_string;

/// Style sheet forcing a dark presentation on a light-only page.
///
/// Inverts the document and flips media back so images keep their colors.
pub const DARK_OVERRIDE_CSS: &str = "html { filter: invert(1) hue-rotate(180deg) !important; background: #111111 !important; }
img, video, picture, canvas, iframe, svg, [style*=\"background-image\"] { filter: invert(1) hue-rotate(180deg) !important; }";

const CLICK_CONTROL_SCRIPT: &str = r#"
(() => {
    const control = document.querySelector(__SELECTOR__);
    if (!control) {
        return "missing";
    }
    const isDark = document.querySelector(__DARK_SELECTOR__) !== null;
    if (isDark === __WANT_DARK__) {
        return "unchanged";
    }
    control.click();
    return "clicked";
})();
"#;

const INJECT_STYLES_SCRIPT: &str = r#"
(() => {
    const id = __ID__;
    let style = document.getElementById(id);
    if (!style) {
        style = document.createElement("style");
        style.id = id;
        (document.head || document.documentElement).appendChild(style);
    }
    style.textContent = __CSS__;
    return "applied";
})();
"#;

const REMOVE_STYLES_SCRIPT: &str = r#"
(() => {
    const style = document.getElementById(__ID__);
    if (!style) {
        return "absent";
    }
    style.remove();
    return "removed";
})();
"#;

/// A single corrective action against the embedded page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCommand {
    /// Load a different URL
    Navigate { url: String },
    /// Click the theme switch unless the page already shows the wanted theme
    ClickControl {
        selector: String,
        dark_active_selector: String,
        want_dark: bool,
    },
    /// Insert or replace the override style element
    InjectStyles { element_id: String, css: String },
    /// Remove the override style element if present
    RemoveStyles { element_id: String },
}

impl PageCommand {
    /// Render the command as a self-contained script.
    ///
    /// Every script is guarded so it neither throws on a page with an
    /// unexpected structure nor compounds when run twice.
    pub fn to_script(&self) -> String {
        match self {
            Self::Navigate { url } => format!("window.location.assign({});", js_string(url)),
            Self::ClickControl {
                selector,
                dark_active_selector,
                want_dark,
            } => CLICK_CONTROL_SCRIPT
                .replace("__SELECTOR__", &js_string(selector))
                .replace("__DARK_SELECTOR__", &js_string(dark_active_selector))
                .replace("__WANT_DARK__", if *want_dark { "true" } else { "false" }),
            Self::InjectStyles { element_id, css } => INJECT_STYLES_SCRIPT
                .replace("__ID__", &js_string(element_id))
                .replace("__CSS__", &js_string(css)),
            Self::RemoveStyles { element_id } => {
                REMOVE_STYLES_SCRIPT.replace("__ID__", &js_string(element_id))
            }
        }
    }
}

/// Decide what has to happen for the page to match `preference`.
///
/// `Ok(None)` means the page is already in the wanted state and nothing needs
/// to be dispatched.
pub fn plan_corrective_action(
    strategy: ThemeStrategy,
    targets: &ThemeTargets,
    preference: DevicePreference,
    current_url: Option<&str>,
) -> Result<Option<PageCommand>> {
    match strategy {
        ThemeStrategy::NavigateToThemeUrl => {
            let current = current_url.ok_or(Error::PageNotReady)?;
            if carries_theme(current, &targets.theme_query_param, preference) {
                return Ok(None);
            }
            let url = theme_url(current, &targets.theme_query_param, preference)?;
            Ok(Some(PageCommand::Navigate { url }))
        }
        ThemeStrategy::ClickThemeControl => Ok(Some(PageCommand::ClickControl {
            selector: targets.control_selector.clone(),
            dark_active_selector: targets.dark_active_selector.clone(),
            want_dark: preference.is_dark(),
        })),
        ThemeStrategy::OverrideStyles => {
            let element_id = targets.style_element_id.clone();
            Ok(Some(match preference {
                DevicePreference::Dark => PageCommand::InjectStyles {
                    element_id,
                    css: DARK_OVERRIDE_CSS.to_string(),
                },
                DevicePreference::Light => PageCommand::RemoveStyles { element_id },
            }))
        }
    }
}

/// Rewrite `current` so its theme query parameter selects `preference`.
///
/// Other query parameters keep their order; an existing theme value is
/// replaced rather than duplicated.
pub fn theme_url(current: &str, param: &str, preference: DevicePreference) -> Result<String> {
    let mut url = Url::parse(current.trim())
        .map_err(|error| Error::InvalidInput(format!("Invalid page URL {current}: {error}")))?;

    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != param)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair(param, preference.as_str());

    Ok(url.into())
}

fn carries_theme(current: &str, param: &str, preference: DevicePreference) -> bool {
    Url::parse(current.trim()).is_ok_and(|url| {
        url.query_pairs()
            .any(|(key, value)| key == param && value == preference.as_str())
    })
}
