//! Scripts that drive the page frame from the shell document.
#![cfg_attr(not(target_os = "android"), allow(dead_code))]

use rastgele_core::util::{is_http_url, js_string};
use rastgele_core::{Error, Result};
use serde::Deserialize;

/// Element id of the frame hosting the site.
pub const FRAME_ID: &str = "rastgele-page";

const FRAME_EVAL_SCRIPT: &str = r#"
(() => {
    const frame = document.getElementById(__FRAME_ID__);
    if (!frame || !frame.contentWindow) {
        return "not-ready";
    }
    try {
        return frame.contentWindow.eval(__SCRIPT__);
    } catch (error) {
        return "blocked";
    }
})();
"#;

// Cross-origin windows only expose the `location.href` setter and
// `location.replace`, so navigation sticks to those two.
const FRAME_ASSIGN_SCRIPT: &str = r#"
const frame = document.getElementById(__FRAME_ID__);
if (frame && frame.contentWindow) {
    frame.contentWindow.location.href = __URL__;
} else if (frame) {
    frame.src = __URL__;
}
"#;

const FRAME_REPLACE_SCRIPT: &str = r#"
const frame = document.getElementById(__FRAME_ID__);
if (frame && frame.contentWindow) {
    frame.contentWindow.location.replace(__URL__);
}
"#;

/// Steps the joint session history back, which includes the frame's own
/// navigations.
pub const HISTORY_BACK_SCRIPT: &str = "window.history.back();";

const FRAME_REPORT_SCRIPT: &str = r#"
const frame = document.getElementById(__FRAME_ID__);
let url = null;
try {
    url = frame && frame.contentWindow ? frame.contentWindow.location.href : null;
} catch (error) {
    url = null;
}
const shell = document.querySelector(".shell");
if (shell) {
    shell.focus({ preventScroll: true });
}
return { url: url, history_length: window.history.length };
"#;

/// Forwards back key presses that reach the shell document. Re-running it
/// replaces the previous listener.
pub const BACK_KEY_WATCH_SCRIPT: &str = r#"
if (window.__rastgeleBackKeyUnwatch) {
    window.__rastgeleBackKeyUnwatch();
}
const onKeyDown = (event) => {
    if (event.key === "GoBack" || event.key === "BrowserBack") {
        dioxus.send("back");
    }
};
window.addEventListener("keydown", onKeyDown, true);
window.__rastgeleBackKeyUnwatch = () => {
    window.removeEventListener("keydown", onKeyDown, true);
    window.__rastgeleBackKeyUnwatch = undefined;
};
"#;

pub const BACK_KEY_UNWATCH_SCRIPT: &str = r"
if (window.__rastgeleBackKeyUnwatch) {
    window.__rastgeleBackKeyUnwatch();
}
";

/// What the shell document could observe about the frame after a load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FrameReport {
    /// The frame's location; `None` when another origin hides it
    #[serde(default)]
    pub url: Option<String>,
    /// Length of the shell document's session history
    #[serde(default)]
    pub history_length: Option<usize>,
}

impl FrameReport {
    /// The frame's page URL, when it could be read and is a web page.
    pub fn page_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| is_http_url(url))
    }

    /// Scripts posted into the frame only run when the frame's document
    /// shares the shell's origin, which is exactly when its location is
    /// readable from the shell.
    pub fn ensure_script_access(&self) -> Result<()> {
        if self.url.is_some() {
            Ok(())
        } else {
            Err(Error::Script(
                "page frame shows another origin; scripts cannot reach it".to_string(),
            ))
        }
    }
}

/// Wrap `script` so it runs inside the page frame.
///
/// A frame that is missing or refuses access answers with a status string
/// instead of throwing.
pub fn frame_script(script: &str) -> String {
    fill(FRAME_EVAL_SCRIPT).replace("__SCRIPT__", &js_string(script))
}

/// Load `url` in the frame as a new history entry.
pub fn assign_script(url: &str) -> String {
    fill(FRAME_ASSIGN_SCRIPT).replace("__URL__", &js_string(url))
}

/// Load `url` in the frame in place of the current history entry.
pub fn replace_script(url: &str) -> String {
    fill(FRAME_REPLACE_SCRIPT).replace("__URL__", &js_string(url))
}

pub fn report_script() -> String {
    fill(FRAME_REPORT_SCRIPT)
}

fn fill(template: &str) -> String {
    template.replace("__FRAME_ID__", &js_string(FRAME_ID))
}
