//! Device appearance bridge for the shell webview.
#![cfg_attr(not(target_os = "android"), allow(dead_code))]

use rastgele_core::DevicePreference;
use serde_json::Value;

/// Reports the current `prefers-color-scheme` value and every later change
/// through `dioxus.send`. Re-running it replaces the previous listener.
pub const APPEARANCE_WATCH_SCRIPT: &str = r#"
if (window.__rastgeleAppearanceUnwatch) {
    window.__rastgeleAppearanceUnwatch();
}
const query = window.matchMedia("(prefers-color-scheme: dark)");
const listener = (event) => dioxus.send(event.matches);
if (query.addEventListener) {
    query.addEventListener("change", listener);
} else {
    query.addListener(listener);
}
window.__rastgeleAppearanceUnwatch = () => {
    if (query.removeEventListener) {
        query.removeEventListener("change", listener);
    } else {
        query.removeListener(listener);
    }
    window.__rastgeleAppearanceUnwatch = undefined;
};
dioxus.send(query.matches);
"#;

/// Removes the listener installed by [`APPEARANCE_WATCH_SCRIPT`].
pub const APPEARANCE_UNWATCH_SCRIPT: &str = r"
if (window.__rastgeleAppearanceUnwatch) {
    window.__rastgeleAppearanceUnwatch();
}
";

/// Interpret a message posted by the watcher script.
///
/// Accepts the boolean `matches` flag as well as `"dark"`/`"light"` tokens.
pub fn parse_appearance_message(message: &Value) -> Option<DevicePreference> {
    match message {
        Value::Bool(is_dark) => Some(DevicePreference::from_is_dark(*is_dark)),
        Value::String(token) => match token.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(DevicePreference::Dark),
            "light" => Some(DevicePreference::Light),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn parse_appearance_message_accepts_flags_and_tokens() {
        assert_eq!(
            parse_appearance_message(&json!(true)),
            Some(DevicePreference::Dark)
        );
        assert_eq!(
            parse_appearance_message(&json!(false)),
            Some(DevicePreference::Light)
        );
        assert_eq!(
            parse_appearance_message(&json!(" Dark ")),
            Some(DevicePreference::Dark)
        );
        assert_eq!(parse_appearance_message(&json!("sepia")), None);
        assert_eq!(parse_appearance_message(&json!(1)), None);
    }

    #[test]
    fn watch_script_replaces_previous_listener() {
        assert!(APPEARANCE_WATCH_SCRIPT.contains("window.__rastgeleAppearanceUnwatch()"));
        assert!(APPEARANCE_UNWATCH_SCRIPT.contains("window.__rastgeleAppearanceUnwatch()"));
    }
}
