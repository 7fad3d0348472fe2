//! Share payload for the current page.

use serde::Serialize;

const SHARE_SCRIPT: &str = r#"
(() => {
    const payload = __PAYLOAD__;
    if (navigator.share) {
        return navigator.share(payload).then(() => "shared", () => "cancelled");
    }
    if (navigator.clipboard && navigator.clipboard.writeText) {
        return navigator.clipboard.writeText(payload.text).then(() => "copied", () => "failed");
    }
    return "unsupported";
})();
"#;

/// What gets handed to the platform share sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharePayload {
    pub title: String,
    pub url: String,
    pub text: String,
}

impl SharePayload {
    /// Build a payload for the page at `url`; a blank title shares the URL
    /// alone.
    pub fn for_page(url: &str, title: &str) -> Self {
        let url = url.trim().to_string();
        let title = title.trim().to_string();
        let text = if title.is_empty() {
            url.clone()
        } else {
            format!("{title}\n{url}")
        };
        Self { title, url, text }
    }

    /// Script invoking the Web Share API, falling back to the clipboard.
    pub fn to_script(&self) -> String {
        let payload = serde_json::json!({
            "title": self.title,
            "url": self.url,
            "text": self.text,
        });
        SHARE_SCRIPT.replace("__PAYLOAD__", &payload.to_string())
    }
}
