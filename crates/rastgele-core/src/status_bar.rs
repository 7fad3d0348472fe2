//! Status bar appearance following the device preference.

use serde::{Deserialize, Serialize};

use crate::models::DevicePreference;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusBarStyle {
    /// Light glyphs, for dark backgrounds
    LightContent,
    /// Dark glyphs, for light backgrounds
    DarkContent,
}

impl StatusBarStyle {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LightContent => "light-content",
            Self::DarkContent => "dark-content",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBarAppearance {
    pub style: StatusBarStyle,
    pub background: &'static str,
}

impl StatusBarAppearance {
    pub const fn for_preference(preference: DevicePreference) -> Self {
        match preference {
            DevicePreference::Dark => Self {
                style: StatusBarStyle::LightContent,
                background: "#000000",
            },
            DevicePreference::Light => Self {
                style: StatusBarStyle::DarkContent,
                background: "#ffffff",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_uses_light_glyphs_on_black() {
        let appearance = StatusBarAppearance::for_preference(DevicePreference::Dark);
        assert_eq!(appearance.style, StatusBarStyle::LightContent);
        assert_eq!(appearance.background, "#000000");
    }

    #[test]
    fn light_uses_dark_glyphs_on_white() {
        let appearance = StatusBarAppearance::for_preference(DevicePreference::Light);
        assert_eq!(appearance.style.as_str(), "dark-content");
        assert_eq!(appearance.background, "#ffffff");
    }
}
