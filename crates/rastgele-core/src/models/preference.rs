//! Device appearance preference

use serde::{Deserialize, Serialize};

/// Light/dark appearance reported by the host platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DevicePreference {
    /// Light appearance
    #[default]
    Light,
    /// Dark appearance
    Dark,
}

impl DevicePreference {
    /// Map a `prefers-color-scheme: dark` style flag to a preference.
    pub const fn from_is_dark(is_dark: bool) -> Self {
        if is_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Check if the preference is dark
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Lowercase token used in URLs and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl std::fmt::Display for DevicePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_is_dark_maps_both_values() {
        assert_eq!(DevicePreference::from_is_dark(true), DevicePreference::Dark);
        assert_eq!(
            DevicePreference::from_is_dark(false),
            DevicePreference::Light
        );
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&DevicePreference::Dark).unwrap(),
            "\"dark\""
        );
        let parsed: DevicePreference = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(parsed, DevicePreference::Light);
    }
}
