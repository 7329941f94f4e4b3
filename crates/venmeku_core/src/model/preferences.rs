//! Settings screen preferences.

use serde::{Deserialize, Serialize};

/// Interface language offered by the settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Amharic,
}

impl Language {
    /// The language the settings toggle switches to.
    pub fn toggled(self) -> Self {
        match self {
            Self::English => Self::Amharic,
            Self::Amharic => Self::English,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Amharic => "Amharic",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim() {
            "English" => Some(Self::English),
            "Amharic" => Some(Self::Amharic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub dark_mode: bool,
    pub notifications: bool,
    pub private_account: bool,
    pub language: Language,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark_mode: false,
            notifications: true,
            private_account: false,
            language: Language::English,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Language, Preferences};

    #[test]
    fn partial_blob_fills_defaults() {
        let prefs: Preferences = serde_json::from_str(r#"{"darkMode":true}"#).unwrap();
        assert!(prefs.dark_mode);
        assert!(prefs.notifications);
        assert_eq!(prefs.language, Language::English);
    }

    #[test]
    fn language_toggle_round_trips() {
        assert_eq!(Language::English.toggled(), Language::Amharic);
        assert_eq!(Language::Amharic.toggled().toggled(), Language::Amharic);
        assert_eq!(Language::from_label("Amharic"), Some(Language::Amharic));
        assert_eq!(Language::from_label("French"), None);
    }
}
