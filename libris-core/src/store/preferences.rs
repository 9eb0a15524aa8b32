//! Persisted user preferences

use crate::error::Result;
use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Storage key holding the selected theme
pub const THEME_KEY: &str = "libris-theme";

/// Color theme
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

/// User preferences
pub struct Preferences {
    storage: Arc<dyn KeyValueStore>,
    theme: Theme,
    explicit: bool,
}

impl Preferences {
    /// Load stored preferences; `system_theme` applies until the user picks one
    pub fn initialize(storage: Arc<dyn KeyValueStore>, system_theme: Theme) -> Self {
        let stored = match storage.get(THEME_KEY) {
            Ok(Some(data)) => match serde_json::from_str::<Theme>(&data) {
                Ok(theme) => Some(theme),
                Err(e) => {
                    tracing::warn!("Ignoring malformed theme setting: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Failed to read theme setting: {}", e);
                None
            }
        };

        Self {
            storage,
            theme: stored.unwrap_or(system_theme),
            explicit: stored.is_some(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Whether the theme was chosen by the user rather than detected
    pub fn is_explicit(&self) -> bool {
        self.explicit
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        let data = serde_json::to_string(&theme)?;
        self.storage.set(THEME_KEY, &data)?;
        self.theme = theme;
        self.explicit = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_system_theme_until_chosen() {
        let storage = Arc::new(MemoryStorage::new());
        let mut prefs = Preferences::initialize(storage.clone(), Theme::Dark);
        assert_eq!(prefs.theme(), Theme::Dark);
        assert!(!prefs.is_explicit());

        prefs.set_theme(Theme::Light).unwrap();
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("\"light\""));

        let prefs = Preferences::initialize(storage, Theme::Dark);
        assert_eq!(prefs.theme(), Theme::Light);
        assert!(prefs.is_explicit());
    }

    #[test]
    fn test_malformed_theme_falls_back() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(THEME_KEY, "\"sepia\"").unwrap();
        let prefs = Preferences::initialize(storage, Theme::Light);
        assert_eq!(prefs.theme(), Theme::Light);
        assert!(!prefs.is_explicit());
    }
}
