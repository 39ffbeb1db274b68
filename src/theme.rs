// src/theme.rs
// Dark/light theme state persisted through a preference store

use tracing::debug;

const DARK_MODE_KEY: &str = "darkMode";
const USER_PREFERENCE_KEY: &str = "userPreference";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

/// Key-value persistence seam. The rendering surface supplies whatever
/// it has: browser local storage, a settings file.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Theme selection with the site's dark-first default: no stored choice
/// means dark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    mode: ThemeMode,
}

impl ThemeState {
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let mode = match store.get(DARK_MODE_KEY) {
            None => ThemeMode::Dark,
            // Anything but the literal "true" reads as light
            Some(stored) if stored == "true" => ThemeMode::Dark,
            Some(_) => ThemeMode::Light,
        };
        Self { mode }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_dark(&self) -> bool {
        self.mode == ThemeMode::Dark
    }

    /// Flip the theme and persist it as an explicit user choice.
    pub fn toggle(&mut self, store: &mut dyn PreferenceStore) {
        self.mode = match self.mode {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        };
        store.set(DARK_MODE_KEY, if self.is_dark() { "true" } else { "false" });
        store.set(USER_PREFERENCE_KEY, "true");
        debug!(dark = self.is_dark(), "Theme toggled");
    }
}
