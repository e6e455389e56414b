//! Persisted light/dark theme preference.
//!
//! The preference lives under a single `localStorage` key and is mirrored
//! onto the document root as a `data-theme` attribute so external
//! stylesheets can react. When the browser withholds storage (user policy,
//! private mode) the controller falls back to a session-local slot and the
//! rest of the contract is unchanged.

use std::cell::Cell;

use web_sys::Storage;

use crate::dom;

/// Storage slot holding `"dark"` or `"light"`.
pub const STORAGE_KEY: &str = "theme";
/// Attribute set on the document root; stylesheets key off it.
pub const DOCUMENT_ATTRIBUTE: &str = "data-theme";
/// Element id of the toggle control. Pages without it still get the
/// document attribute and persistence.
pub const TOGGLE_BUTTON_ID: &str = "theme-toggle";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Resolve a stored value. Anything but `"light"`, including an absent
    /// slot, resolves to the dark default.
    pub fn from_stored(stored: Option<&str>) -> Self {
        match stored {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Glyph shown on the toggle control while this theme is active.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Theme::Dark => "☀️",
            Theme::Light => "🌙",
        }
    }

    /// Accessible name for the toggle control. Always describes the
    /// *resulting* action, the opposite of the current state.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Dark => "Switch to light mode",
            Theme::Light => "Switch to dark mode",
        }
    }
}

/// Preference slot: `localStorage` when the browser grants it, otherwise an
/// in-memory value lasting for the session.
struct ThemeStore {
    storage: Option<Storage>,
    session: Cell<Theme>,
}

impl ThemeStore {
    fn new() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        if storage.is_none() {
            web_sys::console::warn_1(
                &"theme: persistent storage unavailable, keeping the preference in memory for this session".into(),
            );
        }
        Self {
            storage,
            session: Cell::new(Theme::default()),
        }
    }

    fn read(&self) -> Theme {
        match &self.storage {
            Some(storage) => {
                let stored = storage.get_item(STORAGE_KEY).ok().flatten();
                Theme::from_stored(stored.as_deref())
            }
            None => self.session.get(),
        }
    }

    fn write(&self, theme: Theme) {
        self.session.set(theme);
        if let Some(storage) = &self.storage {
            let _ = storage.set_item(STORAGE_KEY, theme.as_str());
        }
    }
}

/// Owns the theme preference. Constructed once at startup; UI wiring goes
/// through a reference rather than ambient lookups.
pub struct ThemeController {
    store: ThemeStore,
}

impl ThemeController {
    pub fn new() -> Self {
        Self {
            store: ThemeStore::new(),
        }
    }

    /// Current preference; `Dark` when nothing is stored.
    pub fn get(&self) -> Theme {
        self.store.read()
    }

    /// Apply `theme` to the document, persist it (idempotent re-write),
    /// and refresh the toggle control when present. The control is looked
    /// up lazily on every call so a late-appearing button is picked up by
    /// the next apply.
    pub fn apply(&self, theme: Theme) {
        if let Some(root) = dom::document().and_then(|document| document.document_element()) {
            let _ = root.set_attribute(DOCUMENT_ATTRIBUTE, theme.as_str());
        }
        self.store.write(theme);

        if let Some(button) = dom::element_by_id(TOGGLE_BUTTON_ID) {
            button.set_text_content(Some(theme.toggle_icon()));
            let _ = button.set_attribute("aria-label", theme.toggle_label());
        }
    }

    /// Switch to the other theme.
    pub fn toggle(&self) {
        self.apply(self.get().toggled());
    }

    /// First application, run at script evaluation time so the document
    /// carries the right attribute before styles settle.
    pub fn prime(&self) {
        self.apply(self.get());
    }

    /// Re-application once the document structure is ready. Guarantees the
    /// toggle control's glyph and label are correct even if the control
    /// did not exist at prime time.
    pub fn finalize(&self) {
        self.apply(self.get());
    }
}

impl Default for ThemeController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_or_unrecognized_values_resolve_to_dark() {
        assert_eq!(Theme::from_stored(None), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("solarized")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("light")), Theme::Light);
    }

    #[test]
    fn toggle_round_trips() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn control_text_describes_the_resulting_action() {
        assert_eq!(Theme::Dark.toggle_icon(), "☀️");
        assert_eq!(Theme::Dark.toggle_label(), "Switch to light mode");
        assert_eq!(Theme::Light.toggle_icon(), "🌙");
        assert_eq!(Theme::Light.toggle_label(), "Switch to dark mode");
    }

    #[test]
    fn stored_representation_round_trips() {
        for theme in [Theme::Dark, Theme::Light] {
            assert_eq!(Theme::from_stored(Some(theme.as_str())), theme);
        }
    }

    #[test]
    fn session_slot_serves_the_contract_when_storage_is_withheld() {
        let store = ThemeStore {
            storage: None,
            session: Cell::new(Theme::default()),
        };

        // Empty session resolves to the dark default.
        assert_eq!(store.read(), Theme::Dark);

        // Writes land in the session slot and read back for the rest of
        // the session.
        store.write(Theme::Light);
        assert_eq!(store.read(), Theme::Light);
        store.write(Theme::Dark);
        assert_eq!(store.read(), Theme::Dark);
    }
}
