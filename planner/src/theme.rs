//! Process-wide light/dark theme, persisted under a single key.

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Key/value persistence for the theme (browser `localStorage` in the app).
pub trait ThemeStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str);
}

pub struct ThemeSetting<S: ThemeStore> {
    store: S,
    current: Theme,
}

impl<S: ThemeStore> ThemeSetting<S> {
    /// Read the persisted theme once. Anything other than `"dark"` is light.
    pub fn init(store: S) -> Self {
        let current = match store.read(THEME_KEY).as_deref() {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        };
        Self { store, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn is_dark(&self) -> bool {
        self.current == Theme::Dark
    }

    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.toggled();
        self.store.write(THEME_KEY, self.current.as_str());
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, collections::HashMap, rc::Rc};

    #[derive(Clone, Default)]
    struct MemoryStore {
        values: Rc<RefCell<HashMap<String, String>>>,
        reads: Rc<RefCell<usize>>,
    }

    impl ThemeStore for MemoryStore {
        fn read(&self, key: &str) -> Option<String> {
            *self.reads.borrow_mut() += 1;
            self.values.borrow().get(key).cloned()
        }

        fn write(&mut self, key: &str, value: &str) {
            self.values.borrow_mut().insert(key.into(), value.into());
        }
    }

    #[test]
    fn missing_value_defaults_to_light() {
        let setting = ThemeSetting::init(MemoryStore::default());
        assert_eq!(setting.current(), Theme::Light);
    }

    #[test]
    fn persisted_dark_is_restored() {
        let store = MemoryStore::default();
        store
            .values
            .borrow_mut()
            .insert(THEME_KEY.into(), "dark".into());
        let setting = ThemeSetting::init(store);
        assert!(setting.is_dark());
    }

    #[test]
    fn unknown_value_is_light() {
        let store = MemoryStore::default();
        store
            .values
            .borrow_mut()
            .insert(THEME_KEY.into(), "sepia".into());
        assert_eq!(ThemeSetting::init(store).current(), Theme::Light);
    }

    #[test]
    fn toggle_alternates_and_persists() {
        let store = MemoryStore::default();
        let mut setting = ThemeSetting::init(store.clone());

        assert_eq!(setting.toggle(), Theme::Dark);
        assert_eq!(
            store.values.borrow().get(THEME_KEY).map(String::as_str),
            Some("dark")
        );
        assert_eq!(setting.toggle(), Theme::Light);
        assert_eq!(
            store.values.borrow().get(THEME_KEY).map(String::as_str),
            Some("light")
        );
        assert_eq!(*store.reads.borrow(), 1);
    }
}
