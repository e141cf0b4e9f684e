//! Shell. Active tab and the dark-mode preference.
//!
//! The shell is the only owner of process-wide UI state. Dark mode is
//! read from durable storage once at startup and written back on every
//! change; each change also re-applies the appearance flag the renderer
//! reads. Storage failures never surface to the user: the preference
//! just stops persisting.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::storage::LocalStorage;

/// Storage key for the dark-mode flag.
pub const DARK_MODE_KEY: &str = "darkMode";

/// Which generator is visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActiveTab {
    #[default]
    Image,
    Text,
}

impl ActiveTab {
    pub const ALL: [ActiveTab; 2] = [ActiveTab::Image, ActiveTab::Text];

    pub fn label(self) -> &'static str {
        match self {
            ActiveTab::Image => "Image Generator",
            ActiveTab::Text => "Text Generator",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ActiveTab::Image => ActiveTab::Text,
            ActiveTab::Text => ActiveTab::Image,
        }
    }
}

/// Root-level presentation flag derived from the dark-mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    Dark,
    Light,
}

impl From<bool> for Appearance {
    fn from(dark: bool) -> Self {
        if dark {
            Appearance::Dark
        } else {
            Appearance::Light
        }
    }
}

/// Persisted user preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    pub dark_mode: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self { dark_mode: true }
    }
}

impl Preferences {
    /// Read from storage. Absent, unparseable or unreadable values fall back
    /// to the default (dark).
    pub fn load(storage: &dyn LocalStorage) -> Self {
        let dark_mode = match storage.get_item(DARK_MODE_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<bool>(&raw).unwrap_or_else(|e| {
                warn!(value = %raw, error = %e, "ignoring unparseable dark mode preference");
                true
            }),
            Ok(None) => true,
            Err(e) => {
                warn!(error = %e, "preference storage unreadable, using defaults");
                true
            }
        };
        Self { dark_mode }
    }

    /// Write to storage as `"true"` / `"false"`.
    pub fn save(&self, storage: &dyn LocalStorage) -> anyhow::Result<()> {
        let encoded = serde_json::to_string(&self.dark_mode)?;
        storage.set_item(DARK_MODE_KEY, &encoded)?;
        Ok(())
    }
}

pub struct Shell {
    active_tab: ActiveTab,
    prefs: Preferences,
    appearance: Appearance,
    storage: Arc<dyn LocalStorage>,
    persistent: bool,
}

impl Shell {
    /// Build the shell from stored preferences.
    pub fn load(storage: Arc<dyn LocalStorage>) -> Self {
        let prefs = Preferences::load(storage.as_ref());
        debug!(dark_mode = prefs.dark_mode, "shell loaded");
        Self {
            active_tab: ActiveTab::default(),
            prefs,
            appearance: Appearance::from(prefs.dark_mode),
            storage,
            persistent: true,
        }
    }

    pub fn active_tab(&self) -> ActiveTab {
        self.active_tab
    }

    pub fn set_active_tab(&mut self, tab: ActiveTab) {
        self.active_tab = tab;
    }

    pub fn next_tab(&mut self) {
        self.active_tab = self.active_tab.next();
    }

    pub fn dark_mode(&self) -> bool {
        self.prefs.dark_mode
    }

    pub fn appearance(&self) -> Appearance {
        self.appearance
    }

    /// False once a write has failed; the preference then lives in memory only.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    pub fn set_dark_mode(&mut self, dark: bool) {
        self.prefs.dark_mode = dark;
        self.appearance = Appearance::from(dark);
        match self.prefs.save(self.storage.as_ref()) {
            Ok(()) => self.persistent = true,
            Err(e) => {
                if self.persistent {
                    warn!(error = %e, "dark mode preference will not persist");
                }
                self.persistent = false;
            }
        }
    }

    /// Flip dark mode and return the new value.
    pub fn toggle_dark_mode(&mut self) -> bool {
        let dark = !self.prefs.dark_mode;
        self.set_dark_mode(dark);
        dark
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage, StorageError, StorageResult};
    use tempfile::TempDir;

    #[test]
    fn defaults_to_dark_without_stored_value() {
        let shell = Shell::load(Arc::new(MemoryStorage::new()));
        assert!(shell.dark_mode());
        assert_eq!(shell.appearance(), Appearance::Dark);
        assert_eq!(shell.active_tab(), ActiveTab::Image);
    }

    #[test]
    fn unparseable_value_defaults_to_dark() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(DARK_MODE_KEY, "maybe").unwrap();
        assert!(Shell::load(storage).dark_mode());
    }

    #[test]
    fn toggle_persists_as_text() {
        let storage = Arc::new(MemoryStorage::new());
        let mut shell = Shell::load(storage.clone());
        assert!(!shell.toggle_dark_mode());
        assert_eq!(storage.get_item(DARK_MODE_KEY).unwrap().as_deref(), Some("false"));
        assert_eq!(shell.appearance(), Appearance::Light);
        assert!(shell.toggle_dark_mode());
        assert_eq!(storage.get_item(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn fresh_load_reads_toggled_value() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("local_storage.yaml");
        {
            let mut shell = Shell::load(Arc::new(FileStorage::open(&path).unwrap()));
            shell.toggle_dark_mode();
        }
        let shell = Shell::load(Arc::new(FileStorage::open(&path).unwrap()));
        assert!(!shell.dark_mode());
        assert_eq!(shell.appearance(), Appearance::Light);
    }

    struct BrokenStorage;

    impl LocalStorage for BrokenStorage {
        fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Unavailable("disk gone".into()))
        }
        fn set_item(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable("disk gone".into()))
        }
        fn remove_item(&self, _key: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable("disk gone".into()))
        }
    }

    #[test]
    fn broken_storage_degrades_to_memory() {
        let mut shell = Shell::load(Arc::new(BrokenStorage));
        assert!(shell.dark_mode());
        shell.set_dark_mode(false);
        assert!(!shell.dark_mode());
        assert_eq!(shell.appearance(), Appearance::Light);
        assert!(!shell.is_persistent());
    }

    #[test]
    fn tabs_cycle() {
        let mut shell = Shell::load(Arc::new(MemoryStorage::new()));
        shell.next_tab();
        assert_eq!(shell.active_tab(), ActiveTab::Text);
        shell.set_active_tab(ActiveTab::Image);
        assert_eq!(shell.active_tab(), ActiveTab::Image);
    }
}
