//! In-memory preferences and locale resources.

use std::cell::RefCell;
use std::collections::BTreeMap;

use landing_core::PreferenceStore;
use landing_i18n::{LoadError, LocaleSource};

/// Local storage stand-in that records every write.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    entries: BTreeMap<String, String>,
    writes: Vec<(String, String)>,
}

impl MemoryPreferences {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Preferences with one entry already stored.
    #[must_use]
    pub fn with(key: &str, value: &str) -> Self {
        let mut prefs = Self::default();
        prefs.entries.insert(key.to_owned(), value.to_owned());
        prefs
    }

    #[must_use]
    pub fn writes(&self) -> &[(String, String)] {
        &self.writes
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.writes.push((key.to_owned(), value.to_owned()));
    }
}

/// Locale resources keyed by path. Unknown paths answer status 404.
#[derive(Debug, Default)]
pub struct MapSource {
    files: BTreeMap<String, String>,
    requested: RefCell<Vec<String>>,
}

impl MapSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, path: &str, body: &str) -> Self {
        self.files.insert(path.to_owned(), body.to_owned());
        self
    }

    /// Paths fetched so far, in order.
    #[must_use]
    pub fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl LocaleSource for MapSource {
    fn fetch(&self, path: &str) -> Result<String, LoadError> {
        self.requested.borrow_mut().push(path.to_owned());
        self.files.get(path).cloned().ok_or_else(|| {
            tracing::debug!(target: "landing_harness::sources", path, "no such locale fixture");
            LoadError::Status {
                path: path.to_owned(),
                status: 404,
            }
        })
    }
}
