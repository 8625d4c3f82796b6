//! The active locale table and the language load state machine.
//!
//! A load is split in two so the host can fetch asynchronously:
//!
//! 1. [`LocaleStore::begin_load`] names the resource to fetch.
//! 2. [`LocaleStore::finish_load`] consumes the fetched body (or the fetch
//!    error) and reports a [`LoadOutcome`].
//!
//! A failed load of a non-default language yields [`LoadOutcome::Retry`] for
//! the default language, exactly once. A failed default load is terminal.
//! [`LocaleStore::load_with`] drives both steps against a blocking
//! [`LocaleSource`].

use std::borrow::Cow;

use tracing::{debug, error, info, warn};

use crate::language::{I18nConfig, Locale};
use crate::table::{LoadError, LocaleTable};

/// Blocking access to locale resources.
pub trait LocaleSource {
    /// Fetch the body stored at `path`.
    fn fetch(&self, path: &str) -> Result<String, LoadError>;
}

/// A pending load: which language, and where its resource lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub code: Locale,
    pub path: String,
}

/// Result of feeding a fetched body back into the store.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The table was replaced; `code` is now active.
    Applied(Locale),
    /// The load failed; fetch this default-language request next.
    Retry(LoadRequest),
    /// The default language failed too. Nothing changed.
    Failed(LoadError),
}

/// Owner of the active locale table.
#[derive(Debug, Clone)]
pub struct LocaleStore {
    config: I18nConfig,
    table: LocaleTable,
    current: Locale,
}

impl LocaleStore {
    /// A store whose active language is the default, with an empty table.
    #[must_use]
    pub fn new(config: I18nConfig) -> Self {
        let current = config.default_language.clone();
        Self {
            table: LocaleTable::empty(current.clone()),
            current,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &I18nConfig {
        &self.config
    }

    /// Active language code.
    #[must_use]
    pub fn current_language(&self) -> &str {
        &self.current
    }

    /// Active table.
    #[must_use]
    pub fn table(&self) -> &LocaleTable {
        &self.table
    }

    /// Start loading `code`. Unsupported codes are redirected to the default.
    #[must_use]
    pub fn begin_load(&self, code: &str) -> LoadRequest {
        let code = if self.config.is_supported(code) {
            code
        } else {
            warn!(
                target: "landing_i18n::store",
                requested = code,
                fallback = %self.config.default_language,
                "unsupported language requested"
            );
            self.config.default_language.as_str()
        };
        LoadRequest {
            code: code.to_owned(),
            path: self.config.path_for(code),
        }
    }

    /// Finish a load started by [`Self::begin_load`].
    pub fn finish_load(
        &mut self,
        request: LoadRequest,
        fetched: Result<String, LoadError>,
    ) -> LoadOutcome {
        let parsed = fetched.and_then(|body| LocaleTable::from_json(request.code.clone(), &body));
        match parsed {
            Ok(table) => {
                info!(
                    target: "landing_i18n::store",
                    code = %request.code,
                    keys = table.len(),
                    "language loaded"
                );
                self.table = table;
                self.current = request.code.clone();
                LoadOutcome::Applied(request.code)
            }
            Err(err) => {
                error!(
                    target: "landing_i18n::store",
                    code = %request.code,
                    path = %request.path,
                    error = %err,
                    "error loading language"
                );
                if request.code == self.config.default_language {
                    LoadOutcome::Failed(err)
                } else {
                    warn!(
                        target: "landing_i18n::store",
                        fallback = %self.config.default_language,
                        "falling back to default language"
                    );
                    LoadOutcome::Retry(self.begin_load(&self.config.default_language))
                }
            }
        }
    }

    /// Load `code` from a blocking source, following at most one fallback.
    pub fn load_with<S: LocaleSource + ?Sized>(
        &mut self,
        source: &S,
        code: &str,
    ) -> Result<Locale, LoadError> {
        let mut request = self.begin_load(code);
        loop {
            let fetched = source.fetch(&request.path);
            match self.finish_load(request, fetched) {
                LoadOutcome::Applied(code) => return Ok(code),
                LoadOutcome::Retry(next) => request = next,
                LoadOutcome::Failed(err) => return Err(err),
            }
        }
    }

    /// Resolve `key` in the active table.
    ///
    /// A miss is logged and the key itself is returned as a visible placeholder.
    #[must_use]
    pub fn translate<'a>(&'a self, key: &'a str) -> Cow<'a, str> {
        match self.table.lookup(key) {
            Ok(text) => Cow::Borrowed(text),
            Err(err) => {
                warn!(target: "landing_i18n::store", key, error = %err, "translation not found");
                Cow::Borrowed(key)
            }
        }
    }

    /// Like [`Self::translate`] but silent; `None` on a miss.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        let found = self.table.lookup(key).ok();
        if found.is_none() {
            debug!(target: "landing_i18n::store", key, "lookup miss");
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use super::*;

    #[derive(Default)]
    struct MapSource {
        files: HashMap<String, String>,
        requested: RefCell<Vec<String>>,
    }

    impl MapSource {
        fn with(mut self, path: &str, body: &str) -> Self {
            self.files.insert(path.into(), body.into());
            self
        }
    }

    impl LocaleSource for MapSource {
        fn fetch(&self, path: &str) -> Result<String, LoadError> {
            self.requested.borrow_mut().push(path.to_owned());
            self.files.get(path).cloned().ok_or_else(|| LoadError::Status {
                path: path.to_owned(),
                status: 404,
            })
        }
    }

    fn source() -> MapSource {
        MapSource::default()
            .with("./locales/es.json", r#"{"hero":{"title":"Hola"}}"#)
            .with("./locales/en.json", r#"{"hero":{"title":"Hello"}}"#)
    }

    #[test]
    fn fresh_store_is_default_and_empty() {
        let store = LocaleStore::new(I18nConfig::default());
        assert_eq!(store.current_language(), "es");
        assert!(store.table().is_empty());
    }

    #[test]
    fn load_replaces_table_and_code() {
        let mut store = LocaleStore::new(I18nConfig::default());
        let source = source();
        assert_eq!(store.load_with(&source, "en").unwrap(), "en");
        assert_eq!(store.translate("hero.title"), "Hello");
        assert_eq!(store.load_with(&source, "es").unwrap(), "es");
        assert_eq!(store.translate("hero.title"), "Hola");
        assert_eq!(store.current_language(), "es");
    }

    #[test]
    #[traced_test]
    fn failed_load_falls_back_once() {
        let mut store = LocaleStore::new(I18nConfig::default());
        let source = MapSource::default().with("./locales/es.json", r#"{"a":"b"}"#);
        assert_eq!(store.load_with(&source, "en").unwrap(), "es");
        assert_eq!(
            *source.requested.borrow(),
            vec!["./locales/en.json", "./locales/es.json"]
        );
        assert!(logs_contain("error loading language"));
        assert!(logs_contain("falling back to default language"));
        assert!(logs_contain("language loaded"));
    }

    #[test]
    #[traced_test]
    fn failed_default_is_terminal_and_keeps_state() {
        let mut store = LocaleStore::new(I18nConfig::default());
        let good = source();
        store.load_with(&good, "en").unwrap();

        let broken = MapSource::default().with("./locales/es.json", "not json");
        let err = store.load_with(&broken, "es").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
        assert_eq!(broken.requested.borrow().len(), 1);
        assert_eq!(store.current_language(), "en");
        assert_eq!(store.translate("hero.title"), "Hello");
        assert!(logs_contain("error loading language"));
        assert!(!logs_contain("falling back to default language"));
    }

    #[test]
    fn unsupported_code_redirects_to_default() {
        let store = LocaleStore::new(I18nConfig::default());
        let request = store.begin_load("fr");
        assert_eq!(
            request,
            LoadRequest {
                code: "es".into(),
                path: "./locales/es.json".into()
            }
        );
    }

    #[test]
    fn finish_load_reports_retry_then_failed() {
        let mut store = LocaleStore::new(I18nConfig::default());
        let request = store.begin_load("en");
        let outcome = store.finish_load(
            request,
            Err(LoadError::Network {
                path: "./locales/en.json".into(),
                message: "offline".into(),
            }),
        );
        let retry = match outcome {
            LoadOutcome::Retry(retry) => retry,
            other => panic!("expected retry, got {other:?}"),
        };
        assert_eq!(retry.code, "es");

        let outcome = store.finish_load(retry, Ok("[]".into()));
        assert!(matches!(outcome, LoadOutcome::Failed(LoadError::NotATable)));
    }

    #[test]
    #[traced_test]
    fn missing_key_returns_key_and_warns() {
        let mut store = LocaleStore::new(I18nConfig::default());
        store.load_with(&source(), "es").unwrap();
        assert_eq!(store.translate("footer.copyright"), "footer.copyright");
        assert!(logs_contain("translation not found"));
    }

    #[test]
    fn get_is_silent_option() {
        let mut store = LocaleStore::new(I18nConfig::default());
        store.load_with(&source(), "es").unwrap();
        assert_eq!(store.get("hero.title"), Some("Hola"));
        assert_eq!(store.get("hero"), None);
    }
}
