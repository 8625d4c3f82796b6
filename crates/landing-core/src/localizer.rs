//! Page translation and the language switcher.
//!
//! Within one successful load the order is fixed: the table is replaced, the
//! page is translated, the preference is persisted, the switcher reflects the
//! new language, and finally the document `lang` attribute is updated.

use std::borrow::Cow;

use landing_i18n::{
    I18nConfig, LoadError, LoadOutcome, LoadRequest, Locale, LocaleSource, LocaleStore,
    resolve_initial_language,
};
use tracing::debug;

use crate::document::{Document, ElementId, NodeKind, PreferenceStore, Query};

/// Write resolved strings into every node tagged with a translation key.
///
/// Returns the number of nodes written. Empty translations leave the node's
/// existing content alone.
pub fn translate_page<D: Document + ?Sized>(document: &mut D, store: &LocaleStore) -> usize {
    let attribute = store.config().key_attribute.as_str();
    let mut written = 0;
    for node in document.query_all(Query::Attribute(attribute)) {
        let Some(key) = document.attribute(node, attribute) else {
            continue;
        };
        let text = store.translate(&key);
        if text.is_empty() {
            continue;
        }
        match document.kind(node) {
            NodeKind::Meta => document.set_attribute(node, "content", &text),
            NodeKind::Title | NodeKind::Other => document.set_text(node, &text),
        }
        written += 1;
    }
    debug!(
        target: "landing_core::localizer",
        code = store.current_language(),
        written,
        "page translated"
    );
    written
}

/// Buttons that switch the page language.
#[derive(Debug, Clone, Default)]
pub struct LanguageSwitcher {
    controls: Vec<(ElementId, Locale)>,
    active_class: String,
}

impl LanguageSwitcher {
    /// Collect switcher controls. A page without controls yields an empty switcher.
    pub fn arm<D: Document + ?Sized>(document: &mut D, config: &I18nConfig) -> Self {
        let controls: Vec<(ElementId, Locale)> = document
            .query_all(Query::Class(&config.switcher_class))
            .into_iter()
            .map(|control| {
                let id = document.attribute(control, "id").unwrap_or_default();
                (control, id.replacen(&config.switcher_id_prefix, "", 1))
            })
            .collect();
        debug!(
            target: "landing_core::localizer",
            controls = controls.len(),
            "language switcher armed"
        );
        Self {
            controls,
            active_class: config.switcher_active_class.clone(),
        }
    }

    /// Language encoded by `control`, if it is one of ours.
    #[must_use]
    pub fn code_for(&self, control: ElementId) -> Option<&str> {
        self.controls
            .iter()
            .find(|(element, _)| *element == control)
            .map(|(_, code)| code.as_str())
    }

    pub fn controls(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.controls.iter().map(|(element, _)| *element)
    }

    /// Mark exactly the control for `active` (all others are cleared).
    pub fn reflect<D: Document + ?Sized>(&self, document: &mut D, active: &str) {
        for (control, code) in &self.controls {
            document.set_class(*control, &self.active_class, code == active);
        }
    }
}

/// Locale store plus the page-facing side of language changes.
#[derive(Debug, Clone)]
pub struct Localizer {
    store: LocaleStore,
    switcher: LanguageSwitcher,
}

impl Localizer {
    #[must_use]
    pub fn new(config: I18nConfig) -> Self {
        Self {
            store: LocaleStore::new(config),
            switcher: LanguageSwitcher::default(),
        }
    }

    /// Bind the switcher controls present in `document`.
    pub fn arm<D: Document + ?Sized>(&mut self, document: &mut D) {
        self.switcher = LanguageSwitcher::arm(document, self.store.config());
    }

    #[must_use]
    pub fn store(&self) -> &LocaleStore {
        &self.store
    }

    #[must_use]
    pub fn switcher(&self) -> &LanguageSwitcher {
        &self.switcher
    }

    #[must_use]
    pub fn current_language(&self) -> &str {
        self.store.current_language()
    }

    /// Resolve a dotted key, echoing the key on a miss.
    #[must_use]
    pub fn translate<'a>(&'a self, key: &'a str) -> Cow<'a, str> {
        self.store.translate(key)
    }

    /// Startup language: saved preference, then browser language, then default.
    #[must_use]
    pub fn initial_language<P: PreferenceStore + ?Sized>(
        &self,
        preferences: &P,
        browser_tag: Option<&str>,
    ) -> Locale {
        let config = self.store.config();
        let saved = preferences.get(&config.preference_key);
        resolve_initial_language(saved.as_deref(), browser_tag, config)
    }

    #[must_use]
    pub fn begin_load(&self, code: &str) -> LoadRequest {
        self.store.begin_load(code)
    }

    /// Feed a fetched body back; on success the page is updated.
    pub fn finish_load<D, P>(
        &mut self,
        document: &mut D,
        preferences: &mut P,
        request: LoadRequest,
        fetched: Result<String, LoadError>,
    ) -> LoadOutcome
    where
        D: Document + ?Sized,
        P: PreferenceStore + ?Sized,
    {
        let outcome = self.store.finish_load(request, fetched);
        if let LoadOutcome::Applied(code) = &outcome {
            self.apply(document, preferences, code);
        }
        outcome
    }

    /// Load `code` from a blocking source, with the single default fallback.
    pub fn load_with<S, D, P>(
        &mut self,
        source: &S,
        document: &mut D,
        preferences: &mut P,
        code: &str,
    ) -> Result<Locale, LoadError>
    where
        S: LocaleSource + ?Sized,
        D: Document + ?Sized,
        P: PreferenceStore + ?Sized,
    {
        let mut request = self.begin_load(code);
        loop {
            let fetched = source.fetch(&request.path);
            match self.finish_load(document, preferences, request, fetched) {
                LoadOutcome::Applied(code) => return Ok(code),
                LoadOutcome::Retry(next) => request = next,
                LoadOutcome::Failed(err) => return Err(err),
            }
        }
    }

    /// A click on a switcher control starts a load of its language.
    #[must_use]
    pub fn on_click(&self, element: ElementId) -> Option<LoadRequest> {
        self.switcher
            .code_for(element)
            .map(|code| self.begin_load(code))
    }

    fn apply<D, P>(&self, document: &mut D, preferences: &mut P, code: &str)
    where
        D: Document + ?Sized,
        P: PreferenceStore + ?Sized,
    {
        translate_page(document, &self.store);
        preferences.set(&self.store.config().preference_key, code);
        self.switcher.reflect(document, code);
        document.set_document_language(code);
    }
}
