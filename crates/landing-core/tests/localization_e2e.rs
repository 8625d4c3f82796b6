#![forbid(unsafe_code)]

//! End-to-end tests for page localization against the stock page.
//!
//! # Invariants
//!
//! 1. **Atomic apply**: a failed load leaves text, preference, switcher and
//!    document language untouched.
//! 2. **Single fallback**: a failed non-default load retries the default
//!    language once, never more.
//! 3. **Exclusive switcher**: after a successful load exactly one switcher
//!    control carries the active class.
//!
//! # Failure Modes
//!
//! | Scenario | Expected Behavior |
//! |----------|-------------------|
//! | Missing key | Node shows the key itself |
//! | Empty translation | Node keeps its previous content |
//! | Unsupported code | Default language is loaded instead |
//! | Non-default resource missing | Default language is applied |
//! | Default resource missing | Error, page unchanged |
//!
//! Run: `cargo test -p landing-core --test localization_e2e`

use landing_core::landing_i18n::{LoadError, LoadOutcome, LoadRequest, LocaleSource};
use landing_core::{Document, LandingConfig, Page, PageEvent, PreferenceStore};
use landing_harness::{MapSource, MemoryPreferences, landing_page, locale_source};
use pretty_assertions::assert_eq;

const KEY: &str = "preferred-language";

fn request(code: &str) -> LoadRequest {
    LoadRequest {
        code: code.into(),
        path: format!("./locales/{code}.json"),
    }
}

// ---------------------------------------------------------------------------
// Initial language
// ---------------------------------------------------------------------------

#[test]
fn browser_language_chooses_first_load() {
    let (mut doc, _) = landing_page();
    let page = Page::arm(LandingConfig::default(), &mut doc);
    let prefs = MemoryPreferences::new();
    assert_eq!(page.initial_load(&prefs, Some("en-US")), request("en"));
    assert_eq!(page.initial_load(&prefs, Some("de-DE")), request("es"));
    assert_eq!(page.initial_load(&prefs, None), request("es"));
}

#[test]
fn saved_preference_beats_browser_language() {
    let (mut doc, _) = landing_page();
    let page = Page::arm(LandingConfig::default(), &mut doc);
    let prefs = MemoryPreferences::with(KEY, "en");
    assert_eq!(page.initial_load(&prefs, Some("es-MX")), request("en"));

    let stale = MemoryPreferences::with(KEY, "fr");
    assert_eq!(page.initial_load(&stale, Some("en-GB")), request("es"));
}

// ---------------------------------------------------------------------------
// Applying a locale
// ---------------------------------------------------------------------------

#[test]
fn loading_english_rewrites_the_page() {
    let (mut doc, h) = landing_page();
    let mut page = Page::arm(LandingConfig::default(), &mut doc);
    let mut prefs = MemoryPreferences::new();
    let source = locale_source();

    let code = page
        .load_with(&source, &mut doc, &mut prefs, "en")
        .expect("english loads");

    assert_eq!(code, "en");
    assert_eq!(page.current_language(), "en");
    assert_eq!(doc.text_of(h.hero_title), "Travel together");
    assert_eq!(doc.text_of(h.hero_subtitle), "Your whole itinerary in one place");
    assert_eq!(doc.text_of(h.title), "Rutas | Plan your trip");
    assert_eq!(
        doc.attribute_of(h.description, "content"),
        Some("Group travel planning without the hassle")
    );
    // The meta element keeps no text of its own.
    assert_eq!(doc.text_of(h.description), "");
    assert_eq!(doc.text_of(h.nav_features), "Features");
    assert_eq!(doc.text_of(h.countries_label), "stats.countries");
    assert_eq!(doc.text_of(h.rights), "All rights reserved");

    assert_eq!(prefs.get(KEY).as_deref(), Some("en"));
    assert!(doc.has_class(h.lang_en, "active"));
    assert!(!doc.has_class(h.lang_es, "active"));
    assert_eq!(doc.language(), Some("en"));
    assert_eq!(page.translate("hero.title"), "Travel together");
}

#[test]
fn switching_back_moves_the_active_control() {
    let (mut doc, h) = landing_page();
    let mut page = Page::arm(LandingConfig::default(), &mut doc);
    let mut prefs = MemoryPreferences::new();
    let source = locale_source();

    page.load_with(&source, &mut doc, &mut prefs, "en").unwrap();
    page.load_with(&source, &mut doc, &mut prefs, "es").unwrap();

    assert_eq!(doc.text_of(h.hero_title), "Viaja juntos");
    assert_eq!(doc.text_of(h.countries_label), "países");
    assert_eq!(doc.text_of(h.rights), "Todos los derechos reservados");
    assert!(doc.has_class(h.lang_es, "active"));
    assert!(!doc.has_class(h.lang_en, "active"));
    assert_eq!(
        prefs.writes(),
        &[(KEY.to_owned(), "en".to_owned()), (KEY.to_owned(), "es".to_owned())]
    );
    assert_eq!(doc.language(), Some("es"));
}

#[test]
fn switcher_click_requests_its_language() {
    let (mut doc, h) = landing_page();
    let mut page = Page::arm(LandingConfig::default(), &mut doc);
    let mut prefs = MemoryPreferences::new();
    let source = locale_source();

    let effects = page.handle(&mut doc, PageEvent::Click(h.lang_en));
    let pending = effects.load.expect("switcher click starts a load");
    assert_eq!(pending, request("en"));
    assert!(!effects.prevent_default);

    let body = source.fetch(&pending.path);
    match page.finish_load(&mut doc, &mut prefs, pending, body) {
        LoadOutcome::Applied(code) => assert_eq!(code, "en"),
        other => panic!("expected Applied, got {other:?}"),
    }
    assert_eq!(doc.text_of(h.hero_title), "Travel together");
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn missing_resource_falls_back_to_default() {
    let (mut doc, h) = landing_page();
    let mut page = Page::arm(LandingConfig::default(), &mut doc);
    let mut prefs = MemoryPreferences::new();
    let source = MapSource::new().with("./locales/es.json", landing_harness::ES_JSON);

    let code = page.load_with(&source, &mut doc, &mut prefs, "en").unwrap();

    assert_eq!(code, "es");
    assert_eq!(
        source.requested(),
        vec!["./locales/en.json".to_owned(), "./locales/es.json".to_owned()]
    );
    assert_eq!(doc.text_of(h.hero_title), "Viaja juntos");
    assert_eq!(prefs.get(KEY).as_deref(), Some("es"));
    assert!(doc.has_class(h.lang_es, "active"));
}

#[test]
fn malformed_resource_falls_back_to_default() {
    let (mut doc, h) = landing_page();
    let mut page = Page::arm(LandingConfig::default(), &mut doc);
    let mut prefs = MemoryPreferences::new();
    let source = locale_source().with("./locales/en.json", "{ not json");

    assert_eq!(page.load_with(&source, &mut doc, &mut prefs, "en").unwrap(), "es");
    assert_eq!(doc.text_of(h.hero_title), "Viaja juntos");
}

#[test]
fn failed_default_changes_nothing() {
    let (mut doc, h) = landing_page();
    let mut page = Page::arm(LandingConfig::default(), &mut doc);
    let mut prefs = MemoryPreferences::new();
    let source = MapSource::new();

    let err = page
        .load_with(&source, &mut doc, &mut prefs, "en")
        .unwrap_err();

    assert!(matches!(err, LoadError::Status { status: 404, .. }));
    assert_eq!(source.requested().len(), 2);
    assert_eq!(page.current_language(), "es");
    assert_eq!(doc.text_of(h.title), "Rutas");
    assert_eq!(doc.text_of(h.rights), "All rights reserved");
    assert!(prefs.writes().is_empty());
    assert_eq!(doc.language(), None);
    // The stock markup ships without an active language control.
    assert!(!doc.has_class(h.lang_es, "active"));
    assert!(!doc.has_class(h.lang_en, "active"));
}

#[test]
fn unsupported_request_loads_default() {
    let (mut doc, _) = landing_page();
    let page = Page::arm(LandingConfig::default(), &mut doc);
    assert_eq!(page.request_language("fr"), request("es"));
    assert_eq!(page.request_language("en"), request("en"));
}

#[test]
fn failed_switch_keeps_previous_language() {
    let (mut doc, h) = landing_page();
    let mut page = Page::arm(LandingConfig::default(), &mut doc);
    let mut prefs = MemoryPreferences::new();
    let source = locale_source();
    page.load_with(&source, &mut doc, &mut prefs, "en").unwrap();

    let pending = page.request_language("es");
    let outcome = page.finish_load(
        &mut doc,
        &mut prefs,
        pending,
        Err(LoadError::Network {
            path: "./locales/es.json".into(),
            message: "offline".into(),
        }),
    );

    assert!(matches!(outcome, LoadOutcome::Failed(LoadError::Network { .. })));
    assert_eq!(page.current_language(), "en");
    assert_eq!(doc.text_of(h.hero_title), "Travel together");
    assert_eq!(doc.language(), Some("en"));
}

#[test]
fn page_without_translatable_nodes_still_tracks_language() {
    let mut doc = landing_harness::FakeDocument::new();
    let mut page = Page::arm(LandingConfig::default(), &mut doc);
    let mut prefs = MemoryPreferences::new();
    page.load_with(&locale_source(), &mut doc, &mut prefs, "en")
        .unwrap();
    assert_eq!(page.current_language(), "en");
    assert_eq!(doc.language(), Some("en"));
    assert!(doc.query(landing_core::Query::Class("lang-btn")).is_none());
}
