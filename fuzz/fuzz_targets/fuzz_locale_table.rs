#![no_main]

use landing_i18n::{I18nConfig, LocaleStore, LocaleTable};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 8192 {
        return;
    }
    let (body, key) = text.split_once('\u{0}').unwrap_or((text, "hero.title"));

    // Parsing must never panic; every listed key must resolve.
    if let Ok(table) = LocaleTable::from_json("es", body) {
        for listed in table.keys() {
            assert!(table.lookup(&listed).is_ok(), "listed key {listed:?} must resolve");
        }
        let _ = table.lookup(key);
    }

    // A failed load must leave the store untouched; a miss echoes the key.
    let mut store = LocaleStore::new(I18nConfig::default());
    let request = store.begin_load("en");
    let _ = store.finish_load(request, Ok(body.to_owned()));
    let translated = store.translate(key);
    if store.get(key).is_none() {
        assert_eq!(translated, key);
    }
});
