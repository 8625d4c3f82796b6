#![forbid(unsafe_code)]

//! Localization layer for the landing page.
//!
//! Locale files are plain JSON documents: arbitrarily nested objects whose
//! leaves are display strings. A [`LocaleTable`] holds one such document and
//! answers dotted-path lookups (`"hero.title"` walks `hero` then `title`).
//!
//! # Role in the page
//! [`LocaleStore`] owns the active table and language code. It never touches
//! the DOM or the network: the host fetches locale bodies and hands them to
//! [`LocaleStore::finish_load`], which decides whether the load applied,
//! should be retried with the default language, or failed for good. This keeps
//! the fallback policy deterministic and testable without a browser.

pub mod language;
pub mod store;
pub mod table;

pub use language::{I18nConfig, Locale, locale_path, primary_subtag, resolve_initial_language};
pub use store::{LoadOutcome, LoadRequest, LocaleSource, LocaleStore};
pub use table::{LoadError, LocaleTable, LookupError};
