#![forbid(unsafe_code)]

//! Test harness and reference fixtures for the landing page.
//!
//! [`FakeDocument`] is an in-memory page implementing
//! [`landing_core::Document`]; [`MemoryPreferences`] and [`MapSource`] stand
//! in for local storage and the locale fetch. [`fixtures::landing_page`]
//! builds the stock page markup with named handles.

pub mod fake_document;
pub mod fixtures;
pub mod sources;

pub use fake_document::{FakeDocument, FakeElement};
pub use fixtures::{EN_JSON, ES_JSON, PageHandles, SLIDES, landing_page, locale_source};
pub use sources::{MapSource, MemoryPreferences};
