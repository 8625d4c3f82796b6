#![forbid(unsafe_code)]

//! Browser host for the landing page.
//!
//! This crate provides `LandingPage`, a `wasm-bindgen`-exported struct that
//! binds [`landing_core::Page`] to the live DOM: a `web-sys` backed document,
//! `localStorage` preferences, `fetch` for locale resources, and
//! `IntersectionObserver`/`setTimeout`/`requestAnimationFrame` plumbing.
//!
//! Page scripts use it as:
//!
//! ```js
//! const page = new LandingPage();
//! await page.start();
//! window.i18n = page; // loadLanguage, getTranslation, currentLanguage
//! ```

pub mod console;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::LandingPage;

pub use console::{ConsoleMakeWriter, ConsoleSink, ConsoleWriter, console_layer};

use landing_core::{ConfigError, LandingConfig};

/// Configuration handed to the constructor; absent means every default.
pub fn parse_config(json: Option<&str>) -> Result<LandingConfig, ConfigError> {
    match json.map(str::trim).filter(|json| !json.is_empty()) {
        Some(json) => LandingConfig::from_json(json),
        None => Ok(LandingConfig::default()),
    }
}
