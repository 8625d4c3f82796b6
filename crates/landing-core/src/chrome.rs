//! Small page chrome: footer year, header shadow, keyboard focus hint.

use crate::config::ChromeConfig;
use crate::document::{Document, ElementId, Query};

/// Write `year` into the footer year element. Returns whether it exists.
pub fn stamp_current_year<D: Document + ?Sized>(
    document: &mut D,
    config: &ChromeConfig,
    year: i32,
) -> bool {
    match document.query(Query::Id(&config.year_element_id)) {
        Some(element) => {
            document.set_text(element, &year.to_string());
            true
        }
        None => false,
    }
}

/// Drop shadow under the header once the page is scrolled.
#[derive(Debug, Clone)]
pub struct HeaderShadow {
    header_class: String,
    after_px: f64,
    shadow: String,
}

impl HeaderShadow {
    #[must_use]
    pub fn new(config: &ChromeConfig) -> Self {
        Self {
            header_class: config.header_class.clone(),
            after_px: config.shadow_after_px,
            shadow: config.header_shadow.clone(),
        }
    }

    /// Window scroll handler.
    pub fn on_scroll<D: Document + ?Sized>(&self, document: &mut D, scroll_y: f64) {
        let Some(header) = document.query(Query::Class(&self.header_class)) else {
            return;
        };
        let shadow = if scroll_y > self.after_px {
            self.shadow.as_str()
        } else {
            "none"
        };
        document.set_style(header, "box-shadow", shadow);
    }
}

/// `user-is-tabbing` on `<body>` while the user navigates by keyboard.
#[derive(Debug, Clone)]
pub struct FocusHint {
    body: Option<ElementId>,
    key: String,
    class: String,
}

impl FocusHint {
    pub fn arm<D: Document + ?Sized>(document: &mut D, config: &ChromeConfig) -> Self {
        Self {
            body: document.query(Query::Tag("body")),
            key: config.focus_key.clone(),
            class: config.focus_class.clone(),
        }
    }

    pub fn on_key<D: Document + ?Sized>(&self, document: &mut D, key: &str) {
        if let Some(body) = self.body.filter(|_| key == self.key) {
            document.set_class(body, &self.class, true);
        }
    }

    pub fn on_mouse_down<D: Document + ?Sized>(&self, document: &mut D) {
        if let Some(body) = self.body {
            document.set_class(body, &self.class, false);
        }
    }
}
