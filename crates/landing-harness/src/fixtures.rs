//! The stock landing page and its two locales.
//!
//! [`landing_page`] reproduces the markup the runtime expects, in document
//! order: head metadata, header with navigation and language buttons, hero,
//! feature cards, workflow steps, the countries counter, the gallery, and the
//! footer year.

use landing_core::ElementId;

use crate::fake_document::{FakeDocument, FakeElement};
use crate::sources::MapSource;

pub const ES_JSON: &str = r#"{
  "meta": {
    "title": "Rutas | Planifica tu viaje",
    "description": "Planifica viajes en grupo sin complicaciones"
  },
  "nav": { "features": "Funciones", "gallery": "Galería" },
  "hero": {
    "title": "Viaja juntos",
    "subtitle": "Todo tu itinerario en un solo lugar"
  },
  "stats": { "countries": "países" },
  "footer": { "rights": "Todos los derechos reservados" }
}"#;

/// English lacks `stats.countries` and leaves `footer.rights` empty.
pub const EN_JSON: &str = r#"{
  "meta": {
    "title": "Rutas | Plan your trip",
    "description": "Group travel planning without the hassle"
  },
  "nav": { "features": "Features", "gallery": "Gallery" },
  "hero": {
    "title": "Travel together",
    "subtitle": "Your whole itinerary in one place"
  },
  "footer": { "rights": "" }
}"#;

/// Locale source serving both fixtures at their default paths.
#[must_use]
pub fn locale_source() -> MapSource {
    MapSource::new()
        .with("./locales/es.json", ES_JSON)
        .with("./locales/en.json", EN_JSON)
}

/// Named handles into [`landing_page`].
#[derive(Debug, Clone)]
pub struct PageHandles {
    pub body: ElementId,
    pub title: ElementId,
    pub description: ElementId,
    pub header: ElementId,
    pub nav_features: ElementId,
    pub nav_gallery: ElementId,
    pub nav_top: ElementId,
    pub nav_missing: ElementId,
    pub lang_es: ElementId,
    pub lang_en: ElementId,
    pub hero_title: ElementId,
    pub hero_subtitle: ElementId,
    pub features: ElementId,
    pub feature_cards: Vec<ElementId>,
    pub workflow_steps: Vec<ElementId>,
    pub countries: ElementId,
    pub countries_label: ElementId,
    pub gallery: ElementId,
    pub track: ElementId,
    pub slides: Vec<ElementId>,
    pub prev: ElementId,
    pub next: ElementId,
    pub dots: Vec<ElementId>,
    pub rights: ElementId,
    pub year: ElementId,
}

/// Number of gallery slides (and dots) on the stock page.
pub const SLIDES: usize = 5;

/// Build the stock page. The first slide and dot start active, the way the
/// markup ships.
#[must_use]
pub fn landing_page() -> (FakeDocument, PageHandles) {
    let mut doc = FakeDocument::new();
    let i18n = |tag: &str, key: &str, text: &str| {
        FakeElement::new(tag).attr("data-i18n", key).text(text)
    };

    let title = doc.push(i18n("title", "meta.title", "Rutas"));
    let description = doc.push(
        FakeElement::new("meta")
            .attr("name", "description")
            .attr("data-i18n", "meta.description")
            .attr("content", ""),
    );
    let body = doc.push(FakeElement::new("body"));
    let header = doc.push(FakeElement::new("header").class("header"));
    let nav_features = doc.push(i18n("a", "nav.features", "Features").attr("href", "#features"));
    let nav_gallery = doc.push(i18n("a", "nav.gallery", "Gallery").attr("href", "#gallery"));
    let nav_top = doc.push(FakeElement::new("a").attr("href", "#"));
    let nav_missing = doc.push(FakeElement::new("a").attr("href", "#pricing"));
    doc.push(FakeElement::new("a").attr("href", "https://example.com/app"));
    let lang_es = doc.push(FakeElement::new("button").class("lang-btn").id("lang-es"));
    let lang_en = doc.push(FakeElement::new("button").class("lang-btn").id("lang-en"));

    let hero_title = doc.push(i18n("h1", "hero.title", ""));
    let hero_subtitle = doc.push(i18n("p", "hero.subtitle", ""));

    let features = doc.push(FakeElement::new("section").id("features").top(640.0));
    let feature_cards = (0..3)
        .map(|_| doc.push(FakeElement::new("div").class("feature-card")))
        .collect();
    let workflow_steps = (0..2)
        .map(|_| doc.push(FakeElement::new("div").class("workflow-step")))
        .collect();

    let countries = doc.push(
        FakeElement::new("span")
            .class("countries-number")
            .attr("data-target", "42")
            .text("0"),
    );
    let countries_label = doc.push(i18n("span", "stats.countries", "countries"));

    let gallery = doc.push(FakeElement::new("section").id("gallery").top(1900.0));
    let track = doc.push(FakeElement::new("div").class("gallery-track"));
    let slides = (0..SLIDES)
        .map(|i| {
            let slide = FakeElement::new("div").class("gallery-item");
            doc.push(if i == 0 { slide.class("active") } else { slide })
        })
        .collect();
    let prev = doc.push(FakeElement::new("button").class("carousel-btn-prev"));
    let next = doc.push(FakeElement::new("button").class("carousel-btn-next"));
    let dots = (0..SLIDES)
        .map(|i| {
            let dot = FakeElement::new("span").class("dot");
            doc.push(if i == 0 { dot.class("active") } else { dot })
        })
        .collect();

    let rights = doc.push(i18n("span", "footer.rights", "All rights reserved"));
    let year = doc.push(FakeElement::new("span").id("current-year"));

    let handles = PageHandles {
        body,
        title,
        description,
        header,
        nav_features,
        nav_gallery,
        nav_top,
        nav_missing,
        lang_es,
        lang_en,
        hero_title,
        hero_subtitle,
        features,
        feature_cards,
        workflow_steps,
        countries,
        countries_label,
        gallery,
        track,
        slides,
        prev,
        next,
        dots,
        rights,
        year,
    };
    (doc, handles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use landing_core::{Document, Query};
    use pretty_assertions::assert_eq;

    #[test]
    fn stock_page_has_every_component() {
        let (mut doc, h) = landing_page();
        assert_eq!(doc.query_all(Query::Class("gallery-item")), h.slides);
        assert_eq!(doc.query_all(Query::Class("dot")), h.dots);
        assert_eq!(doc.query_all(Query::Class("lang-btn")), vec![h.lang_es, h.lang_en]);
        assert_eq!(doc.query_all(Query::AnchorHrefPrefix("#")).len(), 4);
        assert_eq!(doc.query(Query::Id("current-year")), Some(h.year));
        assert_eq!(doc.query(Query::Tag("body")), Some(h.body));
    }
}
