//! In-memory document.

use std::collections::BTreeMap;

use landing_core::{Document, ElementId, NodeKind, Query};

/// One element of a [`FakeDocument`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FakeElement {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub classes: Vec<String>,
    pub text: String,
    pub styles: BTreeMap<String, String>,
    /// Top edge relative to the viewport.
    pub viewport_top: f64,
}

impl FakeElement {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_owned(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_owned());
        self
    }

    #[must_use]
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_owned(), value.to_owned());
        self
    }

    #[must_use]
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_owned();
        self
    }

    #[must_use]
    pub fn top(mut self, viewport_top: f64) -> Self {
        self.viewport_top = viewport_top;
        self
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn matches(&self, query: Query<'_>) -> bool {
        match query {
            Query::Class(class) => self.has_class(class),
            Query::Attribute(name) => self.attributes.contains_key(name),
            Query::Id(id) => self.attributes.get("id").is_some_and(|v| v == id),
            Query::Tag(tag) => self.tag.eq_ignore_ascii_case(tag),
            Query::AnchorHrefPrefix(prefix) => {
                self.tag.eq_ignore_ascii_case("a")
                    && self
                        .attributes
                        .get("href")
                        .is_some_and(|href| href.starts_with(prefix))
            }
        }
    }
}

/// A flat, ordered list of elements with window scroll state.
#[derive(Debug, Clone, Default)]
pub struct FakeDocument {
    elements: Vec<FakeElement>,
    language: Option<String>,
    scroll_offset: f64,
    scroll_requests: Vec<f64>,
}

impl FakeDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element; elements are returned by queries in push order.
    pub fn push(&mut self, element: FakeElement) -> ElementId {
        let id = ElementId::new(u32::try_from(self.elements.len()).unwrap_or(u32::MAX));
        self.elements.push(element);
        id
    }

    /// # Panics
    ///
    /// Panics on a handle this document did not mint.
    #[must_use]
    pub fn element(&self, id: ElementId) -> &FakeElement {
        &self.elements[id.get() as usize]
    }

    pub fn element_mut(&mut self, id: ElementId) -> &mut FakeElement {
        &mut self.elements[id.get() as usize]
    }

    #[must_use]
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.element(id).has_class(class)
    }

    #[must_use]
    pub fn text_of(&self, id: ElementId) -> &str {
        &self.element(id).text
    }

    #[must_use]
    pub fn attribute_of(&self, id: ElementId, name: &str) -> Option<&str> {
        self.element(id).attributes.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn style_of(&self, id: ElementId, property: &str) -> Option<&str> {
        self.element(id).styles.get(property).map(String::as_str)
    }

    /// Elements among `ids` carrying `class`.
    #[must_use]
    pub fn with_class(&self, ids: &[ElementId], class: &str) -> Vec<ElementId> {
        ids.iter()
            .copied()
            .filter(|id| self.has_class(*id, class))
            .collect()
    }

    /// The document `lang` attribute, once set.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset;
    }

    /// Every smooth scroll requested so far.
    #[must_use]
    pub fn scroll_requests(&self) -> &[f64] {
        &self.scroll_requests
    }
}

impl Document for FakeDocument {
    fn query_all(&mut self, query: Query<'_>) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, element)| element.matches(query))
            .map(|(index, _)| ElementId::new(u32::try_from(index).unwrap_or(u32::MAX)))
            .collect()
    }

    fn kind(&self, element: ElementId) -> NodeKind {
        NodeKind::from_tag(&self.element(element).tag)
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.element(element).attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        self.element_mut(element)
            .attributes
            .insert(name.to_owned(), value.to_owned());
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        self.element_mut(element).text = text.to_owned();
    }

    fn set_class(&mut self, element: ElementId, class: &str, present: bool) {
        let classes = &mut self.element_mut(element).classes;
        let has = classes.iter().any(|c| c == class);
        if present && !has {
            classes.push(class.to_owned());
        } else if !present {
            classes.retain(|c| c != class);
        }
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        self.element_mut(element)
            .styles
            .insert(property.to_owned(), value.to_owned());
    }

    fn set_document_language(&mut self, code: &str) {
        self.language = Some(code.to_owned());
    }

    fn viewport_top(&self, element: ElementId) -> f64 {
        self.element(element).viewport_top
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn smooth_scroll_to(&mut self, top: f64) {
        self.scroll_requests.push(top);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queries_match_structurally() {
        let mut doc = FakeDocument::new();
        let card = doc.push(FakeElement::new("div").class("feature-card"));
        let link = doc.push(FakeElement::new("a").attr("href", "#features"));
        let external = doc.push(FakeElement::new("a").attr("href", "https://example.com"));
        let title = doc.push(FakeElement::new("TITLE").attr("data-i18n", "meta.title"));
        let section = doc.push(FakeElement::new("section").id("features"));

        assert_eq!(doc.query_all(Query::Class("feature-card")), vec![card]);
        assert_eq!(doc.query_all(Query::AnchorHrefPrefix("#")), vec![link]);
        assert_eq!(doc.query_all(Query::Attribute("data-i18n")), vec![title]);
        assert_eq!(doc.query(Query::Id("features")), Some(section));
        assert_eq!(doc.query(Query::Tag("title")), Some(title));
        assert!(!doc.query_all(Query::Tag("a")).is_empty());
        assert_eq!(doc.kind(title), NodeKind::Title);
        assert_eq!(doc.kind(external), NodeKind::Other);
    }

    #[test]
    fn set_class_is_idempotent() {
        let mut doc = FakeDocument::new();
        let dot = doc.push(FakeElement::new("span").class("dot"));
        doc.set_class(dot, "active", true);
        doc.set_class(dot, "active", true);
        assert_eq!(doc.element(dot).classes, vec!["dot", "active"]);
        doc.set_class(dot, "active", false);
        assert!(!doc.has_class(dot, "active"));
    }
}
