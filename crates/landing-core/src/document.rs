//! The injected view of the page.
//!
//! [`Document`] is the only way components read or mutate the page. Element
//! handles are opaque [`ElementId`]s minted by the implementation; the same
//! DOM node must always map to the same id for the lifetime of the page.

use std::fmt;

/// Opaque handle to one element of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

impl ElementId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Typed element query. Implementations map these onto their own lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query<'a> {
    /// Elements carrying the class (`.name`).
    Class(&'a str),
    /// Elements carrying the attribute (`[name]`).
    Attribute(&'a str),
    /// The element with this id.
    Id(&'a str),
    /// Elements with this tag name.
    Tag(&'a str),
    /// Anchors whose `href` starts with the prefix (`a[href^="prefix"]`).
    AnchorHrefPrefix(&'a str),
}

impl Query<'_> {
    /// CSS selector equivalent.
    #[must_use]
    pub fn to_selector(&self) -> String {
        match self {
            Self::Class(name) => format!(".{name}"),
            Self::Attribute(name) => format!("[{name}]"),
            Self::Id(id) => format!("#{id}"),
            Self::Tag(tag) => (*tag).to_owned(),
            Self::AnchorHrefPrefix(prefix) => {
                format!("a[href^=\"{}\"]", prefix.replace('"', "\\\""))
            }
        }
    }
}

/// How a translated string is written into a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// `<meta>`: the string goes into the `content` attribute.
    Meta,
    /// `<title>`: text content.
    Title,
    /// Anything else: text content.
    Other,
}

impl NodeKind {
    /// Classify by (case-insensitive) tag name.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("meta") {
            Self::Meta
        } else if tag.eq_ignore_ascii_case("title") {
            Self::Title
        } else {
            Self::Other
        }
    }
}

/// Read/update access to the page.
pub trait Document {
    /// Every element matching `query`, in document order.
    fn query_all(&mut self, query: Query<'_>) -> Vec<ElementId>;

    /// First element matching `query`.
    fn query(&mut self, query: Query<'_>) -> Option<ElementId> {
        self.query_all(query).into_iter().next()
    }

    /// Tag-derived kind of the element.
    fn kind(&self, element: ElementId) -> NodeKind;

    /// Attribute value, if present.
    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);

    fn set_text(&mut self, element: ElementId, text: &str);

    /// Add (`present = true`) or remove a class.
    fn set_class(&mut self, element: ElementId, class: &str, present: bool);

    /// Set one inline style property.
    fn set_style(&mut self, element: ElementId, property: &str, value: &str);

    /// The page-level `lang` attribute.
    fn set_document_language(&mut self, code: &str);

    /// Element top relative to the viewport, in CSS pixels.
    fn viewport_top(&self, element: ElementId) -> f64;

    /// Current vertical scroll offset of the window.
    fn scroll_offset(&self) -> f64;

    /// Start a smooth scroll to the absolute vertical position.
    fn smooth_scroll_to(&mut self, top: f64);
}

/// Persisted string preferences (browser local storage).
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Best effort; implementations may drop writes they cannot persist.
    fn set(&mut self, key: &str, value: &str);
}
