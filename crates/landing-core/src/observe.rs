//! Viewport-intersection observation, as seen by components.

use crate::document::ElementId;

/// Options a host passes to its intersection observer.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    /// Visible fraction that counts as intersecting.
    pub threshold: f64,
    /// CSS margin applied to the root (viewport) box.
    pub root_margin: String,
}

impl ObserverOptions {
    #[must_use]
    pub fn new(threshold: f64, root_margin: impl Into<String>) -> Self {
        Self {
            threshold,
            root_margin: root_margin.into(),
        }
    }

    /// Threshold only, no margin.
    #[must_use]
    pub fn threshold(threshold: f64) -> Self {
        Self::new(threshold, "0px")
    }
}

/// One entry of an intersection batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionEntry {
    pub element: ElementId,
    pub is_intersecting: bool,
}

impl IntersectionEntry {
    #[must_use]
    pub const fn entering(element: ElementId) -> Self {
        Self {
            element,
            is_intersecting: true,
        }
    }

    #[must_use]
    pub const fn leaving(element: ElementId) -> Self {
        Self {
            element,
            is_intersecting: false,
        }
    }
}
