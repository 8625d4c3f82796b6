//! Smooth scrolling for in-page anchor links.

use tracing::debug;

use crate::config::ScrollConfig;
use crate::document::{Document, ElementId, Query};

/// What the host should do with an anchor click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnchorAction {
    /// Let the browser navigate normally.
    Default,
    /// Default navigation was replaced by a smooth scroll to `top`.
    SmoothScroll { top: f64 },
}

impl AnchorAction {
    #[must_use]
    pub fn prevents_default(&self) -> bool {
        matches!(self, Self::SmoothScroll { .. })
    }
}

/// Absolute scroll position that places an element just below the header.
#[must_use]
pub fn scroll_target(viewport_top: f64, scroll_offset: f64, header_offset: f64) -> f64 {
    viewport_top + scroll_offset - header_offset
}

#[derive(Debug, Clone)]
pub struct SmoothScrollRouter {
    links: Vec<ElementId>,
    header_offset: f64,
}

impl SmoothScrollRouter {
    /// `None` when the page has no in-page links.
    pub fn arm<D: Document + ?Sized>(document: &mut D, config: &ScrollConfig) -> Option<Self> {
        let links = document.query_all(Query::AnchorHrefPrefix(&config.href_prefix));
        if links.is_empty() {
            return None;
        }
        debug!(
            target: "landing_core::scroll",
            links = links.len(),
            "smooth scroll armed"
        );
        Some(Self {
            links,
            header_offset: config.header_offset_px,
        })
    }

    #[must_use]
    pub fn links(&self) -> &[ElementId] {
        &self.links
    }

    /// Handle a click on `link`, scrolling when its target exists.
    pub fn on_click<D: Document + ?Sized>(&self, document: &mut D, link: ElementId) -> AnchorAction {
        if !self.links.contains(&link) {
            return AnchorAction::Default;
        }
        let href = document.attribute(link, "href").unwrap_or_default();
        let Some(id) = href.strip_prefix('#').filter(|id| !id.is_empty()) else {
            return AnchorAction::Default;
        };
        let Some(target) = document.query(Query::Id(id)) else {
            debug!(target: "landing_core::scroll", href = %href, "anchor target not found");
            return AnchorAction::Default;
        };
        let top = scroll_target(
            document.viewport_top(target),
            document.scroll_offset(),
            self.header_offset,
        );
        document.smooth_scroll_to(top);
        AnchorAction::SmoothScroll { top }
    }
}
