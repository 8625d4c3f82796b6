//! One-shot scroll reveal of feature cards and workflow steps.
//!
//! The host observes every target with [`RevealAnimator::options`]. For each
//! intersection batch, [`RevealAnimator::on_intersections`] returns the
//! elements to reveal with their stagger delay; the host unobserves them
//! immediately and calls [`RevealAnimator::reveal`] when each delay elapses.
//!
//! The stagger index is the entry's position in its batch (non-intersecting
//! entries included), not a stable per-element order.

use std::collections::BTreeSet;

use tracing::debug;
use web_time::Duration;

use crate::config::RevealConfig;
use crate::document::{Document, ElementId, Query};
use crate::observe::{IntersectionEntry, ObserverOptions};

/// A pending reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealSchedule {
    pub element: ElementId,
    pub delay: Duration,
}

#[derive(Debug, Clone)]
pub struct RevealAnimator {
    targets: Vec<ElementId>,
    /// Elements already triggered (scheduled or revealed).
    triggered: BTreeSet<ElementId>,
    options: ObserverOptions,
    stagger: Duration,
    revealed_class: String,
}

impl RevealAnimator {
    /// Collect reveal targets. `None` when the page has none.
    pub fn arm<D: Document + ?Sized>(document: &mut D, config: &RevealConfig) -> Option<Self> {
        let mut targets = Vec::new();
        for class in &config.target_classes {
            for element in document.query_all(Query::Class(class)) {
                if !targets.contains(&element) {
                    targets.push(element);
                }
            }
        }
        if targets.is_empty() {
            return None;
        }
        debug!(
            target: "landing_core::reveal",
            targets = targets.len(),
            "reveal animator armed"
        );
        Some(Self {
            targets,
            triggered: BTreeSet::new(),
            options: ObserverOptions::new(config.threshold, config.root_margin.clone()),
            stagger: config.stagger(),
            revealed_class: config.revealed_class.clone(),
        })
    }

    /// Elements the host must observe.
    #[must_use]
    pub fn targets(&self) -> &[ElementId] {
        &self.targets
    }

    #[must_use]
    pub fn options(&self) -> &ObserverOptions {
        &self.options
    }

    /// Whether `element` has been triggered.
    #[must_use]
    pub fn is_triggered(&self, element: ElementId) -> bool {
        self.triggered.contains(&element)
    }

    /// Handle one intersection batch.
    ///
    /// Each returned element must be unobserved by the host; it never
    /// triggers again.
    pub fn on_intersections(&mut self, entries: &[IntersectionEntry]) -> Vec<RevealSchedule> {
        let mut scheduled = Vec::new();
        for (index, entry) in entries.iter().enumerate() {
            if !entry.is_intersecting || !self.targets.contains(&entry.element) {
                continue;
            }
            if !self.triggered.insert(entry.element) {
                continue;
            }
            let delay = self
                .stagger
                .saturating_mul(u32::try_from(index).unwrap_or(u32::MAX));
            scheduled.push(RevealSchedule {
                element: entry.element,
                delay,
            });
        }
        scheduled
    }

    /// Apply the revealed class once a scheduled delay has elapsed.
    pub fn reveal<D: Document + ?Sized>(&self, document: &mut D, element: ElementId) {
        if self.triggered.contains(&element) {
            document.set_class(element, &self.revealed_class, true);
        }
    }
}
