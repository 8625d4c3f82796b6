//! Image carousel: index state machine, swipe detection, and rendering.
//!
//! All inputs (buttons, dots, arrow keys, swipes) map onto three transitions
//! of [`CarouselState`]. After every transition exactly one slide and at most
//! one dot carry the active class, both matching the index.

use tracing::debug;

use crate::config::CarouselConfig;
use crate::document::{Document, ElementId, Query};

/// Active slide index over a fixed number of slides.
///
/// Invariant: `len >= 1` and `index < len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    index: usize,
    len: usize,
}

impl CarouselState {
    /// `None` for an empty carousel.
    #[must_use]
    pub const fn new(len: usize) -> Option<Self> {
        if len == 0 {
            None
        } else {
            Some(Self { index: 0, len })
        }
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    pub fn next(&mut self) -> usize {
        self.index = (self.index + 1) % self.len;
        self.index
    }

    pub fn prev(&mut self) -> usize {
        self.index = (self.index + self.len - 1) % self.len;
        self.index
    }

    /// Jump to `index`. Out-of-range targets are ignored and return `false`.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.index = index;
        true
    }
}

/// Direction of a completed swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved left: show the next slide.
    Left,
    /// Finger moved right: show the previous slide.
    Right,
}

/// Horizontal swipe detection from touch start/end positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeTracker {
    threshold: f64,
    start_x: f64,
}

impl SwipeTracker {
    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start_x: 0.0,
        }
    }

    pub fn touch_start(&mut self, screen_x: f64) {
        self.start_x = screen_x;
    }

    /// A swipe needs a displacement strictly greater than the threshold.
    #[must_use]
    pub fn touch_end(&self, screen_x: f64) -> Option<SwipeDirection> {
        let diff = self.start_x - screen_x;
        if !(diff.abs() > self.threshold) {
            return None;
        }
        Some(if diff > 0.0 {
            SwipeDirection::Left
        } else {
            SwipeDirection::Right
        })
    }
}

/// The armed carousel with its element handles.
#[derive(Debug, Clone)]
pub struct Carousel {
    state: CarouselState,
    track: ElementId,
    slides: Vec<ElementId>,
    dots: Vec<ElementId>,
    prev_button: Option<ElementId>,
    next_button: Option<ElementId>,
    swipe: SwipeTracker,
    active_class: String,
    prev_key: String,
    next_key: String,
}

impl Carousel {
    /// `None` when the track or every slide is missing.
    pub fn arm<D: Document + ?Sized>(document: &mut D, config: &CarouselConfig) -> Option<Self> {
        let track = document.query(Query::Class(&config.track_class))?;
        let slides = document.query_all(Query::Class(&config.item_class));
        let state = CarouselState::new(slides.len())?;
        let carousel = Self {
            state,
            track,
            dots: document.query_all(Query::Class(&config.dot_class)),
            prev_button: document.query(Query::Class(&config.prev_class)),
            next_button: document.query(Query::Class(&config.next_class)),
            slides,
            swipe: SwipeTracker::new(config.swipe_threshold_px),
            active_class: config.active_class.clone(),
            prev_key: config.prev_key.clone(),
            next_key: config.next_key.clone(),
        };
        debug!(
            target: "landing_core::carousel",
            slides = carousel.slides.len(),
            dots = carousel.dots.len(),
            buttons = carousel.prev_button.is_some() as u8 + carousel.next_button.is_some() as u8,
            "carousel armed"
        );
        Some(carousel)
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.state.index()
    }

    #[must_use]
    pub fn state(&self) -> CarouselState {
        self.state
    }

    #[must_use]
    pub fn track(&self) -> ElementId {
        self.track
    }

    #[must_use]
    pub fn dots(&self) -> &[ElementId] {
        &self.dots
    }

    #[must_use]
    pub fn slides(&self) -> &[ElementId] {
        &self.slides
    }

    #[must_use]
    pub fn prev_button(&self) -> Option<ElementId> {
        self.prev_button
    }

    #[must_use]
    pub fn next_button(&self) -> Option<ElementId> {
        self.next_button
    }

    pub fn next<D: Document + ?Sized>(&mut self, document: &mut D) {
        self.state.next();
        self.render(document);
    }

    pub fn prev<D: Document + ?Sized>(&mut self, document: &mut D) {
        self.state.prev();
        self.render(document);
    }

    pub fn go_to<D: Document + ?Sized>(&mut self, document: &mut D, index: usize) {
        if self.state.go_to(index) {
            self.render(document);
        } else {
            debug!(
                target: "landing_core::carousel",
                index,
                slides = self.state.len(),
                "ignoring out-of-range slide"
            );
        }
    }

    /// Route a click. Returns whether the element belonged to the carousel.
    pub fn on_click<D: Document + ?Sized>(&mut self, document: &mut D, element: ElementId) -> bool {
        if self.next_button == Some(element) {
            self.next(document);
        } else if self.prev_button == Some(element) {
            self.prev(document);
        } else if let Some(index) = self.dots.iter().position(|dot| *dot == element) {
            self.go_to(document, index);
        } else {
            return false;
        }
        true
    }

    /// Document-level keydown. Returns whether the key moved the carousel.
    pub fn on_key<D: Document + ?Sized>(&mut self, document: &mut D, key: &str) -> bool {
        if key == self.prev_key {
            self.prev(document);
        } else if key == self.next_key {
            self.next(document);
        } else {
            return false;
        }
        true
    }

    pub fn touch_start(&mut self, screen_x: f64) {
        self.swipe.touch_start(screen_x);
    }

    /// Finish a touch on the track, moving the carousel on a swipe.
    pub fn touch_end<D: Document + ?Sized>(
        &mut self,
        document: &mut D,
        screen_x: f64,
    ) -> Option<SwipeDirection> {
        let direction = self.swipe.touch_end(screen_x)?;
        match direction {
            SwipeDirection::Left => self.next(document),
            SwipeDirection::Right => self.prev(document),
        }
        Some(direction)
    }

    /// Mark the active slide and dot.
    pub fn render<D: Document + ?Sized>(&self, document: &mut D) {
        let index = self.state.index();
        for (i, slide) in self.slides.iter().enumerate() {
            document.set_class(*slide, &self.active_class, i == index);
        }
        for (i, dot) in self.dots.iter().enumerate() {
            document.set_class(*dot, &self.active_class, i == index);
        }
    }
}
