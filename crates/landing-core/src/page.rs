//! Platform-independent page runner.
//!
//! [`Page`] owns every armed component. The host forwards DOM events as
//! [`PageEvent`]s and carries out the returned [`Effects`] (prevent default,
//! fetch a locale, start timers, unobserve elements, request a frame). No
//! JS/WASM types here.

use std::borrow::Cow;

use landing_i18n::{LoadError, LoadOutcome, LoadRequest, Locale, LocaleSource};
use tracing::debug;
use web_time::Duration;

use crate::carousel::Carousel;
use crate::chrome::{FocusHint, HeaderShadow, stamp_current_year};
use crate::config::LandingConfig;
use crate::counter::CounterAnimator;
use crate::document::{Document, ElementId, PreferenceStore};
use crate::localizer::Localizer;
use crate::observe::IntersectionEntry;
use crate::reveal::{RevealAnimator, RevealSchedule};
use crate::scroll::SmoothScrollRouter;

/// One host event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent<'a> {
    /// Click on an element the page registered interest in.
    Click(ElementId),
    /// Document-level keydown, with the DOM `key` value.
    KeyDown(&'a str),
    /// Document-level mousedown.
    MouseDown,
    /// `touchstart` on the carousel track.
    TouchStart { screen_x: f64 },
    /// `touchend` on the carousel track.
    TouchEnd { screen_x: f64 },
    /// Window scroll, with the new vertical offset.
    Scroll { offset_y: f64 },
    /// A batch from the reveal observer.
    RevealIntersections(&'a [IntersectionEntry]),
    /// A batch from the counter observer.
    CounterIntersections(&'a [IntersectionEntry]),
    /// A reveal delay elapsed.
    RevealTimer(ElementId),
    /// `requestAnimationFrame` callback at host time `now`.
    AnimationFrame { now: Duration },
}

/// What the host must do after an event.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Effects {
    /// Cancel the DOM event's default action.
    pub prevent_default: bool,
    /// Fetch this locale and hand it to [`Page::finish_load`].
    pub load: Option<LoadRequest>,
    /// Start these reveal timers.
    pub reveal_timers: Vec<RevealSchedule>,
    /// Stop observing these elements.
    pub unobserve: Vec<ElementId>,
    /// Schedule another animation frame.
    pub request_frame: bool,
}

/// All components of one page.
#[derive(Debug)]
pub struct Page {
    config: LandingConfig,
    localizer: Localizer,
    reveal: Option<RevealAnimator>,
    counter: Option<CounterAnimator>,
    carousel: Option<Carousel>,
    scroll: Option<SmoothScrollRouter>,
    header: HeaderShadow,
    focus: FocusHint,
}

impl Page {
    /// Scan the document once and arm every applicable component.
    pub fn arm<D: Document + ?Sized>(config: LandingConfig, document: &mut D) -> Self {
        let mut localizer = Localizer::new(config.i18n.clone());
        localizer.arm(document);
        let page = Self {
            reveal: RevealAnimator::arm(document, &config.reveal),
            counter: CounterAnimator::arm(document, &config.counter),
            carousel: Carousel::arm(document, &config.carousel),
            scroll: SmoothScrollRouter::arm(document, &config.scroll),
            header: HeaderShadow::new(&config.chrome),
            focus: FocusHint::arm(document, &config.chrome),
            localizer,
            config,
        };
        debug!(
            target: "landing_core::page",
            reveal = page.reveal.is_some(),
            counter = page.counter.is_some(),
            carousel = page.carousel.is_some(),
            smooth_scroll = page.scroll.is_some(),
            "page armed"
        );
        page
    }

    #[must_use]
    pub fn config(&self) -> &LandingConfig {
        &self.config
    }

    #[must_use]
    pub fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    #[must_use]
    pub fn reveal(&self) -> Option<&RevealAnimator> {
        self.reveal.as_ref()
    }

    #[must_use]
    pub fn counter(&self) -> Option<&CounterAnimator> {
        self.counter.as_ref()
    }

    #[must_use]
    pub fn carousel(&self) -> Option<&Carousel> {
        self.carousel.as_ref()
    }

    #[must_use]
    pub fn smooth_scroll(&self) -> Option<&SmoothScrollRouter> {
        self.scroll.as_ref()
    }

    /// Every element whose clicks the host must forward, deduplicated.
    #[must_use]
    pub fn click_targets(&self) -> Vec<ElementId> {
        let mut targets: Vec<ElementId> = self.localizer.switcher().controls().collect();
        if let Some(carousel) = &self.carousel {
            targets.extend(carousel.prev_button());
            targets.extend(carousel.next_button());
            targets.extend_from_slice(carousel.dots());
        }
        if let Some(scroll) = &self.scroll {
            targets.extend_from_slice(scroll.links());
        }
        let mut seen = std::collections::BTreeSet::new();
        targets.retain(|target| seen.insert(*target));
        targets
    }

    #[must_use]
    pub fn current_language(&self) -> &str {
        self.localizer.current_language()
    }

    #[must_use]
    pub fn translate<'a>(&'a self, key: &'a str) -> Cow<'a, str> {
        self.localizer.translate(key)
    }

    /// The first locale request, from preference, browser tag, or default.
    #[must_use]
    pub fn initial_load<P: PreferenceStore + ?Sized>(
        &self,
        preferences: &P,
        browser_tag: Option<&str>,
    ) -> LoadRequest {
        let code = self.localizer.initial_language(preferences, browser_tag);
        self.localizer.begin_load(&code)
    }

    /// Script-requested language change.
    #[must_use]
    pub fn request_language(&self, code: &str) -> LoadRequest {
        self.localizer.begin_load(code)
    }

    pub fn finish_load<D, P>(
        &mut self,
        document: &mut D,
        preferences: &mut P,
        request: LoadRequest,
        fetched: Result<String, LoadError>,
    ) -> LoadOutcome
    where
        D: Document + ?Sized,
        P: PreferenceStore + ?Sized,
    {
        self.localizer.finish_load(document, preferences, request, fetched)
    }

    /// Blocking load, for hosts with synchronous resource access.
    pub fn load_with<S, D, P>(
        &mut self,
        source: &S,
        document: &mut D,
        preferences: &mut P,
        code: &str,
    ) -> Result<Locale, LoadError>
    where
        S: LocaleSource + ?Sized,
        D: Document + ?Sized,
        P: PreferenceStore + ?Sized,
    {
        self.localizer.load_with(source, document, preferences, code)
    }

    /// Footer year.
    pub fn stamp_year<D: Document + ?Sized>(&self, document: &mut D, year: i32) -> bool {
        stamp_current_year(document, &self.config.chrome, year)
    }

    /// Dispatch one host event.
    pub fn handle<D: Document + ?Sized>(
        &mut self,
        document: &mut D,
        event: PageEvent<'_>,
    ) -> Effects {
        let mut effects = Effects::default();
        match event {
            PageEvent::Click(element) => {
                effects.load = self.localizer.on_click(element);
                if let Some(carousel) = &mut self.carousel {
                    carousel.on_click(document, element);
                }
                if let Some(scroll) = &self.scroll {
                    effects.prevent_default = scroll.on_click(document, element).prevents_default();
                }
            }
            PageEvent::KeyDown(key) => {
                if let Some(carousel) = &mut self.carousel {
                    carousel.on_key(document, key);
                }
                self.focus.on_key(document, key);
            }
            PageEvent::MouseDown => self.focus.on_mouse_down(document),
            PageEvent::TouchStart { screen_x } => {
                if let Some(carousel) = &mut self.carousel {
                    carousel.touch_start(screen_x);
                }
            }
            PageEvent::TouchEnd { screen_x } => {
                if let Some(carousel) = &mut self.carousel {
                    carousel.touch_end(document, screen_x);
                }
            }
            PageEvent::Scroll { offset_y } => self.header.on_scroll(document, offset_y),
            PageEvent::RevealIntersections(entries) => {
                if let Some(reveal) = &mut self.reveal {
                    let scheduled = reveal.on_intersections(entries);
                    effects.unobserve = scheduled.iter().map(|s| s.element).collect();
                    effects.reveal_timers = scheduled;
                }
            }
            PageEvent::CounterIntersections(entries) => {
                if let Some(counter) = &mut self.counter {
                    if counter.on_intersections(entries) {
                        effects.unobserve.push(counter.element());
                        effects.request_frame = true;
                    }
                }
            }
            PageEvent::RevealTimer(element) => {
                if let Some(reveal) = &self.reveal {
                    reveal.reveal(document, element);
                }
            }
            PageEvent::AnimationFrame { now } => {
                if let Some(counter) = &mut self.counter {
                    effects.request_frame = counter.on_frame(document, now);
                }
            }
        }
        effects
    }
}
