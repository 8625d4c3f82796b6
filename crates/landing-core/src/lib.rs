#![forbid(unsafe_code)]

//! Host-driven page behaviors for the landing page.
//!
//! Design goals:
//! - **Injected view**: components talk to the page only through the
//!   [`Document`] and [`PreferenceStore`] traits, so every behavior runs
//!   against an in-memory page in tests.
//! - **Host-driven time**: animation frames and timers are pushed in by the
//!   host as timestamps; nothing here sleeps, polls, or reads a wall clock.
//! - **No blocking**: locale fetches are performed by the host and fed back
//!   through [`Localizer::finish_load`].
//!
//! Components are armed once by scanning the document. An absent optional
//! element means the component is simply not armed.

pub mod carousel;
pub mod chrome;
pub mod clock;
pub mod config;
pub mod counter;
pub mod document;
pub mod localizer;
pub mod observe;
pub mod page;
pub mod reveal;
pub mod scroll;

pub use carousel::{Carousel, CarouselState, SwipeDirection, SwipeTracker};
pub use chrome::{FocusHint, HeaderShadow, stamp_current_year};
pub use clock::{DeterministicClock, millis_to_duration};
pub use config::{
    CarouselConfig, ChromeConfig, ConfigError, CounterConfig, LandingConfig, RevealConfig,
    ScrollConfig,
};
pub use counter::{CounterAnimation, CounterAnimator, CounterFrame, parse_leading_int};
pub use document::{Document, ElementId, NodeKind, PreferenceStore, Query};
pub use localizer::{LanguageSwitcher, Localizer, translate_page};
pub use observe::{IntersectionEntry, ObserverOptions};
pub use page::{Effects, Page, PageEvent};
pub use reveal::{RevealAnimator, RevealSchedule};
pub use scroll::{AnchorAction, SmoothScrollRouter, scroll_target};

pub use landing_i18n;
