//! Counting-number animation.
//!
//! # Invariants
//!
//! 1. **Non-decreasing**: for a positive target, successive frames never
//!    display a smaller value.
//! 2. **Exact finish**: once progress reaches 1 the displayed value is the
//!    target itself, not `floor` of an eased product.
//! 3. **One shot**: a [`CounterAnimator`] starts at most once.

use tracing::{debug, warn};
use web_time::Duration;

use crate::config::CounterConfig;
use crate::document::{Document, ElementId, Query};
use crate::observe::{IntersectionEntry, ObserverOptions};

/// One animation sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterFrame {
    pub value: i64,
    pub done: bool,
}

/// Cubic ease-out interpolation from 0 to `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: i64,
    duration: Duration,
    start: Option<Duration>,
}

impl CounterAnimation {
    #[must_use]
    pub fn new(target: i64, duration: Duration) -> Self {
        Self {
            target,
            duration,
            start: None,
        }
    }

    #[must_use]
    pub fn target(&self) -> i64 {
        self.target
    }

    /// Sample after `elapsed` since the animation started.
    #[must_use]
    pub fn frame_at(&self, elapsed: Duration) -> CounterFrame {
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };
        if progress >= 1.0 {
            return CounterFrame {
                value: self.target,
                done: true,
            };
        }
        let eased = 1.0 - (1.0 - progress).powi(3);
        CounterFrame {
            value: (eased * self.target as f64).floor() as i64,
            done: false,
        }
    }

    /// Sample at host time `now`. The first call marks the start.
    pub fn advance(&mut self, now: Duration) -> CounterFrame {
        let start = *self.start.get_or_insert(now);
        self.frame_at(now.saturating_sub(start))
    }
}

/// Parse a leading base-10 integer the way `parseInt(s, 10)` does:
/// leading whitespace, an optional sign, then digits up to the first
/// non-digit.
#[must_use]
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// The page's single counter element.
#[derive(Debug, Clone)]
pub struct CounterAnimator {
    element: ElementId,
    options: ObserverOptions,
    animation: CounterAnimation,
    has_animated: bool,
    running: bool,
}

impl CounterAnimator {
    /// `None` when the counter element is absent or its target is not a number.
    pub fn arm<D: Document + ?Sized>(document: &mut D, config: &CounterConfig) -> Option<Self> {
        let element = document.query(Query::Class(&config.counter_class))?;
        let raw = document
            .attribute(element, &config.target_attribute)
            .unwrap_or_default();
        let Some(target) = parse_leading_int(&raw) else {
            warn!(
                target: "landing_core::counter",
                %element,
                raw = %raw,
                "counter target is not an integer; counter disabled"
            );
            return None;
        };
        debug!(
            target: "landing_core::counter",
            %element,
            target_value = target,
            "counter armed"
        );
        Some(Self {
            element,
            options: ObserverOptions::threshold(config.threshold),
            animation: CounterAnimation::new(target, config.duration()),
            has_animated: false,
            running: false,
        })
    }

    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }

    #[must_use]
    pub fn options(&self) -> &ObserverOptions {
        &self.options
    }

    #[must_use]
    pub fn has_animated(&self) -> bool {
        self.has_animated
    }

    /// Returns `true` when this batch started the animation; the host then
    /// unobserves the element and requests the first frame.
    pub fn on_intersections(&mut self, entries: &[IntersectionEntry]) -> bool {
        let visible = entries
            .iter()
            .any(|entry| entry.element == self.element && entry.is_intersecting);
        if !visible || self.has_animated {
            return false;
        }
        self.has_animated = true;
        self.running = true;
        true
    }

    /// Render one frame at host time `now`. Returns whether another frame is needed.
    pub fn on_frame<D: Document + ?Sized>(&mut self, document: &mut D, now: Duration) -> bool {
        if !self.running {
            return false;
        }
        let frame = self.animation.advance(now);
        document.set_text(self.element, &frame.value.to_string());
        if frame.done {
            self.running = false;
        }
        self.running
    }
}
