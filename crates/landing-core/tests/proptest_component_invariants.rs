//! Property-based invariant tests for the carousel, counter and reveal.
//!
//! These tests verify invariants that must hold for any input sequence:
//!
//! 1. The carousel index always stays below the slide count.
//! 2. `next` followed by `prev` returns to the starting slide.
//! 3. After any input sequence exactly one slide and one dot are active.
//! 4. Counter values never decrease and never exceed the target.
//! 5. The counter's last frame shows the exact target.
//! 6. No reveal target is ever scheduled twice.

use std::collections::BTreeSet;

use landing_core::{
    CarouselState, CounterAnimation, IntersectionEntry, LandingConfig, Page, PageEvent,
    SwipeDirection, SwipeTracker,
};
use landing_harness::{SLIDES, landing_page};
use proptest::prelude::*;
use web_time::Duration;

#[derive(Debug, Clone)]
enum Input {
    Next,
    Prev,
    Dot(usize),
    Key(bool),
    Swipe { from: f64, to: f64 },
}

fn input() -> impl Strategy<Value = Input> {
    prop_oneof![
        Just(Input::Next),
        Just(Input::Prev),
        (0..SLIDES).prop_map(Input::Dot),
        any::<bool>().prop_map(Input::Key),
        (0.0f64..400.0, 0.0f64..400.0).prop_map(|(from, to)| Input::Swipe { from, to }),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Carousel state
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn index_stays_in_bounds(len in 1usize..20, steps in prop::collection::vec(0u8..3, 0..64)) {
        let mut state = CarouselState::new(len).unwrap();
        for step in steps {
            match step {
                0 => { state.next(); }
                1 => { state.prev(); }
                _ => { state.go_to(len); }
            }
            prop_assert!(state.index() < state.len());
        }
    }

    #[test]
    fn next_then_prev_is_identity(len in 1usize..20, start in 0usize..20) {
        let mut state = CarouselState::new(len).unwrap();
        state.go_to(start % len);
        let before = state.index();
        state.next();
        state.prev();
        prop_assert_eq!(state.index(), before);
    }

    #[test]
    fn swipe_direction_matches_displacement(start in -500.0f64..500.0, end in -500.0f64..500.0) {
        let mut swipe = SwipeTracker::new(50.0);
        swipe.touch_start(start);
        let diff = start - end;
        match swipe.touch_end(end) {
            Some(SwipeDirection::Left) => prop_assert!(diff > 50.0),
            Some(SwipeDirection::Right) => prop_assert!(diff < -50.0),
            None => prop_assert!(diff.abs() <= 50.0),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Rendered carousel
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn exactly_one_active_slide(inputs in prop::collection::vec(input(), 0..40)) {
        let (mut doc, h) = landing_page();
        let mut page = Page::arm(LandingConfig::default(), &mut doc);
        for input in inputs {
            match input {
                Input::Next => { page.handle(&mut doc, PageEvent::Click(h.next)); }
                Input::Prev => { page.handle(&mut doc, PageEvent::Click(h.prev)); }
                Input::Dot(i) => { page.handle(&mut doc, PageEvent::Click(h.dots[i])); }
                Input::Key(right) => {
                    let key = if right { "ArrowRight" } else { "ArrowLeft" };
                    page.handle(&mut doc, PageEvent::KeyDown(key));
                }
                Input::Swipe { from, to } => {
                    page.handle(&mut doc, PageEvent::TouchStart { screen_x: from });
                    page.handle(&mut doc, PageEvent::TouchEnd { screen_x: to });
                }
            }
        }
        let index = page.carousel().unwrap().index();
        prop_assert_eq!(doc.with_class(&h.slides, "active"), vec![h.slides[index]]);
        prop_assert_eq!(doc.with_class(&h.dots, "active"), vec![h.dots[index]]);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4-5. Counter
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn counter_is_monotonic_and_bounded(
        target in 0i64..1_000_000,
        duration_ms in 1u64..5000,
        mut samples in prop::collection::vec(0u64..6000, 1..50),
    ) {
        samples.sort_unstable();
        let anim = CounterAnimation::new(target, Duration::from_millis(duration_ms));
        let mut last = 0;
        for at in samples {
            let frame = anim.frame_at(Duration::from_millis(at));
            prop_assert!(frame.value >= last);
            prop_assert!(frame.value <= target);
            prop_assert_eq!(frame.done, at >= duration_ms);
            last = frame.value;
        }
        prop_assert_eq!(anim.frame_at(Duration::from_millis(duration_ms)).value, target);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Reveal
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn reveal_schedules_each_target_once(
        batches in prop::collection::vec(prop::collection::vec((0usize..5, any::<bool>()), 0..6), 0..10),
    ) {
        let (mut doc, h) = landing_page();
        let mut page = Page::arm(LandingConfig::default(), &mut doc);
        let targets: Vec<_> = h.feature_cards.iter().chain(&h.workflow_steps).copied().collect();
        let mut seen = BTreeSet::new();
        for batch in batches {
            let entries: Vec<IntersectionEntry> = batch
                .into_iter()
                .map(|(i, visible)| IntersectionEntry { element: targets[i], is_intersecting: visible })
                .collect();
            let effects = page.handle(&mut doc, PageEvent::RevealIntersections(&entries));
            for scheduled in effects.reveal_timers {
                prop_assert!(seen.insert(scheduled.element));
            }
        }
    }
}
