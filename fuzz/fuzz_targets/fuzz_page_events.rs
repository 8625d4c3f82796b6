#![no_main]

use arbitrary::Arbitrary;
use landing_core::{IntersectionEntry, LandingConfig, Page, PageEvent};
use landing_harness::landing_page;
use libfuzzer_sys::fuzz_target;
use std::time::Duration;

#[derive(Debug, Arbitrary)]
enum Op {
    Click(u8),
    Key(bool),
    Swipe(i16, i16),
    Scroll(u16),
    Reveal(Vec<(u8, bool)>),
    Counter(bool),
    Frame(u16),
}

fuzz_target!(|ops: Vec<Op>| {
    let (mut doc, h) = landing_page();
    let mut page = Page::arm(LandingConfig::default(), &mut doc);
    let clickable = page.click_targets();
    let revealable: Vec<_> = h.feature_cards.iter().chain(&h.workflow_steps).copied().collect();
    let mut now = Duration::ZERO;

    for op in ops.into_iter().take(256) {
        match op {
            Op::Click(i) => {
                if let Some(target) = clickable.get(usize::from(i) % clickable.len().max(1)) {
                    page.handle(&mut doc, PageEvent::Click(*target));
                }
            }
            Op::Key(right) => {
                let key = if right { "ArrowRight" } else { "ArrowLeft" };
                page.handle(&mut doc, PageEvent::KeyDown(key));
            }
            Op::Swipe(from, to) => {
                page.handle(&mut doc, PageEvent::TouchStart { screen_x: f64::from(from) });
                page.handle(&mut doc, PageEvent::TouchEnd { screen_x: f64::from(to) });
            }
            Op::Scroll(y) => {
                page.handle(&mut doc, PageEvent::Scroll { offset_y: f64::from(y) });
            }
            Op::Reveal(batch) => {
                let entries: Vec<IntersectionEntry> = batch
                    .into_iter()
                    .map(|(i, visible)| IntersectionEntry {
                        element: revealable[usize::from(i) % revealable.len()],
                        is_intersecting: visible,
                    })
                    .collect();
                let effects = page.handle(&mut doc, PageEvent::RevealIntersections(&entries));
                for timer in effects.reveal_timers {
                    page.handle(&mut doc, PageEvent::RevealTimer(timer.element));
                }
            }
            Op::Counter(visible) => {
                let entry = IntersectionEntry { element: h.countries, is_intersecting: visible };
                page.handle(&mut doc, PageEvent::CounterIntersections(&[entry]));
            }
            Op::Frame(dt) => {
                now += Duration::from_millis(u64::from(dt));
                page.handle(&mut doc, PageEvent::AnimationFrame { now });
            }
        }

        // Exactly one active slide and dot, at the carousel index.
        let index = page.carousel().map_or(0, |c| c.index());
        assert_eq!(doc.with_class(&h.slides, "active"), vec![h.slides[index]]);
        assert_eq!(doc.with_class(&h.dots, "active"), vec![h.dots[index]]);

        // The counter never shows more than its target.
        let shown: i64 = doc.text_of(h.countries).parse().unwrap_or(0);
        assert!((0..=42).contains(&shown));
    }
});
