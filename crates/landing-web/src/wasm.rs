#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the landing page.
//!
//! This module wraps [`landing_core::Page`] with DOM plumbing. Only compiled
//! on `wasm32` targets.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Promise, Reflect};
use landing_core::landing_i18n::{LoadError, LoadOutcome, LoadRequest, Locale};
use landing_core::{
    DeterministicClock, Document, Effects, ElementId, IntersectionEntry, NodeKind,
    ObserverOptions, Page, PageEvent, PreferenceStore, Query, RevealSchedule, millis_to_duration,
};
use tracing::{Level, debug, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, future_to_promise, spawn_local};
use web_sys::{
    AddEventListenerOptions, Element, Event, EventTarget, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, Response, ScrollBehavior, ScrollToOptions, Storage,
    TouchEvent, Window,
};

use crate::console::{ConsoleSink, console_layer};

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

/// `console.*` by level.
#[derive(Debug, Clone, Copy)]
struct BrowserConsole;

impl ConsoleSink for BrowserConsole {
    fn emit(&self, level: Level, line: &str) {
        let line = JsValue::from_str(line);
        match level {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }
}

fn install_logging() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        let level = if cfg!(debug_assertions) {
            Level::DEBUG
        } else {
            Level::INFO
        };
        let _ = tracing_subscriber::registry()
            .with(console_layer(BrowserConsole, level))
            .try_init();
    });
}

fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| value.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())))
        .unwrap_or_else(|| format!("{value:?}"))
}

// ---------------------------------------------------------------------------
// Document, preferences, fetch
// ---------------------------------------------------------------------------

/// The live DOM. Element handles index into `elements`; a node keeps its
/// handle for the lifetime of the page.
struct DomDocument {
    window: Window,
    document: web_sys::Document,
    elements: Vec<Element>,
}

impl DomDocument {
    fn new(window: Window, document: web_sys::Document) -> Self {
        Self {
            window,
            document,
            elements: Vec::new(),
        }
    }

    fn id_of(&mut self, element: &Element) -> ElementId {
        let index = match self.elements.iter().position(|known| known == element) {
            Some(index) => index,
            None => {
                self.elements.push(element.clone());
                self.elements.len() - 1
            }
        };
        ElementId::new(u32::try_from(index).unwrap_or(u32::MAX))
    }

    fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.get() as usize)
    }
}

impl Document for DomDocument {
    fn query_all(&mut self, query: Query<'_>) -> Vec<ElementId> {
        let selector = query.to_selector();
        let nodes = match self.document.query_selector_all(&selector) {
            Ok(nodes) => nodes,
            Err(err) => {
                warn!(
                    target: "landing_web::dom",
                    selector = %selector,
                    error = %js_message(&err),
                    "selector rejected"
                );
                return Vec::new();
            }
        };
        let mut found = Vec::with_capacity(nodes.length() as usize);
        for index in 0..nodes.length() {
            if let Some(element) = nodes.item(index).and_then(|n| n.dyn_into::<Element>().ok()) {
                found.push(self.id_of(&element));
            }
        }
        found
    }

    fn kind(&self, element: ElementId) -> NodeKind {
        self.element(element)
            .map_or(NodeKind::Other, |e| NodeKind::from_tag(&e.tag_name()))
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.element(element)?.get_attribute(name)
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(e) = self.element(element) {
            let _ = e.set_attribute(name, value);
        }
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        if let Some(e) = self.element(element) {
            e.set_text_content(Some(text));
        }
    }

    fn set_class(&mut self, element: ElementId, class: &str, present: bool) {
        if let Some(e) = self.element(element) {
            let _ = e.class_list().toggle_with_force(class, present);
        }
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        if let Some(e) = self.element(element).and_then(|e| e.dyn_ref::<HtmlElement>()) {
            let _ = e.style().set_property(property, value);
        }
    }

    fn set_document_language(&mut self, code: &str) {
        if let Some(root) = self.document.document_element() {
            let _ = root.set_attribute("lang", code);
        }
    }

    fn viewport_top(&self, element: ElementId) -> f64 {
        self.element(element)
            .map_or(0.0, |e| e.get_bounding_client_rect().top())
    }

    fn scroll_offset(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn smooth_scroll_to(&mut self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}

/// `localStorage`, when the browser grants it.
struct LocalStoragePreferences {
    storage: Option<Storage>,
}

impl LocalStoragePreferences {
    fn new(window: &Window) -> Self {
        Self {
            storage: window.local_storage().ok().flatten(),
        }
    }
}

impl PreferenceStore for LocalStoragePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        let Some(storage) = &self.storage else {
            return;
        };
        if let Err(err) = storage.set_item(key, value) {
            warn!(
                target: "landing_web::storage",
                key,
                error = %js_message(&err),
                "could not persist preference"
            );
        }
    }
}

async fn fetch_locale(path: &str) -> Result<String, LoadError> {
    let network = |err: &JsValue| LoadError::Network {
        path: path.to_owned(),
        message: js_message(err),
    };
    let window = web_sys::window().ok_or_else(|| network(&"no window".into()))?;
    let response: Response = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|e| network(&e))?
        .dyn_into()
        .map_err(|e| network(&e))?;
    if !response.ok() {
        return Err(LoadError::Status {
            path: path.to_owned(),
            status: response.status(),
        });
    }
    let body = JsFuture::from(response.text().map_err(|e| network(&e))?)
        .await
        .map_err(|e| network(&e))?;
    body.as_string()
        .ok_or_else(|| network(&"response body is not text".into()))
}

// ---------------------------------------------------------------------------
// Host loop
// ---------------------------------------------------------------------------

struct Host {
    page: Page,
    document: DomDocument,
    preferences: LocalStoragePreferences,
    observers: Vec<IntersectionObserver>,
    /// Frame clock; `requestAnimationFrame` timestamps never run backwards.
    clock: DeterministicClock,
}

type Shared = Rc<RefCell<Host>>;

#[derive(Debug, Clone, Copy)]
enum Observed {
    Reveal,
    Counter,
}

fn dispatch(shared: &Shared, event: PageEvent<'_>, dom_event: Option<&Event>) {
    let effects = {
        let Ok(mut host) = shared.try_borrow_mut() else {
            warn!(target: "landing_web::host", ?event, "re-entrant event dropped");
            return;
        };
        let Host { page, document, .. } = &mut *host;
        page.handle(document, event)
    };
    apply(shared, effects, dom_event);
}

fn apply(shared: &Shared, effects: Effects, dom_event: Option<&Event>) {
    if effects.prevent_default {
        if let Some(event) = dom_event {
            event.prevent_default();
        }
    }
    if !effects.unobserve.is_empty() {
        let host = shared.borrow();
        for id in &effects.unobserve {
            if let Some(element) = host.document.element(*id) {
                for observer in &host.observers {
                    observer.unobserve(element);
                }
            }
        }
    }
    for schedule in effects.reveal_timers {
        schedule_reveal(shared, schedule);
    }
    if effects.request_frame {
        request_frame(shared);
    }
    if let Some(request) = effects.load {
        let shared = Rc::clone(shared);
        spawn_local(async move {
            let _ = run_load(&shared, request).await;
        });
    }
}

fn schedule_reveal(shared: &Shared, schedule: RevealSchedule) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let shared = Rc::clone(shared);
    let element = schedule.element;
    let callback = Closure::once_into_js(move || {
        dispatch(&shared, PageEvent::RevealTimer(element), None);
    });
    let delay = i32::try_from(schedule.delay.as_millis()).unwrap_or(i32::MAX);
    if let Err(err) = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
    {
        warn!(target: "landing_web::host", error = %js_message(&err), "setTimeout failed");
    }
}

fn request_frame(shared: &Shared) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let shared = Rc::clone(shared);
    let callback = Closure::once_into_js(move |timestamp: f64| {
        let now = {
            let mut host = shared.borrow_mut();
            host.clock.set(millis_to_duration(timestamp));
            host.clock.now()
        };
        dispatch(&shared, PageEvent::AnimationFrame { now }, None);
    });
    if let Err(err) = window.request_animation_frame(callback.unchecked_ref()) {
        warn!(
            target: "landing_web::host",
            error = %js_message(&err),
            "requestAnimationFrame failed"
        );
    }
}

/// Fetch and apply `request`, following the default-language retry.
async fn run_load(shared: &Shared, mut request: LoadRequest) -> Result<Locale, LoadError> {
    loop {
        let fetched = fetch_locale(&request.path).await;
        let outcome = {
            let mut host = shared.borrow_mut();
            let Host {
                page,
                document,
                preferences,
                ..
            } = &mut *host;
            page.finish_load(document, preferences, request, fetched)
        };
        match outcome {
            LoadOutcome::Applied(code) => return Ok(code),
            LoadOutcome::Retry(next) => request = next,
            LoadOutcome::Failed(err) => return Err(err),
        }
    }
}

/// Settle with the active language whether or not the load succeeded; load
/// failures are already logged by the store.
fn load_promise(shared: Shared, request: LoadRequest) -> Promise {
    future_to_promise(async move {
        let _ = run_load(&shared, request).await;
        let code = shared.borrow().page.current_language().to_owned();
        Ok(JsValue::from_str(&code))
    })
}

fn listen(target: &EventTarget, kind: &str, handler: impl FnMut(Event) + 'static) {
    add_listener(target, kind, handler, None);
}

/// Listener that never cancels its event, so touch scrolling is not blocked.
fn listen_passive(target: &EventTarget, kind: &str, handler: impl FnMut(Event) + 'static) {
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    add_listener(target, kind, handler, Some(&options));
}

fn add_listener(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
    options: Option<&AddEventListenerOptions>,
) {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    let callback: &js_sys::Function = closure.as_ref().unchecked_ref();
    let added = match options {
        Some(options) => target
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind, callback, options,
            ),
        None => target.add_event_listener_with_callback(kind, callback),
    };
    if let Err(err) = added {
        warn!(
            target: "landing_web::host",
            kind,
            error = %js_message(&err),
            "addEventListener failed"
        );
    }
    closure.forget();
}

fn touch_x(event: &Event) -> Option<f64> {
    let touch = event.dyn_ref::<TouchEvent>()?.changed_touches().item(0)?;
    Some(f64::from(touch.screen_x()))
}

fn observe(
    shared: &Shared,
    targets: &[ElementId],
    options: &ObserverOptions,
    observed: Observed,
) -> Option<IntersectionObserver> {
    let callback = {
        let shared = Rc::clone(shared);
        Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                let batch: Vec<IntersectionEntry> = {
                    let mut host = shared.borrow_mut();
                    entries
                        .iter()
                        .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                        .map(|entry| IntersectionEntry {
                            element: host.document.id_of(&entry.target()),
                            is_intersecting: entry.is_intersecting(),
                        })
                        .collect()
                };
                let event = match observed {
                    Observed::Reveal => PageEvent::RevealIntersections(&batch),
                    Observed::Counter => PageEvent::CounterIntersections(&batch),
                };
                dispatch(&shared, event, None);
            },
        )
    };
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(&options.root_margin);
    let observer =
        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => observer,
            Err(err) => {
                warn!(
                    target: "landing_web::host",
                    ?observed,
                    error = %js_message(&err),
                    "IntersectionObserver unavailable"
                );
                return None;
            }
        };
    callback.forget();
    let host = shared.borrow();
    for id in targets {
        if let Some(element) = host.document.element(*id) {
            observer.observe(element);
        }
    }
    Some(observer)
}

// ---------------------------------------------------------------------------
// Exports
// ---------------------------------------------------------------------------

/// The landing page runtime, exported to page scripts.
#[wasm_bindgen]
pub struct LandingPage {
    shared: Shared,
    started: bool,
}

#[wasm_bindgen]
impl LandingPage {
    /// Scan the document and arm every component. `config_json` overrides
    /// defaults field by field.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<LandingPage, JsValue> {
        install_panic_hook();
        install_logging();
        let config = crate::parse_config(config_json.as_deref())
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let preferences = LocalStoragePreferences::new(&window);
        let mut document = DomDocument::new(window, document);
        let page = Page::arm(config, &mut document);
        Ok(Self {
            shared: Rc::new(RefCell::new(Host {
                page,
                document,
                preferences,
                observers: Vec::new(),
                clock: DeterministicClock::new(),
            })),
            started: false,
        })
    }

    /// Bind listeners and observers, stamp the footer year, and load the
    /// initial language. Resolves with the active language code. Calling it
    /// again only repeats the language load.
    pub fn start(&mut self) -> Promise {
        if !self.started {
            self.started = true;
            self.bind();
        }
        let request = {
            let host = self.shared.borrow();
            let browser_tag = host.document.window.navigator().language();
            host.page
                .initial_load(&host.preferences, browser_tag.as_deref())
        };
        load_promise(Rc::clone(&self.shared), request)
    }

    /// Switch language. Resolves with the active language code afterwards;
    /// failures fall back to the default and never reject.
    #[wasm_bindgen(js_name = loadLanguage)]
    pub fn load_language(&self, code: &str) -> Promise {
        let request = self.shared.borrow().page.request_language(code);
        load_promise(Rc::clone(&self.shared), request)
    }

    /// Resolve a dotted key in the active table; a miss returns the key.
    #[wasm_bindgen(js_name = getTranslation)]
    pub fn get_translation(&self, key: &str) -> String {
        self.shared.borrow().page.translate(key).into_owned()
    }

    #[wasm_bindgen(js_name = currentLanguage)]
    pub fn current_language(&self) -> String {
        self.shared.borrow().page.current_language().to_owned()
    }
}

impl LandingPage {
    fn bind(&self) {
        let shared = &self.shared;
        let (window, document, clicks, track, reveal, counter) = {
            let mut guard = shared.borrow_mut();
            let host = &mut *guard;
            let year = i32::try_from(js_sys::Date::new_0().get_full_year()).unwrap_or_default();
            host.page.stamp_year(&mut host.document, year);
            let clicks: Vec<(ElementId, Element)> = host
                .page
                .click_targets()
                .into_iter()
                .filter_map(|id| host.document.element(id).map(|e| (id, e.clone())))
                .collect();
            let track = host
                .page
                .carousel()
                .and_then(|c| host.document.element(c.track()).cloned());
            let reveal = host
                .page
                .reveal()
                .map(|r| (r.targets().to_vec(), r.options().clone()));
            let counter = host
                .page
                .counter()
                .map(|c| (vec![c.element()], c.options().clone()));
            (
                host.document.window.clone(),
                host.document.document.clone(),
                clicks,
                track,
                reveal,
                counter,
            )
        };

        for (id, element) in &clicks {
            let shared = Rc::clone(shared);
            let id = *id;
            listen(element, "click", move |event| {
                dispatch(&shared, PageEvent::Click(id), Some(&event));
            });
        }

        {
            let shared = Rc::clone(shared);
            listen(&document, "keydown", move |event| {
                if let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) {
                    dispatch(&shared, PageEvent::KeyDown(&key), Some(&event));
                }
            });
        }
        {
            let shared = Rc::clone(shared);
            listen(&document, "mousedown", move |event| {
                dispatch(&shared, PageEvent::MouseDown, Some(&event));
            });
        }
        {
            let shared = Rc::clone(shared);
            let scrolled = window.clone();
            listen(&window, "scroll", move |event| {
                let offset_y = scrolled.scroll_y().unwrap_or(0.0);
                dispatch(&shared, PageEvent::Scroll { offset_y }, Some(&event));
            });
        }

        if let Some(track) = track {
            let start = Rc::clone(shared);
            listen_passive(&track, "touchstart", move |event| {
                if let Some(screen_x) = touch_x(&event) {
                    dispatch(&start, PageEvent::TouchStart { screen_x }, Some(&event));
                }
            });
            let end = Rc::clone(shared);
            listen_passive(&track, "touchend", move |event| {
                if let Some(screen_x) = touch_x(&event) {
                    dispatch(&end, PageEvent::TouchEnd { screen_x }, Some(&event));
                }
            });
        }

        let mut observers = Vec::new();
        if let Some((targets, options)) = reveal {
            observers.extend(observe(shared, &targets, &options, Observed::Reveal));
        }
        if let Some((targets, options)) = counter {
            observers.extend(observe(shared, &targets, &options, Observed::Counter));
        }
        debug!(
            target: "landing_web::host",
            click_targets = clicks.len(),
            observers = observers.len(),
            "page bound"
        );
        shared.borrow_mut().observers = observers;
    }
}
