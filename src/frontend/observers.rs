//! Browser observers: entrance animations, the reduced-motion preference,
//! LCP reporting and page-wide error logging.

use std::rc::Rc;

use gloo::events::EventListener;
use js_sys::{Array, Function, Object, Reflect};
use serde_json::json;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, ErrorEvent, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, PerformanceEntry, PerformanceObserver,
    PerformanceObserverEntryList, PromiseRejectionEvent,
};

use super::dom::{self, describe_js_value, has_property, query_all};
use super::Page;
use crate::logging::{log_event, LogLevel};
use crate::motion::{
    observes_entrances, ANIMATE_IN_CLASS, ENTRANCE_ROOT_MARGIN, ENTRANCE_SELECTOR,
    ENTRANCE_THRESHOLD, REDUCED_MOTION_QUERY, REDUCE_MOTION_CLASS,
};
use crate::perf::{is_local_host, lcp_is_slow, LCP_ENTRY_TYPE};

type EntranceCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;
type PerformanceCallback = Closure<dyn FnMut(PerformanceObserverEntryList, PerformanceObserver)>;

/// Adds `animate-in` to each target the first time it is at least 10% visible.
pub struct EntranceAnimations {
    observer: IntersectionObserver,
    targets: Vec<Element>,
    _callback: EntranceCallback,
}

impl EntranceAnimations {
    /// `Ok(None)` when the browser has no IntersectionObserver.
    pub fn new(page: &Page) -> Result<Option<Self>, JsValue> {
        if !has_property(&page.window, "IntersectionObserver") {
            return Ok(None);
        }

        let callback = EntranceCallback::new(|entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                dom::set_class(&target, ANIMATE_IN_CLASS, true);
                observer.unobserve(&target);
            }
        });

        let options = IntersectionObserverInit::new();
        options.set_root_margin(ENTRANCE_ROOT_MARGIN);
        options.set_threshold(&JsValue::from_f64(ENTRANCE_THRESHOLD));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        Ok(Some(Self {
            observer,
            targets: query_all(&page.document, ENTRANCE_SELECTOR)?,
            _callback: callback,
        }))
    }

    /// Starts observing every target that has not animated in yet.
    pub fn observe_pending(&self) {
        for target in &self.targets {
            if !target.class_list().contains(ANIMATE_IN_CLASS) {
                self.observer.observe(target);
            }
        }
    }

    pub fn disconnect(&self) {
        self.observer.disconnect();
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }
}

impl Drop for EntranceAnimations {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn apply_motion_preference(page: &Page, reduced: bool, entrances: Option<&EntranceAnimations>) {
    if let Some(root) = dom::root_element(&page.document) {
        dom::set_class(&root, REDUCE_MOTION_CLASS, reduced);
    }

    let Some(entrances) = entrances else {
        return;
    };
    if observes_entrances(reduced) {
        entrances.observe_pending();
    } else {
        entrances.disconnect();
    }
}

/// Mirrors `prefers-reduced-motion` onto the root now and whenever it changes.
pub fn install_motion_preference(
    page: &Page,
    entrances: Option<Rc<EntranceAnimations>>,
    listeners: &mut Vec<EventListener>,
) {
    apply_motion_preference(
        page,
        dom::prefers_reduced_motion(&page.window),
        entrances.as_deref(),
    );

    let Some(query) = page.window.match_media(REDUCED_MOTION_QUERY).ok().flatten() else {
        return;
    };

    let page = page.clone();
    let source = query.clone();
    listeners.push(EventListener::new(&query, "change", move |_| {
        apply_motion_preference(&page, source.matches(), entrances.as_deref());
    }));
}

/// Warns about slow largest-contentful-paint entries while developing locally.
pub struct LcpMonitor {
    observer: PerformanceObserver,
    _callback: PerformanceCallback,
}

impl LcpMonitor {
    pub fn install(page: &Page) -> Option<Self> {
        let hostname = page.window.location().hostname().unwrap_or_default();
        if !is_local_host(&hostname) || !has_property(&page.window, "PerformanceObserver") {
            return None;
        }

        let threshold_ms = page.config.lcp_warn_ms;
        let callback = PerformanceCallback::new(
            move |list: PerformanceObserverEntryList, _observer: PerformanceObserver| {
                let entries = list.get_entries();
                let Some(last) = entries.length().checked_sub(1).map(|index| entries.get(index))
                else {
                    return;
                };
                let start_time = last.unchecked_into::<PerformanceEntry>().start_time();
                if lcp_is_slow(start_time, threshold_ms) {
                    log_event(
                        LogLevel::Warn,
                        "perf.lcp_slow",
                        json!({ "startTimeMs": start_time, "thresholdMs": threshold_ms }),
                    );
                }
            },
        );

        let observer = match PerformanceObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(observer) => observer,
            Err(error) => {
                log_event(
                    LogLevel::Debug,
                    "perf.unavailable",
                    json!({ "error": describe_js_value(&error) }),
                );
                return None;
            }
        };

        if let Err(error) = observe_entry_type(&observer, LCP_ENTRY_TYPE) {
            log_event(
                LogLevel::Debug,
                "perf.unavailable",
                json!({ "error": describe_js_value(&error) }),
            );
            return None;
        }

        Some(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for LcpMonitor {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn observe_entry_type(observer: &PerformanceObserver, entry_type: &str) -> Result<(), JsValue> {
    let entry_types = Array::of1(&JsValue::from_str(entry_type));
    let options = Object::new();
    Reflect::set(&options, &JsValue::from_str("entryTypes"), &entry_types)?;

    let observe = Reflect::get(observer, &JsValue::from_str("observe"))?
        .dyn_into::<Function>()
        .map_err(JsValue::from)?;
    observe.call1(observer, &options)?;
    Ok(())
}

/// Logs uncaught errors and unhandled promise rejections. Nothing is recovered.
pub fn install_error_logging(page: &Page, listeners: &mut Vec<EventListener>) {
    listeners.push(EventListener::new(&page.window, "error", |event| {
        let fields = match event.dyn_ref::<ErrorEvent>() {
            Some(event) => json!({
                "message": event.message(),
                "source": event.filename(),
                "line": event.lineno(),
                "error": describe_js_value(&event.error()),
            }),
            None => json!({ "type": event.type_() }),
        };
        log_event(LogLevel::Error, "page.error", fields);
    }));

    listeners.push(EventListener::new(&page.window, "unhandledrejection", |event| {
        let reason = event
            .dyn_ref::<PromiseRejectionEvent>()
            .map(|event| describe_js_value(&event.reason()))
            .unwrap_or_default();
        log_event(
            LogLevel::Error,
            "page.unhandled_rejection",
            json!({ "reason": reason }),
        );
    }));
}

/// Escape anywhere drops focus from the active element.
pub fn install_escape_blur(page: &Page, listeners: &mut Vec<EventListener>) {
    let document = page.document.clone();
    listeners.push(EventListener::new(&page.window, "keydown", move |event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if event.key() != "Escape" {
            return;
        }
        if let Some(active) = document
            .active_element()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        {
            let _ = active.blur();
        }
    }));
}

/// Submit hook for every form; records the submission and leaves the default action alone.
pub fn install_form_hooks(page: &Page, listeners: &mut Vec<EventListener>) -> Result<usize, JsValue> {
    let forms = query_all(&page.document, "form")?;
    for form in &forms {
        let source = form.clone();
        listeners.push(EventListener::new(form, "submit", move |_| {
            log_event(
                LogLevel::Debug,
                "form.submit",
                json!({ "id": source.id(), "action": source.get_attribute("action") }),
            );
        }));
    }

    Ok(forms.len())
}
