//! Browser tests for the page controller.
//!
//! Run with: `wasm-pack test --headless --firefox` or `--chrome`

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo_timers::future::TimeoutFuture;
use portfolio_interactions::frontend::{
    run, show_toast, teardown, update_active_link, update_navigation_state,
};
use portfolio_interactions::toast::{ToastKind, ToastTimeline};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, Event, EventInit, HtmlElement, KeyboardEvent, KeyboardEventInit};

wasm_bindgen_test_configure!(run_in_browser);

const PAGE: &str = r##"
<nav id="navigation">
  <a class="nav-link" href="#about">About</a>
  <a class="nav-link" href="#works">Works</a>
  <a class="nav-link" href="index.html#works">Home</a>
</nav>
<section id="about" style="height: 400px; margin: 0;">
  <h1 class="hero-title">About</h1>
</section>
<section id="works" style="height: 2000px; margin: 0;">
  <div class="card" id="card" tabindex="0">
    <button class="button" id="card-button">Open</button>
  </div>
</section>
<div class="contact-dropdown" id="first">
  <button class="contact-trigger" aria-expanded="false">Contact</button>
  <div class="contact-options" aria-hidden="true">
    <a class="contact-option" href="mailto:foo@example.com">Mail</a>
    <button class="contact-option copy-email-btn" data-email="foo@example.com">Copy</button>
  </div>
</div>
<div class="contact-dropdown" id="second">
  <button class="contact-trigger" aria-expanded="false">Other</button>
  <div class="contact-options" aria-hidden="true">
    <a class="contact-option" href="mailto:">Mail</a>
  </div>
</div>
<button class="copy-email-btn" id="standalone-copy" data-email="bar@example.com">Copy</button>
<div style="height: 3000px;"></div>
"##;

fn document() -> Document {
    web_sys::window()
        .and_then(|window| window.document())
        .expect("test page has a document")
}

fn mount() -> Document {
    teardown();
    let document = document();
    document
        .body()
        .expect("test page has a body")
        .set_inner_html(PAGE);
    web_sys::window()
        .expect("window")
        .scroll_to_with_x_and_y(0.0, 0.0);
    run();
    document
}

fn select(document: &Document, selector: &str) -> Element {
    document
        .query_selector(selector)
        .expect("valid selector")
        .expect("element present")
}

fn trigger(document: &Document, dropdown: &str) -> HtmlElement {
    select(document, &format!("#{dropdown} .contact-trigger"))
        .dyn_into::<HtmlElement>()
        .expect("trigger is an html element")
}

fn expanded(document: &Document, dropdown: &str) -> Option<String> {
    trigger(document, dropdown).get_attribute("aria-expanded")
}

fn press(target: &Element, key: &str) {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init)
        .expect("keyboard event");
    target.dispatch_event(&event).expect("dispatch keydown");
}

fn html(document: &Document, selector: &str) -> HtmlElement {
    select(document, selector)
        .dyn_into::<HtmlElement>()
        .expect("html element")
}

fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

/// Polls every 20ms for up to two seconds.
async fn eventually(mut check: impl FnMut() -> bool) -> bool {
    for _ in 0..100 {
        if check() {
            return true;
        }
        TimeoutFuture::new(20).await;
    }
    check()
}

fn dispatch(target: &Element, kind: &str) {
    let event = Event::new(kind).expect("event");
    target.dispatch_event(&event).expect("dispatch event");
}

/// Dispatches a bare click, so anchors do not navigate. True when the default was prevented.
fn click_was_handled(target: &Element) -> bool {
    let init = EventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = Event::new_with_event_init_dict("click", &init).expect("click event");
    !target.dispatch_event(&event).expect("dispatch click")
}

#[wasm_bindgen_test]
fn opening_one_dropdown_closes_the_other() {
    let document = mount();

    trigger(&document, "first").click();
    assert_eq!(expanded(&document, "first").as_deref(), Some("true"));
    assert_eq!(
        select(&document, "#first .contact-options")
            .get_attribute("aria-hidden")
            .as_deref(),
        Some("false")
    );

    trigger(&document, "second").click();
    assert_eq!(expanded(&document, "first").as_deref(), Some("false"));
    assert_eq!(expanded(&document, "second").as_deref(), Some("true"));
}

#[wasm_bindgen_test]
fn outside_click_closes_everything() {
    let document = mount();

    trigger(&document, "first").click();
    select(&document, "#about")
        .dyn_into::<HtmlElement>()
        .expect("section is an html element")
        .click();

    assert_eq!(expanded(&document, "first").as_deref(), Some("false"));
}

#[wasm_bindgen_test]
fn escape_closes_and_refocuses_trigger() {
    let document = mount();

    trigger(&document, "first").click();
    press(&select(&document, "#first .contact-options"), "Escape");

    assert_eq!(expanded(&document, "first").as_deref(), Some("false"));
    let focused = document.active_element().expect("something is focused");
    let trigger: Element = trigger(&document, "first").into();
    assert_eq!(focused, trigger);
}

#[wasm_bindgen_test]
fn arrow_down_wraps_to_first_option() {
    let document = mount();

    trigger(&document, "first").click();
    let options = select(&document, "#first .contact-options");
    let last = select(&document, "#first .copy-email-btn")
        .dyn_into::<HtmlElement>()
        .expect("option is an html element");
    last.focus().expect("focus last option");

    press(&options, "ArrowDown");

    let first = select(&document, "#first .contact-option");
    assert_eq!(document.active_element(), Some(first));
}

#[wasm_bindgen_test]
fn mailto_links_gain_subject_and_body() {
    let document = mount();

    let href = select(&document, "#first a.contact-option")
        .get_attribute("href")
        .expect("href present");
    assert!(href.starts_with("mailto:foo@example.com?subject="));
    assert!(href.contains("&body="));

    let fallback = select(&document, "#second a.contact-option")
        .get_attribute("href")
        .expect("href present");
    assert!(fallback.starts_with("mailto:minato2ban@icloud.com?subject="));
}

#[wasm_bindgen_test]
fn only_fragment_links_are_intercepted() {
    let document = mount();

    assert!(click_was_handled(&select(&document, "a[href='#about']")));
    assert!(!click_was_handled(&select(
        &document,
        "a[href='index.html#works']"
    )));
}

#[wasm_bindgen_test]
fn new_toast_replaces_existing_one() {
    let document = mount();
    let window = web_sys::window().expect("window");
    let timeline = ToastTimeline {
        visible_ms: 3_000,
        exit_ms: 300,
    };

    show_toast(&window, &document, "first", ToastKind::Success, timeline).expect("first toast");
    show_toast(&window, &document, "second", ToastKind::Failure, timeline).expect("second toast");

    let toasts = document
        .query_selector_all(".copy-success")
        .expect("valid selector");
    assert_eq!(toasts.length(), 1);
    assert_eq!(
        select(&document, ".copy-success").text_content().as_deref(),
        Some("second")
    );
}

#[wasm_bindgen_test]
fn teardown_removes_listeners() {
    let document = mount();
    teardown();

    trigger(&document, "first").click();
    assert_eq!(expanded(&document, "first").as_deref(), Some("false"));
}

#[wasm_bindgen_test]
fn click_on_option_inside_open_dropdown_closes_it() {
    let document = mount();

    trigger(&document, "first").click();
    assert_eq!(expanded(&document, "first").as_deref(), Some("true"));

    click_was_handled(&select(&document, "#first .contact-option"));

    assert_eq!(expanded(&document, "first").as_deref(), Some("false"));
    assert_eq!(
        select(&document, "#first .contact-options")
            .get_attribute("aria-hidden")
            .as_deref(),
        Some("true")
    );
}

#[wasm_bindgen_test]
fn arrow_up_wraps_to_last_option() {
    let document = mount();

    trigger(&document, "first").click();
    html(&document, "#first .contact-option")
        .focus()
        .expect("focus first option");

    press(&select(&document, "#first .contact-options"), "ArrowUp");

    let last = select(&document, "#first .copy-email-btn");
    assert_eq!(document.active_element(), Some(last));
}

#[wasm_bindgen_test]
fn escape_in_closed_list_falls_through_to_global_blur() {
    let document = mount();

    let option = html(&document, "#second .contact-option");
    option.focus().expect("focus option");
    press(&select(&document, "#second .contact-options"), "Escape");

    let option: Element = option.into();
    assert_ne!(document.active_element(), Some(option));
}

#[wasm_bindgen_test]
fn scrolling_toggles_compact_nav_and_active_link() {
    let document = mount();
    let window = web_sys::window().expect("window");
    let navigation = select(&document, "#navigation");
    let about = select(&document, "a[href='#about']");
    let works = select(&document, "a[href='#works']");

    assert!(!has_class(&navigation, "scrolled"));
    assert!(has_class(&about, "active"));
    assert!(!has_class(&works, "active"));

    window.scroll_to_with_x_and_y(0.0, 600.0);
    update_navigation_state();
    update_active_link();

    assert!(has_class(&navigation, "scrolled"));
    assert!(!has_class(&about, "active"));
    assert!(has_class(&works, "active"));
    assert!(!has_class(&select(&document, "a[href='index.html#works']"), "active"));

    window.scroll_to_with_x_and_y(0.0, 0.0);
    update_navigation_state();
    assert!(!has_class(&navigation, "scrolled"));
}

#[wasm_bindgen_test]
async fn touch_marks_card_until_release_delay() {
    let document = mount();
    let card = select(&document, "#card");

    dispatch(&card, "touchstart");
    assert!(has_class(&card, "touch-active"));

    dispatch(&card, "touchend");
    assert!(has_class(&card, "touch-active"));

    TimeoutFuture::new(250).await;
    assert!(!has_class(&card, "touch-active"));
}

#[wasm_bindgen_test]
fn enter_and_space_on_card_press_its_button() {
    let document = mount();
    let card = select(&document, "#card");
    let presses = Rc::new(Cell::new(0));

    let counter = Rc::clone(&presses);
    let _listener = EventListener::new(&select(&document, "#card-button"), "click", move |_| {
        counter.set(counter.get() + 1);
    });

    press(&card, "Enter");
    press(&card, " ");
    press(&card, "Tab");

    assert_eq!(presses.get(), 2);
}

#[wasm_bindgen_test]
async fn copy_button_shows_a_toast() {
    let document = mount();

    html(&document, "#first .copy-email-btn").click();

    let shown = eventually(|| {
        document
            .query_selector(".copy-success")
            .ok()
            .flatten()
            .is_some()
    })
    .await;
    assert!(shown);
}

#[wasm_bindgen_test]
async fn standalone_copy_button_shows_a_toast() {
    let document = mount();

    html(&document, "#standalone-copy").click();

    let shown = eventually(|| {
        document
            .query_selector(".copy-success")
            .ok()
            .flatten()
            .is_some()
    })
    .await;
    assert!(shown);
}

#[wasm_bindgen_test]
async fn toast_removes_itself_after_its_timeline() {
    let document = mount();
    let window = web_sys::window().expect("window");
    let timeline = ToastTimeline {
        visible_ms: 40,
        exit_ms: 40,
    };

    show_toast(&window, &document, "copied", ToastKind::Success, timeline).expect("toast");
    assert!(document.query_selector(".copy-success").expect("selector").is_some());

    TimeoutFuture::new(timeline.total_ms() + 150).await;
    assert!(document.query_selector(".copy-success").expect("selector").is_none());
}

#[wasm_bindgen_test]
async fn entrance_and_reduced_motion_follow_the_media_query() {
    let document = mount();
    let window = web_sys::window().expect("window");
    let reduced = window
        .match_media("(prefers-reduced-motion: reduce)")
        .expect("match media")
        .map(|query| query.matches())
        .unwrap_or(false);

    let root = document.document_element().expect("root element");
    assert_eq!(has_class(&root, "reduce-motion"), reduced);

    let title = select(&document, ".hero-title");
    if reduced {
        TimeoutFuture::new(200).await;
        assert!(!has_class(&title, "animate-in"));
    } else {
        assert!(eventually(|| has_class(&title, "animate-in")).await);
    }
}
