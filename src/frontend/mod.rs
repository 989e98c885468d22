mod cards;
mod clipboard;
pub mod dom;
mod dropdown;
mod mailto;
mod observers;
mod scroll;
mod toast;

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use serde_json::json;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::{Document, Window};

use crate::config::{InteractionConfig, CONFIG_ELEMENT_ID};
use crate::error::InitError;
use crate::logging::{log_event, set_min_level, LogLevel};
use observers::{EntranceAnimations, LcpMonitor};
use scroll::ScrollTracker;

pub use clipboard::WebClipboard;
pub use toast::show_toast;

/// Handles shared by every installer: the browser globals and the resolved config.
#[derive(Clone)]
pub struct Page {
    pub window: Window,
    pub document: Document,
    pub config: Rc<InteractionConfig>,
}

impl Page {
    fn current() -> Result<Self, InitError> {
        let window = web_sys::window().ok_or(InitError::MissingWindow)?;
        let document = window.document().ok_or(InitError::MissingDocument)?;
        let config = Rc::new(load_config(&document));
        Ok(Self {
            window,
            document,
            config,
        })
    }
}

fn load_config(document: &Document) -> InteractionConfig {
    let Some(source) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
    else {
        return InteractionConfig::default();
    };

    match InteractionConfig::from_json(&source) {
        Ok(config) => config,
        Err(error) => {
            log_event(
                LogLevel::Warn,
                "config.invalid",
                json!({ "error": error.to_string() }),
            );
            InteractionConfig::default()
        }
    }
}

/// Owns everything installed on the page. Dropping it removes every listener and observer.
pub struct Controller {
    page: Page,
    listeners: Vec<EventListener>,
    scroll: Option<Rc<ScrollTracker>>,
    entrances: Option<Rc<EntranceAnimations>>,
    lcp: Option<LcpMonitor>,
}

impl Controller {
    fn new(page: Page) -> Self {
        Self {
            page,
            listeners: Vec::new(),
            scroll: None,
            entrances: None,
            lcp: None,
        }
    }

    /// Installs handlers in order. On error, whatever was installed so far stays in place.
    fn install(&mut self) -> Result<(), InitError> {
        let page = self.page.clone();

        let scroll = ScrollTracker::new(&page)?;
        scroll.install(&mut self.listeners);
        observers::install_escape_blur(&page, &mut self.listeners);
        scroll.update_navigation_state();
        scroll.update_active_link();
        let nav_links = scroll.link_count();
        self.scroll = Some(Rc::clone(&scroll));

        let cards = cards::install(&page, &mut self.listeners)?;
        let forms = observers::install_form_hooks(&page, &mut self.listeners)?;
        let dropdowns = dropdown::install(&page, &mut self.listeners)?;
        let mailto_links = mailto::rewrite_links(&page)?;

        self.entrances = EntranceAnimations::new(&page)?.map(Rc::new);
        observers::install_motion_preference(&page, self.entrances.clone(), &mut self.listeners);
        scroll.handle_resize();

        self.lcp = LcpMonitor::install(&page);
        observers::install_error_logging(&page, &mut self.listeners);

        log_event(
            LogLevel::Info,
            "controller.ready",
            json!({
                "navLinks": nav_links,
                "cards": cards,
                "forms": forms,
                "dropdowns": dropdowns.count(),
                "mailtoLinks": mailto_links,
                "entranceTargets": self.entrances.as_ref().map(|entrances| entrances.target_count()),
                "lcpMonitor": self.lcp.is_some(),
            }),
        );
        Ok(())
    }
}

thread_local! {
    static CONTROLLER: RefCell<Option<Controller>> = const { RefCell::new(None) };
}

fn start() {
    let page = match Page::current() {
        Ok(page) => page,
        Err(error) => {
            log_event(
                LogLevel::Error,
                "controller.init_failed",
                json!({ "error": error.to_string() }),
            );
            return;
        }
    };
    set_min_level(page.config.log_level);

    let mut controller = Controller::new(page);
    if let Err(error) = controller.install() {
        log_event(
            LogLevel::Error,
            "controller.init_failed",
            json!({ "error": error.to_string() }),
        );
    }

    CONTROLLER.with(|slot| *slot.borrow_mut() = Some(controller));
}

/// Entry point: initializes now, or once the DOM has been parsed.
pub fn run() {
    console_error_panic_hook::set_once();

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        log_event(
            LogLevel::Error,
            "controller.init_failed",
            json!({ "error": InitError::MissingDocument.to_string() }),
        );
        return;
    };

    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| start()).forget();
    } else {
        start();
    }
}

fn with_scroll<T>(f: impl FnOnce(&ScrollTracker) -> T) -> Option<T> {
    CONTROLLER.with(|slot| {
        let slot = slot.borrow();
        let scroll = slot.as_ref()?.scroll.as_ref()?;
        Some(f(scroll))
    })
}

#[wasm_bindgen(js_name = smoothScrollToTarget)]
pub fn smooth_scroll_to_target(selector: &str) -> bool {
    with_scroll(|scroll| scroll.smooth_scroll_to_target(selector)).unwrap_or(false)
}

#[wasm_bindgen(js_name = updateActiveLink)]
pub fn update_active_link() {
    with_scroll(ScrollTracker::update_active_link);
}

#[wasm_bindgen(js_name = updateNavigationState)]
pub fn update_navigation_state() {
    with_scroll(ScrollTracker::update_navigation_state);
}

/// Removes every listener and observer the controller installed.
#[wasm_bindgen]
pub fn teardown() {
    let controller = CONTROLLER.with(|slot| slot.borrow_mut().take());
    drop(controller);
}
