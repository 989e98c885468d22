use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::render::{request_animation_frame, AnimationFrame};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, HtmlElement, ScrollBehavior, ScrollToOptions};

use super::dom::{self, query_all};
use super::Page;
use crate::motion::{viewport_unit, VIEWPORT_UNIT_PROPERTY};
use crate::nav::{
    active_section, in_page_fragment, is_compact, link_is_active, scroll_target_top,
    SectionBounds, ACTIVE_CLASS, SCROLLED_CLASS,
};
use crate::schedule::PendingFrame;

const NAVIGATION_ID: &str = "navigation";
const NAV_LINK_SELECTOR: &str = ".nav-link";
const SECTION_SELECTOR: &str = "section[id]";

/// Navigation bar styling and active-link highlighting driven by scroll position.
pub struct ScrollTracker {
    page: Page,
    navigation: Option<Element>,
    links: Vec<Element>,
    sections: Vec<HtmlElement>,
    pending: RefCell<PendingFrame<AnimationFrame>>,
}

impl ScrollTracker {
    pub fn new(page: &Page) -> Result<Rc<Self>, JsValue> {
        let sections = query_all(&page.document, SECTION_SELECTOR)?
            .into_iter()
            .filter_map(|section| section.dyn_into::<HtmlElement>().ok())
            .collect();

        Ok(Rc::new(Self {
            page: page.clone(),
            navigation: page.document.get_element_by_id(NAVIGATION_ID),
            links: query_all(&page.document, NAV_LINK_SELECTOR)?,
            sections,
            pending: RefCell::new(PendingFrame::new()),
        }))
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn update_navigation_state(&self) {
        let Some(navigation) = self.navigation.as_ref() else {
            return;
        };

        let compact = is_compact(
            dom::scroll_y(&self.page.window),
            self.page.config.compact_threshold_px,
        );
        dom::set_class(navigation, SCROLLED_CLASS, compact);
    }

    pub fn update_active_link(&self) {
        let bounds: Vec<SectionBounds> = self
            .sections
            .iter()
            .filter_map(|section| {
                let id = section.get_attribute("id")?;
                Some(SectionBounds::new(
                    id,
                    f64::from(section.offset_top()),
                    f64::from(section.offset_height()),
                ))
            })
            .collect();

        let active = active_section(
            &bounds,
            dom::scroll_y(&self.page.window),
            self.page.config.active_section_offset_px,
        );

        for link in &self.links {
            let href = link.get_attribute("href");
            dom::set_class(link, ACTIVE_CLASS, link_is_active(href.as_deref(), active));
        }
    }

    /// Replaces any pending recomputation with one on the next frame.
    pub fn handle_scroll(self: &Rc<Self>) {
        let tracker = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            tracker.pending.borrow_mut().complete();
            tracker.update_navigation_state();
            tracker.update_active_link();
        });
        self.pending.borrow_mut().schedule(handle);
    }

    pub fn handle_resize(&self) {
        self.update_active_link();

        let Some(root) = dom::root_element(&self.page.document) else {
            return;
        };
        let value = viewport_unit(dom::inner_height(&self.page.window));
        let _ = root.style().set_property(VIEWPORT_UNIT_PROPERTY, &value);
    }

    /// Smoothly scrolls so `selector`'s element sits just below the navigation bar.
    pub fn smooth_scroll_to_target(&self, selector: &str) -> bool {
        let Some(target) = self
            .page
            .document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        else {
            return false;
        };

        let options = ScrollToOptions::new();
        options.set_top(scroll_target_top(
            f64::from(target.offset_top()),
            self.page.config.scroll_offset_px,
        ));
        options.set_behavior(ScrollBehavior::Smooth);
        self.page.window.scroll_to_with_scroll_to_options(&options);
        true
    }

    fn handle_link_click(&self, link: &Element, event: &Event) {
        let Some(href) = link.get_attribute("href") else {
            return;
        };
        if in_page_fragment(&href).is_none() {
            return;
        }

        event.prevent_default();
        if let Some(link) = link.dyn_ref::<HtmlElement>() {
            let _ = link.blur();
        }

        self.smooth_scroll_to_target(&href);

        if let Ok(history) = self.page.window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&href));
        }
    }

    pub fn install(self: &Rc<Self>, listeners: &mut Vec<EventListener>) {
        let window = &self.page.window;

        let tracker = Rc::clone(self);
        listeners.push(EventListener::new(window, "scroll", move |_| {
            tracker.handle_scroll();
        }));

        let tracker = Rc::clone(self);
        listeners.push(EventListener::new(window, "resize", move |_| {
            tracker.handle_resize();
        }));

        for link in &self.links {
            let tracker = Rc::clone(self);
            let target = link.clone();
            listeners.push(EventListener::new_with_options(
                link,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| tracker.handle_link_click(&target, event),
            ));
        }
    }
}
