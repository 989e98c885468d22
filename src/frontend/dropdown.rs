use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use serde_json::json;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlElement, KeyboardEvent};

use super::clipboard::WebClipboard;
use super::dom::{describe_js_value, query_all, query_all_in, query_html_in};
use super::toast::show_toast;
use super::Page;
use crate::clipboard::{copy_text, CopyOutcome};
use crate::dropdown::{
    cycle_focus, DropdownSet, ListKey, COPY_BUTTON_SELECTOR, DROPDOWN_SELECTOR, EMAIL_ATTRIBUTE,
    OPTIONS_SELECTOR, OPTION_SELECTOR, TRIGGER_SELECTOR,
};
use crate::logging::{log_event, LogLevel};
use crate::toast::{message_for, ToastTimeline};

struct DropdownParts {
    container: Element,
    trigger: HtmlElement,
    options: Element,
}

/// Every complete contact dropdown on the page plus their shared open state.
pub struct Dropdowns {
    parts: Vec<DropdownParts>,
    state: RefCell<DropdownSet>,
}

impl Dropdowns {
    fn collect(page: &Page) -> Result<Rc<Self>, JsValue> {
        let parts: Vec<DropdownParts> = query_all(&page.document, DROPDOWN_SELECTOR)?
            .into_iter()
            .filter_map(|container| {
                let trigger = query_html_in(&container, TRIGGER_SELECTOR)?;
                let options = container.query_selector(OPTIONS_SELECTOR).ok().flatten()?;
                Some(DropdownParts {
                    container,
                    trigger,
                    options,
                })
            })
            .collect();

        let state = RefCell::new(DropdownSet::new(parts.len()));
        Ok(Rc::new(Self { parts, state }))
    }

    pub fn count(&self) -> usize {
        self.parts.len()
    }

    fn sync(&self) {
        let state = self.state.borrow();
        for (index, parts) in self.parts.iter().enumerate() {
            let current = state.state(index);
            let _ = parts
                .trigger
                .set_attribute("aria-expanded", current.aria_expanded());
            let _ = parts
                .options
                .set_attribute("aria-hidden", current.aria_hidden());
            let _ = parts
                .container
                .set_attribute("aria-expanded", current.aria_expanded());
        }
    }

    fn toggle(&self, index: usize) {
        self.state.borrow_mut().toggle(index);
        self.sync();
    }

    fn close(&self, index: usize) {
        self.state.borrow_mut().close(index);
        self.sync();
    }

    /// Any click that reaches the document closes every dropdown. Trigger clicks never get here.
    fn close_all(&self) {
        self.state.borrow_mut().close_all();
        self.sync();
    }

    fn handle_list_key(&self, page: &Page, index: usize, event: &KeyboardEvent) {
        let Some(key) = ListKey::from_key(&event.key()) else {
            return;
        };
        let parts = &self.parts[index];

        if key == ListKey::Escape {
            let refocus = self.state.borrow_mut().escape(index);
            self.sync();
            if refocus {
                event.stop_propagation();
                let _ = parts.trigger.focus();
            }
            return;
        }

        event.prevent_default();
        let options: Vec<HtmlElement> = query_all_in(&parts.options, OPTION_SELECTOR)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|option| option.dyn_into::<HtmlElement>().ok())
            .collect();
        let active = page.document.active_element();
        let current = options.iter().position(|option| {
            let option: &Element = option.as_ref();
            active.as_ref() == Some(option)
        });

        if let Some(next) = cycle_focus(current, options.len(), key) {
            let _ = options[next].focus();
        }
    }
}

fn email_for(button: &Element, page: &Page) -> String {
    button
        .get_attribute(EMAIL_ATTRIBUTE)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| page.config.fallback_email.clone())
}

fn log_outcome(outcome: &CopyOutcome) {
    match outcome {
        CopyOutcome::Copied => {}
        CopyOutcome::CopiedWithFallback { reason } => log_event(
            LogLevel::Debug,
            "clipboard.fallback",
            json!({ "reason": reason.to_string() }),
        ),
        CopyOutcome::Failed { reason } => log_event(
            LogLevel::Error,
            "clipboard.failed",
            json!({ "reason": reason.to_string() }),
        ),
    }
}

/// Copies `email`, shows the toast, and closes `owner` when the async API succeeded.
fn copy_email(page: Page, dropdowns: Rc<Dropdowns>, owner: Option<usize>, email: String) {
    spawn_local(async move {
        let clipboard = WebClipboard::new(&page.window, &page.document);
        let outcome = copy_text(&clipboard, &email).await;
        log_outcome(&outcome);

        let (message, kind) = message_for(&outcome, &page.config);
        if let Err(error) = show_toast(
            &page.window,
            &page.document,
            message,
            kind,
            ToastTimeline::from_config(&page.config),
        ) {
            log_event(
                LogLevel::Error,
                "toast.failed",
                json!({ "error": describe_js_value(&error) }),
            );
        }

        if let Some(index) = owner.filter(|_| outcome.closes_dropdown()) {
            dropdowns.close(index);
        }
    });
}

fn copy_listener(
    page: &Page,
    dropdowns: &Rc<Dropdowns>,
    owner: Option<usize>,
    button: &Element,
) -> EventListener {
    let page = page.clone();
    let dropdowns = Rc::clone(dropdowns);
    let source = button.clone();
    EventListener::new_with_options(
        button,
        "click",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            let email = email_for(&source, &page);
            copy_email(page.clone(), Rc::clone(&dropdowns), owner, email);
        },
    )
}

/// Wires triggers, option lists, copy buttons (inside and outside dropdowns) and document clicks.
pub fn install(page: &Page, listeners: &mut Vec<EventListener>) -> Result<Rc<Dropdowns>, JsValue> {
    let dropdowns = Dropdowns::collect(page)?;
    dropdowns.sync();

    for (index, parts) in dropdowns.parts.iter().enumerate() {
        let handle = Rc::clone(&dropdowns);
        listeners.push(EventListener::new(&parts.trigger, "click", move |event| {
            event.stop_propagation();
            handle.toggle(index);
        }));

        let handle = Rc::clone(&dropdowns);
        let key_page = page.clone();
        listeners.push(EventListener::new_with_options(
            &parts.options,
            "keydown",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                    handle.handle_list_key(&key_page, index, event);
                }
            },
        ));

        for button in query_all_in(&parts.container, COPY_BUTTON_SELECTOR)? {
            listeners.push(copy_listener(page, &dropdowns, Some(index), &button));
        }
    }

    for button in query_all(&page.document, COPY_BUTTON_SELECTOR)? {
        if button.closest(DROPDOWN_SELECTOR)?.is_none() {
            listeners.push(copy_listener(page, &dropdowns, None, &button));
        }
    }

    let handle = Rc::clone(&dropdowns);
    listeners.push(EventListener::new(&page.document, "click", move |_| {
        handle.close_all();
    }));

    Ok(dropdowns)
}
