use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::KeyboardEvent;

use super::dom::{self, query_all, query_html_in};
use super::Page;
use crate::cards::{activates_card, CARD_BUTTON_SELECTOR, CARD_SELECTOR, TOUCH_ACTIVE_CLASS};

/// Touch feedback and Enter/Space activation for every card. Returns the card count.
pub fn install(page: &Page, listeners: &mut Vec<EventListener>) -> Result<usize, JsValue> {
    let cards = query_all(&page.document, CARD_SELECTOR)?;
    let release_ms = page.config.touch_release_ms;

    for card in &cards {
        let target = card.clone();
        listeners.push(EventListener::new(card, "touchstart", move |_| {
            dom::set_class(&target, TOUCH_ACTIVE_CLASS, true);
        }));

        let target = card.clone();
        listeners.push(EventListener::new(card, "touchend", move |_| {
            let target = target.clone();
            Timeout::new(release_ms, move || {
                dom::set_class(&target, TOUCH_ACTIVE_CLASS, false);
            })
            .forget();
        }));

        let Some(button) = query_html_in(card, CARD_BUTTON_SELECTOR) else {
            continue;
        };
        listeners.push(EventListener::new_with_options(
            card,
            "keydown",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if activates_card(&event.key()) {
                    event.prevent_default();
                    button.click();
                }
            },
        ));
    }

    Ok(cards.len())
}
