use gloo::timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, Window};

use super::dom;
use crate::toast::{ToastKind, ToastTimeline, SHOW_CLASS, TOAST_CLASS, TOAST_SELECTOR};

/// Replaces any current toast with a new one that shows on the next frame and removes itself.
pub fn show_toast(
    window: &Window,
    document: &Document,
    message: &str,
    kind: ToastKind,
    timeline: ToastTimeline,
) -> Result<(), JsValue> {
    if let Some(existing) = document.query_selector(TOAST_SELECTOR)? {
        existing.remove();
    }

    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    let toast = document
        .create_element("div")?
        .dyn_into::<HtmlElement>()
        .map_err(JsValue::from)?;
    toast.set_class_name(TOAST_CLASS);
    toast.set_text_content(Some(message));
    toast.style().set_property("background", kind.background())?;
    body.append_child(&toast)?;

    let shown = toast.clone();
    let reveal = Closure::once_into_js(move || {
        dom::set_class(&shown, SHOW_CLASS, true);
    });
    window.request_animation_frame(reveal.unchecked_ref())?;

    let hidden = toast.clone();
    Timeout::new(timeline.visible_ms, move || {
        dom::set_class(&hidden, SHOW_CLASS, false);
    })
    .forget();

    Timeout::new(timeline.total_ms(), move || {
        if toast.parent_node().is_some() {
            toast.remove();
        }
    })
    .forget();

    Ok(())
}
