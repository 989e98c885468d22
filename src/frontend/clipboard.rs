use js_sys::{Function, Reflect};
use serde_json::json;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Clipboard, Document, HtmlDocument, HtmlTextAreaElement, Window};

use super::dom::describe_js_value;
use crate::clipboard::ClipboardAccess;
use crate::error::CopyError;
use crate::logging::{log_event, LogLevel};

const OFFSCREEN: &str = "-999999px";

/// The browser's async Clipboard API with the `execCommand` path as fallback.
pub struct WebClipboard {
    window: Window,
    document: Document,
}

impl WebClipboard {
    pub fn new(window: &Window, document: &Document) -> Self {
        Self {
            window: window.clone(),
            document: document.clone(),
        }
    }

    fn async_clipboard(&self) -> Option<Clipboard> {
        let navigator: JsValue = self.window.navigator().into();
        let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard")).ok()?;
        if clipboard.is_undefined() || clipboard.is_null() {
            return None;
        }

        let write_text = Reflect::get(&clipboard, &JsValue::from_str("writeText")).ok()?;
        write_text.dyn_ref::<Function>()?;
        Some(clipboard.unchecked_into::<Clipboard>())
    }

    fn copy_with_selection(&self, text: &str) -> Result<bool, JsValue> {
        let body = self
            .document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        let area = self
            .document
            .create_element("textarea")?
            .dyn_into::<HtmlTextAreaElement>()
            .map_err(JsValue::from)?;
        area.set_value(text);

        let style = area.style();
        style.set_property("position", "fixed")?;
        style.set_property("left", OFFSCREEN)?;
        style.set_property("top", OFFSCREEN)?;

        body.append_child(&area)?;
        let _ = area.focus();
        area.select();

        let copied = match self.document.dyn_ref::<HtmlDocument>() {
            Some(document) => document.exec_command("copy"),
            None => Ok(false),
        };

        let _ = body.remove_child(&area);
        copied
    }
}

impl ClipboardAccess for WebClipboard {
    async fn write_text(&self, text: &str) -> Result<(), CopyError> {
        let clipboard = self.async_clipboard().ok_or(CopyError::Unavailable)?;
        JsFuture::from(clipboard.write_text(text))
            .await
            .map(|_| ())
            .map_err(|error| CopyError::Rejected(describe_js_value(&error)))
    }

    fn legacy_copy(&self, text: &str) -> bool {
        match self.copy_with_selection(text) {
            Ok(copied) => copied,
            Err(error) => {
                log_event(
                    LogLevel::Error,
                    "clipboard.failed",
                    json!({ "error": describe_js_value(&error) }),
                );
                false
            }
        }
    }
}
