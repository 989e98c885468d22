use wasm_bindgen::JsValue;

use super::dom::query_all;
use super::Page;
use crate::mailto::{rewrite_href, MAILTO_SELECTORS};

/// Adds the pre-filled subject and body to every contact mailto link. Returns how many changed.
pub fn rewrite_links(page: &Page) -> Result<usize, JsValue> {
    let config = &page.config;
    let mut rewritten = 0;

    for selector in MAILTO_SELECTORS {
        for link in query_all(&page.document, selector)? {
            let href = link.get_attribute("href").unwrap_or_default();
            let next = rewrite_href(
                &href,
                &config.fallback_email,
                &config.mail_subject,
                &config.mail_body,
            );
            link.set_attribute("href", &next)?;
            rewritten += 1;
        }
    }

    Ok(rewritten)
}
