use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Anchors whose href gets a pre-filled subject and body.
pub const MAILTO_SELECTORS: [&str; 2] = [
    ".contact-options a[href^=\"mailto:\"]",
    "#contact a[href^=\"mailto:\"]",
];

/// Everything `encodeURIComponent` escapes: all but `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Recipient between `mailto:` and the first `?`, if there is one.
pub fn recipient(href: &str) -> Option<&str> {
    let rest = href.strip_prefix("mailto:")?;
    let address = rest.split('?').next().unwrap_or_default();
    (!address.is_empty()).then_some(address)
}

pub fn build_href(to: &str, subject: &str, body: &str) -> String {
    format!(
        "mailto:{to}?subject={}&body={}",
        encode_uri_component(subject),
        encode_uri_component(body)
    )
}

/// Rewrites an existing href, keeping its recipient or falling back to `default_to`.
pub fn rewrite_href(href: &str, default_to: &str, subject: &str, body: &str) -> String {
    let to = recipient(href).unwrap_or(default_to);
    build_href(to, subject, body)
}
