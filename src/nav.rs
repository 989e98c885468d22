//! Scroll-derived navigation state: the compact bar flag, the active section
//! and same-page link targets.

/// Class added to the navigation container once the page has scrolled.
pub const SCROLLED_CLASS: &str = "scrolled";
/// Class carried by the link pointing at the active section.
pub const ACTIVE_CLASS: &str = "active";

#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

pub fn is_compact(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// Last section in document order whose range contains `scroll_y + offset`.
pub fn active_section(sections: &[SectionBounds], scroll_y: f64, offset: f64) -> Option<&str> {
    let probe = scroll_y + offset;
    sections
        .iter()
        .rev()
        .find(|section| section.contains(probe))
        .map(|section| section.id.as_str())
}

pub fn link_is_active(href: Option<&str>, active: Option<&str>) -> bool {
    match (href, active) {
        (Some(href), Some(active)) => href.strip_prefix('#') == Some(active),
        _ => false,
    }
}

/// `Some(fragment)` when the href stays on this page (`#about` -> `about`).
pub fn in_page_fragment(href: &str) -> Option<&str> {
    href.strip_prefix('#')
}

pub fn scroll_target_top(offset_top: f64, nav_offset: f64) -> f64 {
    offset_top - nav_offset
}
