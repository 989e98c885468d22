//! Open/closed bookkeeping for the contact dropdowns on a page.

pub const DROPDOWN_SELECTOR: &str = ".contact-dropdown";
pub const TRIGGER_SELECTOR: &str = ".contact-trigger";
pub const OPTIONS_SELECTOR: &str = ".contact-options";
pub const OPTION_SELECTOR: &str = ".contact-option";
pub const COPY_BUTTON_SELECTOR: &str = ".copy-email-btn";
pub const EMAIL_ATTRIBUTE: &str = "data-email";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropdownState {
    Closed,
    Open,
}

impl DropdownState {
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// Value for `aria-expanded` on the trigger and the container.
    pub fn aria_expanded(self) -> &'static str {
        if self.is_open() {
            "true"
        } else {
            "false"
        }
    }

    /// Value for `aria-hidden` on the option list.
    pub fn aria_hidden(self) -> &'static str {
        if self.is_open() {
            "false"
        } else {
            "true"
        }
    }
}

/// State of every dropdown instance, indexed in document order. At most one is open.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DropdownSet {
    len: usize,
    open: Option<usize>,
}

impl DropdownSet {
    pub fn new(len: usize) -> Self {
        Self { len, open: None }
    }

    pub fn state(&self, index: usize) -> DropdownState {
        if self.open == Some(index) {
            DropdownState::Open
        } else {
            DropdownState::Closed
        }
    }

    /// Trigger click: closes everything, then opens `index` if it was closed.
    pub fn toggle(&mut self, index: usize) -> DropdownState {
        if index >= self.len {
            return DropdownState::Closed;
        }

        let was_open = self.open == Some(index);
        self.open = if was_open { None } else { Some(index) };
        self.state(index)
    }

    pub fn close(&mut self, index: usize) {
        if self.open == Some(index) {
            self.open = None;
        }
    }

    pub fn close_all(&mut self) {
        self.open = None;
    }

    /// Escape inside an option list. Returns whether focus should go back to the trigger.
    pub fn escape(&mut self, index: usize) -> bool {
        let was_open = self.open == Some(index);
        self.close(index);
        was_open
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKey {
    Escape,
    Next,
    Previous,
}

impl ListKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Escape" => Some(Self::Escape),
            "ArrowDown" => Some(Self::Next),
            "ArrowUp" => Some(Self::Previous),
            _ => None,
        }
    }
}

/// Index to focus after an arrow key, wrapping at both ends.
///
/// With nothing focused, `Next` lands on the first option and `Previous` on the last.
pub fn cycle_focus(current: Option<usize>, len: usize, key: ListKey) -> Option<usize> {
    if len == 0 {
        return None;
    }

    let last = len - 1;
    match key {
        ListKey::Next => Some(match current {
            Some(index) if index < last => index + 1,
            _ => 0,
        }),
        ListKey::Previous => Some(match current {
            Some(index) if index > 0 && index <= last => index - 1,
            _ => last,
        }),
        ListKey::Escape => current,
    }
}
