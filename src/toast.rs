use crate::clipboard::CopyOutcome;
use crate::config::InteractionConfig;

pub const TOAST_CLASS: &str = "copy-success";
pub const TOAST_SELECTOR: &str = ".copy-success";
pub const SHOW_CLASS: &str = "show";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Failure,
}

impl ToastKind {
    pub fn background(self) -> &'static str {
        match self {
            Self::Success => "var(--success)",
            Self::Failure => "var(--warning)",
        }
    }
}

/// Visible duration, then the exit transition before the node is removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToastTimeline {
    pub visible_ms: u32,
    pub exit_ms: u32,
}

impl ToastTimeline {
    pub fn from_config(config: &InteractionConfig) -> Self {
        Self {
            visible_ms: config.toast_visible_ms,
            exit_ms: config.toast_exit_ms,
        }
    }

    pub fn total_ms(self) -> u32 {
        self.visible_ms.saturating_add(self.exit_ms)
    }
}

pub fn message_for<'a>(outcome: &CopyOutcome, config: &'a InteractionConfig) -> (&'a str, ToastKind) {
    if outcome.succeeded() {
        (config.copy_success_message.as_str(), ToastKind::Success)
    } else {
        (config.copy_failure_message.as_str(), ToastKind::Failure)
    }
}
