use std::future::Future;

use crate::error::CopyError;

/// The two ways a page can put text on the clipboard.
pub trait ClipboardAccess {
    /// Async Clipboard API write. `Err(CopyError::Unavailable)` when the API is missing.
    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), CopyError>>;

    /// Legacy selection + `execCommand("copy")`. Returns whether the browser reported a copy.
    fn legacy_copy(&self, text: &str) -> bool;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    CopiedWithFallback { reason: CopyError },
    Failed { reason: CopyError },
}

impl CopyOutcome {
    pub fn succeeded(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }

    /// Only a primary-path success closes the owning dropdown.
    pub fn closes_dropdown(&self) -> bool {
        matches!(self, Self::Copied)
    }
}

/// Tries the async API once, then the legacy path once.
pub async fn copy_text<C: ClipboardAccess>(clipboard: &C, text: &str) -> CopyOutcome {
    match clipboard.write_text(text).await {
        Ok(()) => CopyOutcome::Copied,
        Err(reason) if clipboard.legacy_copy(text) => CopyOutcome::CopiedWithFallback { reason },
        Err(reason) => CopyOutcome::Failed { reason },
    }
}
