pub const CARD_SELECTOR: &str = ".card";
pub const CARD_BUTTON_SELECTOR: &str = ".button";
pub const TOUCH_ACTIVE_CLASS: &str = "touch-active";

/// Enter and Space on a focused card press its button.
pub fn activates_card(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}
