use serde::Deserialize;

use crate::logging::LogLevel;

const DEFAULT_COMPACT_THRESHOLD_PX: f64 = 20.0;
const DEFAULT_ACTIVE_SECTION_OFFSET_PX: f64 = 100.0;
const DEFAULT_SCROLL_OFFSET_PX: f64 = 80.0;
const DEFAULT_TOUCH_RELEASE_MS: u32 = 150;
const DEFAULT_TOAST_VISIBLE_MS: u32 = 3_000;
const DEFAULT_TOAST_EXIT_MS: u32 = 300;
const DEFAULT_LCP_WARN_MS: f64 = 2_500.0;
const DEFAULT_FALLBACK_EMAIL: &str = "minato2ban@icloud.com";
const DEFAULT_MAIL_SUBJECT: &str = "ポートフォリオサイトからのお問い合わせ";
const DEFAULT_MAIL_BODY: &str =
    "はじめまして。\r\n\r\nお名前：\r\nご用件：\r\n\r\nよろしくお願いいたします。";
const DEFAULT_COPY_SUCCESS_MESSAGE: &str = "メールアドレスをコピーしました";
const DEFAULT_COPY_FAILURE_MESSAGE: &str = "コピーに失敗しました。手動でコピーしてください。";
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const COMPACT_THRESHOLD_PX_BOUNDS: (f64, f64) = (0.0, 400.0);
const ACTIVE_SECTION_OFFSET_PX_BOUNDS: (f64, f64) = (0.0, 400.0);
const SCROLL_OFFSET_PX_BOUNDS: (f64, f64) = (0.0, 400.0);
const TOUCH_RELEASE_MS_BOUNDS: (u32, u32) = (0, 2_000);
const TOAST_VISIBLE_MS_BOUNDS: (u32, u32) = (500, 30_000);
const TOAST_EXIT_MS_BOUNDS: (u32, u32) = (0, 5_000);
const LCP_WARN_MS_BOUNDS: (f64, f64) = (100.0, 60_000.0);

/// Id of the optional `<script type="application/json">` element holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "interaction-config";

/// Tunables for every handler the controller installs.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionConfig {
    pub compact_threshold_px: f64,
    pub active_section_offset_px: f64,
    pub scroll_offset_px: f64,
    pub touch_release_ms: u32,
    pub toast_visible_ms: u32,
    pub toast_exit_ms: u32,
    pub lcp_warn_ms: f64,
    pub fallback_email: String,
    pub mail_subject: String,
    pub mail_body: String,
    pub copy_success_message: String,
    pub copy_failure_message: String,
    pub log_level: LogLevel,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            compact_threshold_px: DEFAULT_COMPACT_THRESHOLD_PX,
            active_section_offset_px: DEFAULT_ACTIVE_SECTION_OFFSET_PX,
            scroll_offset_px: DEFAULT_SCROLL_OFFSET_PX,
            touch_release_ms: DEFAULT_TOUCH_RELEASE_MS,
            toast_visible_ms: DEFAULT_TOAST_VISIBLE_MS,
            toast_exit_ms: DEFAULT_TOAST_EXIT_MS,
            lcp_warn_ms: DEFAULT_LCP_WARN_MS,
            fallback_email: DEFAULT_FALLBACK_EMAIL.to_string(),
            mail_subject: DEFAULT_MAIL_SUBJECT.to_string(),
            mail_body: DEFAULT_MAIL_BODY.to_string(),
            copy_success_message: DEFAULT_COPY_SUCCESS_MESSAGE.to_string(),
            copy_failure_message: DEFAULT_COPY_FAILURE_MESSAGE.to_string(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawInteractionConfig {
    compact_threshold_px: Option<f64>,
    active_section_offset_px: Option<f64>,
    scroll_offset_px: Option<f64>,
    touch_release_ms: Option<u32>,
    toast_visible_ms: Option<u32>,
    toast_exit_ms: Option<u32>,
    lcp_warn_ms: Option<f64>,
    fallback_email: Option<String>,
    mail_subject: Option<String>,
    mail_body: Option<String>,
    copy_success_message: Option<String>,
    copy_failure_message: Option<String>,
    log_level: Option<String>,
}

impl InteractionConfig {
    /// Parses the JSON override document. Out-of-bounds or empty values keep their defaults.
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: RawInteractionConfig = serde_json::from_str(source)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawInteractionConfig) -> Self {
        Self {
            compact_threshold_px: f64_with_bounds(
                raw.compact_threshold_px,
                DEFAULT_COMPACT_THRESHOLD_PX,
                COMPACT_THRESHOLD_PX_BOUNDS,
            ),
            active_section_offset_px: f64_with_bounds(
                raw.active_section_offset_px,
                DEFAULT_ACTIVE_SECTION_OFFSET_PX,
                ACTIVE_SECTION_OFFSET_PX_BOUNDS,
            ),
            scroll_offset_px: f64_with_bounds(
                raw.scroll_offset_px,
                DEFAULT_SCROLL_OFFSET_PX,
                SCROLL_OFFSET_PX_BOUNDS,
            ),
            touch_release_ms: u32_with_bounds(
                raw.touch_release_ms,
                DEFAULT_TOUCH_RELEASE_MS,
                TOUCH_RELEASE_MS_BOUNDS,
            ),
            toast_visible_ms: u32_with_bounds(
                raw.toast_visible_ms,
                DEFAULT_TOAST_VISIBLE_MS,
                TOAST_VISIBLE_MS_BOUNDS,
            ),
            toast_exit_ms: u32_with_bounds(
                raw.toast_exit_ms,
                DEFAULT_TOAST_EXIT_MS,
                TOAST_EXIT_MS_BOUNDS,
            ),
            lcp_warn_ms: f64_with_bounds(raw.lcp_warn_ms, DEFAULT_LCP_WARN_MS, LCP_WARN_MS_BOUNDS),
            fallback_email: non_empty_or(raw.fallback_email, DEFAULT_FALLBACK_EMAIL),
            mail_subject: non_empty_or(raw.mail_subject, DEFAULT_MAIL_SUBJECT),
            mail_body: non_empty_or(raw.mail_body, DEFAULT_MAIL_BODY),
            copy_success_message: non_empty_or(
                raw.copy_success_message,
                DEFAULT_COPY_SUCCESS_MESSAGE,
            ),
            copy_failure_message: non_empty_or(
                raw.copy_failure_message,
                DEFAULT_COPY_FAILURE_MESSAGE,
            ),
            log_level: raw
                .log_level
                .as_deref()
                .and_then(LogLevel::from_str)
                .unwrap_or(DEFAULT_LOG_LEVEL),
        }
    }
}

fn f64_with_bounds(value: Option<f64>, default: f64, bounds: (f64, f64)) -> f64 {
    value
        .filter(|value| value.is_finite())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn u32_with_bounds(value: Option<u32>, default: u32, bounds: (u32, u32)) -> u32 {
    value
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}
