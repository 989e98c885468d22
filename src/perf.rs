pub const LCP_ENTRY_TYPE: &str = "largest-contentful-paint";

/// Performance logging is a development aid; it only runs on these hosts.
pub fn is_local_host(hostname: &str) -> bool {
    matches!(hostname, "localhost" | "127.0.0.1")
}

pub fn lcp_is_slow(start_time_ms: f64, threshold_ms: f64) -> bool {
    start_time_ms > threshold_ms
}
