//! Retry-After header parsing utilities
//!
//! This module provides functionality to parse the `retry-after` HTTP header
//! which can be in either numeric (seconds) or HTTP-date format (RFC 7231).

use tracing::debug;

/// Parse the `retry-after` HTTP header value.
///
/// The `retry-after` header can be in two formats:
/// 1. Numeric: Number of seconds (e.g., "60", "120")
/// 2. HTTP-date: RFC 7231 date format (e.g., "Wed, 21 Oct 2015 07:28:00 GMT")
///
/// Numeric format is tried first, with HTTP-date parsing as the fallback.
///
/// # Examples
/// ```
/// use wardlink_egress::parse_retry_after;
///
/// assert_eq!(parse_retry_after("60"), Some(60));
/// assert_eq!(parse_retry_after("invalid"), None);
/// ```
pub fn parse_retry_after(header_value: &str) -> Option<u64> {
    if let Ok(seconds) = header_value.trim().parse::<u64>() {
        debug!(
            retry_after_seconds = seconds,
            "Parsed retry-after header (numeric format)"
        );
        return Some(seconds);
    }

    // HTTP-date format: "Wed, 21 Oct 2015 07:28:00 GMT"
    if let Ok(target_time) = chrono::DateTime::parse_from_rfc2822(header_value) {
        let now = chrono::Utc::now();
        let duration = target_time.signed_duration_since(now);

        if duration.num_seconds() > 0 {
            let seconds = duration.num_seconds() as u64;
            debug!(
                retry_after_seconds = seconds,
                target_time = %target_time,
                "Parsed retry-after header (HTTP-date format)"
            );
            return Some(seconds);
        } else {
            // Date is in the past, treat as 0 (can retry immediately)
            debug!(
                target_time = %target_time,
                "Parsed retry-after header with past date, treating as immediate retry"
            );
            return Some(0);
        }
    }

    debug!(
        header_value = header_value,
        "Failed to parse retry-after header"
    );
    None
}
