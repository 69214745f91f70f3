use chrono::{Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Operation key the provider uses for the per-tweet lookup endpoint.
pub const TWEET_LOOKUP_OPERATION: &str = "TweetResultByRestId";

pub const DEFAULT_LIMIT: i64 = 50;
pub const DEFAULT_WINDOW_SECS: i64 = 900;

/// Parsed `x-rate-limit-*` response header values for one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitHeaders {
    pub limit: Option<i64>,
    pub remaining: Option<i64>,
    pub reset: Option<i64>,
}

/// Normalized rate-limit snapshot.
///
/// `wait` is computed once, at construction, against the wall clock; it may
/// go negative once the window has rolled over. Callers needing freshness
/// must rebuild the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitInfo {
    pub limit: i64,
    pub remaining: i64,
    /// Window reset as epoch seconds.
    pub reset: i64,
    /// Window reset rendered in the local timezone, ISO-8601.
    pub reset_at: String,
    /// Seconds until reset; negative when the window has already passed.
    pub wait: i64,
}

impl RateLimitInfo {
    pub fn from_headers(headers: Option<&RateLimitHeaders>) -> Self {
        let now = Utc::now().timestamp();
        let headers = headers.cloned().unwrap_or_default();

        let limit = headers.limit.unwrap_or(DEFAULT_LIMIT);
        let remaining = headers.remaining.unwrap_or(DEFAULT_LIMIT);
        let reset = headers.reset.unwrap_or(now + DEFAULT_WINDOW_SECS);

        Self {
            limit,
            remaining,
            reset,
            reset_at: render_local_iso(reset),
            wait: reset - now,
        }
    }

    /// Stable JSON rendering used for the `x-rate-limits` header and logs.
    pub fn to_header_value(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

fn render_local_iso(epoch_seconds: i64) -> String {
    match Local.timestamp_opt(epoch_seconds, 0).single() {
        Some(datetime) => datetime.to_rfc3339(),
        None => Utc
            .timestamp_opt(epoch_seconds, 0)
            .single()
            .map(|datetime| datetime.to_rfc3339())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_defaults() {
        let info = RateLimitInfo::from_headers(None);
        assert_eq!(info.limit, 50);
        assert_eq!(info.remaining, 50);
        assert!((899..=900).contains(&info.wait));
        let drift = info.reset - info.wait - Utc::now().timestamp();
        assert!(drift.abs() <= 1);
    }

    #[test]
    fn test_empty_headers_apply_defaults() {
        let info = RateLimitInfo::from_headers(Some(&RateLimitHeaders::default()));
        assert_eq!(info.limit, 50);
        assert_eq!(info.remaining, 50);
        assert!((899..=900).contains(&info.wait));
    }

    #[test]
    fn test_exhausted_window_in_the_future() {
        let reset = Utc::now().timestamp() + 120;
        let headers = RateLimitHeaders {
            limit: Some(50),
            remaining: Some(0),
            reset: Some(reset),
        };
        let info = RateLimitInfo::from_headers(Some(&headers));
        assert_eq!(info.remaining, 0);
        assert!(info.wait > 0);
        assert!(info.wait <= 120);
    }

    #[test]
    fn test_past_reset_yields_negative_wait() {
        let headers = RateLimitHeaders {
            limit: Some(50),
            remaining: Some(12),
            reset: Some(Utc::now().timestamp() - 30),
        };
        let info = RateLimitInfo::from_headers(Some(&headers));
        assert!(info.wait < 0);
    }

    #[test]
    fn test_header_value_is_stable_json() {
        let info = RateLimitInfo::from_headers(None);
        let value: serde_json::Value = serde_json::from_str(&info.to_header_value()).unwrap();
        for key in ["limit", "remaining", "reset", "reset_at", "wait"] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
    }

    #[test]
    fn test_reset_at_parses_back() {
        let info = RateLimitInfo::from_headers(None);
        let parsed = chrono::DateTime::parse_from_rfc3339(&info.reset_at).unwrap();
        assert_eq!(parsed.timestamp(), info.reset);
    }
}
