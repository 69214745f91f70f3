use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use lazy_static::lazy_static;
#[cfg(target_os = "linux")]
use prometheus::process_collector::ProcessCollector;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use std::sync::Arc;
use std::time::Instant;

use crate::http_server::AppState;

// REST API and provider-call metrics
lazy_static! {
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests"),
        &["method", "endpoint", "status"]
    )
    .unwrap();
    pub static ref HTTP_REQUEST_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request duration in seconds"
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0
        ]),
        &["method", "endpoint"]
    )
    .unwrap();
    pub static ref HTTP_REQUESTS_IN_FLIGHT: IntGauge = IntGauge::new(
        "http_requests_in_flight",
        "Number of HTTP requests currently being processed"
    )
    .unwrap();
    pub static ref HTTP_ERRORS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("http_errors_total", "Total number of HTTP errors"),
        &["method", "endpoint", "status"]
    )
    .unwrap();

    // Upstream provider metrics
    pub static ref PROVIDER_CALLS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("provider_calls_total", "Total number of provider lookups"),
        &["operation"]
    )
    .unwrap();
    pub static ref PROVIDER_CALL_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "provider_call_duration_seconds",
            "Provider lookup duration in seconds"
        )
        .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["operation"]
    )
    .unwrap();
    pub static ref PROVIDER_ERRORS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("provider_errors_total", "Total number of provider errors"),
        &["operation", "error_type"]
    )
    .unwrap();
    pub static ref TWEETS_PULLED_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "tweets_pulled_total",
            "Total number of tweets pulled from the provider"
        ),
        &["operation"]
    )
    .unwrap();
    pub static ref TWEETS_PER_CALL: HistogramVec = HistogramVec::new(
        HistogramOpts::new("tweets_per_call", "Number of tweets returned per lookup")
            .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0]),
        &["operation"]
    )
    .unwrap();
}

#[derive(Debug, Clone)]
pub struct Metrics {
    pub registry: Arc<Registry>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        // Register OS/machine metrics collector (Linux only)
        #[cfg(target_os = "linux")]
        {
            let process_collector = ProcessCollector::for_self();
            registry.register(Box::new(process_collector)).unwrap();
        }

        registry.register(Box::new(HTTP_REQUESTS_TOTAL.clone())).unwrap();
        registry.register(Box::new(HTTP_REQUEST_DURATION.clone())).unwrap();
        registry.register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone())).unwrap();
        registry.register(Box::new(HTTP_ERRORS_TOTAL.clone())).unwrap();

        registry.register(Box::new(PROVIDER_CALLS_TOTAL.clone())).unwrap();
        registry.register(Box::new(PROVIDER_CALL_DURATION.clone())).unwrap();
        registry.register(Box::new(PROVIDER_ERRORS_TOTAL.clone())).unwrap();
        registry.register(Box::new(TWEETS_PULLED_TOTAL.clone())).unwrap();
        registry.register(Box::new(TWEETS_PER_CALL.clone())).unwrap();

        Self {
            registry: Arc::new(registry),
        }
    }
}

/// Helper to normalize endpoints (replace numeric ids with ":id")
pub fn normalize_path(path: &str) -> String {
    let path_only = path.split('?').next().unwrap_or(path);

    let segments: Vec<&str> = path_only.split('/').filter(|s| !s.is_empty()).collect();

    segments
        .iter()
        .map(|s| {
            if s.parse::<i64>().is_ok() {
                ":id"
            } else {
                *s
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Middleware for tracking HTTP metrics
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let method = req.method().clone();

    // Skip metrics for the metrics endpoint
    if path == "/metrics" {
        return next.run(req).await;
    }

    let endpoint = normalize_path(&path);

    HTTP_REQUESTS_IN_FLIGHT.inc();

    let start = Instant::now();
    let response = next.run(req).await;
    let duration = start.elapsed().as_secs_f64();

    HTTP_REQUEST_DURATION
        .with_label_values(&[method.as_str(), &endpoint])
        .observe(duration);

    let status = response.status();
    let status_str = status.as_u16().to_string();

    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method.as_str(), &endpoint, &status_str])
        .inc();

    if status.is_client_error() || status.is_server_error() {
        HTTP_ERRORS_TOTAL
            .with_label_values(&[method.as_str(), &endpoint, &status_str])
            .inc();
    }

    HTTP_REQUESTS_IN_FLIGHT.dec();

    response
}

/// Track a provider lookup: call count, duration, and errors.
pub async fn track_provider_call<T, E, F>(operation: &str, f: F) -> Result<T, E>
where
    F: std::future::Future<Output = Result<T, E>>,
{
    let start = Instant::now();

    PROVIDER_CALLS_TOTAL.with_label_values(&[operation]).inc();

    let result = f.await;

    let duration = start.elapsed().as_secs_f64();
    PROVIDER_CALL_DURATION
        .with_label_values(&[operation])
        .observe(duration);

    if result.is_err() {
        PROVIDER_ERRORS_TOTAL
            .with_label_values(&[operation, "provider_error"])
            .inc();
    }

    result
}

/// Track tweets pulled from a successful provider lookup.
pub fn track_tweets_pulled(operation: &str, tweet_count: usize) {
    if tweet_count > 0 {
        TWEETS_PULLED_TOTAL
            .with_label_values(&[operation])
            .inc_by(tweet_count as u64);
        TWEETS_PER_CALL
            .with_label_values(&[operation])
            .observe(tweet_count as f64);
    }
}

pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = state.metrics.registry.gather();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            String::from("Failed to encode metrics"),
        );
    }

    match String::from_utf8(buffer) {
        Ok(body) => (StatusCode::OK, body),
        Err(e) => {
            tracing::error!("custom metrics could not be from_utf8'd: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                String::from("Failed to encode metrics"),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_replaces_numeric_segments() {
        assert_eq!(
            normalize_path("/tweet/1846987139428635110?x=1"),
            "tweet/:id"
        );
        assert_eq!(normalize_path("/tweet/details"), "tweet/details");
    }
}
