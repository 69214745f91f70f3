use std::collections::BTreeMap;

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    errors::AppError,
    http_server::AppState,
    metrics::{track_provider_call, track_tweets_pulled},
    models::tweet::Detail,
    services::{
        audit,
        rate_limit::{RateLimitInfo, TWEET_LOOKUP_OPERATION},
        tweet_details::{build_detail, unwrap_result},
    },
    utils::status_id::extract_status_id,
};

pub const RATE_LIMITS_HEADER: &str = "x-rate-limits";

/// POST /tweet/details
///
/// Maps each input (status URL or bare id) to a canonical id, asks the
/// provider for the batch, surfaces backpressure when the quota is spent,
/// and returns the normalized details keyed by tweet id. The rate-limit
/// snapshot rides along as a header on every outcome.
pub async fn handle_tweet_details(
    State(state): State<AppState>,
    Json(urls): Json<Vec<String>>,
) -> Result<Response, AppError> {
    let ids: Vec<Option<String>> = urls.iter().map(|url| extract_status_id(url)).collect();
    tracing::info!(
        "Looking up {} tweets ({} unresolved inputs)",
        ids.len(),
        ids.iter().filter(|id| id.is_none()).count()
    );

    let batch = track_provider_call(
        TWEET_LOOKUP_OPERATION,
        state.provider.fetch_tweets_by_ids(&ids),
    )
    .await?;
    track_tweets_pulled(TWEET_LOOKUP_OPERATION, batch.len());

    let limits = RateLimitInfo::from_headers(
        state
            .provider
            .current_rate_limits()
            .get(TWEET_LOOKUP_OPERATION),
    );
    tracing::debug!("rate limits: {:?}", limits);
    let mut headers = rate_limit_headers(&limits);

    if batch.is_empty() && limits.remaining == 0 {
        tracing::warn!("provider quota exhausted, resets at {}", limits.reset_at);
        if let Ok(value) = HeaderValue::from_str(&limits.reset_at) {
            headers.insert(header::RETRY_AFTER, value);
        }
        return Ok((StatusCode::TOO_MANY_REQUESTS, headers).into_response());
    }

    // Diagnostic write only; a failure must not cost us the response.
    if let Err(err) = audit::write_raw_batch(&state.config.data.audit_log_path, &batch).await {
        tracing::warn!(
            "failed to write audit log {}: {}",
            state.config.data.audit_log_path,
            err
        );
    }

    let mut details: BTreeMap<String, Detail> = BTreeMap::new();
    for envelope in &batch {
        let Some(record) = unwrap_result(envelope) else {
            continue;
        };
        details.insert(record.rest_id.clone(), build_detail(&record));
    }

    Ok((StatusCode::OK, headers, Json(details)).into_response())
}

/// GET /tweet/rate_limits
/// Read-only snapshot of the tracker, no lookup performed.
pub async fn handle_rate_limits(State(state): State<AppState>) -> Response {
    let limits = RateLimitInfo::from_headers(
        state
            .provider
            .current_rate_limits()
            .get(TWEET_LOOKUP_OPERATION),
    );
    let headers = rate_limit_headers(&limits);

    (StatusCode::OK, headers, Json(limits)).into_response()
}

fn rate_limit_headers(limits: &RateLimitInfo) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&limits.to_header_value()) {
        headers.insert(RATE_LIMITS_HEADER, value);
    }
    headers
}
