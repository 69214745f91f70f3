use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    config::ProviderConfig,
    errors::ProviderError,
    services::rate_limit::{RateLimitHeaders, TWEET_LOOKUP_OPERATION},
};

pub type ProviderResult<T> = Result<T, ProviderError>;

/// The upstream collaborator contract: batch tweet lookup plus a readable
/// snapshot of the most recently observed rate-limit state per operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TweetProvider: Send + Sync {
    /// Fetches raw result envelopes for the given ids. Unresolvable ids
    /// (`None`) are skipped; per-id upstream rejections degrade the batch
    /// instead of failing it.
    async fn fetch_tweets_by_ids(&self, ids: &[Option<String>]) -> ProviderResult<Vec<Value>>;

    /// Most recently observed rate-limit headers, keyed by operation name.
    fn current_rate_limits(&self) -> HashMap<String, RateLimitHeaders>;
}

/// Thin client for the platform's GraphQL lookup endpoint.
///
/// One instance is built at startup and shared across requests; the inner
/// reqwest client keeps the connection pool alive. Rate-limit headers are
/// recorded after every response, advisory only, last writer wins.
pub struct ScraperClient {
    client: Client,
    base_url: String,
    query_id: String,
    bearer_token: String,
    auth_token: String,
    csrf_token: String,
    rate_limits: RwLock<HashMap<String, RateLimitHeaders>>,
}

impl ScraperClient {
    pub fn new(config: &ProviderConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            query_id: config.query_id.clone(),
            bearer_token: config.bearer_token.clone(),
            auth_token: config.auth_token.clone(),
            csrf_token: config.csrf_token.clone(),
            rate_limits: RwLock::new(HashMap::new()),
        }
    }

    async fn fetch_one(&self, id: &str) -> ProviderResult<Option<Value>> {
        let variables = serde_json::json!({
            "tweetId": id,
            "withCommunity": false,
            "includePromotedContent": false,
            "withVoice": false,
        });
        let url = format!(
            "{}/graphql/{}/{}",
            self.base_url, self.query_id, TWEET_LOOKUP_OPERATION
        );

        debug!("Fetching tweet {} from provider", id);
        let response = self
            .client
            .get(&url)
            .query(&[("variables", variables.to_string())])
            .bearer_auth(&self.bearer_token)
            .header(
                reqwest::header::COOKIE,
                format!("auth_token={}; ct0={}", self.auth_token, self.csrf_token),
            )
            .header("x-csrf-token", &self.csrf_token)
            .send()
            .await?;

        self.record_rate_limits(TWEET_LOOKUP_OPERATION, response.headers());

        let status = response.status();
        if !status.is_success() {
            // Quota exhaustion and per-id rejections degrade the batch; the
            // recorded headers let the orchestrator surface backpressure.
            let text = response.text().await.unwrap_or_default();
            warn!("provider rejected tweet {}: HTTP {} - {}", id, status, text);
            return Ok(None);
        }

        Ok(Some(response.json().await?))
    }

    fn record_rate_limits(&self, operation: &str, headers: &reqwest::header::HeaderMap) {
        let parse = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<i64>().ok())
        };
        let snapshot = RateLimitHeaders {
            limit: parse("x-rate-limit-limit"),
            remaining: parse("x-rate-limit-remaining"),
            reset: parse("x-rate-limit-reset"),
        };
        debug!("rate limit snapshot for {}: {:?}", operation, snapshot);

        if let Ok(mut limits) = self.rate_limits.write() {
            limits.insert(operation.to_string(), snapshot);
        }
    }
}

#[async_trait]
impl TweetProvider for ScraperClient {
    async fn fetch_tweets_by_ids(&self, ids: &[Option<String>]) -> ProviderResult<Vec<Value>> {
        let mut batch = Vec::with_capacity(ids.len());
        for id in ids.iter().flatten() {
            if let Some(envelope) = self.fetch_one(id).await? {
                batch.push(envelope);
            }
        }
        Ok(batch)
    }

    fn current_rate_limits(&self) -> HashMap<String, RateLimitHeaders> {
        self.rate_limits
            .read()
            .map(|limits| limits.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use wiremock::matchers::{method, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> ScraperClient {
        let mut config = Config::default().provider;
        config.base_url = base_url.to_string();
        ScraperClient::new(&config)
    }

    #[tokio::test]
    async fn test_fetch_collects_envelopes_and_rate_limits() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/graphql/.+/TweetResultByRestId$"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({
                        "data": { "tweetResult": { "result": { "__typename": "Tweet" } } }
                    }))
                    .insert_header("x-rate-limit-limit", "50")
                    .insert_header("x-rate-limit-remaining", "49")
                    .insert_header("x-rate-limit-reset", "1700000000"),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let ids = vec![Some("123".to_string()), None, Some("456".to_string())];
        let batch = client.fetch_tweets_by_ids(&ids).await.unwrap();

        // The None id is skipped, the two real ids each yield an envelope.
        assert_eq!(batch.len(), 2);

        let limits = client.current_rate_limits();
        let snapshot = limits.get(TWEET_LOOKUP_OPERATION).unwrap();
        assert_eq!(snapshot.limit, Some(50));
        assert_eq!(snapshot.remaining, Some(49));
        assert_eq!(snapshot.reset, Some(1_700_000_000));
    }

    #[tokio::test]
    async fn test_rate_limited_response_degrades_to_empty_batch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(429)
                    .insert_header("x-rate-limit-limit", "50")
                    .insert_header("x-rate-limit-remaining", "0")
                    .insert_header("x-rate-limit-reset", "1700000900"),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let batch = client
            .fetch_tweets_by_ids(&[Some("123".to_string())])
            .await
            .unwrap();

        assert!(batch.is_empty());
        let limits = client.current_rate_limits();
        assert_eq!(
            limits.get(TWEET_LOOKUP_OPERATION).unwrap().remaining,
            Some(0)
        );
    }

    #[tokio::test]
    async fn test_missing_headers_leave_snapshot_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        client
            .fetch_tweets_by_ids(&[Some("123".to_string())])
            .await
            .unwrap();

        let limits = client.current_rate_limits();
        assert_eq!(
            limits.get(TWEET_LOOKUP_OPERATION).unwrap(),
            &RateLimitHeaders::default()
        );
    }
}
