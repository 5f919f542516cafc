//! @ai:module:intent Model registry contract and its Hugging Face Hub implementation
//! @ai:module:layer infrastructure
//! @ai:module:public_api ModelRegistry, ModelQuery, ModelInfo, TransportError, HfHubClient, MockModelRegistry
//! @ai:module:stateless false

use crate::config::HubConfig;
use crate::hub::rate_limiter::RateLimiter;
use crate::hub::retry::{with_retry, RetryPolicy};
use reqwest::header::{HeaderMap, LINK};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

/// @ai:intent Metadata the registry returns for one model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub pipeline_tag: Option<String>,
}

impl ModelInfo {
    /// @ai:intent Convenience constructor (mostly for tests and mocks)
    /// @ai:effects pure
    pub fn new(id: &str, tags: &[&str], pipeline_tag: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            pipeline_tag: pipeline_tag.map(str::to_string),
        }
    }
}

/// @ai:intent The two query shapes the registry supports
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModelQuery {
    /// Models matching an author and model name
    ByName { author: Option<String>, name: String },
    /// Models tagged with a language and/or pipeline task
    ByFilter {
        language: Option<String>,
        task: Option<String>,
    },
}

/// @ai:intent Transport-level failure talking to the registry
/// @ai:effects pure
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("registry responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("registry unreachable: {0}")]
    Unreachable(String),

    #[error("invalid registry endpoint: {0}")]
    InvalidEndpoint(String),
}

impl TransportError {
    /// @ai:intent Whether the same request may succeed if sent again
    /// @ai:effects pure
    pub fn is_transient(&self) -> bool {
        match self {
            TransportError::Http(e) => e.is_timeout() || e.is_connect(),
            TransportError::Status { status, .. } => *status == 429 || *status >= 500,
            TransportError::Unreachable(_) => true,
            TransportError::InvalidEndpoint(_) => false,
        }
    }
}

/// @ai:intent Trait for the remote model registry
/// @ai:post an empty Ok is "no matches", never a transport failure
#[allow(async_fn_in_trait)]
pub trait ModelRegistry: Send + Sync {
    /// @ai:intent Run a query and return every matching model
    async fn query(
        &self,
        query: &ModelQuery,
        token: Option<&str>,
    ) -> Result<Vec<ModelInfo>, TransportError>;
}

/// @ai:intent Hugging Face Hub REST client with timeout, retries and throttling
pub struct HfHubClient {
    client: reqwest::Client,
    config: HubConfig,
    rate_limiter: Arc<RateLimiter>,
}

impl HfHubClient {
    /// @ai:intent Create a new Hub client
    /// @ai:effects pure
    pub fn new(config: HubConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("scandeval/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let rate_limiter = Arc::new(RateLimiter::new(config.requests_per_minute));

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    /// @ai:intent Build the first-page URL for a query
    /// @ai:effects pure
    fn models_url(&self, query: &ModelQuery) -> Result<Url, TransportError> {
        let base = format!("{}/api/models", self.config.endpoint.trim_end_matches('/'));

        let mut params: Vec<(&str, &str)> = Vec::new();
        match query {
            ModelQuery::ByName { author, name } => {
                params.push(("search", name.as_str()));
                if let Some(author) = author {
                    params.push(("author", author.as_str()));
                }
            }
            ModelQuery::ByFilter { language, task } => {
                if let Some(language) = language {
                    params.push(("language", language.as_str()));
                }
                if let Some(task) = task {
                    params.push(("pipeline_tag", task.as_str()));
                }
            }
        }

        Url::parse_with_params(&base, &params)
            .map_err(|e| TransportError::InvalidEndpoint(format!("{}: {}", base, e)))
    }

    /// @ai:intent Fetch one page of results and the link to the next page
    /// @ai:effects network
    async fn fetch_page(
        &self,
        url: Url,
        token: Option<&str>,
    ) -> Result<(Vec<ModelInfo>, Option<Url>), TransportError> {
        self.rate_limiter.wait().await;

        let mut request = self.client.get(url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let next = next_page(response.headers());
        let models = response.json::<Vec<ModelInfo>>().await?;
        Ok((models, next))
    }
}

impl ModelRegistry for HfHubClient {
    /// @ai:intent Query the Hub, following pagination links
    /// @ai:effects network
    async fn query(
        &self,
        query: &ModelQuery,
        token: Option<&str>,
    ) -> Result<Vec<ModelInfo>, TransportError> {
        let policy = RetryPolicy::from_config(&self.config);
        let mut models = Vec::new();
        let mut page = Some(self.models_url(query)?);

        while let Some(url) = page.take() {
            tracing::debug!("GET {}", url);
            let (batch, next) = with_retry(&policy, || self.fetch_page(url.clone(), token)).await?;
            models.extend(batch);
            page = next;
        }

        Ok(models)
    }
}

/// @ai:intent Extract the rel="next" target from a Link header
/// @ai:example (<https://hub/api/models?cursor=abc>; rel="next") -> Some(url)
/// @ai:effects pure
fn next_page(headers: &HeaderMap) -> Option<Url> {
    let link = headers.get(LINK)?.to_str().ok()?;

    link.split(',').find_map(|part| {
        let (target, params) = part.split_once(';')?;
        if !params.contains(r#"rel="next""#) {
            return None;
        }
        Url::parse(target.trim().trim_start_matches('<').trim_end_matches('>')).ok()
    })
}

/// @ai:intent In-memory registry for tests, counting every query it receives
#[derive(Default)]
pub struct MockModelRegistry {
    responses: HashMap<ModelQuery, Vec<ModelInfo>>,
    unreachable: bool,
    calls: AtomicUsize,
    received: Mutex<Vec<ModelQuery>>,
}

impl MockModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Registry on which every query fails at the transport level
    /// @ai:effects pure
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    /// @ai:intent Register the answer to a query; unregistered queries return no models
    /// @ai:effects pure
    pub fn with_response(mut self, query: ModelQuery, models: Vec<ModelInfo>) -> Self {
        self.responses.insert(query, models);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<ModelQuery> {
        self.received
            .lock()
            .map(|received| received.clone())
            .unwrap_or_default()
    }
}

impl ModelRegistry for MockModelRegistry {
    async fn query(
        &self,
        query: &ModelQuery,
        _token: Option<&str>,
    ) -> Result<Vec<ModelInfo>, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut received) = self.received.lock() {
            received.push(query.clone());
        }

        if self.unreachable {
            return Err(TransportError::Unreachable("connection refused".to_string()));
        }

        Ok(self.responses.get(query).cloned().unwrap_or_default())
    }
}
