//! @ai:module:intent Model registry access and the resolvers built on it
//! @ai:module:layer infrastructure
//! @ai:module:public_api ModelRegistry, HfHubClient, ModelConfigResolver, ModelListResolver, MemoCache

pub mod cache;
pub mod client;
pub mod model_config;
pub mod model_list;
pub mod rate_limiter;
pub mod retry;

pub use cache::MemoCache;
pub use client::{HfHubClient, MockModelRegistry, ModelInfo, ModelQuery, ModelRegistry, TransportError};
pub use model_config::{ModelConfig, ModelConfigResolver, ModelKey, RANDOM_PREFIX};
pub use model_list::{ModelListResolver, ModelLists};
pub use rate_limiter::RateLimiter;
pub use retry::{with_retry, RetryPolicy};
