//! @ai:module:intent Resolve a model identifier to normalised model metadata
//! @ai:module:layer application
//! @ai:module:public_api ModelConfig, ModelKey, ModelConfigResolver
//! @ai:module:stateless false

use crate::catalog::LanguageCatalog;
use crate::config::{BenchmarkConfig, Framework};
use crate::error::{Error, Result};
use crate::hub::cache::MemoCache;
use crate::hub::client::{ModelInfo, ModelQuery, ModelRegistry, TransportError};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::{Arc, LazyLock};

/// Identifiers with this prefix are synthetic models that never touch the registry.
pub const RANDOM_PREFIX: &str = "random";

const DEFAULT_REVISION: &str = "main";
const DEFAULT_TASK: &str = "fill-mask";
/// Pipeline tags of models that are benchmarked as plain encoders
const ENCODER_TASKS: [&str; 2] = ["sentence-similarity", "feature-extraction"];
const TENSORFLOW_TAGS: [&str; 3] = ["tf", "tensorflow", "keras"];

static NAME_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("valid regex"));

/// @ai:intent Normalised metadata for one model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelConfig {
    /// Never carries the revision suffix
    pub model_id: String,
    pub framework: Framework,
    pub task: String,
    pub languages: BTreeSet<String>,
    pub revision: String,
}

impl ModelConfig {
    /// @ai:intent Deterministic stub for a synthetic model
    /// @ai:effects pure
    fn synthetic(model_id: &str) -> Self {
        let model_id = model_id.split('@').next().unwrap_or(model_id);
        Self {
            model_id: model_id.to_string(),
            framework: Framework::Pytorch,
            task: DEFAULT_TASK.to_string(),
            languages: BTreeSet::new(),
            revision: DEFAULT_REVISION.to_string(),
        }
    }
}

/// @ai:intent Parsed `[author/]name[@revision]` identifier; also the cache key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelKey {
    pub author: Option<String>,
    pub name: String,
    pub revision: String,
}

impl ModelKey {
    /// @ai:intent Split a model identifier into author, name and revision
    /// @ai:example ("org/bert@v2") -> (Some("org"), "bert", "v2")
    /// @ai:example ("bert") -> (None, "bert", "main")
    /// @ai:effects pure
    pub fn parse(model_id: &str) -> Result<Self> {
        let (path, revision) = match model_id.split_once('@') {
            Some((path, revision)) => (path, revision.trim()),
            None => (model_id, DEFAULT_REVISION),
        };

        if revision.is_empty() {
            return Err(Error::Configuration(format!(
                "model id '{}' has an empty revision",
                model_id
            )));
        }

        let (author, name) = match path.split_once('/') {
            Some((author, name)) => (Some(author), name),
            None => (None, path),
        };

        let parts_valid = author.map_or(true, |a| NAME_PART.is_match(a)) && NAME_PART.is_match(name);
        if !parts_valid {
            return Err(Error::Configuration(format!(
                "model id '{}' is not of the form [author/]name[@revision]",
                model_id
            )));
        }

        Ok(Self {
            author: author.map(str::to_string),
            name: name.to_string(),
            revision: revision.to_string(),
        })
    }

    /// The identifier without revision.
    pub fn model_id(&self) -> String {
        match &self.author {
            Some(author) => format!("{}/{}", author, self.name),
            None => self.name.clone(),
        }
    }
}

/// @ai:intent Map any transport failure to the single user-facing connection error
/// @ai:effects pure
pub(crate) fn connection_error(error: TransportError) -> Error {
    tracing::debug!("Registry transport failure: {}", error);
    Error::Connection(
        "Connection to the Hugging Face Hub failed. Check your internet connection and \
         whether https://huggingface.co is down."
            .to_string(),
    )
}

/// @ai:intent Framework from registry tags, pytorch unless a tag says otherwise
/// @ai:effects pure
fn detect_framework(tags: &BTreeSet<String>) -> Result<Framework> {
    if tags.contains("pytorch") {
        Ok(Framework::Pytorch)
    } else if tags.contains("jax") {
        Ok(Framework::Jax)
    } else if tags.contains("spacy") {
        Ok(Framework::Spacy)
    } else if TENSORFLOW_TAGS.iter().any(|tag| tags.contains(*tag)) {
        Err(Error::InvalidBenchmark(
            "TensorFlow/Keras models are not supported.".to_string(),
        ))
    } else {
        Ok(Framework::Pytorch)
    }
}

fn detect_task(pipeline_tag: Option<&str>) -> String {
    match pipeline_tag {
        Some(task) if !ENCODER_TASKS.contains(&task) => task.to_string(),
        _ => DEFAULT_TASK.to_string(),
    }
}

/// @ai:intent Pick the registry result that is the requested model
/// @ai:post an exact id match wins; without an author, a unique-by-name match is accepted
/// @ai:effects pure
fn select_match<'m>(key: &ModelKey, models: &'m [ModelInfo]) -> Option<&'m ModelInfo> {
    let wanted = key.model_id();

    if let Some(exact) = models.iter().find(|m| m.id.eq_ignore_ascii_case(&wanted)) {
        return Some(exact);
    }

    if key.author.is_some() {
        return None;
    }

    let mut by_name = models
        .iter()
        .filter(|m| m.id.rsplit('/').next() == Some(key.name.as_str()));
    let first = by_name.next()?;
    if by_name.next().is_some() {
        tracing::warn!(
            "Several models are named '{}'; using {}. Pass author/name to disambiguate.",
            key.name,
            first.id
        );
    }
    Some(first)
}

/// @ai:intent Resolves model identifiers through the registry, memoising results
pub struct ModelConfigResolver<R: ModelRegistry> {
    registry: Arc<R>,
    languages: Arc<LanguageCatalog>,
    cache: MemoCache<ModelKey, ModelConfig>,
}

impl<R: ModelRegistry> ModelConfigResolver<R> {
    pub fn new(registry: Arc<R>, languages: Arc<LanguageCatalog>) -> Self {
        Self {
            registry,
            languages,
            cache: MemoCache::new(),
        }
    }

    /// @ai:intent Resolve one model identifier
    /// @ai:post random-prefixed ids never query the registry
    /// @ai:effects network
    pub async fn resolve(&self, model_id: &str, config: &BenchmarkConfig) -> Result<ModelConfig> {
        if model_id.starts_with(RANDOM_PREFIX) {
            return Ok(ModelConfig::synthetic(model_id));
        }

        let key = ModelKey::parse(model_id)?;
        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!("Model config cache hit for {}", model_id);
            return Ok(cached);
        }

        let query = ModelQuery::ByName {
            author: key.author.clone(),
            name: key.name.clone(),
        };
        let token = config.auth_token.resolve();
        let models = self
            .registry
            .query(&query, token.as_deref())
            .await
            .map_err(connection_error)?;

        let model = select_match(&key, &models).ok_or_else(|| {
            Error::InvalidBenchmark(format!(
                "The model {} does not exist on the Hugging Face Hub.",
                model_id
            ))
        })?;

        let model_config = ModelConfig {
            model_id: key.model_id(),
            framework: detect_framework(&model.tags)?,
            task: detect_task(model.pipeline_tag.as_deref()),
            languages: model
                .tags
                .iter()
                .filter(|tag| self.languages.contains(tag))
                .cloned()
                .collect(),
            revision: key.revision.clone(),
        };

        self.cache.insert(key, model_config.clone());
        Ok(model_config)
    }

    /// @ai:intent Resolve several models, skipping unusable ones unless raise_errors is set
    /// @ai:post configuration errors always propagate
    /// @ai:effects network
    pub async fn resolve_all<S: AsRef<str>>(
        &self,
        model_ids: &[S],
        config: &BenchmarkConfig,
    ) -> Result<Vec<ModelConfig>> {
        let mut resolved = Vec::with_capacity(model_ids.len());

        for model_id in model_ids {
            match self.resolve(model_id.as_ref(), config).await {
                Ok(model_config) => resolved.push(model_config),
                Err(e) if !config.raise_errors && e.is_skippable() => {
                    tracing::warn!("Skipping model {}: {}", model_id.as_ref(), e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(resolved)
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DatasetTaskCatalog, LanguageCatalog};
    use crate::config::BenchmarkOptions;
    use crate::hub::client::MockModelRegistry;
    use crate::resolve::{BenchmarkConfigBuilder, FixedDeviceProbe};
    use pretty_assertions::assert_eq;

    fn benchmark_config(raise_errors: bool) -> BenchmarkConfig {
        let languages = LanguageCatalog::builtin();
        let tasks = DatasetTaskCatalog::builtin();
        BenchmarkConfigBuilder::new(&languages, &tasks, FixedDeviceProbe::default())
            .build(BenchmarkOptions {
                raise_errors,
                ..Default::default()
            })
            .unwrap()
    }

    fn by_name(author: Option<&str>, name: &str) -> ModelQuery {
        ModelQuery::ByName {
            author: author.map(str::to_string),
            name: name.to_string(),
        }
    }

    fn resolver(registry: MockModelRegistry) -> (Arc<MockModelRegistry>, ModelConfigResolver<MockModelRegistry>) {
        let registry = Arc::new(registry);
        let resolver =
            ModelConfigResolver::new(registry.clone(), Arc::new(LanguageCatalog::builtin()));
        (registry, resolver)
    }

    #[test]
    fn test_parse_model_key() {
        let key = ModelKey::parse("org/bert@v2").unwrap();
        assert_eq!(key.author.as_deref(), Some("org"));
        assert_eq!(key.name, "bert");
        assert_eq!(key.revision, "v2");
        assert_eq!(key.model_id(), "org/bert");

        let bare = ModelKey::parse("bert-base").unwrap();
        assert_eq!(bare.author, None);
        assert_eq!(bare.revision, "main");
    }

    #[test]
    fn test_malformed_model_ids() {
        for id in ["a/b/c", "/bert", "org/", "org/bert@", ""] {
            assert!(
                matches!(ModelKey::parse(id), Err(Error::Configuration(_))),
                "{} should be rejected",
                id
            );
        }
    }

    #[tokio::test]
    async fn test_random_model_never_queries() {
        let (registry, resolver) = resolver(MockModelRegistry::new());

        let model = resolver
            .resolve("random-xlmr-base-sequence-clf", &benchmark_config(true))
            .await
            .unwrap();

        assert_eq!(
            model,
            ModelConfig {
                model_id: "random-xlmr-base-sequence-clf".to_string(),
                framework: Framework::Pytorch,
                task: "fill-mask".to_string(),
                languages: BTreeSet::new(),
                revision: "main".to_string(),
            }
        );
        assert_eq!(registry.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_model_is_invalid_benchmark() {
        let (_, resolver) = resolver(MockModelRegistry::new());
        let result = resolver
            .resolve("nonexistent-org/nonexistent-model", &benchmark_config(true))
            .await;
        assert!(matches!(result, Err(Error::InvalidBenchmark(_))));
    }

    #[tokio::test]
    async fn test_tensorflow_only_model_is_rejected() {
        let registry = MockModelRegistry::new().with_response(
            by_name(Some("org"), "model-with-tf-tag"),
            vec![ModelInfo::new("org/model-with-tf-tag", &["tf", "da"], Some("fill-mask"))],
        );
        let (_, resolver) = resolver(registry);

        let result = resolver
            .resolve("org/model-with-tf-tag", &benchmark_config(true))
            .await;
        assert!(matches!(result, Err(Error::InvalidBenchmark(ref msg)) if msg.contains("TensorFlow")));
    }

    #[tokio::test]
    async fn test_registry_metadata_is_normalised() {
        let registry = MockModelRegistry::new().with_response(
            by_name(Some("org"), "bert"),
            vec![
                ModelInfo::new("org/bert-large", &["pytorch", "sv"], Some("fill-mask")),
                ModelInfo::new(
                    "org/bert",
                    &["jax", "tf", "da", "nb", "transformers", "xx"],
                    Some("feature-extraction"),
                ),
            ],
        );
        let (_, resolver) = resolver(registry);

        let model = resolver
            .resolve("org/bert@refs-pr-1", &benchmark_config(true))
            .await
            .unwrap();

        assert_eq!(model.model_id, "org/bert");
        assert_eq!(model.revision, "refs-pr-1");
        assert_eq!(model.framework, Framework::Jax);
        assert_eq!(model.task, "fill-mask");
        let languages: Vec<&str> = model.languages.iter().map(String::as_str).collect();
        assert_eq!(languages, vec!["da", "nb"]);
    }

    #[tokio::test]
    async fn test_pipeline_task_is_kept_and_missing_framework_defaults_to_pytorch() {
        let registry = MockModelRegistry::new().with_response(
            by_name(None, "electra"),
            vec![ModelInfo::new("org/electra", &["da"], Some("token-classification"))],
        );
        let (_, resolver) = resolver(registry);

        let model = resolver.resolve("electra", &benchmark_config(true)).await.unwrap();
        assert_eq!(model.framework, Framework::Pytorch);
        assert_eq!(model.task, "token-classification");
        assert_eq!(model.model_id, "electra");
    }

    async fn resolve_tagged(tags: &[&str], pipeline_tag: Option<&str>) -> Result<ModelConfig> {
        let registry = MockModelRegistry::new().with_response(
            by_name(Some("org"), "model"),
            vec![ModelInfo::new("org/model", tags, pipeline_tag)],
        );
        let (_, resolver) = resolver(registry);
        resolver.resolve("org/model", &benchmark_config(true)).await
    }

    #[tokio::test]
    async fn test_spacy_tag_selects_spacy() {
        let model = resolve_tagged(&["spacy", "da"], Some("token-classification"))
            .await
            .unwrap();
        assert_eq!(model.framework, Framework::Spacy);
    }

    #[tokio::test]
    async fn test_pytorch_tag_wins_over_tensorflow_tag() {
        let model = resolve_tagged(&["pytorch", "tf"], None).await.unwrap();
        assert_eq!(model.framework, Framework::Pytorch);

        let jax = resolve_tagged(&["keras", "jax"], None).await.unwrap();
        assert_eq!(jax.framework, Framework::Jax);
    }

    #[tokio::test]
    async fn test_encoder_pipeline_tags_default_to_fill_mask() {
        for tag in ["sentence-similarity", "feature-extraction"] {
            let model = resolve_tagged(&["pytorch"], Some(tag)).await.unwrap();
            assert_eq!(model.task, "fill-mask", "{}", tag);
        }

        let model = resolve_tagged(&["pytorch"], Some("text-classification"))
            .await
            .unwrap();
        assert_eq!(model.task, "text-classification");
    }

    #[tokio::test]
    async fn test_transport_failure_is_connection_error() {
        let (_, resolver) = resolver(MockModelRegistry::unreachable());
        let err = resolver
            .resolve("org/bert", &benchmark_config(true))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Connection(ref msg) if msg.contains("huggingface.co")));
    }

    #[tokio::test]
    async fn test_second_resolution_is_served_from_cache() {
        let registry = MockModelRegistry::new().with_response(
            by_name(Some("org"), "bert"),
            vec![ModelInfo::new("org/bert", &["pytorch"], None)],
        );
        let (registry, resolver) = resolver(registry);
        let config = benchmark_config(true);

        let first = resolver.resolve("org/bert", &config).await.unwrap();
        let second = resolver.resolve("org/bert", &config).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(registry.call_count(), 1);

        resolver.resolve("org/bert@v2", &config).await.unwrap();
        assert_eq!(registry.call_count(), 2);
        assert_eq!(resolver.cached_len(), 2);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let (registry, resolver) = resolver(MockModelRegistry::new());
        let config = benchmark_config(true);

        assert!(resolver.resolve("org/missing", &config).await.is_err());
        assert!(resolver.resolve("org/missing", &config).await.is_err());
        assert_eq!(registry.call_count(), 2);
        assert_eq!(resolver.cached_len(), 0);
    }

    #[tokio::test]
    async fn test_resolve_all_skips_unusable_models_when_not_raising() {
        let registry = MockModelRegistry::new().with_response(
            by_name(Some("org"), "bert"),
            vec![ModelInfo::new("org/bert", &["pytorch"], None)],
        );
        let (_, resolver) = resolver(registry);
        let ids = ["org/bert", "org/missing", "random-electra-small-token-clf"];

        let models = resolver.resolve_all(&ids, &benchmark_config(false)).await.unwrap();
        let resolved: Vec<&str> = models.iter().map(|m| m.model_id.as_str()).collect();
        assert_eq!(resolved, vec!["org/bert", "random-electra-small-token-clf"]);

        let strict = resolver.resolve_all(&ids, &benchmark_config(true)).await;
        assert!(matches!(strict, Err(Error::InvalidBenchmark(_))));
    }

    #[tokio::test]
    async fn test_resolve_all_always_propagates_configuration_errors() {
        let (_, resolver) = resolver(MockModelRegistry::new());
        let result = resolver
            .resolve_all(&["org/a/b"], &benchmark_config(false))
            .await;
        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}
