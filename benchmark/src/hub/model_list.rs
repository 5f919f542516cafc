//! @ai:module:intent Build bucketed lists of candidate models per language and task
//! @ai:module:layer application
//! @ai:module:public_api ModelLists, ModelListResolver
//! @ai:module:stateless false

use crate::catalog::{CuratedModels, Language, LanguageCatalog, NORWEGIAN_CODES};
use crate::config::AuthToken;
use crate::error::Result;
use crate::hub::cache::MemoCache;
use crate::hub::client::{ModelInfo, ModelQuery, ModelRegistry, TransportError};
use crate::hub::model_config::connection_error;
use futures_util::stream::{self, StreamExt, TryStreamExt};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

pub const ALL_BUCKET: &str = "all";
pub const MULTILINGUAL_BUCKET: &str = "multilingual";
const DANISH: &str = "da";
const NORWEGIAN: &str = "no";

/// @ai:intent Model identifiers grouped by language code, task, "all" and "multilingual"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModelLists {
    buckets: BTreeMap<String, BTreeSet<String>>,
    #[serde(skip)]
    curated_version: u32,
}

impl ModelLists {
    pub fn get(&self, bucket: &str) -> Option<&BTreeSet<String>> {
        self.buckets.get(bucket)
    }

    pub fn all(&self) -> Option<&BTreeSet<String>> {
        self.get(ALL_BUCKET)
    }

    pub fn bucket_names(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// Version of the curated lists merged into these buckets
    pub fn curated_version(&self) -> u32 {
        self.curated_version
    }

    pub fn into_map(self) -> BTreeMap<String, BTreeSet<String>> {
        self.buckets
    }

    fn bucket_mut(&mut self, bucket: &str) -> &mut BTreeSet<String> {
        self.buckets.entry(bucket.to_string()).or_default()
    }

    fn extend<'i, I>(&mut self, bucket: &str, ids: I)
    where
        I: IntoIterator<Item = &'i String>,
    {
        self.bucket_mut(bucket).extend(ids.into_iter().cloned());
    }
}

/// Sorted language codes and sorted tasks.
type ListKey = (Vec<String>, Option<Vec<String>>);

/// @ai:intent Queries the registry per (language, task) and merges in curated lists
pub struct ModelListResolver<R: ModelRegistry> {
    registry: Arc<R>,
    languages: Arc<LanguageCatalog>,
    curated: CuratedModels,
    max_concurrent_queries: usize,
    cache: MemoCache<ListKey, ModelLists>,
}

impl<R: ModelRegistry> ModelListResolver<R> {
    /// @ai:intent Create a resolver over a registry and curated data
    /// @ai:pre max_concurrent_queries > 0 (0 is treated as 1)
    /// @ai:effects pure
    pub fn new(
        registry: Arc<R>,
        languages: Arc<LanguageCatalog>,
        curated: CuratedModels,
        max_concurrent_queries: usize,
    ) -> Self {
        Self {
            registry,
            languages,
            curated,
            max_concurrent_queries: max_concurrent_queries.max(1),
            cache: MemoCache::new(),
        }
    }

    /// @ai:intent Fetch model lists for the given languages and model tasks
    /// @ai:pre an empty language set means no language filtering
    /// @ai:post every bucket is free of duplicates
    /// @ai:effects network
    pub async fn resolve(
        &self,
        languages: &BTreeSet<Language>,
        tasks: Option<&BTreeSet<String>>,
        auth_token: &AuthToken,
    ) -> Result<ModelLists> {
        let key: ListKey = (
            languages.iter().map(|l| l.code.clone()).collect(),
            tasks.map(|tasks| tasks.iter().cloned().collect()),
        );
        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!("Model list cache hit");
            return Ok(cached);
        }

        tracing::info!(
            "Fetching list of models for {} and {} from the Hugging Face Hub.",
            describe_languages(languages, &self.languages),
            describe_tasks(tasks)
        );

        let language_filters: Vec<Option<String>> = if languages.is_empty() {
            vec![None]
        } else {
            languages.iter().map(|l| Some(l.code.clone())).collect()
        };
        let task_filters: Vec<Option<String>> = match tasks {
            Some(tasks) if !tasks.is_empty() => tasks.iter().cloned().map(Some).collect(),
            _ => vec![None],
        };

        let queries: Vec<ModelQuery> = language_filters
            .iter()
            .flat_map(|language| {
                task_filters.iter().map(move |task| ModelQuery::ByFilter {
                    language: language.clone(),
                    task: task.clone(),
                })
            })
            .collect();

        let token = auth_token.resolve();
        let token = token.as_deref();
        let results: Vec<(ModelQuery, Vec<ModelInfo>)> = stream::iter(queries)
            .map(|query| async move {
                let models = self.registry.query(&query, token).await?;
                tracing::debug!("{:?} returned {} models", query, models.len());
                Ok::<_, TransportError>((query, models))
            })
            .buffer_unordered(self.max_concurrent_queries)
            .try_collect()
            .await
            .map_err(connection_error)?;

        let lists = self.merge(results, languages);
        self.cache.insert(key, lists.clone());
        Ok(lists)
    }

    /// @ai:intent Bucket query results and inject the curated lists
    /// @ai:effects pure
    fn merge(
        &self,
        results: Vec<(ModelQuery, Vec<ModelInfo>)>,
        languages: &BTreeSet<Language>,
    ) -> ModelLists {
        let mut lists = ModelLists::default();
        lists.bucket_mut(ALL_BUCKET);

        for (query, models) in results {
            let ModelQuery::ByFilter { language, task } = query else {
                continue;
            };
            let ids: Vec<String> = models.into_iter().map(|m| m.id).collect();

            lists.extend(ALL_BUCKET, &ids);
            if let Some(language) = language {
                lists.extend(&language, &ids);
            }
            if let Some(task) = task {
                lists.extend(&task, &ids);
            }
        }

        tracing::debug!("Injecting curated model lists, version {}", self.curated.version);
        lists.curated_version = self.curated.version;
        lists.extend(MULTILINGUAL_BUCKET, &self.curated.multilingual);
        lists.extend(ALL_BUCKET, &self.curated.multilingual);
        lists.extend(ALL_BUCKET, &self.curated.random);

        let has = |code: &str| languages.iter().any(|l| l.code == code);

        if has(DANISH) {
            lists.extend(DANISH, &self.curated.danish_multilingual);
            lists.extend(ALL_BUCKET, &self.curated.danish_multilingual);
        }

        if NORWEGIAN_CODES.iter().any(|code| has(*code)) {
            lists.extend(NORWEGIAN, &self.curated.norwegian_multilingual);
            lists.extend(ALL_BUCKET, &self.curated.norwegian_multilingual);
        }

        lists
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

/// @ai:intent Human description of the language filter
/// @ai:example ({Danish}) -> "the language Danish"
/// @ai:example ({Swedish, Danish}) -> "the languages Danish and Swedish"
/// @ai:effects pure
fn describe_languages(languages: &BTreeSet<Language>, catalog: &LanguageCatalog) -> String {
    let mut names: Vec<&str> = languages.iter().map(|l| l.name.as_str()).collect();
    names.sort_unstable();

    match names.as_slice() {
        [] => "all languages".to_string(),
        [single] => format!("the language {}", single),
        _ if languages.len() == catalog.len()
            && languages.iter().all(|l| catalog.contains(&l.code)) =>
        {
            "all languages".to_string()
        }
        [init @ .., last] => format!("the languages {} and {}", init.join(", "), last),
    }
}

/// @ai:intent Human description of the task filter
/// @ai:effects pure
fn describe_tasks(tasks: Option<&BTreeSet<String>>) -> String {
    let tasks: Vec<&str> = tasks
        .map(|tasks| tasks.iter().map(String::as_str).collect())
        .unwrap_or_default();

    match tasks.as_slice() {
        [] => "all model tasks".to_string(),
        [single] => format!("the model task {}", single),
        [init @ .., last] => format!("the model tasks {} and {}", init.join(", "), last),
    }
}
