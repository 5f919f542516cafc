//! @ai:module:intent Configuration structs: user options, resolved benchmark config, hub settings
//! @ai:module:layer infrastructure
//! @ai:module:public_api Settings, BenchmarkOptions, BenchmarkConfig, HubConfig, Device, Framework, AuthToken
//! @ai:module:stateless true

use crate::catalog::{CuratedModels, DatasetTask, Language};
use crate::error::{Error, Result};
use crate::selector::Selector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// @ai:intent Hardware the models run on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Cpu,
    Cuda,
    Mps,
}

impl Device {
    pub fn as_str(&self) -> &'static str {
        match self {
            Device::Cpu => "cpu",
            Device::Cuda => "cuda",
            Device::Mps => "mps",
        }
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Model framework supported by the benchmark executors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Pytorch,
    Jax,
    Spacy,
}

impl Framework {
    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::Pytorch => "pytorch",
            Framework::Jax => "jax",
            Framework::Spacy => "spacy",
        }
    }
}

impl std::fmt::Display for Framework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Registry authentication: a flag (use the stored login) or an explicit token
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthToken {
    Flag(bool),
    Token(String),
}

impl Default for AuthToken {
    fn default() -> Self {
        AuthToken::Flag(false)
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthToken::Flag(flag) => write!(f, "AuthToken::Flag({})", flag),
            AuthToken::Token(_) => write!(f, "AuthToken::Token(<redacted>)"),
        }
    }
}

impl AuthToken {
    /// @ai:intent Resolve the bearer token to send, if any
    /// @ai:post Flag(true) reads HF_TOKEN, HUGGING_FACE_HUB_TOKEN, then the CLI login file
    /// @ai:post blank tokens resolve to None
    /// @ai:effects env, fs:read
    pub fn resolve(&self) -> Option<String> {
        self.resolve_with(|var| std::env::var(var).ok())
    }

    /// @ai:intent Resolve the token, reading environment variables through `env`
    /// @ai:effects fs:read
    fn resolve_with<E>(&self, env: E) -> Option<String>
    where
        E: Fn(&str) -> Option<String>,
    {
        let token = match self {
            AuthToken::Flag(false) => None,
            AuthToken::Token(token) => Some(token.clone()),
            AuthToken::Flag(true) => ["HF_TOKEN", "HUGGING_FACE_HUB_TOKEN"]
                .iter()
                .find_map(|&var| env(var))
                .or_else(|| {
                    stored_token_path(&env).and_then(|path| std::fs::read_to_string(path).ok())
                }),
        };

        token
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    }
}

fn stored_token_path<E>(env: &E) -> Option<PathBuf>
where
    E: Fn(&str) -> Option<String>,
{
    if let Some(hf_home) = env("HF_HOME") {
        return Some(PathBuf::from(hf_home).join("token"));
    }
    env("HOME").map(|home| PathBuf::from(home).join(".cache").join("huggingface").join("token"))
}

/// @ai:intent Loosely specified user intent, as read from the settings file or CLI
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BenchmarkOptions {
    /// Languages for both models and datasets; "no" means both "nb" and "nn"
    #[serde(default = "default_language")]
    pub language: Selector,
    /// Replaces `language` for models when set
    #[serde(default)]
    pub model_language: Option<Selector>,
    /// Replaces `language` for datasets when set
    #[serde(default)]
    pub dataset_language: Option<Selector>,
    /// No filtering on task when unset
    #[serde(default)]
    pub dataset_task: Option<Selector>,
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,
    #[serde(default)]
    pub raise_errors: bool,
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
    #[serde(default)]
    pub evaluate_train: bool,
    #[serde(default)]
    pub auth_token: AuthToken,
    #[serde(default = "default_true")]
    pub progress_bar: bool,
    #[serde(default = "default_true")]
    pub save_results: bool,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub framework: Option<Framework>,
    #[serde(default = "default_true")]
    pub few_shot: bool,
    #[serde(default)]
    pub device: Option<Device>,
    #[serde(default)]
    pub trust_remote_code: bool,
    #[serde(default)]
    pub testing: bool,
}

impl Default for BenchmarkOptions {
    fn default() -> Self {
        Self {
            language: default_language(),
            model_language: None,
            dataset_language: None,
            dataset_task: None,
            batch_size: default_batch_size(),
            raise_errors: false,
            cache_dir: default_cache_dir(),
            evaluate_train: false,
            auth_token: AuthToken::default(),
            progress_bar: true,
            save_results: true,
            verbose: false,
            framework: None,
            few_shot: true,
            device: None,
            trust_remote_code: false,
            testing: false,
        }
    }
}

/// @ai:intent Fully resolved, immutable configuration for one benchmarking run
/// @ai:effects pure
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkConfig {
    pub model_languages: BTreeSet<Language>,
    pub dataset_languages: BTreeSet<Language>,
    pub dataset_tasks: BTreeSet<DatasetTask>,
    pub batch_size: u32,
    pub raise_errors: bool,
    pub cache_dir: PathBuf,
    pub evaluate_train: bool,
    #[serde(skip_serializing)]
    pub auth_token: AuthToken,
    pub progress_bar: bool,
    pub save_results: bool,
    pub verbose: bool,
    pub framework: Option<Framework>,
    pub few_shot: bool,
    pub device: Device,
    pub trust_remote_code: bool,
    pub testing: bool,
}

impl BenchmarkConfig {
    /// @ai:intent Codes of the dataset languages
    /// @ai:effects pure
    pub fn dataset_language_codes(&self) -> BTreeSet<&str> {
        self.dataset_languages.iter().map(|l| l.code.as_str()).collect()
    }

    /// @ai:intent Whether a dataset task identifier is part of this run
    /// @ai:effects pure
    pub fn includes_task(&self, task: &str) -> bool {
        self.dataset_tasks.iter().any(|t| t.name == task)
    }
}

/// @ai:intent Connection settings for the remote model registry
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Retries after the first attempt for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Backoff grows linearly with the attempt number
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    #[serde(default = "default_max_concurrent_queries")]
    pub max_concurrent_queries: usize,
    /// 0 disables throttling
    #[serde(default = "default_requests_per_minute")]
    pub requests_per_minute: u32,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
            max_concurrent_queries: default_max_concurrent_queries(),
            requests_per_minute: default_requests_per_minute(),
        }
    }
}

/// @ai:intent Contents of the settings file
/// @ai:effects pure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub benchmark: BenchmarkOptions,
    #[serde(default)]
    pub hub: HubConfig,
    #[serde(default)]
    pub curated: CuratedModels,
}

fn default_language() -> Selector {
    Selector::All
}

fn default_batch_size() -> u32 {
    32
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".scandeval_cache")
}

fn default_true() -> bool {
    true
}

fn default_endpoint() -> String {
    "https://huggingface.co".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    500
}

fn default_max_concurrent_queries() -> usize {
    4
}

fn default_requests_per_minute() -> u32 {
    120
}

impl Settings {
    /// @ai:intent Load settings from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| Error::TomlParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// @ai:intent Save settings to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| Error::FileWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}
