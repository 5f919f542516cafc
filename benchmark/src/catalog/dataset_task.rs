//! @ai:module:intent Dataset task metadata and the fixed task catalog
//! @ai:module:layer domain
//! @ai:module:public_api DatasetTask, DatasetTaskCatalog
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const TEXT_CLASSIFICATION: &str = "text-classification";
pub const TOKEN_CLASSIFICATION: &str = "token-classification";
pub const QUESTION_ANSWERING: &str = "question-answering";

/// @ai:intent A benchmark task and the supertask it belongs to
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DatasetTask {
    /// Identifier used in selectors and dataset configs, e.g. "ner"
    pub name: String,
    pub pretty_name: String,
    pub supertask: String,
}

impl DatasetTask {
    pub fn new(name: &str, pretty_name: &str, supertask: &str) -> Self {
        Self {
            name: name.to_string(),
            pretty_name: pretty_name.to_string(),
            supertask: supertask.to_string(),
        }
    }
}

impl std::fmt::Display for DatasetTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// @ai:intent Immutable mapping from task identifier to task metadata
#[derive(Debug, Clone, Default)]
pub struct DatasetTaskCatalog {
    tasks: BTreeMap<String, DatasetTask>,
}

impl DatasetTaskCatalog {
    /// @ai:intent Tasks covered by the built-in datasets
    /// @ai:effects pure
    pub fn builtin() -> Self {
        Self::from_tasks([
            DatasetTask::new("la", "linguistic acceptability", TEXT_CLASSIFICATION),
            DatasetTask::new(
                "sentiment-classification",
                "sentiment classification",
                TEXT_CLASSIFICATION,
            ),
            DatasetTask::new("ner", "named entity recognition", TOKEN_CLASSIFICATION),
            DatasetTask::new("qa", "question answering", QUESTION_ANSWERING),
        ])
    }

    pub fn from_tasks<I>(tasks: I) -> Self
    where
        I: IntoIterator<Item = DatasetTask>,
    {
        Self {
            tasks: tasks
                .into_iter()
                .map(|task| (task.name.clone(), task))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&DatasetTask> {
        self.tasks.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tasks.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DatasetTask> {
        self.tasks.values()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
