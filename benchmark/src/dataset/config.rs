//! @ai:module:intent Dataset configuration records and their on-disk format
//! @ai:module:layer domain
//! @ai:module:public_api DatasetConfig, DatasetFile
//! @ai:module:stateless true

use crate::catalog::DatasetTaskCatalog;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// @ai:intent A benchmark dataset and the task it evaluates
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Identifier used on the command line, e.g. "angry-tweets"
    pub name: String,
    pub pretty_name: String,
    pub huggingface_id: String,
    pub task: String,
    pub supertask: String,
    pub languages: Vec<String>,
}

/// @ai:intent Raw dataset structure from a TOML file
#[derive(Debug, Deserialize)]
pub struct DatasetFile {
    pub dataset: DatasetEntry,
}

/// @ai:intent Dataset metadata from a TOML file; the supertask comes from the task catalog
#[derive(Debug, Deserialize)]
pub struct DatasetEntry {
    pub name: String,
    pub pretty_name: String,
    pub huggingface_id: String,
    pub task: String,
    pub languages: Vec<String>,
}

impl DatasetEntry {
    /// @ai:intent Attach the supertask of the entry's task
    /// @ai:pre entry.task is in the task catalog
    /// @ai:effects pure
    pub fn into_config(self, tasks: &DatasetTaskCatalog) -> Result<DatasetConfig> {
        let supertask = tasks
            .get(&self.task)
            .map(|task| task.supertask.clone())
            .ok_or_else(|| {
                Error::Configuration(format!(
                    "dataset '{}' uses unknown task '{}'",
                    self.name, self.task
                ))
            })?;

        Ok(DatasetConfig {
            name: self.name,
            pretty_name: self.pretty_name,
            huggingface_id: self.huggingface_id,
            task: self.task,
            supertask,
            languages: self.languages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_takes_supertask_from_catalog() {
        let file: DatasetFile = toml::from_str(
            r#"
[dataset]
name = "twitter-sent"
pretty_name = "the Danish part of the TwitterSent dataset"
huggingface_id = "ScandEval/twitter-sent-mini"
task = "sentiment-classification"
languages = ["da"]
"#,
        )
        .unwrap();

        let config = file.dataset.into_config(&DatasetTaskCatalog::builtin()).unwrap();
        assert_eq!(config.supertask, "text-classification");
    }

    #[test]
    fn test_entry_with_unknown_task_is_rejected() {
        let entry = DatasetEntry {
            name: "ddt-pos".to_string(),
            pretty_name: "DDT POS".to_string(),
            huggingface_id: "ScandEval/ddt-pos".to_string(),
            task: "pos".to_string(),
            languages: vec!["da".to_string()],
        };
        assert!(matches!(
            entry.into_config(&DatasetTaskCatalog::builtin()),
            Err(Error::Configuration(_))
        ));
    }
}
