//! @ai:module:intent Load user-defined dataset configs from a directory of TOML files
//! @ai:module:layer infrastructure
//! @ai:module:public_api DatasetLoader
//! @ai:module:stateless true

use crate::catalog::DatasetTaskCatalog;
use crate::dataset::config::{DatasetConfig, DatasetFile};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// @ai:intent Loads dataset definitions from TOML files
pub struct DatasetLoader<'a> {
    tasks: &'a DatasetTaskCatalog,
}

impl<'a> DatasetLoader<'a> {
    pub fn new(tasks: &'a DatasetTaskCatalog) -> Self {
        Self { tasks }
    }

    /// @ai:intent Parse a single dataset file
    /// @ai:pre path points to a valid TOML file
    /// @ai:effects fs:read
    fn parse_dataset_file(&self, path: &Path) -> Result<DatasetConfig> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let file: DatasetFile = toml::from_str(&content).map_err(|source| Error::TomlParse {
            path: path.to_path_buf(),
            source,
        })?;

        file.dataset.into_config(self.tasks)
    }

    fn find_dataset_files(dir: &Path) -> Vec<PathBuf> {
        WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "toml"))
            .map(|e| e.path().to_path_buf())
            .collect()
    }

    /// @ai:intent Load every valid dataset file below a directory, sorted by name
    /// @ai:post invalid files are skipped with a warning
    /// @ai:effects fs:read
    pub fn load_all(&self, dir: &Path) -> Result<Vec<DatasetConfig>> {
        if !dir.is_dir() {
            return Err(Error::Configuration(format!(
                "dataset directory {} does not exist",
                dir.display()
            )));
        }

        let files = Self::find_dataset_files(dir);
        let mut datasets = Vec::with_capacity(files.len());

        for path in files {
            match self.parse_dataset_file(&path) {
                Ok(dataset) => datasets.push(dataset),
                Err(e) => {
                    tracing::warn!("Skipping invalid dataset file {}: {}", path.display(), e);
                }
            }
        }

        datasets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(datasets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_loads_nested_files_and_skips_invalid_ones() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "sv/swedish-ner.toml",
            r#"
[dataset]
name = "swedish-ner"
pretty_name = "a Swedish NER dataset"
huggingface_id = "org/swedish-ner"
task = "ner"
languages = ["sv"]
"#,
        );
        write(
            temp.path(),
            "broken.toml",
            r#"
[dataset]
name = "broken"
"#,
        );
        write(temp.path(), "README.md", "not a dataset");

        let tasks = DatasetTaskCatalog::builtin();
        let datasets = DatasetLoader::new(&tasks).load_all(temp.path()).unwrap();

        assert_eq!(datasets.len(), 1);
        assert_eq!(datasets[0].name, "swedish-ner");
        assert_eq!(datasets[0].supertask, "token-classification");
    }

    #[test]
    fn test_missing_directory_is_configuration_error() {
        let tasks = DatasetTaskCatalog::builtin();
        let result = DatasetLoader::new(&tasks).load_all(Path::new("/nonexistent/datasets"));
        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}
