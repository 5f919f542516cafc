//! @ai:module:intent Lookup of dataset configurations by name
//! @ai:module:layer domain
//! @ai:module:public_api DatasetRegistry, DatasetCatalog
//! @ai:module:stateless true

use crate::catalog::dataset_task::{QUESTION_ANSWERING, TEXT_CLASSIFICATION, TOKEN_CLASSIFICATION};
use crate::config::BenchmarkConfig;
use crate::dataset::config::DatasetConfig;
use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// @ai:intent Trait for looking up a dataset by name
pub trait DatasetRegistry: Send + Sync {
    /// @ai:intent Configuration of a named dataset
    /// @ai:post unknown names yield Error::DatasetNotFound
    fn get_dataset_config(&self, name: &str) -> Result<DatasetConfig>;
}

/// @ai:intent Immutable table of known datasets
#[derive(Debug, Clone, Default)]
pub struct DatasetCatalog {
    datasets: BTreeMap<String, DatasetConfig>,
}

/// (name, pretty name, task, supertask, languages)
type BuiltinDataset = (&'static str, &'static str, &'static str, &'static str, &'static [&'static str]);

const BUILTIN_DATASETS: &[BuiltinDataset] = &[
    ("angry-tweets", "the truncated version of AngryTweets", "sentiment-classification", TEXT_CLASSIFICATION, &["da"]),
    ("swerec", "the truncated version of SweReC", "sentiment-classification", TEXT_CLASSIFICATION, &["sv"]),
    ("norec", "the truncated version of NoReC", "sentiment-classification", TEXT_CLASSIFICATION, &["nb", "nn", "no"]),
    ("scala-da", "the Danish part of ScaLA", "la", TEXT_CLASSIFICATION, &["da"]),
    ("scala-sv", "the Swedish part of ScaLA", "la", TEXT_CLASSIFICATION, &["sv"]),
    ("scala-nb", "the Bokmål part of ScaLA", "la", TEXT_CLASSIFICATION, &["nb", "no"]),
    ("scala-nn", "the Nynorsk part of ScaLA", "la", TEXT_CLASSIFICATION, &["nn"]),
    ("scala-is", "the Icelandic part of ScaLA", "la", TEXT_CLASSIFICATION, &["is"]),
    ("scala-fo", "the Faroese part of ScaLA", "la", TEXT_CLASSIFICATION, &["fo"]),
    ("scala-de", "the German part of ScaLA", "la", TEXT_CLASSIFICATION, &["de"]),
    ("dane", "the truncated version of DaNE", "ner", TOKEN_CLASSIFICATION, &["da"]),
    ("suc3", "the truncated version of SUC 3.0", "ner", TOKEN_CLASSIFICATION, &["sv"]),
    ("norne-nb", "the truncated version of the Bokmål part of NorNE", "ner", TOKEN_CLASSIFICATION, &["nb", "no"]),
    ("norne-nn", "the truncated version of the Nynorsk part of NorNE", "ner", TOKEN_CLASSIFICATION, &["nn"]),
    ("mim-gold-ner", "the truncated version of MIM-GOLD-NER", "ner", TOKEN_CLASSIFICATION, &["is"]),
    ("fone", "the truncated version of FoNE", "ner", TOKEN_CLASSIFICATION, &["fo"]),
    ("germeval", "the truncated version of GermEval", "ner", TOKEN_CLASSIFICATION, &["de"]),
    ("scandiqa-da", "the Danish part of the truncated version of ScandiQA", "qa", QUESTION_ANSWERING, &["da"]),
    ("scandiqa-sv", "the Swedish part of the truncated version of ScandiQA", "qa", QUESTION_ANSWERING, &["sv"]),
    ("scandiqa-no", "the Norwegian part of the truncated version of ScandiQA", "qa", QUESTION_ANSWERING, &["nb", "nn", "no"]),
    ("nqii", "the truncated version of Natural Questions in Icelandic", "qa", QUESTION_ANSWERING, &["is"]),
    ("germanquad", "the truncated version of GermanQuAD", "qa", QUESTION_ANSWERING, &["de"]),
];

impl DatasetCatalog {
    /// @ai:intent Datasets shipped with this release
    /// @ai:effects pure
    pub fn builtin() -> Self {
        Self::from_configs(BUILTIN_DATASETS.iter().map(
            |(name, pretty_name, task, supertask, languages)| DatasetConfig {
                name: name.to_string(),
                pretty_name: pretty_name.to_string(),
                huggingface_id: format!("ScandEval/{}-mini", name),
                task: task.to_string(),
                supertask: supertask.to_string(),
                languages: languages.iter().map(|l| l.to_string()).collect(),
            },
        ))
    }

    pub fn from_configs<I>(configs: I) -> Self
    where
        I: IntoIterator<Item = DatasetConfig>,
    {
        Self {
            datasets: configs
                .into_iter()
                .map(|config| (config.name.clone(), config))
                .collect(),
        }
    }

    /// @ai:intent Add datasets, replacing built-in ones with the same name
    /// @ai:effects pure
    pub fn with_configs<I>(mut self, configs: I) -> Self
    where
        I: IntoIterator<Item = DatasetConfig>,
    {
        for config in configs {
            self.datasets.insert(config.name.clone(), config);
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &DatasetConfig> {
        self.datasets.values()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// @ai:intent Datasets in one of the run's tasks sharing a language with the run
    /// @ai:effects pure
    pub fn select(&self, config: &BenchmarkConfig) -> Vec<&DatasetConfig> {
        let languages = config.dataset_language_codes();

        self.iter()
            .filter(|dataset| config.includes_task(&dataset.task))
            .filter(|dataset| {
                dataset
                    .languages
                    .iter()
                    .any(|code| languages.contains(code.as_str()))
            })
            .collect()
    }
}

impl DatasetRegistry for DatasetCatalog {
    fn get_dataset_config(&self, name: &str) -> Result<DatasetConfig> {
        self.datasets
            .get(name)
            .cloned()
            .ok_or_else(|| Error::DatasetNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DatasetTaskCatalog, LanguageCatalog};
    use crate::config::BenchmarkOptions;
    use crate::resolve::{BenchmarkConfigBuilder, FixedDeviceProbe};
    use crate::selector::Selector;

    fn config(options: BenchmarkOptions) -> BenchmarkConfig {
        let languages = LanguageCatalog::builtin();
        let tasks = DatasetTaskCatalog::builtin();
        BenchmarkConfigBuilder::new(&languages, &tasks, FixedDeviceProbe::default())
            .build(options)
            .unwrap()
    }

    #[test]
    fn test_builtin_tasks_are_in_task_catalog() {
        let tasks = DatasetTaskCatalog::builtin();
        for dataset in DatasetCatalog::builtin().iter() {
            let task = tasks.get(&dataset.task).unwrap();
            assert_eq!(task.supertask, dataset.supertask, "{}", dataset.name);
        }
    }

    #[test]
    fn test_lookup_by_name() {
        let catalog = DatasetCatalog::builtin();
        assert_eq!(
            catalog.get_dataset_config("dane").unwrap().huggingface_id,
            "ScandEval/dane-mini"
        );
        assert!(matches!(
            catalog.get_dataset_config("ddt-pos"),
            Err(Error::DatasetNotFound(_))
        ));
    }

    #[test]
    fn test_select_by_language_and_task() {
        let catalog = DatasetCatalog::builtin();
        let selected = catalog.select(&config(BenchmarkOptions {
            language: Selector::one("nn").unwrap(),
            dataset_task: Some(Selector::one("ner").unwrap()),
            ..Default::default()
        }));

        let names: Vec<&str> = selected.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["norne-nb", "norne-nn"]);
    }

    #[test]
    fn test_user_dataset_overrides_builtin() {
        let mut dane = DatasetCatalog::builtin().get_dataset_config("dane").unwrap();
        dane.huggingface_id = "org/dane-full".to_string();

        let catalog = DatasetCatalog::builtin().with_configs([dane]);
        assert_eq!(
            catalog.get_dataset_config("dane").unwrap().huggingface_id,
            "org/dane-full"
        );
        assert_eq!(catalog.len(), DatasetCatalog::builtin().len());
    }
}
