//! @ai:module:intent Pick the benchmark executor for a dataset
//! @ai:module:layer application
//! @ai:module:public_api DatasetFactory, DatasetSource
//! @ai:module:stateless true

use crate::catalog::dataset_task::TEXT_CLASSIFICATION;
use crate::config::BenchmarkConfig;
use crate::dataset::config::DatasetConfig;
use crate::dataset::executor::{BenchmarkDataset, NerBenchmark, QaBenchmark, TextClassificationBenchmark};
use crate::dataset::registry::DatasetRegistry;
use crate::error::{Error, Result};
use std::sync::Arc;

/// @ai:intent A dataset given either by name or by full configuration
#[derive(Debug, Clone)]
pub enum DatasetSource {
    Name(String),
    Config(DatasetConfig),
}

impl From<&str> for DatasetSource {
    fn from(name: &str) -> Self {
        DatasetSource::Name(name.to_string())
    }
}

impl From<String> for DatasetSource {
    fn from(name: String) -> Self {
        DatasetSource::Name(name)
    }
}

impl From<DatasetConfig> for DatasetSource {
    fn from(config: DatasetConfig) -> Self {
        DatasetSource::Config(config)
    }
}

/// @ai:intent Builds executors that share one run configuration
pub struct DatasetFactory<R: DatasetRegistry> {
    benchmark_config: Arc<BenchmarkConfig>,
    registry: Arc<R>,
}

impl<R: DatasetRegistry> DatasetFactory<R> {
    pub fn new(benchmark_config: Arc<BenchmarkConfig>, registry: Arc<R>) -> Self {
        Self {
            benchmark_config,
            registry,
        }
    }

    /// @ai:intent Executor for a dataset, looked up in the registry when given by name
    /// @ai:pre the dataset's task is one this system can benchmark
    /// @ai:post supertask text-classification wins over the ner and qa task checks
    /// @ai:effects pure
    /// @ai:example build_dataset("dane") -> NerBenchmark
    pub fn build_dataset(&self, source: impl Into<DatasetSource>) -> Result<Box<dyn BenchmarkDataset>> {
        let config = match source.into() {
            DatasetSource::Name(name) => self.registry.get_dataset_config(&name)?,
            DatasetSource::Config(config) => config,
        };

        let benchmark_config = Arc::clone(&self.benchmark_config);

        if config.supertask == TEXT_CLASSIFICATION {
            Ok(Box::new(TextClassificationBenchmark::new(config, benchmark_config)))
        } else if config.task == "ner" {
            Ok(Box::new(NerBenchmark::new(config, benchmark_config)))
        } else if config.task == "qa" {
            Ok(Box::new(QaBenchmark::new(config, benchmark_config)))
        } else {
            Err(Error::Configuration(format!(
                "Unknown dataset task: {}",
                config.task
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DatasetTaskCatalog, LanguageCatalog};
    use crate::config::BenchmarkOptions;
    use crate::dataset::executor::BenchmarkKind;
    use crate::dataset::registry::DatasetCatalog;
    use crate::resolve::{BenchmarkConfigBuilder, FixedDeviceProbe};

    fn factory() -> DatasetFactory<DatasetCatalog> {
        let languages = LanguageCatalog::builtin();
        let tasks = DatasetTaskCatalog::builtin();
        let config = BenchmarkConfigBuilder::new(&languages, &tasks, FixedDeviceProbe::default())
            .build(BenchmarkOptions::default())
            .unwrap();
        DatasetFactory::new(Arc::new(config), Arc::new(DatasetCatalog::builtin()))
    }

    fn dataset(task: &str, supertask: &str) -> DatasetConfig {
        DatasetConfig {
            name: format!("test-{}", task),
            pretty_name: "a test dataset".to_string(),
            huggingface_id: format!("org/test-{}", task),
            task: task.to_string(),
            supertask: supertask.to_string(),
            languages: vec!["da".to_string()],
        }
    }

    #[test]
    fn test_text_classification_supertask_dispatch() {
        let benchmark = factory()
            .build_dataset(dataset("sentiment", "text-classification"))
            .unwrap();
        assert_eq!(benchmark.kind(), BenchmarkKind::TextClassification);
    }

    #[test]
    fn test_ner_and_qa_dispatch_on_task() {
        let factory = factory();
        assert_eq!(
            factory.build_dataset(dataset("ner", "token-classification")).unwrap().kind(),
            BenchmarkKind::Ner
        );
        assert_eq!(
            factory.build_dataset(dataset("qa", "question-answering")).unwrap().kind(),
            BenchmarkKind::Qa
        );
    }

    #[test]
    fn test_supertask_takes_precedence_over_task() {
        let benchmark = factory()
            .build_dataset(dataset("ner", "text-classification"))
            .unwrap();
        assert_eq!(benchmark.kind(), BenchmarkKind::TextClassification);
    }

    #[test]
    fn test_unknown_task_is_configuration_error() {
        let result = factory().build_dataset(dataset("unknown-task", "unknown"));
        match result {
            Err(Error::Configuration(message)) => assert!(message.contains("unknown-task")),
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_build_by_name_uses_registry() {
        let factory = factory();
        let benchmark = factory.build_dataset("scandiqa-sv").unwrap();
        assert_eq!(benchmark.kind(), BenchmarkKind::Qa);
        assert_eq!(benchmark.dataset_config().languages, vec!["sv".to_string()]);

        assert!(matches!(
            factory.build_dataset("no-such-dataset"),
            Err(Error::DatasetNotFound(_))
        ));
    }
}
