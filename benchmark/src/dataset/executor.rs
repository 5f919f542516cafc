//! @ai:module:intent Benchmark executors bound to one dataset and one run configuration
//! @ai:module:layer application
//! @ai:module:public_api BenchmarkKind, BenchmarkDataset, TextClassificationBenchmark, NerBenchmark, QaBenchmark
//! @ai:module:stateless true

use crate::config::BenchmarkConfig;
use crate::dataset::config::DatasetConfig;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// @ai:intent Family of evaluation loop a dataset runs under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BenchmarkKind {
    TextClassification,
    Ner,
    Qa,
}

impl BenchmarkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BenchmarkKind::TextClassification => "text-classification",
            BenchmarkKind::Ner => "ner",
            BenchmarkKind::Qa => "qa",
        }
    }
}

impl fmt::Display for BenchmarkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// @ai:intent Executor for a single dataset
/// @ai:effects pure
pub trait BenchmarkDataset: Send + Sync + fmt::Debug {
    fn kind(&self) -> BenchmarkKind;

    fn dataset_config(&self) -> &DatasetConfig;

    fn benchmark_config(&self) -> &BenchmarkConfig;

    /// @ai:intent One-line summary shown before the dataset is benchmarked
    /// @ai:effects pure
    fn describe(&self) -> String {
        let dataset = self.dataset_config();
        format!(
            "{} benchmark on {} ({})",
            self.kind(),
            dataset.pretty_name,
            dataset.huggingface_id
        )
    }
}

macro_rules! benchmark_dataset {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            dataset_config: DatasetConfig,
            benchmark_config: Arc<BenchmarkConfig>,
        }

        impl $name {
            pub fn new(dataset_config: DatasetConfig, benchmark_config: Arc<BenchmarkConfig>) -> Self {
                Self {
                    dataset_config,
                    benchmark_config,
                }
            }
        }

        impl BenchmarkDataset for $name {
            fn kind(&self) -> BenchmarkKind {
                $kind
            }

            fn dataset_config(&self) -> &DatasetConfig {
                &self.dataset_config
            }

            fn benchmark_config(&self) -> &BenchmarkConfig {
                &self.benchmark_config
            }
        }
    };
}

benchmark_dataset!(
    /// @ai:intent Sequence classification datasets such as sentiment and linguistic acceptability
    TextClassificationBenchmark,
    BenchmarkKind::TextClassification
);

benchmark_dataset!(
    /// @ai:intent Named entity recognition datasets
    NerBenchmark,
    BenchmarkKind::Ner
);

benchmark_dataset!(
    /// @ai:intent Extractive question answering datasets
    QaBenchmark,
    BenchmarkKind::Qa
);
