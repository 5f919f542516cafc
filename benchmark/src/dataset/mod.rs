//! @ai:module:intent Dataset configurations, their registry, and executor dispatch
//! @ai:module:layer application
//! @ai:module:public_api DatasetConfig, DatasetCatalog, DatasetRegistry, DatasetLoader, DatasetFactory, BenchmarkDataset

pub mod config;
pub mod executor;
pub mod factory;
pub mod loader;
pub mod registry;

pub use config::{DatasetConfig, DatasetEntry, DatasetFile};
pub use executor::{BenchmarkDataset, BenchmarkKind, NerBenchmark, QaBenchmark, TextClassificationBenchmark};
pub use factory::{DatasetFactory, DatasetSource};
pub use loader::DatasetLoader;
pub use registry::{DatasetCatalog, DatasetRegistry};
