//! @ai:module:intent ScandEval configuration resolution and dispatch library
//! @ai:module:layer application
//! @ai:module:public_api catalog, config, dataset, error, hub, resolve, selector

pub mod catalog;
pub mod config;
pub mod dataset;
pub mod error;
pub mod hub;
pub mod resolve;
pub mod selector;

pub use catalog::{Catalogs, CuratedModels, DatasetTask, DatasetTaskCatalog, Language, LanguageCatalog};
pub use config::{AuthToken, BenchmarkConfig, BenchmarkOptions, Device, Framework, HubConfig, Settings};
pub use dataset::{BenchmarkDataset, BenchmarkKind, DatasetCatalog, DatasetConfig, DatasetFactory, DatasetLoader, DatasetRegistry};
pub use error::{Error, Result};
pub use hub::{HfHubClient, ModelConfig, ModelConfigResolver, ModelListResolver, ModelLists, ModelRegistry};
pub use resolve::{BenchmarkConfigBuilder, DeviceProbe, SystemDeviceProbe};
pub use selector::Selector;
