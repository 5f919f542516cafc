//! @ai:module:intent Resolve loose user intent into a concrete benchmark configuration
//! @ai:module:layer application
//! @ai:module:public_api LanguageResolver, DatasetTaskResolver, BenchmarkConfigBuilder, DeviceProbe

pub mod builder;
pub mod dataset_task;
pub mod device;
pub mod language;

pub use builder::BenchmarkConfigBuilder;
pub use dataset_task::DatasetTaskResolver;
pub use device::{resolve_device, DeviceProbe, FixedDeviceProbe, SystemDeviceProbe};
pub use language::LanguageResolver;
