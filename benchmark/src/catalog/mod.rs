//! @ai:module:intent Immutable lookup tables shared by every resolver
//! @ai:module:layer domain
//! @ai:module:public_api Catalogs, LanguageCatalog, Language, DatasetTaskCatalog, DatasetTask, CuratedModels

pub mod curated;
pub mod dataset_task;
pub mod language;

pub use curated::CuratedModels;
pub use dataset_task::{DatasetTask, DatasetTaskCatalog};
pub use language::{Language, LanguageCatalog, NORWEGIAN_CODES};

use std::sync::Arc;

/// @ai:intent Bundle of catalogs built once at process start
/// @ai:effects pure
#[derive(Debug, Clone)]
pub struct Catalogs {
    pub languages: Arc<LanguageCatalog>,
    pub dataset_tasks: Arc<DatasetTaskCatalog>,
}

impl Catalogs {
    /// @ai:intent Catalogs shipped with this release
    /// @ai:effects pure
    pub fn builtin() -> Self {
        Self {
            languages: Arc::new(LanguageCatalog::builtin()),
            dataset_tasks: Arc::new(DatasetTaskCatalog::builtin()),
        }
    }
}
