//! @ai:module:intent Expand dataset task selectors into DatasetTask values
//! @ai:module:layer domain
//! @ai:module:public_api DatasetTaskResolver
//! @ai:module:stateless true

use crate::catalog::{DatasetTask, DatasetTaskCatalog};
use crate::error::{Error, Result};
use crate::selector::Selector;
use std::collections::BTreeSet;

/// @ai:intent Resolves task selectors against an injected catalog
pub struct DatasetTaskResolver<'a> {
    catalog: &'a DatasetTaskCatalog,
}

impl<'a> DatasetTaskResolver<'a> {
    pub fn new(catalog: &'a DatasetTaskCatalog) -> Self {
        Self { catalog }
    }

    /// @ai:intent Resolve the tasks to benchmark
    /// @ai:post None or "all" yields every catalog task
    /// @ai:effects pure
    pub fn resolve(&self, dataset_task: Option<&Selector>) -> Result<BTreeSet<DatasetTask>> {
        match dataset_task {
            None | Some(Selector::All) => Ok(self.catalog.iter().cloned().collect()),
            Some(Selector::Only(names)) => names
                .iter()
                .map(|name| {
                    self.catalog.get(name).cloned().ok_or_else(|| {
                        Error::Configuration(format!(
                            "unknown dataset task '{}' (available: {})",
                            name,
                            self.catalog.names().collect::<Vec<_>>().join(", ")
                        ))
                    })
                })
                .collect(),
        }
    }
}
