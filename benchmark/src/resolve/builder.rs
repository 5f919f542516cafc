//! @ai:module:intent Turn user options into one immutable BenchmarkConfig
//! @ai:module:layer application
//! @ai:module:public_api BenchmarkConfigBuilder

use crate::catalog::{DatasetTaskCatalog, LanguageCatalog};
use crate::config::{BenchmarkConfig, BenchmarkOptions};
use crate::error::{Error, Result};
use crate::resolve::dataset_task::DatasetTaskResolver;
use crate::resolve::device::{resolve_device, DeviceProbe};
use crate::resolve::language::LanguageResolver;

/// @ai:intent Orchestrates the language, task and device resolution
pub struct BenchmarkConfigBuilder<'a, P: DeviceProbe> {
    languages: &'a LanguageCatalog,
    dataset_tasks: &'a DatasetTaskCatalog,
    probe: P,
}

impl<'a, P: DeviceProbe> BenchmarkConfigBuilder<'a, P> {
    /// @ai:intent Create a builder over injected catalogs and device probe
    /// @ai:effects pure
    pub fn new(
        languages: &'a LanguageCatalog,
        dataset_tasks: &'a DatasetTaskCatalog,
        probe: P,
    ) -> Self {
        Self {
            languages,
            dataset_tasks,
            probe,
        }
    }

    /// @ai:intent Build the benchmark configuration
    /// @ai:pre options.batch_size > 0
    /// @ai:post the no/nb/nn invariant holds on both language sets
    /// @ai:effects io (device probe)
    pub fn build(&self, options: BenchmarkOptions) -> Result<BenchmarkConfig> {
        if options.batch_size == 0 {
            return Err(Error::Configuration(
                "batch_size must be greater than zero".to_string(),
            ));
        }

        let language_resolver = LanguageResolver::new(self.languages);
        let languages = language_resolver.resolve(&options.language);
        let model_languages =
            language_resolver.model_languages(options.model_language.as_ref(), &languages)?;
        let dataset_languages =
            language_resolver.dataset_languages(options.dataset_language.as_ref(), &languages)?;

        let dataset_tasks =
            DatasetTaskResolver::new(self.dataset_tasks).resolve(options.dataset_task.as_ref())?;

        let device = resolve_device(options.device, &self.probe);

        tracing::debug!(
            "Resolved {} model languages, {} dataset languages, {} tasks on {}",
            model_languages.len(),
            dataset_languages.len(),
            dataset_tasks.len(),
            device
        );

        Ok(BenchmarkConfig {
            model_languages,
            dataset_languages,
            dataset_tasks,
            batch_size: options.batch_size,
            raise_errors: options.raise_errors,
            cache_dir: options.cache_dir,
            evaluate_train: options.evaluate_train,
            auth_token: options.auth_token,
            progress_bar: options.progress_bar,
            save_results: options.save_results,
            verbose: options.verbose,
            framework: options.framework,
            few_shot: options.few_shot,
            device,
            trust_remote_code: options.trust_remote_code,
            testing: options.testing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Device;
    use crate::resolve::device::FixedDeviceProbe;
    use crate::selector::Selector;

    fn build(options: BenchmarkOptions) -> Result<BenchmarkConfig> {
        let languages = LanguageCatalog::builtin();
        let tasks = DatasetTaskCatalog::builtin();
        BenchmarkConfigBuilder::new(&languages, &tasks, FixedDeviceProbe::default()).build(options)
    }

    #[test]
    fn test_defaults_select_everything_on_cpu() {
        let config = build(BenchmarkOptions::default()).unwrap();
        assert_eq!(config.model_languages.len(), LanguageCatalog::builtin().len());
        assert_eq!(config.dataset_tasks.len(), DatasetTaskCatalog::builtin().len());
        assert_eq!(config.device, Device::Cpu);
    }

    #[test]
    fn test_model_and_dataset_overrides_are_independent() {
        let options = BenchmarkOptions {
            language: Selector::one("da").unwrap(),
            dataset_language: Some(Selector::one("nb").unwrap()),
            ..Default::default()
        };
        let config = build(options).unwrap();

        let model_codes: Vec<&str> = config.model_languages.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(model_codes, vec!["da"]);
        let dataset_codes: Vec<&str> = config.dataset_language_codes().into_iter().collect();
        assert_eq!(dataset_codes, vec!["nb", "nn", "no"]);
    }

    #[test]
    fn test_zero_batch_size_is_rejected() {
        let options = BenchmarkOptions {
            batch_size: 0,
            ..Default::default()
        };
        assert!(matches!(build(options), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_resolver_errors_propagate() {
        let options = BenchmarkOptions {
            dataset_task: Some(Selector::one("pos").unwrap()),
            ..Default::default()
        };
        assert!(matches!(build(options), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_explicit_device_is_kept() {
        let languages = LanguageCatalog::builtin();
        let tasks = DatasetTaskCatalog::builtin();
        let builder = BenchmarkConfigBuilder::new(
            &languages,
            &tasks,
            FixedDeviceProbe { cuda: true, mps: false },
        );

        let auto = builder.build(BenchmarkOptions::default()).unwrap();
        assert_eq!(auto.device, Device::Cuda);

        let explicit = builder
            .build(BenchmarkOptions {
                device: Some(Device::Mps),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(explicit.device, Device::Mps);
        assert!(explicit.includes_task("ner"));
    }
}
