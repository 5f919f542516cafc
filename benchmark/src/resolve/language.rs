//! @ai:module:intent Expand language selectors into canonical code sets and Language values
//! @ai:module:layer domain
//! @ai:module:public_api LanguageResolver
//! @ai:module:stateless true

use crate::catalog::{Language, LanguageCatalog, NORWEGIAN_CODES};
use crate::error::{Error, Result};
use crate::selector::Selector;
use std::collections::BTreeSet;

/// @ai:intent Resolves language selectors against an injected catalog
pub struct LanguageResolver<'a> {
    catalog: &'a LanguageCatalog,
}

impl<'a> LanguageResolver<'a> {
    pub fn new(catalog: &'a LanguageCatalog) -> Self {
        Self { catalog }
    }

    /// @ai:intent Resolve the top-level selector to language codes
    /// @ai:post if any of no/nb/nn is present, every one of them in the catalog is present
    /// @ai:example ("no") -> {"nb", "nn", "no"}
    /// @ai:example ("all") -> every catalog code
    /// @ai:effects pure
    pub fn resolve(&self, selector: &Selector) -> BTreeSet<String> {
        match selector {
            Selector::All => self.catalog.codes().map(str::to_string).collect(),
            Selector::Only(codes) => self.close_norwegian(codes.clone()),
        }
    }

    /// @ai:intent Languages to select models for
    /// @ai:effects pure
    pub fn model_languages(
        &self,
        model_language: Option<&Selector>,
        languages: &BTreeSet<String>,
    ) -> Result<BTreeSet<Language>> {
        self.hydrate(model_language, languages)
    }

    /// @ai:intent Languages to select datasets for
    /// @ai:effects pure
    pub fn dataset_languages(
        &self,
        dataset_language: Option<&Selector>,
        languages: &BTreeSet<String>,
    ) -> Result<BTreeSet<Language>> {
        self.hydrate(dataset_language, languages)
    }

    /// An override replaces the base set outright; it is not merged with it.
    fn hydrate(
        &self,
        override_selector: Option<&Selector>,
        base: &BTreeSet<String>,
    ) -> Result<BTreeSet<Language>> {
        let codes = match override_selector {
            None => base.clone(),
            Some(selector) => self.resolve(selector),
        };

        codes
            .iter()
            .map(|code| {
                self.catalog.get(code).cloned().ok_or_else(|| {
                    Error::Configuration(format!(
                        "unknown language code '{}' (available: {})",
                        code,
                        self.catalog.codes().collect::<Vec<_>>().join(", ")
                    ))
                })
            })
            .collect()
    }

    fn close_norwegian(&self, mut codes: BTreeSet<String>) -> BTreeSet<String> {
        if NORWEGIAN_CODES.iter().any(|code| codes.contains(*code)) {
            codes.extend(
                NORWEGIAN_CODES
                    .iter()
                    .filter(|code| self.catalog.contains(code))
                    .map(|code| code.to_string()),
            );
        }
        codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn codes(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn selector(values: &[&str]) -> Selector {
        Selector::parse(values).unwrap()
    }

    #[test]
    fn test_no_selects_both_written_standards() {
        let catalog = LanguageCatalog::builtin();
        let resolver = LanguageResolver::new(&catalog);
        assert_eq!(resolver.resolve(&selector(&["no"])), codes(&["nb", "nn", "no"]));
    }

    #[test]
    fn test_nb_or_nn_alone_selects_all_norwegian_codes() {
        let catalog = LanguageCatalog::builtin();
        let resolver = LanguageResolver::new(&catalog);

        for single in ["nb", "nn"] {
            let resolved = resolver.resolve(&selector(&["da", single]));
            assert_eq!(resolved, codes(&["da", "nb", "nn", "no"]));
        }
    }

    #[test]
    fn test_without_norwegian_nothing_is_added() {
        let catalog = LanguageCatalog::builtin();
        let resolver = LanguageResolver::new(&catalog);
        assert_eq!(resolver.resolve(&selector(&["da", "sv"])), codes(&["da", "sv"]));
    }

    #[test]
    fn test_all_is_exactly_the_catalog() {
        let catalog = LanguageCatalog::builtin();
        let resolver = LanguageResolver::new(&catalog);
        let expected: BTreeSet<String> = catalog.codes().map(str::to_string).collect();
        assert_eq!(resolver.resolve(&Selector::All), expected);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let catalog = LanguageCatalog::builtin();
        let resolver = LanguageResolver::new(&catalog);

        let once = resolver.resolve(&selector(&["is", "nn"]));
        let twice = resolver.resolve(&Selector::Only(once.clone()));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_override_replaces_base() {
        let catalog = LanguageCatalog::builtin();
        let resolver = LanguageResolver::new(&catalog);
        let base = resolver.resolve(&selector(&["da", "sv"]));

        let model_languages = resolver
            .model_languages(Some(&selector(&["is"])), &base)
            .unwrap();
        let model_codes: Vec<&str> = model_languages.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(model_codes, vec!["is"]);

        let dataset_languages = resolver.dataset_languages(None, &base).unwrap();
        assert_eq!(dataset_languages.len(), 2);
    }

    #[test]
    fn test_override_all_hydrates_every_language() {
        let catalog = LanguageCatalog::builtin();
        let resolver = LanguageResolver::new(&catalog);
        let base = codes(&["da"]);

        let languages = resolver.dataset_languages(Some(&Selector::All), &base).unwrap();
        assert_eq!(languages.len(), catalog.len());
    }

    #[test]
    fn test_unknown_code_is_a_configuration_error() {
        let catalog = LanguageCatalog::builtin();
        let resolver = LanguageResolver::new(&catalog);
        let base = resolver.resolve(&selector(&["da", "xx"]));

        let err = resolver.model_languages(None, &base).unwrap_err();
        assert!(matches!(err, Error::Configuration(ref msg) if msg.contains("'xx'")));
    }

    #[test]
    fn test_closure_only_adds_codes_known_to_catalog() {
        let catalog = LanguageCatalog::from_languages([
            Language::new("no", "Norwegian"),
            Language::new("nb", "Norwegian Bokmål"),
        ]);
        let resolver = LanguageResolver::new(&catalog);
        assert_eq!(resolver.resolve(&selector(&["nb"])), codes(&["nb", "no"]));
    }
}
