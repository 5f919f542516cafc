//! @ai:module:intent Language metadata and the fixed language catalog
//! @ai:module:layer domain
//! @ai:module:public_api Language, LanguageCatalog, NORWEGIAN_CODES
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The umbrella code followed by the two written standards it stands for.
pub const NORWEGIAN_CODES: [&str; 3] = ["no", "nb", "nn"];

/// @ai:intent A language benchmarks can be run in
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Language {
    /// ISO 639-1 code, e.g. "da"
    pub code: String,
    pub name: String,
}

impl Language {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// @ai:intent Immutable mapping from language code to language metadata
#[derive(Debug, Clone, Default)]
pub struct LanguageCatalog {
    languages: BTreeMap<String, Language>,
}

impl LanguageCatalog {
    /// @ai:intent Languages supported by the benchmark datasets
    /// @ai:effects pure
    pub fn builtin() -> Self {
        Self::from_languages([
            Language::new("da", "Danish"),
            Language::new("sv", "Swedish"),
            Language::new("no", "Norwegian"),
            Language::new("nb", "Norwegian Bokmål"),
            Language::new("nn", "Norwegian Nynorsk"),
            Language::new("is", "Icelandic"),
            Language::new("fo", "Faroese"),
            Language::new("de", "German"),
            Language::new("nl", "Dutch"),
            Language::new("en", "English"),
        ])
    }

    /// @ai:intent Build a catalog from explicit entries (later duplicates win)
    /// @ai:effects pure
    pub fn from_languages<I>(languages: I) -> Self
    where
        I: IntoIterator<Item = Language>,
    {
        Self {
            languages: languages
                .into_iter()
                .map(|language| (language.code.clone(), language))
                .collect(),
        }
    }

    pub fn get(&self, code: &str) -> Option<&Language> {
        self.languages.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.languages.contains_key(code)
    }

    /// @ai:intent All codes, in sorted order
    /// @ai:effects pure
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Language> {
        self.languages.values()
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}
