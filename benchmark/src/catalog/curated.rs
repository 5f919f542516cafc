//! @ai:module:intent Curated model lists correcting gaps in registry tagging
//! @ai:module:layer domain
//! @ai:module:public_api CuratedModels
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};

/// @ai:intent Hand-maintained model identifiers injected into model lists
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuratedModels {
    /// Bumped whenever any list below changes
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_multilingual")]
    pub multilingual: Vec<String>,
    /// Synthetic models, only ever added to the "all" bucket
    #[serde(default = "default_random")]
    pub random: Vec<String>,
    /// Multilingual models covering Danish without a "da" tag
    #[serde(default = "default_danish")]
    pub danish_multilingual: Vec<String>,
    /// Multilingual models covering Norwegian without a "no"/"nb"/"nn" tag
    #[serde(default = "default_norwegian")]
    pub norwegian_multilingual: Vec<String>,
}

impl Default for CuratedModels {
    fn default() -> Self {
        Self {
            version: default_version(),
            multilingual: default_multilingual(),
            random: default_random(),
            danish_multilingual: default_danish(),
            norwegian_multilingual: default_norwegian(),
        }
    }
}

fn owned(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

fn default_version() -> u32 {
    1
}

fn default_multilingual() -> Vec<String> {
    owned(&[
        "xlm-roberta-large",
        "Peltarion/xlm-roberta-longformer-base-4096",
        "microsoft/xlm-align-base",
        "microsoft/infoxlm-base",
        "microsoft/infoxlm-large",
        "bert-base-multilingual-cased",
        "bert-base-multilingual-uncased",
        "distilbert-base-multilingual-cased",
        "cardiffnlp/twitter-xlm-roberta-base",
    ])
}

fn default_random() -> Vec<String> {
    owned(&[
        "random-xlmr-base-sequence-clf",
        "random-xlmr-base-token-clf",
        "random-electra-small-sequence-clf",
        "random-electra-small-token-clf",
    ])
}

fn default_danish() -> Vec<String> {
    owned(&[
        "Geotrend/bert-base-en-da-cased",
        "Geotrend/bert-base-25lang-cased",
        "Geotrend/bert-base-en-fr-de-no-da-cased",
        "Geotrend/distilbert-base-en-da-cased",
        "Geotrend/distilbert-base-25lang-cased",
        "Geotrend/distilbert-base-en-fr-de-no-da-cased",
    ])
}

fn default_norwegian() -> Vec<String> {
    owned(&[
        "Geotrend/bert-base-en-no-cased",
        "Geotrend/bert-base-25lang-cased",
        "Geotrend/bert-base-en-fr-de-no-da-cased",
        "Geotrend/distilbert-base-en-no-cased",
        "Geotrend/distilbert-base-25lang-cased",
        "Geotrend/distilbert-base-en-fr-de-no-da-cased",
    ])
}
