//! @ai:module:intent Normalise scalar, list and "all" user selectors into one canonical type
//! @ai:module:layer domain
//! @ai:module:public_api Selector, ALL
//! @ai:module:stateless true

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Sentinel selecting every catalog entry.
pub const ALL: &str = "all";

/// @ai:intent Canonical selector over catalog identifiers
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSelector", into = "RawSelector")]
pub enum Selector {
    All,
    Only(BTreeSet<String>),
}

/// @ai:intent Shape accepted from configuration files: a string or a list of strings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawSelector {
    One(String),
    Many(Vec<String>),
}

impl Selector {
    /// @ai:intent Build a selector from any number of raw values
    /// @ai:pre at least one non-blank value
    /// @ai:post identifiers are trimmed and lowercased
    /// @ai:example (["da"]) -> Only({"da"})
    /// @ai:example (["DA", " sv "]) -> Only({"da", "sv"})
    /// @ai:example (["da", "all"]) -> All
    /// @ai:effects pure
    pub fn parse<I, S>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut codes = BTreeSet::new();

        for value in values {
            let code = value.as_ref().trim().to_lowercase();

            if code.is_empty() {
                return Err(Error::Configuration(
                    "selectors cannot contain blank identifiers".to_string(),
                ));
            }

            if code == ALL {
                return Ok(Selector::All);
            }

            codes.insert(code);
        }

        if codes.is_empty() {
            return Err(Error::Configuration(
                "selectors must name at least one identifier".to_string(),
            ));
        }

        Ok(Selector::Only(codes))
    }

    /// @ai:intent Selector for a single identifier
    /// @ai:effects pure
    pub fn one(value: &str) -> Result<Self> {
        Self::parse([value])
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }
}

impl FromStr for Selector {
    type Err = Error;

    /// Comma-separated identifiers, as given on the command line.
    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s.split(','))
    }
}

impl TryFrom<RawSelector> for Selector {
    type Error = Error;

    fn try_from(raw: RawSelector) -> Result<Self> {
        match raw {
            RawSelector::One(value) => Self::parse([value]),
            RawSelector::Many(values) => Self::parse(values),
        }
    }
}

impl From<Selector> for RawSelector {
    fn from(selector: Selector) -> Self {
        match selector {
            Selector::All => RawSelector::One(ALL.to_string()),
            Selector::Only(codes) if codes.len() == 1 => {
                RawSelector::One(codes.into_iter().next().unwrap_or_default())
            }
            Selector::Only(codes) => RawSelector::Many(codes.into_iter().collect()),
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selector::All => write!(f, "{}", ALL),
            Selector::Only(codes) => {
                write!(f, "{}", codes.iter().cloned().collect::<Vec<_>>().join(","))
            }
        }
    }
}
