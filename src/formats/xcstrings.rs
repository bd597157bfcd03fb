//! Support for Apple `.xcstrings` string catalogs.
//!
//! The serde types mirror the JSON shape; [`Format::extract`] resolves the
//! development-language text and arguments of every entry.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;
use serde::Deserialize;

use crate::{
    error::Error,
    identifier::sanitize,
    placeholder::{classify, parse},
    traits::{Extract, Parser},
    types::{FormatArgument, LocalizedEntry},
    validation::{CharacterSet, validate},
};

/// Substitutions without an explicit specifier are plural counts.
const DEFAULT_SUBSTITUTION_SPECIFIER: &str = "lld";

/// Category preference inside one variation axis.
const PREFERRED_CATEGORIES: &[&str] = &["other", "one"];

lazy_static! {
    /// `%#@name@` or `%1$#@name@`, a reference to a named substitution.
    static ref SUBSTITUTION_REFERENCE: Regex = Regex::new(r"%(?:\d+\$)?#@[^@]*@").unwrap();
}

/// A parsed string catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    pub source_language: String,
    pub version: String,
    pub strings: BTreeMap<String, Item>,
}

/// The catalog as it appears on disk; required fields are checked in [`Parser::from_bytes`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Document {
    source_language: Option<String>,
    version: Option<String>,
    #[serde(default)]
    strings: BTreeMap<String, Item>,
}

impl Parser for Format {
    fn from_bytes(bytes: &[u8], path: &str) -> Result<Self, Error> {
        let document: Document =
            serde_json::from_slice(bytes).map_err(|source| Error::MalformedCatalog {
                path: path.to_string(),
                source,
            })?;

        let source_language = document.source_language.ok_or_else(|| Error::MissingField {
            path: path.to_string(),
            field: "sourceLanguage",
        })?;
        let version = document.version.ok_or_else(|| Error::MissingField {
            path: path.to_string(),
            field: "version",
        })?;

        Ok(Format {
            source_language,
            version,
            strings: document.strings,
        })
    }
}

impl Extract for Format {
    fn extract(&self, table: &str, path: &str) -> Vec<LocalizedEntry> {
        let mut entries = self
            .strings
            .iter()
            .filter(|(_, item)| item.is_translatable())
            .filter_map(|(key, item)| {
                let extraction = item
                    .localizations
                    .get(&self.source_language)
                    .and_then(|localization| localization.extract(key))
                    .unwrap_or_else(|| {
                        debug!("`{}` has no usable {} value, using key", key, self.source_language);
                        Extraction::from_text(key.clone())
                    });

                let checked = validate(key, CharacterSet::LocalizedText)
                    .and_then(|_| validate(&extraction.default_text, CharacterSet::LocalizedText));
                if let Err(err) = checked {
                    warn!("dropping `{}` from {}: {}", key, path, err);
                    return None;
                }

                Some(LocalizedEntry {
                    key: key.clone(),
                    table: table.to_string(),
                    default_text: extraction.default_text,
                    comment: item.comment.clone(),
                    arguments: extraction.arguments,
                    source_location: format!("{}: {}", path, key),
                })
            })
            .collect::<Vec<_>>();

        entries.sort_by(|a, b| a.key.cmp(&b.key));
        entries
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default)]
    pub localizations: BTreeMap<String, Localization>,
    pub comment: Option<String>,
    pub extraction_state: Option<ExtractionState>,
    pub should_translate: Option<bool>,
}

impl Item {
    pub fn is_translatable(&self) -> bool {
        self.should_translate.unwrap_or(true)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionState {
    Manual,
    Stale,
    ExtractedWithValue,
    Migrated,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum State {
    New,
    Translated,
    NeedsReview,
    Stale,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StringUnit {
    pub state: Option<State>,
    pub value: String,
}

/// One language's value for an entry.
///
/// Catalogs may fill more than one field; extraction picks the first usable one
/// in the order string unit, substitutions, variations.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Localization {
    pub string_unit: Option<StringUnit>,
    pub substitutions: Option<BTreeMap<String, Substitution>>,
    pub variations: Option<Variations>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Substitution {
    pub arg_num: Option<usize>,
    pub format_specifier: Option<String>,
    pub variations: Option<Variations>,
}

/// A variation tree, keyed by axis and then by category.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Variations {
    pub plural: Option<BTreeMap<String, Variation>>,
    pub device: Option<BTreeMap<String, Variation>>,
}

/// A leaf value or a nested tree (e.g. plural forms under one device).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variation {
    pub string_unit: Option<StringUnit>,
    pub variations: Option<Box<Variations>>,
}

impl Variations {
    /// Picks one representative string: plural before device, `other` before
    /// `one` before the remaining categories, recursing into nested trees.
    pub fn default_text(&self) -> Option<&str> {
        [self.plural.as_ref(), self.device.as_ref()]
            .into_iter()
            .flatten()
            .find_map(axis_default_text)
    }
}

fn axis_default_text(categories: &BTreeMap<String, Variation>) -> Option<&str> {
    PREFERRED_CATEGORIES
        .iter()
        .filter_map(|category| categories.get(*category))
        .chain(categories.values())
        .find_map(Variation::default_text)
}

impl Variation {
    fn default_text(&self) -> Option<&str> {
        match (&self.string_unit, &self.variations) {
            (Some(unit), _) => Some(unit.value.as_str()),
            (None, Some(nested)) => nested.default_text(),
            (None, None) => None,
        }
    }
}

/// Resolved text and arguments of one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Extraction {
    default_text: String,
    arguments: Vec<FormatArgument>,
}

impl Extraction {
    fn from_text(default_text: String) -> Self {
        let arguments = parse(&default_text);
        Extraction {
            default_text,
            arguments,
        }
    }
}

type Strategy = fn(&str, &Localization) -> Option<Extraction>;

/// Tried in order; the first strategy returning a value wins.
const STRATEGIES: &[Strategy] = &[from_string_unit, from_substitutions, from_variations];

impl Localization {
    fn extract(&self, key: &str) -> Option<Extraction> {
        STRATEGIES.iter().find_map(|strategy| strategy(key, self))
    }

    fn has_substitutions(&self) -> bool {
        self.substitutions
            .as_ref()
            .is_some_and(|substitutions| !substitutions.is_empty())
    }
}

fn from_string_unit(_key: &str, localization: &Localization) -> Option<Extraction> {
    let unit = localization.string_unit.as_ref()?;
    // `%#@name@` is not a printf placeholder; the substitutions describe it.
    if localization.has_substitutions() && SUBSTITUTION_REFERENCE.is_match(&unit.value) {
        return None;
    }
    Some(Extraction::from_text(unit.value.clone()))
}

fn from_substitutions(key: &str, localization: &Localization) -> Option<Extraction> {
    let substitutions = localization
        .substitutions
        .as_ref()
        .filter(|substitutions| !substitutions.is_empty())?;

    let mut arguments = Vec::with_capacity(substitutions.len());
    for (name, substitution) in substitutions {
        let position = substitution.arg_num.unwrap_or(arguments.len() + 1);
        let specifier = substitution
            .format_specifier
            .as_deref()
            .unwrap_or(DEFAULT_SUBSTITUTION_SPECIFIER)
            .trim_start_matches('%');
        arguments.push(FormatArgument {
            position,
            kind: classify(specifier),
            label: Some(sanitize(name)),
        });
    }
    arguments.sort_by_key(|argument| argument.position);

    Some(Extraction {
        default_text: key.to_string(),
        arguments,
    })
}

fn from_variations(_key: &str, localization: &Localization) -> Option<Extraction> {
    let text = localization.variations.as_ref()?.default_text()?;
    Some(Extraction::from_text(text.to_string()))
}
