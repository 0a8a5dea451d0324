//! Core types for localizer.
//! Parsers decode into a [`Catalog`]; the resolver reads from it.

use std::{
    collections::BTreeMap,
    fmt::Display,
    path::PathBuf,
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::{error::Error, formats::FormatType};

/// A validated language code such as `"en"`, `"pt-BR"` or `"zh_Hant"`.
///
/// The code must parse as a Unicode language identifier, but it keeps the
/// spelling it was given: file and asset names are built from it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// English, the conventional default language.
impl Default for LanguageCode {
    fn default() -> Self {
        LanguageCode("en".to_string())
    }
}

impl FromStr for LanguageCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.parse::<LanguageIdentifier>().is_err() {
            return Err(Error::InvalidLanguage(s.to_string()));
        }
        Ok(LanguageCode(trimmed.to_string()))
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LanguageCode> for String {
    fn from(value: LanguageCode) -> Self {
        value.0
    }
}

impl PartialEq<str> for LanguageCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LanguageCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The resource categories a localizer loads for every language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    /// Display strings, scalar or composite.
    Strings,
    /// Font identifiers, `name[; size]`.
    Fonts,
}

impl Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Domain::Strings => write!(f, "strings"),
            Domain::Fonts => write!(f, "fonts"),
        }
    }
}

/// A single catalog value.
///
/// Which variant a value gets is decided when the file is parsed: native
/// arrays become [`Value::Composite`], everything else is a [`Value::Scalar`].
/// Scalars may still encode a list with the configured separator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(String),
    Composite(Vec<String>),
}

impl Value {
    /// Builds a composite value, trimming every item.
    ///
    /// An empty list has nothing to index into, so it is stored as an empty
    /// scalar instead.
    pub fn composite<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let items = items
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .collect::<Vec<_>>();
        if items.is_empty() {
            Value::Scalar(String::new())
        } else {
            Value::Composite(items)
        }
    }

    /// The value as one string; composite items are joined with `separator`.
    pub fn joined(&self, separator: &str) -> String {
        match self {
            Value::Scalar(value) => value.clone(),
            Value::Composite(items) => items.join(separator),
        }
    }

    /// The value as an ordered list of trimmed items.
    pub fn split(&self, separator: &str) -> Vec<String> {
        match self {
            Value::Scalar(value) if separator.is_empty() => vec![value.trim().to_string()],
            Value::Scalar(value) => value
                .split(separator)
                .map(|part| part.trim().to_string())
                .collect(),
            Value::Composite(items) => items.clone(),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Scalar(value) => write!(f, "{}", value),
            Value::Composite(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Scalar(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Scalar(value)
    }
}

/// An immutable table of entries for one domain in one language.
///
/// Catalogs are never merged or edited once loaded; a language change builds
/// new ones and drops the old.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    /// Base file name of the domain (e.g. `"strings"`).
    pub domain: String,
    /// Language of the file the entries came from; `None` for the bundled default file.
    pub language: Option<LanguageCode>,
    /// Format the catalog was parsed from, if it came from a file.
    pub format: Option<FormatType>,
    entries: BTreeMap<String, Value>,
}

impl Catalog {
    /// Creates an empty catalog for `domain`.
    pub fn empty(domain: impl Into<String>) -> Self {
        Catalog {
            domain: domain.into(),
            ..Default::default()
        }
    }

    /// Builds a catalog from key/value pairs. Duplicate keys are rejected.
    pub fn from_entries<I>(format: FormatType, entries: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let mut map = BTreeMap::new();
        for (key, value) in entries {
            if map.contains_key(&key) {
                return Err(Error::malformed(
                    format.to_string(),
                    format!("duplicate key `{}`", key),
                ));
            }
            map.insert(key, value);
        }
        Ok(Catalog {
            domain: String::new(),
            language: None,
            format: Some(format),
            entries: map,
        })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    pub(crate) fn with_origin(
        mut self,
        domain: impl Into<String>,
        language: Option<LanguageCode>,
    ) -> Self {
        self.domain = domain.into();
        self.language = language;
        self
    }
}

/// A decoded font catalog entry: `name` or `name; size`.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub name: String,
    pub size: Option<f32>,
}

impl FontSpec {
    /// Decodes a font entry, splitting scalars on `separator`.
    pub fn from_value(key: &str, value: &Value, separator: &str) -> Result<Self, Error> {
        let parts = value.split(separator);
        let invalid = |message: String| Error::InvalidValue {
            key: key.to_string(),
            message,
        };

        match parts.as_slice() {
            [name] | [name, _] if name.is_empty() => Err(invalid("empty font name".to_string())),
            [name] => Ok(FontSpec {
                name: name.clone(),
                size: None,
            }),
            [name, size] => {
                let size = size
                    .parse::<f32>()
                    .ok()
                    .filter(|s| s.is_finite() && *s > 0.0)
                    .ok_or_else(|| invalid(format!("invalid font size `{}`", size)))?;
                Ok(FontSpec {
                    name: name.clone(),
                    size: Some(size),
                })
            }
            _ => Err(invalid(format!(
                "expected `name` or `name{}size`, got {} parts",
                separator,
                parts.len()
            ))),
        }
    }
}

/// Opaque image handle returned by a resource provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle {
    /// The concrete asset name that resolved.
    pub name: String,
    /// Location of the asset, when the provider knows one.
    pub path: Option<PathBuf>,
}

/// Opaque font handle returned by a resource provider.
#[derive(Debug, Clone, PartialEq)]
pub struct FontHandle {
    /// The concrete font name that resolved.
    pub name: String,
    pub size: Option<f32>,
    /// Font file backing the handle; `None` for fonts resolved by name only.
    pub path: Option<PathBuf>,
}
