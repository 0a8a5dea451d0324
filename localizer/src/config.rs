//! Resolver configuration.
//!
//! A [`LocalizerConfig`] can be built in code with the `with_*` setters or
//! read from TOML; every field has a default, so a config file only needs the
//! values it changes:
//!
//! ```toml
//! default_language = "en"
//! separator = "|"
//! available_languages = ["en", "fr", "de"]
//! resource_dir = "assets/l10n"
//! ```

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{error::Error, types::LanguageCode};

/// Default separator for composite values.
pub const DEFAULT_SEPARATOR: &str = "; ";
/// Default base file name of the strings domain.
pub const DEFAULT_STRINGS_FILE: &str = "strings";
/// Default base file name of the fonts domain.
pub const DEFAULT_FONTS_FILE: &str = "fonts";

/// Options for catalog loading and key resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizerConfig {
    /// Language loaded on startup and used to decide if asset names get a language suffix.
    pub default_language: LanguageCode,
    /// Base file name of the strings domain.
    pub strings_file: String,
    /// Base file name of the fonts domain; `None` leaves the domain unregistered.
    pub fonts_file: Option<String>,
    /// Delimiter that splits composite scalar values.
    pub separator: String,
    /// Strip `@Nx` density markers from image names before lookup.
    pub remove_density_suffix: bool,
    /// Trace load attempts and key misses.
    pub logging: bool,
    /// Optional pre-check for `change_language`.
    pub available_languages: Option<BTreeSet<LanguageCode>>,
    /// Root directory for [`crate::provider::FsProvider`].
    pub resource_dir: PathBuf,
    /// JSON file remembering the last selected language.
    pub preferences_file: Option<PathBuf>,
}

impl Default for LocalizerConfig {
    fn default() -> Self {
        LocalizerConfig {
            default_language: LanguageCode::default(),
            strings_file: DEFAULT_STRINGS_FILE.to_string(),
            fonts_file: Some(DEFAULT_FONTS_FILE.to_string()),
            separator: DEFAULT_SEPARATOR.to_string(),
            remove_density_suffix: false,
            logging: false,
            available_languages: None,
            resource_dir: PathBuf::from("resources"),
            preferences_file: None,
        }
    }
}

impl LocalizerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, Error> {
        Ok(toml::from_str(content)?)
    }

    /// Reads a TOML file. Relative `resource_dir` and `preferences_file`
    /// paths are resolved against the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;

        if let Some(base) = path.parent() {
            if config.resource_dir.is_relative() {
                config.resource_dir = base.join(&config.resource_dir);
            }
            if let Some(prefs) = config.preferences_file.as_mut().filter(|p| p.is_relative()) {
                *prefs = base.join(&*prefs);
            }
        }
        Ok(config)
    }

    pub fn with_default_language(mut self, language: LanguageCode) -> Self {
        self.default_language = language;
        self
    }

    pub fn with_strings_file(mut self, file: impl Into<String>) -> Self {
        self.strings_file = file.into();
        self
    }

    pub fn with_fonts_file(mut self, file: Option<String>) -> Self {
        self.fonts_file = file;
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_remove_density_suffix(mut self, remove: bool) -> Self {
        self.remove_density_suffix = remove;
        self
    }

    pub fn with_logging(mut self, logging: bool) -> Self {
        self.logging = logging;
        self
    }

    pub fn with_available_languages<I>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = LanguageCode>,
    {
        self.available_languages = Some(languages.into_iter().collect());
        self
    }

    pub fn with_resource_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.resource_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_preferences_file<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        self.preferences_file = path.map(|p| p.as_ref().to_path_buf());
        self
    }

    /// Whether `language` passes the available-languages pre-check.
    /// An unset or empty set accepts everything.
    pub fn is_available(&self, language: &LanguageCode) -> bool {
        match &self.available_languages {
            Some(languages) if !languages.is_empty() => languages.contains(language),
            _ => true,
        }
    }
}
