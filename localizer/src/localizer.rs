//! The [`Localizer`]: language manager and key resolver in one owned value.
//!
//! A `Localizer` owns its configuration, its resource provider, its naming
//! policy and the set of active catalogs. Changing the language builds a
//! complete new catalog set first and swaps it in with a single assignment,
//! so lookups either see the old language everywhere or the new one
//! everywhere. A failed change leaves everything as it was.
//!
//! ```rust
//! use localizer::{Localizer, LocalizerConfig, formats::FormatType, provider::MemoryProvider};
//!
//! let provider = MemoryProvider::new()
//!     .with_catalog("strings", Some("en"), FormatType::Json, r#"{"days": "Mon; Tue"}"#)
//!     .with_catalog("strings", Some("fr"), FormatType::Json, r#"{"days": "lun; mar"}"#);
//! let config = LocalizerConfig::default().with_fonts_file(None);
//!
//! let mut localizer = Localizer::load(config, provider)?;
//! assert_eq!(localizer.array_with_key("days"), vec!["Mon", "Tue"]);
//!
//! localizer.change_language("fr")?;
//! assert_eq!(localizer.string_with_key_at_index("days", 1)?, "mar");
//! assert_eq!(localizer.string_with_key("unknown"), "unknown");
//! # Ok::<(), localizer::Error>(())
//! ```

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::{
    config::LocalizerConfig,
    error::Error,
    loader::CatalogLoader,
    naming::{DefaultNamingPolicy, NameContext, NamingPolicy},
    preferences,
    provider::{FsProvider, ResourceProvider},
    types::{Catalog, Domain, FontHandle, FontSpec, ImageHandle, LanguageCode},
};

/// Catalogs of every registered domain for one language.
#[derive(Debug, Clone)]
struct ActiveCatalogs {
    language: LanguageCode,
    strings: Catalog,
    fonts: Catalog,
}

pub struct Localizer {
    config: LocalizerConfig,
    provider: Box<dyn ResourceProvider>,
    naming: Box<dyn NamingPolicy>,
    /// `None` until the first successful load.
    active: Option<ActiveCatalogs>,
}

impl std::fmt::Debug for Localizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Localizer")
            .field("config", &self.config)
            .field("language", &self.current_language())
            .field("strings", &self.catalog(Domain::Strings).map(Catalog::len))
            .field("fonts", &self.catalog(Domain::Fonts).map(Catalog::len))
            .finish_non_exhaustive()
    }
}

impl Localizer {
    /// Creates an uninitialized localizer. Nothing is loaded until
    /// [`Localizer::change_language`], [`Localizer::reload`] or
    /// [`Localizer::bootstrap`] is called; until then string lookups fall
    /// back to their keys.
    pub fn new(config: LocalizerConfig, provider: impl ResourceProvider + 'static) -> Self {
        Localizer {
            config,
            provider: Box::new(provider),
            naming: Box::new(DefaultNamingPolicy::default()),
            active: None,
        }
    }

    /// Creates a localizer reading from `config.resource_dir`.
    pub fn from_config(config: LocalizerConfig) -> Self {
        let provider = FsProvider::new(&config.resource_dir);
        Self::new(config, provider)
    }

    /// Creates a localizer and loads the default language.
    pub fn load(config: LocalizerConfig, provider: impl ResourceProvider + 'static) -> Result<Self, Error> {
        let mut localizer = Self::new(config, provider);
        localizer.reload()?;
        Ok(localizer)
    }

    /// Replaces the naming policy used for images, animation frames and fonts.
    pub fn with_naming_policy(mut self, policy: impl NamingPolicy + 'static) -> Self {
        self.naming = Box::new(policy);
        self
    }

    pub fn config(&self) -> &LocalizerConfig {
        &self.config
    }

    /// Mutable access to the configuration. Separator, logging and density
    /// flags apply to the next lookup; file names and languages apply to the
    /// next load.
    pub fn config_mut(&mut self) -> &mut LocalizerConfig {
        &mut self.config
    }

    pub fn is_loaded(&self) -> bool {
        self.active.is_some()
    }

    /// The active language, `None` before the first successful load.
    pub fn current_language(&self) -> Option<&LanguageCode> {
        self.active.as_ref().map(|active| &active.language)
    }

    pub fn current_language_is_default(&self) -> bool {
        self.current_language() == Some(&self.config.default_language)
    }

    /// Whether the active language is exactly `"en"`.
    pub fn is_english(&self) -> bool {
        self.current_language().is_some_and(|language| language == "en")
    }

    pub fn available_languages(&self) -> Option<&BTreeSet<LanguageCode>> {
        self.config.available_languages.as_ref()
    }

    /// The active catalog of `domain`, if loaded.
    pub fn catalog(&self, domain: Domain) -> Option<&Catalog> {
        self.active.as_ref().map(|active| match domain {
            Domain::Strings => &active.strings,
            Domain::Fonts => &active.fonts,
        })
    }

    /// Switches to `code`, reloading every registered domain.
    ///
    /// On error the previous language and catalogs stay active.
    pub fn change_language(&mut self, code: &str) -> Result<(), Error> {
        let language: LanguageCode = code.parse()?;
        if !self.config.is_available(&language) {
            if self.config.logging {
                warn!(%language, "language is not in the available languages");
            }
            return Err(Error::UnavailableLanguage(language.to_string()));
        }

        let catalogs = self.load_catalogs(&language, &self.config)?;
        self.activate(catalogs);
        self.persist_language();
        Ok(())
    }

    /// Switches the strings domain to another base file name for the current
    /// language (the default language if nothing is loaded yet).
    pub fn load_string_file(&mut self, file: &str) -> Result<(), Error> {
        let language = self.effective_language().clone();
        let candidate = self.config.clone().with_strings_file(file);
        let catalogs = self.load_catalogs(&language, &candidate)?;
        self.config.strings_file = candidate.strings_file;
        self.activate(catalogs);
        Ok(())
    }

    /// Re-reads every domain for the current language, or the default
    /// language if nothing is loaded yet.
    pub fn reload(&mut self) -> Result<(), Error> {
        let language = self.effective_language().clone();
        let catalogs = self.load_catalogs(&language, &self.config)?;
        self.activate(catalogs);
        Ok(())
    }

    /// Loads the language remembered in the preferences file, falling back
    /// to the default language when there is none or it fails to load.
    pub fn bootstrap(&mut self) -> Result<(), Error> {
        if let Some(path) = self.config.preferences_file.clone() {
            match preferences::load_language(&path) {
                Ok(Some(language)) => match self.change_language(language.as_str()) {
                    Ok(()) => return Ok(()),
                    Err(err) if self.config.logging => {
                        warn!(%language, error = %err, "stored language failed to load");
                    }
                    Err(_) => {}
                },
                Ok(None) => {}
                Err(err) if self.config.logging => {
                    warn!(error = %err, "could not read preferences");
                }
                Err(_) => {}
            }
        }
        let default = self.config.default_language.clone();
        self.change_language(default.as_str())
    }

    fn effective_language(&self) -> &LanguageCode {
        self.current_language()
            .unwrap_or(&self.config.default_language)
    }

    fn load_catalogs(
        &self,
        language: &LanguageCode,
        config: &LocalizerConfig,
    ) -> Result<ActiveCatalogs, Error> {
        let loader = CatalogLoader::new(self.provider.as_ref(), config.logging);
        let strings = loader.load(&config.strings_file, language)?;
        let fonts = match &config.fonts_file {
            Some(file) => loader.load(file, language)?,
            None => Catalog::empty(Domain::Fonts.to_string()),
        };
        Ok(ActiveCatalogs {
            language: language.clone(),
            strings,
            fonts,
        })
    }

    fn activate(&mut self, catalogs: ActiveCatalogs) {
        if self.config.logging {
            info!(
                language = %catalogs.language,
                strings = catalogs.strings.len(),
                fonts = catalogs.fonts.len(),
                "language activated"
            );
        }
        self.active = Some(catalogs);
    }

    fn persist_language(&self) {
        let (Some(path), Some(language)) = (&self.config.preferences_file, self.current_language())
        else {
            return;
        };
        if let Err(err) = preferences::store_language(path, language) {
            if self.config.logging {
                warn!(%language, error = %err, "could not store the selected language");
            }
        }
    }

    fn log_miss(&self, domain: Domain, key: &str) {
        if self.config.logging {
            let language = self.current_language().map(ToString::to_string);
            warn!(%domain, key, language = language.as_deref(), "missing key");
        }
    }

    fn name_context(&self) -> NameContext<'_> {
        NameContext {
            language: self.current_language(),
            is_default_language: self.current_language().is_none()
                || self.current_language_is_default(),
            remove_density_suffix: self.config.remove_density_suffix,
        }
    }

    /// The stored string for `key`, or `key` itself if there is none.
    ///
    /// Composite entries are returned joined with the separator.
    pub fn string_with_key(&self, key: &str) -> String {
        match self.catalog(Domain::Strings).and_then(|c| c.get(key)) {
            Some(value) => value.joined(&self.config.separator),
            None => {
                self.log_miss(Domain::Strings, key);
                key.to_string()
            }
        }
    }

    /// Whether the strings catalog has an entry for `key`.
    pub fn object_for_key_exists(&self, key: &str) -> bool {
        self.catalog(Domain::Strings)
            .is_some_and(|catalog| catalog.contains_key(key))
    }

    /// The entry for `key` split into trimmed items; empty if there is no entry.
    pub fn array_with_key(&self, key: &str) -> Vec<String> {
        match self.catalog(Domain::Strings).and_then(|c| c.get(key)) {
            Some(value) => value.split(&self.config.separator),
            None => {
                self.log_miss(Domain::Strings, key);
                Vec::new()
            }
        }
    }

    /// Item `index` of [`Localizer::array_with_key`].
    pub fn string_with_key_at_index(&self, key: &str, index: usize) -> Result<String, Error> {
        let value = self
            .catalog(Domain::Strings)
            .and_then(|c| c.get(key))
            .ok_or_else(|| {
                self.log_miss(Domain::Strings, key);
                Error::key_missing(Domain::Strings.to_string(), key)
            })?;

        let items = value.split(&self.config.separator);
        let len = items.len();
        items
            .into_iter()
            .nth(index)
            .ok_or_else(|| Error::IndexOutOfBounds {
                key: key.to_string(),
                index,
                len,
            })
    }

    /// Resolves the font registered under `key` in the fonts catalog.
    pub fn font_with_key(&self, key: &str) -> Result<FontHandle, Error> {
        let value = self
            .catalog(Domain::Fonts)
            .and_then(|c| c.get(key))
            .ok_or_else(|| {
                self.log_miss(Domain::Fonts, key);
                Error::key_missing(Domain::Fonts.to_string(), key)
            })?;

        let mut spec = FontSpec::from_value(key, value, &self.config.separator)?;
        spec.name = self.naming.font_name(&spec.name, &self.name_context());
        self.provider
            .font(&spec)
            .ok_or(Error::FontNotFound(spec.name))
    }

    /// Resolves a logical image name through the naming policy.
    pub fn image_named(&self, name: &str) -> Option<ImageHandle> {
        let ctx = self.name_context();
        let image = self
            .naming
            .image_candidates(name, &ctx)
            .iter()
            .find_map(|candidate| self.provider.image(candidate));

        if image.is_none() && self.config.logging {
            debug!(name, "no image matches");
        }
        image
    }

    /// Alias of [`Localizer::image_named`].
    pub fn image_with_name(&self, name: &str) -> Option<ImageHandle> {
        self.image_named(name)
    }

    /// Resolves frames `1..=number_of_images` of the animation `name`.
    ///
    /// Fails on the first frame that does not resolve; no partial sequence is
    /// returned.
    pub fn image_animation_array_with_image_named(
        &self,
        name: &str,
        number_of_images: usize,
    ) -> Result<Vec<ImageHandle>, Error> {
        (1..=number_of_images)
            .map(|frame| {
                self.image_named(&self.naming.frame_name(name, frame))
                    .ok_or_else(|| Error::MissingFrame {
                        name: name.to_string(),
                        frame,
                    })
            })
            .collect()
    }
}
