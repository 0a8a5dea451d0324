//! Catalog loading: locate a domain's resource for a language and parse it.
//!
//! Resolution order is the language-specific resource, then the bundled
//! default resource. A language-specific resource that exists but fails to
//! parse is an error; it never silently falls back to the default.

use tracing::{debug, warn};

use crate::{
    error::Error,
    provider::{CatalogSource, ResourceProvider},
    types::{Catalog, LanguageCode},
};

/// Loads catalogs from a [`ResourceProvider`].
///
/// Nothing is cached: every call re-reads and re-parses the source.
pub struct CatalogLoader<'a> {
    provider: &'a dyn ResourceProvider,
    logging: bool,
}

impl<'a> CatalogLoader<'a> {
    pub fn new(provider: &'a dyn ResourceProvider, logging: bool) -> Self {
        CatalogLoader { provider, logging }
    }

    /// Loads the catalog for `domain` in `language`.
    pub fn load(&self, domain: &str, language: &LanguageCode) -> Result<Catalog, Error> {
        if self.logging {
            debug!(domain, %language, "loading catalog");
        }

        let result = match self.provider.catalog_source(domain, Some(language))? {
            Some(source) => self.parse(source, domain, Some(language.clone())),
            None => {
                if self.logging {
                    debug!(domain, %language, "no language-specific resource, trying default");
                }
                match self.provider.catalog_source(domain, None)? {
                    Some(source) => self.parse(source, domain, None),
                    None => Err(Error::ResourceNotFound {
                        domain: domain.to_string(),
                        language: language.to_string(),
                    }),
                }
            }
        };

        if self.logging {
            if let Err(err) = &result {
                warn!(domain, %language, error = %err, "failed to load catalog");
            }
        }
        result
    }

    fn parse(
        &self,
        source: CatalogSource,
        domain: &str,
        language: Option<LanguageCode>,
    ) -> Result<Catalog, Error> {
        let catalog = source
            .format
            .parse_catalog(&source.bytes)?
            .with_origin(domain, language);

        if self.logging {
            debug!(
                domain,
                location = %source.location,
                entries = catalog.len(),
                "catalog loaded"
            );
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::FormatType;
    use crate::provider::MemoryProvider;
    use crate::types::Value;

    fn fr() -> LanguageCode {
        "fr".parse().unwrap()
    }

    #[test]
    fn test_prefers_language_specific_resource() {
        let provider = MemoryProvider::new()
            .with_catalog("strings", Some("fr"), FormatType::Json, r#"{"hi": "Salut"}"#)
            .with_catalog("strings", None, FormatType::Json, r#"{"hi": "Hi"}"#);
        let catalog = CatalogLoader::new(&provider, false).load("strings", &fr()).unwrap();
        assert_eq!(catalog.get("hi"), Some(&Value::from("Salut")));
        assert_eq!(catalog.language, Some(fr()));
        assert_eq!(catalog.domain, "strings");
    }

    #[test]
    fn test_falls_back_to_default_resource() {
        let provider =
            MemoryProvider::new().with_catalog("strings", None, FormatType::Json, r#"{"hi": "Hi"}"#);
        let catalog = CatalogLoader::new(&provider, true).load("strings", &fr()).unwrap();
        assert_eq!(catalog.get("hi"), Some(&Value::from("Hi")));
        assert_eq!(catalog.language, None);
    }

    #[test]
    fn test_missing_everywhere_is_not_found() {
        let provider = MemoryProvider::new();
        let err = CatalogLoader::new(&provider, false)
            .load("fonts", &fr())
            .unwrap_err();
        assert!(matches!(err, Error::ResourceNotFound { .. }));
    }

    #[test]
    fn test_malformed_language_resource_does_not_fall_back() {
        let provider = MemoryProvider::new()
            .with_catalog("strings", Some("fr"), FormatType::Json, "{ broken")
            .with_catalog("strings", None, FormatType::Json, r#"{"hi": "Hi"}"#);
        let err = CatalogLoader::new(&provider, false)
            .load("strings", &fr())
            .unwrap_err();
        assert!(err.is_load_failure());
    }
}
