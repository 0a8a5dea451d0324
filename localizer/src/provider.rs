//! Resource providers: where catalog files, images and fonts come from.
//!
//! The resolver never touches storage directly. It asks a [`ResourceProvider`]
//! for the raw bytes of a catalog and for opaque image/font handles.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
};

use crate::{
    error::Error,
    formats::FormatType,
    types::{FontHandle, FontSpec, ImageHandle, LanguageCode},
};

/// Raw catalog content handed to the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSource {
    pub format: FormatType,
    pub bytes: Vec<u8>,
    /// Human-readable origin, used in traces.
    pub location: String,
}

/// Storage backend for catalogs and assets.
pub trait ResourceProvider: Send + Sync {
    /// Returns the catalog for `domain` in `language`, or the bundled default
    /// catalog when `language` is `None`.
    ///
    /// `Ok(None)` means the resource does not exist; `Err` means it exists but
    /// could not be read.
    fn catalog_source(
        &self,
        domain: &str,
        language: Option<&LanguageCode>,
    ) -> Result<Option<CatalogSource>, Error>;

    /// Resolves a concrete image name.
    fn image(&self, name: &str) -> Option<ImageHandle>;

    /// Resolves a concrete font.
    fn font(&self, spec: &FontSpec) -> Option<FontHandle>;
}

/// Reads resources from a directory.
///
/// Layout, for domain `strings` and language `fr`:
///
/// ```text
/// <root>/strings_fr.{plist,json,strings}
/// <root>/fr.lproj/strings.{plist,json,strings}
/// <root>/strings.{plist,json,strings}        (default)
/// <root>/images/<name>[.png]
/// <root>/fonts/<name>.{ttf,otf}
/// ```
#[derive(Debug, Clone)]
pub struct FsProvider {
    root: PathBuf,
}

impl FsProvider {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        FsProvider {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn catalog_candidates(&self, domain: &str, language: Option<&LanguageCode>) -> Vec<PathBuf> {
        match language {
            Some(lang) => {
                let flat = FormatType::ALL
                    .iter()
                    .map(|f| self.root.join(format!("{}_{}.{}", domain, lang, f.extension())));
                let lproj = FormatType::ALL.iter().map(|f| {
                    self.root
                        .join(format!("{}.lproj", lang))
                        .join(format!("{}.{}", domain, f.extension()))
                });
                flat.chain(lproj).collect()
            }
            None => FormatType::ALL
                .iter()
                .map(|f| self.root.join(format!("{}.{}", domain, f.extension())))
                .collect(),
        }
    }
}

impl ResourceProvider for FsProvider {
    fn catalog_source(
        &self,
        domain: &str,
        language: Option<&LanguageCode>,
    ) -> Result<Option<CatalogSource>, Error> {
        for path in self.catalog_candidates(domain, language) {
            if !path.is_file() {
                continue;
            }
            let format = FormatType::from_path(&path)?;
            let bytes = std::fs::read(&path)?;
            return Ok(Some(CatalogSource {
                format,
                bytes,
                location: path.display().to_string(),
            }));
        }
        Ok(None)
    }

    fn image(&self, name: &str) -> Option<ImageHandle> {
        if name.is_empty() {
            return None;
        }
        let images = self.root.join("images");
        let has_extension = Path::new(name).extension().is_some();
        let candidates = if has_extension {
            vec![name.to_string()]
        } else {
            vec![name.to_string(), format!("{}.png", name)]
        };

        candidates.into_iter().find_map(|file| {
            let path = images.join(&file);
            path.is_file().then(|| ImageHandle {
                name: name.to_string(),
                path: Some(path),
            })
        })
    }

    /// Fonts without a file under `fonts/` are resolved by name, as system fonts.
    fn font(&self, spec: &FontSpec) -> Option<FontHandle> {
        if spec.name.is_empty() {
            return None;
        }
        let fonts = self.root.join("fonts");
        let path = ["ttf", "otf"]
            .iter()
            .map(|ext| fonts.join(format!("{}.{}", spec.name, ext)))
            .find(|path| path.is_file());

        Some(FontHandle {
            name: spec.name.clone(),
            size: spec.size,
            path,
        })
    }
}

/// Keeps resources in memory; useful for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    catalogs: HashMap<(String, Option<String>), CatalogSource>,
    images: HashSet<String>,
    /// `None` resolves every non-empty font name.
    fonts: Option<HashSet<String>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a catalog for `domain`; `language: None` registers the default catalog.
    pub fn with_catalog(
        mut self,
        domain: &str,
        language: Option<&str>,
        format: FormatType,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        let location = match language {
            Some(lang) => format!("memory:{}_{}.{}", domain, lang, format.extension()),
            None => format!("memory:{}.{}", domain, format.extension()),
        };
        self.catalogs.insert(
            (domain.to_string(), language.map(str::to_string)),
            CatalogSource {
                format,
                bytes: content.into(),
                location,
            },
        );
        self
    }

    pub fn with_image(mut self, name: &str) -> Self {
        self.images.insert(name.to_string());
        self
    }

    /// Restricts font resolution to registered names.
    pub fn with_font(mut self, name: &str) -> Self {
        self.fonts
            .get_or_insert_with(HashSet::new)
            .insert(name.to_string());
        self
    }
}

impl ResourceProvider for MemoryProvider {
    fn catalog_source(
        &self,
        domain: &str,
        language: Option<&LanguageCode>,
    ) -> Result<Option<CatalogSource>, Error> {
        let key = (domain.to_string(), language.map(|l| l.as_str().to_string()));
        Ok(self.catalogs.get(&key).cloned())
    }

    fn image(&self, name: &str) -> Option<ImageHandle> {
        self.images.contains(name).then(|| ImageHandle {
            name: name.to_string(),
            path: None,
        })
    }

    fn font(&self, spec: &FontSpec) -> Option<FontHandle> {
        let known = match &self.fonts {
            Some(fonts) => fonts.contains(&spec.name),
            None => !spec.name.is_empty(),
        };
        known.then(|| FontHandle {
            name: spec.name.clone(),
            size: spec.size,
            path: None,
        })
    }
}
