//! Naming conventions that turn logical resource names into concrete asset names.
//!
//! A name is split into stem, density marker and extension:
//! `logo@2x.png` → (`logo`, `@2x`, `png`). The default policy inserts the
//! language suffix and frame numbers into the stem, so the marker and the
//! extension always stay at the end: `logo_fr@2x.png`, `walk3@2x.png`.

use std::fmt::Display;

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::LanguageCode;

lazy_static! {
    static ref DENSITY_SUFFIX: Regex = Regex::new(r"@\d+(?:\.\d+)?x$").unwrap();
    static ref EXTENSION: Regex = Regex::new(r"\.[A-Za-z0-9]{1,5}$").unwrap();
}

/// Everything a policy may consult besides the logical name.
#[derive(Debug, Clone, Copy)]
pub struct NameContext<'a> {
    /// Active language; `None` before the first successful load.
    pub language: Option<&'a LanguageCode>,
    pub is_default_language: bool,
    pub remove_density_suffix: bool,
}

/// Derives concrete asset names from logical names.
///
/// Closures of the form `Fn(&str, &NameContext) -> Vec<String>` implement this
/// trait, so a host can swap the image convention without a new type.
pub trait NamingPolicy: Send + Sync {
    /// Candidate asset names for `name`, most specific first.
    fn image_candidates(&self, name: &str, ctx: &NameContext<'_>) -> Vec<String>;

    /// Logical name of the 1-based `frame` of the animation `name`.
    fn frame_name(&self, name: &str, frame: usize) -> String {
        let mut asset = AssetName::parse(name);
        asset.stem.push_str(&frame.to_string());
        asset.to_string()
    }

    /// Concrete font name for a font catalog entry.
    fn font_name(&self, name: &str, _ctx: &NameContext<'_>) -> String {
        name.to_string()
    }
}

impl<F> NamingPolicy for F
where
    F: Fn(&str, &NameContext<'_>) -> Vec<String> + Send + Sync,
{
    fn image_candidates(&self, name: &str, ctx: &NameContext<'_>) -> Vec<String> {
        self(name, ctx)
    }
}

/// An asset name split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetName {
    pub stem: String,
    /// Density marker including the `@`, e.g. `@2x`.
    pub density: Option<String>,
    /// Extension without the dot.
    pub extension: Option<String>,
}

impl AssetName {
    pub fn parse(name: &str) -> Self {
        if let Some(m) = DENSITY_SUFFIX.find(name).filter(|m| m.start() > 0) {
            return AssetName {
                stem: name[..m.start()].to_string(),
                density: Some(m.as_str().to_string()),
                extension: None,
            };
        }
        let (rest, extension) = match EXTENSION.find(name) {
            Some(m) if m.start() > 0 => (&name[..m.start()], Some(name[m.start() + 1..].to_string())),
            _ => (name, None),
        };
        let (stem, density) = match DENSITY_SUFFIX.find(rest) {
            Some(m) if m.start() > 0 => (&rest[..m.start()], Some(m.as_str().to_string())),
            _ => (rest, None),
        };
        AssetName {
            stem: stem.to_string(),
            density,
            extension,
        }
    }
}

impl Display for AssetName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.stem)?;
        if let Some(density) = &self.density {
            write!(f, "{}", density)?;
        }
        if let Some(extension) = &self.extension {
            write!(f, ".{}", extension)?;
        }
        Ok(())
    }
}

/// The shipped convention: `stem[_lang][@Nx][.ext]`, falling back to the
/// unsuffixed name.
#[derive(Debug, Clone)]
pub struct DefaultNamingPolicy {
    /// Placed between the stem and the language code.
    pub language_separator: String,
}

impl Default for DefaultNamingPolicy {
    fn default() -> Self {
        DefaultNamingPolicy {
            language_separator: "_".to_string(),
        }
    }
}

impl NamingPolicy for DefaultNamingPolicy {
    fn image_candidates(&self, name: &str, ctx: &NameContext<'_>) -> Vec<String> {
        let mut asset = AssetName::parse(name);
        if ctx.remove_density_suffix {
            asset.density = None;
        }

        let mut candidates = Vec::with_capacity(2);
        if let Some(language) = ctx.language.filter(|_| !ctx.is_default_language) {
            let mut localized = asset.clone();
            localized.stem = format!("{}{}{}", asset.stem, self.language_separator, language);
            candidates.push(localized.to_string());
        }
        candidates.push(asset.to_string());
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(language: Option<&'a LanguageCode>, is_default: bool, strip: bool) -> NameContext<'a> {
        NameContext {
            language,
            is_default_language: is_default,
            remove_density_suffix: strip,
        }
    }

    #[test]
    fn test_asset_name_parse() {
        assert_eq!(
            AssetName::parse("logo@2x.png"),
            AssetName {
                stem: "logo".to_string(),
                density: Some("@2x".to_string()),
                extension: Some("png".to_string()),
            }
        );
        assert_eq!(AssetName::parse("walk").to_string(), "walk");
        assert_eq!(AssetName::parse("icon@1.5x").density.as_deref(), Some("@1.5x"));
        assert_eq!(AssetName::parse(".png").stem, ".png");
        assert_eq!(AssetName::parse("@2x").stem, "@2x");
    }

    #[test]
    fn test_density_marker_is_stripped_on_request() {
        let policy = DefaultNamingPolicy::default();
        for (name, expected) in [
            ("logo@2x.png", "logo.png"),
            ("logo@3x", "logo"),
            ("logo.png", "logo.png"),
            ("me@home.png", "me@home.png"),
        ] {
            assert_eq!(policy.image_candidates(name, &ctx(None, true, true)), vec![expected]);
        }
    }

    #[test]
    fn test_default_policy_default_language() {
        let en: LanguageCode = "en".parse().unwrap();
        let policy = DefaultNamingPolicy::default();
        assert_eq!(
            policy.image_candidates("logo@2x.png", &ctx(Some(&en), true, false)),
            vec!["logo@2x.png"]
        );
    }

    #[test]
    fn test_default_policy_other_language() {
        let fr: LanguageCode = "fr".parse().unwrap();
        let policy = DefaultNamingPolicy::default();
        assert_eq!(
            policy.image_candidates("logo@2x.png", &ctx(Some(&fr), false, false)),
            vec!["logo_fr@2x.png", "logo@2x.png"]
        );
        assert_eq!(
            policy.image_candidates("logo@2x.png", &ctx(Some(&fr), false, true)),
            vec!["logo_fr.png", "logo.png"]
        );
    }

    #[test]
    fn test_frame_name_keeps_marker_and_extension_last() {
        let policy = DefaultNamingPolicy::default();
        assert_eq!(policy.frame_name("walk", 1), "walk1");
        assert_eq!(policy.frame_name("walk@2x.png", 3), "walk3@2x.png");
    }

    fn hd_policy(name: &str, _ctx: &NameContext<'_>) -> Vec<String> {
        vec![format!("hd/{}", name)]
    }

    #[test]
    fn test_function_policy() {
        let policy = hd_policy;
        assert_eq!(
            policy.image_candidates("logo", &ctx(None, true, false)),
            vec!["hd/logo"]
        );
        assert_eq!(policy.frame_name("run", 2), "run2");
    }
}
