#![forbid(unsafe_code)]
//! Runtime localization resolver for Rust.
//!
//! Loads per-language catalogs of display strings and font identifiers from
//! Apple property lists, JSON or `.strings` files, and answers key-based
//! lookups: plain strings, delimiter-separated composite values, indexed
//! items, fonts, localized image names and numbered animation frames.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use localizer::{Localizer, LocalizerConfig};
//!
//! // Catalogs live in `resources/`: strings_fr.plist, fonts.json, images/...
//! let config = LocalizerConfig::default().with_resource_dir("resources");
//! let mut localizer = Localizer::from_config(config);
//! localizer.change_language("fr")?;
//!
//! let title = localizer.string_with_key("welcome.title");
//! let weekdays = localizer.array_with_key("weekdays");
//! let logo = localizer.image_named("logo@2x.png");
//! # Ok::<(), localizer::Error>(())
//! ```
//!
//! Or go through the process-wide instance:
//!
//! ```rust,no_run
//! localizer::shared::change_language("de")?;
//! let title = localizer::shared::string_with_key("welcome.title");
//! # Ok::<(), localizer::Error>(())
//! ```
//!
//! # Supported Formats
//!
//! - **Property list** (`.plist`): `<dict>` of strings, numbers, booleans and arrays
//! - **JSON** (`.json`): object of strings and arrays, nested objects become dotted keys
//! - **Apple `.strings`**: `"key" = "value";` pairs, UTF-8 or UTF-16

pub mod config;
pub mod error;
pub mod formats;
pub mod loader;
pub mod localizer;
pub mod naming;
pub mod preferences;
pub mod provider;
pub mod shared;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    config::LocalizerConfig,
    error::Error,
    formats::FormatType,
    localizer::Localizer,
    naming::{DefaultNamingPolicy, NameContext, NamingPolicy},
    provider::{FsProvider, MemoryProvider, ResourceProvider},
    types::{Catalog, Domain, FontHandle, FontSpec, ImageHandle, LanguageCode, Value},
};
