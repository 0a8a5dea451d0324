//! All supported catalog file formats.
//!
//! This module re-exports the main types for each format and provides
//! the [`FormatType`] enum used by providers and the loader to pick a parser.

pub mod json;
pub mod plist;
pub mod strings;

use std::{
    fmt::{Display, Formatter},
    io::Write,
    path::Path,
    str::FromStr,
};

// Reexporting the formats for easier access
pub use json::Format as JsonFormat;
pub use plist::Format as PlistFormat;
pub use strings::Format as StringsFormat;

use crate::{Error, traits::Parser, types::Catalog};

/// Represents all supported catalog file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatType {
    /// Apple XML property list holding a `<dict>`.
    Plist,
    /// JSON object.
    Json,
    /// Apple `.strings` key/value file.
    Strings,
}

/// Implements [`std::fmt::Display`] for [`FormatType`].
///
/// # Example
/// ```rust
/// use localizer::formats::FormatType;
/// assert_eq!(FormatType::Plist.to_string(), "plist");
/// assert_eq!(FormatType::Strings.to_string(), "strings");
/// ```
impl Display for FormatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatType::Plist => write!(f, "plist"),
            FormatType::Json => write!(f, "json"),
            FormatType::Strings => write!(f, "strings"),
        }
    }
}

/// Implements [`std::str::FromStr`] for [`FormatType`].
///
/// Accepts case-insensitive format names or extensions.
///
/// # Example
/// ```rust
/// use localizer::formats::FormatType;
/// use std::str::FromStr;
/// assert_eq!(FormatType::from_str("PLIST").unwrap(), FormatType::Plist);
/// assert!(FormatType::from_str("xliff").is_err());
/// ```
impl FromStr for FormatType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_start_matches('.').to_ascii_lowercase();
        match s.as_str() {
            "plist" => Ok(FormatType::Plist),
            "json" => Ok(FormatType::Json),
            "strings" => Ok(FormatType::Strings),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

impl FormatType {
    /// Formats in the order file-based providers look for them.
    pub const ALL: [FormatType; 3] = [FormatType::Plist, FormatType::Json, FormatType::Strings];

    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::Plist => "plist",
            FormatType::Json => "json",
            FormatType::Strings => "strings",
        }
    }

    /// Infers the format from a path's extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        extension.parse()
    }

    /// Parses `bytes` in this format into a [`Catalog`].
    pub fn parse_catalog(&self, bytes: &[u8]) -> Result<Catalog, Error> {
        match self {
            FormatType::Plist => Catalog::try_from(PlistFormat::from_bytes(bytes)?),
            FormatType::Json => Catalog::try_from(JsonFormat::from_bytes(bytes)?),
            FormatType::Strings => Catalog::try_from(StringsFormat::from_bytes(bytes)?),
        }
    }

    /// Writes `catalog` in this format.
    pub fn write_catalog<W: Write>(&self, catalog: &Catalog, writer: W) -> Result<(), Error> {
        match self {
            FormatType::Plist => PlistFormat::from(catalog).to_writer(writer),
            FormatType::Json => JsonFormat::from(catalog).to_writer(writer),
            FormatType::Strings => StringsFormat::try_from(catalog)?.to_writer(writer),
        }
    }
}

/// Writes `catalog` to `path`, choosing the format from the extension.
pub fn write_catalog_to_file<P: AsRef<Path>>(catalog: &Catalog, path: P) -> Result<(), Error> {
    let path = path.as_ref();
    let format = FormatType::from_path(path)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    format.write_catalog(catalog, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Flattens nested dictionaries into dotted keys: `{"menu": {"title": ..}}`
/// becomes `menu.title`.
pub(crate) fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}
