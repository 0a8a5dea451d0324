//! All error types for the localizer crate.
//!
//! Load failures (`Io`, `XmlParse`, `JsonParse`, `Malformed`,
//! `ResourceNotFound`) leave the active catalogs untouched. Lookup failures
//! (`KeyMissing`, `IndexOutOfBounds`, `FontNotFound`, `MissingFrame`) are
//! returned by the accessors that have no sensible fallback value.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("unknown format `{0}`")]
    UnknownFormat(String),

    #[error("malformed {format} resource: {message}")]
    Malformed { format: String, message: String },

    #[error("no `{domain}` resource for language `{language}` and no default resource")]
    ResourceNotFound { domain: String, language: String },

    #[error("invalid language code `{0}`")]
    InvalidLanguage(String),

    #[error("language `{0}` is not in the available languages")]
    UnavailableLanguage(String),

    #[error("key `{key}` not found in `{domain}`")]
    KeyMissing { domain: String, key: String },

    #[error("index {index} out of bounds for key `{key}` with {len} element(s)")]
    IndexOutOfBounds {
        key: String,
        index: usize,
        len: usize,
    },

    #[error("invalid value for key `{key}`: {message}")]
    InvalidValue { key: String, message: String },

    #[error("font `{0}` could not be resolved")]
    FontNotFound(String),

    #[error("animation `{name}` is missing frame {frame}")]
    MissingFrame { name: String, frame: usize },
}

impl Error {
    /// Creates a new malformed-resource error for the given format.
    pub fn malformed(format: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Malformed {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Creates a new key-missing error for the given domain.
    pub fn key_missing(domain: impl Into<String>, key: impl Into<String>) -> Self {
        Error::KeyMissing {
            domain: domain.into(),
            key: key.into(),
        }
    }

    /// Returns `true` for errors produced while loading a catalog.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Error::Io(_)
                | Error::XmlParse(_)
                | Error::JsonParse(_)
                | Error::Malformed { .. }
                | Error::ResourceNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = Error::Io(io_error);
        assert!(error.to_string().contains("I/O error"));
        assert!(error.is_load_failure());
    }

    #[test]
    fn test_json_parse_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{ invalid json }").unwrap_err();
        let error = Error::from(json_error);
        assert!(error.to_string().contains("JSON parse error"));
    }

    #[test]
    fn test_malformed_error() {
        let error = Error::malformed("plist", "unexpected <data>");
        assert_eq!(
            error.to_string(),
            "malformed plist resource: unexpected <data>"
        );
        assert!(error.is_load_failure());
    }

    #[test]
    fn test_resource_not_found_error() {
        let error = Error::ResourceNotFound {
            domain: "strings".to_string(),
            language: "fr".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "no `strings` resource for language `fr` and no default resource"
        );
    }

    #[test]
    fn test_index_out_of_bounds_error() {
        let error = Error::IndexOutOfBounds {
            key: "days".to_string(),
            index: 5,
            len: 3,
        };
        assert_eq!(
            error.to_string(),
            "index 5 out of bounds for key `days` with 3 element(s)"
        );
        assert!(!error.is_load_failure());
    }

    #[test]
    fn test_key_missing_error() {
        let error = Error::key_missing("fonts", "title");
        assert_eq!(error.to_string(), "key `title` not found in `fonts`");
    }

    #[test]
    fn test_missing_frame_error() {
        let error = Error::MissingFrame {
            name: "walk".to_string(),
            frame: 2,
        };
        assert_eq!(error.to_string(), "animation `walk` is missing frame 2");
    }

    #[test]
    fn test_error_debug() {
        let error = Error::UnknownFormat("test".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("UnknownFormat"));
        assert!(debug.contains("test"));
    }
}
