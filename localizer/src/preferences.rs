//! Persistence of the selected language.
//!
//! The preferences file is a JSON object; the language lives under
//! [`APP_LANGUAGE_KEY`]. Other keys in the file are preserved on write.

use std::path::Path;

use serde_json::{Map, Value as JsonValue};

use crate::{error::Error, types::LanguageCode};

pub const APP_LANGUAGE_KEY: &str = "app_language";

fn read_object(path: &Path) -> Result<Option<Map<String, JsonValue>>, Error> {
    if !path.is_file() {
        return Ok(None);
    }
    let content = std::fs::read(path)?;
    let value: JsonValue = serde_json::from_slice(&content)?;
    match value {
        JsonValue::Object(map) => Ok(Some(map)),
        _ => Err(Error::malformed("json", "preferences must be a JSON object")),
    }
}

/// Returns the stored language, or `None` if nothing was stored yet.
pub fn load_language<P: AsRef<Path>>(path: P) -> Result<Option<LanguageCode>, Error> {
    let Some(map) = read_object(path.as_ref())? else {
        return Ok(None);
    };
    match map.get(APP_LANGUAGE_KEY) {
        Some(JsonValue::String(code)) => code.parse().map(Some),
        Some(_) => Err(Error::malformed(
            "json",
            format!("`{}` must be a string", APP_LANGUAGE_KEY),
        )),
        None => Ok(None),
    }
}

/// Stores `language`, creating the file and its parent directories if needed.
pub fn store_language<P: AsRef<Path>>(path: P, language: &LanguageCode) -> Result<(), Error> {
    let path = path.as_ref();
    let mut map = read_object(path)?.unwrap_or_default();
    map.insert(
        APP_LANGUAGE_KEY.to_string(),
        JsonValue::String(language.to_string()),
    );

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_vec_pretty(&JsonValue::Object(map))?;
    std::fs::write(path, content)?;
    Ok(())
}
