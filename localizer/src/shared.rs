//! The process-wide localizer and free-function shortcuts to it.
//!
//! The shared instance is created on first access. Its configuration comes
//! from the TOML file named by the `LOCALIZER_CONFIG` environment variable,
//! or the defaults; it then loads the remembered language (or the default
//! one) from an [`FsProvider`](crate::provider::FsProvider) rooted at
//! `resource_dir`. Hosts that build their own [`Localizer`] replace it with
//! [`install`].
//!
//! Lookups take a read lock and language changes take the write lock, so a
//! reader never sees catalogs of two different languages at once.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use lazy_static::lazy_static;
use tracing::warn;

use crate::{
    config::LocalizerConfig,
    error::Error,
    localizer::Localizer,
    types::{FontHandle, ImageHandle},
};

/// Environment variable naming the TOML config of the shared instance.
pub const CONFIG_ENV: &str = "LOCALIZER_CONFIG";

lazy_static! {
    static ref SHARED: RwLock<Localizer> = RwLock::new(bootstrap());
}

fn bootstrap() -> Localizer {
    let config = match std::env::var_os(CONFIG_ENV) {
        Some(path) => LocalizerConfig::from_file(&path).unwrap_or_else(|err| {
            warn!(path = ?path, error = %err, "invalid localizer config, using defaults");
            LocalizerConfig::default()
        }),
        None => LocalizerConfig::default(),
    };

    let mut localizer = Localizer::from_config(config);
    if let Err(err) = localizer.bootstrap() {
        if localizer.config().logging {
            warn!(error = %err, "shared localizer starts without catalogs");
        }
    }
    localizer
}

// Catalogs are replaced in one assignment, so a poisoned lock still guards
// a whole state.

/// Read access to the shared instance.
pub fn read() -> RwLockReadGuard<'static, Localizer> {
    SHARED.read().unwrap_or_else(PoisonError::into_inner)
}

/// Write access to the shared instance.
pub fn write() -> RwLockWriteGuard<'static, Localizer> {
    SHARED.write().unwrap_or_else(PoisonError::into_inner)
}

/// Replaces the shared instance, returning the previous one.
pub fn install(localizer: Localizer) -> Localizer {
    std::mem::replace(&mut *write(), localizer)
}

pub fn change_language(code: &str) -> Result<(), Error> {
    write().change_language(code)
}

pub fn load_string_file(file: &str) -> Result<(), Error> {
    write().load_string_file(file)
}

pub fn current_language() -> Option<String> {
    read().current_language().map(ToString::to_string)
}

pub fn current_language_is_default() -> bool {
    read().current_language_is_default()
}

pub fn is_english() -> bool {
    read().is_english()
}

pub fn string_with_key(key: &str) -> String {
    read().string_with_key(key)
}

pub fn object_for_key_exists(key: &str) -> bool {
    read().object_for_key_exists(key)
}

pub fn array_with_key(key: &str) -> Vec<String> {
    read().array_with_key(key)
}

pub fn string_with_key_at_index(key: &str, index: usize) -> Result<String, Error> {
    read().string_with_key_at_index(key, index)
}

pub fn font_with_key(key: &str) -> Result<FontHandle, Error> {
    read().font_with_key(key)
}

pub fn image_named(name: &str) -> Option<ImageHandle> {
    read().image_named(name)
}

pub fn image_with_name(name: &str) -> Option<ImageHandle> {
    read().image_with_name(name)
}

pub fn image_animation_array_with_image_named(
    name: &str,
    number_of_images: usize,
) -> Result<Vec<ImageHandle>, Error> {
    read().image_animation_array_with_image_named(name, number_of_images)
}
