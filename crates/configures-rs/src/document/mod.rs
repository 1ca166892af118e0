//! Format adapters exposing a uniform query surface over stored bytes.
//!
//! No parsed tree is kept between calls: each query re-parses the stored
//! document, so a value is never shared between two configs.

mod json;
mod yaml;

#[cfg(test)]
mod tests;

use crate::{ConfigError, ConfigResult, Format, Raw};
use serde::de::DeserializeOwned;

pub use json::JsonConfig;
pub use yaml::YamlConfig;

/// Read-only view over one validated document.
///
/// The object-safe core returns undecoded [`Raw`] values; the typed helpers
/// decode those into caller-chosen shapes. Implementations override the typed
/// helpers when their format has its own decoding rules.
pub trait Document {
    /// Format the stored bytes are written in.
    fn format(&self) -> Format;

    /// Stored bytes. Callers must treat them as read-only.
    fn raw(&self) -> &[u8];

    /// The whole document as a JSON value.
    fn as_raw(&self) -> ConfigResult<Raw>;

    /// The value at `path` as JSON, or `None` when the path matches nothing.
    fn get_raw(&self, path: &str) -> ConfigResult<Option<Raw>>;

    /// Decode the whole document into `T`.
    fn as_value<T: DeserializeOwned>(&self) -> ConfigResult<T>
    where
        Self: Sized,
    {
        decode_raw(&self.as_raw()?, "config")
    }

    /// Decode the value at `path` into `T`.
    ///
    /// A missing path is `Ok(None)`; a match that does not fit `T` is an error.
    fn get<T: DeserializeOwned>(&self, path: &str) -> ConfigResult<Option<T>>
    where
        Self: Sized,
    {
        match self.get_raw(path)? {
            Some(raw) => decode_raw(&raw, path).map(Some),
            None => Ok(None),
        }
    }

    /// Copy the value at `path` out into an independent JSON config.
    fn node(&self, path: &str) -> ConfigResult<Option<JsonConfig>>
    where
        Self: Sized,
    {
        Ok(self.get_raw(path)?.map(JsonConfig::from_raw))
    }
}

fn decode_raw<T: DeserializeOwned>(raw: &Raw, at: &str) -> ConfigResult<T> {
    serde_json::from_str(raw.as_str()).map_err(|err| decode_error::<T>(at, err))
}

pub(crate) fn decode_error<T>(at: &str, err: impl ToString) -> ConfigError {
    ConfigError::decode(format!("{at} as {}", std::any::type_name::<T>()), err)
}
