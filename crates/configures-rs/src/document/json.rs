//! JSON document adapter.

use super::{Document, decode_error};
use crate::path::query_json;
use crate::{ConfigError, ConfigResult, Format, Raw};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A config backed by JSON bytes, queried with dotted paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonConfig {
    raw: Vec<u8>,
}

impl JsonConfig {
    /// Validate and wrap JSON bytes.
    pub fn new(raw: impl Into<Vec<u8>>) -> ConfigResult<Self> {
        let raw = raw.into();
        Format::Json.validate(&raw)?;
        Ok(Self { raw })
    }

    /// Wrap an already validated JSON value.
    pub fn from_raw(raw: Raw) -> Self {
        Self {
            raw: raw.into_bytes(),
        }
    }

    pub(crate) fn from_validated(raw: Vec<u8>) -> Self {
        Self { raw }
    }

    fn parse(&self) -> ConfigResult<Value> {
        serde_json::from_slice(&self.raw)
            .map_err(|err| ConfigError::syntax("config", Format::Json, err))
    }
}

impl Document for JsonConfig {
    fn format(&self) -> Format {
        Format::Json
    }

    fn raw(&self) -> &[u8] {
        &self.raw
    }

    fn as_raw(&self) -> ConfigResult<Raw> {
        Raw::new(self.raw.clone())
    }

    fn get_raw(&self, path: &str) -> ConfigResult<Option<Raw>> {
        let value = self.parse()?;
        query_json(&value, path).map(|found| Raw::from_value(&found)).transpose()
    }

    fn as_value<T: DeserializeOwned>(&self) -> ConfigResult<T> {
        serde_json::from_slice(&self.raw).map_err(|err| decode_error::<T>("config", err))
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> ConfigResult<Option<T>> {
        let value = self.parse()?;
        match query_json(&value, path) {
            Some(found) => serde_json::from_value(found)
                .map(Some)
                .map_err(|err| decode_error::<T>(path, err)),
            None => Ok(None),
        }
    }
}
