//! YAML document adapter.
//!
//! Queries run against the native YAML tree and typed decoding follows YAML
//! rules. Only the raw accessors convert to JSON.

use super::{Document, decode_error};
use crate::format::yaml_to_json;
use crate::path::query_yaml;
use crate::{ConfigError, ConfigResult, Format, Raw};
use serde::de::DeserializeOwned;
use serde_yaml::Value;

/// A config backed by YAML bytes, queried with `$`-rooted paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YamlConfig {
    raw: Vec<u8>,
}

impl YamlConfig {
    /// Validate and wrap YAML bytes.
    pub fn new(raw: impl Into<Vec<u8>>) -> ConfigResult<Self> {
        let raw = raw.into();
        Format::Yaml.validate(&raw)?;
        Ok(Self { raw })
    }

    pub(crate) fn from_validated(raw: Vec<u8>) -> Self {
        Self { raw }
    }

    fn parse(&self) -> ConfigResult<Value> {
        serde_yaml::from_slice(&self.raw)
            .map_err(|err| ConfigError::syntax("config", Format::Yaml, err))
    }
}

fn to_raw(value: Value) -> ConfigResult<Raw> {
    let json = yaml_to_json(value)
        .map_err(|message| ConfigError::syntax("config", Format::Yaml, message))?;
    Raw::from_value(&json)
}

impl Document for YamlConfig {
    fn format(&self) -> Format {
        Format::Yaml
    }

    fn raw(&self) -> &[u8] {
        &self.raw
    }

    fn as_raw(&self) -> ConfigResult<Raw> {
        to_raw(self.parse()?)
    }

    fn get_raw(&self, path: &str) -> ConfigResult<Option<Raw>> {
        let value = self.parse()?;
        query_yaml(&value, path).map(to_raw).transpose()
    }

    fn as_value<T: DeserializeOwned>(&self) -> ConfigResult<T> {
        serde_yaml::from_slice(&self.raw).map_err(|err| decode_error::<T>("config", err))
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> ConfigResult<Option<T>> {
        let value = self.parse()?;
        match query_yaml(&value, path) {
            Some(found) => serde_yaml::from_value(found)
                .map(Some)
                .map_err(|err| decode_error::<T>(path, err)),
            None => Ok(None),
        }
    }
}
