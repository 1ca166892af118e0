//! Format-dispatching config produced by the retriever.

use crate::{ConfigResult, Document, Format, JsonConfig, Raw, YamlConfig};
use serde::de::DeserializeOwned;

/// Immutable config in whichever format the retriever was asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Config {
    Json(JsonConfig),
    Yaml(YamlConfig),
}

impl Config {
    /// Validate `raw` for `format` and wrap it.
    pub fn new(format: Format, raw: impl Into<Vec<u8>>) -> ConfigResult<Self> {
        match format {
            Format::Json => JsonConfig::new(raw).map(Config::Json),
            Format::Yaml => YamlConfig::new(raw).map(Config::Yaml),
        }
    }

    pub(crate) fn from_validated(format: Format, raw: Vec<u8>) -> Self {
        match format {
            Format::Json => Config::Json(JsonConfig::from_validated(raw)),
            Format::Yaml => Config::Yaml(YamlConfig::from_validated(raw)),
        }
    }
}

impl From<JsonConfig> for Config {
    fn from(config: JsonConfig) -> Self {
        Config::Json(config)
    }
}

impl From<YamlConfig> for Config {
    fn from(config: YamlConfig) -> Self {
        Config::Yaml(config)
    }
}

impl Document for Config {
    fn format(&self) -> Format {
        match self {
            Config::Json(config) => config.format(),
            Config::Yaml(config) => config.format(),
        }
    }

    fn raw(&self) -> &[u8] {
        match self {
            Config::Json(config) => config.raw(),
            Config::Yaml(config) => config.raw(),
        }
    }

    fn as_raw(&self) -> ConfigResult<Raw> {
        match self {
            Config::Json(config) => config.as_raw(),
            Config::Yaml(config) => config.as_raw(),
        }
    }

    fn get_raw(&self, path: &str) -> ConfigResult<Option<Raw>> {
        match self {
            Config::Json(config) => config.get_raw(path),
            Config::Yaml(config) => config.get_raw(path),
        }
    }

    fn as_value<T: DeserializeOwned>(&self) -> ConfigResult<T> {
        match self {
            Config::Json(config) => config.as_value(),
            Config::Yaml(config) => config.as_value(),
        }
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> ConfigResult<Option<T>> {
        match self {
            Config::Json(config) => config.get(path),
            Config::Yaml(config) => config.get(path),
        }
    }
}
