//! Opaque JSON sub-documents.

use crate::{ConfigError, ConfigResult};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};
use std::fmt;
use std::str::FromStr;

/// A syntactically valid JSON value kept as text rather than decoded.
///
/// Every constructor validates its input, so a `Raw` always holds an object,
/// array, scalar or `null`. As a struct field it captures the undecoded
/// sub-document at that position, from either JSON or YAML sources.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Raw(String);

impl Raw {
    /// Validate and wrap JSON bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> ConfigResult<Self> {
        let text = String::from_utf8(bytes.into())
            .map_err(|err| ConfigError::InvalidRaw(err.to_string()))?;
        serde_json::from_str::<IgnoredAny>(&text)
            .map_err(|err| ConfigError::InvalidRaw(err.to_string()))?;
        Ok(Self(text))
    }

    /// The JSON `null` value.
    pub fn null() -> Self {
        Self("null".to_string())
    }

    pub(crate) fn from_value(value: &Value) -> ConfigResult<Self> {
        serde_json::to_string(value)
            .map(Self)
            .map_err(|err| ConfigError::InvalidRaw(err.to_string()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0.into_bytes()
    }

    /// Decode the held value into `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> ConfigResult<T> {
        serde_json::from_str(&self.0).map_err(|err| {
            ConfigError::decode(format!("raw as {}", std::any::type_name::<T>()), err)
        })
    }

    /// Parse the held value into a JSON tree.
    pub fn to_value(&self) -> ConfigResult<Value> {
        self.decode()
    }
}

impl fmt::Debug for Raw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Raw").field(&self.0).finish()
    }
}

impl fmt::Display for Raw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<[u8]> for Raw {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl FromStr for Raw {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::new(value)
    }
}

impl TryFrom<Vec<u8>> for Raw {
    type Error = ConfigError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(bytes)
    }
}

impl TryFrom<String> for Raw {
    type Error = ConfigError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::new(text)
    }
}

impl From<Raw> for Vec<u8> {
    fn from(raw: Raw) -> Self {
        raw.into_bytes()
    }
}

impl Serialize for Raw {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value: Value = serde_json::from_str(&self.0).map_err(serde::ser::Error::custom)?;
        Plain(&value).serialize(serializer)
    }
}

/// Serializes JSON numbers as native integers or floats where that is exact,
/// so non-JSON serializers see ordinary numbers.
struct Plain<'a>(&'a Value);

impl Serialize for Plain<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Number(number) => {
                if let Some(value) = number.as_u64() {
                    serializer.serialize_u64(value)
                } else if let Some(value) = number.as_i64() {
                    serializer.serialize_i64(value)
                } else if let Some(value) = number
                    .as_f64()
                    .filter(|value| Number::from_f64(*value).as_ref() == Some(number))
                {
                    serializer.serialize_f64(value)
                } else {
                    number.serialize(serializer)
                }
            }
            Value::Array(items) => serializer.collect_seq(items.iter().map(Plain)),
            Value::Object(map) => {
                serializer.collect_map(map.iter().map(|(key, value)| (key, Plain(value))))
            }
            other => other.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Raw {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Raw::from_value(&value).map_err(serde::de::Error::custom)
    }
}
