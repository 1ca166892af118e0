//! Supported document formats and conversion to the canonical JSON form.

use crate::{ConfigError, ConfigResult};
use serde_json::{Map, Number, Value};
use std::fmt;
use std::str::FromStr;

/// Textual format of a config document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// JSON documents, queried with dotted paths.
    Json,
    /// YAML documents, queried with `$`-rooted YAML paths.
    Yaml,
}

impl Format {
    /// Infer a format from a file extension (`json`, `yaml`, `yml`).
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }

    /// Check that `bytes` is a syntactically valid document of this format.
    ///
    /// For YAML this means the document converts cleanly to an equivalent
    /// JSON value.
    pub fn validate(self, bytes: &[u8]) -> ConfigResult<()> {
        self.parse_json("document", bytes).map(|_| ())
    }

    /// Convert a document of this format into canonical JSON bytes.
    pub fn to_json(self, bytes: &[u8]) -> ConfigResult<Vec<u8>> {
        self.canonicalize("document", bytes)
    }

    /// Convert canonical JSON bytes into a document of this format.
    pub fn from_json(self, json: &[u8]) -> ConfigResult<Vec<u8>> {
        self.render("document", json)
    }

    pub(crate) fn canonicalize(self, label: &str, bytes: &[u8]) -> ConfigResult<Vec<u8>> {
        match self {
            Format::Json => {
                self.parse_json(label, bytes)?;
                Ok(bytes.to_vec())
            }
            Format::Yaml => {
                let value = self.parse_json(label, bytes)?;
                serde_json::to_vec(&value).map_err(|err| ConfigError::syntax(label, self, err))
            }
        }
    }

    pub(crate) fn render(self, label: &str, json: &[u8]) -> ConfigResult<Vec<u8>> {
        let value: Value = serde_json::from_slice(json)
            .map_err(|err| ConfigError::syntax(label, Format::Json, err))?;
        match self {
            Format::Json => Ok(json.to_vec()),
            Format::Yaml => serde_yaml::to_string(&json_to_yaml(&value))
                .map(String::into_bytes)
                .map_err(|err| ConfigError::syntax(label, self, err)),
        }
    }

    /// Parse a document of this format into a JSON value tree.
    pub(crate) fn parse_json(self, label: &str, bytes: &[u8]) -> ConfigResult<Value> {
        match self {
            Format::Json => {
                serde_json::from_slice(bytes).map_err(|err| ConfigError::syntax(label, self, err))
            }
            Format::Yaml => {
                let value: serde_yaml::Value = serde_yaml::from_slice(bytes)
                    .map_err(|err| ConfigError::syntax(label, self, err))?;
                yaml_to_json(value).map_err(|message| ConfigError::syntax(label, self, message))
            }
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => f.write_str("JSON"),
            Format::Yaml => f.write_str("YAML"),
        }
    }
}

impl FromStr for Format {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "JSON" => Ok(Format::Json),
            "YAML" => Ok(Format::Yaml),
            _ => Err(ConfigError::UnsupportedFormat(value.to_string())),
        }
    }
}

/// Convert a YAML value tree into JSON.
///
/// Scalar mapping keys are stringified; tags are dropped in favour of the
/// tagged value. Non-finite floats and collection keys have no JSON
/// equivalent and are rejected.
pub(crate) fn yaml_to_json(value: serde_yaml::Value) -> Result<Value, String> {
    match value {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(flag) => Ok(Value::Bool(flag)),
        serde_yaml::Value::Number(number) => yaml_number(&number).map(Value::Number),
        serde_yaml::Value::String(text) => Ok(Value::String(text)),
        serde_yaml::Value::Sequence(items) => items
            .into_iter()
            .map(yaml_to_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(yaml_key(key)?, yaml_to_json(value)?);
            }
            Ok(Value::Object(map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

/// Convert a JSON value tree into YAML.
///
/// Numbers that fit `u64`, `i64` or a finite `f64` stay numbers; anything
/// wider is written as its decimal string so no digits are lost.
pub(crate) fn json_to_yaml(value: &Value) -> serde_yaml::Value {
    match value {
        Value::Null => serde_yaml::Value::Null,
        Value::Bool(flag) => serde_yaml::Value::Bool(*flag),
        Value::Number(number) => json_number(number),
        Value::String(text) => serde_yaml::Value::String(text.clone()),
        Value::Array(items) => {
            serde_yaml::Value::Sequence(items.iter().map(json_to_yaml).collect())
        }
        Value::Object(map) => {
            let mut mapping = serde_yaml::Mapping::with_capacity(map.len());
            for (key, value) in map {
                mapping.insert(serde_yaml::Value::String(key.clone()), json_to_yaml(value));
            }
            serde_yaml::Value::Mapping(mapping)
        }
    }
}

fn json_number(number: &Number) -> serde_yaml::Value {
    if let Some(value) = number.as_u64() {
        return serde_yaml::Value::Number(value.into());
    }
    if let Some(value) = number.as_i64() {
        return serde_yaml::Value::Number(value.into());
    }
    match number.as_f64().filter(|value| Number::from_f64(*value).as_ref() == Some(number)) {
        Some(value) => serde_yaml::Value::Number(value.into()),
        None => serde_yaml::Value::String(number.to_string()),
    }
}

fn yaml_number(number: &serde_yaml::Number) -> Result<Number, String> {
    if let Some(value) = number.as_u64() {
        return Ok(Number::from(value));
    }
    if let Some(value) = number.as_i64() {
        return Ok(Number::from(value));
    }
    number
        .as_f64()
        .and_then(Number::from_f64)
        .ok_or_else(|| format!("number {number} has no json representation"))
}

fn yaml_key(key: serde_yaml::Value) -> Result<String, String> {
    match key {
        serde_yaml::Value::String(text) => Ok(text),
        serde_yaml::Value::Bool(flag) => Ok(flag.to_string()),
        serde_yaml::Value::Number(number) => Ok(number.to_string()),
        serde_yaml::Value::Null => Ok("null".to_string()),
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => {
            Err("mapping keys must be scalars".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn parses_format_names_case_insensitively() {
        assert_eq!(" json ".parse::<Format>().expect("json"), Format::Json);
        assert_eq!("Yaml".parse::<Format>().expect("yaml"), Format::Yaml);
        let err = "toml".parse::<Format>().unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
        assert!("".parse::<Format>().is_err());
    }

    #[test]
    fn infers_format_from_extension() {
        assert_eq!(Format::from_extension("yml"), Some(Format::Yaml));
        assert_eq!(Format::from_extension("JSON"), Some(Format::Json));
        assert_eq!(Format::from_extension("toml"), None);
    }

    #[test]
    fn yaml_converts_to_json_with_stringified_keys() {
        let yaml = b"http:\n  port: 80\n  hosts: [a, b]\n1: one\ntrue: yes\nratio: 0.5\n";
        let json = Format::Yaml.to_json(yaml).expect("convert");
        let value: Value = serde_json::from_slice(&json).expect("json");
        assert_eq!(
            value,
            json!({
                "http": {"port": 80, "hosts": ["a", "b"]},
                "1": "one",
                "true": "yes",
                "ratio": 0.5
            })
        );
    }

    #[test]
    fn rejects_invalid_documents() {
        let err = Format::Json.validate(b"{\"a\":").unwrap_err();
        assert!(matches!(err, ConfigError::Syntax { format: Format::Json, .. }));
        let err = Format::Yaml.validate(b"a: [1, 2\n").unwrap_err();
        assert!(matches!(err, ConfigError::Syntax { format: Format::Yaml, .. }));
        let err = Format::Yaml.validate(b"? [a, b]\n: c\n").unwrap_err();
        assert!(matches!(err, ConfigError::Syntax { .. }));
    }

    #[test]
    fn rendered_yaml_keeps_plain_numbers() {
        let yaml = Format::Yaml
            .from_json(br#"{"port":80,"offset":-3,"ratio":0.5,"huge":1e400}"#)
            .expect("render");
        let value: serde_yaml::Value = serde_yaml::from_slice(&yaml).expect("yaml");
        assert_eq!(value["port"].as_u64(), Some(80));
        assert_eq!(value["offset"].as_i64(), Some(-3));
        assert_eq!(value["ratio"].as_f64(), Some(0.5));
        assert_eq!(value["huge"].as_str(), Some("1e400"));
    }

    #[test]
    fn json_renders_back_to_yaml() {
        let yaml = Format::Yaml
            .from_json(br#"{"http":{"port":8080}}"#)
            .expect("render");
        let value: serde_yaml::Value = serde_yaml::from_slice(&yaml).expect("yaml");
        assert_eq!(value["http"]["port"].as_u64(), Some(8080));
    }
}
