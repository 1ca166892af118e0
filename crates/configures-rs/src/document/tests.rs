//! Tests for the JSON and YAML document adapters.

use super::*;
use crate::Config;
use pretty_assertions::assert_eq;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq)]
struct Http {
    port: u16,
    host: String,
}

const JSON_DOC: &str = r#"{"http":{"port":80,"host":"a"},"tags":["x","y"],"debug":false}"#;
const YAML_DOC: &str = "http:\n  port: 80\n  host: a\ntags:\n  - x\n  - y\ndebug: false\n";

#[test]
fn json_get_decodes_matched_path() {
    let config = JsonConfig::new(JSON_DOC).expect("config");
    let http: Option<Http> = config.get("http").expect("get");
    assert_eq!(
        http,
        Some(Http {
            port: 80,
            host: "a".to_string()
        })
    );
    let tag: Option<String> = config.get("tags.1").expect("tag");
    assert_eq!(tag.as_deref(), Some("y"));
}

#[test]
fn missing_path_is_not_an_error() {
    let config = JsonConfig::new(JSON_DOC).expect("config");
    let missing: Option<Http> = config.get("grpc").expect("get");
    assert!(missing.is_none());
    let yaml = YamlConfig::new(YAML_DOC).expect("config");
    let missing: Option<Http> = yaml.get("$.grpc").expect("get");
    assert!(missing.is_none());
}

#[test]
fn shape_mismatch_is_a_decode_error() {
    let config = JsonConfig::new(JSON_DOC).expect("config");
    let err = config.get::<Http>("tags").unwrap_err();
    assert!(matches!(err, ConfigError::Decode { ref target, .. } if target.starts_with("tags as")));
    let yaml = YamlConfig::new(YAML_DOC).expect("config");
    let err = yaml.get::<u16>("$.http.host").unwrap_err();
    assert!(matches!(err, ConfigError::Decode { .. }));
}

#[test]
fn yaml_get_uses_yaml_paths() {
    let config = YamlConfig::new(YAML_DOC).expect("config");
    let http: Option<Http> = config.get("$.http").expect("get");
    assert_eq!(http.map(|http| http.port), Some(80));
    let tags: Option<Vec<String>> = config.get("$.tags").expect("tags");
    assert_eq!(tags, Some(vec!["x".to_string(), "y".to_string()]));
}

#[test]
fn whole_document_decodes_in_both_formats() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct App {
        http: Http,
        tags: Vec<String>,
        debug: bool,
    }
    let json: App = JsonConfig::new(JSON_DOC).expect("json").as_value().expect("as");
    let yaml: App = YamlConfig::new(YAML_DOC).expect("yaml").as_value().expect("as");
    assert_eq!(json, yaml);
}

#[test]
fn yaml_as_raw_is_json() {
    let config = YamlConfig::new(YAML_DOC).expect("config");
    let raw = config.as_raw().expect("raw");
    let json = JsonConfig::new(JSON_DOC).expect("json").as_raw().expect("raw");
    assert_eq!(raw.to_value().expect("value"), json.to_value().expect("value"));
}

#[test]
fn raw_round_trip_matches_direct_decode() {
    for config in [
        Config::new(Format::Json, JSON_DOC).expect("json"),
        Config::new(Format::Yaml, YAML_DOC).expect("yaml"),
    ] {
        let path = match config.format() {
            Format::Json => "http",
            Format::Yaml => "$.http",
        };
        let direct: Http = config.get(path).expect("get").expect("present");
        let raw: Raw = config.get(path).expect("get raw").expect("present");
        let via_raw: Http = raw.decode().expect("decode");
        assert_eq!(direct, via_raw);
    }
}

#[test]
fn node_extracts_independent_json_config() {
    let config = YamlConfig::new(YAML_DOC).expect("config");
    let node = config.node("$.http").expect("node").expect("present");
    assert_eq!(node.format(), Format::Json);
    let port: Option<u16> = node.get("port").expect("port");
    assert_eq!(port, Some(80));
    assert!(config.node("$.missing").expect("node").is_none());

    let json = Config::new(Format::Json, JSON_DOC).expect("json");
    let node = json.node("tags").expect("node").expect("present");
    assert_eq!(node.raw(), br#"["x","y"]"#);
}

#[test]
fn constructors_validate_input() {
    assert!(matches!(
        JsonConfig::new("{").unwrap_err(),
        ConfigError::Syntax { format: Format::Json, .. }
    ));
    assert!(matches!(
        YamlConfig::new("a: [").unwrap_err(),
        ConfigError::Syntax { format: Format::Yaml, .. }
    ));
}

#[test]
fn documents_are_usable_as_trait_objects() {
    let documents: Vec<Box<dyn Document>> = vec![
        Box::new(JsonConfig::new(JSON_DOC).expect("json")),
        Box::new(YamlConfig::new(YAML_DOC).expect("yaml")),
    ];
    let paths = ["http.port", "$.http.port"];
    for (document, path) in documents.iter().zip(paths) {
        let port = document.get_raw(path).expect("get").expect("present");
        assert_eq!(port.as_str(), "80");
    }
}

#[test]
fn json_queries_keep_wide_numbers_verbatim() {
    let config = JsonConfig::new(r#"{"id":12345678901234567890123,"x":1e400}"#).expect("config");
    let id = config.get_raw("id").expect("get").expect("present");
    assert_eq!(id.as_str(), "12345678901234567890123");
    let x = config.get_raw("x").expect("get").expect("present");
    assert_eq!(x.as_str(), "1e400");
    let node = config.node("").expect("node").expect("present");
    assert_eq!(node.raw(), br#"{"id":12345678901234567890123,"x":1e400}"#);
}
